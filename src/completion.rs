//! What happens after the editor exits: read the message back into the input
//! line, remove the scratch file, refresh the window.

use weechat_edit_process::ProcessOutput;

use crate::host::{BufferId, Host, ReturnCode};
use crate::scratch::ScratchFile;

/// Host command issued after every change to the input line.
pub const REFRESH_COMMAND: &str = "/window refresh";

/// A single edit in flight: the buffer whose input is edited and the file
/// holding the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub buffer: BufferId,
    pub scratch: ScratchFile,
}

impl EditSession {
    pub fn new(buffer: BufferId, scratch: ScratchFile) -> Self {
        Self { buffer, scratch }
    }
}

/// Put the trimmed scratch content into the input line with the cursor at
/// its end. An unreadable scratch file leaves the input untouched. Always
/// refreshes the window.
pub fn read_back<H: Host + ?Sized>(host: &mut H, session: &EditSession) {
    if let Some(text) = session.scratch.read_trimmed() {
        host.set_input(&session.buffer, &text);
        host.set_input_pos(&session.buffer, text.chars().count());
    }
    host.command(&session.buffer, REFRESH_COMMAND);
}

/// Remove the scratch file (best effort) and refresh the window.
pub fn cleanup<H: Host + ?Sized>(host: &mut H, session: &EditSession) {
    session.scratch.remove();
    host.command(&session.buffer, REFRESH_COMMAND);
}

/// Completion handler for an editor run in an external terminal.
///
/// On exit code zero the message is read back and the scratch file removed.
/// Otherwise the scratch file is removed and `"<stderr>: <code>"` is printed
/// on the core buffer.
pub fn editor_finished<H: Host + ?Sized>(
    host: &mut H,
    session: &EditSession,
    output: ProcessOutput,
) -> ReturnCode {
    if !output.success() {
        log::warn!(
            "External editor exited with {} (stderr: {:?})",
            output.return_code,
            output.stderr
        );
        cleanup(host, session);
        host.print(
            None,
            &format!("{}: {}", output.stderr.trim(), output.return_code),
        );
        return ReturnCode::Error;
    }

    read_back(host, session);
    cleanup(host, session);
    ReturnCode::Ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standalone::StandaloneHost;
    use tempfile::TempDir;
    use weechat_edit_config::OptionsFile;

    fn session(dir: &TempDir) -> (StandaloneHost, EditSession) {
        let host = StandaloneHost::new(OptionsFile::default());
        let session = EditSession::new(
            BufferId::new("irc.libera.#weechat"),
            ScratchFile::in_dir(dir.path()),
        );
        (host, session)
    }

    fn output(code: i32, stderr: &str) -> ProcessOutput {
        ProcessOutput {
            return_code: code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn finished_editor_sets_input_and_removes_scratch() {
        let dir = TempDir::new().unwrap();
        let (mut host, session) = session(&dir);
        session.scratch.write("", "\n  edited text \n").unwrap();

        let rc = editor_finished(&mut host, &session, output(0, ""));

        assert_eq!(rc, ReturnCode::Ok);
        let line = host.input_line(&session.buffer);
        assert_eq!(line.text, "edited text");
        assert_eq!(line.pos, 11);
        assert!(!session.scratch.exists());
        assert!(host.printed().is_empty());
    }

    #[test]
    fn failed_editor_prints_trimmed_stderr_and_code() {
        let dir = TempDir::new().unwrap();
        let (mut host, session) = session(&dir);
        host.set_input(&session.buffer, "unchanged");
        session.scratch.write("", "discarded").unwrap();

        let rc = editor_finished(&mut host, &session, output(127, "xterm: not found\n"));

        assert_eq!(rc, ReturnCode::Error);
        assert_eq!(host.printed(), ["xterm: not found: 127"]);
        assert_eq!(host.input_line(&session.buffer).text, "unchanged");
        assert!(!session.scratch.exists());
    }

    #[test]
    fn timed_out_editor_reports_hook_error_code() {
        let dir = TempDir::new().unwrap();
        let (mut host, session) = session(&dir);

        let rc = editor_finished(
            &mut host,
            &session,
            output(weechat_edit_process::HOOK_PROCESS_ERROR, ""),
        );

        assert_eq!(rc, ReturnCode::Error);
        assert_eq!(host.printed(), [": -2"]);
    }

    #[test]
    fn read_back_without_scratch_keeps_input_and_refreshes() {
        let dir = TempDir::new().unwrap();
        let (mut host, session) = session(&dir);
        host.set_input(&session.buffer, "draft");

        read_back(&mut host, &session);

        assert_eq!(host.input_line(&session.buffer).text, "draft");
        assert_eq!(
            host.issued_commands(),
            [(session.buffer.clone(), REFRESH_COMMAND.to_string())]
        );
    }
}
