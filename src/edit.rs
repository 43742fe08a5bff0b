//! The `/edit` command handler.
//!
//! Builds the scratch file from the seed and the current input line, then
//! runs the editor either in the foreground (the host waits) or in a separate
//! terminal hooked through the host, with [`completion`] finishing the job.
//!
//! [`completion`]: crate::completion

use weechat_edit_config::{EditorSettings, OptionKey};
use weechat_edit_process::{blocking_argv, external_command_line, run_blocking};

use crate::completion::{EditSession, cleanup, editor_finished, read_back};
use crate::error::EditError;
use crate::host::{Host, ReturnCode};
use crate::seed::Seed;

/// Timeout passed with the external editor hook: none.
pub const EXTERNAL_EDITOR_TIMEOUT_MS: u64 = 0;

/// Read the effective settings through the host's plugin options.
pub fn settings_from_host<H: Host + ?Sized>(host: &H) -> EditorSettings {
    EditorSettings::resolve(|key: OptionKey| host.plugin_option(key.as_str()))
}

/// Handle `/edit <args>` for `session`.
///
/// Failures that prevent the edit from starting are printed on the core
/// buffer and reported as [`ReturnCode::Error`].
pub fn run_edit<H: Host + ?Sized>(host: &mut H, session: &EditSession, args: &str) -> ReturnCode {
    let settings = settings_from_host(host);
    match try_run_edit(host, session, &settings, args) {
        Ok(rc) => rc,
        Err(e) => {
            log::error!("/edit failed: {}", e);
            crate::debug_error!("EDIT", "/edit {:?} failed: {}", args, e);
            host.print(None, &format!("edit: {e}"));
            ReturnCode::Error
        }
    }
}

/// Like [`run_edit`] with explicit settings, returning the failure instead
/// of printing it.
pub fn try_run_edit<H: Host + ?Sized>(
    host: &mut H,
    session: &EditSession,
    settings: &EditorSettings,
    args: &str,
) -> Result<ReturnCode, EditError> {
    let seed = Seed::from_args(args).content(&settings.paste_file)?;
    let input = host.input(&session.buffer);
    session
        .scratch
        .write(&seed, &input)
        .map_err(|source| EditError::ScratchWrite {
            path: session.scratch.path().to_path_buf(),
            source,
        })?;

    crate::debug_info!(
        "EDIT",
        "Scratch file {:?} seeded ({} bytes), external={}",
        session.scratch.path(),
        seed.len() + input.len(),
        settings.run_externally
    );

    if settings.run_externally {
        hook_external_editor(host, session, settings)
    } else {
        run_foreground_editor(host, session, settings)
    }
}

/// Run the editor attached to the host's terminal and wait for it.
///
/// A non-zero exit removes the scratch file before the read-back, which then
/// finds nothing and leaves the input line as it was.
pub fn run_foreground_editor<H: Host + ?Sized>(
    host: &mut H,
    session: &EditSession,
    settings: &EditorSettings,
) -> Result<ReturnCode, EditError> {
    let code = match blocking_argv(&settings.editor, session.scratch.path())
        .and_then(|argv| run_blocking(&argv))
    {
        Ok(code) => code,
        Err(e) => {
            cleanup(host, session);
            return Err(e.into());
        }
    };

    if code != 0 {
        log::warn!("Editor '{}' exited with {}", settings.editor, code);
        cleanup(host, session);
        read_back(host, session);
    } else {
        read_back(host, session);
        cleanup(host, session);
    }
    Ok(ReturnCode::Ok)
}

/// Open the editor in a new terminal window and return immediately; the
/// host calls back into [`editor_finished`] when the terminal exits.
pub fn hook_external_editor<H: Host + ?Sized>(
    host: &mut H,
    session: &EditSession,
    settings: &EditorSettings,
) -> Result<ReturnCode, EditError> {
    let command = external_command_line(
        &settings.terminal,
        &settings.editor,
        session.scratch.path(),
    );
    crate::debug_info!("EDIT", "Hooking external editor: {}", command);

    let pending = session.clone();
    let hooked = host.hook_process(
        &command,
        EXTERNAL_EDITOR_TIMEOUT_MS,
        Box::new(move |host: &mut dyn Host, output| {
            editor_finished(host, &pending, output)
        }),
    );

    match hooked {
        Ok(id) => {
            log::debug!("External editor hooked as {}", id);
            Ok(ReturnCode::Ok)
        }
        Err(e) => {
            cleanup(host, session);
            Err(e.into())
        }
    }
}
