//! Single editor subprocess management.
//!
//! [`run_blocking`] runs the editor attached to the caller's terminal and waits
//! for it. [`HookedProcess`] runs a command detached from the terminal with
//! piped stdout/stderr, collecting both as raw bytes on background threads.

use std::io::{ErrorKind, Read};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::error::ProcessError;
use crate::output::{HOOK_PROCESS_ERROR, ProcessOutput};

/// Run `argv` with inherited stdio and wait for it to exit.
///
/// Returns the exit code, or [`HOOK_PROCESS_ERROR`] if the process was
/// terminated by a signal.
///
/// # Errors
/// Returns an error if `argv` is empty or the program cannot be spawned.
pub fn run_blocking(argv: &[String]) -> Result<i32, ProcessError> {
    let (program, args) = argv.split_first().ok_or(ProcessError::EmptyCommand)?;

    log::debug!("Running editor in foreground: {:?}", argv);
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|source| ProcessError::Spawn {
            program: program.clone(),
            source,
        })?;

    let code = ProcessOutput::code_from_status(status.code());
    log::debug!("Editor '{}' exited with {}", program, code);
    Ok(code)
}

/// How long a finished process may keep its output pipes open before the
/// output collected so far is reported. Covers grandchildren that inherited
/// the pipes and outlive the process itself.
pub const OUTPUT_GRACE: Duration = Duration::from_millis(200);

/// Bytes read from one output pipe by a background reader thread.
#[derive(Default)]
struct Capture {
    bytes: Mutex<Vec<u8>>,
    /// Set by the reader once the pipe reached end of file.
    eof: AtomicBool,
    /// Set by the owner once the output has been reported.
    abandoned: AtomicBool,
}

impl Capture {
    fn take_text(&self) -> String {
        let bytes = std::mem::take(&mut *self.bytes.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

/// A detached subprocess whose output is captured for a completion callback.
pub struct HookedProcess {
    /// Program name, kept for log messages.
    program: String,
    /// The child process handle, if not yet reaped.
    child: Option<Child>,
    /// Exit code and time of exit, once reaped and until reported.
    exited: Option<(i32, Instant)>,
    stdout: Arc<Capture>,
    stderr: Arc<Capture>,
}

impl HookedProcess {
    /// Spawn `argv` with stdin closed and stdout/stderr piped.
    ///
    /// # Errors
    /// Returns an error if `argv` is empty or the program cannot be spawned.
    pub fn spawn(argv: &[String]) -> Result<Self, ProcessError> {
        let (program, args) = argv.split_first().ok_or(ProcessError::EmptyCommand)?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdout = Arc::new(Capture::default());
        let stderr = Arc::new(Capture::default());

        match child.stdout.take() {
            Some(pipe) => spawn_reader(pipe, Arc::clone(&stdout), "stdout"),
            None => stdout.eof.store(true, Ordering::Release),
        }
        match child.stderr.take() {
            Some(pipe) => spawn_reader(pipe, Arc::clone(&stderr), "stderr"),
            None => stderr.eof.store(true, Ordering::Release),
        }

        log::debug!("Hooked process started: {:?}", argv);

        Ok(Self {
            program: program.clone(),
            child: Some(child),
            exited: None,
            stdout,
            stderr,
        })
    }

    /// Program name this process was started with.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether the process itself has not exited yet.
    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }

    /// Check without blocking whether the process has finished.
    ///
    /// A process is finished once it has exited and both output pipes are
    /// closed, or [`OUTPUT_GRACE`] after its exit if something else still
    /// holds a pipe open. Returns the collected output the first time the
    /// process is finished and `None` on every other call.
    pub fn try_finish(&mut self) -> Option<ProcessOutput> {
        if let Some(child) = self.child.as_mut() {
            let code = match child.try_wait() {
                Ok(Some(status)) => ProcessOutput::code_from_status(status.code()),
                Ok(None) => return None,
                Err(e) => {
                    log::warn!("Failed to poll '{}': {}", self.program, e);
                    HOOK_PROCESS_ERROR
                }
            };
            self.child = None;
            self.exited = Some((code, Instant::now()));
        }

        let (code, exited_at) = self.exited?;
        if !self.output_closed() {
            if exited_at.elapsed() < OUTPUT_GRACE {
                return None;
            }
            log::debug!(
                "'{}' exited but its output is still held open, reporting partial output",
                self.program
            );
        }
        self.exited = None;
        Some(self.collect(code))
    }

    /// Kill the process and return its output with `return_code`.
    ///
    /// Returns `None` if the process had already exited.
    pub fn kill_with(&mut self, return_code: i32) -> Option<ProcessOutput> {
        let mut child = self.child.take()?;
        let _ = child.kill();
        let _ = child.wait();
        Some(self.collect(return_code))
    }

    fn output_closed(&self) -> bool {
        self.stdout.eof.load(Ordering::Acquire) && self.stderr.eof.load(Ordering::Acquire)
    }

    fn collect(&mut self, return_code: i32) -> ProcessOutput {
        self.stdout.abandoned.store(true, Ordering::Release);
        self.stderr.abandoned.store(true, Ordering::Release);
        ProcessOutput {
            return_code,
            stdout: self.stdout.take_text(),
            stderr: self.stderr.take_text(),
        }
    }
}

impl Drop for HookedProcess {
    fn drop(&mut self) {
        self.stdout.abandoned.store(true, Ordering::Release);
        self.stderr.abandoned.store(true, Ordering::Release);
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Drain `stream` into `capture` until end of file. The thread is never
/// joined; it stops at end of file or at the first read after the owner
/// abandoned the capture.
fn spawn_reader<R>(mut stream: R, capture: Arc<Capture>, name: &'static str)
where
    R: Read + Send + 'static,
{
    std::thread::spawn(move || {
        let mut chunk = [0u8; 4096];
        while !capture.abandoned.load(Ordering::Acquire) {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => capture.bytes.lock().extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::warn!("HookedProcess: error reading {}: {}", name, e);
                    break;
                }
            }
        }
        capture.eof.store(true, Ordering::Release);
    });
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn wait_for(process: &mut HookedProcess) -> ProcessOutput {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(out) = process.try_finish() {
                return out;
            }
            assert!(Instant::now() < deadline, "process did not finish in time");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn run_blocking_reports_exit_code() {
        assert_eq!(run_blocking(&argv(&["sh", "-c", "exit 0"])).unwrap(), 0);
        assert_eq!(run_blocking(&argv(&["sh", "-c", "exit 7"])).unwrap(), 7);
    }

    #[test]
    fn run_blocking_rejects_missing_program() {
        let err = run_blocking(&argv(&["nonexistent_editor_binary_12345"])).unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
    }

    #[test]
    fn hooked_process_captures_output_and_code() {
        let mut process =
            HookedProcess::spawn(&argv(&["sh", "-c", "echo out; echo err >&2; exit 3"])).unwrap();
        let out = wait_for(&mut process);
        assert_eq!(out.return_code, 3);
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
        assert!(
            process.try_finish().is_none(),
            "completion is reported once"
        );
    }

    #[test]
    fn kill_with_reports_given_code() {
        let mut process = HookedProcess::spawn(&argv(&["sleep", "30"])).unwrap();
        let out = process.kill_with(HOOK_PROCESS_ERROR).unwrap();
        assert_eq!(out.return_code, HOOK_PROCESS_ERROR);
        assert!(process.kill_with(HOOK_PROCESS_ERROR).is_none());
    }

    #[test]
    fn output_bytes_are_kept_as_written() {
        let mut process = HookedProcess::spawn(&argv(&[
            "sh",
            "-c",
            r#"printf 'a\r\nb'; printf '\377\n' >&2; sleep 0.2; echo more >&2"#,
        ]))
        .unwrap();
        let out = wait_for(&mut process);
        assert_eq!(out.return_code, 0, "invalid UTF-8 must not break the pipe");
        assert_eq!(out.stdout, "a\r\nb");
        assert_eq!(out.stderr, "\u{FFFD}\nmore\n");
    }

    #[test]
    fn leftover_child_holding_pipes_does_not_block() {
        let mut process =
            HookedProcess::spawn(&argv(&["sh", "-c", "sleep 3 & echo started"])).unwrap();

        let started = Instant::now();
        let out = loop {
            let poll_started = Instant::now();
            let finished = process.try_finish();
            assert!(poll_started.elapsed() < Duration::from_millis(100));
            if let Some(out) = finished {
                break out;
            }
            std::thread::sleep(Duration::from_millis(10));
        };

        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(out.return_code, 0);
        assert_eq!(out.stdout, "started\n");
    }
}
