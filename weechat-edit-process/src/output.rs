//! Result of a hooked process, as delivered to its completion callback.

/// Return code reported when a hooked process could not produce an exit
/// status: it timed out, was killed by a signal, or its status was lost.
pub const HOOK_PROCESS_ERROR: i32 = -2;

/// Everything a completion callback learns about a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code of the process, or [`HOOK_PROCESS_ERROR`].
    pub return_code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.return_code == 0
    }

    /// Map an optional exit code (`None` when terminated by a signal) to a
    /// hook return code.
    pub fn code_from_status(code: Option<i32>) -> i32 {
        code.unwrap_or(HOOK_PROCESS_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_termination_maps_to_hook_error() {
        assert_eq!(ProcessOutput::code_from_status(None), HOOK_PROCESS_ERROR);
        assert_eq!(ProcessOutput::code_from_status(Some(3)), 3);
    }

    #[test]
    fn success_only_for_zero() {
        let mut out = ProcessOutput::default();
        assert!(out.success());
        out.return_code = 1;
        assert!(!out.success());
        out.return_code = HOOK_PROCESS_ERROR;
        assert!(!out.success());
    }
}
