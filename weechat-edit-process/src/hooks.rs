//! Registry of hooked processes awaiting completion.
//!
//! [`ProcessHooks`] owns every [`HookedProcess`] started on behalf of the host,
//! each paired with caller data (typically the completion callback). The host
//! event loop calls [`ProcessHooks::poll`] to collect finished hooks; each
//! hook is handed back exactly once and then forgotten.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::command::split_command;
use crate::error::ProcessError;
use crate::output::{HOOK_PROCESS_ERROR, ProcessOutput};
use crate::process::HookedProcess;

/// Unique identifier for a hooked process.
pub type HookId = u64;

struct Hook<T> {
    process: HookedProcess,
    deadline: Option<Instant>,
    data: T,
}

/// Hooked processes keyed by [`HookId`], each carrying data of type `T`.
pub struct ProcessHooks<T> {
    /// Next ID to assign to a new hook.
    next_id: HookId,
    /// Hooks whose process has not been reported yet.
    hooks: HashMap<HookId, Hook<T>>,
}

impl<T> ProcessHooks<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            hooks: HashMap::new(),
        }
    }

    /// Start `command` (split with shell-word rules) and attach `data` to it.
    ///
    /// A `timeout` of `None` or zero means the process may run forever.
    ///
    /// # Errors
    /// Returns an error if the command cannot be parsed or spawned; `data` is
    /// dropped in that case.
    pub fn spawn(
        &mut self,
        command: &str,
        timeout: Option<Duration>,
        data: T,
    ) -> Result<HookId, ProcessError> {
        let argv = split_command(command)?;
        let process = HookedProcess::spawn(&argv)?;
        let deadline = timeout
            .filter(|t| !t.is_zero())
            .map(|t| Instant::now() + t);

        let id = self.next_id;
        self.next_id += 1;
        self.hooks.insert(
            id,
            Hook {
                process,
                deadline,
                data,
            },
        );
        log::debug!("Hook {} registered for {:?}", id, command);
        Ok(id)
    }

    /// Collect every hook whose process has exited or timed out.
    ///
    /// Timed-out processes are killed and reported with
    /// [`HOOK_PROCESS_ERROR`].
    pub fn poll(&mut self) -> Vec<(HookId, T, ProcessOutput)> {
        let now = Instant::now();
        let mut finished = Vec::new();

        for (&id, hook) in self.hooks.iter_mut() {
            if let Some(output) = hook.process.try_finish() {
                finished.push((id, output));
            } else if hook.process.is_running() && hook.deadline.is_some_and(|d| now >= d) {
                log::warn!(
                    "Hook {} ('{}') timed out, killing it",
                    id,
                    hook.process.program()
                );
                if let Some(output) = hook.process.kill_with(HOOK_PROCESS_ERROR) {
                    finished.push((id, output));
                }
            }
        }

        finished
            .into_iter()
            .filter_map(|(id, output)| {
                self.hooks.remove(&id).map(|hook| (id, hook.data, output))
            })
            .collect()
    }

    /// Number of hooks still waiting for their process.
    pub fn pending(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hook is outstanding.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Kill and forget a hook without reporting it.
    pub fn cancel(&mut self, id: HookId) {
        self.hooks.remove(&id);
    }
}

impl<T> Default for ProcessHooks<T> {
    fn default() -> Self {
        Self::new()
    }
}
