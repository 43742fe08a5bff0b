//! A [`Host`] that runs the plugin outside WeeChat.
//!
//! Buffers are in-memory input lines, plugin options come from an
//! [`OptionsFile`], and hooked processes are real subprocesses collected by
//! [`StandaloneHost::run_until_idle`], which plays the part of the host's
//! event loop. Printed lines and issued commands are recorded so callers can
//! inspect what the plugin did.

use std::collections::HashMap;
use std::time::Duration;

use weechat_edit_config::{OptionKey, OptionsFile};
use weechat_edit_process::{HookId, ProcessHooks};

use crate::host::{BufferId, Host, HostError, ProcessCallback, ReturnCode};
use crate::plugin::{CommandSpec, PluginInfo};

/// Interval between polls of hooked processes.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Content and cursor of one buffer's input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    pub text: String,
    pub pos: usize,
}

pub struct StandaloneHost {
    options: OptionsFile,
    inputs: HashMap<BufferId, InputLine>,
    hooks: ProcessHooks<ProcessCallback>,
    registered: Option<PluginInfo>,
    commands_hooked: Vec<CommandSpec>,
    option_descriptions: HashMap<String, String>,
    issued: Vec<(BufferId, String)>,
    printed: Vec<String>,
    callback_results: Vec<(HookId, ReturnCode)>,
    echo: bool,
}

impl StandaloneHost {
    pub fn new(options: OptionsFile) -> Self {
        Self {
            options,
            inputs: HashMap::new(),
            hooks: ProcessHooks::new(),
            registered: None,
            commands_hooked: Vec::new(),
            option_descriptions: HashMap::new(),
            issued: Vec::new(),
            printed: Vec::new(),
            callback_results: Vec::new(),
            echo: false,
        }
    }

    /// Also write printed lines to stderr.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn set_option(&mut self, key: OptionKey, value: impl Into<String>) {
        self.options.set(key, value);
    }

    /// Input line of `buffer` (empty if never written).
    pub fn input_line(&self, buffer: &BufferId) -> InputLine {
        self.inputs.get(buffer).cloned().unwrap_or_default()
    }

    pub fn registered(&self) -> Option<&PluginInfo> {
        self.registered.as_ref()
    }

    pub fn commands_hooked(&self) -> &[CommandSpec] {
        &self.commands_hooked
    }

    pub fn option_description(&self, name: &str) -> Option<&str> {
        self.option_descriptions.get(name).map(String::as_str)
    }

    /// Commands issued by the plugin, in order.
    pub fn issued_commands(&self) -> &[(BufferId, String)] {
        &self.issued
    }

    /// Lines printed by the plugin, in order.
    pub fn printed(&self) -> &[String] {
        &self.printed
    }

    /// Return codes of completion callbacks run so far.
    pub fn callback_results(&self) -> &[(HookId, ReturnCode)] {
        &self.callback_results
    }

    /// Number of hooked processes still running.
    pub fn pending_hooks(&self) -> usize {
        self.hooks.pending()
    }

    /// Run the callbacks of every hooked process that has finished.
    /// Returns how many callbacks ran.
    pub fn run_pending(&mut self) -> usize {
        let finished = self.hooks.poll();
        let count = finished.len();
        for (id, callback, output) in finished {
            crate::debug_log!("HOST", "Hook {} finished with {}", id, output.return_code);
            let rc = callback(self, output);
            crate::debug_log!("HOST", "Hook {} callback returned {}", id, rc.as_i32());
            self.callback_results.push((id, rc));
        }
        count
    }

    /// Drive hooked processes until none is left.
    pub fn run_until_idle(&mut self) {
        while !self.hooks.is_empty() {
            if self.run_pending() == 0 {
                std::thread::sleep(POLL_INTERVAL);
            }
        }
    }
}

impl Host for StandaloneHost {
    fn register(&mut self, info: &PluginInfo) -> bool {
        if self.registered.is_some() {
            log::warn!("Plugin {} already registered", info.name);
            return false;
        }
        self.registered = Some(info.clone());
        true
    }

    fn hook_command(&mut self, command: &CommandSpec) -> Result<(), HostError> {
        if self.commands_hooked.iter().any(|c| c.name == command.name) {
            return Err(HostError::Rejected(format!(
                "command /{} already hooked",
                command.name
            )));
        }
        self.commands_hooked.push(command.clone());
        Ok(())
    }

    fn plugin_option(&self, name: &str) -> Option<String> {
        OptionKey::from_name(name)
            .and_then(|key| self.options.get(key))
            .map(str::to_string)
    }

    fn set_option_description(&mut self, name: &str, description: &str) {
        self.option_descriptions
            .insert(name.to_string(), description.to_string());
    }

    fn input(&self, buffer: &BufferId) -> String {
        self.inputs
            .get(buffer)
            .map(|line| line.text.clone())
            .unwrap_or_default()
    }

    fn set_input(&mut self, buffer: &BufferId, text: &str) {
        let line = self.inputs.entry(buffer.clone()).or_default();
        line.text = text.to_string();
        line.pos = line.pos.min(text.chars().count());
    }

    fn set_input_pos(&mut self, buffer: &BufferId, pos: usize) {
        let line = self.inputs.entry(buffer.clone()).or_default();
        line.pos = pos.min(line.text.chars().count());
    }

    fn command(&mut self, buffer: &BufferId, command: &str) {
        crate::debug_trace!("HOST", "[{}] {}", buffer, command);
        self.issued.push((buffer.clone(), command.to_string()));
    }

    fn print(&mut self, buffer: Option<&BufferId>, message: &str) {
        if self.echo {
            eprintln!("{message}");
        }
        let core = BufferId::core();
        log::info!("[{}] {}", buffer.unwrap_or(&core), message);
        self.printed.push(message.to_string());
    }

    fn hook_process(
        &mut self,
        command: &str,
        timeout_ms: u64,
        callback: ProcessCallback,
    ) -> Result<HookId, HostError> {
        let timeout = (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms));
        Ok(self.hooks.spawn(command, timeout, callback)?)
    }
}
