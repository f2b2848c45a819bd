// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smart plug command definitions.
//!
//! Every request understood by the plug is a JSON object addressed by
//! module and method:
//!
//! ```text
//! {"<module>": {"<method>": {<params>}}}
//! ```
//!
//! # Available Commands
//!
//! | Command Type | Module | Purpose |
//! |-------------|--------|---------|
//! | [`SystemCommand`] | `system` | Sysinfo, relay, LED, alias |
//! | [`EmeterCommand`] | `emeter` | Realtime energy reading |
//! | [`RulesCommand`] | `schedule` / `anti_theft` / `count_down` | Rule lists, next action |
//! | [`CloudCommand`] | `cnCloud` | Cloud binding info |
//!
//! Several commands can be merged into one request with [`CommandBatch`].
//!
//! # Examples
//!
//! ```
//! use kasa_plug::command::{Command, SystemCommand};
//! use kasa_plug::types::PowerState;
//!
//! let cmd = SystemCommand::SetRelayState(PowerState::On);
//! assert_eq!(cmd.module(), "system");
//! assert_eq!(cmd.method(), "set_relay_state");
//! assert_eq!(cmd.to_payload(), r#"{"system":{"set_relay_state":{"state":1}}}"#);
//! ```

mod cloud;
mod emeter;
mod rules;
mod system;

pub use cloud::CloudCommand;
pub use emeter::EmeterCommand;
pub use rules::{RuleModule, RulesCommand};
pub use system::SystemCommand;

use serde_json::{Map, Value};

/// A command that can be sent to a smart plug.
pub trait Command {
    /// Returns the module namespace, e.g. `"system"`.
    fn module(&self) -> &'static str;

    /// Returns the method name inside the module, e.g. `"get_sysinfo"`.
    fn method(&self) -> &'static str;

    /// Returns the method parameters. Queries send an empty object.
    fn params(&self) -> Value {
        Value::Object(Map::new())
    }

    /// Returns the full request object.
    fn to_request(&self) -> Value {
        let mut method = Map::new();
        method.insert(self.method().to_string(), self.params());
        let mut module = Map::new();
        module.insert(self.module().to_string(), Value::Object(method));
        Value::Object(module)
    }

    /// Returns the request serialized as JSON text, ready for the wire.
    fn to_payload(&self) -> String {
        self.to_request().to_string()
    }
}

/// Several commands merged into a single request.
///
/// Methods of the same module share one module object, which is how the
/// device expects multi-method queries.
///
/// # Examples
///
/// ```
/// use kasa_plug::command::{CommandBatch, EmeterCommand, SystemCommand};
///
/// let batch = CommandBatch::new()
///     .with(&SystemCommand::GetSysInfo)
///     .with(&EmeterCommand::GetRealtime);
///
/// let request = batch.to_request();
/// assert!(request["system"]["get_sysinfo"].is_object());
/// assert!(request["emeter"]["get_realtime"].is_object());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandBatch {
    modules: Map<String, Value>,
}

impl CommandBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command to the batch, consuming and returning it.
    #[must_use]
    pub fn with<C: Command + ?Sized>(mut self, command: &C) -> Self {
        self.push(command);
        self
    }

    /// Adds a command to the batch.
    pub fn push<C: Command + ?Sized>(&mut self, command: &C) {
        let module = self
            .modules
            .entry(command.module().to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(methods) = module {
            methods.insert(command.method().to_string(), command.params());
        }
    }

    /// Returns `true` if no command was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Returns the merged request object.
    #[must_use]
    pub fn to_request(&self) -> Value {
        Value::Object(self.modules.clone())
    }

    /// Returns the merged request serialized as JSON text.
    #[must_use]
    pub fn to_payload(&self) -> String {
        self.to_request().to_string()
    }
}
