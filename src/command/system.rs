// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Commands of the `system` module: sysinfo, relay, LED and alias.

use serde_json::{Value, json};

use crate::command::Command;
use crate::types::PowerState;

/// Command addressed to the plug's `system` module.
///
/// # Examples
///
/// ```
/// use kasa_plug::command::{Command, SystemCommand};
/// use kasa_plug::types::PowerState;
///
/// let led = SystemCommand::SetLedState(PowerState::On);
/// assert_eq!(led.method(), "set_led_off");
/// assert_eq!(led.params()["off"], 0);
///
/// let alias = SystemCommand::SetAlias("Desk lamp".to_string());
/// assert_eq!(alias.params()["alias"], "Desk lamp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemCommand {
    /// Query the full sysinfo block.
    GetSysInfo,
    /// Switch the relay.
    SetRelayState(PowerState),
    /// Switch the indicator LED.
    SetLedState(PowerState),
    /// Rename the plug.
    SetAlias(String),
}

impl SystemCommand {
    /// Creates a command to switch the relay on or off.
    #[must_use]
    pub const fn relay(on: bool) -> Self {
        Self::SetRelayState(if on { PowerState::On } else { PowerState::Off })
    }

    /// Creates a command to switch the LED on or off.
    #[must_use]
    pub const fn led(on: bool) -> Self {
        Self::SetLedState(if on { PowerState::On } else { PowerState::Off })
    }
}

impl Command for SystemCommand {
    fn module(&self) -> &'static str {
        "system"
    }

    fn method(&self) -> &'static str {
        match self {
            Self::GetSysInfo => "get_sysinfo",
            Self::SetRelayState(_) => "set_relay_state",
            Self::SetLedState(_) => "set_led_off",
            Self::SetAlias(_) => "set_dev_alias",
        }
    }

    fn params(&self) -> Value {
        match self {
            Self::GetSysInfo => json!({}),
            Self::SetRelayState(state) => json!({ "state": state.relay_state() }),
            Self::SetLedState(state) => json!({ "off": state.led_off() }),
            Self::SetAlias(alias) => json!({ "alias": alias }),
        }
    }
}
