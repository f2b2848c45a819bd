// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rule retrieval commands (schedule, away and timer rules).

use std::fmt;

use crate::command::Command;

/// Module holding a list of automation rules on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleModule {
    /// Weekly on/off schedule.
    Schedule,
    /// Away mode: random toggling while the owner is absent.
    AntiTheft,
    /// Countdown timers.
    CountDown,
}

impl RuleModule {
    /// Returns the module namespace on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Schedule => "schedule",
            Self::AntiTheft => "anti_theft",
            Self::CountDown => "count_down",
        }
    }
}

impl fmt::Display for RuleModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command reading rules stored on the device.
///
/// # Examples
///
/// ```
/// use kasa_plug::command::{Command, RuleModule, RulesCommand};
///
/// let away = RulesCommand::GetRules(RuleModule::AntiTheft);
/// assert_eq!(away.to_payload(), r#"{"anti_theft":{"get_rules":{}}}"#);
///
/// let next = RulesCommand::GetNextAction;
/// assert_eq!(next.module(), "schedule");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesCommand {
    /// List the rules of a module.
    GetRules(RuleModule),
    /// Query the next scheduled action.
    GetNextAction,
}

impl Command for RulesCommand {
    fn module(&self) -> &'static str {
        match self {
            Self::GetRules(module) => module.as_str(),
            Self::GetNextAction => RuleModule::Schedule.as_str(),
        }
    }

    fn method(&self) -> &'static str {
        match self {
            Self::GetRules(_) => "get_rules",
            Self::GetNextAction => "get_next_action",
        }
    }
}
