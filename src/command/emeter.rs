// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Energy metering commands.

use crate::command::Command;

/// Command addressed to the plug's `emeter` module.
///
/// Only plugs whose sysinfo `feature` string contains `ENE` answer these;
/// other plugs reply with a module-level error.
///
/// # Examples
///
/// ```
/// use kasa_plug::command::{Command, EmeterCommand};
///
/// let cmd = EmeterCommand::GetRealtime;
/// assert_eq!(cmd.to_payload(), r#"{"emeter":{"get_realtime":{}}}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmeterCommand {
    /// Query the instantaneous power, voltage and current.
    GetRealtime,
}

impl Command for EmeterCommand {
    fn module(&self) -> &'static str {
        "emeter"
    }

    fn method(&self) -> &'static str {
        match self {
            Self::GetRealtime => "get_realtime",
        }
    }
}
