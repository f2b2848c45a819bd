// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cloud binding commands.

use crate::command::Command;

/// Command addressed to the plug's `cnCloud` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudCommand {
    /// Query cloud binding information.
    GetInfo,
}

impl Command for CloudCommand {
    fn module(&self) -> &'static str {
        "cnCloud"
    }

    fn method(&self) -> &'static str {
        match self {
            Self::GetInfo => "get_info",
        }
    }
}
