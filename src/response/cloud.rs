// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cloud binding response parsing.

use serde::{Deserialize, Serialize};

/// Reply of `cnCloud.get_info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudInfo {
    /// Account the plug is bound to, empty when unbound.
    #[serde(default)]
    pub username: String,

    /// Cloud server host.
    #[serde(default)]
    pub server: String,

    /// 1 when bound to an account.
    #[serde(default)]
    pub binded: u8,

    /// 1 when currently connected to the cloud.
    #[serde(default)]
    pub cld_connection: u8,
}

impl CloudInfo {
    /// Returns `true` if the plug is bound to a cloud account.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.binded != 0
    }
}
