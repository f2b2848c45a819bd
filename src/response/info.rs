// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Combined info response.

use serde_json::Value;

use crate::response::{CloudInfo, EmeterRealtime, SysInfo};

/// Everything returned by [`Plug::get_info`](crate::Plug::get_info).
///
/// `sys_info` is always present. The other parts are `None` when the plug
/// has no emeter or did not answer that part of the query.
#[derive(Debug, Clone, PartialEq)]
pub struct PlugInfo {
    /// The sysinfo block.
    pub sys_info: SysInfo,
    /// Latest energy reading, for plugs with an emeter.
    pub emeter_realtime: Option<EmeterRealtime>,
    /// Cloud binding information.
    pub cloud: Option<CloudInfo>,
    /// Next scheduled action as reported by the device.
    pub next_action: Option<Value>,
}
