// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed replies from smart plugs.
//!
//! Each type deserializes the result object of one module method, i.e. the
//! value found at `{"<module>": {"<method>": <result>}}`.

mod cloud;
mod emeter;
mod info;
mod rules;
mod sysinfo;

pub use cloud::CloudInfo;
pub use emeter::EmeterRealtime;
pub use info::PlugInfo;
pub use rules::{Rule, RuleList};
pub use sysinfo::SysInfo;
