// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Events emitted by a plug when its cached state changes.
//!
//! | Event | Emitted when |
//! |-------|--------------|
//! | `power-on` / `power-off` | the relay state differs from the last observed one |
//! | `power-update` | every relay state refresh |
//! | `in-use` / `not-in-use` | the derived in-use value changes (emeter plugs) |
//! | `in-use-update` | every refresh (emeter plugs) |
//! | `emeter-realtime-update` | a new energy reading is cached |
//!
//! Listeners are registered through [`Plug::on`](crate::Plug::on) and
//! [`Plug::once`](crate::Plug::once).

mod plug_event;

pub use plug_event::{EventKind, PlugEvent};
