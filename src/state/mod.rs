// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plug state management types.
//!
//! [`PlugState`] caches what the plug last reported and derives the in-use
//! value from it without any I/O. It also works out which events a state
//! refresh implies.
//!
//! # Examples
//!
//! ```
//! use kasa_plug::event::PlugEvent;
//! use kasa_plug::state::PlugState;
//!
//! let mut state = PlugState::new();
//! state.set_relay_state(true);
//!
//! let events = state.take_events(false);
//! assert_eq!(events, vec![PlugEvent::PowerOn, PlugEvent::PowerUpdate(true)]);
//! assert!(state.in_use(false));
//! ```

mod plug_state;

pub use plug_state::PlugState;
