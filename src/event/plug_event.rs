// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plug event types.

use std::fmt;

use crate::response::EmeterRealtime;

/// Name of an event a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `power-on`: the relay switched on.
    PowerOn,
    /// `power-off`: the relay switched off.
    PowerOff,
    /// `power-update`: the relay state was refreshed.
    PowerUpdate,
    /// `in-use`: the load started drawing power.
    InUse,
    /// `not-in-use`: the load stopped drawing power.
    NotInUse,
    /// `in-use-update`: the in-use value was refreshed.
    InUseUpdate,
    /// `emeter-realtime-update`: a new energy reading was received.
    EmeterRealtimeUpdate,
}

impl EventKind {
    /// Returns the event name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PowerOn => "power-on",
            Self::PowerOff => "power-off",
            Self::PowerUpdate => "power-update",
            Self::InUse => "in-use",
            Self::NotInUse => "not-in-use",
            Self::InUseUpdate => "in-use-update",
            Self::EmeterRealtimeUpdate => "emeter-realtime-update",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event emitted by a [`Plug`](crate::Plug).
///
/// # Examples
///
/// ```
/// use kasa_plug::event::{EventKind, PlugEvent};
///
/// let event = PlugEvent::PowerUpdate(true);
/// assert_eq!(event.kind(), EventKind::PowerUpdate);
/// assert_eq!(event.kind().as_str(), "power-update");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PlugEvent {
    /// The relay switched on.
    PowerOn,
    /// The relay switched off.
    PowerOff,
    /// The relay state was refreshed; carries the current state.
    PowerUpdate(bool),
    /// The load started drawing more than the in-use threshold.
    InUse,
    /// The load dropped to or below the in-use threshold.
    NotInUse,
    /// The in-use value was refreshed; carries the current value.
    InUseUpdate(bool),
    /// A new energy reading was received.
    EmeterRealtimeUpdate(EmeterRealtime),
}

impl PlugEvent {
    /// Returns the name listeners subscribe to.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::PowerOn => EventKind::PowerOn,
            Self::PowerOff => EventKind::PowerOff,
            Self::PowerUpdate(_) => EventKind::PowerUpdate,
            Self::InUse => EventKind::InUse,
            Self::NotInUse => EventKind::NotInUse,
            Self::InUseUpdate(_) => EventKind::InUseUpdate,
            Self::EmeterRealtimeUpdate(_) => EventKind::EmeterRealtimeUpdate,
        }
    }
}
