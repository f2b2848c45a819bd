// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! On/off state shared by the relay and the indicator LED.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Represents the on/off state of the plug's relay or LED.
///
/// The device encodes the relay as `relay_state` (1 = on) and the LED
/// inverted as `led_off` (1 = off); both conversions live here.
///
/// # Examples
///
/// ```
/// use kasa_plug::types::PowerState;
///
/// let on = PowerState::from(true);
/// assert_eq!(on.relay_state(), 1);
/// assert_eq!(on.led_off(), 0);
/// assert_eq!(PowerState::from_relay_state(0), PowerState::Off);
/// assert_eq!("on".parse::<PowerState>().unwrap(), PowerState::On);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PowerState {
    /// Switched off.
    #[default]
    Off,
    /// Switched on.
    On,
}

impl PowerState {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }

    /// Returns `true` for [`PowerState::On`].
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }

    /// Returns the opposite state.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }

    /// Returns the value used by `set_relay_state`.
    #[must_use]
    pub const fn relay_state(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }

    /// Returns the value used by `set_led_off`.
    #[must_use]
    pub const fn led_off(&self) -> u8 {
        match self {
            Self::Off => 1,
            Self::On => 0,
        }
    }

    /// Decodes a reported `relay_state`. Any non-zero value means on.
    #[must_use]
    pub const fn from_relay_state(value: u8) -> Self {
        if value == 0 { Self::Off } else { Self::On }
    }

    /// Decodes a reported `led_off` flag.
    #[must_use]
    pub const fn from_led_off(value: u8) -> Self {
        if value == 0 { Self::On } else { Self::Off }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" | "0" | "FALSE" => Ok(Self::Off),
            "ON" | "1" | "TRUE" => Ok(Self::On),
            _ => Err(ValueError::InvalidPowerState(s.to_string())),
        }
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<PowerState> for bool {
    fn from(value: PowerState) -> Self {
        value.is_on()
    }
}
