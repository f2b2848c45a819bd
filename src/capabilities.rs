// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device capabilities detection and configuration.
//!
//! Capabilities are fixed for the lifetime of a [`Plug`](crate::Plug). They
//! are either detected from the sysinfo probe performed by
//! [`PlugBuilder::build`](crate::PlugBuilder::build) or given manually.

use crate::response::SysInfo;

/// Capabilities of a smart plug.
///
/// # Examples
///
/// ```
/// use kasa_plug::Capabilities;
///
/// // Default capabilities: relay and LED only
/// let basic = Capabilities::default();
/// assert!(!basic.supports_emeter());
///
/// // HS110-class plug with energy metering
/// assert!(Capabilities::hs110().supports_emeter());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Supports energy metering (realtime power readings).
    pub emeter: bool,
}

impl Capabilities {
    /// Capabilities of a plain switching plug (HS100 class).
    #[must_use]
    pub const fn hs100() -> Self {
        Self { emeter: false }
    }

    /// Capabilities of an energy-metering plug (HS110 class).
    #[must_use]
    pub const fn hs110() -> Self {
        Self { emeter: true }
    }

    /// Detects capabilities from a sysinfo block.
    ///
    /// Energy metering is advertised by `ENE` in the `feature` string.
    #[must_use]
    pub fn from_sys_info(sys_info: &SysInfo) -> Self {
        Self {
            emeter: sys_info.supports_emeter(),
        }
    }

    /// Returns `true` if the plug reports realtime power readings.
    #[must_use]
    pub const fn supports_emeter(&self) -> bool {
        self.emeter
    }
}
