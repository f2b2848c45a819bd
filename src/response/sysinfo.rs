// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sysinfo response parsing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::PowerState;

/// The `system.get_sysinfo` block reported by a plug.
///
/// Well-known fields are typed; every other field the firmware reports is
/// kept in [`extra`](Self::extra).
///
/// # Examples
///
/// ```
/// use kasa_plug::response::SysInfo;
///
/// let json = r#"{
///     "alias": "Kettle",
///     "model": "HS110(EU)",
///     "feature": "TIM:ENE",
///     "relay_state": 1,
///     "led_off": 0,
///     "on_time": 1200,
///     "latitude_i": 0,
///     "err_code": 0
/// }"#;
/// let info: SysInfo = serde_json::from_str(json).unwrap();
/// assert!(info.is_relay_on());
/// assert!(info.supports_emeter());
/// assert!(info.extra.contains_key("latitude_i"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SysInfo {
    /// User-visible name.
    #[serde(default)]
    pub alias: String,

    /// Hardware model, e.g. `HS110(EU)`.
    #[serde(default)]
    pub model: String,

    /// Device description.
    #[serde(default)]
    pub dev_name: String,

    /// Device type string, e.g. `IOT.SMARTPLUGSWITCH`.
    #[serde(default, rename = "type")]
    pub device_type: String,

    /// Firmware version.
    #[serde(default)]
    pub sw_ver: String,

    /// Hardware version.
    #[serde(default)]
    pub hw_ver: String,

    /// MAC address.
    #[serde(default)]
    pub mac: String,

    /// Unique device identifier.
    #[serde(default, rename = "deviceId")]
    pub device_id: String,

    /// Colon-separated feature flags, e.g. `TIM:ENE`.
    #[serde(default)]
    pub feature: String,

    /// Relay state, 1 when closed.
    #[serde(default)]
    pub relay_state: u8,

    /// LED flag, 1 when the indicator LED is switched off.
    #[serde(default)]
    pub led_off: u8,

    /// Seconds since the relay was last switched on.
    #[serde(default)]
    pub on_time: u64,

    /// Wi-Fi signal strength in dBm.
    #[serde(default)]
    pub rssi: i32,

    /// Remaining device-reported fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SysInfo {
    /// Returns the relay state.
    #[must_use]
    pub fn relay(&self) -> PowerState {
        PowerState::from_relay_state(self.relay_state)
    }

    /// Returns `true` if the relay is closed.
    #[must_use]
    pub fn is_relay_on(&self) -> bool {
        self.relay_state != 0
    }

    /// Returns the indicator LED state.
    #[must_use]
    pub fn led(&self) -> PowerState {
        PowerState::from_led_off(self.led_off)
    }

    /// Returns `true` if the device reports the `ENE` (energy metering) feature.
    #[must_use]
    pub fn supports_emeter(&self) -> bool {
        self.has_feature("ENE")
    }

    /// Returns `true` if the colon-separated `feature` string contains `flag`.
    #[must_use]
    pub fn has_feature(&self, flag: &str) -> bool {
        self.feature.split(':').any(|f| f == flag)
    }
}
