// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Energy metering response parsing.

use serde::Deserialize;

/// Realtime energy reading from `emeter.get_realtime`.
///
/// Older firmware reports `power`/`voltage`/`current`/`total` in W/V/A/kWh,
/// newer firmware `power_mw`/`voltage_mv`/`current_ma`/`total_wh`. Both
/// are normalised to W/V/A/kWh.
///
/// # Examples
///
/// ```
/// use kasa_plug::response::EmeterRealtime;
///
/// let v2: EmeterRealtime = serde_json::from_str(
///     r#"{"power_mw": 12500, "voltage_mv": 230100, "current_ma": 54, "total_wh": 1500, "err_code": 0}"#,
/// ).unwrap();
/// assert_eq!(v2.power, Some(12.5));
/// assert_eq!(v2.total, Some(1.5));
///
/// let v1: EmeterRealtime = serde_json::from_str(r#"{"power": 3.2, "voltage": 229.8}"#).unwrap();
/// assert_eq!(v1.power, Some(3.2));
/// assert_eq!(v1.current, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(from = "RawEmeterRealtime")]
pub struct EmeterRealtime {
    /// Instantaneous power draw in Watts.
    pub power: Option<f64>,
    /// Voltage in Volts.
    pub voltage: Option<f64>,
    /// Current in Amperes.
    pub current: Option<f64>,
    /// Total energy consumed in kWh.
    pub total: Option<f64>,
}

impl EmeterRealtime {
    /// Creates a reading that only carries a power value.
    #[must_use]
    pub fn with_power(watts: f64) -> Self {
        Self {
            power: Some(watts),
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
struct RawEmeterRealtime {
    power: Option<f64>,
    power_mw: Option<f64>,
    voltage: Option<f64>,
    voltage_mv: Option<f64>,
    current: Option<f64>,
    current_ma: Option<f64>,
    total: Option<f64>,
    total_wh: Option<f64>,
}

impl From<RawEmeterRealtime> for EmeterRealtime {
    fn from(raw: RawEmeterRealtime) -> Self {
        let milli = |v: f64| v / 1000.0;
        Self {
            power: raw.power.or(raw.power_mw.map(milli)),
            voltage: raw.voltage.or(raw.voltage_mv.map(milli)),
            current: raw.current.or(raw.current_ma.map(milli)),
            total: raw.total.or(raw.total_wh.map(milli)),
        }
    }
}
