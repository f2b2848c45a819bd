// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rule list response parsing for schedule, away and timer rules.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reply of `<module>.get_rules`.
///
/// # Examples
///
/// ```
/// use kasa_plug::response::RuleList;
///
/// let json = r#"{
///     "rule_list": [{"id": "A1", "name": "away", "enable": 1, "wday": [0,1,0,0,0,0,0],
///                    "stime_opt": 0, "smin": 1140, "etime_opt": 0, "emin": 1320,
///                    "repeat": 1, "frequency": 5}],
///     "version": 2,
///     "enable": 1,
///     "err_code": 0
/// }"#;
/// let rules: RuleList = serde_json::from_str(json).unwrap();
/// assert_eq!(rules.err_code, 0);
/// assert_eq!(rules.rule_list[0].smin, Some(1140));
/// assert!(rules.rule_list[0].is_enabled());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleList {
    /// The stored rules.
    #[serde(default)]
    pub rule_list: Vec<Rule>,

    /// Whether the module as a whole is enabled.
    #[serde(default)]
    pub enable: Option<u8>,

    /// Rule format version.
    #[serde(default)]
    pub version: Option<u32>,

    /// Device-reported status, 0 on success.
    #[serde(default)]
    pub err_code: i64,
}

impl RuleList {
    /// Returns the number of stored rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rule_list.len()
    }

    /// Returns `true` if no rule is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rule_list.is_empty()
    }
}

/// One stored automation rule.
///
/// Schedule and away rules use the time window fields; countdown rules use
/// `delay`, `act` and `remain`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Rule identifier.
    #[serde(default)]
    pub id: String,

    /// Rule name.
    #[serde(default)]
    pub name: String,

    /// 1 when the rule is active.
    #[serde(default)]
    pub enable: u8,

    /// Weekday mask, Sunday first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wday: Option<Vec<u8>>,

    /// Start time option (0 = minutes after midnight, 1 = sunrise, 2 = sunset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stime_opt: Option<i32>,

    /// Start minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smin: Option<u32>,

    /// End time option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etime_opt: Option<i32>,

    /// End minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emin: Option<u32>,

    /// Start action (1 = on, 0 = off).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sact: Option<i32>,

    /// Countdown length in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,

    /// Countdown action (1 = on, 0 = off).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub act: Option<i32>,

    /// Seconds remaining on a running countdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remain: Option<u32>,

    /// Remaining rule fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Rule {
    /// Returns `true` if the rule is active.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enable != 0
    }
}
