// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached plug state.

use crate::event::PlugEvent;
use crate::response::{EmeterRealtime, SysInfo};

/// Tracked state of a smart plug.
///
/// Holds the last sysinfo block, the last energy reading and the in-use
/// threshold, plus the relay and in-use values last reported to listeners
/// so that only real changes produce `power-on`/`power-off` and
/// `in-use`/`not-in-use` events.
///
/// # Examples
///
/// ```
/// use kasa_plug::response::EmeterRealtime;
/// use kasa_plug::state::PlugState;
///
/// let mut state = PlugState::new();
/// state.set_in_use_threshold(10.0);
/// state.set_emeter_realtime(EmeterRealtime::with_power(10.0));
/// assert!(!state.in_use(true));
///
/// state.set_emeter_realtime(EmeterRealtime::with_power(11.0));
/// assert!(state.in_use(true));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlugState {
    sys_info: Option<SysInfo>,
    /// Relay switched by this client before any sysinfo was read.
    relay_override: Option<bool>,
    emeter_realtime: Option<EmeterRealtime>,
    in_use_threshold: f64,
    last_relay_state: Option<bool>,
    last_in_use: Option<bool>,
}

impl Default for PlugState {
    fn default() -> Self {
        Self {
            sys_info: None,
            relay_override: None,
            emeter_realtime: None,
            in_use_threshold: Self::DEFAULT_IN_USE_THRESHOLD,
            last_relay_state: None,
            last_in_use: None,
        }
    }
}

impl PlugState {
    /// Power draw in Watts above which an emeter plug counts as in use.
    pub const DEFAULT_IN_USE_THRESHOLD: f64 = 0.1;

    /// Creates a new empty state with the default threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Sysinfo ==========

    /// Returns the cached sysinfo block.
    #[must_use]
    pub fn sys_info(&self) -> Option<&SysInfo> {
        self.sys_info.as_ref()
    }

    /// Replaces the cached sysinfo block.
    pub fn set_sys_info(&mut self, sys_info: SysInfo) {
        self.sys_info = Some(sys_info);
        self.relay_override = None;
    }

    /// Returns `true` if the cached relay state is on.
    ///
    /// Without sysinfo, this is the last state switched through
    /// [`set_relay_state`](Self::set_relay_state), or `false`.
    #[must_use]
    pub fn relay_state(&self) -> bool {
        match &self.sys_info {
            Some(info) => info.is_relay_on(),
            None => self.relay_override.unwrap_or(false),
        }
    }

    /// Updates the cached relay state after a successful switch.
    ///
    /// Never creates a sysinfo block; only a device reply does that.
    pub fn set_relay_state(&mut self, on: bool) {
        match &mut self.sys_info {
            Some(info) => info.relay_state = u8::from(on),
            None => self.relay_override = Some(on),
        }
    }

    /// Updates the cached LED flag after a successful switch.
    ///
    /// No-op while no sysinfo is cached.
    pub fn set_led_state(&mut self, on: bool) {
        if let Some(info) = &mut self.sys_info {
            info.led_off = u8::from(!on);
        }
    }

    /// Updates the cached alias after a successful rename.
    ///
    /// No-op while no sysinfo is cached.
    pub fn set_alias(&mut self, alias: impl Into<String>) {
        if let Some(info) = &mut self.sys_info {
            info.alias = alias.into();
        }
    }

    // ========== Energy ==========

    /// Returns the cached energy reading.
    #[must_use]
    pub fn emeter_realtime(&self) -> Option<&EmeterRealtime> {
        self.emeter_realtime.as_ref()
    }

    /// Replaces the cached energy reading.
    pub fn set_emeter_realtime(&mut self, reading: EmeterRealtime) {
        self.emeter_realtime = Some(reading);
    }

    /// Returns the in-use threshold in Watts.
    #[must_use]
    pub fn in_use_threshold(&self) -> f64 {
        self.in_use_threshold
    }

    /// Sets the in-use threshold in Watts.
    pub fn set_in_use_threshold(&mut self, watts: f64) {
        self.in_use_threshold = watts;
    }

    // ========== Derived ==========

    /// Returns whether the plug's load is in use.
    ///
    /// With an emeter and a cached power reading, the load is in use when
    /// power is strictly above the threshold. Otherwise the relay state
    /// decides.
    #[must_use]
    pub fn in_use(&self, supports_emeter: bool) -> bool {
        if supports_emeter {
            if let Some(power) = self.emeter_realtime.and_then(|e| e.power) {
                return power > self.in_use_threshold;
            }
        }
        self.relay_state()
    }

    /// Returns the events implied by the current state and records it as
    /// the new baseline.
    ///
    /// `power-on`/`power-off` and `in-use`/`not-in-use` are only produced
    /// when the value differs from the last recorded one; the `*-update`
    /// events are produced every time.
    pub fn take_events(&mut self, supports_emeter: bool) -> Vec<PlugEvent> {
        let mut events = Vec::new();

        let relay_state = self.relay_state();
        if self.last_relay_state != Some(relay_state) {
            events.push(if relay_state {
                PlugEvent::PowerOn
            } else {
                PlugEvent::PowerOff
            });
        }
        events.push(PlugEvent::PowerUpdate(relay_state));

        if supports_emeter {
            let in_use = self.in_use(true);
            if self.last_in_use != Some(in_use) {
                events.push(if in_use {
                    PlugEvent::InUse
                } else {
                    PlugEvent::NotInUse
                });
            }
            events.push(PlugEvent::InUseUpdate(in_use));
            self.last_in_use = Some(in_use);
        }

        self.last_relay_state = Some(relay_state);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_relay(relay_state: u8) -> PlugState {
        let mut state = PlugState::new();
        state.set_sys_info(SysInfo {
            relay_state,
            ..SysInfo::default()
        });
        state
    }

    #[test]
    fn default_threshold() {
        assert!((PlugState::new().in_use_threshold() - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn in_use_with_emeter_is_strict() {
        let mut state = PlugState::new();
        let cases = [
            (0.0, 0.0, false),
            (10.0, 10.0, false),
            (0.0, 0.1, true),
            (10.0, 11.0, true),
            (5.0, 4.9, false),
        ];
        for (threshold, power, expected) in cases {
            state.set_in_use_threshold(threshold);
            state.set_emeter_realtime(EmeterRealtime::with_power(power));
            assert_eq!(
                state.in_use(true),
                expected,
                "threshold {threshold}, power {power}"
            );
        }
    }

    #[test]
    fn in_use_ignores_relay_when_emeter_reading_present() {
        let mut state = with_relay(1);
        state.set_in_use_threshold(0.0);
        state.set_emeter_realtime(EmeterRealtime::with_power(0.0));
        assert!(!state.in_use(true));
    }

    #[test]
    fn in_use_without_emeter_follows_relay() {
        assert!(!with_relay(0).in_use(false));
        assert!(with_relay(1).in_use(false));
    }

    #[test]
    fn in_use_without_emeter_ignores_reading() {
        let mut state = with_relay(0);
        state.set_emeter_realtime(EmeterRealtime::with_power(100.0));
        assert!(!state.in_use(false));
    }

    #[test]
    fn in_use_falls_back_to_relay_when_reading_absent() {
        assert!(with_relay(1).in_use(true));
        assert!(!with_relay(0).in_use(true));

        let mut state = with_relay(1);
        state.set_emeter_realtime(EmeterRealtime::default());
        assert!(state.in_use(true));
    }

    #[test]
    fn in_use_is_false_with_no_state() {
        assert!(!PlugState::new().in_use(true));
        assert!(!PlugState::new().in_use(false));
    }

    #[test]
    fn relay_setters_update_cache() {
        let mut state = with_relay(0);
        state.set_relay_state(true);
        assert!(state.relay_state());
        state.set_relay_state(false);
        assert!(!state.relay_state());

        state.set_led_state(false);
        assert_eq!(state.sys_info().unwrap().led_off, 1);
        state.set_alias("Heater");
        assert_eq!(state.sys_info().unwrap().alias, "Heater");
        assert_eq!(state.sys_info().unwrap().relay_state, 0);
    }

    #[test]
    fn setters_never_invent_sys_info() {
        let mut state = PlugState::new();
        state.set_relay_state(true);
        state.set_led_state(false);
        state.set_alias("Heater");

        assert!(state.sys_info().is_none());
        assert!(state.relay_state());
        assert_eq!(
            state.take_events(false),
            vec![PlugEvent::PowerOn, PlugEvent::PowerUpdate(true)]
        );

        state.set_relay_state(false);
        assert!(!state.relay_state());
    }

    #[test]
    fn device_sys_info_replaces_switched_relay() {
        let mut state = PlugState::new();
        state.set_relay_state(true);
        state.set_sys_info(SysInfo::default());
        assert!(!state.relay_state());
    }

    #[test]
    fn first_observation_emits_power_event() {
        let mut state = with_relay(1);
        assert_eq!(
            state.take_events(false),
            vec![PlugEvent::PowerOn, PlugEvent::PowerUpdate(true)]
        );
    }

    #[test]
    fn unchanged_relay_only_emits_update() {
        let mut state = with_relay(0);
        state.take_events(false);
        assert_eq!(state.take_events(false), vec![PlugEvent::PowerUpdate(false)]);
    }

    #[test]
    fn relay_change_emits_once() {
        let mut state = with_relay(0);
        state.take_events(false);

        state.set_relay_state(true);
        assert_eq!(
            state.take_events(false),
            vec![PlugEvent::PowerOn, PlugEvent::PowerUpdate(true)]
        );
        assert_eq!(state.take_events(false), vec![PlugEvent::PowerUpdate(true)]);

        state.set_relay_state(false);
        assert_eq!(
            state.take_events(false),
            vec![PlugEvent::PowerOff, PlugEvent::PowerUpdate(false)]
        );
    }

    #[test]
    fn emeter_plug_emits_in_use_events() {
        let mut state = with_relay(1);
        state.set_in_use_threshold(1.0);
        state.set_emeter_realtime(EmeterRealtime::with_power(0.5));
        assert_eq!(
            state.take_events(true),
            vec![
                PlugEvent::PowerOn,
                PlugEvent::PowerUpdate(true),
                PlugEvent::NotInUse,
                PlugEvent::InUseUpdate(false),
            ]
        );

        state.set_emeter_realtime(EmeterRealtime::with_power(40.0));
        assert_eq!(
            state.take_events(true),
            vec![
                PlugEvent::PowerUpdate(true),
                PlugEvent::InUse,
                PlugEvent::InUseUpdate(true),
            ]
        );
    }

    #[test]
    fn plug_without_emeter_never_emits_in_use() {
        let mut state = with_relay(1);
        let events = state.take_events(false);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, PlugEvent::InUse | PlugEvent::InUseUpdate(_)))
        );
    }
}
