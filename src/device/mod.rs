// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level client for smart plugs.
//!
//! A [`Plug`] wraps a [`Transport`] and keeps a cache of what the plug last
//! reported. Every read or write refreshes that cache, and the refresh is
//! turned into events for listeners registered with [`Plug::on`] and
//! [`Plug::once`].
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use kasa_plug::Plug;
//!
//! # async fn example() -> kasa_plug::Result<()> {
//! let plug = Plug::tcp("192.168.1.60").build().await?;
//!
//! plug.set_power_state(true).await?;
//! plug.blink(3, Duration::from_millis(500)).await?;
//!
//! if plug.supports_emeter() {
//!     let reading = plug.get_emeter_realtime().await?;
//!     println!("drawing {:?} W", reading.power);
//! }
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::PlugBuilder;

use std::time::Duration;

use parking_lot::RwLock;
use serde_json::Value;
use tokio::time::Instant;

use crate::capabilities::Capabilities;
use crate::command::{
    CloudCommand, Command, CommandBatch, EmeterCommand, RuleModule, RulesCommand, SystemCommand,
};
use crate::error::{DeviceError, Error, ValueError};
use crate::event::{EventKind, PlugEvent};
use crate::protocol::{self, Transport};
use crate::response::{CloudInfo, EmeterRealtime, PlugInfo, RuleList, SysInfo};
use crate::state::PlugState;
use crate::subscription::{CallbackRegistry, SubscriptionId};

#[cfg(feature = "tcp")]
use crate::protocol::{TcpClient, TcpConfig};

/// A smart plug reachable through a transport.
///
/// # Type Parameter
///
/// `T` is the transport used to reach the plug, normally [`TcpClient`].
///
/// # Creating a Plug
///
/// ```no_run
/// use kasa_plug::{Capabilities, Plug};
///
/// # async fn example() -> kasa_plug::Result<()> {
/// // Probe the plug for its sysinfo and capabilities
/// let plug = Plug::tcp("192.168.1.60").build().await?;
///
/// // No network access until the first command
/// let plug = Plug::tcp("192.168.1.61")
///     .with_capabilities(Capabilities::hs110())
///     .build_without_probe();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Plug<T: Transport> {
    transport: T,
    capabilities: Capabilities,
    state: RwLock<PlugState>,
    callbacks: CallbackRegistry<Plug<T>>,
}

impl<T: Transport> Plug<T> {
    /// Creates a builder for a plug reached through `transport`.
    #[must_use]
    pub fn builder(transport: T) -> PlugBuilder<T> {
        PlugBuilder::new(transport)
    }

    pub(crate) fn new(transport: T, capabilities: Capabilities, state: PlugState) -> Self {
        Self {
            transport,
            capabilities,
            state: RwLock::new(state),
            callbacks: CallbackRegistry::new(),
        }
    }

    /// Returns the plug capabilities.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Returns `true` if the plug reports realtime power readings.
    #[must_use]
    pub fn supports_emeter(&self) -> bool {
        self.capabilities.supports_emeter()
    }

    /// Returns a snapshot of the cached state.
    #[must_use]
    pub fn state(&self) -> PlugState {
        self.state.read().clone()
    }

    /// Sends a command and returns its result object.
    ///
    /// The device `err_code` is checked, so a rejected command is an error.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the exchange fails, or a protocol error
    /// if the reply is an error or malformed.
    pub async fn send_command<C: Command + Sync>(&self, command: &C) -> Result<Value, Error> {
        let response = self.transport.send_command(command).await?;
        response.method_result(command.module(), command.method())
    }

    async fn query<C, R>(&self, command: &C) -> Result<R, Error>
    where
        C: Command + Sync,
        R: serde::de::DeserializeOwned,
    {
        let response = self.transport.send_command(command).await?;
        response.parse_result(command.module(), command.method())
    }

    // ========== Info ==========

    /// Queries sysinfo, plus energy, next action and cloud info in one
    /// request.
    ///
    /// Only the sysinfo part is mandatory; other parts the plug cannot
    /// answer are left as `None`.
    ///
    /// # Errors
    ///
    /// Returns error if the exchange fails or sysinfo is missing or rejected.
    pub async fn get_info(&self) -> Result<PlugInfo, Error> {
        let mut batch = CommandBatch::new().with(&SystemCommand::GetSysInfo);
        if self.supports_emeter() {
            batch.push(&EmeterCommand::GetRealtime);
        }
        batch.push(&RulesCommand::GetNextAction);
        batch.push(&CloudCommand::GetInfo);

        let response = self.transport.send_raw(&batch.to_payload()).await?;
        let json = response.json()?;

        let sys_info: SysInfo = parse_part(&json, &SystemCommand::GetSysInfo)?;
        let emeter_realtime = if self.supports_emeter() {
            optional_part::<EmeterRealtime>(&json, &EmeterCommand::GetRealtime)
        } else {
            None
        };
        let next_action = optional_part::<Value>(&json, &RulesCommand::GetNextAction);
        let cloud = optional_part::<CloudInfo>(&json, &CloudCommand::GetInfo);

        let mut events = Vec::new();
        if let Some(reading) = emeter_realtime {
            events.push(PlugEvent::EmeterRealtimeUpdate(reading));
        }
        self.update(events, |state| {
            state.set_sys_info(sys_info.clone());
            if let Some(reading) = emeter_realtime {
                state.set_emeter_realtime(reading);
            }
        });

        Ok(PlugInfo {
            sys_info,
            emeter_realtime,
            cloud,
            next_action,
        })
    }

    /// Queries the sysinfo block and caches it.
    ///
    /// # Errors
    ///
    /// Returns error if the exchange fails or the reply is rejected.
    pub async fn get_sys_info(&self) -> Result<SysInfo, Error> {
        let sys_info: SysInfo = self.query(&SystemCommand::GetSysInfo).await?;
        self.update(Vec::new(), |state| state.set_sys_info(sys_info.clone()));
        Ok(sys_info)
    }

    /// Renames the plug.
    ///
    /// # Errors
    ///
    /// Returns error if the exchange fails or the device rejects the name.
    pub async fn set_alias(&self, alias: impl Into<String>) -> Result<bool, Error> {
        let alias = alias.into();
        self.send_command(&SystemCommand::SetAlias(alias.clone()))
            .await?;
        self.state.write().set_alias(alias);
        Ok(true)
    }

    // ========== Power ==========

    /// Switches the relay on or off.
    ///
    /// Emits `power-on`/`power-off` when the state changed and
    /// `power-update` in any case.
    ///
    /// # Errors
    ///
    /// Returns error if the exchange fails or the device rejects the command.
    pub async fn set_power_state(&self, on: bool) -> Result<bool, Error> {
        self.send_command(&SystemCommand::relay(on)).await?;
        self.update(Vec::new(), |state| state.set_relay_state(on));
        Ok(true)
    }

    /// Reads the relay state from the plug.
    ///
    /// # Errors
    ///
    /// Returns error if the exchange fails or the reply is rejected.
    pub async fn get_power_state(&self) -> Result<bool, Error> {
        Ok(self.get_sys_info().await?.is_relay_on())
    }

    /// Inverts the relay state and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns error if either the read or the write fails.
    pub async fn toggle_power_state(&self) -> Result<bool, Error> {
        let on = !self.get_power_state().await?;
        self.set_power_state(on).await?;
        Ok(on)
    }

    // ========== LED ==========

    /// Switches the indicator LED on or off.
    ///
    /// # Errors
    ///
    /// Returns error if the exchange fails or the device rejects the command.
    pub async fn set_led_state(&self, on: bool) -> Result<bool, Error> {
        self.send_command(&SystemCommand::led(on)).await?;
        self.state.write().set_led_state(on);
        Ok(true)
    }

    /// Reads the LED state from the plug.
    ///
    /// # Errors
    ///
    /// Returns error if the exchange fails or the reply is rejected.
    pub async fn get_led_state(&self) -> Result<bool, Error> {
        Ok(self.get_sys_info().await?.led().is_on())
    }

    /// Flashes the LED `times` times, one off/on cycle per `rate`.
    ///
    /// Each toggle is followed by a wait of `rate / 2` minus the time the
    /// toggle itself took. The LED state found before the first toggle is
    /// restored afterwards, including when a toggle fails.
    ///
    /// # Errors
    ///
    /// Returns a value error if `times` or `rate` is zero. A failed toggle
    /// aborts the sequence and its error is returned even if the restore
    /// also fails.
    pub async fn blink(&self, times: u32, rate: Duration) -> Result<bool, Error> {
        if times == 0 {
            return Err(ValueError::NotPositive("blink count").into());
        }
        if rate.is_zero() {
            return Err(ValueError::NotPositive("blink rate").into());
        }

        let original = self.get_led_state().await?;

        match self.blink_sequence(times, rate / 2).await {
            Ok(last) => {
                if last != original {
                    self.set_led_state(original).await?;
                }
                Ok(true)
            }
            Err(err) => {
                if let Err(restore_err) = self.set_led_state(original).await {
                    tracing::warn!(
                        error = %restore_err,
                        "Failed to restore LED state after blink error"
                    );
                }
                Err(err)
            }
        }
    }

    /// Runs the toggles and returns the last state written.
    async fn blink_sequence(&self, times: u32, half_period: Duration) -> Result<bool, Error> {
        let mut last = false;
        for _ in 0..times {
            for on in [false, true] {
                let started = Instant::now();
                self.set_led_state(on).await?;
                last = on;
                tokio::time::sleep(half_period.saturating_sub(started.elapsed())).await;
            }
        }
        Ok(last)
    }

    // ========== Rules ==========

    async fn get_rules(&self, module: RuleModule) -> Result<RuleList, Error> {
        self.query(&RulesCommand::GetRules(module)).await
    }

    /// Reads the away-mode rules (`anti_theft` module).
    ///
    /// # Errors
    ///
    /// Returns error if the exchange fails or the reply is rejected.
    pub async fn get_away_rules(&self) -> Result<RuleList, Error> {
        self.get_rules(RuleModule::AntiTheft).await
    }

    /// Reads the countdown timer rules (`count_down` module).
    ///
    /// # Errors
    ///
    /// Returns error if the exchange fails or the reply is rejected.
    pub async fn get_timer_rules(&self) -> Result<RuleList, Error> {
        self.get_rules(RuleModule::CountDown).await
    }

    /// Reads the schedule rules.
    ///
    /// # Errors
    ///
    /// Returns error if the exchange fails or the reply is rejected.
    pub async fn get_schedule_rules(&self) -> Result<RuleList, Error> {
        self.get_rules(RuleModule::Schedule).await
    }

    // ========== Energy ==========

    /// Reads the current energy values and caches them.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::UnsupportedCapability`] if the plug has no
    /// emeter, otherwise error if the exchange fails or the reply is
    /// rejected.
    pub async fn get_emeter_realtime(&self) -> Result<EmeterRealtime, Error> {
        if !self.supports_emeter() {
            return Err(DeviceError::UnsupportedCapability {
                capability: "emeter".to_string(),
            }
            .into());
        }

        let reading: EmeterRealtime = self.query(&EmeterCommand::GetRealtime).await?;
        self.update(vec![PlugEvent::EmeterRealtimeUpdate(reading)], |state| {
            state.set_emeter_realtime(reading);
        });
        Ok(reading)
    }

    /// Refreshes the plug state and returns whether the load is in use.
    ///
    /// Plugs with an emeter get a new energy reading, others a new sysinfo.
    ///
    /// # Errors
    ///
    /// Returns error if the refresh fails.
    pub async fn get_in_use(&self) -> Result<bool, Error> {
        if self.supports_emeter() {
            self.get_emeter_realtime().await?;
        } else {
            self.get_sys_info().await?;
        }
        Ok(self.in_use())
    }

    // ========== Cached State ==========

    /// Returns whether the load is in use, from cached state only.
    ///
    /// With an emeter reading this is `power > in_use_threshold`; otherwise
    /// the relay state.
    #[must_use]
    pub fn in_use(&self) -> bool {
        self.state.read().in_use(self.supports_emeter())
    }

    /// Returns the cached relay state.
    #[must_use]
    pub fn relay_state(&self) -> bool {
        self.state.read().relay_state()
    }

    /// Returns the cached sysinfo block.
    #[must_use]
    pub fn sys_info(&self) -> Option<SysInfo> {
        self.state.read().sys_info().cloned()
    }

    /// Replaces the cached sysinfo block and emits the resulting events.
    pub fn set_sys_info(&self, sys_info: SysInfo) {
        self.update(Vec::new(), |state| state.set_sys_info(sys_info));
    }

    /// Returns the cached energy reading.
    #[must_use]
    pub fn emeter_realtime(&self) -> Option<EmeterRealtime> {
        self.state.read().emeter_realtime().copied()
    }

    /// Replaces the cached energy reading and emits the resulting events.
    pub fn set_emeter_realtime(&self, reading: EmeterRealtime) {
        self.update(vec![PlugEvent::EmeterRealtimeUpdate(reading)], |state| {
            state.set_emeter_realtime(reading);
        });
    }

    /// Returns the in-use threshold in Watts.
    #[must_use]
    pub fn in_use_threshold(&self) -> f64 {
        self.state.read().in_use_threshold()
    }

    /// Sets the in-use threshold in Watts.
    pub fn set_in_use_threshold(&self, watts: f64) {
        self.state.write().set_in_use_threshold(watts);
    }

    /// Returns the cached alias, empty until sysinfo is known.
    #[must_use]
    pub fn alias(&self) -> String {
        self.state
            .read()
            .sys_info()
            .map(|info| info.alias.clone())
            .unwrap_or_default()
    }

    // ========== Events ==========

    /// Registers a listener for every emission of `kind`.
    pub fn on<F>(&self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: Fn(&Self, &PlugEvent) + Send + Sync + 'static,
    {
        self.callbacks.on(kind, listener)
    }

    /// Registers a listener for the next emission of `kind` only.
    pub fn once<F>(&self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: Fn(&Self, &PlugEvent) + Send + Sync + 'static,
    {
        self.callbacks.once(kind, listener)
    }

    /// Removes a listener. Returns `true` if it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }

    /// Removes every listener.
    pub fn clear_listeners(&self) {
        self.callbacks.clear();
    }

    /// Applies `apply` to the cached state, then dispatches `events`
    /// followed by the events the new state implies.
    ///
    /// Listeners run after the state lock is released.
    fn update(&self, mut events: Vec<PlugEvent>, apply: impl FnOnce(&mut PlugState)) {
        {
            let mut state = self.state.write();
            apply(&mut state);
            events.extend(state.take_events(self.supports_emeter()));
        }
        for event in &events {
            tracing::trace!(event = %event.kind(), "Emitting plug event");
            self.callbacks.dispatch(self, event);
        }
    }
}

#[cfg(feature = "tcp")]
impl Plug<TcpClient> {
    /// Creates a builder for a plug at `host` on the default port.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use kasa_plug::Plug;
    ///
    /// # async fn example() -> kasa_plug::Result<()> {
    /// let plug = Plug::tcp("192.168.1.60").build().await?;
    /// println!("{} is {}", plug.alias(), if plug.relay_state() { "on" } else { "off" });
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn tcp(host: impl Into<String>) -> PlugBuilder<TcpClient> {
        PlugBuilder::new(TcpClient::new(host))
    }

    /// Creates a builder from a full TCP configuration.
    ///
    /// ```no_run
    /// use std::time::Duration;
    ///
    /// use kasa_plug::{Plug, TcpConfig};
    ///
    /// # async fn example() -> kasa_plug::Result<()> {
    /// let config = TcpConfig::new("192.168.1.60").with_timeout(Duration::from_secs(3));
    /// let plug = Plug::tcp_config(config).build().await?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn tcp_config(config: TcpConfig) -> PlugBuilder<TcpClient> {
        PlugBuilder::new(config.into_client())
    }

    /// Returns the address the plug is reached at.
    #[must_use]
    pub fn address(&self) -> String {
        self.transport.config().address()
    }
}

fn parse_part<C, R>(json: &Value, command: &C) -> Result<R, Error>
where
    C: Command,
    R: serde::de::DeserializeOwned,
{
    let value = protocol::extract_result(json, command.module(), command.method())?;
    serde_json::from_value(value).map_err(|e| Error::Parse(e.into()))
}

fn optional_part<R: serde::de::DeserializeOwned>(
    json: &Value,
    command: &impl Command,
) -> Option<R> {
    match parse_part(json, command) {
        Ok(part) => Some(part),
        Err(e) => {
            tracing::debug!(
                module = command.module(),
                method = command.method(),
                error = %e,
                "Ignoring unanswered info part"
            );
            None
        }
    }
}
