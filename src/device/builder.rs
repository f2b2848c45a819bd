// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plug builder.

use crate::capabilities::Capabilities;
use crate::command::{Command, SystemCommand};
use crate::device::Plug;
use crate::error::Error;
use crate::protocol::Transport;
use crate::response::SysInfo;
use crate::state::PlugState;

/// Builder for creating plugs.
///
/// Obtained from [`Plug::tcp`], [`Plug::tcp_config`] or [`Plug::builder`].
///
/// # Examples
///
/// ```no_run
/// use kasa_plug::{Capabilities, Plug};
///
/// # async fn example() -> kasa_plug::Result<()> {
/// // Probe sysinfo and detect capabilities
/// let plug = Plug::tcp("192.168.1.60").build().await?;
///
/// // Custom in-use threshold
/// let plug = Plug::tcp("192.168.1.60")
///     .with_in_use_threshold(5.0)
///     .build()
///     .await?;
///
/// // Manual capabilities, no network probe
/// let plug = Plug::tcp("192.168.1.60")
///     .with_capabilities(Capabilities::hs110())
///     .build_without_probe();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PlugBuilder<T: Transport> {
    transport: T,
    capabilities: Option<Capabilities>,
    in_use_threshold: Option<f64>,
}

impl<T: Transport> PlugBuilder<T> {
    pub(crate) fn new(transport: T) -> Self {
        Self {
            transport,
            capabilities: None,
            in_use_threshold: None,
        }
    }

    /// Sets the plug capabilities manually instead of detecting them.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Returns the currently set capabilities, if any.
    #[must_use]
    pub fn capabilities(&self) -> Option<&Capabilities> {
        self.capabilities.as_ref()
    }

    /// Sets the power draw in Watts above which the plug counts as in use.
    #[must_use]
    pub fn with_in_use_threshold(mut self, watts: f64) -> Self {
        self.in_use_threshold = Some(watts);
        self
    }

    fn initial_state(&self) -> PlugState {
        let mut state = PlugState::new();
        if let Some(watts) = self.in_use_threshold {
            state.set_in_use_threshold(watts);
        }
        state
    }

    /// Builds the plug after reading its sysinfo.
    ///
    /// Capabilities not set manually are detected from the sysinfo
    /// `feature` flags. The sysinfo becomes the cached baseline, so the
    /// first refresh only emits events for what changed since.
    ///
    /// # Errors
    ///
    /// Returns error if the plug cannot be reached or the sysinfo reply is
    /// unusable.
    pub async fn build(self) -> Result<Plug<T>, Error> {
        let command = SystemCommand::GetSysInfo;
        let response = self.transport.send_command(&command).await?;
        let sys_info: SysInfo = response.parse_result(command.module(), command.method())?;

        let capabilities = self
            .capabilities
            .unwrap_or_else(|| Capabilities::from_sys_info(&sys_info));
        tracing::debug!(
            alias = %sys_info.alias,
            model = %sys_info.model,
            emeter = capabilities.supports_emeter(),
            "Probed plug"
        );

        let mut state = self.initial_state();
        state.set_sys_info(sys_info);
        state.take_events(capabilities.supports_emeter());

        Ok(Plug::new(self.transport, capabilities, state))
    }

    /// Builds the plug without any network access.
    ///
    /// If capabilities were not set, defaults to [`Capabilities::default()`],
    /// i.e. no emeter.
    #[must_use]
    pub fn build_without_probe(self) -> Plug<T> {
        let state = self.initial_state();
        let capabilities = self.capabilities.unwrap_or_default();
        Plug::new(self.transport, capabilities, state)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use serde_json::json;

    use super::*;
    use crate::error::TransportError;
    use crate::event::EventKind;
    use crate::protocol::mock::MockTransport;

    fn sysinfo(feature: &str, relay_state: u8) -> serde_json::Value {
        json!({
            "system": {
                "get_sysinfo": {
                    "alias": "Heater",
                    "model": "HS110(EU)",
                    "feature": feature,
                    "relay_state": relay_state,
                    "err_code": 0
                }
            }
        })
    }

    #[test]
    fn builder_capabilities_accessor() {
        let builder = PlugBuilder::new(MockTransport::new());
        assert!(builder.capabilities().is_none());

        let builder = builder.with_capabilities(Capabilities::hs110());
        assert_eq!(builder.capabilities(), Some(&Capabilities::hs110()));
    }

    #[test]
    fn build_without_probe_defaults() {
        let plug = PlugBuilder::new(MockTransport::new()).build_without_probe();
        assert!(!plug.supports_emeter());
        assert!(plug.sys_info().is_none());
        assert!((plug.in_use_threshold() - PlugState::DEFAULT_IN_USE_THRESHOLD).abs() < f64::EPSILON);
    }

    #[test]
    fn build_without_probe_keeps_threshold() {
        let plug = PlugBuilder::new(MockTransport::new())
            .with_in_use_threshold(7.5)
            .build_without_probe();
        assert!((plug.in_use_threshold() - 7.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn build_detects_emeter() {
        let plug = PlugBuilder::new(MockTransport::new().reply(sysinfo("TIM:ENE", 1)))
            .build()
            .await
            .unwrap();
        assert!(plug.supports_emeter());
        assert_eq!(plug.alias(), "Heater");
        assert!(plug.relay_state());
    }

    #[tokio::test]
    async fn manual_capabilities_override_detection() {
        let plug = PlugBuilder::new(MockTransport::new().reply(sysinfo("TIM:ENE", 0)))
            .with_capabilities(Capabilities::hs100())
            .build()
            .await
            .unwrap();
        assert!(!plug.supports_emeter());
    }

    #[tokio::test]
    async fn probe_is_baseline_for_events() {
        let plug = PlugBuilder::new(
            MockTransport::new()
                .reply(sysinfo("TIM", 1))
                .reply(sysinfo("TIM", 1)),
        )
        .build()
        .await
        .unwrap();

        let power_on = Arc::new(AtomicU32::new(0));
        let power_on_clone = power_on.clone();
        plug.on(EventKind::PowerOn, move |_, _| {
            power_on_clone.fetch_add(1, Ordering::SeqCst);
        });

        plug.get_sys_info().await.unwrap();
        assert_eq!(power_on.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn build_fails_when_unreachable() {
        let result = PlugBuilder::new(MockTransport::new().fail(TransportError::Timeout(100)))
            .build()
            .await;
        assert!(result.unwrap_err().is_transport());
    }
}
