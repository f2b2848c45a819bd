// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared test support: an in-process plug simulator speaking the real TCP
//! protocol, and the registry of devices the behavioural suite runs over.

#![allow(dead_code)]

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use kasa_plug::protocol::codec;
use kasa_plug::{Plug, TcpClient, TcpConfig};
use parking_lot::Mutex;
use serde_json::{Map, Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

// =============================================================================
// Simulator
// =============================================================================

/// Mutable state of a simulated plug.
#[derive(Debug, Clone)]
struct SimState {
    model: &'static str,
    feature: &'static str,
    alias: String,
    relay_state: bool,
    led_off: bool,
    emeter: bool,
    load_watts: f64,
    rejected: Vec<(String, String)>,
}

impl SimState {
    fn new(model: &'static str, feature: &'static str, alias: &str) -> Self {
        Self {
            model,
            feature,
            alias: alias.to_string(),
            relay_state: false,
            led_off: false,
            emeter: feature.split(':').any(|f| f == "ENE"),
            load_watts: 0.0,
            rejected: Vec::new(),
        }
    }

    fn handle(&mut self, request: &Value) -> Value {
        let Some(modules) = request.as_object() else {
            return json!({});
        };

        let mut reply = Map::new();
        for (module, methods) in modules {
            let Some(methods) = methods.as_object() else {
                continue;
            };
            let entry = if self.has_module(module) {
                let results = methods
                    .iter()
                    .map(|(method, params)| (method.clone(), self.call(module, method, params)))
                    .collect();
                Value::Object(results)
            } else {
                json!({ "err_code": -1, "err_msg": "module not support" })
            };
            reply.insert(module.clone(), entry);
        }
        Value::Object(reply)
    }

    fn has_module(&self, module: &str) -> bool {
        match module {
            "system" | "schedule" | "anti_theft" | "count_down" | "cnCloud" => true,
            "emeter" => self.emeter,
            _ => false,
        }
    }

    fn call(&mut self, module: &str, method: &str, params: &Value) -> Value {
        if self
            .rejected
            .iter()
            .any(|(m, f)| m == module && f == method)
        {
            return json!({ "err_code": -3, "err_msg": "invalid argument" });
        }

        match (module, method) {
            ("system", "get_sysinfo") => self.sys_info(),
            ("system", "set_relay_state") => match params.get("state").and_then(Value::as_u64) {
                Some(state) => {
                    self.relay_state = state != 0;
                    ok()
                }
                None => invalid(),
            },
            ("system", "set_led_off") => match params.get("off").and_then(Value::as_u64) {
                Some(off) => {
                    self.led_off = off != 0;
                    ok()
                }
                None => invalid(),
            },
            ("system", "set_dev_alias") => match params.get("alias").and_then(Value::as_str) {
                Some(alias) => {
                    self.alias = alias.to_string();
                    ok()
                }
                None => invalid(),
            },
            ("emeter", "get_realtime") => {
                let power = if self.relay_state { self.load_watts } else { 0.0 };
                json!({
                    "current": power / 230.0,
                    "voltage": 230.0,
                    "power": power,
                    "total": 0.012,
                    "err_code": 0
                })
            }
            ("schedule", "get_rules") => json!({
                "rule_list": [{
                    "id": "8AA75A50A8440B17941D192BD9E01FFA",
                    "name": "Evening",
                    "enable": 1,
                    "wday": [1, 1, 1, 1, 1, 0, 0],
                    "stime_opt": 0,
                    "smin": 1080,
                    "sact": 1,
                    "etime_opt": -1,
                    "emin": 0,
                    "eact": -1,
                    "repeat": 1
                }],
                "enable": 1,
                "version": 2,
                "err_code": 0
            }),
            ("anti_theft" | "count_down", "get_rules") => json!({
                "rule_list": [],
                "enable": 0,
                "version": 2,
                "err_code": 0
            }),
            ("schedule", "get_next_action") => json!({ "type": -1, "err_code": 0 }),
            ("cnCloud", "get_info") => json!({
                "username": "",
                "server": "devs.tplinkcloud.com",
                "binded": 0,
                "cld_connection": 0,
                "illegalType": 0,
                "stopConnect": 0,
                "tcspStatus": 0,
                "fwDlPage": "",
                "tcspInfo": "",
                "fwNotifyType": 0,
                "err_code": 0
            }),
            _ => json!({ "err_code": -2, "err_msg": "member not support" }),
        }
    }

    fn sys_info(&self) -> Value {
        json!({
            "sw_ver": "1.5.4 Build 180815 Rel.121440",
            "hw_ver": "2.0",
            "type": "IOT.SMARTPLUGSWITCH",
            "model": self.model,
            "mac": "50:C7:BF:00:00:01",
            "dev_name": "Smart Wi-Fi Plug",
            "alias": self.alias,
            "relay_state": u8::from(self.relay_state),
            "on_time": 0,
            "active_mode": "none",
            "feature": self.feature,
            "updating": 0,
            "icon_hash": "",
            "rssi": -52,
            "led_off": u8::from(self.led_off),
            "deviceId": "80061E3E7CD2AF0F8B3C1A7E5D2B94C117F0A3B1",
            "oemId": "FFF22CFF774A0B89F7624BFC6F50D5DE",
            "err_code": 0
        })
    }
}

fn ok() -> Value {
    json!({ "err_code": 0 })
}

fn invalid() -> Value {
    json!({ "err_code": -3, "err_msg": "invalid argument" })
}

/// A plug simulator listening on a random local port.
///
/// Each connection carries one framed request, as with real plugs. The
/// listener task is aborted when the simulator is dropped.
#[derive(Debug)]
pub struct PlugSimulator {
    addr: SocketAddr,
    state: Arc<Mutex<SimState>>,
    task: JoinHandle<()>,
}

impl PlugSimulator {
    /// An HS110-like plug: energy metering, relay on, drawing 40 W.
    pub async fn hs110() -> Self {
        let mut state = SimState::new("HS110(EU)", "TIM:ENE", "Simulated HS110");
        state.relay_state = true;
        state.load_watts = 40.0;
        Self::start(state).await
    }

    /// An HS100-like plug: relay and LED only.
    pub async fn hs100() -> Self {
        Self::start(SimState::new("HS100(EU)", "TIM", "Simulated HS100")).await
    }

    async fn start(state: SimState) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind simulator");
        let addr = listener.local_addr().expect("simulator address");
        let state = Arc::new(Mutex::new(state));

        let shared = state.clone();
        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(stream, shared.clone()));
            }
        });

        Self { addr, state, task }
    }

    /// Returns a configuration pointing at the simulator.
    pub fn config(&self) -> TcpConfig {
        TcpConfig::new(self.addr.ip().to_string()).with_port(self.addr.port())
    }

    pub fn relay_state(&self) -> bool {
        self.state.lock().relay_state
    }

    /// Flips the relay as if the button on the plug was pressed.
    pub fn press_button(&self) {
        let mut state = self.state.lock();
        state.relay_state = !state.relay_state;
    }

    pub fn led_on(&self) -> bool {
        !self.state.lock().led_off
    }

    pub fn alias(&self) -> String {
        self.state.lock().alias.clone()
    }

    pub fn set_load_watts(&self, watts: f64) {
        self.state.lock().load_watts = watts;
    }

    /// Makes the simulator answer `module.method` with `err_code` -3.
    pub fn reject(&self, module: &str, method: &str) {
        self.state
            .lock()
            .rejected
            .push((module.to_string(), method.to_string()));
    }
}

impl Drop for PlugSimulator {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(mut stream: TcpStream, state: Arc<Mutex<SimState>>) -> std::io::Result<()> {
    let mut header = [0u8; codec::HEADER_LEN];
    stream.read_exact(&mut header).await?;
    let mut body = vec![0u8; codec::frame_len(header)];
    stream.read_exact(&mut body).await?;

    let request: Value = serde_json::from_slice(&codec::decrypt(&body)).unwrap_or(Value::Null);
    let reply = state.lock().handle(&request);

    stream
        .write_all(&codec::encode_frame(reply.to_string().as_bytes()))
        .await?;
    stream.flush().await
}

// =============================================================================
// Device Registry
// =============================================================================

/// Where a test device comes from.
#[derive(Debug)]
pub enum DeviceSource {
    Simulated(PlugSimulator),
    Remote(TcpConfig),
}

/// One entry of the device registry.
#[derive(Debug)]
pub struct TestDevice {
    pub name: String,
    source: Option<DeviceSource>,
}

impl TestDevice {
    pub fn simulated(name: &str, simulator: PlugSimulator) -> Self {
        Self {
            name: name.to_string(),
            source: Some(DeviceSource::Simulated(simulator)),
        }
    }

    /// A real plug whose address is read from `{var}`; unset means skipped.
    pub fn from_env(name: &str, var: &str) -> Self {
        Self {
            name: name.to_string(),
            source: env::var(var).ok().map(|ip| DeviceSource::Remote(TcpConfig::new(ip))),
        }
    }

    /// Returns the simulator backing this device, if simulated.
    pub fn simulator(&self) -> Option<&PlugSimulator> {
        match &self.source {
            Some(DeviceSource::Simulated(sim)) => Some(sim),
            _ => None,
        }
    }

    /// Builds a probed client, or `None` if this device is not configured.
    pub async fn get_device(&self) -> Option<Plug<TcpClient>> {
        let config = match self.source.as_ref()? {
            DeviceSource::Simulated(sim) => sim.config(),
            DeviceSource::Remote(config) => config.clone(),
        };
        let plug = Plug::tcp_config(config)
            .build()
            .await
            .unwrap_or_else(|e| panic!("{}: failed to build plug: {e}", self.name));
        Some(plug)
    }
}

/// Registry of devices the behavioural suite runs against.
#[derive(Debug)]
pub struct TestDevices {
    pub plug: Vec<TestDevice>,
}

/// Starts the simulators and collects the configured devices.
pub async fn test_devices() -> TestDevices {
    TestDevices {
        plug: vec![
            TestDevice::simulated("hs110-sim", PlugSimulator::hs110().await),
            TestDevice::simulated("hs100-sim", PlugSimulator::hs100().await),
            TestDevice::from_env("plug-1", "PLUG_1_IP"),
        ],
    }
}
