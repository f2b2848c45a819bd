// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `kasa_plug` - async client for TP-Link Kasa smart plugs.
//!
//! Talks to HS100/HS110-class plugs over their local TCP protocol (port
//! 9999) and keeps a cache of the last reported state.
//!
//! # Supported Features
//!
//! - **Power control**: Switch the relay on/off, toggle, read it back
//! - **LED control**: Switch the indicator LED, blink it
//! - **Energy monitoring**: Realtime power, voltage, current on emeter plugs
//! - **Rules**: Away mode, countdown timer and schedule rule lists
//! - **Events**: `power-on`, `in-use` and friends, with `on`/`once` listeners
//!
//! # Quick Start
//!
//! ```no_run
//! use kasa_plug::Plug;
//!
//! #[tokio::main]
//! async fn main() -> kasa_plug::Result<()> {
//!     // Reads sysinfo and detects whether the plug has an emeter
//!     let plug = Plug::tcp("192.168.1.60").build().await?;
//!
//!     plug.set_power_state(true).await?;
//!     assert!(plug.get_power_state().await?);
//!
//!     if plug.get_in_use().await? {
//!         println!("{} is powering something", plug.alias());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Manual Capabilities
//!
//! ```no_run
//! use kasa_plug::{Capabilities, Plug};
//!
//! #[tokio::main]
//! async fn main() -> kasa_plug::Result<()> {
//!     // No probe: nothing is sent until the first command
//!     let plug = Plug::tcp("192.168.1.60")
//!         .with_capabilities(Capabilities::hs110())
//!         .with_in_use_threshold(2.0)
//!         .build_without_probe();
//!
//!     let reading = plug.get_emeter_realtime().await?;
//!     println!("{:?} W", reading.power);
//!     Ok(())
//! }
//! ```
//!
//! ## Events
//!
//! ```no_run
//! use kasa_plug::{EventKind, Plug};
//!
//! #[tokio::main]
//! async fn main() -> kasa_plug::Result<()> {
//!     let plug = Plug::tcp("192.168.1.60").build().await?;
//!
//!     plug.on(EventKind::PowerOn, |plug, _event| {
//!         println!("{} switched on", plug.alias());
//!     });
//!     plug.once(EventKind::InUse, |_plug, _event| {
//!         println!("load detected");
//!     });
//!
//!     plug.set_power_state(true).await?;
//!     Ok(())
//! }
//! ```

mod capabilities;
pub mod command;
mod device;
pub mod error;
pub mod event;
pub mod protocol;
pub mod response;
pub mod state;
pub mod subscription;
pub mod types;

pub use capabilities::Capabilities;
pub use command::{Command, CommandBatch};
pub use device::{Plug, PlugBuilder};
pub use error::{DeviceError, Error, ParseError, Result, TransportError, ValueError};
pub use event::{EventKind, PlugEvent};
#[cfg(feature = "tcp")]
pub use protocol::{TcpClient, TcpConfig};
pub use protocol::{CommandResponse, Transport};
pub use response::{CloudInfo, EmeterRealtime, PlugInfo, Rule, RuleList, SysInfo};
pub use subscription::SubscriptionId;
pub use types::PowerState;
