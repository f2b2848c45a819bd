// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for plug events.
//!
//! - [`SubscriptionId`] - A unique identifier for a subscription, used to unsubscribe
//! - [`CallbackRegistry`] - Registry that stores listeners and dispatches events
//!
//! # Usage
//!
//! ```no_run
//! use kasa_plug::Plug;
//! use kasa_plug::event::EventKind;
//!
//! # async fn example() -> kasa_plug::Result<()> {
//! let plug = Plug::tcp("192.168.1.60").build().await?;
//!
//! let sub_id = plug.on(EventKind::PowerOn, |plug, _event| {
//!     println!("{} switched on", plug.alias());
//! });
//!
//! plug.set_power_state(true).await?;
//!
//! // Later, unsubscribe
//! plug.unsubscribe(sub_id);
//! # Ok(())
//! # }
//! ```

mod callback;

pub use callback::{CallbackRegistry, SubscriptionId};
