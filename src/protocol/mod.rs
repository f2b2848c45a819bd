// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport implementations for communicating with smart plugs.
//!
//! A [`Transport`] delivers a JSON request to one device and returns the raw
//! reply as a [`CommandResponse`]. The reply is then unpacked per module and
//! method, and the device-reported `err_code` is checked.
//!
//! # Transports
//!
//! - [`TcpClient`]: the local TCP protocol on port 9999, obfuscated with the
//!   XOR autokey cipher from [`codec`]

pub mod codec;
#[cfg(test)]
pub(crate) mod mock;
#[cfg(feature = "tcp")]
mod tcp;

#[cfg(feature = "tcp")]
pub use tcp::{TcpClient, TcpConfig};

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::command::Command;
use crate::error::{DeviceError, Error, ParseError, TransportError};

/// Raw reply from a smart plug.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    /// The decrypted reply bytes, checked as UTF-8 only when parsed.
    body: Vec<u8>,
}

impl CommandResponse {
    /// Creates a new command response with the given body.
    #[must_use]
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self { body: body.into() }
    }

    /// Returns the reply body as received.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Returns the reply body as text, for display and logging.
    ///
    /// Invalid UTF-8 sequences are shown as U+FFFD; use [`json`](Self::json)
    /// to get an error instead.
    #[must_use]
    pub fn body(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Parses the whole reply as JSON.
    ///
    /// # Errors
    ///
    /// Returns error if the body is not valid UTF-8 or not valid JSON.
    pub fn json(&self) -> Result<Value, ParseError> {
        let text = std::str::from_utf8(&self.body)?;
        serde_json::from_str(text).map_err(Into::into)
    }

    /// Extracts the result object of `module.method` from the reply.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the reply is malformed or lacks the method,
    /// and a device error if the device reported a non-zero `err_code`.
    pub fn method_result(&self, module: &str, method: &str) -> Result<Value, Error> {
        let json = self.json()?;
        extract_result(&json, module, method)
    }

    /// Extracts and deserializes the result object of `module.method`.
    ///
    /// # Errors
    ///
    /// See [`method_result`](Self::method_result); also fails if the result
    /// does not match `T`.
    pub fn parse_result<T: DeserializeOwned>(&self, module: &str, method: &str) -> Result<T, Error> {
        let value = self.method_result(module, method)?;
        serde_json::from_value(value).map_err(|e| Error::Parse(ParseError::Json(e)))
    }
}

/// Extracts the result object of `module.method` from a parsed reply.
///
/// A module the device does not implement answers with an `err_code` at
/// module level instead of a method object; both levels are checked.
pub(crate) fn extract_result(json: &Value, module: &str, method: &str) -> Result<Value, Error> {
    let module_obj = json
        .get(module)
        .ok_or_else(|| ParseError::MissingField(module.to_string()))?;

    let Some(result) = module_obj.get(method) else {
        check_err_code(module_obj)?;
        return Err(ParseError::MissingField(format!("{module}.{method}")).into());
    };

    if !result.is_object() {
        return Err(ParseError::UnexpectedFormat(format!(
            "{module}.{method} is not an object: {result}"
        ))
        .into());
    }

    check_err_code(result)?;
    Ok(result.clone())
}

fn check_err_code(value: &Value) -> Result<(), DeviceError> {
    match value.get("err_code").and_then(Value::as_i64) {
        Some(code) if code != 0 => Err(DeviceError::ResponseError {
            code,
            message: value
                .get("err_msg")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        }),
        _ => Ok(()),
    }
}

/// Trait for transports that can exchange requests with a smart plug.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends a command to the device and returns the reply.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the exchange fails.
    async fn send_command<C: Command + Sync>(
        &self,
        command: &C,
    ) -> Result<CommandResponse, TransportError> {
        self.send_raw(&command.to_payload()).await
    }

    /// Sends a raw JSON request to the device.
    ///
    /// # Arguments
    ///
    /// * `payload` - The JSON request text
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the exchange fails.
    async fn send_raw(&self, payload: &str) -> Result<CommandResponse, TransportError>;
}
