// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `kasa_plug` library.
//!
//! Failures fall into two tiers:
//!
//! - **Transport failures** ([`TransportError`]): the device could not be
//!   reached, the exchange timed out, or the frame was unusable.
//! - **Protocol failures** ([`DeviceError::ResponseError`] and
//!   [`ParseError`]): the device answered, but reported a non-zero
//!   `err_code` or sent a payload that does not match the expected shape.
//!
//! Argument validation errors are reported as [`ValueError`].

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the device.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The device rejected the request or lacks a capability.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

impl Error {
    /// Returns `true` if the device could not be reached or the exchange failed
    /// before a reply was decoded.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the device replied but the reply was an error or
    /// could not be understood.
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            Self::Parse(_) | Self::Device(DeviceError::ResponseError { .. })
        )
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A value that must be strictly positive was zero.
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),
}

/// Errors raised while exchanging frames with a device.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection to the device failed.
    #[error("connection to {address} failed: {source}")]
    ConnectionFailed {
        /// The `host:port` that was dialed.
        address: String,
        /// The underlying socket error.
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing a frame failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The reply announced a frame larger than the accepted maximum.
    #[error("reply frame of {0} bytes exceeds the maximum frame size")]
    FrameTooLarge(usize),
}

/// Errors related to parsing device replies.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The reply body is not valid UTF-8.
    #[error("reply is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Errors reported by, or about, the device itself.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device answered with a non-zero `err_code`.
    #[error("device returned err_code {code}: {message}")]
    ResponseError {
        /// The `err_code` reported by the device.
        code: i64,
        /// The `err_msg` reported by the device, if any.
        message: String,
    },

    /// Device does not support the requested capability.
    #[error("device does not support {capability}")]
    UnsupportedCapability {
        /// The capability that is not supported.
        capability: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
