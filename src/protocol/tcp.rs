// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! TCP protocol implementation for smart plugs.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::TransportError;
use crate::protocol::codec;
use crate::protocol::{CommandResponse, Transport};

// ============================================================================
// TcpConfig - Connection parameters for one plug
// ============================================================================

/// Configuration for a TCP smart plug connection.
///
/// # Examples
///
/// ```
/// use kasa_plug::protocol::TcpConfig;
/// use std::time::Duration;
///
/// // Simple configuration
/// let config = TcpConfig::new("192.168.1.60");
/// assert_eq!(config.port(), 9999);
///
/// // With all options
/// let config = TcpConfig::new("192.168.1.60")
///     .with_port(10000)
///     .with_timeout(Duration::from_secs(3));
/// assert_eq!(config.address(), "192.168.1.60:10000");
/// ```
#[derive(Debug, Clone)]
pub struct TcpConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpConfig {
    /// Default port of the local protocol.
    pub const DEFAULT_PORT: u16 = 9999;
    /// Default timeout for one request/response exchange.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new TCP configuration for the specified host.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the plug
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the `host:port` address.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Creates a `TcpClient` from this configuration.
    #[must_use]
    pub fn into_client(self) -> TcpClient {
        TcpClient { config: self }
    }
}

// ============================================================================
// TcpClient
// ============================================================================

/// TCP client for communicating with a smart plug.
///
/// Each request opens a fresh connection, writes one length-prefixed
/// encrypted frame and reads one reply frame.
///
/// # Examples
///
/// ```no_run
/// use kasa_plug::command::SystemCommand;
/// use kasa_plug::protocol::{TcpClient, Transport};
///
/// # async fn example() -> kasa_plug::Result<()> {
/// let client = TcpClient::new("192.168.1.60");
/// let response = client.send_command(&SystemCommand::GetSysInfo).await?;
/// println!("{}", response.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TcpClient {
    config: TcpConfig,
}

impl TcpClient {
    /// Creates a new TCP client for the specified host on the default port.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        TcpConfig::new(host).into_client()
    }

    /// Returns the connection configuration.
    #[must_use]
    pub fn config(&self) -> &TcpConfig {
        &self.config
    }

    async fn exchange(&self, address: &str, payload: &str) -> Result<Vec<u8>, TransportError> {
        let mut stream = TcpStream::connect(address).await.map_err(|source| {
            TransportError::ConnectionFailed {
                address: address.to_string(),
                source,
            }
        })?;

        stream
            .write_all(&codec::encode_frame(payload.as_bytes()))
            .await?;

        let mut header = [0u8; codec::HEADER_LEN];
        stream.read_exact(&mut header).await?;
        let len = codec::frame_len(header);
        if len > codec::MAX_FRAME_LEN {
            return Err(TransportError::FrameTooLarge(len));
        }

        let mut body = vec![0u8; len];
        stream.read_exact(&mut body).await?;

        Ok(codec::decrypt(&body))
    }
}

impl Transport for TcpClient {
    async fn send_raw(&self, payload: &str) -> Result<CommandResponse, TransportError> {
        let address = self.config.address();
        let timeout = self.config.timeout;

        tracing::debug!(address = %address, payload = %payload, "Sending TCP request");

        let body = tokio::time::timeout(timeout, self.exchange(&address, payload))
            .await
            .map_err(|_| {
                TransportError::Timeout(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
            })??;

        let response = CommandResponse::new(body);
        tracing::debug!(address = %address, body = %response.body(), "Received TCP response");

        Ok(response)
    }
}
