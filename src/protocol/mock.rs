// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scripted in-memory transport for unit tests.

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::TransportError;
use crate::protocol::{CommandResponse, Transport};

/// Transport answering from a queue of canned replies and recording requests.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    replies: Mutex<VecDeque<Result<String, TransportError>>>,
    requests: Mutex<Vec<Value>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON reply.
    pub(crate) fn reply(self, body: Value) -> Self {
        self.replies.lock().push_back(Ok(body.to_string()));
        self
    }

    /// Queues a transport failure.
    pub(crate) fn fail(self, err: TransportError) -> Self {
        self.replies.lock().push_back(Err(err));
        self
    }

    /// Returns every request sent so far, parsed.
    pub(crate) fn requests(&self) -> Vec<Value> {
        self.requests.lock().clone()
    }

    pub(crate) fn pending(&self) -> usize {
        self.replies.lock().len()
    }
}

impl Transport for MockTransport {
    async fn send_raw(&self, payload: &str) -> Result<CommandResponse, TransportError> {
        let request = serde_json::from_str(payload).unwrap_or(Value::Null);
        self.requests.lock().push(request);
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "script exhausted",
                )))
            })
            .map(CommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn exhausted_script_is_io_error() {
        let transport = MockTransport::new();
        let err = transport.send_raw("{}").await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::Io(ref e) if e.kind() == std::io::ErrorKind::UnexpectedEof
        ));
        assert_eq!(transport.requests(), vec![serde_json::json!({})]);
    }
}
