// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire obfuscation used by the local smart plug protocol.
//!
//! Payloads are XORed with an autokey stream: the key starts at
//! [`INITIAL_KEY`] and each ciphertext byte becomes the key for the next
//! byte. Over TCP every message is preceded by its length as a 4-byte
//! big-endian integer.
//!
//! # Examples
//!
//! ```
//! use kasa_plug::protocol::codec;
//!
//! let cipher = codec::encrypt(br#"{"system":{"get_sysinfo":{}}}"#);
//! assert_eq!(&cipher[..3], &[0xd0, 0xf2, 0x81]);
//! assert_eq!(codec::decrypt(&cipher), br#"{"system":{"get_sysinfo":{}}}"#);
//! ```

/// First key of the autokey stream.
pub const INITIAL_KEY: u8 = 171;

/// Size of the TCP length prefix.
pub const HEADER_LEN: usize = 4;

/// Largest reply frame accepted from a device.
pub const MAX_FRAME_LEN: usize = 1024 * 1024;

/// Encrypts a plaintext payload.
#[must_use]
pub fn encrypt(plain: &[u8]) -> Vec<u8> {
    let mut key = INITIAL_KEY;
    plain
        .iter()
        .map(|&byte| {
            key ^= byte;
            key
        })
        .collect()
}

/// Decrypts a ciphertext payload.
#[must_use]
pub fn decrypt(cipher: &[u8]) -> Vec<u8> {
    let mut key = INITIAL_KEY;
    cipher
        .iter()
        .map(|&byte| {
            let plain = key ^ byte;
            key = byte;
            plain
        })
        .collect()
}

/// Encrypts a payload and prepends the TCP length header.
#[must_use]
pub fn encode_frame(plain: &[u8]) -> Vec<u8> {
    // Requests are small JSON documents.
    #[allow(clippy::cast_possible_truncation)]
    let len = plain.len() as u32;
    let mut frame = Vec::with_capacity(HEADER_LEN + plain.len());
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(&encrypt(plain));
    frame
}

/// Reads the body length from a TCP length header.
#[must_use]
pub fn frame_len(header: [u8; HEADER_LEN]) -> usize {
    u32::from_be_bytes(header) as usize
}
