// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contracts for the two primitives the AEAD construction is assembled from.
//!
//! The construction never looks inside the stream cipher or the MAC. It only asks the stream
//! cipher for keystream starting at block 0 and asks the MAC for a tag under a one-time key.
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::{KEY_SIZE, MAC_KEY_SIZE, Tag};

/// Stream cipher positioned at block counter 0 for a key and nonce.
pub trait KeyStream: Sized {
    /// Nonce size in bytes required by this stream cipher.
    const NONCE_SIZE: usize;

    /// Initialises the keystream for the given key and nonce at block counter 0.
    fn new(key: &[u8; KEY_SIZE], nonce: &[u8]) -> Result<Self, StreamError>;

    /// XORs `buffer` with the next `buffer.len()` bytes of keystream, advancing the stream.
    fn apply_keystream(&mut self, buffer: &mut [u8]);
}

/// One-time authenticator producing fixed-size tags.
pub trait OneTimeMac {
    /// Computes the tag over `input` under the one-time `key`.
    fn compute_tag(input: &[u8], key: &[u8; MAC_KEY_SIZE]) -> Tag;

    /// Checks `tag` against the tag computed over `input`.
    ///
    /// Every byte is compared, independent of where the first difference occurs.
    fn verify_tag(tag: &Tag, input: &[u8], key: &[u8; MAC_KEY_SIZE]) -> bool {
        let expected = Self::compute_tag(input, key);
        bool::from(expected[..].ct_eq(&tag[..]))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreamError {
    #[error("invalid nonce length, expected {expected} bytes but got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },
}
