// SPDX-License-Identifier: MIT OR Apache-2.0

//! `p2panda-aead` provides the ChaCha20-Poly1305 authenticated encryption with additional data
//! (AEAD) construction from [RFC 8439](https://www.rfc-editor.org/rfc/rfc8439), together with the
//! XChaCha20-Poly1305 variant using extended 192-bit nonces.
//!
//! Messages are sealed into `ciphertext || tag` and opened again after the 16-byte tag has been
//! verified. Additional data is authenticated but not encrypted. Nothing is ever decrypted from a
//! message which failed authentication and any output written for it is zeroed before the error
//! is returned.
//!
//! ## Usage
//!
//! ```
//! use p2panda_aead::ChaCha20Poly1305;
//!
//! let cipher = ChaCha20Poly1305::new([1; 32]);
//! let nonce = [2; 12];
//!
//! let ciphertext = cipher.seal(&nonce, b"Hello, Panda!", b"header")?;
//! let plaintext = cipher.open(&nonce, &ciphertext, b"header")?;
//!
//! assert_eq!(plaintext, b"Hello, Panda!");
//! # Ok::<(), p2panda_aead::AeadError>(())
//! ```
//!
//! Results can also be appended to existing buffers ([`Aead::seal_append`]), written in place
//! within the same buffer as the input ([`Aead::seal_in_buffer`]) or with a detached tag
//! ([`Aead::seal_in_place_detached`]), with the matching `open_*` methods.
//!
//! ## Primitives
//!
//! The construction only relies on two contracts, see [`traits`]: a stream cipher producing
//! keystream from block counter 0 for a key and nonce, and a one-time MAC computing a 16-byte tag.
//! ChaCha20 and XChaCha20 are provided by the [`chacha20`] crate, Poly1305 by [`poly1305`].
//!
//! ## Nonces
//!
//! A nonce must never be used twice with the same key. This crate does not track nonces, callers
//! are responsible for generating them uniquely, for example from a counter. With
//! [`XChaCha20Poly1305`] nonces are large enough to be chosen at random.
mod buffer;
mod cipher;
mod keystream;
mod mac;
mod mac_input;
mod pool;
mod secret;
mod stream;
mod tag;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
pub mod traits;

pub use cipher::{Aead, AeadError, ChaCha20Poly1305, XChaCha20Poly1305};
pub use mac::Poly1305Mac;
pub use pool::{DEFAULT_MAX_POOLED, MacInputPool, PooledBuffer};
pub use stream::{ChaCha20Stream, XChaCha20Stream};
pub use traits::{KeyStream, OneTimeMac, StreamError};

/// Size of the secret key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of the ChaCha20-Poly1305 nonce in bytes.
pub const NONCE_SIZE: usize = 12;

/// Size of the XChaCha20-Poly1305 nonce in bytes.
pub const X_NONCE_SIZE: usize = 24;

/// Size of the authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Size of the one-time MAC key derived for every message.
pub const MAC_KEY_SIZE: usize = 32;

/// Largest plaintext which can be sealed under one nonce.
///
/// The 32-bit block counter allows 2^32 blocks of 64 bytes, the first one is used for the MAC key.
pub const MAX_PLAINTEXT_SIZE: u64 = (1 << 38) - 64;

/// Authentication tag.
pub type Tag = [u8; TAG_SIZE];
