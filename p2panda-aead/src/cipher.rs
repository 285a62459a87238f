// SPDX-License-Identifier: MIT OR Apache-2.0

//! ChaCha20-Poly1305 authenticated encryption with additional data (AEAD) with 256-bit key,
//! 128-bit tag and 96-bit nonce, and its XChaCha20-Poly1305 variant with a 192-bit nonce.
//!
//! <https://www.rfc-editor.org/rfc/rfc8439#section-2.8>
use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;
use zeroize::Zeroize;

use crate::buffer::{check_bounds, discard_window, place_in_window, slice_for_append};
use crate::keystream::key_schedule;
use crate::mac::Poly1305Mac;
use crate::pool::{MacInputPool, shared_pool};
use crate::secret::Secret;
use crate::stream::{ChaCha20Stream, XChaCha20Stream};
use crate::tag::{compute_tag, verify_tag};
use crate::traits::{KeyStream, OneTimeMac, StreamError};
use crate::{KEY_SIZE, MAX_PLAINTEXT_SIZE, TAG_SIZE, Tag};

/// ChaCha20-Poly1305 as specified in RFC 8439.
pub type ChaCha20Poly1305 = Aead<ChaCha20Stream>;

/// XChaCha20-Poly1305 with extended 192-bit nonces.
pub type XChaCha20Poly1305 = Aead<XChaCha20Stream>;

/// Seal and open messages with a stream cipher and a one-time authenticator.
///
/// The keystream block at counter 0 provides the one-time MAC key, the payload is encrypted with
/// the keystream from block counter 1 and the tag is computed over the additional data and the
/// ciphertext. Sealed messages are `ciphertext || tag`.
///
/// Every nonce must only be used once per key. This is not checked.
pub struct Aead<S, M = Poly1305Mac> {
    key: Secret<KEY_SIZE>,
    pool: Arc<MacInputPool>,
    _primitives: PhantomData<fn() -> (S, M)>,
}

impl<S: KeyStream, M: OneTimeMac> Aead<S, M> {
    /// Size of the nonce in bytes.
    pub const NONCE_SIZE: usize = S::NONCE_SIZE;

    /// Difference between the length of a sealed message and its plaintext.
    pub const OVERHEAD: usize = TAG_SIZE;

    pub fn new(key: [u8; KEY_SIZE]) -> Self {
        Self::with_pool(key, shared_pool())
    }

    /// Uses a dedicated pool for MAC input buffers instead of the shared one.
    pub fn with_pool(key: [u8; KEY_SIZE], pool: Arc<MacInputPool>) -> Self {
        Self {
            key: Secret::from_bytes(key),
            pool,
            _primitives: PhantomData,
        }
    }

    pub fn from_slice(key: &[u8]) -> Result<Self, AeadError> {
        let key =
            Secret::try_from_slice(key).ok_or(AeadError::InvalidKeyLength(key.len()))?;
        Ok(Self {
            key,
            pool: shared_pool(),
            _primitives: PhantomData,
        })
    }

    /// Encrypts `plaintext` and returns `ciphertext || tag`.
    pub fn seal(&self, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, AeadError> {
        let mut ciphertext_tag = Vec::with_capacity(plaintext.len() + TAG_SIZE);
        self.seal_append(&mut ciphertext_tag, nonce, plaintext, aad)?;
        Ok(ciphertext_tag)
    }

    /// Encrypts `plaintext` and appends `ciphertext || tag` to `dst`.
    ///
    /// On error `dst` keeps its original length.
    pub fn seal_append(
        &self,
        dst: &mut Vec<u8>,
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<(), AeadError> {
        let dst_len = dst.len();
        let window = slice_for_append(dst, plaintext.len() + TAG_SIZE);
        dst[window.start..window.start + plaintext.len()].copy_from_slice(plaintext);

        self.seal_window(&mut dst[window], nonce, aad)
            .inspect_err(|_| discard_window(dst, dst_len))
    }

    /// Encrypts the plaintext at `buffer[input]` and writes `ciphertext || tag` right after the
    /// first `dst_len` bytes of `buffer`.
    ///
    /// The input either starts at `dst_len` (in-place) or does not overlap the output window at
    /// all. On success `buffer` is `buffer[..dst_len] || ciphertext || tag`, on error
    /// `buffer[..dst_len]`.
    ///
    /// # Panics
    ///
    /// Panics if the input partially overlaps the output window or any range is out of bounds.
    pub fn seal_in_buffer(
        &self,
        buffer: &mut Vec<u8>,
        dst_len: usize,
        input: Range<usize>,
        nonce: &[u8],
        aad: &[u8],
    ) -> Result<(), AeadError> {
        let plaintext_len = input.len();
        let window = place_in_window(buffer, dst_len, input, plaintext_len + TAG_SIZE);

        self.seal_window(&mut buffer[window], nonce, aad)
            .inspect_err(|_| discard_window(buffer, dst_len))
    }

    /// Encrypts `buffer` in place and returns the detached tag.
    pub fn seal_in_place_detached(
        &self,
        nonce: &[u8],
        aad: &[u8],
        buffer: &mut [u8],
    ) -> Result<Tag, AeadError> {
        check_message_len(buffer.len())?;

        let (mac_key, stream) = key_schedule::<S>(&self.key, nonce)?;
        stream.transform(buffer);

        Ok(compute_tag::<M>(&self.pool, &mac_key, aad, buffer))
    }

    /// Decrypts `ciphertext || tag` and returns the plaintext.
    pub fn open(
        &self,
        nonce: &[u8],
        ciphertext_tag: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, AeadError> {
        let mut plaintext = Vec::with_capacity(ciphertext_tag.len().saturating_sub(TAG_SIZE));
        self.open_append(&mut plaintext, nonce, ciphertext_tag, aad)?;
        Ok(plaintext)
    }

    /// Decrypts `ciphertext || tag` and appends the plaintext to `dst`.
    ///
    /// On error the bytes written for this call are zeroed and `dst` keeps its original length.
    pub fn open_append(
        &self,
        dst: &mut Vec<u8>,
        nonce: &[u8],
        ciphertext_tag: &[u8],
        aad: &[u8],
    ) -> Result<(), AeadError> {
        let (ciphertext, tag) = split_tag(ciphertext_tag, aad)?;

        let dst_len = dst.len();
        let window = slice_for_append(dst, ciphertext.len());
        dst[window.clone()].copy_from_slice(ciphertext);

        self.open_in_place_detached(nonce, aad, &mut dst[window], &tag)
            .inspect_err(|_| discard_window(dst, dst_len))
    }

    /// Decrypts `ciphertext || tag` at `buffer[input]` and writes the plaintext right after the
    /// first `dst_len` bytes of `buffer`.
    ///
    /// The ciphertext either starts at `dst_len` (in-place) or does not overlap the output window
    /// at all. On success `buffer` is `buffer[..dst_len] || plaintext`, on error the output window
    /// is zeroed and `buffer` truncated to `buffer[..dst_len]`.
    ///
    /// # Panics
    ///
    /// Panics if the ciphertext partially overlaps the output window or any range is out of
    /// bounds.
    pub fn open_in_buffer(
        &self,
        buffer: &mut Vec<u8>,
        dst_len: usize,
        input: Range<usize>,
        nonce: &[u8],
        aad: &[u8],
    ) -> Result<(), AeadError> {
        check_bounds(buffer, dst_len, &input);

        // The tag is copied out first, an in-place window ends where the tag starts.
        let split = split_tag(&buffer[input.clone()], aad)
            .map(|(ciphertext, tag)| (ciphertext.len(), tag));
        let (ciphertext_len, tag) = match split {
            Ok(split) => split,
            Err(err) => {
                discard_window(buffer, dst_len);
                return Err(err);
            }
        };

        let ciphertext = input.start..input.start + ciphertext_len;
        let window = place_in_window(buffer, dst_len, ciphertext, ciphertext_len);

        self.open_in_place_detached(nonce, aad, &mut buffer[window], &tag)
            .inspect_err(|_| discard_window(buffer, dst_len))
    }

    /// Verifies `tag` and decrypts `buffer` in place.
    ///
    /// Nothing is decrypted unless the tag is valid. If authentication fails every byte of
    /// `buffer` is zero on return.
    pub fn open_in_place_detached(
        &self,
        nonce: &[u8],
        aad: &[u8],
        buffer: &mut [u8],
        tag: &Tag,
    ) -> Result<(), AeadError> {
        check_message_len(buffer.len())?;

        let (mac_key, stream) = key_schedule::<S>(&self.key, nonce)?;

        if !verify_tag::<M>(&self.pool, &mac_key, aad, buffer, tag) {
            buffer.zeroize();
            debug!(
                aad_len = aad.len(),
                ciphertext_len = buffer.len(),
                "reject message, authentication failed"
            );
            return Err(AeadError::Open);
        }

        stream.transform(buffer);
        Ok(())
    }

    /// Seals a window holding the plaintext followed by room for the tag.
    fn seal_window(&self, window: &mut [u8], nonce: &[u8], aad: &[u8]) -> Result<(), AeadError> {
        let (payload, tag_out) = window.split_at_mut(window.len() - TAG_SIZE);
        let tag = self.seal_in_place_detached(nonce, aad, payload)?;
        tag_out.copy_from_slice(&tag);
        Ok(())
    }
}

impl<S, M> Clone for Aead<S, M> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            pool: self.pool.clone(),
            _primitives: PhantomData,
        }
    }
}

impl<S, M> fmt::Debug for Aead<S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not reveal the key when printing debug info.
        f.debug_struct("Aead")
            .field("key", &"***")
            .finish_non_exhaustive()
    }
}

fn check_message_len(len: usize) -> Result<(), AeadError> {
    if len as u64 > MAX_PLAINTEXT_SIZE {
        return Err(AeadError::MessageTooLarge(len));
    }
    Ok(())
}

/// Extracts the authentication tag from the end of a sealed message.
fn split_tag<'a>(ciphertext_tag: &'a [u8], aad: &[u8]) -> Result<(&'a [u8], Tag), AeadError> {
    if ciphertext_tag.len() < TAG_SIZE {
        debug!(
            aad_len = aad.len(),
            len = ciphertext_tag.len(),
            "reject message, shorter than the tag"
        );
        return Err(AeadError::Open);
    }

    let (ciphertext, tag_bytes) = ciphertext_tag.split_at(ciphertext_tag.len() - TAG_SIZE);
    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(tag_bytes);
    Ok((ciphertext, tag))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AeadError {
    #[error("invalid key length, expected 32 bytes but got {0}")]
    InvalidKeyLength(usize),

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error("message of {0} bytes exceeds the maximum size")]
    MessageTooLarge(usize),

    #[error("message authentication failed")]
    Open,
}
