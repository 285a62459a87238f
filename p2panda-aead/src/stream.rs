// SPDX-License-Identifier: MIT OR Apache-2.0

//! ChaCha20 keystreams with the 96-bit IETF nonce and the extended 192-bit XChaCha20 nonce.
//!
//! <https://www.rfc-editor.org/rfc/rfc8439>
//! <https://datatracker.ietf.org/doc/html/draft-irtf-cfrg-xchacha>
use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::{ChaCha20, XChaCha20};

use crate::traits::{KeyStream, StreamError};
use crate::{KEY_SIZE, NONCE_SIZE, X_NONCE_SIZE};

/// ChaCha20 with a 32-bit block counter and 96-bit nonce.
pub struct ChaCha20Stream(ChaCha20);

impl KeyStream for ChaCha20Stream {
    const NONCE_SIZE: usize = NONCE_SIZE;

    fn new(key: &[u8; KEY_SIZE], nonce: &[u8]) -> Result<Self, StreamError> {
        let cipher = ChaCha20::new_from_slices(key, nonce).map_err(|_| {
            StreamError::InvalidNonceLength {
                expected: Self::NONCE_SIZE,
                actual: nonce.len(),
            }
        })?;
        Ok(Self(cipher))
    }

    fn apply_keystream(&mut self, buffer: &mut [u8]) {
        self.0.apply_keystream(buffer);
    }
}

/// XChaCha20: HChaCha20 derives a subkey from the first 128 bits of the nonce, the remaining 64
/// bits continue as a regular ChaCha20 nonce.
pub struct XChaCha20Stream(XChaCha20);

impl KeyStream for XChaCha20Stream {
    const NONCE_SIZE: usize = X_NONCE_SIZE;

    fn new(key: &[u8; KEY_SIZE], nonce: &[u8]) -> Result<Self, StreamError> {
        let cipher = XChaCha20::new_from_slices(key, nonce).map_err(|_| {
            StreamError::InvalidNonceLength {
                expected: Self::NONCE_SIZE,
                actual: nonce.len(),
            }
        })?;
        Ok(Self(cipher))
    }

    fn apply_keystream(&mut self, buffer: &mut [u8]) {
        self.0.apply_keystream(buffer);
    }
}

#[cfg(test)]
mod tests {
    use crate::traits::{KeyStream, StreamError};

    use super::{ChaCha20Stream, XChaCha20Stream};

    #[test]
    fn rfc8439_block_counter_zero() {
        // RFC 8439, Section 2.6.2 (Poly1305 key generation uses block 0).
        let key: [u8; 32] = std::array::from_fn(|i| 0x80 + i as u8);
        let nonce = hex::decode("000000000001020304050607").unwrap();

        let mut stream = ChaCha20Stream::new(&key, &nonce).unwrap();
        let mut block = [0u8; 32];
        stream.apply_keystream(&mut block);

        assert_eq!(
            hex::encode(block),
            "8ad5a08b905f81cc815040274ab29471a833b637e3fd0da508dbb8e2fdd1a646"
        );
    }

    #[test]
    fn keystream_continues_across_calls() {
        let key = [3; 32];
        let nonce = [9; 12];

        let mut whole = [0u8; 150];
        ChaCha20Stream::new(&key, &nonce)
            .unwrap()
            .apply_keystream(&mut whole);

        let mut split = [0u8; 150];
        let mut stream = ChaCha20Stream::new(&key, &nonce).unwrap();
        stream.apply_keystream(&mut split[..64]);
        stream.apply_keystream(&mut split[64..100]);
        stream.apply_keystream(&mut split[100..]);

        assert_eq!(whole, split);
    }

    #[test]
    fn invalid_nonce_length() {
        let result = ChaCha20Stream::new(&[0; 32], &[0; 24]);
        assert!(matches!(
            result,
            Err(StreamError::InvalidNonceLength {
                expected: 12,
                actual: 24
            })
        ));

        let result = XChaCha20Stream::new(&[0; 32], &[0; 12]);
        assert!(matches!(
            result,
            Err(StreamError::InvalidNonceLength {
                expected: 24,
                actual: 12
            })
        ));
    }
}
