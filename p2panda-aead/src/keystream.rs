// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-time MAC key derivation and payload transform.
//!
//! Block 0 of the keystream yields the Poly1305 key, the payload is XORed with keystream from
//! block 1 onwards.
use zeroize::Zeroize;

use crate::secret::Secret;
use crate::traits::{KeyStream, StreamError};
use crate::{KEY_SIZE, MAC_KEY_SIZE};

const BLOCK_SIZE: usize = 64;

pub(crate) type MacKey = Secret<MAC_KEY_SIZE>;

/// Keystream positioned at block counter 1, ready to encrypt or decrypt the payload.
pub(crate) struct PayloadStream<S>(S);

impl<S: KeyStream> PayloadStream<S> {
    /// XORs `buffer` with the keystream. Encryption and decryption are the same operation.
    pub(crate) fn transform(mut self, buffer: &mut [u8]) {
        self.0.apply_keystream(buffer);
    }
}

/// Derives the one-time MAC key for `nonce` and returns it with the stream for the payload.
///
/// The whole first block is generated: 32 bytes become the MAC key and 32 bytes are discarded so
/// the payload starts at block counter 1.
pub(crate) fn key_schedule<S: KeyStream>(
    key: &Secret<KEY_SIZE>,
    nonce: &[u8],
) -> Result<(MacKey, PayloadStream<S>), StreamError> {
    let mut stream = S::new(key.as_bytes(), nonce)?;

    let mut block = [0u8; BLOCK_SIZE];
    stream.apply_keystream(&mut block);

    let mut mac_key = [0u8; MAC_KEY_SIZE];
    mac_key.copy_from_slice(&block[..MAC_KEY_SIZE]);
    let mac_key = Secret::from_bytes(mac_key);
    block.zeroize();

    Ok((mac_key, PayloadStream(stream)))
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;

    use crate::secret::Secret;
    use crate::stream::ChaCha20Stream;
    use crate::traits::{KeyStream, StreamError};

    use super::key_schedule;

    thread_local! {
        static CALLS: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
    }

    /// Lengths of all keystream requests since the last [`RecordingStream`] was created on this
    /// thread.
    pub(crate) fn recorded_calls() -> Vec<usize> {
        CALLS.with_borrow(|calls| calls.clone())
    }

    /// Keystream of counting bytes which records the length of every request.
    pub(crate) struct RecordingStream {
        position: u8,
    }

    impl KeyStream for RecordingStream {
        const NONCE_SIZE: usize = 12;

        fn new(_key: &[u8; 32], nonce: &[u8]) -> Result<Self, StreamError> {
            if nonce.len() != Self::NONCE_SIZE {
                return Err(StreamError::InvalidNonceLength {
                    expected: Self::NONCE_SIZE,
                    actual: nonce.len(),
                });
            }
            CALLS.with_borrow_mut(|calls| calls.clear());
            Ok(Self { position: 0 })
        }

        fn apply_keystream(&mut self, buffer: &mut [u8]) {
            CALLS.with_borrow_mut(|calls| calls.push(buffer.len()));
            for byte in buffer {
                *byte ^= self.position;
                self.position = self.position.wrapping_add(1);
            }
        }
    }

    #[test]
    fn consumes_first_block() {
        let key = Secret::from_bytes([0; 32]);
        let (mac_key, stream) = key_schedule::<RecordingStream>(&key, &[0; 12]).unwrap();

        let expected: [u8; 32] = std::array::from_fn(|i| i as u8);
        assert_eq!(mac_key.as_bytes(), &expected);

        // Payload keystream starts right after the first 64-byte block.
        let mut payload = [0u8; 3];
        stream.transform(&mut payload);
        assert_eq!(payload, [64, 65, 66]);

        assert_eq!(recorded_calls(), vec![64, 3]);
    }

    #[test]
    fn matches_chacha20_block_layout() {
        let key_bytes = [0x11; 32];
        let nonce = [0x22; 12];

        let mut reference = [0u8; 64 + 10];
        ChaCha20Stream::new(&key_bytes, &nonce)
            .unwrap()
            .apply_keystream(&mut reference);

        let key = Secret::from_bytes(key_bytes);
        let (mac_key, stream) = key_schedule::<ChaCha20Stream>(&key, &nonce).unwrap();
        assert_eq!(&mac_key.as_bytes()[..], &reference[..32]);

        let mut payload = [0u8; 10];
        stream.transform(&mut payload);
        assert_eq!(&payload[..], &reference[64..]);
    }

    #[test]
    fn transform_is_symmetric() {
        let key = Secret::from_bytes([5; 32]);
        let plaintext = b"Hello, Panda!".to_vec();

        let mut buffer = plaintext.clone();
        let (_, stream) = key_schedule::<ChaCha20Stream>(&key, &[1; 12]).unwrap();
        stream.transform(&mut buffer);
        assert_ne!(buffer, plaintext);

        let (_, stream) = key_schedule::<ChaCha20Stream>(&key, &[1; 12]).unwrap();
        stream.transform(&mut buffer);
        assert_eq!(buffer, plaintext);
    }

    #[test]
    fn invalid_nonce() {
        let key = Secret::from_bytes([0; 32]);
        let result = key_schedule::<ChaCha20Stream>(&key, &[0; 8]);
        assert!(matches!(
            result,
            Err(StreamError::InvalidNonceLength {
                expected: 12,
                actual: 8
            })
        ));
    }
}
