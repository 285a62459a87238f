// SPDX-License-Identifier: MIT OR Apache-2.0

//! Byte layout authenticated by Poly1305 in the ChaCha20-Poly1305 construction:
//!
//! ```text
//! aad || zero padding to 16 || ciphertext || zero padding to 16 || len(aad) as u64 LE || len(ciphertext) as u64 LE
//! ```
use crate::pool::{MacInputPool, PooledBuffer};

/// Size of both length fields at the end of the MAC input.
const LENGTHS_SIZE: usize = 16;

/// Rounds `n` up to the next multiple of 16.
pub(crate) fn round_to_16(n: usize) -> usize {
    n.div_ceil(16) * 16
}

/// Total length of the MAC input for the given additional data and payload lengths.
pub(crate) fn mac_input_len(aad_len: usize, payload_len: usize) -> usize {
    round_to_16(aad_len) + round_to_16(payload_len) + LENGTHS_SIZE
}

/// Writes the MAC input for `aad` and `payload` into `buffer`.
///
/// `buffer` must be exactly [`mac_input_len`] bytes long.
pub(crate) fn write_mac_input(buffer: &mut [u8], aad: &[u8], payload: &[u8]) {
    debug_assert_eq!(buffer.len(), mac_input_len(aad.len(), payload.len()));

    let payload_offset = round_to_16(aad.len());
    let lengths_offset = payload_offset + round_to_16(payload.len());

    buffer[..aad.len()].copy_from_slice(aad);
    buffer[aad.len()..payload_offset].fill(0);
    buffer[payload_offset..payload_offset + payload.len()].copy_from_slice(payload);
    buffer[payload_offset + payload.len()..lengths_offset].fill(0);

    let (aad_len, payload_len) = buffer[lengths_offset..].split_at_mut(8);
    aad_len.copy_from_slice(&(aad.len() as u64).to_le_bytes());
    payload_len.copy_from_slice(&(payload.len() as u64).to_le_bytes());
}

/// Checks out a buffer from `pool` and fills it with the MAC input.
pub(crate) fn build_mac_input<'a>(
    pool: &'a MacInputPool,
    aad: &[u8],
    payload: &[u8],
) -> PooledBuffer<'a> {
    let mut buffer = pool.checkout(mac_input_len(aad.len(), payload.len()));
    write_mac_input(&mut buffer, aad, payload);
    buffer
}
