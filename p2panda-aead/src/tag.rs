// SPDX-License-Identifier: MIT OR Apache-2.0

//! Computing and verifying the authentication tag over additional data and ciphertext.
use crate::Tag;
use crate::keystream::MacKey;
use crate::mac_input::build_mac_input;
use crate::pool::MacInputPool;
use crate::traits::OneTimeMac;

/// Computes the tag over `aad` and `ciphertext` under the one-time MAC key.
pub(crate) fn compute_tag<M: OneTimeMac>(
    pool: &MacInputPool,
    mac_key: &MacKey,
    aad: &[u8],
    ciphertext: &[u8],
) -> Tag {
    let mac_input = build_mac_input(pool, aad, ciphertext);
    M::compute_tag(&mac_input, mac_key.as_bytes())
}

/// Checks the claimed tag for `aad` and `ciphertext` in constant time.
pub(crate) fn verify_tag<M: OneTimeMac>(
    pool: &MacInputPool,
    mac_key: &MacKey,
    aad: &[u8],
    ciphertext: &[u8],
    tag: &Tag,
) -> bool {
    let mac_input = build_mac_input(pool, aad, ciphertext);
    M::verify_tag(tag, &mac_input, mac_key.as_bytes())
}
