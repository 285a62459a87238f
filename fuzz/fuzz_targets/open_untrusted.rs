// SPDX-License-Identifier: MIT OR Apache-2.0

#![no_main]

use libfuzzer_sys::fuzz_target;
use p2panda_aead::XChaCha20Poly1305;

// Opening arbitrary bytes must never panic and never return plaintext for forged messages.
fuzz_target!(|input: ([u8; 24], Vec<u8>, Vec<u8>)| {
    let (nonce, ciphertext_tag, aad) = input;
    let cipher = XChaCha20Poly1305::new([7; 32]);

    let mut dst = b"prefix".to_vec();
    if cipher
        .open_append(&mut dst, &nonce, &ciphertext_tag, &aad)
        .is_err()
    {
        assert_eq!(dst, b"prefix");
    }
});
