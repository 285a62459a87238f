// SPDX-License-Identifier: MIT OR Apache-2.0

#![no_main]

use libfuzzer_sys::fuzz_target;
use p2panda_aead::ChaCha20Poly1305;

// Seal arbitrary messages into a buffer with a prefix, open them again in place and make sure a
// flipped bit is always detected.
fuzz_target!(|input: (u8, [u8; 12], Vec<u8>, Vec<u8>, Vec<u8>, usize)| {
    let (key_byte, nonce, prefix, plaintext, aad, bit) = input;
    let cipher = ChaCha20Poly1305::new([key_byte; 32]);

    let mut buffer = prefix.clone();
    buffer.extend_from_slice(&plaintext);
    let input = prefix.len()..buffer.len();
    cipher
        .seal_in_buffer(&mut buffer, prefix.len(), input, &nonce, &aad)
        .expect("sealing");
    assert_eq!(buffer.len(), prefix.len() + plaintext.len() + 16);

    let mut tampered = buffer[prefix.len()..].to_vec();
    let index = bit / 8 % tampered.len();
    tampered[index] ^= 1 << (bit % 8);
    assert!(cipher.open(&nonce, &tampered, &aad).is_err());

    let input = prefix.len()..buffer.len();
    cipher
        .open_in_buffer(&mut buffer, prefix.len(), input, &nonce, &aad)
        .expect("opening");
    assert_eq!(&buffer[..prefix.len()], &prefix[..]);
    assert_eq!(&buffer[prefix.len()..], &plaintext[..]);
});
