// SPDX-License-Identifier: MIT OR Apache-2.0

//! Poly1305 one-time authenticator.
//!
//! <https://www.rfc-editor.org/rfc/rfc8439#section-2.5>
use poly1305::universal_hash::KeyInit;
use poly1305::{Key, Poly1305};

use crate::traits::OneTimeMac;
use crate::{MAC_KEY_SIZE, TAG_SIZE, Tag};

pub struct Poly1305Mac;

impl OneTimeMac for Poly1305Mac {
    fn compute_tag(input: &[u8], key: &[u8; MAC_KEY_SIZE]) -> Tag {
        let mac = Poly1305::new(Key::from_slice(key));
        let mut tag = [0u8; TAG_SIZE];
        tag.copy_from_slice(&mac.compute_unpadded(input));
        tag
    }
}

#[cfg(test)]
mod tests {
    use crate::traits::OneTimeMac;

    use super::Poly1305Mac;

    // RFC 8439, Section 2.5.2.
    const KEY: &str = "85d6be7857556d337f4452fe42d506a80103808afb0db2fd4abff6af4149f51b";
    const MESSAGE: &[u8] = b"Cryptographic Forum Research Group";
    const TAG: &str = "a8061dc1305136c6c22b8baf0c0127a9";

    fn key() -> [u8; 32] {
        hex::decode(KEY).unwrap().try_into().unwrap()
    }

    fn tag() -> [u8; 16] {
        hex::decode(TAG).unwrap().try_into().unwrap()
    }

    #[test]
    fn rfc8439_tag() {
        assert_eq!(Poly1305Mac::compute_tag(MESSAGE, &key()), tag());
    }

    #[test]
    fn verify() {
        assert!(Poly1305Mac::verify_tag(&tag(), MESSAGE, &key()));

        for i in 0..16 {
            let mut invalid_tag = tag();
            invalid_tag[i] ^= 0x80;
            assert!(!Poly1305Mac::verify_tag(&invalid_tag, MESSAGE, &key()));
        }

        assert!(!Poly1305Mac::verify_tag(&tag(), b"Cryptographic Forum Research Grouq", &key()));
    }
}
