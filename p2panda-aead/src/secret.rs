// SPDX-License-Identifier: MIT OR Apache-2.0

#[cfg(not(test))]
use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fixed-size container for key material.
///
/// Bytes are zeroised on drop, compared in constant time and never printed in debug output. Only
/// this crate can read them back.
#[derive(Clone, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(test, derive(Debug))]
pub struct Secret<const N: usize>([u8; N]);

impl<const N: usize> Secret<N> {
    pub(crate) fn from_bytes(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// Moves the first `N` bytes of `bytes` into a new secret.
    ///
    /// Returns `None` if the slice is not exactly `N` bytes long.
    pub(crate) fn try_from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != N {
            return None;
        }
        let mut secret = Self([0; N]);
        secret.0.copy_from_slice(bytes);
        Some(secret)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> PartialEq for Secret<N> {
    fn eq(&self, other: &Self) -> bool {
        // Constant-time comparison.
        bool::from(self.0[..].ct_eq(&other.0[..]))
    }
}

#[cfg(not(test))]
impl<const N: usize> fmt::Debug for Secret<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret").field("value", &"***").finish()
    }
}

#[cfg(test)]
mod tests {
    use zeroize::Zeroize;

    use super::Secret;

    #[test]
    fn from_slice_requires_exact_length() {
        assert!(Secret::<32>::try_from_slice(&[1; 31]).is_none());
        assert!(Secret::<32>::try_from_slice(&[1; 33]).is_none());

        let secret = Secret::<32>::try_from_slice(&[1; 32]).unwrap();
        assert_eq!(secret.as_bytes(), &[1; 32]);
    }

    #[test]
    fn constant_time_equality() {
        let secret_1 = Secret::from_bytes([7; 32]);
        let secret_2 = Secret::from_bytes([7; 32]);
        let mut bytes = [7; 32];
        bytes[31] = 8;
        let secret_3 = Secret::from_bytes(bytes);

        assert_eq!(secret_1, secret_2);
        assert_ne!(secret_1, secret_3);
    }

    #[test]
    fn zeroize() {
        let mut secret = Secret::from_bytes([42; 16]);
        secret.zeroize();
        assert_eq!(secret.as_bytes(), &[0; 16]);
    }
}
