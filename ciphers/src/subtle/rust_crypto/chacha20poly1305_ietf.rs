//! ChaCha20-Poly1305 as implemented in [RustCrypto](https://github.com/RustCrypto/AEADs/tree/master/chacha20poly1305).
//!
//! Used by the generic cipher context; the one-shot interface uses libcrux instead.

use chacha20poly1305::aead::generic_array::typenum::Unsigned;
use chacha20poly1305::ChaCha20Poly1305 as AeadImpl;
use chacha20poly1305::{AeadCore, KeySizeUser};

use cryptaead_cipher_traits::BackendError;

use super::{open_detached, seal_detached};

/// The key length is 32 bytes or 256 bits.
pub const KEY_LEN: usize = <<AeadImpl as KeySizeUser>::KeySize as Unsigned>::USIZE;
/// The MAC tag length is 16 bytes or 128 bits.
pub const TAG_LEN: usize = <<AeadImpl as AeadCore>::TagSize as Unsigned>::USIZE;
/// The nonce length is 12 bytes or 96 bits.
pub const NONCE_LEN: usize = <<AeadImpl as AeadCore>::NonceSize as Unsigned>::USIZE;

#[inline]
pub fn seal(
    key: &[u8],
    nonce: &[u8],
    ad: &[u8],
    buffer: &mut [u8],
) -> Result<Vec<u8>, BackendError> {
    seal_detached::<AeadImpl>(key, nonce, ad, buffer)
}

#[inline]
pub fn open(
    key: &[u8],
    nonce: &[u8],
    ad: &[u8],
    buffer: &mut [u8],
    tag: &[u8],
) -> Result<(), BackendError> {
    open_detached::<AeadImpl>(key, nonce, ad, buffer, tag)
}

/// Output of sealing the test message below under an all-zero key and nonce
#[cfg(test)]
pub(crate) const KNOWN_CIPHERTEXT: [u8; 59] = [
    239, 104, 148, 202, 120, 32, 77, 27, 246, 206, 226, 17, 83, 78, 122, 116, 187, 123, 70,
    199, 58, 130, 21, 1, 107, 230, 58, 77, 18, 152, 31, 159, 80, 151, 72, 27, 236, 137, 60, 55,
    180, 31, 71, 97, 199, 12, 60, 155, 70, 221, 225, 110, 132, 191, 8, 114, 85, 4, 25,
];
