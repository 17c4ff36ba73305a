//! Implementations backed by RustCrypto
//!
//! Each module exposes a `seal` and an `open` function working in place on a buffer with a
//! detached tag. The RustCrypto types are generic over key, nonce and tag sizes, so the runtime
//! lengths are mapped onto concrete instantiations here.

use chacha20poly1305::aead::generic_array::typenum::Unsigned;
use chacha20poly1305::aead::{AeadCore, AeadInPlace, KeyInit, Nonce, Tag};

use cryptaead_cipher_traits::BackendError;

/// Binds `$aes` to the AES block cipher matching a key of `$key_len` bytes, then evaluates
/// `$body`.
macro_rules! select_aes {
    ($key_len:expr, $aes:ident, $body:expr) => {
        match $key_len {
            16 => {
                type $aes = ::aes::Aes128;
                $body
            }
            24 => {
                type $aes = ::aes::Aes192;
                $body
            }
            32 => {
                type $aes = ::aes::Aes256;
                $body
            }
            other => Err(::cryptaead_cipher_traits::BackendError::InvalidKeyLength(other)),
        }
    };
}

/// Binds `$alias` to the typenum constant listed for `$len`, then evaluates `$body`. Lengths
/// that are not listed yield `Err($err(len))`.
macro_rules! select_len {
    ($len:expr, $alias:ident, [$($n:literal => $ty:ident),+ $(,)?], $err:path, $body:expr) => {
        match $len {
            $(
                $n => {
                    type $alias = ::chacha20poly1305::aead::consts::$ty;
                    $body
                }
            )+
            other => Err($err(other)),
        }
    };
}

pub mod aes_ccm;
pub mod aes_gcm;
pub mod aes_ocb3;
pub mod aes_siv;
pub mod chacha20poly1305_ietf;

/// Encrypts `buffer` in place and returns the full tag
fn seal_detached<A>(
    key: &[u8],
    nonce: &[u8],
    ad: &[u8],
    buffer: &mut [u8],
) -> Result<Vec<u8>, BackendError>
where
    A: AeadInPlace + KeyInit,
{
    if nonce.len() != <<A as AeadCore>::NonceSize as Unsigned>::USIZE {
        return Err(BackendError::InvalidIvLength(nonce.len()));
    }

    // Only fails on a wrong key length
    let cipher = A::new_from_slice(key).map_err(|_| BackendError::InvalidKeyLength(key.len()))?;

    let tag = cipher
        .encrypt_in_place_detached(Nonce::<A>::from_slice(nonce), ad, buffer)
        .map_err(|_| BackendError::Internal)?;
    Ok(tag.to_vec())
}

/// Decrypts `buffer` in place after verifying `tag`. On failure the buffer content is
/// unspecified.
fn open_detached<A>(
    key: &[u8],
    nonce: &[u8],
    ad: &[u8],
    buffer: &mut [u8],
    tag: &[u8],
) -> Result<(), BackendError>
where
    A: AeadInPlace + KeyInit,
{
    if nonce.len() != <<A as AeadCore>::NonceSize as Unsigned>::USIZE {
        return Err(BackendError::InvalidIvLength(nonce.len()));
    }
    if tag.len() != <<A as AeadCore>::TagSize as Unsigned>::USIZE {
        return Err(BackendError::InvalidTagLength(tag.len()));
    }

    let cipher = A::new_from_slice(key).map_err(|_| BackendError::InvalidKeyLength(key.len()))?;

    cipher
        .decrypt_in_place_detached(
            Nonce::<A>::from_slice(nonce),
            ad,
            buffer,
            Tag::<A>::from_slice(tag),
        )
        .map_err(|_| BackendError::TagMismatch)
}
