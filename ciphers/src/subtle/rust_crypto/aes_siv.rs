//! AES-SIV (RFC 5297) as implemented in [RustCrypto](https://github.com/RustCrypto/AEADs/tree/master/aes-siv).
//!
//! SIV takes no nonce. Each associated data chunk is a separate S2V header, so callers that
//! want a nonce pass it as the last header.

use aes::Aes192;
use aes_siv::siv::{Aes128Siv, Aes256Siv, CmacSiv};
use chacha20poly1305::aead::KeyInit;

use cryptaead_cipher_traits::BackendError;

pub const TAG_LEN: usize = 16;

/// Binds `$siv` to the SIV instantiation for a key of `$key_len` bytes
macro_rules! select_siv {
    ($key_len:expr, $siv:ident, $body:expr) => {
        match $key_len {
            32 => {
                type $siv = Aes128Siv;
                $body
            }
            48 => {
                type $siv = CmacSiv<Aes192>;
                $body
            }
            64 => {
                type $siv = Aes256Siv;
                $body
            }
            other => Err(BackendError::InvalidKeyLength(other)),
        }
    };
}

pub fn seal(key: &[u8], headers: &[Vec<u8>], buffer: &mut [u8]) -> Result<Vec<u8>, BackendError> {
    select_siv!(key.len(), Siv, {
        let mut cipher =
            Siv::new_from_slice(key).map_err(|_| BackendError::InvalidKeyLength(key.len()))?;
        let tag = cipher
            .encrypt_in_place_detached(headers, buffer)
            .map_err(|_| BackendError::Internal)?;
        Ok(tag.to_vec())
    })
}

pub fn open(
    key: &[u8],
    headers: &[Vec<u8>],
    buffer: &mut [u8],
    tag: &[u8],
) -> Result<(), BackendError> {
    if tag.len() != TAG_LEN {
        return Err(BackendError::InvalidTagLength(tag.len()));
    }
    select_siv!(key.len(), Siv, {
        let mut cipher =
            Siv::new_from_slice(key).map_err(|_| BackendError::InvalidKeyLength(key.len()))?;
        cipher
            .decrypt_in_place_detached(headers, buffer, aes_siv::Tag::from_slice(tag))
            .map_err(|_| BackendError::TagMismatch)
    })
}
