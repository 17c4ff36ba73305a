//! AES-CCM as implemented in [RustCrypto](https://github.com/RustCrypto/AEADs/tree/master/ccm).
//!
//! The tag length is a parameter of the mode; it has to be known before sealing.

use ccm::Ccm;

use cryptaead_cipher_traits::BackendError;

use super::{open_detached, seal_detached};

pub fn seal(
    key: &[u8],
    nonce: &[u8],
    tag_len: usize,
    ad: &[u8],
    buffer: &mut [u8],
) -> Result<Vec<u8>, BackendError> {
    select_aes!(key.len(), Aes, {
        select_len!(
            nonce.len(),
            N,
            [7 => U7, 8 => U8, 9 => U9, 10 => U10, 11 => U11, 12 => U12, 13 => U13],
            BackendError::InvalidIvLength,
            {
                select_len!(
                    tag_len,
                    M,
                    [4 => U4, 6 => U6, 8 => U8, 10 => U10, 12 => U12, 14 => U14, 16 => U16],
                    BackendError::InvalidTagLength,
                    { seal_detached::<Ccm<Aes, M, N>>(key, nonce, ad, buffer) }
                )
            }
        )
    })
}

pub fn open(
    key: &[u8],
    nonce: &[u8],
    ad: &[u8],
    buffer: &mut [u8],
    tag: &[u8],
) -> Result<(), BackendError> {
    select_aes!(key.len(), Aes, {
        select_len!(
            nonce.len(),
            N,
            [7 => U7, 8 => U8, 9 => U9, 10 => U10, 11 => U11, 12 => U12, 13 => U13],
            BackendError::InvalidIvLength,
            {
                select_len!(
                    tag.len(),
                    M,
                    [4 => U4, 6 => U6, 8 => U8, 10 => U10, 12 => U12, 14 => U14, 16 => U16],
                    BackendError::InvalidTagLength,
                    { open_detached::<Ccm<Aes, M, N>>(key, nonce, ad, buffer, tag) }
                )
            }
        )
    })
}
