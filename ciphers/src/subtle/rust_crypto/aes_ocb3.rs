//! AES-OCB3 as implemented in [RustCrypto](https://github.com/RustCrypto/AEADs/tree/master/ocb3).

use ocb3::Ocb3;

use cryptaead_cipher_traits::BackendError;

use super::{open_detached, seal_detached};

pub const TAG_LEN: usize = 16;

pub fn seal(
    key: &[u8],
    nonce: &[u8],
    ad: &[u8],
    buffer: &mut [u8],
) -> Result<Vec<u8>, BackendError> {
    select_aes!(key.len(), Aes, {
        select_len!(
            nonce.len(),
            N,
            [12 => U12, 13 => U13, 14 => U14, 15 => U15],
            BackendError::InvalidIvLength,
            { seal_detached::<Ocb3<Aes, N>>(key, nonce, ad, buffer) }
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
            [12 => U12, 13 => U13, 14 => U14, 15 => U15],
            BackendError::InvalidIvLength,
            { open_detached::<Ocb3<Aes, N>>(key, nonce, ad, buffer, tag) }
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_open() {
        let key = [3u8; 24];
        for nonce_len in 12..=15 {
            let nonce = vec![9u8; nonce_len];
            let mut buffer = *b"offset codebook mode, third revision";
            let tag = seal(&key, &nonce, b"header", &mut buffer).unwrap();
            assert_eq!(tag.len(), TAG_LEN);
            assert_ne!(&buffer, b"offset codebook mode, third revision");

            open(&key, &nonce, b"header", &mut buffer, &tag).unwrap();
            assert_eq!(&buffer, b"offset codebook mode, third revision");
        }
    }

    #[test]
    fn wrong_header_fails() {
        let key = [3u8; 16];
        let nonce = [0u8; 12];
        let mut buffer = *b"data";
        let tag = seal(&key, &nonce, b"header", &mut buffer).unwrap();
        assert_eq!(
            open(&key, &nonce, b"other", &mut buffer, &tag),
            Err(BackendError::TagMismatch)
        );
    }
}
