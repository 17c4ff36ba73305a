use zeroize::Zeroizing;

use cryptaead_cipher_traits::{aead_aes_siv, AeadAlgorithm, AeadError, Backend, CipherSpec};

use crate::dispatch;

const ALGORITHM: AeadAlgorithm = AeadAlgorithm::AesSiv;

/// AES-SIV (RFC 5297), a nonce misuse resistant AEAD.
///
/// There is no separate nonce. Each associated data chunk is authenticated as its own header;
/// to use a nonce, pass it as the last chunk. The output is `tag || ciphertext`.
pub struct AesSiv<'b, B: Backend> {
    backend: &'b B,
    cipher: CipherSpec,
}

impl<'b, B: Backend> AesSiv<'b, B> {
    /// `key` must be 32, 48 or 64 bytes: two AES keys of equal size
    pub fn new(backend: &'b B, key: &[u8]) -> Result<Self, AeadError> {
        let cipher = super::bind(backend, ALGORITHM, key, None)?;
        Ok(Self { backend, cipher })
    }

    /// A fresh key of 256, 384 or 512 bits
    pub fn generate_key(bits: usize) -> Result<Zeroizing<Vec<u8>>, AeadError> {
        super::generate_key(ALGORITHM, bits)
    }

    pub fn encrypt(&self, data: &[u8], ad: Option<&[&[u8]]>) -> Result<Vec<u8>, AeadError> {
        let ad = ad.unwrap_or_default();
        if data.is_empty() {
            return Err(AeadError::InvalidArgument(
                "data must not be zero length".to_owned(),
            ));
        }
        check_params(data, ad)?;
        dispatch::encrypt(
            self.backend,
            &self.cipher,
            &[],
            data,
            ad,
            aead_aes_siv::TAG_LEN,
            None,
        )
    }

    pub fn decrypt(&self, data: &[u8], ad: Option<&[&[u8]]>) -> Result<Vec<u8>, AeadError> {
        let ad = ad.unwrap_or_default();
        check_params(data, ad)?;
        dispatch::decrypt(
            self.backend,
            &self.cipher,
            &[],
            data,
            ad,
            aead_aes_siv::TAG_LEN,
            None,
        )
    }
}

fn check_params(data: &[u8], ad: &[&[u8]]) -> Result<(), AeadError> {
    super::check_input_lens(data, ad)?;
    if ad.len() > aead_aes_siv::MAX_AD_CHUNKS {
        return Err(AeadError::InvalidArgument(format!(
            "at most {} associated data chunks, got {}",
            aead_aes_siv::MAX_AD_CHUNKS,
            ad.len()
        )));
    }
    Ok(())
}
