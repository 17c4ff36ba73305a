use zeroize::Zeroizing;

use cryptaead_cipher_traits::{aead_aes_gcm, AeadAlgorithm, AeadError, Backend, CipherSpec};

use crate::dispatch;

const ALGORITHM: AeadAlgorithm = AeadAlgorithm::AesGcm;

/// AES in Galois/Counter Mode with 16 byte tags
pub struct AesGcm<'b, B: Backend> {
    backend: &'b B,
    cipher: CipherSpec,
}

impl<'b, B: Backend> AesGcm<'b, B> {
    /// `key` must be 16, 24 or 32 bytes
    pub fn new(backend: &'b B, key: &[u8]) -> Result<Self, AeadError> {
        let cipher = super::bind(backend, ALGORITHM, key, None)?;
        Ok(Self { backend, cipher })
    }

    /// A fresh key of 128, 192 or 256 bits
    pub fn generate_key(bits: usize) -> Result<Zeroizing<Vec<u8>>, AeadError> {
        super::generate_key(ALGORITHM, bits)
    }

    /// The nonce may be 8 to 128 bytes long; 12 bytes is what GCM is designed for.
    pub fn encrypt(
        &self,
        nonce: &[u8],
        data: &[u8],
        ad: Option<&[u8]>,
    ) -> Result<Vec<u8>, AeadError> {
        let ad = ad.as_slice();
        self.check_params(nonce, data, ad)?;
        dispatch::encrypt(
            self.backend,
            &self.cipher,
            nonce,
            data,
            ad,
            aead_aes_gcm::TAG_LEN,
            None,
        )
    }

    pub fn decrypt(
        &self,
        nonce: &[u8],
        data: &[u8],
        ad: Option<&[u8]>,
    ) -> Result<Vec<u8>, AeadError> {
        let ad = ad.as_slice();
        self.check_params(nonce, data, ad)?;
        dispatch::decrypt(
            self.backend,
            &self.cipher,
            nonce,
            data,
            ad,
            aead_aes_gcm::TAG_LEN,
            None,
        )
    }

    fn check_params(&self, nonce: &[u8], data: &[u8], ad: &[&[u8]]) -> Result<(), AeadError> {
        super::check_input_lens(data, ad)?;
        super::check_nonce_len(
            ALGORITHM,
            nonce,
            aead_aes_gcm::MIN_NONCE_LEN..=aead_aes_gcm::MAX_NONCE_LEN,
        )
    }
}
