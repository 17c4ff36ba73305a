use zeroize::Zeroizing;

use cryptaead_cipher_traits::{aead_aes_ocb3, AeadAlgorithm, AeadError, Backend, CipherSpec};

use crate::dispatch;

const ALGORITHM: AeadAlgorithm = AeadAlgorithm::AesOcb3;

/// AES-OCB3 (RFC 7253) with 16 byte tags and 12 to 15 byte nonces
pub struct AesOcb3<'b, B: Backend> {
    backend: &'b B,
    cipher: CipherSpec,
}

impl<'b, B: Backend> AesOcb3<'b, B> {
    pub fn new(backend: &'b B, key: &[u8]) -> Result<Self, AeadError> {
        let cipher = super::bind(backend, ALGORITHM, key, None)?;
        Ok(Self { backend, cipher })
    }

    pub fn generate_key(bits: usize) -> Result<Zeroizing<Vec<u8>>, AeadError> {
        super::generate_key(ALGORITHM, bits)
    }

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
            aead_aes_ocb3::TAG_LEN,
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
            aead_aes_ocb3::TAG_LEN,
            None,
        )
    }

    fn check_params(&self, nonce: &[u8], data: &[u8], ad: &[&[u8]]) -> Result<(), AeadError> {
        super::check_input_lens(data, ad)?;
        super::check_nonce_len(
            ALGORITHM,
            nonce,
            aead_aes_ocb3::MIN_NONCE_LEN..=aead_aes_ocb3::MAX_NONCE_LEN,
        )
    }
}
