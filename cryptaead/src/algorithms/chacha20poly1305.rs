use zeroize::Zeroizing;

use cryptaead_cipher_traits::{aead_chacha20poly1305, AeadAlgorithm, AeadError, Backend, CipherSpec};

use crate::dispatch;

const ALGORITHM: AeadAlgorithm = AeadAlgorithm::ChaCha20Poly1305;

/// ChaCha20-Poly1305 (RFC 8439): 32 byte keys, 12 byte nonces, 16 byte tags
pub struct ChaCha20Poly1305<'b, B: Backend> {
    backend: &'b B,
    cipher: CipherSpec,
}

impl<'b, B: Backend> ChaCha20Poly1305<'b, B> {
    pub fn new(backend: &'b B, key: &[u8]) -> Result<Self, AeadError> {
        let cipher = super::bind(backend, ALGORITHM, key, None)?;
        Ok(Self { backend, cipher })
    }

    pub fn generate_key() -> Zeroizing<Vec<u8>> {
        let mut key = Zeroizing::new(vec![0u8; aead_chacha20poly1305::KEY_LEN]);
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut key);
        key
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
            aead_chacha20poly1305::TAG_LEN,
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
            aead_chacha20poly1305::TAG_LEN,
            None,
        )
    }

    fn check_params(&self, nonce: &[u8], data: &[u8], ad: &[&[u8]]) -> Result<(), AeadError> {
        super::check_input_lens(data, ad)?;
        super::check_nonce_len(
            ALGORITHM,
            nonce,
            aead_chacha20poly1305::NONCE_LEN..=aead_chacha20poly1305::NONCE_LEN,
        )
    }
}
