use zeroize::Zeroizing;

use cryptaead_cipher_traits::{aead_aes_ccm, AeadAlgorithm, AeadError, Backend, CipherSpec};

use crate::dispatch;

const ALGORITHM: AeadAlgorithm = AeadAlgorithm::AesCcm;

/// AES in Counter with CBC-MAC mode (RFC 3610).
///
/// The tag length is fixed per instance. A nonce of `n` bytes leaves `15 - n` bytes to encode
/// the message length, so short nonces allow long messages and vice versa.
pub struct AesCcm<'b, B: Backend> {
    backend: &'b B,
    cipher: CipherSpec,
}

impl<'b, B: Backend> AesCcm<'b, B> {
    /// An instance producing 16 byte tags
    pub fn new(backend: &'b B, key: &[u8]) -> Result<Self, AeadError> {
        Self::with_tag_length(backend, key, aead_aes_ccm::DEFAULT_TAG_LEN)
    }

    /// `tag_len` must be one of 4, 6, 8, 10, 12, 14 or 16
    pub fn with_tag_length(backend: &'b B, key: &[u8], tag_len: usize) -> Result<Self, AeadError> {
        if !aead_aes_ccm::TAG_LENS.contains(&tag_len) {
            return Err(AeadError::InvalidArgument(format!(
                "{ALGORITHM} tag length must be one of {:?}, got {tag_len}",
                aead_aes_ccm::TAG_LENS
            )));
        }
        let cipher = super::bind(backend, ALGORITHM, key, Some(tag_len))?;
        Ok(Self { backend, cipher })
    }

    pub fn generate_key(bits: usize) -> Result<Zeroizing<Vec<u8>>, AeadError> {
        super::generate_key(ALGORITHM, bits)
    }

    pub fn tag_len(&self) -> usize {
        self.cipher.tag_len()
    }

    pub fn encrypt(
        &self,
        nonce: &[u8],
        data: &[u8],
        ad: Option<&[u8]>,
    ) -> Result<Vec<u8>, AeadError> {
        let ad = ad.as_slice();
        self.check_params(nonce, data.len())?;
        super::check_input_lens(data, ad)?;
        dispatch::encrypt(
            self.backend,
            &self.cipher,
            nonce,
            data,
            ad,
            self.tag_len(),
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
        self.check_params(nonce, data.len().saturating_sub(self.tag_len()))?;
        super::check_input_lens(data, ad)?;
        dispatch::decrypt(
            self.backend,
            &self.cipher,
            nonce,
            data,
            ad,
            self.tag_len(),
            None,
        )
    }

    fn check_params(&self, nonce: &[u8], msg_len: usize) -> Result<(), AeadError> {
        super::check_nonce_len(
            ALGORITHM,
            nonce,
            aead_aes_ccm::MIN_NONCE_LEN..=aead_aes_ccm::MAX_NONCE_LEN,
        )?;

        // bytes left for the length field
        let len_field = 15 - nonce.len();
        if len_field < 8 && (msg_len as u64) >> (8 * len_field) != 0 {
            return Err(AeadError::InvalidArgument(format!(
                "{msg_len} bytes of data do not fit a {} byte nonce",
                nonce.len()
            )));
        }
        Ok(())
    }
}
