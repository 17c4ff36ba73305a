//! A multi-call cipher context in the style of a native library, driven on top of the one-shot
//! RustCrypto AEADs.
//!
//! The context accepts one message at a time: select a cipher, negotiate lengths, install key
//! and IV, declare the message length (CCM), feed associated data, process the message data in
//! a single update, then finalize. Calls made out of this order are refused the way a native
//! library refuses them; in particular a CCM tag length can not change once key and IV are
//! installed. Negotiating an IV length drops the installed IV and abandons the message in
//! progress, so a context stays usable after any failed call.
//!
//! CCM and SIV verify the tag during the data update, every other mode at finalization. A
//! failed verification never releases plaintext: the output buffer is zeroed.

use std::fmt;

use zeroize::Zeroizing;

use cryptaead_cipher_traits::{aead_aes_ccm, AeadAlgorithm, BackendError, Ctrl, Operation, Update};

use crate::subtle::rust_crypto::{aes_ccm, aes_gcm, aes_ocb3, aes_siv, chacha20poly1305_ietf};

/// CCM tag length a context falls back to when key and IV arrive before a tag length
pub const CCM_DEFAULT_TAG_LEN: usize = 12;

/// CCM nonce length selected with the cipher (L = 8)
pub const CCM_DEFAULT_IV_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// No message in progress
    Idle,
    /// Key and IV are installed; accepting a length declaration and associated data
    Ready,
    /// Message data went through; waiting for finalization
    Processed,
    /// Finalized; the tag of an encryption can be read
    Finished,
}

pub struct SoftCipherCtx {
    cipher: Option<(AeadAlgorithm, usize)>,
    operation: Operation,
    key: Option<Zeroizing<Vec<u8>>>,
    iv_len: usize,
    iv: Option<Vec<u8>>,
    tag_len: Option<usize>,
    expected_tag: Option<Vec<u8>>,
    declared_len: Option<usize>,
    headers: Vec<Vec<u8>>,
    computed_tag: Option<Vec<u8>>,
    verified: bool,
    stage: Stage,
}

impl Default for SoftCipherCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftCipherCtx {
    pub fn new() -> Self {
        Self {
            cipher: None,
            operation: Operation::Decrypt,
            key: None,
            iv_len: 0,
            iv: None,
            tag_len: None,
            expected_tag: None,
            declared_len: None,
            headers: Vec::new(),
            computed_tag: None,
            verified: true,
            stage: Stage::Idle,
        }
    }

    /// The selected algorithm and its key length
    pub fn cipher(&self) -> Option<(AeadAlgorithm, usize)> {
        self.cipher
    }

    /// Selects a cipher, discarding everything installed before
    pub fn select(&mut self, algorithm: AeadAlgorithm, key_len: usize) {
        *self = Self {
            cipher: Some((algorithm, key_len)),
            iv_len: default_iv_len(algorithm),
            ..Self::new()
        };
    }

    /// Sets the direction and installs key and/or IV. Installing either starts a new message.
    pub fn init(
        &mut self,
        key: Option<&[u8]>,
        iv: Option<&[u8]>,
        operation: Operation,
    ) -> Result<(), BackendError> {
        let (algorithm, key_len) = self.cipher.ok_or(BackendError::NoCipherSet)?;

        if let Some(key) = key {
            if key.len() != key_len {
                return Err(BackendError::InvalidKeyLength(key.len()));
            }
        }
        if let Some(iv) = iv {
            if iv.len() != self.iv_len {
                return Err(BackendError::InvalidIvLength(iv.len()));
            }
        }

        self.operation = operation;
        if let Some(key) = key {
            self.key = Some(Zeroizing::new(key.to_vec()));
        }
        if let Some(iv) = iv {
            self.iv = Some(iv.to_vec());
            // CCM sizes its state from the tag length when the IV goes in
            if algorithm == AeadAlgorithm::AesCcm && self.tag_len.is_none() {
                self.tag_len = Some(CCM_DEFAULT_TAG_LEN);
            }
        }

        if key.is_some() || iv.is_some() {
            self.start_message();
        }
        Ok(())
    }

    fn start_message(&mut self) {
        self.headers.clear();
        self.declared_len = None;
        self.computed_tag = None;
        self.verified = true;
        self.stage = match (&self.key, &self.iv) {
            (Some(_), Some(_)) => Stage::Ready,
            _ => Stage::Idle,
        };
    }

    pub fn ctrl(&mut self, ctrl: Ctrl<'_>) -> Result<(), BackendError> {
        let (algorithm, _) = self.cipher.ok_or(BackendError::NoCipherSet)?;

        match ctrl {
            Ctrl::SetIvLen(len) => {
                if !iv_len_supported(algorithm, len) {
                    return Err(BackendError::InvalidIvLength(len));
                }
                // abandons any message in progress
                self.iv_len = len;
                self.iv = None;
                self.start_message();
                Ok(())
            }
            Ctrl::SetTag(tag) => {
                if self.operation != Operation::Decrypt {
                    return Err(BackendError::NotSupported("installing a tag while encrypting"));
                }
                self.fix_tag_len(algorithm, tag.len())?;
                self.expected_tag = Some(tag.to_vec());
                Ok(())
            }
            Ctrl::SetTagLen(len) => {
                if algorithm != AeadAlgorithm::AesCcm {
                    return Err(BackendError::NotSupported("tag length without a tag"));
                }
                self.fix_tag_len(algorithm, len)
            }
            Ctrl::GetTag(out) => {
                if self.operation != Operation::Encrypt || self.stage != Stage::Finished {
                    return Err(BackendError::OutOfOrder(
                        "the tag is only available after finalizing an encryption",
                    ));
                }
                let tag = self.computed_tag.as_deref().ok_or(BackendError::Internal)?;
                let len_ok = match algorithm {
                    AeadAlgorithm::AesGcm => (aes_gcm::MIN_TAG_LEN..=tag.len()).contains(&out.len()),
                    _ => out.len() == tag.len(),
                };
                if !len_ok {
                    return Err(BackendError::InvalidTagLength(out.len()));
                }
                out.copy_from_slice(&tag[..out.len()]);
                Ok(())
            }
        }
    }

    fn fix_tag_len(&mut self, algorithm: AeadAlgorithm, len: usize) -> Result<(), BackendError> {
        if !tag_len_supported(algorithm, len) {
            return Err(BackendError::InvalidTagLength(len));
        }
        if algorithm == AeadAlgorithm::AesCcm && self.iv.is_some() && self.tag_len != Some(len) {
            return Err(BackendError::OutOfOrder(
                "ccm tag length must be set before key and iv",
            ));
        }
        self.tag_len = Some(len);
        Ok(())
    }

    pub fn update(&mut self, update: Update<'_>) -> Result<usize, BackendError> {
        let (algorithm, _) = self.cipher.ok_or(BackendError::NoCipherSet)?;

        match update {
            Update::Length(len) => {
                if algorithm != AeadAlgorithm::AesCcm {
                    return Err(BackendError::NotSupported(
                        "declaring the message length outside of ccm",
                    ));
                }
                if self.stage != Stage::Ready || !self.headers.is_empty() {
                    return Err(BackendError::OutOfOrder(
                        "the message length must be declared after key and iv, before any data",
                    ));
                }
                self.declared_len = Some(len);
                Ok(0)
            }
            Update::Aad(chunk) => {
                if self.stage != Stage::Ready {
                    return Err(BackendError::OutOfOrder(
                        "associated data must follow key and iv and precede message data",
                    ));
                }
                if algorithm == AeadAlgorithm::AesCcm && self.declared_len.is_none() {
                    return Err(BackendError::OutOfOrder(
                        "ccm needs the message length before associated data",
                    ));
                }
                self.headers.push(chunk.to_vec());
                Ok(chunk.len())
            }
            Update::Data { input, output } => self.process(algorithm, input, output),
        }
    }

    fn process(
        &mut self,
        algorithm: AeadAlgorithm,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<usize, BackendError> {
        if self.stage != Stage::Ready {
            return Err(BackendError::OutOfOrder(
                "message data goes in one update, after key, iv and associated data",
            ));
        }
        if output.len() < input.len() {
            return Err(BackendError::BufferTooSmall {
                needed: input.len(),
                got: output.len(),
            });
        }
        if algorithm == AeadAlgorithm::AesCcm {
            match self.declared_len {
                Some(declared) if declared == input.len() => {}
                Some(declared) => {
                    return Err(BackendError::LengthMismatch {
                        declared,
                        actual: input.len(),
                    })
                }
                None => {
                    return Err(BackendError::OutOfOrder(
                        "ccm needs the message length before message data",
                    ))
                }
            }
        }

        let key = self.key.as_deref().ok_or(BackendError::Internal)?;
        let iv = self.iv.as_deref().ok_or(BackendError::Internal)?;
        let buffer = &mut output[..input.len()];
        buffer.copy_from_slice(input);

        match self.operation {
            Operation::Encrypt => {
                let tag = seal(algorithm, key, iv, self.tag_len, &self.headers, buffer)?;
                self.computed_tag = Some(tag);
                self.stage = Stage::Processed;
            }
            Operation::Decrypt => {
                let tag = self.expected_tag.as_deref().ok_or(BackendError::OutOfOrder(
                    "the tag must be installed before decrypting",
                ))?;
                let verified = match open(algorithm, key, iv, &self.headers, buffer, tag) {
                    Ok(()) => true,
                    Err(BackendError::TagMismatch) => false,
                    Err(err) => return Err(err),
                };
                if !verified {
                    buffer.fill(0);
                }
                self.verified = verified;
                // CCM completes the message here, there is nothing left to finalize
                self.stage = match algorithm {
                    AeadAlgorithm::AesCcm => Stage::Finished,
                    _ => Stage::Processed,
                };

                if !verified && verifies_on_update(algorithm) {
                    self.stage = Stage::Finished;
                    return Err(BackendError::TagMismatch);
                }
            }
        }

        Ok(input.len())
    }

    /// Completes the message. Modes here never hold back output, so nothing is written to
    /// `out`.
    pub fn finish(&mut self, _out: &mut [u8]) -> Result<usize, BackendError> {
        let (algorithm, _) = self.cipher.ok_or(BackendError::NoCipherSet)?;

        // A message without a data update is an empty message
        if self.stage == Stage::Ready {
            self.process(algorithm, &[], &mut [])?;
        }
        if self.stage != Stage::Processed {
            return Err(BackendError::OutOfOrder(
                "finalizing without a message in progress",
            ));
        }

        self.stage = Stage::Finished;
        match (self.operation, self.verified) {
            (Operation::Decrypt, false) => Err(BackendError::TagMismatch),
            _ => Ok(0),
        }
    }
}

impl fmt::Debug for SoftCipherCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftCipherCtx")
            .field("cipher", &self.cipher)
            .field("operation", &self.operation)
            .field("iv_len", &self.iv_len)
            .field("tag_len", &self.tag_len)
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}

fn default_iv_len(algorithm: AeadAlgorithm) -> usize {
    match algorithm {
        AeadAlgorithm::AesCcm => CCM_DEFAULT_IV_LEN,
        AeadAlgorithm::AesSiv => 0,
        AeadAlgorithm::ChaCha20Poly1305 | AeadAlgorithm::AesGcm | AeadAlgorithm::AesOcb3 => 12,
    }
}

fn iv_len_supported(algorithm: AeadAlgorithm, len: usize) -> bool {
    match algorithm {
        AeadAlgorithm::ChaCha20Poly1305 => len == chacha20poly1305_ietf::NONCE_LEN,
        AeadAlgorithm::AesGcm => (aes_gcm::MIN_IV_LEN..=aes_gcm::MAX_IV_LEN).contains(&len),
        AeadAlgorithm::AesCcm => {
            (aead_aes_ccm::MIN_NONCE_LEN..=aead_aes_ccm::MAX_NONCE_LEN).contains(&len)
        }
        AeadAlgorithm::AesOcb3 => (12..=15).contains(&len),
        AeadAlgorithm::AesSiv => len == 0,
    }
}

fn tag_len_supported(algorithm: AeadAlgorithm, len: usize) -> bool {
    match algorithm {
        AeadAlgorithm::ChaCha20Poly1305 => len == chacha20poly1305_ietf::TAG_LEN,
        AeadAlgorithm::AesGcm => (aes_gcm::MIN_TAG_LEN..=aes_gcm::TAG_LEN).contains(&len),
        AeadAlgorithm::AesCcm => aead_aes_ccm::TAG_LENS.contains(&len),
        AeadAlgorithm::AesOcb3 => len == aes_ocb3::TAG_LEN,
        AeadAlgorithm::AesSiv => len == aes_siv::TAG_LEN,
    }
}

fn verifies_on_update(algorithm: AeadAlgorithm) -> bool {
    matches!(algorithm, AeadAlgorithm::AesCcm | AeadAlgorithm::AesSiv)
}

fn seal(
    algorithm: AeadAlgorithm,
    key: &[u8],
    iv: &[u8],
    tag_len: Option<usize>,
    headers: &[Vec<u8>],
    buffer: &mut [u8],
) -> Result<Vec<u8>, BackendError> {
    let ad = headers.concat();
    match algorithm {
        AeadAlgorithm::ChaCha20Poly1305 => chacha20poly1305_ietf::seal(key, iv, &ad, buffer),
        AeadAlgorithm::AesGcm => aes_gcm::seal(key, iv, &ad, buffer),
        AeadAlgorithm::AesCcm => aes_ccm::seal(
            key,
            iv,
            tag_len.unwrap_or(CCM_DEFAULT_TAG_LEN),
            &ad,
            buffer,
        ),
        AeadAlgorithm::AesOcb3 => aes_ocb3::seal(key, iv, &ad, buffer),
        AeadAlgorithm::AesSiv => aes_siv::seal(key, headers, buffer),
    }
}

fn open(
    algorithm: AeadAlgorithm,
    key: &[u8],
    iv: &[u8],
    headers: &[Vec<u8>],
    buffer: &mut [u8],
    tag: &[u8],
) -> Result<(), BackendError> {
    let ad = headers.concat();
    match algorithm {
        AeadAlgorithm::ChaCha20Poly1305 => chacha20poly1305_ietf::open(key, iv, &ad, buffer, tag),
        AeadAlgorithm::AesGcm => aes_gcm::open(key, iv, &ad, buffer, tag),
        AeadAlgorithm::AesCcm => aes_ccm::open(key, iv, &ad, buffer, tag),
        AeadAlgorithm::AesOcb3 => aes_ocb3::open(key, iv, &ad, buffer, tag),
        AeadAlgorithm::AesSiv => aes_siv::open(key, headers, buffer, tag),
    }
}
