//! Front end types, one per AEAD algorithm.
//!
//! Each type binds a backend and a key. Arguments are validated before anything reaches the
//! dispatcher, and every call runs on a fresh context.

use rand::RngCore;
use zeroize::Zeroizing;

use cryptaead_cipher_traits::{AeadAlgorithm, AeadError, Backend, CipherSpec, MAX_INPUT_LEN};

use crate::dispatch::aead_cipher_supported;

mod aes_ccm;
mod aes_gcm;
mod aes_ocb3;
mod aes_siv;
mod chacha20poly1305;

pub use aes_ccm::AesCcm;
pub use aes_gcm::AesGcm;
pub use aes_ocb3::AesOcb3;
pub use aes_siv::AesSiv;
pub use chacha20poly1305::ChaCha20Poly1305;

/// Builds the cipher for `key` and makes sure `backend` can run it
fn bind<B: Backend>(
    backend: &B,
    algorithm: AeadAlgorithm,
    key: &[u8],
    tag_len: Option<usize>,
) -> Result<CipherSpec, AeadError> {
    if !algorithm.key_lens().contains(&key.len()) {
        return Err(AeadError::InvalidArgument(format!(
            "{algorithm} key must be one of {:?} bytes, got {}",
            algorithm.key_lens(),
            key.len()
        )));
    }

    let mut cipher = CipherSpec::new(algorithm, key);
    if let Some(tag_len) = tag_len {
        cipher = cipher.with_tag_len(tag_len);
    }

    if !aead_cipher_supported(backend, &cipher) {
        return Err(AeadError::Unsupported(format!(
            "{} is not supported by this backend",
            cipher.cipher_name()
        )));
    }
    Ok(cipher)
}

/// Rejects inputs beyond [MAX_INPUT_LEN]
fn check_input_lens(data: &[u8], ad: &[&[u8]]) -> Result<(), AeadError> {
    if data.len() > MAX_INPUT_LEN || ad.iter().any(|chunk| chunk.len() > MAX_INPUT_LEN) {
        return Err(AeadError::Overflow);
    }
    Ok(())
}

fn check_nonce_len(
    algorithm: AeadAlgorithm,
    nonce: &[u8],
    lens: std::ops::RangeInclusive<usize>,
) -> Result<(), AeadError> {
    if !lens.contains(&nonce.len()) {
        return Err(AeadError::InvalidArgument(format!(
            "{algorithm} nonce must be between {} and {} bytes, got {}",
            lens.start(),
            lens.end(),
            nonce.len()
        )));
    }
    Ok(())
}

/// A fresh random key of `bits` bits, if `algorithm` takes keys of that size
fn generate_key(algorithm: AeadAlgorithm, bits: usize) -> Result<Zeroizing<Vec<u8>>, AeadError> {
    if bits % 8 != 0 || !algorithm.key_lens().contains(&(bits / 8)) {
        return Err(AeadError::InvalidArgument(format!(
            "{algorithm} has no {bits} bit keys"
        )));
    }

    let mut key = Zeroizing::new(vec![0u8; bits / 8]);
    rand::thread_rng().fill_bytes(&mut key);
    Ok(key)
}
