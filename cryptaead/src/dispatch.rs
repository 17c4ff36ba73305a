//! Routes AEAD requests to the backend's one-shot interface or to its generic cipher contexts.
//!
//! ChaCha20-Poly1305 goes through the one-shot interface whenever the backend provides it;
//! everything else is driven through a multi-call cipher context, see [crate::cipher_ctx].

use std::fmt;

use log::{debug, warn};

use cryptaead_cipher_traits::{
    AeadAlgorithm, AeadError, Backend, BackendError, CipherSpec, LibraryVersion,
};

use crate::{cipher_ctx, native};

/// Libraries from this version on provide ChaCha20-Poly1305 through their cipher contexts,
/// whether or not the name table lists it
pub const CHACHA20_POLY1305_MIN_VERSION: LibraryVersion = LibraryVersion::new(1, 1, 0);

/// A context that can be handed back into [encrypt] and [decrypt] for further operations under
/// the same key.
///
/// The variant has to match the path the cipher is dispatched to; [create_context] picks the
/// right one.
pub enum AeadContext<B: Backend> {
    Native(B::AeadCtx),
    Cipher(B::CipherCtx),
}

impl<B: Backend> fmt::Debug for AeadContext<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AeadContext::Native(_) => f.write_str("AeadContext::Native(..)"),
            AeadContext::Cipher(_) => f.write_str("AeadContext::Cipher(..)"),
        }
    }
}

/// Whether `cipher` is handled by the backend's one-shot AEAD interface
pub fn native_aead_supported<B: Backend>(backend: &B, cipher: &CipherSpec) -> bool {
    backend.native_aead_available() && cipher.algorithm() == AeadAlgorithm::ChaCha20Poly1305
}

/// Whether the backend can perform `cipher` on either path
pub fn aead_cipher_supported<B: Backend>(backend: &B, cipher: &CipherSpec) -> bool {
    if native_aead_supported(backend, cipher) {
        return true;
    }

    let name = cipher.cipher_name();
    if backend.fips_enabled() && !backend.fips_approved(&name) {
        return false;
    }

    match cipher.algorithm() {
        AeadAlgorithm::ChaCha20Poly1305
            if backend.library_version() >= CHACHA20_POLY1305_MIN_VERSION =>
        {
            true
        }
        AeadAlgorithm::AesSiv => backend.siv_available() && backend.cipher_registered(&name),
        _ => backend.cipher_registered(&name),
    }
}

/// Creates a context bound to the key of `cipher`, on the path `cipher` is dispatched to
pub fn create_context<B: Backend>(
    backend: &B,
    cipher: &CipherSpec,
) -> Result<AeadContext<B>, AeadError> {
    if native_aead_supported(backend, cipher) {
        Ok(AeadContext::Native(native::create_context(backend, cipher, None)?))
    } else {
        Ok(AeadContext::Cipher(
            cipher_ctx::generic_cipher_create_context(backend, cipher, cipher.key())?,
        ))
    }
}

/// Encrypts `data`, authenticating the chunks of `ad` in order.
///
/// Returns `ciphertext || tag`, or `tag || ciphertext` for AES-SIV. Without `ctx` a context is
/// created for this call and dropped afterwards.
pub fn encrypt<B: Backend>(
    backend: &B,
    cipher: &CipherSpec,
    nonce: &[u8],
    data: &[u8],
    ad: &[&[u8]],
    tag_len: usize,
    ctx: Option<&mut AeadContext<B>>,
) -> Result<Vec<u8>, AeadError> {
    if native_aead_supported(backend, cipher) {
        debug!("encrypting with the one-shot {} interface", cipher.algorithm());
        let mut fresh = None;
        let ctx = match ctx {
            Some(AeadContext::Native(ctx)) => ctx,
            Some(AeadContext::Cipher(_)) => return Err(mismatched_context()),
            None => fresh.insert(native::create_context(backend, cipher, Some(tag_len))?),
        };
        native::encrypt(backend, ctx, cipher, nonce, data, ad, tag_len)
    } else {
        debug!("encrypting with a {} cipher context", cipher.cipher_name());
        let ctx = match ctx {
            Some(AeadContext::Cipher(ctx)) => Some(ctx),
            Some(AeadContext::Native(_)) => return Err(mismatched_context()),
            None => None,
        };
        cipher_ctx::generic_cipher_encrypt(backend, cipher, nonce, data, ad, tag_len, ctx)
    }
}

/// Decrypts `data` as produced by [encrypt] under the same parameters
pub fn decrypt<B: Backend>(
    backend: &B,
    cipher: &CipherSpec,
    nonce: &[u8],
    data: &[u8],
    ad: &[&[u8]],
    tag_len: usize,
    ctx: Option<&mut AeadContext<B>>,
) -> Result<Vec<u8>, AeadError> {
    if native_aead_supported(backend, cipher) {
        debug!("decrypting with the one-shot {} interface", cipher.algorithm());
        if data.len() < tag_len {
            return Err(AeadError::AuthenticationFailed);
        }
        let mut fresh = None;
        let ctx = match ctx {
            Some(AeadContext::Native(ctx)) => ctx,
            Some(AeadContext::Cipher(_)) => return Err(mismatched_context()),
            None => fresh.insert(native::create_context(backend, cipher, Some(tag_len))?),
        };
        native::decrypt(backend, ctx, nonce, data, ad, tag_len)
    } else {
        debug!("decrypting with a {} cipher context", cipher.cipher_name());
        let ctx = match ctx {
            Some(AeadContext::Cipher(ctx)) => Some(ctx),
            Some(AeadContext::Native(_)) => return Err(mismatched_context()),
            None => None,
        };
        cipher_ctx::generic_cipher_decrypt(backend, cipher, nonce, data, ad, tag_len, ctx)
    }
}

fn mismatched_context() -> AeadError {
    AeadError::ContractViolation("context was created for the other dispatch path")
}

/// Passes a setup failure on untranslated, after clearing the backend's error queue
pub(crate) fn backend_assert<B: Backend, T>(
    backend: &B,
    res: Result<T, BackendError>,
) -> Result<T, AeadError> {
    res.map_err(|err| {
        let queued = backend.consume_errors();
        if !queued.is_empty() {
            warn!("backend setup failed: {err} (cleared {} queued errors)", queued.len());
        }
        AeadError::Backend(err)
    })
}

/// Turns a processing failure into [AeadError::AuthenticationFailed], after clearing the
/// backend's error queue
pub(crate) fn invalid_tag<B: Backend, T>(
    backend: &B,
    res: Result<T, BackendError>,
) -> Result<T, AeadError> {
    res.map_err(|err| {
        let queued = backend.consume_errors();
        debug!("authentication failed: {err} (cleared {} queued errors)", queued.len());
        AeadError::AuthenticationFailed
    })
}
