//! The one-shot AEAD path.
//!
//! The whole operation is a single backend call. Associated data chunks are concatenated
//! before sealing or opening.

use cryptaead_cipher_traits::{AeadError, Backend, BackendError, CipherSpec};

use crate::dispatch::{backend_assert, invalid_tag};

/// Binds the key of `cipher` to a one-shot context. `tag_len` of `None` selects the backend
/// default.
pub fn create_context<B: Backend>(
    backend: &B,
    cipher: &CipherSpec,
    tag_len: Option<usize>,
) -> Result<B::AeadCtx, AeadError> {
    backend_assert(
        backend,
        backend.aead_ctx_new(cipher.algorithm(), cipher.key(), tag_len),
    )
}

/// A context keeps the tag length it was created with; `tag_len` has to agree with it.
pub fn check_tag_len<B: Backend>(
    backend: &B,
    ctx: &B::AeadCtx,
    tag_len: usize,
) -> Result<(), AeadError> {
    if backend.aead_tag_len(ctx) != tag_len {
        return Err(AeadError::Backend(BackendError::InvalidTagLength(tag_len)));
    }
    Ok(())
}

pub fn encrypt<B: Backend>(
    backend: &B,
    ctx: &B::AeadCtx,
    cipher: &CipherSpec,
    nonce: &[u8],
    data: &[u8],
    ad: &[&[u8]],
    tag_len: usize,
) -> Result<Vec<u8>, AeadError> {
    check_tag_len(backend, ctx, tag_len)?;

    let ad = ad.concat();
    let mut out = vec![0u8; data.len() + backend.aead_max_overhead(cipher.algorithm())];
    let len = backend_assert(backend, backend.aead_seal(ctx, &mut out, nonce, data, &ad))?;
    out.truncate(len);
    Ok(out)
}

/// Opens `data` (`ciphertext || tag`). Input shorter than the tag fails without a backend call.
pub fn decrypt<B: Backend>(
    backend: &B,
    ctx: &B::AeadCtx,
    nonce: &[u8],
    data: &[u8],
    ad: &[&[u8]],
    tag_len: usize,
) -> Result<Vec<u8>, AeadError> {
    check_tag_len(backend, ctx, tag_len)?;
    if data.len() < tag_len {
        return Err(AeadError::AuthenticationFailed);
    }

    let ad = ad.concat();
    let mut out = vec![0u8; data.len() - tag_len];
    let len = invalid_tag(backend, backend.aead_open(ctx, &mut out, nonce, data, &ad))?;
    out.truncate(len);
    Ok(out)
}
