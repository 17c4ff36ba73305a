//! The generic cipher context path.
//!
//! An operation is a fixed sequence of backend calls on one context:
//!
//! 1. select the cipher and the direction
//! 2. negotiate the nonce length
//! 3. decryption: install the expected tag; CCM encryption: fix the tag length
//! 4. install key and nonce
//! 5. CCM: declare the message length
//! 6. feed each associated data chunk
//! 7. process the message in one update
//! 8. finalize and, for encryption, read the tag
//!
//! Failures in steps 1 to 6 are passed on as [AeadError::Backend]. Failures in steps 7 and 8
//! become [AeadError::AuthenticationFailed]. The backend's error queue is cleared in both cases.

use log::trace;

use cryptaead_cipher_traits::{
    aead_aes_siv, AeadAlgorithm, AeadError, Backend, CipherSpec, Ctrl, Init, Operation, Update,
};

use crate::dispatch::{backend_assert, invalid_tag};

/// Room for output a backend holds back until finalization (one block, OCB)
const FINAL_SLACK: usize = 16;

/// Creates a context with `cipher` selected and `key` installed, ready for
/// [set_nonce_operation]
pub fn generic_cipher_create_context<B: Backend>(
    backend: &B,
    cipher: &CipherSpec,
    key: &[u8],
) -> Result<B::CipherCtx, AeadError> {
    let name = cipher.cipher_name();
    let mut ctx = backend_assert(backend, backend.cipher_ctx_new())?;
    backend_assert(
        backend,
        backend.cipher_init(&mut ctx, Init::new(Operation::Decrypt).with_cipher(&name)),
    )?;
    if cipher.algorithm() == AeadAlgorithm::AesCcm {
        backend_assert(
            backend,
            backend.cipher_ctrl(&mut ctx, Ctrl::SetTagLen(cipher.tag_len())),
        )?;
    }
    backend_assert(
        backend,
        backend.cipher_init(&mut ctx, Init::new(Operation::Decrypt).with_key(key)),
    )?;
    Ok(ctx)
}

/// Creates a context for one operation, with everything up to and including key and nonce
/// installed.
///
/// Decryption requires `tag`. CCM fixes the tag length before the key and nonce go in.
pub fn generic_cipher_aead_setup<B: Backend>(
    backend: &B,
    cipher_name: &str,
    key: &[u8],
    nonce: &[u8],
    tag: Option<&[u8]>,
    tag_len: usize,
    operation: Operation,
) -> Result<B::CipherCtx, AeadError> {
    if operation == Operation::Decrypt && tag.is_none() {
        return Err(AeadError::ContractViolation("decryption requires a tag"));
    }

    let mut ctx = backend_assert(backend, backend.cipher_ctx_new())?;
    backend_assert(
        backend,
        backend.cipher_init(&mut ctx, Init::new(operation).with_cipher(cipher_name)),
    )?;
    // CCM needs the nonce length before the tag
    backend_assert(
        backend,
        backend.cipher_ctrl(&mut ctx, Ctrl::SetIvLen(nonce.len())),
    )?;

    match (operation, tag) {
        (Operation::Decrypt, Some(tag)) => set_tag(backend, &mut ctx, tag)?,
        (Operation::Encrypt, _) if cipher_name.ends_with("-ccm") => backend_assert(
            backend,
            backend.cipher_ctrl(&mut ctx, Ctrl::SetTagLen(tag_len)),
        )?,
        _ => {}
    }

    backend_assert(
        backend,
        backend.cipher_init(
            &mut ctx,
            Init::new(operation).with_key(key).with_iv(nonce),
        ),
    )?;
    Ok(ctx)
}

pub fn set_tag<B: Backend>(
    backend: &B,
    ctx: &mut B::CipherCtx,
    tag: &[u8],
) -> Result<(), AeadError> {
    backend_assert(backend, backend.cipher_ctrl(ctx, Ctrl::SetTag(tag)))
}

/// Starts a new message on an existing context
pub fn set_nonce_operation<B: Backend>(
    backend: &B,
    ctx: &mut B::CipherCtx,
    nonce: &[u8],
    operation: Operation,
) -> Result<(), AeadError> {
    backend_assert(backend, backend.cipher_ctrl(ctx, Ctrl::SetIvLen(nonce.len())))?;
    backend_assert(
        backend,
        backend.cipher_init(ctx, Init::new(operation).with_iv(nonce)),
    )
}

pub fn set_length<B: Backend>(
    backend: &B,
    ctx: &mut B::CipherCtx,
    data_len: usize,
) -> Result<(), AeadError> {
    backend_assert(backend, backend.cipher_update(ctx, Update::Length(data_len)))?;
    Ok(())
}

pub fn process_aad<B: Backend>(
    backend: &B,
    ctx: &mut B::CipherCtx,
    ad: &[u8],
) -> Result<(), AeadError> {
    backend_assert(backend, backend.cipher_update(ctx, Update::Aad(ad)))?;
    Ok(())
}

pub fn process_data<B: Backend>(
    backend: &B,
    ctx: &mut B::CipherCtx,
    data: &[u8],
) -> Result<Vec<u8>, AeadError> {
    let mut buf = vec![0u8; data.len() + FINAL_SLACK];
    let len = invalid_tag(
        backend,
        backend.cipher_update(
            ctx,
            Update::Data {
                input: data,
                output: &mut buf,
            },
        ),
    )?;
    buf.truncate(len);
    Ok(buf)
}

fn finalize<B: Backend>(
    backend: &B,
    ctx: &mut B::CipherCtx,
    processed: &mut Vec<u8>,
) -> Result<(), AeadError> {
    let mut buf = [0u8; FINAL_SLACK];
    let len = invalid_tag(backend, backend.cipher_final(ctx, &mut buf))?;
    processed.extend_from_slice(&buf[..len]);
    Ok(())
}

pub fn generic_cipher_encrypt<B: Backend>(
    backend: &B,
    cipher: &CipherSpec,
    nonce: &[u8],
    data: &[u8],
    ad: &[&[u8]],
    tag_len: usize,
    ctx: Option<&mut B::CipherCtx>,
) -> Result<Vec<u8>, AeadError> {
    let algorithm = cipher.algorithm();
    if algorithm == AeadAlgorithm::AesSiv && tag_len != aead_aes_siv::TAG_LEN {
        return Err(AeadError::ContractViolation("aes-siv produces 16 byte tags"));
    }

    let cipher_name = cipher.cipher_name();
    let mut fresh = None;
    let ctx = match ctx {
        Some(ctx) => {
            set_nonce_operation(backend, ctx, nonce, Operation::Encrypt)?;
            ctx
        }
        None => fresh.insert(generic_cipher_aead_setup(
            backend,
            &cipher_name,
            cipher.key(),
            nonce,
            None,
            tag_len,
            Operation::Encrypt,
        )?),
    };

    if algorithm == AeadAlgorithm::AesCcm {
        set_length(backend, ctx, data.len())?;
    }
    for chunk in ad {
        process_aad(backend, ctx, chunk)?;
    }

    let mut processed = process_data(backend, ctx, data)?;
    finalize(backend, ctx, &mut processed)?;

    let mut tag = vec![0u8; tag_len];
    backend_assert(backend, backend.cipher_ctrl(ctx, Ctrl::GetTag(&mut tag)))?;
    trace!("{cipher_name}: sealed {} bytes", processed.len());

    if algorithm.tag_first() {
        tag.extend_from_slice(&processed);
        Ok(tag)
    } else {
        processed.extend_from_slice(&tag);
        Ok(processed)
    }
}

pub fn generic_cipher_decrypt<B: Backend>(
    backend: &B,
    cipher: &CipherSpec,
    nonce: &[u8],
    data: &[u8],
    ad: &[&[u8]],
    tag_len: usize,
    ctx: Option<&mut B::CipherCtx>,
) -> Result<Vec<u8>, AeadError> {
    if data.len() < tag_len {
        return Err(AeadError::AuthenticationFailed);
    }

    let algorithm = cipher.algorithm();
    let (tag, ciphertext) = if algorithm.tag_first() {
        data.split_at(tag_len)
    } else {
        let (ciphertext, tag) = data.split_at(data.len() - tag_len);
        (tag, ciphertext)
    };

    let cipher_name = cipher.cipher_name();
    let mut fresh = None;
    let ctx = match ctx {
        Some(ctx) => {
            set_nonce_operation(backend, ctx, nonce, Operation::Decrypt)?;
            set_tag(backend, ctx, tag)?;
            ctx
        }
        None => fresh.insert(generic_cipher_aead_setup(
            backend,
            &cipher_name,
            cipher.key(),
            nonce,
            Some(tag),
            tag_len,
            Operation::Decrypt,
        )?),
    };

    if algorithm == AeadAlgorithm::AesCcm {
        set_length(backend, ctx, ciphertext.len())?;
    }
    for chunk in ad {
        process_aad(backend, ctx, chunk)?;
    }

    // CCM verifies during the update; there is nothing left to finalize
    let mut processed = process_data(backend, ctx, ciphertext)?;
    if algorithm != AeadAlgorithm::AesCcm {
        finalize(backend, ctx, &mut processed)?;
    }
    trace!("{cipher_name}: opened {} bytes", processed.len());

    Ok(processed)
}
