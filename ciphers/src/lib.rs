//! A software [Backend] for the cryptaead dispatcher.
//!
//! [SoftwareBackend] behaves like a native cryptography library: it offers a one-shot
//! ChaCha20-Poly1305 interface (libcrux) and a multi-call cipher context interface
//! ([cipher_ctx::SoftCipherCtx], on top of RustCrypto) and records each failure on an error
//! queue. What it claims to support is decided by a [BackendProfile].

use std::sync::{Mutex, PoisonError};

use log::trace;
use zeroize::Zeroizing;

use cryptaead_cipher_traits::{
    AeadAlgorithm, Backend, BackendError, Ctrl, Init, LibraryVersion, Update,
};

pub mod aead_ctx;
pub mod cipher_ctx;
pub mod profile;
pub mod subtle;

pub use aead_ctx::NativeAeadCtx;
pub use cipher_ctx::SoftCipherCtx;
pub use profile::BackendProfile;

use subtle::libcrux::chacha20poly1305_ietf as native;

#[derive(Debug, Default)]
pub struct SoftwareBackend {
    profile: BackendProfile,
    errors: Mutex<Vec<BackendError>>,
}

impl SoftwareBackend {
    pub fn new(profile: BackendProfile) -> Self {
        Self {
            profile,
            errors: Mutex::new(Vec::new()),
        }
    }

    pub fn profile(&self) -> &BackendProfile {
        &self.profile
    }

    /// Puts the error of a failed call on the error queue
    fn record<T>(&self, res: Result<T, BackendError>) -> Result<T, BackendError> {
        if let Err(e) = &res {
            trace!("backend error: {e}");
            self.errors
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(e.clone());
        }
        res
    }

    /// Maps a cipher name to an algorithm this backend implements.
    ///
    /// Names missing from the profile's name table still resolve; only the SIV family
    /// disappears entirely when the profile disables it.
    fn resolve(&self, name: &str) -> Result<(AeadAlgorithm, usize), BackendError> {
        match AeadAlgorithm::from_cipher_name(name) {
            Some((AeadAlgorithm::AesSiv, _)) if !self.profile.siv => {
                Err(BackendError::UnknownCipher(name.to_owned()))
            }
            Some(resolved) => Ok(resolved),
            None => Err(BackendError::UnknownCipher(name.to_owned())),
        }
    }

    fn native_key(
        &self,
        algorithm: AeadAlgorithm,
        key: &[u8],
        tag_len: Option<usize>,
    ) -> Result<NativeAeadCtx, BackendError> {
        if !self.profile.native_aead {
            return Err(BackendError::NativeAeadUnavailable);
        }
        if algorithm != AeadAlgorithm::ChaCha20Poly1305 {
            return Err(BackendError::UnknownCipher(algorithm.to_string()));
        }
        let tag_len = tag_len.unwrap_or(native::TAG_LEN);
        if tag_len != native::TAG_LEN {
            return Err(BackendError::InvalidTagLength(tag_len));
        }
        let key: [u8; native::KEY_LEN] = key
            .try_into()
            .map_err(|_| BackendError::InvalidKeyLength(key.len()))?;
        Ok(NativeAeadCtx {
            key: Zeroizing::new(key),
            tag_len,
        })
    }

    fn init(&self, ctx: &mut SoftCipherCtx, init: Init<'_>) -> Result<(), BackendError> {
        if let Some(name) = init.cipher {
            let (algorithm, key_len) = self.resolve(name)?;
            ctx.select(algorithm, key_len);
        }
        ctx.init(init.key, init.iv, init.operation)
    }
}

impl Backend for SoftwareBackend {
    type AeadCtx = NativeAeadCtx;
    type CipherCtx = SoftCipherCtx;

    fn native_aead_available(&self) -> bool {
        self.profile.native_aead
    }

    fn library_version(&self) -> LibraryVersion {
        self.profile.library_version
    }

    fn cipher_registered(&self, name: &str) -> bool {
        self.profile.is_registered(name)
    }

    fn siv_available(&self) -> bool {
        self.profile.siv
    }

    fn fips_enabled(&self) -> bool {
        self.profile.fips
    }

    fn fips_approved(&self, name: &str) -> bool {
        self.profile.is_fips_approved(name)
    }

    fn aead_ctx_new(
        &self,
        algorithm: AeadAlgorithm,
        key: &[u8],
        tag_len: Option<usize>,
    ) -> Result<Self::AeadCtx, BackendError> {
        self.record(self.native_key(algorithm, key, tag_len))
    }

    fn aead_tag_len(&self, ctx: &Self::AeadCtx) -> usize {
        ctx.tag_len()
    }

    fn aead_max_overhead(&self, algorithm: AeadAlgorithm) -> usize {
        match algorithm {
            AeadAlgorithm::ChaCha20Poly1305 => native::TAG_LEN,
            other => other.default_tag_len(),
        }
    }

    fn aead_seal(
        &self,
        ctx: &Self::AeadCtx,
        out: &mut [u8],
        nonce: &[u8],
        input: &[u8],
        ad: &[u8],
    ) -> Result<usize, BackendError> {
        self.record(native::seal(&ctx.key, nonce, ad, input, out))
    }

    fn aead_open(
        &self,
        ctx: &Self::AeadCtx,
        out: &mut [u8],
        nonce: &[u8],
        input: &[u8],
        ad: &[u8],
    ) -> Result<usize, BackendError> {
        self.record(native::open(&ctx.key, nonce, ad, input, out))
    }

    fn cipher_ctx_new(&self) -> Result<Self::CipherCtx, BackendError> {
        Ok(SoftCipherCtx::new())
    }

    fn cipher_init(&self, ctx: &mut Self::CipherCtx, init: Init<'_>) -> Result<(), BackendError> {
        self.record(self.init(ctx, init))
    }

    fn cipher_ctrl(&self, ctx: &mut Self::CipherCtx, ctrl: Ctrl<'_>) -> Result<(), BackendError> {
        trace!("cipher ctrl {}", ctrl.name());
        self.record(ctx.ctrl(ctrl))
    }

    fn cipher_update(
        &self,
        ctx: &mut Self::CipherCtx,
        update: Update<'_>,
    ) -> Result<usize, BackendError> {
        self.record(ctx.update(update))
    }

    fn cipher_final(
        &self,
        ctx: &mut Self::CipherCtx,
        out: &mut [u8],
    ) -> Result<usize, BackendError> {
        self.record(ctx.finish(out))
    }

    fn consume_errors(&self) -> Vec<BackendError> {
        std::mem::take(&mut *self.errors.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
