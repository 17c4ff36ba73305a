//! The call surface of a native cryptography library, as seen by the AEAD dispatcher.
//!
//! The trait mirrors the shape of an EVP-style API: capability queries, a one-shot AEAD
//! interface for libraries that provide one, a multi-call cipher context interface
//! (init, ctrl, update, final), and a per-backend error queue. Every fallible call returns
//! a [BackendError]; implementations must also record that error on their queue so that
//! callers can drain it with [Backend::consume_errors].

use thiserror::Error;

use crate::algorithms::{AeadAlgorithm, LibraryVersion, Operation};

/// Parameters of a cipher context init call.
///
/// Any of cipher, key and iv may be left out; the backend keeps what was installed before.
#[derive(Debug, Clone, Copy)]
pub struct Init<'a> {
    pub cipher: Option<&'a str>,
    pub key: Option<&'a [u8]>,
    pub iv: Option<&'a [u8]>,
    pub operation: Operation,
}

impl<'a> Init<'a> {
    pub fn new(operation: Operation) -> Self {
        Self {
            cipher: None,
            key: None,
            iv: None,
            operation,
        }
    }

    pub fn with_cipher(mut self, name: &'a str) -> Self {
        self.cipher = Some(name);
        self
    }

    pub fn with_key(mut self, key: &'a [u8]) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_iv(mut self, iv: &'a [u8]) -> Self {
        self.iv = Some(iv);
        self
    }
}

/// Control calls on a cipher context
#[derive(Debug)]
pub enum Ctrl<'a> {
    /// Negotiate the IV length; must precede installing the IV
    SetIvLen(usize),
    /// Install the expected tag before decrypting
    SetTag(&'a [u8]),
    /// Fix the tag length without providing a tag (CCM encryption)
    SetTagLen(usize),
    /// Read the tag after finalizing an encryption; the buffer length is the tag length
    GetTag(&'a mut [u8]),
}

impl Ctrl<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Ctrl::SetIvLen(_) => "set-ivlen",
            Ctrl::SetTag(_) => "set-tag",
            Ctrl::SetTagLen(_) => "set-taglen",
            Ctrl::GetTag(_) => "get-tag",
        }
    }
}

/// Update calls on a cipher context
#[derive(Debug)]
pub enum Update<'a> {
    /// Pre-declare the total message length (no input, no output)
    Length(usize),
    /// Feed one associated data chunk (no output)
    Aad(&'a [u8]),
    /// Process message data into `output`
    Data {
        input: &'a [u8],
        output: &'a mut [u8],
    },
}

/// Failures reported by a backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("cipher `{0}` is not available")]
    UnknownCipher(String),
    #[error("no cipher selected on this context")]
    NoCipherSet,
    #[error("invalid key length {0}")]
    InvalidKeyLength(usize),
    #[error("invalid iv length {0}")]
    InvalidIvLength(usize),
    #[error("invalid tag length {0}")]
    InvalidTagLength(usize),
    #[error("operation not supported: {0}")]
    NotSupported(&'static str),
    #[error("call out of order: {0}")]
    OutOfOrder(&'static str),
    #[error("output buffer too small: need {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    #[error("message length {actual} differs from the declared length {declared}")]
    LengthMismatch { declared: usize, actual: usize },
    #[error("tag verification failed")]
    TagMismatch,
    #[error("native aead interface is not available")]
    NativeAeadUnavailable,
    #[error("internal backend failure")]
    Internal,
}

/// A cryptography library the dispatcher can drive.
///
/// Contexts are plain owned values; the backend never shares one between calls.
pub trait Backend {
    /// Context of the one-shot AEAD interface (bound to algorithm, key and tag length)
    type AeadCtx;
    /// Context of the generic multi-call cipher interface
    type CipherCtx;

    /// Whether the library exposes a one-shot ChaCha20-Poly1305 AEAD entry point
    fn native_aead_available(&self) -> bool;

    fn library_version(&self) -> LibraryVersion;

    /// Whether `name` is present in the library's cipher name table
    fn cipher_registered(&self, name: &str) -> bool;

    /// Whether the library can provide SIV ciphers (CMAC based S2V)
    fn siv_available(&self) -> bool;

    fn fips_enabled(&self) -> bool;

    /// Whether `name` is one of the AEADs allowed in FIPS mode
    fn fips_approved(&self, name: &str) -> bool;

    /// Creates a one-shot AEAD context; `tag_len` of `None` selects the library default.
    fn aead_ctx_new(
        &self,
        algorithm: AeadAlgorithm,
        key: &[u8],
        tag_len: Option<usize>,
    ) -> Result<Self::AeadCtx, BackendError>;

    /// Tag length `ctx` was created with
    fn aead_tag_len(&self, ctx: &Self::AeadCtx) -> usize;

    /// Largest number of bytes sealing adds to the input
    fn aead_max_overhead(&self, algorithm: AeadAlgorithm) -> usize;

    /// Seals `input` into `out`, returning the number of bytes written
    fn aead_seal(
        &self,
        ctx: &Self::AeadCtx,
        out: &mut [u8],
        nonce: &[u8],
        input: &[u8],
        ad: &[u8],
    ) -> Result<usize, BackendError>;

    /// Opens `input` into `out`, returning the number of bytes written
    fn aead_open(
        &self,
        ctx: &Self::AeadCtx,
        out: &mut [u8],
        nonce: &[u8],
        input: &[u8],
        ad: &[u8],
    ) -> Result<usize, BackendError>;

    fn cipher_ctx_new(&self) -> Result<Self::CipherCtx, BackendError>;

    fn cipher_init(&self, ctx: &mut Self::CipherCtx, init: Init<'_>) -> Result<(), BackendError>;

    fn cipher_ctrl(&self, ctx: &mut Self::CipherCtx, ctrl: Ctrl<'_>) -> Result<(), BackendError>;

    /// Returns the number of output bytes written
    fn cipher_update(
        &self,
        ctx: &mut Self::CipherCtx,
        update: Update<'_>,
    ) -> Result<usize, BackendError>;

    /// Finalizes the operation; for decryption this is where most modes verify the tag.
    fn cipher_final(&self, ctx: &mut Self::CipherCtx, out: &mut [u8])
        -> Result<usize, BackendError>;

    /// Drains the error queue, oldest first
    fn consume_errors(&self) -> Vec<BackendError>;
}
