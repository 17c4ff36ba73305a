//! AEAD encryption and decryption on top of a cryptography library [Backend].
//!
//! Requests are dispatched either to the library's one-shot AEAD interface or to its generic
//! multi-call cipher contexts ([dispatch]). The algorithm types in [algorithms] validate
//! arguments and are the intended entry point:
//!
//! ```
//! use cryptaead::{AesGcm, AeadError};
//! use cryptaead_ciphers::SoftwareBackend;
//!
//! let backend = SoftwareBackend::default();
//! let key = AesGcm::<SoftwareBackend>::generate_key(256)?;
//! let aead = AesGcm::new(&backend, &key)?;
//!
//! let nonce = [0u8; 12];
//! let sealed = aead.encrypt(&nonce, b"attack at dawn", Some(b"header".as_slice()))?;
//! assert_eq!(aead.decrypt(&nonce, &sealed, Some(b"header".as_slice()))?, b"attack at dawn");
//! assert!(matches!(
//!     aead.decrypt(&nonce, &sealed, Some(b"footer".as_slice())),
//!     Err(AeadError::AuthenticationFailed)
//! ));
//! # Ok::<(), AeadError>(())
//! ```

pub mod algorithms;
pub mod cipher_ctx;
pub mod cli;
pub mod dispatch;
pub mod native;

pub use algorithms::{AesCcm, AesGcm, AesOcb3, AesSiv, ChaCha20Poly1305};
pub use cryptaead_cipher_traits::{
    AeadAlgorithm, AeadError, Backend, BackendError, CipherSpec, LibraryVersion, Operation,
};
pub use dispatch::{
    aead_cipher_supported, create_context, decrypt, encrypt, native_aead_supported, AeadContext,
};
