use thiserror::Error;

use crate::backend::BackendError;

/// The error returned by AEAD operations
#[derive(Debug, Error)]
pub enum Error {
    /// The tag did not verify, the input was too short to contain one, or the backend failed
    /// while processing message data. The backend error queue has been cleared.
    #[error("invalid tag")]
    AuthenticationFailed,

    /// The backend failed while setting up a context. Passed through untranslated.
    #[error("backend failure: {0}")]
    Backend(#[from] BackendError),

    /// The caller broke an API contract, e.g. decrypting without a tag. Indicates a bug in the
    /// calling code.
    #[error("contract violation: {0}")]
    ContractViolation(&'static str),

    /// A key, nonce, tag length or other parameter has the wrong shape.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The backend cannot provide the requested algorithm.
    #[error("unsupported algorithm: {0}")]
    Unsupported(String),

    /// Data or associated data exceeds the maximum input length.
    #[error("data or associated data too long, max length is 2^31 - 1 bytes")]
    Overflow,
}
