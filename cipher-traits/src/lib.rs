//! Types shared between the cryptaead dispatcher and the backends it drives: algorithm
//! identities, the [Backend] trait and the error types.

pub mod aead;
pub mod algorithms;
pub mod backend;

pub use aead::Error as AeadError;
pub use algorithms::*;
pub use backend::{Backend, BackendError, Ctrl, Init, Update};
