//! Primitive AEAD implementations the software backend builds on

pub mod libcrux;
pub mod rust_crypto;
