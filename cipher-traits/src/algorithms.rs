//! Identities and parameter constraints of the AEAD algorithms cryptaead can route.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use zeroize::Zeroizing;

pub mod aead_chacha20poly1305 {
    pub const KEY_LEN: usize = 32;
    pub const NONCE_LEN: usize = 12;
    pub const TAG_LEN: usize = 16;
}

pub mod aead_aes_gcm {
    pub const KEY_LENS: [usize; 3] = [16, 24, 32];
    pub const MIN_NONCE_LEN: usize = 8;
    pub const MAX_NONCE_LEN: usize = 128;
    pub const TAG_LEN: usize = 16;
}

pub mod aead_aes_ccm {
    pub const KEY_LENS: [usize; 3] = [16, 24, 32];
    pub const MIN_NONCE_LEN: usize = 7;
    pub const MAX_NONCE_LEN: usize = 13;
    pub const TAG_LENS: [usize; 7] = [4, 6, 8, 10, 12, 14, 16];
    pub const DEFAULT_TAG_LEN: usize = 16;
}

pub mod aead_aes_ocb3 {
    pub const KEY_LENS: [usize; 3] = [16, 24, 32];
    pub const MIN_NONCE_LEN: usize = 12;
    pub const MAX_NONCE_LEN: usize = 15;
    pub const TAG_LEN: usize = 16;
}

pub mod aead_aes_siv {
    /// SIV keys are two AES keys back to back (MAC key, then CTR key)
    pub const KEY_LENS: [usize; 3] = [32, 48, 64];
    pub const TAG_LEN: usize = 16;
    /// S2V can absorb at most 126 header vectors in addition to the plaintext
    pub const MAX_AD_CHUNKS: usize = 126;
}

/// Largest plaintext, ciphertext or associated data chunk accepted by the front end types.
pub const MAX_INPUT_LEN: usize = (1 << 31) - 1;

/// The closed set of AEAD algorithms known to cryptaead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AeadAlgorithm {
    ChaCha20Poly1305,
    AesGcm,
    AesCcm,
    AesOcb3,
    AesSiv,
}

impl AeadAlgorithm {
    pub const ALL: [AeadAlgorithm; 5] = [
        AeadAlgorithm::ChaCha20Poly1305,
        AeadAlgorithm::AesGcm,
        AeadAlgorithm::AesCcm,
        AeadAlgorithm::AesOcb3,
        AeadAlgorithm::AesSiv,
    ];

    /// Key lengths in bytes this algorithm can be keyed with
    pub fn key_lens(self) -> &'static [usize] {
        match self {
            Self::ChaCha20Poly1305 => &[aead_chacha20poly1305::KEY_LEN],
            Self::AesGcm => &aead_aes_gcm::KEY_LENS,
            Self::AesCcm => &aead_aes_ccm::KEY_LENS,
            Self::AesOcb3 => &aead_aes_ocb3::KEY_LENS,
            Self::AesSiv => &aead_aes_siv::KEY_LENS,
        }
    }

    /// Tag length used when the caller does not ask for a specific one
    pub fn default_tag_len(self) -> usize {
        match self {
            Self::ChaCha20Poly1305 => aead_chacha20poly1305::TAG_LEN,
            Self::AesGcm => aead_aes_gcm::TAG_LEN,
            Self::AesCcm => aead_aes_ccm::DEFAULT_TAG_LEN,
            Self::AesOcb3 => aead_aes_ocb3::TAG_LEN,
            Self::AesSiv => aead_aes_siv::TAG_LEN,
        }
    }

    /// Whether the tag precedes the ciphertext.
    ///
    /// RFC 5297 defines the SIV output as `IV || C`, where the synthetic IV is the tag. Every
    /// other algorithm here produces `C || tag`.
    pub fn tag_first(self) -> bool {
        matches!(self, Self::AesSiv)
    }

    /// OpenSSL-style cipher name for this algorithm under a key of `key_len` bytes.
    ///
    /// ```
    /// use cryptaead_cipher_traits::AeadAlgorithm;
    ///
    /// assert_eq!(AeadAlgorithm::AesGcm.cipher_name(32), "aes-256-gcm");
    /// assert_eq!(AeadAlgorithm::AesSiv.cipher_name(32), "aes-128-siv");
    /// assert_eq!(AeadAlgorithm::ChaCha20Poly1305.cipher_name(32), "chacha20-poly1305");
    /// ```
    pub fn cipher_name(self, key_len: usize) -> String {
        let bits = key_len * 8;
        match self {
            Self::ChaCha20Poly1305 => "chacha20-poly1305".to_owned(),
            Self::AesGcm => format!("aes-{bits}-gcm"),
            Self::AesCcm => format!("aes-{bits}-ccm"),
            Self::AesOcb3 => format!("aes-{bits}-ocb"),
            Self::AesSiv => format!("aes-{}-siv", bits / 2),
        }
    }

    /// Inverse of [Self::cipher_name]; yields the algorithm and its key length in bytes.
    pub fn from_cipher_name(name: &str) -> Option<(Self, usize)> {
        if name == "chacha20-poly1305" {
            return Some((Self::ChaCha20Poly1305, aead_chacha20poly1305::KEY_LEN));
        }

        let rest = name.strip_prefix("aes-")?;
        let (bits, mode) = rest.split_once('-')?;
        let aes_key_len = match bits {
            "128" => 16,
            "192" => 24,
            "256" => 32,
            _ => return None,
        };

        match mode {
            "gcm" => Some((Self::AesGcm, aes_key_len)),
            "ccm" => Some((Self::AesCcm, aes_key_len)),
            "ocb" => Some((Self::AesOcb3, aes_key_len)),
            "siv" => Some((Self::AesSiv, aes_key_len * 2)),
            _ => None,
        }
    }

    /// Every cipher name the algorithm family can be registered under
    pub fn cipher_names(self) -> impl Iterator<Item = String> {
        self.key_lens()
            .iter()
            .map(move |&key_len| self.cipher_name(key_len))
    }
}

impl fmt::Display for AeadAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ChaCha20Poly1305 => "chacha20-poly1305",
            Self::AesGcm => "aes-gcm",
            Self::AesCcm => "aes-ccm",
            Self::AesOcb3 => "aes-ocb3",
            Self::AesSiv => "aes-siv",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown aead algorithm `{0}`")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for AeadAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownAlgorithm(s.to_owned()))
    }
}

/// Direction of a cipher operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Encrypt,
    Decrypt,
}

/// An algorithm bound to its key, plus the tag length declared at construction for the
/// algorithms that carry one (AES-CCM).
///
/// The key is zeroized on drop.
#[derive(Clone)]
pub struct CipherSpec {
    algorithm: AeadAlgorithm,
    key: Zeroizing<Vec<u8>>,
    tag_len: Option<usize>,
}

impl CipherSpec {
    pub fn new(algorithm: AeadAlgorithm, key: &[u8]) -> Self {
        Self {
            algorithm,
            key: Zeroizing::new(key.to_vec()),
            tag_len: None,
        }
    }

    pub fn with_tag_len(mut self, tag_len: usize) -> Self {
        self.tag_len = Some(tag_len);
        self
    }

    pub fn algorithm(&self) -> AeadAlgorithm {
        self.algorithm
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The declared tag length, falling back to the algorithm default
    pub fn tag_len(&self) -> usize {
        self.tag_len.unwrap_or(self.algorithm.default_tag_len())
    }

    pub fn cipher_name(&self) -> String {
        self.algorithm.cipher_name(self.key.len())
    }
}

impl fmt::Debug for CipherSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherSpec")
            .field("algorithm", &self.algorithm)
            .field("key", &"<redacted>")
            .field("tag_len", &self.tag_len)
            .finish()
    }
}

/// Version of the cryptography library behind a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LibraryVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl LibraryVersion {
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid library version `{0}`, expected MAJOR.MINOR.PATCH")]
pub struct InvalidLibraryVersion(pub String);

impl FromStr for LibraryVersion {
    type Err = InvalidLibraryVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidLibraryVersion(s.to_owned());
        let mut parts = s.trim().split('.');
        let mut next = || -> Result<u16, Self::Err> {
            parts.next().ok_or_else(err)?.parse().map_err(|_| err())
        };
        let version = Self::new(next()?, next()?, next()?);
        match parts.next() {
            None => Ok(version),
            Some(_) => Err(err()),
        }
    }
}
