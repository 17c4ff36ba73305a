//! Capability profile of the software backend, readable from a TOML file.
//!
//! A profile decides what the backend claims to be: which library version it reports, whether it
//! offers the one-shot AEAD interface, which cipher names are registered, whether SIV is
//! available and whether FIPS mode is on. This allows exercising every branch of the
//! dispatcher's capability logic without linking different native libraries.
//!
//! ```toml
//! native_aead = false
//! library_version = "1.0.2"
//! ciphers = ["aes-128-gcm", "aes-256-gcm"]
//! siv = false
//! ```

use std::{fs, path::Path};

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use cryptaead_cipher_traits::{AeadAlgorithm, LibraryVersion};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendProfile {
    /// expose the one-shot ChaCha20-Poly1305 interface
    #[serde(default = "default_true")]
    pub native_aead: bool,

    /// version reported to capability checks, as `major.minor.patch`
    #[serde(default = "default_version", with = "version_string")]
    pub library_version: LibraryVersion,

    /// cipher names present in the name table
    #[serde(default = "default_ciphers")]
    pub ciphers: Vec<String>,

    /// provide CMAC based SIV
    #[serde(default = "default_true")]
    pub siv: bool,

    #[serde(default)]
    pub fips: bool,

    /// ciphers allowed while `fips` is set
    #[serde(default = "default_fips_ciphers")]
    pub fips_ciphers: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_version() -> LibraryVersion {
    LibraryVersion::new(3, 0, 0)
}

fn default_ciphers() -> Vec<String> {
    AeadAlgorithm::ALL
        .into_iter()
        .flat_map(AeadAlgorithm::cipher_names)
        .collect()
}

fn default_fips_ciphers() -> Vec<String> {
    [AeadAlgorithm::AesGcm, AeadAlgorithm::AesCcm]
        .into_iter()
        .flat_map(AeadAlgorithm::cipher_names)
        .collect()
}

mod version_string {
    use cryptaead_cipher_traits::LibraryVersion;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &LibraryVersion, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(v)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<LibraryVersion, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(D::Error::custom)
    }
}

impl Default for BackendProfile {
    fn default() -> Self {
        Self {
            native_aead: true,
            library_version: default_version(),
            ciphers: default_ciphers(),
            siv: true,
            fips: false,
            fips_ciphers: default_fips_ciphers(),
        }
    }
}

impl BackendProfile {
    /// Load a profile from a TOML file and validate it
    pub fn load<P: AsRef<Path>>(p: P) -> anyhow::Result<Self> {
        let p = p.as_ref();
        let text = fs::read_to_string(p)
            .with_context(|| format!("could not read backend profile {p:?}"))?;
        Self::from_toml(&text).with_context(|| format!("invalid backend profile {p:?}"))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let profile: Self = toml::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the profile to a file
    pub fn store<P: AsRef<Path>>(&self, p: P) -> anyhow::Result<()> {
        fs::write(p, self.to_toml()?)?;
        Ok(())
    }

    /// Check that every listed cipher name is one this backend can implement
    pub fn validate(&self) -> anyhow::Result<()> {
        for name in self.ciphers.iter().chain(self.fips_ciphers.iter()) {
            ensure!(
                AeadAlgorithm::from_cipher_name(name).is_some(),
                "unknown cipher name {name:?} in backend profile"
            );
        }
        Ok(())
    }

    /// A profile of an old library: no one-shot interface, no SIV, and no ChaCha20-Poly1305 in
    /// the name table
    pub fn legacy() -> Self {
        Self {
            native_aead: false,
            library_version: LibraryVersion::new(1, 0, 2),
            ciphers: [
                AeadAlgorithm::AesGcm,
                AeadAlgorithm::AesCcm,
                AeadAlgorithm::AesOcb3,
            ]
            .into_iter()
            .flat_map(AeadAlgorithm::cipher_names)
            .collect(),
            siv: false,
            ..Self::default()
        }
    }

    /// The default profile with FIPS mode switched on
    pub fn fips() -> Self {
        Self {
            fips: true,
            ..Self::default()
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.ciphers.iter().any(|c| c == name)
    }

    pub fn is_fips_approved(&self, name: &str) -> bool {
        self.fips_ciphers.iter().any(|c| c == name)
    }
}
