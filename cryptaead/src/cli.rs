//! Command line interface of the `cryptaead` binary.
//!
//! [CliArgs::run] does the work; the main function only sets up logging and reports errors.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, ensure, Context};
use clap::{Args, Parser, Subcommand};
use log::{debug, LevelFilter};

use cryptaead_cipher_traits::{aead_aes_ccm, AeadAlgorithm, CipherSpec};
use cryptaead_ciphers::{BackendProfile, SoftwareBackend};

use crate::algorithms::{AesCcm, AesGcm, AesOcb3, AesSiv, ChaCha20Poly1305};
use crate::dispatch::{aead_cipher_supported, native_aead_supported};

/// Encrypt and decrypt with AEAD ciphers through a software backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about, arg_required_else_help = true)]
pub struct CliArgs {
    /// Lowest log level to show
    #[arg(long = "log-level", value_name = "LOG_LEVEL", group = "log-level")]
    log_level: Option<LevelFilter>,

    /// Show verbose log output – sets log level to "debug"
    #[arg(short, long, group = "log-level")]
    verbose: bool,

    /// Show no log output – sets log level to "error"
    #[arg(short, long, group = "log-level")]
    quiet: bool,

    /// Backend profile (TOML) describing what the backend supports
    #[arg(long, global = true, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// The subcommand to be invoked
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

/// represents a command specified via CLI
#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// List every cipher with its support status and dispatch path
    Capabilities,

    /// Print a fresh random key as hex
    Keygen {
        /// One of chacha20-poly1305, aes-gcm, aes-ccm, aes-ocb3, aes-siv
        algorithm: AeadAlgorithm,

        /// Key size in bits; defaults to the largest size the algorithm takes
        #[arg(long)]
        bits: Option<usize>,
    },

    /// Encrypt hex encoded data, print `ciphertext || tag` as hex
    Encrypt(SealArgs),

    /// Decrypt hex encoded data, print the plaintext as hex
    Decrypt(SealArgs),
}

#[derive(Args, Debug)]
pub struct SealArgs {
    /// One of chacha20-poly1305, aes-gcm, aes-ccm, aes-ocb3, aes-siv
    pub algorithm: AeadAlgorithm,

    /// Key as hex
    #[arg(long)]
    pub key: String,

    /// Nonce as hex; aes-siv takes none
    #[arg(long, default_value = "")]
    pub nonce: String,

    /// Associated data as hex; may be repeated for aes-siv
    #[arg(long = "ad")]
    pub ad: Vec<String>,

    /// Tag length in bytes (aes-ccm only)
    #[arg(long)]
    pub tag_length: Option<usize>,

    /// Data as hex
    pub data: String,
}

impl CliArgs {
    /// returns the log level filter set by CLI args
    /// returns `None` if the user did not specify any log level filter via CLI
    pub fn get_log_level(&self) -> Option<LevelFilter> {
        if self.verbose {
            return Some(LevelFilter::Debug);
        }
        if self.quiet {
            return Some(LevelFilter::Error);
        }
        self.log_level
    }

    pub fn run<W: Write>(self, out: &mut W) -> anyhow::Result<()> {
        let profile = match &self.profile {
            Some(path) => BackendProfile::load(path)?,
            None => BackendProfile::default(),
        };
        debug!("backend profile: {profile:?}");
        let backend = SoftwareBackend::new(profile);

        match self.command {
            Some(CliCommand::Capabilities) => capabilities(&backend, out),
            Some(CliCommand::Keygen { algorithm, bits }) => {
                let bits = bits.unwrap_or_else(|| largest_key_bits(algorithm));
                let key = match algorithm {
                    AeadAlgorithm::ChaCha20Poly1305 => {
                        ensure!(bits == 256, "chacha20-poly1305 only has 256 bit keys");
                        ChaCha20Poly1305::<SoftwareBackend>::generate_key()
                    }
                    AeadAlgorithm::AesGcm => AesGcm::<SoftwareBackend>::generate_key(bits)?,
                    AeadAlgorithm::AesCcm => AesCcm::<SoftwareBackend>::generate_key(bits)?,
                    AeadAlgorithm::AesOcb3 => AesOcb3::<SoftwareBackend>::generate_key(bits)?,
                    AeadAlgorithm::AesSiv => AesSiv::<SoftwareBackend>::generate_key(bits)?,
                };
                writeln!(out, "{}", hex::encode(key.as_slice()))?;
                Ok(())
            }
            Some(CliCommand::Encrypt(args)) => {
                let sealed = args.apply(&backend, true)?;
                writeln!(out, "{}", hex::encode(sealed))?;
                Ok(())
            }
            Some(CliCommand::Decrypt(args)) => {
                let opened = args.apply(&backend, false)?;
                writeln!(out, "{}", hex::encode(opened))?;
                Ok(())
            }
            None => Ok(()), // clap prints help if no command is given
        }
    }
}

fn largest_key_bits(algorithm: AeadAlgorithm) -> usize {
    algorithm.key_lens().iter().max().copied().unwrap_or(0) * 8
}

fn capabilities<W: Write>(backend: &SoftwareBackend, out: &mut W) -> anyhow::Result<()> {
    let profile = backend.profile();
    writeln!(
        out,
        "library version {}, native aead {}, siv {}, fips {}",
        profile.library_version,
        on_off(profile.native_aead),
        on_off(profile.siv),
        on_off(profile.fips),
    )?;

    for algorithm in AeadAlgorithm::ALL {
        for &key_len in algorithm.key_lens() {
            let cipher = CipherSpec::new(algorithm, &vec![0u8; key_len]);
            let status = if native_aead_supported(backend, &cipher) {
                "supported (one-shot)"
            } else if aead_cipher_supported(backend, &cipher) {
                "supported (cipher context)"
            } else {
                "unsupported"
            };
            writeln!(out, "{:<20} {status}", cipher.cipher_name())?;
        }
    }
    Ok(())
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn decode_hex(what: &str, s: &str) -> anyhow::Result<Vec<u8>> {
    hex::decode(s).with_context(|| format!("{what} is not valid hex"))
}

/// All algorithms but aes-siv authenticate a single associated data string
fn single_chunk<'a>(ad: &[&'a [u8]]) -> anyhow::Result<Option<&'a [u8]>> {
    match ad {
        [] => Ok(None),
        [chunk] => Ok(Some(*chunk)),
        _ => bail!("only aes-siv takes more than one associated data chunk"),
    }
}

impl SealArgs {
    fn apply(&self, backend: &SoftwareBackend, encrypt: bool) -> anyhow::Result<Vec<u8>> {
        let key = zeroize::Zeroizing::new(decode_hex("key", &self.key)?);
        let nonce = decode_hex("nonce", &self.nonce)?;
        let data = decode_hex("data", &self.data)?;
        let ad = self
            .ad
            .iter()
            .map(|chunk| decode_hex("associated data", chunk))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let ad: Vec<&[u8]> = ad.iter().map(Vec::as_slice).collect();

        if self.algorithm != AeadAlgorithm::AesCcm && self.tag_length.is_some() {
            bail!("--tag-length only applies to aes-ccm");
        }

        let res = match self.algorithm {
            AeadAlgorithm::AesSiv => {
                ensure!(nonce.is_empty(), "aes-siv takes no nonce, pass it as the last --ad");
                let aead = AesSiv::new(backend, &key)?;
                let ad = Some(ad.as_slice());
                if encrypt {
                    aead.encrypt(&data, ad)
                } else {
                    aead.decrypt(&data, ad)
                }
            }
            AeadAlgorithm::ChaCha20Poly1305 => {
                let aead = ChaCha20Poly1305::new(backend, &key)?;
                let ad = single_chunk(&ad)?;
                if encrypt {
                    aead.encrypt(&nonce, &data, ad)
                } else {
                    aead.decrypt(&nonce, &data, ad)
                }
            }
            AeadAlgorithm::AesGcm => {
                let aead = AesGcm::new(backend, &key)?;
                let ad = single_chunk(&ad)?;
                if encrypt {
                    aead.encrypt(&nonce, &data, ad)
                } else {
                    aead.decrypt(&nonce, &data, ad)
                }
            }
            AeadAlgorithm::AesCcm => {
                let tag_len = self.tag_length.unwrap_or(aead_aes_ccm::DEFAULT_TAG_LEN);
                let aead = AesCcm::with_tag_length(backend, &key, tag_len)?;
                let ad = single_chunk(&ad)?;
                if encrypt {
                    aead.encrypt(&nonce, &data, ad)
                } else {
                    aead.decrypt(&nonce, &data, ad)
                }
            }
            AeadAlgorithm::AesOcb3 => {
                let aead = AesOcb3::new(backend, &key)?;
                let ad = single_chunk(&ad)?;
                if encrypt {
                    aead.encrypt(&nonce, &data, ad)
                } else {
                    aead.decrypt(&nonce, &data, ad)
                }
            }
        };
        Ok(res?)
    }
}
