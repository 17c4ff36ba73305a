use cryptaead::{
    aead_cipher_supported, native_aead_supported, AeadAlgorithm, AeadError, AesGcm, AesOcb3,
    AesSiv, ChaCha20Poly1305, CipherSpec, LibraryVersion,
};
use cryptaead_ciphers::{BackendProfile, SoftwareBackend};

fn chacha() -> CipherSpec {
    CipherSpec::new(AeadAlgorithm::ChaCha20Poly1305, &[0; 32])
}

fn profile_without(names: &[&str]) -> BackendProfile {
    let mut profile = BackendProfile::default();
    profile.ciphers.retain(|c| !names.contains(&c.as_str()));
    profile
}

#[test]
fn native_path_is_chacha_only() {
    let backend = SoftwareBackend::default();
    assert!(native_aead_supported(&backend, &chacha()));
    for algorithm in AeadAlgorithm::ALL {
        let cipher = CipherSpec::new(algorithm, &vec![0; algorithm.key_lens()[0]]);
        assert_eq!(
            native_aead_supported(&backend, &cipher),
            algorithm == AeadAlgorithm::ChaCha20Poly1305
        );
        assert!(aead_cipher_supported(&backend, &cipher));
    }

    let backend = SoftwareBackend::new(BackendProfile::legacy());
    assert!(!native_aead_supported(&backend, &chacha()));
}

#[test]
fn chacha_needs_no_name_table_entry_on_new_libraries() {
    for (major, minor, patch, expected) in [
        (1, 0, 2, false),
        (1, 1, 0, true),
        (1, 1, 1, true),
        (3, 0, 0, true),
    ] {
        let backend = SoftwareBackend::new(BackendProfile {
            native_aead: false,
            library_version: LibraryVersion::new(major, minor, patch),
            ..profile_without(&["chacha20-poly1305"])
        });
        assert_eq!(
            aead_cipher_supported(&backend, &chacha()),
            expected,
            "{major}.{minor}.{patch}"
        );
    }

    // an old library that lists it
    let backend = SoftwareBackend::new(BackendProfile {
        native_aead: false,
        library_version: LibraryVersion::new(1, 0, 2),
        ..BackendProfile::default()
    });
    assert!(aead_cipher_supported(&backend, &chacha()));
}

#[test]
fn siv_needs_flag_and_name() {
    let siv = CipherSpec::new(AeadAlgorithm::AesSiv, &[0; 32]);

    let backend = SoftwareBackend::new(BackendProfile {
        siv: false,
        ..BackendProfile::default()
    });
    assert!(!aead_cipher_supported(&backend, &siv));

    let backend = SoftwareBackend::new(profile_without(&["aes-128-siv"]));
    assert!(!aead_cipher_supported(&backend, &siv));
    // other key sizes are still there
    assert!(aead_cipher_supported(
        &backend,
        &CipherSpec::new(AeadAlgorithm::AesSiv, &[0; 64])
    ));

    assert!(aead_cipher_supported(&SoftwareBackend::default(), &siv));
}

#[test]
fn other_ciphers_follow_the_name_table() {
    let backend = SoftwareBackend::new(profile_without(&["aes-192-ocb", "aes-128-gcm"]));
    let supported = |algorithm, key_len| {
        aead_cipher_supported(&backend, &CipherSpec::new(algorithm, &vec![0; key_len]))
    };

    assert!(!supported(AeadAlgorithm::AesOcb3, 24));
    assert!(supported(AeadAlgorithm::AesOcb3, 16));
    assert!(!supported(AeadAlgorithm::AesGcm, 16));
    assert!(supported(AeadAlgorithm::AesGcm, 32));
    assert!(supported(AeadAlgorithm::AesCcm, 16));
}

#[test]
fn fips_mode_restricts_the_generic_path() {
    let backend = SoftwareBackend::new(BackendProfile::fips());
    let supported = |algorithm, key_len| {
        aead_cipher_supported(&backend, &CipherSpec::new(algorithm, &vec![0; key_len]))
    };

    assert!(supported(AeadAlgorithm::AesGcm, 16));
    assert!(supported(AeadAlgorithm::AesCcm, 32));
    assert!(!supported(AeadAlgorithm::AesOcb3, 16));
    assert!(!supported(AeadAlgorithm::AesSiv, 32));
    // the one-shot interface is checked first
    assert!(supported(AeadAlgorithm::ChaCha20Poly1305, 32));

    let backend = SoftwareBackend::new(BackendProfile {
        native_aead: false,
        ..BackendProfile::fips()
    });
    assert!(!aead_cipher_supported(&backend, &chacha()));
}

#[test]
fn front_end_types_refuse_unsupported_ciphers() {
    let backend = SoftwareBackend::new(BackendProfile::legacy());
    assert!(matches!(
        ChaCha20Poly1305::new(&backend, &[0; 32]),
        Err(AeadError::Unsupported(_))
    ));
    assert!(matches!(
        AesSiv::new(&backend, &[0; 32]),
        Err(AeadError::Unsupported(_))
    ));
    assert!(AesGcm::new(&backend, &[0; 16]).is_ok());

    let backend = SoftwareBackend::new(BackendProfile::fips());
    assert!(matches!(
        AesOcb3::new(&backend, &[0; 16]),
        Err(AeadError::Unsupported(_))
    ));
}

#[test]
fn profile_from_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("profile.toml");
    std::fs::write(
        &path,
        r#"
native_aead = false
library_version = "1.1.0"
ciphers = ["aes-256-gcm"]
siv = false
"#,
    )?;

    let backend = SoftwareBackend::new(BackendProfile::load(&path)?);
    assert!(aead_cipher_supported(&backend, &chacha()));
    assert!(!aead_cipher_supported(
        &backend,
        &CipherSpec::new(AeadAlgorithm::AesGcm, &[0; 16])
    ));
    assert!(aead_cipher_supported(
        &backend,
        &CipherSpec::new(AeadAlgorithm::AesGcm, &[0; 32])
    ));
    Ok(())
}
