use hex_literal::hex;

use cryptaead::{
    decrypt, encrypt, AeadAlgorithm, AeadError, AesCcm, AesGcm, AesOcb3, AesSiv,
    ChaCha20Poly1305, CipherSpec,
};
use cryptaead_ciphers::{BackendProfile, SoftwareBackend};

/// Cipher, nonce length and tag length for every algorithm and key size
fn all_ciphers() -> Vec<(CipherSpec, usize, usize)> {
    let mut ciphers = Vec::new();
    for algorithm in AeadAlgorithm::ALL {
        for &key_len in algorithm.key_lens() {
            let key: Vec<u8> = (0..key_len as u8).collect();
            let nonce_len = match algorithm {
                AeadAlgorithm::ChaCha20Poly1305 | AeadAlgorithm::AesGcm => 12,
                AeadAlgorithm::AesCcm => 13,
                AeadAlgorithm::AesOcb3 => 15,
                AeadAlgorithm::AesSiv => 0,
            };
            ciphers.push((
                CipherSpec::new(algorithm, &key),
                nonce_len,
                algorithm.default_tag_len(),
            ));
        }
    }
    ciphers
}

#[test]
fn round_trip_every_cipher() {
    let backend = SoftwareBackend::default();
    let ad: &[&[u8]] = &[b"first", b"", b"third"];

    for (cipher, nonce_len, tag_len) in all_ciphers() {
        let nonce = vec![0x42; nonce_len];
        for len in [1, 15, 16, 17, 100] {
            let data = vec![0x17; len];
            let sealed = encrypt(&backend, &cipher, &nonce, &data, ad, tag_len, None).unwrap();
            assert_eq!(sealed.len(), len + tag_len, "{}", cipher.cipher_name());
            let opened = decrypt(&backend, &cipher, &nonce, &sealed, ad, tag_len, None).unwrap();
            assert_eq!(opened, data, "{}", cipher.cipher_name());
        }
    }
}

#[test]
fn tampering_is_detected() {
    let backend = SoftwareBackend::default();
    let data = b"the quick brown fox";

    for (cipher, nonce_len, tag_len) in all_ciphers() {
        let nonce = vec![7; nonce_len];
        let sealed = encrypt(&backend, &cipher, &nonce, data, &[b"ad"], tag_len, None).unwrap();

        for i in 0..sealed.len() {
            let mut tampered = sealed.clone();
            tampered[i] ^= 0x01;
            let res = decrypt(&backend, &cipher, &nonce, &tampered, &[b"ad"], tag_len, None);
            assert!(
                matches!(res, Err(AeadError::AuthenticationFailed)),
                "{} byte {i}",
                cipher.cipher_name()
            );
        }

        let res = decrypt(&backend, &cipher, &nonce, &sealed, &[b"aD"], tag_len, None);
        assert!(matches!(res, Err(AeadError::AuthenticationFailed)));
        // a failed operation leaves nothing behind on the error queue
        assert!(cryptaead::Backend::consume_errors(&backend).is_empty());
    }
}

#[test]
fn gcm_empty_plaintext_is_just_the_tag() {
    let backend = SoftwareBackend::default();
    let aead = AesGcm::new(&backend, &[0; 32]).unwrap();
    let nonce = [0; 12];

    // NIST GCM test case 13
    let sealed = aead.encrypt(&nonce, b"", None).unwrap();
    assert_eq!(sealed.len(), 16);
    assert_eq!(sealed, hex!("530f8afbc74536b9a963b4f1c4cb738b"));
    assert_eq!(aead.decrypt(&nonce, &sealed, None).unwrap(), b"");
}

#[test]
fn gcm_known_answer() {
    let backend = SoftwareBackend::default();
    let aead = AesGcm::new(&backend, &[0; 32]).unwrap();

    // NIST GCM test case 14
    let sealed = aead.encrypt(&[0; 12], &[0; 16], None).unwrap();
    assert_eq!(
        sealed,
        [
            hex!("cea7403d4d606b6e074ec5d3baf39d18"),
            hex!("d0d1c8a799996bf0265b98b5d48ab919")
        ]
        .concat()
    );
}

#[test]
fn siv_places_the_tag_first() {
    let backend = SoftwareBackend::default();
    let aead = AesSiv::new(
        &backend,
        &hex!(
            "fffefdfc fbfaf9f8 f7f6f5f4 f3f2f1f0
             f0f1f2f3 f4f5f6f7 f8f9fafb fcfdfeff"
        ),
    )
    .unwrap();
    let ad = hex!("10111213 14151617 18191a1b 1c1d1e1f 20212223 24252627");
    let ad: &[&[u8]] = &[&ad];
    let plaintext = hex!("11223344 55667788 99aabbcc ddee");

    // RFC 5297, A.1
    let sealed = aead.encrypt(&plaintext, Some(ad)).unwrap();
    assert_eq!(sealed[..16], hex!("85632d07 c6e8f37f 950acd32 0a2ecc93"));
    assert_eq!(sealed[16..], hex!("40c02b96 90c4dc04 daef7f6a fe5c"));
    assert_eq!(aead.decrypt(&sealed, Some(ad)).unwrap(), plaintext);
}

#[test]
fn tag_position_per_algorithm() {
    let backend = SoftwareBackend::default();

    for (cipher, nonce_len, tag_len) in all_ciphers() {
        let nonce = vec![1; nonce_len];
        let data = b"some plaintext";
        let sealed = encrypt(&backend, &cipher, &nonce, data, &[], tag_len, None).unwrap();

        // moving the tag to the other end must break decryption
        let moved = if cipher.algorithm().tag_first() {
            let (tag, ct) = sealed.split_at(tag_len);
            [ct, tag].concat()
        } else {
            let (ct, tag) = sealed.split_at(sealed.len() - tag_len);
            [tag, ct].concat()
        };
        assert!(decrypt(&backend, &cipher, &nonce, &moved, &[], tag_len, None).is_err());
        assert_eq!(
            decrypt(&backend, &cipher, &nonce, &sealed, &[], tag_len, None).unwrap(),
            data
        );
    }
}

#[test]
fn siv_rejects_other_tag_lengths() {
    let backend = SoftwareBackend::default();
    let cipher = CipherSpec::new(AeadAlgorithm::AesSiv, &[0; 48]);

    for tag_len in [0, 12, 15, 17, 32] {
        assert!(matches!(
            encrypt(&backend, &cipher, &[], b"data", &[], tag_len, None),
            Err(AeadError::ContractViolation(_))
        ));
    }
}

#[test]
fn ccm_associated_data_chunking_does_not_matter() {
    let backend = SoftwareBackend::default();
    let aead_key = [9; 24];
    let cipher = CipherSpec::new(AeadAlgorithm::AesCcm, &aead_key);
    let nonce = [3; 13];
    let data = b"sixteen byte msg and then some";

    let chunked = encrypt(&backend, &cipher, &nonce, data, &[b"head", b"er"], 16, None).unwrap();
    let joined = encrypt(&backend, &cipher, &nonce, data, &[b"header"], 16, None).unwrap();
    assert_eq!(chunked, joined);

    assert_eq!(
        decrypt(&backend, &cipher, &nonce, &joined, &[b"he", b"ad", b"er"], 16, None).unwrap(),
        data
    );

    // the front end type agrees
    let aead = AesCcm::new(&backend, &aead_key).unwrap();
    assert_eq!(aead.encrypt(&nonce, data, Some(b"header".as_slice())).unwrap(), joined);
}

#[test]
fn ccm_truncated_tags() {
    let backend = SoftwareBackend::default();
    let nonce = [0; 7];

    for tag_len in [4, 6, 8, 10, 12, 14, 16] {
        let aead = AesCcm::with_tag_length(&backend, &[5; 16], tag_len).unwrap();
        let sealed = aead.encrypt(&nonce, b"payload", None).unwrap();
        assert_eq!(sealed.len(), 7 + tag_len);
        assert_eq!(aead.decrypt(&nonce, &sealed, None).unwrap(), b"payload");
    }
}

#[test]
fn ccm_rfc3610_packet_vector_1() {
    let backend = SoftwareBackend::default();
    let key = hex!("c0c1c2c3 c4c5c6c7 c8c9cacb cccdcecf");
    let nonce = hex!("00000003 020100a0 a1a2a3a4 a5");
    let ad = hex!("00010203 04050607");
    let plaintext = hex!("08090a0b 0c0d0e0f 10111213 14151617 18191a1b 1c1d1e");

    let aead = AesCcm::with_tag_length(&backend, &key, 8).unwrap();
    let sealed = aead.encrypt(&nonce, &plaintext, Some(ad.as_slice())).unwrap();
    assert_eq!(
        sealed,
        [
            &hex!("588c979a 61c663d2 f066d0c2 c0f98980 6d5f6b61 dac384")[..],
            &hex!("17e8d12c fdf926e0")[..]
        ]
        .concat()
    );
}

#[test]
fn ocb3_and_chacha_round_trip() {
    let backend = SoftwareBackend::default();

    let ocb = AesOcb3::new(&backend, &[1; 32]).unwrap();
    for nonce_len in 12..=15 {
        let nonce = vec![2; nonce_len];
        let sealed = ocb.encrypt(&nonce, b"ocb", Some(b"ad".as_slice())).unwrap();
        assert_eq!(ocb.decrypt(&nonce, &sealed, Some(b"ad".as_slice())).unwrap(), b"ocb");
    }

    let key = ChaCha20Poly1305::<SoftwareBackend>::generate_key();
    let chacha = ChaCha20Poly1305::new(&backend, &key).unwrap();
    let sealed = chacha.encrypt(&[3; 12], b"chacha", None).unwrap();
    assert_eq!(sealed.len(), 6 + 16);
    assert_eq!(chacha.decrypt(&[3; 12], &sealed, None).unwrap(), b"chacha");
}

#[test]
fn native_and_generic_chacha_agree() {
    let native = SoftwareBackend::default();
    let generic = SoftwareBackend::new(BackendProfile {
        native_aead: false,
        ..BackendProfile::default()
    });
    let cipher = CipherSpec::new(AeadAlgorithm::ChaCha20Poly1305, &[0x5a; 32]);
    let nonce = [0xa5; 12];
    let ad: &[&[u8]] = &[b"associated", b" data"];

    for len in [0, 1, 64, 1000] {
        let data = vec![0xcc; len];
        let a = encrypt(&native, &cipher, &nonce, &data, ad, 16, None).unwrap();
        let b = encrypt(&generic, &cipher, &nonce, &data, ad, 16, None).unwrap();
        assert_eq!(a, b);

        assert_eq!(decrypt(&native, &cipher, &nonce, &b, ad, 16, None).unwrap(), data);
        assert_eq!(decrypt(&generic, &cipher, &nonce, &a, ad, 16, None).unwrap(), data);
    }
}

#[test]
fn decrypting_less_than_a_tag_fails() {
    let backend = SoftwareBackend::default();
    let gcm = AesGcm::new(&backend, &[0; 16]).unwrap();
    let chacha = ChaCha20Poly1305::new(&backend, &[0; 32]).unwrap();
    let siv = AesSiv::new(&backend, &[0; 32]).unwrap();

    assert!(matches!(
        gcm.decrypt(&[0; 12], &[0; 15], None),
        Err(AeadError::AuthenticationFailed)
    ));
    assert!(matches!(
        chacha.decrypt(&[0; 12], &[], None),
        Err(AeadError::AuthenticationFailed)
    ));
    assert!(matches!(
        siv.decrypt(&[0; 3], None),
        Err(AeadError::AuthenticationFailed)
    ));
}
