use proptest::prelude::*;

use cryptaead::{decrypt, encrypt, AeadAlgorithm, AeadError, CipherSpec};
use cryptaead_ciphers::SoftwareBackend;

fn algorithm() -> impl Strategy<Value = AeadAlgorithm> {
    prop::sample::select(AeadAlgorithm::ALL.to_vec())
}

fn nonce_len(algorithm: AeadAlgorithm) -> usize {
    match algorithm {
        AeadAlgorithm::ChaCha20Poly1305 | AeadAlgorithm::AesGcm => 12,
        AeadAlgorithm::AesCcm => 11,
        AeadAlgorithm::AesOcb3 => 14,
        AeadAlgorithm::AesSiv => 0,
    }
}

proptest! {
    #[test]
    fn sealed_data_opens(
        algorithm in algorithm(),
        key_seed in any::<u8>(),
        data in prop::collection::vec(any::<u8>(), 1..300),
        ad in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..40), 0..4),
    ) {
        let backend = SoftwareBackend::default();
        let key = vec![key_seed; algorithm.key_lens()[0]];
        let cipher = CipherSpec::new(algorithm, &key);
        let tag_len = cipher.tag_len();
        let nonce = vec![key_seed ^ 0xff; nonce_len(algorithm)];
        let ad: Vec<&[u8]> = ad.iter().map(Vec::as_slice).collect();

        let sealed = encrypt(&backend, &cipher, &nonce, &data, &ad, tag_len, None).unwrap();
        prop_assert_eq!(sealed.len(), data.len() + tag_len);
        let opened = decrypt(&backend, &cipher, &nonce, &sealed, &ad, tag_len, None).unwrap();
        prop_assert_eq!(opened, data);
    }

    #[test]
    fn truncated_ciphertext_is_rejected(
        algorithm in algorithm(),
        data in prop::collection::vec(any::<u8>(), 1..64),
        cut in 1usize..64,
    ) {
        let backend = SoftwareBackend::default();
        let cipher = CipherSpec::new(algorithm, &vec![3; algorithm.key_lens()[0]]);
        let tag_len = cipher.tag_len();
        let nonce = vec![0; nonce_len(algorithm)];

        let sealed = encrypt(&backend, &cipher, &nonce, &data, &[], tag_len, None).unwrap();
        let cut = cut.min(sealed.len());
        let res = decrypt(&backend, &cipher, &nonce, &sealed[..sealed.len() - cut], &[], tag_len, None);
        prop_assert!(matches!(res, Err(AeadError::AuthenticationFailed)));
    }

    #[test]
    fn ccm_associated_data_split_is_invisible(
        ad in prop::collection::vec(any::<u8>(), 0..100),
        at in any::<prop::sample::Index>(),
        data in prop::collection::vec(any::<u8>(), 0..100),
    ) {
        let backend = SoftwareBackend::default();
        let cipher = CipherSpec::new(AeadAlgorithm::AesCcm, &[8; 32]).with_tag_len(10);
        let nonce = [1; 12];
        let (head, tail) = ad.split_at(at.index(ad.len() + 1));

        let joined = encrypt(&backend, &cipher, &nonce, &data, &[ad.as_slice()], 10, None).unwrap();
        let chunked = encrypt(&backend, &cipher, &nonce, &data, &[head, tail], 10, None).unwrap();
        prop_assert_eq!(&joined, &chunked);

        // only the concatenation is authenticated
        let swapped = decrypt(&backend, &cipher, &nonce, &joined, &[tail, head], 10, None);
        prop_assert_eq!(swapped.is_ok(), [tail, head].concat() == ad);
    }
}
