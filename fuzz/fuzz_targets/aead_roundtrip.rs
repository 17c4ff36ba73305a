#![no_main]
extern crate arbitrary;

use libfuzzer_sys::fuzz_target;

use cryptaead::{decrypt, encrypt, AeadAlgorithm, CipherSpec};
use cryptaead_ciphers::SoftwareBackend;

#[derive(arbitrary::Arbitrary, Debug)]
pub struct Input {
    pub algorithm: u8,
    pub key: [u8; 64],
    pub nonce: [u8; 16],
    pub ad: Vec<Vec<u8>>,
    pub plaintext: Box<[u8]>,
}

fuzz_target!(|input: Input| {
    let algorithm = AeadAlgorithm::ALL[input.algorithm as usize % AeadAlgorithm::ALL.len()];
    let key_len = algorithm.key_lens()[input.key[0] as usize % algorithm.key_lens().len()];
    let cipher = CipherSpec::new(algorithm, &input.key[..key_len]);
    let nonce = match algorithm {
        AeadAlgorithm::AesSiv => &[][..],
        AeadAlgorithm::AesCcm => &input.nonce[..13],
        _ => &input.nonce[..12],
    };
    let ad: Vec<&[u8]> = input.ad.iter().map(Vec::as_slice).collect();
    let tag_len = cipher.tag_len();

    let backend = SoftwareBackend::default();
    let Ok(sealed) = encrypt(&backend, &cipher, nonce, &input.plaintext, &ad, tag_len, None)
    else {
        return;
    };
    let opened = decrypt(&backend, &cipher, nonce, &sealed, &ad, tag_len, None).unwrap();
    assert_eq!(*opened, *input.plaintext);
});
