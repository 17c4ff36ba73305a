#![no_main]
extern crate arbitrary;

use libfuzzer_sys::fuzz_target;

use cryptaead::{decrypt, AeadAlgorithm, CipherSpec};
use cryptaead_ciphers::SoftwareBackend;

#[derive(arbitrary::Arbitrary, Debug)]
pub struct Input {
    pub algorithm: u8,
    pub key: [u8; 64],
    pub nonce: Vec<u8>,
    pub tag_len: u8,
    pub ad: Vec<Vec<u8>>,
    pub ciphertext: Box<[u8]>,
}

// Arbitrary input must be rejected with an error, never a panic
fuzz_target!(|input: Input| {
    let algorithm = AeadAlgorithm::ALL[input.algorithm as usize % AeadAlgorithm::ALL.len()];
    let key_len = algorithm.key_lens()[input.key[0] as usize % algorithm.key_lens().len()];
    let cipher = CipherSpec::new(algorithm, &input.key[..key_len]);
    let ad: Vec<&[u8]> = input.ad.iter().map(Vec::as_slice).collect();

    let backend = SoftwareBackend::default();
    let _ = decrypt(
        &backend,
        &cipher,
        &input.nonce,
        &input.ciphertext,
        &ad,
        input.tag_len as usize,
        None,
    );
});
