//! One-shot ChaCha20-Poly1305 from libcrux. Output layout is `ciphertext || tag`.

use cryptaead_cipher_traits::BackendError;

/// The key length is 32 bytes or 256 bits.
pub const KEY_LEN: usize = 32; // Grrrr! Libcrux, please provide me these constants.
/// The  MAC tag length is 16 bytes or 128 bits.
pub const TAG_LEN: usize = 16;
/// The nonce length is 12 bytes or 96 bits.
pub const NONCE_LEN: usize = 12;

/// Seals `plaintext` into the front of `out` and returns the number of bytes written
/// (`plaintext.len() + TAG_LEN`).
pub fn seal(
    key: &[u8; KEY_LEN],
    nonce: &[u8],
    ad: &[u8],
    plaintext: &[u8],
    out: &mut [u8],
) -> Result<usize, BackendError> {
    let nonce: &[u8; NONCE_LEN] = nonce
        .try_into()
        .map_err(|_| BackendError::InvalidIvLength(nonce.len()))?;

    let needed = plaintext.len() + TAG_LEN;
    if out.len() < needed {
        return Err(BackendError::BufferTooSmall {
            needed,
            got: out.len(),
        });
    }

    let ciphertext = &mut out[..needed];
    let (ctxt, tag) = libcrux_chacha20poly1305::encrypt(key, plaintext, ciphertext, ad, nonce)
        .map_err(|_| BackendError::Internal)?;

    // libcrux must have filled exactly the slice we handed it, or the caller would not know
    // where the tag ends
    if ctxt.len() + tag.len() != needed {
        return Err(BackendError::Internal);
    }

    Ok(needed)
}

/// Opens `ciphertext` (including its trailing tag) into the front of `out` and returns the
/// plaintext length.
pub fn open(
    key: &[u8; KEY_LEN],
    nonce: &[u8],
    ad: &[u8],
    ciphertext: &[u8],
    out: &mut [u8],
) -> Result<usize, BackendError> {
    let nonce: &[u8; NONCE_LEN] = nonce
        .try_into()
        .map_err(|_| BackendError::InvalidIvLength(nonce.len()))?;

    let len = ciphertext
        .len()
        .checked_sub(TAG_LEN)
        .ok_or(BackendError::TagMismatch)?;
    if out.len() < len {
        return Err(BackendError::BufferTooSmall {
            needed: len,
            got: out.len(),
        });
    }

    let ptxt = libcrux_chacha20poly1305::decrypt(key, &mut out[..len], ciphertext, ad, nonce)
        .map_err(|_| BackendError::TagMismatch)?;
    if ptxt.len() != len {
        return Err(BackendError::TagMismatch);
    }

    Ok(len)
}

/// The idea of these tests is to check that the above implementation behaves the same as the
/// RustCrypto one used by the generic cipher context.
#[cfg(test)]
mod equivalence_tests {
    use super::*;
    use crate::subtle::rust_crypto::chacha20poly1305_ietf as rust_crypto;
    use rand::RngCore;

    #[test]
    fn known_ciphertext() {
        let key = [0u8; KEY_LEN];
        let nonce = [0u8; NONCE_LEN];
        let ad = b"the encrypted message is very important";
        let plaintext = b"post-quantum cryptography is very important";

        let mut out = [0u8; 64];
        let len = seal(&key, &nonce, ad, plaintext, &mut out).unwrap();
        assert_eq!(&out[..len], rust_crypto::KNOWN_CIPHERTEXT);

        let mut decrypted = [0u8; 64];
        let len = open(&key, &nonce, ad, &rust_crypto::KNOWN_CIPHERTEXT, &mut decrypted).unwrap();
        assert_eq!(&decrypted[..len], plaintext);
    }

    #[test]
    fn fuzz_equivalence_libcrux_rustcrypto() {
        let ptxts: [&[u8]; 3] = [
            b"".as_slice(),
            b"test".as_slice(),
            b"abcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcd",
        ];
        let mut key = [0; KEY_LEN];
        let mut rng = rand::thread_rng();
        let nonce = [0; NONCE_LEN];
        let ad = b"";

        for ptxt in ptxts {
            for _ in 0..100 {
                rng.fill_bytes(&mut key);

                let mut native = vec![0u8; ptxt.len() + TAG_LEN];
                seal(&key, &nonce, ad, ptxt, &mut native).unwrap();

                let mut generic = ptxt.to_vec();
                let tag = rust_crypto::seal(&key, &nonce, ad, &mut generic).unwrap();
                generic.extend_from_slice(&tag);

                assert_eq!(native, generic);

                let mut decrypted = vec![0u8; ptxt.len()];
                open(&key, &nonce, ad, &native, &mut decrypted).unwrap();
                assert_eq!(decrypted, ptxt);
            }
        }
    }

    #[test]
    fn tampering_is_detected() {
        let key = [1u8; KEY_LEN];
        let nonce = [2u8; NONCE_LEN];
        let mut sealed = [0u8; 4 + TAG_LEN];
        seal(&key, &nonce, b"ad", b"data", &mut sealed).unwrap();

        let mut out = [0u8; 4];
        for i in 0..sealed.len() {
            let mut tampered = sealed;
            tampered[i] ^= 1;
            assert_eq!(
                open(&key, &nonce, b"ad", &tampered, &mut out),
                Err(BackendError::TagMismatch)
            );
        }
        assert_eq!(
            open(&key, &nonce, b"da", &sealed, &mut out),
            Err(BackendError::TagMismatch)
        );
        assert_eq!(
            open(&key, &nonce, b"ad", &sealed[..TAG_LEN - 1], &mut out),
            Err(BackendError::TagMismatch)
        );
    }
}
