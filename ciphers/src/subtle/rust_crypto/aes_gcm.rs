//! AES-GCM as implemented in [RustCrypto](https://github.com/RustCrypto/AEADs/tree/master/aes-gcm).
//!
//! IVs of 8 to 128 bytes are supported; every length other than 12 bytes is hashed into the
//! initial counter block. Tags are always computed at full length; truncated tags of 12 to 16
//! bytes can be verified.

use aes_gcm::AesGcm;

use cryptaead_cipher_traits::BackendError;

use super::{open_detached, seal_detached};

/// Shortest IV this implementation accepts
pub const MIN_IV_LEN: usize = 8;
/// Longest IV this implementation accepts
pub const MAX_IV_LEN: usize = 128;
/// The full GCM tag length
pub const TAG_LEN: usize = 16;
/// Shortest truncated tag accepted on decryption
pub const MIN_TAG_LEN: usize = 12;

/// Binds `$alias` to the typenum constant for an IV of `$len` bytes, then evaluates `$body`
macro_rules! select_iv_len {
    ($len:expr, $alias:ident, $body:expr) => {
        select_len!(
            $len,
            $alias,
            [
                8 => U8, 9 => U9, 10 => U10, 11 => U11, 12 => U12, 13 => U13, 14 => U14,
                15 => U15, 16 => U16, 17 => U17, 18 => U18, 19 => U19, 20 => U20, 21 => U21,
                22 => U22, 23 => U23, 24 => U24, 25 => U25, 26 => U26, 27 => U27, 28 => U28,
                29 => U29, 30 => U30, 31 => U31, 32 => U32, 33 => U33, 34 => U34, 35 => U35,
                36 => U36, 37 => U37, 38 => U38, 39 => U39, 40 => U40, 41 => U41, 42 => U42,
                43 => U43, 44 => U44, 45 => U45, 46 => U46, 47 => U47, 48 => U48, 49 => U49,
                50 => U50, 51 => U51, 52 => U52, 53 => U53, 54 => U54, 55 => U55, 56 => U56,
                57 => U57, 58 => U58, 59 => U59, 60 => U60, 61 => U61, 62 => U62, 63 => U63,
                64 => U64, 65 => U65, 66 => U66, 67 => U67, 68 => U68, 69 => U69, 70 => U70,
                71 => U71, 72 => U72, 73 => U73, 74 => U74, 75 => U75, 76 => U76, 77 => U77,
                78 => U78, 79 => U79, 80 => U80, 81 => U81, 82 => U82, 83 => U83, 84 => U84,
                85 => U85, 86 => U86, 87 => U87, 88 => U88, 89 => U89, 90 => U90, 91 => U91,
                92 => U92, 93 => U93, 94 => U94, 95 => U95, 96 => U96, 97 => U97, 98 => U98,
                99 => U99, 100 => U100, 101 => U101, 102 => U102, 103 => U103, 104 => U104,
                105 => U105, 106 => U106, 107 => U107, 108 => U108, 109 => U109, 110 => U110,
                111 => U111, 112 => U112, 113 => U113, 114 => U114, 115 => U115, 116 => U116,
                117 => U117, 118 => U118, 119 => U119, 120 => U120, 121 => U121, 122 => U122,
                123 => U123, 124 => U124, 125 => U125, 126 => U126, 127 => U127, 128 => U128,
            ],
            BackendError::InvalidIvLength,
            $body
        )
    };
}

pub fn seal(key: &[u8], iv: &[u8], ad: &[u8], buffer: &mut [u8]) -> Result<Vec<u8>, BackendError> {
    select_aes!(key.len(), Aes, {
        select_iv_len!(iv.len(), N, {
            seal_detached::<AesGcm<Aes, N>>(key, iv, ad, buffer)
        })
    })
}

pub fn open(
    key: &[u8],
    iv: &[u8],
    ad: &[u8],
    buffer: &mut [u8],
    tag: &[u8],
) -> Result<(), BackendError> {
    select_aes!(key.len(), Aes, {
        select_iv_len!(iv.len(), N, {
            select_len!(
                tag.len(),
                T,
                [12 => U12, 13 => U13, 14 => U14, 15 => U15, 16 => U16],
                BackendError::InvalidTagLength,
                { open_detached::<AesGcm<Aes, N, T>>(key, iv, ad, buffer, tag) }
            )
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // Test cases 13 and 14 from the GCM paper (AES-256, all-zero key and IV)
    #[test]
    fn aes256_zero_key_vectors() {
        let key = [0u8; 32];
        let iv = [0u8; 12];

        let tag = seal(&key, &iv, b"", &mut []).unwrap();
        assert_eq!(tag, hex!("530f8afbc74536b9a963b4f1c4cb738b"));

        let mut buffer = [0u8; 16];
        let tag = seal(&key, &iv, b"", &mut buffer).unwrap();
        assert_eq!(buffer, hex!("cea7403d4d606b6e074ec5d3baf39d18"));
        assert_eq!(tag, hex!("d0d1c8a799996bf0265b98b5d48ab919"));

        open(&key, &iv, b"", &mut buffer, &tag).unwrap();
        assert_eq!(buffer, [0u8; 16]);
    }

    #[test]
    fn truncated_tags_verify() {
        let key = [7u8; 16];
        let iv = [1u8; 8];
        let mut buffer = *b"truncate me";
        let tag = seal(&key, &iv, b"ad", &mut buffer).unwrap();

        for len in MIN_TAG_LEN..=TAG_LEN {
            let mut copy = buffer;
            open(&key, &iv, b"ad", &mut copy, &tag[..len]).unwrap();
            assert_eq!(&copy, b"truncate me");
        }

        let mut copy = buffer;
        assert_eq!(
            open(&key, &iv, b"ad", &mut copy, &tag[..8]),
            Err(BackendError::InvalidTagLength(8))
        );
    }

    #[test]
    fn unsupported_lengths() {
        assert_eq!(
            seal(&[0; 20], &[0; 12], b"", &mut []),
            Err(BackendError::InvalidKeyLength(20))
        );
        assert_eq!(
            seal(&[0; 16], &[0; 7], b"", &mut []),
            Err(BackendError::InvalidIvLength(7))
        );
        assert_eq!(
            seal(&[0; 16], &[0; 129], b"", &mut []),
            Err(BackendError::InvalidIvLength(129))
        );
    }

    #[test]
    fn long_and_odd_ivs() {
        let key = [9u8; 24];
        let mut sealed = Vec::new();
        for len in [MIN_IV_LEN, 13, 60, MAX_IV_LEN] {
            let iv = vec![3u8; len];
            let mut buffer = *b"any iv length";
            let tag = seal(&key, &iv, b"ad", &mut buffer).unwrap();
            sealed.push((buffer, tag.clone()));

            open(&key, &iv, b"ad", &mut buffer, &tag[..MIN_TAG_LEN]).unwrap();
            assert_eq!(&buffer, b"any iv length");
        }
        // hashed IVs give distinct counter blocks
        for (i, a) in sealed.iter().enumerate() {
            for b in &sealed[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
