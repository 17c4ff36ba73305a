use std::fmt;

use zeroize::Zeroizing;

use crate::subtle::libcrux::chacha20poly1305_ietf::KEY_LEN;

/// Context of the one-shot AEAD interface: a ChaCha20-Poly1305 key and the tag length it was
/// created with.
pub struct NativeAeadCtx {
    pub(crate) key: Zeroizing<[u8; KEY_LEN]>,
    pub(crate) tag_len: usize,
}

impl NativeAeadCtx {
    pub fn tag_len(&self) -> usize {
        self.tag_len
    }
}

impl fmt::Debug for NativeAeadCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeAeadCtx")
            .field("tag_len", &self.tag_len)
            .finish_non_exhaustive()
    }
}
