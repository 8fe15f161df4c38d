//! AEAD trait for swappable authenticated encryption backends.

use crate::error::Result;

/// Trait for authenticated encryption with associated data (AEAD).
///
/// Implementations can be swapped without changing [`Cipher`](crate::Cipher).
/// Each implementation has a unique version tag stored as the first byte of
/// every sealed blob, so older payloads stay readable after a backend change.
pub trait Aead: Send + Sync {
    /// Unique identifier for this backend (stored as the first byte of the blob).
    fn version_tag(&self) -> u8;

    /// Encrypt `plaintext` with `key` and `aad` (additional authenticated data).
    ///
    /// Returns `[nonce || ciphertext || tag]`; the exact layout is
    /// backend-specific but must be parseable by [`decrypt`](Self::decrypt).
    fn encrypt(&self, key: &[u8; 32], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt a blob previously produced by [`encrypt`](Self::encrypt).
    fn decrypt(&self, key: &[u8; 32], ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>>;
}
