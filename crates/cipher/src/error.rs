//! Cipher error types.

use std::path::PathBuf;

/// Errors produced by cipher operations.
///
/// Only [`CipherError::Io`] escapes the file-level operations; every other
/// variant describes a malformed or unauthenticated input and is surfaced by
/// the explicit `try_*` methods.
#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    /// The file to sign or verify could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key derivation failed (invalid Argon2 parameters or HKDF length).
    #[error("key derivation failed: {0}")]
    Kdf(String),

    /// Encryption or decryption failed (tampered data, wrong key).
    #[error("cipher error: {0}")]
    Aead(String),

    /// The opaque blob does not have the expected layout.
    #[error("malformed input: {0}")]
    Malformed(String),

    /// The leading version byte is not one this build understands.
    #[error("unsupported format version: {0:#04x}")]
    UnsupportedVersion(u8),

    /// Base64 decoding of an armored blob failed.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl CipherError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CipherError>;
