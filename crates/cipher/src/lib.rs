//! Password-derived signing and authenticated encryption for small files.
//!
//! A master key is derived once from the password via Argon2id. Every
//! signature and ciphertext carries a fresh random salt from which a
//! per-operation subkey is expanded with HKDF-SHA256, using distinct labels
//! for signing and encryption. Trait-based [`Aead`] design allows swapping the
//! encryption backend.
//!
//! ```rust,ignore
//! use keyseal_cipher::Cipher;
//!
//! let cipher = Cipher::new("IAmAStr0ngPassW0rd")?;
//! let sig = cipher.signature("license.txt")?;
//! assert!(cipher.verify_signature("license.txt", &sig)?);
//!
//! let sealed = cipher.encrypt(b"This is a test message.")?;
//! assert_eq!(cipher.decrypt(&sealed), b"This is a test message.");
//! ```

pub mod cipher;
pub mod envelope;
pub mod error;
pub mod kdf;
pub mod signing;
pub mod traits;
pub mod xchacha20;

pub use {
    cipher::{Cipher, CipherOptions, armor, dearmor},
    error::{CipherError, Result},
    kdf::KdfParams,
    traits::Aead,
    xchacha20::XChaCha20Poly1305Aead,
};
