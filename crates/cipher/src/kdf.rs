//! Argon2id master-key derivation and HKDF subkey expansion.

use {
    argon2::Argon2,
    hkdf::Hkdf,
    sha2::{Digest, Sha256},
    zeroize::Zeroizing,
};

use crate::error::{CipherError, Result};

/// Length of the per-operation random salt.
pub const SALT_LEN: usize = 16;

/// Argon2id parameters used to stretch the password into the master key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 64 MiB = 65536).
    pub m_cost: u32,
    /// Number of iterations (default: 3).
    pub t_cost: u32,
    /// Degree of parallelism (default: 1).
    pub p_cost: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            m_cost: 65536, // 64 MiB
            t_cost: 3,
            p_cost: 1,
        }
    }
}

impl KdfParams {
    /// Check the parameters against Argon2's accepted ranges.
    pub fn validate(&self) -> Result<()> {
        self.to_argon2().map(|_| ())
    }

    fn to_argon2(self) -> Result<argon2::Params> {
        argon2::Params::new(self.m_cost, self.t_cost, self.p_cost, Some(32))
            .map_err(|e| CipherError::Kdf(format!("invalid KDF params: {e}")))
    }
}

/// What a subkey is used for. Each purpose expands to an unrelated key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPurpose {
    Sign,
    Encrypt,
}

impl KeyPurpose {
    /// HKDF `info` label.
    pub fn label(self) -> &'static [u8] {
        match self {
            Self::Sign => b"keyseal/sign/v1",
            Self::Encrypt => b"keyseal/encrypt/v1",
        }
    }
}

/// Derive a 256-bit key from a password and salt using Argon2id.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<Zeroizing<[u8; 32]>> {
    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params.to_argon2()?,
    );

    let mut output = Zeroizing::new([0u8; 32]);
    argon2
        .hash_password_into(password, salt, output.as_mut())
        .map_err(|e| CipherError::Kdf(format!("KDF failed: {e}")))?;

    Ok(output)
}

/// Fixed Argon2 salt for an application context label.
///
/// Hashing the label keeps the salt at a constant 32 bytes whatever the
/// label length, and keeps the Argon2 minimum salt length satisfied.
pub fn context_salt(context: &str) -> [u8; 32] {
    Sha256::digest(context.as_bytes()).into()
}

/// Expand the master key into a subkey bound to `salt` and `purpose`.
pub fn derive_subkey(
    master: &[u8; 32],
    salt: &[u8],
    purpose: KeyPurpose,
) -> Result<Zeroizing<[u8; 32]>> {
    let hkdf = Hkdf::<Sha256>::new(Some(salt), master);
    let mut okm = Zeroizing::new([0u8; 32]);
    hkdf.expand(purpose.label(), okm.as_mut())
        .map_err(|e| CipherError::Kdf(format!("HKDF expand failed: {e}")))?;
    Ok(okm)
}

/// Generate a random per-operation salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    use rand::RngCore;

    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
