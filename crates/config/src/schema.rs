//! Config schema types.

use {
    keyseal_cipher::{CipherOptions, KdfParams, cipher::DEFAULT_CONTEXT},
    serde::{Deserialize, Serialize},
};

/// Name of the environment variable read for the password by default.
pub const DEFAULT_PASSWORD_ENV: &str = "KEYSEAL_PASSWORD";

/// Root configuration (`keyseal.toml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeysealConfig {
    /// Argon2id cost parameters. Every party sharing a password must agree
    /// on these.
    pub kdf: KdfParams,
    /// Application label mixed into the key derivation.
    pub context: String,
    /// Environment variable holding the password.
    pub password_env: String,
}

impl Default for KeysealConfig {
    fn default() -> Self {
        Self {
            kdf: KdfParams::default(),
            context: DEFAULT_CONTEXT.to_string(),
            password_env: DEFAULT_PASSWORD_ENV.to_string(),
        }
    }
}

impl KeysealConfig {
    /// Options passed to [`keyseal_cipher::Cipher::with_options`].
    #[must_use]
    pub fn cipher_options(&self) -> CipherOptions {
        CipherOptions {
            kdf: self.kdf,
            context: self.context.clone(),
        }
    }
}
