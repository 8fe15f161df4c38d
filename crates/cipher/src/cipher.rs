//! The password-keyed [`Cipher`]: sign/verify files, encrypt/decrypt payloads.

use std::path::Path;

use {base64::Engine, zeroize::Zeroizing};

use crate::{
    envelope::{self, SIGNATURE_VERSION, SealedParts, SignatureParts},
    error::{CipherError, Result},
    kdf::{self, KdfParams, KeyPurpose},
    signing,
    traits::Aead,
    xchacha20::XChaCha20Poly1305Aead,
};

/// Default application context mixed into the Argon2 salt.
pub const DEFAULT_CONTEXT: &str = "keyseal/v1";

/// Settings that, together with the password, fully determine the master key.
///
/// Two instances only interoperate when both the password and these options
/// match.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CipherOptions {
    pub kdf: KdfParams,
    /// Application label hashed into the fixed Argon2 salt.
    pub context: String,
}

impl Default for CipherOptions {
    fn default() -> Self {
        Self {
            kdf: KdfParams::default(),
            context: DEFAULT_CONTEXT.to_string(),
        }
    }
}

/// Password-derived signing and authenticated encryption.
///
/// Generic over [`Aead`] but defaults to [`XChaCha20Poly1305Aead`]. The
/// password is stretched once at construction; the resulting master key is
/// read-only afterwards, so a `Cipher` can be shared across threads.
pub struct Cipher<A: Aead = XChaCha20Poly1305Aead> {
    aead: A,
    master: Zeroizing<[u8; 32]>,
    has_password: bool,
}

impl Cipher<XChaCha20Poly1305Aead> {
    /// Create a cipher with default options and the XChaCha20-Poly1305 backend.
    ///
    /// An empty password is accepted. The resulting instance works but does
    /// not interoperate with any instance built from a non-empty password.
    pub fn new(password: &str) -> Result<Self> {
        Self::with_options(password, &CipherOptions::default())
    }

    /// Create a cipher with custom KDF options.
    pub fn with_options(password: &str, options: &CipherOptions) -> Result<Self> {
        Self::with_aead(password, options, XChaCha20Poly1305Aead)
    }
}

impl<A: Aead> Cipher<A> {
    /// Create a cipher with a custom AEAD backend.
    pub fn with_aead(password: &str, options: &CipherOptions, aead: A) -> Result<Self> {
        let has_password = !password.is_empty();
        #[cfg(feature = "tracing")]
        if !has_password {
            tracing::warn!("cipher constructed with an empty password");
        }

        let salt = kdf::context_salt(&options.context);
        let master = kdf::derive_key(password.as_bytes(), &salt, &options.kdf)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            m_cost = options.kdf.m_cost,
            t_cost = options.kdf.t_cost,
            p_cost = options.kdf.p_cost,
            aead_version = aead.version_tag(),
            "derived master key"
        );

        Ok(Self {
            aead,
            master,
            has_password,
        })
    }

    /// Whether this instance was built from a non-empty password.
    pub fn has_password(&self) -> bool {
        self.has_password
    }

    /// Sign the full contents of the file at `path`.
    ///
    /// A read failure is returned as [`CipherError::Io`], never as an empty
    /// signature.
    pub fn signature(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let contents = read_file(path.as_ref())?;
        self.sign_bytes(&contents)
    }

    /// Check `signature` against the current contents of the file at `path`.
    ///
    /// Returns `Ok(false)` for any mismatch: changed contents, a signature
    /// made under another password, or a malformed signature. Only a read
    /// failure is an error.
    pub fn verify_signature(&self, path: impl AsRef<Path>, signature: &[u8]) -> Result<bool> {
        let path = path.as_ref();
        let contents = read_file(path)?;
        let valid = self.verify_bytes(&contents, signature);

        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), valid, "verified signature");

        Ok(valid)
    }

    /// Sign an in-memory byte slice.
    pub fn sign_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        let salt = kdf::generate_salt();
        let key = kdf::derive_subkey(&self.master, &salt, KeyPurpose::Sign)?;
        let tag = signing::compute_tag(&key, SIGNATURE_VERSION, data)?;

        Ok(SignatureParts {
            version: SIGNATURE_VERSION,
            salt,
            tag,
        }
        .encode())
    }

    /// Check a signature over an in-memory byte slice.
    pub fn verify_bytes(&self, data: &[u8], signature: &[u8]) -> bool {
        let parts = match SignatureParts::parse(signature) {
            Ok(parts) => parts,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_e, "rejecting unparseable signature");
                return false;
            },
        };

        match kdf::derive_subkey(&self.master, &parts.salt, KeyPurpose::Sign) {
            Ok(key) => signing::verify_tag(&key, parts.version, data, &parts.tag),
            Err(_) => false,
        }
    }

    /// Encrypt `plaintext` into an opaque sealed blob.
    ///
    /// Every call draws a fresh salt and nonce, so encrypting the same
    /// plaintext twice never yields the same output.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let salt = kdf::generate_salt();
        let key = kdf::derive_subkey(&self.master, &salt, KeyPurpose::Encrypt)?;
        let header = envelope::sealed_header(self.aead.version_tag(), &salt);

        let body = self.aead.encrypt(&key, plaintext, &header)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(plaintext_len = plaintext.len(), "sealed payload");

        Ok(envelope::encode_sealed(&header, &body))
    }

    /// Decrypt a sealed blob, returning an empty vector on any failure.
    ///
    /// Wrong password, truncation, tampering and unknown versions all yield
    /// `Vec::new()`. An empty result is therefore ambiguous with a sealed
    /// empty plaintext; use [`try_decrypt`](Self::try_decrypt) when the
    /// difference matters.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Vec<u8> {
        match self.try_decrypt(ciphertext) {
            Ok(plaintext) => plaintext,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_e, "decryption failed");
                Vec::new()
            },
        }
    }

    /// Decrypt a sealed blob, reporting why it failed.
    pub fn try_decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let parts = SealedParts::parse(ciphertext, self.aead.version_tag())?;
        let key = kdf::derive_subkey(&self.master, &parts.salt, KeyPurpose::Encrypt)?;
        self.aead.decrypt(&key, parts.body, &parts.header())
    }
}

impl<A: Aead> std::fmt::Debug for Cipher<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cipher")
            .field("aead_version", &self.aead.version_tag())
            .field("has_password", &self.has_password)
            .finish_non_exhaustive()
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| CipherError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode an opaque blob as standard base64 for text storage.
pub fn armor(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Decode a blob produced by [`armor`]. Surrounding whitespace is ignored.
pub fn dearmor(text: &str) -> Result<Vec<u8>> {
    Ok(base64::engine::general_purpose::STANDARD.decode(text.trim())?)
}
