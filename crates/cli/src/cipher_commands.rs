use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use {
    anyhow::{Context, Result, bail},
    keyseal_cipher::{Cipher, armor, dearmor},
    secrecy::{ExposeSecret, Secret},
    tracing::{debug, info, warn},
};

/// Read the password from `password_file`, or else from the environment
/// variable `env_name`.
///
/// A single trailing newline is stripped from the file so `echo pw > file`
/// works. Empty passwords are refused here even though the library accepts
/// them.
pub fn resolve_password(
    password_file: Option<&Path>,
    env_name: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Secret<String>> {
    let password = match password_file {
        Some(path) => {
            let mut raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read password file {}", path.display()))?;
            if raw.ends_with('\n') {
                raw.pop();
                if raw.ends_with('\r') {
                    raw.pop();
                }
            }
            raw
        },
        None => lookup(env_name).with_context(|| {
            format!("no password given: set ${env_name} or pass --password-file")
        })?,
    };

    if password.is_empty() {
        bail!("refusing to use an empty password");
    }
    Ok(Secret::new(password))
}

/// Build a cipher from a resolved password and the effective config.
pub fn build_cipher(
    password: &Secret<String>,
    config: &keyseal_config::KeysealConfig,
) -> Result<Cipher> {
    Cipher::with_options(password.expose_secret(), &config.cipher_options())
        .context("failed to derive key from password")
}

/// `<file>.sig` next to the signed file.
pub fn default_signature_path(file: &Path) -> PathBuf {
    let mut name = OsString::from(file.as_os_str());
    name.push(".sig");
    PathBuf::from(name)
}

/// Sign `file` and write the armored signature. Returns the signature path.
pub fn sign(cipher: &Cipher, file: &Path, out: Option<PathBuf>) -> Result<PathBuf> {
    let out = out.unwrap_or_else(|| default_signature_path(file));
    let signature = cipher
        .signature(file)
        .with_context(|| format!("failed to sign {}", file.display()))?;

    std::fs::write(&out, format!("{}\n", armor(&signature)))
        .with_context(|| format!("failed to write {}", out.display()))?;

    info!(file = %file.display(), signature = %out.display(), "signed");
    Ok(out)
}

/// Verify `file` against its armored signature.
pub fn verify(cipher: &Cipher, file: &Path, signature: Option<PathBuf>) -> Result<bool> {
    let sig_path = signature.unwrap_or_else(|| default_signature_path(file));
    let text = std::fs::read_to_string(&sig_path)
        .with_context(|| format!("failed to read {}", sig_path.display()))?;

    // A signature file that is not even base64 is just an invalid signature.
    let signature = match dearmor(&text) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(signature = %sig_path.display(), error = %e, "signature file is not valid base64");
            return Ok(false);
        },
    };

    let valid = cipher
        .verify_signature(file, &signature)
        .with_context(|| format!("failed to verify {}", file.display()))?;

    debug!(file = %file.display(), valid, "verification finished");
    Ok(valid)
}

/// Encrypt `input` into `out`, optionally as base64 text.
pub fn encrypt(cipher: &Cipher, input: &Path, out: &Path, armored: bool) -> Result<()> {
    let plaintext =
        std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let sealed = cipher.encrypt(&plaintext).context("encryption failed")?;

    let written = if armored {
        format!("{}\n", armor(&sealed)).into_bytes()
    } else {
        sealed
    };
    std::fs::write(out, written).with_context(|| format!("failed to write {}", out.display()))?;

    info!(input = %input.display(), output = %out.display(), "encrypted");
    Ok(())
}

/// Decrypt `input` into `out`. Any authentication failure is an error here.
pub fn decrypt(cipher: &Cipher, input: &Path, out: &Path, armored: bool) -> Result<()> {
    let raw = std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let sealed = if armored {
        let text = String::from_utf8(raw).context("armored input is not UTF-8")?;
        dearmor(&text).context("armored input is not valid base64")?
    } else {
        raw
    };

    let plaintext = cipher.try_decrypt(&sealed).with_context(|| {
        format!(
            "failed to decrypt {} (wrong password or corrupted data)",
            input.display()
        )
    })?;
    std::fs::write(out, plaintext).with_context(|| format!("failed to write {}", out.display()))?;

    info!(input = %input.display(), output = %out.display(), "decrypted");
    Ok(())
}
