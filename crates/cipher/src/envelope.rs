//! Byte layouts of signatures and sealed (encrypted) blobs.
//!
//! Signature: `[version: 1][salt: 16][HMAC-SHA256: 32]`.
//! Sealed:    `[aead version: 1][salt: 16][backend blob]`.
//!
//! Callers treat both as opaque. The leading version byte lets a later build
//! switch algorithms while still recognising older payloads.

use crate::{
    error::{CipherError, Result},
    kdf::SALT_LEN,
};

/// Version of the signature layout and MAC construction.
pub const SIGNATURE_VERSION: u8 = 0x01;

/// HMAC-SHA256 output length.
pub const MAC_LEN: usize = 32;

/// Total length of an encoded signature.
pub const SIGNATURE_LEN: usize = 1 + SALT_LEN + MAC_LEN;

/// Length of the sealed-blob header (version byte plus salt).
pub const SEALED_HEADER_LEN: usize = 1 + SALT_LEN;

/// Decoded signature fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParts {
    pub version: u8,
    pub salt: [u8; SALT_LEN],
    pub tag: [u8; MAC_LEN],
}

impl SignatureParts {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SIGNATURE_LEN);
        out.push(self.version);
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.tag);
        out
    }

    /// Parse an encoded signature. Anything but an exact-length blob with a
    /// known version is rejected.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(CipherError::malformed(format!(
                "signature has wrong length: {} (expected {SIGNATURE_LEN})",
                bytes.len()
            )));
        }

        let version = bytes[0];
        if version != SIGNATURE_VERSION {
            return Err(CipherError::UnsupportedVersion(version));
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&bytes[1..SEALED_HEADER_LEN]);
        let mut tag = [0u8; MAC_LEN];
        tag.copy_from_slice(&bytes[SEALED_HEADER_LEN..]);

        Ok(Self { version, salt, tag })
    }
}

/// Sealed blob split into its header fields and the backend-specific body.
#[derive(Debug)]
pub struct SealedParts<'a> {
    pub version: u8,
    pub salt: [u8; SALT_LEN],
    pub body: &'a [u8],
}

impl<'a> SealedParts<'a> {
    /// Split a sealed blob, checking the version against `expected_version`.
    pub fn parse(bytes: &'a [u8], expected_version: u8) -> Result<Self> {
        let Some(&version) = bytes.first() else {
            return Err(CipherError::malformed("empty blob"));
        };
        if version != expected_version {
            return Err(CipherError::UnsupportedVersion(version));
        }
        if bytes.len() < SEALED_HEADER_LEN {
            return Err(CipherError::malformed("sealed blob too short"));
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&bytes[1..SEALED_HEADER_LEN]);

        Ok(Self {
            version,
            salt,
            body: &bytes[SEALED_HEADER_LEN..],
        })
    }

    /// Header bytes, which double as the AEAD associated data.
    pub fn header(&self) -> [u8; SEALED_HEADER_LEN] {
        sealed_header(self.version, &self.salt)
    }
}

/// Build the sealed-blob header for `version` and `salt`.
pub fn sealed_header(version: u8, salt: &[u8; SALT_LEN]) -> [u8; SEALED_HEADER_LEN] {
    let mut header = [0u8; SEALED_HEADER_LEN];
    header[0] = version;
    header[1..].copy_from_slice(salt);
    header
}

/// Concatenate a header and a backend body into one sealed blob.
pub fn encode_sealed(header: &[u8; SEALED_HEADER_LEN], body: &[u8]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(SEALED_HEADER_LEN + body.len());
    blob.extend_from_slice(header);
    blob.extend_from_slice(body);
    blob
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[test]
    fn signature_encode_parse() {
        let parts = SignatureParts {
            version: SIGNATURE_VERSION,
            salt: [0xAA; SALT_LEN],
            tag: [0xBB; MAC_LEN],
        };

        let encoded = parts.encode();
        assert_eq!(encoded.len(), SIGNATURE_LEN);
        assert_eq!(encoded[0], SIGNATURE_VERSION);
        assert_eq!(SignatureParts::parse(&encoded).unwrap(), parts);
    }

    #[rstest]
    #[case::empty(0)]
    #[case::header_only(SEALED_HEADER_LEN)]
    #[case::one_short(SIGNATURE_LEN - 1)]
    #[case::one_long(SIGNATURE_LEN + 1)]
    fn signature_wrong_length_rejected(#[case] len: usize) {
        let mut bytes = vec![0u8; len];
        if let Some(first) = bytes.first_mut() {
            *first = SIGNATURE_VERSION;
        }
        assert!(matches!(
            SignatureParts::parse(&bytes),
            Err(CipherError::Malformed(_))
        ));
    }

    #[test]
    fn signature_unknown_version_rejected() {
        let mut bytes = vec![0u8; SIGNATURE_LEN];
        bytes[0] = 0x7F;
        assert!(matches!(
            SignatureParts::parse(&bytes),
            Err(CipherError::UnsupportedVersion(0x7F))
        ));
    }

    #[test]
    fn sealed_parse_splits_header_and_body() {
        let header = sealed_header(0x01, &[0x33; SALT_LEN]);
        let blob = encode_sealed(&header, b"body");

        let parts = SealedParts::parse(&blob, 0x01).unwrap();
        assert_eq!(parts.salt, [0x33; SALT_LEN]);
        assert_eq!(parts.body, b"body");
        assert_eq!(parts.header(), header);
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::truncated_salt(&[0x01, 0x02, 0x03])]
    fn sealed_too_short_rejected(#[case] bytes: &[u8]) {
        assert!(matches!(
            SealedParts::parse(bytes, 0x01),
            Err(CipherError::Malformed(_))
        ));
    }

    #[test]
    fn sealed_wrong_version_rejected() {
        let blob = encode_sealed(&sealed_header(0x02, &[0; SALT_LEN]), b"body");
        assert!(matches!(
            SealedParts::parse(&blob, 0x01),
            Err(CipherError::UnsupportedVersion(0x02))
        ));
    }
}
