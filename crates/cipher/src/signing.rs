//! HMAC-SHA256 tags over file contents.

use {
    hmac::{Hmac, Mac},
    sha2::Sha256,
};

use crate::{
    envelope::MAC_LEN,
    error::{CipherError, Result},
};

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(key: &[u8; 32], version: u8, data: &[u8]) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| CipherError::Kdf(format!("invalid MAC key: {e}")))?;
    mac.update(&[version]);
    mac.update(data);
    Ok(mac)
}

/// Compute the tag over `version || data`.
pub fn compute_tag(key: &[u8; 32], version: u8, data: &[u8]) -> Result<[u8; MAC_LEN]> {
    Ok(keyed_mac(key, version, data)?.finalize().into_bytes().into())
}

/// Check `tag` against `version || data`. The whole tag must match.
pub fn verify_tag(key: &[u8; 32], version: u8, data: &[u8], tag: &[u8]) -> bool {
    match keyed_mac(key, version, data) {
        Ok(mac) => mac.verify_slice(tag).is_ok(),
        Err(_) => false,
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [0x5A; 32];

    #[test]
    fn tag_verifies() {
        let tag = compute_tag(&KEY, 1, b"{license: feature1}").unwrap();
        assert!(verify_tag(&KEY, 1, b"{license: feature1}", &tag));
    }

    #[test]
    fn changed_data_rejected() {
        let tag = compute_tag(&KEY, 1, b"expdate: 1726142400").unwrap();
        assert!(!verify_tag(&KEY, 1, b"expdate: 1757678400", &tag));
    }

    #[test]
    fn changed_key_rejected() {
        let tag = compute_tag(&KEY, 1, b"data").unwrap();
        assert!(!verify_tag(&[0x5B; 32], 1, b"data", &tag));
    }

    #[test]
    fn version_is_bound() {
        let tag = compute_tag(&KEY, 1, b"data").unwrap();
        assert!(!verify_tag(&KEY, 2, b"data", &tag));
    }

    #[test]
    fn prefix_of_tag_rejected() {
        let tag = compute_tag(&KEY, 1, b"data").unwrap();
        assert!(!verify_tag(&KEY, 1, b"data", &tag[..16]));
        assert!(!verify_tag(&KEY, 1, b"data", &[]));
    }
}
