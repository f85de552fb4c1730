//! Digest utilities for signing media host upload requests.

use sha2::{Digest, Sha256};

/// Computes SHA-256 of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Builds the request signature expected by the media host.
///
/// Parameters are sorted by key, serialized as `key=value` pairs joined with
/// `&`, the API secret is appended, and the whole string is SHA-256 hashed.
/// The file payload itself is never part of the signature.
pub fn sign_upload_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    let serialized = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    sha256_hex(&format!("{}{}", serialized, api_secret))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        let hash = sha256_hex("test");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_empty_string() {
        let hash = sha256_hex("");
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sign_upload_params_sorts_keys() {
        let params = [
            ("upload_preset", "church_gallery".to_string()),
            ("timestamp", "1700000000".to_string()),
        ];
        let signature = sign_upload_params(&params, "secret");
        let expected = sha256_hex("timestamp=1700000000&upload_preset=church_gallerysecret");
        // Key order in the input must not matter.
        let reversed = [
            ("timestamp", "1700000000".to_string()),
            ("upload_preset", "church_gallery".to_string()),
        ];
        assert_eq!(signature, sign_upload_params(&reversed, "secret"));
        assert_eq!(signature, expected);
    }

    #[test]
    fn test_sign_upload_params_secret_changes_signature() {
        let params = [("timestamp", "1700000000".to_string())];
        assert_ne!(
            sign_upload_params(&params, "secret-a"),
            sign_upload_params(&params, "secret-b")
        );
    }
}
