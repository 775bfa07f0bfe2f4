//! Private key loading

use crate::{Result, WakeshutError};
use russh_keys::key::KeyPair;
use tracing::debug;

/// Decode an unencrypted PEM / OpenSSH private key.
///
/// The text is decoded as given first, then as a normalized copy (see
/// [`normalize_pem`]). Passphrase-protected keys are not supported.
pub fn load_private_key(pem: &str) -> Result<KeyPair> {
    if pem.trim().is_empty() {
        return Err(WakeshutError::Validation(
            "Failed to load private key: no key configured".to_string(),
        ));
    }

    match russh_keys::decode_secret_key(pem, None) {
        Ok(key) => Ok(key),
        Err(e) => {
            debug!("Private key not decodable as given ({}), retrying normalized", e);
            russh_keys::decode_secret_key(&normalize_pem(pem), None).map_err(|e| {
                WakeshutError::Validation(format!("Failed to load private key: {}", e))
            })
        }
    }
}

/// Undo common copy/paste damage: literal `\n` escapes, CRLF line endings,
/// indentation and blank lines. Always ends with a newline.
pub fn normalize_pem(pem: &str) -> String {
    let unescaped = pem.replace("\\n", "\n");
    let mut out = unescaped
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = include_str!("../../tests/fixtures/test_ed25519");

    #[test]
    fn test_normalize_pem() {
        let mangled = "  -----BEGIN KEY-----\r\n\r\n  abc\r\n-----END KEY-----  ";
        assert_eq!(
            normalize_pem(mangled),
            "-----BEGIN KEY-----\nabc\n-----END KEY-----\n"
        );
        assert_eq!(normalize_pem("a\\nb"), "a\nb\n");
    }

    #[test]
    fn test_load_valid_key() {
        assert!(load_private_key(TEST_KEY).is_ok());
    }

    #[test]
    fn test_load_key_after_normalization() {
        let mangled = TEST_KEY
            .lines()
            .map(|l| format!("   {}", l))
            .collect::<Vec<_>>()
            .join("\r\n\r\n");
        assert!(load_private_key(&mangled).is_ok());
    }

    #[test]
    fn test_garbage_key_is_reported() {
        let err = load_private_key("not a key").unwrap_err();
        assert!(err.to_string().starts_with("Failed to load private key"));

        let err = load_private_key("").unwrap_err();
        assert!(matches!(err, WakeshutError::Validation(_)));
    }
}
