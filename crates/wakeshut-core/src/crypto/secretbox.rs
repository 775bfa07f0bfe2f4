//! Authenticated symmetric encryption (XSalsa20Poly1305)

use super::{SecretKey, NONCE_LEN};
use crate::{Result, WakeshutError};
use xsalsa20poly1305::aead::{Aead, KeyInit};
use xsalsa20poly1305::XSalsa20Poly1305;

/// Seals and opens byte blobs with a single secret key
pub struct SecretBox {
    cipher: XSalsa20Poly1305,
}

impl SecretBox {
    pub fn new(key: &SecretKey) -> Self {
        Self {
            cipher: XSalsa20Poly1305::new(key.into()),
        }
    }

    /// Encrypt `plaintext`, returning `nonce || ciphertext`
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let nonce_bytes = Self::generate_nonce();
        let nonce = xsalsa20poly1305::Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| WakeshutError::Encryption("Symmetric encryption failed".to_string()))?;

        let mut sealed = nonce_bytes.to_vec();
        sealed.extend(ciphertext);
        Ok(sealed)
    }

    /// Decrypt a blob produced by [`SecretBox::seal`]
    pub fn open(&self, sealed: &[u8]) -> Result<Vec<u8>> {
        if sealed.len() < NONCE_LEN {
            return Err(WakeshutError::Decryption(
                "Sealed data is shorter than a nonce".to_string(),
            ));
        }

        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
        let nonce = xsalsa20poly1305::Nonce::from_slice(nonce_bytes);

        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| WakeshutError::Decryption("Symmetric decryption failed".to_string()))
    }

    fn generate_nonce() -> [u8; NONCE_LEN] {
        use rand::RngCore;
        let mut nonce = [0u8; NONCE_LEN];
        rand::rngs::OsRng.fill_bytes(&mut nonce);
        nonce
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::generate_key;

    #[test]
    fn test_seal_open() {
        let sbox = SecretBox::new(&generate_key());

        let plaintext = b"password=hunter2";
        let sealed = sbox.seal(plaintext).unwrap();

        assert_eq!(sealed.len(), NONCE_LEN + plaintext.len() + 16);
        assert!(!sealed.windows(plaintext.len()).any(|w| w == plaintext));
        assert_eq!(sbox.open(&sealed).unwrap(), plaintext);
    }

    #[test]
    fn test_nonce_differs_per_seal() {
        let sbox = SecretBox::new(&generate_key());
        let a = sbox.seal(b"same").unwrap();
        let b = sbox.seal(b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_open_with_wrong_key_fails() {
        let sealed = SecretBox::new(&generate_key()).seal(b"Secret").unwrap();
        let result = SecretBox::new(&generate_key()).open(&sealed);
        assert!(matches!(result, Err(WakeshutError::Decryption(_))));
    }

    #[test]
    fn test_open_truncated_fails() {
        let sbox = SecretBox::new(&generate_key());
        assert!(sbox.open(&[0u8; 10]).is_err());

        let mut sealed = sbox.seal(b"Secret").unwrap();
        sealed.pop();
        assert!(sbox.open(&sealed).is_err());
    }
}
