//! Encryption at rest using XSalsa20-Poly1305
//!
//! The settings blob is sealed with a 32-byte secret key; the random
//! nonce is stored in front of the ciphertext.

mod secretbox;

pub use secretbox::SecretBox;

/// Symmetric secret key (32 bytes for XSalsa20)
pub type SecretKey = [u8; 32];

/// XSalsa20 nonce length
pub const NONCE_LEN: usize = 24;

/// Generate a random secret key
pub fn generate_key() -> SecretKey {
    use rand::RngCore;
    let mut key = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut key);
    key
}
