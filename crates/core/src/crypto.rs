//! Credential store: AES-256-GCM encryption of third-party OAuth tokens.
//!
//! The cipher key is the SHA-256 digest of an operator-configured secret, so
//! the secret itself can be any length. Each encryption uses a fresh random
//! nonce; the stored blob is one hex string of `nonce || ciphertext || tag`.
//! Decryption authenticates the tag and fails loudly on any tamper or
//! corruption rather than returning garbage.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// AES-GCM nonce length in bytes.
const NONCE_LENGTH: usize = 12;

/// Derive the fixed-size cipher key from the configured secret.
pub fn derive_key(secret: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.finalize().into()
}

/// Encrypt a credential for at-rest storage.
///
/// Returns a hex string of `nonce || ciphertext || tag`. A fresh random nonce
/// is generated per call, so encrypting the same plaintext twice yields
/// different blobs.
pub fn encrypt(plaintext: &str, key: &[u8; 32]) -> Result<String, CoreError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    let mut nonce_bytes = [0u8; NONCE_LENGTH];
    rand::rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|_| CoreError::Internal("Encryption failed".into()))?;

    let mut blob = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(hex::encode(&blob))
}

/// Decrypt a stored credential blob.
///
/// Fails with an error (never silent garbage) when the blob is malformed,
/// was encrypted under a different key, or has been tampered with.
pub fn decrypt(blob: &str, key: &[u8; 32]) -> Result<String, CoreError> {
    let bytes =
        hex::decode(blob).ok_or_else(|| CoreError::Internal("Malformed credential blob".into()))?;

    if bytes.len() < NONCE_LENGTH {
        return Err(CoreError::Internal("Malformed credential blob".into()));
    }
    let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LENGTH);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| CoreError::Internal("Decryption failed: authentication tag mismatch".into()))?;

    String::from_utf8(plaintext)
        .map_err(|_| CoreError::Internal("Decrypted credential is not valid UTF-8".into()))
}

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Decode a hex string; `None` on odd length or non-hex characters.
    pub fn decode(s: &str) -> Option<Vec<u8>> {
        if s.len() % 2 != 0 {
            return None;
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(s.get(i..i + 2)?, 16).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> [u8; 32] {
        derive_key("test-secret")
    }

    #[test]
    fn round_trip() {
        let blob = encrypt("an-oauth-access-token", &key()).unwrap();
        assert_eq!(decrypt(&blob, &key()).unwrap(), "an-oauth-access-token");
    }

    #[test]
    fn round_trip_empty_string() {
        let blob = encrypt("", &key()).unwrap();
        assert_eq!(decrypt(&blob, &key()).unwrap(), "");
    }

    #[test]
    fn round_trip_unicode() {
        let text = "tök€n-🔑-日本語";
        let blob = encrypt(text, &key()).unwrap();
        assert_eq!(decrypt(&blob, &key()).unwrap(), text);
    }

    #[test]
    fn fresh_nonce_per_call() {
        let a = encrypt("same plaintext", &key()).unwrap();
        let b = encrypt("same plaintext", &key()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn tampered_blob_fails() {
        let blob = encrypt("secret token", &key()).unwrap();
        // Flip one hex digit somewhere in the ciphertext region.
        let idx = blob.len() - 5;
        let mut tampered: Vec<char> = blob.chars().collect();
        tampered[idx] = if tampered[idx] == '0' { '1' } else { '0' };
        let tampered: String = tampered.into_iter().collect();

        assert!(decrypt(&tampered, &key()).is_err());
    }

    #[test]
    fn wrong_key_fails() {
        let blob = encrypt("secret token", &key()).unwrap();
        let other = derive_key("different-secret");
        assert!(decrypt(&blob, &other).is_err());
    }

    #[test]
    fn truncated_blob_fails() {
        let blob = encrypt("secret token", &key()).unwrap();
        assert!(decrypt(&blob[..10], &key()).is_err());
        assert!(decrypt("zz", &key()).is_err());
    }

    #[test]
    fn key_derivation_accepts_any_secret_length() {
        assert_ne!(derive_key("a"), derive_key("ab"));
        assert_eq!(derive_key("long secret"), derive_key("long secret"));
    }
}
