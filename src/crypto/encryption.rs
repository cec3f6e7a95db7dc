//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce.  The
//! nonce is returned next to the ciphertext (not prepended) so the vault
//! file can store both fields of a [`Sealed`] record side by side.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use serde::{Deserialize, Serialize};

use crate::errors::{PwVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Output of a single `encrypt` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sealed {
    /// Random nonce used for this record (base64 in JSON).
    #[serde(with = "crate::crypto::b64")]
    pub nonce: Vec<u8>,

    /// Ciphertext followed by the 16-byte auth tag (base64 in JSON).
    #[serde(with = "crate::crypto::b64")]
    pub ciphertext: Vec<u8>,
}

/// Encrypt `plaintext` with a 32-byte `key`.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Sealed> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| PwVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| PwVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok(Sealed {
        nonce: nonce.to_vec(),
        ciphertext,
    })
}

/// Decrypt a record produced by `encrypt`.
///
/// A wrong key, a tampered ciphertext, a truncated buffer and a nonce of
/// the wrong size all fail the same way, with `DecryptionFailed`.
pub fn decrypt(key: &[u8], sealed: &Sealed) -> Result<Vec<u8>> {
    if sealed.nonce.len() != NONCE_LEN || sealed.ciphertext.len() < TAG_LEN {
        return Err(PwVaultError::DecryptionFailed);
    }

    let nonce = Nonce::from_slice(&sealed.nonce);
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| PwVaultError::DecryptionFailed)?;

    cipher
        .decrypt(nonce, sealed.ciphertext.as_slice())
        .map_err(|_| PwVaultError::DecryptionFailed)
}
