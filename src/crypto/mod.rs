//! Cryptographic primitives for PwVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Argon2id password-based key derivation (`kdf`)
//! - Keyfile loading and generation (`keyfile`)
//! - Random secret generation (`generate`)

pub(crate) mod b64;
pub mod encryption;
pub mod generate;
pub mod kdf;
pub mod keyfile;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encryption::{decrypt, encrypt, Sealed};
pub use generate::{generate_secret, DEFAULT_SECRET_LEN};
pub use kdf::{derive_key, generate_salt, Argon2Params, DerivedKey};
pub use keyfile::{generate_keyfile, load_keyfile};
