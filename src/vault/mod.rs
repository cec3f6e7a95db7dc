//! Vault module — encrypted entry storage.
//!
//! This module provides:
//! - `Entry`, `EntryMetadata` and `EntryRef` types (`entry`)
//! - The JSON vault file format with atomic writes (`format`)
//! - Master secret establishment and verification (`guard`)
//! - Alias lookup and prefix search (`index`)
//! - `VaultStore` and `Session` for opening and managing vaults (`store`)

pub mod entry;
pub mod format;
pub mod guard;
pub mod index;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{Entry, EntryMetadata, EntryRef};
pub use format::VaultFile;
pub use index::EntryIndex;
pub use store::{MasterSource, Session, VaultStore};

use std::path::Path;

use crate::crypto::Argon2Params;
use crate::errors::Result;

/// Load the vault at `path` and unlock it in one step.
pub fn unlock(path: &Path, source: &MasterSource, params: &Argon2Params) -> Result<Session> {
    VaultStore::load(path)?.unlock(source, params)
}
