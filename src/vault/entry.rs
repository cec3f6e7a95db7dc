//! Entry types stored inside a vault.
//!
//! Each entry holds its alias, the encrypted secret text (nonce and
//! ciphertext flattened into the entry record) and creation/update
//! timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::Sealed;

/// A single encrypted entry stored in the vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// The name the entry is looked up by (e.g. "email").
    pub alias: String,

    /// The encrypted secret text.
    #[serde(flatten)]
    pub sealed: Sealed,

    /// When this entry was first added.
    pub created_at: DateTime<Utc>,

    /// When this entry was last edited.
    pub updated_at: DateTime<Utc>,
}

/// Lightweight metadata about an entry (no ciphertext).
///
/// Returned by `Session::entries` so callers can display aliases and
/// timestamps without decrypting anything.
#[derive(Debug, Clone)]
pub struct EntryMetadata {
    pub alias: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Entry> for EntryMetadata {
    fn from(entry: &Entry) -> Self {
        Self {
            alias: entry.alias.clone(),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// A short-lived handle to an entry's position.
///
/// Handles are tied to the session that issued them and to the layout of
/// the entry list at the time.  Removing an entry shifts positions, so it
/// invalidates every outstanding handle; adding and editing do not.
/// Resolve a fresh handle (e.g. via `Session::find_exact`) after a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryRef {
    pub(crate) session: u64,
    pub(crate) generation: u64,
    pub(crate) index: usize,
}

impl EntryRef {
    /// Zero-based position of the entry at the time the handle was issued.
    pub fn position(&self) -> usize {
        self.index
    }
}
