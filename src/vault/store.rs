//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` is the locked view of a vault file: aliases and settings
//! are readable, nothing can be decrypted.  Unlocking it with the master
//! secret yields a `Session`, which owns the derived key and performs
//! every entry operation.  Each mutation writes the whole vault back to
//! disk before it takes effect in memory.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::RngCore;
use serde_json::{Map, Value};
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::kdf::{Argon2Params, DerivedKey};
use crate::crypto::keyfile::load_keyfile;
use crate::crypto::{decrypt, encrypt, generate_secret};
use crate::errors::{PwVaultError, Result};

use super::entry::{Entry, EntryMetadata, EntryRef};
use super::format::{self, VaultFile};
use super::guard;
use super::index::EntryIndex;

/// Maximum alias length, in characters.
const MAX_ALIAS_LEN: usize = 256;

/// Where the master secret comes from.
#[derive(Clone)]
pub enum MasterSource {
    /// A secret typed by the user or passed in directly.
    Secret(Zeroizing<String>),
    /// A file whose contents are the secret.
    KeyFile(PathBuf),
    /// A single command-line argument that is either the secret itself or
    /// the path to a keyfile.
    SecretOrPath(Zeroizing<String>),
}

impl std::fmt::Debug for MasterSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Secret(_) => f.write_str("Secret(..)"),
            Self::KeyFile(path) => f.debug_tuple("KeyFile").field(path).finish(),
            Self::SecretOrPath(_) => f.write_str("SecretOrPath(..)"),
        }
    }
}

/// The locked vault.  Create one with `VaultStore::load`, then call
/// `unlock` to get a `Session`.
#[derive(Debug)]
pub struct VaultStore {
    /// Path to the vault file on disk.
    path: PathBuf,

    /// Parsed contents (an empty vault if the file does not exist yet).
    file: VaultFile,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Load the vault at `path`.
    ///
    /// A missing file is a first run and yields an empty, uninitialized
    /// vault; nothing is written until the first unlock.
    pub fn load(path: &Path) -> Result<Self> {
        let file = format::read_vault(path)?.unwrap_or_default();
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Unlock the vault, consuming the locked view.
    ///
    /// On a vault with no master secret yet, the given secret becomes the
    /// master secret permanently and the vault is written to disk.
    /// `params` is only used in that case; an existing vault always derives
    /// its key with the parameters stored in the file.
    pub fn unlock(mut self, source: &MasterSource, params: &Argon2Params) -> Result<Session> {
        let key = match source {
            MasterSource::Secret(secret) => self.unlock_secret(secret, params)?,
            MasterSource::KeyFile(path) => {
                let secret = load_keyfile(path)?;
                self.unlock_secret(&secret, params)?
            }
            MasterSource::SecretOrPath(arg) => self.unlock_secret_or_path(arg, params)?,
        };

        Ok(Session::new(self, key))
    }

    /// Destructively clear the vault at `path`, optionally after copying
    /// it to a timestamped backup beside it.
    ///
    /// Returns the backup path, if one was made.  Resetting a vault that
    /// does not exist is a no-op.
    pub fn reset(path: &Path, make_backup: bool) -> Result<Option<PathBuf>> {
        if !path.exists() {
            return Ok(None);
        }

        let backup = if make_backup {
            Some(format::backup_vault(path)?)
        } else {
            None
        };

        format::remove_vault(path)?;
        Ok(backup)
    }

    fn unlock_secret(&mut self, secret: &str, params: &Argon2Params) -> Result<DerivedKey> {
        let mut next = self.file.clone();
        let (key, created) = guard::unlock(&mut next, secret, params)?;
        if created {
            format::write_vault(&self.path, &next)?;
            self.file = next;
        }
        Ok(key)
    }

    /// Resolve an argument that may be a secret or a keyfile path.
    ///
    /// On an initialized vault the argument is tried as the secret first,
    /// then as a keyfile if it names one.  On a fresh vault an existing
    /// file is always taken as a keyfile, so the path string itself never
    /// becomes the master secret by accident.
    fn unlock_secret_or_path(&mut self, arg: &str, params: &Argon2Params) -> Result<DerivedKey> {
        let path = Path::new(arg);

        if !self.file.is_initialized() {
            return if path.is_file() {
                let secret = load_keyfile(path)?;
                self.unlock_secret(&secret, params)
            } else {
                self.unlock_secret(arg, params)
            };
        }

        match guard::verify(&self.file, arg) {
            Err(PwVaultError::WrongSecret) if path.is_file() => {
                // The typed attempt already failed, so an unusable file is
                // just another wrong secret.
                let secret = load_keyfile(path).map_err(|_| PwVaultError::WrongSecret)?;
                guard::verify(&self.file, &secret)
            }
            other => other,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` once a master secret has been established.
    pub fn is_initialized(&self) -> bool {
        self.file.is_initialized()
    }

    /// Returns the number of entries in the vault.
    pub fn len(&self) -> usize {
        self.file.entries.len()
    }

    /// Returns `true` if the vault holds no entries.
    pub fn is_empty(&self) -> bool {
        self.file.entries.is_empty()
    }

    /// The vault's settings map, exactly as stored.
    pub fn settings(&self) -> &Map<String, Value> {
        &self.file.settings
    }

    /// Read a boolean setting.
    ///
    /// Accepts JSON booleans and the strings `"true"` / `"false"`, which is
    /// how older vaults stored edited values.  Missing or other values
    /// yield `None`.
    pub fn setting_bool(&self, key: &str) -> Option<bool> {
        match self.file.settings.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s == "true" => Some(true),
            Value::String(s) if s == "false" => Some(false),
            _ => None,
        }
    }

    /// Metadata for every entry, in insertion order.
    pub fn entries(&self) -> Vec<EntryMetadata> {
        self.file.entries.iter().map(EntryMetadata::from).collect()
    }

    /// A read-only lookup view over the entries.
    pub fn index(&self) -> EntryIndex<'_> {
        EntryIndex::new(&self.file.entries)
    }
}

/// An unlocked vault.
///
/// Owns the derived key for as long as it lives; the key is zeroed when
/// the session is dropped.
#[derive(Debug)]
pub struct Session {
    store: VaultStore,
    key: DerivedKey,
    /// Random per-session tag so handles from other sessions never resolve.
    id: u64,
    /// Advances whenever entry positions shift.
    generation: u64,
}

impl Session {
    fn new(store: VaultStore, key: DerivedKey) -> Self {
        Self {
            store,
            key,
            id: rand::rng().next_u64(),
            generation: 0,
        }
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Encrypt `plaintext` and append it as a new entry.
    ///
    /// Alias uniqueness is not enforced; lookups by alias return the
    /// first match.
    pub fn add(&mut self, alias: &str, plaintext: &str) -> Result<EntryRef> {
        validate_alias(alias)?;

        let now = Utc::now();
        let entry = Entry {
            alias: alias.to_string(),
            sealed: encrypt(self.key.as_bytes(), plaintext.as_bytes())?,
            created_at: now,
            updated_at: now,
        };

        let mut next = self.store.file.clone();
        next.entries.push(entry);
        let index = next.entries.len() - 1;
        self.commit(next)?;

        Ok(self.handle(index))
    }

    /// Decrypt and return the referenced entry's secret text.
    pub fn get(&self, entry: EntryRef) -> Result<String> {
        let index = self.resolve(entry)?;
        self.decrypt_at(index)
    }

    /// Replace the referenced entry with a new alias and secret text.
    ///
    /// The entry keeps its position and creation time, so `entry` stays
    /// valid afterwards.
    pub fn edit(&mut self, entry: EntryRef, alias: &str, plaintext: &str) -> Result<()> {
        let index = self.resolve(entry)?;
        validate_alias(alias)?;

        let sealed = encrypt(self.key.as_bytes(), plaintext.as_bytes())?;

        let mut next = self.store.file.clone();
        let slot = &mut next.entries[index];
        slot.alias = alias.to_string();
        slot.sealed = sealed;
        slot.updated_at = Utc::now();

        self.commit(next)
    }

    /// Delete the referenced entry.
    ///
    /// Later entries shift down one position, so every handle issued
    /// before this call becomes invalid.
    pub fn remove(&mut self, entry: EntryRef) -> Result<()> {
        let index = self.resolve(entry)?;

        let mut next = self.store.file.clone();
        next.entries.remove(index);
        self.commit(next)?;

        self.generation += 1;
        Ok(())
    }

    /// Decrypt every entry, in insertion order.
    ///
    /// Fails as a whole on the first entry that does not decrypt: a vault
    /// with entries under different keys is structurally broken.
    pub fn list_all(&self) -> Result<Vec<(String, String)>> {
        (0..self.store.file.entries.len())
            .map(|index| {
                let alias = self.store.file.entries[index].alias.clone();
                self.decrypt_at(index).map(|plaintext| (alias, plaintext))
            })
            .collect()
    }

    /// Aliases starting with `token`, shortest first.
    pub fn search(&self, token: &str) -> Vec<String> {
        self.store
            .index()
            .prefix_search(token)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Handle to the first entry whose alias is exactly `alias`.
    pub fn find_exact(&self, alias: &str) -> Result<EntryRef> {
        self.store
            .index()
            .find_exact(alias)
            .map(|index| self.handle(index))
            .ok_or_else(|| PwVaultError::EntryNotFound(alias.to_string()))
    }

    /// Generate a random secret of `length` characters drawn uniformly
    /// from `a-z`, `A-Z` and `0-9`.
    pub fn generate_secret(length: usize) -> String {
        generate_secret(length)
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Set a vault setting and persist it.  Unknown keys are allowed.
    pub fn set_setting(&mut self, key: &str, value: Value) -> Result<()> {
        if key.is_empty() {
            return Err(PwVaultError::ConfigError(
                "setting name cannot be empty".into(),
            ));
        }

        let mut next = self.store.file.clone();
        next.settings.insert(key.to_string(), value);
        self.commit(next)
    }

    // ------------------------------------------------------------------
    // Reset
    // ------------------------------------------------------------------

    /// Destroy the vault, ending the session.
    ///
    /// With `make_backup`, the file is first copied to a timestamped
    /// backup, whose path is returned.
    pub fn reset(self, make_backup: bool) -> Result<Option<PathBuf>> {
        VaultStore::reset(&self.store.path, make_backup)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Returns the number of entries in the vault.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the vault holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Metadata for every entry, in insertion order.
    pub fn entries(&self) -> Vec<EntryMetadata> {
        self.store.entries()
    }

    /// The vault's settings map, exactly as stored.
    pub fn settings(&self) -> &Map<String, Value> {
        self.store.settings()
    }

    /// Read a boolean setting, as `VaultStore::setting_bool` does.
    pub fn setting_bool(&self, key: &str) -> Option<bool> {
        self.store.setting_bool(key)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn handle(&self, index: usize) -> EntryRef {
        EntryRef {
            session: self.id,
            generation: self.generation,
            index,
        }
    }

    fn resolve(&self, entry: EntryRef) -> Result<usize> {
        if entry.session != self.id
            || entry.generation != self.generation
            || entry.index >= self.store.file.entries.len()
        {
            return Err(PwVaultError::InvalidReference);
        }
        Ok(entry.index)
    }

    fn decrypt_at(&self, index: usize) -> Result<String> {
        let entry = &self.store.file.entries[index];
        let plaintext = decrypt(self.key.as_bytes(), &entry.sealed)?;

        String::from_utf8(plaintext).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            PwVaultError::SerializationError(format!(
                "entry '{}' is not valid UTF-8",
                entry.alias
            ))
        })
    }

    /// Persist `next` and only then make it the in-memory state.
    fn commit(&mut self, next: VaultFile) -> Result<()> {
        format::write_vault(&self.store.path, &next)?;
        self.store.file = next;
        Ok(())
    }
}

/// Validate that an alias is usable as a lookup name.
///
/// Must be non-empty, at most 256 characters, free of control characters
/// and without leading or trailing whitespace.
fn validate_alias(alias: &str) -> Result<()> {
    if alias.is_empty() {
        return Err(PwVaultError::InvalidAlias("alias cannot be empty".into()));
    }
    if alias.chars().count() > MAX_ALIAS_LEN {
        return Err(PwVaultError::InvalidAlias(format!(
            "alias cannot exceed {MAX_ALIAS_LEN} characters"
        )));
    }
    if alias.chars().any(char::is_control) {
        return Err(PwVaultError::InvalidAlias(
            "alias cannot contain control characters".into(),
        ));
    }
    if alias.trim() != alias {
        return Err(PwVaultError::InvalidAlias(format!(
            "alias '{alias}' has leading or trailing whitespace"
        )));
    }
    Ok(())
}
