//! On-disk vault format.
//!
//! A vault file is a single JSON document:
//!
//! ```text
//! {
//!   "version": 1,
//!   "kdf": { "salt": "<b64>", "memory_kib": 65536, "iterations": 3, "parallelism": 4 },
//!   "master_check": { "nonce": "<b64>", "ciphertext": "<b64>" },
//!   "entries": [ { "alias": "...", "nonce": "<b64>", "ciphertext": "<b64>",
//!                  "created_at": "...", "updated_at": "..." } ],
//!   "settings": { ... }
//! }
//! ```
//!
//! `kdf` and `master_check` are `null` until the first unlock.  The
//! `settings` object is kept as raw JSON so keys this version does not
//! know about survive a load/store round-trip.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entry::Entry;
use crate::crypto::kdf::{Argon2Params, SALT_LEN};
use crate::crypto::Sealed;
use crate::errors::{PwVaultError, Result};

/// Current vault format version.
pub const CURRENT_VERSION: u32 = 1;

/// Vault setting: copy revealed secrets to the clipboard.
pub const SETTING_COPY_TO_CLIPBOARD: &str = "copyToClipboard";

/// Vault setting: do not echo revealed secrets to the terminal.
pub const SETTING_HIDE_IN_CONSOLE: &str = "hideInConsole";

/// Vault setting: mask the master secret while it is typed.
pub const SETTING_HIDE_MASTER: &str = "hideMaster";

/// Salt and Argon2 parameters used to derive the session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfRecord {
    #[serde(with = "crate::crypto::b64")]
    pub salt: Vec<u8>,
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl KdfRecord {
    /// Build a record from a fresh salt and the parameters it was used with.
    pub fn new(salt: &[u8], params: &Argon2Params) -> Self {
        Self {
            salt: salt.to_vec(),
            memory_kib: params.memory_kib,
            iterations: params.iterations,
            parallelism: params.parallelism,
        }
    }

    /// The stored parameters as crypto-layer params.
    pub fn params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.memory_kib,
            iterations: self.iterations,
            parallelism: self.parallelism,
        }
    }
}

/// The full persisted vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultFile {
    pub version: u32,

    #[serde(default)]
    pub kdf: Option<KdfRecord>,

    /// The master secret encrypted under its own derived key.
    #[serde(default)]
    pub master_check: Option<Sealed>,

    /// Entries in insertion order.
    #[serde(default)]
    pub entries: Vec<Entry>,

    #[serde(default)]
    pub settings: Map<String, Value>,
}

impl VaultFile {
    /// An empty, never-unlocked vault with the default settings.
    pub fn new() -> Self {
        Self {
            version: CURRENT_VERSION,
            kdf: None,
            master_check: None,
            entries: Vec::new(),
            settings: default_settings(),
        }
    }

    /// Returns `true` once a master secret has been established.
    pub fn is_initialized(&self) -> bool {
        self.master_check.is_some()
    }

    /// Check the structural invariants a parsed file must hold.
    fn validate(&self) -> Result<()> {
        if self.version != CURRENT_VERSION {
            return Err(PwVaultError::MalformedVault(format!(
                "unsupported version {}, expected {CURRENT_VERSION}",
                self.version
            )));
        }

        match (&self.master_check, &self.kdf) {
            (Some(_), None) => {
                return Err(PwVaultError::MalformedVault(
                    "master check present without key derivation parameters".into(),
                ));
            }
            (None, _) if !self.entries.is_empty() => {
                return Err(PwVaultError::MalformedVault(
                    "vault has entries but no master check".into(),
                ));
            }
            _ => {}
        }

        if let Some(kdf) = &self.kdf {
            if kdf.salt.len() != SALT_LEN {
                return Err(PwVaultError::MalformedVault(format!(
                    "salt must be {SALT_LEN} bytes, got {}",
                    kdf.salt.len()
                )));
            }
            kdf.params().check().map_err(|e| match e {
                PwVaultError::KeyDerivationFailed(reason) => PwVaultError::MalformedVault(reason),
                other => other,
            })?;
        }

        if let Some(pos) = self.entries.iter().position(|e| e.alias.is_empty()) {
            return Err(PwVaultError::MalformedVault(format!(
                "entry #{} has an empty alias",
                pos + 1
            )));
        }

        Ok(())
    }
}

impl Default for VaultFile {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings written into a freshly created vault.
pub fn default_settings() -> Map<String, Value> {
    let mut settings = Map::new();
    settings.insert(SETTING_COPY_TO_CLIPBOARD.into(), Value::Bool(true));
    settings.insert(SETTING_HIDE_IN_CONSOLE.into(), Value::Bool(false));
    settings.insert(SETTING_HIDE_MASTER.into(), Value::Bool(true));
    settings
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Read and validate a vault file.
///
/// Returns `Ok(None)` when the file does not exist (first run).  Any
/// other I/O failure is a storage error; a file that exists but does not
/// parse or violates the format invariants is `MalformedVault`.
pub fn read_vault(path: &Path) -> Result<Option<VaultFile>> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let file: VaultFile = serde_json::from_slice(&data)
        .map_err(|e| PwVaultError::MalformedVault(format!("{}: {e}", path.display())))?;

    file.validate()?;
    Ok(Some(file))
}

/// Write a vault file to disk **atomically**.
///
/// 1. Serialize the vault to JSON.
/// 2. Write to a temp file in the same directory (owner-only on Unix).
/// 3. Rename temp file over the target path.
///
/// The rename ensures readers never see a half-written file.
pub fn write_vault(path: &Path, file: &VaultFile) -> Result<()> {
    let mut buf = serde_json::to_vec_pretty(file)
        .map_err(|e| PwVaultError::SerializationError(format!("vault: {e}")))?;
    buf.push(b'\n');

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    write_private(&tmp_path, &buf)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}

/// Copy the vault to `<unix millis>-<file name>` beside it.
///
/// Returns the backup path.
pub fn backup_vault(path: &Path) -> Result<PathBuf> {
    let parent = path.parent().unwrap_or(Path::new(""));
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    let backup = parent.join(format!("{}-{name}", Utc::now().timestamp_millis()));

    fs::copy(path, &backup)?;
    Ok(backup)
}

/// Delete the vault file.  A file that is already gone is not an error.
pub fn remove_vault(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Create (or truncate) `path` with owner-only permissions and write `data`.
fn write_private(path: &Path, data: &[u8]) -> Result<()> {
    use std::io::Write;

    #[cfg(unix)]
    let mut file = {
        use std::os::unix::fs::OpenOptionsExt;
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
    };

    #[cfg(not(unix))]
    let mut file = fs::File::create(path)?;

    file.write_all(data)?;
    file.sync_all()?;
    Ok(())
}
