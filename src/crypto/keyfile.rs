//! Keyfile-based unlocking for PwVault.
//!
//! A keyfile simply holds the master secret as text.  Passing its path
//! instead of typing the secret lets scripts and shortcuts unlock the
//! vault without a prompt.  Both sources end up as the same string before
//! key derivation.

use std::fs;
use std::path::Path;

use zeroize::Zeroizing;

use super::generate::generate_secret;
use crate::errors::{PwVaultError, Result};

/// Length of the secret written by `generate_keyfile` when none is given.
pub const DEFAULT_KEYFILE_LEN: usize = 64;

/// Generate a new random secret and write it to `path`.
///
/// The file is written with restrictive permissions (owner-only read).
/// Returns the secret so the caller can use it immediately.
pub fn generate_keyfile(path: &Path, length: usize) -> Result<Zeroizing<String>> {
    if path.exists() {
        return Err(PwVaultError::KeyfileError(format!(
            "keyfile already exists at {}",
            path.display()
        )));
    }
    if length == 0 {
        return Err(PwVaultError::KeyfileError(
            "keyfile secret length must be at least 1".into(),
        ));
    }

    let secret = Zeroizing::new(generate_secret(length));

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                PwVaultError::KeyfileError(format!("cannot create keyfile directory: {e}"))
            })?;
        }
    }

    fs::write(path, secret.as_bytes())
        .map_err(|e| PwVaultError::KeyfileError(format!("failed to write keyfile: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(path, perms).map_err(|e| {
            PwVaultError::KeyfileError(format!("failed to set keyfile permissions: {e}"))
        })?;
    }

    Ok(secret)
}

/// Load a keyfile and normalize it to a secret string.
///
/// One trailing line ending (`\n` or `\r\n`) is stripped, since most
/// editors add one on save.  Empty files and non-UTF-8 contents are
/// rejected.
pub fn load_keyfile(path: &Path) -> Result<Zeroizing<String>> {
    if !path.is_file() {
        return Err(PwVaultError::KeyfileError(format!(
            "keyfile not found at {}",
            path.display()
        )));
    }

    let bytes = Zeroizing::new(
        fs::read(path)
            .map_err(|e| PwVaultError::KeyfileError(format!("failed to read keyfile: {e}")))?,
    );

    let text = std::str::from_utf8(&bytes)
        .map_err(|_| PwVaultError::KeyfileError("keyfile is not valid UTF-8".into()))?;

    let text = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);

    if text.is_empty() {
        return Err(PwVaultError::KeyfileError(format!(
            "keyfile at {} is empty",
            path.display()
        )));
    }

    Ok(Zeroizing::new(text.to_string()))
}
