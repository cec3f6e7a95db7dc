//! `pwvault reset` — delete the vault, optionally keeping a backup.
//!
//! A readable vault must be unlocked first.  A vault that no longer
//! parses can be reset without the master secret, since that is the only
//! way out of a corrupted file.

use crate::cli::output;
use crate::cli::{audit, confirm, load_settings, open_session, vault_path, Cli};
use crate::errors::{PwVaultError, Result};
use crate::vault::VaultStore;

/// Execute the `reset` command.
pub fn execute(cli: &Cli, backup: bool, no_backup: bool, force: bool) -> Result<()> {
    let settings = load_settings()?;
    let path = vault_path(cli, &settings)?;

    if !path.exists() {
        output::info("No vault to reset.");
        return Ok(());
    }

    let session = match VaultStore::load(&path) {
        Ok(_) => Some(open_session(cli, &settings)?),
        Err(PwVaultError::MalformedVault(reason)) => {
            output::warning(&format!("Vault is malformed: {reason}"));
            None
        }
        Err(e) => return Err(e),
    };

    if !force
        && !confirm(
            &format!("Permanently delete the vault at {}?", path.display()),
            false,
        )?
    {
        output::info("Cancelled.");
        return Ok(());
    }

    let make_backup = if backup {
        true
    } else if no_backup {
        false
    } else {
        confirm("Create a backup first?", true)?
    };

    let backup_path = match session {
        Some(session) => session.reset(make_backup)?,
        None => VaultStore::reset(&path, make_backup)?,
    };

    let detail = backup_path
        .as_ref()
        .map(|p| format!("backup at {}", p.display()));
    audit(&path, "reset", None, detail.as_deref());

    if let Some(p) = backup_path {
        output::info(&format!("Backup created at {}", p.display()));
    }
    output::success("Vault reset.");

    Ok(())
}
