//! `pwvault add` — encrypt a new entry into the vault.

use crate::cli::output;
use crate::cli::{audit, load_settings, open_session, read_entry_secret, reveal, Cli};
use crate::errors::{PwVaultError, Result};
use crate::vault::Session;

/// Execute the `add` command.
pub fn execute(cli: &Cli, alias: &str, generate: bool, length: Option<usize>) -> Result<()> {
    let settings = load_settings()?;
    let mut session = open_session(cli, &settings)?;

    // Name-based commands need distinct aliases, even though the vault
    // itself would accept a duplicate.
    if session.find_exact(alias).is_ok() {
        output::tip(&format!("Use `pwvault edit {alias}` to change it."));
        return Err(PwVaultError::EntryAlreadyExists(alias.to_string()));
    }

    let secret = if generate {
        let length = length.unwrap_or(settings.generated_length);
        if length == 0 {
            return Err(PwVaultError::CommandFailed(
                "generated secret length must be at least 1".into(),
            ));
        }
        zeroize::Zeroizing::new(Session::generate_secret(length))
    } else {
        read_entry_secret(alias)?
    };

    session.add(alias, &secret)?;

    let detail = if generate { "generated" } else { "entered" };
    audit(session.path(), "add", Some(alias), Some(detail));

    output::success(&format!(
        "Added '{alias}' ({} entries total)",
        session.len()
    ));

    // A generated secret has never been seen by the user yet.
    if generate {
        reveal(&session, alias, &secret);
    }

    Ok(())
}
