//! `pwvault edit` — replace an entry's secret, optionally renaming it.
//!
//! The entry keeps its position in the vault.

use crate::cli::output;
use crate::cli::{audit, load_settings, open_session, read_entry_secret, reveal, Cli};
use crate::errors::{PwVaultError, Result};
use crate::vault::Session;

/// Execute the `edit` command.
pub fn execute(
    cli: &Cli,
    alias: &str,
    rename: Option<&str>,
    generate: bool,
    length: Option<usize>,
) -> Result<()> {
    let settings = load_settings()?;
    let mut session = open_session(cli, &settings)?;

    let entry = session.find_exact(alias)?;
    let new_alias = rename.unwrap_or(alias);

    if new_alias != alias && session.find_exact(new_alias).is_ok() {
        return Err(PwVaultError::EntryAlreadyExists(new_alias.to_string()));
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
        read_entry_secret(new_alias)?
    };

    session.edit(entry, new_alias, &secret)?;

    let detail = (new_alias != alias).then(|| format!("renamed to {new_alias}"));
    audit(session.path(), "edit", Some(alias), detail.as_deref());

    output::success(&format!("Edited '{new_alias}'"));

    if generate {
        reveal(&session, new_alias, &secret);
    }

    Ok(())
}
