//! `pwvault delete` — remove an entry from the vault.

use crate::cli::output;
use crate::cli::{audit, confirm, load_settings, open_session, Cli};
use crate::errors::Result;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, alias: &str, force: bool) -> Result<()> {
    let settings = load_settings()?;
    let mut session = open_session(cli, &settings)?;

    let entry = session.find_exact(alias)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force && !confirm(&format!("Delete entry '{alias}'?"), false)? {
        output::info("Cancelled.");
        return Ok(());
    }

    session.remove(entry)?;

    audit(session.path(), "delete", Some(alias), None);
    output::success(&format!("Deleted '{alias}'"));

    Ok(())
}
