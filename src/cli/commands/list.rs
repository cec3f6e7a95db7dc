//! `pwvault list` — display all entry aliases in a table.

use crate::cli::output;
use crate::cli::{load_settings, open_session, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let session = open_session(cli, &settings)?;

    let entries = session.entries();
    output::info(&format!(
        "{} — {} entr{}",
        session.path().display(),
        entries.len(),
        if entries.len() == 1 { "y" } else { "ies" }
    ));
    output::print_entries_table(&entries);

    Ok(())
}
