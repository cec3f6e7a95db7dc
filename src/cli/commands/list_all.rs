//! `pwvault list-all` — decrypt and print every entry.
//!
//! Either every entry decrypts or nothing is printed: a single failure
//! means the vault holds entries under more than one key.

use zeroize::Zeroize;

use crate::cli::output;
use crate::cli::{audit, load_settings, open_session, Cli};
use crate::errors::Result;
use crate::vault::format::SETTING_HIDE_IN_CONSOLE;

/// Execute the `list-all` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let session = open_session(cli, &settings)?;

    if session.is_empty() {
        output::info("Nothing to list.");
        return Ok(());
    }

    let mut all = session.list_all()?;
    let hide = session.setting_bool(SETTING_HIDE_IN_CONSOLE).unwrap_or(false);

    audit(
        session.path(),
        "list-all",
        None,
        Some(&format!("{} entries revealed", all.len())),
    );

    for (alias, secret) in &all {
        output::revealed(alias, (!hide).then_some(secret.as_str()));
    }

    for (_, secret) in &mut all {
        secret.zeroize();
    }

    Ok(())
}
