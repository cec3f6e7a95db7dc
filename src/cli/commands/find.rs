//! `pwvault find` — prefix search over aliases.
//!
//! Prints the matching aliases, shortest first.  When the token is
//! itself an alias, that entry is revealed as well.

use crate::cli::output;
use crate::cli::{audit, load_settings, open_session, reveal, Cli};
use crate::errors::Result;

/// Execute the `find` command.
pub fn execute(cli: &Cli, prefix: &str) -> Result<()> {
    let settings = load_settings()?;
    let session = open_session(cli, &settings)?;

    if session.is_empty() {
        output::info("Nothing to find.");
        return Ok(());
    }

    if let Ok(entry) = session.find_exact(prefix) {
        let secret = zeroize::Zeroizing::new(session.get(entry)?);
        audit(session.path(), "get", Some(prefix), Some("via find"));
        reveal(&session, prefix, &secret);
        return Ok(());
    }

    let matches = session.search(prefix);
    if matches.is_empty() {
        output::info(&format!("No aliases start with '{prefix}'."));
        return Ok(());
    }

    output::print_aliases(&matches);
    Ok(())
}
