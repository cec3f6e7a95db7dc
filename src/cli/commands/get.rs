//! `pwvault get` — reveal a single entry's secret.

use crate::cli::{audit, load_settings, open_session, reveal, Cli};
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, alias: &str) -> Result<()> {
    let settings = load_settings()?;
    let session = open_session(cli, &settings)?;

    let entry = session.find_exact(alias)?;
    let secret = zeroize::Zeroizing::new(session.get(entry)?);

    audit(session.path(), "get", Some(alias), None);
    reveal(&session, alias, &secret);

    Ok(())
}
