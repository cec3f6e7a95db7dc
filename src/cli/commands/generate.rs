//! `pwvault generate` — print a random secret.

use crate::cli::load_settings;
use crate::errors::{PwVaultError, Result};
use crate::vault::Session;

/// Execute the `generate` command.
pub fn execute(length: Option<usize>) -> Result<()> {
    let length = match length {
        Some(n) => n,
        None => load_settings()?.generated_length,
    };

    if length == 0 {
        return Err(PwVaultError::CommandFailed(
            "length must be at least 1".into(),
        ));
    }

    println!("{}", Session::generate_secret(length));
    Ok(())
}
