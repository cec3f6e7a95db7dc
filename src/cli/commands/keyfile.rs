//! `pwvault keyfile-generate` — write a new random master secret to a file.
//!
//! Pass the file's path as `--master` to unlock with it.  Generate the
//! keyfile before the first unlock, since a vault's master secret never
//! changes afterwards.

use std::path::PathBuf;

use crate::cli::output;
use crate::cli::{load_settings, vault_path, Cli};
use crate::crypto::keyfile::generate_keyfile;
use crate::errors::Result;

/// Default keyfile name, created beside the vault.
const DEFAULT_KEYFILE: &str = "pwvault.key";

/// Execute the `keyfile-generate` command.
pub fn execute(cli: &Cli, keyfile_path: Option<&str>, length: usize) -> Result<()> {
    let path = match keyfile_path {
        Some(p) => PathBuf::from(p),
        None => {
            let settings = load_settings()?;
            let vault = vault_path(cli, &settings)?;
            vault
                .parent()
                .map_or_else(|| PathBuf::from(DEFAULT_KEYFILE), |dir| dir.join(DEFAULT_KEYFILE))
        }
    };

    generate_keyfile(&path, length)?;

    output::success(&format!("Keyfile generated at {}", path.display()));
    output::warning("Keep this file secret! Anyone with it can unlock your vault.");
    output::tip(&format!("Unlock with: pwvault --master {} <command>", path.display()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn keyfile_generate_creates_file() {
        let dir = TempDir::new().unwrap();
        let kf_path = dir.path().join("my.key");
        let kf = kf_path.to_str().unwrap();

        let cli = crate::cli::Cli::parse_from(["pwvault", "keyfile-generate", kf]);
        super::execute(&cli, Some(kf), 40).unwrap();

        let data = std::fs::read_to_string(&kf_path).unwrap();
        assert_eq!(data.len(), 40);
        assert!(data.bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn keyfile_generate_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let kf_path = dir.path().join("my.key");
        std::fs::write(&kf_path, "existing").unwrap();
        let kf = kf_path.to_str().unwrap();

        let cli = crate::cli::Cli::parse_from(["pwvault", "keyfile-generate", kf]);
        assert!(super::execute(&cli, Some(kf), 40).is_err());
        assert_eq!(std::fs::read_to_string(&kf_path).unwrap(), "existing");
    }
}
