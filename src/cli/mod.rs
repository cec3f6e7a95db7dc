//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod clipboard;
pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PwVaultError, Result};
use crate::vault::format::{SETTING_COPY_TO_CLIPBOARD, SETTING_HIDE_IN_CONSOLE, SETTING_HIDE_MASTER};
use crate::vault::{MasterSource, Session, VaultStore};

/// PwVault CLI: encrypted local password store.
#[derive(Parser)]
#[command(name = "pwvault", about = "Encrypted local password store", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Master secret, or path to a keyfile containing it (prompted if omitted)
    #[arg(
        short,
        long,
        global = true,
        env = "PWVAULT_MASTER",
        hide_env_values = true
    )]
    pub master: Option<String>,

    /// Vault file (default: `vault_file` from .pwvault.toml, else pwvault.json)
    #[arg(long, global = true)]
    pub vault: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add an entry (secret is prompted, piped, or generated)
    Add {
        /// Entry alias (e.g. email)
        alias: String,
        /// Generate a random secret instead of prompting
        #[arg(short, long)]
        generate: bool,
        /// Length of the generated secret
        #[arg(short, long, requires = "generate")]
        length: Option<usize>,
    },

    /// Reveal an entry's secret
    Get {
        /// Entry alias
        alias: String,
    },

    /// List entry aliases
    List,

    /// Reveal every entry
    ListAll,

    /// Search aliases by prefix (reveals the entry on an exact match)
    Find {
        /// Alias prefix (empty lists everything)
        #[arg(default_value = "")]
        prefix: String,
    },

    /// Replace an entry's secret and optionally rename it
    Edit {
        /// Entry alias
        alias: String,
        /// New alias for the entry
        #[arg(long)]
        rename: Option<String>,
        /// Generate a random secret instead of prompting
        #[arg(short, long)]
        generate: bool,
        /// Length of the generated secret
        #[arg(short, long, requires = "generate")]
        length: Option<usize>,
    },

    /// Delete an entry
    Delete {
        /// Entry alias
        alias: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Print a random secret (does not touch the vault)
    Generate {
        /// Number of characters (default: generated_length from config)
        length: Option<usize>,
    },

    /// Show or change vault settings
    Config {
        /// Setting name (omit to list all)
        key: Option<String>,
        /// New value (JSON literal such as true or 30, otherwise a string)
        value: Option<String>,
    },

    /// Delete the vault, optionally keeping a timestamped backup
    Reset {
        /// Create a backup without asking
        #[arg(long, conflicts_with = "no_backup")]
        backup: bool,
        /// Skip the backup without asking
        #[arg(long)]
        no_backup: bool,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Write a new random master secret to a keyfile
    KeyfileGenerate {
        /// Path for the keyfile (default: pwvault.key beside the vault)
        path: Option<String>,
        /// Number of characters in the secret
        #[arg(long, default_value = "64")]
        length: usize,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.pwvault.toml` from the working directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Resolve the vault file path: `--vault`, else the configured file in
/// the working directory.
pub fn vault_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match &cli.vault {
        Some(path) => cwd.join(path),
        None => settings.vault_path(&cwd),
    })
}

/// Load and unlock the vault.
///
/// The master secret comes from `--master` / `PWVAULT_MASTER` when given,
/// otherwise from an interactive prompt.  On a vault that has no master
/// secret yet, the prompt asks for confirmation because the secret
/// becomes permanent.
pub fn open_session(cli: &Cli, settings: &Settings) -> Result<Session> {
    let path = vault_path(cli, settings)?;
    let store = VaultStore::load(&path)?;

    let source = match cli.master.as_deref() {
        Some(arg) if !arg.is_empty() => MasterSource::SecretOrPath(Zeroizing::new(arg.to_string())),
        _ => {
            let hide = store.setting_bool(SETTING_HIDE_MASTER).unwrap_or(true);
            let secret = if store.is_initialized() {
                prompt_master(hide)?
            } else {
                output::info(&format!("Creating a new vault at {}", path.display()));
                prompt_new_master(hide)?
            };
            MasterSource::Secret(secret)
        }
    };

    store.unlock(&source, &settings.argon2_params())
}

/// Prompt for the master secret of an existing vault.
pub fn prompt_master(hide: bool) -> Result<Zeroizing<String>> {
    let answer = if hide {
        dialoguer::Password::new()
            .with_prompt("Master secret")
            .interact()
    } else {
        dialoguer::Input::<String>::new()
            .with_prompt("Master secret")
            .interact_text()
    };
    let secret =
        answer.map_err(|e| PwVaultError::CommandFailed(format!("master secret prompt: {e}")))?;
    Ok(Zeroizing::new(secret))
}

/// Prompt for a new master secret with confirmation.
pub fn prompt_new_master(hide: bool) -> Result<Zeroizing<String>> {
    if !hide {
        return prompt_master(false);
    }

    let secret = dialoguer::Password::new()
        .with_prompt("Choose master secret")
        .with_confirmation("Confirm master secret", "Secrets do not match, try again")
        .interact()
        .map_err(|e| PwVaultError::CommandFailed(format!("master secret prompt: {e}")))?;
    Ok(Zeroizing::new(secret))
}

/// Read an entry's secret text from a pipe or a hidden prompt.
///
/// Piped input has trailing line endings removed.
pub fn read_entry_secret(alias: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end_matches(['\r', '\n']);
        return Ok(Zeroizing::new(trimmed.to_string()));
    }

    let secret = dialoguer::Password::new()
        .with_prompt(format!("Secret for {alias}"))
        .allow_empty_password(true)
        .interact()
        .map_err(|e| PwVaultError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(secret))
}

/// Ask a yes/no question.
pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| PwVaultError::CommandFailed(format!("confirm prompt: {e}")))
}

/// Show a revealed secret the way the vault's settings ask for.
///
/// Honors `hideInConsole` (do not echo) and `copyToClipboard`.
pub fn reveal(session: &Session, alias: &str, secret: &str) {
    let copy = session.setting_bool(SETTING_COPY_TO_CLIPBOARD).unwrap_or(true);
    let hide = session.setting_bool(SETTING_HIDE_IN_CONSOLE).unwrap_or(false);

    output::revealed(alias, (!hide).then_some(secret));

    if copy {
        match clipboard::copy(secret) {
            Ok(()) => output::tip("Copied to clipboard."),
            Err(e) => output::warning(&format!("Could not copy to clipboard: {e}")),
        }
    } else if hide {
        output::warning("hideInConsole is on and copyToClipboard is off — nothing was shown.");
    }
}

/// Record an operation in the audit log beside the vault.
///
/// A no-op when built without the `audit-log` feature.
pub fn audit(vault: &Path, op: &str, alias: Option<&str>, details: Option<&str>) {
    #[cfg(feature = "audit-log")]
    crate::audit::log_audit(vault, op, alias, details);

    #[cfg(not(feature = "audit-log"))]
    let _ = (vault, op, alias, details);
}
