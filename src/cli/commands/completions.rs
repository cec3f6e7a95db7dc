//! `pwvault completions` — print a shell completion script.
//!
//!   pwvault completions bash > ~/.local/share/bash-completion/completions/pwvault
//!   pwvault completions zsh > ~/.zfunc/_pwvault

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shell_generates_without_error() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            let mut cmd = Cli::command();
            let mut out = Vec::new();
            generate(shell, &mut cmd, "pwvault", &mut out);
            assert!(!out.is_empty(), "{shell} produced no script");
        }
    }
}
