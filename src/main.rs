use clap::Parser;
use pwvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add {
            ref alias,
            generate,
            length,
        } => pwvault::cli::commands::add::execute(&cli, alias, generate, length),
        Commands::Get { ref alias } => pwvault::cli::commands::get::execute(&cli, alias),
        Commands::List => pwvault::cli::commands::list::execute(&cli),
        Commands::ListAll => pwvault::cli::commands::list_all::execute(&cli),
        Commands::Find { ref prefix } => pwvault::cli::commands::find::execute(&cli, prefix),
        Commands::Edit {
            ref alias,
            ref rename,
            generate,
            length,
        } => pwvault::cli::commands::edit::execute(
            &cli,
            alias,
            rename.as_deref(),
            generate,
            length,
        ),
        Commands::Delete { ref alias, force } => {
            pwvault::cli::commands::delete::execute(&cli, alias, force)
        }
        Commands::Generate { length } => pwvault::cli::commands::generate::execute(length),
        Commands::Config { ref key, ref value } => {
            pwvault::cli::commands::config_cmd::execute(&cli, key.as_deref(), value.as_deref())
        }
        Commands::Reset {
            backup,
            no_backup,
            force,
        } => pwvault::cli::commands::reset::execute(&cli, backup, no_backup, force),
        Commands::Audit { last, ref since } => run_audit(&cli, last, since.as_deref()),
        Commands::KeyfileGenerate { ref path, length } => {
            pwvault::cli::commands::keyfile::execute(&cli, path.as_deref(), length)
        }
        Commands::Completions { shell } => pwvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        pwvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

#[cfg(feature = "audit-log")]
fn run_audit(cli: &Cli, last: usize, since: Option<&str>) -> pwvault::errors::Result<()> {
    pwvault::cli::commands::audit_cmd::execute(cli, last, since)
}

#[cfg(not(feature = "audit-log"))]
fn run_audit(_cli: &Cli, _last: usize, _since: Option<&str>) -> pwvault::errors::Result<()> {
    Err(pwvault::errors::PwVaultError::CommandFailed(
        "this build has no audit log (enable the `audit-log` feature)".into(),
    ))
}
