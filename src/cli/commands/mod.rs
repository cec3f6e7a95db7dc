//! One module per subcommand, each exposing an `execute` entry point.

pub mod add;
#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod completions;
pub mod config_cmd;
pub mod delete;
pub mod edit;
pub mod find;
pub mod generate;
pub mod get;
pub mod keyfile;
pub mod list;
pub mod list_all;
pub mod reset;
