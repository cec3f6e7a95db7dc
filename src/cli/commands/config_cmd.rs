//! `pwvault config` — show or change the settings stored in the vault.
//!
//! Usage:
//!   pwvault config                          # list all settings
//!   pwvault config copyToClipboard          # show one setting
//!   pwvault config copyToClipboard false    # change it
//!
//! Reading settings does not need the master secret; changing them does.

use comfy_table::{ContentArrangement, Table};
use serde_json::Value;

use crate::cli::output;
use crate::cli::{audit, load_settings, open_session, vault_path, Cli};
use crate::errors::{PwVaultError, Result};
use crate::vault::VaultStore;

/// Execute the `config` command.
pub fn execute(cli: &Cli, key: Option<&str>, value: Option<&str>) -> Result<()> {
    let settings = load_settings()?;

    match (key, value) {
        (None, _) => {
            let store = VaultStore::load(&vault_path(cli, &settings)?)?;
            print_settings_table(store.settings());
        }
        (Some(key), None) => {
            let store = VaultStore::load(&vault_path(cli, &settings)?)?;
            let current = store
                .settings()
                .get(key)
                .ok_or_else(|| PwVaultError::ConfigError(format!("no setting named '{key}'")))?;
            println!("{}", display_value(current));
        }
        (Some(key), Some(raw)) => {
            let mut session = open_session(cli, &settings)?;
            let parsed = parse_value(raw);
            let shown = display_value(&parsed);
            session.set_setting(key, parsed)?;

            audit(
                session.path(),
                "config",
                None,
                Some(&format!("{key} = {shown}")),
            );
            output::success(&format!("Set {key} = {shown}"));
        }
    }

    Ok(())
}

/// Parse a command-line value: JSON literals (`true`, `30`, `null`,
/// `[1,2]`) keep their type, anything else is stored as a string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Render a value for the terminal; strings are shown without quotes.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn print_settings_table(settings: &serde_json::Map<String, Value>) {
    if settings.is_empty() {
        output::info("No settings stored in this vault.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Setting", "Value"]);

    for (key, value) in settings {
        table.add_row(vec![key.clone(), display_value(value)]);
    }

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_keeps_json_types() {
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("30"), serde_json::json!(30));
        assert_eq!(parse_value("[1,2]"), serde_json::json!([1, 2]));
    }

    #[test]
    fn parse_value_falls_back_to_string() {
        assert_eq!(parse_value("yes please"), Value::String("yes please".into()));
        assert_eq!(parse_value(""), Value::String(String::new()));
    }

    #[test]
    fn display_value_unquotes_strings() {
        assert_eq!(display_value(&Value::String("abc".into())), "abc");
        assert_eq!(display_value(&Value::Bool(false)), "false");
    }
}
