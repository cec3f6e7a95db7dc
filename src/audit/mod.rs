//! Operation history for a vault, kept in SQLite beside the vault file.
//!
//! Commands record what they did to which alias.  Secret text is never
//! written here.  Logging is best-effort: if the database cannot be
//! opened or written, the command carries on unlogged.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::errors::{PwVaultError, Result};

/// File name of the audit database.
const DB_FILE: &str = "pwvault-audit.db";

/// A single audit log entry.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub alias: Option<String>,
    pub details: Option<String>,
}

/// SQLite-backed audit log.
pub struct AuditLog {
    conn: Connection,
}

impl AuditLog {
    /// Open (or create) the audit database in `dir`.
    ///
    /// `None` means audit logging is unavailable for this run.
    pub fn open(dir: &Path) -> Option<Self> {
        let db_path = Self::db_path(dir);
        let conn = Connection::open(&db_path).ok()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&db_path, perms);
        }

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS audit_log (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp   TEXT NOT NULL,
                operation   TEXT NOT NULL,
                alias       TEXT,
                details     TEXT
            );",
        )
        .ok()?;

        Some(Self { conn })
    }

    /// Record an operation.  Errors are ignored.
    pub fn log(&self, operation: &str, alias: Option<&str>, details: Option<&str>) {
        let now = Utc::now().to_rfc3339();
        let _ = self.conn.execute(
            "INSERT INTO audit_log (timestamp, operation, alias, details)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![now, operation, alias, details],
        );
    }

    /// Most recent entries first, at most `limit` of them, optionally
    /// only those recorded at or after `since`.
    pub fn query(&self, limit: usize, since: Option<DateTime<Utc>>) -> Result<Vec<AuditEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let since = since.map(|ts| ts.to_rfc3339());

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, operation, alias, details
                 FROM audit_log
                 WHERE ?1 IS NULL OR timestamp >= ?1
                 ORDER BY id DESC
                 LIMIT ?2",
            )
            .map_err(|e| PwVaultError::AuditError(format!("query prepare: {e}")))?;

        let rows = stmt
            .query_map(rusqlite::params![since, limit], row_to_entry)
            .map_err(|e| PwVaultError::AuditError(format!("query exec: {e}")))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| PwVaultError::AuditError(format!("row parse: {e}")))
    }

    /// Return the path to the audit database in `dir`.
    pub fn db_path(dir: &Path) -> PathBuf {
        dir.join(DB_FILE)
    }
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<AuditEntry> {
    let raw: String = row.get(1)?;
    // An unparseable timestamp lists as "now" rather than hiding the row.
    let timestamp = DateTime::parse_from_rfc3339(&raw)
        .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

    Ok(AuditEntry {
        id: row.get(0)?,
        timestamp,
        operation: row.get(2)?,
        alias: row.get(3)?,
        details: row.get(4)?,
    })
}

/// Directory holding the audit database for the vault at `vault_path`.
pub fn audit_dir(vault_path: &Path) -> PathBuf {
    match vault_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Log one event in the database beside `vault_path`, ignoring failures.
pub fn log_audit(vault_path: &Path, op: &str, alias: Option<&str>, details: Option<&str>) {
    if let Some(audit) = AuditLog::open(&audit_dir(vault_path)) {
        audit.log(op, alias, details);
    }
}
