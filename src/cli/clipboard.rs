//! System clipboard access for revealed secrets.

use crate::errors::{PwVaultError, Result};

/// Put `text` on the system clipboard.
///
/// Fails on headless systems or when no clipboard provider is running;
/// callers treat that as a warning, not an error.
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| PwVaultError::CommandFailed(format!("clipboard unavailable: {e}")))?;

    clipboard
        .set_text(text.to_string())
        .map_err(|e| PwVaultError::CommandFailed(format!("clipboard write failed: {e}")))
}
