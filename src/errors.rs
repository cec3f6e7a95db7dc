use thiserror::Error;

/// All errors that can occur in PwVault.
#[derive(Debug, Error)]
pub enum PwVaultError {
    // --- Unlock errors ---
    #[error("Wrong master secret")]
    WrongSecret,

    #[error("Master secret cannot be empty")]
    EmptySecret,

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — entry does not match the session key or is corrupted")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Malformed vault file: {0}")]
    MalformedVault(String),

    #[error("Entry reference is stale or out of range — look the entry up again")]
    InvalidReference,

    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    #[error("Entry '{0}' already exists")]
    EntryAlreadyExists(String),

    #[error("Invalid alias: {0}")]
    InvalidAlias(String),

    // --- Keyfile errors ---
    #[error("Keyfile error: {0}")]
    KeyfileError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for PwVault results.
pub type Result<T> = std::result::Result<T, PwVaultError>;
