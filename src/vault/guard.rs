//! Master secret establishment and verification.
//!
//! The vault never stores the master secret.  Instead it stores the
//! secret encrypted under the key derived from itself (`master_check`).
//! A candidate is accepted iff that record decrypts under the
//! candidate's derived key *and* the plaintext equals the candidate.

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::format::{KdfRecord, VaultFile};
use crate::crypto::kdf::{derive_key, generate_salt, Argon2Params, DerivedKey};
use crate::crypto::{decrypt, encrypt};
use crate::errors::{PwVaultError, Result};

/// First-time setup: derive a key from `secret` under a fresh salt and
/// record the master check in `file`.
///
/// The caller is responsible for persisting `file`.
pub fn initialize(file: &mut VaultFile, secret: &str, params: &Argon2Params) -> Result<DerivedKey> {
    if secret.is_empty() {
        return Err(PwVaultError::EmptySecret);
    }

    let salt = generate_salt();
    let key = derive_key(secret.as_bytes(), &salt, params)?;
    let check = encrypt(key.as_bytes(), secret.as_bytes())?;

    file.kdf = Some(KdfRecord::new(&salt, params));
    file.master_check = Some(check);
    Ok(key)
}

/// Verify `candidate` against an initialized vault.
///
/// Every failure, including a vault that was never initialized, is
/// reported as `WrongSecret`.
pub fn verify(file: &VaultFile, candidate: &str) -> Result<DerivedKey> {
    let (Some(kdf), Some(check)) = (&file.kdf, &file.master_check) else {
        return Err(PwVaultError::WrongSecret);
    };

    let key = derive_key(candidate.as_bytes(), &kdf.salt, &kdf.params())?;

    let plaintext = match decrypt(key.as_bytes(), check) {
        Ok(bytes) => Zeroizing::new(bytes),
        Err(_) => return Err(PwVaultError::WrongSecret),
    };

    if bool::from(plaintext.as_slice().ct_eq(candidate.as_bytes())) {
        Ok(key)
    } else {
        Err(PwVaultError::WrongSecret)
    }
}

/// Unlock `file` with `candidate`, initializing it first if no master
/// secret has been established yet.
///
/// Returns the derived key and whether `file` was initialized (and so
/// must be persisted).  `params` only matters for initialization; an
/// existing vault always uses its stored parameters.
pub fn unlock(
    file: &mut VaultFile,
    candidate: &str,
    params: &Argon2Params,
) -> Result<(DerivedKey, bool)> {
    if file.is_initialized() {
        verify(file, candidate).map(|key| (key, false))
    } else {
        initialize(file, candidate, params).map(|key| (key, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> Argon2Params {
        Argon2Params {
            memory_kib: 8_192,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn initialize_sets_check_and_kdf() {
        let mut file = VaultFile::new();
        initialize(&mut file, "hunter2", &fast()).unwrap();

        assert!(file.is_initialized());
        assert_eq!(file.kdf.as_ref().unwrap().params(), fast());
    }

    #[test]
    fn verify_accepts_same_secret_with_same_key() {
        let mut file = VaultFile::new();
        let key = initialize(&mut file, "hunter2", &fast()).unwrap();

        let again = verify(&file, "hunter2").unwrap();
        assert_eq!(key.as_bytes(), again.as_bytes());
    }

    #[test]
    fn verify_rejects_other_secrets() {
        let mut file = VaultFile::new();
        initialize(&mut file, "hunter2", &fast()).unwrap();

        for wrong in ["wrong", "hunter", "hunter22", "Hunter2", ""] {
            assert!(matches!(
                verify(&file, wrong),
                Err(PwVaultError::WrongSecret)
            ));
        }
    }

    #[test]
    fn verify_on_fresh_vault_is_wrong_secret() {
        let file = VaultFile::new();
        assert!(matches!(
            verify(&file, "anything"),
            Err(PwVaultError::WrongSecret)
        ));
    }

    #[test]
    fn unlock_initializes_only_once() {
        let mut file = VaultFile::new();
        let (_, created) = unlock(&mut file, "first", &fast()).unwrap();
        assert!(created);

        let check = file.master_check.clone();
        let (_, created) = unlock(&mut file, "first", &fast()).unwrap();
        assert!(!created);
        assert_eq!(file.master_check, check);

        assert!(unlock(&mut file, "second", &fast()).is_err());
        assert_eq!(file.master_check, check);
    }

    #[test]
    fn empty_secret_cannot_initialize() {
        let mut file = VaultFile::new();
        assert!(matches!(
            initialize(&mut file, "", &fast()),
            Err(PwVaultError::EmptySecret)
        ));
        assert!(!file.is_initialized());
    }

    #[test]
    fn swapped_check_record_is_wrong_secret() {
        // A check produced for another secret must not verify, even if the
        // salt and params are intact.
        let mut a = VaultFile::new();
        let mut b = VaultFile::new();
        initialize(&mut a, "alpha", &fast()).unwrap();
        initialize(&mut b, "beta", &fast()).unwrap();
        a.master_check = b.master_check.clone();

        assert!(verify(&a, "alpha").is_err());
        assert!(verify(&a, "beta").is_err());
    }
}
