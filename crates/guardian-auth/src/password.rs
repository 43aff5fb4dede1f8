// SPDX-FileCopyrightText: 2026 Guardian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id password hashing.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`), so the
//! parameters used at registration travel with the hash and verification
//! keeps working after the configured costs change.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use guardian_config::model::AuthConfig;
use guardian_core::GuardianError;
use rand::RngCore;

/// Hash `password` with a fresh 16-byte salt and the configured costs.
pub fn hash_password(password: &[u8], config: &AuthConfig) -> Result<String, GuardianError> {
    let params = Params::new(
        config.kdf_memory_cost,
        config.kdf_iterations,
        config.kdf_parallelism,
        None,
    )
    .map_err(|e| GuardianError::Auth(format!("invalid Argon2id parameters: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut salt = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    let salt = SaltString::encode_b64(&salt)
        .map_err(|e| GuardianError::Auth(format!("failed to encode salt: {e}")))?;

    let hash = argon2
        .hash_password(password, &salt)
        .map_err(|e| GuardianError::Auth(format!("Argon2id hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Check `password` against a stored PHC string.
///
/// A mismatch is `Ok(false)`; a malformed stored hash is an error.
pub fn verify_password(password: &[u8], stored: &str) -> Result<bool, GuardianError> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| GuardianError::Auth(format!("stored password hash is malformed: {e}")))?;
    match Argon2::default().verify_password(password, &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(GuardianError::Auth(format!("password verification failed: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> AuthConfig {
        AuthConfig {
            kdf_memory_cost: 64,
            kdf_iterations: 1,
            kdf_parallelism: 1,
            ..AuthConfig::default()
        }
    }

    #[test]
    fn hash_is_argon2id_phc_with_configured_costs() {
        let hash = hash_password(b"correct horse", &cheap()).unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=64,t=1,p=1$"), "{hash}");
    }

    #[test]
    fn verify_accepts_the_right_password_only() {
        let hash = hash_password(b"correct horse", &cheap()).unwrap();
        assert!(verify_password(b"correct horse", &hash).unwrap());
        assert!(!verify_password(b"wrong horse", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password(b"same", &cheap()).unwrap();
        let b = hash_password(b"same", &cheap()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password(b"x", "not-a-phc-string").is_err());
    }

    #[test]
    fn invalid_params_are_rejected() {
        let config = AuthConfig {
            kdf_memory_cost: 1,
            ..cheap()
        };
        assert!(matches!(
            hash_password(b"x", &config),
            Err(GuardianError::Auth(_))
        ));
    }
}
