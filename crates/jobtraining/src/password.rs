//! Argon2 hashing for post deletion passwords.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!("Failed to hash password: {e}");
            AppError::Internal
        })?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| {
        tracing::error!("Stored password hash is unreadable: {e}");
        AppError::Internal
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_roundtrip() {
        let hash = hash_password("abc").unwrap();
        assert_ne!(hash, "abc");
        assert!(verify_password("abc", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_salted_hashes_differ() {
        assert_ne!(hash_password("abc").unwrap(), hash_password("abc").unwrap());
    }

    #[test]
    fn test_garbage_hash_is_internal_error() {
        assert!(matches!(
            verify_password("abc", "not-a-phc-string"),
            Err(AppError::Internal)
        ));
    }
}
