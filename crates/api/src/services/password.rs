//! Credential hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use super::ServiceError;

/// Hash a password into an Argon2id PHC string.
///
/// # Errors
///
/// Returns `ServiceError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| ServiceError::PasswordHash)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    use super::*;

    #[test]
    fn test_hash_is_salted_and_verifiable() {
        let first = hash_password("1234").unwrap();
        let second = hash_password("1234").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);

        let parsed = PasswordHash::new(&first).unwrap();
        assert!(Argon2::default().verify_password(b"1234", &parsed).is_ok());
        assert!(Argon2::default().verify_password(b"4321", &parsed).is_err());
    }
}
