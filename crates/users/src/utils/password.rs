//! Password hashing and verification utilities.

use roster_database::{UserError, UserResult};

/// Fixed bcrypt work factor. Not configurable.
const HASH_COST: u32 = 10;

/// Hash a password with bcrypt.
///
/// bcrypt embeds a fresh random salt per call, so hashing the same
/// plaintext twice yields different strings.
pub fn hash_password(password: &str) -> UserResult<String> {
    bcrypt::hash(password, HASH_COST).map_err(|_| UserError::PasswordHashingFailed)
}

/// Verify a password against its stored hash.
///
/// A malformed hash verifies as `false` rather than surfacing a
/// structural error to the caller.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let password = "test_password_123";
        let hash = hash_password(password).unwrap();

        assert!(verify_password(password, &hash));
        assert!(!verify_password("wrong_password", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("secret1", &first));
        assert!(verify_password("secret1", &second));
    }

    #[test]
    fn test_malformed_hash_verifies_false() {
        assert!(!verify_password("secret1", "not-a-bcrypt-hash"));
        assert!(!verify_password("secret1", ""));
    }

    #[test]
    fn test_cross_password_rejection() {
        let hash = hash_password("secret2").unwrap();
        assert!(!verify_password("secret1", &hash));
    }
}
