use rand::rngs::OsRng;
use rand::RngCore;
use ring::hmac;

use super::errors::PasswordError;

/// Salted password digest as stored on a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    /// HMAC-SHA512 output (64 bytes)
    pub hash: Vec<u8>,
    /// Random key used for the HMAC (128 bytes)
    pub salt: Vec<u8>,
}

/// Password hashing implementation.
///
/// Digests passwords with HMAC-SHA512 keyed by a per-password random salt.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Length of the produced hash in bytes.
    pub const HASH_LENGTH: usize = 64;

    /// Length of the generated salt (HMAC key) in bytes.
    pub const SALT_LENGTH: usize = 128;

    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a freshly generated salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Digest holding the 64-byte hash and the 128-byte salt
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty or whitespace only
    /// * `RandomSource` - The OS random source could not produce a salt
    pub fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordError> {
        ensure_not_blank(password)?;

        let mut salt = vec![0u8; Self::SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::RandomSource(e.to_string()))?;

        let key = hmac::Key::new(hmac::HMAC_SHA512, &salt);
        let hash = hmac::sign(&key, password.as_bytes()).as_ref().to_vec();

        Ok(PasswordDigest { hash, salt })
    }

    /// Verify a password against a stored hash and salt.
    ///
    /// The comparison runs in constant time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Hash produced by [`PasswordHasher::hash`]
    /// * `stored_salt` - Salt produced alongside the hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty or whitespace only
    /// * `InvalidHashLength` - Stored hash is not 64 bytes
    /// * `InvalidSaltLength` - Stored salt is not 128 bytes
    pub fn verify(
        &self,
        password: &str,
        stored_hash: &[u8],
        stored_salt: &[u8],
    ) -> Result<bool, PasswordError> {
        ensure_not_blank(password)?;

        if stored_hash.len() != Self::HASH_LENGTH {
            return Err(PasswordError::InvalidHashLength {
                expected: Self::HASH_LENGTH,
                actual: stored_hash.len(),
            });
        }

        if stored_salt.len() != Self::SALT_LENGTH {
            return Err(PasswordError::InvalidSaltLength {
                expected: Self::SALT_LENGTH,
                actual: stored_salt.len(),
            });
        }

        let key = hmac::Key::new(hmac::HMAC_SHA512, stored_salt);

        Ok(hmac::verify(&key, password.as_bytes(), stored_hash).is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_not_blank(password: &str) -> Result<(), PasswordError> {
    if password.trim().is_empty() {
        Err(PasswordError::EmptyPassword)
    } else {
        Ok(())
    }
}
