use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;
use super::salt::Salt;

/// Password hashing implementation.
///
/// Hashes `password ‖ salt` with Argon2id at a fixed work factor. The same
/// salt bytes seed Argon2, so a given (password, salt) pair always produces
/// the same PHC string and two salts never collide on one password.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher using Argon2id v1.3 with 19 MiB memory, 2 passes, 1 lane
    pub fn new() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
        }
    }

    /// Hash a plaintext password with the given salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    /// * `salt` - Salt generated for this password-set event
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `InvalidSalt` - Salt cannot be used as an Argon2 salt
    /// * `HashingFailed` - Combined input is too long or hashing failed
    pub fn hash(&self, password: &str, salt: &Salt) -> Result<String, PasswordError> {
        let argon2_salt = SaltString::encode_b64(salt.as_bytes())
            .map_err(|e| PasswordError::InvalidSalt(e.to_string()))?;

        self.argon2
            .hash_password(&salted(password, salt), &argon2_salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash and its salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    /// * `salt` - Salt stored alongside the hash
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match the stored hash
    /// * `VerificationFailed` - Hash format is invalid or verification failed
    pub fn verify(&self, password: &str, hash: &str, salt: &Salt) -> Result<(), PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        match self
            .argon2
            .verify_password(&salted(password, salt), &parsed_hash)
        {
            Ok(()) => Ok(()),
            Err(PasswordHashError::Password) => Err(PasswordError::Mismatch),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn salted(password: &str, salt: &Salt) -> Vec<u8> {
    let mut combined = Vec::with_capacity(password.len() + salt.as_str().len());
    combined.extend_from_slice(password.as_bytes());
    combined.extend_from_slice(salt.as_str().as_bytes());
    combined
}
