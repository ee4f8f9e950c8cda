use crate::jwt::JwtError;
use crate::jwt::JwtSigner;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::password::Salt;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds the signing half of the key pair only. Token verification is done by
/// a separate [`crate::JwtVerifier`] so components that check tokens never
/// gain the ability to mint them.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_signer: JwtSigner,
}

/// Salted hash ready for storage.
#[derive(Debug, Clone)]
pub struct HashedPassword {
    pub hash: String,
    pub salt: Salt,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_signer` - Signer built from the process private key
    pub fn new(jwt_signer: JwtSigner) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_signer,
        }
    }

    /// Salt and hash a password for storage.
    ///
    /// A fresh salt is drawn on every call.
    ///
    /// # Errors
    /// * `PasswordError` - Salt generation or hashing failed
    pub fn hash_password(&self, password: &str) -> Result<HashedPassword, PasswordError> {
        let salt = Salt::generate()?;
        let hash = self.password_hasher.hash(password, &salt)?;

        Ok(HashedPassword { hash, salt })
    }

    /// Check a plaintext password against a stored hash and salt.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored salt or hash is unusable
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
        stored_salt: &str,
    ) -> Result<(), AuthenticationError> {
        let salt = Salt::from_hex(stored_salt)?;

        match self.password_hasher.verify(password, stored_hash, &salt) {
            Ok(()) => Ok(()),
            Err(PasswordError::Mismatch) => Err(AuthenticationError::InvalidCredentials),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `stored_salt` - Hex salt stored with the hash
    /// * `user_id` - Identity to embed in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        stored_salt: &str,
        user_id: i64,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.verify_password(password, stored_hash, stored_salt)?;

        let access_token = self.jwt_signer.sign(user_id)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Fail a login for which no stored credentials exist.
    ///
    /// Runs one Argon2 hash against a throwaway salt so the rejection costs
    /// about as much as a real verification.
    pub fn reject_unknown_user(&self, password: &str) -> AuthenticationError {
        let _ = Salt::generate().and_then(|salt| self.password_hasher.hash(password, &salt));

        AuthenticationError::InvalidCredentials
    }
}
