use chrono::Duration;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::JwtError;

/// Issues RS256-signed access tokens.
///
/// Holds only the private key; verification lives in [`super::JwtVerifier`].
#[derive(Clone)]
pub struct JwtSigner {
    encoding_key: EncodingKey,
    lifetime: Duration,
}

impl JwtSigner {
    /// Token lifetime used when configuration does not override it.
    pub const DEFAULT_LIFETIME_HOURS: i64 = 24;

    pub fn new(encoding_key: EncodingKey, lifetime: Duration) -> Self {
        Self {
            encoding_key,
            lifetime,
        }
    }

    /// Create a signer from a PEM-encoded RSA private key.
    ///
    /// The key is exercised once so a key that parses but cannot sign (e.g. a
    /// public key) is rejected here rather than on the first login.
    ///
    /// # Errors
    /// * `InvalidKey` - PEM could not be parsed as an RSA private key
    pub fn from_pem(private_pem: &[u8], lifetime: Duration) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| JwtError::InvalidKey(format!("private key: {}", e)))?;

        let signer = Self::new(encoding_key, lifetime);
        signer
            .sign(0)
            .map_err(|e| JwtError::InvalidKey(format!("private key: {}", e)))?;

        Ok(signer)
    }

    /// Mint a token for a user, expiring after the configured lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding or signing failed
    pub fn sign(&self, user_id: i64) -> Result<String, JwtError> {
        self.encode(&Claims::for_user(user_id, self.lifetime))
    }

    /// Sign arbitrary claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(Algorithm::RS256);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}
