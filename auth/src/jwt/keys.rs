use std::fs;
use std::path::Path;

use chrono::Duration;

use super::errors::JwtError;
use super::signer::JwtSigner;
use super::verifier::JwtVerifier;

/// RSA key pair loaded once at startup.
///
/// Split with [`KeyPair::into_parts`] so the signing half stays with the login
/// flow and the verifying half can be shared with request middleware.
pub struct KeyPair {
    signer: JwtSigner,
    verifier: JwtVerifier,
}

impl KeyPair {
    /// Build a key pair from PEM-encoded private and public keys.
    ///
    /// # Arguments
    /// * `private_pem` - RSA private key
    /// * `public_pem` - Matching RSA public key
    /// * `lifetime` - Lifetime of tokens minted by the signer
    ///
    /// # Errors
    /// * `InvalidKey` - Either key fails to parse, or the public key does not
    ///   verify tokens signed by the private key
    pub fn from_pem(
        private_pem: &[u8],
        public_pem: &[u8],
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let signer = JwtSigner::from_pem(private_pem, lifetime)?;
        let verifier = JwtVerifier::from_pem(public_pem)?;

        let check_token = signer.sign(0)?;
        verifier.verify(&check_token).map_err(|e| {
            JwtError::InvalidKey(format!("public key does not match private key: {}", e))
        })?;

        Ok(Self { signer, verifier })
    }

    /// Read both keys from disk.
    ///
    /// # Errors
    /// * `KeyUnreadable` - Either file could not be read
    /// * `InvalidKey` - See [`KeyPair::from_pem`]
    pub fn load(
        private_key_path: impl AsRef<Path>,
        public_key_path: impl AsRef<Path>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let private_pem = read_pem(private_key_path.as_ref())?;
        let public_pem = read_pem(public_key_path.as_ref())?;

        Self::from_pem(&private_pem, &public_pem, lifetime)
    }

    pub fn into_parts(self) -> (JwtSigner, JwtVerifier) {
        (self.signer, self.verifier)
    }
}

fn read_pem(path: &Path) -> Result<Vec<u8>, JwtError> {
    fs::read(path).map_err(|e| JwtError::KeyUnreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
