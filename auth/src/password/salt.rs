use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

use super::errors::PasswordError;

/// Per-credential random salt, stored hex-encoded next to the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt {
    encoded: String,
    bytes: Vec<u8>,
}

impl Salt {
    /// Number of random bytes drawn for a fresh salt.
    pub const LENGTH: usize = 16;

    // Argon2 salts are capped at 64 base64 characters.
    const MAX_LENGTH: usize = 48;

    /// Draw a fresh salt from the operating system CSPRNG.
    ///
    /// # Returns
    /// Salt holding 16 random bytes
    ///
    /// # Errors
    /// * `SaltGenerationFailed` - The entropy source could not be read
    pub fn generate() -> Result<Self, PasswordError> {
        let mut bytes = vec![0u8; Self::LENGTH];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| PasswordError::SaltGenerationFailed(e.to_string()))?;

        Ok(Self {
            encoded: hex::encode(&bytes),
            bytes,
        })
    }

    /// Rebuild a salt from its stored hex form.
    ///
    /// # Errors
    /// * `InvalidSalt` - Not hex, or decodes to fewer than 16 / more than 48 bytes
    pub fn from_hex(encoded: impl Into<String>) -> Result<Self, PasswordError> {
        let encoded = encoded.into();
        let bytes =
            hex::decode(&encoded).map_err(|e| PasswordError::InvalidSalt(e.to_string()))?;

        if bytes.len() < Self::LENGTH || bytes.len() > Self::MAX_LENGTH {
            return Err(PasswordError::InvalidSalt(format!(
                "expected between {} and {} bytes, got {}",
                Self::LENGTH,
                Self::MAX_LENGTH,
                bytes.len()
            )));
        }

        Ok(Self { encoded, bytes })
    }

    /// Hex form, as persisted.
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// Raw salt bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.encoded.fmt(f)
    }
}
