//! Authentication utilities library
//!
//! Provides the credential primitives used by the user service:
//! - Salted password hashing (Argon2id over `password ‖ salt`)
//! - RS256 token signing and verification, with the private and public halves
//!   held by separate types
//! - Authentication coordination for the login flow
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{PasswordHasher, Salt};
//!
//! let hasher = PasswordHasher::new();
//! let salt = Salt::generate().unwrap();
//! let hash = hasher.hash("Password123!", &salt).unwrap();
//! assert!(hasher.verify("Password123!", &hash, &salt).is_ok());
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::KeyPair;
//! use chrono::Duration;
//!
//! let private_pem = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/keys/private.pem"));
//! let public_pem = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/keys/public.pem"));
//!
//! let (signer, verifier) = KeyPair::from_pem(private_pem, public_pem, Duration::hours(24))
//!     .unwrap()
//!     .into_parts();
//! let token = signer.sign(42).unwrap();
//! assert_eq!(verifier.verify(&token).unwrap().user_id, 42);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, JwtSigner};
//! use chrono::Duration;
//!
//! let private_pem = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/keys/private.pem"));
//! let auth = Authenticator::new(JwtSigner::from_pem(private_pem, Duration::hours(24)).unwrap());
//!
//! // Register: salt and hash password
//! let hashed = auth.hash_password("Password123!").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth
//!     .authenticate("Password123!", &hashed.hash, hashed.salt.as_str(), 1)
//!     .unwrap();
//! println!("Token: {}", result.access_token);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

#[cfg(test)]
mod test_support;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::HashedPassword;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtSigner;
pub use jwt::JwtVerifier;
pub use jwt::KeyPair;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::Salt;
