pub mod claims;
pub mod errors;
pub mod keys;
pub mod signer;
pub mod verifier;

pub use claims::Claims;
pub use errors::JwtError;
pub use keys::KeyPair;
pub use signer::JwtSigner;
pub use verifier::JwtVerifier;
