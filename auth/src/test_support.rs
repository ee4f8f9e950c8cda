//! RSA key fixtures shared by unit tests.

pub const PRIVATE_PEM: &[u8] =
    include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/keys/private.pem"));

pub const PUBLIC_PEM: &[u8] =
    include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/keys/public.pem"));

/// Public half of an unrelated key pair.
pub const OTHER_PUBLIC_PEM: &[u8] =
    include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/keys/other_public.pem"));

pub fn key_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("keys")
        .join(name)
}
