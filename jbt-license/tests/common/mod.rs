//! Shared test helpers for license tests.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine};
use jbt_cert::{generate_certificate, CertificateParams, KeyPair};
use std::sync::OnceLock;

/// Returns a 2048-bit key pair generated once per test binary.
pub fn test_keypair() -> &'static KeyPair {
    static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();
    KEYPAIR.get_or_init(|| generate_test_keypair(2048))
}

/// Returns a second, unrelated key pair.
pub fn other_keypair() -> &'static KeyPair {
    static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();
    KEYPAIR.get_or_init(|| generate_test_keypair(1024))
}

pub fn generate_test_keypair(key_size_bits: usize) -> KeyPair {
    generate_certificate(&CertificateParams {
        key_size_bits,
        ..CertificateParams::default()
    })
    .expect("generate test certificate")
}

/// Issues a token with the shared fixture.
pub fn issue(license_id: &str, license_data: &str) -> String {
    let pair = test_keypair();
    jbt_license::issue_license(
        pair.certificate_pem().as_bytes(),
        pair.private_key_pem().as_bytes(),
        license_id,
        license_data,
    )
    .expect("issue license")
}

/// Builds a token from raw field values.
pub fn token_of(license_id: &str, license_data: &[u8], signature: &str, cert: &str) -> String {
    format!("{license_id}-{}-{signature}-{cert}", STANDARD.encode(license_data))
}
