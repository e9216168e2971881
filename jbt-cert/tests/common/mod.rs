//! Shared test helpers for certificate tests.

#![allow(dead_code)]

use jbt_cert::{generate_certificate, CertificateParams, KeyPair};
use std::sync::OnceLock;

/// Key size used by the shared fixture; large enough for a SHA-256 DigestInfo.
pub const TEST_KEY_BITS: usize = 2048;

/// Returns a key pair generated once per test binary.
pub fn test_keypair() -> &'static KeyPair {
    static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();
    KEYPAIR.get_or_init(|| {
        generate_certificate(&CertificateParams {
            key_size_bits: TEST_KEY_BITS,
            ..CertificateParams::default()
        })
        .expect("generate test certificate")
    })
}

/// Returns the fixture certificate PEM as bytes.
pub fn test_cert_pem() -> &'static [u8] {
    test_keypair().certificate_pem().as_bytes()
}

/// A 4104-bit self-signed certificate made outside this crate.
pub const LARGE_KEY_CERT_PEM: &[u8] = include_bytes!("../fixtures/rsa4104_cert.pem");

/// Rewrites LF line endings as CRLF.
pub fn to_crlf(pem: &[u8]) -> Vec<u8> {
    String::from_utf8_lossy(pem).replace('\n', "\r\n").into_bytes()
}
