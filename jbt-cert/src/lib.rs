//! Certificate tooling for license signing.
//!
//! This crate handles:
//! - Self-signed RSA certificate and key generation
//! - PKCS#1 v1.5 DigestInfo encoding with arbitrary digest OIDs
//! - Recovering the bare base64 body of a PEM certificate
//! - Deriving the signature pair that pins a certificate in a verifier
//!
//! RSA and X.509 primitives come from the RustCrypto `rsa` and `x509-cert`
//! crates; this crate only composes them.

mod digest_info;
mod error;
mod factory;
mod pem;
mod signature;

pub use digest_info::{pkcs1v15_encode, DigestInfo, MIN_PADDING_OVERHEAD};
pub use error::{CertError, CertResult};
pub use factory::{
    generate_certificate, load_private_key, CertificateParams, KeyPair, DEFAULT_KEY_BITS,
    DEFAULT_PUBLIC_EXPONENT, MIN_KEY_BITS,
};
pub use pem::{
    certificate_from_body, certificate_public_key, extract_certificate_body,
    parse_certificate_pem, CERT_BEGIN, CERT_END, MAX_PUBLIC_KEY_BITS,
};
pub use signature::{derive_signature_pair, root_public_key_modulus, SignaturePair};

pub use num_bigint::BigUint;
pub use x509_cert::Certificate;
