//! Certificate signature pairs used as trust-anchor parameters.
//!
//! A verifier pins a certificate by two integers: the raw RSA signature
//! `s` and the PKCS#1 v1.5 encoded SHA-256 digest `m` of the TBS bytes.
//! For a genuine signature `s^e mod n == m`.

use crate::digest_info::pkcs1v15_encode;
use crate::error::CertResult;
use crate::pem::{certificate_public_key, parse_certificate_pem};
use const_oid::db::rfc5912::ID_SHA_256;
use der::Encode;
use num_bigint::BigUint;
use rsa::traits::PublicKeyParts;
use sha2::{Digest, Sha256};
use tracing::debug;

/// The two integers derived from a certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePair {
    /// Certificate signature bytes as a big-endian unsigned integer.
    pub cert_sign: BigUint,
    /// PKCS#1 v1.5 encoding of `SHA-256(tbsCertificate)` as a big-endian unsigned integer.
    pub filled_cert_sign: BigUint,
}

/// Derives the signature pair from a PEM certificate.
///
/// # Errors
///
/// Fails when the PEM block is missing, the DER is malformed, the subject
/// key is not RSA, or the modulus is too small for a SHA-256 DigestInfo.
pub fn derive_signature_pair(certificate_pem: &[u8]) -> CertResult<SignaturePair> {
    let (_, cert) = parse_certificate_pem(certificate_pem)?;

    let cert_sign = BigUint::from_bytes_be(cert.signature.raw_bytes());

    let tbs = cert.tbs_certificate.to_der()?;
    let digest = Sha256::digest(&tbs);

    let public_key = certificate_public_key(&cert)?;
    let em_len = public_key.n().bits().div_ceil(8);
    debug!(em_len, tbs_len = tbs.len(), "Encoding certificate digest");

    let encoded = pkcs1v15_encode(ID_SHA_256, &digest, em_len, true)?;

    Ok(SignaturePair {
        cert_sign,
        filled_cert_sign: BigUint::from_bytes_be(&encoded),
    })
}

/// Returns the RSA modulus of the certificate's public key.
pub fn root_public_key_modulus(certificate_pem: &[u8]) -> CertResult<BigUint> {
    let (_, cert) = parse_certificate_pem(certificate_pem)?;
    let public_key = certificate_public_key(&cert)?;
    Ok(BigUint::from_bytes_be(&public_key.n().to_bytes_be()))
}
