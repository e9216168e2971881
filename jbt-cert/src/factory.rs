//! Self-signed RSA certificate generation.
//!
//! Produces an RSA key pair and an X.509 v3 certificate signed with
//! SHA-256 / PKCS#1 v1.5 by that same key. Subject and issuer common names
//! are set independently so the certificate can pose as issued by another
//! authority while still verifying against its embedded key.

use crate::error::{CertError, CertResult};
use chrono::{DateTime, Utc};
use const_oid::db::rfc4519;
use der::asn1::{Any, GeneralizedTime, SetOfVec, UtcTime, Utf8StringRef};
use der::pem::LineEnding;
use der::EncodePem;
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs1v15::{Signature, SigningKey};
use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;
use tracing::{debug, info};
use x509_cert::attr::AttributeTypeAndValue;
use x509_cert::builder::{Builder, CertificateBuilder, Profile};
use x509_cert::name::{Name, RdnSequence, RelativeDistinguishedName};
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::SubjectPublicKeyInfoOwned;
use x509_cert::time::{Time, Validity};
use zeroize::Zeroizing;

/// Smallest RSA modulus the factory will generate.
pub const MIN_KEY_BITS: usize = 512;

/// Default RSA public exponent (F4).
pub const DEFAULT_PUBLIC_EXPONENT: u64 = 65537;

/// Default RSA modulus size.
pub const DEFAULT_KEY_BITS: usize = 4096;

/// Length of generated serial numbers in bytes (RFC 5280 maximum).
const SERIAL_NUMBER_LEN: usize = 20;

/// 2000-01-01T00:00:00Z
const DEFAULT_NOT_BEFORE_SECS: i64 = 946_684_800;

/// 2099-12-31T23:59:59Z
const DEFAULT_NOT_AFTER_SECS: i64 = 4_102_444_799;

/// First year that must be encoded as GeneralizedTime (RFC 5280 §4.1.2.5).
const GENERALIZED_TIME_FROM_YEAR: u16 = 2050;

/// Certificate generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateParams {
    /// Start of the validity window.
    pub not_before: DateTime<Utc>,
    /// End of the validity window.
    pub not_after: DateTime<Utc>,
    /// RSA public exponent.
    pub public_exponent: u64,
    /// RSA modulus size in bits.
    pub key_size_bits: usize,
    /// Subject common name.
    pub subject_name: String,
    /// Issuer common name.
    pub issuer_name: String,
}

impl Default for CertificateParams {
    fn default() -> Self {
        Self {
            not_before: DateTime::from_timestamp(DEFAULT_NOT_BEFORE_SECS, 0).unwrap_or_default(),
            not_after: DateTime::from_timestamp(DEFAULT_NOT_AFTER_SECS, 0).unwrap_or_default(),
            public_exponent: DEFAULT_PUBLIC_EXPONENT,
            key_size_bits: DEFAULT_KEY_BITS,
            subject_name: "anonymous-from-2000-01-01".to_string(),
            issuer_name: "JetProfile CA".to_string(),
        }
    }
}

/// A freshly generated private key and its certificate, both PEM encoded.
pub struct KeyPair {
    private_key_pem: Zeroizing<String>,
    certificate_pem: String,
}

impl KeyPair {
    /// Returns the unencrypted PKCS#1 private key (`BEGIN RSA PRIVATE KEY`).
    #[must_use]
    pub fn private_key_pem(&self) -> &str {
        &self.private_key_pem
    }

    /// Returns the certificate PEM (`BEGIN CERTIFICATE`).
    #[must_use]
    pub fn certificate_pem(&self) -> &str {
        &self.certificate_pem
    }

    /// Splits into `(private_key_pem, certificate_pem)`.
    #[must_use]
    pub fn into_parts(self) -> (Zeroizing<String>, String) {
        (self.private_key_pem, self.certificate_pem)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key_pem", &"[REDACTED]")
            .field("certificate_pem", &self.certificate_pem)
            .finish()
    }
}

/// Generates an RSA key pair and a certificate signed by it.
///
/// Key generation is CPU bound and takes seconds for 4096-bit keys.
///
/// # Errors
///
/// - [`CertError::Keygen`] when `key_size_bits` is below [`MIN_KEY_BITS`] or
///   the RSA backend refuses the parameters.
/// - [`CertError::InvalidValidity`] when the window is inverted or predates 1970.
pub fn generate_certificate(params: &CertificateParams) -> CertResult<KeyPair> {
    if params.key_size_bits < MIN_KEY_BITS {
        return Err(CertError::Keygen(format!(
            "key size {} is below the minimum of {MIN_KEY_BITS} bits",
            params.key_size_bits
        )));
    }
    if params.not_after < params.not_before {
        return Err(CertError::InvalidValidity(
            "not_after precedes not_before".to_string(),
        ));
    }

    let validity = Validity {
        not_before: x509_time(params.not_before)?,
        not_after: x509_time(params.not_after)?,
    };

    info!(
        key_size_bits = params.key_size_bits,
        public_exponent = params.public_exponent,
        "Generating RSA key pair"
    );
    let exponent = rsa::BigUint::from(params.public_exponent);
    let private_key = RsaPrivateKey::new_with_exp(&mut OsRng, params.key_size_bits, &exponent)
        .map_err(|e| CertError::Keygen(e.to_string()))?;

    let spki = SubjectPublicKeyInfoOwned::from_key(private_key.to_public_key())
        .map_err(|e| CertError::InvalidPublicKey(e.to_string()))?;
    let serial_number = random_serial_number()?;
    let subject = common_name(&params.subject_name)?;
    let issuer = common_name(&params.issuer_name)?;

    let signer = SigningKey::<Sha256>::new(private_key.clone());
    let builder = CertificateBuilder::new(
        Profile::Manual {
            issuer: Some(issuer),
        },
        serial_number,
        validity,
        subject,
        spki,
        &signer,
    )
    .map_err(|e| CertError::CertificateBuild(e.to_string()))?;
    let certificate = builder
        .build::<Signature>()
        .map_err(|e| CertError::CertificateBuild(e.to_string()))?;

    debug!(
        serial = ?certificate.tbs_certificate.serial_number,
        subject = %params.subject_name,
        issuer = %params.issuer_name,
        "Certificate signed"
    );

    let certificate_pem = certificate.to_pem(LineEnding::LF)?;
    let private_key_pem = private_key
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| CertError::InvalidPrivateKey(e.to_string()))?;

    Ok(KeyPair {
        private_key_pem,
        certificate_pem,
    })
}

/// Loads an unencrypted RSA private key from PKCS#1 or PKCS#8 PEM.
pub fn load_private_key(pem: &[u8]) -> CertResult<RsaPrivateKey> {
    let text = std::str::from_utf8(pem).map_err(|_| CertError::InvalidEncoding)?;
    RsaPrivateKey::from_pkcs1_pem(text)
        .or_else(|_| RsaPrivateKey::from_pkcs8_pem(text))
        .map_err(|e| CertError::InvalidPrivateKey(e.to_string()))
}

/// Draws a positive serial number from the full 20-byte space.
fn random_serial_number() -> CertResult<SerialNumber> {
    let mut bytes = [0u8; SERIAL_NUMBER_LEN];
    OsRng.fill_bytes(&mut bytes);
    // Positive and minimally encoded.
    bytes[0] = (bytes[0] & 0x7f).max(1);
    Ok(SerialNumber::new(&bytes)?)
}

/// Builds a distinguished name holding a single UTF8String common name.
fn common_name(cn: &str) -> CertResult<Name> {
    let atv = AttributeTypeAndValue {
        oid: rfc4519::CN,
        value: Any::encode_from(&Utf8StringRef::new(cn)?)?,
    };
    let rdn = RelativeDistinguishedName(SetOfVec::try_from(vec![atv])?);
    Ok(RdnSequence(vec![rdn]))
}

fn x509_time(at: DateTime<Utc>) -> CertResult<Time> {
    let secs = u64::try_from(at.timestamp())
        .map_err(|_| CertError::InvalidValidity(format!("{at} predates the Unix epoch")))?;
    let date_time = der::DateTime::from_unix_duration(Duration::from_secs(secs))
        .map_err(|e| CertError::InvalidValidity(format!("{at}: {e}")))?;

    if date_time.year() < GENERALIZED_TIME_FROM_YEAR {
        Ok(Time::UtcTime(UtcTime::from_date_time(date_time)?))
    } else {
        Ok(Time::GeneralTime(GeneralizedTime::from_date_time(date_time)))
    }
}
