//! Error types for certificate handling.

use thiserror::Error;

/// Result type for certificate operations.
pub type CertResult<T> = Result<T, CertError>;

/// Errors that can occur while building, reading or deriving from certificates.
#[derive(Debug, Error)]
pub enum CertError {
    /// The target encoded-message length cannot hold the DigestInfo plus padding.
    #[error("encoded message too short: {em_len} bytes, need at least {required}")]
    EncodingTooShort { em_len: usize, required: usize },

    /// RSA key generation failed or was refused.
    #[error("key generation failed: {0}")]
    Keygen(String),

    /// PEM input is not valid UTF-8.
    #[error("PEM input is not valid UTF-8")]
    InvalidEncoding,

    /// No `BEGIN CERTIFICATE` / `END CERTIFICATE` block in the PEM input.
    #[error("no certificate block found in PEM input")]
    CertificateNotFound,

    /// Certificate body is not valid base64 or not a DER certificate.
    #[error("certificate parse error: {0}")]
    CertificateParse(String),

    /// The subject public key is missing or not an RSA key.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Private key PEM could not be decoded.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Building or signing the certificate failed.
    #[error("certificate build failed: {0}")]
    CertificateBuild(String),

    /// Validity window cannot be represented in a certificate.
    #[error("invalid validity window: {0}")]
    InvalidValidity(String),

    /// DER encoding failed.
    #[error("DER encoding error: {0}")]
    Der(#[from] der::Error),
}
