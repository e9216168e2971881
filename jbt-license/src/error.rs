//! Error types for license issuing and parsing.

use jbt_cert::CertError;
use thiserror::Error;

/// License-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Token does not have exactly four `-` separated fields.
    #[error("malformed license token: {0}")]
    MalformedToken(String),

    /// A token field is not valid base64 or UTF-8.
    #[error("invalid license token field: {0}")]
    InvalidField(String),

    /// Freshly produced or embedded signature does not verify.
    #[error("license signature verification failed")]
    SignatureVerificationFailed,

    /// RSA signing failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Neither an IDE nor any plugin was requested.
    #[error("no products requested: supply an IDE, plugins, or both")]
    NoProductsRequested,

    /// Product code is not in the catalog.
    #[error("unknown product code: {0}")]
    UnknownProduct(String),

    /// Trust-config value could not be read.
    #[error("invalid trust config: {0}")]
    InvalidTrustConfig(String),

    /// Certificate or key handling failed.
    #[error(transparent)]
    Cert(#[from] CertError),

    /// Catalog file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog TOML is malformed.
    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
