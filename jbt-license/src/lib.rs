//! License token issuing and verification-parameter rendering.
//!
//! This crate handles:
//! - Signing a license payload into a four-field token
//! - Recovering the license id and payload from a token
//! - Re-verifying a token against its embedded certificate
//! - Rendering the trust-config line that pins the signing certificate
//! - Building the license payload from a product catalog
//!
//! # Token Format
//!
//! Tokens are formatted as:
//! `license_id-base64(payload)-base64(signature)-base64(certificate)`
//! where the signature is RSA PKCS#1 v1.5 / SHA-1 over the payload bytes.

mod catalog;
mod error;
mod payload;
mod token;
mod trust;

pub use catalog::{
    IdeEntry, LicenseRequest, PluginEntry, ProductCatalog, ProductSelection, CATALOG_FILE_NAME,
};
pub use error::{LicenseError, LicenseResult};
pub use payload::{
    LicenseData, LicenseProduct, DEFAULT_GRACE_PERIOD_DAYS, DEFAULT_HASH, DEFAULT_METADATA,
};
pub use token::{
    issue_license, parse_license, LicenseToken, ParsedLicense, TOKEN_FIELDS, TOKEN_SEPARATOR,
};
pub use trust::{
    format_trust_config, trust_config_line, TrustConfig, DEFAULT_PREFIX, ROOT_CA_SIGN,
};
