//! License token issuing and parsing.
//!
//! Tokens use the format:
//! `license_id-base64(license_data)-base64(signature)-base64(certificate DER)`
//!
//! The signature is RSA PKCS#1 v1.5 over `SHA-1(license_data)` made with the
//! certificate's private key. Fields are joined by a bare `-` with no
//! escaping; standard base64 never produces `-`, but license ids are not
//! checked, so an id containing `-` yields a token that no longer splits
//! into four fields.

use crate::error::{LicenseError, LicenseResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use jbt_cert::{certificate_from_body, certificate_public_key, load_private_key, parse_certificate_pem};
use rsa::Pkcs1v15Sign;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Field separator inside a token.
pub const TOKEN_SEPARATOR: char = '-';

/// Number of fields in a well-formed token.
pub const TOKEN_FIELDS: usize = 4;

/// A license token split into its four raw fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseToken {
    license_id: String,
    license_data_b64: String,
    signature_b64: String,
    cert_body_b64: String,
}

impl LicenseToken {
    /// Signs `license_data` with the private key and packages it with the certificate.
    ///
    /// The fresh signature is verified against the certificate's public key
    /// before the token is returned.
    ///
    /// # Errors
    ///
    /// - [`LicenseError::Cert`] when the certificate or key PEM cannot be read.
    /// - [`LicenseError::SignatureVerificationFailed`] when the private key does
    ///   not belong to the certificate.
    pub fn issue(
        certificate_pem: &[u8],
        private_key_pem: &[u8],
        license_id: &str,
        license_data: &str,
    ) -> LicenseResult<Self> {
        if license_id.contains(TOKEN_SEPARATOR) {
            warn!(license_id, "License id contains the token separator");
        }

        let (cert_body, cert) = parse_certificate_pem(certificate_pem)?;
        let public_key = certificate_public_key(&cert)?;
        let private_key = load_private_key(private_key_pem)?;

        let data = license_data.as_bytes();
        let digest = Sha1::digest(data);
        let signature = private_key
            .sign(Pkcs1v15Sign::new::<Sha1>(), &digest)
            .map_err(|e| LicenseError::Signing(e.to_string()))?;

        public_key
            .verify(Pkcs1v15Sign::new::<Sha1>(), &digest, &signature)
            .map_err(|_| LicenseError::SignatureVerificationFailed)?;

        info!(
            license_id,
            data_len = data.len(),
            signature_len = signature.len(),
            "License token issued"
        );

        Ok(Self {
            license_id: license_id.to_string(),
            license_data_b64: STANDARD.encode(data),
            signature_b64: STANDARD.encode(&signature),
            cert_body_b64: cert_body,
        })
    }

    /// Returns the license id field.
    #[must_use]
    pub fn license_id(&self) -> &str {
        &self.license_id
    }

    /// Returns the base64 license data field.
    #[must_use]
    pub fn license_data_b64(&self) -> &str {
        &self.license_data_b64
    }

    /// Returns the base64 signature field.
    #[must_use]
    pub fn signature_b64(&self) -> &str {
        &self.signature_b64
    }

    /// Returns the base64 certificate field.
    #[must_use]
    pub fn cert_body_b64(&self) -> &str {
        &self.cert_body_b64
    }

    /// Decodes the license data field.
    ///
    /// Unlike [`parse_license`], decode failures are errors here.
    pub fn license_data(&self) -> LicenseResult<String> {
        let bytes = decode_field("license data", &self.license_data_b64)?;
        String::from_utf8(bytes)
            .map_err(|e| LicenseError::InvalidField(format!("license data is not UTF-8: {e}")))
    }

    /// Re-verifies the embedded signature against the embedded certificate.
    pub fn verify(&self) -> LicenseResult<()> {
        let cert = certificate_from_body(&self.cert_body_b64)?;
        let public_key = certificate_public_key(&cert)?;
        let data = decode_field("license data", &self.license_data_b64)?;
        let signature = decode_field("signature", &self.signature_b64)?;

        let digest = Sha1::digest(&data);
        public_key
            .verify(Pkcs1v15Sign::new::<Sha1>(), &digest, &signature)
            .map_err(|_| LicenseError::SignatureVerificationFailed)
    }
}

impl fmt::Display for LicenseToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{TOKEN_SEPARATOR}{}{TOKEN_SEPARATOR}{}{TOKEN_SEPARATOR}{}",
            self.license_id, self.license_data_b64, self.signature_b64, self.cert_body_b64
        )
    }
}

impl FromStr for LicenseToken {
    type Err = LicenseError;

    fn from_str(token: &str) -> LicenseResult<Self> {
        let [license_id, license_data_b64, signature_b64, cert_body_b64] = split_fields(token)?;
        Ok(Self {
            license_id: license_id.to_string(),
            license_data_b64: license_data_b64.to_string(),
            signature_b64: signature_b64.to_string(),
            cert_body_b64: cert_body_b64.to_string(),
        })
    }
}

/// License id and payload recovered from a token.
///
/// The default value (both fields empty) stands for a token whose payload
/// could not be decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLicense {
    /// License id, verbatim.
    pub license_id: String,
    /// Decoded license data.
    pub license_data: String,
}

impl ParsedLicense {
    /// Returns true for the undecodable-payload sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.license_id.is_empty() && self.license_data.is_empty()
    }
}

/// Issues a license token string. See [`LicenseToken::issue`].
pub fn issue_license(
    certificate_pem: &[u8],
    private_key_pem: &[u8],
    license_id: &str,
    license_data: &str,
) -> LicenseResult<String> {
    LicenseToken::issue(certificate_pem, private_key_pem, license_id, license_data)
        .map(|token| token.to_string())
}

/// Extracts the license id and data from a token without verifying it.
///
/// # Errors
///
/// Returns [`LicenseError::MalformedToken`] when the token does not split
/// into exactly four fields. A payload that is not valid base64 or UTF-8 is
/// not an error: the result is the empty [`ParsedLicense`].
pub fn parse_license(token: &str) -> LicenseResult<ParsedLicense> {
    let [license_id, license_data_b64, _, _] = split_fields(token)?;

    let Ok(bytes) = STANDARD.decode(license_data_b64) else {
        warn!(license_id, "License data is not valid base64");
        return Ok(ParsedLicense::default());
    };
    let Ok(license_data) = String::from_utf8(bytes) else {
        warn!(license_id, "License data is not valid UTF-8");
        return Ok(ParsedLicense::default());
    };

    debug!(license_id, data_len = license_data.len(), "License token parsed");
    Ok(ParsedLicense {
        license_id: license_id.to_string(),
        license_data,
    })
}

fn split_fields(token: &str) -> LicenseResult<[&str; TOKEN_FIELDS]> {
    let fields: Vec<&str> = token.split(TOKEN_SEPARATOR).collect();
    let found = fields.len();
    fields.try_into().map_err(|_| {
        LicenseError::MalformedToken(format!(
            "expected {TOKEN_FIELDS} fields separated by `{TOKEN_SEPARATOR}`, found {found}"
        ))
    })
}

fn decode_field(name: &str, value: &str) -> LicenseResult<Vec<u8>> {
    STANDARD
        .decode(value)
        .map_err(|e| LicenseError::InvalidField(format!("{name} is not valid base64: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_requires_four_fields() {
        assert!(split_fields("a-b-c-d").is_ok());
        assert!(split_fields("a-b-c").is_err());
        assert!(split_fields("a-b-c-d-e").is_err());
        assert!(split_fields("").is_err());
    }

    #[test]
    fn empty_fields_still_count() {
        let fields = split_fields("---").unwrap();
        assert_eq!(fields, ["", "", "", ""]);
    }

    #[test]
    fn display_joins_fields() {
        let token = LicenseToken::from_str("ID-ZGF0YQ==-c2ln-Y2VydA==").unwrap();
        assert_eq!(token.to_string(), "ID-ZGF0YQ==-c2ln-Y2VydA==");
        assert_eq!(token.license_data().unwrap(), "data");
    }

    #[test]
    fn sentinel_is_empty() {
        assert!(ParsedLicense::default().is_empty());
    }
}
