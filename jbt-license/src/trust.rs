//! Trust-config rendering.
//!
//! A verifier that pins certificates reads one line per certificate:
//!
//! ```text
//! {prefix},{cert_sign},{public_exponent},{root_ca_sign}->{filled_cert_sign}
//! ```
//!
//! All integers are unsigned decimal.

use crate::error::{LicenseError, LicenseResult};
use jbt_cert::{derive_signature_pair, SignaturePair, DEFAULT_PUBLIC_EXPONENT};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Default line prefix.
pub const DEFAULT_PREFIX: &str = "EQUAL";

/// Signature of the pinned upstream root CA, in decimal.
pub const ROOT_CA_SIGN: &str = concat!(
    "8601065769528791011927822788763192434860724819629996104840271611",
    "6244893326842304564725814569508228426593301912071464375208899731",
    "2766689988016808929265129401027490891810902278465065056686129972",
    "0851196052374708999527519150702443751734289764134063638791285314",
    "4940779511591371586386725916395768216404061350504031474766080042",
    "4242248055421184038777878268502955477482203711835548014501087778",
    "9591571124238232758788247291323932815177787424630675833200910099",
    "1614145465761408960012694808795446505532198701298993706578501328",
    "4988096504657892738536613208311013047138019418152103262155848541",
    "5743274845100255941662397844298451808757740122297848789036034914",
    "2673234799435938033010332870598106404487233479036589492449492359",
    "5382470094461546336020961505275530597716457288511366082299255537",
    "7628912381363819245207492284125592193467771841742199996409060072",
    "0526004070783970613166214932515123055831606806813940681608011990",
    "6833578907759960298749494098180107991752250725928647349597506532",
    "7785397098522544780611940980698015498451633583151162609152704800",
    "5769992996846806801573516289021385911356367204063068735705490274",
    "7438421559817252127187138838514773245413540030800888215961904267",
    "3487272061105825056061829440235824590064061378319409591955663648",
    "11905585377246353",
);

/// Constants rendered around the signature pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustConfig {
    /// Leading tag of the line.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// RSA public exponent of the pinned certificate.
    #[serde(default = "default_public_exponent")]
    pub public_exponent: u64,
    /// Signature value of the root CA being replaced.
    #[serde(default = "default_root_ca_sign", with = "decimal")]
    pub root_ca_sign: BigUint,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_public_exponent() -> u64 {
    DEFAULT_PUBLIC_EXPONENT
}

fn default_root_ca_sign() -> BigUint {
    BigUint::from_str(ROOT_CA_SIGN).expect("pinned root CA signature is a decimal literal")
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            public_exponent: default_public_exponent(),
            root_ca_sign: default_root_ca_sign(),
        }
    }
}

impl TrustConfig {
    /// Replaces the root CA signature with a decimal string.
    pub fn with_root_ca_sign(mut self, decimal: &str) -> LicenseResult<Self> {
        self.root_ca_sign = BigUint::from_str(decimal.trim())
            .map_err(|e| LicenseError::InvalidTrustConfig(format!("root_ca_sign: {e}")))?;
        Ok(self)
    }

    /// Renders the line for a signature pair.
    #[must_use]
    pub fn format(&self, cert_sign: &BigUint, filled_cert_sign: &BigUint) -> String {
        format!(
            "{},{},{},{}->{}",
            self.prefix, cert_sign, self.public_exponent, self.root_ca_sign, filled_cert_sign
        )
    }

    /// Renders the line for a [`SignaturePair`].
    #[must_use]
    pub fn format_pair(&self, pair: &SignaturePair) -> String {
        self.format(&pair.cert_sign, &pair.filled_cert_sign)
    }
}

/// Renders a trust-config line with the default constants.
#[must_use]
pub fn format_trust_config(cert_sign: &BigUint, filled_cert_sign: &BigUint) -> String {
    TrustConfig::default().format(cert_sign, filled_cert_sign)
}

/// Derives the signature pair of a PEM certificate and renders its line.
pub fn trust_config_line(certificate_pem: &[u8], config: &TrustConfig) -> LicenseResult<String> {
    let pair = derive_signature_pair(certificate_pem)?;
    debug!(
        cert_sign_bits = pair.cert_sign.bits(),
        filled_cert_sign_bits = pair.filled_cert_sign.bits(),
        "Rendering trust-config line"
    );
    Ok(config.format_pair(&pair))
}

/// Serde adapter storing a [`BigUint`] as a decimal string.
mod decimal {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s = String::deserialize(deserializer)?;
        BigUint::from_str(s.trim()).map_err(serde::de::Error::custom)
    }
}
