//! License payload JSON.
//!
//! The payload is the `license_data` string that gets signed into a token.
//! Field names and order follow what license verifiers read.

use crate::error::LicenseResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default `metadata` value.
pub const DEFAULT_METADATA: &str = "0120220902PSAN000005";

/// Default `hash` value.
pub const DEFAULT_HASH: &str = "TRIAL:1234567890";

/// Default grace period after `paidUpTo`.
pub const DEFAULT_GRACE_PERIOD_DAYS: u32 = 7;

/// One licensed product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseProduct {
    /// Product code, e.g. `II`.
    pub code: String,
    /// Version fallback date.
    pub fallback_date: NaiveDate,
    /// Paid-up-to date.
    pub paid_up_to: NaiveDate,
    /// Whether the product is part of an extended (IDE) license.
    pub extended: bool,
}

impl LicenseProduct {
    /// Creates a product whose fallback and paid-up-to dates are both `expires`.
    #[must_use]
    pub fn new(code: impl Into<String>, expires: NaiveDate, extended: bool) -> Self {
        Self {
            code: code.into(),
            fallback_date: expires,
            paid_up_to: expires,
            extended,
        }
    }
}

/// The signed license payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseData {
    pub license_id: String,
    pub licensee_name: String,
    pub assignee_name: String,
    pub assignee_email: String,
    pub license_restriction: String,
    pub check_concurrent_use: bool,
    pub products: Vec<LicenseProduct>,
    pub metadata: String,
    pub hash: String,
    pub grace_period_days: u32,
    pub auto_prolongated: bool,
    pub is_auto_prolongated: bool,
}

impl LicenseData {
    /// Creates a payload with the default restriction, metadata, hash and grace period.
    #[must_use]
    pub fn new(
        license_id: impl Into<String>,
        licensee_name: impl Into<String>,
        assignee_name: impl Into<String>,
        assignee_email: impl Into<String>,
        products: Vec<LicenseProduct>,
    ) -> Self {
        Self {
            license_id: license_id.into(),
            licensee_name: licensee_name.into(),
            assignee_name: assignee_name.into(),
            assignee_email: assignee_email.into(),
            license_restriction: String::new(),
            check_concurrent_use: false,
            products,
            metadata: DEFAULT_METADATA.to_string(),
            hash: DEFAULT_HASH.to_string(),
            grace_period_days: DEFAULT_GRACE_PERIOD_DAYS,
            auto_prolongated: false,
            is_auto_prolongated: false,
        }
    }

    /// Serializes to the compact JSON that gets signed.
    pub fn to_json(&self) -> LicenseResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a payload, e.g. one recovered with [`crate::parse_license`].
    pub fn from_json(json: &str) -> LicenseResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
