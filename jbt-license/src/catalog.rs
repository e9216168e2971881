//! Product catalog: which codes a license request expands to.
//!
//! Reads a user `products.toml` when one exists and otherwise uses the
//! catalog embedded in the crate.

use crate::error::{LicenseError, LicenseResult};
use crate::payload::{LicenseData, LicenseProduct};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Conventional catalog file name.
pub const CATALOG_FILE_NAME: &str = "products.toml";

const EMBEDDED_CATALOG: &str = include_str!("resources/products.toml");

/// An IDE and the codes an IDE license covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeEntry {
    /// Display name.
    pub name: String,
    /// Product code, e.g. `II`.
    pub code: String,
    /// Codes licensed along with the IDE, the IDE's own code included.
    #[serde(default)]
    pub plugin: Vec<String>,
}

/// A licensable plugin (IDE codes are listed here too).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginEntry {
    /// Display name.
    pub name: String,
    /// Product code, e.g. `PDB`.
    pub code: String,
}

/// Catalog parsed from `products.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCatalog {
    /// `[[ide]]` tables.
    #[serde(default)]
    pub ide: Vec<IdeEntry>,
    /// `[[plugin]]` tables.
    #[serde(default)]
    pub plugin: Vec<PluginEntry>,
}

/// A requested product code and the date it is paid up to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSelection {
    /// Catalog code.
    pub code: String,
    /// Used as both the fallback and the paid-up-to date.
    pub expires: NaiveDate,
}

impl ProductSelection {
    /// Selects `code` until `expires`.
    #[must_use]
    pub fn new(code: impl Into<String>, expires: NaiveDate) -> Self {
        Self {
            code: code.into(),
            expires,
        }
    }
}

/// Everything needed to build a [`LicenseData`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRequest {
    /// License id, also the first token field.
    pub license_id: String,
    /// Defaults to the license id.
    #[serde(default)]
    pub licensee_name: Option<String>,
    /// Defaults to the license id.
    #[serde(default)]
    pub assignee_name: Option<String>,
    /// Assignee e-mail, empty when not given.
    #[serde(default)]
    pub assignee_email: String,
    /// IDE to license with its bundled plugins.
    #[serde(default)]
    pub ide: Option<ProductSelection>,
    /// Plugins licensed individually.
    #[serde(default)]
    pub plugins: Vec<ProductSelection>,
}

impl ProductCatalog {
    /// Returns the catalog shipped with the crate.
    pub fn embedded() -> LicenseResult<Self> {
        Self::from_toml_str(EMBEDDED_CATALOG)
    }

    /// Parses a catalog from TOML text.
    pub fn from_toml_str(toml_str: &str) -> LicenseResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Loads the catalog at `path`, or the embedded one if the file does not exist.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_from(path: impl AsRef<Path>) -> LicenseResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "No product catalog found, using embedded catalog");
            return Self::embedded();
        }

        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            ides = catalog.ide.len(),
            plugins = catalog.plugin.len(),
            "Loaded product catalog"
        );
        Ok(catalog)
    }

    /// Looks up an IDE by code.
    #[must_use]
    pub fn ide(&self, code: &str) -> Option<&IdeEntry> {
        self.ide.iter().find(|i| i.code == code)
    }

    /// Looks up a plugin by code.
    #[must_use]
    pub fn plugin(&self, code: &str) -> Option<&PluginEntry> {
        self.plugin.iter().find(|p| p.code == code)
    }

    /// Expands a request into a license payload.
    ///
    /// An IDE contributes every code in its `plugin` list, marked extended.
    /// Plugins requested on their own are extended only when an IDE is also
    /// requested. The first occurrence of a code wins.
    ///
    /// # Errors
    ///
    /// [`LicenseError::NoProductsRequested`] for an empty request and
    /// [`LicenseError::UnknownProduct`] for codes missing from the catalog.
    pub fn license_data(&self, request: &LicenseRequest) -> LicenseResult<LicenseData> {
        if request.ide.is_none() && request.plugins.is_empty() {
            return Err(LicenseError::NoProductsRequested);
        }

        let mut products = Vec::new();

        if let Some(selection) = &request.ide {
            let ide = self
                .ide(&selection.code)
                .ok_or_else(|| LicenseError::UnknownProduct(selection.code.clone()))?;
            for code in &ide.plugin {
                let plugin = self
                    .plugin(code)
                    .ok_or_else(|| LicenseError::UnknownProduct(code.clone()))?;
                products.push(LicenseProduct::new(&plugin.code, selection.expires, true));
            }
        }

        let extended = request.ide.is_some();
        for selection in &request.plugins {
            let plugin = self
                .plugin(&selection.code)
                .ok_or_else(|| LicenseError::UnknownProduct(selection.code.clone()))?;
            products.push(LicenseProduct::new(&plugin.code, selection.expires, extended));
        }

        let mut seen = HashSet::new();
        products.retain(|p| seen.insert(p.code.clone()));
        debug!(
            license_id = %request.license_id,
            products = products.len(),
            "License products resolved"
        );

        let licensee_name = request
            .licensee_name
            .clone()
            .unwrap_or_else(|| request.license_id.clone());
        let assignee_name = request
            .assignee_name
            .clone()
            .unwrap_or_else(|| request.license_id.clone());

        Ok(LicenseData::new(
            &request.license_id,
            licensee_name,
            assignee_name,
            &request.assignee_email,
            products,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses() {
        let catalog = ProductCatalog::embedded().unwrap();
        assert!(catalog.ide("II").is_some());
        assert!(catalog.plugin("PCWMP").is_some());
    }

    #[test]
    fn embedded_ide_plugins_resolve() {
        let catalog = ProductCatalog::embedded().unwrap();
        for ide in &catalog.ide {
            for code in &ide.plugin {
                assert!(catalog.plugin(code).is_some(), "{} lists unknown {code}", ide.code);
            }
        }
    }
}
