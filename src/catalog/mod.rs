//! Static product catalogs.
//!
//! The catalogs ship embedded in the binary as JSON. A user-supplied file in
//! the same shape may replace them; a broken override falls back to the
//! embedded data.

pub mod models;

use std::{fs::read_to_string, path::Path};

use {
    serde_json::from_str,
    tracing::{debug, info},
};

pub use models::{Catalog, CatalogError, CatalogItem, CatalogPage};

use crate::error::{ErrorReporter, ResultExt};

/// Catalog data compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

impl Catalog {
    /// Parses and validates a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is malformed or fails validation.
    pub fn from_json(contents: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = from_str(contents)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads the embedded catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded data is invalid.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Loads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or is invalid.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        debug!("Loading catalog from file: {:?}", path);
        let contents = read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Loads the override at `path` if given, falling back to the embedded
    /// catalog when it is missing or invalid.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` only if the embedded catalog itself is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        if let Some(path) = path {
            match Self::from_file(path)
                .add_contextf(format_args!("Failed to load catalog override {}", path.display()))
            {
                Ok(catalog) => {
                    info!("Using catalog override {:?}", path);
                    return Ok(catalog);
                }
                Err(e) => ErrorReporter::warn(&e, "Using the embedded catalog"),
            }
        }

        Self::builtin()
    }
}
