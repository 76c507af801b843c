//! Data models for the product catalogs.
//!
//! A `Catalog` holds one `CatalogPage` per `PageSelection`. Items keep the
//! order in which they were authored.

use std::collections::HashSet;

use {
    serde::{Deserialize, Serialize},
    thiserror::Error,
};

use crate::state::PageSelection;

/// Error type for catalog validation and loading.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to read a catalog file.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Catalog JSON is malformed.
    #[error("Malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A page has no items.
    #[error("Catalog page '{page}' has no items")]
    EmptyPage { page: String },
    /// An item is not a well-formed record.
    #[error("Invalid item {id} on page '{page}': {reason}")]
    InvalidItem {
        page: String,
        id: u32,
        reason: String,
    },
}

/// One sellable product or service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Identifier, unique within its page.
    pub id: u32,
    /// Display title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Price as displayed, currency included.
    pub price: String,
}

/// A catalog page: heading, tagline and items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Page heading.
    pub heading: String,
    /// Line shown below the heading.
    pub tagline: String,
    /// Items in display order.
    pub items: Vec<CatalogItem>,
}

impl CatalogPage {
    /// Titles of all items, in display order.
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.title.as_str()).collect()
    }

    /// Checks that every item is a well-formed record.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the page is empty, an item has a blank
    /// title or price, or two items share an id.
    pub fn validate(&self, page: PageSelection) -> Result<(), CatalogError> {
        if self.items.is_empty() {
            return Err(CatalogError::EmptyPage {
                page: page.to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            let invalid = |reason: &str| CatalogError::InvalidItem {
                page: page.to_string(),
                id: item.id,
                reason: reason.to_string(),
            };

            if item.title.trim().is_empty() {
                return Err(invalid("blank title"));
            }
            if item.price.trim().is_empty() {
                return Err(invalid("blank price"));
            }
            if !seen.insert(item.id) {
                return Err(invalid("duplicate id"));
            }
        }

        Ok(())
    }
}

/// Both catalog pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Chicken products and services.
    pub chicken: CatalogPage,
    /// Catfish products and services.
    pub catfish: CatalogPage,
}

impl Catalog {
    /// Gets the page shown for `selection`.
    #[must_use]
    pub fn page(&self, selection: PageSelection) -> &CatalogPage {
        match selection {
            PageSelection::Chicken => &self.chicken,
            PageSelection::Catfish => &self.catfish,
        }
    }

    /// Validates both pages.
    ///
    /// # Errors
    ///
    /// Returns the first `CatalogError` found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for selection in PageSelection::ALL {
            self.page(selection).validate(selection)?;
        }
        Ok(())
    }
}
