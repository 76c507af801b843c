//! Domain-specific error types using `thiserror`.
//!
//! Loading failures of settings and catalog data are recovered from where
//! they happen; what remains here are the failures that stop startup.

use std::result::Result as StdResult;

use {anyhow::Error, thiserror::Error};

use crate::catalog::CatalogError;

/// Errors that prevent the application from being created.
#[derive(Error, Debug)]
pub enum StartupError {
    /// The embedded catalog is unusable.
    #[error("Catalog error: {0}")]
    CatalogError(#[from] CatalogError),
}

/// UI-related errors.
#[derive(Error, Debug)]
pub enum UiError {
    /// GTK/Libadwaita initialization error.
    #[error("UI initialization error: {0}")]
    InitializationError(String),
    /// Widget creation error.
    #[error("Widget creation error: {0}")]
    WidgetError(String),
}

/// Result carrying an `anyhow` error with attached context.
pub type Result<T> = StdResult<T, Error>;

#[cfg(test)]
mod tests {
    use crate::{
        catalog::CatalogError,
        error::domain::{StartupError, UiError},
    };

    #[test]
    fn test_startup_error_display() {
        let catalog_error: StartupError = CatalogError::EmptyPage {
            page: "catfish".to_string(),
        }
        .into();
        assert_eq!(
            catalog_error.to_string(),
            "Catalog error: Catalog page 'catfish' has no items"
        );
    }

    #[test]
    fn test_ui_error_display() {
        let init_error = UiError::InitializationError("No display".to_string());
        assert_eq!(init_error.to_string(), "UI initialization error: No display");

        let widget_error = UiError::WidgetError("Invalid breakpoint".to_string());
        assert_eq!(
            widget_error.to_string(),
            "Widget creation error: Invalid breakpoint"
        );
    }
}
