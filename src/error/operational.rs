//! Context propagation and reporting for recoverable failures.
//!
//! Loading code attaches a human-readable context to typed errors with
//! `ResultExt`. Call sites that can continue with a fallback hand the result
//! to `ErrorReporter::or_fallback`, which logs the full cause chain once.

use std::{error::Error as StdError, fmt::Display};

use {
    anyhow::Context,
    tracing::{error, warn},
};

use crate::error::domain::Result;

/// Attaches a description of the failed operation to a typed error.
pub trait ResultExt<T> {
    /// Wraps the error with a fixed context message.
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped in `context`.
    fn add_context(self, context: &'static str) -> Result<T>;

    /// Wraps the error with a context built at the call site.
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped in `context`.
    fn add_contextf(self, context: impl Display) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn add_context(self, context: &'static str) -> Result<T> {
        self.context(context)
    }

    fn add_contextf(self, context: impl Display) -> Result<T> {
        self.with_context(|| context.to_string())
    }
}

/// Logs failures with their causes.
pub struct ErrorReporter;

impl ErrorReporter {
    /// Logs a failure the application recovers from.
    ///
    /// # Arguments
    ///
    /// * `error` - The failure, with any attached context
    /// * `outcome` - What happens instead, e.g. "Using default settings"
    pub fn warn(error: &anyhow::Error, outcome: &str) {
        warn!(outcome, error = %Self::to_user_message(error), "Recovered from error");
    }

    /// Logs a failure that ends the current operation.
    pub fn error(error: &anyhow::Error, outcome: &str) {
        error!(outcome, error = %Self::to_user_message(error), "Unrecoverable error");
    }

    /// Joins the error and its causes into one line, outermost first.
    #[must_use]
    pub fn to_user_message(error: &anyhow::Error) -> String {
        error
            .chain()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(": ")
    }

    /// Unwraps `result`, or reports the error and returns `fallback()`.
    ///
    /// # Arguments
    ///
    /// * `result` - Outcome of the primary attempt
    /// * `outcome` - Description of the fallback for the log
    /// * `fallback` - Produces the replacement value
    ///
    /// # Returns
    ///
    /// The loaded value or the fallback.
    pub fn or_fallback<T>(result: Result<T>, outcome: &str, fallback: impl FnOnce() -> T) -> T {
        result.unwrap_or_else(|error| {
            Self::warn(&error, outcome);
            fallback()
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        catalog::CatalogError,
        config::SettingsError,
        error::operational::{ErrorReporter, ResultExt},
    };

    fn empty_page() -> Result<u32, CatalogError> {
        Err(CatalogError::EmptyPage {
            page: "chicken".to_string(),
        })
    }

    #[test]
    fn test_context_wraps_typed_error() {
        let error = empty_page().add_context("Failed to load catalog").unwrap_err();

        assert_eq!(error.to_string(), "Failed to load catalog");
        assert!(error.downcast_ref::<CatalogError>().is_some());
        assert_eq!(
            ErrorReporter::to_user_message(&error),
            "Failed to load catalog: Catalog page 'chicken' has no items"
        );
    }

    #[test]
    fn test_formatted_context() {
        let result: Result<(), SettingsError> = Err(SettingsError::InvalidValue {
            reason: "loader_tick_ms must be greater than zero".to_string(),
        });
        let error = result
            .add_contextf(format_args!("Failed to load {}", "settings.json"))
            .unwrap_err();

        assert_eq!(
            ErrorReporter::to_user_message(&error),
            "Failed to load settings.json: Invalid settings value: \
             loader_tick_ms must be greater than zero"
        );
    }

    #[test]
    fn test_ok_passes_through() {
        let result: Result<u32, CatalogError> = Ok(8);
        assert_eq!(result.add_context("unused").unwrap(), 8);
    }

    #[test]
    fn test_or_fallback() {
        let recovered =
            ErrorReporter::or_fallback(empty_page().add_context("Load failed"), "Using 0", || 0);
        assert_eq!(recovered, 0);

        let loaded = ErrorReporter::or_fallback(Ok(6), "Using 0", || 0);
        assert_eq!(loaded, 6);
    }
}
