//! Kienyeji - D4 KIENYEJI Farm Catalog
//!
//! This is the main entry point for the catalog application.
//! It initializes logging and GTK/Libadwaita and starts the main application loop.

use {
    kienyeji::{
        error::{ErrorReporter, Result, ResultExt, UiError},
        ui::KienyejiApplication,
    },
    tracing_subscriber::EnvFilter,
};

/// Main entry point for the Kienyeji application.
///
/// This function installs the log subscriber, initializes the GTK and
/// Libadwaita libraries, creates the main application instance, and starts
/// the event loop.
#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    start().inspect_err(|error| ErrorReporter::error(error, "Application did not start"))
}

/// Initializes GTK and Libadwaita, then runs the application.
fn start() -> Result<()> {
    libadwaita::gtk::init().add_context("Failed to initialize GTK")?;
    libadwaita::init()
        .map_err(|e| UiError::InitializationError(e.to_string()))
        .add_context("Failed to initialize Libadwaita")?;

    let app = KienyejiApplication::new().add_context("Failed to create the application")?;
    app.run();

    Ok(())
}
