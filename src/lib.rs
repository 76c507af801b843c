//! Kienyeji - D4 KIENYEJI Farm Catalog
//!
//! A desktop catalog for a poultry and catfish farm. It opens on an animated
//! egg-to-hen splash, then shows the chicken or catfish catalog under an
//! adaptive navbar that restyles itself on scroll and follows a light/dark
//! theme toggle. Built with Rust and Libadwaita.

pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod ui;

// Re-export key types for convenience
pub use {
    catalog::{Catalog, CatalogError, CatalogItem, CatalogPage},
    config::{SettingsManager, UserSettings},
    error::{StartupError, UiError},
    state::{AppState, AppStateEvent, BootSession, LoaderStage, PageSelection, ThemeSetting},
    ui::KienyejiApplication,
};
