//! GNOME HIG-compliant user interface built entirely with Libadwaita.
//!
//! This module provides the main application window, the loader splash, the
//! adaptive navbar and the catalog pages.

pub mod application;
pub mod components;
pub mod header_bar;
pub mod loader_view;
pub mod style;
pub mod utils;
pub mod views;

pub use {
    application::KienyejiApplication,
    components::{CatalogCard, WaterBackground},
    header_bar::HeaderBar,
    loader_view::LoaderView,
    style::{AdwaitaThemeSink, NavbarStyler},
    views::CatalogPageView,
};
