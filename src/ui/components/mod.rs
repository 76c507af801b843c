//! Reusable UI components following GNOME HIG guidelines.
//!
//! This module provides the catalog card and the decorative water
//! background used by the catalog pages.

pub mod catalog_card;
pub mod water_background;

pub use {catalog_card::CatalogCard, water_background::WaterBackground};
