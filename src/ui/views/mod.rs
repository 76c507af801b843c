//! Page views shown in the main window.
//!
//! This module provides the catalog page view, rebuilt every time the
//! selected page changes.

pub mod catalog_page;

pub use catalog_page::CatalogPageView;
