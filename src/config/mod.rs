//! User preferences loaded at startup.
//!
//! This module provides read-only settings with XDG Base Directory
//! compliance: theme, boot timings and layout thresholds.

pub mod settings;

pub use settings::{
    DEFAULT_BOOT_DELAY, SettingsError, SettingsManager, Timings, UserSettings, get_config_path,
};
