//! User preference loading with XDG Base Directory compliance.
//!
//! Settings are read once at startup from `settings.json` in the XDG config
//! directory. Every field is optional; missing fields take their defaults.
//! User actions (such as toggling the theme) are never written back.

use std::{
    env::var,
    fs::read_to_string,
    io::Error as StdError,
    path::PathBuf,
    time::Duration,
};

use {
    parking_lot::{RwLock, RwLockReadGuard},
    serde::{Deserialize, Serialize},
    serde_json::{Error as SerdeJsonError, from_str},
    thiserror::Error,
    tracing::debug,
};

use crate::{
    error::{ErrorReporter, ResultExt},
    state::{
        ThemeSetting,
        entrance::DEFAULT_ENTRANCE_STAGGER,
        loader::DEFAULT_LOADER_TICK,
        scroll::DEFAULT_SCROLL_THRESHOLD,
    },
};

/// Default splash duration before the catalog appears.
pub const DEFAULT_BOOT_DELAY: Duration = Duration::from_millis(4000);

/// Error type for settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read settings file.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// Failed to deserialize settings.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerdeJsonError),
    /// Invalid settings value.
    #[error("Invalid settings value: {reason}")]
    InvalidValue { reason: String },
}

/// Serializable user settings structure with default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Theme applied at startup.
    pub theme: ThemeSetting,
    /// Splash duration in milliseconds.
    pub boot_delay_ms: u64,
    /// Interval between loader stages in milliseconds.
    pub loader_tick_ms: u64,
    /// Delay added per card position in milliseconds.
    pub entrance_stagger_ms: u64,
    /// Scroll offset in pixels above which the navbar switches style.
    pub scroll_threshold_px: f64,
    /// Optional path of a catalog file replacing the built-in catalogs.
    pub catalog_path: Option<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: ThemeSetting::Light,
            boot_delay_ms: duration_ms(DEFAULT_BOOT_DELAY),
            loader_tick_ms: duration_ms(DEFAULT_LOADER_TICK),
            entrance_stagger_ms: duration_ms(DEFAULT_ENTRANCE_STAGGER),
            scroll_threshold_px: DEFAULT_SCROLL_THRESHOLD,
            catalog_path: None,
        }
    }
}

/// Timing parameters derived from `UserSettings`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    /// Splash duration.
    pub boot_delay: Duration,
    /// Interval between loader stages.
    pub loader_tick: Duration,
    /// Delay added per card position.
    pub entrance_stagger: Duration,
    /// Navbar scroll threshold in pixels.
    pub scroll_threshold: f64,
}

impl Default for Timings {
    fn default() -> Self {
        UserSettings::default().timings()
    }
}

impl UserSettings {
    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` for a zero duration or a
    /// negative or non-finite scroll threshold.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let durations = [
            ("boot_delay_ms", self.boot_delay_ms),
            ("loader_tick_ms", self.loader_tick_ms),
            ("entrance_stagger_ms", self.entrance_stagger_ms),
        ];
        if let Some((field, _)) = durations.iter().find(|(_, millis)| *millis == 0) {
            return Err(SettingsError::InvalidValue {
                reason: format!("{field} must be greater than zero"),
            });
        }
        if !self.scroll_threshold_px.is_finite() || self.scroll_threshold_px < 0.0 {
            return Err(SettingsError::InvalidValue {
                reason: format!(
                    "scroll_threshold_px must be a non-negative number, got {}",
                    self.scroll_threshold_px
                ),
            });
        }
        Ok(())
    }

    /// Converts the millisecond fields into `Timings`.
    #[must_use]
    pub fn timings(&self) -> Timings {
        Timings {
            boot_delay: Duration::from_millis(self.boot_delay_ms),
            loader_tick: Duration::from_millis(self.loader_tick_ms),
            entrance_stagger: Duration::from_millis(self.entrance_stagger_ms),
            scroll_threshold: self.scroll_threshold_px,
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Handles loading and validation of user preferences.
#[derive(Debug)]
pub struct SettingsManager {
    /// User settings storage.
    settings: RwLock<UserSettings>,
    /// Path to the configuration file on disk.
    config_path: PathBuf,
}

impl SettingsManager {
    /// Loads settings from `config_path`, falling back to the defaults.
    ///
    /// A file that cannot be read, parsed or validated is reported and
    /// ignored; startup never fails on settings.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Location of `settings.json`
    #[must_use]
    pub fn load_or_default(config_path: PathBuf) -> Self {
        let fallback_path = config_path.clone();
        ErrorReporter::or_fallback(
            Self::with_config_path(config_path)
                .add_contextf(format_args!("Failed to load settings {}", fallback_path.display())),
            "Using default settings",
            || SettingsManager {
                settings: RwLock::new(UserSettings::default()),
                config_path: fallback_path.clone(),
            },
        )
    }

    /// Creates a new settings manager with a custom config path (for testing).
    ///
    /// # Arguments
    ///
    /// * `config_path` - Custom path for the settings file
    ///
    /// # Returns
    ///
    /// A `Result` containing the `SettingsManager` or a `SettingsError`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the settings file exists but cannot be
    /// read, parsed or validated.
    pub fn with_config_path(config_path: PathBuf) -> Result<Self, SettingsError> {
        let settings = if config_path.exists() {
            debug!("Loading settings from existing file: {:?}", config_path);
            let contents = read_to_string(&config_path)?;
            let settings: UserSettings = from_str(&contents)?;
            settings.validate()?;
            settings
        } else {
            debug!("No settings file at {:?}, using defaults", config_path);
            UserSettings::default()
        };

        Ok(SettingsManager {
            settings: RwLock::new(settings),
            config_path,
        })
    }

    /// Gets the current settings.
    ///
    /// # Returns
    ///
    /// A reference to the current `UserSettings`.
    pub fn get_settings(&self) -> RwLockReadGuard<'_, UserSettings> {
        self.settings.read()
    }

    /// Gets the configuration file path.
    ///
    /// # Returns
    ///
    /// A reference to the configuration file path.
    pub fn get_config_path(&self) -> &PathBuf {
        &self.config_path
    }
}

/// Ensures proper XDG directory usage for the config file.
///
/// # Returns
///
/// The path to the configuration file.
#[must_use]
pub fn get_config_path() -> PathBuf {
    let mut config_dir = get_xdg_config_home();
    config_dir.push("kienyeji");
    config_dir.push("settings.json");
    config_dir
}

/// Gets the XDG config home directory following XDG Base Directory specification.
///
/// Uses `XDG_CONFIG_HOME` environment variable if set, otherwise defaults to $HOME/.config
fn get_xdg_config_home() -> PathBuf {
    if let Ok(config_home) = var("XDG_CONFIG_HOME")
        && !config_home.is_empty()
    {
        return PathBuf::from(config_home);
    }

    if let Ok(home) = var("HOME") {
        let mut path = PathBuf::from(home);
        path.push(".config");
        return path;
    }

    PathBuf::from(".")
}
