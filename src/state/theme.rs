//! Light/dark theme store with a synchronously mirrored presentation attribute.
//!
//! The `ThemeStore` is created once at application start and handed to every
//! consumer that needs to read or flip the theme. Each mutation is pushed to a
//! `ThemeSink` before the call returns, so the global presentation attribute
//! never lags behind the stored setting.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    sync::Arc,
};

use {
    async_channel::{Receiver, Sender, unbounded},
    parking_lot::RwLock,
    serde::{Deserialize, Serialize},
    tracing::{debug, info},
};

/// Two-valued theme setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSetting {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl ThemeSetting {
    /// Returns the opposite setting.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Whether this is the dark theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Lowercase name, as used in the settings file.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl Display for ThemeSetting {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Receiver of the global presentation attribute.
///
/// Implementations must apply the theme synchronously.
pub trait ThemeSink: Send + Sync {
    /// Applies `theme` to the presentation surface.
    fn apply(&self, theme: ThemeSetting);
}

/// Owned, injectable holder of the current theme.
pub struct ThemeStore {
    /// Current theme setting.
    theme: RwLock<ThemeSetting>,
    /// Presentation attribute mirror.
    sink: Arc<dyn ThemeSink>,
    /// Active change subscribers.
    subscribers: RwLock<Vec<Sender<ThemeSetting>>>,
}

impl ThemeStore {
    /// Creates a store holding `initial` and applies it to `sink` immediately.
    ///
    /// # Arguments
    ///
    /// * `initial` - Theme to start with
    /// * `sink` - Presentation attribute kept in sync with the store
    ///
    /// # Returns
    ///
    /// A new `ThemeStore` instance.
    pub fn new(initial: ThemeSetting, sink: Arc<dyn ThemeSink>) -> Self {
        sink.apply(initial);
        info!(theme = %initial, "Theme store created");

        Self {
            theme: RwLock::new(initial),
            sink,
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Gets the current theme.
    #[must_use]
    pub fn get_theme(&self) -> ThemeSetting {
        *self.theme.read()
    }

    /// Flips light and dark.
    ///
    /// The sink is updated before this returns; subscribers are notified
    /// afterwards.
    ///
    /// # Returns
    ///
    /// The new theme setting.
    pub fn toggle_theme(&self) -> ThemeSetting {
        let new_theme = {
            let mut theme = self.theme.write();
            *theme = theme.toggled();
            *theme
        };
        self.sink.apply(new_theme);
        debug!(theme = %new_theme, "Theme toggled");

        self.subscribers
            .write()
            .retain(|tx| tx.try_send(new_theme).is_ok());

        new_theme
    }

    /// Subscribes to theme changes.
    ///
    /// # Returns
    ///
    /// A receiver yielding each new theme setting.
    pub fn subscribe(&self) -> Receiver<ThemeSetting> {
        let (tx, rx) = unbounded();
        self.subscribers.write().push(tx);
        rx
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use crate::state::theme::{
        ThemeSetting::{self, Dark, Light},
        ThemeSink, ThemeStore,
    };

    /// Sink that records every applied theme.
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub applied: Mutex<Vec<ThemeSetting>>,
    }

    impl ThemeSink for RecordingSink {
        fn apply(&self, theme: ThemeSetting) {
            self.applied.lock().push(theme);
        }
    }

    impl RecordingSink {
        pub(crate) fn last(&self) -> Option<ThemeSetting> {
            self.applied.lock().last().copied()
        }
    }

    #[test]
    fn test_initial_theme_is_applied() {
        let sink = Arc::new(RecordingSink::default());
        let store = ThemeStore::new(Light, sink.clone());

        assert_eq!(store.get_theme(), Light);
        assert_eq!(*sink.applied.lock(), vec![Light]);
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let sink = Arc::new(RecordingSink::default());
        let store = ThemeStore::new(Light, sink.clone());

        assert_eq!(store.toggle_theme(), Dark);
        assert_eq!(sink.last(), Some(Dark));
        assert_eq!(store.toggle_theme(), Light);
        assert_eq!(store.get_theme(), Light);
        assert_eq!(*sink.applied.lock(), vec![Light, Dark, Light]);
    }

    #[test]
    fn test_sink_matches_store_after_every_toggle() {
        let sink = Arc::new(RecordingSink::default());
        let store = ThemeStore::new(Dark, sink.clone());

        for _ in 0..5 {
            store.toggle_theme();
            assert_eq!(sink.last(), Some(store.get_theme()));
        }
    }

    #[test]
    fn test_subscribers_receive_changes() {
        let store = ThemeStore::new(Light, Arc::new(RecordingSink::default()));
        let rx = store.subscribe();

        store.toggle_theme();
        store.toggle_theme();

        assert_eq!(rx.try_recv().ok(), Some(Dark));
        assert_eq!(rx.try_recv().ok(), Some(Light));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_subscribers_are_dropped() {
        let store = ThemeStore::new(Light, Arc::new(RecordingSink::default()));
        drop(store.subscribe());

        store.toggle_theme();
        assert!(store.subscribers.read().is_empty());
    }

    #[test]
    fn test_theme_setting_serde_names() {
        assert_eq!(serde_json::to_string(&Dark).unwrap(), "\"dark\"");
        assert_eq!(
            serde_json::from_str::<ThemeSetting>("\"light\"").unwrap(),
            Light
        );
        assert_eq!(Dark.to_string(), "dark");
        assert_eq!(Light.toggled(), Dark);
        assert!(Dark.is_dark());
    }
}
