//! Global application state with reactive update mechanisms.
//!
//! This module provides the central `AppState` container: theme store,
//! navigation, and the boot flag. Changes are fanned out to subscribers as
//! `AppStateEvent`s so widgets can react on the GTK main loop.

use std::sync::Arc;

use {
    async_channel::{Receiver, Sender, unbounded},
    parking_lot::RwLock,
    tokio::time::sleep,
    tracing::{debug, info},
};

use crate::{
    config::Timings,
    state::{
        loader::{LoaderSequencer, LoaderStage},
        navigation::{NavigationState, PageSelection},
        task::TaskGuard,
        theme::{ThemeSetting, ThemeSink, ThemeStore},
    },
};

/// Application state change events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppStateEvent {
    /// Theme toggled.
    ThemeChanged(ThemeSetting),
    /// Catalog page selected.
    PageChanged(PageSelection),
    /// Mobile menu opened or closed.
    MenuToggled(bool),
    /// Splash finished; the catalog can be shown.
    BootCompleted,
}

/// Central state container with thread-safe access.
pub struct AppState {
    /// Theme store shared by every visual component.
    pub theme: ThemeStore,
    /// Selected page and menu flag.
    navigation: RwLock<NavigationState>,
    /// True while the splash is shown.
    booting: RwLock<bool>,
    /// Timer and threshold configuration.
    timings: Timings,
    /// List of active subscribers for manual broadcast fan-out.
    subscribers: RwLock<Vec<Sender<AppStateEvent>>>,
}

impl AppState {
    /// Creates a new application state instance in the booting phase.
    ///
    /// # Arguments
    ///
    /// * `initial_theme` - Theme applied at startup
    /// * `theme_sink` - Presentation attribute mirroring the theme
    /// * `timings` - Boot, loader, entrance and scroll parameters
    ///
    /// # Returns
    ///
    /// A new `AppState` instance.
    pub fn new(
        initial_theme: ThemeSetting,
        theme_sink: Arc<dyn ThemeSink>,
        timings: Timings,
    ) -> Self {
        Self {
            theme: ThemeStore::new(initial_theme, theme_sink),
            navigation: RwLock::new(NavigationState::new()),
            booting: RwLock::new(true),
            timings,
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Helper to broadcast an event to all subscribers.
    /// Cleans up closed channels.
    fn broadcast_event(&self, event: &AppStateEvent) -> usize {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|tx| tx.try_send(event.clone()).is_ok());
        subscribers.len()
    }

    /// Subscribes to application state changes.
    ///
    /// # Returns
    ///
    /// A receiver for state change events.
    pub fn subscribe(&self) -> Receiver<AppStateEvent> {
        debug!("AppState: New subscription created");

        let (tx, rx) = unbounded();
        self.subscribers.write().push(tx);

        rx
    }

    /// Gets the configured timings.
    #[must_use]
    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Whether the splash is still shown.
    #[must_use]
    pub fn is_booting(&self) -> bool {
        *self.booting.read()
    }

    /// Ends the booting phase.
    ///
    /// Only the first call has an effect.
    ///
    /// # Returns
    ///
    /// `true` if this call ended the booting phase.
    pub fn complete_boot(&self) -> bool {
        {
            let mut booting = self.booting.write();
            if !*booting {
                return false;
            }
            *booting = false;
        }

        info!("Boot completed");
        self.broadcast_event(&AppStateEvent::BootCompleted);
        true
    }

    /// Gets the current theme.
    #[must_use]
    pub fn theme(&self) -> ThemeSetting {
        self.theme.get_theme()
    }

    /// Toggles the theme and notifies subscribers.
    ///
    /// # Returns
    ///
    /// The new theme setting.
    pub fn toggle_theme(&self) -> ThemeSetting {
        let theme = self.theme.toggle_theme();
        self.broadcast_event(&AppStateEvent::ThemeChanged(theme));
        theme
    }

    /// Gets the selected page.
    #[must_use]
    pub fn current_page(&self) -> PageSelection {
        self.navigation.read().current_page()
    }

    /// Whether the mobile menu is open.
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.navigation.read().is_menu_open()
    }

    /// Selects a page, closing the mobile menu.
    ///
    /// # Arguments
    ///
    /// * `page` - Page to show
    pub fn select_page(&self, page: PageSelection) {
        let (previous, menu_was_open) = {
            let mut navigation = self.navigation.write();
            let previous = navigation.current_page();
            let menu_was_open = navigation.is_menu_open();
            navigation.select_page(page);
            (previous, menu_was_open)
        };

        if menu_was_open {
            self.broadcast_event(&AppStateEvent::MenuToggled(false));
        }
        if previous != page {
            debug!(page = %page, "Page selected");
            self.broadcast_event(&AppStateEvent::PageChanged(page));
        }
    }

    /// Opens or closes the mobile menu.
    pub fn set_menu_open(&self, open: bool) {
        let changed = {
            let mut navigation = self.navigation.write();
            let changed = navigation.is_menu_open() != open;
            navigation.set_menu_open(open);
            changed
        };

        if changed {
            self.broadcast_event(&AppStateEvent::MenuToggled(open));
        }
    }

    /// Flips the mobile menu.
    ///
    /// # Returns
    ///
    /// The new menu state.
    pub fn toggle_menu(&self) -> bool {
        let open = self.navigation.write().toggle_menu();
        self.broadcast_event(&AppStateEvent::MenuToggled(open));
        open
    }
}

/// Timers alive during the splash: the loader animation and the boot delay.
///
/// Dropping the session cancels both.
#[derive(Debug)]
pub struct BootSession {
    /// Loader stage machine shown on the splash.
    loader: LoaderSequencer,
    /// Task advancing the loader.
    loader_task: TaskGuard,
    /// Task ending the booting phase after the delay.
    boot_task: TaskGuard,
}

impl BootSession {
    /// Starts the loader and the boot delay.
    ///
    /// # Arguments
    ///
    /// * `app_state` - State whose booting phase the session ends
    ///
    /// # Returns
    ///
    /// The running `BootSession`.
    pub fn start(app_state: &Arc<AppState>) -> Self {
        let timings = app_state.timings();
        let loader = LoaderSequencer::new(timings.loader_tick);
        let loader_task = loader.start();

        let state = app_state.clone();
        let boot_task = TaskGuard::spawn("boot-delay", async move {
            sleep(timings.boot_delay).await;
            state.complete_boot();
        });

        info!(
            boot_delay = ?timings.boot_delay,
            loader_tick = ?timings.loader_tick,
            "Boot session started"
        );

        Self {
            loader,
            loader_task,
            boot_task,
        }
    }

    /// Gets the loader sequencer.
    #[must_use]
    pub fn loader(&self) -> &LoaderSequencer {
        &self.loader
    }

    /// Gets the stage currently displayed.
    #[must_use]
    pub fn current_stage(&self) -> LoaderStage {
        self.loader.current_stage()
    }

    /// Stops the loader and the boot timer.
    pub fn finish(self) {
        debug!(
            loader = self.loader_task.name(),
            boot = self.boot_task.name(),
            "Finishing boot session"
        );
    }
}
