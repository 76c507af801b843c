//! Centralized view state with reactive updates to UI components.
//!
//! Everything in this module is independent of the display so it can be
//! driven and tested without GTK: theme, navigation, loader sequencing,
//! scroll styling, card entrance latches and their pending reveals.

pub mod app_state;
pub mod entrance;
pub mod loader;
pub mod navigation;
pub mod reveal;
pub mod scroll;
pub mod task;
pub mod theme;

pub use {
    app_state::{AppState, AppStateEvent, BootSession},
    entrance::EntranceTracker,
    loader::{LoaderSequencer, LoaderStage},
    navigation::{NavigationState, PageSelection},
    reveal::RevealSchedule,
    scroll::{NavbarStyle, NavbarVariant, ScrollStyleController},
    task::TaskGuard,
    theme::{ThemeSetting, ThemeSink, ThemeStore},
};
