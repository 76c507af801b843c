//! Stylesheets and the Libadwaita theme sink.
//!
//! The application stylesheet is installed once per display. The navbar gets
//! its own provider, reloaded whenever the scroll variant changes. Theme
//! changes need no reload: the navbar rules of both themes are installed and
//! the color scheme picks between them.

use {
    libadwaita::{
        ColorScheme, StyleManager,
        gtk::{
            CssProvider, STYLE_PROVIDER_PRIORITY_APPLICATION, gdk::Display,
            style_context_add_provider_for_display,
        },
    },
    tracing::{debug, warn},
};

use crate::state::{NavbarVariant, ThemeSetting, ThemeSink, scroll::navbar_stylesheet};

/// CSS selector of the navbar header bar.
pub const NAVBAR_SELECTOR: &str = "headerbar.navbar";

/// Static application stylesheet.
const APP_CSS: &str = "
.brand { color: #f97316; font-weight: 800; }
.loader-title { color: #f97316; }
.nav-button:checked { color: #f97316; }
.catalog-card { padding: 24px; border-radius: 12px; }
.catalog-price { color: #f97316; font-size: 1.5em; font-weight: 800; }
.catfish-page { background-image: linear-gradient(to bottom, #eff6ff, #dbeafe); }
.catfish-page .catalog-heading { color: #1e3a8a; }
.mobile-menu { padding: 0 12px 12px 12px; }
";

/// Maps a theme setting to the Libadwaita color scheme forcing it.
#[must_use]
pub fn color_scheme_for(theme: ThemeSetting) -> ColorScheme {
    match theme {
        ThemeSetting::Light => ColorScheme::ForceLight,
        ThemeSetting::Dark => ColorScheme::ForceDark,
    }
}

/// Mirrors the theme into the process-wide Libadwaita color scheme.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdwaitaThemeSink;

impl ThemeSink for AdwaitaThemeSink {
    fn apply(&self, theme: ThemeSetting) {
        debug!(theme = %theme, "Applying color scheme");
        StyleManager::default().set_color_scheme(color_scheme_for(theme));
    }
}

/// Installs `provider` on the default display.
///
/// # Returns
///
/// `false` if there is no display to install on.
fn install_provider(provider: &CssProvider) -> bool {
    match Display::default() {
        Some(display) => {
            style_context_add_provider_for_display(
                &display,
                provider,
                STYLE_PROVIDER_PRIORITY_APPLICATION,
            );
            true
        }
        None => {
            warn!("No default display, stylesheet not installed");
            false
        }
    }
}

/// Loads the static application stylesheet.
pub fn install_app_stylesheet() {
    let provider = CssProvider::new();
    provider.load_from_string(APP_CSS);
    install_provider(&provider);
}

/// Dynamic stylesheet for the navbar.
pub struct NavbarStyler {
    /// Provider holding the current navbar rule.
    provider: CssProvider,
}

impl NavbarStyler {
    /// Creates the styler and installs its provider.
    pub fn new() -> Self {
        let provider = CssProvider::new();
        install_provider(&provider);
        Self { provider }
    }

    /// Replaces the navbar rules with those of `variant`.
    pub fn apply(&self, variant: NavbarVariant) {
        debug!(?variant, "Updating navbar style");
        self.provider
            .load_from_string(&navbar_stylesheet(variant, NAVBAR_SELECTOR));
    }
}

impl Default for NavbarStyler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use libadwaita::ColorScheme::{ForceDark, ForceLight};

    use crate::{
        state::ThemeSetting::{Dark, Light},
        ui::style::color_scheme_for,
    };

    #[test]
    fn test_color_scheme_mapping() {
        assert_eq!(color_scheme_for(Light), ForceLight);
        assert_eq!(color_scheme_for(Dark), ForceDark);
    }
}
