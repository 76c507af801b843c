//! Adaptive navbar with brand, page navigation, theme toggle and mobile menu.
//!
//! On wide windows the page buttons sit in the header bar. Below the 768sp
//! breakpoint they are hidden and a menu button reveals a vertical page list
//! under the header instead.

use std::sync::Arc;

use {
    libadwaita::{
        ApplicationWindow, Breakpoint, BreakpointCondition, ButtonContent,
        HeaderBar as LibadwaitaHeaderBar,
        gtk::{
            Align::Center,
            Box, Button, Label,
            Orientation::{Horizontal, Vertical},
            Revealer,
            RevealerTransitionType::SlideDown,
            ToggleButton,
        },
        prelude::{
            AdwApplicationWindowExt, BoxExt, ButtonExt, ToValue, ToggleButtonExt, WidgetExt,
        },
    },
    tracing::debug,
};

use crate::{
    error::UiError,
    state::{AppState, AppStateEvent, PageSelection, ThemeSetting},
    ui::utils::SignalGuard,
};

/// Width condition below which the mobile layout is used.
pub const MOBILE_BREAKPOINT: &str = "max-width: 768sp";

/// Icon name and tooltip of the theme button for the current `theme`.
///
/// The icon shows the mode the button switches to.
#[must_use]
pub fn theme_toggle_icon(theme: ThemeSetting) -> (&'static str, &'static str) {
    match theme {
        ThemeSetting::Dark => ("weather-clear-symbolic", "Switch to light mode"),
        ThemeSetting::Light => ("weather-clear-night-symbolic", "Switch to dark mode"),
    }
}

/// Navbar and mobile menu bound to the application state.
pub struct HeaderBar {
    /// The underlying Libadwaita header bar widget.
    pub widget: LibadwaitaHeaderBar,
    /// Revealer holding the mobile page list, placed below the header.
    pub mobile_menu: Revealer,
    /// Desktop page buttons container.
    desktop_nav: Box,
    /// Desktop page buttons, in `PageSelection::ALL` order.
    page_buttons: Vec<(PageSelection, ToggleButton)>,
    /// Theme toggle button.
    pub theme_button: Button,
    /// Mobile menu toggle button.
    pub menu_button: ToggleButton,
    /// Connected click handlers.
    _signals: Vec<SignalGuard>,
}

impl HeaderBar {
    /// Creates the navbar reflecting the current state of `app_state`.
    ///
    /// # Arguments
    ///
    /// * `app_state` - State the buttons read from and write to
    ///
    /// # Returns
    ///
    /// A new `HeaderBar` instance.
    pub fn new(app_state: &Arc<AppState>) -> Self {
        let widget = LibadwaitaHeaderBar::builder().show_title(true).build();
        widget.add_css_class("navbar");

        let brand = Label::builder().label("D4 KIENYEJI").build();
        brand.add_css_class("brand");
        brand.add_css_class("title-3");
        widget.pack_start(&brand);

        let mut signals = Vec::new();

        let desktop_nav = Box::builder()
            .orientation(Horizontal)
            .spacing(6)
            .halign(Center)
            .build();
        let mut page_buttons: Vec<(PageSelection, ToggleButton)> = Vec::new();
        for page in PageSelection::ALL {
            let button = ToggleButton::builder()
                .label(page.label())
                .active(page == app_state.current_page())
                .build();
            button.add_css_class("flat");
            button.add_css_class("nav-button");
            if let Some((_, first)) = page_buttons.first() {
                button.set_group(Some(first));
            }

            let state = app_state.clone();
            let handler = button.connect_clicked(move |_| state.select_page(page));
            signals.push(SignalGuard::new(&button, handler));

            desktop_nav.append(&button);
            page_buttons.push((page, button));
        }
        widget.set_title_widget(Some(&desktop_nav));

        let (icon, tooltip) = theme_toggle_icon(app_state.theme());
        let theme_button = Button::builder()
            .icon_name(icon)
            .tooltip_text(tooltip)
            .build();
        let state = app_state.clone();
        let handler = theme_button.connect_clicked(move |_| {
            state.toggle_theme();
        });
        signals.push(SignalGuard::new(&theme_button, handler));

        let menu_button = ToggleButton::builder()
            .icon_name("open-menu-symbolic")
            .tooltip_text("Menu")
            .visible(false)
            .build();
        let state = app_state.clone();
        let handler = menu_button.connect_clicked(move |_| {
            state.toggle_menu();
        });
        signals.push(SignalGuard::new(&menu_button, handler));

        widget.pack_end(&menu_button);
        widget.pack_end(&theme_button);

        let menu_list = Box::builder().orientation(Vertical).spacing(4).build();
        menu_list.add_css_class("mobile-menu");
        for page in PageSelection::ALL {
            let content = ButtonContent::builder()
                .icon_name(page.icon_name())
                .label(page.menu_label())
                .build();
            let button = Button::builder().child(&content).build();
            button.add_css_class("flat");

            let state = app_state.clone();
            let handler = button.connect_clicked(move |_| state.select_page(page));
            signals.push(SignalGuard::new(&button, handler));

            menu_list.append(&button);
        }

        let mobile_menu = Revealer::builder()
            .transition_type(SlideDown)
            .reveal_child(app_state.is_menu_open())
            .visible(false)
            .child(&menu_list)
            .build();

        Self {
            widget,
            mobile_menu,
            desktop_nav,
            page_buttons,
            theme_button,
            menu_button,
            _signals: signals,
        }
    }

    /// Switches to the mobile layout on narrow windows.
    ///
    /// # Arguments
    ///
    /// * `window` - Window whose width drives the breakpoint
    ///
    /// # Errors
    ///
    /// Returns `UiError::WidgetError` if the breakpoint condition is rejected.
    pub fn install_breakpoint(&self, window: &ApplicationWindow) -> Result<(), UiError> {
        let condition = BreakpointCondition::parse(MOBILE_BREAKPOINT)
            .map_err(|e| UiError::WidgetError(format!("Invalid breakpoint: {e}")))?;
        let breakpoint = Breakpoint::new(condition);

        breakpoint.add_setter(&self.desktop_nav, "visible", Some(&false.to_value()));
        breakpoint.add_setter(&self.menu_button, "visible", Some(&true.to_value()));
        breakpoint.add_setter(&self.mobile_menu, "visible", Some(&true.to_value()));

        window.add_breakpoint(breakpoint);
        Ok(())
    }

    /// Brings the widgets in line with a state change.
    pub fn apply_event(&self, event: &AppStateEvent) {
        match event {
            AppStateEvent::ThemeChanged(theme) => {
                let (icon, tooltip) = theme_toggle_icon(*theme);
                self.theme_button.set_icon_name(icon);
                self.theme_button.set_tooltip_text(Some(tooltip));
            }
            AppStateEvent::PageChanged(page) => {
                for (candidate, button) in &self.page_buttons {
                    if candidate == page {
                        button.set_active(true);
                    }
                }
            }
            AppStateEvent::MenuToggled(open) => {
                debug!(open, "Mobile menu toggled");
                if self.menu_button.is_active() != *open {
                    self.menu_button.set_active(*open);
                }
                self.mobile_menu.set_reveal_child(*open);
            }
            AppStateEvent::BootCompleted => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use libadwaita::{
        init,
        prelude::{ButtonExt, ToggleButtonExt},
    };

    use crate::{
        config::Timings,
        state::{
            AppState,
            AppStateEvent::{MenuToggled, PageChanged, ThemeChanged},
            PageSelection::Catfish,
            ThemeSetting::{Dark, Light},
            theme::tests::RecordingSink,
        },
        ui::header_bar::{HeaderBar, theme_toggle_icon},
    };

    #[test]
    fn test_theme_toggle_icon() {
        assert_eq!(
            theme_toggle_icon(Light),
            ("weather-clear-night-symbolic", "Switch to dark mode")
        );
        assert_eq!(
            theme_toggle_icon(Dark),
            ("weather-clear-symbolic", "Switch to light mode")
        );
    }

    #[test]
    #[ignore = "Requires GTK display for UI testing"]
    fn test_header_bar_follows_state() {
        if init().is_err() {
            return;
        }

        let state = Arc::new(AppState::new(
            Light,
            Arc::new(RecordingSink::default()),
            Timings::default(),
        ));
        let header_bar = HeaderBar::new(&state);

        assert_eq!(
            header_bar.theme_button.icon_name().as_deref(),
            Some("weather-clear-night-symbolic")
        );
        assert!(header_bar.page_buttons[0].1.is_active());

        header_bar.apply_event(&ThemeChanged(Dark));
        assert_eq!(
            header_bar.theme_button.icon_name().as_deref(),
            Some("weather-clear-symbolic")
        );

        header_bar.apply_event(&PageChanged(Catfish));
        assert!(header_bar.page_buttons[1].1.is_active());
        assert!(!header_bar.page_buttons[0].1.is_active());

        header_bar.apply_event(&MenuToggled(true));
        assert!(header_bar.menu_button.is_active());
        assert!(header_bar.mobile_menu.reveals_child());
    }
}
