//! Selected catalog page and mobile menu state.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Catalog page currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageSelection {
    /// Chicken catalog (default).
    #[default]
    Chicken,
    /// Catfish catalog.
    Catfish,
}

impl PageSelection {
    /// Both pages in navigation order.
    pub const ALL: [PageSelection; 2] = [Self::Chicken, Self::Catfish];

    /// Short label used on the desktop navigation buttons.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Chicken => "Chicken",
            Self::Catfish => "Catfish",
        }
    }

    /// Longer label used in the mobile menu.
    #[must_use]
    pub fn menu_label(self) -> &'static str {
        match self {
            Self::Chicken => "Chicken Catalog",
            Self::Catfish => "Catfish Catalog",
        }
    }

    /// Symbolic icon for the page.
    #[must_use]
    pub fn icon_name(self) -> &'static str {
        match self {
            Self::Chicken => "go-home-symbolic",
            Self::Catfish => "weather-showers-symbolic",
        }
    }

    /// Stable identifier used as the stack child name.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Chicken => "chicken",
            Self::Catfish => "catfish",
        }
    }
}

impl Display for PageSelection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.id())
    }
}

/// Navigation state: selected page plus mobile menu flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    /// Selected page.
    page: PageSelection,
    /// Whether the mobile menu is expanded.
    menu_open: bool,
}

impl NavigationState {
    /// Creates navigation state on the default page with the menu closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the selected page.
    #[must_use]
    pub fn current_page(&self) -> PageSelection {
        self.page
    }

    /// Whether the mobile menu is open.
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Selects `page` and closes the menu.
    pub fn select_page(&mut self, page: PageSelection) {
        self.page = page;
        self.menu_open = false;
    }

    /// Opens or closes the menu.
    pub fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
    }

    /// Flips the menu flag.
    ///
    /// # Returns
    ///
    /// The new menu state.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }
}

#[cfg(test)]
mod tests {
    use crate::state::navigation::{
        NavigationState,
        PageSelection::{Catfish, Chicken},
    };

    #[test]
    fn test_defaults() {
        let nav = NavigationState::new();
        assert_eq!(nav.current_page(), Chicken);
        assert!(!nav.is_menu_open());
    }

    #[test]
    fn test_select_page_closes_menu() {
        let mut nav = NavigationState::new();
        nav.set_menu_open(true);

        nav.select_page(Catfish);

        assert_eq!(nav.current_page(), Catfish);
        assert!(!nav.is_menu_open());
    }

    #[test]
    fn test_select_same_page_is_idempotent() {
        let mut nav = NavigationState::new();
        nav.select_page(Chicken);
        nav.select_page(Chicken);
        assert_eq!(nav.current_page(), Chicken);
    }

    #[test]
    fn test_toggle_menu() {
        let mut nav = NavigationState::new();
        assert!(nav.toggle_menu());
        assert!(nav.is_menu_open());
        assert!(!nav.toggle_menu());
    }

    #[test]
    fn test_page_labels() {
        assert_eq!(Chicken.label(), "Chicken");
        assert_eq!(Catfish.menu_label(), "Catfish Catalog");
        assert_eq!(Catfish.to_string(), "catfish");
    }
}
