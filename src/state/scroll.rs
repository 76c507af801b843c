//! Scroll-driven navbar style.
//!
//! The navbar switches between two variants depending on how far the catalog
//! is scrolled. Each variant maps, together with the theme, to a fixed set of
//! presentation attributes. The rendered stylesheet carries the rules of both
//! themes, so it only changes with the variant.

use std::cell::Cell;

use crate::state::theme::ThemeSetting;

/// Default scroll offset (in pixels) above which the navbar is `Scrolled`.
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 50.0;

/// Navbar presentation variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavbarVariant {
    /// Page scrolled to (or near) the top.
    #[default]
    Default,
    /// Page scrolled past the threshold.
    Scrolled,
}

/// Derives the navbar variant for a vertical scroll offset.
///
/// The comparison is strict: an offset equal to the threshold is still
/// `Default`.
#[must_use]
pub fn variant_for_offset(offset: f64, threshold: f64) -> NavbarVariant {
    if offset > threshold {
        NavbarVariant::Scrolled
    } else {
        NavbarVariant::Default
    }
}

/// Tracks the last navbar variant so repeated offsets produce no updates.
#[derive(Debug)]
pub struct ScrollStyleController {
    /// Offset above which the navbar is `Scrolled`.
    threshold: f64,
    /// Variant computed on the previous observation.
    last: Cell<NavbarVariant>,
}

impl ScrollStyleController {
    /// Creates a controller starting in the `Default` variant.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            last: Cell::new(NavbarVariant::Default),
        }
    }

    /// Gets the last computed variant.
    #[must_use]
    pub fn variant(&self) -> NavbarVariant {
        self.last.get()
    }

    /// Feeds a new scroll offset.
    ///
    /// # Returns
    ///
    /// `Some(variant)` when the variant changed, `None` otherwise.
    pub fn observe(&self, offset: f64) -> Option<NavbarVariant> {
        let variant = variant_for_offset(offset, self.threshold);
        if self.last.replace(variant) == variant {
            None
        } else {
            Some(variant)
        }
    }
}

impl Default for ScrollStyleController {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD)
    }
}

/// Presentation attributes of the navbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavbarStyle {
    /// Background red, green and blue components.
    pub background_rgb: (u8, u8, u8),
    /// Background opacity.
    pub background_alpha: f64,
    /// Vertical shadow offset in pixels.
    pub shadow_offset_y: u8,
    /// Shadow blur radius in pixels.
    pub shadow_blur: u8,
    /// Shadow opacity.
    pub shadow_alpha: f64,
}

impl NavbarStyle {
    /// Looks up the style for a variant under a theme.
    #[must_use]
    pub fn lookup(variant: NavbarVariant, theme: ThemeSetting) -> Self {
        let background_rgb = match theme {
            ThemeSetting::Light => (255, 255, 255),
            ThemeSetting::Dark => (17, 24, 39),
        };

        match variant {
            NavbarVariant::Default => Self {
                background_rgb,
                background_alpha: 0.9,
                shadow_offset_y: 2,
                shadow_blur: 10,
                shadow_alpha: 0.05,
            },
            NavbarVariant::Scrolled => Self {
                background_rgb,
                background_alpha: 0.95,
                shadow_offset_y: 4,
                shadow_blur: 20,
                shadow_alpha: 0.1,
            },
        }
    }

    /// Renders the style as a CSS rule for `selector`.
    #[must_use]
    pub fn to_css(&self, selector: &str) -> String {
        let (r, g, b) = self.background_rgb;
        format!(
            "{selector} {{ background-color: rgba({r}, {g}, {b}, {}); \
             box-shadow: 0 {}px {}px rgba(0, 0, 0, {}); \
             transition: background-color 300ms, box-shadow 300ms; }}",
            self.background_alpha, self.shadow_offset_y, self.shadow_blur, self.shadow_alpha
        )
    }
}

/// Renders the navbar stylesheet of `variant` for both themes.
///
/// The dark rule is wrapped in a `prefers-color-scheme: dark` media query and
/// applies as soon as the color scheme is dark.
#[must_use]
pub fn navbar_stylesheet(variant: NavbarVariant, selector: &str) -> String {
    let light = NavbarStyle::lookup(variant, ThemeSetting::Light).to_css(selector);
    let dark = NavbarStyle::lookup(variant, ThemeSetting::Dark).to_css(selector);
    format!("{light}\n@media (prefers-color-scheme: dark) {{\n  {dark}\n}}\n")
}

#[cfg(test)]
mod tests {
    use crate::state::{
        scroll::{
            DEFAULT_SCROLL_THRESHOLD, NavbarStyle,
            NavbarVariant::{Default as AtTop, Scrolled},
            ScrollStyleController, navbar_stylesheet, variant_for_offset,
        },
        theme::ThemeSetting::{Dark, Light},
    };

    #[test]
    fn test_threshold_is_strict() {
        let t = DEFAULT_SCROLL_THRESHOLD;
        assert_eq!(variant_for_offset(0.0, t), AtTop);
        assert_eq!(variant_for_offset(49.0, t), AtTop);
        assert_eq!(variant_for_offset(50.0, t), AtTop);
        assert_eq!(variant_for_offset(51.0, t), Scrolled);
    }

    #[test]
    fn test_observe_suppresses_repeats() {
        let controller = ScrollStyleController::default();

        assert_eq!(controller.observe(10.0), None);
        assert_eq!(controller.observe(80.0), Some(Scrolled));
        assert_eq!(controller.observe(120.0), None);
        assert_eq!(controller.observe(80.0), None);
        assert_eq!(controller.variant(), Scrolled);
        assert_eq!(controller.observe(50.0), Some(AtTop));
        assert_eq!(controller.observe(0.0), None);
    }

    #[test]
    fn test_custom_threshold() {
        let controller = ScrollStyleController::new(200.0);
        assert_eq!(controller.observe(150.0), None);
        assert_eq!(controller.observe(201.0), Some(Scrolled));
    }

    #[test]
    fn test_style_lookup() {
        let light_default = NavbarStyle::lookup(AtTop, Light);
        assert_eq!(light_default.background_rgb, (255, 255, 255));
        assert_eq!(light_default.background_alpha, 0.9);
        assert_eq!(light_default.shadow_blur, 10);

        let dark_scrolled = NavbarStyle::lookup(Scrolled, Dark);
        assert_eq!(dark_scrolled.background_rgb, (17, 24, 39));
        assert_eq!(dark_scrolled.background_alpha, 0.95);
        assert_eq!(dark_scrolled.shadow_offset_y, 4);
        assert_eq!(dark_scrolled.shadow_alpha, 0.1);
    }

    #[test]
    fn test_style_css() {
        let css = NavbarStyle::lookup(Scrolled, Light).to_css("headerbar.navbar");
        assert!(css.starts_with("headerbar.navbar {"));
        assert!(css.contains("rgba(255, 255, 255, 0.95)"));
        assert!(css.contains("0 4px 20px rgba(0, 0, 0, 0.1)"));
    }

    #[test]
    fn test_stylesheet_covers_both_themes() {
        for variant in [AtTop, Scrolled] {
            let css = navbar_stylesheet(variant, "headerbar.navbar");
            let (light, dark) = css
                .split_once("@media (prefers-color-scheme: dark)")
                .unwrap();

            assert_eq!(
                light.trim(),
                NavbarStyle::lookup(variant, Light).to_css("headerbar.navbar")
            );
            assert!(dark.contains(&NavbarStyle::lookup(variant, Dark).to_css("headerbar.navbar")));
            assert!(dark.contains("rgba(17, 24, 39,"));
            assert!(!light.contains("rgba(17, 24, 39,"));
        }
    }
}
