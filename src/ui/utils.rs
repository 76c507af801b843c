//! Utility functions for UI components.
//!
//! This module provides shared helpers for widgets: signal handler guards
//! and Pango markup formatting for the loader and catalog labels.

use libadwaita::{
    glib::{Object, SignalHandlerId, WeakRef, markup_escape_text},
    prelude::{Cast, IsA, ObjectExt},
};

/// Disconnects a signal handler when dropped.
///
/// The object is held weakly, so a guard outliving its object is harmless.
pub struct SignalGuard {
    object: WeakRef<Object>,
    handler: Option<SignalHandlerId>,
}

impl SignalGuard {
    /// Wraps a handler connected on `object`.
    ///
    /// # Arguments
    ///
    /// * `object` - Object the handler is connected to
    /// * `handler` - Handler id returned by the `connect_*` call
    ///
    /// # Returns
    ///
    /// A guard owning the connection.
    pub fn new(object: &impl IsA<Object>, handler: SignalHandlerId) -> Self {
        Self {
            object: object.upcast_ref::<Object>().downgrade(),
            handler: Some(handler),
        }
    }
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        if let (Some(object), Some(handler)) = (self.object.upgrade(), self.handler.take()) {
            object.disconnect(handler);
        }
    }
}

/// Wraps escaped `text` in a span with the given Pango size and color.
///
/// # Arguments
///
/// * `text` - Plain text to display
/// * `size` - Pango size keyword or absolute size, e.g. `"xx-large"`
/// * `color` - Optional foreground color
///
/// # Returns
///
/// A markup string suitable for `Label::set_markup`.
pub fn sized_markup(text: &str, size: &str, color: Option<&str>) -> String {
    let escaped = markup_escape_text(text);
    match color {
        Some(color) => format!("<span size=\"{size}\" foreground=\"{color}\">{escaped}</span>"),
        None => format!("<span size=\"{size}\">{escaped}</span>"),
    }
}

#[cfg(test)]
mod tests {
    use crate::ui::utils::sized_markup;

    #[test]
    fn test_sized_markup() {
        assert_eq!(
            sized_markup("Egg", "large", None),
            "<span size=\"large\">Egg</span>"
        );
        assert_eq!(
            sized_markup("Hen", "x-large", Some("#FF9800")),
            "<span size=\"x-large\" foreground=\"#FF9800\">Hen</span>"
        );
    }

    #[test]
    fn test_sized_markup_escapes_text() {
        assert_eq!(
            sized_markup("Eggs & Chicks", "small", None),
            "<span size=\"small\">Eggs &amp; Chicks</span>"
        );
    }
}
