//! Catalog card with a one-shot slide-up entrance.
//!
//! Cards start transparent and shifted down by `ENTRANCE_OFFSET_PX`. The
//! offset moves from the top margin to the bottom margin while the card
//! rises, so the allocated height never changes and the visibility
//! measurement stays valid before the card is revealed.

use std::rc::Rc;

use libadwaita::{
    CallbackAnimationTarget, Easing::EaseOutCubic, TimedAnimation,
    gtk::{
        Align::{Fill, Start},
        Box, Button, Label,
        Orientation::Vertical,
        pango::WrapMode::WordChar,
    },
    prelude::{AnimationExt, BoxExt, ButtonExt, ObjectExt, WidgetExt},
};

use crate::{catalog::CatalogItem, state::entrance::ENTRANCE_DURATION};

/// Vertical distance the card rises during its entrance.
pub const ENTRANCE_OFFSET_PX: i32 = 20;

/// Opacity and remaining downward offset at entrance `progress` in `[0, 1]`.
#[must_use]
pub fn entrance_frame(progress: f64) -> (f64, i32) {
    let progress = progress.clamp(0.0, 1.0);
    let offset = (f64::from(ENTRANCE_OFFSET_PX) * (1.0 - progress)).round() as i32;
    (progress, offset)
}

/// Builder pattern for configuring `CatalogCard` components.
pub struct CatalogCardBuilder {
    item: CatalogItem,
    on_order_clicked: Option<Rc<dyn Fn(&CatalogItem)>>,
}

impl CatalogCardBuilder {
    /// Sets the callback for the "Order Now" button.
    ///
    /// # Arguments
    ///
    /// * `callback` - Function called with the card's item
    ///
    /// # Returns
    ///
    /// The builder instance for method chaining.
    pub fn on_order_clicked<F>(mut self, callback: F) -> Self
    where
        F: Fn(&CatalogItem) + 'static,
    {
        self.on_order_clicked = Some(Rc::new(callback));
        self
    }

    /// Builds the card.
    ///
    /// # Returns
    ///
    /// A new `CatalogCard` instance.
    pub fn build(self) -> CatalogCard {
        CatalogCard::new(self.item, self.on_order_clicked)
    }
}

/// Card showing one catalog item.
pub struct CatalogCard {
    /// Root widget of the card.
    pub widget: Box,
    /// Item title label.
    pub title_label: Label,
    /// Item price label.
    pub price_label: Label,
    /// "Order Now" button.
    pub order_button: Button,
    /// Entrance animation, played at most once.
    entrance: TimedAnimation,
}

impl CatalogCard {
    /// Starts building a card for `item`.
    pub fn builder(item: CatalogItem) -> CatalogCardBuilder {
        CatalogCardBuilder {
            item,
            on_order_clicked: None,
        }
    }

    /// Creates a new card, hidden until its entrance plays.
    ///
    /// # Arguments
    ///
    /// * `item` - Item to display
    /// * `on_order_clicked` - Optional callback for the order button
    ///
    /// # Returns
    ///
    /// A new `CatalogCard` instance.
    pub fn new(
        item: CatalogItem,
        on_order_clicked: Option<Rc<dyn Fn(&CatalogItem)>>,
    ) -> Self {
        let widget = Box::builder()
            .orientation(Vertical)
            .spacing(12)
            .valign(Start)
            .css_classes(["card", "catalog-card"])
            .build();

        let title_label = Label::builder()
            .label(&item.title)
            .halign(Start)
            .xalign(0.0)
            .wrap(true)
            .css_classes(["title-3"])
            .build();
        widget.append(&title_label);

        let description_label = Label::builder()
            .label(&item.description)
            .halign(Fill)
            .xalign(0.0)
            .wrap(true)
            .wrap_mode(WordChar)
            .css_classes(["dim-label"])
            .build();
        widget.append(&description_label);

        let price_label = Label::builder()
            .label(&item.price)
            .halign(Start)
            .css_classes(["catalog-price"])
            .build();
        widget.append(&price_label);

        let order_button = Button::builder()
            .label("Order Now")
            .halign(Start)
            .css_classes(["suggested-action", "pill"])
            .build();
        if let Some(callback) = on_order_clicked {
            order_button.connect_clicked(move |_| callback(&item));
        }
        widget.append(&order_button);

        let target_widget = widget.downgrade();
        let target = CallbackAnimationTarget::new(move |value| {
            let Some(target_widget) = target_widget.upgrade() else {
                return;
            };
            let (opacity, offset) = entrance_frame(value);
            target_widget.set_opacity(opacity);
            target_widget.set_margin_top(offset);
            target_widget.set_margin_bottom(ENTRANCE_OFFSET_PX - offset);
        });
        let duration = u32::try_from(ENTRANCE_DURATION.as_millis()).unwrap_or(u32::MAX);
        let entrance = TimedAnimation::new(&widget, 0.0, 1.0, duration, target);
        entrance.set_easing(EaseOutCubic);

        let (opacity, offset) = entrance_frame(0.0);
        widget.set_opacity(opacity);
        widget.set_margin_top(offset);
        widget.set_margin_bottom(ENTRANCE_OFFSET_PX - offset);

        Self {
            widget,
            title_label,
            price_label,
            order_button,
            entrance,
        }
    }

    /// Plays the entrance animation.
    ///
    /// An unmapped card skips straight to its final state.
    pub fn play_entrance(&self) {
        self.entrance.play();
    }
}
