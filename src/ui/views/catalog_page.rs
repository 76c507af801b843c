//! Catalog page: heading, tagline and a grid of entering cards.
//!
//! Every mount builds fresh cards and a fresh `EntranceTracker`. The window
//! calls `refresh_entrances` whenever the scroll position or the layout
//! changes; cards whose latch fires are revealed after their staggered delay.
//!
//! On mount the page slides in from the right while the heading and tagline
//! drop into place. Both moves shift a margin from one side of the widget to
//! the other, so the page layout is the same on every frame.

use std::{cell::RefCell, rc::Rc, time::Duration};

use {
    libadwaita::{
        CallbackAnimationTarget, Easing::Linear, TimedAnimation,
        glib::{SourceId, timeout_add_local_once},
        gtk::{
            Align::{Center, Fill, Start},
            Box, FlowBox,
            Justification::Center as JustifyCenter,
            Label,
            Orientation::Vertical,
            Overlay,
            SelectionMode::None as SelectionNone,
            Widget,
        },
        prelude::{AnimationExt, BoxExt, Cast, IsA, ObjectExt, WidgetExt},
    },
    tracing::{debug, info},
};

use crate::{
    catalog::CatalogPage,
    state::{
        EntranceTracker, PageSelection, RevealSchedule,
        entrance::{MOUNT_ENTRANCE, MOUNT_OFFSET_PX, MountFrame, mount_frame, visible_fraction},
    },
    ui::components::{CatalogCard, WaterBackground},
};

/// Horizontal margin of the page content at rest.
const PAGE_MARGIN_PX: i32 = 24;

/// Heading, tagline and content box moved by the mount entrance.
struct MountParts {
    container: Box,
    heading: Label,
    tagline: Label,
}

impl MountParts {
    fn apply(&self, frame: MountFrame) {
        self.container.set_opacity(frame.page.opacity);
        self.container
            .set_margin_start(PAGE_MARGIN_PX + frame.page.offset);
        self.container.set_margin_end(PAGE_MARGIN_PX - frame.page.offset);

        for (label, fade) in [(&self.heading, frame.heading), (&self.tagline, frame.tagline)] {
            label.set_opacity(fade.opacity);
            label.set_margin_top(MOUNT_OFFSET_PX - fade.offset);
            label.set_margin_bottom(fade.offset);
        }
    }
}

/// Mounted catalog page.
pub struct CatalogPageView {
    /// Root widget of the page.
    pub widget: Widget,
    /// Page shown by this view.
    pub page: PageSelection,
    /// Cards in catalog order.
    cards: Rc<Vec<CatalogCard>>,
    /// Entrance latches of this mount.
    tracker: RefCell<EntranceTracker>,
    /// Reveal timeouts not yet fired.
    reveals: Rc<RefCell<RevealSchedule<SourceId>>>,
    /// Slide-in of the page and its headings.
    mount_entrance: TimedAnimation,
    /// Animated background of the catfish page.
    water: Option<WaterBackground>,
}

impl CatalogPageView {
    /// Builds the page.
    ///
    /// # Arguments
    ///
    /// * `page` - Which page this is
    /// * `content` - Heading, tagline and items to render
    /// * `stagger` - Entrance delay added per card position
    ///
    /// # Returns
    ///
    /// A new `CatalogPageView` with every card and the headings hidden.
    pub fn new(page: PageSelection, content: &CatalogPage, stagger: Duration) -> Self {
        let container = Box::builder()
            .orientation(Vertical)
            .spacing(12)
            .margin_top(12)
            .margin_bottom(32)
            .build();

        let heading = Label::builder()
            .label(&content.heading)
            .halign(Center)
            .css_classes(["title-1", "catalog-heading"])
            .build();

        let tagline = Label::builder()
            .label(&content.tagline)
            .halign(Center)
            .justify(JustifyCenter)
            .wrap(true)
            .max_width_chars(80)
            .css_classes(["dim-label"])
            .build();

        let headings = Box::builder().orientation(Vertical).build();
        headings.append(&heading);
        headings.append(&tagline);
        container.append(&headings);

        let flow_box = FlowBox::builder()
            .halign(Fill)
            .valign(Start)
            .homogeneous(true)
            .min_children_per_line(1)
            .max_children_per_line(3)
            .selection_mode(SelectionNone)
            .row_spacing(24)
            .column_spacing(24)
            .margin_top(24)
            .css_classes(["catalog-grid"])
            .build();

        let cards: Vec<CatalogCard> = content
            .items
            .iter()
            .map(|item| {
                let card = CatalogCard::builder(item.clone())
                    .on_order_clicked(|item| info!(item = %item.title, "Order requested"))
                    .build();
                flow_box.append(&card.widget);
                card
            })
            .collect();
        container.append(&flow_box);

        let (widget, water) = match page {
            PageSelection::Chicken => (container.clone().upcast::<Widget>(), None),
            PageSelection::Catfish => {
                let water = WaterBackground::new();
                let overlay = Overlay::builder().child(&water.widget).build();
                overlay.add_overlay(&container);
                overlay.set_measure_overlay(&container, true);
                overlay.add_css_class("catfish-page");
                (overlay.upcast::<Widget>(), Some(water))
            }
        };

        let parts = MountParts {
            container,
            heading,
            tagline,
        };
        parts.apply(mount_frame(Duration::ZERO));
        let (container, heading, tagline) = (
            parts.container.downgrade(),
            parts.heading.downgrade(),
            parts.tagline.downgrade(),
        );
        let target = CallbackAnimationTarget::new(move |elapsed_ms| {
            let (Some(container), Some(heading), Some(tagline)) =
                (container.upgrade(), heading.upgrade(), tagline.upgrade())
            else {
                return;
            };
            let elapsed = Duration::from_secs_f64(elapsed_ms.max(0.0) / 1000.0);
            MountParts {
                container,
                heading,
                tagline,
            }
            .apply(mount_frame(elapsed));
        });
        let duration_ms = u32::try_from(MOUNT_ENTRANCE.as_millis()).unwrap_or(u32::MAX);
        let mount_entrance =
            TimedAnimation::new(&widget, 0.0, f64::from(duration_ms), duration_ms, target);
        mount_entrance.set_easing(Linear);

        debug!(page = %page, cards = cards.len(), "Catalog page mounted");

        Self {
            widget,
            page,
            tracker: RefCell::new(EntranceTracker::new(cards.len(), stagger)),
            cards: Rc::new(cards),
            reveals: Rc::new(RefCell::new(RevealSchedule::new())),
            mount_entrance,
            water,
        }
    }

    /// Slides the page and its headings into place.
    pub fn play_mount_entrance(&self) {
        self.mount_entrance.play();
    }

    /// Fires the entrance of every card now visible in `viewport`.
    ///
    /// # Arguments
    ///
    /// * `viewport` - Scrolling widget the cards are measured against
    pub fn refresh_entrances(&self, viewport: &impl IsA<Widget>) {
        if self.tracker.borrow().all_triggered() {
            return;
        }
        let viewport_height = f64::from(viewport.height());

        for (index, card) in self.cards.iter().enumerate() {
            let Some(bounds) = card.widget.compute_bounds(viewport) else {
                continue;
            };
            let fraction = visible_fraction(
                f64::from(bounds.y()),
                f64::from(bounds.height()),
                viewport_height,
            );

            let Some(delay) = self.tracker.borrow_mut().observe_fraction(index, fraction) else {
                continue;
            };
            self.schedule_reveal(index, delay);
        }
    }

    fn schedule_reveal(&self, index: usize, delay: Duration) {
        if delay.is_zero() {
            if let Some(card) = self.cards.get(index) {
                card.play_entrance();
            }
            return;
        }

        let cards = Rc::downgrade(&self.cards);
        let reveals = Rc::downgrade(&self.reveals);
        let source = timeout_add_local_once(delay, move || {
            // The source is gone once this runs; only forget it.
            if let Some(reveals) = reveals.upgrade() {
                reveals.borrow_mut().fire(index);
            }
            if let Some(card) = cards.upgrade().as_ref().and_then(|cards| cards.get(index)) {
                card.play_entrance();
            }
        });
        if let Some(previous) = self.reveals.borrow_mut().schedule(index, source) {
            previous.remove();
        }
    }

    /// Cancels pending reveals and stops the background animation.
    pub fn teardown(&mut self) {
        self.reveals.borrow_mut().cancel_all(SourceId::remove);
        if let Some(water) = self.water.as_mut() {
            water.stop();
        }
    }
}

impl Drop for CatalogPageView {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use libadwaita::{init, prelude::WidgetExt};

    use crate::{
        catalog::Catalog,
        state::{
            PageSelection::{Catfish, Chicken},
            entrance::DEFAULT_ENTRANCE_STAGGER,
        },
        ui::views::catalog_page::{CatalogPageView, PAGE_MARGIN_PX},
    };

    #[test]
    #[ignore = "Requires GTK display for UI testing"]
    fn test_catalog_page_view_creation() {
        if init().is_err() {
            return;
        }

        let catalog = Catalog::builtin().unwrap();

        let chicken = CatalogPageView::new(
            Chicken,
            catalog.page(Chicken),
            DEFAULT_ENTRANCE_STAGGER,
        );
        assert_eq!(chicken.cards.len(), 8);
        assert!(chicken.water.is_none());
        assert_eq!(chicken.widget.opacity(), 0.0);
        assert_eq!(chicken.widget.margin_start(), PAGE_MARGIN_PX + 20);

        // Unmapped, so the entrance jumps to its resting layout.
        chicken.play_mount_entrance();
        assert_eq!(chicken.widget.opacity(), 1.0);
        assert_eq!(chicken.widget.margin_start(), PAGE_MARGIN_PX);
        assert_eq!(chicken.widget.margin_end(), PAGE_MARGIN_PX);

        let mut catfish = CatalogPageView::new(
            Catfish,
            catalog.page(Catfish),
            DEFAULT_ENTRANCE_STAGGER,
        );
        assert_eq!(catfish.cards.len(), 6);
        assert!(catfish.water.as_ref().is_some_and(|w| w.is_animating()));

        catfish.teardown();
        assert_eq!(catfish.reveals.borrow_mut().cancel_all(|_| ()), 0);
        assert!(catfish.water.as_ref().is_some_and(|w| !w.is_animating()));
    }
}
