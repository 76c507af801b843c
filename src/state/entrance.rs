//! One-shot, index-staggered entrance of catalog cards.
//!
//! Each card gets an `EntranceLatch` when its page is mounted. The latch fires
//! the first time enough of the card is inside the viewport and yields the
//! delay after which the card should appear. It never fires again for the
//! lifetime of the mount.
//!
//! The page itself also enters on every mount: it slides in from the right
//! while the heading and tagline drop into place. `mount_frame` gives the
//! state of all three at a point in time.

use std::time::Duration;

/// Default delay added per card position.
pub const DEFAULT_ENTRANCE_STAGGER: Duration = Duration::from_millis(100);

/// Length of the entrance transition itself.
pub const ENTRANCE_DURATION: Duration = Duration::from_millis(500);

/// Fraction of a card that must be inside the viewport to count as seen.
pub const VISIBILITY_AMOUNT: f64 = 0.1;

/// Length of the page slide-in.
pub const PAGE_ENTRANCE: Duration = Duration::from_millis(300);

/// Length of the heading and tagline drop-in.
pub const HEADING_ENTRANCE: Duration = Duration::from_millis(500);

/// Delay of the tagline behind the heading.
pub const TAGLINE_DELAY: Duration = Duration::from_millis(200);

/// Time until every part of a freshly mounted page is in place.
pub const MOUNT_ENTRANCE: Duration = Duration::from_millis(700);

/// Distance the page and its headings travel while entering.
pub const MOUNT_OFFSET_PX: i32 = 20;

/// Fraction of an item's height lying inside the viewport, in `[0, 1]`.
///
/// `item_top` is measured from the top of the viewport.
#[must_use]
pub fn visible_fraction(item_top: f64, item_height: f64, viewport_height: f64) -> f64 {
    if item_height <= 0.0 || viewport_height <= 0.0 {
        return 0.0;
    }

    let top = item_top.max(0.0);
    let bottom = (item_top + item_height).min(viewport_height);
    ((bottom - top) / item_height).clamp(0.0, 1.0)
}

/// Delay before the card at `index` starts its entrance.
#[must_use]
pub fn entrance_delay(index: usize, stagger: Duration) -> Duration {
    stagger.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

/// Cubic ease-out of `t` in `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t.clamp(0.0, 1.0)).powi(3)
}

/// Opacity and remaining displacement of one entering part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Distance in pixels still to travel, `MOUNT_OFFSET_PX` down to 0.
    pub offset: i32,
}

impl Fade {
    /// State at `elapsed` of a part starting after `delay` and taking
    /// `duration`.
    #[must_use]
    pub fn at(elapsed: Duration, delay: Duration, duration: Duration) -> Self {
        let progress = elapsed.saturating_sub(delay).as_secs_f64() / duration.as_secs_f64();
        let eased = ease_out_cubic(progress);
        Self {
            opacity: eased,
            offset: (f64::from(MOUNT_OFFSET_PX) * (1.0 - eased)).round() as i32,
        }
    }
}

/// State of a page's mount entrance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountFrame {
    /// Whole page, sliding in from the right.
    pub page: Fade,
    /// Heading, dropping in from above.
    pub heading: Fade,
    /// Tagline, dropping in after the heading.
    pub tagline: Fade,
}

/// Mount entrance state `elapsed` after the page was mounted.
#[must_use]
pub fn mount_frame(elapsed: Duration) -> MountFrame {
    MountFrame {
        page: Fade::at(elapsed, Duration::ZERO, PAGE_ENTRANCE),
        heading: Fade::at(elapsed, Duration::ZERO, HEADING_ENTRANCE),
        tagline: Fade::at(elapsed, TAGLINE_DELAY, HEADING_ENTRANCE),
    }
}

/// Per-item latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntranceLatch {
    /// Position of the item in its page.
    index: usize,
    /// Whether the entrance already fired.
    triggered: bool,
}

impl EntranceLatch {
    /// Creates an untriggered latch for the item at `index`.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            triggered: false,
        }
    }

    /// Whether the entrance already fired.
    #[must_use]
    pub fn has_triggered(&self) -> bool {
        self.triggered
    }

    /// Reports the item's visibility.
    ///
    /// # Returns
    ///
    /// The entrance delay the first time `visible` is true, `None` otherwise.
    pub fn observe(&mut self, visible: bool, stagger: Duration) -> Option<Duration> {
        if self.triggered || !visible {
            return None;
        }
        self.triggered = true;
        Some(entrance_delay(self.index, stagger))
    }
}

/// Latches for every item of a mounted page.
#[derive(Debug, Clone)]
pub struct EntranceTracker {
    /// One latch per item, in page order.
    latches: Vec<EntranceLatch>,
    /// Delay added per position.
    stagger: Duration,
}

impl EntranceTracker {
    /// Creates fresh latches for `count` items.
    #[must_use]
    pub fn new(count: usize, stagger: Duration) -> Self {
        Self {
            latches: (0..count).map(EntranceLatch::new).collect(),
            stagger,
        }
    }

    /// Whether every item has entered.
    #[must_use]
    pub fn all_triggered(&self) -> bool {
        self.latches.iter().all(EntranceLatch::has_triggered)
    }

    /// Reports how much of item `index` is visible.
    ///
    /// # Returns
    ///
    /// The entrance delay if this observation fires the item's latch.
    pub fn observe_fraction(&mut self, index: usize, fraction: f64) -> Option<Duration> {
        let stagger = self.stagger;
        self.latches
            .get_mut(index)?
            .observe(fraction >= VISIBILITY_AMOUNT, stagger)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::state::entrance::{
        DEFAULT_ENTRANCE_STAGGER, EntranceLatch, EntranceTracker, Fade, MOUNT_ENTRANCE,
        MOUNT_OFFSET_PX, ease_out_cubic, entrance_delay, mount_frame, visible_fraction,
    };

    fn assert_fade(fade: Fade, opacity: f64, offset: i32) {
        assert!(
            (fade.opacity - opacity).abs() < 1e-9,
            "opacity {} != {opacity}",
            fade.opacity
        );
        assert_eq!(fade.offset, offset);
    }

    #[test]
    fn test_visible_fraction() {
        assert_eq!(visible_fraction(0.0, 100.0, 500.0), 1.0);
        assert_eq!(visible_fraction(450.0, 100.0, 500.0), 0.5);
        assert_eq!(visible_fraction(-80.0, 100.0, 500.0), 0.2);
        assert_eq!(visible_fraction(600.0, 100.0, 500.0), 0.0);
        assert_eq!(visible_fraction(-300.0, 100.0, 500.0), 0.0);
        assert_eq!(visible_fraction(0.0, 0.0, 500.0), 0.0);
    }

    #[test]
    fn test_delay_is_proportional_to_index() {
        assert_eq!(entrance_delay(0, DEFAULT_ENTRANCE_STAGGER), Duration::ZERO);
        assert_eq!(
            entrance_delay(3, DEFAULT_ENTRANCE_STAGGER),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn test_latch_fires_once() {
        let mut latch = EntranceLatch::new(2);

        assert_eq!(latch.observe(false, DEFAULT_ENTRANCE_STAGGER), None);
        assert_eq!(
            latch.observe(true, DEFAULT_ENTRANCE_STAGGER),
            Some(Duration::from_millis(200))
        );
        // Out of view and back in again.
        assert_eq!(latch.observe(false, DEFAULT_ENTRANCE_STAGGER), None);
        assert_eq!(latch.observe(true, DEFAULT_ENTRANCE_STAGGER), None);
        assert!(latch.has_triggered());
    }

    #[test]
    fn test_tracker_requires_visibility_amount() {
        let mut tracker = EntranceTracker::new(3, DEFAULT_ENTRANCE_STAGGER);

        assert_eq!(tracker.observe_fraction(1, 0.05), None);
        assert_eq!(
            tracker.observe_fraction(1, 0.1),
            Some(Duration::from_millis(100))
        );
        assert_eq!(tracker.observe_fraction(1, 1.0), None);
        assert!(!tracker.all_triggered());
    }

    #[test]
    fn test_tracker_ignores_unknown_index() {
        let mut tracker = EntranceTracker::new(2, DEFAULT_ENTRANCE_STAGGER);
        assert_eq!(tracker.observe_fraction(5, 1.0), None);
        assert!(!tracker.all_triggered());
    }

    #[test]
    fn test_new_mount_resets_latches() {
        let mut first = EntranceTracker::new(2, DEFAULT_ENTRANCE_STAGGER);
        first.observe_fraction(0, 1.0);
        first.observe_fraction(1, 1.0);
        assert!(first.all_triggered());

        let mut second = EntranceTracker::new(2, DEFAULT_ENTRANCE_STAGGER);
        assert_eq!(second.observe_fraction(0, 1.0), Some(Duration::ZERO));
    }

    #[test]
    fn test_ease_out_cubic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }

    #[test]
    fn test_mount_frame_starts_hidden() {
        let frame = mount_frame(Duration::ZERO);
        assert_fade(frame.page, 0.0, MOUNT_OFFSET_PX);
        assert_fade(frame.heading, 0.0, MOUNT_OFFSET_PX);
        assert_fade(frame.tagline, 0.0, MOUNT_OFFSET_PX);
    }

    #[test]
    fn test_mount_frame_staggers_parts() {
        // The page is in place after 300 ms, the heading is 60% through
        // and the tagline, 200 ms behind, is 20% through.
        let frame = mount_frame(Duration::from_millis(300));
        assert_fade(frame.page, 1.0, 0);
        assert_fade(frame.heading, 0.936, 1);
        assert_fade(frame.tagline, 0.488, 10);

        let frame = mount_frame(Duration::from_millis(200));
        assert_fade(frame.tagline, 0.0, MOUNT_OFFSET_PX);
    }

    #[test]
    fn test_mount_frame_settles() {
        let frame = mount_frame(MOUNT_ENTRANCE);
        assert_fade(frame.page, 1.0, 0);
        assert_fade(frame.heading, 1.0, 0);
        assert_fade(frame.tagline, 1.0, 0);
        assert_eq!(frame, mount_frame(Duration::from_secs(5)));
    }
}
