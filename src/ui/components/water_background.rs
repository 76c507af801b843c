//! Animated water drawn behind the catfish page.
//!
//! Twenty wave lines bob on their own frequencies while a three-segment fish
//! swims across every 15 seconds, dipping up and down along the way. Both are
//! pure functions of the elapsed time and share one frame tick callback.

use std::{
    cell::Cell,
    f64::consts::{FRAC_PI_2, TAU},
    rc::Rc,
};

use {
    libadwaita::{
        glib::ControlFlow::Continue,
        gtk::{
            DrawingArea, TickCallbackId,
            cairo::{Context, Error as CairoError},
        },
        prelude::{DrawingAreaExtManual, WidgetExt, WidgetExtManual},
    },
    tracing::warn,
};

/// Number of wave lines.
pub const WAVE_COUNT: usize = 20;

/// Peak vertical displacement of a wave line in pixels.
pub const WAVE_AMPLITUDE_PX: f64 = 5.0;

/// Wave line color, without alpha.
const WAVE_RGB: (f64, f64, f64) = (59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0);

/// Resting position of line `index` as a fraction of the height.
#[must_use]
pub fn wave_top_fraction(index: usize) -> f64 {
    (index + 1) as f64 * 0.05
}

/// Vertical displacement of line `index` after `seconds`.
#[must_use]
pub fn wave_offset(index: usize, seconds: f64) -> f64 {
    (seconds * (0.05 + 0.01 * index as f64)).sin() * WAVE_AMPLITUDE_PX
}

/// Opacity of line `index`, in `[0.3, 0.6)`.
#[must_use]
pub fn wave_opacity(index: usize) -> f64 {
    0.3 + ((index * 7) % 10) as f64 * 0.03
}

/// Length of one crossing of the fish, in seconds.
pub const FISH_CYCLE_SECS: f64 = 15.0;

/// Horizontal start and end of the fish as fractions of the width.
const FISH_X_RANGE: (f64, f64) = (-0.1, 1.1);

/// Vertical offsets from mid-height the fish passes through, evenly spaced
/// over a crossing.
const FISH_Y_KEYFRAMES: [f64; 5] = [0.0, -50.0, 0.0, 50.0, 0.0];

/// Radius of a body segment.
const FISH_SEGMENT_RADIUS: f64 = 15.0;

/// Body segments, head first: horizontal center within the fish and color.
const FISH_SEGMENTS: [(f64, (f64, f64, f64)); 3] = [
    (70.0, (1.0, 152.0 / 255.0, 0.0)),
    (40.0, (1.0, 183.0 / 255.0, 77.0 / 255.0)),
    (10.0, (1.0, 213.0 / 255.0, 79.0 / 255.0)),
];

/// Value at `s` of a cubic Bezier from 0 to 1 with inner controls `p1`, `p2`.
fn cubic_bezier(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

/// Ease-in-out timing curve, `cubic-bezier(0.42, 0, 0.58, 1)`.
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..48 {
        let mid = (lo + hi) / 2.0;
        if cubic_bezier(0.42, 0.58, mid) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    cubic_bezier(0.0, 1.0, (lo + hi) / 2.0)
}

/// Top-left corner of the fish after `seconds` in an area of the given size.
///
/// The crossing repeats every `FISH_CYCLE_SECS`. The horizontal move is eased
/// over the whole crossing, the vertical one between consecutive keyframes.
#[must_use]
pub fn fish_position(seconds: f64, width: f64, height: f64) -> (f64, f64) {
    let progress = seconds.rem_euclid(FISH_CYCLE_SECS) / FISH_CYCLE_SECS;

    let (from, to) = FISH_X_RANGE;
    let x = width * (from + (to - from) * ease_in_out(progress));

    let segments = FISH_Y_KEYFRAMES.len() - 1;
    let scaled = progress * segments as f64;
    let segment = (scaled.floor() as usize).min(segments - 1);
    let (start, end) = (FISH_Y_KEYFRAMES[segment], FISH_Y_KEYFRAMES[segment + 1]);
    let y = height * 0.5 + start + (end - start) * ease_in_out(scaled - segment as f64);

    (x, y)
}

fn draw_waves(cr: &Context, width: f64, height: f64, seconds: f64) -> Result<(), CairoError> {
    cr.set_line_width(2.0);
    let (r, g, b) = WAVE_RGB;
    for index in 0..WAVE_COUNT {
        let y = height * wave_top_fraction(index) + wave_offset(index, seconds);
        cr.set_source_rgba(r, g, b, wave_opacity(index));
        cr.move_to(0.0, y);
        cr.line_to(width, y);
        cr.stroke()?;
    }
    Ok(())
}

fn draw_fish(cr: &Context, x: f64, y: f64) -> Result<(), CairoError> {
    let center_y = y + 30.0;
    cr.set_line_width(1.0);
    for (center_x, (r, g, b)) in FISH_SEGMENTS {
        cr.new_path();
        cr.arc(x + center_x, center_y, FISH_SEGMENT_RADIUS, 0.0, TAU);
        cr.set_source_rgb(r, g, b);
        cr.fill()?;

        // Outline on the trailing half only.
        cr.arc(
            x + center_x,
            center_y,
            FISH_SEGMENT_RADIUS,
            -FRAC_PI_2,
            FRAC_PI_2,
        );
        cr.set_source_rgb(0.0, 0.0, 0.0);
        cr.stroke()?;
    }

    cr.new_path();
    cr.arc(x + 75.0, y + 25.0, 2.0, 0.0, TAU);
    cr.set_source_rgb(0.0, 0.0, 0.0);
    cr.fill()
}

fn draw_water(cr: &Context, width: f64, height: f64, seconds: f64) {
    let (fish_x, fish_y) = fish_position(seconds, width, height);
    if let Err(e) =
        draw_waves(cr, width, height, seconds).and_then(|()| draw_fish(cr, fish_x, fish_y))
    {
        warn!(error = %e, "Failed to draw water background");
    }
}

/// Drawing area animating the waves and the fish on the frame clock.
pub struct WaterBackground {
    /// The drawing area widget.
    pub widget: DrawingArea,
    /// Frame tick callback, removed by `stop`.
    tick: Option<TickCallbackId>,
}

impl WaterBackground {
    /// Creates the background and starts animating it.
    pub fn new() -> Self {
        let widget = DrawingArea::builder()
            .hexpand(true)
            .vexpand(true)
            .can_target(false)
            .build();

        let elapsed = Rc::new(Cell::new(0.0_f64));
        let draw_elapsed = elapsed.clone();
        widget.set_draw_func(move |_, cr, width, height| {
            draw_water(cr, f64::from(width), f64::from(height), draw_elapsed.get());
        });

        let start = Cell::new(None::<i64>);
        let tick = widget.add_tick_callback(move |area, clock| {
            let now = clock.frame_time();
            let origin = start.get().unwrap_or(now);
            start.set(Some(origin));
            elapsed.set((now - origin) as f64 / 1_000_000.0);
            area.queue_draw();
            Continue
        });

        Self {
            widget,
            tick: Some(tick),
        }
    }

    /// Whether the frame tick callback is still installed.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tick.is_some()
    }

    /// Removes the frame tick callback.
    pub fn stop(&mut self) {
        if let Some(tick) = self.tick.take() {
            tick.remove();
        }
    }
}

impl Default for WaterBackground {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for WaterBackground {
    fn drop(&mut self) {
        self.stop();
    }
}
