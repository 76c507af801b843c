//! Chicken lifecycle loader shown while the application boots.
//!
//! The `LoaderSequencer` free-runs through the four `LoaderStage` values on a
//! fixed tick until the `TaskGuard` returned by `start` is released.

use std::{sync::Arc, time::Duration};

use {
    async_channel::{Receiver, Sender, unbounded},
    parking_lot::RwLock,
    tokio::time::{Instant, interval_at},
    tracing::trace,
};

use crate::state::task::TaskGuard;

/// Default interval between loader stage transitions.
pub const DEFAULT_LOADER_TICK: Duration = Duration::from_millis(1000);

/// Grey used for progress dots of stages not reached yet.
pub const UNREACHED_DOT_COLOR: &str = "#e0e0e0";

/// Lifecycle stage shown by the loader, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoaderStage {
    /// An egg (initial stage).
    #[default]
    Egg,
    /// A freshly hatched chick.
    Chick,
    /// A grown hen.
    Hen,
    /// A hen laying an egg.
    Laying,
}

/// How the figure for one stage is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageFigure {
    /// Scale factor of the figure.
    pub scale: f64,
    /// Opacity of the figure.
    pub opacity: f64,
}

/// How one progress dot is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageDot {
    /// Fill color as a hex string.
    pub color: &'static str,
    /// Scale factor of the dot.
    pub scale: f64,
}

impl LoaderStage {
    /// All stages in cycle order.
    pub const ALL: [LoaderStage; 4] = [Self::Egg, Self::Chick, Self::Hen, Self::Laying];

    /// Position of the stage within the cycle.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Egg => 0,
            Self::Chick => 1,
            Self::Hen => 2,
            Self::Laying => 3,
        }
    }

    /// The stage that follows this one, wrapping after `Laying`.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Egg => "Egg",
            Self::Chick => "Chick",
            Self::Hen => "Hen",
            Self::Laying => "Laying Egg",
        }
    }

    /// Accent color of the stage.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Egg => "#FFD54F",
            Self::Chick => "#FFB74D",
            Self::Hen => "#FF9800",
            Self::Laying => "#F57C00",
        }
    }

    /// Glyph drawn for the stage figure.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Egg => "🥚",
            Self::Chick => "🐣",
            Self::Hen => "🐔",
            Self::Laying => "🐔🥚",
        }
    }

    /// Figure presentation of this stage while `current` is displayed.
    #[must_use]
    pub fn figure(self, current: LoaderStage) -> StageFigure {
        if self != current {
            return StageFigure {
                scale: 0.8,
                opacity: 0.0,
            };
        }

        let scale = if self == Self::Hen { 1.2 } else { 1.0 };
        StageFigure {
            scale,
            opacity: 1.0,
        }
    }

    /// Progress dot presentation of this stage while `current` is displayed.
    #[must_use]
    pub fn dot(self, current: LoaderStage) -> StageDot {
        StageDot {
            color: if current.index() >= self.index() {
                self.color()
            } else {
                UNREACHED_DOT_COLOR
            },
            scale: if current == self { 1.5 } else { 1.0 },
        }
    }
}

/// Cyclic stage state machine driven by a fixed-period timer.
#[derive(Debug, Clone)]
pub struct LoaderSequencer {
    /// Currently displayed stage.
    stage: Arc<RwLock<LoaderStage>>,
    /// Interval between transitions.
    tick: Duration,
    /// Active stage subscribers.
    subscribers: Arc<RwLock<Vec<Sender<LoaderStage>>>>,
}

impl LoaderSequencer {
    /// Creates a sequencer resting on the first stage.
    ///
    /// # Arguments
    ///
    /// * `tick` - Interval between stage transitions
    ///
    /// # Returns
    ///
    /// A new `LoaderSequencer` instance.
    pub fn new(tick: Duration) -> Self {
        Self {
            stage: Arc::new(RwLock::new(LoaderStage::default())),
            tick,
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Gets the current stage.
    #[must_use]
    pub fn current_stage(&self) -> LoaderStage {
        *self.stage.read()
    }

    /// Gets the tick interval.
    #[must_use]
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Moves to the next stage and notifies subscribers.
    ///
    /// # Returns
    ///
    /// The stage now displayed.
    pub fn advance(&self) -> LoaderStage {
        let stage = {
            let mut stage = self.stage.write();
            *stage = stage.next();
            *stage
        };
        trace!(stage = stage.label(), "Loader advanced");

        self.subscribers
            .write()
            .retain(|tx| tx.try_send(stage).is_ok());

        stage
    }

    /// Subscribes to stage changes.
    ///
    /// # Returns
    ///
    /// A receiver yielding every stage transition.
    pub fn subscribe(&self) -> Receiver<LoaderStage> {
        let (tx, rx) = unbounded();
        self.subscribers.write().push(tx);
        rx
    }

    /// Starts ticking.
    ///
    /// The first transition happens one tick after this call. Transitions stop
    /// when the returned guard is cancelled or dropped.
    ///
    /// # Returns
    ///
    /// The guard owning the ticking task.
    pub fn start(&self) -> TaskGuard {
        let sequencer = self.clone();
        let period = self.tick;

        TaskGuard::spawn("loader-tick", async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            loop {
                ticks.tick().await;
                sequencer.advance();
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::sleep;

    use crate::state::loader::{
        LoaderSequencer,
        LoaderStage::{self, Chick, Egg, Hen, Laying},
        UNREACHED_DOT_COLOR,
    };

    const TICK: Duration = Duration::from_millis(1000);

    #[test]
    fn test_advance_cycles_with_period_four() {
        let sequencer = LoaderSequencer::new(TICK);
        assert_eq!(sequencer.current_stage(), Egg);

        let observed: Vec<LoaderStage> = (0..8).map(|_| sequencer.advance()).collect();
        assert_eq!(
            observed,
            vec![Chick, Hen, Laying, Egg, Chick, Hen, Laying, Egg]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_lifecycle_order() {
        let sequencer = LoaderSequencer::new(TICK);
        let _guard = sequencer.start();

        // Sample halfway between ticks.
        sleep(TICK / 2).await;
        let mut seen = Vec::new();
        for _ in 0..8 {
            seen.push(sequencer.current_stage());
            sleep(TICK).await;
        }

        assert_eq!(seen, vec![Egg, Chick, Hen, Laying, Egg, Chick, Hen, Laying]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_transition_after_stop() {
        let sequencer = LoaderSequencer::new(TICK);
        let guard = sequencer.start();

        sleep(TICK * 2 + TICK / 2).await;
        assert_eq!(sequencer.current_stage(), Hen);

        guard.cancel();
        sleep(TICK * 10).await;
        assert_eq!(sequencer.current_stage(), Hen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_each_transition() {
        let sequencer = LoaderSequencer::new(TICK);
        let rx = sequencer.subscribe();
        let guard = sequencer.start();

        sleep(TICK * 3 + TICK / 2).await;
        drop(guard);

        let mut stages = Vec::new();
        while let Ok(stage) = rx.try_recv() {
            stages.push(stage);
        }
        assert_eq!(stages, vec![Chick, Hen, Laying]);
    }

    #[test]
    fn test_stage_presentation_lookup() {
        assert_eq!(Egg.label(), "Egg");
        assert_eq!(Laying.label(), "Laying Egg");
        assert_eq!(Hen.color(), "#FF9800");

        assert_eq!(Hen.figure(Hen).scale, 1.2);
        assert_eq!(Chick.figure(Chick).scale, 1.0);
        assert_eq!(Chick.figure(Hen).opacity, 0.0);
        assert_eq!(Chick.figure(Hen).scale, 0.8);
    }

    #[test]
    fn test_progress_dots() {
        let dots: Vec<_> = LoaderStage::ALL.iter().map(|dot| dot.dot(Chick)).collect();

        assert_eq!(dots[0].color, Egg.color());
        assert_eq!(dots[1].color, Chick.color());
        assert_eq!(dots[2].color, UNREACHED_DOT_COLOR);
        assert_eq!(dots[3].color, UNREACHED_DOT_COLOR);

        assert_eq!(dots[1].scale, 1.5);
        assert_eq!(dots[0].scale, 1.0);
    }
}
