//! Boot sequence shown while the desktop console starts up.
//!
//! Purely cosmetic: progress advances by a fixed step per tick and the phase
//! label switches at fixed progress boundaries. The embedder drives [`tick`]
//! on [`TICK_INTERVAL`] and swaps screens when it observes
//! [`BootTick::Finished`].
//!
//! [`tick`]: BootSequence::tick

use std::time::Duration;

/// Cadence the embedder drives [`BootSequence::tick`] on.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Progress gained per tick.
pub const PROGRESS_STEP: u8 = 2;

/// Pause the original shell holds the completed bar on screen before acting
/// on [`BootTick::Finished`].
pub const COMPLETION_HOLD: Duration = Duration::from_millis(500);

const FULL_PROGRESS: u8 = 100;

/// Phase labels, switched every quarter of the progress bar.
pub const PHASE_LABELS: [&str; 4] = [
    "Initializing Holographic Intent Synthesizer...",
    "Activating Transfractal Sentient Network...",
    "Calibrating Ethical Foresight Engine...",
    "Establishing Symbiotic Interface...",
];

/// Outcome of one boot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootTick {
    /// Progress moved (or stayed at full while the hold elapses).
    Advanced,
    /// The sequence completed on this tick. Emitted exactly once.
    Finished,
    /// The sequence already finished; the tick had no effect.
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootSequence {
    progress: u8,
    finished: bool,
}

impl BootSequence {
    #[must_use]
    pub fn new() -> Self {
        Self {
            progress: 0,
            finished: false,
        }
    }

    /// Advances the sequence by one tick. The tick after progress reaches
    /// full reports [`BootTick::Finished`], matching the one-interval lag the
    /// original shell had between the full bar and the screen swap.
    pub fn tick(&mut self) -> BootTick {
        if self.finished {
            return BootTick::Idle;
        }

        if self.progress >= FULL_PROGRESS {
            self.finished = true;
            return BootTick::Finished;
        }

        self.progress = (self.progress + PROGRESS_STEP).min(FULL_PROGRESS);
        BootTick::Advanced
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Index of the active phase label.
    #[must_use]
    pub fn phase(&self) -> usize {
        usize::from(self.progress / 25).min(PHASE_LABELS.len() - 1)
    }

    #[must_use]
    pub fn phase_label(&self) -> &'static str {
        PHASE_LABELS[self.phase()]
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= FULL_PROGRESS
    }
}

impl Default for BootSequence {
    fn default() -> Self {
        Self::new()
    }
}
