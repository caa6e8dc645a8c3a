//! Cosmetic gauge clusters.
//!
//! Every number here is observability theater: values are drawn uniformly
//! within fixed bands and never correlate with previous readings or with
//! anything the user typed.

use std::time::Duration;

use crate::random::RandomSource;

/// Inclusive integer band a gauge value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaugeBand {
    pub min: u32,
    pub max: u32,
}

impl GaugeBand {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Draws a uniform value from the band, endpoints included.
    pub fn draw(self, rng: &mut dyn RandomSource) -> u32 {
        let span = self.max.saturating_sub(self.min);
        self.min + rng.next_u32(span.saturating_add(1))
    }
}

/// Band for the participant count attached to synthetic replies.
pub const PARTICIPANT_BAND: GaugeBand = GaugeBand::new(200, 249);

/// Gauge cluster shown alongside the dialog transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkStatus {
    pub active_nodes: u32,
    pub consensus_strength: u32,
    pub ecological_score: u32,
    pub ethical_alignment: u32,
}

impl NetworkStatus {
    pub const ACTIVE_NODES: GaugeBand = GaugeBand::new(200, 249);
    pub const CONSENSUS_STRENGTH: GaugeBand = GaugeBand::new(80, 99);
    pub const ECOLOGICAL_SCORE: GaugeBand = GaugeBand::new(70, 99);
    pub const ETHICAL_ALIGNMENT: GaugeBand = GaugeBand::new(90, 99);

    /// Fixed first-paint values shown before any reply lands.
    #[must_use]
    pub const fn startup() -> Self {
        Self {
            active_nodes: 247,
            consensus_strength: 94,
            ecological_score: 87,
            ethical_alignment: 95,
        }
    }

    /// Redraws every gauge independently within its band.
    pub fn redraw(rng: &mut dyn RandomSource) -> Self {
        Self {
            active_nodes: Self::ACTIVE_NODES.draw(rng),
            consensus_strength: Self::CONSENSUS_STRENGTH.draw(rng),
            ecological_score: Self::ECOLOGICAL_SCORE.draw(rng),
            ethical_alignment: Self::ETHICAL_ALIGNMENT.draw(rng),
        }
    }

    #[must_use]
    pub fn in_bands(self) -> bool {
        Self::ACTIVE_NODES.contains(self.active_nodes)
            && Self::CONSENSUS_STRENGTH.contains(self.consensus_strength)
            && Self::ECOLOGICAL_SCORE.contains(self.ecological_score)
            && Self::ETHICAL_ALIGNMENT.contains(self.ethical_alignment)
    }
}

/// Headline numbers on the home screen, refreshed on a fixed cadence by the
/// embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeStats {
    pub active_nodes: u32,
    pub global_sentience: u32,
    pub user_sessions: u32,
    pub ethical_score: u32,
}

impl HomeStats {
    pub const ACTIVE_NODES: GaugeBand = GaugeBand::new(200, 249);
    pub const GLOBAL_SENTIENCE: GaugeBand = GaugeBand::new(70, 89);
    pub const USER_SESSIONS: GaugeBand = GaugeBand::new(1000, 1499);
    pub const ETHICAL_SCORE: GaugeBand = GaugeBand::new(90, 99);

    /// Cadence the embedder drives [`HomeStats::refresh`] on.
    pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5);

    #[must_use]
    pub const fn startup() -> Self {
        Self {
            active_nodes: 247,
            global_sentience: 73,
            user_sessions: 1247,
            ethical_score: 95,
        }
    }

    /// Redraws every stat independently within its band.
    pub fn refresh(rng: &mut dyn RandomSource) -> Self {
        Self {
            active_nodes: Self::ACTIVE_NODES.draw(rng),
            global_sentience: Self::GLOBAL_SENTIENCE.draw(rng),
            user_sessions: Self::USER_SESSIONS.draw(rng),
            ethical_score: Self::ETHICAL_SCORE.draw(rng),
        }
    }

    #[must_use]
    pub fn in_bands(self) -> bool {
        Self::ACTIVE_NODES.contains(self.active_nodes)
            && Self::GLOBAL_SENTIENCE.contains(self.global_sentience)
            && Self::USER_SESSIONS.contains(self.user_sessions)
            && Self::ETHICAL_SCORE.contains(self.ethical_score)
    }
}
