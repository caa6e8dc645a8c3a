//! Headless core of the ECLIPSE co-sapience console.
//!
//! Invariant: the transcript is append-only. Replies land only through
//! [`ReplyRuntime::flush_pending_reply_events`], and a reply cancelled by
//! leaving the chat screen never lands at all.
//!
//! # Public API Overview
//! - Compose a running front end via [`Shell`], or wire [`DialogSim`] and
//!   [`ReplyRuntime`] directly.
//! - Drive screen changes through [`Shell::navigate`] /
//!   [`SessionController`]; timing (boot ticks, stat refreshes, event
//!   flushes) is embedder-driven.
//! - Inject nondeterminism at the [`RandomSource`] and [`DialogHost`] seams.
//! - Read decorative gauge state from [`NetworkStatus`], [`HomeStats`], and
//!   [`CommandCenterSnapshot`].

pub mod boot;
pub mod config;
pub mod dashboard;
pub mod dialog;
pub mod haptics;
pub mod onboarding;
pub mod profile;
pub mod random;
pub mod runtime;
pub mod session;
pub mod shell;
pub mod status;

/// Session screens and navigation.
pub use crate::session::{OnboardingStore, Screen, SessionController, Variant};

/// Dialog state machine and its host seam.
pub use crate::dialog::{
    DialogHost, DialogMode, DialogSim, Message, ReplyId, Role, SyntheticReply,
};

/// Reply scheduling runtime.
pub use crate::runtime::{RenderRequester, ReplyEvent, ReplyRuntime};

/// Shell composition.
pub use crate::shell::{builtin_pack, Shell, ShellError};

/// Cosmetic gauges and their bands.
pub use crate::status::{GaugeBand, HomeStats, NetworkStatus, PARTICIPANT_BAND};

/// Desktop boot sequence, driven by the embedder's timer.
pub use crate::boot::{BootSequence, BootTick};

/// Mobile onboarding flow.
pub use crate::onboarding::{OnboardingFlow, OnboardingStep, StepOutcome};

/// Command center dashboard data.
pub use crate::dashboard::{CommandCenterSnapshot, DashboardTab, NodeHealth, RegionStatus};

/// Mobile profile toggles.
pub use crate::profile::{NodeSetting, NodeSettings};

/// Best-effort haptic seam.
pub use crate::haptics::{HapticSink, Pulse};

/// Randomness seam and draw helpers.
pub use crate::random::{draw_duration, pick_index, RandomSource, ThreadRandom};

/// Environment configuration.
pub use crate::config::EnvConfig;
