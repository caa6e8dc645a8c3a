//! Dialog simulator state machine.
//!
//! Pure state: scheduling, cancellation, and render pokes all go through the
//! [`DialogHost`] seam, so the machine can be driven entirely from tests.
//! Reply events are applied through `on_reply_*` methods and are filtered by
//! reply id, so an event from a torn-down mount can never touch a transcript
//! it no longer belongs to.

use std::time::Duration;

use dialog_content::{SeedMessage, SeedRole};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::status::NetworkStatus;

pub type ReplyId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    System,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Unique within the transcript; minted from a monotonic counter so
    /// later messages compare greater in mint order.
    pub id: String,
    pub role: Role,
    pub text: String,
    pub created_at: OffsetDateTime,
    /// Simulated network participants behind this message, when the content
    /// carries one.
    pub participant_count: Option<u32>,
    /// The actually-drawn scheduling delay, present on synthetic replies.
    pub latency: Option<Duration>,
}

impl Message {
    /// Float-seconds view of the reply latency, for display.
    #[must_use]
    pub fn latency_seconds(&self) -> Option<f64> {
        self.latency.map(|latency| latency.as_secs_f64())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Idle,
    Awaiting { reply_id: ReplyId },
}

/// Payload of one synthetic reply, composed by the runtime at fire time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticReply {
    pub text: String,
    pub participant_count: u32,
    pub latency: Duration,
    pub status: NetworkStatus,
}

/// Side-effect seam the simulator drives.
pub trait DialogHost {
    fn schedule_reply(&mut self, prompt: String) -> Result<ReplyId, String>;
    fn cancel_reply(&mut self, reply_id: ReplyId);
    fn request_render(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSim {
    session_id: Uuid,
    mode: DialogMode,
    transcript: Vec<Message>,
    status: NetworkStatus,
    cancelling_reply: Option<ReplyId>,
    next_message_seq: u64,
}

impl DialogSim {
    #[must_use]
    pub fn new(seeds: &[SeedMessage]) -> Self {
        let mut sim = Self {
            session_id: Uuid::new_v4(),
            mode: DialogMode::Idle,
            transcript: Vec::new(),
            status: NetworkStatus::startup(),
            cancelling_reply: None,
            next_message_seq: 0,
        };
        sim.seed_transcript(seeds);
        sim
    }

    /// Restarts the dialog for a fresh mount: seeded transcript, startup
    /// gauges, new session identity. A still-pending reply must be cancelled
    /// through [`DialogSim::teardown`] before the remount.
    pub fn reset(&mut self, seeds: &[SeedMessage]) {
        self.session_id = Uuid::new_v4();
        self.mode = DialogMode::Idle;
        self.transcript.clear();
        self.status = NetworkStatus::startup();
        self.cancelling_reply = None;
        self.next_message_seq = 0;
        self.seed_transcript(seeds);
    }

    /// Submits user text. Empty-after-trim input and submissions while a
    /// reply is pending are dropped silently; accepted text is appended
    /// verbatim, before the reply is scheduled.
    pub fn on_submit(&mut self, text: &str, host: &mut dyn DialogHost) {
        if text.trim().is_empty() {
            return;
        }

        if self.is_busy() {
            return;
        }

        let id = self.mint_message_id();
        self.transcript.push(Message {
            id,
            role: Role::User,
            text: text.to_string(),
            created_at: OffsetDateTime::now_utc(),
            participant_count: None,
            latency: None,
        });

        match host.schedule_reply(text.to_string()) {
            Ok(reply_id) => {
                self.mode = DialogMode::Awaiting { reply_id };
            }
            Err(error) => {
                // The user's message stays; only the reply is lost. Nothing
                // is surfaced in the transcript.
                tracing::warn!(error = %error, "failed to schedule synthetic reply");
            }
        }

        host.request_render();
    }

    /// Applies an arrived reply. Stale arrivals (a different pending id, a
    /// reply cancelled during teardown, no pending reply at all) are ignored
    /// without touching the transcript.
    pub fn on_reply_arrived(&mut self, reply_id: ReplyId, reply: SyntheticReply) {
        if self.is_cancelling(reply_id) {
            // Cancellation lost the race to the timer; the outcome is the
            // same, the reply is discarded.
            self.cancelling_reply = None;
            return;
        }

        if !self.is_pending_reply(reply_id) {
            return;
        }

        let id = self.mint_message_id();
        self.transcript.push(Message {
            id,
            role: Role::Assistant,
            text: reply.text,
            created_at: OffsetDateTime::now_utc(),
            participant_count: Some(reply.participant_count),
            latency: Some(reply.latency),
        });
        self.status = reply.status;
        self.mode = DialogMode::Idle;
    }

    /// Terminal acknowledgement for a cancelled reply. Anything but the
    /// matching pending cancellation is stale and ignored.
    pub fn on_reply_cancelled(&mut self, reply_id: ReplyId) {
        if self.is_cancelling(reply_id) {
            self.cancelling_reply = None;
        }
    }

    /// Unmounts the dialog. A pending reply is cancelled through the host so
    /// it can never land in a transcript the user has navigated away from.
    /// Safe to call repeatedly.
    pub fn teardown(&mut self, host: &mut dyn DialogHost) {
        if let DialogMode::Awaiting { reply_id } = self.mode {
            self.cancelling_reply = Some(reply_id);
            self.mode = DialogMode::Idle;
            host.cancel_reply(reply_id);
        }
    }

    #[must_use]
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    #[must_use]
    pub fn network_status(&self) -> NetworkStatus {
        self.status
    }

    #[must_use]
    pub fn mode(&self) -> DialogMode {
        self.mode
    }

    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    #[must_use]
    pub fn is_awaiting_reply(&self) -> bool {
        matches!(self.mode, DialogMode::Awaiting { .. })
    }

    fn is_busy(&self) -> bool {
        self.is_awaiting_reply() || self.cancelling_reply.is_some()
    }

    fn is_pending_reply(&self, reply_id: ReplyId) -> bool {
        matches!(self.mode, DialogMode::Awaiting { reply_id: pending } if pending == reply_id)
    }

    fn is_cancelling(&self, reply_id: ReplyId) -> bool {
        self.cancelling_reply == Some(reply_id)
    }

    fn mint_message_id(&mut self) -> String {
        self.next_message_seq += 1;
        self.next_message_seq.to_string()
    }

    fn seed_transcript(&mut self, seeds: &[SeedMessage]) {
        for seed in seeds {
            let role = match seed.role {
                SeedRole::System => Role::System,
                SeedRole::Assistant => Role::Assistant,
            };

            let id = self.mint_message_id();
            self.transcript.push(Message {
                id,
                role,
                text: seed.text.clone(),
                created_at: OffsetDateTime::now_utc(),
                participant_count: seed.participant_count,
                latency: seed.latency(),
            });
        }
    }
}
