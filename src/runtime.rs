//! Reply runtime: the side-effecting half of the dialog simulator.
//!
//! One named timer thread per scheduled reply sleeps through a uniformly
//! drawn delay, polling its cancel flag in small slices, then enqueues a
//! terminal event. Events are buffered and applied to the dialog by
//! [`ReplyRuntime::flush_pending_reply_events`], so application always
//! happens on the embedder's thread, never the timer's.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use dialog_content::{materialize_reply, ContentPack};

use crate::dialog::{DialogHost, DialogMode, DialogSim, ReplyId, SyntheticReply};
use crate::haptics::{HapticSink, Pulse};
use crate::random::{draw_duration, pick_index, RandomSource};
use crate::status::{NetworkStatus, PARTICIPANT_BAND};

/// Observer poke. Embedders re-render (and flush) in response.
pub type RenderRequester = Arc<dyn Fn() + Send + Sync>;

/// Slice the reply timer sleeps in while polling its cancel flag.
const CANCEL_POLL_SLICE: Duration = Duration::from_millis(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyEvent {
    Arrived {
        reply_id: ReplyId,
        reply: SyntheticReply,
    },
    Cancelled {
        reply_id: ReplyId,
    },
}

impl ReplyEvent {
    fn reply_id(&self) -> ReplyId {
        match self {
            Self::Arrived { reply_id, .. } | Self::Cancelled { reply_id } => *reply_id,
        }
    }
}

struct PendingReply {
    reply_id: ReplyId,
    cancel: Arc<AtomicBool>,
    join_handle: Option<JoinHandle<()>>,
}

pub struct ReplyRuntime {
    dialog: Arc<Mutex<DialogSim>>,
    content: Arc<ContentPack>,
    delay_range: (Duration, Duration),
    randomness: Mutex<Box<dyn RandomSource>>,
    haptics: Option<Arc<dyn HapticSink>>,
    render_requester: Option<RenderRequester>,
    pending_events: Mutex<VecDeque<ReplyEvent>>,
    next_reply_id: AtomicU64,
    active_reply: Mutex<Option<PendingReply>>,
}

impl ReplyRuntime {
    /// Creates a runtime that buffers reply events before applying them to
    /// the dialog.
    ///
    /// Embedders with a render loop pass a `render_requester` and call
    /// [`ReplyRuntime::flush_pending_reply_events`] when poked. Headless
    /// callers flush directly.
    pub fn new(
        dialog: Arc<Mutex<DialogSim>>,
        content: Arc<ContentPack>,
        delay_range: (Duration, Duration),
        randomness: Box<dyn RandomSource>,
        haptics: Option<Arc<dyn HapticSink>>,
        render_requester: Option<RenderRequester>,
    ) -> Arc<Self> {
        Arc::new(Self {
            dialog,
            content,
            delay_range,
            randomness: Mutex::new(randomness),
            haptics,
            render_requester,
            pending_events: Mutex::new(VecDeque::new()),
            next_reply_id: AtomicU64::new(1),
            active_reply: Mutex::new(None),
        })
    }

    fn schedule_reply_internal(self: &Arc<Self>, prompt: String) -> Result<ReplyId, String> {
        // Loader-built packs are validated; a literal pack can still arrive
        // with an empty reply pool, which composition cannot serve.
        if self.content.replies.is_empty() {
            return Err("Content pack has no replies".to_string());
        }

        let mut active_reply = self.lock_active_reply();
        if active_reply.is_some() {
            return Err("Reply already pending".to_string());
        }

        let reply_id = self.next_reply_id.fetch_add(1, Ordering::SeqCst);
        let cancel = Arc::new(AtomicBool::new(false));
        let delay = {
            let mut randomness = lock_unpoisoned(&self.randomness);
            draw_duration(self.delay_range, randomness.as_mut())
        };
        let join_handle = self.spawn_timer(reply_id, prompt, delay, Arc::clone(&cancel))?;

        *active_reply = Some(PendingReply {
            reply_id,
            cancel,
            join_handle: Some(join_handle),
        });
        drop(active_reply);

        tracing::debug!(
            reply_id,
            delay_ms = delay.as_millis() as u64,
            "synthetic reply scheduled"
        );
        self.pulse(Pulse::Tap);
        Ok(reply_id)
    }

    fn spawn_timer(
        self: &Arc<Self>,
        reply_id: ReplyId,
        prompt: String,
        delay: Duration,
        cancel: Arc<AtomicBool>,
    ) -> Result<JoinHandle<()>, String> {
        let runtime = Arc::clone(self);
        thread::Builder::new()
            .name(format!("eclipse-reply-{reply_id}"))
            .spawn(move || runtime.timer_worker(reply_id, prompt, delay, cancel))
            .map_err(|error| format!("Failed to spawn reply timer: {error}"))
    }

    fn timer_worker(
        self: Arc<Self>,
        reply_id: ReplyId,
        prompt: String,
        delay: Duration,
        cancel: Arc<AtomicBool>,
    ) {
        // The prompt never influences the reply; it is carried for
        // diagnostics only.
        tracing::debug!(
            reply_id,
            prompt_chars = prompt.chars().count() as u64,
            "reply timer armed"
        );

        let started = Instant::now();
        while started.elapsed() < delay {
            if cancel.load(Ordering::SeqCst) {
                self.enqueue_reply_event(ReplyEvent::Cancelled { reply_id });
                return;
            }

            let remaining = delay.saturating_sub(started.elapsed());
            thread::sleep(remaining.min(CANCEL_POLL_SLICE));
        }

        if cancel.load(Ordering::SeqCst) {
            self.enqueue_reply_event(ReplyEvent::Cancelled { reply_id });
            return;
        }

        let reply = self.compose_reply(delay);
        self.enqueue_reply_event(ReplyEvent::Arrived { reply_id, reply });
    }

    /// Reply content is composed at fire time: uniform template pick,
    /// participant count, and a full gauge redraw, all from the injected
    /// random source.
    fn compose_reply(&self, delay: Duration) -> SyntheticReply {
        let mut randomness = lock_unpoisoned(&self.randomness);
        let rng = randomness.as_mut();

        let template = &self.content.replies[pick_index(self.content.replies.len(), rng)];
        let participant_count = PARTICIPANT_BAND.draw(rng);

        SyntheticReply {
            text: materialize_reply(template, participant_count),
            participant_count,
            latency: delay,
            status: NetworkStatus::redraw(rng),
        }
    }

    fn enqueue_reply_event(self: &Arc<Self>, event: ReplyEvent) {
        let should_notify = {
            let mut queue = lock_unpoisoned(&self.pending_events);
            let should_notify = queue.is_empty();
            queue.push_back(event);
            should_notify
        };

        if should_notify {
            self.request_render_internal();
        }
    }

    /// Drains queued reply events and applies them to the dialog. Returns
    /// the number of events applied.
    ///
    /// Call this from the embedder's loop when the render requester pokes,
    /// or directly in headless environments to guarantee queued events are
    /// applied.
    pub fn flush_pending_reply_events(&self) -> usize {
        let mut drained = 0usize;

        loop {
            let event = {
                let mut pending_events = lock_unpoisoned(&self.pending_events);
                pending_events.pop_front()
            };

            let Some(event) = event else {
                break;
            };

            self.apply_reply_event(event);
            drained += 1;
        }

        if drained > 0 {
            self.request_render_internal();
        }

        drained
    }

    fn apply_reply_event(&self, event: ReplyEvent) {
        let reply_id = event.reply_id();
        let mut reply_landed = false;

        {
            let mut dialog = lock_unpoisoned(&self.dialog);
            match event {
                ReplyEvent::Arrived { reply_id, reply } => {
                    reply_landed = dialog.mode() == (DialogMode::Awaiting { reply_id });
                    dialog.on_reply_arrived(reply_id, reply);
                }
                ReplyEvent::Cancelled { reply_id } => {
                    tracing::debug!(reply_id, "reply cancelled");
                    dialog.on_reply_cancelled(reply_id);
                }
            }
        }

        // Both event kinds are terminal for their reply.
        self.clear_active_reply_if_matching(reply_id);

        if reply_landed {
            self.pulse(Pulse::Arrival);
        }
    }

    fn clear_active_reply_if_matching(&self, reply_id: ReplyId) {
        let mut active_reply = self.lock_active_reply();
        let matches = active_reply.as_ref().map(|active| active.reply_id) == Some(reply_id);
        if !matches {
            return;
        }

        let mut completed = match active_reply.take() {
            Some(completed) => completed,
            None => return,
        };

        if let Some(join_handle) = completed.join_handle.take() {
            let is_current_thread = join_handle.thread().id() == thread::current().id();
            if !is_current_thread && join_handle.is_finished() {
                let _ = join_handle.join();
            }
        }
    }

    fn cancel_reply_internal(&self, reply_id: ReplyId) {
        let mut active_reply = self.lock_active_reply();
        let matches = active_reply.as_ref().map(|active| active.reply_id) == Some(reply_id);
        if !matches {
            return;
        }

        // Cancellation frees the slot immediately so a remounted dialog can
        // schedule right away. The detached timer still acknowledges with a
        // terminal event; stale-id filtering discards it.
        if let Some(cancelled) = active_reply.take() {
            cancelled.cancel.store(true, Ordering::SeqCst);
        }
    }

    #[must_use]
    pub fn has_pending_reply_events(&self) -> bool {
        !lock_unpoisoned(&self.pending_events).is_empty()
    }

    #[must_use]
    pub fn active_reply_id(&self) -> Option<ReplyId> {
        self.lock_active_reply()
            .as_ref()
            .map(|active| active.reply_id)
    }

    /// Handle to the dialog this runtime applies events to.
    #[must_use]
    pub fn dialog(&self) -> Arc<Mutex<DialogSim>> {
        Arc::clone(&self.dialog)
    }

    fn pulse(&self, pulse: Pulse) {
        if let Some(haptics) = &self.haptics {
            haptics.pulse(pulse);
        }
    }

    fn request_render_internal(&self) {
        if let Some(requester) = &self.render_requester {
            requester();
        }
    }

    fn lock_active_reply(&self) -> MutexGuard<'_, Option<PendingReply>> {
        lock_unpoisoned(&self.active_reply)
    }
}

impl DialogHost for Arc<ReplyRuntime> {
    fn schedule_reply(&mut self, prompt: String) -> Result<ReplyId, String> {
        self.schedule_reply_internal(prompt)
    }

    fn cancel_reply(&mut self, reply_id: ReplyId) {
        self.cancel_reply_internal(reply_id);
    }

    fn request_render(&mut self) {
        self.request_render_internal();
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
