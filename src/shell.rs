//! Shell composition root.
//!
//! One [`Shell`] per running front end. It owns the session controller, the
//! dialog simulator with its reply runtime, and the per-screen state the
//! decorative screens read. The shell runs no clocks of its own: boot ticks,
//! home-stat refreshes, and event flushes are all driven by the embedder.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use dialog_content::ContentPack;
use prefs_store::PrefsStore;
use thiserror::Error;

use crate::boot::{BootSequence, BootTick};
use crate::config::EnvConfig;
use crate::dashboard::DashboardTab;
use crate::dialog::DialogSim;
use crate::haptics::HapticSink;
use crate::onboarding::{OnboardingFlow, StepOutcome};
use crate::profile::{NodeSetting, NodeSettings};
use crate::random::{RandomSource, ThreadRandom};
use crate::runtime::{RenderRequester, ReplyRuntime};
use crate::session::{OnboardingStore, Screen, SessionController, Variant};
use crate::status::HomeStats;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Failed to resolve preferences directory: {0}")]
    PrefsDir(#[source] std::io::Error),
    #[error(transparent)]
    Prefs(#[from] prefs_store::PrefsStoreError),
    #[error(transparent)]
    Content(#[from] dialog_content::ContentError),
}

/// The built-in reply pack for a variant, used when no override is
/// configured.
#[must_use]
pub fn builtin_pack(variant: Variant) -> ContentPack {
    match variant {
        Variant::Desktop => ContentPack::builtin_desktop(),
        Variant::Mobile => ContentPack::builtin_mobile(),
    }
}

pub struct Shell {
    session: SessionController,
    store: Box<dyn OnboardingStore>,
    content: Arc<ContentPack>,
    runtime: Arc<ReplyRuntime>,
    dialog: Arc<Mutex<DialogSim>>,
    boot: Option<BootSequence>,
    onboarding: Option<OnboardingFlow>,
    home_stats: HomeStats,
    dashboard_tab: DashboardTab,
    node_settings: NodeSettings,
    randomness: Box<dyn RandomSource>,
}

impl Shell {
    /// Builds a shell with every collaborator injected. `randomness` feeds
    /// the shell's own gauge redraws; `reply_randomness` feeds the reply
    /// runtime's delays and reply composition.
    pub fn new(
        variant: Variant,
        store: Box<dyn OnboardingStore>,
        content: ContentPack,
        randomness: Box<dyn RandomSource>,
        reply_randomness: Box<dyn RandomSource>,
        haptics: Option<Arc<dyn HapticSink>>,
        render_requester: Option<RenderRequester>,
    ) -> Self {
        let content = Arc::new(content);
        let dialog = Arc::new(Mutex::new(DialogSim::new(&content.seed_messages)));
        let runtime = ReplyRuntime::new(
            Arc::clone(&dialog),
            Arc::clone(&content),
            variant.reply_delay_range(),
            reply_randomness,
            haptics,
            render_requester,
        );

        let session = SessionController::initialize(variant, store.as_ref());
        let boot = (session.current() == Screen::Boot).then(BootSequence::new);
        let onboarding = (session.current() == Screen::Onboarding).then(OnboardingFlow::new);

        Self {
            session,
            store,
            content,
            runtime,
            dialog,
            boot,
            onboarding,
            home_stats: HomeStats::startup(),
            dashboard_tab: DashboardTab::default(),
            node_settings: NodeSettings::default(),
            randomness,
        }
    }

    /// Builds a shell from `ECLIPSE_*` environment variables: variant,
    /// content pack override, preferences location, and the haptics kill
    /// switch. Platform collaborators still come from the embedder; pass
    /// `None` for a fully headless shell.
    pub fn from_env(
        haptics: Option<Arc<dyn HapticSink>>,
        render_requester: Option<RenderRequester>,
    ) -> Result<Self, ShellError> {
        let config = EnvConfig::from_env();
        let variant = config.variant.unwrap_or(Variant::Desktop);

        let prefs_base = match config.prefs_dir {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir().map_err(ShellError::PrefsDir)?,
        };
        let store = PrefsStore::open_or_default(&prefs_store::prefs_path(&prefs_base))?;

        let content = match config.content_pack {
            Some(path) => ContentPack::load(Path::new(&path))?,
            None => builtin_pack(variant),
        };

        let haptics = if config.no_haptics { None } else { haptics };

        Ok(Self::new(
            variant,
            Box::new(store),
            content,
            Box::new(ThreadRandom),
            Box::new(ThreadRandom),
            haptics,
            render_requester,
        ))
    }

    /// Switches screens. Navigation is unconditional and idempotent; any
    /// pending reply is cancelled and the dialog remounted whenever the chat
    /// screen is left.
    pub fn navigate(&mut self, target: Screen) {
        if target == self.session.current() {
            return;
        }

        if !self.session.variant().declares(target) {
            tracing::debug!(
                variant = self.session.variant().name(),
                screen = target.name(),
                "navigating to an undeclared screen"
            );
        }

        if self.session.current() == Screen::Chat {
            self.remount_dialog();
        }

        self.session.navigate(target);

        self.boot = (target == Screen::Boot).then(BootSequence::new);
        self.onboarding = (target == Screen::Onboarding).then(OnboardingFlow::new);
    }

    fn remount_dialog(&mut self) {
        let mut host = Arc::clone(&self.runtime);
        let mut dialog = lock_unpoisoned(&self.dialog);
        dialog.teardown(&mut host);
        dialog.reset(&self.content.seed_messages);
    }

    /// Advances the desktop boot sequence by one UI tick
    /// ([`crate::boot::TICK_INTERVAL`]). On the finishing tick the shell
    /// moves to the variant's home screen. Off the boot screen this is a
    /// no-op reporting [`BootTick::Idle`].
    pub fn boot_tick(&mut self) -> BootTick {
        let Some(boot) = self.boot.as_mut() else {
            return BootTick::Idle;
        };

        let outcome = boot.tick();
        if outcome == BootTick::Finished {
            self.navigate(self.session.variant().home_screen());
        }
        outcome
    }

    /// Advances mobile onboarding one step. Advancing past the last step
    /// completes onboarding like [`Shell::skip_onboarding`]. Off the
    /// onboarding screen this is a no-op.
    pub fn advance_onboarding(&mut self) {
        let Some(flow) = self.onboarding.as_mut() else {
            return;
        };

        if flow.advance() == StepOutcome::Completed {
            self.complete_onboarding();
        }
    }

    /// Returns mobile onboarding to the previous step, saturating at the
    /// first. Off the onboarding screen this is a no-op.
    pub fn back_onboarding(&mut self) {
        let Some(flow) = self.onboarding.as_mut() else {
            return;
        };

        flow.back();
    }

    /// Ends onboarding immediately, recording completion.
    pub fn skip_onboarding(&mut self) {
        let Some(flow) = self.onboarding.as_mut() else {
            return;
        };

        flow.skip();
        self.complete_onboarding();
    }

    fn complete_onboarding(&mut self) {
        if let Err(error) = self.session.complete_onboarding(self.store.as_mut()) {
            // The session still reaches home; completion is re-recorded the
            // next time onboarding finishes.
            tracing::warn!(error = %error, "failed to persist onboarding completion");
        }
        self.onboarding = None;
    }

    /// Forwards user text to the dialog. Outside the chat screen the text is
    /// dropped; on it, the dialog applies its own emptiness and busy gating.
    pub fn submit_message(&mut self, text: &str) {
        if self.session.current() != Screen::Chat {
            tracing::debug!(
                screen = self.session.current().name(),
                "dropping submission outside the chat screen"
            );
            return;
        }

        let mut host = Arc::clone(&self.runtime);
        let mut dialog = lock_unpoisoned(&self.dialog);
        dialog.on_submit(text, &mut host);
    }

    /// Applies any queued reply events. Embedders call this from their
    /// render loop when the render requester pokes; tests drive it directly.
    pub fn flush_events(&self) -> usize {
        self.runtime.flush_pending_reply_events()
    }

    /// Redraws the home screen counters inside their bands. The embedder
    /// drives the cadence ([`HomeStats::REFRESH_INTERVAL`] in the reference
    /// front end).
    pub fn refresh_home_stats(&mut self) {
        self.home_stats = HomeStats::refresh(self.randomness.as_mut());
    }

    pub fn select_dashboard_tab(&mut self, tab: DashboardTab) {
        self.dashboard_tab = tab;
    }

    pub fn toggle_node_setting(&mut self, setting: NodeSetting) {
        self.node_settings.toggle(setting);
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.session.variant()
    }

    #[must_use]
    pub fn current_screen(&self) -> Screen {
        self.session.current()
    }

    #[must_use]
    pub fn boot(&self) -> Option<&BootSequence> {
        self.boot.as_ref()
    }

    #[must_use]
    pub fn onboarding(&self) -> Option<&OnboardingFlow> {
        self.onboarding.as_ref()
    }

    #[must_use]
    pub fn home_stats(&self) -> HomeStats {
        self.home_stats
    }

    #[must_use]
    pub fn dashboard_tab(&self) -> DashboardTab {
        self.dashboard_tab
    }

    #[must_use]
    pub fn node_settings(&self) -> &NodeSettings {
        &self.node_settings
    }

    /// Handle to the dialog for transcript and gauge reads.
    #[must_use]
    pub fn dialog(&self) -> Arc<Mutex<DialogSim>> {
        Arc::clone(&self.dialog)
    }

    #[must_use]
    pub fn runtime(&self) -> &Arc<ReplyRuntime> {
        &self.runtime
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use super::{builtin_pack, Shell};
    use crate::boot::{BootTick, PROGRESS_STEP};
    use crate::dashboard::DashboardTab;
    use crate::dialog::DialogMode;
    use crate::onboarding::OnboardingFlow;
    use crate::profile::NodeSetting;
    use crate::random::{RandomSource, ThreadRandom};
    use crate::session::{OnboardingStore, Screen, Variant};
    use crate::status::HomeStats;

    #[derive(Default)]
    struct MemoryStore {
        complete: bool,
        fail_writes: bool,
    }

    impl OnboardingStore for MemoryStore {
        fn onboarding_complete(&self) -> bool {
            self.complete
        }

        fn record_onboarding_complete(&mut self) -> Result<(), String> {
            if self.fail_writes {
                return Err("store unavailable".to_string());
            }
            self.complete = true;
            Ok(())
        }
    }

    /// Deterministic source for gauge tests: always the band minimum.
    struct Zeroes;

    impl RandomSource for Zeroes {
        fn next_u32(&mut self, _bound: u32) -> u32 {
            0
        }
    }

    fn desktop_shell() -> Shell {
        Shell::new(
            Variant::Desktop,
            Box::new(MemoryStore::default()),
            builtin_pack(Variant::Desktop),
            Box::new(ThreadRandom),
            Box::new(ThreadRandom),
            None,
            None,
        )
    }

    fn mobile_shell(store: MemoryStore) -> Shell {
        Shell::new(
            Variant::Mobile,
            Box::new(store),
            builtin_pack(Variant::Mobile),
            Box::new(ThreadRandom),
            Box::new(ThreadRandom),
            None,
            None,
        )
    }

    fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        condition()
    }

    #[test]
    fn desktop_starts_on_boot_screen() {
        let shell = desktop_shell();
        assert_eq!(shell.current_screen(), Screen::Boot);
        assert!(shell.boot().is_some());
        assert!(shell.onboarding().is_none());
    }

    #[test]
    fn mobile_first_run_starts_on_onboarding() {
        let shell = mobile_shell(MemoryStore::default());
        assert_eq!(shell.current_screen(), Screen::Onboarding);
        assert!(shell.onboarding().is_some());
    }

    #[test]
    fn mobile_returning_user_skips_onboarding() {
        let shell = mobile_shell(MemoryStore {
            complete: true,
            fail_writes: false,
        });
        assert_eq!(shell.current_screen(), Screen::Home);
        assert!(shell.onboarding().is_none());
    }

    #[test]
    fn boot_runs_to_home() {
        let mut shell = desktop_shell();
        let ticks_to_full = (100 / PROGRESS_STEP) as usize;

        for _ in 0..ticks_to_full {
            assert_eq!(shell.boot_tick(), BootTick::Advanced);
        }
        assert_eq!(shell.current_screen(), Screen::Boot);

        assert_eq!(shell.boot_tick(), BootTick::Finished);
        assert_eq!(shell.current_screen(), Screen::Landing);
        assert!(shell.boot().is_none());

        // Ticking after the handoff is inert.
        assert_eq!(shell.boot_tick(), BootTick::Idle);
    }

    #[test]
    fn navigation_is_idempotent_and_unconditional() {
        let mut shell = desktop_shell();
        shell.navigate(Screen::Dashboard);
        shell.navigate(Screen::Dashboard);
        assert_eq!(shell.current_screen(), Screen::Dashboard);

        // Undeclared for the variant, still honored.
        shell.navigate(Screen::Profile);
        assert_eq!(shell.current_screen(), Screen::Profile);
    }

    #[test]
    fn renavigating_to_boot_restarts_the_sequence() {
        let mut shell = desktop_shell();
        shell.boot_tick();
        shell.boot_tick();
        assert_eq!(shell.boot().map(|boot| boot.progress()), Some(4));

        shell.navigate(Screen::Landing);
        shell.navigate(Screen::Boot);
        assert_eq!(shell.boot().map(|boot| boot.progress()), Some(0));
    }

    #[test]
    fn onboarding_advance_reaches_home_and_persists() {
        let mut shell = mobile_shell(MemoryStore::default());

        for _ in 0..OnboardingFlow::total() {
            shell.advance_onboarding();
        }

        assert_eq!(shell.current_screen(), Screen::Home);
        assert!(shell.onboarding().is_none());
        assert!(shell.store.onboarding_complete());
    }

    #[test]
    fn onboarding_back_revisits_steps_without_leaving_the_screen() {
        let mut shell = mobile_shell(MemoryStore::default());
        shell.advance_onboarding();
        shell.advance_onboarding();
        assert_eq!(shell.onboarding().map(OnboardingFlow::step_index), Some(2));

        shell.back_onboarding();
        assert_eq!(shell.onboarding().map(OnboardingFlow::step_index), Some(1));

        shell.back_onboarding();
        shell.back_onboarding();
        assert_eq!(shell.onboarding().map(OnboardingFlow::step_index), Some(0));
        assert_eq!(shell.current_screen(), Screen::Onboarding);

        // Once completed there is no flow left to step back through.
        shell.skip_onboarding();
        shell.back_onboarding();
        assert_eq!(shell.current_screen(), Screen::Home);
        assert!(shell.onboarding().is_none());
    }

    #[test]
    fn onboarding_skip_reaches_home_and_persists() {
        let mut shell = mobile_shell(MemoryStore::default());
        shell.skip_onboarding();

        assert_eq!(shell.current_screen(), Screen::Home);
        assert!(shell.store.onboarding_complete());
    }

    #[test]
    fn onboarding_completion_survives_store_failure() {
        let mut shell = mobile_shell(MemoryStore {
            complete: false,
            fail_writes: true,
        });
        shell.skip_onboarding();

        assert_eq!(shell.current_screen(), Screen::Home);
        assert!(!shell.store.onboarding_complete());
    }

    #[test]
    fn submissions_outside_chat_are_dropped() {
        let mut shell = desktop_shell();
        shell.navigate(Screen::Landing);
        shell.submit_message("hello?");

        let dialog = shell.dialog();
        let dialog = dialog.lock().expect("dialog lock");
        assert_eq!(dialog.transcript().len(), 2);
        assert_eq!(dialog.mode(), DialogMode::Idle);
    }

    #[test]
    fn leaving_chat_cancels_and_remounts_the_dialog() {
        let mut shell = desktop_shell();
        shell.navigate(Screen::Chat);
        shell.submit_message("are you awake?");

        let dialog = shell.dialog();
        let old_session = {
            let dialog = dialog.lock().expect("dialog lock");
            assert!(dialog.is_awaiting_reply());
            dialog.session_id()
        };

        shell.navigate(Screen::Landing);

        {
            let dialog = dialog.lock().expect("dialog lock");
            assert_ne!(dialog.session_id(), old_session);
            assert_eq!(dialog.transcript().len(), 2);
            assert_eq!(dialog.mode(), DialogMode::Idle);
        }

        // The cancelled timer acknowledges quickly, long before its drawn
        // delay elapses.
        let runtime = Arc::clone(shell.runtime());
        assert!(wait_until(Duration::from_secs(2), || {
            runtime.has_pending_reply_events()
        }));
        shell.flush_events();
        assert!(runtime.active_reply_id().is_none());

        let dialog = dialog.lock().expect("dialog lock");
        assert_eq!(dialog.transcript().len(), 2);
    }

    #[test]
    fn home_stats_refresh_stays_in_bands() {
        let mut shell = Shell::new(
            Variant::Mobile,
            Box::new(MemoryStore {
                complete: true,
                fail_writes: false,
            }),
            builtin_pack(Variant::Mobile),
            Box::new(Zeroes),
            Box::new(ThreadRandom),
            None,
            None,
        );

        assert_eq!(shell.home_stats(), HomeStats::startup());
        shell.refresh_home_stats();

        let stats = shell.home_stats();
        assert!(stats.in_bands());
        assert_eq!(stats.active_nodes, HomeStats::ACTIVE_NODES.min);
        assert_eq!(stats.user_sessions, HomeStats::USER_SESSIONS.min);
    }

    #[test]
    fn dashboard_tab_and_node_settings_are_plain_state() {
        let mut shell = mobile_shell(MemoryStore {
            complete: true,
            fail_writes: false,
        });

        shell.select_dashboard_tab(DashboardTab::Regions);
        assert_eq!(shell.dashboard_tab(), DashboardTab::Regions);

        let setting = NodeSetting::NetworkSharing;
        assert!(shell.node_settings().is_enabled(setting));
        shell.toggle_node_setting(setting);
        assert!(!shell.node_settings().is_enabled(setting));
    }
}
