//! Screen navigation state.
//!
//! One controller serves both presentation variants; the variant only decides
//! the declared screen set, the entry screen, and the reply timing band.

use std::time::Duration;

/// Presentation variant the shell runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Desktop,
    Mobile,
}

impl Variant {
    /// Screens this variant declares.
    #[must_use]
    pub fn screens(self) -> &'static [Screen] {
        match self {
            Variant::Desktop => &[
                Screen::Boot,
                Screen::Landing,
                Screen::Dashboard,
                Screen::Chat,
            ],
            Variant::Mobile => &[
                Screen::Onboarding,
                Screen::Home,
                Screen::Dashboard,
                Screen::Chat,
                Screen::Profile,
            ],
        }
    }

    #[must_use]
    pub fn declares(self, screen: Screen) -> bool {
        self.screens().contains(&screen)
    }

    /// Screen shown once boot or onboarding is out of the way.
    #[must_use]
    pub fn home_screen(self) -> Screen {
        match self {
            Variant::Desktop => Screen::Landing,
            Variant::Mobile => Screen::Home,
        }
    }

    /// Uniform delay band synthetic replies are drawn from.
    #[must_use]
    pub fn reply_delay_range(self) -> (Duration, Duration) {
        match self {
            Variant::Desktop => (Duration::from_millis(500), Duration::from_millis(2500)),
            Variant::Mobile => (Duration::from_millis(1000), Duration::from_millis(3000)),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Variant::Desktop => "desktop",
            Variant::Mobile => "mobile",
        }
    }
}

/// One screen of either shell variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Boot,
    Landing,
    Dashboard,
    Chat,
    Onboarding,
    Home,
    Profile,
}

impl Screen {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Screen::Boot => "boot",
            Screen::Landing => "landing",
            Screen::Dashboard => "dashboard",
            Screen::Chat => "chat",
            Screen::Onboarding => "onboarding",
            Screen::Home => "home",
            Screen::Profile => "profile",
        }
    }
}

/// Persistence seam for the single durable flag the shell keeps.
pub trait OnboardingStore {
    fn onboarding_complete(&self) -> bool;
    fn record_onboarding_complete(&mut self) -> Result<(), String>;
}

impl OnboardingStore for prefs_store::PrefsStore {
    fn onboarding_complete(&self) -> bool {
        prefs_store::PrefsStore::onboarding_complete(self)
    }

    fn record_onboarding_complete(&mut self) -> Result<(), String> {
        prefs_store::PrefsStore::record_onboarding_complete(self)
            .map_err(|error| error.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionController {
    variant: Variant,
    current: Screen,
}

impl SessionController {
    /// Picks the entry screen. Desktop always boots; mobile consults the
    /// persisted onboarding flag once, here, and never re-polls it.
    pub fn initialize(variant: Variant, store: &dyn OnboardingStore) -> Self {
        let current = match variant {
            Variant::Desktop => Screen::Boot,
            Variant::Mobile => {
                if store.onboarding_complete() {
                    Screen::Home
                } else {
                    Screen::Onboarding
                }
            }
        };

        Self { variant, current }
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn current(&self) -> Screen {
        self.current
    }

    /// Sets the current screen unconditionally. No reachability rules, no
    /// history; navigating to the current screen changes nothing.
    pub fn navigate(&mut self, target: Screen) {
        self.current = target;
    }

    /// Records the onboarding flag and moves to the variant's home screen.
    /// The move happens even when persistence fails; the store error is
    /// returned for the caller to log.
    pub fn complete_onboarding(&mut self, store: &mut dyn OnboardingStore) -> Result<(), String> {
        let persisted = store.record_onboarding_complete();
        self.current = self.variant.home_screen();
        persisted
    }
}
