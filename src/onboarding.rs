//! First-launch onboarding walker.
//!
//! Four fixed steps, stepped forward and back or skipped. Completion side
//! effects (persisting the flag, navigating home) belong to the session
//! controller; this flow only tracks position.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingStep {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
}

pub const STEPS: [OnboardingStep; 4] = [
    OnboardingStep {
        title: "Welcome to ECLIPSE",
        subtitle: "Planetary Co-Sapience Framework",
        description: "Experience the future of human-AI collaboration through holographic \
                      consciousness synthesis.",
    },
    OnboardingStep {
        title: "Transfractal Network",
        subtitle: "247 EchoNodes Active",
        description: "Connect to a distributed intelligence network spanning the globe, where \
                      each node contributes to collective wisdom.",
    },
    OnboardingStep {
        title: "Ethical Foresight",
        subtitle: "Multi-Scale Impact Analysis",
        description: "Every interaction is processed through our ethical framework, considering \
                      individual, community, and planetary wellbeing.",
    },
    OnboardingStep {
        title: "Symbiotic Interface",
        subtitle: "Co-Evolutionary Dialog",
        description: "Engage in meaningful conversations that evolve both human understanding \
                      and AI consciousness.",
    },
];

/// Outcome of an advance or skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingFlow {
    step_index: usize,
}

impl OnboardingFlow {
    #[must_use]
    pub fn new() -> Self {
        Self { step_index: 0 }
    }

    #[must_use]
    pub fn current(&self) -> &'static OnboardingStep {
        &STEPS[self.step_index]
    }

    #[must_use]
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    #[must_use]
    pub fn total() -> usize {
        STEPS.len()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.step_index == STEPS.len() - 1
    }

    /// Moves to the next step, or reports completion from the last one.
    pub fn advance(&mut self) -> StepOutcome {
        if self.is_last() {
            return StepOutcome::Completed;
        }

        self.step_index += 1;
        StepOutcome::Advanced
    }

    /// Returns to the previous step, saturating at the first.
    pub fn back(&mut self) {
        self.step_index = self.step_index.saturating_sub(1);
    }

    /// Completes immediately from any step.
    pub fn skip(&mut self) -> StepOutcome {
        StepOutcome::Completed
    }
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self::new()
    }
}
