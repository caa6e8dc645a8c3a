use serde::{Deserialize, Serialize};

/// On-disk shape of the preferences file. One record, versioned so future
/// launches can migrate rather than guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrefsRecord {
    pub version: u32,
    pub onboarding_complete: bool,
    pub updated_at: String,
}

impl PrefsRecord {
    #[must_use]
    pub fn v1(onboarding_complete: bool, updated_at: impl Into<String>) -> Self {
        Self {
            version: 1,
            onboarding_complete,
            updated_at: updated_at.into(),
        }
    }
}
