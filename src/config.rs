//! Environment configuration.

use std::env;

use crate::session::Variant;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub variant: Option<Variant>,
    pub content_pack: Option<String>,
    pub prefs_dir: Option<String>,
    pub no_haptics: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            variant: env_variant("ECLIPSE_VARIANT"),
            content_pack: env_string_opt("ECLIPSE_CONTENT_PACK"),
            prefs_dir: env_string_opt("ECLIPSE_PREFS_DIR"),
            no_haptics: env_flag("ECLIPSE_NO_HAPTICS"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_variant(key: &str) -> Option<Variant> {
    let value = env::var(key).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "desktop" => Some(Variant::Desktop),
        "mobile" => Some(Variant::Mobile),
        "" => None,
        other => {
            tracing::warn!(value = other, "unrecognized variant, ignoring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EnvConfig;
    use crate::session::Variant;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn env_defaults_are_unset() {
        let _lock = env_lock();
        let _g1 = set_env_guard("ECLIPSE_VARIANT", None);
        let _g2 = set_env_guard("ECLIPSE_CONTENT_PACK", None);
        let _g3 = set_env_guard("ECLIPSE_PREFS_DIR", None);
        let _g4 = set_env_guard("ECLIPSE_NO_HAPTICS", None);

        let config = EnvConfig::from_env();
        assert!(config.variant.is_none());
        assert!(config.content_pack.is_none());
        assert!(config.prefs_dir.is_none());
        assert!(!config.no_haptics);
    }

    #[test]
    fn env_values_are_picked_up() {
        let _lock = env_lock();
        let _g1 = set_env_guard("ECLIPSE_VARIANT", Some("mobile"));
        let _g2 = set_env_guard("ECLIPSE_CONTENT_PACK", Some("/tmp/pack.json"));
        let _g3 = set_env_guard("ECLIPSE_PREFS_DIR", Some("/tmp/eclipse-home"));
        let _g4 = set_env_guard("ECLIPSE_NO_HAPTICS", Some("1"));

        let config = EnvConfig::from_env();
        assert_eq!(config.variant, Some(Variant::Mobile));
        assert_eq!(config.content_pack.as_deref(), Some("/tmp/pack.json"));
        assert_eq!(config.prefs_dir.as_deref(), Some("/tmp/eclipse-home"));
        assert!(config.no_haptics);
    }

    #[test]
    fn variant_parsing_ignores_case_and_padding() {
        let _lock = env_lock();
        let _g1 = set_env_guard("ECLIPSE_VARIANT", Some("  Desktop "));
        let config = EnvConfig::from_env();
        assert_eq!(config.variant, Some(Variant::Desktop));
    }

    #[test]
    fn unrecognized_variant_is_ignored() {
        let _lock = env_lock();
        let _g1 = set_env_guard("ECLIPSE_VARIANT", Some("tablet"));
        let config = EnvConfig::from_env();
        assert!(config.variant.is_none());
    }

    #[test]
    fn empty_content_pack_is_ignored() {
        let _lock = env_lock();
        let _g1 = set_env_guard("ECLIPSE_CONTENT_PACK", Some(""));
        let config = EnvConfig::from_env();
        assert!(config.content_pack.is_none());
    }
}
