#![allow(dead_code)]

use std::env;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::time::{Duration, Instant};

use eclipse_shell::{HapticSink, Pulse, RandomSource};

/// Fixed-sequence random source. The script wraps around when exhausted;
/// each value must respect the bound it is drawn against.
pub struct ScriptedRandom {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<u32>) -> Self {
        assert!(!values.is_empty(), "scripted random needs at least one value");
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_u32(&mut self, bound: u32) -> u32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        assert!(
            bound == 0 || value < bound,
            "scripted value {value} exceeds bound {bound}"
        );
        value
    }
}

/// Always draws zero: minimum delays, first templates, band minimums.
pub struct ZeroRandom;

impl RandomSource for ZeroRandom {
    fn next_u32(&mut self, _bound: u32) -> u32 {
        0
    }
}

/// Haptic sink recording every pulse it receives.
#[derive(Default)]
pub struct RecordingHaptics {
    pulses: Mutex<Vec<Pulse>>,
}

impl RecordingHaptics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn pulses(&self) -> Vec<Pulse> {
        lock_unpoisoned(&self.pulses).clone()
    }
}

impl HapticSink for RecordingHaptics {
    fn pulse(&self, pulse: Pulse) {
        lock_unpoisoned(&self.pulses).push(pulse);
    }
}

/// Polls `predicate` until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, mut predicate: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if predicate() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    predicate()
}

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Restores one environment variable to its captured value on drop.
pub struct EnvGuard {
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

/// Serializes tests that touch process environment variables.
pub fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .expect("env lock poisoned")
}

/// Sets or clears `key`, returning a guard that restores the prior value.
pub fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
    let previous = env::var(key).ok();
    if let Some(value) = value {
        env::set_var(key, value);
    } else {
        env::remove_var(key);
    }
    EnvGuard { key, previous }
}
