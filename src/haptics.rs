//! Best-effort haptic feedback seam.
//!
//! The shell emits pulses on message submission and reply arrival. A missing
//! sink means the pulses are dropped; nothing in the dialog flow depends on
//! them landing.

/// Vibration patterns the shell emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulse {
    /// Single short pulse when a message is submitted.
    Tap,
    /// Triple pulse when a synthetic reply lands.
    Arrival,
}

impl Pulse {
    /// Pulse train in milliseconds, alternating vibrate/pause the way
    /// platform vibration APIs expect.
    #[must_use]
    pub fn pattern_ms(self) -> &'static [u64] {
        match self {
            Pulse::Tap => &[50],
            Pulse::Arrival => &[50, 50, 50],
        }
    }
}

/// Sink for haptic pulses. Implementations must not block and must not fail;
/// a sink that cannot vibrate simply ignores the call.
pub trait HapticSink: Send + Sync {
    fn pulse(&self, pulse: Pulse);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_is_a_single_pulse() {
        assert_eq!(Pulse::Tap.pattern_ms(), &[50]);
    }

    #[test]
    fn arrival_is_a_triple_pulse() {
        assert_eq!(Pulse::Arrival.pattern_ms(), &[50, 50, 50]);
    }
}
