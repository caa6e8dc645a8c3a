//! Injectable randomness seam.
//!
//! Every nondeterministic draw in the shell flows through [`RandomSource`] so
//! tests can script exact values instead of asserting on distributions.

use std::time::Duration;

use rand::Rng;

/// Uniform random source.
pub trait RandomSource: Send {
    /// Returns a uniform value in `0..bound`. A zero bound yields zero.
    fn next_u32(&mut self, bound: u32) -> u32;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_u32(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }

        rand::thread_rng().gen_range(0..bound)
    }
}

/// Draws a duration uniformly from the inclusive `[min, max]` range at
/// millisecond granularity. An inverted or empty range collapses to `min`.
pub fn draw_duration(range: (Duration, Duration), rng: &mut dyn RandomSource) -> Duration {
    let (min, max) = range;
    if max <= min {
        return min;
    }

    let span_ms = (max - min).as_millis() as u32;
    let offset = rng.next_u32(span_ms.saturating_add(1));
    min + Duration::from_millis(u64::from(offset))
}

/// Picks a uniform index into a slice of the given length. Zero length yields
/// zero; callers guard emptiness themselves.
pub fn pick_index(len: usize, rng: &mut dyn RandomSource) -> usize {
    if len == 0 {
        return 0;
    }

    rng.next_u32(len as u32) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedRandom {
        values: Vec<u32>,
        cursor: usize,
    }

    impl ScriptedRandom {
        fn new(values: Vec<u32>) -> Self {
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

    #[test]
    fn thread_random_respects_bound() {
        let mut rng = ThreadRandom;

        for _ in 0..1000 {
            assert!(rng.next_u32(50) < 50);
        }
    }

    #[test]
    fn thread_random_zero_bound_yields_zero() {
        let mut rng = ThreadRandom;

        assert_eq!(rng.next_u32(0), 0);
    }

    #[test]
    fn draw_duration_spans_inclusive_range() {
        let range = (Duration::from_millis(500), Duration::from_millis(2500));

        let mut low = ScriptedRandom::new(vec![0]);
        assert_eq!(draw_duration(range, &mut low), Duration::from_millis(500));

        let mut high = ScriptedRandom::new(vec![2000]);
        assert_eq!(draw_duration(range, &mut high), Duration::from_millis(2500));
    }

    #[test]
    fn draw_duration_collapses_empty_range() {
        let mut rng = ScriptedRandom::new(vec![0]);
        let fixed = Duration::from_millis(750);

        assert_eq!(draw_duration((fixed, fixed), &mut rng), fixed);
    }

    #[test]
    fn pick_index_uses_scripted_draw() {
        let mut rng = ScriptedRandom::new(vec![2]);

        assert_eq!(pick_index(4, &mut rng), 2);
    }

    #[test]
    fn pick_index_zero_length_yields_zero() {
        let mut rng = ScriptedRandom::new(vec![0]);

        assert_eq!(pick_index(0, &mut rng), 0);
    }
}
