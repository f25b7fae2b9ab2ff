#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic lantern system that occasionally shorts out a lit lantern.

use minotaur_core::{Command, Event};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the lantern system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    failure_odds: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration with a one-in-`failure_odds` chance per frame
    /// of failure. Zero odds disable failures.
    #[must_use]
    pub const fn new(failure_odds: u32, rng_seed: u64) -> Self {
        Self {
            failure_odds,
            rng_seed,
        }
    }
}

/// Pure system that rolls for lantern failures once per elapsed frame.
#[derive(Debug)]
pub struct Lantern {
    failure_odds: u32,
    rng: ChaCha8Rng,
}

impl Lantern {
    /// Creates a new lantern system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            failure_odds: config.failure_odds,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes world events and emits a short-circuit command when a lit
    /// lantern fails.
    pub fn handle(&mut self, events: &[Event], lit: bool, out: &mut Vec<Command>) {
        if !lit || self.failure_odds == 0 {
            return;
        }

        let frames = events
            .iter()
            .filter(|event| matches!(event, Event::TimeAdvanced { .. }))
            .count();
        for _ in 0..frames {
            if self.rng.gen_range(0..self.failure_odds) == 0 {
                out.push(Command::ShortLantern);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(count: u64) -> Vec<Event> {
        (1..=count).map(|tick| Event::TimeAdvanced { tick }).collect()
    }

    #[test]
    fn certain_failure_shorts_on_the_first_frame() {
        let mut lantern = Lantern::new(Config::new(1, 9));
        let mut out = Vec::new();
        lantern.handle(&frames(3), true, &mut out);
        assert_eq!(out, vec![Command::ShortLantern]);
    }

    #[test]
    fn dark_lantern_never_shorts() {
        let mut lantern = Lantern::new(Config::new(1, 9));
        let mut out = Vec::new();
        lantern.handle(&frames(50), false, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn zero_odds_disable_failures() {
        let mut lantern = Lantern::new(Config::new(0, 9));
        let mut out = Vec::new();
        lantern.handle(&frames(500), true, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn frames_without_time_do_not_roll() {
        let mut lantern = Lantern::new(Config::new(1, 9));
        let mut out = Vec::new();
        lantern.handle(&[Event::LanternShorted, Event::PenReleased], true, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn same_seed_fails_on_the_same_frame() {
        let failure_frame = |seed| {
            let mut lantern = Lantern::new(Config::new(100, seed));
            (1..=10_000_u64).find(|tick| {
                let mut out = Vec::new();
                lantern.handle(&[Event::TimeAdvanced { tick: *tick }], true, &mut out);
                !out.is_empty()
            })
        };
        let first = failure_frame(21);
        assert!(first.is_some());
        assert_eq!(first, failure_frame(21));
    }
}
