use instant::Instant;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Activity id as carried by the scoring backend.
pub type ActivityId = i32;

/// Milliseconds since the session anchor (monotonic).
///
/// Wall-clock dates are attached by the API layer at submission time; the
/// engines only ever see monotonic time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp representing the current moment
    pub fn now() -> Self {
        static ANCHOR: OnceLock<Instant> = OnceLock::new();
        let anchor = ANCHOR.get_or_init(Instant::now);
        Timestamp(anchor.elapsed().as_millis() as u64)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

/// Stopwatch for a single round.
#[derive(Debug, Clone)]
pub struct RoundClock {
    started: Instant,
}

impl RoundClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn restart(&mut self) {
        self.started = Instant::now();
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

/// Outcome of a completed round.
///
/// Produced at most once per round via the engines' `take_completion`; the
/// API layer forwards it to the scoring backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRecord {
    pub activity_id: ActivityId,
    pub score: u32,
    pub elapsed_seconds: u64,
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_monotonic() {
        let a = Timestamp::now();
        let b = Timestamp::now();
        assert!(a <= b);
    }

    #[test]
    fn round_clock_restarts() {
        let mut clock = RoundClock::start();
        clock.restart();
        assert_eq!(clock.elapsed_seconds(), 0);
    }
}
