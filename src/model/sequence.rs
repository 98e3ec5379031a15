use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{ActivityId, CompletionRecord, RoundClock, Timestamp};

/// Number of distinct values drawn for a round.
pub const SEQUENCE_LENGTH: usize = 16;

const VALUE_MIN: u32 = 1;
const VALUE_MAX: u32 = 1_000;
const POINTS_PER_STEP: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    InProgress,
    Won,
    Lost,
}

/// Result of a value click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceProgress {
    /// Round already over, or the value was cleared earlier.
    Ignored,
    /// Correct value, cursor advanced.
    Advanced,
    /// Correct final value; the round is won.
    Won,
    /// Out-of-order value or give-up; the round is lost, no retry.
    Lost,
}

#[derive(Debug)]
pub struct SequenceRound {
    activity_id: ActivityId,
    /// Shuffled presentation order.
    display: Vec<u32>,
    /// The same values sorted ascending; `target[cursor]` is the next
    /// expected click.
    target: Vec<u32>,
    cursor: usize,
    state: SequenceState,
    reported: bool,
    clock: RoundClock,
}

impl SequenceRound {
    pub fn new(activity_id: ActivityId) -> Self {
        Self::with_rng(activity_id, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(activity_id: ActivityId, rng: &mut R) -> Self {
        let mut values: Vec<u32> = Vec::with_capacity(SEQUENCE_LENGTH);
        while values.len() < SEQUENCE_LENGTH {
            let value = rng.gen_range(VALUE_MIN..=VALUE_MAX);
            if !values.contains(&value) {
                values.push(value);
            }
        }
        let mut target = values.clone();
        target.sort_unstable();
        let mut display = values;
        display.shuffle(rng);
        // Re-draw a degenerate arrangement; the board must not hand out the
        // answer.
        while display == target {
            display.shuffle(rng);
        }
        Self {
            activity_id,
            display,
            target,
            cursor: 0,
            state: SequenceState::InProgress,
            reported: false,
            clock: RoundClock::start(),
        }
    }

    pub fn numbers(&self) -> &[u32] {
        &self.display
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state != SequenceState::InProgress
    }

    /// The next expected value while the round is running.
    pub fn expected(&self) -> Option<u32> {
        (self.state == SequenceState::InProgress).then(|| self.target[self.cursor])
    }

    /// Whether `value` was already clicked in order.
    pub fn is_cleared(&self, value: u32) -> bool {
        self.target[..self.cursor].contains(&value)
    }

    /// Strict-order validation: the expected value advances the cursor, the
    /// final one wins, anything else loses immediately.
    pub fn click(&mut self, value: u32) -> SequenceProgress {
        if self.state != SequenceState::InProgress || self.is_cleared(value) {
            return SequenceProgress::Ignored;
        }
        if value == self.target[self.cursor] {
            self.cursor += 1;
            if self.cursor == self.target.len() {
                self.state = SequenceState::Won;
                SequenceProgress::Won
            } else {
                SequenceProgress::Advanced
            }
        } else {
            self.state = SequenceState::Lost;
            SequenceProgress::Lost
        }
    }

    /// End the round as a loss at the current cursor.
    pub fn give_up(&mut self) -> SequenceProgress {
        if self.state != SequenceState::InProgress {
            return SequenceProgress::Ignored;
        }
        self.state = SequenceState::Lost;
        SequenceProgress::Lost
    }

    /// Five points per correctly clicked value; the winning cursor counts
    /// the final click, so a full run earns `SEQUENCE_LENGTH * 5`.
    pub fn score(&self) -> u32 {
        self.cursor as u32 * POINTS_PER_STEP
    }

    /// The round's completion record, yielded at most once per round end —
    /// win, mismatch and give-up alike.
    pub fn take_completion(&mut self) -> Option<CompletionRecord> {
        if self.state == SequenceState::InProgress || self.reported {
            return None;
        }
        self.reported = true;
        Some(CompletionRecord {
            activity_id: self.activity_id,
            score: self.score(),
            elapsed_seconds: self.clock.elapsed_seconds(),
            timestamp: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn round(seed: u64) -> SequenceRound {
        SequenceRound::with_rng(11, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn draw_is_distinct_and_shuffled() {
        for seed in 0..20 {
            let round = round(seed);
            let mut sorted = round.numbers().to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), SEQUENCE_LENGTH);
            // The displayed order never equals the target order.
            let mut ascending = round.numbers().to_vec();
            ascending.sort_unstable();
            assert_ne!(round.numbers(), ascending.as_slice());
        }
    }

    #[test]
    fn full_ascending_run_wins_with_80() {
        let mut round = round(3);
        let targets: Vec<u32> = {
            let mut v = round.numbers().to_vec();
            v.sort_unstable();
            v
        };
        for (i, value) in targets.iter().enumerate() {
            let progress = round.click(*value);
            if i + 1 == SEQUENCE_LENGTH {
                assert_eq!(progress, SequenceProgress::Won);
            } else {
                assert_eq!(progress, SequenceProgress::Advanced);
            }
        }
        assert_eq!(round.state(), SequenceState::Won);
        assert_eq!(round.score(), 80);
        let record = round.take_completion().expect("finished round");
        assert_eq!(record.score, 80);
        assert!(round.take_completion().is_none());
    }

    #[test]
    fn out_of_order_click_loses_immediately() {
        let mut round = round(5);
        let mut targets: Vec<u32> = round.numbers().to_vec();
        targets.sort_unstable();
        assert_eq!(round.click(targets[0]), SequenceProgress::Advanced);
        assert_eq!(round.click(targets[1]), SequenceProgress::Advanced);
        assert_eq!(round.click(targets[5]), SequenceProgress::Lost);
        assert_eq!(round.state(), SequenceState::Lost);
        assert_eq!(round.score(), 10);
        let record = round.take_completion().expect("lost round still reports");
        assert_eq!(record.score, 10);
        // The round is over; everything else is ignored.
        assert_eq!(round.click(targets[2]), SequenceProgress::Ignored);
        assert_eq!(round.give_up(), SequenceProgress::Ignored);
    }

    #[test]
    fn give_up_reports_current_progress() {
        let mut round = round(8);
        let mut targets: Vec<u32> = round.numbers().to_vec();
        targets.sort_unstable();
        for value in &targets[..4] {
            round.click(*value);
        }
        assert_eq!(round.give_up(), SequenceProgress::Lost);
        let record = round.take_completion().expect("gave up");
        assert_eq!(record.score, 20);
    }

    #[test]
    fn cleared_values_are_ignored_not_fatal() {
        let mut round = round(13);
        let mut targets: Vec<u32> = round.numbers().to_vec();
        targets.sort_unstable();
        round.click(targets[0]);
        assert!(round.is_cleared(targets[0]));
        // Clicking it again must not end the round.
        assert_eq!(round.click(targets[0]), SequenceProgress::Ignored);
        assert_eq!(round.state(), SequenceState::InProgress);
        assert_eq!(round.expected(), Some(targets[1]));
    }
}
