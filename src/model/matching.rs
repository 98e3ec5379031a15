use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::model::{ActivityId, CompletionRecord, RoundClock, Timestamp};

/// Delay before a mismatched pair flips back face-down.
pub const MISMATCH_DELAY_MS: u32 = 1_000;

const SYMBOLS: [&str; 12] = [
    "🐶", "🐱", "🦊", "🐸", "🐵", "🦁", "🐰", "🐼", "🦄", "🐯", "🐨", "🐮",
];

const MAX_SCORE: u32 = 150;
const MIN_SCORE: u32 = 10;
const MOVE_PENALTY: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    pub fn pairs(&self) -> usize {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Hard => 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: Uuid,
    pub pair: u8,
    pub symbol: &'static str,
    pub face_up: bool,
    pub matched: bool,
}

/// Token for a pending mismatch reset. Firing a token from a previous round
/// is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MismatchTimer {
    round: u32,
}

/// Result of a card pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Locked board, face-up or matched card, or unknown id.
    Ignored,
    /// First card of a pending pair revealed.
    FirstRevealed,
    /// Second pick completed the pair.
    Matched,
    /// Second pick did not match; the board stays locked until the scheduled
    /// reset fires after [`MISMATCH_DELAY_MS`].
    Mismatch(MismatchTimer),
}

#[derive(Debug)]
pub struct MatchingPairs {
    activity_id: ActivityId,
    difficulty: Difficulty,
    cards: Vec<Card>,
    first_pick: Option<Uuid>,
    second_pick: Option<Uuid>,
    locked: bool,
    moves: u32,
    round: u32,
    reported: bool,
    clock: RoundClock,
}

impl MatchingPairs {
    pub fn new(activity_id: ActivityId, difficulty: Difficulty) -> Self {
        Self::with_rng(activity_id, difficulty, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        activity_id: ActivityId,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Self {
        let mut game = Self {
            activity_id,
            difficulty,
            cards: Vec::new(),
            first_pick: None,
            second_pick: None,
            locked: false,
            moves: 0,
            round: 0,
            reported: false,
            clock: RoundClock::start(),
        };
        game.deal(difficulty, rng);
        game
    }

    /// Start a fresh round, discarding any pending state. Outstanding
    /// mismatch timers become stale.
    pub fn restart(&mut self, difficulty: Difficulty) {
        self.restart_with_rng(difficulty, &mut rand::thread_rng());
    }

    pub fn restart_with_rng<R: Rng + ?Sized>(&mut self, difficulty: Difficulty, rng: &mut R) {
        self.round += 1;
        self.deal(difficulty, rng);
    }

    fn deal<R: Rng + ?Sized>(&mut self, difficulty: Difficulty, rng: &mut R) {
        let mut deck = Vec::with_capacity(difficulty.pairs() * 2);
        for (pair, symbol) in SYMBOLS.iter().take(difficulty.pairs()).enumerate() {
            for _ in 0..2 {
                deck.push(Card {
                    id: Uuid::new_v4(),
                    pair: pair as u8,
                    symbol,
                    face_up: false,
                    matched: false,
                });
            }
        }
        deck.shuffle(rng);
        self.difficulty = difficulty;
        self.cards = deck;
        self.first_pick = None;
        self.second_pick = None;
        self.locked = false;
        self.moves = 0;
        self.reported = false;
        self.clock.restart();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Flip a card face-up. The second pick of an exchange counts a move and
    /// either resolves the pair immediately or locks the board until the
    /// mismatch reset fires.
    pub fn select(&mut self, id: Uuid) -> Selection {
        if self.locked {
            return Selection::Ignored;
        }
        let Some(index) = self.cards.iter().position(|card| card.id == id) else {
            return Selection::Ignored;
        };
        if self.cards[index].face_up || self.cards[index].matched {
            return Selection::Ignored;
        }
        self.cards[index].face_up = true;

        match self.first_pick {
            None => {
                self.first_pick = Some(id);
                Selection::FirstRevealed
            }
            Some(first_id) => {
                self.second_pick = Some(id);
                self.moves += 1;
                let pair = self.cards[index].pair;
                let first_pair = self
                    .cards
                    .iter()
                    .find(|card| card.id == first_id)
                    .map(|card| card.pair);
                if first_pair == Some(pair) {
                    for card in self.cards.iter_mut().filter(|card| card.pair == pair) {
                        card.matched = true;
                    }
                    self.first_pick = None;
                    self.second_pick = None;
                    Selection::Matched
                } else {
                    self.locked = true;
                    Selection::Mismatch(MismatchTimer { round: self.round })
                }
            }
        }
    }

    /// Flip the pending mismatch back face-down and unlock the board.
    /// Returns `false` when the token is stale or nothing is pending.
    pub fn resolve_mismatch(&mut self, timer: MismatchTimer) -> bool {
        if timer.round != self.round || !self.locked {
            return false;
        }
        let (Some(first), Some(second)) = (self.first_pick, self.second_pick) else {
            return false;
        };
        for card in self
            .cards
            .iter_mut()
            .filter(|card| card.id == first || card.id == second)
        {
            card.face_up = false;
        }
        self.first_pick = None;
        self.second_pick = None;
        self.locked = false;
        true
    }

    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|card| card.matched)
    }

    fn score(&self) -> u32 {
        MAX_SCORE
            .saturating_sub(self.moves.saturating_mul(MOVE_PENALTY))
            .max(MIN_SCORE)
    }

    /// The round's completion record, yielded at most once.
    pub fn take_completion(&mut self) -> Option<CompletionRecord> {
        if !self.is_complete() || self.reported {
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

    fn game(difficulty: Difficulty) -> MatchingPairs {
        MatchingPairs::with_rng(7, difficulty, &mut ChaCha8Rng::seed_from_u64(42))
    }

    /// Pick every pair in order; the round must complete.
    fn solve(game: &mut MatchingPairs) {
        for pair in 0..game.difficulty().pairs() as u8 {
            let ids: Vec<Uuid> = game
                .cards()
                .iter()
                .filter(|card| card.pair == pair)
                .map(|card| card.id)
                .collect();
            assert_eq!(ids.len(), 2);
            assert_eq!(game.select(ids[0]), Selection::FirstRevealed);
            assert_eq!(game.select(ids[1]), Selection::Matched);
        }
    }

    #[test]
    fn deck_has_two_cards_per_pair() {
        for difficulty in [Difficulty::Easy, Difficulty::Hard] {
            let game = game(difficulty);
            assert_eq!(game.cards().len(), difficulty.pairs() * 2);
            assert_eq!(game.cards().len() % 2, 0);
            for pair in 0..difficulty.pairs() as u8 {
                let count = game.cards().iter().filter(|c| c.pair == pair).count();
                assert_eq!(count, 2, "pair {pair} should appear exactly twice");
            }
        }
    }

    #[test]
    fn correct_picks_complete_the_round() {
        let mut game = game(Difficulty::Easy);
        solve(&mut game);
        assert!(game.is_complete());
        assert!(game.cards().iter().all(|card| card.matched));
    }

    #[test]
    fn perfect_round_scores_150() {
        let mut game = game(Difficulty::Easy);
        solve(&mut game);
        assert_eq!(game.moves(), 6);
        // 6 moves: 150 - 18
        let record = game.take_completion().expect("completed round");
        assert_eq!(record.score, 132);
        assert_eq!(record.activity_id, 7);
    }

    #[test]
    fn score_clamps_at_floor() {
        let mut game = game(Difficulty::Easy);
        game.moves = 0;
        assert_eq!(game.score(), 150);
        game.moves = 47;
        assert_eq!(game.score(), 10);
        game.moves = 100;
        assert_eq!(game.score(), 10);
    }

    #[test]
    fn mismatch_locks_until_reset_fires() {
        let mut game = game(Difficulty::Easy);
        let first = game
            .cards()
            .iter()
            .find(|card| card.pair == 0)
            .map(|card| card.id)
            .unwrap();
        let second = game
            .cards()
            .iter()
            .find(|card| card.pair == 1)
            .map(|card| card.id)
            .unwrap();
        assert_eq!(game.select(first), Selection::FirstRevealed);
        let Selection::Mismatch(timer) = game.select(second) else {
            panic!("expected mismatch");
        };
        assert!(game.is_locked());
        assert_eq!(game.moves(), 1);

        // Further clicks must not skip the pending reset.
        let other = game
            .cards()
            .iter()
            .find(|card| !card.face_up)
            .map(|card| card.id)
            .unwrap();
        assert_eq!(game.select(other), Selection::Ignored);

        assert!(game.resolve_mismatch(timer));
        assert!(!game.is_locked());
        assert!(game.cards().iter().all(|card| !card.face_up));
        // A second firing is a no-op.
        assert!(!game.resolve_mismatch(timer));
    }

    #[test]
    fn at_most_two_unmatched_cards_face_up() {
        let mut game = game(Difficulty::Hard);
        let ids: Vec<Uuid> = game.cards().iter().map(|card| card.id).collect();
        for id in ids {
            game.select(id);
            let pending = game
                .cards()
                .iter()
                .filter(|card| card.face_up && !card.matched)
                .count();
            assert!(pending <= 2);
        }
    }

    #[test]
    fn stale_timer_from_previous_round_is_ignored() {
        let mut game = game(Difficulty::Easy);
        let first = game.cards()[0].id;
        let second = game
            .cards()
            .iter()
            .find(|card| card.pair != game.cards()[0].pair)
            .map(|card| card.id)
            .unwrap();
        game.select(first);
        let Selection::Mismatch(timer) = game.select(second) else {
            panic!("expected mismatch");
        };
        game.restart_with_rng(Difficulty::Easy, &mut ChaCha8Rng::seed_from_u64(1));
        assert!(!game.resolve_mismatch(timer));
        assert!(!game.is_locked());
    }

    #[test]
    fn completion_record_is_emitted_once() {
        let mut game = game(Difficulty::Easy);
        solve(&mut game);
        assert!(game.take_completion().is_some());
        assert!(game.take_completion().is_none());
        // A new round arms the guard again.
        game.restart_with_rng(Difficulty::Easy, &mut ChaCha8Rng::seed_from_u64(2));
        assert!(game.take_completion().is_none());
        solve(&mut game);
        assert!(game.take_completion().is_some());
    }
}
