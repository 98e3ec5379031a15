use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

use crate::model::{ActivityId, CompletionRecord, RoundClock, Timestamp};

/// Delay before the automated opponent answers a player move.
pub const OPPONENT_DELAY_MS: u32 = 400;

const WIN_SCORE: u32 = 10;

/// The 8 canonical three-in-a-row lines.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    Won(Mark),
    Draw,
}

/// Token for the pending opponent reply. Firing a token from a previous
/// round is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentTimer {
    round: u32,
}

/// Result of a player move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Occupied cell, terminal state, or opponent reply in flight.
    Ignored,
    /// X placed; the opponent answers after [`OPPONENT_DELAY_MS`].
    OpponentPending(OpponentTimer),
    /// X placed and the round ended; the opponent's turn is skipped.
    Ended(GameState),
}

#[derive(Debug)]
pub struct TicTacToe {
    activity_id: ActivityId,
    board: [Option<Mark>; 9],
    state: GameState,
    locked: bool,
    round: u32,
    reported: bool,
    clock: RoundClock,
}

impl TicTacToe {
    pub fn new(activity_id: ActivityId) -> Self {
        Self {
            activity_id,
            board: [None; 9],
            state: GameState::InProgress,
            locked: false,
            round: 0,
            reported: false,
            clock: RoundClock::start(),
        }
    }

    pub fn board(&self) -> &[Option<Mark>; 9] {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Place the human's X. Locks the board while the opponent reply is
    /// pending so extra clicks cannot sneak a second X in.
    pub fn player_move(&mut self, cell: usize) -> MoveOutcome {
        if cell >= self.board.len()
            || self.board[cell].is_some()
            || self.state != GameState::InProgress
            || self.locked
        {
            return MoveOutcome::Ignored;
        }
        self.board[cell] = Some(Mark::X);
        if let Some(state) = self.evaluate() {
            self.state = state;
            return MoveOutcome::Ended(state);
        }
        self.locked = true;
        MoveOutcome::OpponentPending(OpponentTimer { round: self.round })
    }

    /// The automated reply: O lands on a uniformly random empty cell.
    /// Returns the resulting state, or `None` for a stale token.
    pub fn opponent_move(&mut self, timer: OpponentTimer) -> Option<GameState> {
        self.opponent_move_with_rng(timer, &mut rand::thread_rng())
    }

    pub fn opponent_move_with_rng<R: Rng + ?Sized>(
        &mut self,
        timer: OpponentTimer,
        rng: &mut R,
    ) -> Option<GameState> {
        if timer.round != self.round || !self.locked || self.state != GameState::InProgress {
            return None;
        }
        let empty: Vec<usize> = (0..self.board.len())
            .filter(|&cell| self.board[cell].is_none())
            .collect();
        if let Some(&cell) = empty.choose(rng) {
            self.board[cell] = Some(Mark::O);
            if let Some(state) = self.evaluate() {
                self.state = state;
            }
        }
        self.locked = false;
        Some(self.state)
    }

    fn evaluate(&self) -> Option<GameState> {
        for line in LINES {
            if let Some(mark) = self.board[line[0]] {
                if self.board[line[1]] == Some(mark) && self.board[line[2]] == Some(mark) {
                    return Some(GameState::Won(mark));
                }
            }
        }
        if self.board.iter().all(|cell| cell.is_some()) {
            return Some(GameState::Draw);
        }
        None
    }

    /// Clear the board for a new round. Outstanding opponent timers become
    /// stale.
    pub fn reset(&mut self) {
        self.round += 1;
        self.board = [None; 9];
        self.state = GameState::InProgress;
        self.locked = false;
        self.reported = false;
        self.clock.restart();
    }

    /// Only an X win produces a record; draws and O wins stay silent.
    pub fn take_completion(&mut self) -> Option<CompletionRecord> {
        if self.state != GameState::Won(Mark::X) || self.reported {
            return None;
        }
        self.reported = true;
        Some(CompletionRecord {
            activity_id: self.activity_id,
            score: WIN_SCORE,
            elapsed_seconds: self.clock.elapsed_seconds(),
            timestamp: Timestamp::now(),
        })
    }
}
