mod matching;
mod outcome;
mod puzzle;
mod sequence;
mod session;
mod tictactoe;

pub use matching::{Card, Difficulty, MatchingPairs, MismatchTimer, Selection, MISMATCH_DELAY_MS};
pub use outcome::{ActivityId, CompletionRecord, RoundClock, Timestamp};
pub use puzzle::{ClickOutcome, GridSize, PuzzleError, Tile, TileSwapPuzzle};
pub use sequence::{SequenceProgress, SequenceRound, SequenceState, SEQUENCE_LENGTH};
pub use session::{Session, SessionError};
pub use tictactoe::{GameState, Mark, MoveOutcome, OpponentTimer, TicTacToe, OPPONENT_DELAY_MS};
