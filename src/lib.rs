pub mod api;
#[cfg(feature = "yew")]
pub mod components;
pub mod config;
pub mod model;

pub mod prelude {
    pub use crate::api::ActivityInfo;
    #[cfg(feature = "yew")]
    pub use crate::api::ApiClient;
    pub use crate::api::ApiError;
    #[cfg(feature = "yew")]
    pub use crate::components::*;
    pub use crate::config::Config;
    pub use crate::model::ActivityId;
    pub use crate::model::Card;
    pub use crate::model::ClickOutcome;
    pub use crate::model::CompletionRecord;
    pub use crate::model::Difficulty;
    pub use crate::model::GameState;
    pub use crate::model::GridSize;
    pub use crate::model::Mark;
    pub use crate::model::MatchingPairs;
    pub use crate::model::MoveOutcome;
    pub use crate::model::SequenceRound;
    pub use crate::model::SequenceState;
    pub use crate::model::Session;
    pub use crate::model::SessionError;
    pub use crate::model::TicTacToe;
    pub use crate::model::TileSwapPuzzle;
}
