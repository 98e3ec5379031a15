mod game_menu;
mod matching_pairs;
mod sequence;
mod session_provider;
mod submit;
mod tic_tac_toe;
mod tile_swap;

pub use game_menu::{GameMenuComp, GameMenuProps};
pub use matching_pairs::MatchingPairsComp;
pub use sequence::SequenceComp;
pub use session_provider::{load_session, use_session, SessionProviderComp, SessionProviderProps};
pub use tic_tac_toe::TicTacToeComp;
pub use tile_swap::TileSwapComp;

use yew::prelude::*;

use crate::model::{ActivityId, Session};

/// Props shared by every game screen: which activity is being played and on
/// whose behalf.
#[derive(Properties, PartialEq, Clone)]
pub struct GameProps {
    pub activity_id: ActivityId,
    pub session: Session,
}
