use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::model::{ActivityId, CompletionRecord, RoundClock, Timestamp};

const POINTS_PER_TILE: u32 = 5;

/// Supported puzzle grid sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSize {
    Three,
    Four,
    Five,
}

impl GridSize {
    pub const ALL: [GridSize; 3] = [GridSize::Three, GridSize::Four, GridSize::Five];

    pub fn side(&self) -> usize {
        match self {
            GridSize::Three => 3,
            GridSize::Four => 4,
            GridSize::Five => 5,
        }
    }

    pub fn cells(&self) -> usize {
        self.side() * self.side()
    }
}

impl TryFrom<usize> for GridSize {
    type Error = PuzzleError;

    fn try_from(side: usize) -> Result<Self, PuzzleError> {
        match side {
            3 => Ok(GridSize::Three),
            4 => Ok(GridSize::Four),
            5 => Ok(GridSize::Five),
            other => Err(PuzzleError::UnsupportedGrid(other)),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("unsupported grid side {0}, expected 3, 4 or 5")]
    UnsupportedGrid(usize),
    #[error("expected {expected} image fragments, got {got}")]
    FragmentCount { expected: usize, got: usize },
}

/// One cut of the source image. Immutable once created; only the placement
/// sequence moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile<F> {
    pub id: usize,
    pub fragment: F,
    pub home: usize,
}

/// Result of a tile click under the two-click swap protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Selected(usize),
    Deselected,
    /// Pairwise swap happened; `solved` reports the re-checked invariant.
    Swapped { solved: bool },
}

#[derive(Debug)]
pub struct TileSwapPuzzle<F> {
    activity_id: ActivityId,
    grid: GridSize,
    tiles: Vec<Tile<F>>,
    /// `placement[pos]` holds the id of the tile shown at `pos`.
    placement: Vec<usize>,
    selected: Option<usize>,
    moves: u32,
    reported: bool,
    clock: RoundClock,
}

impl<F> TileSwapPuzzle<F> {
    pub fn new(
        activity_id: ActivityId,
        grid: GridSize,
        fragments: Vec<F>,
    ) -> Result<Self, PuzzleError> {
        Self::with_rng(activity_id, grid, fragments, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        activity_id: ActivityId,
        grid: GridSize,
        fragments: Vec<F>,
        rng: &mut R,
    ) -> Result<Self, PuzzleError> {
        if fragments.len() != grid.cells() {
            return Err(PuzzleError::FragmentCount {
                expected: grid.cells(),
                got: fragments.len(),
            });
        }
        let tiles = fragments
            .into_iter()
            .enumerate()
            .map(|(id, fragment)| Tile {
                id,
                fragment,
                home: id,
            })
            .collect::<Vec<_>>();
        let placement = (0..tiles.len()).collect();
        let mut puzzle = Self {
            activity_id,
            grid,
            tiles,
            placement,
            selected: None,
            moves: 0,
            reported: false,
            clock: RoundClock::start(),
        };
        puzzle.scramble(rng);
        Ok(puzzle)
    }

    /// Start a fresh round over the same tiles.
    pub fn reshuffle(&mut self) {
        self.reshuffle_with_rng(&mut rand::thread_rng());
    }

    pub fn reshuffle_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.scramble(rng);
    }

    /// Re-draw the placement permutation while it is the identity, so a
    /// round never starts solved.
    fn scramble<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.placement = (0..self.tiles.len()).collect();
        while self.is_solved() {
            self.placement.shuffle(rng);
        }
        self.selected = None;
        self.moves = 0;
        self.reported = false;
        self.clock.restart();
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn tile_at(&self, pos: usize) -> &Tile<F> {
        &self.tiles[self.placement[pos]]
    }

    pub fn is_solved(&self) -> bool {
        self.placement
            .iter()
            .enumerate()
            .all(|(pos, &tile)| self.tiles[tile].home == pos)
    }

    /// Tiles currently sitting on their home position.
    pub fn correct_count(&self) -> usize {
        self.placement
            .iter()
            .enumerate()
            .filter(|&(pos, &tile)| self.tiles[tile].home == pos)
            .count()
    }

    /// Two-click protocol: first click selects, clicking the selection again
    /// clears it, a second position swaps against the selection.
    pub fn click(&mut self, pos: usize) -> ClickOutcome {
        if self.is_solved() || pos >= self.placement.len() {
            return ClickOutcome::Ignored;
        }
        match self.selected.take() {
            None => {
                self.selected = Some(pos);
                ClickOutcome::Selected(pos)
            }
            Some(previous) if previous == pos => ClickOutcome::Deselected,
            Some(previous) => {
                self.swap(previous, pos);
                ClickOutcome::Swapped {
                    solved: self.is_solved(),
                }
            }
        }
    }

    /// Exchange two placement slots and count a move. No-op once solved.
    pub fn swap(&mut self, a: usize, b: usize) {
        if self.is_solved() || a == b || a >= self.placement.len() || b >= self.placement.len() {
            return;
        }
        self.placement.swap(a, b);
        self.moves += 1;
    }

    /// The round's completion record, yielded at most once.
    pub fn take_completion(&mut self) -> Option<CompletionRecord> {
        if !self.is_solved() || self.reported {
            return None;
        }
        self.reported = true;
        Some(CompletionRecord {
            activity_id: self.activity_id,
            score: POINTS_PER_TILE * self.grid.cells() as u32,
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

    fn fragments(grid: GridSize) -> Vec<String> {
        (0..grid.cells()).map(|i| format!("tile-{i}")).collect()
    }

    fn puzzle(grid: GridSize, seed: u64) -> TileSwapPuzzle<String> {
        TileSwapPuzzle::with_rng(
            3,
            grid,
            fragments(grid),
            &mut ChaCha8Rng::seed_from_u64(seed),
        )
        .unwrap()
    }

    /// Sort the placement by repeatedly swapping each tile to its home.
    fn solve(puzzle: &mut TileSwapPuzzle<String>) {
        for pos in 0..puzzle.grid().cells() {
            while puzzle.tile_at(pos).home != pos {
                let home = puzzle.tile_at(pos).home;
                puzzle.swap(pos, home);
            }
        }
    }

    #[test]
    fn rejects_wrong_fragment_count() {
        let err = TileSwapPuzzle::new(3, GridSize::Three, vec!["a".to_string()]).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::FragmentCount {
                expected: 9,
                got: 1
            }
        );
    }

    #[test]
    fn fresh_puzzle_is_never_solved() {
        for seed in 0..50 {
            let puzzle = puzzle(GridSize::Three, seed);
            assert!(!puzzle.is_solved());
        }
    }

    #[test]
    fn solved_iff_every_tile_home() {
        let mut puzzle = puzzle(GridSize::Three, 42);
        assert!(puzzle.correct_count() < puzzle.grid().cells());
        solve(&mut puzzle);
        assert!(puzzle.is_solved());
        assert_eq!(puzzle.correct_count(), 9);
    }

    #[test]
    fn swap_is_a_noop_once_solved() {
        let mut puzzle = puzzle(GridSize::Three, 42);
        solve(&mut puzzle);
        let moves = puzzle.moves();
        puzzle.swap(0, 1);
        assert_eq!(puzzle.moves(), moves);
        assert!(puzzle.is_solved());
        assert_eq!(puzzle.click(0), ClickOutcome::Ignored);
    }

    #[test]
    fn selection_protocol_toggles_and_swaps() {
        let mut puzzle = puzzle(GridSize::Three, 42);
        assert_eq!(puzzle.click(0), ClickOutcome::Selected(0));
        assert_eq!(puzzle.click(0), ClickOutcome::Deselected);
        assert_eq!(puzzle.click(4), ClickOutcome::Selected(4));
        let before = (puzzle.tile_at(4).id, puzzle.tile_at(7).id);
        match puzzle.click(7) {
            ClickOutcome::Swapped { .. } => {}
            other => panic!("expected swap, got {other:?}"),
        }
        assert_eq!(puzzle.selected(), None);
        assert_eq!(puzzle.moves(), 1);
        assert_eq!((puzzle.tile_at(7).id, puzzle.tile_at(4).id), before);
    }

    #[test]
    fn completion_score_scales_with_grid() {
        for (grid, expected) in [(GridSize::Three, 45), (GridSize::Five, 125)] {
            let mut puzzle = puzzle(grid, 9);
            solve(&mut puzzle);
            let record = puzzle.take_completion().expect("solved puzzle");
            assert_eq!(record.score, expected);
            assert!(puzzle.take_completion().is_none());
        }
    }

    #[test]
    fn reshuffle_resets_the_round() {
        let mut puzzle = puzzle(GridSize::Four, 1);
        solve(&mut puzzle);
        assert!(puzzle.take_completion().is_some());
        puzzle.reshuffle_with_rng(&mut ChaCha8Rng::seed_from_u64(2));
        assert!(!puzzle.is_solved());
        assert_eq!(puzzle.moves(), 0);
        assert!(puzzle.take_completion().is_none());
    }

    #[test]
    fn grid_size_conversions() {
        assert_eq!(GridSize::try_from(4), Ok(GridSize::Four));
        assert_eq!(
            GridSize::try_from(6),
            Err(PuzzleError::UnsupportedGrid(6))
        );
        assert_eq!(GridSize::Five.cells(), 25);
    }
}
