use alloc::collections::{BTreeSet, VecDeque};
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Playing
    }
}

/// The board engine: owns all game state and exposes total query and
/// mutation operations. Collaborators (renderer, input loop) call in; the
/// engine never calls out, and no operation panics or returns an error —
/// out-of-range input degrades to a no-op or a safe default.
#[derive(Clone, Debug)]
pub struct Board {
    config: GameConfig,
    layout: MineLayout,
    cells: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
    rng: SmallRng,
}

impl Board {
    /// Builds a board and immediately generates a fresh random layout.
    ///
    /// The crate is no_std and owns no entropy source, so the seed comes
    /// from the embedding layer; the same seed reproduces the same game.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let layout = RejectionGenerator.generate(config, &mut rng);
        Self::with_layout(config, layout, rng)
    }

    /// Builds a board over a fixed, known layout. `seed` only feeds later
    /// `reset` calls, which regenerate randomly as usual.
    pub fn from_layout(layout: MineLayout, seed: u64) -> Self {
        let rng = SmallRng::seed_from_u64(seed);
        Self::with_layout(layout.config(), layout, rng)
    }

    fn with_layout(config: GameConfig, layout: MineLayout, rng: SmallRng) -> Self {
        Self {
            config,
            layout,
            cells: Array2::default(grid_dim(config.size())),
            revealed_count: 0,
            flagged_count: 0,
            state: GameState::Playing,
            triggered_mine: None,
            rng,
        }
    }

    /// Discards the current game: clears all per-cell and end-of-game
    /// state and generates a brand-new random layout with the same
    /// dimensions and mine count. Valid from any state.
    pub fn reset(&mut self) {
        self.layout = RejectionGenerator.generate(self.config, &mut self.rng);
        self.cells.fill(Cell::Hidden);
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.state = GameState::Playing;
        self.triggered_mine = None;
    }

    /// Attempts to reveal one cell.
    ///
    /// No-op when the coordinates are out of bounds, the cell is already
    /// revealed or flagged, or the game is finished. Revealing a mine
    /// loses the game and uncovers every mine on the board; revealing a
    /// zero-count cell cascades through its whole zero region and the
    /// numbered cells bordering it.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.state.is_finished() || !self.layout.in_bounds(coords) {
            return RevealOutcome::NoChange;
        }
        if self.cells[ix(coords)] != Cell::Hidden {
            return RevealOutcome::NoChange;
        }

        if self.layout.contains_mine(coords) {
            self.triggered_mine = Some(coords);
            self.uncover_all_mines();
            self.state = GameState::Lost;
            return RevealOutcome::HitMine;
        }

        self.reveal_safe(coords);

        if self.revealed_count == self.layout.safe_cells() {
            self.state = GameState::Won;
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn reveal_safe(&mut self, start: Coord2) {
        let count = self.layout.adjacent_mines(start);
        self.cells[ix(start)] = Cell::Revealed(count);
        self.revealed_count += 1;

        if count != 0 {
            return;
        }

        // Flood fill of the contiguous zero region plus its numbered
        // border. Queue-based, so board size never threatens the stack;
        // flagged cells block the cascade.
        let mut visited = BTreeSet::from([start]);
        let mut queue: VecDeque<Coord2> = self.layout.iter_neighbors(start).collect();

        while let Some(coords) = queue.pop_front() {
            if !visited.insert(coords) {
                continue;
            }
            if self.cells[ix(coords)] != Cell::Hidden {
                continue;
            }

            let count = self.layout.adjacent_mines(coords);
            self.cells[ix(coords)] = Cell::Revealed(count);
            self.revealed_count += 1;

            if count == 0 {
                queue.extend(
                    self.layout
                        .iter_neighbors(coords)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    /// Loss sweep: every mine becomes visible, replacing any flag sitting
    /// on it. Mine cells never count towards the win condition.
    fn uncover_all_mines(&mut self) {
        let (width, height) = self.layout.size();
        for x in 0..width {
            for y in 0..height {
                if !self.layout.contains_mine((x, y)) {
                    continue;
                }
                if self.cells[ix((x, y))] == Cell::Flagged {
                    self.flagged_count -= 1;
                }
                self.cells[ix((x, y))] = Cell::Revealed(self.layout.adjacent_mines((x, y)));
            }
        }
    }

    /// Inverts the flag on one cell. No-op when the coordinates are out of
    /// bounds, the cell is revealed, or the game is finished.
    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if self.state.is_finished() || !self.layout.in_bounds(coords) {
            return FlagOutcome::NoChange;
        }

        match self.cells[ix(coords)] {
            Cell::Hidden => {
                self.cells[ix(coords)] = Cell::Flagged;
                self.flagged_count += 1;
                FlagOutcome::Changed
            }
            Cell::Flagged => {
                self.cells[ix(coords)] = Cell::Hidden;
                self.flagged_count -= 1;
                FlagOutcome::Changed
            }
            Cell::Revealed(_) => FlagOutcome::NoChange,
        }
    }

    pub const fn config(&self) -> GameConfig {
        self.config
    }

    pub const fn width(&self) -> Coord {
        self.config.width
    }

    pub const fn height(&self) -> Coord {
        self.config.height
    }

    pub const fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub const fn state(&self) -> GameState {
        self.state
    }

    pub const fn is_game_over(&self) -> bool {
        matches!(self.state, GameState::Lost)
    }

    pub const fn is_game_won(&self) -> bool {
        matches!(self.state, GameState::Won)
    }

    pub const fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// The mine the player detonated; `None` unless the game is lost.
    pub const fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Mine count minus flags placed, the classic HUD counter. Negative
    /// when the player has flagged more cells than there are mines.
    pub fn mines_left(&self) -> isize {
        self.layout.mine_count() as isize - self.flagged_count as isize
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        if self.layout.in_bounds(coords) {
            self.cells[ix(coords)]
        } else {
            Cell::Hidden
        }
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_revealed()
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_flagged()
    }

    /// True layout regardless of reveal state; the renderer relies on this
    /// after a loss to draw every mine. `false` out of bounds.
    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.layout.contains_mine(coords)
    }

    /// Adjacent-mine count from the true layout; `0` out of bounds.
    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        self.layout.adjacent_mines(coords)
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_layout(MineLayout::from_mine_coords(size, mines).unwrap(), 0)
    }

    #[test]
    fn reveal_mine_loses_and_uncovers_every_mine() {
        let mut board = board((3, 3), &[(0, 0), (2, 2)]);

        let outcome = board.reveal((0, 0));

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(board.state(), GameState::Lost);
        assert!(board.is_game_over());
        assert!(!board.is_game_won());
        assert_eq!(board.triggered_mine(), Some((0, 0)));
        assert!(board.is_revealed((0, 0)));
        assert!(board.is_revealed((2, 2)));
        assert!(!board.is_revealed((1, 1)));
    }

    #[test]
    fn loss_sweep_replaces_flags_on_mines() {
        let mut board = board((3, 3), &[(0, 0), (2, 2)]);
        board.toggle_flag((2, 2));

        board.reveal((0, 0));

        assert!(board.is_revealed((2, 2)));
        assert!(!board.is_flagged((2, 2)));
        assert_eq!(board.mines_left(), 2);
    }

    #[test]
    fn reveal_zero_cell_floods_the_region_and_its_border() {
        // single mine in the far corner, everything else is one zero region
        let mut board = board((4, 4), &[(3, 3)]);

        let outcome = board.reveal((0, 0));

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(board.cell_at((0, 0)), Cell::Revealed(0));
        assert_eq!(board.cell_at((2, 2)), Cell::Revealed(1));
        assert_eq!(board.cell_at((3, 2)), Cell::Revealed(1));
        assert_eq!(board.cell_at((3, 3)), Cell::Hidden);
    }

    #[test]
    fn flood_stops_at_numbered_cells() {
        // mine at (2,0): column 0 is zero, column 1 is the numbered border
        let mut board = board((4, 1), &[(2, 0)]);

        let outcome = board.reveal((0, 0));

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert_eq!(board.cell_at((0, 0)), Cell::Revealed(0));
        assert_eq!(board.cell_at((1, 0)), Cell::Revealed(1));
        assert_eq!(board.cell_at((2, 0)), Cell::Hidden);
        assert_eq!(board.cell_at((3, 0)), Cell::Hidden);
    }

    #[test]
    fn flagged_cell_blocks_both_reveal_and_cascade() {
        let mut board = board((4, 1), &[(3, 0)]);
        board.toggle_flag((1, 0));

        assert_eq!(board.reveal((1, 0)), RevealOutcome::NoChange);
        assert!(!board.is_revealed((1, 0)));

        board.reveal((0, 0));
        // the cascade from (0,0) must not open the flagged neighbor
        assert!(board.is_flagged((1, 0)));
        assert!(!board.is_revealed((1, 0)));
    }

    #[test]
    fn reveal_is_idempotent_and_bounds_checked() {
        let mut board = board((3, 3), &[(2, 2)]);

        // (1,1) borders the mine, so no cascade and no win follows
        assert_eq!(board.reveal((9, 9)), RevealOutcome::NoChange);
        assert_eq!(board.reveal((1, 1)), RevealOutcome::Revealed);
        assert_eq!(board.reveal((1, 1)), RevealOutcome::NoChange);
        assert_eq!(board.state(), GameState::Playing);
        assert_eq!(board.cell_at((1, 1)), Cell::Revealed(1));
    }

    #[test]
    fn revealing_the_last_safe_cell_wins() {
        let mut board = board((2, 1), &[(0, 0)]);

        assert_eq!(board.reveal((1, 0)), RevealOutcome::Won);
        assert_eq!(board.state(), GameState::Won);
        assert!(board.is_game_won());
        assert!(!board.is_game_over());
        assert!(!board.is_revealed((0, 0)));
    }

    #[test]
    fn finished_game_ignores_further_moves() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.reveal((0, 0));

        assert_eq!(board.reveal((1, 1)), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag((1, 1)), FlagOutcome::NoChange);
        assert!(!board.is_flagged((1, 1)));
    }

    #[test]
    fn toggle_flag_flips_hidden_cells_only() {
        let mut board = board((3, 3), &[(2, 2)]);

        assert_eq!(board.toggle_flag((0, 0)), FlagOutcome::Changed);
        assert!(board.is_flagged((0, 0)));
        assert_eq!(board.mines_left(), 0);

        assert_eq!(board.toggle_flag((0, 0)), FlagOutcome::Changed);
        assert!(!board.is_flagged((0, 0)));
        assert_eq!(board.mines_left(), 1);

        assert_eq!(board.toggle_flag((9, 0)), FlagOutcome::NoChange);

        board.reveal((0, 0));
        assert_eq!(board.toggle_flag((0, 0)), FlagOutcome::NoChange);
        assert!(!board.is_flagged((0, 0)));
    }

    #[test]
    fn mines_left_goes_negative_on_overflagging() {
        let mut board = board((3, 1), &[(0, 0)]);
        board.toggle_flag((1, 0));
        board.toggle_flag((2, 0));

        assert_eq!(board.mines_left(), -1);
    }

    #[test]
    fn queries_return_safe_defaults_out_of_bounds() {
        let board = board((3, 3), &[(1, 1)]);

        assert!(!board.is_revealed((7, 7)));
        assert!(!board.is_flagged((7, 7)));
        assert!(!board.is_mine((7, 7)));
        assert_eq!(board.adjacent_mines((7, 7)), 0);
        assert_eq!(board.cell_at((7, 7)), Cell::Hidden);
    }

    #[test]
    fn is_mine_reads_the_true_layout_before_any_reveal() {
        let board = board((3, 3), &[(1, 1)]);

        assert!(board.is_mine((1, 1)));
        assert!(!board.is_revealed((1, 1)));
        assert_eq!(board.adjacent_mines((0, 0)), 1);
    }

    #[test]
    fn reset_returns_to_playing_with_a_fresh_layout() {
        let config = GameConfig::beginner();
        let mut board = Board::new(config, 99);
        board.toggle_flag((0, 0));
        board.reveal((4, 4));
        board.reset();

        assert_eq!(board.state(), GameState::Playing);
        assert_eq!(board.triggered_mine(), None);
        assert_eq!(board.mines_left(), config.mines as isize);
        assert_eq!(board.layout().mine_count(), config.mines);
        for x in 0..board.width() {
            for y in 0..board.height() {
                assert_eq!(board.cell_at((x, y)), Cell::Hidden);
            }
        }
    }

    #[test]
    fn reset_recovers_from_a_lost_game() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.reveal((0, 0));
        assert!(board.is_game_over());

        board.reset();

        assert_eq!(board.state(), GameState::Playing);
        assert_eq!(board.layout().mine_count(), 1);
        assert!(board.reveal((0, 0)).has_update());
    }
}
