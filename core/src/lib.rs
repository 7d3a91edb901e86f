#![no_std]

extern crate alloc;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use theme::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod theme;
mod types;

/// Board dimensions and mine count.
///
/// Engine operations assume `mines < width * height` and positive
/// dimensions; `new` enforces both, `new_unchecked` trusts the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines >= area(width, height) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(width, height, mines))
    }

    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(30, 16, 99)
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Immutable ground truth for one game: which cells hold mines.
///
/// Generated once per game and never mutated afterwards; all adjacency
/// counts derive from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mines: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Mask dimensions must fit `Coord` on both axes.
    pub fn from_mine_mask(mines: Array2<bool>) -> Self {
        let mine_count = mines
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        Self { mines, mine_count }
    }

    /// Builds a layout with mines at exactly `mine_coords`; the fixture
    /// entry point for tests and replays.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default(grid_dim(size));

        for &(x, y) in mine_coords {
            if x >= size.0 || y >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mines[ix((x, y))] = true;
        }

        Ok(Self::from_mine_mask(mines))
    }

    pub fn config(&self) -> GameConfig {
        let (width, height) = self.size();
        GameConfig {
            width,
            height,
            mines: self.mine_count,
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.mines.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mines.len().try_into().unwrap()
    }

    pub fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn in_bounds(&self, (x, y): Coord2) -> bool {
        let (width, height) = self.size();
        x < width && y < height
    }

    /// True mine state regardless of reveal state; `false` out of bounds.
    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.in_bounds(coords) && self.mines[ix(coords)]
    }

    /// Number of mines among the up-to-8 Moore neighbors of `coords`,
    /// clipped at the board edges. `0` out of bounds.
    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.contains_mine(pos))
            .count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> Neighbors {
        neighbors(coords, self.size())
    }
}

/// What a `toggle_flag` call did. Informational, not an error channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// What a `reveal` call did. Informational, not an error channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
