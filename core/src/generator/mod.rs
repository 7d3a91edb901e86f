use rand::Rng;

use crate::*;

pub use random::*;

mod random;

/// Strategy for placing mines at the start of a game.
pub trait MinefieldGenerator {
    fn generate(&self, config: GameConfig, rng: &mut impl Rng) -> MineLayout;
}

/// Replays one predetermined layout; backs fixture boards where the mine
/// positions must be known in advance.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedGenerator(pub MineLayout);

impl MinefieldGenerator for FixedGenerator {
    fn generate(&self, _config: GameConfig, _rng: &mut impl Rng) -> MineLayout {
        self.0.clone()
    }
}
