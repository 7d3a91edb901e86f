use ndarray::Array2;

use super::*;

/// Uniform mine placement by rejection sampling: draw a random cell, retry
/// while it already holds a mine, until `config.mines` placements succeed.
/// Distinct positions are guaranteed by construction.
///
/// Assumes `config.mines < config.total_cells()`, which every validated
/// config satisfies. A config built with `new_unchecked` that violates it
/// gets a fully mined board back instead of an endless retry loop.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RejectionGenerator;

impl MinefieldGenerator for RejectionGenerator {
    fn generate(&self, config: GameConfig, rng: &mut impl Rng) -> MineLayout {
        if config.mines >= config.total_cells() {
            log::warn!(
                "{} mines do not fit a {}x{} board, filling it entirely",
                config.mines,
                config.width,
                config.height,
            );
            return MineLayout::from_mine_mask(Array2::from_elem(grid_dim(config.size()), true));
        }

        let mut mines: Array2<bool> = Array2::default(grid_dim(config.size()));
        let mut placed: CellCount = 0;

        while placed < config.mines {
            let x: Coord = rng.random_range(0..config.width);
            let y: Coord = rng.random_range(0..config.height);

            let slot = &mut mines[ix((x, y))];
            if !*slot {
                *slot = true;
                placed += 1;
            }
        }

        MineLayout::from_mine_mask(mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn places_exactly_the_requested_mine_count() {
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let config = GameConfig::beginner();

            let layout = RejectionGenerator.generate(config, &mut rng);

            assert_eq!(layout.mine_count(), config.mines, "seed {seed}");
            assert_eq!(layout.size(), config.size());
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_layout() {
        let config = GameConfig::intermediate();
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);

        assert_eq!(
            RejectionGenerator.generate(config, &mut a),
            RejectionGenerator.generate(config, &mut b),
        );
    }

    #[test]
    fn nearly_full_board_still_terminates() {
        let config = GameConfig::new(4, 4, 15).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);

        let layout = RejectionGenerator.generate(config, &mut rng);

        assert_eq!(layout.mine_count(), 15);
        assert_eq!(layout.safe_cells(), 1);
    }

    #[test]
    fn oversized_mine_count_falls_back_to_a_full_board() {
        let config = GameConfig::new_unchecked(3, 3, 9);
        let mut rng = SmallRng::seed_from_u64(0);

        let layout = RejectionGenerator.generate(config, &mut rng);

        assert_eq!(layout.mine_count(), 9);
        assert_eq!(layout.safe_cells(), 0);
    }

    #[test]
    fn zero_mines_yields_an_empty_mask() {
        let config = GameConfig::new(5, 5, 0).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);

        let layout = RejectionGenerator.generate(config, &mut rng);

        assert_eq!(layout.mine_count(), 0);
    }
}
