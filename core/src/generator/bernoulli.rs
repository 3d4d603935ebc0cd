use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Places a mine on every cell independently with `config.mine_probability`.
///
/// There is no bound on the resulting mine count and no safe starting cell, an empty board and a board full of
/// mines are both valid outcomes.
#[derive(Clone, Debug, PartialEq)]
pub struct BernoulliMineGenerator<R> {
    rng: R,
}

impl<R: Rng> BernoulliMineGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl BernoulliMineGenerator<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MineGenerator for BernoulliMineGenerator<R> {
    fn generate(mut self, config: GridConfig) -> MineLayout {
        let config = GridConfig::new(config.size, config.mine_probability);
        let (x_end, y_end) = config.size;
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut mine_count: CellCount = 0;

        // row-major, one draw per cell
        for y in 0..y_end {
            for x in 0..x_end {
                let draw: f64 = self.rng.random();
                if draw < config.mine_probability {
                    mine_mask[(x, y).to_nd_index()] = true;
                    mine_count += 1;
                }
            }
        }

        log::debug!(
            "Generated {}x{} layout with {} mines (p = {})",
            x_end,
            y_end,
            mine_count,
            config.mine_probability
        );
        MineLayout::from_parts(mine_mask, mine_count)
    }
}
