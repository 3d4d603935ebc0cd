use crate::*;
pub use bernoulli::*;

mod bernoulli;

pub trait MineGenerator {
    fn generate(self, config: GridConfig) -> MineLayout;
}
