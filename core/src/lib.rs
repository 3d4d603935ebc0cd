#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub size: Coord2,
    pub mine_probability: f64,
}

impl GridConfig {
    pub const DEFAULT_SIZE: Coord2 = (10, 10);
    pub const DEFAULT_MINE_PROBABILITY: f64 = 0.2;

    pub const fn new_unchecked(size: Coord2, mine_probability: f64) -> Self {
        Self {
            size,
            mine_probability,
        }
    }

    /// Clamps out-of-range input instead of rejecting it.
    pub fn new((size_x, size_y): Coord2, mine_probability: f64) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let mine_probability = if mine_probability.is_nan() {
            0.0
        } else {
            mine_probability.clamp(0.0, 1.0)
        };
        Self::new_unchecked((size_x, size_y), mine_probability)
    }

    pub fn try_new(size: Coord2, mine_probability: f64) -> Result<Self> {
        let config = Self::new_unchecked(size, mine_probability);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GridError::InvalidSize);
        }
        if !(0.0..=1.0).contains(&self.mine_probability) {
            return Err(GridError::InvalidProbability);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIZE, Self::DEFAULT_MINE_PROBABILITY)
    }
}

/// Where the mines are. Fixed once the engine is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMineLayout")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct RawMineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl TryFrom<RawMineLayout> for MineLayout {
    type Error = GridError;

    fn try_from(raw: RawMineLayout) -> Result<Self> {
        let layout = Self::from_mine_mask(raw.mine_mask)?;
        if layout.mine_count != raw.mine_count {
            return Err(GridError::InvalidMineCount);
        }
        Ok(layout)
    }
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (x_len, y_len) = mine_mask.dim();
        let max = usize::from(Coord::MAX);
        if x_len == 0 || y_len == 0 || x_len > max || y_len > max {
            return Err(GridError::InvalidSize);
        }
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GridError::InvalidSize);
        }
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GridError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub(crate) fn from_parts(mine_mask: Array2<bool>, mine_count: CellCount) -> Self {
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// A layout without any mine.
    pub fn empty(size: Coord2) -> Result<Self> {
        Self::from_mine_coords(size, &[])
    }

    pub fn size(&self) -> Coord2 {
        let (x_len, y_len) = self.mine_mask.dim();
        (x_len as Coord, y_len as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    /// Out of bounds or already revealed.
    NoChange,
    /// Safe cell revealed, with the number of cells the flood fill uncovered.
    Revealed(CellCount),
    /// The target was a mine. Nothing else happens.
    RevealedMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed(_) => true,
            RevealedMine => true,
        }
    }
}

/// Summary of one automaton generation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub born: CellCount,
    pub died: CellCount,
}

impl StepOutcome {
    pub const fn has_update(self) -> bool {
        self.born > 0 || self.died > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_ten_by_ten_with_one_in_five_mines() {
        let config = GridConfig::default();
        assert_eq!(config.size, (10, 10));
        assert_eq!(config.mine_probability, 0.2);
        assert_eq!(config.total_cells(), 100);
    }

    #[test]
    fn new_clamps_out_of_range_input() {
        let config = GridConfig::new((0, 12), 1.5);
        assert_eq!(config.size, (1, 12));
        assert_eq!(config.mine_probability, 1.0);

        assert_eq!(GridConfig::new((3, 3), f64::NAN).mine_probability, 0.0);
        assert_eq!(GridConfig::new((3, 3), -0.5).mine_probability, 0.0);
    }

    #[test]
    fn try_new_rejects_out_of_range_input() {
        assert_eq!(GridConfig::try_new((0, 4), 0.2), Err(GridError::InvalidSize));
        assert_eq!(
            GridConfig::try_new((4, 4), 1.01),
            Err(GridError::InvalidProbability)
        );
        assert_eq!(
            GridConfig::try_new((4, 4), f64::NAN),
            Err(GridError::InvalidProbability)
        );
        assert!(GridConfig::try_new((4, 4), 0.0).is_ok());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = GridConfig::new((7, 5), 0.35);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<GridConfig>(&json).unwrap(), config);
    }

    #[test]
    fn layout_rejects_coords_outside_size() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GridError::InvalidCoords)
        );
        assert_eq!(
            MineLayout::from_mine_coords((0, 2), &[]),
            Err(GridError::InvalidSize)
        );
    }

    #[test]
    fn layout_counts_adjacent_mines() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2), (1, 0)]).unwrap();
        assert_eq!(layout.mine_count(), 3);
        assert_eq!(layout.safe_cell_count(), 6);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 3);
        assert_eq!(layout.adjacent_mine_count((0, 2)), 0);
        assert_eq!(layout.adjacent_mine_count((0, 1)), 2);
    }

    #[test]
    fn layout_deserialization_checks_the_mask() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 1)]).unwrap();
        let json = serde_json::to_string(&layout).unwrap();
        assert_eq!(serde_json::from_str::<MineLayout>(&json).unwrap(), layout);

        let wrong_count = r#"{"mine_mask":{"v":1,"dim":[2,2],"data":[false,false,false,false]},"mine_count":9}"#;
        assert!(serde_json::from_str::<MineLayout>(wrong_count).is_err());

        let empty_mask = r#"{"mine_mask":{"v":1,"dim":[0,2],"data":[]},"mine_count":0}"#;
        assert!(serde_json::from_str::<MineLayout>(empty_mask).is_err());

        let too_wide = alloc::format!(
            r#"{{"mine_mask":{{"v":1,"dim":[256,1],"data":[{}]}},"mine_count":0}}"#,
            ["false"; 256].join(",")
        );
        assert!(serde_json::from_str::<MineLayout>(&too_wide).is_err());
    }

    #[test]
    fn duplicate_mine_coords_count_once() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(layout.mine_count(), 1);
    }
}
