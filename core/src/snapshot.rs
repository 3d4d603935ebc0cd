use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// A full, consistent copy of every cell, taken between engine operations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub size: Coord2,
    pub generation: u64,
    pub cells: Array2<Cell>,
}

impl GridSnapshot {
    pub fn new(size: Coord2, generation: u64, cells: Array2<Cell>) -> Result<Self> {
        let snapshot = Self {
            size,
            generation,
            cells,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_engine(engine: &GridEngine) -> Self {
        let size = engine.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            engine.cell((x as Coord, y as Coord))
        });

        Self {
            size,
            generation: engine.generation(),
            cells,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let expected = (usize::from(self.size.0), usize::from(self.size.1));
        if self.cells.dim() != expected {
            return Err(GridError::InvalidBoardShape);
        }

        let bad_count = self.cells.indexed_iter().any(|((x, y), cell)| {
            let coords = (x as Coord, y as Coord);
            let mines = self
                .cells
                .iter_neighbors(coords)
                .filter(|pos| self.cells[pos.to_nd_index()].is_mine)
                .count() as u8;
            let expected = if cell.is_mine { 0 } else { mines };
            cell.neighbor_mine_count != expected
        });
        if bad_count {
            return Err(GridError::InvalidNeighborCount);
        }

        Ok(())
    }

    pub fn cell(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_revealed).count()
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_live()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_engine_copies_every_cell() {
        let layout = MineLayout::from_mine_coords((3, 2), &[(0, 0)]).unwrap();
        let mut engine = GridEngine::new(layout);
        engine.reveal(2, 1);
        engine.reveal(0, 0);
        engine.toggle_flag(1, 0);

        let snapshot = engine.snapshot();

        assert_eq!(snapshot.size, (3, 2));
        assert!(snapshot.validate().is_ok());
        assert_eq!(snapshot.revealed_count(), 5);
        assert_eq!(snapshot.live_count(), 4);
        let mine = snapshot.cell((0, 0)).unwrap();
        assert!(mine.is_mine && mine.is_revealed && !mine.is_live());
        assert!(snapshot.cell((1, 0)).unwrap().is_flagged);
        assert_eq!(snapshot.cell((1, 1)).unwrap().neighbor_mine_count, 1);
        assert_eq!(snapshot.cell((3, 0)), None);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_steps() {
        let layout = MineLayout::empty((5, 5)).unwrap();
        let mut engine = GridEngine::new(layout);
        engine.reveal(0, 0);
        let before = engine.snapshot();

        engine.step();

        assert_eq!(before.generation, 0);
        assert_eq!(before.revealed_count(), 25);
        assert_ne!(engine.snapshot(), before);
    }

    #[test]
    fn validate_rejects_shape_mismatch() {
        let result = GridSnapshot::new((2, 2), 0, Array2::default([1usize, 2]));
        assert_eq!(result, Err(GridError::InvalidBoardShape));
    }

    #[test]
    fn validate_rejects_wrong_neighbor_counts() {
        let mut cells: Array2<Cell> = Array2::default([2usize, 2]);
        cells[[0usize, 0]].is_mine = true;
        assert_eq!(
            GridSnapshot::new((2, 2), 0, cells.clone()),
            Err(GridError::InvalidNeighborCount)
        );

        for pos in [[1usize, 0], [0, 1], [1, 1]] {
            cells[pos].neighbor_mine_count = 1;
        }
        assert!(GridSnapshot::new((2, 2), 0, cells).is_ok());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(1, 1)]).unwrap();
        let mut engine = GridEngine::new(layout);
        engine.reveal(0, 0);
        let snapshot = engine.snapshot();

        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: GridSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, snapshot);
    }
}
