use alloc::collections::VecDeque;
use core::mem;
use ndarray::Array2;

use crate::*;

/// Owns the grid: the fixed mine layout plus the mutable reveal and flag state.
///
/// The automaton step writes the next generation into a second buffer and swaps it in, so any `&self` reader sees
/// either the full previous generation or the full next one.
#[derive(Clone, Debug, PartialEq)]
pub struct GridEngine {
    mine_layout: MineLayout,
    neighbor_counts: Array2<u8>,
    revealed: Array2<bool>,
    next_revealed: Array2<bool>,
    flagged: Array2<bool>,
    revealed_count: CellCount,
    generation: u64,
}

impl GridEngine {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        let neighbor_counts = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            if mine_layout.contains_mine(coords) {
                0
            } else {
                mine_layout.adjacent_mine_count(coords)
            }
        });
        log::debug!(
            "New {}x{} grid with {} mines",
            size.0,
            size.1,
            mine_layout.mine_count()
        );

        Self {
            mine_layout,
            neighbor_counts,
            revealed: Array2::default(size.to_nd_index()),
            next_revealed: Array2::default(size.to_nd_index()),
            flagged: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            generation: 0,
        }
    }

    /// Rolls a fresh layout with `generator` and builds an engine on it.
    pub fn initialize(config: GridConfig, generator: impl MineGenerator) -> Self {
        Self::new(generator.generate(config))
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn dimensions(&self) -> Coord2 {
        self.size()
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Number of automaton steps applied so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn locate(&self, x: i32, y: i32) -> Option<Coord2> {
        locate(x, y, self.size())
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        self.locate(x, y).map(|coords| self.cell(coords))
    }

    pub fn live_neighbor_count(&self, x: i32, y: i32) -> Option<u8> {
        self.locate(x, y)
            .map(|coords| self.live_neighbor_count_at(coords))
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::from_engine(self)
    }

    pub(crate) fn cell(&self, coords: Coord2) -> Cell {
        let index = coords.to_nd_index();
        Cell {
            is_mine: self.mine_layout[coords],
            is_revealed: self.revealed[index],
            is_flagged: self.flagged[index],
            neighbor_mine_count: self.neighbor_counts[index],
        }
    }

    /// Reveals a cell, flood filling through cells without adjacent mines.
    ///
    /// Coordinates outside the grid and cells that are already revealed are ignored. Revealing a mine only marks it,
    /// what that means for the player is up to the caller.
    pub fn reveal(&mut self, x: i32, y: i32) -> RevealOutcome {
        let Some(coords) = self.locate(x, y) else {
            log::trace!("Ignoring reveal outside the grid at ({}, {})", x, y);
            return RevealOutcome::NoChange;
        };

        if self.revealed[coords.to_nd_index()] {
            return RevealOutcome::NoChange;
        }

        if self.mine_layout[coords] {
            self.mark_revealed(coords);
            log::debug!("Revealed mine at {:?}", coords);
            return RevealOutcome::RevealedMine;
        }

        let mut newly_revealed: CellCount = 0;
        let mut to_visit = VecDeque::from([coords]);

        while let Some(visit_coords) = to_visit.pop_front() {
            if self.revealed[visit_coords.to_nd_index()] {
                continue;
            }

            self.mark_revealed(visit_coords);
            newly_revealed += 1;
            log::trace!("Flood revealed cell at {:?}", visit_coords);

            if !self.mine_layout[visit_coords] && self.neighbor_counts[visit_coords.to_nd_index()] == 0 {
                let revealed = &self.revealed;
                to_visit.extend(
                    self.mine_layout
                        .iter_neighbors(visit_coords)
                        .filter(|pos| !revealed[pos.to_nd_index()]),
                );
            }
        }

        log::debug!("Revealed {} cells from {:?}", newly_revealed, coords);
        RevealOutcome::Revealed(newly_revealed)
    }

    pub fn toggle_flag(&mut self, x: i32, y: i32) -> MarkOutcome {
        let Some(coords) = self.locate(x, y) else {
            return MarkOutcome::NoChange;
        };

        let flag = &mut self.flagged[coords.to_nd_index()];
        *flag = !*flag;
        log::debug!("Flag at {:?} set to {}", coords, *flag);
        MarkOutcome::Changed
    }

    /// Advances the board by one Game of Life generation over the live cells.
    ///
    /// Live cells with fewer than two or more than three live neighbors get covered again, unrevealed cells with
    /// exactly three live neighbors get revealed, mines included. A revealed mine is never live and never covered
    /// again by this rule.
    pub fn step(&mut self) -> StepOutcome {
        let (x_end, y_end) = self.size();
        let mut outcome = StepOutcome::default();

        for x in 0..x_end {
            for y in 0..y_end {
                let coords = (x, y);
                let index = coords.to_nd_index();
                let was_revealed = self.revealed[index];
                let live_neighbors = self.live_neighbor_count_at(coords);

                let next = match (self.is_live(coords), live_neighbors) {
                    (true, 2 | 3) => true,
                    (true, _) => false,
                    (false, 3) => true,
                    (false, _) => was_revealed,
                };

                match (was_revealed, next) {
                    (false, true) => outcome.born += 1,
                    (true, false) => outcome.died += 1,
                    _ => {}
                }
                self.next_revealed[index] = next;
            }
        }

        mem::swap(&mut self.revealed, &mut self.next_revealed);
        self.revealed_count = self.revealed_count + outcome.born - outcome.died;
        self.generation += 1;

        log::debug!(
            "Generation {}: {} born, {} died",
            self.generation,
            outcome.born,
            outcome.died
        );
        outcome
    }

    fn mark_revealed(&mut self, coords: Coord2) {
        self.revealed[coords.to_nd_index()] = true;
        self.revealed_count += 1;
    }

    fn is_live(&self, coords: Coord2) -> bool {
        self.revealed[coords.to_nd_index()] && !self.mine_layout[coords]
    }

    fn live_neighbor_count_at(&self, coords: Coord2) -> u8 {
        self.mine_layout
            .iter_neighbors(coords)
            .filter(|&pos| self.is_live(pos))
            .count() as u8
    }
}
