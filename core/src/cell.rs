use serde::{Deserialize, Serialize};

/// Read-only view of a single grid position, as handed to renderers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Mines among the in-bounds neighbors, always 0 for mine cells.
    pub neighbor_mine_count: u8,
}

impl Cell {
    /// Live in the automaton sense: revealed and not a mine.
    pub const fn is_live(self) -> bool {
        self.is_revealed && !self.is_mine
    }
}
