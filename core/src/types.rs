use ndarray::Array2;

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`, `x` being the column.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Maps signed coordinates, as produced by pointer math, onto the grid.
///
/// Anything outside `size` is `None`, which callers treat as a silent no-op.
pub fn locate(x: i32, y: i32, size: Coord2) -> Option<Coord2> {
    let x = Coord::try_from(x).ok()?;
    let y = Coord::try_from(y).ok()?;
    (x < size.0 && y < size.1).then_some((x, y))
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (x_len, y_len) = self.dim();
        let size = (
            x_len.min(Coord::MAX.into()) as Coord,
            y_len.min(Coord::MAX.into()) as Coord,
        );
        NeighborIter::new(index, size)
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn apply_delta(coords: Coord2, (dx, dy): (i8, i8), (max_x, max_y): Coord2) -> Option<Coord2> {
    let next_x = coords.0.checked_add_signed(dx)?;
    let next_y = coords.1.checked_add_signed(dy)?;
    (next_x < max_x && next_y < max_y).then_some((next_x, next_y))
}

/// In-bounds Moore neighborhood of a cell, the cell itself excluded.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (3, 3)).collect();
        assert_eq!(neighbors, [(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn locate_rejects_negative_and_overflowing_coords() {
        assert_eq!(locate(-1, 0, (10, 10)), None);
        assert_eq!(locate(0, 10, (10, 10)), None);
        assert_eq!(locate(1000, 1, (10, 10)), None);
        assert_eq!(locate(9, 9, (10, 10)), Some((9, 9)));
    }
}
