//! Dense bounded grid of network cells

use crate::core::types::CellCoord;
use crate::network::direction::Direction;
use crate::network::tile::{SolvedCell, Tile};
use crate::spatial::{CellLookup, CellRef};

/// Row-major grid of [`CellRef`]s covering `0..width` by `0..height`
#[derive(Debug, Clone)]
pub struct NetworkGrid {
    pub width: usize,
    pub height: usize,
    data: Vec<CellRef>,
}

impl NetworkGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![CellRef::default(); width * height],
        }
    }

    #[inline]
    pub fn in_bounds(&self, coord: CellCoord) -> bool {
        coord.x >= 0
            && coord.z >= 0
            && (coord.x as usize) < self.width
            && (coord.z as usize) < self.height
    }

    #[inline]
    fn slot(&self, coord: CellCoord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(coord.z as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, coord: CellCoord) -> Option<&CellRef> {
        self.slot(coord).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, coord: CellCoord) -> Option<&mut CellRef> {
        self.slot(coord).map(move |i| &mut self.data[i])
    }

    /// Place or clear an occupant; returns false outside the grid
    pub fn set_occupant(&mut self, coord: CellCoord, tile: Option<Tile>) -> bool {
        match self.get_mut(coord) {
            Some(cell) => {
                cell.occupant = tile.filter(|t| !t.is_empty());
                true
            }
            None => false,
        }
    }

    pub fn set_immovable(&mut self, coord: CellCoord, immovable: bool) -> bool {
        match self.get_mut(coord) {
            Some(cell) => {
                cell.is_immovable = immovable;
                true
            }
            None => false,
        }
    }

    pub fn set_lot(&mut self, coord: CellCoord, lot: bool) -> bool {
        match self.get_mut(coord) {
            Some(cell) => {
                cell.is_lot = lot;
                true
            }
            None => false,
        }
    }

    /// Write a successful resolution back. Fixed cells and cells outside the
    /// grid are left alone. Returns the number of cells written.
    pub fn commit(&mut self, cells: &[SolvedCell]) -> usize {
        let mut written = 0;
        for solved in cells {
            if solved.fixed {
                continue;
            }
            if let Some(cell) = self.get_mut(solved.position) {
                if cell.is_fixed() {
                    continue;
                }
                cell.occupant = Some(solved.tile).filter(|t| !t.is_empty());
                written += 1;
            }
        }
        written
    }

    /// Occupied cells in row-major order
    pub fn occupants(&self) -> impl Iterator<Item = (CellCoord, Tile)> + '_ {
        self.data.iter().enumerate().filter_map(move |(i, cell)| {
            let coord = CellCoord::new((i % self.width) as i32, (i / self.width) as i32);
            cell.occupant.map(|tile| (coord, tile))
        })
    }
}

impl CellLookup for NetworkGrid {
    fn get_cell(&self, coord: CellCoord) -> Option<CellRef> {
        self.get(coord).copied()
    }

    fn neighbor_coord(&self, coord: CellCoord, dir: Direction) -> Option<CellCoord> {
        let next = dir.step(coord);
        self.in_bounds(next).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::rotflip::RotFlip;

    #[test]
    fn test_bounds() {
        let grid = NetworkGrid::new(3, 2);
        assert!(grid.in_bounds(CellCoord::new(2, 1)));
        assert!(!grid.in_bounds(CellCoord::new(3, 0)));
        assert!(!grid.in_bounds(CellCoord::new(0, -1)));
        assert!(grid.get_cell(CellCoord::new(-1, 0)).is_none());
    }

    #[test]
    fn test_neighbor_coord_stops_at_edge() {
        let grid = NetworkGrid::new(2, 2);
        let origin = CellCoord::new(0, 0);
        assert_eq!(grid.neighbor_coord(origin, Direction::West), None);
        assert_eq!(grid.neighbor_coord(origin, Direction::North), None);
        assert_eq!(
            grid.neighbor_coord(origin, Direction::East),
            Some(CellCoord::new(1, 0))
        );
        assert_eq!(
            grid.neighbor_coord(origin, Direction::South),
            Some(CellCoord::new(0, 1))
        );
    }

    #[test]
    fn test_set_and_read_back() {
        let mut grid = NetworkGrid::new(4, 4);
        let at = CellCoord::new(1, 2);
        let tile = Tile::new(0x5D54_0000, RotFlip::R1F0);
        assert!(grid.set_occupant(at, Some(tile)));
        assert!(grid.set_lot(at, true));
        let cell = grid.get_cell(at).unwrap();
        assert_eq!(cell.occupant, Some(tile));
        assert!(cell.is_fixed());
        assert!(!grid.set_occupant(CellCoord::new(9, 9), Some(tile)));
    }

    #[test]
    fn test_commit_skips_fixed_cells() {
        let mut grid = NetworkGrid::new(3, 1);
        let a = CellCoord::new(0, 0);
        let b = CellCoord::new(1, 0);
        grid.set_occupant(b, Some(Tile::new(4, RotFlip::R0F0)));
        grid.set_immovable(b, true);
        let written = grid.commit(&[
            SolvedCell::new(Tile::new(9, RotFlip::R1F0), a),
            SolvedCell::new(Tile::new(7, RotFlip::R0F0), b),
            SolvedCell::new(Tile::new(7, RotFlip::R0F0), CellCoord::new(5, 0)),
        ]);
        assert_eq!(written, 1);
        assert_eq!(grid.get(a).and_then(|c| c.occupant), Some(Tile::new(9, RotFlip::R1F0)));
        assert_eq!(grid.get(b).and_then(|c| c.occupant), Some(Tile::new(4, RotFlip::R0F0)));
        assert_eq!(grid.occupants().count(), 2);
    }
}
