//! Grid collaborator the resolver reads neighbours through

pub mod grid;

use crate::core::types::CellCoord;
use crate::network::direction::Direction;
use crate::network::tile::Tile;

pub use grid::NetworkGrid;

/// Committed state of one grid cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellRef {
    pub occupant: Option<Tile>,
    pub is_immovable: bool,
    pub is_lot: bool,
}

impl CellRef {
    /// Immovable pieces and lots are never rewritten
    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.is_immovable || self.is_lot
    }
}

/// Read-only view of committed grid state.
///
/// Must never reflect a resolution run's tentative changes.
pub trait CellLookup {
    /// `None` when the coordinate is outside the grid
    fn get_cell(&self, coord: CellCoord) -> Option<CellRef>;

    /// Coordinate one step in `dir`, or `None` past the grid edge
    fn neighbor_coord(&self, coord: CellCoord, dir: Direction) -> Option<CellCoord>;
}
