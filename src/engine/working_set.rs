//! Cells under consideration during one resolution run
//!
//! An append-only arena of [`SolvedCell`]s addressed by index, plus a
//! coordinate index. Growth never invalidates an index, so the resolver keeps
//! indices rather than references across pushes.

use ahash::AHashMap;
use std::ops::{Index, IndexMut};

use crate::core::types::CellCoord;
use crate::network::tile::SolvedCell;

#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    cells: Vec<SolvedCell>,
    index: AHashMap<CellCoord, usize>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a batch of changed cells. A repeated position keeps its first
    /// slot and takes the later cell's value.
    pub fn seeded(batch: impl IntoIterator<Item = SolvedCell>) -> Self {
        let mut set = Self::new();
        for cell in batch {
            match set.index.get(&cell.position) {
                Some(&slot) => set.cells[slot] = cell,
                None => {
                    set.push(cell);
                }
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Slot of the cell at `position`, if it has been pulled in
    pub fn index_of(&self, position: CellCoord) -> Option<usize> {
        self.index.get(&position).copied()
    }

    /// Append a cell and return its slot.
    ///
    /// The caller makes sure `position` is not already present.
    pub fn push(&mut self, cell: SolvedCell) -> usize {
        debug_assert!(!self.index.contains_key(&cell.position));
        let slot = self.cells.len();
        self.index.insert(cell.position, slot);
        self.cells.push(cell);
        slot
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SolvedCell> {
        self.cells.iter()
    }

    pub fn into_cells(self) -> Vec<SolvedCell> {
        self.cells
    }
}

impl Index<usize> for WorkingSet {
    type Output = SolvedCell;

    fn index(&self, slot: usize) -> &SolvedCell {
        &self.cells[slot]
    }
}

impl IndexMut<usize> for WorkingSet {
    fn index_mut(&mut self, slot: usize) -> &mut SolvedCell {
        &mut self.cells[slot]
    }
}
