//! Fixpoint resolution of a batch of changed cells
//!
//! The resolver walks a cursor over the working set. At each cell it scans the
//! 4 neighbours, rewrites the first pair that matches and rescans from the
//! first direction. Neighbours outside the working set are snapshotted from
//! the grid and pulled in once a match touches them. A full pass without any
//! match is the fixpoint.
//!
//! Termination rests on two budgets: a global match budget for the whole run
//! and a per-cell cap after which the cursor moves on regardless.

use serde::Serialize;
use thiserror::Error;

use crate::core::config::EngineConfig;
use crate::core::types::CellCoord;
use crate::engine::bridge::BridgeSearch;
use crate::engine::matcher::{MatchResult, TileMatcher};
use crate::engine::working_set::WorkingSet;
use crate::network::direction::Direction;
use crate::network::tile::SolvedCell;
use crate::rules::store::RuleStore;
use crate::spatial::{CellLookup, NetworkGrid};

/// Why a batch could not be placed. Either way the grid must stay as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolveError {
    #[error("override rule forbids {cell} next to {neighbor} ({direction})")]
    Veto {
        cell: CellCoord,
        neighbor: CellCoord,
        direction: Direction,
    },

    #[error("match budget of {budget} exhausted after {matches} matches")]
    BudgetExhausted { budget: i64, matches: u64 },
}

impl ResolveError {
    pub fn is_veto(&self) -> bool {
        matches!(self, ResolveError::Veto { .. })
    }
}

/// Counters for one resolution run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolveStats {
    /// Neighbour pairs handed to the matcher
    pub attempts: u64,
    pub matches: u64,
    /// Matches that needed a surrogate chain
    pub bridged: u64,
    pub passes: u32,
    pub budget: i64,
}

/// Successful outcome: the final working set plus counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub cells: Vec<SolvedCell>,
    pub stats: ResolveStats,
}

/// A neighbour as seen from the cursor: a copy of its cell and, when it is
/// already in the working set, its slot
#[derive(Debug, Clone, Copy)]
struct Neighbor {
    cell: SolvedCell,
    slot: Option<usize>,
}

/// Runs batches against a read-only rule store
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a RuleStore,
    config: &'a EngineConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a RuleStore, config: &'a EngineConfig) -> Self {
        Self { store, config }
    }

    /// Resolve `initial` against `grid`.
    ///
    /// On success the returned cells are the final tiles of every cell the run
    /// touched, seeds first. The grid is only read; writing the result back is
    /// up to the caller.
    pub fn resolve<G: CellLookup + ?Sized>(
        &self,
        grid: &G,
        initial: Vec<SolvedCell>,
    ) -> Result<Vec<SolvedCell>, ResolveError> {
        self.resolve_with_stats(grid, initial).map(|r| r.cells)
    }

    /// Resolve `initial` against `grid` and write the result back only if
    /// the whole batch resolved. On failure the grid is untouched.
    pub fn resolve_onto(
        &self,
        grid: &mut NetworkGrid,
        initial: Vec<SolvedCell>,
    ) -> crate::core::error::Result<Resolution> {
        let resolution = self.resolve_with_stats(grid, initial)?;
        let written = grid.commit(&resolution.cells);
        tracing::debug!("Committed {} of {} cells", written, resolution.cells.len());
        Ok(resolution)
    }

    pub fn resolve_with_stats<G: CellLookup + ?Sized>(
        &self,
        grid: &G,
        initial: Vec<SolvedCell>,
    ) -> Result<Resolution, ResolveError> {
        let mut stats = ResolveStats::default();
        if self.store.is_empty() || initial.is_empty() {
            tracing::debug!("Nothing to resolve ({} seeds, {} rules)", initial.len(), self.store.len());
            return Ok(Resolution {
                cells: initial,
                stats,
            });
        }

        let matcher = TileMatcher::new(self.store);
        let bridge = BridgeSearch::new(matcher, &self.config.surrogates)
            .with_diagonal(self.config.diagonal_bridges);

        let budget = self.config.match_budget(initial.len());
        let mut set = WorkingSet::seeded(initial);
        let mut remaining = budget;
        stats.budget = budget;
        stats.passes = 1;

        let mut cursor = 0;
        let mut patches = 0;
        let mut found_match = false;

        loop {
            if patches <= self.config.max_repetitions
                && self.patch_cell(grid, &mut set, cursor, matcher, &bridge, &mut stats)?
            {
                stats.matches += 1;
                remaining -= 1;
                if remaining < 0 {
                    tracing::warn!(
                        "Match budget of {} exhausted at {}; rules are probably cyclic",
                        budget,
                        set[cursor].position
                    );
                    return Err(ResolveError::BudgetExhausted {
                        budget,
                        matches: stats.matches,
                    });
                }
                found_match = true;
                patches += 1;
                continue;
            }

            cursor += 1;
            patches = 0;
            if cursor < set.len() {
                continue;
            }
            if found_match {
                cursor = 0;
                found_match = false;
                stats.passes += 1;
                continue;
            }

            tracing::debug!(
                "Fixpoint after {} passes: {} cells, {} matches ({} bridged)",
                stats.passes,
                set.len(),
                stats.matches,
                stats.bridged
            );
            return Ok(Resolution {
                cells: set.into_cells(),
                stats,
            });
        }
    }

    /// Scan the 4 neighbours of `set[cursor]` and apply the first match.
    /// Returns whether anything changed.
    fn patch_cell<G: CellLookup + ?Sized>(
        &self,
        grid: &G,
        set: &mut WorkingSet,
        cursor: usize,
        matcher: TileMatcher<'_>,
        bridge: &BridgeSearch<'_>,
        stats: &mut ResolveStats,
    ) -> Result<bool, ResolveError> {
        let mut current = with_grid_flags(grid, set[cursor]);

        for dir in Direction::ALL {
            let Some(coord) = grid.neighbor_coord(current.position, dir) else {
                continue;
            };
            let Some(mut neighbor) = lookup_neighbor(grid, set, coord) else {
                continue;
            };
            stats.attempts += 1;

            let mut here = current.match_tile();
            let mut there = neighbor.cell.match_tile();
            let mut outcome = matcher.match_pair(&mut here, &mut there, dir);

            // A neighbour already in the set gets its own turn at the cursor
            if outcome == MatchResult::NoMatch && (neighbor.slot.is_none() || neighbor.cell.fixed) {
                outcome = matcher.match_pair(&mut there, &mut here, dir.opposite());
            }

            if outcome == MatchResult::Prevented {
                tracing::debug!("Veto: {} next to {} ({})", current, neighbor.cell, dir);
                return Err(ResolveError::Veto {
                    cell: current.position,
                    neighbor: coord,
                    direction: dir,
                });
            }

            let mut bridged = false;
            if outcome == MatchResult::NoMatch && self.config.bridge_search {
                bridged = bridge.search(&mut here, &mut there, dir) == MatchResult::Matched
                    || bridge.search(&mut there, &mut here, dir.opposite()) == MatchResult::Matched;
            }
            if outcome != MatchResult::Matched && !bridged {
                continue;
            }

            let changed_here = current.apply(here);
            let changed_there = neighbor.cell.apply(there);
            if !changed_here && !changed_there {
                continue;
            }

            if changed_here {
                set[cursor].tile = current.tile;
            }
            match neighbor.slot {
                Some(slot) if changed_there => set[slot].tile = neighbor.cell.tile,
                Some(_) => {}
                None if !neighbor.cell.fixed => {
                    set.push(neighbor.cell);
                }
                None => {}
            }
            if bridged {
                stats.bridged += 1;
            }
            return Ok(true);
        }

        Ok(false)
    }
}

/// Cells on immovable or lot cells of the grid are fixed whatever the caller said
fn with_grid_flags<G: CellLookup + ?Sized>(grid: &G, mut cell: SolvedCell) -> SolvedCell {
    if grid.get_cell(cell.position).is_some_and(|c| c.is_fixed()) {
        cell.fixed = true;
    }
    cell
}

fn lookup_neighbor<G: CellLookup + ?Sized>(
    grid: &G,
    set: &WorkingSet,
    coord: CellCoord,
) -> Option<Neighbor> {
    let (cell, slot) = match set.index_of(coord) {
        Some(slot) => (set[slot], Some(slot)),
        None => {
            let tile = grid.get_cell(coord)?.occupant?;
            (SolvedCell::new(tile, coord), None)
        }
    };
    Some(Neighbor {
        cell: with_grid_flags(grid, cell),
        slot,
    })
}
