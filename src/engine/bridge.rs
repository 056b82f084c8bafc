//! Surrogate bridge search
//!
//! When two tiles have no direct rule, a hypothetical surrogate piece (or a
//! pair of diagonal halves) is placed between them and the pair is matched as
//! a chain. Every step must rewrite only its downstream tile, so the change
//! propagates from `cell1` through the surrogates into `cell2`. Surrogates are
//! discarded afterwards.

use crate::engine::catalog::{SurrogateCatalog, SurrogateEntry};
use crate::engine::matcher::{MatchResult, TileMatcher};
use crate::network::direction::Direction;
use crate::network::rotflip::RotFlip;
use crate::network::tile::Tile;

/// Chained matching through surrogate tiles from a [`SurrogateCatalog`]
#[derive(Debug, Clone, Copy)]
pub struct BridgeSearch<'a> {
    matcher: TileMatcher<'a>,
    catalog: &'a SurrogateCatalog,
    diagonal: bool,
}

impl<'a> BridgeSearch<'a> {
    pub fn new(matcher: TileMatcher<'a>, catalog: &'a SurrogateCatalog) -> Self {
        Self {
            matcher,
            catalog,
            diagonal: true,
        }
    }

    /// Enable or disable the two-surrogate diagonal bridge
    pub fn with_diagonal(mut self, diagonal: bool) -> Self {
        self.diagonal = diagonal;
        self
    }

    /// Try to connect `cell2`, lying in direction `dir` of `cell1`, through
    /// surrogates. Every orthogonal surrogate in the catalog is tried before
    /// any diagonal pair. Never returns `Prevented`: a veto inside a chain
    /// only rejects that chain.
    pub fn search(&self, cell1: &mut Tile, cell2: &mut Tile, dir: Direction) -> MatchResult {
        let (a, b) = (*cell1, *cell2);
        let found = self
            .catalog
            .iter()
            .find_map(|entry| Some((entry, self.orthogonal(entry, a, b, dir)?)))
            .or_else(|| {
                self.catalog
                    .iter()
                    .find_map(|entry| Some((entry, self.diagonal_pair(entry, a, b, dir)?)))
            });

        match found {
            Some((entry, (first, last))) => {
                tracing::debug!("Bridged {} -> {} via {} surrogate", cell1, last, entry.network);
                *cell1 = first;
                *cell2 = last;
                MatchResult::Matched
            }
            None => MatchResult::NoMatch,
        }
    }

    fn orthogonal(
        &self,
        entry: &SurrogateEntry,
        cell1: Tile,
        cell2: Tile,
        dir: Direction,
    ) -> Option<(Tile, Tile)> {
        [dir.index(), dir.index() + 2].into_iter().find_map(|rotation| {
            let surrogate = Tile::new(entry.orthogonal, RotFlip::new(rotation & 3, false));
            self.chain(&mut [cell1, surrogate, cell2], &[dir, dir])
        })
    }

    fn diagonal_pair(
        &self,
        entry: &SurrogateEntry,
        cell1: Tile,
        cell2: Tile,
        dir: Direction,
    ) -> Option<(Tile, Tile)> {
        if !self.diagonal {
            return None;
        }
        let [half1, half2] = entry.diagonal?;
        [false, true].into_iter().find_map(|southbound| {
            let side = if southbound {
                dir.clockwise()
            } else {
                dir.counter_clockwise()
            };
            let orient = |half: Tile| {
                let rf = if southbound {
                    half.rf.flip_vertically()
                } else {
                    half.rf
                };
                half.with_rf(rf.relative_to_absolute(dir))
            };
            self.chain(
                &mut [cell1, orient(half1), orient(half2), cell2],
                &[dir, side, dir],
            )
        })
    }

    /// Match `tiles[i]` against `tiles[i + 1]` in `dirs[i]` for every step.
    /// Each junction needs two different ids, a `Matched` result and an
    /// unchanged upstream tile.
    fn chain(&self, tiles: &mut [Tile], dirs: &[Direction]) -> Option<(Tile, Tile)> {
        for (step, &dir) in dirs.iter().enumerate() {
            let (head, tail) = tiles.split_at_mut(step + 1);
            let upstream = &mut head[step];
            let downstream = &mut tail[0];
            if upstream.id == downstream.id {
                return None;
            }
            let before = *upstream;
            if self.matcher.match_pair(upstream, downstream, dir) != MatchResult::Matched {
                return None;
            }
            if *upstream != before {
                return None;
            }
        }
        Some((*tiles.first()?, *tiles.last()?))
    }
}
