//! Apply override rules to a pair of adjacent tiles

use crate::network::direction::Direction;
use crate::network::tile::Tile;
use crate::rules::rule::Symmetry;
use crate::rules::store::RuleStore;

/// Outcome of matching one tile pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    NoMatch,
    Matched,
    /// A veto rule forbids the adjacency
    Prevented,
}

/// Looks up tile pairs in a [`RuleStore`] and rewrites them in place
#[derive(Debug, Clone, Copy)]
pub struct TileMatcher<'a> {
    store: &'a RuleStore,
}

impl<'a> TileMatcher<'a> {
    pub fn new(store: &'a RuleStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a RuleStore {
        self.store
    }

    /// Match `cell2`, lying in direction `dir` of `cell1`, against the rules.
    ///
    /// Orientations are absolute on entry and on exit. Both tiles are left
    /// untouched unless the result is `Matched`, and `Matched` always means at
    /// least one of them changed.
    pub fn match_pair(&self, cell1: &mut Tile, cell2: &mut Tile, dir: Direction) -> MatchResult {
        let first = cell1.with_rf(cell1.rf.absolute_to_relative(dir));
        let second = cell2.with_rf(cell2.rf.absolute_to_relative(dir));

        let Some(rule) = self.store.find(first, second) else {
            return MatchResult::NoMatch;
        };
        if rule.is_veto() {
            return MatchResult::Prevented;
        }

        for symmetry in Symmetry::ALL {
            let variant = rule.transformed(symmetry);
            if !variant.accepts(&first, &second) {
                continue;
            }
            let new1 = settle(variant.right1, *cell1, dir);
            let new2 = settle(variant.right2, *cell2, dir);
            if new1 == *cell1 && new2 == *cell2 {
                return MatchResult::NoMatch;
            }
            *cell1 = new1;
            *cell2 = new2;
            return MatchResult::Matched;
        }

        MatchResult::NoMatch
    }
}

/// Bring a rule output back to absolute orientation; empty outputs keep the old orientation
fn settle(output: Tile, previous: Tile, dir: Direction) -> Tile {
    if output.is_empty() {
        Tile::new(0, previous.rf)
    } else {
        output.with_rf(output.rf.relative_to_absolute(dir))
    }
}
