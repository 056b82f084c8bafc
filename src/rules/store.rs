//! Append-only store of override rules, deduplicated by symmetry class

use ahash::AHashMap;

use crate::network::rotflip::RotFlip;
use crate::network::tile::Tile;
use crate::rules::equivalence::RuleKey;
use crate::rules::rule::OverrideRule;

/// Override rules keyed by their left-hand pair under symmetry equivalence.
///
/// Built once before resolution starts and read-only afterwards. Inserting a
/// rule equivalent to a stored one replaces the stored rule.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    rules: AHashMap<RuleKey, OverrideRule>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Insert a rule.
    ///
    /// Empty tiles on the left-hand side match any orientation, so one copy is
    /// stored for each orientation they could be queried with.
    pub fn insert(&mut self, rule: OverrideRule) {
        let first = orientations_for(&rule.left1);
        let second = orientations_for(&rule.left2);
        for &rf1 in first {
            for &rf2 in second {
                let mut copy = rule;
                copy.left1.rf = rf1;
                copy.left2.rf = rf2;
                self.rules.insert(RuleKey::of(&copy), copy);
            }
        }
    }

    /// Stored rule whose left-hand pair is equivalent to `(first, second)`
    pub fn find(&self, first: Tile, second: Tile) -> Option<&OverrideRule> {
        self.rules.get(&RuleKey::new(first, second))
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverrideRule> + '_ {
        self.rules.values()
    }
}

impl Extend<OverrideRule> for RuleStore {
    fn extend<I: IntoIterator<Item = OverrideRule>>(&mut self, iter: I) {
        for rule in iter {
            self.insert(rule);
        }
    }
}

impl FromIterator<OverrideRule> for RuleStore {
    fn from_iter<I: IntoIterator<Item = OverrideRule>>(iter: I) -> Self {
        let mut store = RuleStore::new();
        store.extend(iter);
        store
    }
}

fn orientations_for(tile: &Tile) -> &[RotFlip] {
    if tile.is_empty() {
        &RotFlip::ALL
    } else {
        std::slice::from_ref(&tile.rf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::rule::Symmetry;

    fn t(id: u32, rf: RotFlip) -> Tile {
        Tile::new(id, rf)
    }

    fn rule(l1: Tile, l2: Tile, r1: Tile, r2: Tile) -> OverrideRule {
        OverrideRule::new(l1, l2, r1, r2)
    }

    #[test]
    fn test_find_any_symmetric_encoding() {
        let mut store = RuleStore::new();
        let r = rule(
            t(5, RotFlip::R1F0),
            t(6, RotFlip::R0F0),
            t(7, RotFlip::R1F0),
            t(6, RotFlip::R0F0),
        );
        store.insert(r);
        for symmetry in Symmetry::ALL {
            let v = r.transformed(symmetry);
            assert_eq!(store.find(v.left1, v.left2), Some(&r), "{:?}", symmetry);
        }
        assert!(store.find(t(5, RotFlip::R2F0), t(6, RotFlip::R0F0)).is_none());
        assert!(store.find(t(6, RotFlip::R1F0), t(5, RotFlip::R0F0)).is_none());
    }

    #[test]
    fn test_equivalent_insert_replaces() {
        let mut store = RuleStore::new();
        let first = rule(
            t(5, RotFlip::R0F0),
            t(6, RotFlip::R0F0),
            t(7, RotFlip::R0F0),
            t(6, RotFlip::R0F0),
        );
        let second = rule(
            t(6, RotFlip::R2F0),
            t(5, RotFlip::R2F0),
            t(6, RotFlip::R2F0),
            t(8, RotFlip::R2F0),
        );
        store.insert(first);
        store.insert(second);
        assert_eq!(store.len(), 1);
        assert_eq!(store.find(first.left1, first.left2), Some(&second));
    }

    #[test]
    fn test_empty_tile_expands_to_every_orientation() {
        let mut store = RuleStore::new();
        store.insert(rule(
            t(5, RotFlip::R0F0),
            Tile::EMPTY,
            t(9, RotFlip::R0F0),
            Tile::EMPTY,
        ));
        for rf in RotFlip::ALL {
            let hit = store.find(t(5, RotFlip::R0F0), t(0, rf));
            assert!(hit.is_some(), "{}", rf);
            assert_eq!(hit.map(|r| r.right1.id), Some(9));
        }
        assert!(store.find(t(5, RotFlip::R0F0), t(1, RotFlip::R0F0)).is_none());
    }

    #[test]
    fn test_collect_from_iterator() {
        let store: RuleStore = vec![
            rule(
                t(1, RotFlip::R0F0),
                t(2, RotFlip::R0F0),
                t(3, RotFlip::R0F0),
                t(2, RotFlip::R0F0),
            ),
            rule(
                t(2, RotFlip::R0F0),
                t(4, RotFlip::R0F0),
                t(2, RotFlip::R0F0),
                t(5, RotFlip::R0F0),
            ),
        ]
        .into_iter()
        .collect();
        assert_eq!(store.len(), 2);
        assert_eq!(store.iter().count(), 2);
    }
}
