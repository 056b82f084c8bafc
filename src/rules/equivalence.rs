//! Equivalence of override rules under the pair-preserving symmetries
//!
//! Two rules are the same rule when one left-hand pair can be turned into the
//! other by one of the 4 symmetries in [`Symmetry`](crate::rules::rule::Symmetry).
//! The orientation pair alone decides the symmetry class: each of the 64 pairs
//! falls into one of 20 classes (numbered below 32). Regular classes have 4
//! members; the 8 degenerate ones have only 2, because the pair is unchanged by
//! a half turn with swapped sides. The tables also record whether a pair is
//! stored with its sides swapped relative to the class representative.
//!
//! Ids take no part in the class. They are compared in canonical order: swapped
//! pairs compare reversed, and in degenerate classes either order is accepted.

use std::hash::{Hash, Hasher};

use crate::network::tile::Tile;
use crate::rules::rule::OverrideRule;

/// Class index per (first, second) orientation ordinal
const CLASS: [[u8; 8]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7],
    [8, 9, 3, 11, 7, 13, 14, 15],
    [16, 17, 0, 8, 6, 21, 22, 14],
    [17, 25, 1, 9, 5, 29, 21, 13],
    [22, 21, 6, 14, 0, 17, 16, 8],
    [14, 13, 7, 15, 3, 9, 8, 11],
    [6, 5, 4, 7, 2, 1, 0, 3],
    [21, 29, 5, 13, 1, 25, 17, 9],
];

const SWAPPED: [[bool; 8]; 8] = [
    [false, false, false, false, false, false, false, false],
    [false, false, true, false, true, false, false, false],
    [false, false, true, true, true, false, false, true],
    [true, false, true, true, true, false, true, true],
    [false, false, true, true, true, false, false, true],
    [false, false, true, false, true, false, false, false],
    [false, false, false, false, false, false, false, false],
    [true, false, true, true, true, false, true, true],
];

/// Members per class; 0 marks an unused index
const CLASS_SIZE: [u8; 32] = [
    4, 4, 2, 4, 2, 4, 4, 4, 4, 4, 0, 2, 0, 4, 4, 2, 2, 4, 0, 0, 0, 4, 2, 0, 0, 2, 0, 0, 0, 2, 0, 0,
];

/// Lookup key for a rule store: the left-hand tile pair under symmetry equivalence
#[derive(Debug, Clone, Copy)]
pub struct RuleKey {
    first: Tile,
    second: Tile,
}

impl RuleKey {
    pub fn new(first: Tile, second: Tile) -> Self {
        Self { first, second }
    }

    pub fn of(rule: &OverrideRule) -> Self {
        Self::new(rule.left1, rule.left2)
    }

    pub fn first(&self) -> Tile {
        self.first
    }

    pub fn second(&self) -> Tile {
        self.second
    }

    /// Symmetry class of the orientation pair
    pub fn class(&self) -> usize {
        CLASS[self.first.rf.ordinal()][self.second.rf.ordinal()] as usize
    }

    /// Whether the pair is stored with sides swapped relative to its class
    pub fn is_swapped(&self) -> bool {
        SWAPPED[self.first.rf.ordinal()][self.second.rf.ordinal()]
    }

    /// Degenerate classes have 2 members instead of 4
    pub fn is_degenerate(&self) -> bool {
        let size = CLASS_SIZE[self.class()];
        debug_assert!(size != 0, "orientation pair mapped to an unused class");
        size != 4
    }

    /// Ids in the order used for hashing and comparison
    fn canonical_ids(&self) -> (u32, u32) {
        let (a, b) = (self.first.id, self.second.id);
        if self.is_swapped() || (self.is_degenerate() && b < a) {
            (b, a)
        } else {
            (a, b)
        }
    }
}

impl PartialEq for RuleKey {
    fn eq(&self, other: &Self) -> bool {
        let class = self.class();
        if class != other.class() {
            return false;
        }
        let (p1, p2) = (self.first.id, self.second.id);
        let (q1, q2) = (other.first.id, other.second.id);
        if self.is_degenerate() {
            (p1 == q1 && p2 == q2) || (p1 == q2 && p2 == q1)
        } else if self.is_swapped() == other.is_swapped() {
            p1 == q1 && p2 == q2
        } else {
            p1 == q2 && p2 == q1
        }
    }
}

impl Eq for RuleKey {}

impl Hash for RuleKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class().hash(state);
        self.canonical_ids().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::rotflip::RotFlip;
    use crate::rules::rule::Symmetry;
    use ahash::AHashSet;
    use proptest::prelude::*;

    fn key(id1: u32, rf1: RotFlip, id2: u32, rf2: RotFlip) -> RuleKey {
        RuleKey::new(Tile::new(id1, rf1), Tile::new(id2, rf2))
    }

    fn variants(k: &RuleKey) -> Vec<RuleKey> {
        Symmetry::ALL
            .iter()
            .map(|s| {
                let (a, b) = s.apply_pair(k.first, k.second);
                RuleKey::new(a, b)
            })
            .collect()
    }

    fn hash_of(k: &RuleKey) -> u64 {
        use std::hash::BuildHasher;
        ahash::RandomState::with_seeds(1, 2, 3, 4).hash_one(k)
    }

    #[test]
    fn test_classes_are_closed_under_symmetries() {
        for a in RotFlip::ALL {
            for b in RotFlip::ALL {
                let k = key(1, a, 2, b);
                for v in variants(&k) {
                    assert_eq!(v.class(), k.class(), "{} {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_class_sizes_match_orbits() {
        let mut members: Vec<AHashSet<(RotFlip, RotFlip)>> = vec![AHashSet::new(); 32];
        for a in RotFlip::ALL {
            for b in RotFlip::ALL {
                members[key(1, a, 2, b).class()].insert((a, b));
            }
        }
        let used = members.iter().filter(|m| !m.is_empty()).count();
        assert_eq!(used, 20);
        for (class, m) in members.iter().enumerate() {
            assert_eq!(m.len(), CLASS_SIZE[class] as usize, "class {}", class);
        }
    }

    #[test]
    fn test_swapped_flag_tracks_side_swaps() {
        for a in RotFlip::ALL {
            for b in RotFlip::ALL {
                let k = key(1, a, 2, b);
                if k.is_degenerate() {
                    continue;
                }
                for (symmetry, v) in Symmetry::ALL.iter().zip(variants(&k)) {
                    assert_eq!(v.is_swapped() != k.is_swapped(), symmetry.swaps_sides());
                }
            }
        }
    }

    #[test]
    fn test_regular_class_has_four_distinct_variants() {
        let k = key(10, RotFlip::R1F0, 20, RotFlip::R0F0);
        assert!(!k.is_degenerate());
        let vs = variants(&k);
        for v in &vs {
            assert_eq!(*v, k);
            assert_eq!(hash_of(v), hash_of(&k));
        }
        let distinct: AHashSet<(Tile, Tile)> = vs.iter().map(|v| (v.first, v.second)).collect();
        assert_eq!(distinct.len(), 4);
    }

    #[test]
    fn test_degenerate_class_collapses_to_two() {
        let k = key(10, RotFlip::R0F0, 10, RotFlip::R2F0);
        assert!(k.is_degenerate());
        let distinct: AHashSet<(Tile, Tile)> =
            variants(&k).iter().map(|v| (v.first, v.second)).collect();
        assert_eq!(distinct.len(), 2);
    }

    #[test]
    fn test_degenerate_class_accepts_either_id_order() {
        let k = key(10, RotFlip::R0F0, 20, RotFlip::R2F0);
        let reversed = key(20, RotFlip::R0F0, 10, RotFlip::R2F0);
        assert_eq!(k, reversed);
        assert_eq!(hash_of(&k), hash_of(&reversed));
    }

    #[test]
    fn test_regular_class_distinguishes_id_order() {
        let k = key(10, RotFlip::R1F0, 20, RotFlip::R0F0);
        let reversed = key(20, RotFlip::R1F0, 10, RotFlip::R0F0);
        assert_ne!(k, reversed);
    }

    #[test]
    fn test_different_classes_never_equal() {
        let a = key(1, RotFlip::R0F0, 2, RotFlip::R0F0);
        let b = key(1, RotFlip::R1F0, 2, RotFlip::R0F0);
        assert_ne!(a, b);
    }

    fn tile() -> impl Strategy<Value = Tile> {
        (0u32..4, 0u8..8).prop_map(|(id, rf)| Tile::new(id, RotFlip::ALL[rf as usize]))
    }

    proptest! {
        #[test]
        fn variants_are_equal_and_hash_equal(a in tile(), b in tile()) {
            let k = RuleKey::new(a, b);
            for v in variants(&k) {
                prop_assert_eq!(v, k);
                prop_assert_eq!(hash_of(&v), hash_of(&k));
            }
        }

        #[test]
        fn equal_keys_hash_equal(a in tile(), b in tile(), c in tile(), d in tile()) {
            let p = RuleKey::new(a, b);
            let q = RuleKey::new(c, d);
            if p == q {
                prop_assert_eq!(hash_of(&p), hash_of(&q));
            }
        }

        #[test]
        fn equal_keys_are_related_by_a_symmetry(a in tile(), b in tile(), c in tile(), d in tile()) {
            let p = RuleKey::new(a, b);
            let q = RuleKey::new(c, d);
            if p == q {
                let related = variants(&p).iter().any(|v| {
                    v.first.id == q.first.id
                        && v.second.id == q.second.id
                        && v.first.rf == q.first.rf
                        && v.second.rf == q.second.rf
                });
                prop_assert!(related);
            }
        }
    }
}
