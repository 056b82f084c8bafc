//! Override rules: a tile pair rewritten to another tile pair
//!
//! A rule reads "when `left1` has `left2` as its East neighbour, replace them
//! with `right1` and `right2`". A `right1` with id 0 forbids the adjacency.

use std::fmt;

use crate::network::tile::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverrideRule {
    pub left1: Tile,
    pub left2: Tile,
    pub right1: Tile,
    pub right2: Tile,
}

/// The symmetries of the square that keep an East-West pair on one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    Identity,
    /// Mirror north and south; the pair keeps its sides
    FlipVertical,
    /// Turn by 180 degrees; the pair swaps sides
    Rotate180,
    /// Mirror west and east; the pair swaps sides
    FlipHorizontal,
}

impl Symmetry {
    /// Order in which the matcher tries the variants
    pub const ALL: [Symmetry; 4] = [
        Symmetry::Identity,
        Symmetry::FlipVertical,
        Symmetry::Rotate180,
        Symmetry::FlipHorizontal,
    ];

    pub fn swaps_sides(self) -> bool {
        matches!(self, Symmetry::Rotate180 | Symmetry::FlipHorizontal)
    }

    fn apply(self, tile: Tile) -> Tile {
        let rf = match self {
            Symmetry::Identity => tile.rf,
            Symmetry::FlipVertical => tile.rf.flip_vertically(),
            Symmetry::Rotate180 => tile.rf.rotate180(),
            Symmetry::FlipHorizontal => tile.rf.flip_horizontally(),
        };
        tile.with_rf(rf)
    }

    /// Transform a tile pair, swapping sides where the symmetry requires it
    pub fn apply_pair(self, first: Tile, second: Tile) -> (Tile, Tile) {
        if self.swaps_sides() {
            (self.apply(second), self.apply(first))
        } else {
            (self.apply(first), self.apply(second))
        }
    }
}

impl OverrideRule {
    pub fn new(left1: Tile, left2: Tile, right1: Tile, right2: Tile) -> Self {
        Self {
            left1,
            left2,
            right1,
            right2,
        }
    }

    /// Veto rules forbid the adjacency instead of rewriting it
    pub fn is_veto(&self) -> bool {
        self.right1.id == 0
    }

    /// The rule as seen through one of the 4 pair-preserving symmetries
    pub fn transformed(&self, symmetry: Symmetry) -> OverrideRule {
        let (left1, left2) = symmetry.apply_pair(self.left1, self.left2);
        let (right1, right2) = symmetry.apply_pair(self.right1, self.right2);
        OverrideRule::new(left1, left2, right1, right2)
    }

    /// Whether the left-hand side accepts the given pair (empty tiles match any orientation)
    pub fn accepts(&self, first: &Tile, second: &Tile) -> bool {
        self.left1.matches(first) && self.left2.matches(second)
    }
}

impl fmt::Display for OverrideRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}={},{}",
            self.left1, self.left2, self.right1, self.right2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::rotflip::RotFlip;

    fn t(id: u32, rf: RotFlip) -> Tile {
        Tile::new(id, rf)
    }

    #[test]
    fn test_veto_detection() {
        let veto = OverrideRule::new(
            t(1, RotFlip::R0F0),
            t(2, RotFlip::R0F0),
            Tile::EMPTY,
            Tile::EMPTY,
        );
        assert!(veto.is_veto());
        let rewrite = OverrideRule::new(
            t(1, RotFlip::R0F0),
            t(2, RotFlip::R0F0),
            t(3, RotFlip::R0F0),
            t(2, RotFlip::R0F0),
        );
        assert!(!rewrite.is_veto());
    }

    #[test]
    fn test_rotate180_swaps_sides() {
        let rule = OverrideRule::new(
            t(1, RotFlip::R1F0),
            t(2, RotFlip::R0F0),
            t(3, RotFlip::R1F0),
            t(4, RotFlip::R3F1),
        );
        let turned = rule.transformed(Symmetry::Rotate180);
        assert_eq!(turned.left1, t(2, RotFlip::R2F0));
        assert_eq!(turned.left2, t(1, RotFlip::R3F0));
        assert_eq!(turned.right1, t(4, RotFlip::R1F1));
        assert_eq!(turned.right2, t(3, RotFlip::R3F0));
    }

    #[test]
    fn test_flip_vertical_keeps_sides() {
        let rule = OverrideRule::new(
            t(1, RotFlip::R1F0),
            t(2, RotFlip::R0F0),
            t(3, RotFlip::R0F0),
            t(4, RotFlip::R0F0),
        );
        let flipped = rule.transformed(Symmetry::FlipVertical);
        assert_eq!(flipped.left1, t(1, RotFlip::R3F1));
        assert_eq!(flipped.left2, t(2, RotFlip::R2F1));
    }

    #[test]
    fn test_every_variant_is_an_involution() {
        let rule = OverrideRule::new(
            t(7, RotFlip::R1F1),
            t(8, RotFlip::R2F0),
            t(9, RotFlip::R3F0),
            t(10, RotFlip::R0F1),
        );
        for symmetry in Symmetry::ALL {
            assert_eq!(rule.transformed(symmetry).transformed(symmetry), rule);
        }
    }

    #[test]
    fn test_accepts_treats_empty_as_wildcard() {
        let rule = OverrideRule::new(
            t(1, RotFlip::R0F0),
            Tile::EMPTY,
            t(2, RotFlip::R0F0),
            Tile::EMPTY,
        );
        assert!(rule.accepts(&t(1, RotFlip::R0F0), &t(0, RotFlip::R3F1)));
        assert!(!rule.accepts(&t(1, RotFlip::R1F0), &t(0, RotFlip::R3F1)));
    }
}
