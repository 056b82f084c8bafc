//! Tile orientations as the dihedral group of the square
//!
//! An orientation is a quarter-turn rotation plus an optional mirror. The byte
//! encoding used in rule files keeps the rotation in bits 0-1 and the mirror in
//! bit 7; internally the two parts are stored separately.
//!
//! Rotating a mirrored tile turns it the other way, so `rotate` subtracts the
//! step for flipped orientations. `compose(x, y)` applies `y` after `x`; every
//! transformation of the world acts on a tile orientation by composing on the right.

use std::fmt;

use crate::network::direction::Direction;

/// One of the 8 tile orientations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RotFlip {
    rotation: u8,
    flipped: bool,
}

impl RotFlip {
    pub const R0F0: RotFlip = RotFlip::new(0, false);
    pub const R1F0: RotFlip = RotFlip::new(1, false);
    pub const R2F0: RotFlip = RotFlip::new(2, false);
    pub const R3F0: RotFlip = RotFlip::new(3, false);
    pub const R0F1: RotFlip = RotFlip::new(0, true);
    pub const R1F1: RotFlip = RotFlip::new(1, true);
    pub const R2F1: RotFlip = RotFlip::new(2, true);
    pub const R3F1: RotFlip = RotFlip::new(3, true);

    pub const IDENTITY: RotFlip = RotFlip::R0F0;

    pub const ALL: [RotFlip; 8] = [
        RotFlip::R0F0,
        RotFlip::R1F0,
        RotFlip::R2F0,
        RotFlip::R3F0,
        RotFlip::R0F1,
        RotFlip::R1F1,
        RotFlip::R2F1,
        RotFlip::R3F1,
    ];

    /// Rotation is taken modulo 4
    pub const fn new(rotation: u8, flipped: bool) -> Self {
        Self {
            rotation: rotation & 3,
            flipped,
        }
    }

    #[inline]
    pub fn rotation(self) -> u8 {
        self.rotation
    }

    #[inline]
    pub fn is_flipped(self) -> bool {
        self.flipped
    }

    /// Rotate by `quarter_turns`; flipped orientations turn backwards
    pub fn rotate(self, quarter_turns: u8) -> Self {
        let step = quarter_turns & 3;
        let step = if self.flipped { (4 - step) & 3 } else { step };
        Self::new(self.rotation + step, self.flipped)
    }

    /// Group product: `self` followed by `other`
    pub fn compose(self, other: Self) -> Self {
        let rotated = self.rotate(other.rotation);
        Self::new(rotated.rotation, rotated.flipped ^ other.flipped)
    }

    pub fn invert(self) -> Self {
        if self.flipped {
            // Every mirror is its own inverse
            self
        } else {
            Self::new(4 - self.rotation, false)
        }
    }

    pub fn rotate180(self) -> Self {
        Self::new(self.rotation + 2, self.flipped)
    }

    /// Mirror west and east
    pub fn flip_horizontally(self) -> Self {
        Self::new(self.rotation, !self.flipped)
    }

    /// Mirror north and south
    pub fn flip_vertically(self) -> Self {
        Self::new(self.rotation + 2, !self.flipped)
    }

    /// Re-express an orientation written for the East frame in the frame of `dir`
    pub fn relative_to_absolute(self, dir: Direction) -> Self {
        self.rotate(dir.index() + 2)
    }

    /// Inverse of [`RotFlip::relative_to_absolute`]
    pub fn absolute_to_relative(self, dir: Direction) -> Self {
        self.rotate(6 - dir.index())
    }

    /// Packed byte form (rotation in bits 0-1, mirror in bit 7)
    pub fn to_bits(self) -> u8 {
        self.rotation | ((self.flipped as u8) << 7)
    }

    /// Unpack the byte form; any other bit set is rejected
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits & !0x83 != 0 {
            return None;
        }
        Some(Self::new(bits & 3, bits & 0x80 != 0))
    }

    /// Index 0..8 used by the equivalence tables.
    ///
    /// R1F1 and R3F1 are swapped relative to the natural order.
    pub fn ordinal(self) -> usize {
        const FLIPPED: [usize; 4] = [4, 7, 6, 5];
        if self.flipped {
            FLIPPED[self.rotation as usize]
        } else {
            self.rotation as usize
        }
    }
}

impl fmt::Display for RotFlip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}F{}", self.rotation, self.flipped as u8)
    }
}
