//! Network tiles and working-set cells

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::CellCoord;
use crate::network::rotflip::RotFlip;

/// A placed network piece: id plus orientation.
///
/// Id 0 is the empty tile; its orientation never takes part in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "TileSpec", into = "TileSpec")]
pub struct Tile {
    pub id: u32,
    pub rf: RotFlip,
}

impl Tile {
    pub const EMPTY: Tile = Tile {
        id: 0,
        rf: RotFlip::R0F0,
    };

    pub fn new(id: u32, rf: RotFlip) -> Self {
        Self { id, rf }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.id == 0
    }

    /// Orientation comparison that treats the empty tile as a wildcard
    pub fn matches(&self, other: &Tile) -> bool {
        self.id == other.id && (self.id == 0 || self.rf == other.rf)
    }

    /// Same id, orientation replaced
    pub fn with_rf(self, rf: RotFlip) -> Self {
        Self { id: self.id, rf }
    }

    fn with_id_zero(self) -> Self {
        Self { id: 0, rf: self.rf }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:08X},{},{}",
            self.id,
            self.rf.rotation(),
            self.rf.is_flipped() as u8
        )
    }
}

/// Serialized form of a tile as written in config and scenario files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpec {
    pub id: u32,
    #[serde(default)]
    pub rotation: u8,
    #[serde(default)]
    pub flip: bool,
}

impl TryFrom<TileSpec> for Tile {
    type Error = String;

    fn try_from(spec: TileSpec) -> Result<Self, Self::Error> {
        if spec.rotation > 3 {
            return Err(format!(
                "tile 0x{:08X}: rotation {} out of range 0..=3",
                spec.id, spec.rotation
            ));
        }
        Ok(Tile::new(spec.id, RotFlip::new(spec.rotation, spec.flip)))
    }
}

impl From<Tile> for TileSpec {
    fn from(tile: Tile) -> Self {
        Self {
            id: tile.id,
            rotation: tile.rf.rotation(),
            flip: tile.rf.is_flipped(),
        }
    }
}

/// One grid cell's current hypothesis during a resolution run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvedCell {
    pub tile: Tile,
    pub position: CellCoord,
    /// Immovable pieces and network lots: matched as the empty tile, never rewritten
    #[serde(default)]
    pub fixed: bool,
}

impl SolvedCell {
    pub fn new(tile: Tile, position: CellCoord) -> Self {
        Self {
            tile,
            position,
            fixed: false,
        }
    }

    pub fn fixed(tile: Tile, position: CellCoord) -> Self {
        Self {
            tile,
            position,
            fixed: true,
        }
    }

    /// Tile as seen by the matcher
    pub fn match_tile(&self) -> Tile {
        if self.fixed {
            self.tile.with_id_zero()
        } else {
            self.tile
        }
    }

    /// Store a matcher result; returns whether the cell changed
    pub fn apply(&mut self, tile: Tile) -> bool {
        if self.fixed || self.tile == tile {
            return false;
        }
        self.tile = tile;
        true
    }
}

impl fmt::Display for SolvedCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tile, self.position)
    }
}
