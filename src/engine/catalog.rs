//! Surrogate tiles used to bridge pairs that have no direct rule

use serde::{Deserialize, Serialize};

use crate::network::rotflip::RotFlip;
use crate::network::tile::Tile;

/// One network type's canonical pieces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurrogateEntry {
    pub network: String,
    /// Id of the straight orthogonal piece
    pub orthogonal: u32,
    /// The two halves of a diagonal piece, in their east-facing orientation
    #[serde(default)]
    pub diagonal: Option<[Tile; 2]>,
}

impl SurrogateEntry {
    pub fn new(network: &str, orthogonal: u32) -> Self {
        Self {
            network: network.to_string(),
            orthogonal,
            diagonal: None,
        }
    }

    pub fn with_diagonal(mut self, first: Tile, second: Tile) -> Self {
        self.diagonal = Some([first, second]);
        self
    }
}

/// Ordered catalog of surrogate pieces. Entries are tried in order and the
/// first working bridge wins, so the order is part of the behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurrogateCatalog {
    entries: Vec<SurrogateEntry>,
}

impl Default for SurrogateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SurrogateCatalog {
    pub fn new(entries: Vec<SurrogateEntry>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Road, rail, street, one-way road and avenue pieces
    pub fn builtin() -> Self {
        Self::new(vec![
            SurrogateEntry::new("road", 0x0000_4B00).with_diagonal(
                Tile::new(0x0000_0A00, RotFlip::R1F0),
                Tile::new(0x0000_0A10, RotFlip::R3F0),
            ),
            SurrogateEntry::new("rail", 0x5D54_0000).with_diagonal(
                Tile::new(0x5D54_0100, RotFlip::R1F0),
                Tile::new(0x5D54_0110, RotFlip::R3F0),
            ),
            SurrogateEntry::new("street", 0x5F94_0300).with_diagonal(
                Tile::new(0x5F94_0400, RotFlip::R1F0),
                Tile::new(0x5F94_0410, RotFlip::R3F0),
            ),
            SurrogateEntry::new("one_way_road", 0x0900_4B00).with_diagonal(
                Tile::new(0x0900_0A00, RotFlip::R1F0),
                Tile::new(0x0900_0A10, RotFlip::R3F0),
            ),
            SurrogateEntry::new("avenue", 0x0400_6100),
        ])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SurrogateEntry> + '_ {
        self.entries.iter()
    }

    /// Reject entries that could never take part in a bridge
    pub fn validate(&self) -> Result<(), String> {
        for entry in &self.entries {
            if entry.orthogonal == 0 {
                return Err(format!("surrogate '{}' has an empty orthogonal piece", entry.network));
            }
            if let Some([first, second]) = entry.diagonal {
                if first.is_empty() || second.is_empty() {
                    return Err(format!("surrogate '{}' has an empty diagonal half", entry.network));
                }
                if first.id == second.id {
                    return Err(format!(
                        "surrogate '{}' diagonal halves share id 0x{:08X}",
                        entry.network, first.id
                    ));
                }
            }
        }
        Ok(())
    }
}
