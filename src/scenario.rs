//! Scenario files: a grid's committed occupants plus a batch of changed cells
//!
//! ```toml
//! width = 4
//! height = 3
//!
//! [[occupant]]
//! x = 2
//! z = 1
//! id = 0x5D540000
//! rotation = 1
//! lot = true
//!
//! [[seed]]
//! x = 1
//! z = 1
//! id = 0x5D540000
//! rotation = 1
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::core::error::{EngineError, Result};
use crate::core::types::CellCoord;
use crate::network::rotflip::RotFlip;
use crate::network::tile::{SolvedCell, Tile};
use crate::spatial::NetworkGrid;

/// A piece already committed to the grid
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlacedTile {
    pub x: i32,
    pub z: i32,
    pub id: u32,
    #[serde(default)]
    pub rotation: u8,
    #[serde(default)]
    pub flip: bool,
    #[serde(default)]
    pub immovable: bool,
    #[serde(default)]
    pub lot: bool,
}

/// A newly placed or changed piece handed to the resolver
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedTile {
    pub x: i32,
    pub z: i32,
    pub id: u32,
    #[serde(default)]
    pub rotation: u8,
    #[serde(default)]
    pub flip: bool,
    #[serde(default)]
    pub fixed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    pub width: usize,
    pub height: usize,
    #[serde(rename = "occupant", default)]
    pub occupants: Vec<PlacedTile>,
    #[serde(rename = "seed", default)]
    pub seeds: Vec<SeedTile>,
}

fn make_tile(id: u32, rotation: u8, flip: bool, x: i32, z: i32) -> Result<Tile> {
    if rotation > 3 {
        return Err(EngineError::InvalidScenario(format!(
            "rotation {} at ({},{}) out of range 0..=3",
            rotation, x, z
        )));
    }
    Ok(Tile::new(id, RotFlip::new(rotation, flip)))
}

impl Scenario {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(text)?;
        if scenario.width == 0 || scenario.height == 0 {
            return Err(EngineError::InvalidScenario(format!(
                "grid must not be empty ({}x{})",
                scenario.width, scenario.height
            )));
        }
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let scenario = Self::from_toml_str(&text)?;
        tracing::info!(
            "Loaded scenario {} ({}x{}, {} occupants, {} seeds)",
            path.display(),
            scenario.width,
            scenario.height,
            scenario.occupants.len(),
            scenario.seeds.len()
        );
        Ok(scenario)
    }

    /// Grid holding the committed occupants
    pub fn grid(&self) -> Result<NetworkGrid> {
        let mut grid = NetworkGrid::new(self.width, self.height);
        for placed in &self.occupants {
            let coord = CellCoord::new(placed.x, placed.z);
            let tile = make_tile(placed.id, placed.rotation, placed.flip, placed.x, placed.z)?;
            if !grid.set_occupant(coord, Some(tile)) {
                return Err(EngineError::InvalidScenario(format!(
                    "occupant at {} lies outside the {}x{} grid",
                    coord, self.width, self.height
                )));
            }
            grid.set_immovable(coord, placed.immovable);
            grid.set_lot(coord, placed.lot);
        }
        Ok(grid)
    }

    /// The batch to resolve, in file order
    pub fn seeds(&self) -> Result<Vec<SolvedCell>> {
        self.seeds
            .iter()
            .map(|seed| {
                let tile = make_tile(seed.id, seed.rotation, seed.flip, seed.x, seed.z)?;
                let position = CellCoord::new(seed.x, seed.z);
                Ok(if seed.fixed {
                    SolvedCell::fixed(tile, position)
                } else {
                    SolvedCell::new(tile, position)
                })
            })
            .collect()
    }
}
