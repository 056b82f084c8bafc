//! Engine configuration with documented constants
//!
//! The budgets here are what guarantee termination of a resolution run, so
//! `validate` refuses any value that would switch them off.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::core::error::{EngineError, Result};
use crate::engine::catalog::SurrogateCatalog;

/// Configuration for the resolver
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === BUDGETS ===
    /// Matches allowed on one cell before the cursor moves on
    ///
    /// Also the floor of the global match budget, so small batches still get
    /// room to settle.
    pub max_repetitions: i32,

    /// Global match budget per seeded cell
    ///
    /// 4 directions, each evaluated from both sides.
    pub matches_per_cell: i32,

    // === BRIDGES ===
    /// Try surrogate chains when no direct rule connects two tiles
    pub bridge_search: bool,

    /// Also try the two-piece diagonal chain
    pub diagonal_bridges: bool,

    /// Surrogate pieces, tried in order
    pub surrogates: SurrogateCatalog,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_repetitions: 100,
            matches_per_cell: 8,

            bridge_search: true,
            diagonal_bridges: true,
            surrogates: SurrogateCatalog::builtin(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Global match budget for a batch of `seeded` cells
    pub fn match_budget(&self, seeded: usize) -> i64 {
        let scaled = (self.matches_per_cell as i64).saturating_mul(seeded as i64);
        scaled.max(self.max_repetitions as i64)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_repetitions <= 0 {
            return Err(format!(
                "max_repetitions ({}) must be positive",
                self.max_repetitions
            ));
        }

        if self.matches_per_cell <= 0 {
            return Err(format!(
                "matches_per_cell ({}) must be positive",
                self.matches_per_cell
            ));
        }

        self.surrogates.validate()
    }

    /// Parse and validate a TOML document; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate().map_err(EngineError::InvalidConfig)?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }
}
