//! Override engine: pair matching, surrogate bridges and fixpoint resolution

pub mod bridge;
pub mod catalog;
pub mod matcher;
pub mod resolver;
pub mod working_set;

pub use bridge::BridgeSearch;
pub use catalog::{SurrogateCatalog, SurrogateEntry};
pub use matcher::{MatchResult, TileMatcher};
pub use resolver::{Resolution, ResolveError, ResolveStats, Resolver};
pub use working_set::WorkingSet;
