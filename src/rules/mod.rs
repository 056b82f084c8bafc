//! Override rules loaded from RUL2 files

pub mod equivalence;
pub mod loader;
pub mod rule;
pub mod store;

pub use equivalence::RuleKey;
pub use loader::{load_rule_file, load_rule_files, parse_rul2, LoadReport, RuleLoadError};
pub use rule::{OverrideRule, Symmetry};
pub use store::RuleStore;
