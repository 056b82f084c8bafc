//! RUL2 Engine - tile-adjacency override rules resolved to a fixpoint

pub mod core;
pub mod engine;
pub mod network;
pub mod rules;
pub mod scenario;
pub mod spatial;
