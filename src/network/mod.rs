//! Network tile primitives: orientations, directions, tiles

pub mod direction;
pub mod rotflip;
pub mod tile;

pub use direction::Direction;
pub use rotflip::RotFlip;
pub use tile::{SolvedCell, Tile, TileSpec};
