//! Cardinal adjacency directions on the tile grid
//!
//! Indices follow the override-rule convention: West=0, North=1, East=2, South=3.
//! Rules are written for the East direction, so East is the canonical frame.

use serde::{Deserialize, Serialize};

use crate::core::types::CellCoord;

/// One of the 4 cardinal directions between edge-adjacent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    West = 0,
    North = 1,
    East = 2,
    South = 3,
}

const NEXT_X: [i32; 4] = [-1, 0, 1, 0];
const NEXT_Z: [i32; 4] = [0, -1, 0, 1];

impl Direction {
    /// All directions in scan order
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::North,
        Direction::East,
        Direction::South,
    ];

    /// Direction for an index, taken modulo 4
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index & 3) as usize]
    }

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Get the grid offset for this direction
    pub fn offset(self) -> (i32, i32) {
        (NEXT_X[self as usize], NEXT_Z[self as usize])
    }

    /// Neighbouring coordinate in this direction (unbounded)
    pub fn step(self, from: CellCoord) -> CellCoord {
        let (dx, dz) = self.offset();
        from.offset(dx, dz)
    }

    /// Get opposite direction
    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Next direction a quarter-turn clockwise (West -> North -> East -> South)
    pub fn clockwise(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn counter_clockwise(self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::West => "West",
            Direction::North => "North",
            Direction::East => "East",
            Direction::South => "South",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::East.opposite(), Direction::West);
        assert_eq!(Direction::North.opposite(), Direction::South);
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_direction_offsets_cancel() {
        let origin = CellCoord::new(10, 10);
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().step(dir.step(origin)), origin);
        }
        assert_eq!(Direction::East.step(origin), CellCoord::new(11, 10));
        assert_eq!(Direction::North.step(origin), CellCoord::new(10, 9));
    }

    #[test]
    fn test_direction_quarter_turns() {
        assert_eq!(Direction::East.clockwise(), Direction::South);
        assert_eq!(Direction::East.counter_clockwise(), Direction::North);
        assert_eq!(Direction::West.counter_clockwise(), Direction::South);
        for dir in Direction::ALL {
            assert_eq!(dir.clockwise().counter_clockwise(), dir);
        }
    }

    #[test]
    fn test_direction_from_index_wraps() {
        assert_eq!(Direction::from_index(6), Direction::East);
        assert_eq!(Direction::from_index(255), Direction::South);
    }
}
