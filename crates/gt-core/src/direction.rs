//! Cardinal directions.
//!
//! Variant order matches the MiniGrid convention (`0 = East`, `1 = South`,
//! `2 = West`, `3 = North`) so grid agents can store a direction index and
//! convert losslessly.  Coordinates are screen coordinates: `y` grows
//! southwards.

/// One of the four cardinal directions of travel.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    East,
    South,
    West,
    North,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    /// MiniGrid direction index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`](Self::index), wrapping modulo 4.
    #[inline]
    pub fn from_index(i: usize) -> Direction {
        Self::ALL[i % 4]
    }

    /// Unit step `(dx, dy)` in screen coordinates.
    #[inline]
    pub fn unit(self) -> (i64, i64) {
        match self {
            Direction::East  => (1, 0),
            Direction::South => (0, 1),
            Direction::West  => (-1, 0),
            Direction::North => (0, -1),
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        Self::from_index(self.index() + 2)
    }

    /// Direction after a quarter turn counter-clockwise (as seen on screen).
    #[inline]
    pub fn left(self) -> Direction {
        Self::from_index(self.index() + 3)
    }

    /// Direction after a quarter turn clockwise (as seen on screen).
    #[inline]
    pub fn right(self) -> Direction {
        Self::from_index(self.index() + 1)
    }

    /// `true` for East/West travel.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// `true` when travel increases the coordinate on its axis (East, South).
    #[inline]
    pub fn is_positive(self) -> bool {
        matches!(self, Direction::East | Direction::South)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::East  => "east",
            Direction::South => "south",
            Direction::West  => "west",
            Direction::North => "north",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
