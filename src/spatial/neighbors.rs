//! Eight-way neighborhood on a row-major rectangular grid
//!
//! Direction order is part of the learned model layout and of the propagation
//! order, so it must stay fixed for seeded runs to be reproducible.

/// Compass direction from a cell to one of its eight neighbors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Same row, one column left
    West,
    /// One row up, one column left
    NorthWest,
    /// One row up
    North,
    /// One row up, one column right
    NorthEast,
    /// Same row, one column right
    East,
    /// One row down, one column right
    SouthEast,
    /// One row down
    South,
    /// One row down, one column left
    SouthWest,
}

impl Direction {
    /// Number of directions
    pub const COUNT: usize = 8;

    /// All directions, clockwise from west
    pub const ALL: [Self; Self::COUNT] = [
        Self::West,
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
    ];

    /// Position of this direction in [`Direction::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::West => 0,
            Self::NorthWest => 1,
            Self::North => 2,
            Self::NorthEast => 3,
            Self::East => 4,
            Self::SouthEast => 5,
            Self::South => 6,
            Self::SouthWest => 7,
        }
    }

    /// Column and row step `(dx, dy)`, with rows growing downwards
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
        }
    }

    /// Short compass label used in summaries
    pub const fn label(self) -> &'static str {
        match self {
            Self::West => "W",
            Self::NorthWest => "NW",
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
        }
    }
}

/// Row-major index of the neighbor of `index` in `direction`
///
/// Returns `None` when the neighbor would fall outside the grid; rows never
/// wrap into each other.
pub const fn neighbor_index(
    index: usize,
    width: usize,
    height: usize,
    direction: Direction,
) -> Option<usize> {
    let Some(cells) = width.checked_mul(height) else {
        return None;
    };
    if width == 0 || index >= cells {
        return None;
    }
    let row = index / width;
    let col = index % width;
    let (dx, dy) = direction.offset();

    let Some(next_col) = col.checked_add_signed(dx) else {
        return None;
    };
    let Some(next_row) = row.checked_add_signed(dy) else {
        return None;
    };
    if next_col >= width || next_row >= height {
        return None;
    }
    Some(next_row * width + next_col)
}

/// Valid neighbors of `index` in [`Direction::ALL`] order
pub fn neighbors(
    index: usize,
    width: usize,
    height: usize,
) -> impl Iterator<Item = (Direction, usize)> {
    Direction::ALL.into_iter().filter_map(move |direction| {
        neighbor_index(index, width, height, direction).map(|neighbor| (direction, neighbor))
    })
}
