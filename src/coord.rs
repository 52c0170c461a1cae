//! Board coordinates, their `A1`..`J10` text form, and direction vectors.

use core::fmt;
use core::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::common::CoordError;
use crate::config::{COLS, ROWS};
use crate::ship::Orientation;

/// A (row, column) cell on the board. Rows print as letters, columns as
/// 1-based numbers. Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    row: usize,
    col: usize,
}

impl Coordinate {
    /// Build a coordinate, rejecting anything outside the board.
    pub fn new(row: usize, col: usize) -> Result<Self, CoordError> {
        if row >= ROWS || col >= COLS {
            return Err(CoordError::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    /// Caller guarantees the pair is on the board.
    pub(crate) fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// The neighbouring cell one step in `dir`, or `None` at the board edge.
    pub fn step(&self, dir: Direction) -> Option<Coordinate> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Coordinate::new(row, col).ok()
    }

    /// Iterate over every coordinate of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..ROWS).flat_map(|row| (0..COLS).map(move |col| Coordinate::at(row, col)))
    }
}

/// Letter label of a row.
pub fn format_row(row: usize) -> char {
    (b'A' + row as u8) as char
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_row(self.row), self.col + 1)
    }
}

impl FromStr for Coordinate {
    type Err = CoordError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordError::Malformed(text.to_string());
        let mut chars = text.chars();
        let letter = chars.next().ok_or_else(malformed)?;
        if !('A'..='J').contains(&letter) {
            return Err(malformed());
        }
        let digits = chars.as_str();
        // one or two digits, no sign and no leading zero
        if digits.is_empty()
            || digits.len() > 2
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }
        let number: usize = digits.parse().map_err(|_| malformed())?;
        if number > COLS {
            return Err(malformed());
        }
        Coordinate::new(letter as usize - 'A' as usize, number - 1)
    }
}

impl TryFrom<String> for Coordinate {
    type Error = CoordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Coordinate> for String {
    fn from(coord: Coordinate) -> Self {
        coord.to_string()
    }
}

/// Parse text into a `(row, col)` pair.
pub fn parse_coord(text: &str) -> Result<(usize, usize), CoordError> {
    let coord: Coordinate = text.parse()?;
    Ok((coord.row, coord.col))
}

/// Format a `(row, col)` pair as text.
pub fn format_coord(row: usize, col: usize) -> Result<String, CoordError> {
    Ok(Coordinate::new(row, col)?.to_string())
}

/// Uniformly random coordinate with `row < max_row` and `col < max_col`.
/// Both limits are clamped to the board.
pub fn rand_coord<R: Rng + ?Sized>(rng: &mut R, max_row: usize, max_col: usize) -> Coordinate {
    let row = rng.random_range(0..max_row.clamp(1, ROWS));
    let col = rng.random_range(0..max_col.clamp(1, COLS));
    Coordinate::at(row, col)
}

/// The `width` contiguous cells starting at `start` in `orientation`.
pub fn coord_range(
    width: usize,
    start: Coordinate,
    orientation: Orientation,
) -> Result<Vec<Coordinate>, CoordError> {
    (0..width)
        .map(|i| match orientation {
            Orientation::Horizontal => Coordinate::new(start.row, start.col + i),
            Orientation::Vertical => Coordinate::new(start.row + i, start.col),
        })
        .collect()
}

/// A random start cell and orientation from which a ship of `width` cells
/// stays on the board.
pub fn random_start<R: Rng + ?Sized>(rng: &mut R, width: usize) -> (Coordinate, Orientation) {
    let orientation = if rng.random() {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };
    let start = match orientation {
        Orientation::Vertical => rand_coord(rng, ROWS + 1 - width.min(ROWS), COLS),
        Orientation::Horizontal => rand_coord(rng, ROWS, COLS + 1 - width.min(COLS)),
    };
    (start, orientation)
}

/// One of the four axis-aligned directions on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Every direction, in the order the hunting player probes them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(row, col)` step for one move in this direction.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Position of this direction in [`Direction::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}
