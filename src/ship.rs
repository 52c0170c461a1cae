//! Ship catalog, orientation, and ships bound to a board position.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::BoardError;
use crate::coord::{coord_range, Coordinate};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Extends along increasing column.
    Horizontal,
    /// Extends along increasing row.
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five classic ship kinds. Every player places exactly one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ship {
    Destroyer,
    Cruiser,
    Submarine,
    Battleship,
    Carrier,
}

/// Number of ship kinds in a fleet.
pub const NUM_SHIPS: usize = 5;

impl Ship {
    /// The whole fleet, in placement order.
    pub const ALL: [Ship; NUM_SHIPS] = [
        Ship::Destroyer,
        Ship::Cruiser,
        Ship::Submarine,
        Ship::Battleship,
        Ship::Carrier,
    ];

    /// Number of cells the ship covers.
    pub fn size(&self) -> usize {
        match self {
            Ship::Destroyer => 2,
            Ship::Cruiser => 3,
            Ship::Submarine => 3,
            Ship::Battleship => 4,
            Ship::Carrier => 5,
        }
    }

    /// Single-letter symbol used when rendering ships.
    pub fn symbol(&self) -> char {
        match self {
            Ship::Destroyer => 'D',
            Ship::Cruiser => 'C',
            Ship::Submarine => 'S',
            Ship::Battleship => 'B',
            Ship::Carrier => 'A',
        }
    }

    /// Lowercase wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Ship::Destroyer => "destroyer",
            Ship::Cruiser => "cruiser",
            Ship::Submarine => "submarine",
            Ship::Battleship => "battleship",
            Ship::Carrier => "carrier",
        }
    }

    /// Position of this kind in [`Ship::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ship {
    type Err = BoardError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ship::ALL
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| BoardError::UnknownShip(name.to_string()))
    }
}

/// A ship bound to a start cell and orientation, with the cells it covers.
#[derive(Debug, Clone, Eq)]
pub struct PlacedShip {
    ship: Ship,
    start: Coordinate,
    orientation: Orientation,
    cells: Vec<Coordinate>,
}

impl PlacedShip {
    /// Compute the footprint of `ship` at `start`; fails if it leaves the board.
    pub fn new(ship: Ship, start: Coordinate, orientation: Orientation) -> Result<Self, BoardError> {
        let cells = coord_range(ship.size(), start, orientation)
            .map_err(|_| BoardError::ShipOutOfBounds)?;
        Ok(Self {
            ship,
            start,
            orientation,
            cells,
        })
    }

    pub fn ship(&self) -> Ship {
        self.ship
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Covered cells, starting at `start`.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.cells.contains(&coord)
    }

    /// True when the two footprints share at least one cell.
    pub fn overlaps(&self, other: &PlacedShip) -> bool {
        self.cells.iter().any(|c| other.contains(*c))
    }
}

impl PartialEq for PlacedShip {
    fn eq(&self, other: &Self) -> bool {
        self.ship == other.ship && self.start == other.start && self.orientation == other.orientation
    }
}

impl fmt::Display for PlacedShip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} ({})", self.ship, self.start, self.orientation)
    }
}
