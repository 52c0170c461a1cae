//! Game board state: a 10×10 grid of spots plus the ships placed on it.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::common::{BoardError, ShotOutcome};
use crate::config::{COLS, MAX_SPACE, PLACEMENT_ATTEMPTS, ROWS};
use crate::coord::{format_row, random_start, Coordinate, Direction};
use crate::ship::{Orientation, PlacedShip, Ship};

/// One cell of a board.
///
/// `ship` is an index into the owning board's placed ships, never a live
/// reference; the placement owns the footprint, the spot only points back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spot {
    coord: Coordinate,
    ship: Option<usize>,
    shot_outcome: Option<ShotOutcome>,
}

impl Spot {
    fn new(coord: Coordinate) -> Self {
        Self {
            coord,
            ship: None,
            shot_outcome: None,
        }
    }

    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    /// Index of the occupying ship in [`Board::placed_ships`].
    pub fn ship_index(&self) -> Option<usize> {
        self.ship
    }

    pub fn shot_outcome(&self) -> Option<ShotOutcome> {
        self.shot_outcome
    }

    pub fn is_shot(&self) -> bool {
        self.shot_outcome.is_some()
    }

    fn shot_char(&self) -> char {
        match self.shot_outcome {
            Some(ShotOutcome::Hit) => 'X',
            Some(ShotOutcome::Miss) => 'o',
            None => ' ',
        }
    }
}

/// What a call to [`Board::shoot`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotReport {
    pub coord: Coordinate,
    pub outcome: ShotOutcome,
    /// The ship this shot sank, if it hit that ship's last intact cell.
    pub sunk: Option<PlacedShip>,
}

impl ShotReport {
    pub fn hit(&self) -> bool {
        self.outcome.is_hit()
    }
}

/// Main board state: spots, ship placements, hits and misses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BoardRecord", try_from = "BoardRecord")]
pub struct Board {
    spots: [[Spot; COLS]; ROWS],
    placed_ships: Vec<PlacedShip>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board (no ships, no shots).
    pub fn new() -> Self {
        let spots = core::array::from_fn(|row| {
            core::array::from_fn(|col| Spot::new(Coordinate::at(row, col)))
        });
        Board {
            spots,
            placed_ships: Vec::new(),
        }
    }

    pub fn spot(&self, coord: Coordinate) -> &Spot {
        &self.spots[coord.row()][coord.col()]
    }

    fn spot_mut(&mut self, coord: Coordinate) -> &mut Spot {
        &mut self.spots[coord.row()][coord.col()]
    }

    /// Ships placed so far, in placement order.
    pub fn placed_ships(&self) -> &[PlacedShip] {
        &self.placed_ships
    }

    /// The ship covering `coord`, if any.
    pub fn ship_at(&self, coord: Coordinate) -> Option<&PlacedShip> {
        self.spot(coord).ship.and_then(|i| self.placed_ships.get(i))
    }

    /// Place `ship` starting at `start`. Nothing changes on failure.
    pub fn place(
        &mut self,
        ship: Ship,
        start: Coordinate,
        orientation: Orientation,
    ) -> Result<&PlacedShip, BoardError> {
        let placed = PlacedShip::new(ship, start, orientation)?;
        self.place_ship(placed)
    }

    /// Add an already built placement, rejecting overlap with existing ships.
    pub fn place_ship(&mut self, placed: PlacedShip) -> Result<&PlacedShip, BoardError> {
        if self.placed_ships.iter().any(|p| p.overlaps(&placed)) {
            return Err(BoardError::ShipOverlaps);
        }
        let index = self.placed_ships.len();
        for &cell in placed.cells() {
            self.spot_mut(cell).ship = Some(index);
        }
        self.placed_ships.push(placed);
        Ok(&self.placed_ships[index])
    }

    /// Place `ship` at a random legal position, retrying on overlap.
    pub fn place_random<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        ship: Ship,
    ) -> Result<PlacedShip, BoardError> {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let (start, orientation) = random_start(rng, ship.size());
            match self.place(ship, start, orientation) {
                Ok(placed) => return Ok(placed.clone()),
                Err(BoardError::ShipOverlaps) => continue,
                Err(e) => return Err(e),
            }
        }
        log::warn!("gave up placing {} after {} attempts", ship, PLACEMENT_ATTEMPTS);
        Err(BoardError::UnableToPlaceShip(ship))
    }

    /// Cells of `placed` not shot yet.
    pub fn unshot_ship_coords(&self, placed: &PlacedShip) -> Vec<Coordinate> {
        placed
            .cells()
            .iter()
            .copied()
            .filter(|c| !self.spot(*c).is_shot())
            .collect()
    }

    /// Returns `true` when every cell of `placed` has been shot.
    pub fn is_sunk(&self, placed: &PlacedShip) -> bool {
        placed.cells().iter().all(|c| self.spot(*c).is_shot())
    }

    fn remaining_cells(&self, index: usize) -> usize {
        self.placed_ships
            .get(index)
            .map_or(0, |p| p.cells().iter().filter(|c| !self.spot(**c).is_shot()).count())
    }

    /// Shoot at `coord`.
    ///
    /// With `outcome` given it is recorded verbatim (replaying a shot someone
    /// else resolved); otherwise the spot is a hit iff a ship covers it. A spot
    /// that was already shot is left alone and its original outcome reported.
    pub fn shoot(&mut self, coord: Coordinate, outcome: Option<ShotOutcome>) -> ShotReport {
        let spot = *self.spot(coord);
        if let Some(existing) = spot.shot_outcome {
            return ShotReport {
                coord,
                outcome: existing,
                sunk: None,
            };
        }
        let before = spot.ship.map_or(0, |i| self.remaining_cells(i));
        let outcome = outcome.unwrap_or(if spot.ship.is_some() {
            ShotOutcome::Hit
        } else {
            ShotOutcome::Miss
        });
        self.spot_mut(coord).shot_outcome = Some(outcome);

        let sunk = match spot.ship {
            Some(i) if before > 0 && self.remaining_cells(i) == 0 => {
                self.placed_ships.get(i).cloned()
            }
            _ => None,
        };
        ShotReport {
            coord,
            outcome,
            sunk,
        }
    }

    /// Count contiguous unshot cells from one step past `coord` in `dir`,
    /// capped at [`MAX_SPACE`].
    pub fn find_space(&self, coord: Coordinate, dir: Direction) -> usize {
        self.list_space_coords(coord, dir, MAX_SPACE).len()
    }

    /// The cells [`Board::find_space`] walks over, at most `max_width` of them.
    pub fn list_space_coords(
        &self,
        coord: Coordinate,
        dir: Direction,
        max_width: usize,
    ) -> Vec<Coordinate> {
        let mut spaces = Vec::new();
        let mut next = coord.step(dir);
        while let Some(c) = next {
            if spaces.len() >= max_width || self.spot(c).is_shot() {
                break;
            }
            spaces.push(c);
            next = c.step(dir);
        }
        spaces
    }

    pub fn vertical_room(&self, coord: Coordinate) -> usize {
        self.find_space(coord, Direction::Up) + self.find_space(coord, Direction::Down)
    }

    pub fn horizontal_room(&self, coord: Coordinate) -> usize {
        self.find_space(coord, Direction::Left) + self.find_space(coord, Direction::Right)
    }

    /// Spots matching `predicate`, in row-major order.
    pub fn search_spots<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Spot> + 'a
    where
        P: Fn(&Spot) -> bool + 'a,
    {
        self.spots.iter().flatten().filter(move |s| predicate(s))
    }

    /// Every coordinate never shot, in row-major order.
    pub fn unshot_spots(&self) -> Vec<Coordinate> {
        self.search_spots(|s| !s.is_shot()).map(Spot::coord).collect()
    }

    /// Returns `true` while at least one placed ship still has an intact cell.
    pub fn has_alive_ships(&self) -> bool {
        self.placed_ships.iter().any(|p| !self.is_sunk(p))
    }

    fn ship_char(&self, spot: &Spot) -> char {
        match self.ship_at(spot.coord) {
            Some(placed) if spot.is_shot() => placed.ship().symbol().to_ascii_lowercase(),
            Some(placed) => placed.ship().symbol(),
            None => ' ',
        }
    }

    /// One rendered row of shot marks.
    pub fn shot_row(&self, row: usize) -> String {
        self.spots[row].iter().map(Spot::shot_char).collect()
    }

    /// One rendered row of ship symbols, lowercase where shot.
    pub fn ship_row(&self, row: usize) -> String {
        self.spots[row].iter().map(|s| self.ship_char(s)).collect()
    }

    /// Grid of `X` (hit) and `o` (miss) marks.
    pub fn render_shots(&self) -> String {
        render_grid(|row| self.shot_row(row))
    }

    /// Grid of ship symbols.
    pub fn render_ships(&self) -> String {
        render_grid(|row| self.ship_row(row))
    }

    /// Persistable snapshot of this board.
    pub fn to_record(&self) -> BoardRecord {
        BoardRecord {
            spots: self
                .spots
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|s| SpotRecord {
                            row: s.coord.row(),
                            col: s.coord.col(),
                            shot_outcome: s.shot_outcome,
                        })
                        .collect()
                })
                .collect(),
            placed_ships: self
                .placed_ships
                .iter()
                .map(|p| PlacedShipRecord {
                    ship: p.ship(),
                    start_coord: p.start(),
                    orientation: p.orientation(),
                })
                .collect(),
        }
    }

    /// Rebuild a board from a snapshot, re-linking spots to their ships.
    pub fn from_record(record: &BoardRecord) -> Result<Self, BoardError> {
        if record.spots.len() != ROWS {
            return Err(BoardError::MalformedRecord(format!(
                "expected {} rows, found {}",
                ROWS,
                record.spots.len()
            )));
        }
        let mut board = Board::new();
        for (r, row) in record.spots.iter().enumerate() {
            if row.len() != COLS {
                return Err(BoardError::MalformedRecord(format!(
                    "row {} has {} spots, expected {}",
                    format_row(r),
                    row.len(),
                    COLS
                )));
            }
            for (c, spot) in row.iter().enumerate() {
                if spot.row != r || spot.col != c {
                    return Err(BoardError::MalformedRecord(format!(
                        "spot ({}, {}) stored at ({}, {})",
                        spot.row, spot.col, r, c
                    )));
                }
                board.spots[r][c].shot_outcome = spot.shot_outcome;
            }
        }
        for placed in &record.placed_ships {
            board.place(placed.ship, placed.start_coord, placed.orientation)?;
        }
        Ok(board)
    }
}

fn render_grid<F: Fn(usize) -> String>(row_text: F) -> String {
    let bar: String = "-".repeat(COLS);
    let col_ids: String = (1..=COLS)
        .map(|i| char::from_digit((i % 10) as u32, 10).unwrap_or('?'))
        .collect();
    let sep = format!(" +{}+", bar);
    let mut lines = vec![format!("  {} ", col_ids), sep.clone()];
    for row in 0..ROWS {
        lines.push(format!("{}|{}|", format_row(row), row_text(row)));
    }
    lines.push(sep);
    lines.join("\n")
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_ships())
    }
}

/// Persisted form of a [`Spot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotRecord {
    pub row: usize,
    pub col: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_outcome: Option<ShotOutcome>,
}

/// Persisted form of a [`PlacedShip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedShipRecord {
    pub ship: Ship,
    pub start_coord: Coordinate,
    pub orientation: Orientation,
}

/// Persisted form of a [`Board`]: `{spots: [[...]], placed_ships: [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    pub spots: Vec<Vec<SpotRecord>>,
    pub placed_ships: Vec<PlacedShipRecord>,
}

impl From<Board> for BoardRecord {
    fn from(board: Board) -> Self {
        board.to_record()
    }
}

impl TryFrom<BoardRecord> for Board {
    type Error = BoardError;

    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        Board::from_record(&record)
    }
}
