//! A player's pair of boards: own ships at home, own shots on target.

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardRecord, ShotReport};
use crate::common::{BoardError, ShotOutcome};
use crate::coord::Coordinate;

/// Name plus home board (own fleet, opponent shoots here) and target board
/// (own shots at the opponent, hit/miss marks only, never ships).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "PlayerStateRecord", try_from = "PlayerStateRecord")]
pub struct PlayerState {
    name: String,
    home_board: Board,
    target_board: Board,
}

impl PlayerState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            home_board: Board::new(),
            target_board: Board::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn home_board(&self) -> &Board {
        &self.home_board
    }

    pub fn home_board_mut(&mut self) -> &mut Board {
        &mut self.home_board
    }

    pub fn target_board(&self) -> &Board {
        &self.target_board
    }

    /// Apply an opponent shot to the home board.
    pub fn receive_shot(&mut self, coord: Coordinate) -> ShotReport {
        self.home_board.shoot(coord, None)
    }

    /// Mark the resolved outcome of one of our own shots on the target board.
    pub fn record_shot(&mut self, coord: Coordinate, outcome: ShotOutcome) -> ShotReport {
        self.target_board.shoot(coord, Some(outcome))
    }

    /// Returns `true` while any home ship is still afloat.
    pub fn is_alive(&self) -> bool {
        self.home_board.has_alive_ships()
    }

    /// Ships grid and shots grid side by side, under the player's name.
    pub fn render_both_boards(&self) -> String {
        let ships = self.home_board.render_ships();
        let shots = self.target_board.render_shots();
        let mut out = format!("{}\n", self.name);
        for (left, right) in ships.lines().zip(shots.lines()) {
            out.push_str(&format!("{}    {}\n", left, right));
        }
        out
    }

    pub fn to_record(&self) -> PlayerStateRecord {
        PlayerStateRecord {
            name: self.name.clone(),
            home_board: self.home_board.to_record(),
            target_board: self.target_board.to_record(),
        }
    }

    /// Rebuild from a snapshot. Ships recorded on the target board are rejected.
    pub fn from_record(record: &PlayerStateRecord) -> Result<Self, BoardError> {
        if !record.target_board.placed_ships.is_empty() {
            return Err(BoardError::MalformedRecord(
                "target board must not hold ships".to_string(),
            ));
        }
        Ok(Self {
            name: record.name.clone(),
            home_board: Board::from_record(&record.home_board)?,
            target_board: Board::from_record(&record.target_board)?,
        })
    }
}

/// Persisted form of a [`PlayerState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStateRecord {
    pub name: String,
    pub home_board: BoardRecord,
    pub target_board: BoardRecord,
}

impl From<PlayerState> for PlayerStateRecord {
    fn from(state: PlayerState) -> Self {
        state.to_record()
    }
}

impl TryFrom<PlayerStateRecord> for PlayerState {
    type Error = BoardError;

    fn try_from(record: PlayerStateRecord) -> Result<Self, Self::Error> {
        PlayerState::from_record(&record)
    }
}
