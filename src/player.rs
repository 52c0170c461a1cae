use core::fmt;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::Board;
use crate::common::{BoardError, ShotOutcome};
use crate::coord::Coordinate;
use crate::ship::Ship;

/// Final result as seen by one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    Won,
    Lost,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Outcome::Playing => "playing",
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        };
        f.write_str(name)
    }
}

/// Strategy hooks implemented by different player types. Message handling
/// around them lives in [`crate::PlayerNode`].
pub trait Player: Send {
    /// Place the whole fleet onto the provided home board.
    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError>;

    /// Choose the next coordinate to fire at, given our own shot history.
    /// `None` means nothing is left to shoot.
    fn select_target(&mut self, rng: &mut SmallRng, target: &Board) -> Option<Coordinate>;

    /// Inform the player of the result of its last shot. `target` already
    /// carries the new mark.
    fn handle_shot_feedback(
        &mut self,
        _target: &Board,
        _coord: Coordinate,
        _outcome: ShotOutcome,
        _sunk: Option<Ship>,
    ) {
    }

    /// Inform the player how the game ended.
    fn handle_outcome(&mut self, _outcome: Outcome) {}
}

/// Randomly place one of every ship kind, in catalog order.
pub fn place_fleet<R: Rng + ?Sized>(rng: &mut R, board: &mut Board) -> Result<(), BoardError> {
    for ship in Ship::ALL {
        board.place_random(rng, ship)?;
    }
    Ok(())
}
