use rand::rngs::SmallRng;

use crate::common::GameError;
use crate::player::{Outcome, Player};
use crate::player_state::PlayerState;
use crate::protocol::{Message, MessageBody, MessageTarget};

/// Drives a [`Player`] strategy from inbound messages.
///
/// The node keeps the player's own view of the game (its [`PlayerState`]),
/// mirrors every relayed shot and feedback onto it, and sends the player's
/// decisions back to the game under the player's name.
pub struct PlayerNode {
    player: Box<dyn Player>,
    state: PlayerState,
    game: Box<dyn MessageTarget>,
    rng: SmallRng,
    outcome: Outcome,
}

impl PlayerNode {
    pub fn new(
        name: impl Into<String>,
        player: Box<dyn Player>,
        game: Box<dyn MessageTarget>,
        rng: SmallRng,
    ) -> Self {
        Self {
            player,
            state: PlayerState::new(name),
            game,
            rng,
            outcome: Outcome::Playing,
        }
    }

    pub fn name(&self) -> &str {
        self.state.name()
    }

    /// This player's local belief about the game.
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Number of shots this player has fired.
    pub fn shot_count(&self) -> usize {
        self.state.target_board().search_spots(|s| s.is_shot()).count()
    }

    fn send(&mut self, body: MessageBody) -> Result<(), GameError> {
        let message = Message::new(self.state.name(), body);
        self.game.deliver_message(message)
    }

    fn setup(&mut self) -> Result<(), GameError> {
        self.player
            .place_ships(&mut self.rng, self.state.home_board_mut())?;
        let placements: Vec<MessageBody> = self
            .state
            .home_board()
            .placed_ships()
            .iter()
            .map(|p| MessageBody::ShipPlaced {
                ship: p.ship(),
                coord: p.start(),
                orientation: p.orientation(),
            })
            .collect();
        for body in placements {
            self.send(body)?;
        }
        self.send(MessageBody::SetupComplete)
    }

    fn take_turn(&mut self) -> Result<(), GameError> {
        let coord = self
            .player
            .select_target(&mut self.rng, self.state.target_board())
            .ok_or_else(|| GameError::NoShotAvailable(self.state.name().to_string()))?;
        self.send(MessageBody::Shot { coord })
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = outcome;
        log::info!("[{}] Game outcome: {}", self.state.name(), outcome);
        self.player.handle_outcome(outcome);
    }
}

impl MessageTarget for PlayerNode {
    fn deliver_message(&mut self, message: Message) -> Result<(), GameError> {
        match message.body {
            MessageBody::Setup => self.setup(),
            MessageBody::Turn => self.take_turn(),
            MessageBody::Shot { coord } => {
                let report = self.state.receive_shot(coord);
                if report.hit() {
                    log::info!("[{}] {} hit our ship at {}", self.state.name(), message.source, coord);
                }
                if let Some(placed) = report.sunk {
                    log::info!("[{}] {} sunk our {}", self.state.name(), message.source, placed.ship());
                }
                Ok(())
            }
            MessageBody::ShotFeedback {
                coord,
                outcome,
                sunk_ship,
            } => {
                log::info!("[{}] Shot at {} was a {}", self.state.name(), coord, outcome);
                if let Some(ship) = sunk_ship {
                    log::info!("[{}] We sank a {}", self.state.name(), ship);
                }
                self.state.record_shot(coord, outcome);
                self.player
                    .handle_shot_feedback(self.state.target_board(), coord, outcome, sunk_ship);
                Ok(())
            }
            MessageBody::Won => {
                self.finish(Outcome::Won);
                Ok(())
            }
            MessageBody::Lost => {
                self.finish(Outcome::Lost);
                Ok(())
            }
            ref other => Err(GameError::IllegalMessage {
                phase: "player",
                message: other.kind(),
            }),
        }
    }

    fn is_terminal(&self) -> bool {
        self.outcome != Outcome::Playing
    }
}
