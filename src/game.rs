//! The authoritative game: both players' boards and the phase state machine.

use core::fmt;

use crate::common::GameError;
use crate::coord::Coordinate;
use crate::player_state::PlayerState;
use crate::protocol::{Message, MessageBody, MessageTarget, MessageType};
use crate::ship::{Orientation, Ship};

/// Phase of a game. Moves only forward: Setup, Playing, Ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Setup,
    Playing,
    Ended,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Setup => "setup",
            GamePhase::Playing => "playing",
            GamePhase::Ended => "ended",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Master state of a running game.
///
/// The game sees both players' complete state and mediates everything they
/// say to each other. Each player only ever learns what the game relays,
/// so the same wiring works for local or remote play.
pub struct Game {
    phase: GamePhase,
    turn: usize,
    names: [String; 2],
    states: [PlayerState; 2],
    players: [Box<dyn MessageTarget>; 2],
    setup: [bool; 2],
    winner: Option<usize>,
}

impl Game {
    /// Start a game between two named players. The names must differ.
    pub fn new(
        name1: impl Into<String>,
        player1: Box<dyn MessageTarget>,
        name2: impl Into<String>,
        player2: Box<dyn MessageTarget>,
    ) -> Self {
        let names = [name1.into(), name2.into()];
        let states = [PlayerState::new(&names[0]), PlayerState::new(&names[1])];
        Self {
            phase: GamePhase::Setup,
            // the first switch_turn flips this to the first-named player
            turn: 1,
            names,
            states,
            players: [player1, player2],
            setup: [false, false],
            winner: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn names(&self) -> (&str, &str) {
        (&self.names[0], &self.names[1])
    }

    /// Name of the player whose move it is, once play has started.
    pub fn active_player(&self) -> Option<&str> {
        match self.phase {
            GamePhase::Playing => Some(&self.names[self.turn]),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.map(|i| self.names[i].as_str())
    }

    fn index_of(&self, name: &str) -> Result<usize, GameError> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))
    }

    /// The opponent of `player`.
    pub fn other_player(&self, player: &str) -> Result<&str, GameError> {
        let index = self.index_of(player)?;
        Ok(&self.names[1 - index])
    }

    /// Authoritative state of `player`.
    pub fn state(&self, player: &str) -> Result<&PlayerState, GameError> {
        let index = self.index_of(player)?;
        Ok(&self.states[index])
    }

    pub fn states(&self) -> &[PlayerState; 2] {
        &self.states
    }

    pub fn is_all_setup_complete(&self) -> bool {
        self.setup.iter().all(|done| *done)
    }

    fn send(&mut self, index: usize, body: MessageBody) -> Result<(), GameError> {
        self.players[index].deliver_message(Message::from_game(body))
    }

    fn require(&self, phase: GamePhase, kind: MessageType) -> Result<(), GameError> {
        if self.phase != phase {
            return Err(GameError::IllegalMessage {
                phase: self.phase.as_str(),
                message: kind,
            });
        }
        Ok(())
    }

    /// Hand the move to the other player and tell them.
    fn switch_turn(&mut self) -> Result<(), GameError> {
        self.turn = 1 - self.turn;
        if log::log_enabled!(log::Level::Debug) {
            for state in &self.states {
                log::debug!("\n{}", state.render_both_boards());
            }
        }
        self.send(self.turn, MessageBody::Turn)
    }

    fn on_setup(&mut self) -> Result<(), GameError> {
        self.require(GamePhase::Setup, MessageType::Setup)?;
        log::info!("setting up {} vs {}", self.names[0], self.names[1]);
        for index in 0..self.players.len() {
            self.send(index, MessageBody::Setup)?;
        }
        Ok(())
    }

    fn on_ship_placed(
        &mut self,
        source: &str,
        ship: Ship,
        coord: Coordinate,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        self.require(GamePhase::Setup, MessageType::ShipPlaced)?;
        let index = self.index_of(source)?;
        let board = self.states[index].home_board_mut();
        if board.placed_ships().iter().any(|p| p.ship() == ship) {
            return Err(GameError::DuplicateShip {
                player: source.to_string(),
                ship,
            });
        }
        let placed = board.place(ship, coord, orientation)?;
        log::debug!("{} placed {}", source, placed);
        Ok(())
    }

    fn on_setup_complete(&mut self, source: &str) -> Result<(), GameError> {
        self.require(GamePhase::Setup, MessageType::SetupComplete)?;
        let index = self.index_of(source)?;
        self.setup[index] = true;
        if self.is_all_setup_complete() {
            self.phase = GamePhase::Playing;
            log::info!("setup complete, game is on");
            self.switch_turn()?;
        }
        Ok(())
    }

    fn on_shot(&mut self, message: Message, coord: Coordinate) -> Result<(), GameError> {
        self.require(GamePhase::Playing, MessageType::Shot)?;
        let shooter = self.index_of(&message.source)?;
        if shooter != self.turn {
            return Err(GameError::OutOfTurn {
                source: message.source,
                active: self.names[self.turn].clone(),
            });
        }
        let target = 1 - shooter;

        let report = self.states[target].receive_shot(coord);
        let feedback = MessageBody::ShotFeedback {
            coord,
            outcome: report.outcome,
            sunk_ship: report.sunk.as_ref().map(|p| p.ship()),
        };

        // the target mirrors the shot on its own copy of the home board
        self.players[target].deliver_message(message)?;

        self.states[shooter].record_shot(coord, report.outcome);
        self.send(shooter, feedback)?;

        if self.states[target].is_alive() {
            self.switch_turn()
        } else {
            self.phase = GamePhase::Ended;
            self.winner = Some(shooter);
            log::info!("Game ended with a win for {}", self.names[shooter]);
            self.send(target, MessageBody::Lost)?;
            self.send(shooter, MessageBody::Won)
        }
    }
}

impl MessageTarget for Game {
    fn deliver_message(&mut self, message: Message) -> Result<(), GameError> {
        match message.body {
            MessageBody::Setup => self.on_setup(),
            MessageBody::ShipPlaced {
                ship,
                coord,
                orientation,
            } => self.on_ship_placed(&message.source, ship, coord, orientation),
            MessageBody::SetupComplete => self.on_setup_complete(&message.source),
            MessageBody::Shot { coord } => self.on_shot(message, coord),
            // game -> player traffic has no business arriving here
            ref other => Err(GameError::IllegalMessage {
                phase: self.phase.as_str(),
                message: other.kind(),
            }),
        }
    }

    fn is_terminal(&self) -> bool {
        self.phase == GamePhase::Ended
    }
}
