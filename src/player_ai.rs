use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::ai::{choose_by_weight, count_freedoms, render_weights, weight_map};
use crate::board::Board;
use crate::common::{BoardError, ShotOutcome};
use crate::coord::{Coordinate, Direction};
use crate::player::{place_fleet, Outcome, Player};
use crate::ship::{Ship, NUM_SHIPS};

/// Places ships at random and fires at uniformly random unshot cells.
#[derive(Debug, Default)]
pub struct RandomPlayer;

impl RandomPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for RandomPlayer {
    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        place_fleet(rng, board)
    }

    fn select_target(&mut self, rng: &mut SmallRng, target: &Board) -> Option<Coordinate> {
        let spots = target.unshot_spots();
        if spots.is_empty() {
            return None;
        }
        Some(spots[rng.random_range(0..spots.len())])
    }

    fn handle_outcome(&mut self, outcome: Outcome) {
        log::debug!("random player finished: {}", outcome);
    }
}

/// Search state of the [`HuntingPlayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntMode {
    /// Weighted random search for a new ship.
    Searching,
    /// Probing outward from a hit, one direction at a time.
    Hunting,
}

/// Searches by weighting cells with how many placements of the surviving
/// ships could still cover them, then probes the four rays out from a hit
/// until the ship sinks.
#[derive(Debug)]
pub struct HuntingPlayer {
    mode: HuntMode,
    remaining_ships: [bool; NUM_SHIPS],
    pending: [VecDeque<Coordinate>; 4],
    pending_directions: VecDeque<Direction>,
}

impl Default for HuntingPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl HuntingPlayer {
    pub fn new() -> Self {
        Self {
            mode: HuntMode::Searching,
            remaining_ships: [true; NUM_SHIPS],
            pending: Default::default(),
            pending_directions: VecDeque::new(),
        }
    }

    pub fn mode(&self) -> HuntMode {
        self.mode
    }

    /// Which ship kinds are not yet confirmed sunk, indexed like [`Ship::ALL`].
    pub fn remaining_ships(&self) -> &[bool; NUM_SHIPS] {
        &self.remaining_ships
    }

    /// Directions still queued for probing, front first.
    pub fn pending_directions(&self) -> Vec<Direction> {
        self.pending_directions.iter().copied().collect()
    }

    /// Cells still queued along `dir`.
    pub fn pending(&self, dir: Direction) -> Vec<Coordinate> {
        self.pending[dir.index()].iter().copied().collect()
    }

    fn largest_remaining(&self) -> usize {
        Ship::ALL
            .iter()
            .filter(|s| self.remaining_ships[s.index()])
            .map(Ship::size)
            .max()
            .unwrap_or(0)
    }

    fn reset_hunt(&mut self) {
        self.mode = HuntMode::Searching;
        self.pending = Default::default();
        self.pending_directions.clear();
    }

    fn next_pending(&mut self, target: &Board) -> Option<Coordinate> {
        while let Some(dir) = self.pending_directions.front().copied() {
            match self.pending[dir.index()].pop_front() {
                Some(coord) if target.spot(coord).is_shot() => continue,
                Some(coord) => return Some(coord),
                None => {
                    self.pending_directions.pop_front();
                }
            }
        }
        None
    }

    fn search(&self, rng: &mut SmallRng, target: &Board) -> Option<Coordinate> {
        let spots = target.unshot_spots();
        let weights: Vec<usize> = spots
            .iter()
            .map(|c| count_freedoms(target, *c, &self.remaining_ships))
            .collect();
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "search weights:\n{}",
                render_weights(&weight_map(target, &self.remaining_ships))
            );
        }
        let choice = choose_by_weight(rng, &spots, &weights);
        if let Some(coord) = choice {
            log::debug!("searching, chose {}", coord);
        }
        choice
    }

    fn start_hunt(&mut self, target: &Board, coord: Coordinate) {
        self.mode = HuntMode::Hunting;
        let reach = self.largest_remaining().saturating_sub(1);
        self.pending_directions = Direction::ALL.into_iter().collect();
        self.pending = Direction::ALL.map(|dir| target.list_space_coords(coord, dir, reach).into());
        log::debug!("hit at {} switches us to hunting, pending {:?}", coord, self.pending);
    }
}

impl Player for HuntingPlayer {
    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        place_fleet(rng, board)
    }

    fn select_target(&mut self, rng: &mut SmallRng, target: &Board) -> Option<Coordinate> {
        if self.mode == HuntMode::Hunting {
            if let Some(coord) = self.next_pending(target) {
                log::debug!("hunting, probing {}", coord);
                return Some(coord);
            }
            log::debug!("every direction exhausted, back to searching");
            self.reset_hunt();
        }
        self.search(rng, target)
    }

    fn handle_shot_feedback(
        &mut self,
        target: &Board,
        coord: Coordinate,
        outcome: ShotOutcome,
        sunk: Option<Ship>,
    ) {
        match self.mode {
            HuntMode::Searching if outcome.is_hit() => self.start_hunt(target, coord),
            HuntMode::Searching => {}
            HuntMode::Hunting if outcome.is_hit() => {}
            HuntMode::Hunting => {
                // a miss ends the ray we were probing
                if let Some(dir) = self.pending_directions.pop_front() {
                    self.pending[dir.index()].clear();
                    log::debug!("miss at {} clears the {} direction", coord, dir);
                }
            }
        }

        if let Some(ship) = sunk {
            self.remaining_ships[ship.index()] = false;
            self.reset_hunt();
            log::debug!("sank a {}, back to searching", ship);
        }
    }

    fn handle_outcome(&mut self, outcome: Outcome) {
        log::debug!("hunting player finished: {}", outcome);
    }
}
