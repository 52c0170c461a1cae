use std::collections::HashSet;

use fleetwar::{
    choose_by_weight, count_ship_freedoms, Board, Coordinate, Direction, HuntMode, HuntingPlayer,
    Orientation, Player, Ship, ShotOutcome,
};
use rand::{rngs::SmallRng, SeedableRng};

fn c(text: &str) -> Coordinate {
    text.parse().unwrap()
}

fn cells(texts: &[&str]) -> Vec<Coordinate> {
    texts.iter().map(|t| c(t)).collect()
}

/// Mark `coord` on `target` and tell the player about it.
fn feed(
    player: &mut HuntingPlayer,
    target: &mut Board,
    coord: Coordinate,
    outcome: ShotOutcome,
    sunk: Option<Ship>,
) {
    target.shoot(coord, Some(outcome));
    player.handle_shot_feedback(target, coord, outcome, sunk);
}

fn known_layout() -> Board {
    let mut board = Board::new();
    let layout = [
        (Ship::Destroyer, "A1", Orientation::Horizontal),
        (Ship::Cruiser, "C5", Orientation::Vertical),
        (Ship::Submarine, "H2", Orientation::Horizontal),
        (Ship::Battleship, "F9", Orientation::Vertical),
        (Ship::Carrier, "J4", Orientation::Horizontal),
    ];
    for (ship, start, orientation) in layout {
        board.place(ship, c(start), orientation).unwrap();
    }
    board
}

/// Play the hunting player against `home` until the fleet is sunk.
fn hunt_down(seed: u64, mut home: Board) -> Vec<(Coordinate, HuntMode)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut player = HuntingPlayer::new();
    let mut target = Board::new();
    let mut history = Vec::new();
    while home.has_alive_ships() {
        let coord = player.select_target(&mut rng, &target).unwrap();
        let report = home.shoot(coord, None);
        feed(
            &mut player,
            &mut target,
            coord,
            report.outcome,
            report.sunk.map(|p| p.ship()),
        );
        history.push((coord, player.mode()));
        assert!(history.len() <= 100, "hunt did not finish");
    }
    assert_eq!(player.remaining_ships(), &[false; 5]);
    history
}

#[test]
fn ship_freedoms() {
    let board = Board::new();
    assert_eq!(count_ship_freedoms(&board, c("A1"), Ship::Destroyer), 6);
    assert_eq!(count_ship_freedoms(&board, c("A1"), Ship::Carrier), 0);
    assert_eq!(count_ship_freedoms(&board, c("E5"), Ship::Destroyer), 14);
    assert_eq!(count_ship_freedoms(&board, c("E5"), Ship::Carrier), 8);
}

#[test]
fn weighted_choice() {
    let mut rng = SmallRng::seed_from_u64(9);
    for _ in 0..500 {
        assert_eq!(choose_by_weight(&mut rng, &['a', 'b', 'c'], &[0, 0, 5]), Some('c'));
    }
    let picked = choose_by_weight(&mut rng, &[1, 2, 3], &[0, 0, 0]).unwrap();
    assert!([1, 2, 3].contains(&picked));
    assert_eq!(choose_by_weight::<u8, _>(&mut rng, &[], &[]), None);
}

#[test]
fn hit_starts_a_hunt() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut player = HuntingPlayer::new();
    let mut target = Board::new();
    assert_eq!(player.mode(), HuntMode::Searching);

    feed(&mut player, &mut target, c("E5"), ShotOutcome::Hit, None);
    assert_eq!(player.mode(), HuntMode::Hunting);
    assert_eq!(player.pending_directions(), Direction::ALL.to_vec());
    assert_eq!(player.pending(Direction::Up), cells(&["D5", "C5", "B5", "A5"]));
    assert_eq!(player.pending(Direction::Down), cells(&["F5", "G5", "H5", "I5"]));
    assert_eq!(player.pending(Direction::Left), cells(&["E4", "E3", "E2", "E1"]));
    assert_eq!(player.pending(Direction::Right), cells(&["E6", "E7", "E8", "E9"]));

    assert_eq!(player.select_target(&mut rng, &target), Some(c("D5")));
    feed(&mut player, &mut target, c("D5"), ShotOutcome::Miss, None);
    assert_eq!(
        player.pending_directions(),
        vec![Direction::Down, Direction::Left, Direction::Right]
    );
    assert!(player.pending(Direction::Up).is_empty());

    assert_eq!(player.select_target(&mut rng, &target), Some(c("F5")));
    feed(&mut player, &mut target, c("F5"), ShotOutcome::Hit, None);
    assert_eq!(player.mode(), HuntMode::Hunting);
    assert_eq!(player.select_target(&mut rng, &target), Some(c("G5")));

    feed(&mut player, &mut target, c("G5"), ShotOutcome::Hit, Some(Ship::Cruiser));
    assert_eq!(player.mode(), HuntMode::Searching);
    assert!(player.pending_directions().is_empty());
    assert!(!player.remaining_ships()[Ship::Cruiser.index()]);
    assert!(player.remaining_ships()[Ship::Submarine.index()]);
}

#[test]
fn reach_shrinks_with_the_largest_ship_left() {
    let mut player = HuntingPlayer::new();
    let mut target = Board::new();
    feed(&mut player, &mut target, c("J1"), ShotOutcome::Hit, Some(Ship::Carrier));
    feed(&mut player, &mut target, c("J2"), ShotOutcome::Hit, Some(Ship::Battleship));

    feed(&mut player, &mut target, c("E5"), ShotOutcome::Hit, None);
    assert_eq!(player.pending(Direction::Up), cells(&["D5", "C5"]));
    assert_eq!(player.pending(Direction::Right), cells(&["E6", "E7"]));
}

#[test]
fn exhausted_hunt_falls_back_to_search() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut player = HuntingPlayer::new();
    let mut target = Board::new();

    feed(&mut player, &mut target, c("A1"), ShotOutcome::Hit, None);
    assert!(player.pending(Direction::Up).is_empty());
    assert!(player.pending(Direction::Left).is_empty());

    // empty directions are skipped
    assert_eq!(player.select_target(&mut rng, &target), Some(c("B1")));

    // every queued cell gets shot behind the player's back
    for text in ["C1", "D1", "E1", "A2", "A3", "A4", "A5"] {
        target.shoot(c(text), Some(ShotOutcome::Miss));
    }
    let next = player.select_target(&mut rng, &target).unwrap();
    assert_eq!(player.mode(), HuntMode::Searching);
    assert!(!target.spot(next).is_shot());
    assert!(player.pending_directions().is_empty());
}

#[test]
fn seeded_hunts_are_reproducible() {
    let first = hunt_down(42, known_layout());
    let second = hunt_down(42, known_layout());
    assert_eq!(first, second);

    let distinct: HashSet<Coordinate> = first.iter().map(|(coord, _)| *coord).collect();
    assert_eq!(distinct.len(), first.len());
    assert!(first.iter().any(|(_, mode)| *mode == HuntMode::Hunting));
    assert_eq!(first.last().map(|(_, mode)| *mode), Some(HuntMode::Searching));
}

#[test]
fn hunts_random_fleets_to_the_end() {
    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed + 1000);
        let mut home = Board::new();
        fleetwar::place_fleet(&mut rng, &mut home).unwrap();
        let shots = hunt_down(seed, home);
        assert!(shots.len() >= 17);
    }
}
