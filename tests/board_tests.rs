use fleetwar::{
    Board, BoardError, Coordinate, Direction, Orientation, PlacedShip, Ship, ShotOutcome, COLS,
    ROWS,
};
use rand::{rngs::SmallRng, SeedableRng};

fn c(text: &str) -> Coordinate {
    text.parse().unwrap()
}

#[test]
fn ship_catalog() {
    let sizes: Vec<usize> = Ship::ALL.iter().map(Ship::size).collect();
    assert_eq!(sizes, vec![2, 3, 3, 4, 5]);
    let symbols: String = Ship::ALL.iter().map(Ship::symbol).collect();
    assert_eq!(symbols, "DCSBA");
    assert_eq!("submarine".parse::<Ship>().unwrap(), Ship::Submarine);
    assert_eq!(
        "rowboat".parse::<Ship>(),
        Err(BoardError::UnknownShip("rowboat".to_string()))
    );
}

#[test]
fn placed_ship_footprint_and_equality() {
    let a = PlacedShip::new(Ship::Cruiser, c("C3"), Orientation::Vertical).unwrap();
    assert_eq!(a.cells(), &[c("C3"), c("D3"), c("E3")]);
    let b = PlacedShip::new(Ship::Cruiser, c("C3"), Orientation::Vertical).unwrap();
    assert_eq!(a, b);
    let other = PlacedShip::new(Ship::Submarine, c("C3"), Orientation::Vertical).unwrap();
    assert_ne!(a, other);
    assert!(a.overlaps(&other));
    assert_eq!(
        PlacedShip::new(Ship::Carrier, c("H1"), Orientation::Vertical),
        Err(BoardError::ShipOutOfBounds)
    );
}

#[test]
fn placement_rejects_overlap() {
    let mut board = Board::new();
    board
        .place(Ship::Battleship, c("C3"), Orientation::Horizontal)
        .unwrap();

    let clashes = [
        (Ship::Destroyer, "C2", Orientation::Horizontal),
        (Ship::Cruiser, "A4", Orientation::Vertical),
        (Ship::Submarine, "C6", Orientation::Horizontal),
        (Ship::Carrier, "B5", Orientation::Vertical),
    ];
    for (ship, start, orientation) in clashes {
        assert_eq!(
            board.place(ship, c(start), orientation).err(),
            Some(BoardError::ShipOverlaps),
            "{} at {} should clash",
            ship,
            start
        );
    }
    assert_eq!(board.placed_ships().len(), 1);

    board
        .place(Ship::Destroyer, c("D3"), Orientation::Horizontal)
        .unwrap();
    assert_eq!(board.placed_ships().len(), 2);
    assert_eq!(board.ship_at(c("D4")).map(PlacedShip::ship), Some(Ship::Destroyer));
    assert_eq!(board.ship_at(c("C6")).map(PlacedShip::ship), Some(Ship::Battleship));
    assert!(board.ship_at(c("C7")).is_none());
}

#[test]
fn place_random_fills_a_fleet_without_overlap() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut board = Board::new();
    for ship in Ship::ALL {
        board.place_random(&mut rng, ship).unwrap();
    }
    let occupied = board.search_spots(|s| s.ship_index().is_some()).count();
    assert_eq!(occupied, 17);
}

#[test]
fn place_random_gives_up_on_a_full_board() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut board = Board::new();
    // vertical carriers in every column block every other placement
    for col in 0..COLS {
        for start_row in [0, 5] {
            let start = Coordinate::new(start_row, col).unwrap();
            board
                .place_ship(PlacedShip::new(Ship::Carrier, start, Orientation::Vertical).unwrap())
                .unwrap();
        }
    }
    assert_eq!(
        board.place_random(&mut rng, Ship::Destroyer),
        Err(BoardError::UnableToPlaceShip(Ship::Destroyer))
    );
}

#[test]
fn find_space_counts_unshot_room() {
    let mut board = Board::new();
    board.shoot(c("A3"), None);
    board.shoot(c("D3"), None);

    assert_eq!(board.find_space(c("C3"), Direction::Up), 1);
    assert_eq!(board.find_space(c("C3"), Direction::Down), 0);
    assert_eq!(board.find_space(c("C3"), Direction::Left), 2);
    assert_eq!(board.find_space(c("C3"), Direction::Right), 4);
    assert_eq!(board.vertical_room(c("C3")), 1);
    assert_eq!(board.horizontal_room(c("C3")), 6);

    board.shoot(c("C2"), None);
    assert_eq!(board.find_space(c("C3"), Direction::Left), 0);
    assert_eq!(board.horizontal_room(c("C3")), 4);
}

#[test]
fn list_space_coords_walks_outward() {
    let mut board = Board::new();
    board.shoot(c("A3"), None);
    assert_eq!(
        board.list_space_coords(c("C3"), Direction::Right, 2),
        vec![c("C4"), c("C5")]
    );
    assert_eq!(board.list_space_coords(c("C3"), Direction::Up, 4), vec![c("B3")]);
    assert!(board.list_space_coords(c("C3"), Direction::Down, 0).is_empty());
    assert_eq!(board.list_space_coords(c("J8"), Direction::Right, 4).len(), 2);
}

#[test]
fn unshot_spots_tracks_every_shot() {
    let mut board = Board::new();
    assert_eq!(board.unshot_spots().len(), ROWS * COLS);
    board.shoot(c("E5"), None);
    let spots = board.unshot_spots();
    assert_eq!(spots.len(), ROWS * COLS - 1);
    assert!(!spots.contains(&c("E5")));
    board.shoot(c("A1"), None);
    let spots = board.unshot_spots();
    assert_eq!(spots.len(), ROWS * COLS - 2);
    assert_eq!(spots[0], c("A2"));
}

#[test]
fn shooting_reports_hits_and_sinks() {
    let mut board = Board::new();
    board
        .place(Ship::Destroyer, c("B2"), Orientation::Vertical)
        .unwrap();
    assert!(board.has_alive_ships());

    let miss = board.shoot(c("A1"), None);
    assert_eq!(miss.outcome, ShotOutcome::Miss);
    assert!(miss.sunk.is_none());

    let first = board.shoot(c("B2"), None);
    assert!(first.hit());
    assert!(first.sunk.is_none());
    let placed = board.placed_ships()[0].clone();
    assert_eq!(board.unshot_ship_coords(&placed), vec![c("C2")]);

    let last = board.shoot(c("C2"), None);
    assert!(last.hit());
    assert_eq!(last.sunk.map(|p| p.ship()), Some(Ship::Destroyer));
    assert!(board.is_sunk(&placed));
    assert!(!board.has_alive_ships());
}

#[test]
fn shooting_twice_keeps_the_first_result() {
    let mut board = Board::new();
    board
        .place(Ship::Destroyer, c("A1"), Orientation::Horizontal)
        .unwrap();
    board.shoot(c("A1"), None);
    board.shoot(c("A2"), None);
    let before = board.clone();

    let again = board.shoot(c("A2"), None);
    assert_eq!(again.outcome, ShotOutcome::Hit);
    assert!(again.sunk.is_none());
    assert_eq!(board, before);

    let forced = board.shoot(c("A2"), Some(ShotOutcome::Miss));
    assert_eq!(forced.outcome, ShotOutcome::Hit);
}

#[test]
fn explicit_outcome_is_recorded_verbatim() {
    let mut target = Board::new();
    let report = target.shoot(c("F6"), Some(ShotOutcome::Hit));
    assert!(report.hit());
    assert_eq!(target.spot(c("F6")).shot_outcome(), Some(ShotOutcome::Hit));
    assert!(target.placed_ships().is_empty());
}

#[test]
fn board_equality_follows_placements_and_shots() {
    let build = |shots: &[&str]| {
        let mut board = Board::new();
        board
            .place(Ship::Cruiser, c("E5"), Orientation::Horizontal)
            .unwrap();
        for s in shots {
            board.shoot(c(s), None);
        }
        board
    };
    assert_eq!(build(&["E5", "A1"]), build(&["E5", "A1"]));
    assert_ne!(build(&["E5", "A1"]), build(&["E5"]));
    assert_ne!(build(&["E5"]), build(&["E6"]));

    let mut moved = Board::new();
    moved
        .place(Ship::Cruiser, c("E4"), Orientation::Horizontal)
        .unwrap();
    assert_ne!(moved, build(&[]));
}

#[test]
fn renders_ships_and_shots() {
    let mut board = Board::new();
    board
        .place(Ship::Carrier, c("A1"), Orientation::Horizontal)
        .unwrap();
    board.shoot(c("A2"), None);
    board.shoot(c("B1"), None);

    let ships = board.render_ships();
    let lines: Vec<&str> = ships.lines().collect();
    assert_eq!(lines[0], "  1234567890 ");
    assert_eq!(lines[1], " +----------+");
    assert_eq!(lines[2], "A|AaAAA     |");
    assert_eq!(lines[3], "B|          |");
    assert_eq!(lines.len(), ROWS + 3);

    let shots = board.render_shots();
    let lines: Vec<&str> = shots.lines().collect();
    assert_eq!(lines[2], "A| X        |");
    assert_eq!(lines[3], "B|o         |");
    assert_eq!(board.to_string(), ships);
}
