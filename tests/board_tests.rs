use sea_battle::{
    Board, BoardError, Coord, GuessCell, Orientation, OwnCell, Ship, ShipId, ShipPlacement,
    FLEET_LENGTHS,
};

fn c(row: usize, col: usize) -> Coord {
    Coord::new(row, col).unwrap()
}

fn ship(len: usize, o: Orientation, row: usize, col: usize) -> Ship {
    Ship::at(len, o, c(row, col)).unwrap()
}

#[test]
fn test_surrounding_cells() {
    assert_eq!(Board::surrounding_cells(c(0, 0)).count_ones(), 3);
    assert_eq!(Board::surrounding_cells(c(0, 5)).count_ones(), 5);
    let around = Board::surrounding_cells(c(4, 4));
    assert_eq!(around.count_ones(), 8);
    assert!(!around.contains(4, 4));
    assert!(around.contains(3, 3) && around.contains(5, 5));
}

#[test]
fn test_place_marks_own_grid() {
    let mut board = Board::new();
    let id = board.place_ship(ship(3, Orientation::Vertical, 2, 2)).unwrap();
    assert_eq!(id, ShipId(0));
    for r in 2..5 {
        assert_eq!(board.own_grid()[c(r, 2)], OwnCell::Occupied);
    }
    assert_eq!(board.own_grid()[c(5, 2)], OwnCell::Empty);
    assert_eq!(board.ship_at(c(3, 2)), Some(id));
    assert_eq!(board.ship_at(c(3, 3)), None);
    assert_eq!(board.guess_grid().count(GuessCell::Unknown), 100);
}

#[test]
fn test_overlap_and_touching_rejected() {
    let mut board = Board::new();
    board.place_ship(ship(4, Orientation::Horizontal, 4, 2)).unwrap();
    // Overlap.
    assert_eq!(
        board.place_ship(ship(2, Orientation::Vertical, 3, 3)).unwrap_err(),
        BoardError::OverlapOrAdjacency
    );
    // Side by side.
    assert_eq!(
        board.place_ship(ship(3, Orientation::Horizontal, 5, 3)).unwrap_err(),
        BoardError::OverlapOrAdjacency
    );
    // Diagonal touch at a corner.
    assert_eq!(
        board.place_ship(ship(1, Orientation::Vertical, 3, 6)).unwrap_err(),
        BoardError::OverlapOrAdjacency
    );
    // One cell gap is fine.
    board.place_ship(ship(1, Orientation::Vertical, 2, 6)).unwrap();
    assert_eq!(board.ships().len(), 2);
}

#[test]
fn test_unplaced_ship_rejected() {
    let mut board = Board::new();
    assert!(matches!(
        board.place_ship(Ship::new(2).unwrap()),
        Err(BoardError::InvalidPlacement(_))
    ));
}

#[test]
fn test_fleet_quota_per_length() {
    let mut board = Board::new();
    board.place_ship(ship(4, Orientation::Horizontal, 0, 0)).unwrap();
    assert!(matches!(
        board.place_ship(ship(4, Orientation::Horizontal, 9, 0)),
        Err(BoardError::InvalidPlacement(_))
    ));
    assert_eq!(board.remaining_lengths(), vec![3, 3, 2, 2, 2, 1, 1, 1, 1]);
}

#[test]
fn test_out_of_bounds_placement() {
    let p = ShipPlacement::new(2, Orientation::Horizontal, 3, 10);
    assert_eq!(p.to_ship().unwrap_err(), BoardError::OutOfBounds { row: 3, col: 10 });
}

#[test]
fn test_fleet_complete() {
    let layout = [
        (4, 0, 0),
        (3, 0, 5),
        (3, 2, 0),
        (2, 2, 4),
        (2, 2, 7),
        (2, 4, 0),
        (1, 4, 3),
        (1, 4, 5),
        (1, 4, 7),
        (1, 4, 9),
    ];
    let mut board = Board::new();
    for (i, &(len, row, col)) in layout.iter().enumerate() {
        assert!(!board.fleet_complete());
        assert_eq!(board.remaining_lengths(), FLEET_LENGTHS[i..].to_vec());
        board.place_ship(ship(len, Orientation::Horizontal, row, col)).unwrap();
    }
    assert!(board.fleet_complete());
    assert!(board.remaining_lengths().is_empty());
    assert_eq!(board.occupied().count_ones(), sea_battle::TOTAL_SHIP_CELLS);
    assert!(!board.defeated());
}
