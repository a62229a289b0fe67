use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sea_battle::{
    random_layout, random_placement, validate_fleet, Board, BoardError, Coord, Orientation,
    ShipPlacement, BOARD_SIZE, FLEET_SIZE,
};

fn fixed_layout() -> Vec<ShipPlacement> {
    [
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
    ]
    .into_iter()
    .map(|(len, row, col)| ShipPlacement::new(len, Orientation::Horizontal, row, col))
    .collect()
}

/// No two ships share a cell or touch, diagonals included.
fn assert_fleet_rules(board: &Board) {
    let ships = board.ships();
    for (i, a) in ships.iter().enumerate() {
        for cell in a.locations() {
            assert!(cell.row() < BOARD_SIZE as usize && cell.col() < BOARD_SIZE as usize);
        }
        for b in &ships[i + 1..] {
            for &ca in a.locations() {
                for &cb in b.locations() {
                    assert_ne!(ca, cb, "ships overlap at {ca}");
                    assert!(!ca.neighbours().any(|n| n == cb), "ships touch at {ca}/{cb}");
                }
            }
        }
    }
}

#[test]
fn test_fixed_layout_is_valid() {
    let board = validate_fleet(&fixed_layout()).unwrap();
    assert!(board.fleet_complete());
    assert_fleet_rules(&board);
}

#[test]
fn test_wrong_fleet_shape_rejected() {
    let mut layout = fixed_layout();
    layout[9].length = 2;
    assert!(matches!(validate_fleet(&layout), Err(BoardError::InvalidPlacement(_))));
    assert!(matches!(validate_fleet(&[]), Err(BoardError::InvalidPlacement(_))));
}

#[test]
fn test_out_of_bounds_anchor_rejected() {
    let mut layout = fixed_layout();
    layout[9] = ShipPlacement::new(1, Orientation::Vertical, 12, 0);
    assert_eq!(
        validate_fleet(&layout).unwrap_err(),
        BoardError::OutOfBounds { row: 12, col: 0 }
    );
}

#[test]
fn test_random_placement_fits_board() {
    let mut rng = SmallRng::seed_from_u64(42);
    let board = validate_fleet(&fixed_layout()).unwrap();
    // Only single-cell ships may still be added, and the quota for them is full.
    assert_eq!(random_placement(&board, &mut rng, 1), None);

    let empty = Board::new();
    let p = random_placement(&empty, &mut rng, 4).unwrap();
    assert!(empty.can_place(&p.to_ship().unwrap()).is_ok());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn random_layout_is_always_valid(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let layout = random_layout(&mut rng);
        prop_assert_eq!(layout.len(), FLEET_SIZE);
        let board = validate_fleet(&layout).unwrap();
        assert_fleet_rules(&board);
    }

    #[test]
    fn accepted_placements_keep_fleet_rules(
        placements in prop::collection::vec(
            (1usize..=4, any::<bool>(), 0usize..10, 0usize..10),
            1..40,
        )
    ) {
        let mut board = Board::new();
        for (len, horizontal, row, col) in placements {
            let o = if horizontal { Orientation::Horizontal } else { Orientation::Vertical };
            let Ok(ship) = ShipPlacement::new(len, o, row, col).to_ship() else {
                continue;
            };
            let _ = board.place_ship(ship);
        }
        assert_fleet_rules(&board);
        prop_assert!(board.ships().len() <= FLEET_SIZE);
        let occupied = board.occupied();
        for cell in Coord::all() {
            prop_assert_eq!(
                occupied.contains(cell.row(), cell.col()),
                board.ship_at(cell).is_some()
            );
        }
    }
}
