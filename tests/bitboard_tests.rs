use sea_battle::{BitBoard, BitBoardError, Board, Coord, Mask};

#[test]
fn test_get_set_clear() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert!(bb.is_empty());
    bb.set(1, 1).unwrap();
    assert!(bb.get(1, 1).unwrap());
    bb.clear(1, 1).unwrap();
    assert!(!bb.get(1, 1).unwrap());
    assert_eq!(
        bb.set(4, 0),
        Err(BitBoardError::IndexOutOfBounds { row: 4, col: 0 })
    );
    assert!(!bb.contains(7, 7));
}

#[test]
fn test_nth_set_walks_row_major() {
    let mut bb = Mask::new();
    bb.set(9, 9).unwrap();
    bb.set(0, 4).unwrap();
    bb.set(3, 0).unwrap();
    assert_eq!(bb.nth_set(0), Some((0, 4)));
    assert_eq!(bb.nth_set(1), Some((3, 0)));
    assert_eq!(bb.nth_set(2), Some((9, 9)));
    assert_eq!(bb.nth_set(3), None);
}

#[test]
fn test_set_operations() {
    let mut a = Mask::new();
    a.set(0, 0).unwrap();
    a.set(0, 1).unwrap();
    let mut b = Mask::new();
    b.set(0, 1).unwrap();
    assert_eq!((a & b).count_ones(), 1);
    assert_eq!((a | b).count_ones(), 2);
    assert_eq!((a & !b).nth_set(0), Some((0, 0)));
    assert_eq!((!Mask::new()).count_ones(), 100);
}

#[test]
fn test_cell_access_matches_row_col_access() {
    let mut mask = Mask::new();
    for cell in [Coord::new(0, 0).unwrap(), Coord::new(9, 9).unwrap(), Coord::new(4, 7).unwrap()] {
        mask.insert(cell);
        assert!(mask.contains_cell(cell));
        assert!(mask.get(cell.row(), cell.col()).unwrap());
    }
    assert_eq!(mask.count_ones(), 3);
    mask.insert(Coord::new(9, 9).unwrap());
    assert_eq!(mask.count_ones(), 3);
    mask.remove(Coord::new(9, 9).unwrap());
    assert!(!mask.contains_cell(Coord::new(9, 9).unwrap()));
    assert_eq!(mask.nth_set(1), Some((4, 7)));

    let halo = Board::surrounding_cells(Coord::new(0, 9).unwrap());
    assert_eq!(halo.iter_set_bits().collect::<Vec<_>>(), vec![(0, 8), (1, 8), (1, 9)]);
}
