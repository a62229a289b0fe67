//! Fleet layout validation and random fleet generation.
//!
//! Human and computer fleets go through the same [`validate_fleet`] call, so
//! both sides always play under identical placement rules: every cell on the
//! board, no overlaps, and no two ships touching, diagonals included.

use alloc::vec::Vec;

use log::debug;
use rand::Rng;

use crate::board::Board;
use crate::common::{BoardError, Coord};
use crate::config::{BOARD_SIZE, FLEET_LENGTHS};
use crate::ship::{Orientation, Ship};

/// Attempts per ship before a random layout is thrown away and restarted.
const ATTEMPTS_PER_SHIP: usize = 200;

/// A proposed position for one ship: its length, orientation and the
/// top-left cell it grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipPlacement {
    pub length: usize,
    pub orientation: Orientation,
    pub row: usize,
    pub col: usize,
}

impl ShipPlacement {
    pub fn new(length: usize, orientation: Orientation, row: usize, col: usize) -> Self {
        Self {
            length,
            orientation,
            row,
            col,
        }
    }

    /// Build the ship this placement describes.
    pub fn to_ship(&self) -> Result<Ship, BoardError> {
        let anchor = Coord::new(self.row, self.col)?;
        Ship::at(self.length, self.orientation, anchor)
    }
}

/// Validate a complete layout and build the board it describes.
///
/// The lengths must match the fleet exactly (4, 3, 3, 2, 2, 2, 1, 1, 1, 1 in
/// any order); each ship must lie on the board and keep clear of the others.
pub fn validate_fleet(layout: &[ShipPlacement]) -> Result<Board, BoardError> {
    let mut lengths: Vec<usize> = layout.iter().map(|p| p.length).collect();
    lengths.sort_unstable_by(|a, b| b.cmp(a));
    if lengths[..] != FLEET_LENGTHS[..] {
        return Err(BoardError::InvalidPlacement(
            "fleet must be one 4, two 3s, three 2s and four 1s",
        ));
    }
    let mut board = Board::new();
    for p in layout {
        board.place_ship(p.to_ship()?)?;
    }
    Ok(board)
}

/// Pick a random legal position for a ship of `length` on `board`.
/// Gives up after a bounded number of attempts.
pub fn random_placement<R: Rng + ?Sized>(
    board: &Board,
    rng: &mut R,
    length: usize,
) -> Option<ShipPlacement> {
    (0..ATTEMPTS_PER_SHIP).find_map(|_| {
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let p = ShipPlacement::new(
            length,
            orientation,
            rng.random_range(0..BOARD_SIZE as usize),
            rng.random_range(0..BOARD_SIZE as usize),
        );
        let ship = p.to_ship().ok()?;
        board.can_place(&ship).ok().map(|()| p)
    })
}

/// Generate a complete random layout that passes [`validate_fleet`].
///
/// Ships are placed longest first with fresh random anchors on each failed
/// attempt. In the rare case a ship finds no room, the layout starts over.
pub fn random_layout<R: Rng + ?Sized>(rng: &mut R) -> Vec<ShipPlacement> {
    let mut restarts = 0usize;
    'layout: loop {
        let mut board = Board::new();
        let mut layout = Vec::with_capacity(FLEET_LENGTHS.len());
        for &length in FLEET_LENGTHS.iter() {
            let Some(p) = random_placement(&board, rng, length) else {
                restarts += 1;
                debug!("no room for a ship of length {length}; restarting layout ({restarts})");
                continue 'layout;
            };
            match p.to_ship().and_then(|ship| board.place_ship(ship)) {
                Ok(_) => layout.push(p),
                Err(_) => continue 'layout,
            }
        }
        return layout;
    }
}
