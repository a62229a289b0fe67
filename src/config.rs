//! Fixed rules of the game: board dimensions and fleet composition.

pub const BOARD_SIZE: u8 = 10;
pub const FLEET_SIZE: usize = 10;
pub const MAX_SHIP_LENGTH: usize = 4;

/// Ship lengths of a complete fleet, longest first. Ships are placed in this
/// order by the random layout routine.
pub const FLEET_LENGTHS: [usize; FLEET_SIZE] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Total number of ship segments in a complete fleet.
pub const TOTAL_SHIP_CELLS: usize = 4 + 3 + 3 + 2 + 2 + 2 + 1 + 1 + 1 + 1;

/// Number of ships of `length` a complete fleet contains.
pub fn ships_of_length(length: usize) -> usize {
    FLEET_LENGTHS.iter().filter(|&&l| l == length).count()
}
