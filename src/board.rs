//! One side's boards: its own fleet grid and its record of shots at the
//! opponent.

use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};

use crate::bitboard::BitBoard;
use crate::common::{BoardError, Coord};
use crate::config::{ships_of_length, BOARD_SIZE, FLEET_LENGTHS, FLEET_SIZE};
use crate::ship::Ship;

/// Cell set over the 10×10 board.
pub type Mask = BitBoard<u128, { BOARD_SIZE as usize }>;

const SIZE: usize = BOARD_SIZE as usize;

/// Index of a ship within its board's fleet, in placement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub usize);

/// State of a cell on a side's own fleet grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum OwnCell {
    #[default]
    Empty,
    Occupied,
    Hit,
    Sunk,
}

/// What a side knows about a cell of the opponent's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessCell {
    #[default]
    Unknown,
    Hit,
    Miss,
    Sunk,
}

impl GuessCell {
    /// Whether a shot has already been resolved on this cell.
    pub fn is_resolved(self) -> bool {
        self != GuessCell::Unknown
    }
}

/// A 10×10 grid of cell states, indexed by [`Coord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<C> {
    cells: [[C; SIZE]; SIZE],
}

impl<C: Copy + PartialEq> Grid<C> {
    /// Row-major iterator over every cell and its state.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, C)> + '_ {
        Coord::all().map(move |c| (c, self[c]))
    }

    /// Cells currently in `state`.
    pub fn count(&self, state: C) -> usize {
        self.iter().filter(|&(_, s)| s == state).count()
    }
}

impl<C> Index<Coord> for Grid<C> {
    type Output = C;
    fn index(&self, c: Coord) -> &C {
        &self.cells[c.row()][c.col()]
    }
}

impl<C> IndexMut<Coord> for Grid<C> {
    fn index_mut(&mut self, c: Coord) -> &mut C {
        &mut self.cells[c.row()][c.col()]
    }
}

/// A side's board: own fleet plus guesses against the opponent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    own: Grid<OwnCell>,
    guesses: Grid<GuessCell>,
    ships: Vec<Ship>,
    sunk: Vec<ShipId>,
}

/// Serializable snapshot of a [`Board`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    pub own: Grid<OwnCell>,
    pub guesses: Grid<GuessCell>,
    pub ships: Vec<Ship>,
    pub sunk: Vec<ShipId>,
}

impl Board {
    /// Create an empty board (no ships placed, nothing fired).
    pub fn new() -> Self {
        Self::default()
    }

    /// The 8-connected neighbours of `cell`, excluding `cell` itself.
    pub fn surrounding_cells(cell: Coord) -> Mask {
        let mut mask = Mask::new();
        for n in cell.neighbours() {
            mask.insert(n);
        }
        mask
    }

    /// Union of every placed ship's footprint.
    pub fn occupied(&self) -> Mask {
        self.ships
            .iter()
            .fold(Mask::new(), |acc, ship| acc | ship.mask())
    }

    /// Check whether `ship` could be added without breaking the fleet rules.
    pub fn can_place(&self, ship: &Ship) -> Result<(), BoardError> {
        if !ship.is_placed() {
            return Err(BoardError::InvalidPlacement("ship has no cells assigned"));
        }
        let already = self
            .ships
            .iter()
            .filter(|s| s.length() == ship.length())
            .count();
        if already >= ships_of_length(ship.length()) {
            return Err(BoardError::InvalidPlacement(
                "fleet already holds every ship of this length",
            ));
        }
        if !(self.occupied().dilate() & ship.mask()).is_empty() {
            return Err(BoardError::OverlapOrAdjacency);
        }
        Ok(())
    }

    /// Add a ship to the fleet and mark its cells occupied.
    pub fn place_ship(&mut self, ship: Ship) -> Result<ShipId, BoardError> {
        self.can_place(&ship)?;
        for &c in ship.locations() {
            self.own[c] = OwnCell::Occupied;
        }
        let id = ShipId(self.ships.len());
        self.ships.push(ship);
        Ok(id)
    }

    pub fn fleet_complete(&self) -> bool {
        self.ships.len() == FLEET_SIZE
    }

    /// Lengths still missing from a complete fleet, longest first.
    pub fn remaining_lengths(&self) -> Vec<usize> {
        let mut placed: Vec<usize> = self.ships.iter().map(Ship::length).collect();
        FLEET_LENGTHS
            .iter()
            .copied()
            .filter(|len| match placed.iter().position(|p| p == len) {
                Some(i) => {
                    placed.swap_remove(i);
                    false
                }
                None => true,
            })
            .collect()
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.0)
    }

    pub(crate) fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(id.0)
    }

    /// The ship occupying `cell`, if any.
    pub fn ship_at(&self, cell: Coord) -> Option<ShipId> {
        self.ships.iter().position(|s| s.occupies(cell)).map(ShipId)
    }

    pub fn sunk_ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.sunk.iter().filter_map(move |&id| self.ship(id))
    }

    pub fn sunk_count(&self) -> usize {
        self.sunk.len()
    }

    /// A side is defeated once its whole fleet has been sunk.
    pub fn defeated(&self) -> bool {
        self.sunk.len() == FLEET_SIZE
    }

    pub fn own_grid(&self) -> &Grid<OwnCell> {
        &self.own
    }

    pub fn guess_grid(&self) -> &Grid<GuessCell> {
        &self.guesses
    }

    /// Number of shots of ours that struck a ship.
    pub fn hits_landed(&self) -> usize {
        self.guesses.count(GuessCell::Hit) + self.guesses.count(GuessCell::Sunk)
    }

    pub(crate) fn mark_own(&mut self, cell: Coord, state: OwnCell) {
        self.own[cell] = state;
    }

    pub(crate) fn mark_guess(&mut self, cell: Coord, state: GuessCell) {
        self.guesses[cell] = state;
    }

    pub(crate) fn record_sunk(&mut self, id: ShipId) {
        if !self.sunk.contains(&id) {
            self.sunk.push(id);
        }
    }
}

impl fmt::Display for Board {
    /// Own grid on the left, guess grid on the right.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..SIZE {
            write!(f, " {}", (b'A' + c as u8) as char)?;
        }
        write!(f, "      ")?;
        for c in 0..SIZE {
            write!(f, " {}", (b'A' + c as u8) as char)?;
        }
        writeln!(f)?;
        for (r, (own_row, guess_row)) in self.own.cells.iter().zip(&self.guesses.cells).enumerate() {
            write!(f, "{:2} ", r + 1)?;
            for cell in own_row {
                let ch = match cell {
                    OwnCell::Empty => '.',
                    OwnCell::Occupied => 'S',
                    OwnCell::Hit => 'X',
                    OwnCell::Sunk => '#',
                };
                write!(f, " {}", ch)?;
            }
            write!(f, "   {:2} ", r + 1)?;
            for cell in guess_row {
                let ch = match cell {
                    GuessCell::Unknown => '.',
                    GuessCell::Hit => 'X',
                    GuessCell::Miss => 'o',
                    GuessCell::Sunk => '#',
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl From<&Board> for BoardState {
    fn from(b: &Board) -> Self {
        BoardState {
            own: b.own,
            guesses: b.guesses,
            ships: b.ships.clone(),
            sunk: b.sunk.clone(),
        }
    }
}

/// Rebuilds the board through [`Board::place_ship`], so a snapshot that
/// breaks the fleet rules, or whose grid disagrees with its ships, is
/// rejected.
impl TryFrom<BoardState> for Board {
    type Error = BoardError;

    fn try_from(state: BoardState) -> Result<Self, Self::Error> {
        let mut board = Board::new();
        for ship in state.ships {
            board.place_ship(ship)?;
        }

        let mut expected = Grid::<OwnCell>::default();
        for ship in &board.ships {
            for &c in ship.locations() {
                expected[c] = if ship.is_sunk() {
                    OwnCell::Sunk
                } else if ship.hits().contains(&c) {
                    OwnCell::Hit
                } else {
                    OwnCell::Occupied
                };
            }
        }
        if let Some((cell, _)) = state.own.iter().find(|&(c, v)| expected[c] != v) {
            return Err(BoardError::Desynced(cell));
        }

        for &id in &state.sunk {
            match board.ship(id).map(Ship::is_sunk) {
                None => return Err(BoardError::InvalidSnapshot("sunk list names a missing ship")),
                Some(false) => {
                    return Err(BoardError::InvalidSnapshot("sunk list names an intact ship"))
                }
                Some(true) if board.sunk.contains(&id) => {
                    return Err(BoardError::InvalidSnapshot("sunk list repeats a ship"))
                }
                Some(true) => board.sunk.push(id),
            }
        }
        if board.sunk.len() != board.ships.iter().filter(|s| s.is_sunk()).count() {
            return Err(BoardError::InvalidSnapshot("sunk ship missing from the sunk list"));
        }

        board.own = state.own;
        board.guesses = state.guesses;
        Ok(board)
    }
}
