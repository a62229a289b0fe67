//! Common types: board coordinates and board errors.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::config::BOARD_SIZE;

/// Errors returned by ship, board and placement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A cell lies outside the 10×10 grid.
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
    /// A ship collides with, or touches, a ship already on the board.
    #[error("ship overlaps or touches another ship")]
    OverlapOrAdjacency,
    /// Wrong ship length, non-contiguous cells, or a fleet of the wrong shape.
    #[error("invalid placement: {0}")]
    InvalidPlacement(&'static str),
    /// Hit registered on a cell the ship does not occupy.
    #[error("cell {0} is not part of this ship")]
    InvalidCell(Coord),
    /// An occupied cell has no ship recorded for it.
    #[error("no ship recorded at occupied cell {0}")]
    UnknownShip(Coord),
    /// The target board records damage the shooter never saw.
    #[error("boards disagree about cell {0}")]
    Desynced(Coord),
    /// A board snapshot contradicts its own fleet.
    #[error("inconsistent board snapshot: {0}")]
    InvalidSnapshot(&'static str),
    /// Text coordinate could not be parsed.
    #[error("coordinate must be a column A-J followed by a row 1-10")]
    BadCoordinate,
}

const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A cell on the board. Always within `[0, BOARD_SIZE)` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(u8, u8)", into = "(u8, u8)")
)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Result<Self, BoardError> {
        if row >= BOARD_SIZE as usize || col >= BOARD_SIZE as usize {
            return Err(BoardError::OutOfBounds { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// The cell `dr` rows and `dc` columns away, if it is on the board.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Coord> {
        let r = self.row as isize + dr;
        let c = self.col as isize + dc;
        if r < 0 || c < 0 {
            return None;
        }
        Coord::new(r as usize, c as usize).ok()
    }

    /// 8-connected neighbours, fewer at edges and corners.
    pub fn neighbours(self) -> impl Iterator<Item = Coord> {
        NEIGHBOURS
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// Up, down, left and right neighbours that are on the board.
    pub fn orthogonal(self) -> impl Iterator<Item = Coord> {
        ORTHOGONAL
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// Every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord { row, col }))
    }
}

impl TryFrom<(u8, u8)> for Coord {
    type Error = BoardError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Coord::new(row as usize, col as usize)
    }
}

impl From<Coord> for (u8, u8) {
    fn from(c: Coord) -> Self {
        (c.row, c.col)
    }
}

/// Column letter followed by 1-based row, e.g. `C7`.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Coord {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let col_ch = chars
            .next()
            .ok_or(BoardError::BadCoordinate)?
            .to_ascii_uppercase();
        if !col_ch.is_ascii_uppercase() {
            return Err(BoardError::BadCoordinate);
        }
        let col = (col_ch as u8 - b'A') as usize;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BoardError::BadCoordinate);
        }
        let row: usize = digits.parse().map_err(|_| BoardError::BadCoordinate)?;
        if row == 0 {
            return Err(BoardError::BadCoordinate);
        }
        Coord::new(row - 1, col)
    }
}
