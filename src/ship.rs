//! Ships: length, orientation, occupied cells and damage.

use alloc::vec::Vec;

use crate::board::Mask;
use crate::common::{BoardError, Coord};
use crate::config::MAX_SHIP_LENGTH;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Cells run left to right along a row.
    Horizontal,
    /// Cells run top to bottom along a column.
    Vertical,
}

impl Orientation {
    /// Row and column step from one cell of a ship to the next.
    pub fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }

    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A single vessel. Created unplaced, then given its cells exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ShipRecord")
)]
pub struct Ship {
    length: usize,
    orientation: Orientation,
    locations: Vec<Coord>,
    /// Hit cells in the order they were struck.
    hits: Vec<Coord>,
}

impl Ship {
    /// Create an unplaced ship. Ships start out vertical.
    pub fn new(length: usize) -> Result<Self, BoardError> {
        if length == 0 || length > MAX_SHIP_LENGTH {
            return Err(BoardError::InvalidPlacement(
                "ship length must be between 1 and 4",
            ));
        }
        Ok(Ship {
            length,
            orientation: Orientation::Vertical,
            locations: Vec::new(),
            hits: Vec::new(),
        })
    }

    /// Create a ship of `length` whose first cell is `anchor`, extending
    /// right when horizontal and down when vertical.
    pub fn at(length: usize, orientation: Orientation, anchor: Coord) -> Result<Self, BoardError> {
        let mut ship = Ship::new(length)?;
        ship.set_orientation(orientation)?;
        let (dr, dc) = orientation.step();
        let cells = (0..length)
            .map(|i| Coord::new(anchor.row() + i * dr, anchor.col() + i * dc))
            .collect::<Result<Vec<_>, _>>()?;
        ship.assign_locations(cells)?;
        Ok(ship)
    }

    /// Change orientation. Only allowed before the ship is placed.
    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<(), BoardError> {
        if self.is_placed() {
            return Err(BoardError::InvalidPlacement("ship is already placed"));
        }
        self.orientation = orientation;
        Ok(())
    }

    /// Fix the ship's cells. They must number exactly `length` and form a
    /// contiguous run along the ship's orientation, in any order.
    pub fn assign_locations(&mut self, mut cells: Vec<Coord>) -> Result<(), BoardError> {
        if self.is_placed() {
            return Err(BoardError::InvalidPlacement("ship is already placed"));
        }
        if cells.len() != self.length {
            return Err(BoardError::InvalidPlacement(
                "cell count does not match ship length",
            ));
        }
        cells.sort_unstable();
        let (dr, dc) = self.orientation.step();
        let contiguous = cells
            .windows(2)
            .all(|w| w[0].row() + dr == w[1].row() && w[0].col() + dc == w[1].col());
        if !contiguous {
            return Err(BoardError::InvalidPlacement(
                "cells are not contiguous along the ship's orientation",
            ));
        }
        self.locations = cells;
        Ok(())
    }

    /// Record a hit on `cell`. Hitting an already damaged cell changes nothing.
    pub fn register_hit(&mut self, cell: Coord) -> Result<(), BoardError> {
        if !self.locations.contains(&cell) {
            return Err(BoardError::InvalidCell(cell));
        }
        if !self.hits.contains(&cell) {
            self.hits.push(cell);
        }
        Ok(())
    }

    /// True once every cell has been hit. Never reverts.
    pub fn is_sunk(&self) -> bool {
        self.is_placed() && self.hits.len() == self.locations.len()
    }

    pub fn is_placed(&self) -> bool {
        !self.locations.is_empty()
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupied cells, sorted from the top-left end.
    pub fn locations(&self) -> &[Coord] {
        &self.locations
    }

    /// Hit cells in the order they were struck.
    pub fn hits(&self) -> &[Coord] {
        &self.hits
    }

    pub fn occupies(&self, cell: Coord) -> bool {
        self.locations.contains(&cell)
    }

    /// Footprint of the ship as a cell set.
    pub fn mask(&self) -> Mask {
        let mut mask = Mask::new();
        for &c in &self.locations {
            mask.insert(c);
        }
        mask
    }
}

/// Serialized form of a [`Ship`]. Deserializing goes through the same
/// checks as building a ship by hand.
#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct ShipRecord {
    length: usize,
    orientation: Orientation,
    locations: Vec<Coord>,
    hits: Vec<Coord>,
}

#[cfg(feature = "std")]
impl TryFrom<ShipRecord> for Ship {
    type Error = BoardError;

    fn try_from(record: ShipRecord) -> Result<Self, Self::Error> {
        let mut ship = Ship::new(record.length)?;
        ship.set_orientation(record.orientation)?;
        if !record.locations.is_empty() {
            ship.assign_locations(record.locations)?;
        }
        for cell in record.hits {
            ship.register_hit(cell)?;
        }
        Ok(ship)
    }
}
