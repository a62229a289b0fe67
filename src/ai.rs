//! Computer opponent targeting: random search until a ship is hit, then a
//! directional hunt around the hit until that ship sinks.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{GuessCell, Grid, Mask, ShipId};
use crate::common::Coord;

/// Per-ship hunt state. Lives from the first hit on a ship until it sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Hunt {
    ship: ShipId,
    /// Hits on the hunted ship, oldest first.
    hits: Vec<Coord>,
    /// Orthogonal neighbours of the first hit still to try, in shuffled order.
    candidates: VecDeque<Coord>,
}

impl Hunt {
    fn new(ship: ShipId, first_hit: Coord) -> Self {
        Self {
            ship,
            hits: Vec::from([first_hit]),
            candidates: VecDeque::new(),
        }
    }
}

/// Which mode the targeting strategy is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Search,
    Hunt,
}

/// Targeting state of a computer opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targeting {
    available: Mask,
    hunt: Option<Hunt>,
    last_fired: Option<Coord>,
}

impl Default for Targeting {
    fn default() -> Self {
        Self::new()
    }
}

impl Targeting {
    /// Fresh state: every cell of the board is available.
    pub fn new() -> Self {
        Self {
            available: Mask::full(),
            hunt: None,
            last_fired: None,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.hunt.is_some() {
            Mode::Hunt
        } else {
            Mode::Search
        }
    }

    /// Cells not yet fired upon and not ruled out.
    pub fn available(&self) -> Mask {
        self.available
    }

    pub fn is_available(&self, cell: Coord) -> bool {
        self.available.contains_cell(cell)
    }

    pub fn last_fired(&self) -> Option<Coord> {
        self.last_fired
    }

    /// The enemy ship currently being hunted.
    pub fn target(&self) -> Option<ShipId> {
        self.hunt.as_ref().map(|h| h.ship)
    }

    /// Choose the next cell to fire at and remove it from the available
    /// pool. `guesses` is this side's record of shots at the opponent.
    /// Returns `None` only once every cell has been used up.
    pub fn choose_shot<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        guesses: &Grid<GuessCell>,
    ) -> Option<Coord> {
        let cell = match self.hunt_shot(rng, guesses) {
            Some(cell) => cell,
            None => self.search_shot(rng)?,
        };
        self.take(cell);
        Some(cell)
    }

    fn search_shot<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Coord> {
        let remaining = self.available.count_ones();
        if remaining == 0 {
            return None;
        }
        let (r, c) = self.available.nth_set(rng.random_range(0..remaining))?;
        Coord::new(r, c).ok()
    }

    fn hunt_shot<R: Rng + ?Sized>(&mut self, rng: &mut R, guesses: &Grid<GuessCell>) -> Option<Coord> {
        let available = self.available;
        let is_free = |c: &Coord| available.contains_cell(*c);
        let last_missed = self
            .last_fired
            .is_some_and(|c| guesses[c] == GuessCell::Miss);
        let last_fired = self.last_fired;
        let hunt = self.hunt.as_mut()?;

        let next = match hunt.hits.as_slice() {
            [] => None,
            &[only] => {
                if !last_missed {
                    // Fresh hit: probe its orthogonal neighbours in random order.
                    let mut around: Vec<Coord> = only.orthogonal().filter(is_free).collect();
                    around.shuffle(rng);
                    hunt.candidates = around.into();
                }
                core::iter::from_fn(|| hunt.candidates.pop_front()).find(is_free)
            }
            &[first, .., last] => {
                let (dr, dc) = axis_step(first, last)?;
                let current = last_fired.unwrap_or(last);
                match current.offset(dr, dc).filter(is_free) {
                    Some(ahead) if !last_missed => Some(ahead),
                    // Missed or ran out of room: come back from the other end.
                    _ => first.offset(-dr, -dc).filter(is_free),
                }
            }
        };

        if next.is_none() {
            warn!(
                "hunt for ship {:?} has no cell left to try; back to search",
                hunt.ship
            );
            self.hunt = None;
        }
        next
    }

    fn take(&mut self, cell: Coord) {
        self.available.remove(cell);
    }

    /// Record a miss at `cell`.
    pub(crate) fn record_miss(&mut self, cell: Coord) {
        self.take(cell);
        self.last_fired = Some(cell);
    }

    /// Record a hit on `ship` at `cell` that did not sink it.
    pub(crate) fn record_hit(&mut self, cell: Coord, ship: ShipId) {
        self.take(cell);
        self.last_fired = Some(cell);
        match &mut self.hunt {
            Some(hunt) if hunt.ship == ship => hunt.hits.push(cell),
            _ => {
                debug!("hunting ship {:?} from {}", ship, cell);
                self.hunt = Some(Hunt::new(ship, cell));
            }
        }
    }

    /// Record that the hunted ship sank; `discarded` cells can no longer
    /// hold a ship and are dropped from the pool.
    pub(crate) fn record_sunk(&mut self, cell: Coord, discarded: Mask) {
        self.take(cell);
        self.available &= !discarded;
        self.hunt = None;
        self.last_fired = None;
    }
}

/// Unit step from `first` towards `last`, which must share a row or column.
fn axis_step(first: Coord, last: Coord) -> Option<(isize, isize)> {
    let dr = last.row() as isize - first.row() as isize;
    let dc = last.col() as isize - first.col() as isize;
    match (dr, dc) {
        (0, 0) => None,
        (0, dc) => Some((0, dc.signum())),
        (dr, 0) => Some((dr.signum(), 0)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn axis_step_follows_the_line() {
        assert_eq!(axis_step(c(2, 3), c(2, 4)), Some((0, 1)));
        assert_eq!(axis_step(c(2, 3), c(2, 1)), Some((0, -1)));
        assert_eq!(axis_step(c(5, 5), c(2, 5)), Some((-1, 0)));
        assert_eq!(axis_step(c(1, 1), c(2, 2)), None);
    }

    #[test]
    fn sinking_clears_hunt_and_discards_halo() {
        let mut t = Targeting::new();
        t.record_hit(c(0, 0), ShipId(3));
        assert_eq!(t.mode(), Mode::Hunt);
        let mut halo = Mask::new();
        halo.insert(c(0, 1));
        halo.insert(c(1, 0));
        halo.insert(c(1, 1));
        t.record_sunk(c(0, 0), halo);
        assert_eq!(t.mode(), Mode::Search);
        assert_eq!(t.available().count_ones(), 96);
        assert_eq!(t.last_fired(), None);
    }
}
