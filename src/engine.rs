//! Shot resolution: applies one shot from one side to the other and updates
//! both boards, the shooter's statistics and, for the computer, its
//! targeting state.

use log::{debug, trace};

use crate::board::{Board, GuessCell, Mask, OwnCell, ShipId};
use crate::common::{BoardError, Coord};
use crate::player::{Controller, Side};

/// Result of a resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// Open water.
    Miss,
    /// Struck the given ship without sinking it.
    Hit(ShipId),
    /// Struck the last intact cell of the given ship.
    Sunk(ShipId),
}

impl ShotOutcome {
    /// Whether the right to fire moves to the other side. Every resolved
    /// shot passes the turn; a hit does not earn another shot.
    pub fn passes_turn(&self) -> bool {
        true
    }

    /// Ship that was struck, if any.
    pub fn ship(&self) -> Option<ShipId> {
        match *self {
            ShotOutcome::Miss => None,
            ShotOutcome::Hit(id) | ShotOutcome::Sunk(id) => Some(id),
        }
    }
}

/// Fire `shooter`'s shot at `cell` on `target`'s board.
///
/// Returns `Ok(None)` without touching any state if the shooter has already
/// resolved a shot on `cell`. Errors mean the two boards are inconsistent
/// and are not recoverable by retrying.
pub fn resolve_shot(
    shooter: &mut Side,
    target: &mut Side,
    cell: Coord,
) -> Result<Option<ShotOutcome>, BoardError> {
    if shooter.board.guess_grid()[cell].is_resolved() {
        trace!("{} re-targeted {}; ignored", shooter.name(), cell);
        return Ok(None);
    }

    let outcome = match target.board.own_grid()[cell] {
        OwnCell::Empty => {
            shooter.shots_fired += 1;
            shooter.board.mark_guess(cell, GuessCell::Miss);
            if let Controller::Opponent(t) = &mut shooter.controller {
                t.record_miss(cell);
            }
            ShotOutcome::Miss
        }
        OwnCell::Occupied => {
            let id = target.board.ship_at(cell).ok_or(BoardError::UnknownShip(cell))?;
            let ship = target.board.ship_mut(id).ok_or(BoardError::UnknownShip(cell))?;
            ship.register_hit(cell)?;
            shooter.shots_fired += 1;

            if ship.is_sunk() {
                let mut halo = Mask::new();
                for &c in ship.hits() {
                    halo |= Board::surrounding_cells(c);
                }
                let cells = ship.mask();
                for (r, col) in cells.iter_set_bits() {
                    let c = Coord::new(r, col)?;
                    target.board.mark_own(c, OwnCell::Sunk);
                    shooter.board.mark_guess(c, GuessCell::Sunk);
                }
                target.board.record_sunk(id);
                if let Controller::Opponent(t) = &mut shooter.controller {
                    shooter.discarded |= halo;
                    t.record_sunk(cell, shooter.discarded);
                }
                ShotOutcome::Sunk(id)
            } else {
                target.board.mark_own(cell, OwnCell::Hit);
                shooter.board.mark_guess(cell, GuessCell::Hit);
                if let Controller::Opponent(t) = &mut shooter.controller {
                    t.record_hit(cell, id);
                }
                ShotOutcome::Hit(id)
            }
        }
        OwnCell::Hit | OwnCell::Sunk => return Err(BoardError::Desynced(cell)),
    };

    debug!(
        "{} fired at {}: {:?} ({} shots)",
        shooter.name(),
        cell,
        outcome,
        shooter.shots_fired
    );
    Ok(Some(outcome))
}
