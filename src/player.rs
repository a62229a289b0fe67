//! The two kinds of side in a match and the interface to whoever drives a
//! human side.
//!
//! A [`Side`] owns its board and shot statistics. What differs between a
//! human and the computer is captured by [`Controller`]: humans delegate to a
//! [`TurnInput`] collaborator (a UI, a script), the computer places its fleet
//! at random and aims with [`Targeting`].

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use rand::Rng;

use crate::ai::Targeting;
use crate::board::{Board, GuessCell, Grid, Mask};
use crate::common::{BoardError, Coord};
use crate::engine::ShotOutcome;
use crate::placement::{random_layout, validate_fleet, ShipPlacement};

/// Name given to computer-controlled sides.
pub const OPPONENT_NAME: &str = "CPU";

/// Source of decisions for a human-controlled side.
pub trait TurnInput {
    /// Provide a complete fleet layout, or `None` to withdraw from the match.
    fn place_fleet(&mut self) -> Option<Vec<ShipPlacement>>;

    /// The last layout was rejected; the next `place_fleet` call should
    /// offer a corrected one.
    fn placement_rejected(&mut self, _err: BoardError) {}

    /// Choose the next cell to fire at, given what is known so far.
    fn choose_shot(&mut self, guesses: &Grid<GuessCell>) -> Option<Coord>;

    /// Result of the last shot. `None` means the cell had already been
    /// resolved and the turn did not advance.
    fn shot_resolved(&mut self, _cell: Coord, _outcome: Option<ShotOutcome>) {}
}

/// How a side makes its decisions.
pub enum Controller {
    Human(Box<dyn TurnInput>),
    Opponent(Targeting),
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Controller::Human(_) => f.write_str("Human"),
            Controller::Opponent(t) => f.debug_tuple("Opponent").field(&t.mode()).finish(),
        }
    }
}

/// One participant in a match.
#[derive(Debug)]
pub struct Side {
    name: String,
    pub(crate) controller: Controller,
    pub(crate) board: Board,
    pub(crate) shots_fired: usize,
    /// Cells known to be unusable. Only filled in for computer sides.
    pub(crate) discarded: Mask,
}

impl Side {
    pub fn human(name: impl Into<String>, input: Box<dyn TurnInput>) -> Self {
        Self::with_controller(name.into(), Controller::Human(input))
    }

    pub fn opponent() -> Self {
        Self::with_controller(OPPONENT_NAME.into(), Controller::Opponent(Targeting::new()))
    }

    fn with_controller(name: String, controller: Controller) -> Self {
        Self {
            name,
            controller,
            board: Board::new(),
            shots_fired: 0,
            discarded: Mask::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_opponent(&self) -> bool {
        matches!(self.controller, Controller::Opponent(_))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn shots_fired(&self) -> usize {
        self.shots_fired
    }

    pub fn discarded(&self) -> Mask {
        self.discarded
    }

    /// Share of shots that struck a ship, in `[0, 1]`.
    pub fn accuracy(&self) -> f64 {
        if self.shots_fired == 0 {
            0.0
        } else {
            self.board.hits_landed() as f64 / self.shots_fired as f64
        }
    }

    /// Targeting state, for computer sides.
    pub fn targeting(&self) -> Option<&Targeting> {
        match &self.controller {
            Controller::Opponent(t) => Some(t),
            Controller::Human(_) => None,
        }
    }

    /// Ask this side for a fleet layout. The computer always produces one;
    /// a human may withdraw.
    pub fn propose_fleet<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Vec<ShipPlacement>> {
        match &mut self.controller {
            Controller::Human(input) => input.place_fleet(),
            Controller::Opponent(_) => Some(random_layout(rng)),
        }
    }

    /// Validate `layout` and install it as this side's fleet.
    pub fn place_fleet(&mut self, layout: &[ShipPlacement]) -> Result<(), BoardError> {
        self.board = validate_fleet(layout)?;
        Ok(())
    }

    pub(crate) fn placement_rejected(&mut self, err: BoardError) {
        if let Controller::Human(input) = &mut self.controller {
            input.placement_rejected(err);
        }
    }

    /// Pick the next cell to fire at.
    pub fn choose_shot<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coord> {
        match &mut self.controller {
            Controller::Human(input) => input.choose_shot(self.board.guess_grid()),
            Controller::Opponent(t) => t.choose_shot(rng, self.board.guess_grid()),
        }
    }

    pub(crate) fn shot_resolved(&mut self, cell: Coord, outcome: Option<ShotOutcome>) {
        if let Controller::Human(input) = &mut self.controller {
            input.shot_resolved(cell, outcome);
        }
    }
}

/// A [`TurnInput`] that replays prepared layouts and shots. Once its queues
/// are empty it withdraws (placement) or stops answering (shots).
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    layouts: VecDeque<Vec<ShipPlacement>>,
    shots: VecDeque<Coord>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: Vec<ShipPlacement>) -> Self {
        self.layouts.push_back(layout);
        self
    }

    pub fn with_shots(mut self, shots: impl IntoIterator<Item = Coord>) -> Self {
        self.shots.extend(shots);
        self
    }
}

impl TurnInput for ScriptedInput {
    fn place_fleet(&mut self) -> Option<Vec<ShipPlacement>> {
        self.layouts.pop_front()
    }

    fn choose_shot(&mut self, _guesses: &Grid<GuessCell>) -> Option<Coord> {
        self.shots.pop_front()
    }
}
