//! Match loop: fleet placement, alternating turns and the end of the game.

use core::fmt;

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::Rng;
use thiserror::Error;

use crate::common::{BoardError, Coord};
use crate::engine::{resolve_shot, ShotOutcome};
use crate::player::Side;

/// Stage of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Both sides are building fleets.
    Placement,
    /// Sides alternate shots.
    Playing,
    /// The match is over, see [`Match::result`].
    Finished,
}

/// How a match ended. Side indices refer to the order the sides were passed
/// to [`Match::new`], not to who fired first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchResult {
    /// `winner` sank the whole fleet of `loser` using `shots` shots.
    Won {
        winner: usize,
        loser: usize,
        shots: usize,
    },
    /// A side quit during placement. There is no winner.
    Withdrawn { side: usize },
}

impl MatchResult {
    pub fn winner(&self) -> Option<usize> {
        match *self {
            MatchResult::Won { winner, .. } => Some(winner),
            MatchResult::Withdrawn { .. } => None,
        }
    }
}

/// Errors that stop a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("operation needs phase {expected:?}, match is in {found:?}")]
    WrongPhase { expected: Phase, found: Phase },
    /// The side to move produced no cell to fire at.
    #[error("side {side} has no shot to make")]
    NoShot { side: usize },
}

/// One fired shot, as seen by a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub shooter: usize,
    pub cell: Coord,
    /// `None` if the cell had already been fired upon; the same side moves again.
    pub outcome: Option<ShotOutcome>,
}

/// A match between two sides.
pub struct Match {
    sides: [Side; 2],
    rng: SmallRng,
    phase: Phase,
    active: usize,
    turns: usize,
    result: Option<MatchResult>,
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("sides", &self.sides)
            .field("phase", &self.phase)
            .field("active", &self.active)
            .field("turns", &self.turns)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

impl Match {
    pub fn new(first: Side, second: Side, rng: SmallRng) -> Self {
        Self {
            sides: [first, second],
            rng,
            phase: Phase::Placement,
            active: 0,
            turns: 0,
            result: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sides(&self) -> &[Side; 2] {
        &self.sides
    }

    pub fn side(&self, index: usize) -> Option<&Side> {
        self.sides.get(index)
    }

    /// Index of the side whose turn it is.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Number of resolved shots so far, both sides together.
    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), MatchError> {
        if self.phase != expected {
            return Err(MatchError::WrongPhase {
                expected,
                found: self.phase,
            });
        }
        Ok(())
    }

    fn finish(&mut self, result: MatchResult) {
        info!("match finished: {:?}", result);
        self.result = Some(result);
        self.phase = Phase::Finished;
    }

    /// Collect a validated fleet from each side, then pick who fires first.
    ///
    /// A rejected layout is reported back to its side and requested again.
    /// A side that withdraws ends the match without a winner.
    pub fn setup(&mut self) -> Result<Phase, MatchError> {
        self.expect_phase(Phase::Placement)?;
        for index in 0..self.sides.len() {
            let side = &mut self.sides[index];
            loop {
                let Some(layout) = side.propose_fleet(&mut self.rng) else {
                    info!("{} withdrew during placement", side.name());
                    self.finish(MatchResult::Withdrawn { side: index });
                    return Ok(self.phase);
                };
                match side.place_fleet(&layout) {
                    Ok(()) => break,
                    Err(err) => {
                        warn!("rejected fleet from {}: {}", side.name(), err);
                        side.placement_rejected(err);
                    }
                }
            }
        }
        self.active = self.rng.random_range(0..self.sides.len());
        self.phase = Phase::Playing;
        info!("{} fires first", self.sides[self.active].name());
        Ok(self.phase)
    }

    /// Let the active side fire once.
    ///
    /// A shot on an already resolved cell changes nothing and leaves the
    /// turn with the same side. Sinking the last enemy ship finishes the
    /// match immediately.
    pub fn play_turn(&mut self) -> Result<TurnReport, MatchError> {
        self.expect_phase(Phase::Playing)?;
        let active = self.active;
        let [first, second] = &mut self.sides;
        let (shooter, target) = if active == 0 {
            (first, second)
        } else {
            (second, first)
        };

        let cell = shooter
            .choose_shot(&mut self.rng)
            .ok_or(MatchError::NoShot { side: active })?;
        let outcome = resolve_shot(shooter, target, cell)?;
        shooter.shot_resolved(cell, outcome);

        if let Some(outcome) = outcome {
            self.turns += 1;
            if target.board().defeated() {
                let shots = shooter.shots_fired();
                self.finish(MatchResult::Won {
                    winner: active,
                    loser: 1 - active,
                    shots,
                });
            } else if outcome.passes_turn() {
                self.active = 1 - active;
            }
        }

        Ok(TurnReport {
            shooter: active,
            cell,
            outcome,
        })
    }

    /// Drive the match from its current phase to the end.
    pub fn run(&mut self) -> Result<MatchResult, MatchError> {
        if self.phase == Phase::Placement {
            self.setup()?;
        }
        while self.phase == Phase::Playing {
            self.play_turn()?;
        }
        self.result.ok_or(MatchError::WrongPhase {
            expected: Phase::Finished,
            found: self.phase,
        })
    }
}
