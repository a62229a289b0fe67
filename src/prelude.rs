//! Commonly used types for ease of import.

pub use crate::{
    resolve_shot, validate_fleet, Board, BoardError, Coord, Match, MatchResult, Orientation,
    Phase, ShipPlacement, ShotOutcome, Side, TurnInput,
};

#[cfg(feature = "std")]
pub use crate::init_logging;
