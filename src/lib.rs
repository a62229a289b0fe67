#![cfg_attr(not(feature = "std"), no_std)]

//! Two-player Battleship engine: ten-ship fleets on 10×10 boards, no ships
//! touching, one shot per turn, and a computer opponent that searches at
//! random and then hunts along the line of a hit ship.

extern crate alloc;

mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod engine;
mod game;
#[cfg(feature = "std")]
mod logging;
mod placement;
mod player;
pub mod prelude;
mod ship;

pub use ai::{Mode, Targeting};
pub use bitboard::{BitBoard, BitBoardError, SetBits};
pub use board::*;
pub use common::*;
pub use config::*;
pub use engine::{resolve_shot, ShotOutcome};
pub use game::{Match, MatchError, MatchResult, Phase, TurnReport};
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use placement::{random_layout, random_placement, validate_fleet, ShipPlacement};
pub use player::{Controller, ScriptedInput, Side, TurnInput, OPPONENT_NAME};
pub use ship::*;
