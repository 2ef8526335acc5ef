//! Core types: players, configuration, errors, RNG, and the game state.
//!
//! Nothing here knows the move rules; those live in `rules`.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::BoardConfig;
pub use error::{BoardError, ConfigError, ExperimentError, MatchError};
pub use player::{Occupant, PlayerId, PlayerMap, Roster};
pub use rng::{Dice, GameRng, ScriptedDice, SeededDice};
pub use state::GameState;
