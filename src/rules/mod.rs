//! Game rules over a `GameState`.
//!
//! - `moves`: move values handed to strategies and the mutator
//! - `engine`: destination resolution and legal move enumeration
//! - `mutator`: applying moves and win detection
//!
//! The engine and mutator are inherent methods on `GameState`, so the
//! board graph only ever changes through `&mut GameState`.

pub mod engine;
pub mod moves;
pub mod mutator;

pub use moves::{MoveContainer, MoveKind, MoveSet};
