//! # clovek
//!
//! Board-state model and move engine for Clovek ne jezi se, the
//! cross-and-circle race game of the Ludo family.
//!
//! ## Design Principles
//!
//! 1. **One Owned Board**: each `GameState` owns its board graph. The
//!    engine reads it through `&GameState`, the mutator writes it
//!    through `&mut GameState`.
//!
//! 2. **Typed Graph, Typed Queries**: spaces and edges are fixed
//!    records, found through predicate queries rather than ad hoc walks.
//!
//! 3. **Paths, Not Searches**: each player's ring plus home lane is a
//!    simple path checked at construction, so moving a piece is index
//!    arithmetic.
//!
//! 4. **Injected Collaborators**: dice and decision strategies are
//!    traits handed to the match driver, never to the engine.
//!
//! ## Modules
//!
//! - `core`: players, configuration, errors, RNG and dice, game state
//! - `board`: spaces, graph, queries, topology, text rendering
//! - `rules`: move values, move engine, state mutator
//! - `agents`: decision strategies
//! - `play`: match driver and batch experiments

pub mod agents;
pub mod board;
pub mod core;
pub mod play;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    BoardConfig, BoardError, ConfigError, Dice, ExperimentError, GameRng, GameState, MatchError,
    Occupant, PlayerId, PlayerMap, Roster, ScriptedDice, SeededDice,
};

pub use crate::board::{
    BoardGraph, BoardSpace, Edge, EdgeId, EdgePredicate, Query, SpaceId, SpaceKind,
    SpacePredicate, SubgraphView, Topology,
};

pub use crate::rules::{MoveContainer, MoveKind, MoveSet};

pub use crate::agents::{AgentKind, FirstLegal, FurthestAlong, Human, Strategy, UniformRandom};

pub use crate::play::{
    run_experiment, ExperimentConfig, ExperimentSummary, Match, MatchOutcome, MatchSettings,
    TurnReport,
};
