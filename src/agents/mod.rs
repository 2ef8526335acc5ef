//! Decision strategies.
//!
//! A strategy only ever sees the current state and the legal
//! move-sets; it returns the index of the one to play. Strategies are
//! injected into the match driver, never into the engine.

pub mod policy;

pub use policy::{AgentKind, FirstLegal, FurthestAlong, Human, Strategy, UniformRandom};
