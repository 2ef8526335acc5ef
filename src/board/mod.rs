//! The board: spaces, the directed graph joining them, typed queries
//! over that graph, and the construction of a full game board.

pub mod graph;
pub mod query;
pub mod render;
pub mod space;
pub mod topology;

pub use graph::{BoardGraph, Edge, EdgeId};
pub use query::{EdgePredicate, Query, SpacePredicate, SubgraphView};
pub use space::{BoardSpace, SpaceId, SpaceKind};
pub use topology::Topology;
