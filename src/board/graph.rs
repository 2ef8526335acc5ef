//! Directed board graph: space nodes and transition edges.
//!
//! Nodes carry a `BoardSpace` record; edges carry the set of players
//! allowed to traverse them and, for waiting exits, the roll required.
//! After construction the only mutation is `set_occupant`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{BoardError, Occupant, PlayerId};

use super::space::{BoardSpace, SpaceId};

/// Index of an edge in the board graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Raw edge index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A one-step transition between two spaces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: SpaceId,
    pub to: SpaceId,

    /// Players allowed to move along this edge.
    pub allowed_traversers: SmallVec<[PlayerId; 4]>,

    /// Roll needed to take this edge (waiting exits only).
    pub required_roll: Option<u8>,
}

impl Edge {
    /// Whether `player` may move along this edge.
    #[must_use]
    pub fn allows(&self, player: PlayerId) -> bool {
        self.allowed_traversers.contains(&player)
    }
}

/// Space nodes plus directed edges with per-node adjacency.
#[derive(Clone, Debug, Default)]
pub struct BoardGraph {
    spaces: Vec<BoardSpace>,
    edges: Vec<Edge>,
    outgoing: Vec<SmallVec<[EdgeId; 2]>>,
}

impl BoardGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_space(&mut self, space: BoardSpace) -> SpaceId {
        let id = SpaceId(self.spaces.len() as u32);
        self.spaces.push(space);
        self.outgoing.push(SmallVec::new());
        id
    }

    pub(crate) fn add_edge(
        &mut self,
        from: SpaceId,
        to: SpaceId,
        allowed_traversers: impl IntoIterator<Item = PlayerId>,
        required_roll: Option<u8>,
    ) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            from,
            to,
            allowed_traversers: allowed_traversers.into_iter().collect(),
            required_roll,
        });
        self.outgoing[from.index()].push(id);
        id
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.index()]
    }

    /// Number of space nodes.
    #[must_use]
    pub fn space_count(&self) -> usize {
        self.spaces.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Snapshot of a space.
    #[must_use]
    pub fn space(&self, id: SpaceId) -> BoardSpace {
        self.spaces[id.index()]
    }

    /// Current occupant of a space.
    #[must_use]
    pub fn occupant(&self, id: SpaceId) -> Occupant {
        self.spaces[id.index()].occupied_by
    }

    /// An edge by ID.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// All spaces with their IDs, in construction order.
    pub fn spaces(&self) -> impl Iterator<Item = (SpaceId, &BoardSpace)> {
        self.spaces
            .iter()
            .enumerate()
            .map(|(i, s)| (SpaceId(i as u32), s))
    }

    /// All edges with their IDs, in construction order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId(i as u32), e))
    }

    /// Outgoing edges of a space.
    pub fn out_edges(&self, id: SpaceId) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.outgoing[id.index()]
            .iter()
            .map(move |&e| (e, &self.edges[e.index()]))
    }

    /// Ring predecessor of `to`: the source of the first edge into it
    /// that starts on another ring space.
    #[must_use]
    pub fn ring_predecessor(&self, to: SpaceId) -> Option<(SpaceId, EdgeId)> {
        self.edges().find_map(|(id, e)| {
            (e.to == to && !self.space(e.from).kind.is_private()).then_some((e.from, id))
        })
    }

    /// Overwrite the occupant of a space.
    ///
    /// Fails if the occupant is not allowed there; the graph is left
    /// unchanged in that case.
    pub fn set_occupant(&mut self, id: SpaceId, occupant: Occupant) -> Result<(), BoardError> {
        let space = &mut self.spaces[id.index()];
        if let Some(player) = occupant {
            if !space.allows(occupant) {
                return Err(BoardError::ForbiddenOccupant {
                    kind: space.kind,
                    index: space.index,
                    player,
                });
            }
        }
        space.occupied_by = occupant;
        Ok(())
    }
}
