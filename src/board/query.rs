//! Typed filtering over the board graph.
//!
//! Callers describe the spaces and edges they want with predicates
//! instead of walking the graph by hand:
//! - `SpacePredicate`: attribute equality (`Kind`, `Index`, `Owner`,
//!   `OccupiedBy`) or set membership (`KindIn`, `Allows`)
//! - `EdgePredicate`: traversal rights and roll requirements
//! - `Query`: a conjunction of both, producing a `SubgraphView`
//!
//! Filtering never mutates the graph, so repeated queries on an
//! unchanged board return identical results in identical order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{BoardError, Occupant, PlayerId};

use super::graph::{BoardGraph, Edge, EdgeId};
use super::space::{BoardSpace, SpaceId, SpaceKind};

/// Predicate over a single space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpacePredicate {
    /// Space kind equals the value.
    Kind(SpaceKind),
    /// Space kind is one of the values.
    KindIn(SmallVec<[SpaceKind; 3]>),
    /// Kind-specific index equals the value.
    Index(usize),
    /// Owner equals the value (`None` for ring spaces).
    Owner(Option<PlayerId>),
    /// Occupant equals the value (`None` for empty).
    OccupiedBy(Occupant),
    /// The player is among the space's allowed occupants.
    Allows(PlayerId),
}

impl SpacePredicate {
    /// Evaluate against a space.
    #[must_use]
    pub fn matches(&self, space: &BoardSpace) -> bool {
        match self {
            SpacePredicate::Kind(kind) => space.kind == *kind,
            SpacePredicate::KindIn(kinds) => kinds.contains(&space.kind),
            SpacePredicate::Index(index) => space.index == *index,
            SpacePredicate::Owner(owner) => space.owner == *owner,
            SpacePredicate::OccupiedBy(occupant) => space.occupied_by == *occupant,
            SpacePredicate::Allows(player) => space.allows(Some(*player)),
        }
    }
}

/// Predicate over a single edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgePredicate {
    /// The player is among the edge's allowed traversers.
    TraversableBy(PlayerId),
    /// The edge can be taken with any roll.
    Unconditional,
}

impl EdgePredicate {
    /// Evaluate against an edge.
    #[must_use]
    pub fn matches(&self, edge: &Edge) -> bool {
        match self {
            EdgePredicate::TraversableBy(player) => edge.allows(*player),
            EdgePredicate::Unconditional => edge.required_roll.is_none(),
        }
    }
}

/// Conjunction of space and edge predicates.
///
/// ```
/// use clovek::board::{Query, SpaceKind, SpacePredicate};
///
/// let query = Query::new()
///     .with_space(SpacePredicate::Kind(SpaceKind::Main))
///     .with_space(SpacePredicate::OccupiedBy(None));
/// assert_eq!(query.space_predicates().len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    spaces: Vec<SpacePredicate>,
    edges: Vec<EdgePredicate>,
}

impl Query {
    /// A query matching everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a space predicate (builder pattern).
    #[must_use]
    pub fn with_space(mut self, predicate: SpacePredicate) -> Self {
        self.spaces.push(predicate);
        self
    }

    /// Add an edge predicate (builder pattern).
    #[must_use]
    pub fn with_edge(mut self, predicate: EdgePredicate) -> Self {
        self.edges.push(predicate);
        self
    }

    /// Space predicates of this query.
    #[must_use]
    pub fn space_predicates(&self) -> &[SpacePredicate] {
        &self.spaces
    }

    /// Edge predicates of this query.
    #[must_use]
    pub fn edge_predicates(&self) -> &[EdgePredicate] {
        &self.edges
    }

    fn accepts_space(&self, space: &BoardSpace) -> bool {
        self.spaces.iter().all(|p| p.matches(space))
    }

    fn accepts_edge(&self, edge: &Edge) -> bool {
        self.edges.iter().all(|p| p.matches(edge))
    }
}

/// Read-only view of the spaces and edges matching a `Query`.
///
/// An edge is in the view only if it matches the edge predicates and
/// both of its endpoints are in the view.
#[derive(Clone, Debug)]
pub struct SubgraphView<'g> {
    graph: &'g BoardGraph,
    members: Vec<bool>,
    edges: Vec<EdgeId>,
}

impl<'g> SubgraphView<'g> {
    /// Whether a space is in the view.
    #[must_use]
    pub fn contains(&self, id: SpaceId) -> bool {
        self.members.get(id.index()).copied().unwrap_or(false)
    }

    /// Spaces in the view, in graph order.
    pub fn spaces(&self) -> impl Iterator<Item = SpaceId> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(|&(_, &member)| member)
            .map(|(i, _)| SpaceId(i as u32))
    }

    /// Edges in the view, in graph order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &'g Edge)> + '_ {
        self.edges.iter().map(|&e| (e, self.graph.edge(e)))
    }

    /// Successors of a space within the view.
    #[must_use]
    pub fn successors(&self, id: SpaceId) -> SmallVec<[SpaceId; 2]> {
        self.edges()
            .filter(|(_, e)| e.from == id)
            .map(|(_, e)| e.to)
            .collect()
    }

    /// Follow the unique successor from `root` until none is left.
    ///
    /// Fails if some space on the way has more than one successor, or
    /// if the walk revisits a space.
    pub fn simple_path_from(&self, root: SpaceId) -> Result<Vec<SpaceId>, BoardError> {
        if !self.contains(root) {
            return Err(BoardError::Inconsistent(format!(
                "path root {} is outside the view",
                self.graph.space(root)
            )));
        }

        let mut visited = vec![false; self.members.len()];
        let mut path = vec![root];
        visited[root.index()] = true;
        let mut current = root;

        loop {
            let next = self.successors(current);
            match next.as_slice() {
                [] => return Ok(path),
                [only] => {
                    if visited[only.index()] {
                        return Err(BoardError::Inconsistent(format!(
                            "path from {} loops back to {}",
                            self.graph.space(root),
                            self.graph.space(*only)
                        )));
                    }
                    visited[only.index()] = true;
                    path.push(*only);
                    current = *only;
                }
                _ => {
                    return Err(BoardError::Inconsistent(format!(
                        "path branches at {}",
                        self.graph.space(current)
                    )));
                }
            }
        }
    }
}

impl BoardGraph {
    /// IDs of all spaces matching every predicate, in graph order.
    #[must_use]
    pub fn filter_spaces(&self, predicates: &[SpacePredicate]) -> Vec<SpaceId> {
        self.spaces()
            .filter(|(_, space)| predicates.iter().all(|p| p.matches(space)))
            .map(|(id, _)| id)
            .collect()
    }

    /// View restricted to the spaces and edges matching `query`.
    #[must_use]
    pub fn filter_subgraph(&self, query: &Query) -> SubgraphView<'_> {
        let members: Vec<bool> = self
            .spaces()
            .map(|(_, space)| query.accepts_space(space))
            .collect();

        let edges = self
            .edges()
            .filter(|(_, edge)| {
                members[edge.from.index()] && members[edge.to.index()] && query.accepts_edge(edge)
            })
            .map(|(id, _)| id)
            .collect();

        SubgraphView {
            graph: self,
            members,
            edges,
        }
    }

    /// Resolve `(kind, index, owner)` to a space ID.
    ///
    /// `owner` is required for waiting and home spaces and ignored for
    /// ring spaces. Returns `Ok(None)` when nothing matches, and
    /// `Inconsistent` when more than one space matches.
    pub fn resolve_identity(
        &self,
        kind: SpaceKind,
        index: usize,
        owner: Option<PlayerId>,
    ) -> Result<Option<SpaceId>, BoardError> {
        let mut predicates = vec![SpacePredicate::Kind(kind), SpacePredicate::Index(index)];
        if kind.is_private() {
            let owner = owner.ok_or(BoardError::MissingOwner { kind })?;
            predicates.push(SpacePredicate::Owner(Some(owner)));
        }

        match self.filter_spaces(&predicates).as_slice() {
            [] => Ok(None),
            [id] => Ok(Some(*id)),
            matches => Err(BoardError::Inconsistent(format!(
                "{} spaces match {} {} (owner {:?})",
                matches.len(),
                kind,
                index,
                owner
            ))),
        }
    }

    /// Snapshot of the space identified by `(kind, index, owner)`.
    pub fn space_by_identity(
        &self,
        kind: SpaceKind,
        index: usize,
        owner: Option<PlayerId>,
    ) -> Result<Option<BoardSpace>, BoardError> {
        Ok(self
            .resolve_identity(kind, index, owner)?
            .map(|id| self.space(id)))
    }

    /// Live ID of the space a snapshot describes.
    pub fn locate(&self, snapshot: &BoardSpace) -> Result<SpaceId, BoardError> {
        self.resolve_identity(snapshot.kind, snapshot.index, snapshot.owner)?
            .ok_or_else(|| {
                BoardError::Inconsistent(format!("no space matches snapshot {}", snapshot))
            })
    }
}
