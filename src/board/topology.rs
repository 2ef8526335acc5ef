//! Board topology construction.
//!
//! For `P` players, `H` pieces per player and section length `S`:
//!
//! 1. `P × S` ring spaces in a directed cycle, traversable by everyone.
//! 2. Player `p` at seat `i` enters the ring at index `i × S`; the ring
//!    space before it is `p`'s pre-home space.
//! 3. The pre-home → entry edge excludes `p`, so `p` cannot lap the ring.
//! 4. `H` waiting spaces per player, each initially holding one piece.
//! 5. Each waiting space joins the entry space with an edge that needs
//!    a maximum roll.
//! 6. `H` home spaces per player, chained `home[0] → home[1] → …`.
//! 7. The pre-home space joins `home[0]` with an edge only `p` may take.
//!
//! Restricted to one player's traversal rights, ring plus home lane
//! form a simple path starting at the entry space. Construction checks
//! this and stores each player's track so that advancing a piece is
//! index arithmetic rather than a graph search.

use smallvec::smallvec;
use tracing::debug;

use crate::core::{BoardConfig, BoardError, ConfigError, PlayerId, PlayerMap};

use super::graph::BoardGraph;
use super::query::{EdgePredicate, Query, SpacePredicate};
use super::space::{BoardSpace, SpaceId, SpaceKind};

/// The full space graph of one game plus per-player landmarks.
#[derive(Clone, Debug)]
pub struct Topology {
    graph: BoardGraph,
    config: BoardConfig,
    player_count: usize,
    entries: PlayerMap<SpaceId>,
    pre_homes: PlayerMap<SpaceId>,
    tracks: PlayerMap<Vec<SpaceId>>,
}

impl Topology {
    /// Build the board for `player_count` players.
    ///
    /// Deterministic for a given `(player_count, config)`.
    pub fn build(player_count: usize, config: BoardConfig) -> Result<Self, ConfigError> {
        config.validate(player_count)?;

        let ring_length = config.ring_length(player_count);
        let pieces = config.pieces_per_player;
        let everyone: Vec<PlayerId> = PlayerId::all(player_count).collect();
        let mut graph = BoardGraph::new();

        let ring: Vec<SpaceId> = (0..ring_length)
            .map(|idx| graph.add_space(BoardSpace::main(idx)))
            .collect();
        for (idx, &from) in ring.iter().enumerate() {
            let to = ring[(idx + 1) % ring_length];
            graph.add_edge(from, to, everyone.iter().copied(), None);
        }

        let entries = PlayerMap::new(player_count, |p| ring[p.index() * config.section_length]);

        let mut pre_homes = Vec::with_capacity(player_count);
        for player in PlayerId::all(player_count) {
            let (pre_home, closing_edge) =
                graph.ring_predecessor(entries[player]).ok_or_else(|| {
                    BoardError::Inconsistent(format!("entry of {} has no ring predecessor", player))
                })?;
            graph.edge_mut(closing_edge).allowed_traversers =
                everyone.iter().copied().filter(|&p| p != player).collect();
            pre_homes.push(pre_home);
        }
        let pre_homes = PlayerMap::new(player_count, |p| pre_homes[p.index()]);

        for player in PlayerId::all(player_count) {
            for idx in 0..pieces {
                let waiting =
                    graph.add_space(BoardSpace::waiting(player, idx).occupied(Some(player)));
                graph.add_edge(waiting, entries[player], [player], Some(config.dice_faces));
            }
        }

        for player in PlayerId::all(player_count) {
            let lane: Vec<SpaceId> = (0..pieces)
                .map(|idx| graph.add_space(BoardSpace::home(player, idx)))
                .collect();
            for pair in lane.windows(2) {
                graph.add_edge(pair[0], pair[1], [player], None);
            }
            graph.add_edge(pre_homes[player], lane[0], [player], None);
        }

        let mut tracks = Vec::with_capacity(player_count);
        for player in PlayerId::all(player_count) {
            let view = graph.filter_subgraph(&Self::track_query(player));
            let track = view.simple_path_from(entries[player])?;
            if track.len() != ring_length + pieces {
                return Err(BoardError::Inconsistent(format!(
                    "track of {} has {} spaces, expected {}",
                    player,
                    track.len(),
                    ring_length + pieces
                ))
                .into());
            }
            tracks.push(track);
        }
        let tracks = PlayerMap::new(player_count, |p| tracks[p.index()].clone());

        debug!(
            players = player_count,
            spaces = graph.space_count(),
            edges = graph.edge_count(),
            "built board topology"
        );

        Ok(Self {
            graph,
            config,
            player_count,
            entries,
            pre_homes,
            tracks,
        })
    }

    /// Query selecting the ring and home lane `player` may walk.
    #[must_use]
    pub fn track_query(player: PlayerId) -> Query {
        Query::new()
            .with_space(SpacePredicate::KindIn(smallvec![SpaceKind::Main, SpaceKind::Home]))
            .with_space(SpacePredicate::Allows(player))
            .with_edge(EdgePredicate::TraversableBy(player))
            .with_edge(EdgePredicate::Unconditional)
    }

    /// The underlying graph.
    #[must_use]
    pub fn graph(&self) -> &BoardGraph {
        &self.graph
    }

    pub(crate) fn graph_mut(&mut self) -> &mut BoardGraph {
        &mut self.graph
    }

    /// Board dimensions.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Number of ring spaces.
    #[must_use]
    pub fn ring_length(&self) -> usize {
        self.config.ring_length(self.player_count)
    }

    /// Ring index where `player` enters from waiting.
    #[must_use]
    pub fn entry_index(&self, player: PlayerId) -> usize {
        player.index() * self.config.section_length
    }

    /// Ring space where `player` enters from waiting.
    #[must_use]
    pub fn entry(&self, player: PlayerId) -> SpaceId {
        self.entries[player]
    }

    /// Ring space from which `player` turns into the home lane.
    #[must_use]
    pub fn pre_home(&self, player: PlayerId) -> SpaceId {
        self.pre_homes[player]
    }

    /// Entry space, the rest of the ring, then the home lane.
    #[must_use]
    pub fn track(&self, player: PlayerId) -> &[SpaceId] {
        &self.tracks[player]
    }

    /// Position of a space on `player`'s track.
    ///
    /// Ring spaces count from the player's entry; home spaces follow the
    /// full ring. Waiting spaces and other players' home spaces are not
    /// on the track.
    pub fn track_position(
        &self,
        player: PlayerId,
        space: &BoardSpace,
    ) -> Result<usize, BoardError> {
        let ring_length = self.ring_length();
        let not_on_track = BoardError::NotOnTrack {
            kind: space.kind,
            index: space.index,
            player,
        };

        match space.kind {
            SpaceKind::Main if space.index < ring_length => {
                Ok((space.index + ring_length - self.entry_index(player)) % ring_length)
            }
            SpaceKind::Home
                if space.owner == Some(player) && space.index < self.config.pieces_per_player =>
            {
                Ok(ring_length + space.index)
            }
            _ => Err(not_on_track),
        }
    }
}
