//! Game state: the roster plus the live board.
//!
//! `GameState` owns exactly one board graph. The move engine
//! (`rules::engine`) reads it, the mutator (`rules::mutator`) writes
//! occupancy through it, and nothing else holds a reference to it.
//!
//! ## Summaries
//!
//! `waiting_counts`, `ring_occupancy`, `home_occupancy` and friends are
//! pure projections of the current occupants.

use crate::board::{BoardSpace, SpaceId, SpaceKind, SpacePredicate, Topology};

use super::config::BoardConfig;
use super::error::{BoardError, ConfigError};
use super::player::{Occupant, PlayerId, PlayerMap, Roster};

/// A single game in progress.
#[derive(Clone, Debug)]
pub struct GameState {
    roster: Roster,
    topology: Topology,
}

impl GameState {
    /// Seat `names` in order and build the board.
    ///
    /// ```
    /// use clovek::core::{BoardConfig, GameState};
    ///
    /// let state = GameState::new(&["red", "blue"], BoardConfig::default()).unwrap();
    /// assert_eq!(state.ring_occupancy().len(), 20);
    /// assert_eq!(state.waiting_counts().values().sum::<usize>(), 8);
    /// ```
    pub fn new<S: AsRef<str>>(names: &[S], config: BoardConfig) -> Result<Self, ConfigError> {
        let roster = Roster::new(names)?;
        let topology = Topology::build(roster.len(), config)?;
        Ok(Self { roster, topology })
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub(crate) fn topology_mut(&mut self) -> &mut Topology {
        &mut self.topology
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        self.topology.config()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.roster.len()
    }

    /// Seat of the player called `name`.
    pub fn player(&self, name: &str) -> Result<PlayerId, BoardError> {
        self.roster.id(name)
    }

    /// Snapshot of the space `(kind, index, owner)`, if it exists.
    pub fn get_space(
        &self,
        kind: SpaceKind,
        index: usize,
        owner: Option<PlayerId>,
    ) -> Result<Option<BoardSpace>, BoardError> {
        self.topology.graph().space_by_identity(kind, index, owner)
    }

    /// Overwrite the occupant of a space.
    ///
    /// Used to set up positions. Unlike a move this can create or
    /// remove pieces, so piece counts are the caller's business.
    pub fn place(
        &mut self,
        kind: SpaceKind,
        index: usize,
        owner: Option<PlayerId>,
        occupant: Occupant,
    ) -> Result<(), BoardError> {
        let graph = self.topology.graph_mut();
        let id = graph
            .resolve_identity(kind, index, owner)?
            .ok_or(BoardError::NoSuchSpace { kind, index, owner })?;
        graph.set_occupant(id, occupant)
    }

    /// Snapshots of every space `player` currently occupies, in graph
    /// order (ring, then waiting, then home).
    #[must_use]
    pub fn pieces_of(&self, player: PlayerId) -> Vec<BoardSpace> {
        self.snapshots(&[SpacePredicate::OccupiedBy(Some(player))])
    }

    /// Total pieces of `player` on the board.
    #[must_use]
    pub fn piece_count(&self, player: PlayerId) -> usize {
        self.pieces_of(player).len()
    }

    /// Pieces still in each player's waiting area.
    #[must_use]
    pub fn waiting_counts(&self) -> PlayerMap<usize> {
        self.lane_occupancy(SpaceKind::Waiting)
            .map_values(|lane| lane.iter().filter(|o| o.is_some()).count())
    }

    /// Occupant of each waiting slot, per player, by index.
    #[must_use]
    pub fn waiting_occupancy(&self) -> PlayerMap<Vec<Occupant>> {
        self.lane_occupancy(SpaceKind::Waiting)
    }

    /// Occupant of each ring space, by index.
    #[must_use]
    pub fn ring_occupancy(&self) -> Vec<Occupant> {
        self.snapshots(&[SpacePredicate::Kind(SpaceKind::Main)])
            .into_iter()
            .map(|space| space.occupied_by)
            .collect()
    }

    /// Occupant of each home slot, per player, by index.
    #[must_use]
    pub fn home_occupancy(&self) -> PlayerMap<Vec<Occupant>> {
        self.lane_occupancy(SpaceKind::Home)
    }

    /// Live ID of a snapshot's space.
    pub(crate) fn locate(&self, snapshot: &BoardSpace) -> Result<SpaceId, BoardError> {
        self.topology.graph().locate(snapshot)
    }

    fn snapshots(&self, predicates: &[SpacePredicate]) -> Vec<BoardSpace> {
        let graph = self.topology.graph();
        graph
            .filter_spaces(predicates)
            .into_iter()
            .map(|id| graph.space(id))
            .collect()
    }

    // Lanes are built in index order, so graph order is index order.
    fn lane_occupancy(&self, kind: SpaceKind) -> PlayerMap<Vec<Occupant>> {
        PlayerMap::new(self.player_count(), |player| {
            self.snapshots(&[
                SpacePredicate::Kind(kind),
                SpacePredicate::Owner(Some(player)),
            ])
            .into_iter()
            .map(|space| space.occupied_by)
            .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_player() -> GameState {
        GameState::new(
            &["red", "blue", "green", "yellow"],
            BoardConfig::default().with_section_length(4),
        )
        .unwrap()
    }

    #[test]
    fn test_new_game_summaries() {
        let state = four_player();

        assert_eq!(state.player_count(), 4);
        assert_eq!(state.waiting_counts(), PlayerMap::with_value(4, 4));
        assert_eq!(state.ring_occupancy(), vec![None; 16]);
        assert_eq!(state.home_occupancy(), PlayerMap::with_value(4, vec![None; 4]));

        let blue = state.player("blue").unwrap();
        assert_eq!(state.waiting_occupancy()[blue], vec![Some(blue); 4]);
        assert_eq!(state.piece_count(blue), 4);
    }

    #[test]
    fn test_new_game_rejects_bad_config() {
        assert!(matches!(
            GameState::new(&["red", "blue"], BoardConfig::default().with_dice_faces(0)),
            Err(ConfigError::NonPositive { field: "dice_faces" })
        ));
        assert!(matches!(
            GameState::new(&["red"], BoardConfig::default()),
            Err(ConfigError::TooFewPlayers(1))
        ));
    }

    #[test]
    fn test_get_space() {
        let state = four_player();
        let green = state.player("green").unwrap();

        assert_eq!(
            state.get_space(SpaceKind::Main, 5, None).unwrap(),
            Some(BoardSpace::main(5))
        );
        assert_eq!(
            state.get_space(SpaceKind::Waiting, 3, Some(green)).unwrap(),
            Some(BoardSpace::waiting(green, 3).occupied(Some(green)))
        );
        assert_eq!(state.get_space(SpaceKind::Home, 4, Some(green)).unwrap(), None);
        assert!(matches!(
            state.get_space(SpaceKind::Waiting, 0, None),
            Err(BoardError::MissingOwner { .. })
        ));
    }

    #[test]
    fn test_place() {
        let mut state = four_player();
        let red = state.player("red").unwrap();
        let blue = state.player("blue").unwrap();

        state.place(SpaceKind::Main, 9, None, Some(blue)).unwrap();
        assert_eq!(state.ring_occupancy()[9], Some(blue));
        assert_eq!(state.piece_count(blue), 5);

        assert!(matches!(
            state.place(SpaceKind::Home, 0, Some(red), Some(blue)),
            Err(BoardError::ForbiddenOccupant { .. })
        ));
        assert!(matches!(
            state.place(SpaceKind::Main, 99, None, Some(blue)),
            Err(BoardError::NoSuchSpace { .. })
        ));
    }

    #[test]
    fn test_pieces_of_order() {
        let mut state = four_player();
        let red = state.player("red").unwrap();

        state.place(SpaceKind::Waiting, 0, Some(red), None).unwrap();
        state.place(SpaceKind::Main, 3, None, Some(red)).unwrap();

        let kinds: Vec<_> = state.pieces_of(red).iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SpaceKind::Main,
                SpaceKind::Waiting,
                SpaceKind::Waiting,
                SpaceKind::Waiting
            ]
        );
    }
}
