//! Player identification, seating, and per-player data storage.
//!
//! ## PlayerId
//!
//! Seat index supporting 2-255 players. Seat order decides where each
//! player enters the ring.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access by `PlayerId`.
//!
//! ## Roster
//!
//! The ordered player names of one game plus a name lookup.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::{BoardError, ConfigError};

/// Player identifier (seat index).
///
/// Seat indices are 0-based: the first player is `PlayerId(0)` and
/// enters the ring at index 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use clovek::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Content of a space: a player's piece, or `None` when empty.
pub type Occupant = Option<PlayerId>;

/// Per-player data storage with O(1) access.
///
/// ```
/// use clovek::core::{PlayerId, PlayerMap};
///
/// let mut waiting: PlayerMap<usize> = PlayerMap::with_value(4, 4);
/// waiting[PlayerId::new(1)] -= 1;
/// assert_eq!(waiting[PlayerId::new(1)], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        let data = PlayerId::all(player_count).map(factory).collect();
        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Transform every entry, keeping seat order.
    pub fn map_values<U>(&self, f: impl Fn(&T) -> U) -> PlayerMap<U> {
        PlayerMap {
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T> FromIterator<T> for PlayerMap<T> {
    /// Collect values in seat order.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Ordered player names of one game.
///
/// Seat order is the order the names were given in.
#[derive(Clone, Debug)]
pub struct Roster {
    names: PlayerMap<String>,
    lookup: FxHashMap<String, PlayerId>,
}

impl Roster {
    /// Create a roster, rejecting degenerate or duplicate name lists.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self, ConfigError> {
        if names.len() < 2 {
            return Err(ConfigError::TooFewPlayers(names.len()));
        }
        if names.len() > 255 {
            return Err(ConfigError::TooManyPlayers(names.len()));
        }

        let mut lookup = FxHashMap::default();
        for (seat, name) in names.iter().enumerate() {
            let name = name.as_ref();
            if lookup.insert(name.to_string(), PlayerId(seat as u8)).is_some() {
                return Err(ConfigError::DuplicatePlayer(name.to_string()));
            }
        }

        let names = PlayerMap::new(names.len(), |p| names[p.index()].as_ref().to_string());
        Ok(Self { names, lookup })
    }

    /// Number of seated players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.player_count()
    }

    /// Always false: a roster seats at least two players.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.player_count() == 0
    }

    /// Name of a seated player.
    #[must_use]
    pub fn name(&self, player: PlayerId) -> &str {
        &self.names[player]
    }

    /// Resolve a player name to its seat.
    pub fn id(&self, name: &str) -> Result<PlayerId, BoardError> {
        self.lookup
            .get(name)
            .copied()
            .ok_or_else(|| BoardError::UnknownPlayer(name.to_string()))
    }

    /// Iterate over all seats in order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.len())
    }
}
