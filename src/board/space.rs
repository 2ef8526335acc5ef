//! Board spaces: the addressable locations of the game.
//!
//! Every space is one of three kinds:
//! - `Waiting`: a player's private holding slots (index 0..pieces)
//! - `Main`: the shared ring (index 0..ring length)
//! - `Home`: a player's private terminal lane (index 0..pieces)
//!
//! A space is identified by `(kind, index, owner)`; the owner is `None`
//! exactly for ring spaces.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Occupant, PlayerId};

/// Kind of board space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceKind {
    Waiting,
    Main,
    Home,
}

impl SpaceKind {
    /// Whether spaces of this kind belong to a single player.
    #[must_use]
    pub const fn is_private(self) -> bool {
        !matches!(self, SpaceKind::Main)
    }
}

impl std::fmt::Display for SpaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SpaceKind::Waiting => "waiting",
            SpaceKind::Main => "main",
            SpaceKind::Home => "home",
        };
        f.write_str(name)
    }
}

/// Index of a space node in the board graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpaceId(pub u32);

impl SpaceId {
    /// Raw node index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Snapshot of one board space.
///
/// Snapshots are values, not live references: they record the
/// occupant at the moment they were taken. The mutator re-resolves a
/// snapshot by identity before writing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSpace {
    /// Kind of space.
    pub kind: SpaceKind,

    /// Position within its kind-specific numbering.
    pub index: usize,

    /// Owning player of a waiting or home space; `None` on the ring.
    pub owner: Option<PlayerId>,

    /// Current occupant, `None` when empty.
    pub occupied_by: Occupant,
}

impl BoardSpace {
    /// An empty ring space.
    #[must_use]
    pub const fn main(index: usize) -> Self {
        Self {
            kind: SpaceKind::Main,
            index,
            owner: None,
            occupied_by: None,
        }
    }

    /// An empty waiting space of `owner`.
    #[must_use]
    pub const fn waiting(owner: PlayerId, index: usize) -> Self {
        Self {
            kind: SpaceKind::Waiting,
            index,
            owner: Some(owner),
            occupied_by: None,
        }
    }

    /// An empty home space of `owner`.
    #[must_use]
    pub const fn home(owner: PlayerId, index: usize) -> Self {
        Self {
            kind: SpaceKind::Home,
            index,
            owner: Some(owner),
            occupied_by: None,
        }
    }

    /// Same space, recorded with a different occupant.
    #[must_use]
    pub const fn occupied(mut self, occupant: Occupant) -> Self {
        self.occupied_by = occupant;
        self
    }

    /// Whether `occupant` may sit on this space.
    ///
    /// Empty is always allowed; private spaces admit only their owner.
    #[must_use]
    pub fn allows(&self, occupant: Occupant) -> bool {
        match (occupant, self.owner) {
            (None, _) | (Some(_), None) => true,
            (Some(player), Some(owner)) => player == owner,
        }
    }

    /// The allowed-occupant set for a game with `player_count` players,
    /// with the empty occupant listed last.
    #[must_use]
    pub fn allowed_occupants(&self, player_count: usize) -> SmallVec<[Occupant; 5]> {
        let mut allowed: SmallVec<[Occupant; 5]> = match self.owner {
            Some(owner) => SmallVec::from_slice(&[Some(owner)]),
            None => PlayerId::all(player_count).map(Some).collect(),
        };
        allowed.push(None);
        allowed
    }
}

impl std::fmt::Display for BoardSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.owner {
            Some(owner) => write!(f, "{}[{}] of {}", self.kind, self.index, owner)?,
            None => write!(f, "{}[{}]", self.kind, self.index)?,
        }
        match self.occupied_by {
            Some(player) => write!(f, " ({})", player),
            None => f.write_str(" (empty)"),
        }
    }
}
