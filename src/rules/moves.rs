//! Move values: single piece movements and the move-sets offered to a
//! player for one roll.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{BoardSpace, SpaceKind};
use crate::core::{BoardError, Occupant};

/// What kind of movement a resolved `MoveContainer` describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Waiting slot onto the entry space.
    LeaveWaiting,
    /// Ring space to ring space.
    SpaceAdvance,
    /// Ring space into the home lane.
    SpaceToHome,
    /// Within the home lane.
    HomeAdvance,
    /// A captured piece going back to waiting.
    ReturnToWaiting,
}

/// One piece moving from one space to another.
///
/// Both ends are snapshots taken when the move was resolved. A missing
/// `to_space` means the piece has no legal destination for the roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveContainer {
    pub from_space: BoardSpace,
    pub to_space: Option<BoardSpace>,
}

impl MoveContainer {
    #[must_use]
    pub const fn new(from_space: BoardSpace, to_space: Option<BoardSpace>) -> Self {
        Self {
            from_space,
            to_space,
        }
    }

    /// The piece being moved, as recorded in the source snapshot.
    #[must_use]
    pub fn mover(&self) -> Occupant {
        self.from_space.occupied_by
    }

    /// Whether a destination was found.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.to_space.is_some()
    }

    /// Classify the movement; `None` if unresolved or not a movement
    /// the rules produce.
    #[must_use]
    pub fn kind(&self) -> Option<MoveKind> {
        let to = self.to_space?;
        match (self.from_space.kind, to.kind) {
            (SpaceKind::Waiting, SpaceKind::Main) => Some(MoveKind::LeaveWaiting),
            (SpaceKind::Main, SpaceKind::Main) => Some(MoveKind::SpaceAdvance),
            (SpaceKind::Main, SpaceKind::Home) => Some(MoveKind::SpaceToHome),
            (SpaceKind::Home, SpaceKind::Home) => Some(MoveKind::HomeAdvance),
            (SpaceKind::Main, SpaceKind::Waiting) => Some(MoveKind::ReturnToWaiting),
            _ => None,
        }
    }
}

impl std::fmt::Display for MoveContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_space {
            Some(to) => write!(f, "{} -> {}", self.from_space, to),
            None => write!(f, "{} -> (no move)", self.from_space),
        }
    }
}

/// One legal action for a roll: the piece's own move, followed by the
/// capture it causes, if any.
///
/// Serialized as a plain list of one or two moves.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "SmallVec<[MoveContainer; 2]>",
    into = "SmallVec<[MoveContainer; 2]>"
)]
pub struct MoveSet {
    moves: SmallVec<[MoveContainer; 2]>,
}

impl MoveSet {
    /// A move that captures nothing.
    #[must_use]
    pub fn single(primary: MoveContainer) -> Self {
        let mut moves = SmallVec::new();
        moves.push(primary);
        Self { moves }
    }

    /// A move followed by the displacement of the piece it lands on.
    #[must_use]
    pub fn with_capture(primary: MoveContainer, capture: MoveContainer) -> Self {
        let mut moves = SmallVec::new();
        moves.push(primary);
        moves.push(capture);
        Self { moves }
    }

    /// The moving piece's own move.
    #[must_use]
    pub fn primary(&self) -> &MoveContainer {
        &self.moves[0]
    }

    /// The induced capture, if the primary move lands on a piece.
    #[must_use]
    pub fn capture(&self) -> Option<&MoveContainer> {
        self.moves.get(1)
    }

    /// All moves, in the order they are applied.
    #[must_use]
    pub fn moves(&self) -> &[MoveContainer] {
        &self.moves
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveContainer> {
        self.moves.iter()
    }
}

impl TryFrom<SmallVec<[MoveContainer; 2]>> for MoveSet {
    type Error = BoardError;

    fn try_from(moves: SmallVec<[MoveContainer; 2]>) -> Result<Self, Self::Error> {
        match moves.len() {
            1 | 2 => Ok(Self { moves }),
            len => Err(BoardError::MoveSetLength(len)),
        }
    }
}

impl From<MoveSet> for SmallVec<[MoveContainer; 2]> {
    fn from(move_set: MoveSet) -> Self {
        move_set.moves
    }
}

impl std::fmt::Display for MoveSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.primary())?;
        if let Some(capture) = self.capture() {
            write!(f, ", capturing {}", capture.from_space)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MoveSet {
    type Item = &'a MoveContainer;
    type IntoIter = std::slice::Iter<'a, MoveContainer>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_move_kinds() {
        let red = PlayerId::new(0);
        let blue = PlayerId::new(1);
        let waiting = BoardSpace::waiting(red, 0).occupied(Some(red));
        let ring = BoardSpace::main(3).occupied(Some(red));

        let cases = [
            (waiting, BoardSpace::main(0), MoveKind::LeaveWaiting),
            (ring, BoardSpace::main(5), MoveKind::SpaceAdvance),
            (ring, BoardSpace::home(red, 1), MoveKind::SpaceToHome),
            (
                BoardSpace::home(red, 0).occupied(Some(red)),
                BoardSpace::home(red, 2),
                MoveKind::HomeAdvance,
            ),
            (
                BoardSpace::main(0).occupied(Some(blue)),
                BoardSpace::waiting(blue, 2),
                MoveKind::ReturnToWaiting,
            ),
        ];

        for (from, to, expected) in cases {
            assert_eq!(MoveContainer::new(from, Some(to)).kind(), Some(expected));
        }
        assert_eq!(MoveContainer::new(waiting, None).kind(), None);
    }

    #[test]
    fn test_move_set_parts() {
        let red = PlayerId::new(0);
        let blue = PlayerId::new(1);
        let primary = MoveContainer::new(
            BoardSpace::waiting(red, 0).occupied(Some(red)),
            Some(BoardSpace::main(0).occupied(Some(blue))),
        );
        let capture = MoveContainer::new(
            BoardSpace::main(0).occupied(Some(blue)),
            Some(BoardSpace::waiting(blue, 1)),
        );

        let plain = MoveSet::single(primary);
        assert_eq!(plain.primary(), &primary);
        assert!(plain.capture().is_none());

        let capturing = MoveSet::with_capture(primary, capture);
        assert_eq!(capturing.capture(), Some(&capture));
        assert_eq!(capturing.moves().len(), 2);
        assert_eq!(capturing.iter().filter_map(MoveContainer::mover).count(), 2);
    }

    #[test]
    fn test_move_set_deserialize_checks_length() {
        let red = PlayerId::new(0);
        let mv = MoveContainer::new(
            BoardSpace::main(2).occupied(Some(red)),
            Some(BoardSpace::main(5)),
        );
        let set = MoveSet::single(mv);

        let json = serde_json::to_string(&set).unwrap();
        assert!(json.starts_with('['));
        assert_eq!(serde_json::from_str::<MoveSet>(&json).unwrap(), set);

        let err = serde_json::from_str::<MoveSet>("[]").unwrap_err();
        assert!(err.to_string().contains("got 0"));

        let three = serde_json::to_string(&[mv, mv, mv]).unwrap();
        let err = serde_json::from_str::<MoveSet>(&three).unwrap_err();
        assert!(err.to_string().contains("got 3"));
    }

    #[test]
    fn test_display() {
        let red = PlayerId::new(0);
        let mv = MoveContainer::new(BoardSpace::main(2).occupied(Some(red)), None);
        assert_eq!(mv.to_string(), "main[2] (Player 0) -> (no move)");

        let blue = PlayerId::new(1);
        let capturing = MoveSet::with_capture(
            MoveContainer::new(
                BoardSpace::main(2).occupied(Some(red)),
                Some(BoardSpace::main(4).occupied(Some(blue))),
            ),
            MoveContainer::new(
                BoardSpace::main(4).occupied(Some(blue)),
                Some(BoardSpace::waiting(blue, 0)),
            ),
        );
        assert_eq!(
            capturing.to_string(),
            "main[2] (Player 0) -> main[4] (Player 1), capturing main[4] (Player 1)"
        );
    }
}
