//! Applying moves and detecting the winner.

use tracing::debug;

use crate::board::SpaceKind;
use crate::core::{BoardError, GameState, PlayerId};

use super::moves::{MoveContainer, MoveSet};

impl GameState {
    /// Move the piece described by `mv`.
    ///
    /// Both snapshots are re-resolved against the live board by
    /// identity. The destination receives the mover; the source is
    /// emptied only if it still holds the mover, so applying a capture
    /// after the capturing move leaves the capturer in place. Legality
    /// is the engine's job and is not re-checked here.
    pub fn apply(&mut self, mv: &MoveContainer) -> Result<(), BoardError> {
        let from = mv.from_space;
        let to = mv.to_space.ok_or(BoardError::Unresolved {
            kind: from.kind,
            index: from.index,
        })?;
        let mover = from.occupied_by.ok_or(BoardError::EmptySource {
            kind: from.kind,
            index: from.index,
        })?;

        let source = self.locate(&from)?;
        let destination = self.locate(&to)?;
        let graph = self.topology_mut().graph_mut();

        graph.set_occupant(destination, Some(mover))?;
        if graph.occupant(source) == Some(mover) && source != destination {
            graph.set_occupant(source, None)?;
        }

        debug!(player = %mover, from = %from, to = %to, "applied move");
        Ok(())
    }

    /// Apply every move of a move-set in order.
    pub fn apply_move_set(&mut self, move_set: &MoveSet) -> Result<(), BoardError> {
        for mv in move_set {
            self.apply(mv)?;
        }
        if let Some(capture) = move_set.capture() {
            debug!(
                captured = ?capture.mover(),
                at = %capture.from_space,
                "captured piece returned to waiting"
            );
        }
        Ok(())
    }

    /// Whether every home space of `player` holds one of its pieces.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        let graph = self.topology().graph();
        let mut home = graph
            .spaces()
            .filter(|(_, space)| space.kind == SpaceKind::Home && space.owner == Some(player))
            .peekable();
        home.peek().is_some() && home.all(|(_, space)| space.occupied_by == Some(player))
    }

    /// The first seat that has won, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.roster().ids().find(|&player| self.is_winner(player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSpace;
    use crate::core::BoardConfig;

    fn two_player() -> GameState {
        GameState::new(
            &["red", "blue"],
            BoardConfig::default().with_section_length(4).with_pieces_per_player(2),
        )
        .unwrap()
    }

    #[test]
    fn test_apply_leave_waiting() {
        let mut state = two_player();
        let red = state.player("red").unwrap();
        let sets = state.enumerate_moves(6, red).unwrap();

        state.apply_move_set(&sets[0]).unwrap();

        assert_eq!(state.ring_occupancy()[0], Some(red));
        assert_eq!(state.waiting_occupancy()[red], vec![None, Some(red)]);
        assert_eq!(state.piece_count(red), 2);
    }

    #[test]
    fn test_apply_capture_keeps_capturer() {
        let mut state = two_player();
        let red = state.player("red").unwrap();
        let blue = state.player("blue").unwrap();
        state.place(SpaceKind::Waiting, 0, Some(blue), None).unwrap();
        state.place(SpaceKind::Main, 5, None, Some(blue)).unwrap();
        state.place(SpaceKind::Waiting, 0, Some(red), None).unwrap();
        state.place(SpaceKind::Main, 2, None, Some(red)).unwrap();

        let sets = state.enumerate_moves(3, red).unwrap();
        assert_eq!(sets.len(), 1);
        assert!(sets[0].capture().is_some());

        state.apply_move_set(&sets[0]).unwrap();

        assert_eq!(state.ring_occupancy()[5], Some(red));
        assert_eq!(state.ring_occupancy()[2], None);
        assert_eq!(state.waiting_occupancy()[blue], vec![Some(blue), Some(blue)]);
        assert_eq!(state.piece_count(red), 2);
        assert_eq!(state.piece_count(blue), 2);
    }

    #[test]
    fn test_apply_unresolved_move_fails() {
        let mut state = two_player();
        let red = state.player("red").unwrap();
        let mv = MoveContainer::new(BoardSpace::waiting(red, 0).occupied(Some(red)), None);

        assert_eq!(
            state.apply(&mv),
            Err(BoardError::Unresolved {
                kind: SpaceKind::Waiting,
                index: 0
            })
        );
        assert_eq!(state.waiting_counts()[red], 2);
    }

    #[test]
    fn test_is_winner_boundary() {
        let mut state = two_player();
        let blue = state.player("blue").unwrap();

        state.place(SpaceKind::Home, 0, Some(blue), Some(blue)).unwrap();
        assert!(!state.is_winner(blue));
        assert_eq!(state.winner(), None);

        state.place(SpaceKind::Home, 1, Some(blue), Some(blue)).unwrap();
        assert!(state.is_winner(blue));
        assert_eq!(state.winner(), Some(blue));
        assert!(!state.is_winner(state.player("red").unwrap()));
    }
}
