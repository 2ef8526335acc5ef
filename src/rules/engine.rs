//! Move engine: destination resolution and move enumeration.
//!
//! ## Resolution
//!
//! - A waiting piece may only leave along its exit edge, which needs a
//!   maximum roll.
//! - Any other piece walks `roll` steps along its owner's track. The
//!   track is a precomputed simple path, so this is index arithmetic.
//! - Landing on a space the mover already occupies is never legal.
//!   Landing on an opponent captures it.
//!
//! Walking past the last home slot is rejected with `OutOfRange`
//! rather than clamped. `enumerate_moves` skips such pieces.

use tracing::debug;

use crate::board::{BoardSpace, SpaceKind, SpacePredicate};
use crate::core::{BoardError, GameState, PlayerId};

use super::moves::{MoveContainer, MoveSet};

impl GameState {
    /// Where the piece on `from` lands with `roll`.
    ///
    /// `from` is a snapshot and may be hypothetical: its recorded
    /// occupant is the mover. Returns `Ok(None)` when the piece has no
    /// legal destination. The returned snapshot carries the
    /// destination's current occupant, which the move would capture.
    pub fn resolve_destination(
        &self,
        from: &BoardSpace,
        roll: u8,
    ) -> Result<Option<BoardSpace>, BoardError> {
        self.check_roll(roll)?;
        let player = from.occupied_by.ok_or(BoardError::EmptySource {
            kind: from.kind,
            index: from.index,
        })?;

        let graph = self.topology().graph();
        let destination = match from.kind {
            SpaceKind::Waiting => {
                let source = self.locate(from)?;
                let exit = graph.out_edges(source).find(|(_, edge)| {
                    edge.allows(player) && edge.required_roll.map_or(true, |needed| needed == roll)
                });
                match exit {
                    Some((_, edge)) => edge.to,
                    None => return Ok(None),
                }
            }
            SpaceKind::Main | SpaceKind::Home => {
                let track = self.topology().track(player);
                let position = self.topology().track_position(player, from)?;
                let target = position + usize::from(roll);
                if target >= track.len() {
                    return Err(BoardError::OutOfRange {
                        position,
                        roll,
                        track_len: track.len(),
                    });
                }
                track[target]
            }
        };

        let landing = graph.space(destination);
        if landing.occupied_by == Some(player) {
            return Ok(None);
        }
        Ok(Some(landing))
    }

    /// Every legal move-set for `player` with `roll`.
    ///
    /// One move-set per piece with a destination, in the order the
    /// pieces are found on the board (ring, waiting, home). A move that
    /// lands on an opponent carries a second move returning that piece
    /// to its owner's lowest-index empty waiting space.
    pub fn enumerate_moves(&self, roll: u8, player: PlayerId) -> Result<Vec<MoveSet>, BoardError> {
        self.check_roll(roll)?;

        let mut move_sets = Vec::new();
        for from in self.pieces_of(player) {
            let to = match self.resolve_destination(&from, roll) {
                Ok(Some(to)) => to,
                Ok(None) | Err(BoardError::OutOfRange { .. }) => continue,
                Err(err) => return Err(err),
            };

            let primary = MoveContainer::new(from, Some(to));
            let move_set = match to.occupied_by {
                Some(victim) => {
                    let slot = self.free_waiting_slot(victim)?;
                    MoveSet::with_capture(primary, MoveContainer::new(to, Some(slot)))
                }
                None => MoveSet::single(primary),
            };
            move_sets.push(move_set);
        }

        debug!(
            player = %player,
            roll,
            count = move_sets.len(),
            "enumerated move-sets"
        );
        Ok(move_sets)
    }

    /// Lowest-index empty waiting space of `player`.
    pub fn free_waiting_slot(&self, player: PlayerId) -> Result<BoardSpace, BoardError> {
        let graph = self.topology().graph();
        graph
            .filter_spaces(&[
                SpacePredicate::Kind(SpaceKind::Waiting),
                SpacePredicate::Owner(Some(player)),
                SpacePredicate::OccupiedBy(None),
            ])
            .into_iter()
            .map(|id| graph.space(id))
            .min_by_key(|space| space.index)
            .ok_or(BoardError::NoWaitingSlot(player))
    }

    fn check_roll(&self, roll: u8) -> Result<(), BoardError> {
        let faces = self.config().dice_faces;
        if (1..=faces).contains(&roll) {
            Ok(())
        } else {
            Err(BoardError::InvalidRoll { roll, faces })
        }
    }
}
