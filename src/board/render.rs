//! Plain-text board rendering.
//!
//! ```text
//! ring    R---B-----------
//! red     waiting RRR-  home ----
//! blue    waiting BBB-  home ----
//! ```
//!
//! Each piece is drawn as the uppercased first letter of its owner's
//! name; empty spaces are `-`.

use std::fmt;

use crate::core::{GameState, Occupant};

impl GameState {
    /// Display symbol of an occupant.
    #[must_use]
    pub fn symbol(&self, occupant: Occupant) -> char {
        occupant
            .and_then(|player| self.roster().name(player).chars().next())
            .map_or('-', |c| c.to_ascii_uppercase())
    }

    fn lane(&self, occupants: &[Occupant]) -> String {
        occupants.iter().map(|&o| self.symbol(o)).collect()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .roster()
            .ids()
            .map(|p| self.roster().name(p).len())
            .max()
            .unwrap_or(0)
            .max("ring".len());

        writeln!(f, "{:<width$}  {}", "ring", self.lane(&self.ring_occupancy()))?;

        let waiting = self.waiting_occupancy();
        let home = self.home_occupancy();
        for player in self.roster().ids() {
            writeln!(
                f,
                "{:<width$}  waiting {}  home {}",
                self.roster().name(player),
                self.lane(&waiting[player]),
                self.lane(&home[player]),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::board::SpaceKind;
    use crate::core::{BoardConfig, GameState};

    #[test]
    fn test_render_fresh_board() {
        let state = GameState::new(
            &["red", "blue"],
            BoardConfig::default().with_section_length(3).with_pieces_per_player(2),
        )
        .unwrap();

        assert_eq!(
            state.to_string(),
            "ring  ------\nred   waiting RR  home --\nblue  waiting BB  home --\n"
        );
    }

    #[test]
    fn test_render_moved_pieces() {
        let mut state = GameState::new(
            &["red", "blue"],
            BoardConfig::default().with_section_length(3).with_pieces_per_player(2),
        )
        .unwrap();
        let red = state.player("red").unwrap();
        let blue = state.player("blue").unwrap();

        state.place(SpaceKind::Waiting, 0, Some(red), None).unwrap();
        state.place(SpaceKind::Main, 4, None, Some(red)).unwrap();
        state.place(SpaceKind::Waiting, 1, Some(blue), None).unwrap();
        state.place(SpaceKind::Home, 1, Some(blue), Some(blue)).unwrap();

        let rendered = state.to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "ring  ----R-");
        assert_eq!(lines[1], "red   waiting -R  home --");
        assert_eq!(lines[2], "blue  waiting B-  home -B");
    }
}
