//! Board configuration.
//!
//! A game is configured by its seated players (see `Roster`) and a
//! `BoardConfig`:
//! - `pieces_per_player`: waiting slots, home slots, and pieces per player
//! - `section_length`: ring spaces per player (ring length = players × section)
//! - `dice_faces`: largest roll; only this roll releases a waiting piece

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Board dimensions and die size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Pieces each player owns; also the waiting and home lane length.
    pub pieces_per_player: usize,

    /// Ring spaces per player.
    pub section_length: usize,

    /// Number of die faces (maximum roll).
    pub dice_faces: u8,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            pieces_per_player: 4,
            section_length: 10,
            dice_faces: 6,
        }
    }
}

impl BoardConfig {
    /// Set pieces per player.
    #[must_use]
    pub fn with_pieces_per_player(mut self, pieces: usize) -> Self {
        self.pieces_per_player = pieces;
        self
    }

    /// Set the ring section length.
    #[must_use]
    pub fn with_section_length(mut self, length: usize) -> Self {
        self.section_length = length;
        self
    }

    /// Set the number of die faces.
    #[must_use]
    pub fn with_dice_faces(mut self, faces: u8) -> Self {
        self.dice_faces = faces;
        self
    }

    /// Ring length for `player_count` players.
    #[must_use]
    pub fn ring_length(&self, player_count: usize) -> usize {
        player_count * self.section_length
    }

    /// Check the dimensions for a game with `player_count` players.
    pub fn validate(&self, player_count: usize) -> Result<(), ConfigError> {
        if player_count < 2 {
            return Err(ConfigError::TooFewPlayers(player_count));
        }
        if player_count > 255 {
            return Err(ConfigError::TooManyPlayers(player_count));
        }
        if self.pieces_per_player == 0 {
            return Err(ConfigError::NonPositive {
                field: "pieces_per_player",
            });
        }
        if self.section_length == 0 {
            return Err(ConfigError::NonPositive {
                field: "section_length",
            });
        }
        if self.dice_faces == 0 {
            return Err(ConfigError::NonPositive {
                field: "dice_faces",
            });
        }
        Ok(())
    }
}
