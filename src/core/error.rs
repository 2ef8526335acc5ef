//! Error types for configuration, board queries, moves, and matches.

use std::path::PathBuf;

use crate::board::SpaceKind;

use super::player::PlayerId;

/// Errors raised while validating or loading a game configuration.
///
/// Construction never leaves a partially usable board behind: any of
/// these aborts `GameState::new` before the graph exists.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("at least 2 players are required, got {0}")]
    TooFewPlayers(usize),

    #[error("at most 255 players are supported, got {0}")]
    TooManyPlayers(usize),

    #[error("player name {0:?} is seated twice")]
    DuplicatePlayer(String),

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("board construction failed: {0}")]
    Topology(#[from] BoardError),
}

/// Errors raised by board queries, the move engine, and the mutator.
///
/// "No destination" is not an error: `resolve_destination` reports it
/// as `Ok(None)`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("no player named {0:?} is seated")]
    UnknownPlayer(String),

    #[error("{kind} spaces are per player; an owner is required")]
    MissingOwner { kind: SpaceKind },

    #[error("board graph is inconsistent: {0}")]
    Inconsistent(String),

    #[error("no {kind} space {index} (owner {owner:?}) exists")]
    NoSuchSpace {
        kind: SpaceKind,
        index: usize,
        owner: Option<PlayerId>,
    },

    #[error("move from {kind} space {index} has no destination")]
    Unresolved { kind: SpaceKind, index: usize },

    #[error("{kind} space {index} holds no piece to move")]
    EmptySource { kind: SpaceKind, index: usize },

    #[error("roll {roll} is outside 1..={faces}")]
    InvalidRoll { roll: u8, faces: u8 },

    #[error(
        "moving {roll} from position {position} overruns the home lane (track length {track_len})"
    )]
    OutOfRange {
        position: usize,
        roll: u8,
        track_len: usize,
    },

    #[error("{kind} space {index} is not on {player}'s track")]
    NotOnTrack {
        kind: SpaceKind,
        index: usize,
        player: PlayerId,
    },

    #[error("{player} may not occupy {kind} space {index}")]
    ForbiddenOccupant {
        kind: SpaceKind,
        index: usize,
        player: PlayerId,
    },

    #[error("{0} has no empty waiting space for a captured piece")]
    NoWaitingSlot(PlayerId),

    #[error("a move-set holds one or two moves, got {0}")]
    MoveSetLength(usize),
}

/// Errors raised while driving a match.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("strategy chose move-set {index} but only {len} were offered")]
    InvalidChoice { index: usize, len: usize },

    #[error("no winner after {0} plays")]
    PlayLimit(usize),
}

/// Errors raised while running a batch of matches.
#[derive(Debug, thiserror::Error)]
pub enum ExperimentError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("match error: {0}")]
    Match(#[from] MatchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NonPositive {
            field: "section_length",
        };
        assert_eq!(err.to_string(), "section_length must be positive");
    }

    #[test]
    fn test_out_of_range_display() {
        let err = BoardError::OutOfRange {
            position: 19,
            roll: 2,
            track_len: 20,
        };
        assert_eq!(
            err.to_string(),
            "moving 2 from position 19 overruns the home lane (track length 20)"
        );
    }

    #[test]
    fn test_match_error_wraps_board_error() {
        let err: MatchError = BoardError::NoWaitingSlot(PlayerId::new(1)).into();
        assert_eq!(
            err.to_string(),
            "Player 1 has no empty waiting space for a captured piece"
        );
    }
}
