//! Batch runs of seeded matches.
//!
//! An experiment is described by a TOML file:
//!
//! ```toml
//! runs = 100
//! seed = 7
//!
//! [[players]]
//! name = "red"
//! agent = "furthest"
//!
//! [[players]]
//! name = "blue"
//! agent = "random"
//!
//! [board]
//! section_length = 4
//! ```
//!
//! Every run gets its own forked RNG stream, so a config plus seed
//! always produces the same summary.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::agents::AgentKind;
use crate::core::{
    BoardConfig, ConfigError, ExperimentError, GameRng, GameState, PlayerMap, Roster, SeededDice,
};

use super::driver::{Match, MatchSettings};

/// One seat of an experiment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    #[serde(default)]
    pub agent: AgentKind,
}

/// A batch of matches with fixed seats and board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub players: Vec<PlayerEntry>,
    pub board: BoardConfig,

    #[serde(default = "default_runs")]
    pub runs: usize,

    #[serde(default)]
    pub seed: u64,

    #[serde(default = "default_max_plays")]
    pub max_plays: usize,

    #[serde(default = "default_extra_turn")]
    pub extra_turn_on_max_roll: bool,
}

fn default_runs() -> usize {
    1
}

fn default_max_plays() -> usize {
    MatchSettings::default().max_plays
}

fn default_extra_turn() -> bool {
    MatchSettings::default().extra_turn_on_max_roll
}

impl ExperimentConfig {
    /// Load and validate an experiment from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate an experiment from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ExperimentConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check run counts, seats and board dimensions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runs == 0 {
            return Err(ConfigError::Validation("runs must be > 0".into()));
        }
        if self.max_plays == 0 {
            return Err(ConfigError::Validation("max_plays must be > 0".into()));
        }
        if let Some(entry) = self.players.iter().find(|p| p.agent.is_interactive()) {
            return Err(ConfigError::Validation(format!(
                "seat {:?} uses an interactive agent; experiments run unattended",
                entry.name
            )));
        }
        Roster::new(&self.names())?;
        self.board.validate(self.players.len())
    }

    /// Seat names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.name.as_str()).collect()
    }

    /// Sequencing settings for each match.
    #[must_use]
    pub fn settings(&self) -> MatchSettings {
        MatchSettings::default()
            .with_max_plays(self.max_plays)
            .with_extra_turn_on_max_roll(self.extra_turn_on_max_roll)
    }
}

/// Wins of one seat across an experiment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSummary {
    pub name: String,
    pub agent: AgentKind,
    pub wins: usize,
}

/// Aggregate results of an experiment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    pub runs: usize,
    pub seats: Vec<SeatSummary>,
    pub mean_plays: f64,

    /// Turns taken by each run, in run order.
    pub plays: Vec<usize>,
}

/// Play every run of `config`.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentSummary, ExperimentError> {
    config.validate()?;

    let names = config.names();
    let settings = config.settings();
    let mut master = GameRng::new(config.seed);
    let mut wins: PlayerMap<usize> = PlayerMap::with_value(names.len(), 0);
    let mut plays = Vec::with_capacity(config.runs);

    for run in 0..config.runs {
        let mut run_rng = master.fork();
        let dice = SeededDice::from_rng(config.board.dice_faces, run_rng.fork());
        let state = GameState::new(&names, config.board)?;
        let strategies = config.players.iter().map(|p| p.agent.build()).collect();

        let outcome = Match::new(state, strategies, dice, run_rng, settings)?.play()?;
        wins[outcome.winner] += 1;
        plays.push(outcome.plays);
        info!(run, winner = names[outcome.winner.index()], plays = outcome.plays, "run finished");
    }

    let mean_plays = plays.iter().sum::<usize>() as f64 / plays.len() as f64;
    let seats = config
        .players
        .iter()
        .zip(wins.values())
        .map(|(entry, &wins)| SeatSummary {
            name: entry.name.clone(),
            agent: entry.agent,
            wins,
        })
        .collect();

    info!(runs = config.runs, mean_plays, "experiment finished");
    Ok(ExperimentSummary {
        runs: config.runs,
        seats,
        mean_plays,
        plays,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CONFIG: &str = r#"
runs = 3
seed = 9

[[players]]
name = "red"
agent = "furthest"

[[players]]
name = "blue"

[board]
section_length = 4
pieces_per_player = 2
"#;

    #[test]
    fn test_parse_config() {
        let config = ExperimentConfig::from_toml_str(CONFIG).unwrap();

        assert_eq!(config.runs, 3);
        assert_eq!(config.seed, 9);
        assert_eq!(config.players[0].agent, AgentKind::Furthest);
        assert_eq!(config.players[1].agent, AgentKind::Random);
        assert_eq!(config.board.section_length, 4);
        assert_eq!(config.board.dice_faces, 6);
        assert_eq!(config.max_plays, 10_000);
        assert!(config.extra_turn_on_max_roll);
    }

    #[test]
    fn test_missing_tables_fail_to_parse() {
        assert!(matches!(
            ExperimentConfig::from_toml_str("runs = 2\n[board]\n"),
            Err(ConfigError::TomlParse(_))
        ));
        assert!(matches!(
            ExperimentConfig::from_toml_str("[[players]]\nname = \"red\"\n"),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_validation_errors() {
        let zero_runs = CONFIG.replace("runs = 3", "runs = 0");
        assert!(matches!(
            ExperimentConfig::from_toml_str(&zero_runs),
            Err(ConfigError::Validation(_))
        ));

        let human = CONFIG.replace("agent = \"furthest\"", "agent = \"human\"");
        assert!(matches!(
            ExperimentConfig::from_toml_str(&human),
            Err(ConfigError::Validation(msg)) if msg.contains("\"red\"")
        ));

        let duplicate = CONFIG.replace("name = \"blue\"", "name = \"red\"");
        assert!(matches!(
            ExperimentConfig::from_toml_str(&duplicate),
            Err(ConfigError::DuplicatePlayer(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();

        let config = ExperimentConfig::load(file.path()).unwrap();
        assert_eq!(config.names(), vec!["red", "blue"]);

        assert!(matches!(
            ExperimentConfig::load(Path::new("/nonexistent/experiment.toml")),
            Err(ConfigError::FileRead { .. })
        ));
    }

    #[test]
    fn test_run_experiment() {
        let config = ExperimentConfig::from_toml_str(CONFIG).unwrap();
        let summary = run_experiment(&config).unwrap();

        assert_eq!(summary.runs, 3);
        assert_eq!(summary.plays.len(), 3);
        assert_eq!(summary.seats.iter().map(|s| s.wins).sum::<usize>(), 3);
        assert_eq!(summary.seats[0].name, "red");

        let again = run_experiment(&config).unwrap();
        assert_eq!(summary, again);
    }
}
