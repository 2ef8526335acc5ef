//! Running matches: turn sequencing and batch experiments.

pub mod driver;
pub mod experiment;

pub use driver::{Match, MatchOutcome, MatchSettings, TurnReport};
pub use experiment::{run_experiment, ExperimentConfig, ExperimentSummary, PlayerEntry, SeatSummary};
