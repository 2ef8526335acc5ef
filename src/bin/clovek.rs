//! Command-line front end: play a single match or run experiments.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use clovek::agents::{AgentKind, Strategy};
use clovek::core::{BoardConfig, GameRng, GameState, SeededDice};
use clovek::play::{run_experiment, ExperimentConfig, Match, MatchSettings};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Clovek ne jezi se simulator
#[derive(Parser, Debug)]
#[command(name = "clovek")]
#[command(about = "Simulate the cross-and-circle race game", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one match and print the final board
    Play {
        /// Player names in seat order
        #[arg(long, value_delimiter = ',', default_value = "red,blue,green,yellow")]
        players: Vec<String>,

        /// Seed for dice and strategies
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Ring spaces per player
        #[arg(long, default_value_t = BoardConfig::default().section_length)]
        section_length: usize,

        /// Pieces per player
        #[arg(long, default_value_t = BoardConfig::default().pieces_per_player)]
        pieces: usize,

        /// Die faces
        #[arg(long, default_value_t = BoardConfig::default().dice_faces)]
        faces: u8,

        /// Strategies in seat order (random, furthest, first or human);
        /// a single value applies to every seat
        #[arg(long, value_delimiter = ',', default_value = "random")]
        agent: Vec<AgentKind>,

        /// Turns before the match is abandoned
        #[arg(long, default_value_t = MatchSettings::default().max_plays)]
        max_plays: usize,

        /// Print the board after every turn
        #[arg(long)]
        show_board: bool,
    },

    /// Run experiment configs and print each summary as JSON
    Experiment {
        /// TOML experiment files
        #[arg(required = true)]
        configs: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Play {
            players,
            seed,
            section_length,
            pieces,
            faces,
            agent,
            max_plays,
            show_board,
        } => {
            let board = BoardConfig::default()
                .with_section_length(section_length)
                .with_pieces_per_player(pieces)
                .with_dice_faces(faces);
            let settings = MatchSettings::default().with_max_plays(max_plays);
            play(&players, board, seed, &agent, settings, show_board)
        }
        Command::Experiment { configs } => {
            for path in configs {
                info!(path = %path.display(), "running experiment");
                let config = ExperimentConfig::load(&path)?;
                let summary = run_experiment(&config)?;
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            Ok(())
        }
    }
}

fn play(
    names: &[String],
    board: BoardConfig,
    seed: u64,
    agents: &[AgentKind],
    settings: MatchSettings,
    show_board: bool,
) -> Result<()> {
    let state = GameState::new(names, board)?;
    let strategies: Vec<Box<dyn Strategy>> = match agents {
        [agent] => names.iter().map(|_| agent.build()).collect(),
        _ if agents.len() == names.len() => agents.iter().map(|agent| agent.build()).collect(),
        _ => bail!("{} agents given for {} players", agents.len(), names.len()),
    };
    let mut rng = GameRng::new(seed);
    let dice = SeededDice::from_rng(board.dice_faces, rng.fork());

    let mut game = Match::new(state, strategies, dice, rng, settings)?;
    let outcome = game.play_observed(|report, state| {
        if show_board {
            let name = state.roster().name(report.player);
            match &report.played {
                Some(move_set) => println!("{name} rolled {}: {move_set}", report.roll),
                None => println!("{name} rolled {}: no move", report.roll),
            }
            println!("{state}");
        }
    })?;

    if !show_board {
        print!("{}", game.state());
    }
    println!(
        "winner: {} after {} plays",
        game.state().roster().name(outcome.winner),
        outcome.plays
    );
    Ok(())
}
