//! Strategy trait and the built-in strategies.
//!
//! - `UniformRandom`: uniform choice among the legal move-sets
//! - `FurthestAlong`: moves the most advanced piece
//! - `FirstLegal`: always the first move-set (deterministic)
//! - `Human`: prompts on a text stream and reads the chosen index

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::SpaceKind;
use crate::core::{GameRng, GameState, PlayerId};
use crate::rules::MoveSet;

/// Chooses one of the legal move-sets for a roll.
pub trait Strategy: Send + Sync {
    /// Short name for logs and summaries.
    fn name(&self) -> &str;

    /// Index into `move_sets` of the move to play.
    ///
    /// Only called with a non-empty `move_sets`.
    fn choose(
        &self,
        state: &GameState,
        player: PlayerId,
        move_sets: &[MoveSet],
        rng: &mut GameRng,
    ) -> usize;
}

/// Uniform random choice.
#[derive(Clone, Debug, Default)]
pub struct UniformRandom;

impl Strategy for UniformRandom {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(
        &self,
        _state: &GameState,
        _player: PlayerId,
        move_sets: &[MoveSet],
        rng: &mut GameRng,
    ) -> usize {
        if move_sets.is_empty() {
            return 0;
        }
        rng.gen_index(move_sets.len())
    }
}

/// Moves the piece furthest along its track.
///
/// Waiting pieces count as least advanced. Ties go to the earliest
/// move-set.
#[derive(Clone, Debug, Default)]
pub struct FurthestAlong;

impl FurthestAlong {
    /// Progress of the moving piece: 0 in waiting, otherwise one past
    /// its track position.
    fn progress(state: &GameState, player: PlayerId, move_set: &MoveSet) -> usize {
        let from = &move_set.primary().from_space;
        match from.kind {
            SpaceKind::Waiting => 0,
            SpaceKind::Main | SpaceKind::Home => state
                .topology()
                .track_position(player, from)
                .map_or(0, |position| position + 1),
        }
    }
}

impl Strategy for FurthestAlong {
    fn name(&self) -> &str {
        "furthest"
    }

    fn choose(
        &self,
        state: &GameState,
        player: PlayerId,
        move_sets: &[MoveSet],
        _rng: &mut GameRng,
    ) -> usize {
        let mut best = 0;
        let mut best_progress = None;
        for (idx, move_set) in move_sets.iter().enumerate() {
            let progress = Self::progress(state, player, move_set);
            if best_progress.map_or(true, |p| progress > p) {
                best = idx;
                best_progress = Some(progress);
            }
        }
        best
    }
}

/// Always plays the first legal move-set.
#[derive(Clone, Debug, Default)]
pub struct FirstLegal;

impl Strategy for FirstLegal {
    fn name(&self) -> &str {
        "first"
    }

    fn choose(
        &self,
        _state: &GameState,
        _player: PlayerId,
        _move_sets: &[MoveSet],
        _rng: &mut GameRng,
    ) -> usize {
        0
    }
}

/// Interactive choice: lists the move-sets with their indices and reads
/// an index back, asking again until the answer is in range.
///
/// If the input ends or fails, returns an out-of-range index so the
/// driver rejects the turn.
pub struct Human<R, W> {
    io: Mutex<(R, W)>,
}

impl<R, W> Human<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    #[must_use]
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }

    /// Give back the streams, e.g. to inspect what was printed.
    pub fn into_inner(self) -> (R, W) {
        match self.io.into_inner() {
            Ok(io) => io,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn prompt(
        reader: &mut R,
        writer: &mut W,
        player: &str,
        move_sets: &[MoveSet],
    ) -> io::Result<Option<usize>> {
        writeln!(writer, "Allowed moves for {player} with index:")?;
        for (idx, move_set) in move_sets.iter().enumerate() {
            writeln!(writer, "Index: {idx}, move: {move_set}")?;
        }

        let mut line = String::new();
        loop {
            write!(writer, "Enter chosen move index: ")?;
            writer.flush()?;

            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match line.trim().parse::<usize>() {
                Ok(idx) if idx < move_sets.len() => return Ok(Some(idx)),
                _ => writeln!(
                    writer,
                    "{:?} is not an index between 0 and {}",
                    line.trim(),
                    move_sets.len() - 1
                )?,
            }
        }
    }
}

impl Human<BufReader<Stdin>, Stdout> {
    /// Prompt on standard output, read from standard input.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> Strategy for Human<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn name(&self) -> &str {
        "human"
    }

    fn choose(
        &self,
        state: &GameState,
        player: PlayerId,
        move_sets: &[MoveSet],
        _rng: &mut GameRng,
    ) -> usize {
        if move_sets.is_empty() {
            return 0;
        }
        let Ok(mut io) = self.io.lock() else {
            warn!("human input streams are poisoned");
            return move_sets.len();
        };
        let (reader, writer) = &mut *io;
        let name = state.roster().name(player);
        match Self::prompt(reader, writer, name, move_sets) {
            Ok(Some(idx)) => idx,
            Ok(None) => {
                warn!(player = name, "input ended before a move was chosen");
                move_sets.len()
            }
            Err(err) => {
                warn!(player = name, error = %err, "could not read a move choice");
                move_sets.len()
            }
        }
    }
}

/// Strategy names accepted in configuration files and on the command
/// line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    #[default]
    Random,
    Furthest,
    First,
    /// Reads choices from standard input.
    Human,
}

impl AgentKind {
    /// Instantiate the strategy.
    #[must_use]
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            AgentKind::Random => Box::new(UniformRandom),
            AgentKind::Furthest => Box::new(FurthestAlong),
            AgentKind::First => Box::new(FirstLegal),
            AgentKind::Human => Box::new(Human::stdio()),
        }
    }

    /// Whether the strategy waits on a person.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(self, AgentKind::Human)
    }
}

impl std::str::FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(AgentKind::Random),
            "furthest" => Ok(AgentKind::Furthest),
            "first" => Ok(AgentKind::First),
            "human" => Ok(AgentKind::Human),
            other => Err(format!(
                "unknown agent {other:?} (expected random, furthest, first or human)"
            )),
        }
    }
}
