//! Turn sequencing for a single match.
//!
//! Each turn the current player rolls, the engine enumerates the legal
//! move-sets, the player's strategy picks one and the state applies
//! it. A maximum roll can grant another turn to the same player.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::agents::Strategy;
use crate::core::{ConfigError, Dice, GameRng, GameState, MatchError, PlayerId, PlayerMap};
use crate::rules::MoveSet;

/// Sequencing rules that sit outside the board rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Turns after which a match without a winner is abandoned.
    pub max_plays: usize,

    /// Whether a maximum roll lets the same player go again.
    pub extra_turn_on_max_roll: bool,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            max_plays: 10_000,
            extra_turn_on_max_roll: true,
        }
    }
}

impl MatchSettings {
    /// Set the play limit.
    #[must_use]
    pub fn with_max_plays(mut self, max_plays: usize) -> Self {
        self.max_plays = max_plays;
        self
    }

    /// Enable or disable the extra turn on a maximum roll.
    #[must_use]
    pub fn with_extra_turn_on_max_roll(mut self, enabled: bool) -> Self {
        self.extra_turn_on_max_roll = enabled;
        self
    }
}

/// What happened during one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub player: PlayerId,
    pub roll: u8,

    /// Number of legal move-sets offered.
    pub options: usize,

    /// The move-set played, `None` if nothing could move.
    pub played: Option<MoveSet>,

    /// Set when this turn completed the player's home lane.
    pub winner: Option<PlayerId>,

    /// Whether the same player moves again.
    pub extra_turn: bool,
}

/// Result of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: PlayerId,

    /// Turns taken, including turns with no legal move.
    pub plays: usize,
}

/// One match: a game state, a strategy per seat, and a die.
pub struct Match<D: Dice> {
    state: GameState,
    strategies: PlayerMap<Box<dyn Strategy>>,
    dice: D,
    rng: GameRng,
    settings: MatchSettings,
    current: PlayerId,
    plays: usize,
}

impl<D: Dice> Match<D> {
    /// Seat one strategy per player, in seat order.
    ///
    /// The die must have as many faces as the board expects.
    pub fn new(
        state: GameState,
        strategies: Vec<Box<dyn Strategy>>,
        dice: D,
        rng: GameRng,
        settings: MatchSettings,
    ) -> Result<Self, ConfigError> {
        if strategies.len() != state.player_count() {
            return Err(ConfigError::Validation(format!(
                "{} strategies for {} players",
                strategies.len(),
                state.player_count()
            )));
        }
        if dice.faces() != state.config().dice_faces {
            return Err(ConfigError::Validation(format!(
                "die has {} faces, board expects {}",
                dice.faces(),
                state.config().dice_faces
            )));
        }
        if settings.max_plays == 0 {
            return Err(ConfigError::NonPositive { field: "max_plays" });
        }

        Ok(Self {
            state,
            strategies: strategies.into_iter().collect(),
            dice,
            rng,
            settings,
            current: PlayerId::new(0),
            plays: 0,
        })
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Consume the match, keeping the final board.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Player whose turn is next.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Turns taken so far.
    #[must_use]
    pub fn plays(&self) -> usize {
        self.plays
    }

    /// Play one turn for the current player.
    pub fn take_turn(&mut self) -> Result<TurnReport, MatchError> {
        let player = self.current;
        let roll = self.dice.roll();
        self.plays += 1;

        let move_sets = self.state.enumerate_moves(roll, player)?;
        let played = if move_sets.is_empty() {
            None
        } else {
            let strategy = &self.strategies[player];
            let index = strategy.choose(&self.state, player, &move_sets, &mut self.rng);
            let chosen = move_sets
                .get(index)
                .cloned()
                .ok_or(MatchError::InvalidChoice {
                    index,
                    len: move_sets.len(),
                })?;
            self.state.apply_move_set(&chosen)?;
            debug!(
                player = self.state.roster().name(player),
                strategy = strategy.name(),
                roll,
                choice = %chosen.primary(),
                "played move"
            );
            Some(chosen)
        };

        let winner = self.state.is_winner(player).then_some(player);
        let extra_turn = winner.is_none()
            && self.settings.extra_turn_on_max_roll
            && roll == self.state.config().dice_faces;
        if !extra_turn {
            self.advance_seat();
        }

        Ok(TurnReport {
            player,
            roll,
            options: move_sets.len(),
            played,
            winner,
            extra_turn,
        })
    }

    /// Play turns until someone wins.
    pub fn play(&mut self) -> Result<MatchOutcome, MatchError> {
        self.play_observed(|_, _| {})
    }

    /// Like `play`, calling `observe` with each turn's report and the
    /// board after it.
    pub fn play_observed<F>(&mut self, mut observe: F) -> Result<MatchOutcome, MatchError>
    where
        F: FnMut(&TurnReport, &GameState),
    {
        loop {
            if self.plays >= self.settings.max_plays {
                warn!(plays = self.plays, "match hit the play limit without a winner");
                return Err(MatchError::PlayLimit(self.settings.max_plays));
            }

            let report = self.take_turn()?;
            observe(&report, &self.state);
            if let Some(winner) = report.winner {
                info!(
                    winner = self.state.roster().name(winner),
                    plays = self.plays,
                    "match finished"
                );
                return Ok(MatchOutcome {
                    winner,
                    plays: self.plays,
                });
            }
        }
    }

    fn advance_seat(&mut self) {
        let next = (self.current.index() + 1) % self.state.player_count();
        self.current = PlayerId::new(next as u8);
    }
}
