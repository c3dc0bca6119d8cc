//! Rock-paper-scissors, first to a target score against a random AI.

use crate::GameError;
use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// Score needed to win when none is configured.
pub const DEFAULT_TARGET: u32 = 3;

/// A hand shape.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Throw {
    /// Beats scissors.
    Rock,
    /// Beats rock.
    Paper,
    /// Beats paper.
    Scissors,
}

impl Throw {
    /// The shape this one defeats.
    pub fn beats(self) -> Throw {
        match self {
            Throw::Rock => Throw::Scissors,
            Throw::Scissors => Throw::Paper,
            Throw::Paper => Throw::Rock,
        }
    }

    /// Round result from the perspective of `self`.
    pub fn against(self, other: Throw) -> RoundResult {
        if self == other {
            RoundResult::Tie
        } else if self.beats() == other {
            RoundResult::Win
        } else {
            RoundResult::Lose
        }
    }

    /// Draws a shape uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Throw {
        use strum::VariantArray;
        Throw::VARIANTS[rng.gen_range(0..Throw::VARIANTS.len())]
    }
}

/// Outcome of one round for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoundResult {
    /// The player scored.
    Win,
    /// The AI scored.
    Lose,
    /// Nobody scored.
    Tie,
}

/// Who reached the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchWinner {
    /// Match still running.
    #[default]
    None,
    /// The player reached the target.
    Player,
    /// The AI reached the target.
    Ai,
}

/// Fixed per-session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct RpsConfig {
    /// Score needed to win; `0` means [`DEFAULT_TARGET`].
    #[serde(deserialize_with = "deserialize_target")]
    target: u32,
}

/// Reads a signed target; zero or negative means [`DEFAULT_TARGET`].
fn deserialize_target<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let target = i64::deserialize(deserializer)?;
    Ok(u32::try_from(target.max(0)).unwrap_or(u32::MAX))
}

impl RpsConfig {
    /// Creates a new configuration.
    pub fn new(target: u32) -> Self {
        Self { target }
    }

    /// The target with the default applied.
    pub fn effective_target(&self) -> u32 {
        if self.target == 0 {
            DEFAULT_TARGET
        } else {
            self.target
        }
    }
}

impl Default for RpsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET)
    }
}

/// Complete rock-paper-scissors session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpsState {
    player_score: u32,
    #[serde(rename = "aiScore")]
    ai_score: u32,
    rounds: u32,
    target: u32,
    last_player: Option<Throw>,
    #[serde(rename = "lastAI")]
    last_ai: Option<Throw>,
    last_result: Option<RoundResult>,
    finished: bool,
    winner: MatchWinner,
}

impl RpsState {
    /// Starts a match with zero scores.
    #[instrument]
    pub fn new(config: RpsConfig) -> Self {
        Self {
            player_score: 0,
            ai_score: 0,
            rounds: 0,
            target: config.effective_target(),
            last_player: None,
            last_ai: None,
            last_result: None,
            finished: false,
            winner: MatchWinner::None,
        }
    }

    /// Player's score.
    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    /// AI's score.
    pub fn ai_score(&self) -> u32 {
        self.ai_score
    }

    /// Resolved rounds, ties included.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Score needed to win.
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Player's throw in the latest round.
    pub fn last_player(&self) -> Option<Throw> {
        self.last_player
    }

    /// AI's throw in the latest round.
    pub fn last_ai(&self) -> Option<Throw> {
        self.last_ai
    }

    /// Latest round result.
    pub fn last_result(&self) -> Option<RoundResult> {
        self.last_result
    }

    /// Whether a side reached the target.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Who reached the target.
    pub fn winner(&self) -> MatchWinner {
        self.winner
    }

    /// Returns the configuration this match was created with.
    pub fn config(&self) -> RpsConfig {
        RpsConfig::new(self.target)
    }

    /// Plays a round given the player's throw by name.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] (invalid move) if the match is over or `input`
    /// is not `rock`, `paper` or `scissors`.
    #[instrument(skip(self, rng))]
    pub fn play<R: Rng + ?Sized>(self, input: &str, rng: &mut R) -> Result<Self, GameError> {
        let throw = Throw::from_str(input.trim())
            .map_err(|_| GameError::invalid_move(format!("unknown move '{input}'")))?;
        let ai = Throw::random(rng);
        self.play_round(throw, ai)
    }

    /// Resolves a round with both throws known.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] (invalid move) if the match is over.
    #[instrument(skip(self), fields(player_score = self.player_score, ai_score = self.ai_score))]
    pub fn play_round(mut self, player: Throw, ai: Throw) -> Result<Self, GameError> {
        if self.finished {
            return Err(GameError::invalid_move("match is already finished"));
        }

        let result = player.against(ai);
        match result {
            RoundResult::Win => self.player_score += 1,
            RoundResult::Lose => self.ai_score += 1,
            RoundResult::Tie => {}
        }
        self.rounds += 1;
        self.last_player = Some(player);
        self.last_ai = Some(ai);
        self.last_result = Some(result);
        debug!(%player, %ai, %result, "Round resolved");

        if self.player_score >= self.target {
            self.finished = true;
            self.winner = MatchWinner::Player;
        } else if self.ai_score >= self.target {
            self.finished = true;
            self.winner = MatchWinner::Ai;
        }

        if self.finished {
            info!(winner = ?self.winner, rounds = self.rounds, "Match finished");
        }
        Ok(self)
    }

    /// Zeroes the scores, keeping the target.
    #[instrument(skip(self))]
    pub fn reset(self) -> Self {
        Self::new(self.config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_cyclic_dominance() {
        assert_eq!(Throw::Rock.against(Throw::Scissors), RoundResult::Win);
        assert_eq!(Throw::Scissors.against(Throw::Paper), RoundResult::Win);
        assert_eq!(Throw::Paper.against(Throw::Rock), RoundResult::Win);
        assert_eq!(Throw::Rock.against(Throw::Paper), RoundResult::Lose);
        assert_eq!(Throw::Paper.against(Throw::Paper), RoundResult::Tie);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ROCK".parse::<Throw>().unwrap(), Throw::Rock);
        assert_eq!("Scissors".parse::<Throw>().unwrap(), Throw::Scissors);
        assert!("lizard".parse::<Throw>().is_err());
    }

    #[test]
    fn test_tie_changes_no_score() {
        let state = RpsState::new(RpsConfig::default())
            .play_round(Throw::Rock, Throw::Rock)
            .unwrap();
        assert_eq!((state.player_score(), state.ai_score(), state.rounds()), (0, 0, 1));
        assert_eq!(state.last_result(), Some(RoundResult::Tie));
    }

    #[test]
    fn test_finishes_at_target() {
        let mut state = RpsState::new(RpsConfig::new(2));
        state = state.play_round(Throw::Rock, Throw::Scissors).unwrap();
        assert!(!state.finished());
        state = state.play_round(Throw::Paper, Throw::Rock).unwrap();
        assert!(state.finished());
        assert_eq!(state.winner(), MatchWinner::Player);

        let err = state.clone().play_round(Throw::Rock, Throw::Paper).unwrap_err();
        assert!(err.to_string().contains("already finished"));
    }

    #[test]
    fn test_zero_target_uses_default() {
        assert_eq!(RpsState::new(RpsConfig::new(0)).target(), DEFAULT_TARGET);
    }

    #[test]
    fn test_negative_target_in_json_uses_default() {
        for body in [serde_json::json!({"target": -1}), serde_json::json!({"target": 0})] {
            let config: RpsConfig = serde_json::from_value(body).unwrap();
            assert_eq!(config.effective_target(), DEFAULT_TARGET);
        }
        let config: RpsConfig = serde_json::from_value(serde_json::json!({"target": 5})).unwrap();
        assert_eq!(config.effective_target(), 5);
        let config: RpsConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(config.effective_target(), DEFAULT_TARGET);
    }

    #[test]
    fn test_unknown_move_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let err = RpsState::new(RpsConfig::default())
            .play("spock", &mut rng)
            .unwrap_err();
        assert!(err.to_string().contains("unknown move"));
    }

    #[test]
    fn test_reset_keeps_target() {
        let state = RpsState::new(RpsConfig::new(5))
            .play_round(Throw::Rock, Throw::Scissors)
            .unwrap()
            .reset();
        assert_eq!(state, RpsState::new(RpsConfig::new(5)));
    }

    #[test]
    fn test_serialized_field_names() {
        let state = RpsState::new(RpsConfig::default())
            .play_round(Throw::Paper, Throw::Scissors)
            .unwrap();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["playerScore"], 0);
        assert_eq!(json["aiScore"], 1);
        assert_eq!(json["lastPlayer"], "paper");
        assert_eq!(json["lastAI"], "scissors");
        assert_eq!(json["lastResult"], "lose");
        assert_eq!(json["winner"], "none");
    }
}
