//! Match execution engine

use serde::{Deserialize, Serialize};

use crate::determine_winner;
use crate::error::EngineError;
use crate::moves::{Move, RoundOutcome};
use crate::random::SeededRng;
use crate::stats::SessionStats;

/// Name used until the player picks one
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// How long a match may run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub max_rounds: u8,
    pub winning_score: u8,
}

impl MatchConfig {
    /// Standard config: first to 3, never more than 5 rounds
    pub fn best_of_five() -> Self {
        Self { max_rounds: 5, winning_score: 3 }
    }

    pub fn new(max_rounds: u8, winning_score: u8) -> Result<Self, EngineError> {
        if max_rounds == 0 {
            return Err(EngineError::InvalidInput("max_rounds must be at least 1".to_string()));
        }
        if winning_score == 0 {
            return Err(EngineError::InvalidInput("winning_score must be at least 1".to_string()));
        }
        Ok(Self { max_rounds, winning_score })
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::best_of_five()
    }
}

/// Mutable state of the match in progress
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub player_score: u8,
    pub bot_score: u8,
    /// 1-based number of the round being played (or the last one, once ended)
    pub round: u8,
    pub active: bool,
    pub player_name: String,
}

impl MatchState {
    fn new(player_name: String) -> Self {
        Self {
            player_score: 0,
            bot_score: 0,
            round: 1,
            active: true,
            player_name,
        }
    }

    fn is_over(&self, config: &MatchConfig) -> bool {
        self.round >= config.max_rounds
            || self.player_score >= config.winning_score
            || self.bot_score >= config.winning_score
    }
}

/// One resolved round, as kept in the match history
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u8,
    pub player_move: Move,
    pub bot_move: Move,
    pub outcome: RoundOutcome,
}

/// Everything a front end needs to render a round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// The round that was just played
    pub round: u8,
    pub player_move: Move,
    pub bot_move: Move,
    pub outcome: RoundOutcome,
    /// State after the score update
    pub state: MatchState,
    /// Present only when this round ended the match
    pub match_result: Option<MatchResult>,
}

/// Result of a complete match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub player_name: String,
    pub player_score: u8,
    pub bot_score: u8,
    pub winner: RoundOutcome,
    pub rounds_played: u8,
    pub rounds: Vec<RoundRecord>,
    /// Session totals with this match counted
    pub stats: SessionStats,
}

/// Owns one match at a time plus the session statistics.
///
/// All operations are synchronous; reveal timing is up to the caller.
#[derive(Clone, Debug)]
pub struct MatchEngine {
    config: MatchConfig,
    state: MatchState,
    stats: SessionStats,
    rounds: Vec<RoundRecord>,
    last_result: Option<MatchResult>,
    rng: SeededRng,
}

impl MatchEngine {
    /// Best-of-five engine with a seeded bot
    pub fn new(seed: u64) -> Self {
        Self::with_config(MatchConfig::best_of_five(), SeededRng::new(seed))
    }

    pub fn with_config(config: MatchConfig, rng: SeededRng) -> Self {
        Self {
            config,
            state: MatchState::new(DEFAULT_PLAYER_NAME.to_string()),
            stats: SessionStats::default(),
            rounds: Vec::with_capacity(config.max_rounds as usize),
            last_result: None,
            rng,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Rounds resolved so far in the current match
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// Result of the most recent finished match, cleared by [`MatchEngine::reset`]
    pub fn last_result(&self) -> Option<&MatchResult> {
        self.last_result.as_ref()
    }

    /// Seed of the bot RNG, for replaying the session
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Store a trimmed, non-empty player name.
    ///
    /// Fails with `MatchInProgress` once a round of the active match has been played.
    pub fn set_player_name(&mut self, name: &str) -> Result<(), EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidInput("player name must not be empty".to_string()));
        }
        if self.state.active && !self.rounds.is_empty() {
            return Err(EngineError::MatchInProgress);
        }

        self.state.player_name = name.to_string();
        Ok(())
    }

    /// Play one round against a uniformly random bot move.
    pub fn resolve_round(&mut self, player_move: Move) -> Result<RoundResult, EngineError> {
        if !self.state.active {
            log::warn!("round rejected: match already ended");
            return Err(EngineError::InactiveMatch);
        }
        let bot_move = self.rng.next_move();
        self.resolve_round_against(player_move, bot_move)
    }

    /// Play one round with a known bot move.
    ///
    /// Same rules as [`MatchEngine::resolve_round`]; used for replays.
    pub fn resolve_round_against(
        &mut self,
        player_move: Move,
        bot_move: Move,
    ) -> Result<RoundResult, EngineError> {
        if !self.state.active {
            log::warn!("round rejected: match already ended");
            return Err(EngineError::InactiveMatch);
        }

        let outcome = determine_winner(player_move, bot_move);
        match outcome {
            RoundOutcome::PlayerWins => self.state.player_score += 1,
            RoundOutcome::BotWins => self.state.bot_score += 1,
            RoundOutcome::Tie => {}
        }

        let round = self.state.round;
        self.rounds.push(RoundRecord {
            round,
            player_move,
            bot_move,
            outcome,
        });

        log::debug!(
            "round {}: {} vs {} -> {:?} ({}-{})",
            round,
            player_move,
            bot_move,
            outcome,
            self.state.player_score,
            self.state.bot_score
        );

        // Round number stays put on the final round
        let match_result = if self.state.is_over(&self.config) {
            Some(self.finish())
        } else {
            self.state.round += 1;
            None
        };

        Ok(RoundResult {
            round,
            player_move,
            bot_move,
            outcome,
            state: self.state.clone(),
            match_result,
        })
    }

    /// End the active match now and count it.
    ///
    /// Rounds call this automatically; use it directly to abandon a match.
    /// An ended match cannot be finalized twice.
    pub fn finalize_match(&mut self) -> Result<MatchResult, EngineError> {
        if !self.state.active {
            log::warn!("finalize rejected: match already ended");
            return Err(EngineError::InactiveMatch);
        }
        Ok(self.finish())
    }

    /// Start a new match. Name, stats and RNG carry over.
    pub fn reset(&mut self) {
        let name = std::mem::take(&mut self.state.player_name);
        self.state = MatchState::new(name);
        self.rounds.clear();
        self.last_result = None;
    }

    fn finish(&mut self) -> MatchResult {
        self.state.active = false;

        let winner = RoundOutcome::from_scores(self.state.player_score, self.state.bot_score);
        self.stats.record(winner.is_player_win());

        let result = MatchResult {
            player_name: self.state.player_name.clone(),
            player_score: self.state.player_score,
            bot_score: self.state.bot_score,
            winner,
            rounds_played: self.rounds.len() as u8,
            rounds: self.rounds.clone(),
            stats: self.stats.clone(),
        };

        log::info!(
            "match finished: {} {} - {} bot ({:?}), played={} won={} streak={}",
            result.player_name,
            result.player_score,
            result.bot_score,
            winner,
            self.stats.games_played,
            self.stats.games_won,
            self.stats.current_streak
        );

        self.last_result = Some(result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn play_win(engine: &mut MatchEngine) {
        while engine.state().active {
            engine.resolve_round_against(Move::Rock, Move::Scissors).unwrap();
        }
    }

    fn play_loss(engine: &mut MatchEngine) {
        while engine.state().active {
            engine.resolve_round_against(Move::Rock, Move::Paper).unwrap();
        }
    }

    fn play_tie(engine: &mut MatchEngine) {
        while engine.state().active {
            engine.resolve_round_against(Move::Paper, Move::Paper).unwrap();
        }
    }

    #[test]
    fn test_new_engine_state() {
        let engine = MatchEngine::new(42);
        let state = engine.state();
        assert_eq!(state.player_score, 0);
        assert_eq!(state.bot_score, 0);
        assert_eq!(state.round, 1);
        assert!(state.active);
        assert_eq!(state.player_name, DEFAULT_PLAYER_NAME);
        assert_eq!(engine.stats(), &SessionStats::default());
        assert!(engine.last_result().is_none());
        assert_eq!(engine.seed(), 42);
    }

    #[test]
    fn test_three_straight_wins() {
        let mut engine = MatchEngine::new(42);

        let r1 = engine.resolve_round_against(Move::Rock, Move::Scissors).unwrap();
        assert_eq!(r1.outcome, RoundOutcome::PlayerWins);
        assert_eq!(r1.round, 1);
        assert_eq!(r1.state.round, 2);
        assert!(r1.match_result.is_none());

        let r2 = engine.resolve_round_against(Move::Paper, Move::Rock).unwrap();
        assert_eq!(r2.outcome, RoundOutcome::PlayerWins);
        assert!(r2.match_result.is_none());

        let r3 = engine.resolve_round_against(Move::Scissors, Move::Paper).unwrap();
        assert_eq!(r3.outcome, RoundOutcome::PlayerWins);
        assert_eq!(r3.round, 3);
        assert_eq!(r3.state.round, 3, "round must not advance past the final round");
        assert_eq!(r3.state.player_score, 3);
        assert_eq!(r3.state.bot_score, 0);
        assert!(!r3.state.active);

        let result = r3.match_result.expect("match should be over");
        assert_eq!(result.winner, RoundOutcome::PlayerWins);
        assert_eq!(result.rounds_played, 3);
        assert_eq!(result.rounds.len(), 3);
        assert_eq!(result.stats.current_streak, 1);
        assert_eq!(engine.stats().current_streak, 1);
        assert_eq!(engine.stats().games_won, 1);
        assert_eq!(engine.last_result(), Some(&result));
    }

    #[test]
    fn test_five_ties_reset_streak() {
        let mut engine = MatchEngine::new(42);
        play_win(&mut engine);
        engine.reset();
        play_win(&mut engine);
        engine.reset();
        assert_eq!(engine.stats().current_streak, 2);

        for round in 1..=5u8 {
            let r = engine.resolve_round_against(Move::Rock, Move::Rock).unwrap();
            assert_eq!(r.outcome, RoundOutcome::Tie);
            assert_eq!(r.round, round);
            assert_eq!(r.match_result.is_some(), round == 5);
        }

        let state = engine.state();
        assert_eq!(state.round, 5);
        assert_eq!((state.player_score, state.bot_score), (0, 0));
        assert!(!state.active);

        let result = engine.last_result().unwrap();
        assert_eq!(result.winner, RoundOutcome::Tie);
        assert_eq!(engine.stats().current_streak, 0);
        assert_eq!(engine.stats().best_streak, 2);
        assert_eq!(engine.stats().games_played, 3);
    }

    #[test]
    fn test_bot_wins_match() {
        let mut engine = MatchEngine::new(42);
        play_loss(&mut engine);

        let result = engine.last_result().unwrap();
        assert_eq!(result.winner, RoundOutcome::BotWins);
        assert_eq!((result.player_score, result.bot_score), (0, 3));
        assert_eq!(engine.stats().games_won, 0);
        assert_eq!(engine.stats().win_rate, 0);
    }

    #[test]
    fn test_mixed_match_decided_on_round_five() {
        let mut engine = MatchEngine::new(42);
        engine.resolve_round_against(Move::Rock, Move::Scissors).unwrap(); // 1-0
        engine.resolve_round_against(Move::Rock, Move::Paper).unwrap(); // 1-1
        engine.resolve_round_against(Move::Rock, Move::Rock).unwrap(); // tie
        engine.resolve_round_against(Move::Paper, Move::Rock).unwrap(); // 2-1
        assert!(engine.state().active);

        let r5 = engine.resolve_round_against(Move::Scissors, Move::Scissors).unwrap();
        let result = r5.match_result.unwrap();
        assert_eq!(result.winner, RoundOutcome::PlayerWins);
        assert_eq!((result.player_score, result.bot_score), (2, 1));
        assert_eq!(result.rounds_played, 5);
    }

    #[test]
    fn test_round_rejected_after_end() {
        let mut engine = MatchEngine::new(42);
        play_win(&mut engine);
        let before = engine.state().clone();

        assert_eq!(engine.resolve_round(Move::Rock), Err(EngineError::InactiveMatch));
        assert_eq!(
            engine.resolve_round_against(Move::Rock, Move::Scissors),
            Err(EngineError::InactiveMatch)
        );
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.rounds().len(), 3);
    }

    #[test]
    fn test_finalize_abandoned_match() {
        let mut engine = MatchEngine::new(42);
        engine.resolve_round_against(Move::Rock, Move::Paper).unwrap();

        let result = engine.finalize_match().unwrap();
        assert_eq!(result.winner, RoundOutcome::BotWins);
        assert_eq!(result.rounds_played, 1);
        assert!(!engine.state().active);
        assert_eq!(engine.stats().games_played, 1);
    }

    #[test]
    fn test_finalize_twice_counts_once() {
        let mut engine = MatchEngine::new(42);
        play_win(&mut engine);

        assert_eq!(engine.finalize_match(), Err(EngineError::InactiveMatch));
        assert_eq!(engine.stats().games_played, 1);
        assert_eq!(engine.stats().current_streak, 1);
    }

    #[test]
    fn test_finalize_before_any_round_is_tie() {
        let mut engine = MatchEngine::new(42);
        engine.stats.record(true);

        let result = engine.finalize_match().unwrap();
        assert_eq!(result.winner, RoundOutcome::Tie);
        assert_eq!(result.rounds_played, 0);
        assert_eq!(engine.stats().current_streak, 0);
    }

    #[test]
    fn test_reset_keeps_name_and_stats() {
        let mut engine = MatchEngine::new(42);
        engine.set_player_name("Alex").unwrap();
        play_win(&mut engine);

        engine.reset();

        let state = engine.state();
        assert_eq!((state.player_score, state.bot_score, state.round), (0, 0, 1));
        assert!(state.active);
        assert_eq!(state.player_name, "Alex");
        assert_eq!(engine.stats().games_played, 1);
        assert!(engine.rounds().is_empty());
        assert!(engine.last_result().is_none());
    }

    #[test]
    fn test_reset_mid_match_is_not_counted() {
        let mut engine = MatchEngine::new(42);
        engine.resolve_round_against(Move::Rock, Move::Scissors).unwrap();
        engine.reset();

        assert_eq!(engine.stats().games_played, 0);
        assert_eq!(engine.state().player_score, 0);
    }

    #[test]
    fn test_player_name_validation() {
        let mut engine = MatchEngine::new(42);

        let err = engine.set_player_name("   ").unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
        assert_eq!(engine.state().player_name, DEFAULT_PLAYER_NAME);

        engine.set_player_name(" Alex ").unwrap();
        assert_eq!(engine.state().player_name, "Alex");
    }

    #[test]
    fn test_player_name_locked_during_match() {
        let mut engine = MatchEngine::new(42);
        engine.set_player_name("Alex").unwrap();
        engine.resolve_round_against(Move::Rock, Move::Rock).unwrap();

        assert_eq!(engine.set_player_name("Sam"), Err(EngineError::MatchInProgress));
        assert_eq!(engine.state().player_name, "Alex");

        play_tie(&mut engine);
        engine.set_player_name("Sam").unwrap();
        assert_eq!(engine.state().player_name, "Sam");
    }

    #[test]
    fn test_seeded_bot_is_reproducible() {
        let mut a = MatchEngine::new(7);
        let mut b = MatchEngine::new(7);

        for _ in 0..20 {
            let ra = a.resolve_round(Move::Rock).unwrap();
            let rb = b.resolve_round(Move::Rock).unwrap();
            assert_eq!(ra.bot_move, rb.bot_move);
            if !a.state().active {
                a.reset();
                b.reset();
            }
        }
    }

    #[test]
    fn test_custom_config() {
        assert!(MatchConfig::new(0, 1).is_err());
        assert!(MatchConfig::new(1, 0).is_err());

        let config = MatchConfig::new(3, 2).unwrap();
        let mut engine = MatchEngine::with_config(config, SeededRng::new(1));
        engine.resolve_round_against(Move::Rock, Move::Scissors).unwrap();
        let r = engine.resolve_round_against(Move::Rock, Move::Scissors).unwrap();
        assert_eq!(r.match_result.unwrap().player_score, 2);
    }

    #[test]
    fn test_result_serializes() {
        let mut engine = MatchEngine::new(42);
        let r = engine.resolve_round_against(Move::Rock, Move::Scissors).unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["player_move"], "rock");
        assert_eq!(json["outcome"], "PlayerWins");
        assert_eq!(json["state"]["player_score"], 1);
        assert!(json["match_result"].is_null());
    }

    fn any_move() -> impl Strategy<Value = Move> {
        prop::sample::select(Move::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_tie_iff_equal(a in any_move(), b in any_move()) {
            let mut engine = MatchEngine::new(0);
            let r = engine.resolve_round_against(a, b).unwrap();
            prop_assert_eq!(r.outcome == RoundOutcome::Tie, a == b);
            if a != b {
                let expected = if a.beats(b) { RoundOutcome::PlayerWins } else { RoundOutcome::BotWins };
                prop_assert_eq!(r.outcome, expected);
            }
        }

        #[test]
        fn prop_scores_bounded_and_match_terminates(
            seed in any::<u64>(),
            player_moves in prop::collection::vec(any_move(), 5),
        ) {
            let mut engine = MatchEngine::new(seed);
            let mut last = (0u8, 0u8);
            let mut played = 0;

            for m in player_moves {
                if !engine.state().active {
                    break;
                }
                let r = engine.resolve_round(m).unwrap();
                played += 1;

                let now = (r.state.player_score, r.state.bot_score);
                prop_assert!(now.0 >= last.0 && now.1 >= last.1);
                prop_assert!(now.0 <= 3 && now.1 <= 3);
                if now.0 == 3 || now.1 == 3 {
                    prop_assert!(!r.state.active);
                }
                last = now;
            }

            prop_assert!(!engine.state().active);
            prop_assert!(played <= 5);
            prop_assert_eq!(engine.stats().games_played, 1);
        }

        #[test]
        fn prop_best_streak_is_longest_win_run(results in prop::collection::vec(0u8..3, 0..20)) {
            let mut engine = MatchEngine::new(0);
            let mut run = 0u32;
            let mut longest = 0u32;

            for r in results {
                match r {
                    0 => play_win(&mut engine),
                    1 => play_loss(&mut engine),
                    _ => play_tie(&mut engine),
                }
                engine.reset();

                if r == 0 {
                    run += 1;
                    longest = longest.max(run);
                } else {
                    run = 0;
                }

                let stats = engine.stats();
                prop_assert_eq!(stats.current_streak, run);
                prop_assert_eq!(stats.best_streak, longest);
                prop_assert!(stats.current_streak <= stats.best_streak);
            }
        }
    }
}
