//! Match Logic for Rock Paper Scissors
//!
//! Round resolution and best-of-five match progression against a random bot.
//! This crate is compiled to:
//! - Native (for the terminal front end)
//! - WASM (for the browser front end)

mod random;
mod moves;
mod stats;
mod error;
mod engine;
mod describe;

#[cfg(feature = "wasm")]
mod wasm;

pub use random::SeededRng;
pub use moves::{Move, RoundOutcome};
pub use stats::SessionStats;
pub use error::EngineError;
pub use engine::{DEFAULT_PLAYER_NAME, MatchConfig, MatchEngine, MatchResult, MatchState, RoundRecord, RoundResult};
pub use describe::{describe_match, describe_round, describe_stats, final_score_line, match_title};

/// Decide a single round from the player's point of view.
///
/// Rock beats Scissors, Paper beats Rock, Scissors beats Paper.
pub fn determine_winner(player: Move, bot: Move) -> RoundOutcome {
    if player == bot {
        RoundOutcome::Tie
    } else if player.beats(bot) {
        RoundOutcome::PlayerWins
    } else {
        RoundOutcome::BotWins
    }
}
