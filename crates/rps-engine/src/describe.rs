//! Human-readable text for rounds, matches and stats

use crate::determine_winner;
use crate::engine::MatchResult;
use crate::moves::{Move, RoundOutcome};
use crate::stats::SessionStats;

/// Sentence announcing who took the round.
pub fn describe_round(player_name: &str, player_move: Move, bot_move: Move) -> String {
    match determine_winner(player_move, bot_move) {
        RoundOutcome::PlayerWins => {
            format!("{} wins! {} beats {}", player_name, player_move.title(), bot_move)
        }
        RoundOutcome::BotWins => format!("Bot wins! {} beats {}", bot_move.title(), player_move),
        RoundOutcome::Tie => "It's a tie!".to_string(),
    }
}

pub fn match_title(winner: RoundOutcome) -> &'static str {
    match winner {
        RoundOutcome::PlayerWins => "Victory!",
        RoundOutcome::BotWins => "Defeat!",
        RoundOutcome::Tie => "Tie Game!",
    }
}

/// Closing message for a finished match.
pub fn describe_match(result: &MatchResult) -> String {
    match result.winner {
        RoundOutcome::PlayerWins => {
            format!("Congratulations {}! You won the game! 🎉", result.player_name)
        }
        RoundOutcome::BotWins => "Game over! The Bot won. Try again!".to_string(),
        RoundOutcome::Tie => "It's a tie game! Well played!".to_string(),
    }
}

pub fn final_score_line(result: &MatchResult) -> String {
    format!(
        "Final Score: {} {} - {} Bot",
        result.player_name, result.player_score, result.bot_score
    )
}

pub fn describe_stats(stats: &SessionStats) -> String {
    format!(
        "Games played: {} | Win rate: {}% | Current streak: {} | Best streak: {}",
        stats.games_played, stats.win_rate, stats.current_streak, stats.best_streak
    )
}
