//! Move and outcome definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A move in Rock Paper Scissors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// Every move, in the order the bot draws from.
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// The move this one defeats.
    pub fn beaten_move(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }

    pub fn beats(self, other: Move) -> bool {
        self.beaten_move() == other
    }

    /// Hand symbol shown next to the move.
    pub fn symbol(self) -> &'static str {
        match self {
            Move::Rock => "✊",
            Move::Paper => "✋",
            Move::Scissors => "✌️",
        }
    }

    /// Capitalized name, used at the start of a sentence.
    pub fn title(self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Rock => write!(f, "rock"),
            Move::Paper => write!(f, "paper"),
            Move::Scissors => write!(f, "scissors"),
        }
    }
}

impl FromStr for Move {
    type Err = EngineError;

    /// Accepts the full name or its first letter, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Move::Rock),
            "paper" | "p" => Ok(Move::Paper),
            "scissors" | "s" => Ok(Move::Scissors),
            other => Err(EngineError::InvalidInput(format!("unknown move '{}'", other))),
        }
    }
}

/// Result of a round, always from the player's point of view.
///
/// Also used for the overall result of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    PlayerWins,
    BotWins,
    Tie,
}

impl RoundOutcome {
    /// Compare two scores or tallies from the player's point of view.
    pub fn from_scores(player: u8, bot: u8) -> Self {
        match player.cmp(&bot) {
            std::cmp::Ordering::Greater => RoundOutcome::PlayerWins,
            std::cmp::Ordering::Less => RoundOutcome::BotWins,
            std::cmp::Ordering::Equal => RoundOutcome::Tie,
        }
    }

    /// Same result seen from the bot's side.
    pub fn flipped(self) -> Self {
        match self {
            RoundOutcome::PlayerWins => RoundOutcome::BotWins,
            RoundOutcome::BotWins => RoundOutcome::PlayerWins,
            RoundOutcome::Tie => RoundOutcome::Tie,
        }
    }

    pub fn is_player_win(self) -> bool {
        self == RoundOutcome::PlayerWins
    }
}
