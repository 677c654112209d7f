//! Session statistics kept across matches

use serde::{Deserialize, Serialize};

/// Running totals for the whole session.
///
/// Lives as long as the engine; [`crate::MatchEngine::reset`] never touches it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub games_played: u32,
    pub games_won: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    /// Percentage of games won, rounded half up. 0 before any game.
    pub win_rate: u32,
}

impl SessionStats {
    /// Count one finished match.
    ///
    /// Anything but a win, ties included, breaks the streak.
    pub fn record(&mut self, won: bool) {
        self.games_played += 1;

        if won {
            self.games_won += 1;
            self.current_streak += 1;
            if self.current_streak > self.best_streak {
                self.best_streak = self.current_streak;
            }
        } else {
            self.current_streak = 0;
        }

        self.win_rate = compute_win_rate(self.games_won, self.games_played);
    }
}

fn compute_win_rate(won: u32, played: u32) -> u32 {
    if played == 0 {
        return 0;
    }
    // round(won / played * 100) with .5 rounding up
    ((won as u64 * 200 + played as u64) / (played as u64 * 2)) as u32
}
