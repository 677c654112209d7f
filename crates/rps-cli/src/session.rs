//! Interactive terminal session: name prompt, rounds, and the play-again loop

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use rps_engine::{
    describe_match, describe_round, describe_stats, final_score_line, match_title, EngineError,
    MatchEngine, MatchResult, Move, RoundResult, SessionStats,
};

/// One line of player input during a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Play(Move),
    Stats,
    Reset,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, EngineError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "stats" => Ok(Command::Stats),
        "reset" => Ok(Command::Reset),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => other.parse().map(Command::Play),
    }
}

/// How a match loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MatchFlow {
    Finished,
    Quit,
}

pub struct Session<R, W> {
    engine: MatchEngine,
    input: R,
    output: W,
    reveal_delay: Duration,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(engine: MatchEngine, input: R, output: W, reveal_delay: Duration) -> Self {
        Self {
            engine,
            input,
            output,
            reveal_delay,
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (MatchEngine, W) {
        (self.engine, self.output)
    }

    /// Play matches until the player quits, declines a rematch, or input runs out.
    pub fn run(&mut self, preset_name: Option<&str>) -> Result<SessionStats> {
        writeln!(
            self.output,
            "Rock Paper Scissors - first to {} wins, at most {} rounds (seed {})",
            self.engine.config().winning_score,
            self.engine.config().max_rounds,
            self.engine.seed()
        )?;

        if self.prompt_name(preset_name)? {
            loop {
                if self.play_match()? == MatchFlow::Quit || !self.ask_play_again()? {
                    break;
                }
                self.engine.reset();
            }

            writeln!(self.output, "Thanks for playing, {}!", self.engine.state().player_name)?;
            writeln!(self.output, "{}", describe_stats(self.engine.stats()))?;
        }

        Ok(self.engine.stats().clone())
    }

    /// `None` on end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read player input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Returns false when input ended before a usable name arrived.
    fn prompt_name(&mut self, preset_name: Option<&str>) -> Result<bool> {
        if let Some(name) = preset_name {
            match self.engine.set_player_name(name) {
                Ok(()) => return Ok(true),
                Err(e) => log::warn!("ignoring --name: {}", e),
            }
        }

        loop {
            write!(self.output, "Enter your name: ")?;
            let Some(line) = self.read_line()? else {
                return Ok(false);
            };

            match self.engine.set_player_name(&line) {
                Ok(()) => return Ok(true),
                Err(EngineError::InvalidInput(_)) => {
                    writeln!(self.output, "Please enter your name to continue.")?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn play_match(&mut self) -> Result<MatchFlow> {
        let mut announced = 0;

        loop {
            let round = self.engine.state().round;
            if announced != round {
                writeln!(self.output, "\nRound {}", round)?;
                announced = round;
            }

            write!(self.output, "Your move (rock/paper/scissors, stats, reset, quit): ")?;
            let Some(line) = self.read_line()? else {
                return Ok(MatchFlow::Quit);
            };

            match parse_command(&line) {
                Ok(Command::Play(player_move)) => {
                    let result = self
                        .engine
                        .resolve_round(player_move)
                        .context("engine rejected a round in an active match")?;
                    self.reveal(&result)?;

                    if let Some(match_result) = &result.match_result {
                        self.show_match_result(match_result)?;
                        return Ok(MatchFlow::Finished);
                    }
                }
                Ok(Command::Stats) => {
                    writeln!(self.output, "{}", describe_stats(self.engine.stats()))?;
                }
                Ok(Command::Reset) => {
                    self.engine.reset();
                    writeln!(self.output, "Match reset.")?;
                    announced = 0;
                }
                Ok(Command::Quit) => return Ok(MatchFlow::Quit),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    /// Player's move, then the bot's, then the verdict.
    fn reveal(&mut self, result: &RoundResult) -> Result<()> {
        let name = &result.state.player_name;

        writeln!(
            self.output,
            "{} chose {} {}",
            name,
            result.player_move.symbol(),
            result.player_move
        )?;
        self.pause()?;
        writeln!(self.output, "Bot chose {} {}", result.bot_move.symbol(), result.bot_move)?;
        self.pause()?;
        writeln!(
            self.output,
            "{}",
            describe_round(name, result.player_move, result.bot_move)
        )?;
        writeln!(
            self.output,
            "Score: {} {} - {} Bot",
            name, result.state.player_score, result.state.bot_score
        )?;
        Ok(())
    }

    fn show_match_result(&mut self, result: &MatchResult) -> Result<()> {
        writeln!(self.output, "\n{}", match_title(result.winner))?;
        writeln!(self.output, "{}", describe_match(result))?;
        writeln!(self.output, "{}", final_score_line(result))?;
        writeln!(self.output, "{}", describe_stats(&result.stats))?;
        Ok(())
    }

    fn ask_play_again(&mut self) -> Result<bool> {
        write!(self.output, "Play again? [y/N] ")?;
        let answer = self.read_line()?.unwrap_or_default();
        let answer = answer.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    fn pause(&mut self) -> Result<()> {
        if !self.reveal_delay.is_zero() {
            self.output.flush()?;
            thread::sleep(self.reveal_delay);
        }
        Ok(())
    }
}
