// Terminal front end for the Rock Paper Scissors match engine

mod session;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rps_engine::{MatchConfig, MatchEngine, SeededRng};
use session::Session;

#[derive(Parser, Debug)]
#[command(author, version, about = "Best-of-five Rock Paper Scissors against a random bot", long_about = None)]
struct Args {
    /// Player name (prompted for when missing or blank)
    #[arg(short, long)]
    name: Option<String>,

    /// Seed for the bot's moves; drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Rounds after which a match ends regardless of score
    #[arg(long, default_value_t = 5)]
    max_rounds: u8,

    /// Score that ends a match immediately
    #[arg(long, default_value_t = 3)]
    winning_score: u8,

    /// Pause between revealing the player's move, the bot's move and the result
    #[arg(long, default_value_t = 0)]
    reveal_delay_ms: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    use std::io::Write;
    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .init();

    let config = MatchConfig::new(args.max_rounds, args.winning_score)
        .context("invalid match configuration")?;
    let rng = match args.seed {
        Some(seed) => SeededRng::new(seed),
        None => SeededRng::from_entropy(),
    };
    log::debug!("session seed {}, config {:?}", rng.seed(), config);

    let engine = MatchEngine::with_config(config, rng);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        engine,
        stdin.lock(),
        stdout.lock(),
        Duration::from_millis(args.reveal_delay_ms),
    );

    let stats = session.run(args.name.as_deref())?;
    log::info!(
        "session over: played={} won={} best_streak={}",
        stats.games_played,
        stats.games_won,
        stats.best_streak
    );

    Ok(())
}
