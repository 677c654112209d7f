//! Engine error codes

/// Everything the engine can refuse to do.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// Caller supplied something unusable: an empty name, an unknown move,
    /// or a match configuration with a zero limit.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The match has ended and no longer accepts rounds.
    #[error("match has ended; reset to start a new one")]
    InactiveMatch,

    /// The player name cannot change once rounds have been played.
    #[error("player name cannot change while a match is in progress")]
    MatchInProgress,
}
