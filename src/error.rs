/// Typed failures surfaced by game actions.
///
/// Every client-driven operation validates its preconditions up front and
/// fails fast with one of these; nothing blocks or retries. Scheduler task
/// failures are logged and never surface here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Game creation parameters out of allowed ranges. Nothing was created.
    InvalidOptions(String),
    /// Unknown game or player id.
    NotFound,
    /// Action attempted in the wrong game or round state.
    IllegalState(String),
    /// Action by a player without the right to take it.
    Forbidden(String),
    /// The configured card sets hold too few cards for the roster and hand
    /// size. Surfaced at creation time, never mid-round.
    PoolExhausted,
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOptions(s) => write!(f, "invalid options: {}", s),
            Self::NotFound => write!(f, "not found"),
            Self::IllegalState(s) => write!(f, "illegal state: {}", s),
            Self::Forbidden(s) => write!(f, "forbidden: {}", s),
            Self::PoolExhausted => write!(f, "card pool exhausted"),
        }
    }
}

impl std::error::Error for GameError {}
