use super::*;
use crate::ID;
use crate::Score;
use crate::cards::BlackCard;

/// State-change notifications emitted by [`Game`] mutations.
/// The action layer converts these to wire messages; the game itself
/// never touches the transport.
#[derive(Debug, Clone)]
pub enum GameEvent {
    PlayerJoined {
        player: ID<Player>,
        name: String,
    },
    PlayerLeft {
        player: ID<Player>,
        name: String,
    },
    /// New round underway: judge chosen, hands replenished, prompt dealt.
    RoundStart {
        round: u32,
        judge: ID<Player>,
        black: BlackCard,
    },
    /// A submission arrived (identity withheld from the payload).
    Submitted {
        received: usize,
        expected: usize,
    },
    /// All submissions in; candidates shuffled and judging open.
    Judging {
        round: u32,
        candidates: usize,
    },
    /// Judge picked a winner and the score was recorded.
    RoundComplete {
        round: u32,
        winner: ID<Player>,
        name: String,
        score: Score,
    },
    /// The judge left mid-round; prompt and submissions discarded.
    RoundAborted {
        round: u32,
    },
    /// A score or round limit was reached.
    GameOver {
        winner: ID<Player>,
        name: String,
        score: Score,
    },
    /// Roster fell below the minimum; back to gathering players.
    ReturnedToLobby,
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlayerJoined { name, .. } => write!(f, "{} joined", name),
            Self::PlayerLeft { name, .. } => write!(f, "{} left", name),
            Self::RoundStart { round, black, .. } => {
                write!(f, "round {} started: {}", round, black)
            }
            Self::Submitted { received, expected } => {
                write!(f, "submissions {}/{}", received, expected)
            }
            Self::Judging { round, candidates } => {
                write!(f, "round {} judging {} candidates", round, candidates)
            }
            Self::RoundComplete { name, score, .. } => {
                write!(f, "{} wins the round ({} pts)", name, score)
            }
            Self::RoundAborted { round } => write!(f, "round {} aborted", round),
            Self::GameOver { name, score, .. } => {
                write!(f, "game over: {} wins with {} pts", name, score)
            }
            Self::ReturnedToLobby => write!(f, "returned to lobby"),
        }
    }
}
