use crate::ID;
use crate::Score;
use crate::gameplay::Game;
use crate::gameplay::GameEvent;
use crate::gameplay::Player;
use crate::registry::GameSummary;
use serde::Serialize;

/// Broadcast topic carrying one game's state-change notifications.
pub fn game_topic(id: ID<Game>) -> String {
    format!("game/{}", id)
}

/// Payloads pushed through the broadcast sink.
/// Delivery guarantees belong to the sink, not to us.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Periodic (and on-creation) lobby refresh.
    GameList { games: Vec<GameSummary> },
    PlayerJoined { game: ID<Game>, name: String },
    PlayerLeft { game: ID<Game>, name: String },
    RoundStart {
        game: ID<Game>,
        round: u32,
        judge: ID<Player>,
        prompt: String,
        blanks: usize,
    },
    /// Submission progress; submitter identity withheld.
    Submitted {
        game: ID<Game>,
        received: usize,
        expected: usize,
    },
    Judging {
        game: ID<Game>,
        round: u32,
        candidates: usize,
    },
    RoundComplete {
        game: ID<Game>,
        round: u32,
        winner: String,
        score: Score,
    },
    RoundAborted { game: ID<Game>, round: u32 },
    GameOver {
        game: ID<Game>,
        winner: String,
        score: Score,
    },
    ReturnedToLobby { game: ID<Game> },
}

impl ServerMessage {
    pub fn game_list(games: Vec<GameSummary>) -> Self {
        Self::GameList { games }
    }
    /// Converts an internal event to its wire form.
    pub fn encode(game: ID<Game>, event: &GameEvent) -> Self {
        match event {
            GameEvent::PlayerJoined { name, .. } => Self::PlayerJoined {
                game,
                name: name.clone(),
            },
            GameEvent::PlayerLeft { name, .. } => Self::PlayerLeft {
                game,
                name: name.clone(),
            },
            GameEvent::RoundStart { round, judge, black } => Self::RoundStart {
                game,
                round: *round,
                judge: *judge,
                prompt: black.text().to_string(),
                blanks: black.blanks(),
            },
            GameEvent::Submitted { received, expected } => Self::Submitted {
                game,
                received: *received,
                expected: *expected,
            },
            GameEvent::Judging { round, candidates } => Self::Judging {
                game,
                round: *round,
                candidates: *candidates,
            },
            GameEvent::RoundComplete { round, name, score, .. } => Self::RoundComplete {
                game,
                round: *round,
                winner: name.clone(),
                score: *score,
            },
            GameEvent::RoundAborted { round } => Self::RoundAborted {
                game,
                round: *round,
            },
            GameEvent::GameOver { name, score, .. } => Self::GameOver {
                game,
                winner: name.clone(),
                score: *score,
            },
            GameEvent::ReturnedToLobby => Self::ReturnedToLobby { game },
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn messages_tag_their_type() {
        let message = ServerMessage::game_list(Vec::new());
        let json = message.to_json();
        assert!(json.contains("\"type\":\"game_list\""));
    }
    #[test]
    fn events_encode_to_wire_form() {
        let game = ID::default();
        let event = GameEvent::Submitted {
            received: 1,
            expected: 3,
        };
        let json = ServerMessage::encode(game, &event).to_json();
        assert!(json.contains("\"type\":\"submitted\""));
        assert!(json.contains("\"expected\":3"));
    }
}
