use crate::ID;
use crate::Unique;
use crate::gameplay::Game;
use crate::gameplay::GamePhase;
use serde::Serialize;

/// Lightweight game-list entry pushed to lobby clients.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub id: ID<Game>,
    pub name: String,
    pub players: usize,
    pub max_players: usize,
    pub phase: GamePhase,
    pub passworded: bool,
}

impl GameSummary {
    pub fn of(game: &Game) -> Self {
        Self {
            id: game.id(),
            name: game.name().to_string(),
            players: game.player_count(),
            max_players: game.options().max_players,
            phase: game.phase(),
            passworded: game.options().passworded(),
        }
    }
}

/// Which games the lobby view includes. Defaults show everything.
#[derive(Debug, Clone, Copy)]
pub struct ListFilter {
    pub include_full: bool,
    pub include_started: bool,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            include_full: true,
            include_started: true,
        }
    }
}

impl ListFilter {
    pub fn admits(&self, summary: &GameSummary) -> bool {
        if !self.include_full && summary.players >= summary.max_players {
            return false;
        }
        if !self.include_started && summary.phase != GamePhase::Lobby {
            return false;
        }
        true
    }
}
