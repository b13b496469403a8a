use crate::ID;
use crate::Score;
use crate::Unique;
use crate::cards::Hand;
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// What a roster member is doing this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Watching only: never dealt cards, never judges, never counted
    /// toward minimum-player checks.
    Spectator,
    /// Dealt a hand and expected to submit each round.
    Playing,
    /// Selecting this round's winner instead of submitting.
    Judge,
}

/// One roster entry. Created on join, removed on leave or liveness timeout.
#[derive(Debug, Clone)]
pub struct Player {
    id: ID<Player>,
    name: String,
    role: Role,
    score: Score,
    hand: Hand,
    last_seen: Instant,
}

impl Player {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            id: ID::default(),
            name: name.into(),
            role,
            score: 0,
            hand: Hand::new(),
            last_seen: Instant::now(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }
    pub fn score(&self) -> Score {
        self.score
    }
    pub fn award_point(&mut self) -> Score {
        self.score += 1;
        self.score
    }
    pub fn reset_score(&mut self) {
        self.score = 0;
    }
    pub fn hand(&self) -> &Hand {
        &self.hand
    }
    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
    /// Any observed activity counts as a heartbeat.
    pub fn heartbeat(&mut self) {
        self.last_seen = Instant::now();
    }
    pub fn idle_for(&self) -> Duration {
        self.last_seen.elapsed()
    }
}

impl Unique for Player {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} pts)", self.name, self.score)
    }
}
