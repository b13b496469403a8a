use crate::Config;
use crate::GameError;
use crate::ID;
use crate::Score;
use crate::cards::CardSet;

/// Creation-time game configuration.
/// Read once when the game is created; never reloaded mid-game.
#[derive(Debug, Clone)]
pub struct GameOptions {
    pub name: String,
    pub hand_size: usize,
    pub min_players: usize,
    pub max_players: usize,
    pub score_limit: Score,
    pub round_limit: u32,
    pub card_sets: Vec<ID<CardSet>>,
    pub password: Option<String>,
}

impl GameOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand_size: crate::HAND_SIZE,
            min_players: crate::MIN_PLAYERS,
            max_players: crate::MAX_PLAYERS,
            score_limit: 8,
            round_limit: crate::MAX_ROUND_LIMIT,
            card_sets: Vec::new(),
            password: None,
        }
    }
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }
    pub fn with_players(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }
    pub fn with_score_limit(mut self, limit: Score) -> Self {
        self.score_limit = limit;
        self
    }
    pub fn with_round_limit(mut self, limit: u32) -> Self {
        self.round_limit = limit;
        self
    }
    pub fn with_card_sets(mut self, sets: Vec<ID<CardSet>>) -> Self {
        self.card_sets = sets;
        self
    }
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
    pub fn passworded(&self) -> bool {
        self.password.is_some()
    }
    /// Rejects out-of-range parameters before anything is created.
    pub fn validate(&self, config: &Config) -> Result<(), GameError> {
        let bad = |what: &str| Err(GameError::InvalidOptions(what.to_string()));
        if self.name.trim().is_empty() {
            return bad("game name is empty");
        }
        if !(2..=config.max_hand_size).contains(&self.hand_size) {
            return bad("hand size out of range");
        }
        if self.min_players < crate::MIN_PLAYERS {
            return bad("minimum players below floor");
        }
        if self.max_players < self.min_players || self.max_players > config.max_players {
            return bad("player limits out of range");
        }
        if !(1..=config.max_score_limit).contains(&self.score_limit) {
            return bad("score limit out of range");
        }
        if !(1..=config.max_round_limit).contains(&self.round_limit) {
            return bad("round limit out of range");
        }
        if self.card_sets.is_empty() {
            return bad("no card sets selected");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn options() -> GameOptions {
        GameOptions::named("table").with_card_sets(vec![ID::default()])
    }
    #[test]
    fn defaults_validate() {
        assert!(options().validate(&Config::default()).is_ok());
    }
    #[test]
    fn empty_name_rejected() {
        let opts = GameOptions::named("  ").with_card_sets(vec![ID::default()]);
        assert!(matches!(
            opts.validate(&Config::default()),
            Err(GameError::InvalidOptions(_))
        ));
    }
    #[test]
    fn hand_size_bounds() {
        assert!(options().with_hand_size(1).validate(&Config::default()).is_err());
        assert!(options().with_hand_size(99).validate(&Config::default()).is_err());
        assert!(options().with_hand_size(5).validate(&Config::default()).is_ok());
    }
    #[test]
    fn player_limit_bounds() {
        assert!(options().with_players(2, 5).validate(&Config::default()).is_err());
        assert!(options().with_players(4, 3).validate(&Config::default()).is_err());
        assert!(options().with_players(3, 99).validate(&Config::default()).is_err());
    }
    #[test]
    fn card_sets_required() {
        let opts = GameOptions::named("table");
        assert!(opts.validate(&Config::default()).is_err());
    }
    #[test]
    fn score_and_round_limits() {
        assert!(options().with_score_limit(0).validate(&Config::default()).is_err());
        assert!(options().with_round_limit(0).validate(&Config::default()).is_err());
        assert!(options().with_score_limit(999).validate(&Config::default()).is_err());
    }
}
