use crate::Score;
use std::time::Duration;

/// Process-wide limits and timeouts.
///
/// Read once at game creation and scheduler startup; live reload is an
/// external collaborator's job, not ours.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound on a game's configured hand size.
    pub max_hand_size: usize,
    /// Upper bound on a game's configured player cap.
    pub max_players: usize,
    /// Upper bound on a game's configured score limit.
    pub max_score_limit: Score,
    /// Upper bound on a game's configured round limit.
    pub max_round_limit: u32,
    /// No heartbeat for this long marks a player disconnected.
    pub liveness_timeout: Duration,
    /// A game untouched for this long is torn down.
    pub idle_timeout: Duration,
    /// Announce this instance to an external server registry at startup.
    pub discovery_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_hand_size: 20,
            max_players: crate::MAX_PLAYERS,
            max_score_limit: crate::MAX_SCORE_LIMIT,
            max_round_limit: crate::MAX_ROUND_LIMIT,
            liveness_timeout: crate::LIVENESS_TIMEOUT,
            idle_timeout: crate::IDLE_GAME_TIMEOUT,
            discovery_enabled: false,
        }
    }
}

impl Config {
    /// Defaults overridden by `CZAR_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(n) = var("CZAR_MAX_HAND_SIZE") {
            config.max_hand_size = n;
        }
        if let Some(n) = var("CZAR_MAX_PLAYERS") {
            config.max_players = n;
        }
        if let Some(n) = var("CZAR_MAX_SCORE_LIMIT") {
            config.max_score_limit = n;
        }
        if let Some(n) = var("CZAR_MAX_ROUND_LIMIT") {
            config.max_round_limit = n;
        }
        if let Some(secs) = var("CZAR_LIVENESS_TIMEOUT_SECS") {
            config.liveness_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = var("CZAR_IDLE_TIMEOUT_SECS") {
            config.idle_timeout = Duration::from_secs(secs);
        }
        if let Ok(flag) = std::env::var("CZAR_DISCOVERY_ENABLED") {
            config.discovery_enabled = flag == "true" || flag == "1";
        }
        config
    }
}

fn var<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert!(config.max_hand_size >= crate::HAND_SIZE);
        assert!(config.max_players >= crate::MIN_PLAYERS);
        assert!(!config.discovery_enabled);
    }
}
