use super::*;
use crate::GameError;
use crate::ID;
use crate::Unique;
use crate::cards::Stock;
use crate::gameplay::Game;
use crate::gameplay::GameOptions;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

/// All live games, keyed by id.
///
/// The map lock is held only for insert/remove/lookup and is never nested
/// inside a game's own lock: lookup hands back an `Arc`, and the caller
/// locks the game afterwards. That ordering rules out deadlocks between
/// registry maintenance and in-game actions.
#[derive(Default)]
pub struct Registry {
    games: RwLock<HashMap<ID<Game>, Arc<Mutex<Game>>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }
    /// Builds a game from an already-validated option set and loaded card
    /// stock. Pool pre-validation happens inside [`Game::new`].
    pub async fn create(&self, options: GameOptions, stock: Stock) -> Result<ID<Game>, GameError> {
        let game = Game::new(options, stock)?;
        let id = game.id();
        self.games
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(game)));
        log::info!("[registry] created game {}", id);
        Ok(id)
    }
    pub async fn get(&self, id: ID<Game>) -> Result<Arc<Mutex<Game>>, GameError> {
        self.games
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(GameError::NotFound)
    }
    pub async fn remove(&self, id: ID<Game>) -> Result<(), GameError> {
        match self.games.write().await.remove(&id) {
            Some(_) => {
                log::info!("[registry] removed game {}", id);
                Ok(())
            }
            None => Err(GameError::NotFound),
        }
    }
    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }
    /// Snapshot of every live game, oldest first. The map lock is dropped
    /// before any game lock is touched.
    pub async fn games(&self) -> Vec<(ID<Game>, Arc<Mutex<Game>>)> {
        let mut games = self
            .games
            .read()
            .await
            .iter()
            .map(|(id, game)| (*id, game.clone()))
            .collect::<Vec<_>>();
        games.sort_by_key(|(id, _)| *id);
        games
    }
    /// The lobby view: summaries in creation order, filtered.
    pub async fn list(&self, filter: &ListFilter) -> Vec<GameSummary> {
        let mut summaries = Vec::new();
        for (_, game) in self.games().await {
            let summary = GameSummary::of(&*game.lock().await);
            if filter.admits(&summary) {
                summaries.push(summary);
            }
        }
        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::BlackCard;
    use crate::cards::WhiteCard;

    fn stock() -> Stock {
        Stock {
            black: vec![BlackCard::new("_?", 1)],
            white: (0..60).map(|i| WhiteCard::new(format!("w{}", i))).collect(),
        }
    }
    fn options(name: &str) -> GameOptions {
        GameOptions::named(name)
            .with_hand_size(5)
            .with_players(3, 4)
            .with_card_sets(vec![ID::default()])
    }

    #[tokio::test]
    async fn create_get_remove() {
        let registry = Registry::new();
        let id = registry.create(options("one"), stock()).await.unwrap();
        assert!(registry.get(id).await.is_ok());
        registry.remove(id).await.unwrap();
        assert_eq!(registry.get(id).await.unwrap_err(), GameError::NotFound);
        assert_eq!(registry.remove(id).await.unwrap_err(), GameError::NotFound);
    }
    #[tokio::test]
    async fn create_rejects_thin_pool() {
        let registry = Registry::new();
        let thin = Stock {
            black: vec![],
            white: vec![],
        };
        assert_eq!(
            registry.create(options("thin"), thin).await.unwrap_err(),
            GameError::PoolExhausted
        );
        assert_eq!(registry.len().await, 0);
    }
    #[tokio::test]
    async fn list_is_creation_ordered() {
        let registry = Registry::new();
        for name in ["first", "second", "third"] {
            registry.create(options(name), stock()).await.unwrap();
        }
        let names = registry
            .list(&ListFilter::default())
            .await
            .iter()
            .map(|s| s.name.clone())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["first", "second", "third"]);
    }
    #[tokio::test]
    async fn list_filters_full_games() {
        let registry = Registry::new();
        let id = registry.create(options("busy"), stock()).await.unwrap();
        let game = registry.get(id).await.unwrap();
        {
            let mut game = game.lock().await;
            for name in ["a", "b", "c", "d"] {
                game.join(name, None).unwrap();
            }
        }
        let filter = ListFilter {
            include_full: false,
            ..Default::default()
        };
        assert!(registry.list(&filter).await.is_empty());
        assert_eq!(registry.list(&ListFilter::default()).await.len(), 1);
    }
}
