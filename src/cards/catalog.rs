use super::*;
use crate::ID;
use crate::Unique;
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::HashSet;

/// Card contents for a chosen selection of sets: the union of all member
/// cards, deduplicated by id. This is the pool a game's decks are built from.
#[derive(Debug, Clone, Default)]
pub struct Stock {
    pub black: Vec<BlackCard>,
    pub white: Vec<WhiteCard>,
}

/// External read-only card store.
///
/// Two-phase by design: [`card_sets`](Catalog::card_sets) is a cheap metadata
/// fetch for lobby display, [`load`](Catalog::load) pulls card text on first
/// use at game creation. The core never writes through this seam.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Available card sets, ordered by (weight, name).
    async fn card_sets(&self, include_inactive: bool) -> anyhow::Result<Vec<CardSet>>;
    /// Card contents for the chosen sets. Errors on unknown set ids.
    async fn load(&self, sets: &[ID<CardSet>]) -> anyhow::Result<Stock>;
}

/// In-memory catalog for tests and single-process embedding.
pub struct StaticCatalog {
    sets: Vec<CardSet>,
    black: HashMap<ID<BlackCard>, BlackCard>,
    white: HashMap<ID<WhiteCard>, WhiteCard>,
}

impl StaticCatalog {
    pub fn new(sets: Vec<CardSet>, black: Vec<BlackCard>, white: Vec<WhiteCard>) -> Self {
        Self {
            sets,
            black: black.into_iter().map(|c| (c.id(), c)).collect(),
            white: white.into_iter().map(|c| (c.id(), c)).collect(),
        }
    }
    /// One active set holding all the given cards. Returns the catalog and
    /// the set id to pass into game options.
    pub fn single_set(
        name: &str,
        black: Vec<BlackCard>,
        white: Vec<WhiteCard>,
    ) -> (Self, ID<CardSet>) {
        let set = CardSet::new(name, "")
            .with_base_deck(true)
            .with_black(black.iter().map(|c| c.id()).collect())
            .with_white(white.iter().map(|c| c.id()).collect());
        let id = set.id();
        (Self::new(vec![set], black, white), id)
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn card_sets(&self, include_inactive: bool) -> anyhow::Result<Vec<CardSet>> {
        let mut sets = self
            .sets
            .iter()
            .filter(|s| include_inactive || s.active())
            .cloned()
            .collect::<Vec<_>>();
        sets.sort_by_key(|s| s.sort_key());
        Ok(sets)
    }
    async fn load(&self, sets: &[ID<CardSet>]) -> anyhow::Result<Stock> {
        let mut black = HashSet::new();
        let mut white = HashSet::new();
        for id in sets {
            let set = self
                .sets
                .iter()
                .find(|s| s.id() == *id)
                .ok_or_else(|| anyhow::anyhow!("unknown card set {}", id))?;
            black.extend(set.black().iter().copied());
            white.extend(set.white().iter().copied());
        }
        Ok(Stock {
            black: black
                .into_iter()
                .filter_map(|id| self.black.get(&id).cloned())
                .collect(),
            white: white
                .into_iter()
                .filter_map(|id| self.white.get(&id).cloned())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn fixture() -> (StaticCatalog, ID<CardSet>) {
        StaticCatalog::single_set(
            "base",
            vec![BlackCard::new("_?", 1)],
            vec![WhiteCard::new("a"), WhiteCard::new("b")],
        )
    }
    #[tokio::test]
    async fn listing_skips_inactive_sets() {
        let inactive = CardSet::new("hidden", "").with_active(false);
        let catalog = StaticCatalog::new(vec![inactive], vec![], vec![]);
        assert!(catalog.card_sets(false).await.unwrap().is_empty());
        assert_eq!(catalog.card_sets(true).await.unwrap().len(), 1);
    }
    #[tokio::test]
    async fn listing_orders_by_weight_then_name() {
        let a = CardSet::new("zed", "").with_weight(1);
        let b = CardSet::new("abc", "").with_weight(2);
        let c = CardSet::new("def", "").with_weight(2);
        let catalog = StaticCatalog::new(vec![c, b, a], vec![], vec![]);
        let names = catalog
            .card_sets(false)
            .await
            .unwrap()
            .iter()
            .map(|s| s.name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["zed", "abc", "def"]);
    }
    #[tokio::test]
    async fn load_returns_member_cards() {
        let (catalog, id) = fixture();
        let stock = catalog.load(&[id]).await.unwrap();
        assert_eq!(stock.black.len(), 1);
        assert_eq!(stock.white.len(), 2);
    }
    #[tokio::test]
    async fn load_rejects_unknown_set() {
        let (catalog, _) = fixture();
        assert!(catalog.load(&[ID::default()]).await.is_err());
    }
    #[tokio::test]
    async fn load_deduplicates_shared_cards() {
        let black = vec![BlackCard::new("_!", 1)];
        let white = vec![WhiteCard::new("shared")];
        let a = CardSet::new("a", "")
            .with_black(black.iter().map(|c| c.id()).collect())
            .with_white(white.iter().map(|c| c.id()).collect());
        let b = CardSet::new("b", "")
            .with_black(black.iter().map(|c| c.id()).collect())
            .with_white(white.iter().map(|c| c.id()).collect());
        let ids = vec![a.id(), b.id()];
        let catalog = StaticCatalog::new(vec![a, b], black, white);
        let stock = catalog.load(&ids).await.unwrap();
        assert_eq!(stock.black.len(), 1);
        assert_eq!(stock.white.len(), 1);
    }
}
