use super::*;
use crate::ID;
use crate::Unique;
use serde::Deserialize;
use serde::Serialize;

/// Named grouping of cards offered at game creation.
///
/// Only metadata and member ids live here; card text is fetched separately
/// through [`Catalog::load`], so listing sets never pulls card contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSet {
    id: ID<CardSet>,
    name: String,
    description: String,
    active: bool,
    base_deck: bool,
    weight: i32,
    black: Vec<ID<BlackCard>>,
    white: Vec<ID<WhiteCard>>,
}

impl CardSet {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: ID::default(),
            name: name.into(),
            description: description.into(),
            active: true,
            base_deck: false,
            weight: 0,
            black: Vec::new(),
            white: Vec::new(),
        }
    }
    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }
    pub fn with_base_deck(mut self, base_deck: bool) -> Self {
        self.base_deck = base_deck;
        self
    }
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
    pub fn with_black(mut self, ids: Vec<ID<BlackCard>>) -> Self {
        self.black = ids;
        self
    }
    pub fn with_white(mut self, ids: Vec<ID<WhiteCard>>) -> Self {
        self.white = ids;
        self
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn active(&self) -> bool {
        self.active
    }
    pub fn base_deck(&self) -> bool {
        self.base_deck
    }
    pub fn weight(&self) -> i32 {
        self.weight
    }
    pub fn black(&self) -> &[ID<BlackCard>] {
        &self.black
    }
    pub fn white(&self) -> &[ID<WhiteCard>] {
        &self.white
    }
    /// Catalog listing order: weight first, name as tiebreak.
    pub fn sort_key(&self) -> (i32, String) {
        (self.weight, self.name.clone())
    }
}

impl Unique for CardSet {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl std::fmt::Display for CardSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} black, {} white)",
            self.name,
            self.black.len(),
            self.white.len()
        )
    }
}
