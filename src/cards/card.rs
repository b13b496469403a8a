use crate::ID;
use crate::Unique;
use serde::Deserialize;
use serde::Serialize;

/// Round prompt card with one or more blanks to fill.
/// Immutable once loaded into a running game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackCard {
    id: ID<BlackCard>,
    text: String,
    blanks: usize,
}

impl BlackCard {
    pub fn new(text: impl Into<String>, blanks: usize) -> Self {
        assert!(blanks >= 1, "a prompt needs at least one blank");
        Self {
            id: ID::default(),
            text: text.into(),
            blanks,
        }
    }
    pub fn text(&self) -> &str {
        &self.text
    }
    /// White cards a submitter must play against this prompt.
    pub fn blanks(&self) -> usize {
        self.blanks
    }
}

impl Unique for BlackCard {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl std::fmt::Display for BlackCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.blanks, self.text)
    }
}

/// A card players submit to fill a black card's blanks.
/// Identity is the id; text is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhiteCard {
    id: ID<WhiteCard>,
    text: String,
}

impl WhiteCard {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ID::default(),
            text: text.into(),
        }
    }
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Unique for WhiteCard {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl std::fmt::Display for WhiteCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn black_card_blanks() {
        let card = BlackCard::new("_ is the answer.", 1);
        assert_eq!(card.blanks(), 1);
    }
    #[test]
    #[should_panic]
    fn black_card_rejects_zero_blanks() {
        BlackCard::new("no blanks here", 0);
    }
    #[test]
    fn white_cards_are_distinct() {
        let a = WhiteCard::new("same text");
        let b = WhiteCard::new("same text");
        assert_ne!(a.id(), b.id());
    }
}
