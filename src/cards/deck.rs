use crate::GameError;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

/// Shuffled draw/discard pile pair for one card color, scoped to one game.
///
/// Cards only ever leave into hands or round submissions and always come
/// back through [`discard`](Deck::discard), so draw ∪ discard ∪ outstanding
/// is the full pool with no duplicates and no losses. Reshuffling on
/// exhaustion touches only the discard pile, which by construction cannot
/// hold a card still outstanding.
#[derive(Debug, Clone)]
pub struct Deck<C> {
    draw: VecDeque<C>,
    discard: Vec<C>,
}

impl<C> Deck<C> {
    pub fn new(mut cards: Vec<C>) -> Self {
        cards.shuffle(&mut rand::rng());
        Self {
            draw: cards.into(),
            discard: Vec::new(),
        }
    }
    /// Removes and returns the top card, turning the discard pile into a
    /// fresh draw pile first if the draw pile ran dry. Fails only when the
    /// pool itself is empty, which is a configuration error caught at game
    /// creation, not a runtime retry case.
    pub fn deal(&mut self) -> Result<C, GameError> {
        if self.draw.is_empty() {
            self.replenish();
        }
        self.draw.pop_front().ok_or(GameError::PoolExhausted)
    }
    /// Returns a card leaving a hand or a finished round.
    pub fn discard(&mut self, card: C) {
        self.discard.push(card);
    }
    pub fn discard_all(&mut self, cards: impl IntoIterator<Item = C>) {
        self.discard.extend(cards);
    }
    /// Cards currently inside the pile pair (excludes outstanding cards).
    pub fn remaining(&self) -> usize {
        self.draw.len() + self.discard.len()
    }
    pub fn drawable(&self) -> usize {
        self.draw.len()
    }
    pub fn discarded(&self) -> usize {
        self.discard.len()
    }
    fn replenish(&mut self) {
        self.discard.shuffle(&mut rand::rng());
        self.draw.extend(self.discard.drain(..));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn deck(n: usize) -> Deck<usize> {
        Deck::new((0..n).collect())
    }
    #[test]
    fn deals_every_card_once() {
        let mut deck = deck(10);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..10 {
            assert!(seen.insert(deck.deal().unwrap()));
        }
        assert_eq!(deck.remaining(), 0);
    }
    #[test]
    fn empty_pool_is_exhausted() {
        let mut deck = deck(0);
        assert_eq!(deck.deal(), Err(GameError::PoolExhausted));
    }
    #[test]
    fn discard_becomes_draw_on_exhaustion() {
        let mut deck = deck(3);
        for _ in 0..3 {
            let card = deck.deal().unwrap();
            deck.discard(card);
        }
        assert_eq!(deck.drawable(), 0);
        assert_eq!(deck.discarded(), 3);
        assert!(deck.deal().is_ok());
        assert_eq!(deck.discarded(), 0);
        assert_eq!(deck.drawable(), 2);
    }
    #[test]
    fn reshuffle_never_resurrects_outstanding_cards() {
        let mut deck = deck(5);
        let held = deck.deal().unwrap();
        for _ in 0..4 {
            let card = deck.deal().unwrap();
            deck.discard(card);
        }
        for _ in 0..4 {
            assert_ne!(deck.deal().unwrap(), held);
        }
        assert_eq!(deck.deal(), Err(GameError::PoolExhausted));
    }
}
