use super::*;
use crate::GameError;
use crate::ID;
use crate::Unique;

/// White cards currently held by one player, in deal order.
/// Never grows past the game's configured hand size.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<WhiteCard>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.cards.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
    pub fn cards(&self) -> &[WhiteCard] {
        &self.cards
    }
    pub fn push(&mut self, card: WhiteCard) {
        self.cards.push(card);
    }
    /// Removes the named cards for a submission. Rejects the whole request
    /// if any id is missing or repeated, leaving the hand untouched.
    pub fn take(&mut self, ids: &[ID<WhiteCard>]) -> Result<Vec<WhiteCard>, GameError> {
        let mut picked = Vec::with_capacity(ids.len());
        for id in ids {
            match self
                .cards
                .iter()
                .position(|c| c.id() == *id)
                .filter(|i| !picked.contains(i))
            {
                Some(i) => picked.push(i),
                None => {
                    return Err(GameError::IllegalState(format!("card {} not in hand", id)));
                }
            }
        }
        let mut taken: Vec<Option<WhiteCard>> = ids.iter().map(|_| None).collect();
        let mut order = picked.into_iter().enumerate().collect::<Vec<_>>();
        order.sort_unstable_by(|a, b| b.1.cmp(&a.1));
        for (slot, index) in order {
            taken[slot] = Some(self.cards.remove(index));
        }
        Ok(taken.into_iter().flatten().collect())
    }
    /// Empties the hand back toward a discard pile.
    pub fn surrender(&mut self) -> Vec<WhiteCard> {
        std::mem::take(&mut self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn hand(n: usize) -> Hand {
        let mut hand = Hand::new();
        for i in 0..n {
            hand.push(WhiteCard::new(format!("card {}", i)));
        }
        hand
    }
    #[test]
    fn take_removes_named_cards_in_request_order() {
        let mut hand = hand(5);
        let want = vec![hand.cards()[3].id(), hand.cards()[1].id()];
        let taken = hand.take(&want).unwrap();
        assert_eq!(hand.len(), 3);
        assert_eq!(taken.iter().map(|c| c.id()).collect::<Vec<_>>(), want);
    }
    #[test]
    fn take_rejects_missing_card() {
        let mut hand = hand(2);
        let missing = WhiteCard::new("elsewhere").id();
        assert!(hand.take(&[missing]).is_err());
        assert_eq!(hand.len(), 2);
    }
    #[test]
    fn take_rejects_repeated_card() {
        let mut hand = hand(2);
        let id = hand.cards()[0].id();
        assert!(hand.take(&[id, id]).is_err());
        assert_eq!(hand.len(), 2);
    }
    #[test]
    fn surrender_empties_the_hand() {
        let mut hand = hand(4);
        assert_eq!(hand.surrender().len(), 4);
        assert!(hand.is_empty());
    }
}
