use super::*;
use crate::GameError;
use crate::ID;
use crate::cards::BlackCard;
use crate::cards::WhiteCard;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// One player's answer to the round prompt.
#[derive(Debug, Clone)]
pub struct Submission {
    pub player: ID<Player>,
    pub cards: Vec<WhiteCard>,
}

/// One judge/prompt/submission/reveal cycle.
///
/// A game holds at most one of these at a time and replaces it, never
/// reuses it, across rounds. Eligibility is fixed at round start: players
/// joining mid-round wait for the next one.
#[derive(Debug)]
pub struct Round {
    number: u32,
    black: BlackCard,
    judge: ID<Player>,
    expected: HashSet<ID<Player>>,
    submissions: Vec<Submission>,
    revealed: bool,
}

impl Round {
    pub fn new(
        number: u32,
        black: BlackCard,
        judge: ID<Player>,
        expected: HashSet<ID<Player>>,
    ) -> Self {
        debug_assert!(!expected.contains(&judge));
        Self {
            number,
            black,
            judge,
            expected,
            submissions: Vec::new(),
            revealed: false,
        }
    }
    pub fn number(&self) -> u32 {
        self.number
    }
    pub fn black(&self) -> &BlackCard {
        &self.black
    }
    pub fn judge(&self) -> ID<Player> {
        self.judge
    }
    pub fn has_submitted(&self, player: ID<Player>) -> bool {
        self.submissions.iter().any(|s| s.player == player)
    }
    pub fn received(&self) -> usize {
        self.submissions.len()
    }
    pub fn expected(&self) -> usize {
        self.expected.len()
    }
    /// Precondition check, separated from [`submit`](Round::submit) so the
    /// caller can validate before pulling cards out of a hand.
    pub fn accepts(&self, player: ID<Player>, cards: usize) -> Result<(), GameError> {
        if player == self.judge {
            return Err(GameError::Forbidden("the judge does not submit".into()));
        }
        if !self.expected.contains(&player) {
            return Err(GameError::Forbidden("not playing in this round".into()));
        }
        if self.revealed {
            return Err(GameError::IllegalState("judging already underway".into()));
        }
        if self.has_submitted(player) {
            return Err(GameError::IllegalState("already submitted".into()));
        }
        if cards != self.black.blanks() {
            return Err(GameError::IllegalState(format!(
                "prompt takes {} cards, got {}",
                self.black.blanks(),
                cards
            )));
        }
        Ok(())
    }
    /// Records a submission. One atomic operation per player per round;
    /// call [`accepts`](Round::accepts) first.
    pub fn submit(&mut self, player: ID<Player>, cards: Vec<WhiteCard>) -> Result<(), GameError> {
        self.accepts(player, cards.len())?;
        self.submissions.push(Submission { player, cards });
        Ok(())
    }
    pub fn complete(&self) -> bool {
        self.submissions.len() == self.expected.len()
    }
    /// Locks in a random presentation order so position reveals no identity.
    pub fn reveal(&mut self) {
        self.submissions.shuffle(&mut rand::rng());
        self.revealed = true;
    }
    /// Anonymized candidate sets in reveal order. Empty until revealed.
    pub fn candidates(&self) -> Vec<&[WhiteCard]> {
        match self.revealed {
            true => self.submissions.iter().map(|s| s.cards.as_slice()).collect(),
            false => Vec::new(),
        }
    }
    /// Resolves the judge's pick by reveal-order index.
    pub fn winner(&self, index: usize) -> Result<&Submission, GameError> {
        if !self.revealed {
            return Err(GameError::IllegalState("submissions still coming in".into()));
        }
        self.submissions
            .get(index)
            .ok_or_else(|| GameError::IllegalState(format!("no submission {}", index)))
    }
    /// Drops a departing player from the round, returning their played
    /// cards (if any) for the discard pile.
    pub fn forfeit(&mut self, player: ID<Player>) -> Vec<WhiteCard> {
        self.expected.remove(&player);
        match self.submissions.iter().position(|s| s.player == player) {
            Some(i) => self.submissions.remove(i).cards,
            None => Vec::new(),
        }
    }
    /// Tears the round down, yielding every card it still holds.
    pub fn into_cards(self) -> (BlackCard, Vec<WhiteCard>) {
        (
            self.black,
            self.submissions.into_iter().flat_map(|s| s.cards).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn round(blanks: usize, submitters: usize) -> (Round, Vec<ID<Player>>) {
        let judge = ID::default();
        let players = (0..submitters).map(|_| ID::default()).collect::<Vec<_>>();
        let round = Round::new(
            1,
            BlackCard::new("_", blanks),
            judge,
            players.iter().copied().collect(),
        );
        (round, players)
    }
    fn whites(n: usize) -> Vec<WhiteCard> {
        (0..n).map(|i| WhiteCard::new(format!("w{}", i))).collect()
    }
    #[test]
    fn judge_cannot_submit() {
        let (round, _) = round(1, 2);
        let judge = round.judge();
        assert!(matches!(
            round.accepts(judge, 1),
            Err(GameError::Forbidden(_))
        ));
    }
    #[test]
    fn outsider_cannot_submit() {
        let (round, _) = round(1, 2);
        assert!(matches!(
            round.accepts(ID::default(), 1),
            Err(GameError::Forbidden(_))
        ));
    }
    #[test]
    fn wrong_cardinality_rejected() {
        let (round, players) = round(2, 2);
        assert!(matches!(
            round.accepts(players[0], 1),
            Err(GameError::IllegalState(_))
        ));
        assert!(matches!(
            round.accepts(players[0], 3),
            Err(GameError::IllegalState(_))
        ));
        assert!(round.accepts(players[0], 2).is_ok());
    }
    #[test]
    fn double_submission_rejected() {
        let (mut round, players) = round(1, 2);
        round.submit(players[0], whites(1)).unwrap();
        assert!(matches!(
            round.submit(players[0], whites(1)),
            Err(GameError::IllegalState(_))
        ));
        assert_eq!(round.received(), 1);
    }
    #[test]
    fn completes_when_all_expected_submit() {
        let (mut round, players) = round(1, 2);
        round.submit(players[0], whites(1)).unwrap();
        assert!(!round.complete());
        round.submit(players[1], whites(1)).unwrap();
        assert!(round.complete());
    }
    #[test]
    fn no_candidates_before_reveal() {
        let (mut round, players) = round(1, 2);
        round.submit(players[0], whites(1)).unwrap();
        assert!(round.candidates().is_empty());
        assert!(round.winner(0).is_err());
    }
    #[test]
    fn winner_by_reveal_index() {
        let (mut round, players) = round(1, 3);
        for p in &players {
            round.submit(*p, whites(1)).unwrap();
        }
        round.reveal();
        assert_eq!(round.candidates().len(), 3);
        let winner = round.winner(2).unwrap().player;
        assert!(players.contains(&winner));
        assert!(round.winner(3).is_err());
    }
    #[test]
    fn forfeit_returns_played_cards_and_shrinks_expectation() {
        let (mut round, players) = round(1, 3);
        round.submit(players[0], whites(1)).unwrap();
        assert_eq!(round.forfeit(players[0]).len(), 1);
        assert!(round.forfeit(players[1]).is_empty());
        assert_eq!(round.expected(), 1);
        round.submit(players[2], whites(1)).unwrap();
        assert!(round.complete());
    }
    #[test]
    fn into_cards_yields_prompt_and_submissions() {
        let (mut round, players) = round(2, 2);
        round.submit(players[0], whites(2)).unwrap();
        round.submit(players[1], whites(2)).unwrap();
        let (black, white) = round.into_cards();
        assert_eq!(black.blanks(), 2);
        assert_eq!(white.len(), 4);
    }
}
