use super::*;
use crate::GameError;
use crate::ID;
use crate::Unique;
use crate::cards::BlackCard;
use crate::cards::Deck;
use crate::cards::Stock;
use crate::cards::WhiteCard;
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;

/// Overall session state.
///
/// `RoundComplete` is only ever observed between a judge pick and the
/// automatic follow-up transition, both of which happen under the game's
/// lock; concurrent readers see `Playing` or `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Lobby,
    Playing,
    Judging,
    RoundComplete,
    GameOver,
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lobby => write!(f, "lobby"),
            Self::Playing => write!(f, "playing"),
            Self::Judging => write!(f, "judging"),
            Self::RoundComplete => write!(f, "round_complete"),
            Self::GameOver => write!(f, "game_over"),
        }
    }
}

/// What one player may see of a game: their hand, the prompt, and the
/// revealed (anonymized) submissions once judging is open.
#[derive(Debug, Clone, Serialize)]
pub struct CardsView {
    pub hand: Vec<WhiteCard>,
    pub black: Option<BlackCard>,
    pub played: Vec<Vec<WhiteCard>>,
    pub received: usize,
    pub expected: usize,
}

/// One independent play session: roster, decks, and round state.
///
/// Owned by the registry behind a per-game mutex; every method here runs
/// with that lock held, so transitions are never observed partially.
#[derive(Debug)]
pub struct Game {
    id: ID<Game>,
    options: GameOptions,
    roster: Vec<Player>,
    black: Deck<BlackCard>,
    white: Deck<WhiteCard>,
    round: Option<Round>,
    phase: GamePhase,
    cursor: usize,
    rounds_dealt: u32,
    rounds_played: u32,
    last_activity: Instant,
}

impl Game {
    /// Builds the decks and pre-validates the pool: at least one prompt,
    /// and enough white cards to keep every seat's hand full. Exhaustion
    /// is therefore impossible mid-round.
    pub fn new(options: GameOptions, stock: Stock) -> Result<Self, GameError> {
        if stock.black.is_empty() {
            return Err(GameError::PoolExhausted);
        }
        if stock.white.len() < options.max_players * options.hand_size {
            return Err(GameError::PoolExhausted);
        }
        Ok(Self {
            id: ID::default(),
            black: Deck::new(stock.black),
            white: Deck::new(stock.white),
            roster: Vec::new(),
            round: None,
            phase: GamePhase::Lobby,
            cursor: 0,
            rounds_dealt: 0,
            rounds_played: 0,
            last_activity: Instant::now(),
            options,
        })
    }
    pub fn name(&self) -> &str {
        &self.options.name
    }
    pub fn options(&self) -> &GameOptions {
        &self.options
    }
    pub fn phase(&self) -> GamePhase {
        self.phase
    }
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }
    pub fn roster(&self) -> &[Player] {
        &self.roster
    }
    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }
    /// Seated (non-spectator) roster members.
    pub fn player_count(&self) -> usize {
        self.players().count()
    }
    pub fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }
    fn players(&self) -> impl Iterator<Item = &Player> {
        self.roster.iter().filter(|p| p.role() != Role::Spectator)
    }
    fn member(&self, player: ID<Player>) -> Result<&Player, GameError> {
        self.roster
            .iter()
            .find(|p| p.id() == player)
            .ok_or(GameError::NotFound)
    }
    fn member_mut(&mut self, player: ID<Player>) -> Result<&mut Player, GameError> {
        self.roster
            .iter_mut()
            .find(|p| p.id() == player)
            .ok_or(GameError::NotFound)
    }
    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
    /// Records activity for a connected player.
    pub fn heartbeat(&mut self, player: ID<Player>) -> Result<(), GameError> {
        self.member_mut(player)?.heartbeat();
        self.touch();
        Ok(())
    }
}

/// Roster management.
impl Game {
    pub fn join(
        &mut self,
        name: &str,
        password: Option<&str>,
    ) -> Result<(ID<Player>, GameEvent), GameError> {
        self.admit(password)?;
        if self.player_count() >= self.options.max_players {
            return Err(GameError::IllegalState("game is full".into()));
        }
        self.seat(Player::new(name, Role::Playing))
    }
    /// Spectators watch only: no hand, no judging, no effect on the
    /// minimum-player rule.
    pub fn join_spectator(
        &mut self,
        name: &str,
        password: Option<&str>,
    ) -> Result<(ID<Player>, GameEvent), GameError> {
        self.admit(password)?;
        self.seat(Player::new(name, Role::Spectator))
    }
    fn admit(&self, password: Option<&str>) -> Result<(), GameError> {
        match (&self.options.password, password) {
            (None, _) => Ok(()),
            (Some(want), Some(got)) if want == got => Ok(()),
            _ => Err(GameError::Forbidden("wrong password".into())),
        }
    }
    fn seat(&mut self, player: Player) -> Result<(ID<Player>, GameEvent), GameError> {
        let id = player.id();
        let name = player.name().to_string();
        log::debug!("[game {}] {} joins", self.id, name);
        self.roster.push(player);
        self.touch();
        Ok((id, GameEvent::PlayerJoined { player: id, name }))
    }
    /// Removes a player and settles their cards back into the discard
    /// piles. May abort the round (departing judge, or a revealed
    /// submission departing mid-judging), finish it (last holdout
    /// departing), or fold the game back to the lobby (roster below
    /// minimum).
    pub fn leave(&mut self, player: ID<Player>) -> Result<Vec<GameEvent>, GameError> {
        let index = self
            .roster
            .iter()
            .position(|p| p.id() == player)
            .ok_or(GameError::NotFound)?;
        let was_judge = self.roster[index].role() == Role::Judge;
        let mut had_submission = false;
        if let Some(round) = self.round.as_mut() {
            let played = round.forfeit(player);
            had_submission = !played.is_empty();
            self.white.discard_all(played);
        }
        let mut departed = self.roster.remove(index);
        self.white.discard_all(departed.hand_mut().surrender());
        if index < self.cursor {
            self.cursor -= 1;
        }
        log::debug!("[game {}] {} leaves", self.id, departed.name());
        self.touch();
        let mut events = vec![GameEvent::PlayerLeft {
            player,
            name: departed.name().to_string(),
        }];
        if self.roster.is_empty() {
            self.teardown_round();
            return Ok(events);
        }
        match self.phase {
            GamePhase::Lobby | GamePhase::GameOver => {}
            _ if self.player_count() < self.options.min_players => {
                self.to_lobby();
                events.push(GameEvent::ReturnedToLobby);
            }
            _ if was_judge => {
                events.extend(self.abort_round()?);
            }
            // a submission leaving the revealed list would shift the
            // candidate indices under the judge mid-pick
            GamePhase::Judging if had_submission => {
                events.extend(self.abort_round()?);
            }
            GamePhase::Playing => {
                events.extend(self.settle_submissions()?);
            }
            _ => {}
        }
        Ok(events)
    }
}

/// Round lifecycle.
impl Game {
    /// Starts play from the lobby. Any seated player may start once the
    /// roster reaches the configured minimum. Scores reset here, not when
    /// the game folded back to the lobby.
    pub fn start(&mut self, player: ID<Player>) -> Result<Vec<GameEvent>, GameError> {
        if self.member(player)?.role() == Role::Spectator {
            return Err(GameError::Forbidden("spectators cannot start".into()));
        }
        if self.phase != GamePhase::Lobby {
            return Err(GameError::IllegalState("game already started".into()));
        }
        if self.player_count() < self.options.min_players {
            return Err(GameError::IllegalState(format!(
                "need at least {} players",
                self.options.min_players
            )));
        }
        for p in self.roster.iter_mut() {
            p.reset_score();
        }
        self.rounds_played = 0;
        self.heartbeat(player)?;
        log::info!("[game {}] started with {} players", self.id, self.player_count());
        self.next_round()
    }
    /// Plays `blanks` cards from the player's hand into the round, in one
    /// atomic operation. The last expected submission opens judging.
    pub fn submit(
        &mut self,
        player: ID<Player>,
        cards: &[ID<WhiteCard>],
    ) -> Result<Vec<GameEvent>, GameError> {
        self.member(player)?;
        if self.phase != GamePhase::Playing {
            return Err(GameError::IllegalState("not accepting submissions".into()));
        }
        let round = self
            .round
            .as_ref()
            .ok_or_else(|| GameError::IllegalState("no active round".into()))?;
        round.accepts(player, cards.len())?;
        let picked = self.member_mut(player)?.hand_mut().take(cards)?;
        let round = self
            .round
            .as_mut()
            .ok_or_else(|| GameError::IllegalState("no active round".into()))?;
        round.submit(player, picked)?;
        let received = round.received();
        let expected = round.expected();
        self.heartbeat(player)?;
        let mut events = vec![GameEvent::Submitted { received, expected }];
        events.extend(self.settle_submissions()?);
        Ok(events)
    }
    /// The judge picks a winning candidate by reveal-order index. Scores
    /// update, round cards go to discard, and the next round starts
    /// automatically unless a limit ended the game.
    pub fn judge_pick(
        &mut self,
        player: ID<Player>,
        index: usize,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.member(player)?;
        if self.phase != GamePhase::Judging {
            return Err(GameError::IllegalState("no judging underway".into()));
        }
        let round = self
            .round
            .as_ref()
            .ok_or_else(|| GameError::IllegalState("no active round".into()))?;
        if round.judge() != player {
            return Err(GameError::Forbidden("only the judge picks".into()));
        }
        let number = round.number();
        let winner = round.winner(index)?.player;
        let victor = self.member_mut(winner)?;
        let name = victor.name().to_string();
        let score = victor.award_point();
        self.rounds_played += 1;
        self.teardown_round();
        self.heartbeat(player)?;
        self.phase = GamePhase::RoundComplete;
        log::info!("[game {}] round {} won by {}", self.id, number, name);
        let mut events = vec![GameEvent::RoundComplete {
            round: number,
            winner,
            name,
            score,
        }];
        if score >= self.options.score_limit || self.rounds_played >= self.options.round_limit {
            events.push(self.finish());
        } else {
            events.extend(self.next_round()?);
        }
        Ok(events)
    }
    /// What the acting player may see right now.
    pub fn cards_for(&self, player: ID<Player>) -> Result<CardsView, GameError> {
        let member = self
            .roster
            .iter()
            .find(|p| p.id() == player)
            .ok_or_else(|| GameError::Forbidden("not in this game".into()))?;
        let round = self.round.as_ref();
        Ok(CardsView {
            hand: member.hand().cards().to_vec(),
            black: round.map(|r| r.black().clone()),
            played: round
                .map(|r| r.candidates().iter().map(|c| c.to_vec()).collect())
                .unwrap_or_default(),
            received: round.map(Round::received).unwrap_or(0),
            expected: round.map(Round::expected).unwrap_or(0),
        })
    }
    /// Removes every player whose last heartbeat exceeds the timeout.
    /// One bounded unit of work per sweep tick.
    pub fn sweep(&mut self, timeout: Duration) -> Result<Vec<GameEvent>, GameError> {
        let stale = self
            .roster
            .iter()
            .filter(|p| p.idle_for() > timeout)
            .map(|p| p.id())
            .collect::<Vec<_>>();
        let mut events = Vec::new();
        for player in stale {
            log::info!("[game {}] sweeping idle player {}", self.id, player);
            events.extend(self.leave(player)?);
        }
        Ok(events)
    }
}

/// Internal transitions. All callers hold the game lock.
impl Game {
    /// Advances the judge pointer in join order (wrapping, skipping
    /// spectators), tops every submitter's hand back up to target, then
    /// deals the prompt. Replenishment comes first so players always
    /// choose from a full hand.
    fn next_round(&mut self) -> Result<Vec<GameEvent>, GameError> {
        for p in self.roster.iter_mut() {
            if p.role() == Role::Judge {
                p.set_role(Role::Playing);
            }
        }
        let n = self.roster.len();
        let mut index = self.cursor % n;
        let mut laps = 0;
        while self.roster[index].role() == Role::Spectator {
            index = (index + 1) % n;
            laps += 1;
            if laps > n {
                return Err(GameError::IllegalState("no eligible judge".into()));
            }
        }
        let judge = self.roster[index].id();
        self.roster[index].set_role(Role::Judge);
        self.cursor = (index + 1) % n;
        for p in self.roster.iter_mut() {
            if p.role() != Role::Playing {
                continue;
            }
            while p.hand().len() < self.options.hand_size {
                p.hand_mut().push(self.white.deal()?);
            }
        }
        let black = self.black.deal()?;
        let expected: HashSet<ID<Player>> = self
            .roster
            .iter()
            .filter(|p| p.role() == Role::Playing)
            .map(|p| p.id())
            .collect();
        self.rounds_dealt += 1;
        let number = self.rounds_dealt;
        log::debug!("[game {}] round {} judge {}", self.id, number, judge);
        let event = GameEvent::RoundStart {
            round: number,
            judge,
            black: black.clone(),
        };
        self.round = Some(Round::new(number, black, judge, expected));
        self.phase = GamePhase::Playing;
        Ok(vec![event])
    }
    /// Opens judging once every expected submission is in. A round whose
    /// submitters all departed is aborted instead.
    fn settle_submissions(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if self.phase != GamePhase::Playing {
            return Ok(Vec::new());
        }
        let Some(round) = self.round.as_mut() else {
            return Ok(Vec::new());
        };
        if round.expected() == 0 {
            return self.abort_round();
        }
        if !round.complete() {
            return Ok(Vec::new());
        }
        round.reveal();
        self.phase = GamePhase::Judging;
        let number = round.number();
        let candidates = round.received();
        log::debug!("[game {}] round {} judging open", self.id, number);
        Ok(vec![GameEvent::Judging { round: number, candidates }])
    }
    /// Aborted prompt returns to discard; a fresh round draws a new one.
    fn abort_round(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let number = self.round.as_ref().map(Round::number).unwrap_or_default();
        self.teardown_round();
        log::debug!("[game {}] round {} aborted", self.id, number);
        let mut events = vec![GameEvent::RoundAborted { round: number }];
        events.extend(self.next_round()?);
        Ok(events)
    }
    fn teardown_round(&mut self) {
        if let Some(round) = self.round.take() {
            let (black, whites) = round.into_cards();
            self.black.discard(black);
            self.white.discard_all(whites);
        }
    }
    fn to_lobby(&mut self) {
        self.teardown_round();
        for i in 0..self.roster.len() {
            if self.roster[i].role() == Role::Judge {
                self.roster[i].set_role(Role::Playing);
            }
            let surrendered = self.roster[i].hand_mut().surrender();
            self.white.discard_all(surrendered);
        }
        self.phase = GamePhase::Lobby;
        log::info!("[game {}] back to lobby", self.id);
    }
    fn finish(&mut self) -> GameEvent {
        self.phase = GamePhase::GameOver;
        let (winner, name, score) = self
            .players()
            .max_by_key(|p| p.score())
            .map(|p| (p.id(), p.name().to_string(), p.score()))
            .unwrap_or((ID::default(), String::new(), 0));
        log::info!("[game {}] over, {} wins with {}", self.id, name, score);
        GameEvent::GameOver { winner, name, score }
    }
}

impl Unique for Game {
    fn id(&self) -> ID<Self> {
        self.id
    }
}
