use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::action::{Action, PlayerId, Seat};
use crate::bot::Bot;
use crate::bots::HouseBot;
use crate::bots::registry::derive_seed;
use crate::card::{Card, CardId};
use crate::deck::{DeckExhausted, DrawReport, Piles, build_deck, shuffle, stacked_deck};
use crate::error::{GameError, InvalidAction};
use crate::frontend::{Frontend, HandCard, NullFrontend, TableView};
use crate::rules::{Active, Effect, Opening, Rules, Stuck};
use crate::schedule::{Deferred, Scheduler};
use crate::score::{Standings, hand_penalty};
use crate::state::{GameStateView, PlayerPublicState, RoundStatus, TurnPhase, ViewOf};
use crate::turn::TurnState;

const DEFAULT_SEED: u64 = 0x5EED_5EED_5EED_5EED;
pub const DEFAULT_BOT_DELAY: Duration = Duration::from_millis(1500);
pub const MAX_PLAYERS: usize = 6;

/// Configuration required to bootstrap a session.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    pub seats: Vec<Seat>,
    pub seed: u64,
    /// Pause before a bot acts. Zero makes bots act synchronously.
    pub bot_delay: Duration,
    /// Overrides the game's choice of starting player.
    pub first_player: Option<PlayerId>,
}

impl SessionConfig {
    pub fn new(seats: Vec<Seat>, seed: u64) -> Result<Self, GameError> {
        let config = Self {
            seats,
            seed,
            bot_delay: DEFAULT_BOT_DELAY,
            first_player: None,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), GameError> {
        if !(2..=MAX_PLAYERS).contains(&self.seats.len()) {
            return Err(GameError::InvalidConfiguration(
                "players must be between 2 and 6",
            ));
        }
        if self
            .first_player
            .is_some_and(|first| first >= self.seats.len())
        {
            return Err(GameError::InvalidConfiguration(
                "first player is out of range",
            ));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seats: vec![Seat::Human, Seat::Bot],
            seed: DEFAULT_SEED,
            bot_delay: DEFAULT_BOT_DELAY,
            first_player: None,
        }
    }
}

/// Builder that enables deterministic deck injection for tests and simulations.
pub struct SessionBuilder<R: Rules> {
    rules: R,
    config: SessionConfig,
    deck: Option<Vec<R::Kind>>,
    bots: Vec<(PlayerId, Box<dyn Bot<R>>)>,
    frontend: Option<Box<dyn Frontend<R::Kind, R::Choice>>>,
}

impl<R: Rules> SessionBuilder<R> {
    pub fn new(rules: R) -> Self {
        Self {
            rules,
            config: SessionConfig::default(),
            deck: None,
            bots: Vec::new(),
            frontend: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_seats(mut self, seats: Vec<Seat>) -> Self {
        self.config.seats = seats;
        self
    }

    pub fn with_bot_delay(mut self, delay: Duration) -> Self {
        self.config.bot_delay = delay;
        self
    }

    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.config.first_player = Some(player);
        self
    }

    /// Uses this exact card order for every round instead of a shuffled deck.
    /// The last kind is drawn first.
    pub fn with_deck(mut self, kinds: Vec<R::Kind>) -> Self {
        self.deck = Some(kinds);
        self
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Replaces the house bot on a bot seat.
    pub fn with_bot(self, player: PlayerId, bot: impl Bot<R> + 'static) -> Self {
        self.with_boxed_bot(player, Box::new(bot))
    }

    pub fn with_boxed_bot(mut self, player: PlayerId, bot: Box<dyn Bot<R>>) -> Self {
        self.bots.push((player, bot));
        self
    }

    pub fn with_frontend(
        mut self,
        frontend: impl Frontend<R::Kind, R::Choice> + 'static,
    ) -> Self {
        self.frontend = Some(Box::new(frontend));
        self
    }
}

impl<R: HouseBot> SessionBuilder<R> {
    pub fn build(self) -> Result<Session<R>, GameError> {
        Session::from_builder(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingChoice {
    card: CardId,
    /// The opening wild: nothing is played, the choice binds to the discard.
    opening: bool,
}

/// One game session: piles, hands, turn state, standings and the bot seats.
pub struct Session<R: Rules> {
    rules: R,
    config: SessionConfig,
    stacked: Option<Vec<R::Kind>>,
    bots: Vec<Option<Box<dyn Bot<R>>>>,
    frontend: Box<dyn Frontend<R::Kind, R::Choice>>,
    rng: StdRng,
    piles: Piles<R::Kind>,
    hands: Vec<Vec<Card<R::Kind>>>,
    chosen: Option<R::Choice>,
    turn: TurnState,
    phase: TurnPhase,
    status: RoundStatus,
    pending: Option<PendingChoice>,
    standings: Standings,
    scheduler: Scheduler,
    deck_size: usize,
    round: u32,
    closed: bool,
}

impl<R: HouseBot> Session<R> {
    pub fn builder(rules: R) -> SessionBuilder<R> {
        SessionBuilder::new(rules)
    }

    pub fn new(rules: R, config: SessionConfig) -> Result<Self, GameError> {
        SessionBuilder {
            rules,
            config,
            deck: None,
            bots: Vec::new(),
            frontend: None,
        }
        .build()
    }

    fn from_builder(builder: SessionBuilder<R>) -> Result<Self, GameError> {
        let SessionBuilder {
            rules,
            config,
            deck,
            bots: explicit_bots,
            frontend,
        } = builder;
        config.validate()?;
        let players = config.seats.len();
        let deck_size = match &deck {
            Some(kinds) => kinds.len(),
            None => rules.deck_config().iter().map(|(_, count)| count).sum(),
        };
        if deck_size < rules.hand_size() * players + 1 {
            return Err(GameError::InvalidConfiguration(
                "deck does not contain enough cards to deal",
            ));
        }

        let mut bots: Vec<Option<Box<dyn Bot<R>>>> = config
            .seats
            .iter()
            .enumerate()
            .map(|(index, seat)| {
                seat.is_bot().then(|| {
                    rules.house_bot(derive_seed(config.seed, index))
                })
            })
            .collect();
        for (player, bot) in explicit_bots {
            match config.seats.get(player) {
                Some(Seat::Bot) => bots[player] = Some(bot),
                Some(Seat::Human) => {
                    return Err(GameError::InvalidConfiguration(
                        "a bot was assigned to a human seat",
                    ));
                }
                None => return Err(GameError::InvalidPlayer(player)),
            }
        }

        let frontend: Box<dyn Frontend<R::Kind, R::Choice>> = match frontend {
            Some(frontend) => frontend,
            None => Box::new(NullFrontend),
        };

        Ok(Session {
            rng: StdRng::seed_from_u64(config.seed),
            stacked: deck,
            bots,
            frontend,
            piles: Piles::empty(),
            hands: vec![Vec::new(); players],
            chosen: None,
            turn: TurnState::new(players, 0),
            phase: TurnPhase::Idle,
            status: RoundStatus::NotStarted,
            pending: None,
            standings: Standings::new(players),
            scheduler: Scheduler::new(),
            deck_size,
            round: 0,
            closed: false,
            rules,
            config,
        })
    }
}

impl<R: Rules> Session<R> {
    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn players(&self) -> usize {
        self.config.seats.len()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn current_player(&self) -> PlayerId {
        self.turn.current
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.status.winner()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn hand(&self, player: PlayerId) -> Option<&[Card<R::Kind>]> {
        self.hands.get(player).map(Vec::as_slice)
    }

    pub fn active(&self) -> Option<Active<R::Kind, R::Choice>> {
        self.piles.top().map(|card| Active {
            card: card.kind,
            chosen: self.chosen,
        })
    }

    /// Number of cards the current round was dealt from.
    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    /// Cards currently in the deck, the discard pile and all hands.
    pub fn card_count(&self) -> usize {
        self.piles.deck_len()
            + self.piles.discard_len()
            + self.hands.iter().map(Vec::len).sum::<usize>()
    }

    pub fn clock(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending_bot(&self) -> Option<Deferred> {
        self.scheduler.pending()
    }

    /// Begins a new match: standings are cleared and the first round is dealt.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.ensure_open()?;
        self.standings = Standings::new(self.players());
        self.round = 0;
        self.deal_round()?;
        self.run_due_bots();
        Ok(())
    }

    /// Deals the next round of an undecided match.
    pub fn next_round(&mut self) -> Result<(), GameError> {
        self.ensure_open()?;
        match self.status {
            RoundStatus::NotStarted => return Err(GameError::NotStarted),
            RoundStatus::Ongoing => return Err(GameError::RoundInProgress),
            RoundStatus::Won { .. } | RoundStatus::Stalemate => {}
        }
        if self.standings.match_winner().is_some() {
            return Err(GameError::MatchOver);
        }
        self.deal_round()?;
        self.run_due_bots();
        Ok(())
    }

    /// Clears all round and match state. Any pending bot turn is cancelled.
    pub fn reset(&mut self) {
        self.clear_table();
        if !self.closed {
            let welcome = format!("Welcome to {}! Start a game to begin.", self.rules.name());
            self.message(welcome);
            self.render();
        }
    }

    /// Tears the session down: cancels the bot timer, drops the frontend and
    /// rejects all further input.
    pub fn destroy(&mut self) {
        self.clear_table();
        self.closed = true;
        self.frontend = Box::new(NullFrontend);
        debug!(game = self.rules.name(), "session destroyed");
    }

    /// Moves the virtual clock forward, running every bot turn that falls due.
    /// Returns how many bot turns ran.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let until = self.scheduler.now() + elapsed;
        let mut fired = 0;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_bot_turn(task);
            fired += 1;
        }
        self.scheduler.settle(until);
        fired
    }

    /// Runs the pending bot turn immediately, skipping the remaining delay.
    pub fn fire_pending(&mut self) -> bool {
        let Some(task) = self.scheduler.take() else {
            return false;
        };
        self.run_bot_turn(task);
        self.run_due_bots();
        true
    }

    pub fn state_view(&self, perspective: PlayerId) -> Result<ViewOf<R>, GameError> {
        if perspective >= self.players() {
            return Err(GameError::InvalidPlayer(perspective));
        }
        let players = self
            .config
            .seats
            .iter()
            .enumerate()
            .map(|(idx, seat)| PlayerPublicState {
                id: idx,
                seat: *seat,
                hand_size: self.hands[idx].len(),
                is_current: self.status.is_ongoing() && idx == self.turn.current,
                skipped: self.turn.is_skipped(idx),
                record: self.standings.record(idx),
            })
            .collect();

        Ok(GameStateView {
            phase: self.phase,
            status: self.status,
            round: self.round,
            match_winner: self.standings.match_winner(),
            self_player: perspective,
            current_player: self.turn.current,
            direction: self.turn.direction,
            active: self.piles.top().copied(),
            chosen: self.chosen,
            running_total: self.turn.running_total,
            pending_draw: self.turn.pending_draw,
            drawn: self.turn.drawn,
            draw_pile_count: self.piles.deck_len(),
            discard_pile_count: self.piles.discard_len(),
            players,
            hand: self.hands[perspective].clone(),
        })
    }

    /// Whether `player` may play `card` right now.
    pub fn is_valid_play(&self, player: PlayerId, card: CardId) -> bool {
        self.hands
            .get(player)
            .and_then(|hand| hand.iter().find(|c| c.id == card))
            .is_some_and(|c| self.can_play(player, c))
    }

    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action<R::Choice>>, GameError> {
        if self.closed || !self.status.is_ongoing() {
            return Ok(Vec::new());
        }
        if player >= self.players() {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.turn.current {
            return Err(GameError::NotPlayersTurn);
        }
        let mut actions = Vec::new();
        let Some(active) = self.active() else {
            return Ok(actions);
        };

        if let Some(pending) = self.pending {
            let kind = if pending.opening {
                active.card
            } else {
                match self.hands[player].iter().find(|c| c.id == pending.card) {
                    Some(card) => card.kind,
                    None => return Ok(actions),
                }
            };
            actions.extend(
                self.rules
                    .choices(&kind, &self.turn)
                    .into_iter()
                    .map(Action::Choose),
            );
            if !pending.opening {
                actions.push(Action::Cancel);
            }
            return Ok(actions);
        }

        for card in &self.hands[player] {
            if self.turn.drawn.is_some_and(|drawn| drawn != card.id) {
                continue;
            }
            if !self.rules.is_valid_play(&card.kind, &active, &self.turn) {
                continue;
            }
            if self.rules.needs_choice(&card.kind) {
                for choice in self.rules.choices(&card.kind, &self.turn) {
                    actions.push(Action::Play {
                        card: card.id,
                        choice: Some(choice),
                    });
                }
            } else {
                actions.push(Action::Play {
                    card: card.id,
                    choice: None,
                });
            }
        }

        if self.turn.drawn.is_some() {
            if self.rules.stuck() == Stuck::Pass {
                actions.push(Action::Pass);
            }
        } else if self.turn.pending_draw > 0
            || actions.is_empty()
            || self.rules.may_draw_with_playable()
        {
            actions.push(Action::Draw);
        }
        Ok(actions)
    }

    /// Validates and applies one input. Rejections leave the session
    /// unchanged and are narrated to the frontend.
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: Action<R::Choice>,
    ) -> Result<(), GameError> {
        let result = self.try_apply(player, action);
        match &result {
            Ok(()) => {
                self.run_due_bots();
            }
            Err(err) => {
                debug!(player, %err, "action rejected");
                if !self.closed {
                    self.frontend.show_message(&err.to_string());
                }
            }
        }
        result
    }

    fn ensure_open(&self) -> Result<(), GameError> {
        if self.closed {
            return Err(GameError::Closed);
        }
        Ok(())
    }

    fn clear_table(&mut self) {
        if let Some(task) = self.scheduler.cancel() {
            debug!(task = task.0, "pending bot turn cancelled");
        }
        let players = self.players();
        self.piles.clear();
        for hand in &mut self.hands {
            hand.clear();
        }
        self.chosen = None;
        self.pending = None;
        self.turn = TurnState::new(players, 0);
        self.phase = TurnPhase::Idle;
        self.status = RoundStatus::NotStarted;
        self.standings = Standings::new(players);
        self.round = 0;
    }

    fn run_due_bots(&mut self) {
        self.advance(Duration::ZERO);
    }

    fn try_apply(&mut self, player: PlayerId, action: Action<R::Choice>) -> Result<(), GameError> {
        self.ensure_open()?;
        match self.status {
            RoundStatus::NotStarted => return Err(GameError::NotStarted),
            RoundStatus::Won { .. } | RoundStatus::Stalemate => return Err(GameError::RoundOver),
            RoundStatus::Ongoing => {}
        }
        if player >= self.players() {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.turn.current {
            return Err(GameError::NotPlayersTurn);
        }

        match action {
            Action::Play { card, choice } => self.play_card(player, card, choice),
            Action::Choose(choice) => self.choose(player, choice),
            Action::Cancel => self.cancel_choice(),
            Action::Draw => self.draw(player),
            Action::Pass => self.pass(player),
        }
    }

    fn deal_round(&mut self) -> Result<(), GameError> {
        self.scheduler.cancel();
        let players = self.players();
        let deck = match &self.stacked {
            Some(kinds) => stacked_deck(kinds),
            None => {
                let mut deck = build_deck(&self.rules.deck_config());
                shuffle(&mut deck, &mut self.rng);
                deck
            }
        };
        self.deck_size = deck.len();
        self.piles = Piles::new(deck);
        for hand in &mut self.hands {
            hand.clear();
        }
        self.chosen = None;
        self.pending = None;

        let opener = self.flip_opening()?;
        for _ in 0..self.rules.hand_size() {
            for player in 0..players {
                self.piles
                    .draw(&mut self.hands[player], 1, &mut self.rng)
                    .map_err(|_| {
                        GameError::InvalidConfiguration("deck exhausted while dealing hands")
                    })?;
            }
        }

        let first = match self.config.first_player {
            Some(first) => first,
            None => self.rules.first_player(&mut self.rng, players),
        };
        self.turn = TurnState::new(players, first);
        self.round += 1;
        self.status = RoundStatus::Ongoing;
        info!(
            game = self.rules.name(),
            round = self.round,
            first,
            opener = %opener.kind,
            "round started"
        );

        match self.rules.open(&opener.kind, &mut self.turn) {
            Opening::Plain => {}
            Opening::SkipFirst => {
                let text = format!(
                    "First card is a {}! {} first turn is skipped.",
                    opener.kind,
                    self.possessive(first)
                );
                self.message(text);
                self.turn.current = self.turn.peek_next();
            }
            Opening::Reverse => {
                let text = format!("First card is a {}! Direction reversed.", opener.kind);
                self.message(text);
                self.turn.reverse();
            }
            Opening::DrawFirst(count) => {
                let text = format!(
                    "First card is a {}! {} drew {count} cards.",
                    opener.kind,
                    self.label(first)
                );
                self.message(text);
                if self.draw_for(first, count).is_err() {
                    return Ok(());
                }
                self.turn.current = self.turn.peek_next();
            }
            Opening::Choose => {
                self.pending = Some(PendingChoice {
                    card: opener.id,
                    opening: true,
                });
                let text = format!(
                    "First card is a {}! {}",
                    opener.kind,
                    self.rules.choice_prompt()
                );
                self.message(text);
            }
        }

        if self.pending.is_none() {
            self.announce_turn();
        }
        self.enter_turn();
        Ok(())
    }

    /// Puts the first card that may open on the discard pile. Rejected
    /// openers go back under the deck.
    fn flip_opening(&mut self) -> Result<Card<R::Kind>, GameError> {
        for _ in 0..self.piles.deck_len() {
            let Some(card) = self.piles.pop_deck() else {
                break;
            };
            if self.rules.can_open(&card.kind) {
                self.piles.discard(card);
                return Ok(card);
            }
            self.piles.tuck_under(card);
        }
        Err(GameError::InvalidConfiguration(
            "no card in the deck can open the discard pile",
        ))
    }

    fn play_card(
        &mut self,
        player: PlayerId,
        id: CardId,
        choice: Option<R::Choice>,
    ) -> Result<(), GameError> {
        if self.pending.is_some() {
            return Err(InvalidAction::ChoicePending.into());
        }
        let index = self.hand_index(player, id)?;
        let kind = self.hands[player][index].kind;
        if self.turn.drawn.is_some_and(|drawn| drawn != id) {
            return Err(InvalidAction::MustPlayDrawn.into());
        }
        let active = self.active().ok_or(GameError::NotStarted)?;
        if !self.rules.is_valid_play(&kind, &active, &self.turn) {
            return Err(InvalidAction::IllegalPlay(kind.to_string()).into());
        }

        if self.rules.needs_choice(&kind) {
            match choice {
                Some(choice) => self.rules.check_choice(&kind, choice, &self.turn)?,
                None => {
                    self.pending = Some(PendingChoice {
                        card: id,
                        opening: false,
                    });
                    let prompt = self.rules.choice_prompt();
                    self.message(prompt);
                    self.enter_turn();
                    return Ok(());
                }
            }
        } else if choice.is_some() {
            return Err(InvalidAction::UnexpectedChoice.into());
        }

        self.commit_play(player, index, choice);
        Ok(())
    }

    fn choose(&mut self, player: PlayerId, choice: R::Choice) -> Result<(), GameError> {
        let Some(pending) = self.pending else {
            return Err(InvalidAction::NoChoicePending.into());
        };
        if pending.opening {
            let active = self.active().ok_or(GameError::NotStarted)?;
            self.rules.check_choice(&active.card, choice, &self.turn)?;
            self.chosen = Some(choice);
            self.pending = None;
            let text = format!(
                "{} chose {}!",
                self.label(player),
                choice.to_string().to_uppercase()
            );
            self.message(text);
            self.announce_turn();
            self.enter_turn();
            return Ok(());
        }

        let index = self.hand_index(player, pending.card)?;
        let kind = self.hands[player][index].kind;
        self.rules.check_choice(&kind, choice, &self.turn)?;
        self.pending = None;
        self.commit_play(player, index, Some(choice));
        Ok(())
    }

    fn cancel_choice(&mut self) -> Result<(), GameError> {
        match self.pending {
            Some(pending) if !pending.opening => {
                self.pending = None;
                self.enter_turn();
                Ok(())
            }
            Some(_) => Err(InvalidAction::CannotCancel.into()),
            None => Err(InvalidAction::NoChoicePending.into()),
        }
    }

    fn draw(&mut self, player: PlayerId) -> Result<(), GameError> {
        if self.pending.is_some() {
            return Err(InvalidAction::ChoicePending.into());
        }
        if self.turn.drawn.is_some() {
            return Err(InvalidAction::AlreadyDrew.into());
        }

        if self.turn.pending_draw > 0 {
            let count = self.turn.pending_draw;
            self.turn.pending_draw = 0;
            if self.draw_for(player, count).is_ok() {
                let text = format!("{} drew {count} cards.", self.label(player));
                self.message(text);
                self.advance_turn();
            }
            return Ok(());
        }

        if !self.rules.may_draw_with_playable() && self.has_playable(player) {
            return Err(InvalidAction::PlayableCardAvailable.into());
        }
        if self.draw_for(player, 1).is_err() {
            return Ok(());
        }
        let Some(card) = self.hands[player].last().copied() else {
            return Ok(());
        };
        let text = if self.config.seats[player].is_bot() {
            format!("{} drew a card.", self.label(player))
        } else {
            format!("{} drew {}.", self.label(player), card.kind)
        };
        self.message(text);

        let playable = self
            .active()
            .is_some_and(|active| self.rules.is_valid_play(&card.kind, &active, &self.turn));
        if playable {
            self.turn.drawn = Some(card.id);
            self.enter_turn();
            return Ok(());
        }
        match self.rules.stuck() {
            Stuck::Pass => {
                let text = format!("{} passed.", self.label(player));
                self.message(text);
                self.advance_turn();
            }
            Stuck::Forfeit => {
                let text = format!("{} still can't play.", self.label(player));
                self.message(text);
                let winner = self.turn.peek_next();
                self.end_round(Some(winner));
            }
        }
        Ok(())
    }

    fn pass(&mut self, player: PlayerId) -> Result<(), GameError> {
        if self.pending.is_some() {
            return Err(InvalidAction::ChoicePending.into());
        }
        if self.turn.drawn.is_none() || self.rules.stuck() != Stuck::Pass {
            return Err(InvalidAction::CannotPass.into());
        }
        let text = format!("{} passed.", self.label(player));
        self.message(text);
        self.advance_turn();
        Ok(())
    }

    fn commit_play(&mut self, player: PlayerId, index: usize, choice: Option<R::Choice>) {
        let card = self.hands[player].remove(index);
        self.piles.discard(card);
        self.chosen = choice;
        self.turn.drawn = None;
        let effect = self.rules.resolve(&card.kind, choice, &mut self.turn);
        debug!(
            player,
            card = %card.kind,
            ?effect,
            total = self.turn.running_total,
            "card played"
        );
        let text = match choice {
            Some(choice) => format!(
                "{} played {} and chose {}.",
                self.label(player),
                card.kind,
                choice.to_string().to_uppercase()
            ),
            None => format!("{} played {}.", self.label(player), card.kind),
        };
        self.message(text);

        if self.rules.is_bust(&self.turn) {
            let text = format!("Total went over the limit! ({})", self.turn.running_total);
            self.message(text);
            let winner = self.turn.peek_next();
            self.end_round(Some(winner));
            return;
        }
        if self.rules.wins_on_empty_hand() && self.hands[player].is_empty() {
            self.end_round(Some(player));
            return;
        }
        if self.hands[player].len() == 1 {
            if let Some(call) = self.rules.last_card_call() {
                let text = if self.config.seats[player].is_bot() {
                    format!("{} calls {call}!", self.label(player))
                } else {
                    String::from("You have one card left!")
                };
                self.message(text);
            }
        }

        if self.turn.pending_draw > 1 && effect == Effect::Advance {
            self.turn.pending_draw -= 1;
            let text = format!(
                "{} must play {} more card(s) or draw.",
                self.label(player),
                self.turn.pending_draw
            );
            self.message(text);
            self.enter_turn();
            return;
        }
        self.turn.pending_draw = 0;
        if self.apply_effect(effect).is_err() {
            return;
        }
        self.advance_turn();
    }

    fn apply_effect(&mut self, effect: Effect) -> Result<(), DeckExhausted> {
        match effect {
            Effect::Advance => {}
            Effect::Skip => {
                let victim = self.turn.peek_next();
                self.turn.flag_skip(victim);
                let text = format!("{} next turn is skipped!", self.possessive(victim));
                self.message(text);
            }
            Effect::Reverse => {
                self.turn.reverse();
                if self.players() == 2 {
                    let victim = self.turn.peek_next();
                    self.turn.flag_skip(victim);
                    self.message("Direction reversed! With two players that's a skip.");
                } else {
                    self.message("Direction reversed!");
                }
            }
            Effect::ForceDraw(count) => {
                let victim = self.turn.peek_next();
                self.draw_for(victim, count)?;
                self.turn.flag_skip(victim);
                let text = format!("{} drew {count} cards.", self.label(victim));
                self.message(text);
            }
            Effect::PlayOrDraw(count) => {
                self.turn.pending_draw = count;
                let victim = self.turn.peek_next();
                let text = format!(
                    "{} must play {count} cards or draw {count}!",
                    self.label(victim)
                );
                self.message(text);
            }
        }
        Ok(())
    }

    /// Draws into a hand. On exhaustion the round ends in a stalemate.
    fn draw_for(&mut self, player: PlayerId, count: usize) -> Result<DrawReport, DeckExhausted> {
        match self
            .piles
            .draw(&mut self.hands[player], count, &mut self.rng)
        {
            Ok(report) => {
                if report.reshuffles > 0 {
                    debug!(deck = self.piles.deck_len(), "deck reshuffled from discards");
                    self.message("Deck reshuffled from discard pile!");
                }
                debug!(player, drawn = report.drawn, "cards drawn");
                self.render();
                Ok(report)
            }
            Err(err) => {
                debug!(player, drawn = err.drawn, "deck exhausted");
                self.message("No more cards to draw.");
                self.end_round(None);
                Err(err)
            }
        }
    }

    fn advance_turn(&mut self) {
        for player in self.turn.advance() {
            let text = format!("{} turn is skipped!", self.possessive(player));
            self.message(text);
        }
        self.announce_turn();
        self.enter_turn();
    }

    fn announce_turn(&mut self) {
        let current = self.turn.current;
        let mut text = format!("{} turn!", self.possessive(current));
        if self.rules.tracks_total() {
            text.push_str(&format!(" Current total: {}", self.turn.running_total));
        }
        if self.turn.pending_draw > 0 {
            text.push_str(&format!(
                " Play {} card(s) or draw.",
                self.turn.pending_draw
            ));
        }
        self.message(text);
    }

    fn enter_turn(&mut self) {
        let current = self.turn.current;
        let seat = self.config.seats[current];
        self.phase = match self.pending {
            Some(pending) => TurnPhase::ResolvingEffect { card: pending.card },
            None if seat.is_bot() => TurnPhase::AwaitingBot,
            None => TurnPhase::AwaitingHuman,
        };
        self.render();
        if seat.is_bot() {
            let task = self.scheduler.schedule(self.config.bot_delay);
            debug!(task = task.0, player = current, "bot turn scheduled");
        } else {
            self.scheduler.cancel();
        }
    }

    fn end_round(&mut self, winner: Option<PlayerId>) {
        self.scheduler.cancel();
        self.pending = None;
        self.turn.drawn = None;
        self.turn.pending_draw = 0;
        self.phase = TurnPhase::RoundOver;
        match winner {
            Some(winner) => {
                self.status = RoundStatus::Won { winner };
                let penalties: Vec<u32> = self
                    .hands
                    .iter()
                    .map(|hand| hand_penalty(&self.rules, hand))
                    .collect();
                self.standings
                    .record_win(winner, &penalties, self.rules.rounds_to_win());
                info!(game = self.rules.name(), round = self.round, winner, "round won");
                let text = format!("{} won the round!", self.label(winner));
                self.message(text);
                if self.standings.match_winner() == Some(winner) {
                    info!(game = self.rules.name(), winner, "match won");
                    let text = format!("{} won the match!", self.label(winner));
                    self.message(text);
                }
            }
            None => {
                self.status = RoundStatus::Stalemate;
                self.standings.record_stalemate();
                info!(game = self.rules.name(), round = self.round, "round ended in a stalemate");
                self.message("Round ended! It's a draw.");
            }
        }
        self.render();
    }

    fn hand_index(&self, player: PlayerId, id: CardId) -> Result<usize, GameError> {
        self.hands[player]
            .iter()
            .position(|card| card.id == id)
            .ok_or_else(|| InvalidAction::UnknownCard(id).into())
    }

    fn has_playable(&self, player: PlayerId) -> bool {
        let Some(active) = self.active() else {
            return false;
        };
        self.hands[player]
            .iter()
            .any(|card| self.rules.is_valid_play(&card.kind, &active, &self.turn))
    }

    fn can_play(&self, player: PlayerId, card: &Card<R::Kind>) -> bool {
        if !self.status.is_ongoing() || player != self.turn.current || self.pending.is_some() {
            return false;
        }
        if self.turn.drawn.is_some_and(|drawn| drawn != card.id) {
            return false;
        }
        self.active()
            .is_some_and(|active| self.rules.is_valid_play(&card.kind, &active, &self.turn))
    }

    fn render(&mut self) {
        for player in 0..self.players() {
            let cards: Vec<HandCard<R::Kind>> = self.hands[player]
                .iter()
                .map(|card| HandCard {
                    card: *card,
                    playable: self.can_play(player, card),
                })
                .collect();
            self.frontend
                .render_hand(player, self.config.seats[player], &cards);
        }
        let table = TableView {
            active: self.piles.top().copied(),
            chosen: self.chosen,
            running_total: self.turn.running_total,
            draw_pile_count: self.piles.deck_len(),
            discard_pile_count: self.piles.discard_len(),
        };
        self.frontend.render_table(&table);
    }

    fn message(&mut self, text: impl AsRef<str>) {
        self.frontend.show_message(text.as_ref());
    }

    fn label(&self, player: PlayerId) -> String {
        let seat = self.config.seats[player];
        let same_kind = self.config.seats.iter().filter(|s| **s == seat).count();
        match (seat, same_kind) {
            (Seat::Human, 1) => String::from("You"),
            (Seat::Human, _) => format!("Player {}", player + 1),
            (Seat::Bot, 1) => String::from("Bot"),
            (Seat::Bot, _) => format!("Bot {}", player + 1),
        }
    }

    fn possessive(&self, player: PlayerId) -> String {
        match self.label(player).as_str() {
            "You" => String::from("Your"),
            label => format!("{label}'s"),
        }
    }

    fn run_bot_turn(&mut self, task: Deferred) {
        let player = self.turn.current;
        if self.closed || !self.status.is_ongoing() || !self.config.seats[player].is_bot() {
            debug!(task = task.id.0, "stale bot task ignored");
            return;
        }
        let Some(mut bot) = self.bots[player].take() else {
            warn!(player, "bot seat has no bot");
            return;
        };
        let decision = self
            .state_view(player)
            .and_then(|view| Ok((view, self.legal_actions(player)?)));
        let action = match decision {
            Ok((view, legal)) if !legal.is_empty() => {
                let action = bot.select_action(&view, &legal);
                if legal.contains(&action) {
                    action
                } else {
                    warn!(player, ?action, "bot chose an illegal action, falling back");
                    legal[0]
                }
            }
            Ok(_) => {
                warn!(player, "bot has no legal actions");
                self.bots[player] = Some(bot);
                return;
            }
            Err(err) => {
                warn!(player, %err, "bot could not observe the table");
                self.bots[player] = Some(bot);
                return;
            }
        };
        self.bots[player] = Some(bot);
        debug!(task = task.id.0, player, ?action, "bot acts");
        if let Err(err) = self.try_apply(player, action) {
            warn!(player, %err, "bot action rejected");
            self.frontend.show_message(&err.to_string());
        }
    }
}
