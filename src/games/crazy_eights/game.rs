//! The Crazy Eights controller.
//!
//! ## Phases
//!
//! ```text
//! ChoosingOpponents -> Dealing -> Playing <-> SuitChoice -> GameOver
//! ```
//!
//! ## Control flow
//!
//! Every animated step is started with a [`Step`] tag. When the scheduler
//! reports the step complete (or the move turns out to need no animation at
//! all), the completion is queued and [`CrazyEights::pump`] hands it to
//! [`CrazyEights::on_step_complete`], the single place where game state
//! advances. Computer players think on a [`TimerQueue`]; restarting bumps its
//! generation so a pending "think" from the previous game never fires.
//!
//! The action lock is taken before any step starts and released only when
//! the whole chain of steps for that action is done.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::rules::{can_play, hand_size_for, player_after};
use super::settings::{roster_from_settings, CrazyEightsSettings};
use crate::ai::{OpponentProfile, OpponentStrategy};
use crate::animation::{
    AnimationId, ColorPulsePlotter, Completed, Launch, Motion, Movable, Pace, Scheduler, TimerQueue,
};
use crate::cards::{Card, CardCollection, CardFace, DeckKind, GrabPolicy, Rank, Suit};
use crate::core::{CardSettings, Color, GameRng, PlayerId, Point, Settings};
use crate::games::Outcome;
use crate::host::{draw_collection, draw_collection_or_slot, GameController, Overlay, Surface};

const STATUS: &str = "status";
const DIALOG_TITLE: &str = "dialog_title";
const PLAYER_PROMPT: &str = "player_prompt";
const RESTART: &str = "restart";
const OPPONENT_BUTTON: &str = "opponents_";
const SUIT_BUTTON: &str = "suit_";
const OPPONENT_NAME: &str = "opponent_name_";

/// Most opponents the table seats.
pub const MAX_OPPONENTS: u8 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    ChoosingOpponents,
    Dealing,
    Playing,
    /// An eight was just played and its player must name a suit.
    SuitChoice,
    GameOver(Outcome),
}

/// Buttons of the Crazy Eights table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Restart,
    Opponents(u8),
    Suit(Suit),
}

/// Progress of the deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DealState {
    pub cards_per_player: usize,
    pub round: usize,
    pub next_player: PlayerId,
}

/// What to do once a play or draw (and any stockpile refill it caused) is done.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Finish {
    Played(PlayerId),
    Drew,
}

/// Tag of an animated step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Deal(DealState),
    FlipStarter,
    Play { player: PlayerId },
    Draw { player: PlayerId },
    Reclaim { then: Finish },
    Pulse,
}

/// Tag of a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Wake {
    OpponentTurn(PlayerId),
}

/// A computer player at the table.
#[derive(Debug)]
pub struct OpponentSeat {
    pub hand: CardCollection,
    pub profile: OpponentProfile,
}

pub struct CrazyEights {
    settings: CrazyEightsSettings,
    card: CardSettings,
    background: Color,
    roster: Vec<OpponentProfile>,
    shuffle_rng: GameRng,
    ai_rng: GameRng,

    stockpile: CardCollection,
    discard: CardCollection,
    player_hand: CardCollection,
    opponents: Vec<OpponentSeat>,
    /// Cards a replayed position left out. They return on restart.
    out_of_play: CardCollection,
    /// Set by the stockpile when its last card leaves.
    stock_exhausted: Rc<Cell<bool>>,

    scheduler: Scheduler<Step>,
    timers: TimerQueue<Wake>,
    ready: VecDeque<Completed<Step>>,
    overlay: Overlay<Action>,

    phase: Phase,
    dealer: PlayerId,
    turn: Option<PlayerId>,
    chosen_suit: Option<Suit>,
    action_lock: bool,
    consecutive_passes: usize,
    pulse: Option<AnimationId>,
}

impl std::fmt::Debug for CrazyEights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrazyEights")
            .field("phase", &self.phase)
            .field("turn", &self.turn)
            .field("chosen_suit", &self.chosen_suit)
            .field("action_lock", &self.action_lock)
            .field("stockpile", &self.stockpile.len())
            .field("discard", &self.discard.len())
            .finish()
    }
}

impl CrazyEights {
    /// Build the table. Call [`GameController::start`] to begin.
    #[must_use]
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let game = CrazyEightsSettings::from_settings(settings);
        let card = settings.card.clone();
        let root = GameRng::new(seed);

        let stock_exhausted = Rc::new(Cell::new(false));
        let flag = Rc::clone(&stock_exhausted);
        let stockpile = CardCollection::deck(
            DeckKind::Full,
            game.stockpile.position,
            game.stockpile.offset,
            card.size,
        )
        .with_on_empty(move |_| flag.set(true));
        let discard = CardCollection::new(game.discard.position, game.discard.offset, card.size);
        let player_hand =
            CardCollection::new(game.player_hand.position, game.player_hand.offset, card.size)
                .with_grab_policy(GrabPolicy::AnySingle);

        Self {
            roster: roster_from_settings(settings),
            shuffle_rng: root.for_context("shuffle"),
            ai_rng: root.for_context("opponents"),
            background: settings.window.background_color,
            stockpile,
            discard,
            player_hand,
            opponents: Vec::new(),
            out_of_play: CardCollection::new(Point::default(), Point::default(), card.size),
            stock_exhausted,
            scheduler: Scheduler::new(card.size),
            timers: TimerQueue::new(),
            ready: VecDeque::new(),
            overlay: Overlay::new(),
            phase: Phase::ChoosingOpponents,
            dealer: PlayerId::HUMAN,
            turn: None,
            chosen_suit: None,
            action_lock: false,
            consecutive_passes: 0,
            pulse: None,
            settings: game,
            card,
        }
    }

    /// Builder: replace the opponent roster.
    #[must_use]
    pub fn with_roster(mut self, roster: Vec<OpponentProfile>) -> Self {
        if roster.is_empty() {
            warn!("ignoring empty opponent roster");
        } else {
            self.roster = roster;
        }
        self
    }

    /// A game already in progress with the human to move. `hands[0]` is the
    /// human's hand; each further hand seats the next opponent of the roster.
    /// Piles are listed bottom to top. Cards not named stay out of play.
    #[must_use]
    pub fn with_table(
        settings: &Settings,
        seed: u64,
        hands: &[&[CardFace]],
        discard: &[CardFace],
        stockpile: &[CardFace],
    ) -> Self {
        let mut game = Self::new(settings, seed);
        game.stockpile.move_all_to(&mut game.out_of_play, true);

        let seats = hands.len().saturating_sub(1).min(game.roster.len());
        let profiles = game.roster[..seats].to_vec();
        game.seat(profiles);

        for (index, faces) in hands.iter().take(seats + 1).enumerate() {
            let player = PlayerId::new(index as u8);
            for face in *faces {
                let Some(card) = game.out_of_play.remove(*face) else { continue };
                if let Some(hand) = game.hand_mut(player) {
                    hand.add(card.with_face_down(!player.is_human()), true);
                }
            }
        }
        for face in discard {
            if let Some(card) = game.out_of_play.remove(*face) {
                game.discard.add(card.with_face_down(false), true);
            }
        }
        for face in stockpile {
            if let Some(card) = game.out_of_play.remove(*face) {
                game.stockpile.add(card, true);
            }
        }
        game.stock_exhausted.set(false);

        game.overlay.show_button(
            RESTART,
            game.settings.restart_button.rect(0),
            "Restart",
            Action::Restart,
        );
        game.dealer = PlayerId::new(seats as u8);
        game.phase = Phase::Playing;
        game.turn = Some(PlayerId::HUMAN);
        game.announce_turn();
        game
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn turn(&self) -> Option<PlayerId> {
        self.turn
    }

    #[must_use]
    pub fn dealer(&self) -> PlayerId {
        self.dealer
    }

    #[must_use]
    pub fn chosen_suit(&self) -> Option<Suit> {
        self.chosen_suit
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.action_lock
    }

    #[must_use]
    pub fn stockpile(&self) -> &CardCollection {
        &self.stockpile
    }

    #[must_use]
    pub fn discard(&self) -> &CardCollection {
        &self.discard
    }

    #[must_use]
    pub fn player_hand(&self) -> &CardCollection {
        &self.player_hand
    }

    #[must_use]
    pub fn opponents(&self) -> &[OpponentSeat] {
        &self.opponents
    }

    /// Cards anywhere on the table, including those in flight.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.stockpile.len()
            + self.discard.len()
            + self.player_hand.len()
            + self.opponents.iter().map(|o| o.hand.len()).sum::<usize>()
            + self.scheduler.in_flight().iter().map(|h| h.len()).sum::<usize>()
    }

    /// Whether the human could play `card` right now.
    #[must_use]
    pub fn can_play(&self, card: CardFace) -> bool {
        self.discard
            .top_face()
            .is_some_and(|top| can_play(card, top, self.chosen_suit))
    }

    fn player_count(&self) -> usize {
        self.opponents.len() + 1
    }

    fn next_after(&self, player: PlayerId) -> PlayerId {
        player_after(player, self.opponents.len())
    }

    fn name_of(&self, player: PlayerId) -> &str {
        if player.is_human() {
            "You"
        } else {
            self.opponents
                .get(player.index() - 1)
                .map_or("?", |o| o.profile.name())
        }
    }

    fn hand_mut(&mut self, player: PlayerId) -> Option<&mut CardCollection> {
        if player.is_human() {
            Some(&mut self.player_hand)
        } else {
            self.opponents.get_mut(player.index() - 1).map(|o| &mut o.hand)
        }
    }

    fn hand(&self, player: PlayerId) -> Option<&CardCollection> {
        if player.is_human() {
            Some(&self.player_hand)
        } else {
            self.opponents.get(player.index() - 1).map(|o| &o.hand)
        }
    }

    // === Messages ===

    fn show_status(&mut self, text: impl Into<String>) {
        let m = self.settings.messages;
        self.overlay.show_label(STATUS, text, m.status, m.text_color);
    }

    fn show_dialog_title(&mut self, text: impl Into<String>) {
        let m = self.settings.messages;
        self.overlay.show_label(DIALOG_TITLE, text, m.dialog_title, m.text_color);
    }

    fn show_prompt(&mut self, text: &str) {
        let m = self.settings.messages;
        self.overlay.show_label(PLAYER_PROMPT, text, m.player_prompt, m.text_color);
    }

    fn show_opponents_dialog(&mut self) {
        self.show_dialog_title("How many opponents would you like?");
        let count = MAX_OPPONENTS.min(self.roster.len().min(255) as u8);
        for n in 1..=count {
            let rect = self.settings.dialog.rect(usize::from(n - 1));
            self.overlay.show_button(
                &format!("{OPPONENT_BUTTON}{n}"),
                rect,
                n.to_string(),
                Action::Opponents(n),
            );
        }
    }

    fn show_suit_dialog(&mut self) {
        self.show_dialog_title("Please choose a suit:");
        for (i, suit) in Suit::ALL.into_iter().enumerate() {
            let rect = self.settings.dialog.rect(i);
            self.overlay.show_button(
                &format!("{SUIT_BUTTON}{i}"),
                rect,
                suit.symbol().to_string(),
                Action::Suit(suit),
            );
        }
    }

    // === Step plumbing ===

    fn launch(&mut self, movable: Movable, destination: Point, motion: &Motion, step: Step) {
        let pace = Pace::Speed(self.card.move_speed);
        if let Launch::Finished(done) = self.scheduler.animate(movable, destination, pace, motion, step) {
            self.ready.push_back(done);
        }
    }

    /// Dispatch every queued completion. Steps may queue further completions.
    fn pump(&mut self) {
        while let Some(done) = self.ready.pop_front() {
            self.on_step_complete(done);
        }
    }

    fn on_step_complete(&mut self, done: Completed<Step>) {
        let step = done.tag;
        let cards = done.into_cards();
        match step {
            Step::Deal(state) => {
                let face_down = !state.next_player.is_human();
                if let Some(hand) = self.hand_mut(state.next_player) {
                    for mut card in cards {
                        card.set_face_down(face_down);
                        hand.add(card, true);
                    }
                }
                let round = if state.next_player == self.dealer {
                    state.round + 1
                } else {
                    state.round
                };
                self.deal_next(DealState {
                    cards_per_player: state.cards_per_player,
                    round,
                    next_player: self.next_after(state.next_player),
                });
            }
            Step::FlipStarter => {
                for mut card in cards {
                    card.set_face_down(false);
                    self.discard.add(card, true);
                }
                self.phase = Phase::Playing;
                self.turn = Some(self.next_after(self.dealer));
                self.announce_turn();
                self.action_lock = false;
                info!(dealer = %self.dealer, "deal complete");
            }
            Step::Play { player } => {
                let mut eight = false;
                for mut card in cards {
                    card.set_face_down(false);
                    eight = card.rank() == Rank::EIGHT;
                    self.discard.add(card, true);
                }
                if eight {
                    self.prompt_choose_suit();
                } else {
                    self.chosen_suit = None;
                    self.overlay.hide(DIALOG_TITLE);
                    self.advance_turn();
                }
                self.after_move(Finish::Played(player));
            }
            Step::Draw { player } => {
                if let Some(hand) = self.hand_mut(player) {
                    for mut card in cards {
                        card.set_face_down(!player.is_human());
                        hand.add(card, true);
                    }
                }
                self.after_move(Finish::Drew);
            }
            Step::Reclaim { then } => {
                for mut card in cards {
                    card.set_face_down(true);
                    self.stockpile.add(card, true);
                }
                self.reclaim_next(then);
            }
            Step::Pulse => {}
        }
    }

    // === Dealing ===

    fn choose_opponents(&mut self, requested: u8) {
        if self.phase != Phase::ChoosingOpponents {
            return;
        }
        let available = self.roster.len().min(usize::from(MAX_OPPONENTS));
        let count = usize::from(requested);
        if count == 0 || count > available {
            warn!(requested, available, "ignoring invalid opponent count");
            return;
        }

        self.overlay.hide(DIALOG_TITLE);
        self.overlay.hide_prefixed(OPPONENT_BUTTON);
        self.seat_opponents(count);
        self.dealer = PlayerId::new(self.ai_rng.gen_range_inclusive(0, count as u64) as u8);
        info!(opponents = count, dealer = %self.dealer, "starting deal");

        let message = if self.dealer.is_human() {
            "You are dealing...".to_string()
        } else {
            format!("{} is dealing...", self.name_of(self.dealer))
        };
        self.show_status(message);

        self.phase = Phase::Dealing;
        self.action_lock = true;
        let first = self.next_after(self.dealer);
        self.deal_next(DealState {
            cards_per_player: hand_size_for(count),
            round: 0,
            next_player: first,
        });
    }

    fn seat_opponents(&mut self, count: usize) {
        let profiles = self.ai_rng.choose_multiple(&self.roster, count);
        self.seat(profiles);
    }

    fn seat(&mut self, profiles: Vec<OpponentProfile>) {
        let count = profiles.len().max(1);
        let layout = self.settings.opponent_hand;
        let width_per_opponent = (layout.x_range[1] - layout.x_range[0]) / count as f64;

        for (i, profile) in profiles.into_iter().enumerate() {
            let x = layout.x_range[0] + (i as f64 + 0.5) * width_per_opponent - self.card.size.w / 2.0;
            let hand = CardCollection::new(Point::new(x, layout.position_y), layout.offset, self.card.size)
                .with_grab_policy(GrabPolicy::AnySingle);
            self.overlay.show_label(
                &format!("{OPPONENT_NAME}{i}"),
                profile.name(),
                Point::new(x, layout.name_y),
                self.settings.messages.text_color,
            );
            self.opponents.push(OpponentSeat { hand, profile });
        }
    }

    fn deal_next(&mut self, state: DealState) {
        if state.round >= state.cards_per_player {
            self.flip_starter();
            return;
        }
        let Some(destination) = self.hand(state.next_player).map(CardCollection::next_card_pos) else {
            warn!(player = %state.next_player, "no hand to deal to");
            return;
        };
        let Some(card) = self.stockpile.pop_top() else {
            warn!("stockpile ran out while dealing");
            self.flip_starter();
            return;
        };
        self.launch(card.into(), destination, &Motion::Linear, Step::Deal(state));
    }

    fn flip_starter(&mut self) {
        let Some(card) = self.stockpile.pop_top() else {
            warn!("no card left to start the discard pile");
            return;
        };
        let destination = self.discard.next_card_pos();
        self.launch(card.into(), destination, &Motion::Linear, Step::FlipStarter);
    }

    // === Turns ===

    fn announce_turn(&mut self) {
        let Some(turn) = self.turn else { return };
        let message = if turn.is_human() {
            "Your turn".to_string()
        } else {
            format!("{}'s turn", self.name_of(turn))
        };
        self.show_status(message);
    }

    fn advance_turn(&mut self) {
        if let Some(turn) = self.turn {
            self.turn = Some(self.next_after(turn));
            debug!(turn = ?self.turn, "turn advanced");
            self.announce_turn();
        }
    }

    fn play_card(&mut self, player: PlayerId, mut card: Card) {
        self.consecutive_passes = 0;
        let motion = if card.rank() == Rank::EIGHT {
            self.start_eight_pulse();
            Motion::Spiral(self.settings.crazy_8_spiral.clone())
        } else {
            Motion::Linear
        };
        debug!(%player, card = %card.face(), "playing card");
        card.set_face_down(false);
        let destination = self.discard.next_card_pos();
        self.launch(card.into(), destination, &motion, Step::Play { player });
    }

    fn draw_card(&mut self, player: PlayerId) {
        if self.stockpile.is_empty() {
            if self.discard.len() > 1 {
                self.reclaim_next(Finish::Drew);
            } else {
                self.pass(player);
            }
            return;
        }
        let Some(destination) = self.hand(player).map(CardCollection::next_card_pos) else {
            self.action_lock = false;
            return;
        };
        let Some(card) = self.stockpile.pop_top() else {
            self.action_lock = false;
            return;
        };
        self.consecutive_passes = 0;
        debug!(%player, "drawing card");
        self.launch(card.into(), destination, &Motion::Linear, Step::Draw { player });
    }

    /// Nothing to draw and nothing to refill with: the turn passes.
    fn pass(&mut self, player: PlayerId) {
        self.consecutive_passes += 1;
        info!(%player, passes = self.consecutive_passes, "player passes");
        if self.consecutive_passes >= self.player_count() {
            self.game_over(Outcome::Draw);
            return;
        }
        self.advance_turn();
        self.action_lock = false;
    }

    fn after_move(&mut self, then: Finish) {
        if self.stock_exhausted.get() {
            self.reclaim_next(then);
        } else {
            self.finish_move(then);
        }
    }

    /// Move the discard pile, except its top card, back to the stockpile one
    /// card at a time from the bottom, then shuffle.
    fn reclaim_next(&mut self, then: Finish) {
        if self.discard.len() <= 1 {
            self.stockpile.shuffle(&mut self.shuffle_rng);
            self.stock_exhausted.set(false);
            debug!(stockpile = self.stockpile.len(), "stockpile refilled");
            self.finish_move(then);
            return;
        }
        let Some(mut card) = self.discard.pop_bottom() else { return };
        card.set_face_down(true);
        let destination = self.stockpile.next_card_pos();
        self.launch(card.into(), destination, &Motion::Linear, Step::Reclaim { then });
    }

    fn finish_move(&mut self, then: Finish) {
        match then {
            Finish::Played(player) if self.hand(player).is_some_and(CardCollection::is_empty) => {
                self.game_over(Outcome::Winner(player));
            }
            Finish::Played(_) | Finish::Drew => self.action_lock = false,
        }
    }

    // === Suit choice ===

    fn prompt_choose_suit(&mut self) {
        self.phase = Phase::SuitChoice;
        if self.turn.is_some_and(PlayerId::is_human) {
            self.show_suit_dialog();
        } else {
            self.show_dialog_title("Choosing suit...");
        }
    }

    fn choose_suit(&mut self, suit: Suit) {
        if self.phase != Phase::SuitChoice {
            return;
        }
        info!(player = ?self.turn, %suit, "suit chosen");
        self.chosen_suit = Some(suit);
        self.phase = Phase::Playing;
        self.overlay.hide_prefixed(SUIT_BUTTON);
        self.show_dialog_title(format!("Suit is {suit}"));
        self.stop_pulse();
        self.advance_turn();
        self.action_lock = false;
    }

    // === Background ===

    fn start_eight_pulse(&mut self) {
        self.stop_pulse();
        let mut bright = || 180 + self.ai_rng.gen_range_inclusive(0, 50) as u8;
        let to = Color::new(bright(), bright(), bright());
        let plotter = ColorPulsePlotter::new(self.background, to, self.settings.play_8_period_ms);
        self.pulse = Some(self.scheduler.pulse(plotter, Step::Pulse));
    }

    fn stop_pulse(&mut self) {
        if let Some(id) = self.pulse.take() {
            self.scheduler.finish(id);
        }
    }

    // === Computer players ===

    fn poll_opponents(&mut self) {
        if self.action_lock || !matches!(self.phase, Phase::Playing | Phase::SuitChoice) {
            return;
        }
        let Some(turn) = self.turn.filter(|t| !t.is_human()) else { return };
        self.action_lock = true;
        let behavior = self.settings.opponent_behavior;
        let delay = self
            .ai_rng
            .gen_range_inclusive(behavior.min_delay_ms, behavior.max_delay_ms);
        self.timers.schedule(delay as f64, Wake::OpponentTurn(turn));
    }

    fn on_wake(&mut self, wake: Wake) {
        let Wake::OpponentTurn(player) = wake;
        if self.turn != Some(player) || !matches!(self.phase, Phase::Playing | Phase::SuitChoice) {
            debug!(%player, "opponent woke after its turn ended");
            return;
        }
        let Some(seat) = self.opponents.get(player.index() - 1) else { return };
        let hand = seat.hand.faces();

        if self.phase == Phase::SuitChoice {
            let suit = seat.profile.choose_suit(&hand);
            self.choose_suit(suit);
            return;
        }

        let Some(top) = self.discard.top_face() else {
            warn!("discard pile is empty during play");
            self.action_lock = false;
            return;
        };
        let choice = seat
            .profile
            .try_select_card(&hand, top, self.chosen_suit, &mut self.ai_rng);
        let card = choice.and_then(|face| {
            self.hand_mut(player)
                .and_then(|h| h.try_grab(face))
                .and_then(|grabbed| grabbed.into_iter().next())
        });
        match card {
            Some(card) => self.play_card(player, card),
            None => self.draw_card(player),
        }
    }

    // === Human input ===

    fn on_player_click(&mut self, pos: Point) {
        if self.action_lock || !matches!(self.phase, Phase::Playing | Phase::SuitChoice) {
            return;
        }
        if self.turn != Some(PlayerId::HUMAN) {
            self.show_prompt("It's not your turn!");
            return;
        }
        if self.phase == Phase::SuitChoice {
            self.show_prompt("You played an 8 and must choose a suit!");
            return;
        }

        if let Some(face) = self.player_hand.card_at(pos).map(Card::face) {
            if !self.can_play(face) {
                self.show_prompt("You can't play that card.");
                return;
            }
            let Some(card) = self.player_hand.try_grab(face).and_then(|g| g.into_iter().next()) else {
                return;
            };
            self.action_lock = true;
            self.play_card(PlayerId::HUMAN, card);
        } else if self.stockpile.is_clicked(pos) {
            self.action_lock = true;
            self.draw_card(PlayerId::HUMAN);
        }
    }

    // === End of game ===

    fn game_over(&mut self, outcome: Outcome) {
        info!(?outcome, "game over");
        self.phase = Phase::GameOver(outcome);
        self.turn = None;
        self.action_lock = true;
        self.stop_pulse();
        let plotter = self.settings.game_over_background.plotter();
        self.pulse = Some(self.scheduler.pulse(plotter, Step::Pulse));

        let message = match outcome {
            Outcome::Winner(p) if p.is_human() => "GAME OVER! You win!!".to_string(),
            Outcome::Winner(p) => format!("GAME OVER! {} wins!!", self.name_of(p)),
            Outcome::Draw => "GAME OVER! Nobody can move.".to_string(),
        };
        let m = self.settings.messages;
        self.overlay.show_label(STATUS, message, m.status, m.game_over_color);
        self.overlay.hide(DIALOG_TITLE);
        self.overlay.hide_prefixed(SUIT_BUTTON);
    }
}

impl GameController for CrazyEights {
    type Action = Action;

    fn start(&mut self) {
        self.phase = Phase::ChoosingOpponents;
        self.stockpile.shuffle(&mut self.shuffle_rng);
        self.overlay.show_button(
            RESTART,
            self.settings.restart_button.rect(0),
            "Restart",
            Action::Restart,
        );
        self.show_status("Starting game...");
        self.show_opponents_dialog();
    }

    fn restart(&mut self) {
        info!("restarting");
        self.timers.invalidate();
        self.ready.clear();
        for done in self.scheduler.finish_all() {
            for card in done.into_cards() {
                self.stockpile.add(card.with_face_down(true), true);
            }
        }
        self.pulse = None;

        self.discard.move_all_to(&mut self.stockpile, true);
        self.player_hand.move_all_to(&mut self.stockpile, true);
        for mut seat in std::mem::take(&mut self.opponents) {
            seat.hand.move_all_to(&mut self.stockpile, true);
        }
        self.out_of_play.move_all_to(&mut self.stockpile, true);

        self.overlay.hide_prefixed(OPPONENT_NAME);
        self.overlay.hide_prefixed(OPPONENT_BUTTON);
        self.overlay.hide_prefixed(SUIT_BUTTON);
        self.overlay.hide(STATUS);
        self.overlay.hide(DIALOG_TITLE);
        self.overlay.hide(PLAYER_PROMPT);

        self.dealer = PlayerId::HUMAN;
        self.turn = None;
        self.chosen_suit = None;
        self.action_lock = false;
        self.consecutive_passes = 0;
        self.stock_exhausted.set(false);
        self.start();
    }

    fn on_mouse_event(&mut self, pos: Point, down: bool, _double_click: bool) {
        if !down {
            self.overlay.hide(PLAYER_PROMPT);
            return;
        }
        if self.click_button(pos) {
            return;
        }
        self.on_player_click(pos);
        self.pump();
    }

    fn on_tick(&mut self, dt_ms: f64) {
        self.ready.extend(self.scheduler.tick(dt_ms));
        self.pump();
        for wake in self.timers.advance(dt_ms) {
            self.on_wake(wake);
            self.pump();
        }
        self.poll_opponents();
    }

    fn on_button(&mut self, action: Action) {
        match action {
            Action::Restart => self.restart(),
            Action::Opponents(n) => self.choose_opponents(n),
            Action::Suit(suit) => {
                if self.turn == Some(PlayerId::HUMAN) && !self.action_lock {
                    self.choose_suit(suit);
                }
            }
        }
        self.pump();
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill(self.background_color());
        draw_collection(surface, &self.stockpile);
        draw_collection_or_slot(surface, &self.discard);
        draw_collection(surface, &self.player_hand);
        for seat in &self.opponents {
            draw_collection(surface, &seat.hand);
        }
        for holder in self.scheduler.in_flight() {
            draw_collection(surface, holder);
        }
    }

    fn background_color(&self) -> Color {
        self.pulse
            .and_then(|id| self.scheduler.color(id))
            .unwrap_or(self.background)
    }

    fn overlay(&self) -> &Overlay<Action> {
        &self.overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CrazyEights {
        let mut game = CrazyEights::new(&Settings::default(), 42);
        game.start();
        game
    }

    #[test]
    fn test_start_shows_opponent_dialog() {
        let game = table();
        assert_eq!(game.phase(), Phase::ChoosingOpponents);
        assert!(game.overlay().button("opponents_1").is_some());
        assert!(game.overlay().button("opponents_6").is_some());
        assert_eq!(game.stockpile().len(), 52);
    }

    #[test]
    fn test_invalid_opponent_count_is_ignored() {
        let mut game = table();
        game.on_button(Action::Opponents(0));
        assert_eq!(game.phase(), Phase::ChoosingOpponents);
        game.on_button(Action::Opponents(MAX_OPPONENTS + 1));
        assert_eq!(game.phase(), Phase::ChoosingOpponents);
    }

    #[test]
    fn test_choosing_opponents_starts_deal() {
        let mut game = table();
        game.on_button(Action::Opponents(2));
        assert_eq!(game.phase(), Phase::Dealing);
        assert!(game.is_locked());
        assert_eq!(game.opponents().len(), 2);
        assert_ne!(game.opponents()[0].profile.name(), game.opponents()[1].profile.name());
        assert!(game.overlay().button("opponents_1").is_none());
        assert_eq!(game.card_count(), 52);
    }

    #[test]
    fn test_clicks_ignored_while_dealing() {
        let mut game = table();
        game.on_button(Action::Opponents(1));
        game.on_mouse_event(Point::new(310.0, 260.0), true, false);
        assert_eq!(game.overlay().label(PLAYER_PROMPT), None);
        assert_eq!(game.player_hand().len(), 0);
    }
}
