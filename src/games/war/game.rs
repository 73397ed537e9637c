//! The War controller.
//!
//! ## Phases
//!
//! ```text
//! Paused -> NextCard -> Evaluate -> NextCard ... -> GameOver
//!                          |  ^
//!                          v  |
//!                          War
//! ```
//!
//! Each side has its own lock, so the player and the computer stage cards
//! independently. The state machine itself runs once per tick after
//! completions and timers have been handled.

use tracing::{debug, info};

use super::settings::WarSettings;
use crate::animation::{AnimationId, Completed, Launch, Motion, Movable, Pace, Scheduler, TimerQueue};
use crate::cards::{Card, CardCollection, CardFace, DeckKind};
use crate::core::{CardSettings, Color, GameRng, PlayerId, Point, Settings};
use crate::games::Outcome;
use crate::host::{draw_collection, draw_collection_or_slot, GameController, Overlay, Surface};

const MESSAGE: &str = "screen_message";
const RESTART: &str = "restart";

/// Face-down cards each side stakes in a war.
pub const WAR_ANTE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No game in progress.
    Paused,
    /// Both sides owe a face-up card.
    NextCard,
    /// Both cards are down and the winner is being decided.
    Evaluate,
    War,
    GameOver(Outcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    #[must_use]
    pub const fn player_id(self) -> PlayerId {
        match self {
            Side::Player => PlayerId::HUMAN,
            Side::Ai => PlayerId::new(1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Stage { side: Side, face_down: bool },
    Collect { winner: Side },
    Pulse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Wake {
    AiPlay { face_down: bool },
    Award(Side),
}

/// One side of the table.
#[derive(Debug)]
struct Camp {
    deck: CardCollection,
    stage: CardCollection,
    locked: bool,
    /// Face-down cards staked in the current war.
    antes: usize,
}

impl Camp {
    fn new(settings: &WarSettings, side: Side, card: &CardSettings) -> Self {
        let (deck, stage) = match side {
            Side::Player => (settings.player_deck, settings.player_stage),
            Side::Ai => (settings.ai_deck, settings.ai_stage),
        };
        Self {
            deck: CardCollection::new(deck.position, deck.offset, card.size),
            stage: CardCollection::new(stage.position, stage.offset, card.size),
            locked: false,
            antes: 0,
        }
    }

    /// Whether an open card is showing on the stage.
    fn has_played(&self) -> bool {
        self.stage.top().is_some_and(|c| !c.is_face_down())
    }
}

pub struct War {
    settings: WarSettings,
    card: CardSettings,
    background: Color,
    shuffle_rng: GameRng,
    ai_rng: GameRng,

    /// Holds every card between games. Never drawn.
    start_deck: CardCollection,
    player: Camp,
    ai: Camp,

    scheduler: Scheduler<Step>,
    timers: TimerQueue<Wake>,
    overlay: Overlay<Action>,

    phase: Phase,
    awaiting_transfers: usize,
    pulse: Option<AnimationId>,
}

impl std::fmt::Debug for War {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("War")
            .field("phase", &self.phase)
            .field("player_deck", &self.player.deck.len())
            .field("ai_deck", &self.ai.deck.len())
            .finish()
    }
}

impl War {
    #[must_use]
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let war = WarSettings::from_settings(settings);
        let card = settings.card.clone();
        let root = GameRng::new(seed);
        let start_deck = CardCollection::deck(DeckKind::Full, Point::default(), Point::default(), card.size);

        Self {
            player: Camp::new(&war, Side::Player, &card),
            ai: Camp::new(&war, Side::Ai, &card),
            shuffle_rng: root.for_context("shuffle"),
            ai_rng: root.for_context("ai"),
            background: settings.window.background_color,
            start_deck,
            scheduler: Scheduler::new(card.size),
            timers: TimerQueue::new(),
            overlay: Overlay::new(),
            phase: Phase::Paused,
            awaiting_transfers: 0,
            pulse: None,
            settings: war,
            card,
        }
    }

    /// A game already in progress with the given decks, listed bottom to top.
    /// Cards not named stay out of play.
    #[must_use]
    pub fn with_decks(settings: &Settings, seed: u64, player: &[CardFace], ai: &[CardFace]) -> Self {
        let mut game = Self::new(settings, seed);
        for (faces, side) in [(player, Side::Player), (ai, Side::Ai)] {
            for face in faces {
                if let Some(card) = game.start_deck.remove(*face) {
                    game.camp_mut(side).deck.add(card.with_face_down(true), true);
                }
            }
        }
        game.show_restart_button();
        game.phase = Phase::NextCard;
        game
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn deck(&self, side: Side) -> &CardCollection {
        &self.camp(side).deck
    }

    #[must_use]
    pub fn stage(&self, side: Side) -> &CardCollection {
        &self.camp(side).stage
    }

    #[must_use]
    pub fn antes(&self, side: Side) -> usize {
        self.camp(side).antes
    }

    #[must_use]
    pub fn is_locked(&self, side: Side) -> bool {
        self.camp(side).locked
    }

    /// Cards in play, including those in flight.
    #[must_use]
    pub fn card_count(&self) -> usize {
        [&self.player, &self.ai]
            .iter()
            .map(|c| c.deck.len() + c.stage.len())
            .sum::<usize>()
            + self.scheduler.in_flight().iter().map(|h| h.len()).sum::<usize>()
    }

    fn camp(&self, side: Side) -> &Camp {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    fn camp_mut(&mut self, side: Side) -> &mut Camp {
        match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai,
        }
    }

    fn cards_played(&self) -> bool {
        self.player.has_played() && self.ai.has_played()
    }

    fn anyone_out_of_cards(&self) -> bool {
        self.player.deck.is_empty() || self.ai.deck.is_empty()
    }

    // === Messages ===

    fn show_message(&mut self, text: &str) {
        let m = self.settings.message;
        self.overlay.show_label(MESSAGE, text, m.pos, m.text_color);
    }

    fn show_restart_button(&mut self) {
        self.overlay
            .show_button(RESTART, self.settings.restart_button.rect(0), "Restart", Action::Restart);
    }

    // === Steps ===

    fn launch(&mut self, movable: Movable, destination: Point, step: Step) {
        let pace = Pace::Speed(self.card.move_speed);
        if let Launch::Finished(done) = self.scheduler.animate(movable, destination, pace, &Motion::Linear, step) {
            self.on_step_complete(done);
        }
    }

    fn on_step_complete(&mut self, done: Completed<Step>) {
        let step = done.tag;
        let cards = done.into_cards();
        match step {
            Step::Stage { side, face_down } => {
                let camp = self.camp_mut(side);
                for mut card in cards {
                    card.set_face_down(face_down);
                    camp.stage.add(card, true);
                    if face_down {
                        camp.antes += 1;
                    }
                }
                camp.locked = false;
            }
            Step::Collect { winner } => {
                let deck = &mut self.camp_mut(winner).deck;
                for mut card in cards {
                    card.set_face_down(true);
                    deck.add(card, false);
                }
                self.awaiting_transfers = self.awaiting_transfers.saturating_sub(1);
                if self.awaiting_transfers == 0 {
                    debug!(winner = %winner.player_id(), "round collected");
                    self.phase = Phase::NextCard;
                }
            }
            Step::Pulse => {}
        }
    }

    // === Playing cards ===

    /// Move the top of `side`'s deck to its stage.
    fn stage_card(&mut self, side: Side, face_down: bool) {
        let camp = self.camp_mut(side);
        if camp.locked {
            return;
        }
        let Some(card) = camp.deck.pop_top() else {
            camp.locked = false;
            return;
        };
        camp.locked = true;
        let destination = camp.stage.next_card_pos();
        self.launch(card.into(), destination, Step::Stage { side, face_down });
    }

    fn on_player_deck_clicked(&mut self) {
        if self.player.deck.is_empty() {
            return;
        }
        if self.phase == Phase::War && self.player.antes < WAR_ANTE {
            self.stage_card(Side::Player, true);
        } else if matches!(self.phase, Phase::NextCard | Phase::War) && !self.player.has_played() {
            self.stage_card(Side::Player, false);
        }
    }

    fn ai_execute(&mut self) {
        if self.ai.locked {
            return;
        }
        let face_down = if self.phase == Phase::War && self.ai.antes < WAR_ANTE {
            true
        } else if matches!(self.phase, Phase::NextCard | Phase::War) && !self.ai.has_played() {
            false
        } else {
            return;
        };

        self.ai.locked = true;
        let behavior = self.settings.ai_behavior;
        let mut delay = self
            .ai_rng
            .gen_range_inclusive(behavior.min_delay_ms, behavior.max_delay_ms) as f64;
        if self.phase == Phase::War {
            delay /= 2.0;
        }
        self.timers.schedule(delay, Wake::AiPlay { face_down });
    }

    fn on_wake(&mut self, wake: Wake) {
        match wake {
            Wake::AiPlay { face_down } => {
                // The lock was taken when the play was scheduled.
                self.ai.locked = false;
                self.stage_card(Side::Ai, face_down);
            }
            Wake::Award(winner) => self.send_staged_cards_to(winner),
        }
    }

    // === Rounds ===

    fn execute_game(&mut self) {
        match self.phase {
            Phase::NextCard => {
                if self.cards_played() {
                    self.evaluate_match();
                } else if self.anyone_out_of_cards() {
                    self.end_game();
                }
            }
            Phase::War => {
                if self.cards_played() && self.player.antes >= WAR_ANTE && self.ai.antes >= WAR_ANTE {
                    self.stop_war();
                    self.evaluate_match();
                } else if self.anyone_out_of_cards() {
                    self.stop_war();
                    self.end_game();
                }
            }
            Phase::Paused | Phase::Evaluate | Phase::GameOver(_) => {}
        }
    }

    fn evaluate_match(&mut self) {
        self.phase = Phase::Evaluate;
        let (Some(mine), Some(theirs)) = (self.player.stage.top_face(), self.ai.stage.top_face()) else {
            return;
        };
        debug!(player = %mine, ai = %theirs, "evaluating");
        if mine.rank == theirs.rank {
            self.start_war();
            return;
        }
        let winner = if mine.rank > theirs.rank { Side::Player } else { Side::Ai };
        self.timers.schedule(self.settings.evaluate_delay_ms, Wake::Award(winner));
    }

    fn start_war(&mut self) {
        info!("war");
        self.phase = Phase::War;
        self.player.antes = 0;
        self.ai.antes = 0;
        self.stop_pulse();
        let plotter = self.settings.war_background.plotter();
        self.pulse = Some(self.scheduler.pulse(plotter, Step::Pulse));
        self.show_message("WAR!!!");
    }

    fn stop_war(&mut self) {
        self.overlay.hide(MESSAGE);
        self.stop_pulse();
    }

    fn stop_pulse(&mut self) {
        if let Some(id) = self.pulse.take() {
            self.scheduler.finish(id);
        }
    }

    fn send_staged_cards_to(&mut self, winner: Side) {
        self.awaiting_transfers = 2;
        let destination = self.camp(winner).deck.next_card_pos();
        for side in [Side::Player, Side::Ai] {
            let cards = self.camp_mut(side).stage.take_all();
            self.launch(Movable::Cards(cards), destination, Step::Collect { winner });
        }
    }

    fn end_game(&mut self) {
        let winner = if self.player.deck.is_empty() { Side::Ai } else { Side::Player };
        let outcome = Outcome::Winner(winner.player_id());
        info!(?outcome, "game over");
        self.phase = Phase::GameOver(outcome);
        self.show_message(match winner {
            Side::Player => "You win!",
            Side::Ai => "Opponent wins!",
        });
    }

    fn reset(&mut self) {
        self.phase = Phase::NextCard;
        self.player.locked = false;
        self.ai.locked = false;
        self.player.antes = 0;
        self.ai.antes = 0;
        self.awaiting_transfers = 0;
        self.pulse = None;
        self.overlay.hide(MESSAGE);
    }
}

impl GameController for War {
    type Action = Action;

    fn start(&mut self) {
        self.start_deck.shuffle(&mut self.shuffle_rng);
        while let Some(card) = self.start_deck.pop_top() {
            self.ai.deck.add(card.with_face_down(true), true);
            if let Some(card) = self.start_deck.pop_top() {
                self.player.deck.add(card.with_face_down(true), true);
            }
        }
        info!(player = self.player.deck.len(), ai = self.ai.deck.len(), "dealt");
        self.reset();
        self.show_restart_button();
    }

    fn restart(&mut self) {
        info!("restarting");
        self.timers.invalidate();
        for done in self.scheduler.finish_all() {
            for card in done.into_cards() {
                self.start_deck.add(card.with_face_down(true), true);
            }
        }
        for camp in [&mut self.player, &mut self.ai] {
            camp.deck.move_all_to(&mut self.start_deck, true);
            camp.stage.move_all_to(&mut self.start_deck, true);
        }
        self.start();
    }

    fn on_mouse_event(&mut self, pos: Point, down: bool, _double_click: bool) {
        if !down || self.click_button(pos) {
            return;
        }
        if self.player.deck.is_clicked(pos) {
            self.on_player_deck_clicked();
        }
    }

    fn on_tick(&mut self, dt_ms: f64) {
        for done in self.scheduler.tick(dt_ms) {
            self.on_step_complete(done);
        }
        for wake in self.timers.advance(dt_ms) {
            self.on_wake(wake);
        }
        self.execute_game();
        self.ai_execute();
    }

    fn on_button(&mut self, action: Action) {
        match action {
            Action::Restart => self.restart(),
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill(self.background_color());
        for camp in [&self.player, &self.ai] {
            draw_collection_or_slot(surface, &camp.deck);
            draw_collection(surface, &camp.stage);
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
