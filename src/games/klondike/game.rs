//! The Klondike controller.
//!
//! There are no turns and no computer player. Pointer-down grabs cards into a
//! holder that follows the pointer; pointer-up drops them on the first
//! collection that both overlaps the lead card and accepts it, or floats them
//! back to where they came from. Double-clicks arrive with pointer-up and send
//! a top card to the first foundation that takes it.

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use super::settings::KlondikeSettings;
use crate::animation::{Completed, Launch, Motion, Movable, Pace, Scheduler};
use crate::cards::{Card, CardCollection, DeckKind, DropRule, GrabPolicy, Rank};
use crate::core::{CardSettings, Color, GameRng, Point, Settings};
use crate::host::{draw_collection, draw_collection_or_slot, GameController, Overlay, Surface};

pub const PILE_COUNT: usize = 7;
pub const FOUNDATION_COUNT: usize = 4;
/// Cards turned over per deck click.
const DRAW_COUNT: usize = 3;

const RESTART: &str = "restart";
const WIN_LABEL: &str = "win_label1";
const TIME_LABEL: &str = "win_label2";

/// A visible collection on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Deck,
    /// Face-up cards turned over from the deck.
    Stack,
    Pile(usize),
    Foundation(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// Released cards floating to `target`. `dropped` is false when they
    /// are going back to `owner`.
    Drop { target: Slot, owner: Slot, dropped: bool },
    ToFoundation { from: Slot, foundation: usize },
}

impl Step {
    fn target(self) -> Slot {
        match self {
            Step::Drop { target, .. } => target,
            Step::ToFoundation { foundation, .. } => Slot::Foundation(foundation),
        }
    }
}

pub struct Klondike {
    settings: KlondikeSettings,
    card: CardSettings,
    background: Color,
    rng: GameRng,

    deck: CardCollection,
    stack: CardCollection,
    /// Stack cards already cycled past. Never drawn.
    discard: CardCollection,
    piles: Vec<CardCollection>,
    foundations: Vec<CardCollection>,
    /// Cards under the pointer while the button is held.
    grabbed: CardCollection,
    grab_offset: Point,
    owner: Option<Slot>,

    scheduler: Scheduler<Step>,
    /// Animations still flying to each slot. A slot with cards on the way
    /// takes no drops and gives up no cards until they land.
    incoming: FxHashMap<Slot, usize>,
    overlay: Overlay<Action>,

    clock_ms: f64,
    started_at_ms: f64,
    won: bool,
}

impl std::fmt::Debug for Klondike {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Klondike")
            .field("deck", &self.deck.len())
            .field("stack", &self.stack.len())
            .field("owner", &self.owner)
            .field("won", &self.won)
            .finish_non_exhaustive()
    }
}

impl Klondike {
    #[must_use]
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let k = KlondikeSettings::from_settings(settings);
        let card = settings.card.clone();
        let size = card.size;

        let deck = CardCollection::deck(DeckKind::Full, k.deck.position, k.deck.offset, size);
        let stack = CardCollection::new(k.stack_position(size), k.stack.inner_offset, size)
            .with_grab_policy(GrabPolicy::TopOnly);
        let discard = CardCollection::new(k.deck.position, Point::default(), size);
        let piles = (0..PILE_COUNT)
            .map(|i| {
                CardCollection::new(k.pile.position_of(i), k.pile.inner_offset, size)
                    .with_grab_policy(GrabPolicy::Run)
                    .with_drop_rule(DropRule::Tableau)
            })
            .collect();
        let foundations = (0..FOUNDATION_COUNT)
            .map(|i| {
                CardCollection::new(k.foundation.position_of(i), k.foundation.inner_offset, size)
                    .with_drop_rule(DropRule::Foundation)
            })
            .collect();
        let grabbed = CardCollection::new(Point::default(), k.pile.inner_offset, size);

        Self {
            rng: GameRng::new(seed).for_context("shuffle"),
            background: settings.window.background_color,
            deck,
            stack,
            discard,
            piles,
            foundations,
            grabbed,
            grab_offset: Point::default(),
            owner: None,
            scheduler: Scheduler::new(size),
            incoming: FxHashMap::default(),
            overlay: Overlay::new(),
            clock_ms: 0.0,
            started_at_ms: 0.0,
            won: false,
            settings: k,
            card,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn deck(&self) -> &CardCollection {
        &self.deck
    }

    #[must_use]
    pub fn stack(&self) -> &CardCollection {
        &self.stack
    }

    /// Cards cycled out of the stack, waiting to be turned over.
    #[must_use]
    pub fn discard(&self) -> &CardCollection {
        &self.discard
    }

    #[must_use]
    pub fn pile(&self, index: usize) -> Option<&CardCollection> {
        self.piles.get(index)
    }

    #[must_use]
    pub fn foundation(&self, index: usize) -> Option<&CardCollection> {
        self.foundations.get(index)
    }

    #[must_use]
    pub fn grabbed(&self) -> &CardCollection {
        &self.grabbed
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Cards anywhere on the table, including those in flight.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.all_slots()
            .filter_map(|s| self.slot(s))
            .map(CardCollection::len)
            .sum::<usize>()
            + self.discard.len()
            + self.grabbed.len()
            + self.scheduler.in_flight().iter().map(|h| h.len()).sum::<usize>()
    }

    /// Direct access to a collection, for setting up positions.
    pub fn slot_mut(&mut self, slot: Slot) -> Option<&mut CardCollection> {
        match slot {
            Slot::Deck => Some(&mut self.deck),
            Slot::Stack => Some(&mut self.stack),
            Slot::Pile(i) => self.piles.get_mut(i),
            Slot::Foundation(i) => self.foundations.get_mut(i),
        }
    }

    #[must_use]
    pub fn slot(&self, slot: Slot) -> Option<&CardCollection> {
        match slot {
            Slot::Deck => Some(&self.deck),
            Slot::Stack => Some(&self.stack),
            Slot::Pile(i) => self.piles.get(i),
            Slot::Foundation(i) => self.foundations.get(i),
        }
    }

    fn is_awaiting(&self, slot: Slot) -> bool {
        self.incoming.get(&slot).is_some_and(|&n| n > 0)
    }

    /// Every slot, in drawing order.
    fn all_slots(&self) -> impl Iterator<Item = Slot> {
        [Slot::Deck, Slot::Stack]
            .into_iter()
            .chain((0..PILE_COUNT).map(Slot::Pile))
            .chain((0..FOUNDATION_COUNT).map(Slot::Foundation))
    }

    // === Deck ===

    fn on_deck_click(&mut self) {
        while let Some(mut card) = self.stack.pop_bottom() {
            card.set_face_down(true);
            self.discard.add(card, true);
        }

        if self.deck.is_empty() {
            if !self.discard.is_empty() {
                debug!(cards = self.discard.len(), "turning the deck over");
                self.discard.turn_over_onto(&mut self.deck, true);
            }
            return;
        }

        for _ in 0..DRAW_COUNT {
            let Some(mut card) = self.deck.pop_top() else { break };
            card.set_face_down(false);
            self.stack.add(card, true);
        }
    }

    // === Dragging ===

    fn grab_at(&mut self, pos: Point) {
        if !self.grabbed.is_empty() {
            return;
        }
        let slots: Vec<Slot> = self.all_slots().collect();
        for slot in slots {
            if self.is_awaiting(slot) {
                continue;
            }
            let Some((cards, offset)) = self.slot_mut(slot).and_then(|c| c.try_grab_at(pos)) else {
                continue;
            };
            debug!(?slot, cards = cards.len(), "grabbed");
            self.grab_offset = offset;
            self.grabbed.extend(cards);
            self.grabbed.set_pos(pos - offset);
            self.owner = Some(slot);
            return;
        }
    }

    fn release(&mut self) {
        let Some(owner) = self.owner.take() else { return };
        let Some(lead) = self.grabbed.cards().first() else { return };
        let lead_rect = lead.rect(self.card.size);
        let lead_face = lead.face();

        let accepting = self.all_slots().find(|&s| {
            !self.is_awaiting(s)
                && self
                    .slot(s)
                    .is_some_and(|c| c.check_collide(&lead_rect) && c.can_drop(lead_face))
        });
        let dropped = accepting.is_some();
        let target = accepting.unwrap_or(owner);
        let Some(destination) = self.slot(target).map(CardCollection::next_card_pos) else {
            return;
        };

        let step = Step::Drop { target, owner, dropped };
        let cards = self.grabbed.take_all();
        if self.grabbed.pos().distance_to(destination) > self.settings.drop_animation_distance {
            self.launch(Movable::Cards(cards), destination, step);
        } else {
            self.finish(step, cards);
        }
    }

    fn on_double_click(&mut self, pos: Point) {
        let sources = (0..PILE_COUNT).map(Slot::Pile).chain([Slot::Stack]);
        for from in sources {
            let Some(holder) = self.slot(from) else { continue };
            if self.is_awaiting(from) || !holder.is_top_card_clicked(pos) {
                continue;
            }
            let Some(top) = holder.top().filter(|c| !c.is_face_down()).map(Card::face) else {
                return;
            };
            let Some(foundation) = (0..FOUNDATION_COUNT).find(|&i| {
                !self.is_awaiting(Slot::Foundation(i)) && self.foundations[i].can_drop(top)
            }) else {
                return;
            };
            let Some(card) = self.slot_mut(from).and_then(CardCollection::pop_top) else {
                return;
            };
            debug!(card = %top, foundation, "sending to foundation");
            let destination = self.foundations[foundation].next_card_pos();
            self.launch(card.into(), destination, Step::ToFoundation { from, foundation });
            return;
        }
    }

    // === Steps ===

    fn launch(&mut self, movable: Movable, destination: Point, step: Step) {
        let pace = Pace::Speed(self.card.move_speed);
        match self.scheduler.animate(movable, destination, pace, &Motion::Linear, step) {
            Launch::Running(_) => *self.incoming.entry(step.target()).or_default() += 1,
            Launch::Finished(done) => self.finish(done.tag, done.into_cards()),
        }
    }

    fn on_step_complete(&mut self, done: Completed<Step>) {
        let step = done.tag;
        if let Some(n) = self.incoming.get_mut(&step.target()) {
            *n = n.saturating_sub(1);
        }
        self.finish(step, done.into_cards());
    }

    fn finish(&mut self, step: Step, cards: Vec<Card>) {
        match step {
            Step::Drop { target, owner, dropped } => {
                if let Some(holder) = self.slot_mut(target) {
                    holder.extend(cards);
                }
                if matches!(target, Slot::Foundation(_)) {
                    self.check_win();
                }
                if dropped && matches!(owner, Slot::Pile(_)) {
                    if let Some(pile) = self.slot_mut(owner) {
                        pile.open_top_card();
                    }
                }
            }
            Step::ToFoundation { from, foundation } => {
                if let Some(holder) = self.foundations.get_mut(foundation) {
                    holder.extend(cards);
                }
                self.check_win();
                if let Slot::Pile(i) = from {
                    if let Some(pile) = self.piles.get_mut(i) {
                        pile.open_top_card();
                    }
                }
            }
        }
    }

    // === Winning ===

    fn check_win(&mut self) {
        if self.won {
            return;
        }
        let complete = self
            .foundations
            .iter()
            .all(|f| f.top().is_some_and(|c| c.rank() == Rank::KING));
        if complete {
            self.show_win();
        }
    }

    fn show_win(&mut self) {
        self.won = true;
        let total_seconds = ((self.clock_ms - self.started_at_ms) / 1000.0).max(0.0) as u64;
        info!(seconds = total_seconds, "solitaire won");

        let pos = self.settings.win_label;
        let color = self.settings.text_color;
        self.overlay.show_label(WIN_LABEL, "You won, congrats!", pos, color);
        self.overlay.show_label(
            TIME_LABEL,
            format!("Game time: {}", format_game_time(total_seconds)),
            Point::new(pos.x, pos.y + self.settings.win_line_height),
            color,
        );
    }
}

/// `m:ss`.
fn format_game_time(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

impl GameController for Klondike {
    type Action = Action;

    fn start(&mut self) {
        self.deck.shuffle(&mut self.rng);
        for (i, pile) in self.piles.iter_mut().enumerate() {
            for j in 0..=i {
                let Some(mut card) = self.deck.pop_top() else { break };
                card.set_face_down(j != i);
                pile.add(card, true);
            }
        }
        self.started_at_ms = self.clock_ms;
        self.won = false;
        self.overlay
            .show_button(RESTART, self.settings.restart_button.rect(0), "Restart", Action::Restart);
        info!(deck = self.deck.len(), "dealt");
    }

    fn restart(&mut self) {
        info!("restarting");
        for done in self.scheduler.finish_all() {
            for card in done.into_cards() {
                self.deck.add(card.with_face_down(true), true);
            }
        }
        self.incoming.clear();
        self.owner = None;
        self.grabbed.move_all_to(&mut self.deck, true);
        self.discard.move_all_to(&mut self.deck, true);
        self.stack.move_all_to(&mut self.deck, true);
        for holder in self.foundations.iter_mut().chain(self.piles.iter_mut()) {
            holder.move_all_to(&mut self.deck, true);
        }
        self.overlay.hide(WIN_LABEL);
        self.overlay.hide(TIME_LABEL);
        self.start();
    }

    fn on_mouse_event(&mut self, pos: Point, down: bool, double_click: bool) {
        if down {
            if self.click_button(pos) {
                return;
            }
            if self.deck.is_clicked(pos) {
                self.on_deck_click();
                return;
            }
            self.grab_at(pos);
        } else {
            self.release();
        }
        if double_click {
            self.on_double_click(pos);
        }
    }

    fn on_mouse_motion(&mut self, pos: Point) {
        if !self.grabbed.is_empty() {
            self.grabbed.set_pos(pos - self.grab_offset);
        }
    }

    fn on_tick(&mut self, dt_ms: f64) {
        self.clock_ms += dt_ms;
        for done in self.scheduler.tick(dt_ms) {
            self.on_step_complete(done);
        }
    }

    fn on_button(&mut self, action: Action) {
        match action {
            Action::Restart => self.restart(),
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill(self.background_color());
        draw_collection_or_slot(surface, &self.deck);
        draw_collection(surface, &self.stack);
        for holder in self.piles.iter().chain(&self.foundations) {
            draw_collection_or_slot(surface, holder);
        }
        for holder in self.scheduler.in_flight() {
            draw_collection(surface, holder);
        }
        draw_collection(surface, &self.grabbed);
    }

    fn background_color(&self) -> Color {
        self.background
    }

    fn overlay(&self) -> &Overlay<Action> {
        &self.overlay
    }
}
