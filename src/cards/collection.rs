//! Ordered card collections.
//!
//! One concrete [`CardCollection`] type serves every place cards can sit: decks,
//! hands, discard piles, Klondike piles and foundations, the cards under the
//! mouse, and the temporary holders used while cards fly across the table.
//! What differs between those places is injected as plain policy values:
//!
//! - [`GrabPolicy`]: which cards a pointer may pick up
//! - [`DropRule`]: which card may be dropped on top
//! - [`Layout`]: how card positions follow the collection's anchor
//!
//! Index order is stack order: index 0 is the bottom card, the last index is
//! the top card.

use smallvec::SmallVec;
use tracing::debug;

use super::card::{Card, CardFace, Rank};
use crate::core::{GameRng, Point, Rect, Size};

/// Which card(s) a pointer interaction may remove from a collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GrabPolicy {
    /// Nothing can be grabbed.
    #[default]
    None,
    /// Only the top card.
    TopOnly,
    /// The clicked card together with every card above it, as long as the
    /// clicked card and everything above it is face-up.
    Run,
    /// Any single card that is hit, wherever it sits in the stack.
    AnySingle,
}

/// Legality check for dropping a card on top of a collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropRule {
    #[default]
    Never,
    Anything,
    /// Klondike foundation: ace on empty, then same suit ascending.
    Foundation,
    /// Klondike tableau pile: king on empty, then alternating color descending.
    Tableau,
}

impl DropRule {
    /// Whether `card` may be placed on a collection whose top card is `top`.
    #[must_use]
    pub fn accepts(self, top: Option<CardFace>, card: CardFace) -> bool {
        match self {
            DropRule::Never => false,
            DropRule::Anything => true,
            DropRule::Foundation => match top {
                None => card.rank == Rank::ACE,
                Some(top) if top.rank == Rank::ACE => {
                    card.suit == top.suit && card.rank == Rank::TWO
                }
                Some(top) => card.suit == top.suit && card.rank.value() == top.rank.value() + 1,
            },
            DropRule::Tableau => match top {
                None => card.rank == Rank::KING,
                Some(top) if top.rank == Rank::ACE => false,
                Some(top) => {
                    card.is_red() != top.is_red() && card.rank.value() + 1 == top.rank.value()
                }
            },
        }
    }
}

/// How card positions follow the collection's anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// Card `i` sits at `pos + i * offset`.
    #[default]
    Fanned,
    /// Cards keep their positions relative to each other and move together
    /// when the anchor moves.
    Static,
}

/// Invoked with the last card of a collection just before it is removed.
pub type EmptyCallback = Box<dyn FnMut(&Card)>;

/// Cards grabbed in one pointer interaction, bottom to top.
pub type Grabbed = SmallVec<[Card; 4]>;

/// An ordered stack or fan of cards.
pub struct CardCollection {
    cards: Vec<Card>,
    pos: Point,
    offset: Point,
    card_size: Size,
    grab_policy: GrabPolicy,
    drop_rule: DropRule,
    layout: Layout,
    on_empty: Option<EmptyCallback>,
}

impl std::fmt::Debug for CardCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardCollection")
            .field("cards", &self.cards)
            .field("pos", &self.pos)
            .field("offset", &self.offset)
            .field("grab_policy", &self.grab_policy)
            .field("drop_rule", &self.drop_rule)
            .field("layout", &self.layout)
            .field("on_empty", &self.on_empty.is_some())
            .finish()
    }
}

impl CardCollection {
    /// Create an empty fanned collection that accepts no grabs or drops.
    #[must_use]
    pub fn new(pos: Point, offset: Point, card_size: Size) -> Self {
        Self {
            cards: Vec::new(),
            pos,
            offset,
            card_size,
            grab_policy: GrabPolicy::None,
            drop_rule: DropRule::Never,
            layout: Layout::Fanned,
            on_empty: None,
        }
    }

    /// Temporary holder for cards in flight. The cards keep their current
    /// screen positions and the anchor starts at the first card.
    #[must_use]
    pub fn carrying(cards: Vec<Card>, card_size: Size) -> Self {
        let pos = cards.first().map(Card::pos).unwrap_or_default();
        let mut holder = Self::new(pos, Point::default(), card_size).with_layout(Layout::Static);
        holder.cards = cards;
        holder
    }

    /// Builder: set grab policy.
    #[must_use]
    pub fn with_grab_policy(mut self, policy: GrabPolicy) -> Self {
        self.grab_policy = policy;
        self
    }

    /// Builder: set drop rule.
    #[must_use]
    pub fn with_drop_rule(mut self, rule: DropRule) -> Self {
        self.drop_rule = rule;
        self
    }

    /// Builder: set layout mode.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Builder: set the became-empty callback.
    #[must_use]
    pub fn with_on_empty(mut self, callback: impl FnMut(&Card) + 'static) -> Self {
        self.on_empty = Some(Box::new(callback));
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    #[must_use]
    pub fn top_face(&self) -> Option<CardFace> {
        self.cards.last().map(Card::face)
    }

    /// Faces of all cards, bottom to top.
    #[must_use]
    pub fn faces(&self) -> Vec<CardFace> {
        self.cards.iter().map(Card::face).collect()
    }

    #[must_use]
    pub fn contains(&self, face: CardFace) -> bool {
        self.cards.iter().any(|c| c.face() == face)
    }

    #[must_use]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    #[must_use]
    pub fn card_size(&self) -> Size {
        self.card_size
    }

    #[must_use]
    pub fn grab_policy(&self) -> GrabPolicy {
        self.grab_policy
    }

    #[must_use]
    pub fn drop_rule(&self) -> DropRule {
        self.drop_rule
    }

    /// Rectangle of the empty slot at the anchor.
    #[must_use]
    pub fn slot_rect(&self) -> Rect {
        Rect::new(self.pos, self.card_size)
    }

    /// Position of the top card, or the anchor when empty.
    #[must_use]
    pub fn top_card_pos(&self) -> Point {
        self.cards.last().map_or(self.pos, Card::pos)
    }

    /// Where the next card added on top will land.
    #[must_use]
    pub fn next_card_pos(&self) -> Point {
        match self.layout {
            Layout::Fanned => self.slot_pos(self.cards.len()),
            Layout::Static if self.cards.is_empty() => self.pos,
            Layout::Static => self.top_card_pos() + self.offset,
        }
    }

    fn slot_pos(&self, index: usize) -> Point {
        let i = index as f64;
        Point::new(self.pos.x + i * self.offset.x, self.pos.y + i * self.offset.y)
    }

    // === Adding and removing ===

    /// Add a card on top or at the bottom.
    pub fn add(&mut self, mut card: Card, on_top: bool) {
        if on_top {
            if self.layout == Layout::Fanned {
                card.set_pos(self.slot_pos(self.cards.len()));
            }
            self.cards.push(card);
        } else {
            self.cards.insert(0, card);
            self.update_position();
        }
    }

    /// Add several cards on top, keeping their order.
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            self.add(card, true);
        }
    }

    pub fn pop_top(&mut self) -> Option<Card> {
        let last = self.cards.len().checked_sub(1)?;
        self.pop_at(last)
    }

    pub fn pop_bottom(&mut self) -> Option<Card> {
        self.pop_at(0)
    }

    /// Remove the card at `index`. Fires the became-empty callback first when
    /// this is the last card.
    pub fn pop_at(&mut self, index: usize) -> Option<Card> {
        if index >= self.cards.len() {
            return None;
        }
        if self.cards.len() == 1 {
            self.notify_empty();
        }
        let card = self.cards.remove(index);
        self.update_position();
        Some(card)
    }

    /// Remove the card with the given face, wherever it sits.
    pub fn remove(&mut self, face: CardFace) -> Option<Card> {
        let index = self.index_of(face)?;
        self.pop_at(index)
    }

    /// Take every card out, bottom to top.
    pub fn take_all(&mut self) -> Vec<Card> {
        if !self.cards.is_empty() {
            self.notify_empty();
        }
        std::mem::take(&mut self.cards)
    }

    /// Move every card onto `other`, keeping their order and setting each
    /// card's orientation to `face_down`.
    pub fn move_all_to(&mut self, other: &mut CardCollection, face_down: bool) {
        for mut card in self.take_all() {
            card.set_face_down(face_down);
            other.add(card, true);
        }
    }

    /// Turn the whole stack over onto `other`: the top card ends up at the
    /// bottom of what was moved.
    pub fn turn_over_onto(&mut self, other: &mut CardCollection, face_down: bool) {
        let mut cards = self.take_all();
        cards.reverse();
        for mut card in cards {
            card.set_face_down(face_down);
            other.add(card, true);
        }
    }

    fn notify_empty(&mut self) {
        if let (Some(callback), Some(last)) = (self.on_empty.as_mut(), self.cards.first()) {
            callback(last);
        }
    }

    // === Grabbing and hit testing ===

    fn index_of(&self, face: CardFace) -> Option<usize> {
        self.cards.iter().position(|c| c.face() == face)
    }

    /// Try to grab the card with the given face under the grab policy.
    ///
    /// Returns `None` when the card is not here or the policy forbids it.
    pub fn try_grab(&mut self, face: CardFace) -> Option<Grabbed> {
        let index = self.index_of(face)?;
        let allowed = match self.grab_policy {
            GrabPolicy::None => false,
            GrabPolicy::TopOnly => index + 1 == self.cards.len(),
            GrabPolicy::Run => self.cards[index..].iter().all(|c| !c.is_face_down()),
            GrabPolicy::AnySingle => true,
        };
        if !allowed {
            debug!(card = %face, policy = ?self.grab_policy, "grab refused");
            return None;
        }

        let mut grabbed = Grabbed::new();
        if self.grab_policy == GrabPolicy::Run {
            if index == 0 {
                self.notify_empty();
            }
            grabbed.extend(self.cards.drain(index..));
            self.update_position();
        } else {
            grabbed.extend(self.pop_at(index));
        }
        Some(grabbed)
    }

    /// Grab whatever the pointer is on. Also returns the pointer's offset from
    /// the grabbed card's top-left corner.
    pub fn try_grab_at(&mut self, pos: Point) -> Option<(Grabbed, Point)> {
        let card = self.card_at(pos)?;
        let grab_offset = pos - card.pos();
        let face = card.face();
        self.try_grab(face).map(|grabbed| (grabbed, grab_offset))
    }

    /// The topmost card under the pointer.
    #[must_use]
    pub fn card_at(&self, pos: Point) -> Option<&Card> {
        self.cards
            .iter()
            .rev()
            .find(|c| c.rect(self.card_size).contains(pos))
    }

    /// Whether the pointer is on any card, or on the empty slot.
    #[must_use]
    pub fn is_clicked(&self, pos: Point) -> bool {
        if self.cards.is_empty() {
            self.slot_rect().contains(pos)
        } else {
            self.card_at(pos).is_some()
        }
    }

    #[must_use]
    pub fn is_top_card_clicked(&self, pos: Point) -> bool {
        self.cards
            .last()
            .is_some_and(|c| c.rect(self.card_size).contains(pos))
    }

    /// Whether `rect` overlaps this collection. Collections that only give up
    /// their top card only collide through it.
    #[must_use]
    pub fn check_collide(&self, rect: &Rect) -> bool {
        match (self.cards.last(), self.grab_policy) {
            (None, _) => self.slot_rect().intersects(rect),
            (Some(top), GrabPolicy::TopOnly) => top.rect(self.card_size).intersects(rect),
            (Some(_), _) => self
                .cards
                .iter()
                .any(|c| c.rect(self.card_size).intersects(rect)),
        }
    }

    /// Whether `card` may be dropped on top under the drop rule.
    #[must_use]
    pub fn can_drop(&self, card: CardFace) -> bool {
        self.drop_rule.accepts(self.top_face(), card)
    }

    // === Ordering and orientation ===

    /// Sort by a key function, then lay the cards out again.
    pub fn sort_by_key<K: Ord>(&mut self, key: impl FnMut(&Card) -> K) {
        self.cards.sort_by_key(key);
        self.update_position();
    }

    /// Uniformly permute the cards, then lay them out again.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
        self.update_position();
    }

    /// Turn every card over.
    pub fn flip_all(&mut self) {
        for card in &mut self.cards {
            card.flip();
        }
    }

    /// Turn the top card face-up if it is face-down.
    pub fn open_top_card(&mut self) {
        if let Some(top) = self.cards.last_mut() {
            if top.is_face_down() {
                top.flip();
            }
        }
    }

    // === Placement ===

    /// Move the anchor and every card with it.
    pub fn set_pos(&mut self, pos: Point) {
        match self.layout {
            Layout::Fanned => {
                self.pos = pos;
                self.update_position();
            }
            Layout::Static => {
                let delta = pos - self.pos;
                self.pos = pos;
                for card in &mut self.cards {
                    card.set_pos(card.pos() + delta);
                }
            }
        }
    }

    /// Recompute card positions from the anchor. Static collections keep
    /// the positions their cards already have.
    pub fn update_position(&mut self) {
        if self.layout == Layout::Static {
            return;
        }
        for i in 0..self.cards.len() {
            let pos = self.slot_pos(i);
            self.cards[i].set_pos(pos);
        }
    }
}
