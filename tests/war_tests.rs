//! War played through the controller interface.

mod common;

use card_table::cards::{CardFace, Rank, Suit};
use card_table::core::{PlayerId, Point, Settings};
use card_table::games::war::{Phase, Side, War};
use card_table::games::Outcome;
use card_table::host::GameController;

fn faces(suit: Suit, ranks: &[u8]) -> Vec<CardFace> {
    ranks.iter().map(|&r| CardFace::new(suit, Rank::new(r))).collect()
}

/// Click the player's deck whenever the player is free to act, then tick.
fn play_until(game: &mut War, limit: usize, done: impl Fn(&War) -> bool) -> bool {
    let deck_click = game.deck(Side::Player).pos() + Point::new(5.0, 5.0);
    for _ in 0..limit {
        if done(game) {
            return true;
        }
        if !game.is_locked(Side::Player) {
            game.on_mouse_event(deck_click, true, false);
        }
        game.on_tick(common::LONG_TICK_MS);
    }
    done(game)
}

#[test]
fn test_tie_starts_war_and_winner_takes_all() {
    common::init_logging();
    // Bottom to top: both lead with a king.
    let player = faces(Suit::Spades, &[6, 5, 14, 4, 3, 2, 13]);
    let ai = faces(Suit::Hearts, &[6, 5, 7, 4, 3, 2, 13]);
    let mut game = War::with_decks(&Settings::default(), 17, &player, &ai);

    assert!(play_until(&mut game, 50, |g| g.phase() == Phase::War));
    assert_eq!(game.overlay().label("screen_message"), Some("WAR!!!"));
    assert_eq!(game.antes(Side::Player), 0);

    assert!(play_until(&mut game, 200, |g| g.deck(Side::Player).len() == 12
        && g.phase() == Phase::NextCard));
    assert_eq!(game.deck(Side::Ai).faces(), faces(Suit::Hearts, &[6, 5]));
    assert!(game.stage(Side::Player).is_empty());
    assert!(game.stage(Side::Ai).is_empty());
    assert_eq!(game.overlay().label("screen_message"), None);
    assert_eq!(game.card_count(), 14);
}

#[test]
fn test_war_antes_are_face_down() {
    common::init_logging();
    let player = faces(Suit::Spades, &[6, 5, 14, 4, 3, 2, 13]);
    let ai = faces(Suit::Hearts, &[6, 5, 7, 4, 3, 2, 13]);
    let mut game = War::with_decks(&Settings::default(), 3, &player, &ai);

    assert!(play_until(&mut game, 200, |g| g.antes(Side::Player) == 3 && g.antes(Side::Ai) == 3));
    for side in [Side::Player, Side::Ai] {
        let stage = game.stage(side).cards();
        assert!(!stage[0].is_face_down());
        assert!(stage[1..4].iter().all(|c| c.is_face_down()));
    }
}

#[test]
fn test_running_out_loses() {
    common::init_logging();
    let player = faces(Suit::Spades, &[2]);
    let ai = faces(Suit::Hearts, &[3, 4]);
    let mut game = War::with_decks(&Settings::default(), 5, &player, &ai);

    assert!(play_until(&mut game, 50, |g| matches!(g.phase(), Phase::GameOver(_))));
    assert_eq!(game.phase(), Phase::GameOver(Outcome::Winner(PlayerId::new(1))));
    assert_eq!(game.overlay().label("screen_message"), Some("Opponent wins!"));
    // The game ends as soon as a deck is empty, before the reply is staged.
    assert_eq!(game.deck(Side::Ai).len(), 2);
    assert_eq!(game.stage(Side::Player).len(), 1);
}

#[test]
fn test_full_game_conserves_cards() {
    common::init_logging();
    let mut game = War::new(&Settings::default(), 99);
    game.start();
    let deck_click = game.deck(Side::Player).pos() + Point::new(5.0, 5.0);
    for _ in 0..2000 {
        if matches!(game.phase(), Phase::GameOver(_)) {
            break;
        }
        if !game.is_locked(Side::Player) {
            game.on_mouse_event(deck_click, true, false);
        }
        game.on_tick(common::LONG_TICK_MS);
        assert_eq!(game.card_count(), 52);
    }
}
