use std::collections::HashMap;
use std::time::Duration;

use crate::domain::engine::{FlipOutcome, MatchGame, Resolution};
use crate::domain::rules::Difficulty;
use crate::domain::scoring::calculate_score;

/// Group card ids by symbol so tests can pick matching/mismatching pairs
/// out of the shuffled board.
fn ids_by_value(game: &MatchGame) -> HashMap<&'static str, Vec<u32>> {
    let mut map: HashMap<&'static str, Vec<u32>> = HashMap::new();
    for card in game.cards() {
        map.entry(card.value).or_default().push(card.id);
    }
    map
}

fn some_pair(game: &MatchGame) -> (u32, u32) {
    let map = ids_by_value(game);
    let ids = map.values().next().expect("non-empty deck");
    (ids[0], ids[1])
}

fn some_mismatch(game: &MatchGame) -> (u32, u32) {
    let map = ids_by_value(game);
    let mut values = map.keys();
    let a = values.next().unwrap();
    let b = values.next().unwrap();
    (map[a][0], map[b][0])
}

/// Drive a game to completion by matching every pair in symbol order.
fn complete_game(game: &mut MatchGame) {
    let map = ids_by_value(game);
    for ids in map.values() {
        assert!(matches!(game.flip(ids[0]), FlipOutcome::Flipped));
        assert!(matches!(
            game.flip(ids[1]),
            FlipOutcome::RoundClosed(Resolution::Matched)
        ));
        assert_eq!(game.resolve_pending(), Some(Resolution::Matched));
    }
}

#[test]
fn matching_pair_resolves_to_matched_without_extra_moves() {
    let mut game = MatchGame::new(Difficulty::Easy, 11);
    let (a, b) = some_pair(&game);

    assert_eq!(game.flip(a), FlipOutcome::Flipped);
    assert_eq!(game.moves(), 0, "a single flip is not a move");
    assert_eq!(game.flip(b), FlipOutcome::RoundClosed(Resolution::Matched));
    assert_eq!(game.moves(), 1);

    assert_eq!(game.resolve_pending(), Some(Resolution::Matched));
    assert_eq!(game.moves(), 1, "resolution does not count another move");
    assert_eq!(game.matched_pairs(), 1);
    let matched: Vec<_> = game.cards().iter().filter(|c| c.is_matched).collect();
    assert_eq!(matched.len(), 2);
    assert!(matched.iter().all(|c| c.id == a || c.id == b));
}

#[test]
fn mismatched_pair_flips_back_on_resolution() {
    let mut game = MatchGame::new(Difficulty::Easy, 11);
    let (a, b) = some_mismatch(&game);

    game.flip(a);
    assert_eq!(
        game.flip(b),
        FlipOutcome::RoundClosed(Resolution::Mismatched)
    );
    assert_eq!(game.resolve_pending(), Some(Resolution::Mismatched));

    assert!(game.cards().iter().all(|c| !c.is_flipped && !c.is_matched));
    assert_eq!(game.matched_pairs(), 0);
    assert_eq!(game.moves(), 1);
}

#[test]
fn clicks_are_rejected_while_resolution_is_pending() {
    let mut game = MatchGame::new(Difficulty::Easy, 3);
    let (a, b) = some_mismatch(&game);
    game.flip(a);
    game.flip(b);

    // Any further click is swallowed until resolve_pending runs.
    let other = game
        .cards()
        .iter()
        .map(|c| c.id)
        .find(|id| *id != a && *id != b)
        .unwrap();
    assert_eq!(game.flip(other), FlipOutcome::Ignored);
    assert_eq!(game.moves(), 1);

    game.resolve_pending();
    assert_eq!(game.flip(other), FlipOutcome::Flipped);
}

#[test]
fn flipping_the_same_or_a_matched_card_is_a_noop() {
    let mut game = MatchGame::new(Difficulty::Easy, 5);
    let (a, b) = some_pair(&game);

    game.flip(a);
    assert_eq!(game.flip(a), FlipOutcome::Ignored, "already face up");

    game.flip(b);
    game.resolve_pending();
    assert_eq!(game.flip(a), FlipOutcome::Ignored, "already matched");
    assert_eq!(game.flip(b), FlipOutcome::Ignored, "already matched");
}

#[test]
fn unknown_card_id_is_ignored() {
    let mut game = MatchGame::new(Difficulty::Easy, 5);
    assert_eq!(game.flip(9999), FlipOutcome::Ignored);
}

#[test]
fn resolve_without_pending_returns_none() {
    let mut game = MatchGame::new(Difficulty::Easy, 5);
    assert_eq!(game.resolve_pending(), None);
    game.flip(some_pair(&game).0);
    assert_eq!(game.resolve_pending(), None, "one flip does not close a round");
}

#[test]
fn reveal_delays_match_the_ux_constants() {
    assert_eq!(Resolution::Matched.reveal_delay(), Duration::from_millis(500));
    assert_eq!(
        Resolution::Mismatched.reveal_delay(),
        Duration::from_millis(1000)
    );
}

#[test]
fn clock_runs_only_between_first_flip_and_completion() {
    let mut game = MatchGame::new(Difficulty::Easy, 21);

    game.tick_second();
    assert_eq!(game.time_seconds(), 0, "clock waits for the first flip");

    game.flip(some_pair(&game).0);
    game.tick_second();
    game.tick_second();
    assert_eq!(game.time_seconds(), 2);
}

#[test]
fn completing_all_pairs_ends_the_game() {
    let mut game = MatchGame::new(Difficulty::Easy, 17);
    complete_game(&mut game);

    assert!(game.is_completed());
    assert_eq!(game.matched_pairs(), Difficulty::Easy.total_pairs());
    assert_eq!(game.moves(), 8, "a perfect easy game is 8 moves");

    // Terminal state: no flips, no clock.
    let first = game.cards()[0].id;
    assert_eq!(game.flip(first), FlipOutcome::Ignored);
    let t = game.time_seconds();
    game.tick_second();
    assert_eq!(game.time_seconds(), t);
}

#[test]
fn result_uses_the_shared_score_formula() {
    let mut game = MatchGame::new(Difficulty::Easy, 17);
    game.flip(some_pair(&game).0);
    for _ in 0..45 {
        game.tick_second();
    }
    let incomplete = game.result();
    assert!(!incomplete.completed);
    assert_eq!(incomplete.score, 0);

    let mut game = MatchGame::new(Difficulty::Easy, 17);
    complete_game(&mut game);
    let result = game.result();
    assert!(result.completed);
    assert_eq!(
        result.score,
        calculate_score(result.time_seconds, result.moves, Difficulty::Easy, true)
    );
    // 0 seconds elapsed, perfect moves: uncapped speed bonus
    assert_eq!(result.score, 200);
}

#[test]
fn reset_cancels_pending_resolution_and_clears_the_board() {
    let mut game = MatchGame::new(Difficulty::Easy, 29);
    let (a, b) = some_mismatch(&game);
    game.flip(a);
    game.flip(b);
    game.tick_second();
    assert!(game.pending_resolution().is_some());

    game.reset(30);

    assert!(game.pending_resolution().is_none());
    assert_eq!(game.moves(), 0);
    assert_eq!(game.time_seconds(), 0);
    assert!(!game.is_started());
    assert!(!game.is_completed());
    assert!(game.cards().iter().all(|c| !c.is_flipped && !c.is_matched));
}
