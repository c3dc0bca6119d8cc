//! Tests for the session registry.

use std::sync::Arc;
use std::thread;
use strictly_arcade::{
    Action, GameConfig, GameKind, GameState, NumberGuessConfig, RpsConfig, SessionRegistry,
    TicTacToeConfig,
};

fn rps(state: &GameState) -> &strictly_arcade::RpsState {
    match state {
        GameState::Rps(s) => s,
        other => panic!("expected rps state, got {:?}", other.kind()),
    }
}

#[test]
fn test_parallel_plays_on_one_session_lose_no_updates() {
    let registry = Arc::new(SessionRegistry::new());
    let (id, _) = registry.create(GameConfig::Rps(RpsConfig::new(10_000)));

    const THREADS: usize = 8;
    const PLAYS: usize = 50;

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let id = id.clone();
            thread::spawn(move || {
                for _ in 0..PLAYS {
                    registry
                        .mutate(&id, Action::RpsPlay { throw: "rock".into() })
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let state = registry.get(&id).unwrap();
    assert_eq!(rps(&state).rounds() as usize, THREADS * PLAYS);
}

#[test]
fn test_create_returns_inserted_state() {
    let registry = SessionRegistry::new();
    let (id, initial) = registry.create(GameConfig::Rps(RpsConfig::new(2)));
    assert_eq!(rps(&initial).rounds(), 0);

    registry
        .mutate(&id, Action::RpsPlay { throw: "rock".into() })
        .unwrap();
    assert_eq!(rps(&initial).rounds(), 0);
    assert_eq!(rps(&registry.get(&id).unwrap()).rounds(), 1);
}

#[test]
fn test_sessions_are_independent() {
    let registry = SessionRegistry::new();
    let (a, _) = registry.create(GameConfig::TicTacToe(TicTacToeConfig::two_player()));
    let (b, _) = registry.create(GameConfig::TicTacToe(TicTacToeConfig::two_player()));

    registry
        .mutate(&a, Action::TicTacToeMove { pos: 4, player: None })
        .unwrap();

    let untouched = registry.get(&b).unwrap();
    assert_eq!(
        untouched,
        GameState::TicTacToe(strictly_arcade::TicTacToeState::new(
            TicTacToeConfig::two_player()
        ))
    );
}

#[test]
fn test_action_of_other_kind_rejected() {
    let registry = SessionRegistry::new();
    let (id, _) = registry.create(GameConfig::NumberGuess(NumberGuessConfig::default()));
    let err = registry
        .mutate(&id, Action::RpsPlay { throw: "rock".into() })
        .unwrap_err();
    assert!(!err.is_not_found());
    assert_eq!(registry.kind(&id).unwrap(), GameKind::NumberGuess);
}

#[test]
fn test_reset_keeps_kind_and_config() {
    let registry = SessionRegistry::new();
    let config = GameConfig::Rps(RpsConfig::new(4));
    let (id, _) = registry.create(config);
    registry
        .mutate(&id, Action::RpsPlay { throw: "paper".into() })
        .unwrap();

    let state = registry.reset(&id).unwrap();
    assert_eq!(state.config(), config);
    assert_eq!(rps(&state).rounds(), 0);
    assert_eq!(registry.get(&id).unwrap(), state);
}

#[test]
fn test_list_sessions() {
    let registry = SessionRegistry::new();
    assert!(registry.is_empty());
    let (id, _) = registry.create(GameConfig::default_for(GameKind::Hangman));
    assert_eq!(registry.list_sessions(), vec![id]);
}
