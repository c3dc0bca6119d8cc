//! Property tests for number guess, hangman and rock-paper-scissors.

use proptest::prelude::*;
use strictly_arcade::{
    HangmanConfig, HangmanDifficulty, HangmanState, Hint, MatchWinner, NumberGuessConfig,
    NumberGuessDifficulty, NumberGuessState, RoundResult, RpsConfig, RpsState, Throw, WORD_POOL,
};

#[test]
fn test_number_guess_scenario() {
    let state = NumberGuessState::with_secret(
        NumberGuessConfig::new(NumberGuessDifficulty::Normal),
        42,
    );
    assert_eq!(state.max(), 100);

    let state = state.guess(50);
    assert_eq!(state.hint(), Some(Hint::Lower));
    assert_eq!(state.tries(), 1);

    let state = state.guess(42);
    assert_eq!(state.hint(), Some(Hint::Correct));
    assert!(state.won());
    assert_eq!(state.tries(), 2);
}

fn throw() -> impl Strategy<Value = Throw> {
    prop_oneof![Just(Throw::Rock), Just(Throw::Paper), Just(Throw::Scissors)]
}

proptest! {
    #[test]
    fn number_guess_tries_only_count_in_range(
        secret in 1u32..=100,
        guesses in prop::collection::vec(-50i64..200, 0..40),
    ) {
        let mut state = NumberGuessState::with_secret(NumberGuessConfig::default(), secret);
        for n in guesses {
            let before = state.tries();
            let was_won = state.won();
            state = state.guess(n);

            prop_assert!(state.tries() >= before);
            if !(1..=100).contains(&n) || was_won {
                prop_assert_eq!(state.tries(), before);
            }
            if !was_won && n == i64::from(secret) {
                prop_assert_eq!(state.hint(), Some(Hint::Correct));
                prop_assert!(state.won());
            }
        }
    }

    #[test]
    fn hangman_wrong_bounded_and_finish_is_final(
        word in prop::sample::select(WORD_POOL),
        letters in prop::collection::vec(prop::char::range('a', 'z'), 0..40),
    ) {
        let mut state = HangmanState::with_word(HangmanConfig::new(HangmanDifficulty::Hard), word);
        for letter in letters {
            let before = state.clone();
            state = state.guess(&letter.to_string()).unwrap();

            prop_assert!(state.wrong() <= state.max_wrong());
            if before.finished() {
                prop_assert_eq!(&state, &before);
            }
        }
    }

    #[test]
    fn hangman_guessing_every_letter_wins(
        word in prop::sample::select(WORD_POOL),
    ) {
        let mut state = HangmanState::with_word(HangmanConfig::new(HangmanDifficulty::Easy), word);
        for letter in word.chars() {
            state = state.guess(&letter.to_string()).unwrap();
        }
        prop_assert!(state.won());
        prop_assert_eq!(state.masked(), word);
    }

    #[test]
    fn rps_rounds_and_target(
        target in 1u32..6,
        rounds in prop::collection::vec((throw(), throw()), 0..60),
    ) {
        let mut state = RpsState::new(RpsConfig::new(target));
        let mut ties = 0;
        for (player, ai) in rounds {
            if state.finished() {
                let frozen = state.clone();
                prop_assert!(state.clone().play_round(player, ai).is_err());
                prop_assert_eq!(&state, &frozen);
                continue;
            }
            state = state.play_round(player, ai).unwrap();
            if state.last_result() == Some(RoundResult::Tie) {
                ties += 1;
            }

            prop_assert_eq!(state.rounds(), state.player_score() + state.ai_score() + ties);
            let reached = state.player_score() == target || state.ai_score() == target;
            prop_assert_eq!(state.finished(), reached);
            prop_assert_eq!(state.winner() != MatchWinner::None, reached);
        }
    }
}
