use poker_settle::cards::{parse_cards, Card};
use poker_settle::deck::Deck;
use poker_settle::equity::{equities, EquityCalculator, EquityConfig, EquityError};
use poker_settle::hand::HoleCards;
use proptest::prelude::*;

fn holdings(specs: &[&str]) -> Vec<HoleCards> {
    specs.iter().map(|s| s.parse().expect("valid holding")).collect()
}

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).expect("valid cards")
}

#[test]
fn fours_against_jacks_on_ace_king_flop() {
    let eq = equities(&holdings(&["4h 4d", "Jd Js"]), &cards("Ah Kc 3d"), None).unwrap();
    assert_eq!(eq.len(), 2);
    assert!((eq[0] - 0.10).abs() < 1e-9, "{eq:?}");
    assert!((eq[1] - 0.90).abs() < 1e-9, "{eq:?}");
}

#[test]
fn river_without_ties_is_all_or_nothing() {
    let h = holdings(&["As Ah", "Ks Kh", "Qs Qh"]);
    let eq = equities(&h, &cards("2c 7d 9h Jc 3s"), None).unwrap();
    assert_eq!(eq, vec![1.0, 0.0, 0.0]);
}

#[test]
fn river_tie_splits_evenly() {
    // everyone plays the board royal flush
    let h = holdings(&["2c 3d", "4c 5d", "6h 7h"]);
    let eq = equities(&h, &cards("As Ks Qs Js Ts"), None).unwrap();
    for e in &eq {
        assert!((e - 1.0 / 3.0).abs() < 1e-12);
    }
}

#[test]
fn turn_enumerates_every_river() {
    // jacks lose only to the two remaining fours
    let eq = equities(&holdings(&["4h 4d", "Jd Js"]), &cards("Ah Kc 3d 9s"), None).unwrap();
    assert!((eq[0] - 2.0 / 44.0).abs() < 1e-12, "{eq:?}");
}

#[test]
fn cap_above_completion_count_stays_exhaustive() {
    let h = holdings(&["4h 4d", "Jd Js"]);
    let board = cards("Ah Kc 3d");
    assert_eq!(equities(&h, &board, Some(990)).unwrap(), equities(&h, &board, None).unwrap());
}

#[test]
fn sampled_preflop_is_close_to_known_odds() {
    // AA against KK is about 82/18
    let eq = equities(&holdings(&["As Ah", "Kd Kc"]), &[], Some(20_000)).unwrap();
    assert!((eq[0] - 0.82).abs() < 0.02, "{eq:?}");
}

#[test]
fn different_seeds_sample_differently_but_reproducibly() {
    let h = holdings(&["As Ah", "Kd Kc", "7s 6s"]);
    let calc = |seed| {
        EquityCalculator::new(EquityConfig { seed, ..EquityConfig::default() })
            .equities(&h, &[])
            .unwrap()
    };
    assert_eq!(calc(1), calc(1));
    assert_ne!(calc(1), calc(2));
}

#[test]
fn invalid_input_is_reported() {
    let err = equities(&holdings(&["As Ah"]), &[], None).unwrap_err();
    assert_eq!(err, EquityError::TooFewHoldings(1));

    let err = equities(&holdings(&["As Ah", "Ks Kh"]), &cards("Ks 2c 3c"), None).unwrap_err();
    assert_eq!(err, EquityError::DuplicateCard("Ks".parse().unwrap()));

    let err = equities(&holdings(&["As Ah", "Ks Kh"]), &cards("2c 3c 4c 5c 6c 7c"), None)
        .unwrap_err();
    assert_eq!(err, EquityError::TooManyBoardCards(6));
}

fn spot() -> impl Strategy<Value = (Vec<HoleCards>, Vec<Card>)> {
    (2usize..=4, prop_oneof![Just(3usize), Just(4), Just(5)]).prop_flat_map(|(players, board)| {
        proptest::sample::subsequence(Deck::standard().as_slice().to_vec(), players * 2 + board)
            .prop_shuffle()
            .prop_map(move |cards| {
                let hs = cards[..players * 2]
                    .chunks(2)
                    .map(|c| HoleCards::from_slice(c).expect("distinct cards"))
                    .collect();
                (hs, cards[players * 2..].to_vec())
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn equities_sum_to_one((hs, board) in spot()) {
        let eq = equities(&hs, &board, Some(2_000)).unwrap();
        prop_assert_eq!(eq.len(), hs.len());
        prop_assert!((eq.iter().sum::<f64>() - 1.0).abs() < 1e-6);
        prop_assert!(eq.iter().all(|e| (0.0..=1.0).contains(e)));
    }

    #[test]
    fn equities_are_idempotent((hs, board) in spot()) {
        let a = equities(&hs, &board, Some(500)).unwrap();
        let b = equities(&hs, &board, Some(500)).unwrap();
        prop_assert_eq!(a, b);
    }
}
