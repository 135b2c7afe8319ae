use poker_settle::cards::{Card, Rank, Suit};
use poker_settle::deck::Deck;
use poker_settle::evaluator::combinations::Combinations;
use poker_settle::evaluator::{evaluate, Category, EvaluatedHand};
use proptest::prelude::*;
use std::cmp::Ordering;

fn distinct_cards(n: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = Vec<Card>> {
    proptest::sample::subsequence(Deck::standard().as_slice().to_vec(), n)
}

fn rank_from_val(v: u8) -> Rank {
    Rank::from_value(v).unwrap_or(Rank::Ace)
}

fn straight_cards(top: u8) -> [Card; 5] {
    let ranks = if top == 5 {
        [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]
    } else {
        [
            rank_from_val(top - 4),
            rank_from_val(top - 3),
            rank_from_val(top - 2),
            rank_from_val(top - 1),
            rank_from_val(top),
        ]
    };
    let suits = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades, Suit::Clubs];
    [
        Card::new(ranks[0], suits[0]),
        Card::new(ranks[1], suits[1]),
        Card::new(ranks[2], suits[2]),
        Card::new(ranks[3], suits[3]),
        Card::new(ranks[4], suits[4]),
    ]
}

/// Independent five-card scorer: (category ordinal, tie-break ranks).
fn naive_five(cards: &[Card]) -> (u8, Vec<u8>) {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank().value() as usize] += 1;
    }
    let mut groups: Vec<(u8, u8)> =
        (2..=14u8).filter(|&r| counts[r as usize] > 0).map(|r| (counts[r as usize], r)).collect();
    groups.sort_by(|a, b| b.cmp(a));

    let flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let mut distinct: Vec<u8> = groups.iter().map(|&(_, r)| r).collect();
    distinct.sort_by(|a, b| b.cmp(a));
    let straight_top = if distinct.len() == 5 && distinct[0] - distinct[4] == 4 {
        Some(distinct[0])
    } else if distinct == [14, 5, 4, 3, 2] {
        Some(5)
    } else {
        None
    };

    let expanded: Vec<u8> =
        groups.iter().flat_map(|&(n, r)| std::iter::repeat(r).take(n as usize)).collect();
    let shape: Vec<u8> = groups.iter().map(|&(n, _)| n).collect();
    match (straight_top, flush, shape.as_slice()) {
        (Some(top), true, _) => (8, vec![top]),
        (_, _, [4, 1]) => (7, expanded),
        (_, _, [3, 2]) => (6, expanded),
        (_, true, _) => (5, expanded),
        (Some(top), false, _) => (4, vec![top]),
        (_, _, [3, 1, 1]) => (3, expanded),
        (_, _, [2, 2, 1]) => (2, expanded),
        (_, _, [2, 1, 1, 1]) => (1, expanded),
        _ => (0, expanded),
    }
}

fn naive_best(cards: &[Card]) -> (u8, Vec<u8>) {
    Combinations::new(cards.len(), 5)
        .map(|idx| {
            let five: Vec<Card> = idx.iter().map(|&i| cards[i]).collect();
            naive_five(&five)
        })
        .max()
        .unwrap_or((0, Vec::new()))
}

/// The evaluator's result in the naive scorer's terms.
fn summarize(e: &EvaluatedHand) -> (u8, Vec<u8>) {
    let ranks: Vec<u8> = e.best_five().iter().map(|c| c.rank().value()).collect();
    match e.category {
        Category::Straight | Category::StraightFlush => (e.category.ordinal(), vec![ranks[0]]),
        _ => (e.category.ordinal(), ranks),
    }
}

proptest! {
    #[test]
    fn matches_brute_force_over_five_card_subsets(cards in distinct_cards(5..=7)) {
        let e = evaluate(&cards).unwrap();
        prop_assert_eq!(summarize(&e), naive_best(&cards));
    }

    #[test]
    fn ordering_agrees_with_brute_force(a in distinct_cards(5..=7), b in distinct_cards(5..=7)) {
        let ea = evaluate(&a).unwrap();
        let eb = evaluate(&b).unwrap();
        prop_assert_eq!(ea.cmp(&eb), naive_best(&a).cmp(&naive_best(&b)));
    }

    #[test]
    fn ordering_is_antisymmetric_and_transitive(
        a in distinct_cards(5..=7),
        b in distinct_cards(5..=7),
        c in distinct_cards(5..=7),
    ) {
        let ea = evaluate(&a).unwrap();
        let eb = evaluate(&b).unwrap();
        let ec = evaluate(&c).unwrap();
        if ea >= eb && eb >= ea { prop_assert_eq!(ea, eb); }
        prop_assert_eq!(ea.cmp(&eb), eb.cmp(&ea).reverse());
        if ea >= eb && eb >= ec { prop_assert!(ea >= ec); }
    }

    #[test]
    fn suit_relabeling_never_changes_value(cards in distinct_cards(5..=7), shift in 1usize..4) {
        let relabeled: Vec<Card> = cards
            .iter()
            .map(|c| c.with_suit(Suit::ALL[(c.suit().index() + shift) % 4]))
            .collect();
        let a = evaluate(&cards).unwrap();
        let b = evaluate(&relabeled).unwrap();
        prop_assert_eq!(a.cmp(&b), Ordering::Equal);
        prop_assert_eq!(a.value(), b.value());
    }

    #[test]
    fn seven_card_best_is_at_least_as_good_as_any_five(cards in distinct_cards(7..=7)) {
        let best7 = evaluate(&cards).unwrap();
        for idx in Combinations::new(7, 5) {
            let five: Vec<Card> = idx.iter().map(|&i| cards[i]).collect();
            prop_assert!(best7 >= evaluate(&five).unwrap());
        }
    }

    #[test]
    fn evaluation_is_idempotent(cards in distinct_cards(2..=7)) {
        let a = evaluate(&cards).unwrap();
        let b = evaluate(&cards).unwrap();
        prop_assert_eq!(a.value(), b.value());
        prop_assert_eq!(a.best_five(), b.best_five());
    }

    #[test]
    fn straight_ordering_respects_top_card(top_hi in 6u8..=14u8, top_lo in 5u8..=13u8) {
        prop_assume!(top_hi > top_lo);
        let e_hi = evaluate(&straight_cards(top_hi)).unwrap();
        let e_lo = evaluate(&straight_cards(top_lo)).unwrap();
        prop_assert!(matches!(e_hi.category, Category::Straight));
        prop_assert!(matches!(e_lo.category, Category::Straight));
        prop_assert!(e_hi > e_lo);
    }

    #[test]
    fn wheel_is_lowest_straight(top in 6u8..=14u8) {
        let e_wheel = evaluate(&straight_cards(5)).unwrap();
        let e_high = evaluate(&straight_cards(top)).unwrap();
        prop_assert!(matches!(e_wheel.category, Category::Straight));
        prop_assert!(e_high > e_wheel);
    }
}
