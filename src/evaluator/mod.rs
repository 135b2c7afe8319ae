pub mod combinations;
pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{join_cards, Card};
use crate::hand::{first_duplicate, validate_holdem, Board, HandError, HoleCards};
use core::cmp::Ordering;
use std::fmt;

/// Compact, comparable hand strength. Higher is better.
/// Encodes category and the ranks of the five hand cards in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub struct HandValue(u64);

impl HandValue {
    /// Return the packed comparable value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category and up to five rank values (decisive cards first,
    /// then kickers; 0 for a missing card, 1 for a wheel Ace).
    pub fn from_parts(category: Category, ranks: &[u8; 5]) -> Self {
        // Layout (most significant -> least):
        // [ category (8 bits) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6) | 10 zero bits ]
        const CAT_SHIFT: u32 = 48;
        const RANK_STRIDE: u32 = 6;
        let mut v: u64 = (category as u64) << CAT_SHIFT;
        for (i, r) in ranks.iter().enumerate() {
            let offset = CAT_SHIFT - RANK_STRIDE * (i as u32 + 1);
            v |= u64::from(*r) << offset;
        }
        HandValue(v)
    }
}

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    Trips = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    Quads = 7,
    StraightFlush = 8,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::Trips,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::Quads,
        Category::StraightFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::Trips => "Trips",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::Quads => "Quads",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The best hand found in a set of cards.
///
/// Ordered by category, then decisive card ranks, then kicker ranks. Suits
/// never break ties, so two hands compare equal when every rank matches.
#[derive(Debug, Clone, Copy)]
pub struct EvaluatedHand {
    pub category: Category,
    cards: [Card; 5],
    len: u8,
    decisive: u8,
    value: HandValue,
}

impl EvaluatedHand {
    /// Cards forming the made hand, strongest first (5-4-3-2-A for a wheel).
    pub fn decisive_cards(&self) -> &[Card] {
        &self.cards[..self.decisive as usize]
    }

    /// Remaining cards filling out the hand, highest first.
    pub fn kickers(&self) -> &[Card] {
        &self.cards[self.decisive as usize..self.len as usize]
    }

    /// Decisive cards followed by kickers; five cards unless fewer were given.
    pub fn best_five(&self) -> &[Card] {
        &self.cards[..self.len as usize]
    }

    /// Return the packed comparable value for ordering/caching.
    pub const fn value(&self) -> HandValue {
        self.value
    }
}

impl Ord for EvaluatedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for EvaluatedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EvaluatedHand {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for EvaluatedHand {}

impl fmt::Display for EvaluatedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.category, join_cards(self.decisive_cards()))?;
        if !self.kickers().is_empty() {
            write!(f, " ({})", join_cards(self.kickers()))?;
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("expected 2 to 7 cards, got {0}")]
    CardCount(usize),
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("not enough cards to evaluate")]
    NotEnoughCards,
}

/// Evaluate the best five-card hand among 2..=7 distinct cards.
///
/// With fewer than five cards the hand is filled out as far as the cards go.
///
/// ```
/// use poker_settle::cards::{parse_cards, Rank};
/// use poker_settle::evaluator::{evaluate, Category};
///
/// let cards = parse_cards("5h 4d 3c 2s Ah Kc Qd").unwrap();
/// let hand = evaluate(&cards).unwrap();
/// assert_eq!(hand.category, Category::Straight);
/// assert_eq!(hand.decisive_cards()[0].rank(), Rank::Five);
/// assert_eq!(hand.to_string(), "Straight [5h 4d 3c 2s Ah]");
/// ```
pub fn evaluate(cards: &[Card]) -> Result<EvaluatedHand, EvalError> {
    if !(2..=7).contains(&cards.len()) {
        return Err(EvalError::CardCount(cards.len()));
    }
    if let Some(dup) = first_duplicate(cards.iter().copied()) {
        return Err(EvalError::DuplicateCard(dup));
    }
    Ok(evaluate_unchecked(cards))
}

/// Evaluate cards already known to be distinct and 1..=7 long.
pub(crate) fn evaluate_unchecked(cards: &[Card]) -> EvaluatedHand {
    use detector::DETECTORS;
    use hand_analysis::HandAnalysis;

    let analysis = HandAnalysis::new(cards);

    for detector in DETECTORS.iter() {
        if let Some(hand) = detector.detect(&analysis) {
            return hand;
        }
    }

    unreachable!("HighCard detector matches any non-empty hand")
}

/// Evaluate a Hold'em hand given hole cards and a complete board.
///
/// ```
/// use poker_settle::evaluator::{evaluate_holdem, Category};
/// use poker_settle::hand::{Board, HoleCards};
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let eval = evaluate_holdem(&hole, &board).unwrap();
/// assert_eq!(eval.category, Category::Pair);
/// ```
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<EvaluatedHand, EvalError> {
    validate_holdem(hole, board)?;
    if !board.is_complete() {
        return Err(EvalError::NotEnoughCards);
    }
    Ok(evaluate_unchecked(&holdem_cards(hole, board.as_slice())))
}

/// Hole cards followed by board cards.
pub(crate) fn holdem_cards(hole: &HoleCards, board: &[Card]) -> Vec<Card> {
    let mut cards = Vec::with_capacity(2 + board.len());
    cards.extend_from_slice(&hole.as_array());
    cards.extend_from_slice(board);
    cards
}

/// Compare two Hold'em hands on a shared board. Returns the ordering or a validation error.
///
/// ```
/// use poker_settle::evaluator::compare_holdem;
/// use poker_settle::hand::{Board, HoleCards};
/// use std::cmp::Ordering;
///
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let a: HoleCards = "As Ah".parse().unwrap();
/// let b: HoleCards = "Ks Kh".parse().unwrap();
/// assert_eq!(compare_holdem(&a, &b, &board).unwrap(), Ordering::Greater);
/// ```
pub fn compare_holdem(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    let va = evaluate_holdem(a, board)?;
    let vb = evaluate_holdem(b, board)?;
    Ok(va.cmp(&vb))
}
