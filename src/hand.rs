use crate::cards::{parse_cards, Card};
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("too many board cards: {0}")]
    TooManyBoardCards(usize),
    #[error("duplicate cards on board")]
    DuplicateBoardCards,
    #[error("hole cards overlap with board")]
    Overlap,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private hole cards, both known.
///
/// ```
/// use poker_settle::hand::HoleCards;
///
/// let hole: HoleCards = "Ad Kd".parse().unwrap();
/// assert_eq!(hole.code(), "AKs");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        if slice.len() != 2 {
            return Err(HandError::HoleCount(slice.len()));
        }
        Self::try_new(slice[0], slice[1])
    }

    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    /// Starting-hand notation: `AKs`, `JTo`, `66`. Higher rank first.
    pub fn code(&self) -> String {
        let (hi, lo) = if self.0.rank() >= self.1.rank() { (self.0, self.1) } else { (self.1, self.0) };
        let mut out = format!("{}{}", hi.rank(), lo.rank());
        if hi.rank() != lo.rank() {
            out.push(if hi.suit() == lo.suit() { 's' } else { 'o' });
        }
        out
    }

    /// Both cards, highest first.
    pub fn sorted_desc(&self) -> [Card; 2] {
        if self.0 >= self.1 {
            [self.0, self.1]
        } else {
            [self.1, self.0]
        }
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

/// Hole cards as far as they are known: none, one or both shown.
///
/// Unknown cards display as `??`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealedCards {
    first: Option<Card>,
    second: Option<Card>,
}

impl RevealedCards {
    pub const fn hidden() -> Self {
        Self { first: None, second: None }
    }

    pub fn new(first: Option<Card>, second: Option<Card>) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> Option<Card> {
        self.first
    }

    pub fn second(&self) -> Option<Card> {
        self.second
    }

    /// Number of cards shown (0, 1 or 2).
    pub fn known(&self) -> usize {
        usize::from(self.first.is_some()) + usize::from(self.second.is_some())
    }

    /// Full hole cards when both are shown and distinct.
    pub fn complete(&self) -> Option<HoleCards> {
        match (self.first, self.second) {
            (Some(a), Some(b)) => HoleCards::try_new(a, b).ok(),
            _ => None,
        }
    }

    /// Code for a partially shown holding: `A?` when one card is known,
    /// `??` when none are.
    pub fn code(&self) -> String {
        if let Some(h) = self.complete() {
            return h.code();
        }
        match self.first.or(self.second) {
            Some(c) => format!("{}?", c.rank()),
            None => "??".to_string(),
        }
    }
}

impl From<HoleCards> for RevealedCards {
    fn from(h: HoleCards) -> Self {
        Self { first: Some(h.first()), second: Some(h.second()) }
    }
}

impl fmt::Display for RevealedCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in [self.first, self.second] {
            match c {
                Some(c) => write!(f, "{c}")?,
                None => write!(f, "??")?,
            }
        }
        Ok(())
    }
}

/// Community cards for one run-out (flop, turn, river).
///
/// ```
/// use poker_settle::hand::Board;
///
/// let board: Board = "Ah Kc 3d".parse().unwrap();
/// assert_eq!(board.len(), 3);
/// assert!(!board.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub const MAX_CARDS: usize = 5;

    pub fn empty() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > Self::MAX_CARDS {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        if first_duplicate(cards.iter().copied()).is_some() {
            return Err(HandError::DuplicateBoardCards);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All five cards dealt.
    pub fn is_complete(&self) -> bool {
        self.cards.len() == Self::MAX_CARDS
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::cards::join_cards(&self.cards))
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Board::try_new(cards)
    }
}

/// Validate that a pair of hole cards and a board form a valid Hold'em state.
/// Allows 0..=5 board cards. Ensures uniqueness across all cards.
///
/// ```
/// use poker_settle::hand::{validate_holdem, Board, HoleCards};
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// let board: Board = "2c 3c 4c".parse().unwrap();
/// validate_holdem(&hole, &board).unwrap();
/// ```
pub fn validate_holdem(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    if board.len() > Board::MAX_CARDS {
        return Err(HandError::TooManyBoardCards(board.len()));
    }
    if first_duplicate(board.as_slice().iter().copied()).is_some() {
        return Err(HandError::DuplicateBoardCards);
    }
    if hole.first() == hole.second() {
        return Err(HandError::DuplicateHoleCards);
    }
    if board.as_slice().iter().any(|&c| c == hole.first() || c == hole.second()) {
        return Err(HandError::Overlap);
    }
    Ok(())
}

/// First card that appears twice, scanning in order.
pub fn first_duplicate<I>(cards: I) -> Option<Card>
where
    I: IntoIterator<Item = Card>,
{
    let mut seen = 0u64;
    for c in cards {
        if seen & c.mask() != 0 {
            return Some(c);
        }
        seen |= c.mask();
    }
    None
}
