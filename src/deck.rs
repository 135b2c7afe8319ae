use crate::cards::{Card, Rank, Suit};
use rand::Rng;

/// A set of undealt cards, in fixed suit-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use poker_settle::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for s in Suit::ALL {
            for r in Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// The standard deck minus every card in `used`.
    ///
    /// ```
    /// use poker_settle::cards::parse_cards;
    /// use poker_settle::deck::Deck;
    ///
    /// let used = parse_cards("Ah Kd 3c").unwrap();
    /// assert_eq!(Deck::without(&used).len(), 49);
    /// ```
    pub fn without(used: &[Card]) -> Self {
        let mask = used.iter().fold(0u64, |m, c| m | c.mask());
        let cards = Self::standard().cards.into_iter().filter(|c| mask & c.mask() == 0).collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Draw `k` distinct cards uniformly at random without removing them
    /// from the deck. Returns fewer than `k` only if the deck is smaller.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, k: usize) -> Vec<Card> {
        let k = k.min(self.cards.len());
        rand::seq::index::sample(rng, self.cards.len(), k)
            .into_iter()
            .map(|i| self.cards[i])
            .collect()
    }
}
