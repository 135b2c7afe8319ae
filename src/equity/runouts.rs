use crate::cards::Card;
use crate::deck::Deck;
use crate::evaluator::combinations::{binomial, Combinations};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Board completions drawn from the undealt cards, either every k-card
/// combination in order or a fixed number of uniform random draws.
///
/// Cloning a fresh `Runouts` restarts the same sequence: the sampled source
/// is driven by a seeded `ChaCha8Rng`.
///
/// ```
/// use poker_settle::cards::parse_cards;
/// use poker_settle::deck::Deck;
/// use poker_settle::equity::runouts::Runouts;
///
/// let used = parse_cards("4h 4d Jd Js Ah Kc 3d").unwrap();
/// let runouts = Runouts::new(Deck::without(&used), 2, None, 0);
/// assert!(runouts.is_exhaustive());
/// assert_eq!(runouts.count(), 990);
/// ```
#[derive(Debug, Clone)]
pub struct Runouts {
    deck: Deck,
    k: usize,
    total: u64,
    source: Source,
}

#[derive(Debug, Clone)]
enum Source {
    Exhaustive(Combinations),
    Sampled { rng: ChaCha8Rng, left: u64 },
}

impl Runouts {
    /// Enumerate every completion when their number fits within `cap` (or
    /// there is no cap); otherwise draw `cap` random completions.
    pub fn new(deck: Deck, k: usize, cap: Option<u64>, seed: u64) -> Self {
        let total = binomial(deck.len() as u64, k as u64);
        let source = match cap {
            Some(cap) if total > cap => {
                // an empty sample has no equity to normalize
                let left = cap.max(1);
                Source::Sampled { rng: ChaCha8Rng::seed_from_u64(seed), left }
            }
            _ => Source::Exhaustive(Combinations::new(deck.len(), k)),
        };
        Self { deck, k, total, source }
    }

    /// Number of distinct completions of the board.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of completions this sequence yields.
    pub fn draws(&self) -> u64 {
        match &self.source {
            Source::Exhaustive(_) => self.total,
            Source::Sampled { left, .. } => *left,
        }
    }

    pub fn is_exhaustive(&self) -> bool {
        matches!(self.source, Source::Exhaustive(_))
    }

    /// Cards still to come per completion.
    pub fn cards_to_come(&self) -> usize {
        self.k
    }
}

impl Iterator for Runouts {
    type Item = Vec<Card>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.source {
            Source::Exhaustive(combos) => {
                let idx = combos.next()?;
                let cards = self.deck.as_slice();
                Some(idx.iter().map(|&i| cards[i]).collect())
            }
            Source::Sampled { rng, left } => {
                if *left == 0 {
                    return None;
                }
                *left -= 1;
                Some(self.deck.sample(rng, self.k))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::hand::first_duplicate;

    fn deck_after(s: &str) -> Deck {
        Deck::without(&parse_cards(s).unwrap())
    }

    #[test]
    fn exhaustive_when_under_cap() {
        let r = Runouts::new(deck_after("4h 4d Jd Js Ah Kc 3d"), 2, Some(990), 1);
        assert!(r.is_exhaustive());
        assert_eq!(r.total(), 990);
        assert_eq!(r.draws(), 990);
        let all: Vec<Vec<Card>> = r.collect();
        assert_eq!(all.len(), 990);
        assert!(all.iter().all(|c| c.len() == 2 && first_duplicate(c.iter().copied()).is_none()));
    }

    #[test]
    fn sampled_when_over_cap() {
        let r = Runouts::new(deck_after("4h 4d Jd Js"), 5, Some(250), 9);
        assert!(!r.is_exhaustive());
        assert_eq!(r.total(), 1_712_304);
        assert_eq!(r.draws(), 250);
        let used = parse_cards("4h 4d Jd Js").unwrap();
        let mut n = 0;
        for board in r {
            assert_eq!(board.len(), 5);
            assert!(board.iter().all(|c| !used.contains(c)));
            assert_eq!(first_duplicate(board), None);
            n += 1;
        }
        assert_eq!(n, 250);
    }

    #[test]
    fn zero_cap_still_draws_once() {
        let r = Runouts::new(deck_after("4h 4d Jd Js"), 5, Some(0), 9);
        assert_eq!(r.count(), 1);
    }

    #[test]
    fn clone_restarts_the_same_sample() {
        let r = Runouts::new(deck_after("As Ks"), 5, Some(20), 1234);
        let a: Vec<Vec<Card>> = r.clone().collect();
        let b: Vec<Vec<Card>> = r.collect();
        assert_eq!(a, b);
    }
}
