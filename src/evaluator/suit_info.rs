use crate::cards::{Card, Suit};

/// Which suit, if any, holds at least five of the given cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    pub counts: [u8; 4],
    pub flush_suit: Option<Suit>,
}

impl SuitInfo {
    pub fn detect(cards: &[Card]) -> Self {
        let mut counts = [0u8; 4];
        for c in cards {
            counts[c.suit().index()] += 1;
        }
        // at most one suit can reach five with seven cards
        let flush_suit = Suit::ALL.iter().copied().find(|s| counts[s.index()] >= 5);
        SuitInfo { counts, flush_suit }
    }

    pub fn is_flush(&self) -> bool {
        self.flush_suit.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn test_flush_among_seven() {
        let info = SuitInfo::detect(&parse_cards("As Ks 2h Qs 3d Js 9s").unwrap());
        assert!(info.is_flush());
        assert_eq!(info.flush_suit, Some(Suit::Spades));
        assert_eq!(info.counts[Suit::Spades.index()], 5);
    }

    #[test]
    fn test_four_to_a_flush_is_not_flush() {
        let info = SuitInfo::detect(&parse_cards("As Kh Qs Js 9s 2d").unwrap());
        assert!(!info.is_flush());
        assert_eq!(info.flush_suit, None);
    }
}
