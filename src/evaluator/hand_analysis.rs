use super::rank_groups::RankGroups;
use super::suit_info::SuitInfo;
use crate::cards::{sort_desc, Card, Rank};
use crate::evaluator::{Category, EvaluatedHand, HandValue};

/// Pre-computed analysis of 2..=7 cards.
/// Built once and shared by all category detectors.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    /// Rank descending, then suit descending.
    pub sorted_cards: Vec<Card>,
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
}

impl HandAnalysis {
    pub fn new(cards: &[Card]) -> Self {
        let mut sorted_cards = cards.to_vec();
        sort_desc(&mut sorted_cards);

        let rank_groups = RankGroups::from_cards(&sorted_cards);
        let suit_info = SuitInfo::detect(&sorted_cards);

        Self { sorted_cards, rank_groups, suit_info }
    }

    /// All cards of `rank`, highest suit first.
    pub fn cards_of(&self, rank: Rank) -> Vec<Card> {
        self.sorted_cards.iter().copied().filter(|c| c.rank() == rank).collect()
    }

    /// Cards of the flush suit, highest first. Empty without a flush.
    pub fn flush_cards(&self) -> Vec<Card> {
        match self.suit_info.flush_suit {
            Some(s) => self.sorted_cards.iter().copied().filter(|c| c.suit() == s).collect(),
            None => Vec::new(),
        }
    }

    /// Highest cards not already in `made`, enough to fill out five cards
    /// (or as many as there are).
    pub fn kickers_for(&self, made: &[Card]) -> Vec<Card> {
        let wanted = 5usize.saturating_sub(made.len());
        self.sorted_cards.iter().copied().filter(|c| !made.contains(c)).take(wanted).collect()
    }

    /// Build an EvaluatedHand from the decisive cards and kickers, in order.
    pub fn build_evaluation(
        &self,
        category: Category,
        decisive: &[Card],
        kickers: &[Card],
        ace_low: bool,
    ) -> EvaluatedHand {
        debug_assert!(!decisive.is_empty() && decisive.len() + kickers.len() <= 5);
        let mut cards = [decisive[0]; 5];
        let mut ranks = [0u8; 5];
        for (i, c) in decisive.iter().chain(kickers).enumerate() {
            cards[i] = *c;
            ranks[i] = c.rank().value();
        }
        if ace_low {
            // the wheel's Ace sits last and counts as one
            ranks[4] = 1;
        }
        let len = decisive.len() + kickers.len();
        EvaluatedHand {
            category,
            cards,
            len: len as u8,
            decisive: decisive.len() as u8,
            value: HandValue::from_parts(category, &ranks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Suit};

    fn analyze(s: &str) -> HandAnalysis {
        HandAnalysis::new(&parse_cards(s).unwrap())
    }

    #[test]
    fn test_cards_sorted_descending() {
        let a = analyze("3s Ah 5d Kc 9s");
        let ranks: Vec<Rank> = a.sorted_cards.iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![Rank::Ace, Rank::King, Rank::Nine, Rank::Five, Rank::Three]);
    }

    #[test]
    fn test_flush_cards_of_seven() {
        let a = analyze("2d Ad 9d Kc 5d Jd 7h");
        assert_eq!(a.suit_info.flush_suit, Some(Suit::Diamonds));
        let ranks: Vec<Rank> = a.flush_cards().iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![Rank::Ace, Rank::Jack, Rank::Nine, Rank::Five, Rank::Two]);
    }

    #[test]
    fn test_kickers_skip_made_cards() {
        let a = analyze("Jh Js Ad 9c 7s 4d 2c");
        let pair = a.cards_of(Rank::Jack);
        let kickers = a.kickers_for(&pair);
        let ranks: Vec<Rank> = kickers.iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![Rank::Ace, Rank::Nine, Rank::Seven]);
    }

    #[test]
    fn test_kickers_short_hand() {
        let a = analyze("Kh Kd");
        let pair = a.cards_of(Rank::King);
        assert!(a.kickers_for(&pair).is_empty());
    }
}
