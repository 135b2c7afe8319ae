use super::hand_analysis::HandAnalysis;
use super::straight_info::StraightInfo;
use crate::evaluator::{Category, EvaluatedHand};

/// Each category detector either recognizes its category in the analysis and
/// builds the best hand of that category, or declines.
pub trait CategoryDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<EvaluatedHand>;
}

// ============================================================================
// Detector Implementations (in priority order: highest to lowest)
// ============================================================================

/// Straight Flush: five consecutive ranks within the flush suit
pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<EvaluatedHand> {
        let suited = analysis.flush_cards();
        let s = StraightInfo::find(&suited)?;
        Some(analysis.build_evaluation(Category::StraightFlush, &s.cards, &[], s.ace_low))
    }
}

/// Quads: four cards of one rank plus the best remaining card
pub struct QuadsDetector;

impl CategoryDetector for QuadsDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<EvaluatedHand> {
        let rank = analysis.rank_groups.quad()?;
        let made = analysis.cards_of(rank);
        let kickers = analysis.kickers_for(&made);
        Some(analysis.build_evaluation(Category::Quads, &made, &kickers, false))
    }
}

/// Full House: best trips plus the best other pair-or-better (a second trips
/// contributes its top two cards)
pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<EvaluatedHand> {
        let trips = analysis.rank_groups.trips();
        let pairs = analysis.rank_groups.pairs();
        let top = *trips.first()?;
        let second = match (trips.get(1), pairs.first()) {
            (Some(&t), Some(&p)) => t.max(p),
            (Some(&t), None) => t,
            (None, Some(&p)) => p,
            (None, None) => return None,
        };
        let mut made = analysis.cards_of(top);
        made.extend(analysis.cards_of(second).into_iter().take(2));
        Some(analysis.build_evaluation(Category::FullHouse, &made, &[], false))
    }
}

/// Flush: top five cards of the flush suit
pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<EvaluatedHand> {
        let suited = analysis.flush_cards();
        if suited.len() < 5 {
            return None;
        }
        Some(analysis.build_evaluation(Category::Flush, &suited[..5], &[], false))
    }
}

/// Straight: five consecutive ranks across all cards
pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<EvaluatedHand> {
        let s = StraightInfo::find(&analysis.sorted_cards)?;
        Some(analysis.build_evaluation(Category::Straight, &s.cards, &[], s.ace_low))
    }
}

/// Trips: three cards of one rank plus two kickers
pub struct TripsDetector;

impl CategoryDetector for TripsDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<EvaluatedHand> {
        let rank = *analysis.rank_groups.trips().first()?;
        let made = analysis.cards_of(rank);
        let kickers = analysis.kickers_for(&made);
        Some(analysis.build_evaluation(Category::Trips, &made, &kickers, false))
    }
}

/// Two Pair: the two highest pairs plus one kicker
pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<EvaluatedHand> {
        let pairs = analysis.rank_groups.pairs();
        if pairs.len() < 2 {
            return None;
        }
        let mut made = analysis.cards_of(pairs[0]);
        made.extend(analysis.cards_of(pairs[1]));
        let kickers = analysis.kickers_for(&made);
        Some(analysis.build_evaluation(Category::TwoPair, &made, &kickers, false))
    }
}

/// Pair: two cards of one rank plus three kickers
pub struct PairDetector;

impl CategoryDetector for PairDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<EvaluatedHand> {
        let rank = *analysis.rank_groups.pairs().first()?;
        let made = analysis.cards_of(rank);
        let kickers = analysis.kickers_for(&made);
        Some(analysis.build_evaluation(Category::Pair, &made, &kickers, false))
    }
}

/// High Card: the single highest card plus four kickers
pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn detect(&self, analysis: &HandAnalysis) -> Option<EvaluatedHand> {
        let top = *analysis.sorted_cards.first()?;
        let kickers = analysis.kickers_for(&[top]);
        Some(analysis.build_evaluation(Category::HighCard, &[top], &kickers, false))
    }
}

// ============================================================================
// Static detector list (in priority order)
// ============================================================================

pub const DETECTORS: [&dyn CategoryDetector; 9] = [
    &StraightFlushDetector,
    &QuadsDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &TripsDetector,
    &TwoPairDetector,
    &PairDetector,
    &HighCardDetector,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Rank};

    fn analyze(s: &str) -> HandAnalysis {
        HandAnalysis::new(&parse_cards(s).unwrap())
    }

    fn ranks(cards: &[crate::cards::Card]) -> Vec<Rank> {
        cards.iter().map(|c| c.rank()).collect()
    }

    #[test]
    fn test_straight_flush_detector_wheel() {
        let a = analyze("5c 3c Ac 7h 4c 2c Tc");
        let e = StraightFlushDetector.detect(&a).unwrap();
        assert_eq!(e.category, Category::StraightFlush);
        assert_eq!(
            ranks(e.decisive_cards()),
            vec![Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace]
        );
    }

    #[test]
    fn test_straight_flush_needs_suited_run() {
        // straight and flush present, but not in the same cards
        let a = analyze("9h 8h 7h 6h 2h 5c");
        assert!(StraightFlushDetector.detect(&a).is_none());
        assert!(FlushDetector.detect(&a).is_some());
        assert!(StraightDetector.detect(&a).is_some());
    }

    #[test]
    fn test_quads_detector_kicker() {
        let a = analyze("4h 4d Ks 8c 4c 8s 4s");
        let e = QuadsDetector.detect(&a).unwrap();
        assert_eq!(ranks(e.decisive_cards()), vec![Rank::Four; 4]);
        assert_eq!(ranks(e.kickers()), vec![Rank::King]);
    }

    #[test]
    fn test_full_house_from_two_trips() {
        let a = analyze("8h 8c 8s Qd Qs Qh 2c");
        let e = FullHouseDetector.detect(&a).unwrap();
        assert_eq!(
            ranks(e.decisive_cards()),
            vec![Rank::Queen, Rank::Queen, Rank::Queen, Rank::Eight, Rank::Eight]
        );
        assert!(e.kickers().is_empty());
    }

    #[test]
    fn test_full_house_prefers_best_pair() {
        let a = analyze("8h 8c 8s Qd Qs 2h 2c");
        let e = FullHouseDetector.detect(&a).unwrap();
        assert_eq!(ranks(&e.decisive_cards()[3..]), vec![Rank::Queen, Rank::Queen]);
    }

    #[test]
    fn test_flush_detector_top_five() {
        let a = analyze("Js Qs Qd 3s 2s 9s 8s");
        let e = FlushDetector.detect(&a).unwrap();
        assert_eq!(
            ranks(e.decisive_cards()),
            vec![Rank::Queen, Rank::Jack, Rank::Nine, Rank::Eight, Rank::Three]
        );
    }

    #[test]
    fn test_trips_detector_kickers() {
        let a = analyze("3s 3d 4h Ks 2d 3h 7d");
        let e = TripsDetector.detect(&a).unwrap();
        assert_eq!(ranks(e.kickers()), vec![Rank::King, Rank::Seven]);
    }

    #[test]
    fn test_two_pair_uses_third_pair_as_kicker() {
        let a = analyze("As 3d 4h 7s 4d 3h 7d");
        let e = TwoPairDetector.detect(&a).unwrap();
        assert_eq!(ranks(e.decisive_cards()), vec![Rank::Seven, Rank::Seven, Rank::Four, Rank::Four]);
        assert_eq!(ranks(e.kickers()), vec![Rank::Ace]);

        let a = analyze("Qs Qd 4h 7s 4d 2h 7d");
        let e = TwoPairDetector.detect(&a).unwrap();
        assert_eq!(ranks(e.kickers()), vec![Rank::Four]);
    }

    #[test]
    fn test_pair_and_high_card() {
        let a = analyze("As 3d 4h Ks 2d 3h 9d");
        let e = PairDetector.detect(&a).unwrap();
        assert_eq!(ranks(e.kickers()), vec![Rank::Ace, Rank::King, Rank::Nine]);

        let a = analyze("Qc 4h 3s As Ts 9c 8s");
        assert!(PairDetector.detect(&a).is_none());
        let e = HighCardDetector.detect(&a).unwrap();
        assert_eq!(ranks(e.decisive_cards()), vec![Rank::Ace]);
        assert_eq!(ranks(e.kickers()), vec![Rank::Queen, Rank::Ten, Rank::Nine, Rank::Eight]);
    }
}
