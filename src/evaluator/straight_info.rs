use crate::cards::{Card, Rank};

/// Five cards forming a straight, highest first. For the wheel the cards
/// read 5-4-3-2-A and `ace_low` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub cards: [Card; 5],
    pub ace_low: bool,
}

impl StraightInfo {
    /// Find the best straight in `sorted` (rank descending). Repeated ranks do
    /// not break a run; the first card seen of each rank is used.
    pub fn find(sorted: &[Card]) -> Option<Self> {
        let first = *sorted.first()?;
        let mut run = [first; 5];
        let mut len = 0usize;

        for &c in sorted {
            if len > 0 {
                let last = run[len - 1].rank().value();
                if last == c.rank().value() {
                    continue;
                }
                if last != c.rank().value() + 1 {
                    len = 0;
                }
            }
            run[len] = c;
            len += 1;
            if len == 5 {
                return Some(StraightInfo { cards: run, ace_low: false });
            }
        }

        // Wheel: a trailing 5-4-3-2 run plus an Ace
        if len == 4 && run[0].rank() == Rank::Five && first.rank() == Rank::Ace {
            run[4] = first;
            return Some(StraightInfo { cards: run, ace_low: true });
        }

        None
    }

    /// Highest card of the straight (Five for the wheel).
    pub fn top_rank(&self) -> Rank {
        self.cards[0].rank()
    }
}
