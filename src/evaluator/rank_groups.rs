use crate::cards::{Card, Rank};

/// Groups ranks by their frequency in a hand, sorted by (count desc, rank desc).
///
/// Example: AAAKQ groups as [(Ace, 3), (King, 1), (Queen, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    /// Count ranks over any number of cards.
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut counts = [0u8; 15];
        for c in cards {
            counts[c.rank().value() as usize] += 1;
        }

        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .copied()
            .filter(|r| counts[r.value() as usize] > 0)
            .map(|r| (r, counts[r.value() as usize]))
            .collect();

        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        Self { groups }
    }

    /// Rank of a four-of-a-kind, if present.
    pub fn quad(&self) -> Option<Rank> {
        self.groups.iter().find(|(_, count)| *count == 4).map(|(rank, _)| *rank)
    }

    /// Ranks held exactly three times, highest first.
    pub fn trips(&self) -> Vec<Rank> {
        self.with_count(3)
    }

    /// Ranks held exactly twice, highest first.
    pub fn pairs(&self) -> Vec<Rank> {
        self.with_count(2)
    }

    fn with_count(&self, n: u8) -> Vec<Rank> {
        self.groups.iter().filter(|(_, count)| *count == n).map(|(rank, _)| *rank).collect()
    }

    #[cfg(test)]
    pub fn groups(&self) -> &[(Rank, u8)] {
        &self.groups
    }
}
