//! Win probabilities for two or more holdings on a partial board.
//!
//! Every completion of the board is ranked with the hand evaluator; ties
//! split the credit for that completion evenly. When the number of
//! completions exceeds the iteration cap a seeded random sample of
//! completions stands in for the full enumeration.

pub mod preflop;
pub mod runouts;

use crate::cards::Card;
use crate::deck::Deck;
use crate::evaluator::{evaluate_unchecked, holdem_cards, EvalError, EvaluatedHand};
use crate::hand::{first_duplicate, Board, HoleCards};
use log::debug;
use preflop::PreflopTable;
use runouts::Runouts;

/// Seed used by [`equities`] and [`EquityConfig::default`].
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Sample size used for preflop spots with more than two holdings.
pub const MULTIWAY_PREFLOP_CAP: u64 = 20_000;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EquityError {
    #[error("need at least two holdings, got {0}")]
    TooFewHoldings(usize),
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("too many board cards: {0}")]
    TooManyBoardCards(usize),
    #[error("need {needed} undealt cards, only {available} remain")]
    InsufficientCards { needed: usize, available: usize },
    #[error(transparent)]
    Eval(#[from] EvalError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquityConfig {
    /// Enumerate exhaustively up to this many completions, sample beyond it.
    pub iteration_cap: Option<u64>,
    /// Tighter cap applied to empty boards with three or more holdings.
    pub multiway_preflop_cap: Option<u64>,
    pub seed: u64,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            iteration_cap: None,
            multiway_preflop_cap: Some(MULTIWAY_PREFLOP_CAP),
            seed: DEFAULT_SEED,
        }
    }
}

/// Equity computation with configured caps, seed and an optional preflop
/// lookup table for heads-up spots with no board.
///
/// ```
/// use poker_settle::equity::{EquityCalculator, EquityConfig};
/// use poker_settle::hand::{Board, HoleCards};
///
/// let calc = EquityCalculator::new(EquityConfig::default());
/// let holdings: Vec<HoleCards> = vec!["4h 4d".parse().unwrap(), "Jd Js".parse().unwrap()];
/// let board: Board = "Ah Kc 3d".parse().unwrap();
/// let eq = calc.equities(&holdings, board.as_slice()).unwrap();
/// assert!((eq[0] - 0.10).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EquityCalculator {
    config: EquityConfig,
    table: Option<PreflopTable>,
}

impl EquityCalculator {
    pub fn new(config: EquityConfig) -> Self {
        Self { config, table: None }
    }

    pub fn with_preflop_table(mut self, table: PreflopTable) -> Self {
        self.table = Some(table);
        self
    }

    pub fn config(&self) -> &EquityConfig {
        &self.config
    }

    /// One probability per holding, in input order, summing to 1.
    pub fn equities(&self, holdings: &[HoleCards], board: &[Card]) -> Result<Vec<f64>, EquityError> {
        validate(holdings, board)?;

        if board.is_empty() {
            if let (Some(table), [a, b]) = (&self.table, holdings) {
                if let Some(eq) = table.lookup(a, b) {
                    debug!("preflop table hit for {a} vs {b}");
                    return Ok(eq.to_vec());
                }
                debug!("preflop table miss for {a} vs {b}");
            }
        }

        let mut cap = self.config.iteration_cap;
        if board.is_empty() && holdings.len() > 2 {
            if let Some(multiway) = self.config.multiway_preflop_cap {
                cap = Some(cap.map_or(multiway, |c| c.min(multiway)));
            }
        }
        compute(holdings, board, cap, self.config.seed)
    }
}

/// Each holding's share of the pot over every completion of `board`.
///
/// With `iteration_cap` set and more completions than the cap, that many
/// completions are sampled with a fixed seed, so repeated calls agree.
///
/// ```
/// use poker_settle::equity::equities;
/// use poker_settle::hand::{Board, HoleCards};
///
/// let holdings: Vec<HoleCards> = vec!["As Ah".parse().unwrap(), "Ks Kh".parse().unwrap()];
/// let board: Board = "2c 7d 9h Jc 3s".parse().unwrap();
/// assert_eq!(equities(&holdings, board.as_slice(), None).unwrap(), vec![1.0, 0.0]);
/// ```
pub fn equities(
    holdings: &[HoleCards],
    board: &[Card],
    iteration_cap: Option<u64>,
) -> Result<Vec<f64>, EquityError> {
    validate(holdings, board)?;
    compute(holdings, board, iteration_cap, DEFAULT_SEED)
}

fn validate(holdings: &[HoleCards], board: &[Card]) -> Result<(), EquityError> {
    if holdings.len() < 2 {
        return Err(EquityError::TooFewHoldings(holdings.len()));
    }
    if board.len() > Board::MAX_CARDS {
        return Err(EquityError::TooManyBoardCards(board.len()));
    }
    let used = holdings.iter().flat_map(|h| h.as_array()).chain(board.iter().copied());
    if let Some(dup) = first_duplicate(used) {
        return Err(EquityError::DuplicateCard(dup));
    }
    Ok(())
}

/// Inputs must already be validated.
fn compute(
    holdings: &[HoleCards],
    board: &[Card],
    cap: Option<u64>,
    seed: u64,
) -> Result<Vec<f64>, EquityError> {
    if board.len() == Board::MAX_CARDS {
        let mut shares = vec![0.0; holdings.len()];
        credit_winners(holdings, board, &mut shares);
        return Ok(shares);
    }

    let k = Board::MAX_CARDS - board.len();
    let mut used: Vec<Card> = holdings.iter().flat_map(|h| h.as_array()).collect();
    used.extend_from_slice(board);
    let deck = Deck::without(&used);
    if deck.len() < k {
        return Err(EquityError::InsufficientCards { needed: k, available: deck.len() });
    }

    let runouts = Runouts::new(deck, k, cap, seed);
    debug!(
        "equity: {} holdings, board [{}], {} of {} completions ({})",
        holdings.len(),
        crate::cards::join_cards(board),
        runouts.draws(),
        runouts.total(),
        if runouts.is_exhaustive() { "exhaustive" } else { "sampled" }
    );

    let mut wins = vec![0.0; holdings.len()];
    let mut full = Vec::with_capacity(Board::MAX_CARDS);
    for completion in runouts {
        full.clear();
        full.extend_from_slice(board);
        full.extend_from_slice(&completion);
        credit_winners(holdings, &full, &mut wins);
    }

    let total: f64 = wins.iter().sum();
    Ok(wins.into_iter().map(|w| w / total).collect())
}

/// Add one unit of credit for a complete board, split among the best hands.
fn credit_winners(holdings: &[HoleCards], board: &[Card], credit: &mut [f64]) {
    let hands: Vec<EvaluatedHand> =
        holdings.iter().map(|h| evaluate_unchecked(&holdem_cards(h, board))).collect();
    let Some(best) = hands.iter().max().copied() else {
        return;
    };
    let winners = hands.iter().filter(|&&h| h == best).count() as f64;
    for (c, h) in credit.iter_mut().zip(&hands) {
        if *h == best {
            *c += 1.0 / winners;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn holdings(specs: &[&str]) -> Vec<HoleCards> {
        specs.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn rejects_invalid_input() {
        let one = holdings(&["As Ks"]);
        assert_eq!(equities(&one, &[], None).unwrap_err(), EquityError::TooFewHoldings(1));

        let two = holdings(&["As Ks", "Qd Qc"]);
        let six = parse_cards("2c 3c 4c 5c 6c 7c").unwrap();
        assert_eq!(equities(&two, &six, None).unwrap_err(), EquityError::TooManyBoardCards(6));

        let overlap = parse_cards("Qd 7h 2s").unwrap();
        assert!(matches!(equities(&two, &overlap, None), Err(EquityError::DuplicateCard(_))));

        let shared = holdings(&["As Ks", "As Qc"]);
        assert!(matches!(equities(&shared, &[], None), Err(EquityError::DuplicateCard(_))));
    }

    #[test]
    fn complete_board_splits_ties_evenly() {
        let h = holdings(&["Ah 2c", "Ad 3c", "Kd Kc"]);
        let board = parse_cards("As Qs Js Ts 4h").unwrap();
        // both aces pair up with the same board kickers
        assert_eq!(equities(&h, &board, None).unwrap(), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn flop_enumeration_matches_known_odds() {
        let h = holdings(&["4h 4d", "Jd Js"]);
        let board = parse_cards("Ah Kc 3d").unwrap();
        let eq = equities(&h, &board, None).unwrap();
        assert!((eq[0] - 0.10).abs() < 1e-9, "got {eq:?}");
        assert!((eq[1] - 0.90).abs() < 1e-9, "got {eq:?}");
    }

    #[test]
    fn sampled_is_reproducible_and_normalized() {
        let h = holdings(&["As Ah", "Kd Kc", "7s 6s"]);
        let a = equities(&h, &[], Some(500)).unwrap();
        let b = equities(&h, &[], Some(500)).unwrap();
        assert_eq!(a, b);
        assert!((a.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(a[0] > a[1] && a[0] > a[2]);
    }

    #[test]
    fn calculator_caps_multiway_preflop() {
        let config = EquityConfig { multiway_preflop_cap: Some(300), ..EquityConfig::default() };
        let calc = EquityCalculator::new(config);
        let h = holdings(&["As Ah", "Kd Kc", "7s 6s"]);
        assert_eq!(calc.equities(&h, &[]).unwrap(), equities(&h, &[], Some(300)).unwrap());
    }

    #[test]
    fn calculator_uses_preflop_table() {
        let h = holdings(&["As Ah", "Kd Kc"]);
        let mut table = PreflopTable::new();
        table.insert_matchup(&h[0], &h[1], 0.25);
        let calc = EquityCalculator::default().with_preflop_table(table);
        assert_eq!(calc.equities(&h, &[]).unwrap(), vec![0.25, 0.75]);
        let swapped = [h[1], h[0]];
        assert_eq!(calc.equities(&swapped, &[]).unwrap(), vec![0.75, 0.25]);
    }
}
