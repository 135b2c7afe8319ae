//! Pot settlement for a finished hand.
//!
//! Amounts are integers in the smallest currency unit. Side pots are layered
//! by the distinct contribution levels of the players still in the hand;
//! each pot is split per board, then among the best hands on that board,
//! with odd units going to the tied winners in ascending table position.

use crate::cards::Card;
use crate::equity::{EquityCalculator, EquityError};
use crate::evaluator::{evaluate, holdem_cards, EvalError, EvaluatedHand};
use crate::hand::{first_duplicate, Board, HoleCards, RevealedCards};
use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Betting rounds that take contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    #[default]
    Active,
    Folded(Street),
    AllIn,
}

/// One player's part in a finished hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub id: String,
    /// Seating order for odd-unit ties: lower is earlier to act.
    pub position: usize,
    pub bets: [u64; 4],
    pub ante: u64,
    pub status: PlayerStatus,
    pub cards: RevealedCards,
}

impl Seat {
    pub fn new(id: impl Into<String>, position: usize) -> Self {
        Self {
            id: id.into(),
            position,
            bets: [0; 4],
            ante: 0,
            status: PlayerStatus::Active,
            cards: RevealedCards::hidden(),
        }
    }

    /// Add `amount` to what this seat put in on `street`.
    pub fn bet(mut self, street: Street, amount: u64) -> Self {
        self.bets[street.index()] += amount;
        self
    }

    pub fn ante(mut self, amount: u64) -> Self {
        self.ante = amount;
        self
    }

    pub fn folded(mut self, street: Street) -> Self {
        self.status = PlayerStatus::Folded(street);
        self
    }

    pub fn all_in(mut self) -> Self {
        self.status = PlayerStatus::AllIn;
        self
    }

    pub fn showing(mut self, cards: impl Into<RevealedCards>) -> Self {
        self.cards = cards.into();
        self
    }

    /// Sum of street bets, antes excluded.
    pub fn contribution(&self) -> u64 {
        self.bets.iter().sum()
    }

    /// Everything this seat put in, antes included.
    pub fn invested(&self) -> u64 {
        self.contribution() + self.ante
    }

    pub fn is_folded(&self) -> bool {
        matches!(self.status, PlayerStatus::Folded(_))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettleError {
    #[error("unknown player: {0}")]
    UnknownPlayer(String),
    #[error("duplicate player: {0}")]
    DuplicatePlayer(String),
    #[error("hand has no players")]
    NoPlayers,
    #[error("every player folded")]
    EveryoneFolded,
    #[error("expected at least one board, got {0}")]
    BoardCount(usize),
    #[error("board {index} has {len} cards; a showdown needs 5")]
    IncompleteBoard { index: usize, len: usize },
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("hand evaluation failed: {0}")]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Equity(#[from] EquityError),
    #[error("invariant violated: no eligible winner for pot {pot}")]
    NoEligibleWinner { pot: usize },
    #[error("invariant violated: paid out {paid}, collected {owed}")]
    Conservation { paid: u64, owed: u64 },
}

impl SettleError {
    /// True for errors that mean the ledger or the settlement logic is
    /// broken, as opposed to bad caller input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, SettleError::NoEligibleWinner { .. } | SettleError::Conservation { .. })
    }
}

/// Contributions, statuses and shown cards for one hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandLedger {
    seats: Vec<Seat>,
}

impl HandLedger {
    pub fn new(seats: Vec<Seat>) -> Result<Self, SettleError> {
        if seats.is_empty() {
            return Err(SettleError::NoPlayers);
        }
        let mut ids = BTreeSet::new();
        for s in &seats {
            if !ids.insert(s.id.as_str()) {
                return Err(SettleError::DuplicatePlayer(s.id.clone()));
            }
        }
        Ok(Self { seats })
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == id)
    }

    /// Seats that have not folded, all-in players included.
    pub fn contenders(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().filter(|s| !s.is_folded())
    }

    pub fn total_antes(&self) -> u64 {
        self.seats.iter().map(|s| s.ante).sum()
    }

    /// Everything in the middle: street bets plus antes.
    pub fn pot_total(&self) -> u64 {
        self.seats.iter().map(Seat::invested).sum()
    }
}

/// One layer of the pot and the players who can win it, earliest position
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pot {
    pub value: u64,
    pub eligible: Vec<String>,
}

/// Amount received per player. Players who receive nothing are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payouts {
    amounts: BTreeMap<String, u64>,
}

impl Payouts {
    pub fn get(&self, id: &str) -> u64 {
        self.amounts.get(id).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.amounts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.amounts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn as_map(&self) -> &BTreeMap<String, u64> {
        &self.amounts
    }

    /// Received minus invested (antes included).
    pub fn net(&self, ledger: &HandLedger, id: &str) -> Result<i64, SettleError> {
        let seat = ledger.seat(id).ok_or_else(|| SettleError::UnknownPlayer(id.to_string()))?;
        Ok(self.get(id) as i64 - seat.invested() as i64)
    }

    /// True when the player ended the hand ahead.
    pub fn did_player_win(&self, ledger: &HandLedger, id: &str) -> Result<bool, SettleError> {
        Ok(self.net(ledger, id)? > 0)
    }

    fn credit(&mut self, id: &str, amount: u64) {
        if amount > 0 {
            *self.amounts.entry(id.to_string()).or_insert(0) += amount;
        }
    }
}

/// Layer the pot by the distinct contribution levels of non-folded players.
///
/// Every seat pays into a layer what it contributed between the previous
/// level and this one; folded seats pay in but are never eligible.
/// Contributions above the top level go to the last pot and antes go to the
/// first.
///
/// ```
/// use poker_settle::settle::{build_pots, HandLedger, Seat, Street};
///
/// let ledger = HandLedger::new(vec![
///     Seat::new("short", 0).bet(Street::Preflop, 50).all_in(),
///     Seat::new("deep", 1).bet(Street::Preflop, 200),
///     Seat::new("caller", 2).bet(Street::Preflop, 200),
/// ])
/// .unwrap();
/// let pots = build_pots(&ledger);
/// assert_eq!(pots.len(), 2);
/// assert_eq!(pots[0].value, 150);
/// assert_eq!(pots[1].value, 300);
/// assert_eq!(pots[1].eligible, vec!["deep".to_string(), "caller".to_string()]);
/// ```
pub fn build_pots(ledger: &HandLedger) -> Vec<Pot> {
    let mut contenders: Vec<&Seat> = ledger.contenders().collect();
    contenders.sort_by_key(|s| (s.position, s.id.as_str()));

    let mut levels: Vec<u64> =
        contenders.iter().map(|s| s.contribution()).filter(|&c| c > 0).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::with_capacity(levels.len());
    let mut prev = 0u64;
    for &level in &levels {
        let value: u64 = ledger
            .seats()
            .iter()
            .map(|s| s.contribution().min(level) - s.contribution().min(prev))
            .sum();
        let eligible =
            contenders.iter().filter(|s| s.contribution() >= level).map(|s| s.id.clone()).collect();
        pots.push(Pot { value, eligible });
        prev = level;
    }

    let overflow: u64 = ledger.seats().iter().map(|s| s.contribution().saturating_sub(prev)).sum();
    let antes = ledger.total_antes();
    if pots.is_empty() && overflow + antes > 0 {
        let eligible = contenders.iter().map(|s| s.id.clone()).collect();
        pots.push(Pot { value: 0, eligible });
    }
    if let Some(last) = pots.last_mut() {
        last.value += overflow;
    }
    if let Some(first) = pots.first_mut() {
        first.value += antes;
    }

    for (i, pot) in pots.iter().enumerate() {
        debug!("pot {i}: {} eligible {:?}", pot.value, pot.eligible);
    }
    pots
}

/// Settle a finished hand over one or more run-outs.
///
/// A lone remaining player takes everything without a showdown and `boards`
/// is not consulted. Otherwise every board must be complete; each pot is
/// divided between the boards (earlier boards take the odd units) and each
/// board's share goes to the best revealed hands among the pot's eligible
/// players.
///
/// ```
/// use poker_settle::hand::{Board, HoleCards};
/// use poker_settle::settle::{settle, HandLedger, Seat, Street};
///
/// let aa: HoleCards = "As Ah".parse().unwrap();
/// let kk: HoleCards = "Ks Kh".parse().unwrap();
/// let ledger = HandLedger::new(vec![
///     Seat::new("A", 0).bet(Street::Preflop, 1000).all_in().showing(aa),
///     Seat::new("B", 1).bet(Street::Preflop, 1000).showing(kk),
/// ])
/// .unwrap();
/// let board: Board = "Kd 7c 2h 9s 3d".parse().unwrap();
/// let payouts = settle(&ledger, &[board]).unwrap();
/// assert_eq!(payouts.get("B"), 2000);
/// assert!(payouts.did_player_win(&ledger, "B").unwrap());
/// assert!(!payouts.did_player_win(&ledger, "A").unwrap());
/// ```
pub fn settle(ledger: &HandLedger, boards: &[Board]) -> Result<Payouts, SettleError> {
    let owed = ledger.pot_total();
    let contenders: Vec<&Seat> = ledger.contenders().collect();
    let mut payouts = Payouts::default();

    match contenders.as_slice() {
        [] => return Err(SettleError::EveryoneFolded),
        [only] => {
            debug!("{} takes {owed} uncontested", only.id);
            payouts.credit(&only.id, owed);
            return check_conservation(payouts, owed);
        }
        _ => {}
    }

    if boards.is_empty() {
        return Err(SettleError::BoardCount(0));
    }
    for (index, board) in boards.iter().enumerate() {
        if !board.is_complete() {
            return Err(SettleError::IncompleteBoard { index, len: board.len() });
        }
        let shown = ledger.seats().iter().flat_map(|s| [s.cards.first(), s.cards.second()]).flatten();
        if let Some(dup) = first_duplicate(shown.chain(board.as_slice().iter().copied())) {
            return Err(SettleError::DuplicateCard(dup));
        }
    }

    // hands[b][seat] for every revealed contender
    let mut hands: Vec<BTreeMap<&str, EvaluatedHand>> = Vec::with_capacity(boards.len());
    for board in boards {
        let mut on_board = BTreeMap::new();
        for seat in &contenders {
            if let Some(hole) = seat.cards.complete() {
                on_board.insert(seat.id.as_str(), evaluate(&holdem_cards(&hole, board.as_slice()))?);
            }
        }
        hands.push(on_board);
    }

    let boards_n = boards.len() as u64;
    for (pot_index, pot) in build_pots(ledger).iter().enumerate() {
        if let [only] = pot.eligible.as_slice() {
            debug!("pot {pot_index}: {} to {only}, sole eligible", pot.value);
            payouts.credit(only, pot.value);
            continue;
        }
        for (b, on_board) in hands.iter().enumerate() {
            let share = pot.value / boards_n + u64::from((b as u64) < pot.value % boards_n);
            let winners = best_hands(pot, on_board);
            if winners.is_empty() {
                return Err(SettleError::NoEligibleWinner { pot: pot_index });
            }
            debug!("pot {pot_index} board {b}: {share} to {winners:?}");
            split(&mut payouts, &winners, share);
        }
    }

    check_conservation(payouts, owed)
}

/// Eligible players holding the best hand on a board, earliest position first.
fn best_hands<'a>(pot: &'a Pot, on_board: &BTreeMap<&str, EvaluatedHand>) -> Vec<&'a str> {
    let shown: Vec<(&str, EvaluatedHand)> = pot
        .eligible
        .iter()
        .filter_map(|id| on_board.get(id.as_str()).map(|h| (id.as_str(), *h)))
        .collect();
    let Some(best) = shown.iter().map(|(_, h)| *h).max() else {
        return Vec::new();
    };
    shown.iter().filter(|(_, h)| *h == best).map(|(id, _)| *id).collect()
}

/// Equal shares, remaining units one each from the front of `winners`.
fn split(payouts: &mut Payouts, winners: &[&str], amount: u64) {
    let n = winners.len() as u64;
    let per = amount / n;
    let mut rem = amount % n;
    for id in winners {
        let mut amt = per;
        if rem > 0 {
            amt += 1;
            rem -= 1;
        }
        trace!("{id} receives {amt}");
        payouts.credit(id, amt);
    }
}

fn check_conservation(payouts: Payouts, owed: u64) -> Result<Payouts, SettleError> {
    let paid = payouts.total();
    if paid != owed {
        return Err(SettleError::Conservation { paid, owed });
    }
    Ok(payouts)
}

/// Equity of every non-folded player with both cards shown, on a partial
/// board. A single such player gets 1.0; none gives an empty map.
pub fn showdown_equities(
    ledger: &HandLedger,
    board: &Board,
) -> Result<BTreeMap<String, f64>, SettleError> {
    let shown: Vec<(&str, HoleCards)> =
        ledger.contenders().filter_map(|s| s.cards.complete().map(|h| (s.id.as_str(), h))).collect();
    match shown.as_slice() {
        [] => Ok(BTreeMap::new()),
        [(id, _)] => Ok(BTreeMap::from([(id.to_string(), 1.0)])),
        _ => {
            let holdings: Vec<HoleCards> = shown.iter().map(|(_, h)| *h).collect();
            let eq = EquityCalculator::default().equities(&holdings, board.as_slice())?;
            Ok(shown.iter().map(|(id, _)| id.to_string()).zip(eq).collect())
        }
    }
}
