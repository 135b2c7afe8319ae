//! Heads-up preflop equity cache.
//!
//! Two holdings are reduced to a [`PreflopKey`] by renaming suits to the
//! abstract letters `w x y z` so that matchups differing only by a suit
//! permutation share one key. The key stores the first holding's equity;
//! the [`PreflopTable`] text form is one `holdingA holdingB equity` line per
//! key, e.g. `AwKw QxQy 0.46231`.

use super::{EquityCalculator, EquityConfig, EquityError};
use crate::cards::{Card, Rank, Suit};
use crate::deck::Deck;
use crate::evaluator::combinations::Combinations;
use crate::hand::HoleCards;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

const SUIT_LETTERS: [char; 4] = ['w', 'x', 'y', 'z'];

const SUIT_PERMUTATIONS: [[u8; 4]; 24] = suit_permutations();

const fn suit_permutations() -> [[u8; 4]; 24] {
    let mut out = [[0u8; 4]; 24];
    let mut n = 0;
    let mut a = 0u8;
    while a < 4 {
        let mut b = 0u8;
        while b < 4 {
            let mut c = 0u8;
            while c < 4 {
                if a != b && a != c && b != c {
                    out[n] = [a, b, c, 6 - a - b - c];
                    n += 1;
                }
                c += 1;
            }
            b += 1;
        }
        a += 1;
    }
    out
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum TableError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: malformed entry '{text}'")]
    MalformedLine { line: usize, text: String },
    #[error("malformed key '{0}'")]
    MalformedKey(String),
}

/// Card with its suit renamed to an abstract letter index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct KeyCard {
    rank: Reverse<Rank>,
    suit: u8,
}

impl fmt::Display for KeyCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.0, SUIT_LETTERS[self.suit as usize])
    }
}

/// Suit-isomorphism class of an ordered pair of holdings.
///
/// ```
/// use poker_settle::equity::preflop::PreflopKey;
/// use poker_settle::hand::HoleCards;
///
/// let a: HoleCards = "Qh Qs".parse().unwrap();
/// let b: HoleCards = "Ad Kd".parse().unwrap();
/// let (key, flipped) = PreflopKey::canonical(&a, &b);
/// assert_eq!(key.to_string(), "AwKw QxQy");
/// assert!(flipped);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreflopKey {
    cards: [KeyCard; 4],
}

impl PreflopKey {
    /// The smallest encoding over every suit renaming and both holding
    /// orders. `flipped` is set when the key lists `b` first.
    pub fn canonical(a: &HoleCards, b: &HoleCards) -> (Self, bool) {
        let mut best = (Self::encode(a, b, &SUIT_PERMUTATIONS[0]), false);
        for perm in &SUIT_PERMUTATIONS {
            for (flipped, x, y) in [(false, a, b), (true, b, a)] {
                let key = Self::encode(x, y, perm);
                if key < best.0 {
                    best = (key, flipped);
                }
            }
        }
        best
    }

    fn encode(x: &HoleCards, y: &HoleCards, perm: &[u8; 4]) -> Self {
        let map = |c: Card| KeyCard { rank: Reverse(c.rank()), suit: perm[c.suit().index()] };
        let mut first = [map(x.first()), map(x.second())];
        let mut second = [map(y.first()), map(y.second())];
        first.sort_unstable();
        second.sort_unstable();
        Self { cards: [first[0], first[1], second[0], second[1]] }
    }

    /// Concrete holdings in this class, with letter `w` read as clubs and so
    /// on. `None` when the key names the same card twice.
    pub fn representative(&self) -> Option<(HoleCards, HoleCards)> {
        let concrete = |k: KeyCard| Card::new(k.rank.0, Suit::ALL[k.suit as usize]);
        let [c0, c1, c2, c3] = self.cards.map(concrete);
        let a = HoleCards::try_new(c0, c1).ok()?;
        let b = HoleCards::try_new(c2, c3).ok()?;
        let used = [c0, c1, c2, c3];
        if crate::hand::first_duplicate(used).is_some() {
            return None;
        }
        Some((a, b))
    }
}

impl fmt::Display for PreflopKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.cards;
        write!(f, "{a}{b} {c}{d}")
    }
}

impl FromStr for PreflopKey {
    type Err = TableError;

    /// Parses `"AwKw QxQy"` and re-canonicalizes it; a key that is a valid
    /// but non-canonical spelling of its class is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || TableError::MalformedKey(s.to_string());
        let mut cards = Vec::with_capacity(4);
        for token in s.split_whitespace() {
            let chars: Vec<char> = token.chars().collect();
            if chars.len() != 4 {
                return Err(bad());
            }
            for pair in chars.chunks(2) {
                let rank = Rank::try_from(pair[0]).map_err(|_| bad())?;
                let suit = SUIT_LETTERS.iter().position(|&l| l == pair[1]).ok_or_else(bad)?;
                cards.push(KeyCard { rank: Reverse(rank), suit: suit as u8 });
            }
        }
        let cards: [KeyCard; 4] = cards.try_into().map_err(|_| bad())?;
        let key = Self { cards };
        let (a, b) = key.representative().ok_or_else(bad)?;
        let (canonical, flipped) = Self::canonical(&a, &b);
        if canonical != key || flipped {
            return Err(bad());
        }
        Ok(key)
    }
}

/// Heads-up preflop equities keyed by [`PreflopKey`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreflopTable {
    entries: BTreeMap<PreflopKey, f64>,
}

impl PreflopTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record the equity of the key's first holding.
    pub fn insert(&mut self, key: PreflopKey, equity: f64) {
        self.entries.insert(key, equity);
    }

    pub fn get(&self, key: &PreflopKey) -> Option<f64> {
        self.entries.get(key).copied()
    }

    /// Record `a`'s equity against `b`.
    pub fn insert_matchup(&mut self, a: &HoleCards, b: &HoleCards, equity_a: f64) {
        let (key, flipped) = PreflopKey::canonical(a, b);
        self.insert(key, if flipped { 1.0 - equity_a } else { equity_a });
    }

    /// Equities of `a` and `b`, in that order.
    pub fn lookup(&self, a: &HoleCards, b: &HoleCards) -> Option<[f64; 2]> {
        let (key, flipped) = PreflopKey::canonical(a, b);
        let e = self.get(&key)?;
        Some(if flipped { [1.0 - e, e] } else { [e, 1.0 - e] })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PreflopKey, f64)> {
        self.entries.iter().map(|(k, &e)| (k, e))
    }

    /// Parse the text form. Blank lines and lines starting with `#` are
    /// skipped.
    ///
    /// ```
    /// use poker_settle::equity::preflop::PreflopTable;
    /// use poker_settle::hand::HoleCards;
    ///
    /// let table = PreflopTable::parse("AwKw QxQy 0.46000\n").unwrap();
    /// let a: HoleCards = "Qd Qc".parse().unwrap();
    /// let b: HoleCards = "Ah Kh".parse().unwrap();
    /// assert_eq!(table.lookup(&a, &b), Some([0.54, 0.46]));
    /// ```
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let mut table = Self::new();
        for (i, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let malformed = || TableError::MalformedLine { line: i + 1, text: line.to_string() };
            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            let [a, b, equity] = fields[..] else {
                return Err(malformed());
            };
            let key: PreflopKey = format!("{a} {b}").parse()?;
            let equity: f64 = equity.parse().map_err(|_| malformed())?;
            if !(0.0..=1.0).contains(&equity) {
                return Err(malformed());
            }
            table.insert(key, equity);
        }
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Write one line per key, equities to five decimals.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        for (key, equity) in self.iter() {
            writeln!(w, "{key} {equity:.5}")?;
        }
        w.flush()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TableError> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))?;
        Ok(())
    }
}

/// Every canonical heads-up matchup, in key order.
pub fn canonical_matchups() -> Vec<PreflopKey> {
    let deck = Deck::standard();
    let cards = deck.as_slice();
    let holdings: Vec<HoleCards> = Combinations::new(cards.len(), 2)
        .filter_map(|c| HoleCards::try_new(cards[c[0]], cards[c[1]]).ok())
        .collect();

    let mut keys = BTreeSet::new();
    for (i, a) in holdings.iter().enumerate() {
        for b in &holdings[i + 1..] {
            let disjoint = a.as_array().iter().all(|c| !b.as_array().contains(c));
            if disjoint {
                keys.insert(PreflopKey::canonical(a, b).0);
            }
        }
    }
    keys.into_iter().collect()
}

/// Compute the equity of every key in `keys` and collect them into a table.
/// `progress` is called after each key with (done, total, key, equity).
pub fn build_table<F>(
    keys: &[PreflopKey],
    iteration_cap: Option<u64>,
    seed: u64,
    mut progress: F,
) -> Result<PreflopTable, EquityError>
where
    F: FnMut(usize, usize, &PreflopKey, f64),
{
    let calc = EquityCalculator::new(EquityConfig {
        iteration_cap,
        multiway_preflop_cap: None,
        seed,
    });
    let mut table = PreflopTable::new();
    for (done, key) in keys.iter().enumerate() {
        let Some((a, b)) = key.representative() else {
            continue;
        };
        let eq = calc.equities(&[a, b], &[])?;
        table.insert(*key, eq[0]);
        progress(done + 1, keys.len(), key, eq[0]);
    }
    Ok(table)
}
