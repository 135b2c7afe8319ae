use std::ops::Deref;

/// Largest subset size the iterator supports (a full 7-card hand).
pub const MAX_K: usize = 7;

/// One k-subset of `0..n`, indices ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combination {
    indices: [usize; MAX_K],
    len: usize,
}

impl Deref for Combination {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.indices[..self.len]
    }
}

/// Iterator over all C(n, k) k-subsets of `0..n` in lexicographic order.
///
/// Lazy, finite and restartable (it is `Clone`); replaces nested loops and
/// deal-one-card-at-a-time recursion alike.
///
/// ```
/// use poker_settle::evaluator::combinations::Combinations;
///
/// let all: Vec<Vec<usize>> = Combinations::new(4, 2).map(|c| c.to_vec()).collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], vec![0, 1]);
/// assert_eq!(all[5], vec![2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    k: usize,
    indices: [usize; MAX_K],
    done: bool,
}

impl Combinations {
    /// Panics if `k > MAX_K`; callers pass at most five board cards or
    /// seven hand cards.
    pub fn new(n: usize, k: usize) -> Self {
        assert!(k <= MAX_K, "k={k} exceeds {MAX_K}");
        let mut indices = [0usize; MAX_K];
        for (i, slot) in indices.iter_mut().enumerate().take(k) {
            *slot = i;
        }
        Self { n, k, indices, done: k > n }
    }
}

impl Iterator for Combinations {
    type Item = Combination;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = Combination { indices: self.indices, len: self.k };

        if self.k == 0 {
            self.done = true;
            return Some(result);
        }

        // Find the rightmost index that can still move right
        let mut i = self.k - 1;
        loop {
            if self.indices[i] < self.n - (self.k - i) {
                self.indices[i] += 1;
                for j in (i + 1)..self.k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
        }

        Some(result)
    }
}

/// C(n, k), saturating at `u64::MAX`.
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc * u128::from(n - i) / u128::from(i + 1);
        if acc > u128::from(u64::MAX) {
            return u64::MAX;
        }
    }
    acc as u64
}
