use crate::id::DenseKey;
use std::fmt;
use std::marker::PhantomData;

/// Non-negative counts over a closed key set.
///
/// Every key in `0..len` has a cell; keys past the end read as zero. The same
/// type backs resource stock, producer stock, prices and outputs, so equality
/// and hashing only depend on the cells.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Counter<K> {
    cells: Vec<u32>,
    _key: PhantomData<K>,
}

impl<K: DenseKey> Counter<K> {
    /// A zeroed counter with one cell per key.
    pub fn with_keys(len: usize) -> Self {
        Self {
            cells: vec![0; len],
            _key: PhantomData,
        }
    }

    /// Build from `(key, amount)` entries. Repeated keys accumulate.
    pub fn from_entries(len: usize, entries: &[(K, u32)]) -> Self {
        let mut counter = Self::with_keys(len);
        for &(key, amount) in entries {
            counter.add(key, amount);
        }
        counter
    }

    /// Number of keys in the closed set.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, key: K) -> u32 {
        self.cells.get(key.index()).copied().unwrap_or(0)
    }

    /// Set a count. Keys past the end widen the counter.
    pub fn set(&mut self, key: K, amount: u32) {
        let idx = key.index();
        if idx >= self.cells.len() {
            self.cells.resize(idx + 1, 0);
        }
        self.cells[idx] = amount;
    }

    pub fn add(&mut self, key: K, amount: u32) {
        let current = self.get(key);
        self.set(key, current.saturating_add(amount));
    }

    /// Remove `amount` if available. Returns `false` and leaves the count
    /// untouched when it would go negative.
    #[must_use = "a false return means nothing was removed"]
    pub fn remove(&mut self, key: K, amount: u32) -> bool {
        match self.get(key).checked_sub(amount) {
            Some(left) => {
                self.set(key, left);
                true
            }
            None => false,
        }
    }

    /// True if every count in `other` is covered by this counter.
    pub fn covers(&self, other: &Counter<K>) -> bool {
        other.iter().all(|(key, needed)| self.get(key) >= needed)
    }

    /// Subtract all of `other`, all-or-nothing.
    #[must_use = "a false return means nothing was subtracted"]
    pub fn subtract(&mut self, other: &Counter<K>) -> bool {
        if !self.covers(other) {
            return false;
        }
        for (key, amount) in other.iter_nonzero() {
            let current = self.get(key);
            self.set(key, current - amount);
        }
        true
    }

    /// Add `other` multiplied by `factor`.
    pub fn add_scaled(&mut self, other: &Counter<K>, factor: u32) {
        for (key, amount) in other.iter_nonzero() {
            self.add(key, amount.saturating_mul(factor));
        }
    }

    /// Every key with its count, zeros included, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, u32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &amount)| (K::from_index(idx), amount))
    }

    /// Keys with a non-zero count, in key order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (K, u32)> + '_ {
        self.iter().filter(|&(_, amount)| amount > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&amount| amount == 0)
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&amount| u64::from(amount)).sum()
    }

    /// Raw cells in key order.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }
}

impl<K> fmt::Debug for Counter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.cells.iter()).finish()
    }
}
