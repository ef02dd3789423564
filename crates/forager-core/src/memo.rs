use crate::ledger::{Ledger, StateKey};
use std::collections::HashSet;

/// The set of state keys already expanded during one search run.
///
/// Built fresh for every run and owned by it; never shared between runs.
#[derive(Debug, Default)]
pub struct MemoTable {
    visited: HashSet<StateKey>,
}

impl MemoTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `ledger` visited. Returns `false` if an equivalent ledger was
    /// already marked.
    pub fn mark(&mut self, ledger: &Ledger) -> bool {
        self.visited.insert(ledger.state_key())
    }

    pub fn contains(&self, ledger: &Ledger) -> bool {
        self.visited.contains(&ledger.state_key())
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    pub fn clear(&mut self) {
        self.visited.clear();
    }
}
