//! Exhaustive purchase search.
//!
//! From the root ledger every step branches into one child per affordable,
//! worthwhile purchase (in catalog declaration order) plus a final
//! no-purchase child. Ledgers whose state key was already expanded are dead
//! branches. Terminal ledgers are reduced to the first one with the strictly
//! largest target stock, in exploration order.
//!
//! # Traversal
//!
//! - [`Traversal::DepthFirst`] recurses; depth is bounded by the horizon.
//! - [`Traversal::BreadthFirst`] drains an explicit FIFO frontier.
//!
//! Both visit the same set of state keys, so they agree on the best score.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, CatalogError};
use crate::id::*;
use crate::ledger::Ledger;
use crate::memo::MemoTable;
use crate::prune::PruningPolicy;
use crate::trace::{Trace, TraceArena};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Frontier discipline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    #[default]
    DepthFirst,
    BreadthFirst,
}

/// Knobs for one search run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub traversal: Traversal,
    pub pruning: PruningPolicy,
    /// Keep narration and parent links so the winning path can be replayed.
    pub record_trace: bool,
    /// Abort once this many ledgers have been expanded.
    pub node_budget: Option<u64>,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Counters gathered during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Ledgers expanded (first visit of a state key).
    pub expanded: u64,
    /// Ledgers dropped because their state key was already expanded.
    pub memo_hits: u64,
    /// Terminal ledgers reached.
    pub terminals: u64,
    /// Affordable purchases skipped by the pruning policy.
    pub pruned_purchases: u64,
}

/// The best terminal ledger of a run and how it was found.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: Ledger,
    /// `target stock × economy id`.
    pub score: u64,
    pub stats: SearchStats,
    /// Present when [`SearchConfig::record_trace`] was set.
    pub trace: Option<Trace>,
}

impl SearchOutcome {
    pub fn target_stock(&self) -> u32 {
        self.best.target_stock()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("horizon must be at least 1, got {0}")]
    InvalidHorizon(u32),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("search finished without reaching a terminal state")]
    NoTerminalState,
    #[error("node budget of {budget} expansions exhausted")]
    BudgetExhausted { budget: u64 },
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// Finds the best purchase sequence for one economy.
///
/// Holds only read-only inputs; every call to [`solve`](Solver::solve) builds
/// its own memo table and trace arena.
#[derive(Debug, Clone)]
pub struct Solver<'c> {
    catalog: &'c Catalog,
    starter: ProducerId,
    target: ResourceId,
    config: SearchConfig,
}

impl<'c> Solver<'c> {
    /// Resolve the starter producer and target resource by name.
    pub fn new(catalog: &'c Catalog, starter: &str, target: &str) -> Result<Self, SearchError> {
        Ok(Self {
            catalog,
            starter: catalog.require_producer(starter)?,
            target: catalog.require_resource(target)?,
            config: SearchConfig::default(),
        })
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Best quality score reachable within `horizon` steps.
    pub fn run(&self, horizon: u32) -> Result<u64, SearchError> {
        self.solve(horizon).map(|outcome| outcome.score)
    }

    /// Full search result for `horizon` steps.
    pub fn solve(&self, horizon: u32) -> Result<SearchOutcome, SearchError> {
        if horizon < 1 {
            return Err(SearchError::InvalidHorizon(horizon));
        }

        let root = Ledger::root(self.catalog, self.starter, self.target, horizon)
            .with_events(self.config.record_trace);
        self.search(SearchRun::new(self.catalog, &self.config), root, horizon)
    }

    /// Traverse from `root` and package the best terminal ledger.
    fn search(&self, mut run: SearchRun<'_>, root: Ledger, horizon: u32) -> Result<SearchOutcome, SearchError> {
        let best = match self.config.traversal {
            Traversal::DepthFirst => run.expand(root)?,
            Traversal::BreadthFirst => run.breadth_first(root)?,
        };
        let best = best.ok_or(SearchError::NoTerminalState)?;

        let trace = self.config.record_trace.then(|| run.arena.trace_for(&best));
        let score = u64::from(best.target_stock()) * u64::from(self.catalog.economy_id());
        debug!(
            target: "forager::search",
            economy = self.catalog.economy_id(),
            horizon,
            best = best.target_stock(),
            score,
            expanded = run.stats.expanded,
            memo_hits = run.stats.memo_hits,
            terminals = run.stats.terminals,
            pruned = run.stats.pruned_purchases,
            "search finished"
        );

        Ok(SearchOutcome {
            best,
            score,
            stats: run.stats,
            trace,
        })
    }
}

// ---------------------------------------------------------------------------
// One run
// ---------------------------------------------------------------------------

/// Frontier entry for breadth-first traversal.
struct FrontierEntry {
    ledger: Ledger,
    /// Children still owe their advance step; the root does not.
    pending_advance: bool,
}

struct SearchRun<'a> {
    catalog: &'a Catalog,
    config: &'a SearchConfig,
    memo: MemoTable,
    arena: TraceArena,
    stats: SearchStats,
}

impl<'a> SearchRun<'a> {
    fn new(catalog: &'a Catalog, config: &'a SearchConfig) -> Self {
        Self {
            catalog,
            config,
            memo: MemoTable::new(),
            arena: TraceArena::new(),
            stats: SearchStats::default(),
        }
    }

    /// Depth-first expansion. `None` means nothing new was reachable from
    /// `ledger` because its state was already explored.
    fn expand(&mut self, ledger: Ledger) -> Result<Option<Ledger>, SearchError> {
        if ledger.is_done() {
            self.stats.terminals += 1;
            return Ok(Some(ledger));
        }
        if !self.enter(&ledger)? {
            return Ok(None);
        }

        let mut best = None;
        for mut child in self.successors(&ledger) {
            child.advance_minute();
            if let Some(candidate) = self.expand(child)? {
                best = Some(keep_first_best(best, candidate));
            }
        }
        Ok(best)
    }

    fn breadth_first(&mut self, root: Ledger) -> Result<Option<Ledger>, SearchError> {
        let mut frontier = VecDeque::new();
        frontier.push_back(FrontierEntry {
            ledger: root,
            pending_advance: false,
        });

        let mut best = None;
        while let Some(entry) = frontier.pop_front() {
            let mut ledger = entry.ledger;
            if entry.pending_advance {
                ledger.advance_minute();
            }
            if ledger.is_done() {
                self.stats.terminals += 1;
                best = Some(keep_first_best(best, ledger));
                continue;
            }
            if !self.enter(&ledger)? {
                continue;
            }
            for child in self.successors(&ledger) {
                frontier.push_back(FrontierEntry {
                    ledger: child,
                    pending_advance: true,
                });
            }
        }
        Ok(best)
    }

    /// Memo check and budget charge for a non-terminal ledger. Returns
    /// `false` for a dead branch.
    fn enter(&mut self, ledger: &Ledger) -> Result<bool, SearchError> {
        if !self.memo.mark(ledger) {
            self.stats.memo_hits += 1;
            return Ok(false);
        }
        self.stats.expanded += 1;
        if let Some(budget) = self.config.node_budget {
            if self.stats.expanded > budget {
                return Err(SearchError::BudgetExhausted { budget });
            }
        }
        Ok(true)
    }

    /// Children of `ledger` after buying, collecting and finalizing, but
    /// before their minute advances: purchases in declaration order, then
    /// the no-purchase child.
    fn successors(&mut self, ledger: &Ledger) -> Vec<Ledger> {
        let parent = self.config.record_trace.then(|| self.arena.record(ledger));
        let mut children = Vec::with_capacity(self.catalog.producer_count() + 1);

        if !ledger.is_last_step() {
            for producer in self.catalog.producer_ids() {
                if !self.catalog.can_afford(producer, ledger.stock()) {
                    continue;
                }
                if !self.config.pruning.allows(self.catalog, ledger, producer) {
                    self.stats.pruned_purchases += 1;
                    continue;
                }
                let mut child = ledger.branch(parent);
                if !child.buy(self.catalog, producer) {
                    continue;
                }
                child.collect(self.catalog);
                child.finalize_build();
                children.push(child);
            }
        }

        let mut idle = ledger.branch(parent);
        idle.collect(self.catalog);
        children.push(idle);
        children
    }
}

/// Replace the incumbent only when the candidate is strictly better.
fn keep_first_best(incumbent: Option<Ledger>, candidate: Ledger) -> Ledger {
    match incumbent {
        Some(best) if !candidate.is_better_than(&best) => best,
        _ => candidate,
    }
}
