//! Forager Core -- exhaustive search over a production economy.
//!
//! An economy is a [`catalog::Catalog`] of resource kinds and producer types.
//! Each producer has a price and yields a fixed output every step once it is
//! active. Starting from a single starter producer, the search explores every
//! sequence of purchases over a fixed horizon and reports the largest
//! achievable stock of a target resource.
//!
//! # Four-Phase Step
//!
//! Each step of a [`ledger::Ledger`] runs:
//!
//! 1. **Buy** -- optionally pay for one producer (never on the last step).
//! 2. **Collect** -- every active producer yields its output.
//! 3. **Finalize** -- the producer bought in phase 1 joins the fleet.
//! 4. **Advance** -- the minute counter moves on.
//!
//! # Example
//!
//! ```rust,ignore
//! let catalog = builder.build()?;
//! let solver = Solver::new(&catalog, "ore-collecting robot", "geode")?;
//! let score = solver.run(24)?;
//! ```
//!
//! # Key Types
//!
//! - [`catalog::Catalog`] -- Immutable resource and producer definitions.
//! - [`counter::Counter`] -- Dense key-to-count map used for stock and fleet.
//! - [`ledger::Ledger`] -- One branchable search state.
//! - [`search::Solver`] -- Depth-first or breadth-first exhaustive search.
//! - [`prune::PruningPolicy`] -- Surplus tests that skip useless purchases.
//! - [`trace::TraceArena`] -- Parent-linked frames for replaying the winner.

pub mod catalog;
pub mod counter;
pub mod event;
pub mod id;
pub mod ledger;
pub mod memo;
pub mod prune;
pub mod search;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod trace;

pub use catalog::{Catalog, CatalogBuilder, CatalogError};
pub use search::{SearchConfig, SearchError, SearchOutcome, Solver, Traversal};
