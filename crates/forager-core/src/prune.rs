//! Purchase pruning.
//!
//! A purchase is skipped only when the producer can no longer change the
//! outcome: it does not yield the target, and every resource it yields is
//! already in surplus for the rest of the horizon. Skipping such a purchase
//! keeps the price in stock instead, which is never worse.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::id::{ProducerId, ResourceId};
use crate::ledger::Ledger;

/// Which surplus tests are applied before a purchase is explored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PruningPolicy {
    /// Explore every affordable purchase.
    Disabled,
    /// Skip producers whose every output is banked beyond any future need.
    #[default]
    StockBound,
    /// Also treat an output as surplus once the fleet already yields the
    /// largest price per step.
    StockAndRateBound,
}

impl PruningPolicy {
    /// Whether buying `producer` from `ledger` is worth exploring.
    pub fn allows(self, catalog: &Catalog, ledger: &Ledger, producer: ProducerId) -> bool {
        match self {
            PruningPolicy::Disabled => true,
            PruningPolicy::StockBound => is_beneficial_to_buy(catalog, ledger, producer),
            PruningPolicy::StockAndRateBound => {
                is_beneficial_to_buy(catalog, ledger, producer)
                    && !rate_covers_outputs(catalog, ledger, producer)
            }
        }
    }
}

/// Stock-bound test.
///
/// Purchases remain possible at minutes `minute..horizon`, exclusive of the
/// last step, which is `horizon - minute` purchases. None of them can spend
/// more than [`Catalog::max_price`] of a resource, so a stock at or above
/// `max_price × (horizon - minute)` covers every future purchase.
pub fn is_beneficial_to_buy(catalog: &Catalog, ledger: &Ledger, producer: ProducerId) -> bool {
    let Some(def) = catalog.producer(producer) else {
        return false;
    };
    if def.output.get(ledger.target()) > 0 {
        return true;
    }

    let remaining = u64::from(ledger.minutes_remaining());
    def.output.iter_nonzero().any(|(resource, _)| {
        let bound = u64::from(catalog.max_price(resource)) * remaining;
        u64::from(ledger.stock().get(resource)) < bound
    })
}

/// Per-step yield of `resource` by the current fleet.
pub fn production_rate(catalog: &Catalog, ledger: &Ledger, resource: ResourceId) -> u64 {
    ledger
        .owned()
        .iter_nonzero()
        .filter_map(|(producer, count)| {
            catalog
                .producer(producer)
                .map(|def| u64::from(def.output.get(resource)) * u64::from(count))
        })
        .sum()
}

/// Rate-bound test: a non-target producer is redundant once every resource it
/// yields already arrives at [`Catalog::max_price`] or more per step, since no
/// step can spend more than that.
fn rate_covers_outputs(catalog: &Catalog, ledger: &Ledger, producer: ProducerId) -> bool {
    let Some(def) = catalog.producer(producer) else {
        return true;
    };
    if def.output.get(ledger.target()) > 0 {
        return false;
    }
    def.output
        .iter_nonzero()
        .all(|(resource, _)| production_rate(catalog, ledger, resource) >= u64::from(catalog.max_price(resource)))
}
