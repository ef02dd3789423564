//! Trade narration events.
//!
//! A ledger records what happened during the step that created it: the
//! purchase (if any), each producer's yield, and the new unit coming online.
//! Events hold ids only; [`TradeEvent::describe`] renders them against the
//! catalog they came from.

use crate::catalog::Catalog;
use crate::counter::Counter;
use crate::id::*;

/// Something that happened to a ledger during one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeEvent {
    /// A purchase was paid for; the unit is not active yet.
    Spent {
        producer: ProducerId,
        price: Counter<ResourceId>,
    },
    /// `count` units of a producer yielded `gained`. `stock` is the stock
    /// right after this yield.
    Collected {
        producer: ProducerId,
        count: u32,
        gained: Counter<ResourceId>,
        stock: Counter<ResourceId>,
    },
    /// The unit bought this step joined the fleet.
    Built { producer: ProducerId, owned: u32 },
}

impl TradeEvent {
    /// Human-readable narration line.
    pub fn describe(&self, catalog: &Catalog) -> String {
        match self {
            TradeEvent::Spent { producer, price } => format!(
                "Spend {} to start building a {}.",
                catalog.describe_amounts(price),
                catalog.producer_name(*producer)
            ),
            TradeEvent::Collected {
                producer,
                count,
                gained,
                stock,
            } => {
                let now_have = gained
                    .iter_nonzero()
                    .map(|(resource, _)| {
                        format!("{} {}", stock.get(resource), catalog.resource_name(resource))
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "{count} {} collects {}; you now have {now_have}.",
                    catalog.producer_name(*producer),
                    catalog.describe_amounts(gained)
                )
            }
            TradeEvent::Built { producer, owned } => format!(
                "The new {} is ready; you now have {owned} of them.",
                catalog.producer_name(*producer)
            ),
        }
    }
}
