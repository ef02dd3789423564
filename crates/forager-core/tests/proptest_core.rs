//! Property-based tests for the Forager search.
//!
//! Uses proptest to generate small random economies, then checks the pruned
//! and memoized search against a plain brute-force reference.

use forager_core::catalog::{Catalog, CatalogBuilder};
use forager_core::id::*;
use forager_core::ledger::Ledger;
use forager_core::prune::PruningPolicy;
use forager_core::search::*;
use forager_core::test_utils::*;
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

/// Per producer: price and output amounts, one per resource.
type ProducerSpec = (Vec<u32>, Vec<u32>);

fn arb_producers(resources: usize) -> impl Strategy<Value = Vec<ProducerSpec>> {
    proptest::collection::vec(
        (
            proptest::collection::vec(0..=3u32, resources),
            proptest::collection::vec(0..=2u32, resources),
        ),
        2..=3,
    )
}

/// A random economy with 2-3 resources and 2-3 producers. Producer 0 is the
/// starter and always yields the first resource.
fn arb_catalog() -> impl Strategy<Value = Catalog> {
    (2..=3usize)
        .prop_flat_map(arb_producers)
        .prop_map(|producers| {
            let resources = producers[0].0.len();
            let mut b = CatalogBuilder::new();
            let ids: Vec<ResourceId> = (0..resources)
                .map(|r| b.register_resource(&format!("r{r}")))
                .collect();
            for (p, (price, output)) in producers.iter().enumerate() {
                let mut output: Vec<(ResourceId, u32)> =
                    ids.iter().copied().zip(output.iter().copied()).collect();
                if p == 0 && output[0].1 == 0 {
                    output[0].1 = 1;
                }
                let price: Vec<(ResourceId, u32)> =
                    ids.iter().copied().zip(price.iter().copied()).collect();
                b.register_producer(&format!("p{p}"), &price, &output);
            }
            b.build().unwrap()
        })
}

fn target_of(catalog: &Catalog) -> ResourceId {
    ResourceId(catalog.resource_count() as u32 - 1)
}

/// Replay a sequence of steps; `Some(i)` tries to buy producer `i`.
fn replay(catalog: &Catalog, steps: &[Option<u8>]) -> Ledger {
    let mut ledger = Ledger::root(catalog, ProducerId(0), target_of(catalog), 100);
    for step in steps {
        if let Some(i) = step {
            let producer = ProducerId(u32::from(*i) % catalog.producer_count() as u32);
            let _ = ledger.buy(catalog, producer);
        }
        ledger.collect(catalog);
        ledger.finalize_build();
        ledger.advance_minute();
    }
    ledger
}

fn arb_steps() -> impl Strategy<Value = Vec<Option<u8>>> {
    proptest::collection::vec(proptest::option::of(0..3u8), 0..6)
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every pruning policy and traversal reaches the brute-force optimum.
    #[test]
    fn pruned_search_matches_brute_force(catalog in arb_catalog(), horizon in 1..=6u32) {
        let target = target_of(&catalog);
        let expected = u64::from(brute_force(&catalog, ProducerId(0), target, horizon));
        for traversal in [Traversal::DepthFirst, Traversal::BreadthFirst] {
            for pruning in [
                PruningPolicy::Disabled,
                PruningPolicy::StockBound,
                PruningPolicy::StockAndRateBound,
            ] {
                let outcome = Solver::new(&catalog, "p0", catalog.resource_name(target))
                    .unwrap()
                    .with_config(SearchConfig { traversal, pruning, ..SearchConfig::default() })
                    .solve(horizon)
                    .unwrap();
                prop_assert_eq!(u64::from(outcome.target_stock()), expected);
            }
        }
    }

    /// Keys are equal exactly when minute, stock and fleet are equal.
    #[test]
    fn state_keys_are_sound(catalog in arb_catalog(), a in arb_steps(), b in arb_steps()) {
        let left = replay(&catalog, &a);
        let right = replay(&catalog, &b);
        let same_state = left.minute() == right.minute()
            && left.stock() == right.stock()
            && left.owned() == right.owned();
        prop_assert_eq!(left.state_key() == right.state_key(), same_state);
    }

    /// Adding resources never makes an affordable producer unaffordable.
    #[test]
    fn affordability_is_monotonic(
        catalog in arb_catalog(),
        steps in arb_steps(),
        extra in proptest::collection::vec(0..5u32, 3),
    ) {
        let ledger = replay(&catalog, &steps);
        let mut richer = ledger.stock().clone();
        for (resource, amount) in catalog.resource_ids().zip(extra) {
            richer.add(resource, amount);
        }
        for producer in catalog.producer_ids() {
            if catalog.can_afford(producer, ledger.stock()) {
                prop_assert!(catalog.can_afford(producer, &richer));
            }
        }
    }

    /// Branching never touches the parent ledger.
    #[test]
    fn branches_are_isolated(catalog in arb_catalog(), steps in arb_steps(), pick in 0..3u8) {
        let parent = replay(&catalog, &steps);
        let key = parent.state_key();
        let mut child = parent.branch(None);
        let producer = ProducerId(u32::from(pick) % catalog.producer_count() as u32);
        let _ = child.buy(&catalog, producer);
        child.collect(&catalog);
        child.finalize_build();
        child.advance_minute();
        prop_assert_eq!(parent.state_key(), key);
    }
}
