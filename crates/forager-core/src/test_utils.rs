//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::catalog::{Catalog, CatalogBuilder};
use crate::id::*;

// ===========================================================================
// Two-tier economy
// ===========================================================================

// Resources: ore, clay, geode.
// Producers: ore miner, clay digger, geode cracker (in that order).

pub fn ore() -> ResourceId {
    ResourceId(0)
}
pub fn clay() -> ResourceId {
    ResourceId(1)
}
pub fn geode() -> ResourceId {
    ResourceId(2)
}

pub fn ore_miner() -> ProducerId {
    ProducerId(0)
}
pub fn clay_digger() -> ProducerId {
    ProducerId(1)
}
pub fn geode_cracker() -> ProducerId {
    ProducerId(2)
}

/// Builder for the two-tier economy, left open so tests can add to it.
pub fn two_tier_builder() -> CatalogBuilder {
    let mut b = CatalogBuilder::new();
    let ore = b.register_resource("ore");
    let clay = b.register_resource("clay");
    let geode = b.register_resource("geode");
    b.register_producer("ore miner", &[(ore, 2)], &[(ore, 1)]);
    b.register_producer("clay digger", &[(ore, 2)], &[(clay, 1)]);
    b.register_producer("geode cracker", &[(ore, 2), (clay, 1)], &[(geode, 1)]);
    b
}

/// Best geode by horizon: 0 up to 5, then 1, 2, 4, 6 for horizons 6..=9.
pub fn two_tier_catalog() -> Catalog {
    two_tier_builder().build().unwrap()
}

// ===========================================================================
// Robot blueprints
// ===========================================================================

/// A four-resource robot economy.
///
/// `costs` is `[ore robot ore, clay robot ore, obsidian robot ore,
/// obsidian robot clay, geode robot ore, geode robot obsidian]`.
pub fn robot_catalog(economy_id: u32, costs: [u32; 6]) -> Catalog {
    let mut b = CatalogBuilder::new();
    b.economy_id(economy_id);
    let ore = b.register_resource("ore");
    let clay = b.register_resource("clay");
    let obsidian = b.register_resource("obsidian");
    let geode = b.register_resource("geode");
    b.register_producer("ore-collecting robot", &[(ore, costs[0])], &[(ore, 1)]);
    b.register_producer("clay-collecting robot", &[(ore, costs[1])], &[(clay, 1)]);
    b.register_producer(
        "obsidian-collecting robot",
        &[(ore, costs[2]), (clay, costs[3])],
        &[(obsidian, 1)],
    );
    b.register_producer(
        "geode-cracking robot",
        &[(ore, costs[4]), (obsidian, costs[5])],
        &[(geode, 1)],
    );
    b.build().unwrap()
}

/// First sample blueprint. 9 geodes in 24 minutes, 1 in 19.
pub fn sample_blueprint_one() -> Catalog {
    robot_catalog(1, [4, 2, 3, 14, 2, 7])
}

/// Second sample blueprint. 12 geodes in 24 minutes, 1 in 19.
pub fn sample_blueprint_two() -> Catalog {
    robot_catalog(2, [2, 3, 3, 8, 3, 12])
}

// ===========================================================================
// Small edge-case economies
// ===========================================================================

/// One producer that yields the target and costs nothing obtainable.
pub fn single_producer_catalog() -> Catalog {
    let mut b = CatalogBuilder::new();
    let gold = b.register_resource("gold");
    let silver = b.register_resource("silver");
    b.register_producer("gold mine", &[(silver, 1)], &[(gold, 1)]);
    b.build().unwrap()
}

/// Two identical gold producers; the first declared must win ties.
///
/// With horizon 3 the best gold is 1, reachable by buying either `alpha` or
/// `beta` at minute 2.
pub fn tie_catalog() -> Catalog {
    let mut b = CatalogBuilder::new();
    let ore = b.register_resource("ore");
    let gold = b.register_resource("gold");
    b.register_producer("miner", &[(ore, 99)], &[(ore, 1)]);
    b.register_producer("alpha", &[(ore, 1)], &[(gold, 1)]);
    b.register_producer("beta", &[(ore, 1)], &[(gold, 1)]);
    b.build().unwrap()
}

// ===========================================================================
// Reference search
// ===========================================================================

/// Plain recursive search with no memo table and no pruning.
///
/// Only usable for tiny horizons; exists to check the real solver against.
pub fn brute_force(catalog: &Catalog, starter: ProducerId, target: ResourceId, horizon: u32) -> u32 {
    let mut owned = vec![0u32; catalog.producer_count()];
    owned[starter.0 as usize] = 1;
    let stock = vec![0u32; catalog.resource_count()];
    brute_step(catalog, target, 1, horizon, stock, owned)
}

fn brute_step(
    catalog: &Catalog,
    target: ResourceId,
    minute: u32,
    horizon: u32,
    stock: Vec<u32>,
    owned: Vec<u32>,
) -> u32 {
    if minute > horizon {
        return stock[target.0 as usize];
    }

    let collect = |stock: &mut Vec<u32>| {
        for (p, &count) in owned.iter().enumerate() {
            let def = catalog.producer(ProducerId(p as u32)).unwrap();
            for (r, amount) in def.output.iter_nonzero() {
                stock[r.0 as usize] += amount * count;
            }
        }
    };

    let mut idle = stock.clone();
    collect(&mut idle);
    let mut best = brute_step(catalog, target, minute + 1, horizon, idle, owned.clone());

    if minute < horizon {
        for producer in catalog.producer_ids() {
            let def = catalog.producer(producer).unwrap();
            if def.price.iter_nonzero().any(|(r, amount)| stock[r.0 as usize] < amount) {
                continue;
            }
            let mut next = stock.clone();
            for (r, amount) in def.price.iter_nonzero() {
                next[r.0 as usize] -= amount;
            }
            collect(&mut next);
            let mut fleet = owned.clone();
            fleet[producer.0 as usize] += 1;
            best = best.max(brute_step(catalog, target, minute + 1, horizon, next, fleet));
        }
    }
    best
}
