//! End-to-end search scenarios on small hand-built economies and the two
//! sample robot blueprints.

use forager_core::id::*;
use forager_core::prune::PruningPolicy;
use forager_core::search::*;
use forager_core::test_utils::*;

fn config(traversal: Traversal, pruning: PruningPolicy) -> SearchConfig {
    SearchConfig {
        traversal,
        pruning,
        ..SearchConfig::default()
    }
}

const ALL_CONFIGS: [(Traversal, PruningPolicy); 6] = [
    (Traversal::DepthFirst, PruningPolicy::Disabled),
    (Traversal::DepthFirst, PruningPolicy::StockBound),
    (Traversal::DepthFirst, PruningPolicy::StockAndRateBound),
    (Traversal::BreadthFirst, PruningPolicy::Disabled),
    (Traversal::BreadthFirst, PruningPolicy::StockBound),
    (Traversal::BreadthFirst, PruningPolicy::StockAndRateBound),
];

// ===========================================================================
// Hand-built economies
// ===========================================================================

#[test]
fn single_producer_one_step() {
    let catalog = single_producer_catalog();
    let solver = Solver::new(&catalog, "gold mine", "gold").unwrap();
    let outcome = solver.solve(1).unwrap();
    assert_eq!(outcome.target_stock(), 1);
    assert_eq!(outcome.score, 1);
    // No purchase is possible on the only step.
    assert_eq!(outcome.stats.expanded, 1);
    assert_eq!(outcome.stats.terminals, 1);
}

#[test]
fn two_tier_matches_brute_force() {
    let catalog = two_tier_catalog();
    for horizon in 1..=8 {
        let expected = brute_force(&catalog, ore_miner(), geode(), horizon);
        for (traversal, pruning) in ALL_CONFIGS {
            let got = Solver::new(&catalog, "ore miner", "geode")
                .unwrap()
                .with_config(config(traversal, pruning))
                .run(horizon)
                .unwrap();
            assert_eq!(
                got,
                u64::from(expected),
                "horizon {horizon}, {traversal:?}, {pruning:?}"
            );
        }
    }
}

#[test]
fn two_tier_six_steps() {
    let catalog = two_tier_catalog();
    let solver = Solver::new(&catalog, "ore miner", "geode").unwrap();
    assert_eq!(solver.run(6).unwrap(), 1);
    assert_eq!(brute_force(&catalog, ore_miner(), geode(), 6), 1);
}

#[test]
fn score_scales_with_economy_id() {
    let mut b = two_tier_builder();
    b.economy_id(3);
    let catalog = b.build().unwrap();
    let solver = Solver::new(&catalog, "ore miner", "geode").unwrap();
    let outcome = solver.solve(8).unwrap();
    assert_eq!(outcome.target_stock(), 4);
    assert_eq!(outcome.score, 12);
}

#[test]
fn ties_go_to_first_declared_producer() {
    let catalog = tie_catalog();
    let alpha = catalog.producer_id("alpha").unwrap();
    let beta = catalog.producer_id("beta").unwrap();

    for traversal in [Traversal::DepthFirst, Traversal::BreadthFirst] {
        let outcome = Solver::new(&catalog, "miner", "gold")
            .unwrap()
            .with_config(SearchConfig {
                traversal,
                record_trace: true,
                ..SearchConfig::default()
            })
            .solve(3)
            .unwrap();
        assert_eq!(outcome.target_stock(), 1);
        assert_eq!(outcome.best.owned().get(alpha), 1, "{traversal:?}");
        assert_eq!(outcome.best.owned().get(beta), 0, "{traversal:?}");
        let purchases = outcome.trace.unwrap().purchases();
        assert_eq!(purchases, vec![(2, alpha)]);
    }
}

#[test]
fn repeated_runs_are_identical() {
    let catalog = two_tier_catalog();
    let solver = Solver::new(&catalog, "ore miner", "geode")
        .unwrap()
        .with_config(SearchConfig {
            record_trace: true,
            ..SearchConfig::default()
        });
    let first = solver.solve(9).unwrap();
    let second = solver.solve(9).unwrap();
    assert_eq!(first.score, second.score);
    assert_eq!(first.stats, second.stats);
    assert_eq!(first.best.state_key(), second.best.state_key());
    assert_eq!(first.trace, second.trace);
}

#[test]
fn trace_narration_is_rendered_per_minute() {
    let catalog = two_tier_catalog();
    let outcome = Solver::new(&catalog, "ore miner", "geode")
        .unwrap()
        .with_config(SearchConfig {
            record_trace: true,
            ..SearchConfig::default()
        })
        .solve(6)
        .unwrap();
    let text = outcome.trace.unwrap().render(&catalog);
    for minute in 1..=6 {
        assert!(text.contains(&format!("== Minute {minute} ==")));
    }
    assert!(text.contains("geode cracker is ready"));
}

#[test]
fn unreachable_target_scores_zero() {
    let catalog = two_tier_catalog();
    // Clay is never bought, so nothing but ore is ever collected.
    let solver = Solver::new(&catalog, "clay digger", "geode").unwrap();
    assert_eq!(solver.run(4).unwrap(), 0);
}

#[test]
fn zero_horizon_is_an_error() {
    let catalog = single_producer_catalog();
    let solver = Solver::new(&catalog, "gold mine", "gold").unwrap();
    assert!(matches!(solver.run(0), Err(SearchError::InvalidHorizon(0))));
}

#[test]
fn budget_error_reports_limit() {
    let catalog = sample_blueprint_one();
    let err = Solver::new(&catalog, "ore-collecting robot", "geode")
        .unwrap()
        .with_config(SearchConfig {
            node_budget: Some(1_000),
            ..SearchConfig::default()
        })
        .run(19)
        .unwrap_err();
    assert_eq!(err.to_string(), "node budget of 1000 expansions exhausted");
}

// ===========================================================================
// Sample robot blueprints
// ===========================================================================

fn robot_solver(catalog: &forager_core::Catalog, pruning: PruningPolicy) -> Solver<'_> {
    Solver::new(catalog, "ore-collecting robot", "geode")
        .unwrap()
        .with_config(config(Traversal::DepthFirst, pruning))
}

#[test]
fn sample_blueprints_short_horizon() {
    let one = sample_blueprint_one();
    let two = sample_blueprint_two();
    for pruning in [PruningPolicy::StockBound, PruningPolicy::StockAndRateBound] {
        assert_eq!(robot_solver(&one, pruning).solve(16).unwrap().target_stock(), 0);
        assert_eq!(robot_solver(&one, pruning).solve(19).unwrap().target_stock(), 1);
    }
    let outcome = robot_solver(&two, PruningPolicy::StockAndRateBound).solve(19).unwrap();
    assert_eq!(outcome.target_stock(), 1);
    // Blueprint two is scored by its id.
    assert_eq!(outcome.score, 2);
}

#[test]
fn sample_blueprints_twenty_minutes() {
    let one = sample_blueprint_one();
    let two = sample_blueprint_two();
    assert_eq!(
        robot_solver(&one, PruningPolicy::StockAndRateBound).solve(20).unwrap().target_stock(),
        2
    );
    assert_eq!(
        robot_solver(&two, PruningPolicy::StockAndRateBound).solve(20).unwrap().target_stock(),
        2
    );
}

#[test]
#[ignore = "explores millions of states; run with --ignored --release"]
fn sample_blueprints_full_day() {
    let one = sample_blueprint_one();
    let two = sample_blueprint_two();
    let a = robot_solver(&one, PruningPolicy::StockAndRateBound).solve(24).unwrap();
    let b = robot_solver(&two, PruningPolicy::StockAndRateBound).solve(24).unwrap();
    assert_eq!(a.target_stock(), 9);
    assert_eq!(b.target_stock(), 12);
    assert_eq!(a.score + b.score, 33);
}

#[test]
fn starter_is_owned_from_the_start() {
    let catalog = sample_blueprint_one();
    let outcome = robot_solver(&catalog, PruningPolicy::StockBound).solve(3).unwrap();
    let starter = catalog.producer_id("ore-collecting robot").unwrap();
    assert!(outcome.best.owned().get(starter) >= 1);
    assert_eq!(outcome.best.stock().get(ResourceId(0)), 3);
}
