//! Solve every blueprint of a file and collect the scores.

use forager_data::{Economy, load_blueprints};
use tracing::{info, warn};

use crate::config::BatchConfig;
use crate::error::BatchError;
use crate::report::{BatchReport, BlueprintScore};

/// One blueprint solved with its winning path recorded.
#[derive(Debug, Clone)]
pub struct TracedRun {
    pub id: u32,
    pub target_stock: u32,
    pub score: u64,
    /// `== Minute N ==` blocks, one event per line.
    pub narration: String,
}

/// Solve one economy with the batch search settings.
///
/// An unknown target or starter name fails the economy. A known target
/// that nothing produces is still searched and scores zero.
pub fn solve_economy(economy: &Economy, config: &BatchConfig) -> Result<BlueprintScore, BatchError> {
    let search_error = |source| BatchError::Search {
        id: economy.id,
        source,
    };
    let solver = economy
        .solver(&config.target)
        .map_err(search_error)?
        .with_config(config.search_config());
    if !economy.can_produce(&config.target) {
        warn!(
            blueprint = economy.id,
            target = %config.target,
            "no producer yields the target"
        );
    }
    let outcome = solver.solve(config.horizon).map_err(search_error)?;

    info!(
        blueprint = economy.id,
        target_stock = outcome.target_stock(),
        score = outcome.score,
        expanded = outcome.stats.expanded,
        "blueprint solved"
    );
    Ok(BlueprintScore {
        id: economy.id,
        target_stock: outcome.target_stock(),
        score: outcome.score,
        stats: outcome.stats,
    })
}

/// Solve every blueprint in `config.blueprints` and write the configured
/// report files.
pub fn run_all(config: &BatchConfig) -> Result<BatchReport, BatchError> {
    let economies = load_blueprints(&config.blueprints, config.version)?;
    info!(
        count = economies.len(),
        horizon = config.horizon,
        target = %config.target,
        "running batch"
    );

    let scores = solve_all(&economies, config)?;
    let report = BatchReport {
        target: config.target.clone(),
        horizon: config.horizon,
        scores,
    };

    if let Some(path) = &config.output {
        report.write_text(path)?;
    }
    if let Some(path) = &config.json_output {
        report.write_json(path)?;
    }
    Ok(report)
}

#[cfg(feature = "parallel")]
fn solve_all(economies: &[Economy], config: &BatchConfig) -> Result<Vec<BlueprintScore>, BatchError> {
    use rayon::prelude::*;

    if config.parallel {
        economies.par_iter().map(|e| solve_economy(e, config)).collect()
    } else {
        economies.iter().map(|e| solve_economy(e, config)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn solve_all(economies: &[Economy], config: &BatchConfig) -> Result<Vec<BlueprintScore>, BatchError> {
    economies.iter().map(|e| solve_economy(e, config)).collect()
}

/// Solve blueprint `id` with trace recording and render its winning path.
pub fn run_one(config: &BatchConfig, id: u32) -> Result<TracedRun, BatchError> {
    let economies = load_blueprints(&config.blueprints, config.version)?;
    let economy = economies
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| BatchError::BlueprintNotFound {
            id,
            file: config.blueprints.clone(),
        })?;

    let mut search = config.search_config();
    search.record_trace = true;
    let search_error = |source| BatchError::Search { id, source };
    let outcome = economy
        .solver(&config.target)
        .map_err(search_error)?
        .with_config(search)
        .solve(config.horizon)
        .map_err(search_error)?;

    let narration = outcome
        .trace
        .as_ref()
        .map(|trace| trace.render(&economy.catalog))
        .unwrap_or_default();
    Ok(TracedRun {
        id,
        target_stock: outcome.target_stock(),
        score: outcome.score,
        narration,
    })
}
