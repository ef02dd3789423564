//! Batch run configuration.
//!
//! Read from a `.ron` or `.toml` file, or assembled from positional command
//! line arguments.

use std::path::{Path, PathBuf};

use forager_core::prune::PruningPolicy;
use forager_core::search::{SearchConfig, Traversal};
use forager_data::SchemaVersion;
use forager_data::loader::deserialize_file;
use serde::Deserialize;

use crate::error::BatchError;

/// Everything one batch run needs.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// Blueprint text file, one economy per line.
    pub blueprints: PathBuf,
    #[serde(default)]
    pub version: SchemaVersion,
    #[serde(default = "default_horizon")]
    pub horizon: u32,
    #[serde(default = "default_target")]
    pub target: String,
    /// Plain-text report. `None` keeps the report on stdout only.
    #[serde(default = "default_output")]
    pub output: Option<PathBuf>,
    /// Machine-readable copy of the report.
    #[serde(default)]
    pub json_output: Option<PathBuf>,
    #[serde(default)]
    pub traversal: Traversal,
    #[serde(default)]
    pub pruning: PruningPolicy,
    /// Solve blueprints on the rayon pool when built with `parallel`.
    #[serde(default = "default_true")]
    pub parallel: bool,
    #[serde(default)]
    pub node_budget: Option<u64>,
    /// Replay the winning path of this blueprint after the batch.
    #[serde(default)]
    pub trace_blueprint: Option<u32>,
}

fn default_horizon() -> u32 {
    24
}

fn default_target() -> String {
    "geode".to_string()
}

fn default_output() -> Option<PathBuf> {
    Some(PathBuf::from("analysis.txt"))
}

fn default_true() -> bool {
    true
}

impl BatchConfig {
    /// Defaults for everything but the blueprint file.
    pub fn new(blueprints: impl Into<PathBuf>) -> Self {
        Self {
            blueprints: blueprints.into(),
            version: SchemaVersion::default(),
            horizon: default_horizon(),
            target: default_target(),
            output: default_output(),
            json_output: None,
            traversal: Traversal::default(),
            pruning: PruningPolicy::default(),
            parallel: true,
            node_budget: None,
            trace_blueprint: None,
        }
    }

    /// Search knobs for a plain (untraced) run.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            traversal: self.traversal,
            pruning: self.pruning,
            record_trace: false,
            node_budget: self.node_budget,
        }
    }

    /// Positional form: `<blueprint-file> [version] [horizon] [target]`.
    pub fn from_args(args: &[String]) -> Result<Self, BatchError> {
        let Some(file) = args.first() else {
            return Err(BatchError::Usage(USAGE.to_string()));
        };
        let mut config = Self::new(file);
        if let Some(version) = args.get(1) {
            config.version = version.parse()?;
        }
        if let Some(horizon) = args.get(2) {
            config.horizon = horizon
                .parse()
                .map_err(|_| BatchError::Usage(format!("invalid horizon '{horizon}'\n{USAGE}")))?;
        }
        if let Some(target) = args.get(3) {
            config.target = target.clone();
        }
        if args.len() > 4 {
            return Err(BatchError::Usage(USAGE.to_string()));
        }
        Ok(config)
    }
}

pub const USAGE: &str =
    "usage: forager <config.ron|config.toml>\n       forager <blueprint-file> [version] [horizon] [target]";

/// Load a config file; format is chosen by extension.
pub fn load_config(path: &Path) -> Result<BatchConfig, BatchError> {
    Ok(deserialize_file(path)?)
}

/// True when `arg` names a config file rather than a blueprint file.
pub fn is_config_path(arg: &str) -> bool {
    matches!(
        Path::new(arg).extension().and_then(|e| e.to_str()),
        Some("ron" | "toml" | "json")
    )
}
