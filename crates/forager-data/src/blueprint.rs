//! Robot blueprint text format.
//!
//! One blueprint per line. Every unsigned integer on a line is taken in
//! order and the surrounding words are ignored, so both of these parse the
//! same:
//!
//! ```text
//! Blueprint 1: Each ore robot costs 4 ore. Each clay robot costs 2 ore. ...
//! 1 4 2 3 14 2 7
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use forager_core::catalog::CatalogBuilder;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::economy::Economy;
use crate::loader::DataLoadError;

/// Name of the producer every blueprint starts with.
pub const STARTER: &str = "ore-collecting robot";

/// Layout of the integers on a blueprint line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// `id, ore-robot ore, clay-robot ore, obsidian-robot ore + clay,
    /// geode-robot ore + obsidian`.
    #[default]
    V1,
    /// V1 followed by `diamond-robot geode + clay + obsidian`.
    V2,
}

impl SchemaVersion {
    /// Integers per line, id included.
    pub fn field_count(self) -> usize {
        match self {
            SchemaVersion::V1 => 7,
            SchemaVersion::V2 => 10,
        }
    }

    pub fn resources(self) -> &'static [&'static str] {
        match self {
            SchemaVersion::V1 => &["ore", "clay", "obsidian", "geode"],
            SchemaVersion::V2 => &["ore", "clay", "obsidian", "geode", "diamond"],
        }
    }
}

impl FromStr for SchemaVersion {
    type Err = DataLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "v1" => Ok(SchemaVersion::V1),
            "2" | "v2" => Ok(SchemaVersion::V2),
            _ => Err(DataLoadError::UnknownVersion(s.to_string())),
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::V1 => write!(f, "v1"),
            SchemaVersion::V2 => write!(f, "v2"),
        }
    }
}

// ===========================================================================
// Parser
// ===========================================================================

/// Turns blueprint lines into [`Economy`] values for one schema version.
#[derive(Debug, Clone)]
pub struct BlueprintParser {
    version: SchemaVersion,
    integers: Regex,
}

impl BlueprintParser {
    pub fn new(version: SchemaVersion) -> Result<Self, DataLoadError> {
        Ok(Self {
            version,
            integers: Regex::new(r"\d+")?,
        })
    }

    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Every unsigned integer in `text`, in order. `line` is 1-based and only
    /// used in errors.
    pub fn extract_integers(&self, text: &str, line: usize) -> Result<Vec<u32>, DataLoadError> {
        self.integers
            .find_iter(text)
            .map(|m| {
                m.as_str().parse().map_err(|_| DataLoadError::IntegerRange {
                    line,
                    text: m.as_str().to_string(),
                })
            })
            .collect()
    }

    /// Parse one non-empty blueprint line.
    pub fn parse_line(&self, text: &str, line: usize) -> Result<Economy, DataLoadError> {
        let data = self.extract_integers(text, line)?;
        let expected = self.version.field_count();
        if data.len() != expected {
            return Err(DataLoadError::BlueprintShape {
                line,
                expected,
                found: data.len(),
            });
        }

        let id = data[0];
        let mut b = CatalogBuilder::new();
        b.economy_id(id);
        for name in self.version.resources() {
            b.register_resource(name);
        }
        b.register_producer_named(STARTER, &[("ore", data[1])], &[("ore", 1)])?;
        b.register_producer_named("clay-collecting robot", &[("ore", data[2])], &[("clay", 1)])?;
        b.register_producer_named(
            "obsidian-collecting robot",
            &[("ore", data[3]), ("clay", data[4])],
            &[("obsidian", 1)],
        )?;
        b.register_producer_named(
            "geode-cracking robot",
            &[("ore", data[5]), ("obsidian", data[6])],
            &[("geode", 1)],
        )?;
        if self.version == SchemaVersion::V2 {
            b.register_producer_named(
                "diamond-cracking robot",
                &[("geode", data[7]), ("clay", data[8]), ("obsidian", data[9])],
                &[("diamond", 1)],
            )?;
        }

        Ok(Economy {
            id,
            catalog: b.build()?,
            starter: STARTER.to_string(),
        })
    }

    /// Parse every non-blank line of `text`. Ids must be unique; `file` is
    /// only used in errors.
    pub fn parse_all(&self, text: &str, file: &Path) -> Result<Vec<Economy>, DataLoadError> {
        let mut seen = HashSet::new();
        let mut economies = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            if raw.trim().is_empty() {
                continue;
            }
            let economy = self.parse_line(raw, idx + 1)?;
            if !seen.insert(economy.id) {
                return Err(DataLoadError::DuplicateBlueprint {
                    file: file.to_path_buf(),
                    id: economy.id,
                });
            }
            economies.push(economy);
        }
        Ok(economies)
    }
}

/// Read and parse a blueprint file.
pub fn load_blueprints(path: &Path, version: SchemaVersion) -> Result<Vec<Economy>, DataLoadError> {
    let text = std::fs::read_to_string(path)?;
    BlueprintParser::new(version)?.parse_all(&text, path)
}
