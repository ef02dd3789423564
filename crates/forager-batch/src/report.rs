use std::fmt;
use std::path::Path;

use forager_core::search::SearchStats;
use serde::Serialize;

use crate::error::BatchError;

/// Result of one blueprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlueprintScore {
    pub id: u32,
    /// Largest target stock reached.
    pub target_stock: u32,
    /// `target_stock × id`.
    pub score: u64,
    pub stats: SearchStats,
}

/// Scores for every blueprint of a batch, in file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub target: String,
    pub horizon: u32,
    pub scores: Vec<BlueprintScore>,
}

impl BatchReport {
    /// Highest score; the earliest blueprint wins ties.
    pub fn best(&self) -> Option<&BlueprintScore> {
        self.scores
            .iter()
            .fold(None, |best: Option<&BlueprintScore>, s| match best {
                Some(b) if b.score >= s.score => Some(b),
                _ => Some(s),
            })
    }

    pub fn sum(&self) -> u64 {
        self.scores.iter().map(|s| s.score).sum()
    }

    /// Mean score, 0 for an empty batch.
    pub fn average(&self) -> f64 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.scores.len() as f64
        }
    }

    pub fn write_text(&self, path: &Path) -> Result<(), BatchError> {
        std::fs::write(path, self.to_string())?;
        Ok(())
    }

    pub fn write_json(&self, path: &Path) -> Result<(), BatchError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| BatchError::Serialization {
            detail: e.to_string(),
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.scores {
            writeln!(f, "Blueprint {}: {}", s.id, s.score)?;
        }
        writeln!(f)?;
        match self.best() {
            Some(best) => writeln!(f, "Best blueprint: {} (score {})", best.id, best.score)?,
            None => writeln!(f, "Best blueprint: none")?,
        }
        writeln!(f, "Sum score: {}", self.sum())?;
        writeln!(f, "Average score: {:.2}", self.average())
    }
}
