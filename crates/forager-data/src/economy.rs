use forager_core::catalog::Catalog;
use forager_core::search::{SearchError, Solver};

/// A loaded economy: its catalog plus the producer every run starts with.
#[derive(Debug, Clone)]
pub struct Economy {
    /// Blueprint id; also the score multiplier of the catalog.
    pub id: u32,
    pub catalog: Catalog,
    pub starter: String,
}

impl Economy {
    /// A solver for this economy targeting `target`.
    pub fn solver(&self, target: &str) -> Result<Solver<'_>, SearchError> {
        Solver::new(&self.catalog, &self.starter, target)
    }

    /// Whether any producer yields `target`. A missing resource counts as
    /// not producible.
    pub fn can_produce(&self, target: &str) -> bool {
        self.catalog
            .resource_id(target)
            .is_some_and(|id| !self.catalog.producers_producing(id).is_empty())
    }
}
