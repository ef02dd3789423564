//! Serde data file structs for economy definitions.
//!
//! A data-file economy lists its resources and producers by name. The loader
//! resolves those names into a [`Catalog`].

use std::collections::HashSet;
use std::path::Path;

use forager_core::catalog::{Catalog, CatalogBuilder};
use forager_core::id::ResourceId;
use serde::Deserialize;

use crate::economy::Economy;
use crate::loader::{DataLoadError, check_duplicate, deserialize_file};

/// A producer definition in a data file. Amounts use the short tuple form
/// `("resource", amount)`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProducerData {
    pub name: String,
    #[serde(default)]
    pub price: Vec<(String, u32)>,
    pub output: Vec<(String, u32)>,
}

/// One economy as written in a `.ron`, `.toml`, or `.json` file.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogData {
    /// Score multiplier. Defaults to 1.
    #[serde(default = "default_id")]
    pub id: u32,
    /// Producer owned at the start.
    pub starter: String,
    pub resources: Vec<String>,
    pub producers: Vec<ProducerData>,
}

fn default_id() -> u32 {
    1
}

impl CatalogData {
    /// Resolve names and build the catalog. `file` is only used in errors.
    pub fn into_economy(self, file: &Path) -> Result<Economy, DataLoadError> {
        let mut builder = CatalogBuilder::new();
        builder.economy_id(self.id);

        let mut seen = HashSet::new();
        for name in &self.resources {
            check_duplicate(&mut seen, name, file)?;
            builder.register_resource(name);
        }

        let mut seen = HashSet::new();
        for producer in &self.producers {
            check_duplicate(&mut seen, &producer.name, file)?;
            let price = resolve_amounts(&builder, &producer.price, file)?;
            let output = resolve_amounts(&builder, &producer.output, file)?;
            builder.register_producer(&producer.name, &price, &output);
        }

        if !seen.contains(&self.starter) {
            return Err(DataLoadError::UnresolvedRef {
                file: file.to_path_buf(),
                name: self.starter,
                expected_kind: "producer",
            });
        }

        Ok(Economy {
            id: self.id,
            catalog: builder.build()?,
            starter: self.starter,
        })
    }
}

fn resolve_amounts(
    builder: &CatalogBuilder,
    amounts: &[(String, u32)],
    file: &Path,
) -> Result<Vec<(ResourceId, u32)>, DataLoadError> {
    amounts
        .iter()
        .map(|(name, amount)| {
            builder
                .resource_id(name)
                .map(|id| (id, *amount))
                .ok_or_else(|| DataLoadError::UnresolvedRef {
                    file: file.to_path_buf(),
                    name: name.clone(),
                    expected_kind: "resource",
                })
        })
        .collect()
}

/// Load one economy from a data file, format chosen by extension.
pub fn load_catalog_file(path: &Path) -> Result<Economy, DataLoadError> {
    let data: CatalogData = deserialize_file(path)?;
    data.into_economy(path)
}
