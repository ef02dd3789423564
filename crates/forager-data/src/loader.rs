//! Shared plumbing for reading economies off disk.
//!
//! Catalog files and batch configs are serde documents in RON, TOML or
//! JSON, told apart by extension. Blueprint text files go through
//! [`crate::blueprint`] instead but report failures through the same
//! [`DataLoadError`].

use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use forager_core::catalog::CatalogError;

// ===========================================================================
// Errors
// ===========================================================================

/// Why an economy, blueprint file or batch config could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// Extension is not one of `ron`, `toml` or `json`.
    #[error("{file}: expected a .ron, .toml or .json economy file")]
    UnsupportedFormat { file: PathBuf },

    /// The document did not match the economy or config schema.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A price or output names a resource the catalog never declared.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// A resource or producer is declared twice in one economy.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// A blueprint line did not carry the number of integers its schema needs.
    #[error("line {line}: expected {expected} integers, found {found}")]
    BlueprintShape {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A blueprint integer does not fit in a `u32`.
    #[error("line {line}: integer '{text}' out of range")]
    IntegerRange { line: usize, text: String },

    /// Two blueprints in one file share an id.
    #[error("duplicate blueprint id {id} in {file}")]
    DuplicateBlueprint { file: PathBuf, id: u32 },

    /// The requested blueprint schema version does not exist.
    #[error("unknown blueprint version '{0}'")]
    UnknownVersion(String),

    /// The integer pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] regex_lite::Error),

    /// The resolved definitions were rejected by the catalog builder.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Serde front ends an economy or batch config can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    /// Match a file extension, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Format> {
        [("ron", Format::Ron), ("toml", Format::Toml), ("json", Format::Json)]
            .into_iter()
            .find(|(known, _)| ext.eq_ignore_ascii_case(known))
            .map(|(_, format)| format)
    }
}

/// Pick the front end for `path` from its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Format::from_extension)
        .ok_or_else(|| DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        })
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Load an economy catalog or batch config from `path`.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    deserialize_str(&std::fs::read_to_string(path)?, format, path)
}

/// Parse `content` as `format`. `path` only labels parse errors.
pub fn deserialize_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    path: &Path,
) -> Result<T, DataLoadError> {
    let parsed = match format {
        Format::Ron => ron::from_str(content).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|detail| DataLoadError::Parse {
        file: path.to_path_buf(),
        detail,
    })
}

// ===========================================================================
// Name checks
// ===========================================================================

/// Remember a resource or producer name, rejecting a second declaration.
pub fn check_duplicate(
    seen: &mut HashSet<String>,
    name: &str,
    file: &Path,
) -> Result<(), DataLoadError> {
    if seen.insert(name.to_string()) {
        Ok(())
    } else {
        Err(DataLoadError::DuplicateName {
            file: file.to_path_buf(),
            name: name.to_string(),
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
