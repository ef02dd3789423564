//! Loading economies from disk.
//!
//! Two sources are supported: robot blueprint text files (one economy per
//! line, see [`blueprint`]) and data-file catalogs in RON, TOML, or JSON (see
//! [`schema`]).

pub mod blueprint;
pub mod economy;
pub mod loader;
pub mod schema;

pub use blueprint::{BlueprintParser, SchemaVersion, load_blueprints};
pub use economy::Economy;
pub use loader::DataLoadError;
pub use schema::{CatalogData, load_catalog_file};
