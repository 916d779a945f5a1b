//! Film catalog data model, flat-file store, and merge step.
//!
//! The catalog lives in a directory of plain JSON files:
//!
//! ```text
//! data_dir/
//!   films.json              master file, array of film records
//!   festivals/
//!     cannes-2024.json      appearance file, array of {"id": "..."} refs
//!     venice-2024.json
//!   streaming.json          film id -> streaming availability
//!   films.generated.json    pre-generated merged cache (optional)
//! ```
//!
//! [`Store`] handles the file I/O (including the admin rewrites),
//! [`Catalog`] holds the loaded documents and derives merged films,
//! filter options, and festival groupings from them.

pub mod editions;
pub mod merge;
pub mod store;
pub mod types;

pub use merge::Catalog;
pub use store::{CatalogError, DeleteOutcome, Store};
pub use types::*;
