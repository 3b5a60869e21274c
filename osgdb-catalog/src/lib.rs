//! Entry record parsing, canonical writing and the entry store.
//!
//! This crate turns the record files of the `entries/` directory into the
//! typed [`osgdb_core::Entry`] model and back. All validation findings are
//! reported as diagnostics; only I/O problems are errors.

pub mod error;
pub mod parser;
pub mod store;
pub mod writer;

pub use error::CatalogError;
pub use parser::{ParsedEntry, parse_entry, split_values};
pub use store::EntryStore;
pub use writer::write_entry;
