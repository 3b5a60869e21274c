//! Core data model for the open source games database.
//!
//! Defines the schema registry (valid fields, vocabularies, ordering rules),
//! the typed [`Entry`] record and the [`Diagnostic`] type used to report
//! validation findings. No I/O happens in this crate.

pub mod diagnostic;
pub mod entry;
pub mod field;
pub mod platform;
pub mod schema;
pub mod util;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use entry::{Building, Entry, State, Status, Value};
pub use field::{BuildingField, Field, Vocabulary};
pub use platform::Platform;
pub use schema::Schema;
