//! Maintenance operations over the open source games database.
//!
//! Everything here consumes a loaded [`osgdb_catalog::EntryStore`] and the
//! immutable [`Settings`]; [`Maintainer`] strings the operations together
//! the way the command line invokes them.

pub mod backlog;
pub mod checker;
pub mod error;
pub mod export;
pub mod maintainer;
pub mod settings;
pub mod similarity;
pub mod statistics;
pub mod toc;

pub use checker::{ConsistencyChecker, Finding};
pub use error::{MaintError, RegionError};
pub use maintainer::Maintainer;
pub use settings::{Paths, Settings};
pub use similarity::{LevenshteinScorer, SimilarityScorer};
pub use statistics::{FrequencyTable, Statistics};
pub use toc::{PrimaryCategory, TocDocument, TocSet};
