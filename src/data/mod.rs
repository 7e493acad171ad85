//! Dataset binding: tabular sources, column mapping and value preparation.
pub mod dataset;
pub mod error;
pub mod loader;
pub mod table;
pub mod transform;

pub use dataset::Dataset;
pub use error::DataError;
pub use loader::{JsonTableLoader, LoaderRegistry, TableLoader};
pub use table::{Table, TabularSource};
