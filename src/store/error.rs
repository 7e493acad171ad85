//! Defines the error types for the store module.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Variable group '{group}' has no candidates")]
    EmptyGroup { group: String },
    #[error("No variable of group '{group}' is available in dataset '{dataset}' (candidates: {})", candidates.join(", "))]
    UnresolvedGroup { group: String, dataset: String, candidates: Vec<String> },
    #[error("Variable '{name}' is declared with two different kinds")]
    ConflictingDefinition { name: String },
}
