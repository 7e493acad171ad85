//! Group resolution: picks the concrete variable a dataset can supply.

use super::error::StoreError;
use super::types::{Endpoint, Variable};

/// Anything that can tell which variables it supplies values for.
pub trait Availability {
    /// Name used in error reports.
    fn source_name(&self) -> &str;
    fn supplies(&self, variable: &str) -> bool;
}

/// Resolves an endpoint to a concrete variable.
///
/// A variable is returned unchanged. A group yields its first candidate, in
/// declared order, that `source` supplies.
pub fn resolve<'a, A: Availability + ?Sized>(endpoint: &'a Endpoint, source: &A) -> Result<&'a Variable, StoreError> {
    match endpoint {
        Endpoint::Variable(v) => Ok(v),
        Endpoint::Group(group) => group
            .candidates()
            .iter()
            .find(|candidate| source.supplies(&candidate.name))
            .ok_or_else(|| StoreError::UnresolvedGroup {
                group: group.name().to_string(),
                dataset: source.source_name().to_string(),
                candidates: group.candidates().iter().map(|c| c.name.clone()).collect(),
            }),
    }
}
