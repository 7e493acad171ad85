//! Variables, groups, relations and the resolved causal graph.
pub mod error;
pub mod model;
pub mod registry;
pub mod resolve;
pub mod types;

pub use error::StoreError;
pub use model::Model;
pub use registry::{GraphBuilder, ResolvedGraph};
pub use resolve::{resolve, Availability};
pub use types::{
    coefficient_name, Endpoint, Likelihood, Relation, Variable, VariableGroup, VariableId, VariableKind,
};
