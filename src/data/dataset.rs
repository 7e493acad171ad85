use super::table::TabularSource;
use super::transform;
use crate::store::{Availability, Variable};
use std::collections::HashMap;
use std::sync::Arc;

/// A named tabular source plus the mapping from its columns to model variables.
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    source: Arc<dyn TabularSource>,
    columns: Vec<(String, Variable)>,
    by_variable: HashMap<String, usize>,
}

impl Dataset {
    pub fn new<I, S>(name: impl Into<String>, source: Arc<dyn TabularSource>, columns: I) -> Self
    where
        I: IntoIterator<Item = (S, Variable)>,
        S: Into<String>,
    {
        let columns: Vec<(String, Variable)> = columns.into_iter().map(|(c, v)| (c.into(), v)).collect();
        let by_variable = columns
            .iter()
            .enumerate()
            .map(|(i, (_, v))| (v.name.clone(), i))
            .collect();
        Self { name: name.into(), source, columns, by_variable }
    }

    pub fn name(&self) -> &str { &self.name }

    /// `(column, variable)` pairs in declaration order.
    pub fn columns(&self) -> &[(String, Variable)] { &self.columns }

    /// True when the dataset maps `variable` to a column the source actually has.
    pub fn contains(&self, variable: &str) -> bool {
        self.raw_series(variable).is_some()
    }

    pub fn raw_series(&self, variable: &str) -> Option<&[f64]> {
        let &idx = self.by_variable.get(variable)?;
        self.source.column(&self.columns[idx].0)
    }

    /// Series for `variable`, transformed by its kind's normalization rule.
    pub fn prepared_series(&self, variable: &Variable) -> Option<Vec<f64>> {
        self.raw_series(&variable.name)
            .map(|raw| transform::prepare(&variable.kind, raw))
    }
}

impl Availability for Dataset {
    fn source_name(&self) -> &str { &self.name }
    fn supplies(&self, variable: &str) -> bool { self.contains(variable) }
}
