//! The relation store: a named, append-only list of causal relations.

use super::types::{Endpoint, Relation};
use crate::binding::CalibratedModel;
use crate::calibration::fingerprint;
use crate::data::Dataset;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    name: String,
    relations: Vec<Relation>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), relations: Vec::new() }
    }

    pub fn name(&self) -> &str { &self.name }

    /// Relations in declaration order.
    pub fn relations(&self) -> &[Relation] { &self.relations }

    pub fn add_relation(&mut self, relation: Relation) -> &mut Self {
        self.relations.push(relation);
        self
    }

    /// Declares `dependent` as caused by `independent`.
    pub fn relate(&mut self, dependent: impl Into<Endpoint>, independent: impl Into<Endpoint>) -> &mut Self {
        self.add_relation(Relation::new(independent, dependent))
    }

    /// Declares `dependent` as caused by each of `independents`, in order.
    pub fn depends_on<I, E>(&mut self, dependent: impl Into<Endpoint>, independents: I) -> &mut Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Endpoint>,
    {
        let dependent = dependent.into();
        for independent in independents {
            self.relations.push(Relation::new(independent, dependent.clone()));
        }
        self
    }

    /// Relations sorted by the canonical order, independent of declaration order.
    pub fn canonical_relations(&self) -> Vec<&Relation> {
        let mut sorted: Vec<&Relation> = self.relations.iter().collect();
        sorted.sort_by(|a, b| a.canonical_cmp(b));
        sorted
    }

    /// Short content hash of the relation structure.
    pub fn structure_fingerprint(&self) -> String {
        fingerprint::structure_fingerprint(self, fingerprint::DEFAULT_FINGERPRINT_LEN)
    }

    /// Pairs this model with a dataset.
    pub fn bind(&self, dataset: Arc<Dataset>) -> CalibratedModel {
        CalibratedModel::new(self.clone(), dataset)
    }
}
