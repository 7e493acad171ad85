//! A model paired with the dataset it is calibrated against.
//!
//! Everything resolved (graph, schedule, paths, cache key) is derived on demand
//! from the pairing, so a `CalibratedModel` never holds stale state.

use crate::analysis::{self, FlowFactors, Schedule, SinkOutflow};
use crate::calibration::fingerprint::{structure_fingerprint, CacheKey, DEFAULT_FINGERPRINT_LEN};
use crate::calibration::{CalibrationCache, SamplingEngine};
use crate::compute::{compose_paths, Impact, PosteriorStore};
use crate::data::Dataset;
use crate::display::FlowDiagram;
use crate::error::Result;
use crate::store::{self, coefficient_name, Endpoint, Model, ResolvedGraph, Variable};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CalibratedModel {
    model: Model,
    dataset: Arc<Dataset>,
}

impl CalibratedModel {
    pub fn new(model: Model, dataset: Arc<Dataset>) -> Self {
        Self { model, dataset }
    }

    pub fn model(&self) -> &Model { &self.model }

    pub fn dataset(&self) -> &Dataset { &self.dataset }

    pub fn graph(&self) -> Result<ResolvedGraph, store::StoreError> {
        ResolvedGraph::resolve(&self.model, &*self.dataset)
    }

    /// The concrete variable `endpoint` stands for in this dataset.
    pub fn resolve<'a>(&self, endpoint: &'a Endpoint) -> Result<&'a Variable> {
        Ok(store::resolve(endpoint, &*self.dataset)?)
    }

    pub fn schedule(&self) -> Result<Schedule> {
        Ok(analysis::schedule(&self.graph()?)?)
    }

    /// Every simple causal path from `source` to `target`, as concrete variables.
    pub fn paths(&self, source: impl Into<Endpoint>, target: impl Into<Endpoint>) -> Result<Vec<Vec<Variable>>> {
        let graph = self.graph()?;
        let (source, target) = (source.into(), target.into());
        let source = self.resolve(&source)?;
        let target = self.resolve(&target)?;

        let (Some(from), Some(to)) = (graph.id_of(&source.name), graph.id_of(&target.name)) else {
            return Ok(Vec::new());
        };
        Ok(analysis::find_paths(&graph, from, to)
            .into_iter()
            .map(|path| path.into_iter().map(|id| graph.variable(id).clone()).collect())
            .collect())
    }

    /// Impact of `source` on `target`, one entry per causal path.
    pub fn impacts(
        &self,
        source: impl Into<Endpoint>,
        target: impl Into<Endpoint>,
        posterior: &PosteriorStore,
    ) -> Result<Vec<Impact>> {
        let paths = self.paths(source, target)?;
        Ok(compose_paths(&paths, posterior)?)
    }

    /// Like `impacts`, with the posterior fetched through `cache`; `engine`
    /// runs only when no calibration for this pairing exists yet.
    pub fn impacts_calibrated<E: SamplingEngine>(
        &self,
        source: impl Into<Endpoint>,
        target: impl Into<Endpoint>,
        cache: &CalibrationCache,
        engine: &E,
    ) -> Result<Vec<Impact>> {
        let posterior = cache.get_or_calibrate(self, engine)?;
        self.impacts(source, target, &posterior)
    }

    /// Mean absolute coefficient strength per edge, in `graph.edges` order.
    pub fn edge_strengths(&self, graph: &ResolvedGraph, posterior: &PosteriorStore) -> Result<Vec<f64>> {
        graph
            .edges
            .iter()
            .map(|&(from, to)| -> Result<f64> {
                let coefficient = coefficient_name(graph.name(from), graph.name(to));
                Ok(posterior.require(&coefficient)?.mean_abs_strength())
            })
            .collect()
    }

    pub fn flow_factors(&self, posterior: &PosteriorStore, sink: SinkOutflow) -> Result<FlowFactors> {
        let graph = self.graph()?;
        let strengths = self.edge_strengths(&graph, posterior)?;
        Ok(analysis::normalize(&graph, &strengths, sink)?)
    }

    /// Renderer input for the whole model: one link per resolved edge.
    pub fn flow_diagram(&self, posterior: &PosteriorStore, sink: SinkOutflow) -> Result<FlowDiagram> {
        let graph = self.graph()?;
        let strengths = self.edge_strengths(&graph, posterior)?;
        let flow = analysis::normalize(&graph, &strengths, sink)?;
        Ok(FlowDiagram::from_flow(self.model.name(), &graph, &flow))
    }

    pub fn flow_diagram_calibrated<E: SamplingEngine>(
        &self,
        sink: SinkOutflow,
        cache: &CalibrationCache,
        engine: &E,
    ) -> Result<FlowDiagram> {
        let posterior = cache.get_or_calibrate(self, engine)?;
        self.flow_diagram(&posterior, sink)
    }

    pub fn cache_key(&self) -> CacheKey {
        self.cache_key_with_len(DEFAULT_FINGERPRINT_LEN)
    }

    pub fn cache_key_with_len(&self, fingerprint_len: usize) -> CacheKey {
        CacheKey {
            model: self.model.name().to_string(),
            fingerprint: structure_fingerprint(&self.model, fingerprint_len),
            dataset: self.dataset.name().to_string(),
        }
    }
}
