//! The seam to the external sampling engine and the generation pass that
//! feeds it variables in dependency order.

use super::error::{CalibrationError, SamplerError};
use super::fingerprint::CacheKey;
use crate::analysis::{self, ScheduleError};
use crate::binding::CalibratedModel;
use crate::compute::PosteriorStore;
use crate::store::{coefficient_name, Likelihood, Variable};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// An already-generated cause of the variable being generated.
#[derive(Debug, Clone, PartialEq)]
pub struct Dependency<H> {
    pub variable: String,
    /// Name under which the sampler must expose the edge coefficient.
    pub coefficient: String,
    pub handle: H,
}

/// Everything the sampler needs to create the node for one variable.
#[derive(Debug, Clone)]
pub struct GenerationStep<'a, H> {
    pub variable: &'a Variable,
    pub likelihood: Likelihood,
    /// Ordered category count, for kinds that have one.
    pub categories: Option<usize>,
    pub dependencies: SmallVec<[Dependency<H>; 4]>,
    /// Prepared series; `None` when the dataset does not supply the variable.
    pub data: Option<Vec<f64>>,
}

/// One calibration run inside the sampling engine.
pub trait SamplingSession {
    /// Opaque model node returned for a generated variable.
    type Handle: Clone;

    fn generate(&mut self, step: GenerationStep<'_, Self::Handle>) -> Result<Self::Handle, SamplerError>;

    /// Draws the posterior once every variable has been generated.
    fn sample(self) -> Result<PosteriorStore, SamplerError>;
}

pub trait SamplingEngine: Sync {
    type Session: SamplingSession;

    fn open_session(&self, key: &CacheKey) -> Result<Self::Session, SamplerError>;
}

/// Hands every variable of `binding` to `session` in schedule order.
///
/// Returns the handle produced for each variable, by name.
pub fn build_model<S: SamplingSession>(
    binding: &CalibratedModel,
    key: &CacheKey,
    session: &mut S,
) -> Result<BTreeMap<String, S::Handle>, CalibrationError> {
    let graph = binding
        .graph()
        .map_err(|source| CalibrationError::Resolve { key: key.clone(), source })?;
    let schedule = analysis::schedule(&graph)
        .map_err(|source| CalibrationError::Schedule { key: key.clone(), source })?;

    let mut handles: Vec<Option<S::Handle>> = vec![None; graph.count()];

    for id in schedule.order() {
        let variable = graph.variable(id);
        let mut dependencies = SmallVec::new();
        for &p in graph.get_parents(id) {
            // The schedule places every parent in an earlier layer.
            let Some(handle) = handles[p.index()].clone() else {
                return Err(CalibrationError::Schedule {
                    key: key.clone(),
                    source: ScheduleError::CircularDependency {
                        unresolved: vec![variable.name.clone()],
                        cycles: Vec::new(),
                    },
                });
            };
            dependencies.push(Dependency {
                variable: graph.name(p).to_string(),
                coefficient: coefficient_name(graph.name(p), &variable.name),
                handle,
            });
        }
        let data = binding.dataset().prepared_series(variable);
        let raw = binding.dataset().raw_series(&variable.name);

        let step = GenerationStep {
            variable,
            likelihood: variable.kind.likelihood(),
            categories: variable.kind.category_count(raw),
            dependencies,
            data,
        };

        let handle = session
            .generate(step)
            .map_err(|source| CalibrationError::SamplerFailure { key: key.clone(), source })?;
        handles[id.index()] = Some(handle);
    }

    Ok(graph
        .ids()
        .zip(handles)
        .filter_map(|(id, h)| h.map(|h| (graph.name(id).to_string(), h)))
        .collect())
}

/// Runs a full calibration without consulting any cache. `key` labels errors
/// and is passed to the engine.
pub fn run_calibration<E: SamplingEngine>(
    binding: &CalibratedModel,
    key: &CacheKey,
    engine: &E,
) -> Result<PosteriorStore, CalibrationError> {
    let failure = |source: SamplerError| CalibrationError::SamplerFailure { key: key.clone(), source };

    let mut session = engine.open_session(key).map_err(failure)?;
    let handles = build_model(binding, key, &mut session)?;
    tracing::debug!(%key, variables = handles.len(), "model generated, sampling");
    session.sample().map_err(failure)
}
