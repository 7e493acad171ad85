//! Flow normalization: per-variable scale factors for diagram link weights.

use super::topology::{layers, ScheduleError};
use crate::store::{ResolvedGraph, VariableId};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outgoing strength assumed for a variable with no (or zero-strength) dependents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkOutflow {
    /// Sinks pass on exactly what flows into them, so their factor is 1.
    #[default]
    ConserveInflow,
    /// Sinks emit a unit flow regardless of their inflow.
    Unit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowFactors {
    /// Indexed by `VariableId`.
    pub factors: Vec<f64>,
    /// Weight per entry of `ResolvedGraph::edges`.
    pub link_weights: Vec<f64>,
}

impl FlowFactors {
    pub fn factor(&self, id: VariableId) -> f64 { self.factors[id.index()] }
}

/// Computes scale factors sink-to-source.
///
/// `strengths[i]` is the mean absolute strength of `graph.edges[i]`.
pub fn normalize(graph: &ResolvedGraph, strengths: &[f64], sink: SinkOutflow) -> Result<FlowFactors, ScheduleError> {
    debug_assert_eq!(strengths.len(), graph.edges.len());
    let edge_strength: HashMap<(VariableId, VariableId), f64> =
        graph.edges.iter().copied().zip(strengths.iter().copied()).collect();
    let strength = |from: VariableId, to: VariableId| edge_strength.get(&(from, to)).copied().unwrap_or(0.0);

    let mut factors = vec![f64::NAN; graph.count()];

    for layer in layers(graph, Direction::Outgoing)? {
        for p in layer {
            let inflow: f64 = graph.get_parents(p).iter().map(|&c| strength(c, p)).sum();

            let outflow: f64 = graph
                .get_children(p)
                .iter()
                .map(|&d| strength(p, d) * factors[d.index()])
                .sum();
            let outgoing = if outflow != 0.0 {
                outflow
            } else {
                match sink {
                    SinkOutflow::ConserveInflow if inflow != 0.0 => inflow,
                    _ => 1.0,
                }
            };

            let incoming = if inflow != 0.0 { inflow } else { outgoing };
            factors[p.index()] = outgoing / incoming;
        }
    }

    let link_weights = graph
        .edges
        .iter()
        .map(|&(from, to)| strength(from, to) * factors[to.index()])
        .collect();

    Ok(FlowFactors { factors, link_weights })
}
