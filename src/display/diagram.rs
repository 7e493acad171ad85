//! Flow diagram description handed to an external renderer.

use crate::analysis::FlowFactors;
use crate::store::ResolvedGraph;
use serde::{Deserialize, Serialize};

/// One weighted link between two entries of `FlowDiagram::labels`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDiagram {
    pub title: String,
    /// Variable names, indexed like the resolved graph.
    pub labels: Vec<String>,
    pub links: Vec<FlowLink>,
}

impl FlowDiagram {
    pub fn from_flow(title: impl Into<String>, graph: &ResolvedGraph, flow: &FlowFactors) -> Self {
        let labels = graph.ids().map(|id| graph.name(id).to_string()).collect();
        let links = graph
            .edges
            .iter()
            .zip(&flow.link_weights)
            .map(|(&(from, to), &value)| FlowLink { source: from.index(), target: to.index(), value })
            .collect();
        Self { title: title.into(), labels, links }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{normalize, SinkOutflow};
    use crate::store::registry::test_support::graph_from;

    #[test]
    fn test_links_index_labels() {
        let g = graph_from(&[("A", "B"), ("B", "C")]);
        let flow = normalize(&g, &[2.0, 4.0], SinkOutflow::ConserveInflow).unwrap();
        let diagram = FlowDiagram::from_flow("chain", &g, &flow);

        // Dependents are registered before their causes.
        assert_eq!(diagram.labels, vec!["B", "A", "C"]);
        assert_eq!(
            diagram.links,
            vec![
                FlowLink { source: 1, target: 0, value: 4.0 },
                FlowLink { source: 0, target: 2, value: 4.0 },
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let g = graph_from(&[("A", "B")]);
        let flow = normalize(&g, &[3.0], SinkOutflow::ConserveInflow).unwrap();
        let json = FlowDiagram::from_flow("m", &g, &flow).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "m");
        assert_eq!(value["links"][0]["value"], 3.0);
    }
}
