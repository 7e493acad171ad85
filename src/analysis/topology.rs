use crate::store::{ResolvedGraph, VariableId};
use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;
use petgraph::Direction;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// `unresolved` holds every variable left when layering stalled; `cycles`
    /// holds the strongly connected groups among them that actually loop.
    #[error("Circular dependency among: {}", unresolved.join(", "))]
    CircularDependency { unresolved: Vec<String>, cycles: Vec<Vec<String>> },
}

impl ScheduleError {
    /// Variables lying on at least one cycle, in first-seen order.
    pub fn cycle_members(&self) -> Vec<&str> {
        match self {
            ScheduleError::CircularDependency { unresolved, cycles } => unresolved
                .iter()
                .filter(|name| cycles.iter().any(|c| c.contains(name)))
                .map(String::as_str)
                .collect(),
        }
    }
}

/// Generation order grouped into layers. Every variable in layer `k` depends
/// only on variables from layers `< k`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    pub layers: Vec<Vec<VariableId>>,
}

impl Schedule {
    pub fn order(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.layers.iter().flatten().copied()
    }

    pub fn len(&self) -> usize { self.layers.iter().map(Vec::len).sum() }

    pub fn is_empty(&self) -> bool { self.layers.is_empty() }
}

/// Orders variables so each one follows all of its causes.
pub fn schedule(graph: &ResolvedGraph) -> Result<Schedule, ScheduleError> {
    let layers = layers(graph, Direction::Incoming)?;
    tracing::debug!(variables = graph.count(), layers = layers.len(), "generation schedule built");
    Ok(Schedule { layers })
}

/// Iterative layering (Kahn's algorithm by rounds).
///
/// With `Direction::Incoming` a variable waits for its parents; with
/// `Direction::Outgoing` it waits for its children (sink-to-source order).
/// Within a layer, variables keep their first-seen order.
pub fn layers(graph: &ResolvedGraph, direction: Direction) -> Result<Vec<Vec<VariableId>>, ScheduleError> {
    let count = graph.count();
    let mut resolved = vec![false; count];
    let mut remaining: Vec<VariableId> = graph.ids().collect();
    let mut layers = Vec::new();

    while !remaining.is_empty() {
        // Snapshot: readiness is judged against variables resolved before this round.
        let ready: Vec<VariableId> = remaining
            .iter()
            .copied()
            .filter(|&id| prerequisites(graph, id, direction).iter().all(|p| resolved[p.index()]))
            .collect();

        if ready.is_empty() {
            return Err(circular_dependency(graph, &remaining));
        }

        for id in &ready {
            resolved[id.index()] = true;
        }
        remaining.retain(|id| !resolved[id.index()]);
        layers.push(ready);
    }

    Ok(layers)
}

#[inline]
fn prerequisites(graph: &ResolvedGraph, id: VariableId, direction: Direction) -> &[VariableId] {
    match direction {
        Direction::Incoming => graph.get_parents(id),
        Direction::Outgoing => graph.get_children(id),
    }
}

fn circular_dependency(graph: &ResolvedGraph, stalled: &[VariableId]) -> ScheduleError {
    let mut sub = DiGraph::<VariableId, ()>::with_capacity(stalled.len(), 0);
    let index: HashMap<VariableId, _> = stalled.iter().map(|&id| (id, sub.add_node(id))).collect();
    for &(from, to) in &graph.edges {
        if let (Some(&a), Some(&b)) = (index.get(&from), index.get(&to)) {
            sub.add_edge(a, b, ());
        }
    }

    let mut cycles: Vec<Vec<VariableId>> = tarjan_scc(&sub)
        .into_iter()
        .filter(|scc| scc.len() > 1 || sub.contains_edge(scc[0], scc[0]))
        .map(|scc| {
            let mut ids: Vec<VariableId> = scc.into_iter().map(|n| sub[n]).collect();
            ids.sort();
            ids
        })
        .collect();
    cycles.sort();

    ScheduleError::CircularDependency {
        unresolved: graph.names(stalled),
        cycles: cycles.iter().map(|c| graph.names(c)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::registry::test_support::graph_from;
    use proptest::prelude::*;

    fn position(graph: &ResolvedGraph, order: &[VariableId], name: &str) -> usize {
        let id = graph.id_of(name).unwrap();
        order.iter().position(|&x| x == id).unwrap()
    }

    #[test]
    fn test_sort_diamond_dependency() {
        // Shape: A -> B, A -> C, B+C -> D
        let g = graph_from(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
        let s = schedule(&g).expect("Sort failed");
        let order: Vec<_> = s.order().collect();

        assert!(position(&g, &order, "A") < position(&g, &order, "B"));
        assert!(position(&g, &order, "A") < position(&g, &order, "C"));
        assert!(position(&g, &order, "B") < position(&g, &order, "D"));
        assert!(position(&g, &order, "C") < position(&g, &order, "D"));
        assert_eq!(s.layers.len(), 3);
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn test_layers_keep_first_seen_order() {
        // First-seen order: B, A, D, C
        let g = graph_from(&[("A", "B"), ("C", "D")]);
        let s = schedule(&g).unwrap();
        assert_eq!(g.names(&s.layers[0]), vec!["A", "C"]);
        assert_eq!(g.names(&s.layers[1]), vec!["B", "D"]);
    }

    #[test]
    fn test_cycle_detection_names_cycle_and_remainder() {
        // A <-> B is a cycle; C depends on it; R is a free root.
        let g = graph_from(&[("A", "B"), ("B", "A"), ("B", "C"), ("R", "C")]);
        let err = schedule(&g).unwrap_err();
        let ScheduleError::CircularDependency { unresolved, cycles } = &err;

        let mut stalled = unresolved.clone();
        stalled.sort();
        assert_eq!(stalled, vec!["A", "B", "C"]);
        assert_eq!(cycles.len(), 1);
        let mut members = cycles[0].clone();
        members.sort();
        assert_eq!(members, vec!["A", "B"]);
        assert!(err.to_string().contains("Circular dependency"));
        assert_eq!(err.cycle_members().len(), 2);
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let g = graph_from(&[("A", "A")]);
        let err = schedule(&g).unwrap_err();
        assert_eq!(err.cycle_members(), vec!["A"]);
    }

    #[test]
    fn test_reverse_layers_run_sink_first() {
        let g = graph_from(&[("A", "B"), ("B", "C")]);
        let rev = layers(&g, Direction::Outgoing).unwrap();
        let names: Vec<Vec<String>> = rev.iter().map(|l| g.names(l)).collect();
        assert_eq!(names, vec![vec!["C"], vec!["B"], vec!["A"]]);
    }

    fn acyclic_edges() -> impl Strategy<Value = Vec<(usize, usize)>> {
        // Edges only go from lower to higher index, so the graph is a DAG.
        prop::collection::vec((0usize..12, 0usize..12), 0..30).prop_map(|pairs| {
            pairs
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.min(b), a.max(b)))
                .collect()
        })
    }

    fn named(edges: &[(usize, usize)]) -> Vec<(String, String)> {
        edges.iter().map(|(a, b)| (format!("v{a}"), format!("v{b}"))).collect()
    }

    proptest! {
        #[test]
        fn prop_dependencies_precede_dependents(edges in acyclic_edges()) {
            let names = named(&edges);
            let pairs: Vec<(&str, &str)> = names.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
            let g = graph_from(&pairs);

            let first: Vec<_> = schedule(&g).unwrap().order().collect();
            let second: Vec<_> = schedule(&g).unwrap().order().collect();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), g.count());

            for &(from, to) in &g.edges {
                let pf = first.iter().position(|&x| x == from).unwrap();
                let pt = first.iter().position(|&x| x == to).unwrap();
                prop_assert!(pf < pt);
            }
        }

        #[test]
        fn prop_back_edge_always_reported(edges in acyclic_edges()) {
            prop_assume!(!edges.is_empty());
            let (a, b) = edges[0];
            let mut cyclic = edges.clone();
            cyclic.push((b, a));
            let names = named(&cyclic);
            let pairs: Vec<(&str, &str)> = names.iter().map(|(x, y)| (x.as_str(), y.as_str())).collect();
            let g = graph_from(&pairs);

            let err = schedule(&g).unwrap_err();
            let members = err.cycle_members();
            let a_name = format!("v{a}");
            let b_name = format!("v{b}");
            prop_assert!(members.contains(&a_name.as_str()));
            prop_assert!(members.contains(&b_name.as_str()));
        }
    }
}
