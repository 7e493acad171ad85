//! registry.rs
//! The resolved graph: concrete variables in first-seen order with dense
//! parent/child adjacency (CSR layout).

use super::error::StoreError;
use super::model::Model;
use super::resolve::{resolve, Availability};
use super::types::{Variable, VariableId};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct ResolvedGraph {
    pub variables: Vec<Variable>,
    ids: HashMap<String, VariableId>,

    /// Unique edges `(independent, dependent)` in declaration order.
    pub edges: Vec<(VariableId, VariableId)>,

    // Dense Topology
    pub parents_flat: Vec<VariableId>,
    pub parents_ranges: Vec<(u32, u32)>, // (start, count)
    pub children_flat: Vec<VariableId>,
    pub children_ranges: Vec<(u32, u32)>,
}

impl ResolvedGraph {
    /// Resolves every relation endpoint of `model` against `source`.
    ///
    /// Variables are registered in first-seen order, dependent side before
    /// independent side for each relation.
    pub fn resolve<A: Availability + ?Sized>(model: &Model, source: &A) -> Result<Self, StoreError> {
        let mut builder = GraphBuilder::default();
        for relation in model.relations() {
            let dependent = builder.intern(resolve(&relation.dependent, source)?)?;
            let independent = builder.intern(resolve(&relation.independent, source)?)?;
            builder.add_edge(independent, dependent);
        }
        Ok(builder.finish())
    }

    pub fn count(&self) -> usize { self.variables.len() }

    pub fn variable(&self, id: VariableId) -> &Variable { &self.variables[id.index()] }

    pub fn name(&self, id: VariableId) -> &str { &self.variables[id.index()].name }

    pub fn id_of(&self, name: &str) -> Option<VariableId> { self.ids.get(name).copied() }

    pub fn ids(&self) -> impl Iterator<Item = VariableId> { (0..self.count()).map(VariableId::new) }

    #[inline(always)]
    pub fn get_parents(&self, id: VariableId) -> &[VariableId] {
        let (start, count) = self.parents_ranges[id.index()];
        &self.parents_flat[start as usize..(start + count) as usize]
    }

    #[inline(always)]
    pub fn get_children(&self, id: VariableId) -> &[VariableId] {
        let (start, count) = self.children_ranges[id.index()];
        &self.children_flat[start as usize..(start + count) as usize]
    }

    pub fn names(&self, ids: &[VariableId]) -> Vec<String> {
        ids.iter().map(|&id| self.name(id).to_string()).collect()
    }
}

/// Incremental construction of a `ResolvedGraph`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    variables: Vec<Variable>,
    ids: HashMap<String, VariableId>,
    edges: Vec<(VariableId, VariableId)>,
    seen_edges: HashSet<(VariableId, VariableId)>,
}

impl GraphBuilder {
    /// Registers `variable` by name, returning the existing id if already known.
    pub fn intern(&mut self, variable: &Variable) -> Result<VariableId, StoreError> {
        if let Some(&id) = self.ids.get(&variable.name) {
            if self.variables[id.index()].kind != variable.kind {
                return Err(StoreError::ConflictingDefinition { name: variable.name.clone() });
            }
            return Ok(id);
        }
        let id = VariableId::new(self.variables.len());
        self.ids.insert(variable.name.clone(), id);
        self.variables.push(variable.clone());
        Ok(id)
    }

    /// Adds `from -> to`. Repeated edges are kept once.
    pub fn add_edge(&mut self, from: VariableId, to: VariableId) {
        if self.seen_edges.insert((from, to)) {
            self.edges.push((from, to));
        }
    }

    pub fn finish(self) -> ResolvedGraph {
        let count = self.variables.len();
        let mut parents: Vec<Vec<VariableId>> = vec![Vec::new(); count];
        let mut children: Vec<Vec<VariableId>> = vec![Vec::new(); count];
        for &(from, to) in &self.edges {
            parents[to.index()].push(from);
            children[from.index()].push(to);
        }

        let (parents_flat, parents_ranges) = flatten(parents);
        let (children_flat, children_ranges) = flatten(children);

        ResolvedGraph {
            variables: self.variables,
            ids: self.ids,
            edges: self.edges,
            parents_flat,
            parents_ranges,
            children_flat,
            children_ranges,
        }
    }
}

fn flatten(lists: Vec<Vec<VariableId>>) -> (Vec<VariableId>, Vec<(u32, u32)>) {
    let mut flat = Vec::with_capacity(lists.iter().map(Vec::len).sum());
    let mut ranges = Vec::with_capacity(lists.len());
    for list in lists {
        ranges.push((flat.len() as u32, list.len() as u32));
        flat.extend(list);
    }
    (flat, ranges)
}


#[cfg(test)]
mod tests {
    use super::test_support::graph_from;
    use super::*;
    use crate::store::{Endpoint, VariableGroup};

    struct Supplies(&'static [&'static str]);

    impl Availability for Supplies {
        fn source_name(&self) -> &str { "test" }
        fn supplies(&self, variable: &str) -> bool { self.0.contains(&variable) }
    }

    #[test]
    fn test_first_seen_order_and_adjacency() {
        let g = graph_from(&[("A", "B"), ("B", "C"), ("A", "C")]);
        // Dependent side registered before independent side.
        assert_eq!(g.names(&g.ids().collect::<Vec<_>>()), vec!["B", "A", "C"]);

        let a = g.id_of("A").unwrap();
        let b = g.id_of("B").unwrap();
        let c = g.id_of("C").unwrap();
        assert_eq!(g.get_children(a), &[b, c]);
        assert_eq!(g.get_parents(c), &[b, a]);
        assert!(g.get_parents(a).is_empty());
    }

    #[test]
    fn test_duplicate_edges_kept_once() {
        let g = graph_from(&[("A", "B"), ("A", "B")]);
        assert_eq!(g.edges.len(), 1);
        assert_eq!(g.get_parents(g.id_of("B").unwrap()).len(), 1);
    }

    #[test]
    fn test_groups_resolve_to_shared_variable() {
        let schooling = Variable::positive("years");
        let education = VariableGroup::new("education", vec![Variable::ordinal("level", None), schooling.clone()]).unwrap();
        let health = Variable::boolean("malnutrition");

        let mut model = Model::new("m");
        model.relate(&health, &education);
        model.relate(&health, &schooling);

        let g = ResolvedGraph::resolve(&model, &Supplies(&["years", "malnutrition"])).unwrap();
        assert_eq!(g.count(), 2);
        assert_eq!(g.edges.len(), 1, "group and variable resolve to the same edge");
    }

    #[test]
    fn test_conflicting_kinds_rejected() {
        let mut model = Model::new("m");
        model.relate(Endpoint::from(Variable::boolean("x")), Variable::continuous("y"));
        model.relate(Endpoint::from(Variable::continuous("x")), Variable::continuous("z"));

        let err = ResolvedGraph::resolve(&model, &Supplies(&[])).unwrap_err();
        assert_eq!(err, StoreError::ConflictingDefinition { name: "x".into() });
    }
}
