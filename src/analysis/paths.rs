//! Enumeration of simple causal paths.

use crate::store::{ResolvedGraph, VariableId};

/// Every simple directed path from `source` to `target`.
///
/// Iterative depth-first search over children in edge-declaration order. A
/// path ends as soon as an edge reaches `target`; no vertex repeats, so depth
/// never exceeds the number of variables.
pub fn find_paths(graph: &ResolvedGraph, source: VariableId, target: VariableId) -> Vec<Vec<VariableId>> {
    let count = graph.count();
    let mut paths = Vec::new();
    if source == target || source.index() >= count || target.index() >= count {
        return paths;
    }

    let mut on_path = vec![false; count];
    // (node, index of the next child to explore)
    let mut stack: Vec<(VariableId, usize)> = vec![(source, 0)];
    on_path[source.index()] = true;

    loop {
        let (node, cursor) = match stack.last_mut() {
            Some(top) => {
                let cursor = top.1;
                top.1 += 1;
                (top.0, cursor)
            }
            None => break,
        };

        let children = graph.get_children(node);
        let Some(&child) = children.get(cursor) else {
            on_path[node.index()] = false;
            stack.pop();
            continue;
        };

        if child == target {
            let mut path: Vec<VariableId> = stack.iter().map(|&(id, _)| id).collect();
            path.push(target);
            paths.push(path);
        } else if !on_path[child.index()] && stack.len() < count {
            on_path[child.index()] = true;
            stack.push((child, 0));
        }
    }

    paths
}
