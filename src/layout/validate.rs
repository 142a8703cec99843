//! Structural validation of a linkage list.
//!
//! Builds the merge dependency graph with petgraph and checks, in order:
//! heights, reference bounds, acyclicity, single parenthood, reachability
//! from the root and exact leaf coverage.

use petgraph::algo::toposort;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::Dfs;
use petgraph::{Directed, Direction};

use crate::linkage::{LinkageEntry, LinkageError};

/// Index of the root merge: the entry with the greatest height.
///
/// Ties go to the last entry with that height. Returns `None` for an empty
/// list.
pub fn root_index(entries: &[LinkageEntry]) -> Option<usize> {
    let mut max_height = f64::NEG_INFINITY;
    let mut root = None;
    for (index, entry) in entries.iter().enumerate() {
        if entry.height >= max_height {
            max_height = entry.height;
            root = Some(index);
        }
    }
    root
}

/// Validate a linkage list.
///
/// A list with `n` entries must describe a single binary tree over the
/// leaves `0..=n`.
pub fn validate(entries: &[LinkageEntry]) -> Result<(), LinkageError> {
    let len = entries.len();
    if len == 0 {
        return Ok(());
    }
    let leaf_count = len + 1;

    let mut graph: StableGraph<usize, (), Directed> = StableGraph::with_capacity(len, len);
    let nodes: Vec<NodeIndex> = (0..len).map(|i| graph.add_node(i)).collect();
    let mut leaf_seen = vec![false; leaf_count];

    for (index, entry) in entries.iter().enumerate() {
        if !entry.height.is_finite() || entry.height < 0.0 {
            return Err(LinkageError::InvalidHeight {
                entry: index,
                height: entry.height,
            });
        }

        for (target, from_list) in [
            (entry.left, entry.is_left_from_list),
            (entry.right, entry.is_right_from_list),
        ] {
            if from_list {
                if target >= len {
                    return Err(LinkageError::DanglingReference {
                        entry: index,
                        target,
                        len,
                    });
                }
                graph.add_edge(nodes[index], nodes[target], ());
            } else {
                let Some(seen) = leaf_seen.get_mut(target) else {
                    return Err(LinkageError::LeafOutOfRange {
                        entry: index,
                        leaf: target,
                        leaf_count,
                    });
                };
                if *seen {
                    return Err(LinkageError::DuplicateLeaf { leaf: target });
                }
                *seen = true;
            }
        }
    }

    toposort(&graph, None).map_err(|cycle| LinkageError::Cycle {
        entry: graph[cycle.node_id()],
    })?;

    for (index, &node) in nodes.iter().enumerate() {
        if graph.neighbors_directed(node, Direction::Incoming).count() > 1 {
            return Err(LinkageError::SharedMerge { entry: index });
        }
    }

    if let Some(root) = root_index(entries) {
        let mut reached = vec![false; len];
        let mut dfs = Dfs::new(&graph, nodes[root]);
        while let Some(node) = dfs.next(&graph) {
            reached[graph[node]] = true;
        }
        if let Some(entry) = reached.iter().position(|&r| !r) {
            return Err(LinkageError::UnreachableMerge { entry, root });
        }
    }

    if let Some(leaf) = leaf_seen.iter().position(|&seen| !seen) {
        return Err(LinkageError::MissingLeaf { leaf });
    }

    Ok(())
}
