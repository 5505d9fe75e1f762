//! Statistics and introspection for octart.
//!
//! Walks a tree and reports how many nodes of each size class it holds, how full they are and
//! how tall the tree has grown. Useful when tuning workloads and when checking that growth
//! behaves as expected.

use std::collections::HashMap;

use crate::node::{Node, NodeKind};
use crate::tree::AdaptiveRadixTree;

pub trait TreeStatsTrait {
    fn get_tree_stats(&self) -> TreeStats;
}

#[derive(Debug, Clone, Default)]
pub struct NodeStats {
    pub width: usize,
    pub node_kind: Option<NodeKind>,
    pub total_nodes: usize,
    pub total_children: usize,
    /// Children per available slot, over all nodes of this kind.
    pub density: f64,
}

#[derive(Debug, Clone, Default)]
pub struct TreeStats {
    pub node_stats: HashMap<NodeKind, NodeStats>,
    pub num_leaves: usize,
    pub num_inner_nodes: usize,
    pub total_density: f64,
    /// Number of nodes on the longest root-to-leaf path, counting both ends.
    pub max_height: usize,
}

fn update_tree_stats<V>(tree_stats: &mut TreeStats, node: &Node<V>) {
    let kind = node.kind();
    let num_children = node.num_children();

    tree_stats
        .node_stats
        .entry(kind)
        .and_modify(|e| {
            e.total_nodes += 1;
            e.total_children += num_children;
        })
        .or_insert(NodeStats {
            width: node.capacity(),
            node_kind: Some(kind),
            total_nodes: 1,
            total_children: num_children,
            density: 0.0,
        });
}

fn get_tree_stats_recurse<V>(node: &Node<V>, tree_stats: &mut TreeStats, height: usize) {
    if height > tree_stats.max_height {
        tree_stats.max_height = height;
    }
    if node.is_leaf() {
        tree_stats.num_leaves += 1;
        return;
    }
    update_tree_stats(tree_stats, node);
    for (_k, child) in node.iter() {
        get_tree_stats_recurse(child, tree_stats, height + 1);
    }
}

impl<V> TreeStatsTrait for AdaptiveRadixTree<V> {
    fn get_tree_stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();

        let Some(root) = self.root() else {
            return stats;
        };
        get_tree_stats_recurse(root, &mut stats, 1);

        let mut total_children = 0;
        let mut total_width = 0;
        for ns in stats.node_stats.values_mut() {
            total_children += ns.total_children;
            total_width += ns.width * ns.total_nodes;
            ns.density = ns.total_children as f64 / (ns.width * ns.total_nodes) as f64;
        }
        stats.num_inner_nodes = stats.node_stats.values().map(|ns| ns.total_nodes).sum();
        if total_width > 0 {
            stats.total_density = total_children as f64 / total_width as f64;
        }
        stats
    }
}
