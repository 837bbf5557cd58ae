use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::tree::{
    arena::Arena,
    error::TreeError,
    ids::{ActionId, NodeId},
    node::SearchNode,
    search_tree::SearchTree,
    stats::NodeStats,
};

/// Current version of the persisted tree layout.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Flat, serializable form of a whole search tree.
/// Parent links are not stored; they are rebuilt from `children` on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot<S> {
    pub schema_version: u32,
    pub root_node_id: usize,
    pub simulations: u64,
    pub nodes: Vec<NodeSnapshot<S>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot<S> {
    pub node_id: usize,
    pub state: S,
    pub incoming_action: Option<usize>,
    pub visits: u64,
    pub total_reward: f64,
    pub children: Vec<usize>,
}

impl<S: Clone> SearchTree<S> {
    /// Capture every node, its statistics and its ordered children.
    pub fn snapshot(&self) -> TreeSnapshot<S> {
        let nodes = self
            .nodes()
            .map(|(node_id, node)| NodeSnapshot {
                node_id: node_id.index(),
                state: node.state().clone(),
                incoming_action: node.incoming_action().map(|a| a.index()),
                visits: node.visits(),
                total_reward: node.total_reward(),
                children: node.children().iter().map(NodeId::index).collect(),
            })
            .collect();

        TreeSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            root_node_id: self.root_id().index(),
            simulations: self.simulations(),
            nodes,
        }
    }
}

impl<S> SearchTree<S> {
    /// Rebuild a tree from a snapshot, restoring parent links and depths.
    ///
    /// Rejects snapshots where a child index dangles, a node has two parents,
    /// the root is listed as a child, or some node is unreachable from the root.
    /// Incoming actions must match: none on the root, and child `i` of any
    /// node must carry action `i`.
    pub fn from_snapshot(snapshot: TreeSnapshot<S>) -> Result<Self, TreeError> {
        let malformed = |reason: String| TreeError::MalformedSnapshot { reason };

        if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(malformed(format!(
                "unsupported schema version {}",
                snapshot.schema_version
            )));
        }
        if snapshot.root_node_id != 0 {
            return Err(malformed(format!(
                "root must be node 0, got {}",
                snapshot.root_node_id
            )));
        }
        if snapshot.nodes.is_empty() {
            return Err(malformed("snapshot has no nodes".to_string()));
        }

        let node_count = snapshot.nodes.len();
        let mut parent_of: Vec<Option<usize>> = vec![None; node_count];

        for (idx, node) in snapshot.nodes.iter().enumerate() {
            if node.node_id != idx {
                return Err(malformed(format!(
                    "node at position {idx} has id {}",
                    node.node_id
                )));
            }
            match (idx, node.incoming_action) {
                (0, Some(action)) => {
                    return Err(malformed(format!(
                        "root has incoming action {action}"
                    )));
                }
                (idx, None) if idx != 0 => {
                    return Err(malformed(format!("node {idx} has no incoming action")));
                }
                _ => {}
            }
            for (position, &child) in node.children.iter().enumerate() {
                if child >= node_count {
                    return Err(malformed(format!(
                        "node {idx} references missing child {child}"
                    )));
                }
                if child == 0 {
                    return Err(malformed(format!("node {idx} lists the root as a child")));
                }
                if let Some(previous) = parent_of[child] {
                    return Err(malformed(format!(
                        "node {child} is a child of both {previous} and {idx}"
                    )));
                }
                parent_of[child] = Some(idx);

                // Children come from a full-width expansion in action order
                let action = snapshot.nodes[child].incoming_action;
                if action != Some(position) {
                    return Err(malformed(format!(
                        "child {child} of node {idx} sits at position {position} but has action {action:?}"
                    )));
                }
            }
        }

        let mut arena = Arena::with_capacity(node_count);
        for node in snapshot.nodes {
            let children = node.children.into_iter().map(NodeId::from).collect();
            let restored = SearchNode::restored(
                node.state,
                node.incoming_action.map(ActionId::from),
                NodeStats::from_parts(node.visits, node.total_reward),
                children,
            );
            let _ = arena.allocate(restored);
        }

        // Breadth-first from the root to fill in parents and depths
        let mut reached = 1;
        let mut queue = VecDeque::from([(NodeId::from(0), 0_u64)]);
        while let Some((node_id, depth)) = queue.pop_front() {
            let children = arena
                .get(node_id)
                .map(|node| node.children().to_vec())
                .unwrap_or_default();

            for child_id in children {
                if let Some(child) = arena.get_mut(child_id) {
                    child.set_parent(node_id, depth + 1);
                }
                reached += 1;
                queue.push_back((child_id, depth + 1));
            }
        }

        if reached != node_count {
            return Err(malformed(format!(
                "{} of {node_count} nodes are unreachable from the root",
                node_count - reached
            )));
        }

        Ok(SearchTree::from_parts(arena, snapshot.simulations))
    }
}
