use crate::tree::{
    ids::{ActionId, NodeId},
    stats::NodeStats,
};

#[derive(Debug, Clone)]
/// One position in the explored action tree.
/// Children and parent are arena handles; the arena owns every node and
/// `parent` is only followed during backpropagation.
pub struct SearchNode<S> {
    state: S,
    incoming_action: Option<ActionId>,
    depth: u64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    stats: NodeStats,
}

impl<S> SearchNode<S> {
    /// Create the root node of a tree
    pub(crate) fn root(state: S) -> Self {
        SearchNode {
            state,
            incoming_action: None,
            depth: 0,
            parent: None,
            children: Vec::new(),
            stats: NodeStats::new(),
        }
    }

    /// Create an unexpanded child reached from `parent` through `action`
    pub(crate) fn child(state: S, parent: NodeId, action: ActionId, depth: u64) -> Self {
        SearchNode {
            state,
            incoming_action: Some(action),
            depth,
            parent: Some(parent),
            children: Vec::new(),
            stats: NodeStats::new(),
        }
    }

    /// Rebuild a node from persisted fields. Parent and depth are filled in
    /// afterwards from the child lists.
    pub(crate) fn restored(
        state: S,
        incoming_action: Option<ActionId>,
        stats: NodeStats,
        children: Vec<NodeId>,
    ) -> Self {
        SearchNode {
            state,
            incoming_action,
            depth: 0,
            parent: None,
            children,
            stats,
        }
    }

    /// The state snapshot this node represents
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Action that produced this node from its parent, `None` for the root
    pub fn incoming_action(&self) -> Option<ActionId> {
        self.incoming_action
    }

    /// Distance from the root
    pub fn depth(&self) -> u64 {
        self.depth
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in action-index order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// A node is expanded once its full set of children exists
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn stats(&self) -> &NodeStats {
        &self.stats
    }

    pub fn visits(&self) -> u64 {
        self.stats.visits()
    }

    pub fn total_reward(&self) -> f64 {
        self.stats.total_reward()
    }

    pub(crate) fn stats_mut(&mut self) -> &mut NodeStats {
        &mut self.stats
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub(crate) fn set_parent(&mut self, parent: NodeId, depth: u64) {
        self.parent = Some(parent);
        self.depth = depth;
    }
}
