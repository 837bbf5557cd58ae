use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tree::{
    arena::Arena,
    error::TreeError,
    ids::{ActionId, NodeId},
    model::StateModel,
    node::SearchNode,
};

/// How far a single tree-policy call walks before handing over to a rollout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreePolicyMode {
    /// Keep selecting best children until an unexpanded or terminal node is
    /// reached, expand it and return one of its new children.
    #[default]
    Descend,
    /// Expand the root on first use, afterwards only ever pick one of its
    /// children. The tree never grows past depth one.
    SingleStep,
}

#[derive(Debug, Clone)]
/// Owns the arena (root is always at index 0) and the simulation counter.
/// Provides the selection, expansion and backpropagation operations.
pub struct SearchTree<S> {
    arena: Arena<SearchNode<S>>,
    simulations: u64,
}

impl<S> SearchTree<S> {
    /// Create a tree with a single unexpanded root node.
    pub fn new(root_state: S) -> Self {
        let mut arena = Arena::new();
        let _ = arena.allocate(SearchNode::root(root_state));
        SearchTree {
            arena,
            simulations: 0,
        }
    }

    pub(crate) fn from_parts(arena: Arena<SearchNode<S>>, simulations: u64) -> Self {
        SearchTree { arena, simulations }
    }

    /// Return the root node id.
    pub fn root_id(&self) -> NodeId {
        NodeId::from(0)
    }

    /// Return the root node.
    pub fn root(&self) -> Result<&SearchNode<S>, TreeError> {
        self.node(self.root_id())
    }

    /// Return how many nodes exist in the tree arena.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of completed search iterations recorded on this tree.
    pub fn simulations(&self) -> u64 {
        self.simulations
    }

    pub(crate) fn record_simulation(&mut self) {
        self.simulations += 1;
    }

    /// Iterate over every node with its id, in allocation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SearchNode<S>)> {
        self.arena
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId::from(idx), node))
    }

    /// Deepest node currently in the tree.
    pub fn max_depth(&self) -> u64 {
        self.arena.iter().map(SearchNode::depth).max().unwrap_or(0)
    }

    /// Return an immutable node handle.
    pub fn node(&self, node_id: NodeId) -> Result<&SearchNode<S>, TreeError> {
        self.arena
            .get(node_id)
            .ok_or(TreeError::MissingNode { node_id })
    }

    /// Return a mutable node handle.
    pub(crate) fn node_mut(&mut self, node_id: NodeId) -> Result<&mut SearchNode<S>, TreeError> {
        self.arena
            .get_mut(node_id)
            .ok_or(TreeError::MissingNode { node_id })
    }

    /// Pick the child with the highest smoothed UCB1 score.
    ///
    /// Comparison is strict, so on equal scores the lowest action index wins.
    pub fn best_child(&self, node_id: NodeId, exploration: bool) -> Result<NodeId, TreeError> {
        let node = self.node(node_id)?;
        let parent_visits = node.visits();

        let mut best: Option<NodeId> = None;
        let mut best_score = f64::MIN;

        for &child_id in node.children() {
            let score = self
                .node(child_id)?
                .stats()
                .ucb_score(parent_visits, exploration);

            if best.is_none() || score > best_score {
                best_score = score;
                best = Some(child_id);
            }
        }

        best.ok_or(TreeError::NotExpanded { node_id })
    }

    /// Add `reward` to every node from `leaf` up to the root inclusive.
    /// Returns how many nodes were updated.
    pub fn backpropagate(&mut self, leaf: NodeId, reward: f64) -> Result<usize, TreeError> {
        let mut current = Some(leaf);
        let mut updated = 0;

        while let Some(node_id) = current {
            let node = self.node_mut(node_id)?;
            node.stats_mut().record(reward);
            current = node.parent();
            updated += 1;
        }

        Ok(updated)
    }

    /// Pick the root action with the highest visit count.
    /// Ties go to the child encountered first.
    pub fn best_root_action_by_visits(&self) -> Result<ActionId, TreeError> {
        let root = self.root()?;
        let mut best: Option<(NodeId, u64)> = None;

        for &child_id in root.children() {
            let visits = self.node(child_id)?.visits();
            best = match best {
                Some((_, best_visits)) if best_visits >= visits => best,
                _ => Some((child_id, visits)),
            };
        }

        let (child_id, _) = best.ok_or(TreeError::EmptyRoot)?;
        self.node(child_id)?
            .incoming_action()
            .ok_or_else(|| TreeError::MalformedSnapshot {
                reason: format!("root child {} has no incoming action", child_id.index()),
            })
    }

    /// Visit counts of the root children, in action order.
    pub fn root_visit_distribution(&self) -> Result<Vec<u64>, TreeError> {
        self.root()?
            .children()
            .iter()
            .map(|&child_id| self.node(child_id).map(SearchNode::visits))
            .collect()
    }
}

impl<S> SearchTree<S> {
    /// Materialize one child per action in index order and return one of
    /// them chosen uniformly at random.
    ///
    /// An already expanded node keeps its children; a random one of those is
    /// returned instead.
    pub fn expand<M, G>(
        &mut self,
        node_id: NodeId,
        model: &M,
        rng: &mut G,
    ) -> Result<NodeId, TreeError>
    where
        M: StateModel<State = S>,
        G: Rng,
    {
        let num_actions = model.num_actions();
        if num_actions == 0 {
            return Err(TreeError::NoActions { node_id });
        }

        if !self.node(node_id)?.is_expanded() {
            let (states, depth) = {
                let node = self.node(node_id)?;
                let states: Vec<S> = (0..num_actions)
                    .map(|a| model.transition(node.state(), ActionId::from(a)))
                    .collect();
                (states, node.depth() + 1)
            };

            for (a, state) in states.into_iter().enumerate() {
                let child = SearchNode::child(state, node_id, ActionId::from(a), depth);
                let child_id = self.arena.allocate(child);
                self.node_mut(node_id)?.push_child(child_id);
            }
        }

        let children = self.node(node_id)?.children();
        Ok(children[rng.gen_range(0..children.len())])
    }

    /// Select the node the next rollout starts from, expanding as needed.
    pub fn tree_policy<M, G>(
        &mut self,
        model: &M,
        mode: TreePolicyMode,
        rng: &mut G,
    ) -> Result<NodeId, TreeError>
    where
        M: StateModel<State = S>,
        G: Rng,
    {
        let mut current = self.root_id();

        loop {
            let node = self.node(current)?;

            // Terminal nodes are rolled out as they are, never expanded
            if model.is_terminal(node.state()) {
                return Ok(current);
            }

            if !node.is_expanded() {
                return self.expand(current, model, rng);
            }

            current = self.best_child(current, true)?;

            if mode == TreePolicyMode::SingleStep {
                return Ok(current);
            }
        }
    }
}
