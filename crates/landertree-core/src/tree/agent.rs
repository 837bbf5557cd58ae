use std::path::{Path, PathBuf};

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Serialize, de::DeserializeOwned};

use crate::tree::{
    error::{PersistError, TreeError},
    ids::ActionId,
    mcts::{IterationMetrics, RunMetrics, SearchConfig},
    model::StateModel,
    persist::{load_tree, save_tree, tree_path},
    rollout::{RewardModel, ShapedReward},
    search_tree::SearchTree,
};

/// Runs MCTS against a tree rooted at the state the agent was created with
/// and commits to the most visited root action.
///
/// The tree is kept across calls to [`SearchAgent::select_action`]; every call
/// adds statistics under the same root. Use [`SearchAgent::reroot`] to start
/// over from a new state.
pub struct SearchAgent<M: StateModel, R = ShapedReward, G = ChaCha8Rng> {
    model: M,
    reward: R,
    config: SearchConfig,
    tree: SearchTree<M::State>,
    rng: G,
}

impl<M: StateModel> SearchAgent<M> {
    /// Agent with the shaped reward from `config` and a seeded ChaCha RNG.
    pub fn new(model: M, initial_state: M::State, config: SearchConfig, seed: u64) -> Self {
        let reward = ShapedReward::new(config.reward);
        Self::with_parts(
            model,
            reward,
            initial_state,
            config,
            ChaCha8Rng::seed_from_u64(seed),
        )
    }
}

impl<M, R, G> SearchAgent<M, R, G>
where
    M: StateModel,
    R: RewardModel<M>,
    G: Rng,
{
    /// Build an agent from explicit collaborators.
    pub fn with_parts(
        model: M,
        reward: R,
        initial_state: M::State,
        config: SearchConfig,
        rng: G,
    ) -> Self {
        SearchAgent {
            model,
            reward,
            config,
            tree: SearchTree::new(initial_state),
            rng,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn tree(&self) -> &SearchTree<M::State> {
        &self.tree
    }

    /// Run the configured number of iterations, then return the root action
    /// with the most visits.
    pub fn select_action(&mut self) -> Result<ActionId, TreeError> {
        self.select_action_with_hook(|_| {})
            .map(|(action, _)| action)
    }

    /// Same as [`SearchAgent::select_action`], reporting every iteration to
    /// `on_iteration` and returning the run metrics alongside the action.
    pub fn select_action_with_hook<FHook>(
        &mut self,
        on_iteration: FHook,
    ) -> Result<(ActionId, RunMetrics), TreeError>
    where
        FHook: FnMut(&IterationMetrics),
    {
        let metrics = self.tree.run_with_hook(
            &self.config,
            &self.model,
            &self.reward,
            &mut self.rng,
            on_iteration,
        )?;
        let action = self.tree.best_root_action_by_visits()?;

        debug!(
            "selected action {} after {} iterations (tree: {} nodes, depth {}, avg return {:.3})",
            action.index(),
            metrics.iterations_completed,
            self.tree.node_count(),
            self.tree.max_depth(),
            metrics.average_total_return
        );
        Ok((action, metrics))
    }

    /// Drop the current tree and start a fresh one rooted at `state`.
    pub fn reroot(&mut self, state: M::State) {
        debug!(
            "re-rooting search tree, discarding {} nodes",
            self.tree.node_count()
        );
        self.tree = SearchTree::new(state);
    }
}

impl<M, R, G> SearchAgent<M, R, G>
where
    M: StateModel,
    M::State: Serialize + DeserializeOwned,
{
    /// Persist the tree as `<dir>/<name>.json`, generating a name when none
    /// is given. Returns the path written.
    pub fn save_tree(
        &self,
        dir: impl AsRef<Path>,
        name: Option<&str>,
    ) -> Result<PathBuf, PersistError> {
        save_tree(&self.tree, dir, name)
    }

    /// Replace the tree with the one stored as `<dir>/<name>.json`.
    /// On failure the current tree is left untouched.
    pub fn load_tree(&mut self, dir: impl AsRef<Path>, name: &str) -> Result<(), PersistError> {
        self.tree = load_tree(tree_path(dir, name))?;
        Ok(())
    }
}
