use std::{fmt, fs, path::Path};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tree::{
    error::TreeError,
    ids::NodeId,
    model::StateModel,
    rollout::{RewardModel, RewardWeights, rollout},
    search_tree::{SearchTree, TreePolicyMode},
};

const DEFAULT_SEARCH_CONFIG_YAML: &str = include_str!("../../config/search.default.yaml");

/// Search configuration for MCTS iterations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Iterations run per action decision.
    pub iterations: usize,
    /// Rollouts are truncated after this many steps.
    pub max_rollout_depth: usize,
    pub tree_policy: TreePolicyMode,
    pub reward: RewardWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            iterations: 1000,
            max_rollout_depth: 100,
            tree_policy: TreePolicyMode::Descend,
            reward: RewardWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Parse a search config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SearchConfigError> {
        let config: SearchConfig = serde_yaml::from_str(yaml).map_err(SearchConfigError::Yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a search config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SearchConfigError> {
        let yaml = fs::read_to_string(path).map_err(SearchConfigError::Io)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SEARCH_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, SearchConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    pub fn validate(&self) -> Result<(), SearchConfigError> {
        if self.iterations == 0 {
            return Err(SearchConfigError::Invalid(
                "iterations must be greater than 0".to_string(),
            ));
        }
        if self.max_rollout_depth == 0 {
            return Err(SearchConfigError::Invalid(
                "max_rollout_depth must be greater than 0".to_string(),
            ));
        }
        self.reward.validate().map_err(SearchConfigError::Invalid)
    }
}

/// Error type for loading and validating `SearchConfig`.
#[derive(Debug)]
pub enum SearchConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl fmt::Display for SearchConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            SearchConfigError::Yaml(err) => write!(f, "failed to parse config YAML: {err}"),
            SearchConfigError::Invalid(err) => write!(f, "invalid search config: {err}"),
        }
    }
}

impl std::error::Error for SearchConfigError {}

/// Per-iteration metrics emitted by MCTS.
#[derive(Debug, Clone, Copy)]
pub struct IterationMetrics {
    pub leaf: NodeId,
    pub leaf_depth: u64,
    pub path_len: usize,
    pub rollout_return: f64,
}

/// Aggregate metrics for a complete search run.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    pub iterations_requested: usize,
    pub iterations_completed: usize,
    pub total_return_sum: f64,
    pub average_total_return: f64,
}

impl RunMetrics {
    fn new(iterations_requested: usize) -> Self {
        RunMetrics {
            iterations_requested,
            iterations_completed: 0,
            total_return_sum: 0.0,
            average_total_return: 0.0,
        }
    }

    fn record(&mut self, metrics: IterationMetrics) {
        self.iterations_completed += 1;
        self.total_return_sum += metrics.rollout_return;
        self.average_total_return = self.total_return_sum / self.iterations_completed as f64;
    }
}

impl<S> SearchTree<S> {
    /// Execute one complete MCTS iteration: selection/expansion, rollout, backpropagation.
    pub fn iterate<M, R, G>(
        &mut self,
        config: &SearchConfig,
        model: &M,
        reward: &R,
        rng: &mut G,
    ) -> Result<IterationMetrics, TreeError>
    where
        M: StateModel<State = S>,
        R: RewardModel<M> + ?Sized,
        G: Rng,
    {
        let leaf = self.tree_policy(model, config.tree_policy, rng)?;
        let leaf_node = self.node(leaf)?;
        let leaf_depth = leaf_node.depth();
        let rollout_return = rollout(
            model,
            reward,
            leaf_node.state(),
            config.max_rollout_depth,
            rng,
        );

        let path_len = self.backpropagate(leaf, rollout_return)?;
        self.record_simulation();

        Ok(IterationMetrics {
            leaf,
            leaf_depth,
            path_len,
            rollout_return,
        })
    }

    /// Run MCTS for `config.iterations`, collecting aggregate metrics.
    pub fn run<M, R, G>(
        &mut self,
        config: &SearchConfig,
        model: &M,
        reward: &R,
        rng: &mut G,
    ) -> Result<RunMetrics, TreeError>
    where
        M: StateModel<State = S>,
        R: RewardModel<M> + ?Sized,
        G: Rng,
    {
        self.run_with_hook(config, model, reward, rng, |_| {})
    }

    /// Run MCTS and invoke a callback after each completed iteration.
    pub fn run_with_hook<M, R, G, FHook>(
        &mut self,
        config: &SearchConfig,
        model: &M,
        reward: &R,
        rng: &mut G,
        mut on_iteration: FHook,
    ) -> Result<RunMetrics, TreeError>
    where
        M: StateModel<State = S>,
        R: RewardModel<M> + ?Sized,
        G: Rng,
        FHook: FnMut(&IterationMetrics),
    {
        let mut metrics = RunMetrics::new(config.iterations);

        for _ in 0..config.iterations {
            let iteration_metrics = self.iterate(config, model, reward, rng)?;

            on_iteration(&iteration_metrics);
            metrics.record(iteration_metrics);
        }

        Ok(metrics)
    }
}
