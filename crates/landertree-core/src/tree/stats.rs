/// Visit and reward totals accumulated on a node during backpropagation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeStats {
    visits: u64,
    total_reward: f64,
}

impl NodeStats {
    pub fn new() -> Self {
        NodeStats {
            visits: 0,
            total_reward: 0.0,
        }
    }

    /// Restore statistics read back from a persisted tree.
    pub(crate) fn from_parts(visits: u64, total_reward: f64) -> Self {
        NodeStats {
            visits,
            total_reward,
        }
    }

    /// Number of rollouts whose value passed through this node
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Sum of every rollout return recorded here (not an average)
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Function to be used for backpropagation.
    /// Increments the visits and adds the rollout return unmodified.
    pub fn record(&mut self, rollout_return: f64) {
        self.visits += 1;
        self.total_reward += rollout_return;
    }

    /// Smoothed mean reward: `total_reward / (visits + 1)`.
    /// The `+1` keeps unvisited nodes at 0.0 instead of dividing by zero.
    pub fn exploitation(&self) -> f64 {
        self.total_reward / (self.visits + 1) as f64
    }

    /// UCB1 score with `+1` smoothing on both visit counts.
    /// An unvisited node gets a large but finite exploration bonus.
    pub fn ucb_score(&self, parent_visits: u64, exploration: bool) -> f64 {
        let mut score = self.exploitation();
        if exploration {
            let n_parent = (parent_visits + 1) as f64;
            let n_child = (self.visits + 1) as f64;
            score += f64::sqrt(2.0 * n_parent.ln() / n_child);
        }
        score
    }
}
