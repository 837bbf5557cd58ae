mod tree;

pub use tree::agent::SearchAgent;
pub use tree::error::{PersistError, TreeError};
pub use tree::ids::{ActionId, NodeId};
pub use tree::mcts::{IterationMetrics, RunMetrics, SearchConfig, SearchConfigError};
pub use tree::model::{Kinematics, StateModel, Thrust};
pub use tree::persist::{generated_tree_name, load_tree, save_tree, tree_path};
pub use tree::rollout::{RewardModel, RewardWeights, ShapedReward, rollout};
pub use tree::search_tree::{SearchTree, TreePolicyMode};
pub use tree::snapshot::{NodeSnapshot, SNAPSHOT_SCHEMA_VERSION, TreeSnapshot};
pub use tree::{NodeStats, SearchNode};
