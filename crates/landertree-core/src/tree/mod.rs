pub mod agent;
mod arena;
pub mod error;
pub mod ids;
pub mod mcts;
pub mod model;
mod node;
pub mod persist;
pub mod rollout;
pub mod search_tree;
pub mod snapshot;
mod stats;

pub use node::SearchNode;
pub use stats::NodeStats;

#[cfg(test)]
mod tests;
