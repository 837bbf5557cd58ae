use std::{fmt, path::PathBuf};

use thiserror::Error;

use crate::tree::ids::NodeId;

/// Error type for tree construction and search operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Attempted to access a node id that does not exist in the arena.
    MissingNode { node_id: NodeId },
    /// Best-child selection was asked for a node without children.
    NotExpanded { node_id: NodeId },
    /// The state model reported an empty action set.
    NoActions { node_id: NodeId },
    /// Action commitment found no root children to choose from.
    EmptyRoot,
    /// A persisted tree does not describe a valid tree.
    MalformedSnapshot { reason: String },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::MissingNode { node_id } => {
                write!(f, "missing node with id {}", node_id.index())
            }
            TreeError::NotExpanded { node_id } => {
                write!(f, "node {} has no children to select from", node_id.index())
            }
            TreeError::NoActions { node_id } => write!(
                f,
                "cannot expand node {}: state model has no actions",
                node_id.index()
            ),
            TreeError::EmptyRoot => write!(f, "root node has no children after search"),
            TreeError::MalformedSnapshot { reason } => {
                write!(f, "malformed tree snapshot: {reason}")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Failure while writing or reading a persisted tree.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to create tree file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write tree file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open tree file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode tree: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode tree: {0}")]
    Decode(#[source] serde_json::Error),

    #[error(transparent)]
    Malformed(#[from] TreeError),
}
