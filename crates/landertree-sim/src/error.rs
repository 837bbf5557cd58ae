use landertree_core::TreeError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for world configuration and episode driving.
pub enum SimError {
    #[error("failed to read YAML file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid lander config: {0}")]
    InvalidConfig(String),

    #[error("search committed to action {0}, which the lander does not have")]
    UnknownAction(usize),

    #[error("search failed: {0}")]
    Search(#[from] TreeError),
}
