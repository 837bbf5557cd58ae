mod action;
mod config;
pub mod episode;
mod error;
mod state;
pub mod terrain;
mod world;

pub use action::LanderAction;
pub use config::{Bounds, LanderConfig};
pub use episode::{EpisodeConfig, EpisodeReport, RootPolicy, run_episode};
pub use error::SimError;
pub use state::LanderState;
pub use terrain::Triangle;
pub use world::{LandingStatus, LunarWorld};
