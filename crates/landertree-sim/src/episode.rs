use landertree_core::{SearchAgent, SearchConfig};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{LanderAction, LanderState, LandingStatus, LunarWorld, SimError};

/// Score awarded for a safe landing and taken away for a crash.
pub const LANDING_SCORE: f64 = 100.0;

/// What happens to the search tree after the lander really moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootPolicy {
    /// Keep growing the tree rooted at the episode's start state.
    KeepOriginal,
    /// Start a fresh tree at the actual state after every tick.
    #[default]
    RerootEachStep,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    pub tick_limit: usize,
    pub root_policy: RootPolicy,
    /// Seed of the agent's RNG.
    pub seed: u64,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        EpisodeConfig {
            tick_limit: 1000,
            root_policy: RootPolicy::RerootEachStep,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeReport {
    pub ticks: usize,
    pub status: LandingStatus,
    pub score: f64,
    pub actions: Vec<LanderAction>,
    pub final_state: LanderState,
}

/// Fly one episode headless: ask the agent for an action every tick and
/// apply it to the real state until the lander is done or the tick limit
/// is reached.
pub fn run_episode(
    world: &LunarWorld,
    initial: LanderState,
    search: &SearchConfig,
    episode: &EpisodeConfig,
) -> Result<EpisodeReport, SimError> {
    let mut agent = SearchAgent::new(world.clone(), initial, search.clone(), episode.seed);
    let mut state = initial;
    let mut actions = Vec::new();

    while !state.done && actions.len() < episode.tick_limit {
        let action_id = agent.select_action()?;
        let action = LanderAction::from_action_id(action_id)
            .ok_or(SimError::UnknownAction(action_id.index()))?;
        state = world.step(&state, action);
        actions.push(action);

        debug!(
            "tick {}: {} -> x={:.2} y={:.2} vx={:.2} vy={:.2} angle={:.2}",
            actions.len(),
            action,
            state.x,
            state.y,
            state.vx,
            state.vy,
            state.angle
        );

        if episode.root_policy == RootPolicy::RerootEachStep && !state.done {
            agent.reroot(state);
        }
    }

    if !state.done {
        warn!(
            "episode stopped at the tick limit of {} while still in flight",
            episode.tick_limit
        );
    }

    let status = world.landing_status(&state);
    let score = match status {
        LandingStatus::SafeLanding => LANDING_SCORE,
        LandingStatus::Crash => -LANDING_SCORE,
        LandingStatus::InAir => 0.0,
    };

    info!(
        "episode finished after {} ticks: {status} (score {score})",
        actions.len()
    );

    Ok(EpisodeReport {
        ticks: actions.len(),
        status,
        score,
        actions,
        final_state: state,
    })
}
