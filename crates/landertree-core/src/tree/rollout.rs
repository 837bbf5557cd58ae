use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tree::{
    ids::ActionId,
    model::{Kinematics, StateModel, Thrust},
};

/// Weights of the shaped rollout reward.
/// Penalties are stored as positive magnitudes and subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardWeights {
    pub distance: f64,
    pub speed: f64,
    pub angle: f64,
    pub ground_contact: f64,
    pub side_thruster: f64,
    pub main_thruster: f64,
    pub safe_landing: f64,
    pub crash: f64,
}

impl Default for RewardWeights {
    fn default() -> Self {
        RewardWeights {
            distance: 0.1,
            speed: 0.1,
            angle: 0.1,
            ground_contact: 10.0,
            side_thruster: 0.03,
            main_thruster: 0.3,
            safe_landing: 100.0,
            crash: 100.0,
        }
    }
}

impl RewardWeights {
    pub(crate) fn validate(&self) -> Result<(), String> {
        let fields = [
            ("distance", self.distance),
            ("speed", self.speed),
            ("angle", self.angle),
            ("ground_contact", self.ground_contact),
            ("side_thruster", self.side_thruster),
            ("main_thruster", self.main_thruster),
            ("safe_landing", self.safe_landing),
            ("crash", self.crash),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("reward weight {name} must be finite"));
            }
        }
        Ok(())
    }
}

/// Value estimate used by rollouts. Swap this out to change how a playout
/// is scored without touching the search loop.
pub trait RewardModel<M: StateModel> {
    /// Reward for the step that produced `state` by taking `action`.
    /// `first_contact` is true on the first step of the rollout that
    /// touches the ground.
    fn step_reward(
        &self,
        model: &M,
        state: &M::State,
        action: ActionId,
        first_contact: bool,
    ) -> f64;

    /// One-off reward for the terminal state a rollout ends in.
    fn outcome_reward(&self, model: &M, state: &M::State) -> f64;
}

/// Distance, speed, tilt and fuel penalties plus contact and outcome bonuses.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShapedReward {
    weights: RewardWeights,
}

impl ShapedReward {
    pub fn new(weights: RewardWeights) -> Self {
        ShapedReward { weights }
    }

    pub fn weights(&self) -> &RewardWeights {
        &self.weights
    }
}

impl<M: StateModel> RewardModel<M> for ShapedReward {
    fn step_reward(
        &self,
        model: &M,
        state: &M::State,
        action: ActionId,
        first_contact: bool,
    ) -> f64 {
        let w = &self.weights;
        let (x, y) = state.position();
        let (tx, ty) = model.landing_target();

        let mut reward = 0.0;
        reward -= (x - tx).hypot(y - ty) * w.distance;
        reward -= state.speed() * w.speed;
        reward -= state.angle().abs() * w.angle;

        if first_contact {
            reward += w.ground_contact;
        }

        match model.thrust(action) {
            Thrust::Side => reward -= w.side_thruster,
            Thrust::Main => reward -= w.main_thruster,
            Thrust::None => {}
        }

        reward
    }

    fn outcome_reward(&self, model: &M, state: &M::State) -> f64 {
        if model.is_safe_outcome(state) {
            self.weights.safe_landing
        } else {
            -self.weights.crash
        }
    }
}

/// Play uniformly random actions from `start` for at most `max_depth` steps
/// and return the summed reward.
///
/// The start state is cloned, never modified. If the final state is
/// terminal the outcome reward is added exactly once, including when the
/// rollout starts in a terminal state and takes no steps.
pub fn rollout<M, R, G>(
    model: &M,
    reward: &R,
    start: &M::State,
    max_depth: usize,
    rng: &mut G,
) -> f64
where
    M: StateModel,
    R: RewardModel<M> + ?Sized,
    G: Rng,
{
    let num_actions = model.num_actions();
    let mut state = start.clone();
    let mut total_return = 0.0;
    let mut touched_ground = model.has_ground_contact(&state);

    for _ in 0..max_depth {
        if num_actions == 0 || model.is_terminal(&state) {
            break;
        }

        let action = ActionId::from(rng.gen_range(0..num_actions));
        state = model.transition(&state, action);

        let first_contact = !touched_ground && model.has_ground_contact(&state);
        touched_ground |= first_contact;

        total_return += reward.step_reward(model, &state, action, first_contact);
    }

    if model.is_terminal(&state) {
        total_return += reward.outcome_reward(model, &state);
    }

    total_return
}
