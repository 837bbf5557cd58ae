use std::fmt;

use landertree_core::{ActionId, StateModel, Thrust};
use log::warn;

use crate::{LanderAction, LanderConfig, LanderState, terrain::collides};

/// Outcome of a lander state as seen by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandingStatus {
    InAir,
    SafeLanding,
    Crash,
}

impl fmt::Display for LandingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LandingStatus::InAir => "In Air",
            LandingStatus::SafeLanding => "Safe Landing",
            LandingStatus::Crash => "Crash",
        };
        f.write_str(label)
    }
}

/// Deterministic lunar lander physics over a fixed world.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LunarWorld {
    config: LanderConfig,
}

impl LunarWorld {
    pub fn new(config: LanderConfig) -> Self {
        LunarWorld { config }
    }

    pub fn config(&self) -> &LanderConfig {
        &self.config
    }

    /// Advance one tick under `action`. Finished states are returned as is.
    pub fn step(&self, state: &LanderState, action: LanderAction) -> LanderState {
        let cfg = &self.config;
        let mut next = *state;
        if next.done {
            return next;
        }

        match action {
            LanderAction::Idle => {}
            LanderAction::MainEngine => {
                next.vx += next.angle.sin() * cfg.main_thrust;
                next.vy -= next.angle.cos() * cfg.main_thrust;
            }
            LanderAction::RotateLeft => next.angle -= cfg.side_thrust,
            LanderAction::RotateRight => next.angle += cfg.side_thrust,
        }

        next.vy += cfg.gravity;
        next.x += next.vx;
        next.y += next.vy;

        let leg_y = next.y + cfg.leg_offset;
        if collides(&cfg.terrain, next.x - cfg.half_width, leg_y)
            || collides(&cfg.terrain, next.x + cfg.half_width, leg_y)
        {
            next.crashed = true;
            next.done = true;
        }

        // Velocity is kept on touchdown so the landing can be judged
        if self.is_on_ground(&next) {
            next.y = cfg.resting_y();
            next.done = true;
        }

        if self.is_out_of_bounds(&next) {
            next.done = true;
        }

        next
    }

    /// Legs at or below ground level.
    pub fn is_on_ground(&self, state: &LanderState) -> bool {
        state.y + self.config.bottom_offset >= self.config.ground_level
    }

    pub fn is_on_landing_pad(&self, state: &LanderState) -> bool {
        state.x >= self.config.landing_pad_left && state.x <= self.config.landing_pad_right
    }

    /// Speed and tilt are within the safe touchdown limits.
    pub fn is_within_safe_limits(&self, state: &LanderState) -> bool {
        let cfg = &self.config;
        state.vy.abs() <= cfg.safe_vertical_speed
            && state.vx.abs() <= cfg.safe_horizontal_speed
            && state.angle.abs() <= cfg.safe_angle
    }

    pub fn is_out_of_bounds(&self, state: &LanderState) -> bool {
        !self.config.bounds.contains(state.x, state.y)
    }

    pub fn landing_status(&self, state: &LanderState) -> LandingStatus {
        if state.crashed {
            return LandingStatus::Crash;
        }
        if self.is_on_ground(state) {
            if self.is_within_safe_limits(state) && self.is_on_landing_pad(state) {
                return LandingStatus::SafeLanding;
            }
            return LandingStatus::Crash;
        }
        if self.is_out_of_bounds(state) {
            return LandingStatus::Crash;
        }
        LandingStatus::InAir
    }
}

impl StateModel for LunarWorld {
    type State = LanderState;

    fn num_actions(&self) -> usize {
        LanderAction::ALL.len()
    }

    fn transition(&self, state: &LanderState, action: ActionId) -> LanderState {
        match LanderAction::from_action_id(action) {
            Some(action) => self.step(state, action),
            None => {
                warn!("ignoring unknown action index {}", action.index());
                *state
            }
        }
    }

    fn is_terminal(&self, state: &LanderState) -> bool {
        state.done
    }

    fn is_safe_outcome(&self, state: &LanderState) -> bool {
        self.landing_status(state) == LandingStatus::SafeLanding
    }

    fn has_ground_contact(&self, state: &LanderState) -> bool {
        self.is_on_ground(state)
    }

    fn landing_target(&self) -> (f64, f64) {
        self.config.landing_target()
    }

    fn thrust(&self, action: ActionId) -> Thrust {
        LanderAction::from_action_id(action).map_or(Thrust::None, LanderAction::thrust)
    }
}
