use landertree_core::Kinematics;
use serde::{Deserialize, Serialize};

/// Snapshot of the lander. Transitions produce a new value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LanderState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Radians, positive is clockwise on screen.
    pub angle: f64,
    /// A leg hit the terrain.
    pub crashed: bool,
    /// Episode is over; further transitions leave the state unchanged.
    pub done: bool,
}

impl LanderState {
    /// Lander at rest at `(x, y)`, upright and in flight.
    pub fn at(x: f64, y: f64) -> Self {
        LanderState {
            x,
            y,
            ..LanderState::default()
        }
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
}

impl Kinematics for LanderState {
    fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }

    fn angle(&self) -> f64 {
        self.angle
    }
}
