use serde::{Deserialize, Serialize};

use crate::{ActionId, Kinematics, StateModel, Thrust};

/// Point mass falling onto a floor at `y = floor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub angle: f64,
    pub done: bool,
}

impl Point {
    pub fn at(x: f64, y: f64) -> Self {
        Point {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            angle: 0.0,
            done: false,
        }
    }
}

impl Kinematics for Point {
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

/// Actions: 0 coast, 1 push left, 2 burn up, 3 push right.
#[derive(Debug, Clone, Copy)]
pub struct FallingPoint {
    pub floor: f64,
    /// When false the point rests on the floor and the episode continues.
    pub terminal_on_floor: bool,
}

impl Default for FallingPoint {
    fn default() -> Self {
        FallingPoint {
            floor: 10.0,
            terminal_on_floor: true,
        }
    }
}

impl StateModel for FallingPoint {
    type State = Point;

    fn num_actions(&self) -> usize {
        4
    }

    fn transition(&self, state: &Point, action: ActionId) -> Point {
        let mut next = state.clone();
        if next.done {
            return next;
        }
        match action.index() {
            1 => next.vx -= 0.1,
            2 => next.vy -= 0.2,
            3 => next.vx += 0.1,
            _ => {}
        }
        next.vy += 0.1;
        next.x += next.vx;
        next.y += next.vy;
        if next.y >= self.floor {
            next.y = self.floor;
            if self.terminal_on_floor {
                next.done = true;
            } else {
                next.vy = 0.0;
            }
        }
        next
    }

    fn is_terminal(&self, state: &Point) -> bool {
        state.done
    }

    fn is_safe_outcome(&self, state: &Point) -> bool {
        state.vy.abs() <= 1.0
    }

    fn has_ground_contact(&self, state: &Point) -> bool {
        state.y >= self.floor
    }

    fn landing_target(&self) -> (f64, f64) {
        (0.0, self.floor)
    }

    fn thrust(&self, action: ActionId) -> Thrust {
        match action.index() {
            1 | 3 => Thrust::Side,
            2 => Thrust::Main,
            _ => Thrust::None,
        }
    }
}

/// Small search config so tests stay fast.
pub fn quick_config(iterations: usize) -> crate::SearchConfig {
    crate::SearchConfig {
        iterations,
        max_rollout_depth: 20,
        ..crate::SearchConfig::default()
    }
}
