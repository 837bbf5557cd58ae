use crate::tree::ids::ActionId;

/// Which engine an action fires, used to charge fuel in reward shaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thrust {
    /// No engine fires.
    None,
    /// An orientation (side) thruster fires.
    Side,
    /// The main engine fires.
    Main,
}

/// Geometric accessors on a simulation state.
pub trait Kinematics {
    /// Position as `(x, y)`.
    fn position(&self) -> (f64, f64);

    /// Velocity as `(vx, vy)`.
    fn velocity(&self) -> (f64, f64);

    /// Tilt in radians, 0.0 is upright.
    fn angle(&self) -> f64;

    /// Magnitude of the velocity vector.
    fn speed(&self) -> f64 {
        let (vx, vy) = self.velocity();
        vx.hypot(vy)
    }
}

/// Contract between the search engine and a deterministic simulation.
///
/// The engine never mutates a state: every transition yields a new value and
/// `Clone` on the state must be a deep copy.
pub trait StateModel {
    type State: Clone + Kinematics;

    /// Size of the fixed action set. Actions are `0..num_actions()`.
    fn num_actions(&self) -> usize;

    /// Pure, total transition function.
    fn transition(&self, state: &Self::State, action: ActionId) -> Self::State;

    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Whether a terminal state is a successful outcome.
    /// Only meaningful when `is_terminal` holds.
    fn is_safe_outcome(&self, state: &Self::State) -> bool;

    fn has_ground_contact(&self, state: &Self::State) -> bool;

    /// Point the agent is trying to reach.
    fn landing_target(&self) -> (f64, f64);

    fn thrust(&self, action: ActionId) -> Thrust;
}
