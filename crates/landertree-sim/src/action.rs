use std::fmt;

use landertree_core::{ActionId, Thrust};

/// The four controls of the lander, in action-index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanderAction {
    Idle,
    /// Fire the left orientation thruster, rotating counter-clockwise.
    RotateLeft,
    MainEngine,
    /// Fire the right orientation thruster, rotating clockwise.
    RotateRight,
}

impl LanderAction {
    pub const ALL: [LanderAction; 4] = [
        LanderAction::Idle,
        LanderAction::RotateLeft,
        LanderAction::MainEngine,
        LanderAction::RotateRight,
    ];

    /// Map a search action index to a control.
    /// Returns `None` for indices outside the action set.
    pub fn from_action_id(action: ActionId) -> Option<Self> {
        Self::ALL.get(action.index()).copied()
    }

    pub fn action_id(self) -> ActionId {
        ActionId::from(self as usize)
    }

    pub fn thrust(self) -> Thrust {
        match self {
            LanderAction::Idle => Thrust::None,
            LanderAction::RotateLeft | LanderAction::RotateRight => Thrust::Side,
            LanderAction::MainEngine => Thrust::Main,
        }
    }
}

impl fmt::Display for LanderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LanderAction::Idle => "idle",
            LanderAction::RotateLeft => "rotate-left",
            LanderAction::MainEngine => "main-engine",
            LanderAction::RotateRight => "rotate-right",
        };
        f.write_str(name)
    }
}
