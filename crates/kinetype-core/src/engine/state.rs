use crate::types::Vec2;
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a unit. Transitions only ever move forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Appearing,
    Main,
    Disappearing,
}

impl Phase {
    pub(crate) fn slot(self) -> usize {
        match self {
            Phase::Appearing => 0,
            Phase::Main => 1,
            Phase::Disappearing => 2,
        }
    }
}

/// Visual state of one unit, owned by its engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitAnimationState {
    pub phase: Phase,
    /// Logical visibility; flips as soon as the phase transition fires.
    pub visible: bool,
    /// Rendered opacity; follows `visible` through the phase's transition curve.
    pub opacity: f32,
    pub offset: Vec2,
    /// Degrees.
    pub rotation: f32,
}

impl Default for UnitAnimationState {
    fn default() -> Self {
        Self {
            phase: Phase::Appearing,
            visible: false,
            opacity: 0.0,
            offset: Vec2::ZERO,
            rotation: 0.0,
        }
    }
}

/// A recorded visibility flip.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisibilityChange {
    pub at: f64,
    pub visible: bool,
    /// False when the change snapped without an eased transition.
    pub animated: bool,
}
