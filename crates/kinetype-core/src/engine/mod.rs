//! Per-unit animation engine.
//!
//! Each unit runs its own three-phase state machine (appearing, main,
//! disappearing) on a shared scheduler. The engine never draws; the render
//! layer reads `UnitAnimationState` snapshots.

pub mod state;
pub mod unit;

pub use state::{Phase, UnitAnimationState, VisibilityChange};
pub use unit::{UnitAnimator, UnitEvent, SAMPLE_INTERVAL};
