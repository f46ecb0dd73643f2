//! # Animation Settings Model
//!
//! Immutable, validated configuration for the three phases of a unit's
//! animation. One `EffectSettings` is shared read-only (behind an `Arc`) by
//! every unit engine of a text generation.

use crate::animation::EasingType;
use crate::color::Palette;
use crate::range::RangeSet;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Whether range and sequencing indices refer to letters or words.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitGranularity {
    #[default]
    Letters,
    Words,
}

/// How appearance/disappearance start times are spread across units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerKind {
    #[default]
    AllAtOnce,
    Sequentially,
    Random,
}

/// The curve used when a participating unit changes visibility.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Seconds.
    pub duration: f64,
    pub easing: EasingType,
}

impl Transition {
    pub fn new(duration: f64, easing: EasingType) -> Self {
        Self { duration, easing }
    }
}

/// Settings for the appearance or the disappearance phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseSettings {
    pub kind: StaggerKind,
    pub unit: UnitGranularity,
    /// `None` means every unit participates.
    pub ranges: Option<RangeSet>,
    /// Seconds between consecutive units (`Sequentially`).
    pub delay_between_elements: f64,
    /// Window over which random start times are drawn (`Random`).
    pub total_duration: f64,
    /// Time reserved for one unit's own transition (`Random`).
    pub element_time: f64,
    pub transition: Transition,
}

impl PhaseSettings {
    fn with_transition(transition: Transition) -> Self {
        Self {
            kind: StaggerKind::AllAtOnce,
            unit: UnitGranularity::Letters,
            ranges: None,
            delay_between_elements: 0.1,
            total_duration: 1.0,
            element_time: 0.1,
            transition,
        }
    }

    /// Fade in over 0.3s, all at once.
    pub fn appearance() -> Self {
        Self::with_transition(Transition::new(0.3, EasingType::EaseIn))
    }

    /// Fade out over 0.3s, all at once.
    pub fn disappearance() -> Self {
        Self::with_transition(Transition::new(0.3, EasingType::EaseOut))
    }

    /// Returns true if the unit at `index` (per `self.unit`) takes part in this phase.
    pub fn participates(&self, index: usize) -> bool {
        participates(self.ranges.as_ref(), index)
    }

    /// Delay, in seconds, before the unit at `index` runs this phase.
    ///
    /// A random window that is empty or inverted (`element_time >= total_duration`) gives 0.
    pub fn delay_for<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> f64 {
        match self.kind {
            StaggerKind::AllAtOnce => 0.0,
            StaggerKind::Sequentially => (self.delay_between_elements * index as f64).max(0.0),
            StaggerKind::Random => {
                let max_delay = self.total_duration - self.element_time;
                if max_delay.is_finite() && max_delay > 0.0 {
                    rng.gen_range(0.0..=max_delay)
                } else {
                    0.0
                }
            }
        }
    }
}

fn participates(ranges: Option<&RangeSet>, index: usize) -> bool {
    ranges.map_or(true, |r| r.contains(index))
}

/// The continuous motion run during the main phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MainMotion {
    #[default]
    None,
    /// Circular drift around the rest position.
    CyclicMovement { intensity: f64, cycle_duration: f64 },
    /// Random offset and rotation, resampled every step.
    Jumping {
        intensity: f64,
        step_duration: f64,
        rotation_degree: f64,
    },
    /// Vertical sine wave travelling along the text.
    Wave {
        intensity: f64,
        cycle_duration: f64,
        wave_length: usize,
    },
}

impl MainMotion {
    pub const DEFAULT_INTENSITY: f64 = 10.0;

    pub fn cyclic() -> Self {
        MainMotion::CyclicMovement {
            intensity: Self::DEFAULT_INTENSITY,
            cycle_duration: 1.0,
        }
    }

    pub fn jumping() -> Self {
        MainMotion::Jumping {
            intensity: Self::DEFAULT_INTENSITY,
            step_duration: 0.2,
            rotation_degree: 15.0,
        }
    }

    pub fn wave() -> Self {
        MainMotion::Wave {
            intensity: Self::DEFAULT_INTENSITY,
            cycle_duration: 2.0,
            wave_length: 5,
        }
    }
}

/// Settings for the main phase.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MainSettings {
    pub motion: MainMotion,
    pub unit: UnitGranularity,
    pub ranges: Option<RangeSet>,
}

impl MainSettings {
    pub fn participates(&self, index: usize) -> bool {
        participates(self.ranges.as_ref(), index)
    }
}

/// The full settings bundle shared by every unit of a text generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectSettings {
    pub appearance: PhaseSettings,
    pub main: MainSettings,
    pub disappearance: PhaseSettings,
    /// Seconds from animation start until the disappearance phase is triggered.
    pub delay_before_disappearance: f64,
    pub palette: Palette,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            appearance: PhaseSettings::appearance(),
            main: MainSettings::default(),
            disappearance: PhaseSettings::disappearance(),
            delay_before_disappearance: 2.0,
            palette: Palette::default(),
        }
    }
}
