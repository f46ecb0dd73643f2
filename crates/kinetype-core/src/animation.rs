//! Animation primitives: easing curves and keyframed tweens.

use keyframe::{AnimationSequence, EasingFunction, Keyframe};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported easing functions for visibility transitions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl EasingFunction for EasingType {
    fn y(&self, x: f64) -> f64 {
        match self {
            EasingType::Linear => keyframe::functions::Linear.y(x),
            EasingType::EaseIn => keyframe::functions::EaseIn.y(x),
            EasingType::EaseOut => keyframe::functions::EaseOut.y(x),
            EasingType::EaseInOut => keyframe::functions::EaseInOut.y(x),
        }
    }
}

impl EasingType {
    /// Evaluates the easing curve at a specific point `x` (0.0 to 1.0).
    pub fn eval(&self, x: f32) -> f32 {
        self.y(x as f64) as f32
    }
}

/// A single eased move between two values, anchored at an absolute start time.
///
/// Both keyframes carry the same easing so the segment is shaped by it regardless of
/// which end of the segment the sequence reads the curve from.
#[derive(Clone)]
pub struct Tween {
    /// Absolute time (reference seconds) the tween was started at.
    pub start: f64,
    pub from: f32,
    pub to: f32,
    pub easing: EasingType,
    sequence: AnimationSequence<f32>,
}

impl Tween {
    /// Starts a tween from `from` to `to`. Returns `None` for non-positive durations,
    /// in which case the caller should snap to `to`.
    pub fn start(start: f64, from: f32, to: f32, duration: f64, easing: EasingType) -> Option<Self> {
        if duration.is_nan() || duration <= 0.0 {
            return None;
        }
        let frames = vec![
            Keyframe::new(from, 0.0, easing),
            Keyframe::new(to, duration, easing),
        ];
        Some(Self {
            start,
            from,
            to,
            easing,
            sequence: AnimationSequence::from(frames),
        })
    }

    /// Returns the length of the tween in seconds.
    pub fn duration(&self) -> f64 {
        self.sequence.duration()
    }

    /// Samples the tween at absolute time `now`, returning the value and whether it is finished.
    pub fn sample(&mut self, now: f64) -> (f32, bool) {
        let duration = self.duration();
        let local = (now - self.start).clamp(0.0, duration);
        if local >= duration {
            return (self.to, true);
        }
        self.sequence.advance_to(local);
        (self.sequence.now(), false)
    }

    pub fn end_time(&self) -> f64 {
        self.start + self.duration()
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("start", &self.start)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("easing", &self.easing)
            .finish()
    }
}
