//! # Kinetype Core
//!
//! `kinetype-core` animates text one unit at a time. A string is split into
//! units (grapheme clusters), wrapped into lines, and every unit runs its own
//! three-phase lifecycle: appearance, a continuous main motion, and
//! disappearance.
//!
//! ## Core Features
//!
//! *   **Segmentation**: Grapheme-aware units with letter and word indices.
//! *   **Layout**: Greedy line wrapping with left, center and right alignment.
//! *   **Staggering**: All-at-once, sequential and random start times, gated by 1-based ranges.
//! *   **Motion**: Cyclic, wave and jumping motion driven by an absolute reference clock.
//! *   **Scheduling**: A cooperative timer queue with per-generation cancellation.
//!
//! ## Usage
//!
//! The entry point is [`AnimatedText`]. The host owns the clock and calls
//! [`AnimatedText::tick`] once per frame.
//!
//! ```rust
//! use kinetype_core::{AnimatedText, Clock, EffectSettings, ManualClock, TextOptions};
//! use std::sync::Arc;
//!
//! let mut clock = ManualClock::new(0.0);
//! let mut text = AnimatedText::new(TextOptions::default(), Some(Arc::new(EffectSettings::default())))
//!     .with_seed(7);
//! text.set_text("Hello", clock.now());
//!
//! text.tick(clock.advance(0.5));
//! assert!(text.frames().iter().all(|f| f.visible));
//! ```

/// Easing curves and opacity tweens.
pub mod animation;

/// Reference time sources.
pub mod clock;

/// Per-unit palette resolution.
pub mod color;

/// The `AnimatedText` coordinator.
pub mod director;

/// The per-unit three-phase state machine.
pub mod engine;

pub mod errors;

/// Main-phase motion functions.
pub mod motion;

/// 1-based range strings.
pub mod range;

/// Render-facing frame snapshots.
pub mod render;

/// Text to unit segmentation.
pub mod segment;

/// The animation settings model.
pub mod settings;

/// Layout and scheduling.
pub mod systems;

/// Shared data structures.
pub mod types;

pub use animation::{EasingType, Tween};
pub use clock::{Clock, ManualClock, SystemClock};
pub use color::{ColorPattern, Palette};
pub use director::{AnimatedText, TextOptions};
pub use engine::{Phase, UnitAnimationState, UnitAnimator};
pub use errors::KinetypeError;
pub use range::{parse_ranges, RangeSet};
pub use render::{FrameRecorder, RenderSink, UnitFrame};
pub use segment::{Unit, UnitKind};
pub use settings::{
    EffectSettings, MainMotion, MainSettings, PhaseSettings, StaggerKind, Transition,
    UnitGranularity,
};
pub use systems::{MonospaceMeasurer, TextMeasurer};
pub use types::{Alignment, Color, Font, FontStyle, UnitId, Vec2};
