//! The three-phase state machine of a single unit.
//!
//! ## Timeline (relative to the generation start `t0`)
//! - `t0`: the unit is `Appearing` and invisible. A participating unit schedules
//!   its appearance at `t0 + delay`; a non-participating one becomes visible
//!   immediately and enters `Main`.
//! - Entering `Main` starts the motion sampler (participating units only).
//! - `t0 + delay_before_disappearance (+ delay)`: the unit hides and enters the
//!   terminal `Disappearing` phase; the sampler is cancelled.

use crate::animation::Tween;
use crate::engine::state::{Phase, UnitAnimationState, VisibilityChange};
use crate::motion::{cyclic_offset, jump_sample, wave_offset};
use crate::settings::{EffectSettings, MainMotion, PhaseSettings, Transition, UnitGranularity};
use crate::systems::scheduler::Scheduler;
use crate::types::UnitId;
use rand::Rng;
use std::sync::Arc;
use tracing::trace;

/// Tick of the continuous motion samplers (`CyclicMovement`, `Wave`), in seconds.
pub const SAMPLE_INTERVAL: f64 = 0.01;

/// Events a unit schedules for itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitEvent {
    Appear { animated: bool },
    Disappear { animated: bool },
    MotionSample,
    Jump,
}

/// Animation engine for one unit.
#[derive(Debug)]
pub struct UnitAnimator {
    id: UnitId,
    letter_index: usize,
    word_index: usize,
    settings: Option<Arc<EffectSettings>>,
    state: UnitAnimationState,
    opacity_tween: Option<Tween>,
    entered: [Option<f64>; 3],
    history: Vec<VisibilityChange>,
}

impl UnitAnimator {
    /// Creates an engine. `settings == None` runs the degraded mode: every unit
    /// participates and every phase fires with zero delay.
    pub fn new(
        id: UnitId,
        letter_index: usize,
        word_index: usize,
        settings: Option<Arc<EffectSettings>>,
    ) -> Self {
        Self {
            id,
            letter_index,
            word_index,
            settings,
            state: UnitAnimationState::default(),
            opacity_tween: None,
            entered: [None; 3],
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn state(&self) -> &UnitAnimationState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Reference time at which the unit entered `phase`, if it has.
    pub fn phase_entered_at(&self, phase: Phase) -> Option<f64> {
        self.entered[phase.slot()]
    }

    /// True while an eased opacity transition is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.opacity_tween.is_some()
    }

    pub fn history(&self) -> &[VisibilityChange] {
        &self.history
    }

    fn index_for(&self, unit: UnitGranularity) -> usize {
        match unit {
            UnitGranularity::Letters => self.letter_index,
            UnitGranularity::Words => self.word_index,
        }
    }

    fn phase_settings(&self, phase: Phase) -> Option<&PhaseSettings> {
        let settings = self.settings.as_deref()?;
        match phase {
            Phase::Appearing => Some(&settings.appearance),
            Phase::Disappearing => Some(&settings.disappearance),
            Phase::Main => None,
        }
    }

    /// Range gate for `phase`. Always true without settings.
    pub fn should_animate(&self, phase: Phase) -> bool {
        let Some(settings) = self.settings.as_deref() else {
            return true;
        };
        match phase {
            Phase::Appearing => settings
                .appearance
                .participates(self.index_for(settings.appearance.unit)),
            Phase::Main => settings.main.participates(self.index_for(settings.main.unit)),
            Phase::Disappearing => settings
                .disappearance
                .participates(self.index_for(settings.disappearance.unit)),
        }
    }

    fn stagger_delay<R: Rng + ?Sized>(&self, phase: Phase, rng: &mut R) -> f64 {
        self.phase_settings(phase)
            .map_or(0.0, |p| p.delay_for(self.index_for(p.unit), rng))
    }

    fn transition(&self, phase: Phase) -> Transition {
        match self.phase_settings(phase) {
            Some(p) => p.transition,
            None if phase == Phase::Disappearing => PhaseSettings::disappearance().transition,
            None => PhaseSettings::appearance().transition,
        }
    }

    /// Enters `Appearing` at `now` and schedules the unit's phase transitions.
    pub fn start<R: Rng + ?Sized>(&mut self, now: f64, scheduler: &mut Scheduler<UnitEvent>, rng: &mut R) {
        self.state = UnitAnimationState::default();
        self.entered = [Some(now), None, None];
        self.history.clear();

        if self.should_animate(Phase::Appearing) {
            let delay = self.stagger_delay(Phase::Appearing, rng);
            scheduler.schedule_once(self.id, now + delay, UnitEvent::Appear { animated: true });
        } else {
            self.set_visible(true, false, now);
            self.enter_main(now, scheduler);
        }

        let before = self
            .settings
            .as_deref()
            .map_or(0.0, |s| s.delay_before_disappearance.max(0.0));
        let event = if self.should_animate(Phase::Disappearing) {
            let delay = self.stagger_delay(Phase::Disappearing, rng);
            (now + before + delay, UnitEvent::Disappear { animated: true })
        } else {
            (now + before, UnitEvent::Disappear { animated: false })
        };
        scheduler.schedule_once(self.id, event.0, event.1);
    }

    /// Applies a fired event. Events that no longer match the current phase are ignored.
    pub fn handle<R: Rng + ?Sized>(
        &mut self,
        event: UnitEvent,
        at: f64,
        scheduler: &mut Scheduler<UnitEvent>,
        rng: &mut R,
    ) {
        match event {
            UnitEvent::Appear { animated } => {
                if self.state.phase != Phase::Appearing {
                    return;
                }
                self.set_visible(true, animated, at);
                self.enter_main(at, scheduler);
            }
            UnitEvent::Disappear { animated } => {
                if self.state.phase == Phase::Disappearing {
                    return;
                }
                if self.state.phase == Phase::Appearing {
                    // Appearance resolves as "never shown".
                    self.enter(Phase::Main, at);
                }
                // Terminal phase: a pending appearance and the motion sampler must not fire.
                scheduler.cancel_unit(self.id);
                self.set_visible(false, animated, at);
                self.enter(Phase::Disappearing, at);
            }
            UnitEvent::MotionSample => {
                if self.state.phase != Phase::Main {
                    return;
                }
                self.sample_motion(at);
            }
            UnitEvent::Jump => {
                if self.state.phase != Phase::Main {
                    return;
                }
                if let Some(MainMotion::Jumping {
                    intensity,
                    rotation_degree,
                    ..
                }) = self.settings.as_deref().map(|s| s.main.motion)
                {
                    let (offset, rotation) = jump_sample(rng, intensity, rotation_degree);
                    self.state.offset = offset;
                    self.state.rotation = rotation;
                }
            }
        }
    }

    /// Advances in-flight transitions to `now`.
    pub fn advance(&mut self, now: f64) {
        if let Some(tween) = self.opacity_tween.as_mut() {
            let (value, done) = tween.sample(now);
            self.state.opacity = value;
            if done {
                self.opacity_tween = None;
            }
        }
    }

    fn enter(&mut self, phase: Phase, at: f64) {
        trace!(unit = self.id, ?phase, at, "phase change");
        self.state.phase = phase;
        self.entered[phase.slot()] = Some(at);
    }

    fn enter_main(&mut self, at: f64, scheduler: &mut Scheduler<UnitEvent>) {
        self.enter(Phase::Main, at);
        if !self.should_animate(Phase::Main) {
            return;
        }
        let Some(motion) = self.settings.as_deref().map(|s| s.main.motion) else {
            return;
        };
        match motion {
            MainMotion::None => {}
            MainMotion::CyclicMovement { .. } | MainMotion::Wave { .. } => {
                scheduler.schedule_every(self.id, at, SAMPLE_INTERVAL, UnitEvent::MotionSample);
            }
            MainMotion::Jumping { step_duration, .. } => {
                let step = step_duration.max(SAMPLE_INTERVAL);
                scheduler.schedule_every(self.id, at + step, step, UnitEvent::Jump);
            }
        }
    }

    fn sample_motion(&mut self, at: f64) {
        let Some(settings) = self.settings.as_deref() else {
            return;
        };
        let index = self.index_for(settings.main.unit);
        match settings.main.motion {
            MainMotion::CyclicMovement {
                intensity,
                cycle_duration,
            } => {
                self.state.offset = cyclic_offset(at, intensity, cycle_duration, index);
            }
            MainMotion::Wave {
                intensity,
                cycle_duration,
                wave_length,
            } => {
                self.state.offset = wave_offset(at, intensity, cycle_duration, wave_length, index);
            }
            MainMotion::None | MainMotion::Jumping { .. } => {}
        }
    }

    fn set_visible(&mut self, visible: bool, animated: bool, at: f64) {
        let target = if visible { 1.0 } else { 0.0 };
        let phase = if visible {
            Phase::Appearing
        } else {
            Phase::Disappearing
        };

        self.opacity_tween = if animated {
            let transition = self.transition(phase);
            Tween::start(
                at,
                self.state.opacity,
                target,
                transition.duration,
                transition.easing,
            )
        } else {
            None
        };
        if self.opacity_tween.is_none() {
            self.state.opacity = target;
        }

        self.state.visible = visible;
        self.history.push(VisibilityChange {
            at,
            visible,
            animated: animated && self.opacity_tween.is_some(),
        });
    }
}
