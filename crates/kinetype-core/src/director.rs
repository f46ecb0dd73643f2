use crate::color::Palette;
use crate::engine::{Phase, UnitAnimator, UnitEvent};
use crate::render::{RenderSink, UnitFrame};
use crate::segment::{segment_with_rng, Unit};
use crate::settings::EffectSettings;
use crate::systems::layout::{LineLayout, MonospaceMeasurer, TextMeasurer};
use crate::systems::scheduler::Scheduler;
use crate::types::{Alignment, Color, Font, UnitId, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Presentation options that do not affect timing.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOptions {
    pub font: Font,
    pub alignment: Alignment,
    pub container_width: f32,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font: Font::default(),
            alignment: Alignment::Left,
            container_width: f32::INFINITY,
        }
    }
}

/// Coordinates the units of one animated text.
///
/// `AnimatedText` owns the segmentation, the layout and one [`UnitAnimator`]
/// per unit, and drives them all from a single cooperative [`Scheduler`].
/// The host calls [`AnimatedText::tick`] once per frame with the current
/// reference time.
pub struct AnimatedText {
    text: String,
    options: TextOptions,
    settings: Option<Arc<EffectSettings>>,
    measurer: Arc<dyn TextMeasurer>,
    rng: StdRng,
    units: Vec<Unit>,
    layout: LineLayout,
    animators: Vec<UnitAnimator>,
    scheduler: Scheduler<UnitEvent>,
    /// Number of regenerations so far. 0 until the first `set_text`.
    generation: u64,
}

impl AnimatedText {
    /// Creates an empty text. Nothing animates until [`AnimatedText::set_text`].
    ///
    /// `settings == None` runs every phase immediately with default transitions.
    pub fn new(options: TextOptions, settings: Option<Arc<EffectSettings>>) -> Self {
        Self {
            text: String::new(),
            options,
            settings,
            measurer: Arc::new(MonospaceMeasurer::default()),
            rng: StdRng::from_entropy(),
            units: Vec::new(),
            layout: LineLayout::default(),
            animators: Vec::new(),
            scheduler: Scheduler::new(),
            generation: 0,
        }
    }

    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    /// Makes stagger delays, jumps and random colors reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Replaces the text and restarts every unit at `now`.
    ///
    /// All tasks of the previous generation are cancelled first, so none of
    /// them can touch the new units. Setting the current text again is a no-op.
    #[instrument(level = "debug", skip(self, text), fields(len = text.len(), generation = self.generation))]
    pub fn set_text(&mut self, text: &str, now: f64) {
        if self.generation > 0 && self.text == text {
            return;
        }
        self.text = text.to_string();
        self.regenerate(now);
    }

    /// Replaces the settings bundle and restarts the current text at `now`.
    pub fn set_settings(&mut self, settings: Option<Arc<EffectSettings>>, now: f64) {
        self.settings = settings;
        if self.generation > 0 {
            self.regenerate(now);
        }
    }

    fn regenerate(&mut self, now: f64) {
        self.scheduler.clear();
        self.generation += 1;

        let fallback = Palette::single(Color::BLACK);
        let palette = self.settings.as_deref().map_or(&fallback, |s| &s.palette);
        self.units = segment_with_rng(&self.text, palette, &mut self.rng);
        self.relayout();

        self.animators = self
            .units
            .iter()
            .enumerate()
            .map(|(id, unit)| {
                UnitAnimator::new(id, unit.letter_index, unit.word_index, self.settings.clone())
            })
            .collect();
        for animator in &mut self.animators {
            animator.start(now, &mut self.scheduler, &mut self.rng);
        }

        debug!(
            generation = self.generation,
            units = self.units.len(),
            lines = self.layout.line_count(),
            "regenerated"
        );
    }

    /// Changes the wrapping width. Units and their animations are kept.
    pub fn set_container_width(&mut self, width: f32) {
        if self.options.container_width == width {
            return;
        }
        self.options.container_width = width;
        self.relayout();
    }

    fn relayout(&mut self) {
        self.layout = LineLayout::compute(
            &self.units,
            self.options.container_width,
            &self.options.font,
            self.options.alignment,
            self.measurer.as_ref(),
        );
    }

    /// Fires every task due at or before `now`, in time order, then advances
    /// visibility transitions to `now`.
    pub fn tick(&mut self, now: f64) {
        while let Some(fired) = self.scheduler.pop_due(now) {
            if let Some(animator) = self.animators.get_mut(fired.unit) {
                animator.handle(fired.event, fired.at, &mut self.scheduler, &mut self.rng);
            }
        }
        for animator in &mut self.animators {
            animator.advance(now);
        }
    }

    /// Snapshot of every drawable unit.
    pub fn frames(&self) -> Vec<UnitFrame> {
        self.units
            .iter()
            .zip(&self.animators)
            .enumerate()
            .filter(|(_, (unit, _))| !unit.is_line_break())
            .filter_map(|(id, (unit, animator))| {
                let (line, origin) = self.layout.placement(id)?;
                let state = animator.state();
                Some(UnitFrame {
                    unit_id: id,
                    text: unit.text.clone(),
                    letter_index: unit.letter_index,
                    word_index: unit.word_index,
                    line,
                    origin,
                    color: unit.color.unwrap_or_default(),
                    visible: state.visible,
                    opacity: state.opacity,
                    offset: state.offset,
                    rotation: state.rotation,
                    phase: state.phase,
                })
            })
            .collect()
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        let width = self
            .layout
            .lines
            .iter()
            .map(|l| l.width)
            .fold(0.0f32, f32::max);
        sink.begin_frame(Vec2::new(width, self.height()));
        for frame in self.frames() {
            sink.draw_unit(&frame);
        }
        sink.end_frame();
    }

    /// True once every unit has disappeared and no transition is running.
    pub fn is_finished(&self) -> bool {
        self.generation > 0
            && self
                .animators
                .iter()
                .all(|a| a.phase() == Phase::Disappearing && !a.is_transitioning())
    }

    /// Earliest pending task, if any. Hosts may sleep until then.
    pub fn next_due(&self) -> Option<f64> {
        self.scheduler.next_due()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn animator(&self, id: UnitId) -> Option<&UnitAnimator> {
        self.animators.get(id)
    }

    pub fn animators(&self) -> &[UnitAnimator] {
        &self.animators
    }

    pub fn layout(&self) -> &LineLayout {
        &self.layout
    }

    pub fn options(&self) -> &TextOptions {
        &self.options
    }

    pub fn settings(&self) -> Option<&EffectSettings> {
        self.settings.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn height(&self) -> f32 {
        self.layout.height()
    }
}

impl std::fmt::Debug for AnimatedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedText")
            .field("text", &self.text)
            .field("generation", &self.generation)
            .field("units", &self.units.len())
            .field("lines", &self.layout.line_count())
            .finish()
    }
}
