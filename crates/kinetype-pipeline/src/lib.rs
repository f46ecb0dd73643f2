use kinetype_core::{
    parse_ranges, Alignment, AnimatedText, Color, ColorPattern, EasingType, EffectSettings, Font,
    FontStyle, MainMotion, MainSettings, Palette, PhaseSettings, StaggerKind, TextMeasurer,
    TextOptions, Transition, UnitGranularity,
};
use kinetype_schema::{AnimationConfig, ColorProperties, TextAnimationConfiguration};
use std::sync::Arc;
use tracing::{instrument, warn};

const DEFAULT_INTERVAL_MS: f64 = 100.0;
const DEFAULT_ELEMENT_TIME_MS: f64 = 100.0;
const DEFAULT_TOTAL_TIME_MS: f64 = 1000.0;
const DEFAULT_TRANSITION_MS: f64 = 300.0;
const DEFAULT_DISAPPEARANCE_DELAY_MS: f64 = 2000.0;

fn seconds(ms: f64) -> f64 {
    ms / 1000.0
}

/// Converts a configuration into the engine's settings bundle.
///
/// Nothing here fails: unknown names fall back to safe defaults and invalid
/// colors are dropped, each with a warning.
pub fn effect_settings(config: &TextAnimationConfiguration) -> EffectSettings {
    let animations = &config.animations;
    EffectSettings {
        appearance: phase_settings("appearance", &animations.appearance, EasingType::EaseIn),
        main: main_settings(&animations.main),
        disappearance: phase_settings("disappearance", &animations.disappearance, EasingType::EaseOut),
        delay_before_disappearance: seconds(
            animations
                .disappearance
                .total_time
                .unwrap_or(DEFAULT_DISAPPEARANCE_DELAY_MS),
        ),
        palette: palette(&config.properties.color),
    }
}

fn phase_settings(phase: &str, config: &AnimationConfig, easing: EasingType) -> PhaseSettings {
    let kind = match config.kind.as_str() {
        "allAtOnce" => StaggerKind::AllAtOnce,
        "sequentially" => StaggerKind::Sequentially,
        "random" => StaggerKind::Random,
        other => {
            warn!("Unknown {} type '{}', using allAtOnce", phase, other);
            StaggerKind::AllAtOnce
        }
    };

    PhaseSettings {
        kind,
        unit: unit_granularity(phase, config.unit.as_deref()),
        ranges: parse_ranges(config.range.as_deref()),
        delay_between_elements: seconds(config.interval.unwrap_or(DEFAULT_INTERVAL_MS)),
        total_duration: seconds(config.total_time.unwrap_or(DEFAULT_TOTAL_TIME_MS)),
        element_time: seconds(config.element_time.unwrap_or(DEFAULT_ELEMENT_TIME_MS)),
        transition: Transition::new(
            seconds(config.interval.unwrap_or(DEFAULT_TRANSITION_MS)),
            easing,
        ),
    }
}

fn main_settings(config: &AnimationConfig) -> MainSettings {
    let intensity = MainMotion::DEFAULT_INTENSITY;
    let motion = match config.kind.as_str() {
        "none" => MainMotion::None,
        "cyclicMovement" => MainMotion::CyclicMovement {
            intensity: config.deviation_intensity.unwrap_or(intensity),
            cycle_duration: config.cycle_duration.unwrap_or(1.0),
        },
        "jumping" => MainMotion::Jumping {
            intensity: config.jump_intensity.unwrap_or(intensity),
            step_duration: config.change_step_duration.unwrap_or(0.2),
            rotation_degree: config.rotation_degree.unwrap_or(15.0),
        },
        "wave" => MainMotion::Wave {
            intensity: config.vertical_jump_intensity.unwrap_or(intensity),
            cycle_duration: config.wave_cycle_duration.unwrap_or(2.0),
            wave_length: config.wave_length.unwrap_or(5) as usize,
        },
        other => {
            warn!("Unknown main type '{}', using none", other);
            MainMotion::None
        }
    };

    MainSettings {
        motion,
        unit: unit_granularity("main", config.unit.as_deref()),
        ranges: parse_ranges(config.range.as_deref()),
    }
}

fn unit_granularity(phase: &str, unit: Option<&str>) -> UnitGranularity {
    match unit {
        None | Some("letters") => UnitGranularity::Letters,
        Some("words") => UnitGranularity::Words,
        Some(other) => {
            warn!("Unknown {} unit '{}', using letters", phase, other);
            UnitGranularity::Letters
        }
    }
}

fn parse_color(hex: &str) -> Option<Color> {
    match Color::from_hex(hex) {
        Ok(color) => Some(color),
        Err(e) => {
            warn!("Dropping color: {}", e);
            None
        }
    }
}

/// Builds the palette. An empty palette draws every unit black.
pub fn palette(color: &ColorProperties) -> Palette {
    match color.kind.as_str() {
        "singleColor" => {
            let colors = color.default_color.as_deref().and_then(parse_color).into_iter().collect();
            Palette::new(colors, ColorPattern::SingleColor)
        }
        "patternColor" => {
            let colors = color
                .colors
                .iter()
                .flatten()
                .filter_map(|hex| parse_color(hex))
                .collect();
            let pattern = match color.pattern.as_deref() {
                None | Some("sequential") => ColorPattern::SequentialPattern,
                Some("random") => ColorPattern::RandomPattern,
                Some(other) => {
                    warn!("Unknown color pattern '{}', using sequential", other);
                    ColorPattern::SequentialPattern
                }
            };
            Palette::new(colors, pattern)
        }
        other => {
            warn!("Unknown color type '{}', using black", other);
            Palette::single(Color::BLACK)
        }
    }
}

/// Font, alignment and wrapping width.
pub fn text_options(config: &TextAnimationConfiguration) -> TextOptions {
    let font = &config.properties.font;
    let style = match font.style.as_str() {
        "regular" => FontStyle::Regular,
        "bold" => FontStyle::Bold,
        "italic" => FontStyle::Italic,
        other => {
            warn!("Unknown font style '{}', using regular", other);
            FontStyle::Regular
        }
    };
    let alignment = match config.properties.alignment.horizontal.as_str() {
        "left" => Alignment::Left,
        "center" => Alignment::Center,
        "right" => Alignment::Right,
        other => {
            warn!("Unknown alignment '{}', using left", other);
            Alignment::Left
        }
    };

    TextOptions {
        font: Font {
            family: font.name.clone(),
            size: font.size as f32,
            style,
        },
        alignment,
        container_width: config.position.width as f32,
    }
}

/// Builds an [`AnimatedText`] from `config` and starts it at `now`.
#[instrument(level = "debug", skip(config, measurer), fields(text_len = config.text.len()))]
pub fn load_animated_text(
    config: &TextAnimationConfiguration,
    measurer: Arc<dyn TextMeasurer>,
    seed: Option<u64>,
    now: f64,
) -> AnimatedText {
    let settings = Arc::new(effect_settings(config));
    let mut text = AnimatedText::new(text_options(config), Some(settings)).with_measurer(measurer);
    if let Some(seed) = seed {
        text = text.with_seed(seed);
    }
    text.set_text(&config.text, now);
    text
}
