//! # Layout System
//!
//! Greedy line wrapping of units inside a fixed-width container.
//!
//! ## Responsibilities
//! - **Measurement**: Delegates unit widths to an external `TextMeasurer`.
//! - **Line Splitting**: Fills lines left to right; no hyphenation, no look-ahead.
//! - **Placement**: Computes each unit's origin from line widths and alignment.
//!
//! ## Key Types
//! - `TextMeasurer`: The measurement service supplied by the host.
//! - `LineLayout`: Wrapped lines plus per-unit origins.

use crate::segment::Unit;
use crate::types::{Alignment, Font, UnitId, Vec2};
use tracing::{debug, instrument};
use unicode_segmentation::UnicodeSegmentation;

/// Extra vertical space between consecutive lines, in points.
pub const LINE_SPACING: f32 = 4.0;

/// A trait for abstracting text measurement.
///
/// The host toolkit owns fonts and shaping; the engine only needs advance widths.
pub trait TextMeasurer: Send + Sync {
    /// Returns the width of `text` drawn with `font`.
    fn measure_width(&self, text: &str, font: &Font) -> f32;
}

/// A measurer that gives every grapheme the same advance (a fraction of the font size).
///
/// Used headless and in tests where no rendering surface exists.
#[derive(Clone, Copy, Debug)]
pub struct MonospaceMeasurer {
    /// Advance per grapheme as a multiple of the font size.
    pub advance: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure_width(&self, text: &str, font: &Font) -> f32 {
        let count = text.graphemes(true).count() as f32;
        (count * font.size * self.advance).ceil()
    }
}

/// Splits units into lines by greedy fill.
///
/// Returns unit ids (positions in `units`). A line break forces a new, empty line.
/// A unit wider than the remaining space starts a new line holding just that unit,
/// even when the current line is still empty.
pub fn split_lines(
    units: &[Unit],
    container_width: f32,
    font: &Font,
    measurer: &dyn TextMeasurer,
) -> Vec<Vec<UnitId>> {
    let mut lines: Vec<Vec<UnitId>> = vec![Vec::new()];
    let mut remaining = container_width;

    for (id, unit) in units.iter().enumerate() {
        if unit.is_line_break() {
            lines.push(Vec::new());
            remaining = container_width;
            continue;
        }

        let width = measurer.measure_width(&unit.text, font);
        if width > remaining {
            lines.push(vec![id]);
            remaining = container_width - width;
        } else if let Some(line) = lines.last_mut() {
            line.push(id);
            remaining -= width;
        }
    }

    lines
}

/// One wrapped line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line {
    pub units: Vec<UnitId>,
    /// Sum of the measured widths of the line's units.
    pub width: f32,
}

/// Wrapped lines plus the placement of every unit.
#[derive(Clone, Debug, Default)]
pub struct LineLayout {
    pub lines: Vec<Line>,
    /// Indexed by `UnitId`. Line breaks have no placement.
    placements: Vec<Option<(usize, Vec2)>>,
    line_height: f32,
}

impl LineLayout {
    /// Lays out `units` inside `container_width`.
    #[instrument(level = "debug", skip(units, font, measurer), fields(units = units.len()))]
    pub fn compute(
        units: &[Unit],
        container_width: f32,
        font: &Font,
        alignment: Alignment,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let widths: Vec<f32> = units
            .iter()
            .map(|u| {
                if u.is_line_break() {
                    0.0
                } else {
                    measurer.measure_width(&u.text, font)
                }
            })
            .collect();

        let line_height = font.size + LINE_SPACING;
        let mut placements = vec![None; units.len()];
        let mut lines = Vec::new();

        for (line_index, ids) in split_lines(units, container_width, font, measurer)
            .into_iter()
            .enumerate()
        {
            let width: f32 = ids.iter().map(|&id| widths[id]).sum();
            let free = if container_width.is_finite() {
                (container_width - width).max(0.0)
            } else {
                0.0
            };
            let mut x = free * alignment.factor();
            let y = line_index as f32 * line_height;
            for &id in &ids {
                placements[id] = Some((line_index, Vec2::new(x, y)));
                x += widths[id];
            }
            lines.push(Line { units: ids, width });
        }

        debug!("laid out {} units on {} lines", units.len(), lines.len());
        Self {
            lines,
            placements,
            line_height,
        }
    }

    /// Returns the line index and top-left origin of a unit.
    pub fn placement(&self, id: UnitId) -> Option<(usize, Vec2)> {
        self.placements.get(id).copied().flatten()
    }

    /// Total height of the text block.
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette;
    use crate::segment::segment;

    fn font(size: f32) -> Font {
        Font {
            size,
            ..Font::default()
        }
    }

    /// Every grapheme is exactly 10 points wide.
    struct FixedMeasurer;

    impl TextMeasurer for FixedMeasurer {
        fn measure_width(&self, text: &str, _font: &Font) -> f32 {
            text.graphemes(true).count() as f32 * 10.0
        }
    }

    fn texts(units: &[Unit], lines: &[Vec<UnitId>]) -> Vec<String> {
        lines
            .iter()
            .map(|ids| ids.iter().map(|&id| units[id].text.as_str()).collect())
            .collect()
    }

    #[test]
    fn wraps_greedily() {
        let units = segment("abcdefg", &Palette::default());
        let lines = split_lines(&units, 30.0, &font(10.0), &FixedMeasurer);
        assert_eq!(texts(&units, &lines), vec!["abc", "def", "g"]);
    }

    #[test]
    fn line_break_forces_new_line() {
        let units = segment("ab\ncd", &Palette::default());
        let lines = split_lines(&units, 100.0, &font(10.0), &FixedMeasurer);
        assert_eq!(texts(&units, &lines), vec!["ab", "cd"]);
    }

    #[test]
    fn consecutive_line_breaks_leave_empty_lines() {
        let units = segment("a\n\nb", &Palette::default());
        let lines = split_lines(&units, 100.0, &font(10.0), &FixedMeasurer);
        assert_eq!(texts(&units, &lines), vec!["a", "", "b"]);
    }

    #[test]
    fn oversized_first_unit_leaves_leading_empty_line() {
        let units = segment("ab", &Palette::default());
        let lines = split_lines(&units, 5.0, &font(10.0), &FixedMeasurer);
        assert_eq!(texts(&units, &lines), vec!["", "a", "b"]);
    }

    #[test]
    fn center_alignment_offsets_lines() {
        let units = segment("ab\nc", &Palette::default());
        let layout = LineLayout::compute(&units, 40.0, &font(10.0), Alignment::Center, &FixedMeasurer);
        assert_eq!(layout.line_count(), 2);
        assert_eq!(layout.placement(0), Some((0, Vec2::new(10.0, 0.0))));
        assert_eq!(layout.placement(1), Some((0, Vec2::new(20.0, 0.0))));
        assert_eq!(layout.placement(2), None);
        assert_eq!(layout.placement(3), Some((1, Vec2::new(15.0, 14.0))));
        assert_eq!(layout.height(), 28.0);
    }

    #[test]
    fn right_alignment_flushes_to_edge() {
        let units = segment("ab", &Palette::default());
        let layout = LineLayout::compute(&units, 50.0, &font(10.0), Alignment::Right, &FixedMeasurer);
        assert_eq!(layout.placement(0), Some((0, Vec2::new(30.0, 0.0))));
        assert_eq!(layout.lines[0].width, 20.0);
    }

    #[test]
    fn monospace_measurer_rounds_up() {
        let m = MonospaceMeasurer { advance: 0.5 };
        assert_eq!(m.measure_width("ab", &font(10.0)), 10.0);
        assert_eq!(m.measure_width("a", &font(11.0)), 6.0);
    }

    #[test]
    fn unbounded_width_never_wraps() {
        let units = segment("hello world", &Palette::default());
        let layout =
            LineLayout::compute(&units, f32::INFINITY, &font(10.0), Alignment::Center, &FixedMeasurer);
        assert_eq!(layout.line_count(), 1);
        assert_eq!(layout.placement(0), Some((0, Vec2::ZERO)));
    }
}
