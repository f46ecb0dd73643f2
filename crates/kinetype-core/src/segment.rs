//! # Unit Segmenter
//!
//! Splits text into addressable units, one per grapheme cluster.
//!
//! ## Indexing
//! - `letter_index` counts every emitted unit, spaces and line breaks included.
//! - `word_index` starts at 0 and increments when a non-space grapheme follows
//!   the start of text, a space, or a line break. Spaces and line breaks keep
//!   the index of the word before them.

use crate::color::{ColorAssigner, Palette};
use crate::types::Color;
use rand::Rng;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Glyph,
    Space,
    LineBreak,
}

/// One animatable piece of text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub text: String,
    pub letter_index: usize,
    pub word_index: usize,
    pub kind: UnitKind,
    /// Resolved once at segmentation time. Line breaks are never drawn and carry no color.
    pub color: Option<Color>,
}

impl Unit {
    pub fn is_line_break(&self) -> bool {
        self.kind == UnitKind::LineBreak
    }
}

fn classify(grapheme: &str) -> UnitKind {
    match grapheme {
        "\n" | "\r\n" | "\r" => UnitKind::LineBreak,
        " " => UnitKind::Space,
        _ => UnitKind::Glyph,
    }
}

/// Segments `text` using the thread-local RNG for random color patterns.
pub fn segment(text: &str, palette: &Palette) -> Vec<Unit> {
    segment_with_rng(text, palette, &mut rand::thread_rng())
}

/// Segments `text`, drawing random colors from `rng`.
pub fn segment_with_rng<R: Rng + ?Sized>(text: &str, palette: &Palette, rng: &mut R) -> Vec<Unit> {
    let mut assigner = ColorAssigner::new(palette);
    let mut units = Vec::new();
    let mut word_index = 0;
    let mut in_word = false;

    for (letter_index, grapheme) in text.graphemes(true).enumerate() {
        let kind = classify(grapheme);
        let color = match kind {
            UnitKind::LineBreak => {
                in_word = false;
                None
            }
            UnitKind::Space => {
                in_word = false;
                Some(assigner.next_color(rng))
            }
            UnitKind::Glyph => {
                if !in_word {
                    in_word = true;
                    word_index += 1;
                }
                Some(assigner.next_color(rng))
            }
        };

        units.push(Unit {
            text: grapheme.to_string(),
            letter_index,
            word_index,
            kind,
            color,
        });
    }

    units
}
