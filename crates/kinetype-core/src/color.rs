//! # Color Assigner
//!
//! Resolves one color per unit, once, at segmentation time.

use crate::types::Color;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Policy used to pick a unit's color from the palette.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorPattern {
    /// Every unit gets the first palette color.
    #[default]
    SingleColor,
    /// Cycle through the palette, skipping a color equal to the previous one.
    SequentialPattern,
    /// Pick at random, excluding the previous color.
    RandomPattern,
}

/// Colors available to the text plus the policy for distributing them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub colors: Vec<Color>,
    pub pattern: ColorPattern,
}

impl Palette {
    pub fn new(colors: Vec<Color>, pattern: ColorPattern) -> Self {
        Self { colors, pattern }
    }

    pub fn single(color: Color) -> Self {
        Self::new(vec![color], ColorPattern::SingleColor)
    }
}

/// Stateful cursor over a palette. One assigner is used per text generation.
#[derive(Debug)]
pub struct ColorAssigner<'a> {
    palette: &'a Palette,
    cursor: usize,
    previous: Option<Color>,
}

impl<'a> ColorAssigner<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self {
            palette,
            cursor: 0,
            previous: None,
        }
    }

    /// Resolves the color of the next colored unit.
    pub fn next_color<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Color {
        let colors = &self.palette.colors;
        let color = match self.palette.pattern {
            ColorPattern::SingleColor => colors.first().copied().unwrap_or(Color::BLACK),
            ColorPattern::SequentialPattern => self.next_sequential(),
            ColorPattern::RandomPattern => {
                let candidates: Vec<Color> = colors
                    .iter()
                    .copied()
                    .filter(|c| Some(*c) != self.previous)
                    .collect();
                let pool = if candidates.is_empty() {
                    colors.as_slice()
                } else {
                    candidates.as_slice()
                };
                pool.choose(rng).copied().unwrap_or(Color::BLACK)
            }
        };
        self.previous = Some(color);
        color
    }

    fn next_sequential(&mut self) -> Color {
        let colors = &self.palette.colors;
        if colors.is_empty() {
            return Color::BLACK;
        }

        // At most one full lap: a palette of identical colors has no alternative.
        let mut color = colors[self.cursor % colors.len()];
        self.cursor += 1;
        let mut attempts = 1;
        while colors.len() > 1 && Some(color) == self.previous && attempts < colors.len() {
            color = colors[self.cursor % colors.len()];
            self.cursor += 1;
            attempts += 1;
        }
        color
    }
}
