//! Grouping free words into text lines.
//!
//! Words are clustered by rounding their `top` coordinate to a fixed number
//! of decimal places. Coarser precision merges lines that jitter by a
//! fraction of a point; finer precision keeps adjacent lines apart.

use indexmap::IndexMap;

use crate::model::Word;

/// Rounded vertical coordinate shared by the words of one line.
///
/// Finite coordinates are stored as an integer count of `10^-precision`
/// units so that keys compare exactly. NaN and the infinities get keys of
/// their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey {
    units: KeyUnits,
    precision: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum KeyUnits {
    Finite(i64),
    NaN,
    Infinite { negative: bool },
}

impl LineKey {
    /// The rounded coordinate this key stands for.
    pub fn anchor(&self) -> f64 {
        match self.units {
            KeyUnits::Finite(units) => units as f64 / 10f64.powi(self.precision as i32),
            KeyUnits::NaN => f64::NAN,
            KeyUnits::Infinite { negative: true } => f64::NEG_INFINITY,
            KeyUnits::Infinite { negative: false } => f64::INFINITY,
        }
    }
}

/// Line-grouping tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineGrouping {
    /// Decimal places kept when rounding a word's `top`
    pub precision: u32,
}

impl LineGrouping {
    /// Default precision: one decimal place of the page unit.
    pub const DEFAULT_PRECISION: u32 = 1;

    /// Largest precision accepted; beyond this the scaled key overflows
    /// typical page coordinates.
    pub const MAX_PRECISION: u32 = 6;

    /// Create a grouping with the given precision, clamped to
    /// [`MAX_PRECISION`](Self::MAX_PRECISION).
    pub fn new(precision: u32) -> Self {
        Self {
            precision: precision.min(Self::MAX_PRECISION),
        }
    }

    /// Grouping key for a vertical coordinate.
    ///
    /// Rounding is applied to the exact binary value of `top`, and exact
    /// ties go to the even digit: `10.25` keys as `10.2`, while `0.15`
    /// (stored as `0.1499...`) keys as `0.1`.
    pub fn key(&self, top: f64) -> LineKey {
        let units = if top.is_nan() {
            KeyUnits::NaN
        } else if top.is_infinite() {
            KeyUnits::Infinite {
                negative: top < 0.0,
            }
        } else {
            KeyUnits::Finite(self.scaled_units(top))
        };
        LineKey {
            units,
            precision: self.precision,
        }
    }

    fn scaled_units(&self, top: f64) -> i64 {
        // Float formatting rounds correctly, ties to even
        let digits: String = format!("{:.*}", self.precision as usize, top)
            .chars()
            .filter(|c| *c != '.')
            .collect();
        digits.parse().unwrap_or_else(|_| {
            let scale = 10f64.powi(self.precision as i32);
            (top * scale).round() as i64
        })
    }

    /// Group words into lines.
    ///
    /// Lines come out in the order their keys were first seen, not sorted by
    /// position. Inside a line, words are ordered by `x0` (stable for ties)
    /// and joined with single spaces.
    pub fn group<'a, I>(&self, words: I) -> Vec<TextLine>
    where
        I: IntoIterator<Item = &'a Word>,
    {
        let mut lines: IndexMap<LineKey, Vec<&'a Word>> = IndexMap::new();
        for word in words {
            lines.entry(self.key(word.top)).or_default().push(word);
        }

        lines
            .into_iter()
            .map(|(key, mut words)| {
                words.sort_by(|a, b| a.x0.total_cmp(&b.x0));
                let text = words
                    .iter()
                    .map(|w| w.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                TextLine {
                    y: key.anchor(),
                    text,
                }
            })
            .collect()
    }
}

impl Default for LineGrouping {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PRECISION)
    }
}

/// A line of free text anchored at its rounded `top`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Rounded vertical position
    pub y: f64,
    /// Words joined by single spaces
    pub text: String,
}
