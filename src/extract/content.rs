//! Content-stream interpretation: positioned text runs from page operators.
//!
//! Glyph metrics are not loaded, so advances are estimated from the font
//! size. Positions are exact up to the first glyph of each run; widths are
//! approximate.

use lopdf::content::Operation;
use lopdf::Object;

use crate::model::{BBox, Word};

/// Average glyph advance as a fraction of the font size.
const AVG_GLYPH_ADVANCE: f64 = 0.5;

/// `TJ` adjustments above this (thousandths of an em) read as a word gap.
const TJ_SPACE_THRESHOLD: f64 = 200.0;

/// A run of text shown by one text operator, in PDF user space
/// (bottom-left origin).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextRun {
    pub text: String,
    /// Left edge of the first glyph
    pub x: f64,
    /// Baseline
    pub y: f64,
    /// Rendered font size
    pub font_size: f64,
    /// Estimated rendered width
    pub width: f64,
}

impl TextRun {
    /// Move the run into page space given the page's media box origin
    /// (`left`) and upper edge (`upper`).
    ///
    /// Ascent and descent are taken as 0.8 and 0.2 of the font size.
    pub fn place(&self, left: f64, upper: f64) -> PlacedRun {
        let x0 = self.x - left;
        PlacedRun {
            text: self.text.clone(),
            x0,
            x1: x0 + self.width,
            top: upper - (self.y + 0.8 * self.font_size),
            bottom: upper - (self.y - 0.2 * self.font_size),
            font_size: self.font_size,
        }
    }
}

/// A text run in page space (top-left origin).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlacedRun {
    pub text: String,
    pub x0: f64,
    pub x1: f64,
    pub top: f64,
    pub bottom: f64,
    pub font_size: f64,
}

impl PlacedRun {
    pub fn bbox(&self) -> BBox {
        BBox::new(self.x0, self.top, self.x1, self.bottom)
    }

    /// Split the run on whitespace into words, spreading the run width
    /// evenly over its characters.
    pub fn words(&self) -> Vec<Word> {
        let char_count = self.text.chars().count();
        if char_count == 0 {
            return Vec::new();
        }
        let advance = (self.x1 - self.x0) / char_count as f64;

        let mut words = Vec::new();
        let mut current = String::new();
        let mut start = 0;
        for (i, ch) in self.text.chars().enumerate() {
            if ch.is_whitespace() {
                if !current.is_empty() {
                    words.push(self.word(std::mem::take(&mut current), start, i, advance));
                }
                start = i + 1;
            } else {
                current.push(ch);
            }
        }
        if !current.is_empty() {
            words.push(self.word(current, start, char_count, advance));
        }
        words
    }

    fn word(&self, text: String, start: usize, end: usize, advance: f64) -> Word {
        Word::new(text, self.x0 + start as f64 * advance, self.top)
            .with_extent(self.x0 + end as f64 * advance, self.bottom)
    }
}

/// Affine transform `[a b c d e f]` as used by `cm` and `Tm`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Matrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// `self` applied first, then `other`.
    pub fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    fn horizontal_scale(&self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    fn vertical_scale(&self) -> f64 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone)]
struct TextState {
    font: Vec<u8>,
    font_size: f64,
    char_spacing: f64,
    word_spacing: f64,
    horizontal_scaling: f64,
    leading: f64,
    rise: f64,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font: Vec::new(),
            font_size: 12.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scaling: 1.0,
            leading: 0.0,
            rise: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct GraphicsState {
    ctm: Matrix,
    text: TextState,
}

/// Walks content-stream operations and collects text runs.
///
/// `decode` turns a shown string into text given the current font resource
/// name.
pub(crate) struct ContentInterpreter<F> {
    decode: F,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    in_text_block: bool,
    runs: Vec<TextRun>,
}

impl<F> ContentInterpreter<F>
where
    F: Fn(&[u8], &[u8]) -> String,
{
    pub fn new(decode: F) -> Self {
        Self {
            decode,
            state: GraphicsState::default(),
            saved: Vec::new(),
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            in_text_block: false,
            runs: Vec::new(),
        }
    }

    /// Interpret all operations and return the runs in content order.
    pub fn run(mut self, operations: &[Operation]) -> Vec<TextRun> {
        for op in operations {
            self.apply(op);
        }
        self.runs
    }

    fn apply(&mut self, op: &Operation) {
        let operands = &op.operands;
        match op.operator.as_str() {
            "q" => self.saved.push(self.state.clone()),
            "Q" => {
                if let Some(state) = self.saved.pop() {
                    self.state = state;
                }
            }
            "cm" => {
                if let Some(m) = matrix_operands(operands) {
                    self.state.ctm = m.then(&self.state.ctm);
                }
            }
            "BT" => {
                self.in_text_block = true;
                self.text_matrix = Matrix::IDENTITY;
                self.line_matrix = Matrix::IDENTITY;
            }
            "ET" => self.in_text_block = false,
            "Tf" => {
                if let Some(Object::Name(name)) = operands.first() {
                    self.state.text.font = name.clone();
                }
                if let Some(size) = operands.get(1).and_then(number) {
                    self.state.text.font_size = size;
                }
            }
            "Tc" => set_number(&mut self.state.text.char_spacing, operands),
            "Tw" => set_number(&mut self.state.text.word_spacing, operands),
            "TL" => set_number(&mut self.state.text.leading, operands),
            "Ts" => set_number(&mut self.state.text.rise, operands),
            "Tz" => {
                if let Some(scale) = operands.first().and_then(number) {
                    self.state.text.horizontal_scaling = scale / 100.0;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (operand(operands, 0), operand(operands, 1)) {
                    self.move_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (operand(operands, 0), operand(operands, 1)) {
                    self.state.text.leading = -ty;
                    self.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = matrix_operands(operands) {
                    self.text_matrix = m;
                    self.line_matrix = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    self.show(&[ShowItem::Text(bytes)]);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let items: Vec<ShowItem> = items
                        .iter()
                        .filter_map(|item| match item {
                            Object::String(bytes, _) => Some(ShowItem::Text(bytes)),
                            other => number(other).map(ShowItem::Adjust),
                        })
                        .collect();
                    self.show(&items);
                }
            }
            "'" => {
                self.next_line();
                if let Some(Object::String(bytes, _)) = operands.first() {
                    self.show(&[ShowItem::Text(bytes)]);
                }
            }
            "\"" => {
                set_number(&mut self.state.text.word_spacing, operands);
                if let Some(spacing) = operand(operands, 1) {
                    self.state.text.char_spacing = spacing;
                }
                self.next_line();
                if let Some(Object::String(bytes, _)) = operands.get(2) {
                    self.show(&[ShowItem::Text(bytes)]);
                }
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f64, ty: f64) {
        self.line_matrix = Matrix::translation(tx, ty).then(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = self.state.text.leading;
        self.move_line(0.0, -leading);
    }

    /// Show strings and `TJ` adjustments as a single run.
    fn show(&mut self, items: &[ShowItem]) {
        if !self.in_text_block {
            return;
        }

        let ts = self.state.text.clone();
        let rendering = self.text_matrix.then(&self.state.ctm);
        let (x, y) = rendering.apply(0.0, ts.rise);

        let mut text = String::new();
        let mut advance = 0.0;
        for item in items {
            match item {
                ShowItem::Text(bytes) => {
                    let decoded = (self.decode)(&ts.font, bytes);
                    for ch in decoded.chars() {
                        let mut glyph = AVG_GLYPH_ADVANCE * ts.font_size + ts.char_spacing;
                        if ch == ' ' {
                            glyph += ts.word_spacing;
                        }
                        advance += glyph * ts.horizontal_scaling;
                    }
                    text.push_str(&decoded);
                }
                ShowItem::Adjust(amount) => {
                    advance -= amount / 1000.0 * ts.font_size * ts.horizontal_scaling;
                    if -amount > TJ_SPACE_THRESHOLD && needs_space(&text) {
                        text.push(' ');
                    }
                }
            }
        }

        self.text_matrix = Matrix::translation(advance, 0.0).then(&self.text_matrix);

        if text.trim().is_empty() {
            return;
        }

        self.runs.push(TextRun {
            text,
            x,
            y,
            font_size: ts.font_size * rendering.vertical_scale(),
            width: advance * rendering.horizontal_scale(),
        });
    }
}

enum ShowItem<'a> {
    Text(&'a [u8]),
    Adjust(f64),
}

fn needs_space(text: &str) -> bool {
    match text.chars().last() {
        None | Some(' ') | Some('\u{00A0}') => false,
        Some(c) => !is_spaceless_script_char(c),
    }
}

/// Scripts written without spaces between words (Chinese, Japanese).
/// Hangul is not included: Korean separates words with spaces.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2EBEF).contains(&code)
        || (0x3040..=0x309F).contains(&code)
        || (0x30A0..=0x30FF).contains(&code)
        || (0x3000..=0x303F).contains(&code)
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

fn operand(operands: &[Object], index: usize) -> Option<f64> {
    operands.get(index).and_then(number)
}

fn set_number(target: &mut f64, operands: &[Object]) {
    if let Some(value) = operand(operands, 0) {
        *target = value;
    }
}

fn matrix_operands(operands: &[Object]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    Some(Matrix::new(
        operand(operands, 0)?,
        operand(operands, 1)?,
        operand(operands, 2)?,
        operand(operands, 3)?,
        operand(operands, 4)?,
        operand(operands, 5)?,
    ))
}

/// Simple text decoding fallback when no font encoding is available.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}
