//! Spatial classification of words against table regions.

use crate::model::{TableRegion, Word};

/// Whether the word's anchor point (`x0`, `top`) falls inside any table box.
///
/// Only the top-left origin is tested, so a word straddling a table edge is
/// classified by where it starts.
pub fn is_inside_any_table(word: &Word, tables: &[TableRegion]) -> bool {
    tables
        .iter()
        .any(|table| table.bbox.contains_point(word.x0, word.top))
}

/// The words that are not inside any table, in their original order.
pub fn free_words<'a>(words: &'a [Word], tables: &[TableRegion]) -> Vec<&'a Word> {
    words
        .iter()
        .filter(|word| !is_inside_any_table(word, tables))
        .collect()
}
