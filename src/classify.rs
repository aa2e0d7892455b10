// src/classify.rs
//! Keyword-overlap table classification.
//!
//! Row 0 of every table with at least two rows is read as the header row. A
//! header cell counts once if it contains any of the category's keywords as a
//! plain substring; no diacritic folding, so Bulgarian and Slovak labels on the
//! same page do not bleed into each other.

use serde::Serialize;

use crate::config::consts::MIN_TABLE_ROWS;
use crate::document::{ParsedDocument, Table};
use crate::lexicon::Lexicon;
use crate::model::Category;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableCandidate {
    pub table_index: usize,
    /// Lowercased, trimmed header cells in column order.
    pub headers: Vec<String>,
    pub category: Category,
    /// Number of header cells with a keyword hit.
    pub confidence: usize,
}

/// All tables of `doc` that qualify for `category`, in document order.
pub fn classify(doc: &ParsedDocument, category: Category, lexicon: &Lexicon) -> Vec<TableCandidate> {
    let keywords = lexicon.keywords(category);
    let threshold = lexicon.threshold(category);

    doc.tables
        .iter()
        .enumerate()
        .filter_map(|(table_index, table)| {
            let headers = header_tokens(table)?;
            let confidence = headers
                .iter()
                .filter(|h| keywords.iter().any(|k| h.contains(k.as_str())))
                .count();
            (confidence >= threshold).then_some(TableCandidate {
                table_index,
                headers,
                category,
                confidence,
            })
        })
        .collect()
}

/// Every category claiming at least one table of `doc`; several may claim the same table.
pub fn classify_all(doc: &ParsedDocument, lexicon: &Lexicon) -> Vec<TableCandidate> {
    Category::ALL
        .iter()
        .flat_map(|&c| classify(doc, c, lexicon))
        .collect()
}

fn header_tokens(table: &Table) -> Option<Vec<String>> {
    if table.rows.len() < MIN_TABLE_ROWS {
        return None;
    }
    let header = table.header()?;
    Some(header.cells.iter().map(|c| c.trim().to_lowercase()).collect())
}
