// src/normalize.rs
//! Header → field resolution and cell coercion.
//!
//! Headers resolve once per table through the lexicon's ordered synonym list.
//! Cells then coerce per column: text slots keep trimmed text, attributes take
//! the first digit run (money columns take a full amount). Anything that does
//! not yield a value is left out rather than zeroed.

use serde::Serialize;

use crate::classify::TableCandidate;
use crate::config::consts::MIN_ROW_FIELDS;
use crate::core::sanitize::{first_digit_run, is_placeholder, parse_amount};
use crate::document::{Row, Table};
use crate::lexicon::Lexicon;
use crate::model::{AttributeMap, CanonicalAttribute, Field};

/// Column → field, resolved from a candidate's header tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    columns: Vec<Option<Field>>,
}

impl ColumnMap {
    pub fn resolve(headers: &[String], lexicon: &Lexicon) -> Self {
        Self { columns: headers.iter().map(|h| lexicon.resolve_header(h)).collect() }
    }

    pub fn field(&self, column: usize) -> Option<Field> {
        self.columns.get(column).copied().flatten()
    }

    pub fn mapped(&self) -> usize {
        self.columns.iter().filter(|c| c.is_some()).count()
    }
}

/// One data row after normalization. Raw header text never survives here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedRow {
    /// Row index inside the source table.
    pub row: usize,
    pub name: Option<String>,
    pub deadline: Option<String>,
    pub attributes: AttributeMap,
    /// Non-empty text of unmapped columns, in column order.
    pub loose: Vec<String>,
}

impl NormalizedRow {
    pub fn field_count(&self) -> usize {
        self.attributes.len() + usize::from(self.name.is_some()) + usize::from(self.deadline.is_some())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedTable {
    pub table_index: usize,
    pub rows: Vec<NormalizedRow>,
    pub rejected: usize,
}

/// Coerce a single attribute cell. `None` for placeholders, digitless text and out-of-range values.
pub fn coerce(attr: CanonicalAttribute, text: &str, lexicon: &Lexicon) -> Option<u64> {
    if is_placeholder(text) {
        return None;
    }
    let v = if attr.is_money() {
        parse_amount(text, lexicon.money_units())?
    } else {
        first_digit_run(text)?
    };
    attr.in_range(v).then_some(v)
}

/// Normalize one row against a column map; `None` when too few fields survive.
pub fn normalize_row(columns: &ColumnMap, row_index: usize, row: &Row, lexicon: &Lexicon) -> Option<NormalizedRow> {
    let mut out = NormalizedRow { row: row_index, ..Default::default() };

    for (i, cell) in row.cells.iter().enumerate() {
        let text = cell.trim();
        if is_placeholder(text) {
            continue;
        }
        match columns.field(i) {
            Some(Field::Name) => {
                out.name.get_or_insert_with(|| text.to_string());
            }
            Some(Field::Deadline) => {
                out.deadline.get_or_insert_with(|| text.to_string());
            }
            Some(Field::Attr(attr)) => {
                if out.attributes.contains_key(&attr) {
                    continue;
                }
                if let Some(v) = coerce(attr, text, lexicon) {
                    out.attributes.insert(attr, v);
                }
            }
            None => out.loose.push(text.to_string()),
        }
    }

    (out.field_count() >= MIN_ROW_FIELDS).then_some(out)
}

/// Normalize every data row (row 1 onward) of the candidate's table.
pub fn normalize_table(candidate: &TableCandidate, table: &Table, lexicon: &Lexicon) -> NormalizedTable {
    let columns = ColumnMap::resolve(&candidate.headers, lexicon);
    let mut out = NormalizedTable { table_index: candidate.table_index, ..Default::default() };

    for (row_index, row) in table.rows.iter().enumerate().skip(1) {
        match normalize_row(&columns, row_index, row, lexicon) {
            Some(r) => out.rows.push(r),
            None => out.rejected += 1,
        }
    }
    if out.rejected > 0 {
        logd!(
            "table {}: {} row(s) rejected, {} kept ({} of {} columns mapped)",
            candidate.table_index, out.rejected, out.rows.len(), columns.mapped(), candidate.headers.len()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CanonicalAttribute as A;

    fn headers(h: &[&str]) -> Vec<String> {
        h.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn maps_bulgarian_and_abbreviated_headers() {
        let lex = Lexicon::builtin();
        let cols = ColumnMap::resolve(&headers(&["име", "възраст", "att", "def"]), &lex);
        let r = normalize_row(&cols, 1, &Row::new(["Ivanov", "24", "70", "40"]), &lex).unwrap();
        assert_eq!(r.name.as_deref(), Some("Ivanov"));
        assert_eq!(r.attributes.get(&A::Age), Some(&24));
        assert_eq!(r.attributes.get(&A::Attack), Some(&70));
        assert_eq!(r.attributes.get(&A::Defense), Some(&40));
        assert!(r.loose.is_empty());
    }

    #[test]
    fn placeholders_and_digitless_cells_are_omitted_not_zeroed() {
        let lex = Lexicon::builtin();
        let cols = ColumnMap::resolve(&headers(&["име", "att", "def", "sho", "spe"]), &lex);
        let r = normalize_row(&cols, 1, &Row::new(["A", "-", "n/a", "0", "55"]), &lex).unwrap();
        assert_eq!(r.attributes.get(&A::Attack), None);
        assert_eq!(r.attributes.get(&A::Defense), None);
        assert_eq!(r.attributes.get(&A::Shooting), Some(&0));
        assert_eq!(r.attributes.get(&A::Speed), Some(&55));
    }

    #[test]
    fn out_of_range_is_absent() {
        let lex = Lexicon::builtin();
        assert_eq!(coerce(A::Attack, "101", &lex), None);
        assert_eq!(coerce(A::Age, "61", &lex), None);
        assert_eq!(coerce(A::Age, "60", &lex), Some(60));
        assert_eq!(coerce(A::Price, "10 000 000", &lex), Some(10_000_000));
        assert_eq!(coerce(A::Price, "2,5 милиона", &lex), Some(2_500_000));
    }

    #[test]
    fn row_with_too_few_fields_is_rejected() {
        let lex = Lexicon::builtin();
        let cols = ColumnMap::resolve(&headers(&["име", "клуб", "att"]), &lex);
        assert!(normalize_row(&cols, 1, &Row::new(["Ivanov", "HC", "70"]), &lex).is_none());
    }

    #[test]
    fn first_column_wins_for_duplicate_fields() {
        let lex = Lexicon::builtin();
        let cols = ColumnMap::resolve(&headers(&["име", "att", "attack", "age"]), &lex);
        let r = normalize_row(&cols, 1, &Row::new(["A", "61", "99", "30"]), &lex).unwrap();
        assert_eq!(r.attributes.get(&A::Attack), Some(&61));
    }

    #[test]
    fn unmapped_columns_become_loose_text() {
        let lex = Lexicon::builtin();
        let cols = ColumnMap::resolve(&headers(&["играчи", "позиция", "att", "def", "age"]), &lex);
        // blank name cell, unknown "позиция" column, and a cell past the last header
        let r = normalize_row(&cols, 3, &Row::new(["", "Нападател", "70", "40", "22", "extra"]), &lex).unwrap();
        assert_eq!(r.name, None);
        assert_eq!(r.loose, vec!["Нападател", "extra"]);
    }

    #[test]
    fn table_counts_rejections() {
        let lex = Lexicon::builtin();
        let table = Table::new(vec![
            Row::new(["Име", "Възраст", "ATT"]),
            Row::new(["Ivanov", "24", "70"]),
            Row::new(["-", "-", "-"]),
            Row::new(["Total"]),
        ]);
        let cand = TableCandidate {
            table_index: 4,
            headers: headers(&["име", "възраст", "att"]),
            category: crate::model::Category::Player,
            confidence: 3,
        };
        let t = normalize_table(&cand, &table, &lex);
        assert_eq!(t.table_index, 4);
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0].row, 1);
        assert_eq!(t.rejected, 2);
    }
}
