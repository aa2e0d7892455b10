// src/document.rs
//! Parsed page shape: tables → rows → cell texts.
//!
//! The reader walks tags once, keeping a stack of open tables so that layout
//! tables nesting data tables (the norm on these pages) come out as separate
//! tables. Text inside a nested table also lands in the enclosing cell, which
//! matches what a plain text extraction of the outer cell would show.

use serde::Serialize;

use crate::core::html::{find_close_ci, next_tag};
use crate::core::sanitize::{normalize_entities, normalize_ws};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    pub cells: Vec<String>,
}

impl Row {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { cells: cells.into_iter().map(Into::into).collect() }
    }

    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }
    pub fn cell(&self, i: usize) -> Option<&str> { self.cells.get(i).map(String::as_str) }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self { Self { rows } }
    pub fn header(&self) -> Option<&Row> { self.rows.first() }
}

/// Immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    pub tables: Vec<Table>,
}

impl ParsedDocument {
    pub fn new(tables: Vec<Table>) -> Self { Self { tables } }
    pub fn is_empty(&self) -> bool { self.tables.is_empty() }
}

/* ---------- reader ---------- */

struct OpenTable {
    /// Position in output order (by opening tag).
    slot: usize,
    rows: Vec<Row>,
    row_open: bool,
    cell: Option<String>,
}

impl OpenTable {
    fn close_cell(&mut self) {
        if let Some(raw) = self.cell.take() {
            let text = normalize_ws(&normalize_entities(&raw));
            if !self.row_open {
                self.rows.push(Row::default());
                self.row_open = true;
            }
            if let Some(row) = self.rows.last_mut() {
                row.cells.push(text);
            }
        }
    }

    fn close_row(&mut self) {
        self.close_cell();
        self.row_open = false;
    }

    fn open_row(&mut self) {
        self.close_row();
        self.rows.push(Row::default());
        self.row_open = true;
    }

    fn open_cell(&mut self) {
        self.close_cell();
        if !self.row_open {
            self.open_row();
        }
        self.cell = Some(String::new());
    }

    fn finish(mut self) -> (usize, Table) {
        self.close_row();
        self.rows.retain(|r| !r.is_empty());
        (self.slot, Table::new(self.rows))
    }
}

/// Read every `<table>` of an HTML page into a [`ParsedDocument`].
///
/// Tolerant of unclosed `<td>`/`<tr>` and of missing `</table>` at EOF.
pub fn parse_html(html: &str) -> ParsedDocument {
    let mut stack: Vec<OpenTable> = Vec::new();
    let mut done: Vec<(usize, Table)> = Vec::new();
    let mut slots = 0usize;
    let mut pos = 0usize;

    while let Some(tag) = next_tag(html, pos) {
        push_text(&mut stack, &html[pos..tag.start]);
        pos = tag.end;

        // keep words from neighbouring cells apart in enclosing cells
        if matches!(tag.name.as_str(), "table" | "tr" | "td" | "th" | "br" | "p" | "div" | "li") {
            push_text(&mut stack, " ");
        }

        match (tag.name.as_str(), tag.closing) {
            ("script" | "style", false) => {
                pos = find_close_ci(html, &tag.name, pos).unwrap_or(html.len());
            }
            ("table", false) => {
                stack.push(OpenTable { slot: slots, rows: Vec::new(), row_open: false, cell: None });
                slots += 1;
            }
            ("table", true) => {
                if let Some(t) = stack.pop() {
                    done.push(t.finish());
                }
            }
            ("tr", false) => { if let Some(t) = stack.last_mut() { t.open_row(); } }
            ("tr", true) => { if let Some(t) = stack.last_mut() { t.close_row(); } }
            ("td" | "th", false) => { if let Some(t) = stack.last_mut() { t.open_cell(); } }
            ("td" | "th", true) => { if let Some(t) = stack.last_mut() { t.close_cell(); } }
            _ => {}
        }
    }
    push_text(&mut stack, &html[pos.min(html.len())..]);

    while let Some(t) = stack.pop() {
        done.push(t.finish());
    }

    done.sort_by_key(|(slot, _)| *slot);
    ParsedDocument::new(done.into_iter().map(|(_, t)| t).collect())
}

fn push_text(stack: &mut [OpenTable], text: &str) {
    if text.is_empty() {
        return;
    }
    for t in stack.iter_mut() {
        if let Some(cell) = t.cell.as_mut() {
            cell.push_str(text);
        }
    }
}
