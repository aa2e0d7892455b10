// src/standings.rs
//! League standings rows.
//!
//! Column shape on the standings page: position, team, points, goals for,
//! goals against. Some leagues print goals as one `for:against` cell in the
//! fourth column; that cell then fills both values.

use serde::Serialize;

use crate::config::consts::MIN_STANDINGS_ROWS;
use crate::core::sanitize::first_digit_run;
use crate::document::{ParsedDocument, Row};
use crate::lexicon::Lexicon;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StandingsRow {
    pub position: Option<u32>,
    pub team: String,
    pub points: Option<u32>,
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
}

fn number(cell: Option<&str>) -> Option<u32> {
    cell.and_then(first_digit_run).and_then(|v| u32::try_from(v).ok())
}

/// `80:40` → (80, 40). Anything else is not a goals pair.
fn goal_pair(cell: &str) -> Option<(u32, u32)> {
    let (a, b) = cell.split_once(':')?;
    Some((number(Some(a))?, number(Some(b))?))
}

fn is_team_name(name: &str, lexicon: &Lexicon) -> bool {
    name.chars().count() > 2
        && !name.chars().all(|c| c.is_ascii_digit())
        && !lexicon.is_standings_header_label(name)
}

fn read_row(row: &Row, lexicon: &Lexicon) -> Option<StandingsRow> {
    if row.len() < 2 {
        return None;
    }
    let team = row.cell(1)?.trim();
    if !is_team_name(team, lexicon) {
        return None;
    }

    let (goals_for, goals_against) = match row.cell(3).and_then(goal_pair) {
        Some((f, a)) => (Some(f), Some(a)),
        None => (number(row.cell(3)), number(row.cell(4))),
    };

    Some(StandingsRow {
        position: number(row.cell(0)),
        team: team.to_string(),
        points: number(row.cell(2)),
        goals_for,
        goals_against,
    })
}

/// Every team row of every standings-shaped table, first occurrence per team.
pub fn extract(doc: &ParsedDocument, lexicon: &Lexicon) -> Vec<StandingsRow> {
    let mut out: Vec<StandingsRow> = Vec::new();

    for table in doc.tables.iter().filter(|t| t.rows.len() >= MIN_STANDINGS_ROWS) {
        for row in table.rows.iter().skip(1) {
            let Some(r) = read_row(row, lexicon) else { continue };
            if out.iter().any(|seen| seen.team == r.team) {
                continue;
            }
            out.push(r);
        }
    }
    out
}

/// First row whose team contains `name`, ignoring case.
pub fn find_team<'a>(rows: &'a [StandingsRow], name: &str) -> Option<&'a StandingsRow> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    rows.iter().find(|r| r.team.to_lowercase().contains(&needle))
}
