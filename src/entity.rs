// src/entity.rs
//! Normalized rows → canonical records.
//!
//! Records are plain values built once per row; later stages derive new values
//! from them (see `rating::annotate`) instead of editing them.

use serde::Serialize;

use crate::classify::TableCandidate;
use crate::config::consts::FALLBACK_NAME_PREFIX;
use crate::config::consts::MAX_STAT_LABEL_CHARS;
use crate::core::sanitize::{first_digit_run, is_alphabetic_text, is_placeholder, parse_amount};
use crate::document::{ParsedDocument, Table};
use crate::lexicon::Lexicon;
use crate::model::{AttributeMap, CanonicalAttribute, Category, Provenance};
use crate::normalize::{normalize_table, NormalizedRow};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerRecord {
    pub name: String,
    pub attributes: AttributeMap,
    pub provenance: Provenance,
}

impl PlayerRecord {
    pub fn age(&self) -> Option<u64> { self.attr(CanonicalAttribute::Age) }

    pub fn attr(&self, a: CanonicalAttribute) -> Option<u64> { self.attributes.get(&a).copied() }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MarketListing {
    pub player: PlayerRecord,
    pub asking_price: Option<u64>,
    pub bidding_deadline: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FinanceItem {
    pub label: String,
    pub amount: Option<u64>,
    pub provenance: Provenance,
}

/// One `label | value` row of the team statistics page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatItem {
    pub label: String,
    pub value: String,
    /// First number in `value`, if any.
    pub number: Option<u64>,
    pub provenance: Provenance,
}

/// Keyed values from tactics, training and otherwise unrecognised tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenericRecord {
    pub category: Category,
    pub label: String,
    pub attributes: AttributeMap,
    pub provenance: Provenance,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Player(PlayerRecord),
    Youth(PlayerRecord),
    Listing(MarketListing),
    Finance(FinanceItem),
    Stat(StatItem),
    Generic(GenericRecord),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub rows_accepted: usize,
    pub rows_rejected: usize,
}

/// Name slot, else the first loose cell that reads as a word, else `Player_<row>`.
pub fn resolve_name(row: &NormalizedRow) -> String {
    if let Some(name) = &row.name {
        return name.clone();
    }
    row.loose
        .iter()
        .find(|t| is_alphabetic_text(t))
        .cloned()
        .unwrap_or_else(|| format!("{FALLBACK_NAME_PREFIX}{}", row.row))
}

pub fn build_player(table_index: usize, row: &NormalizedRow) -> PlayerRecord {
    PlayerRecord {
        name: resolve_name(row),
        attributes: row.attributes.clone(),
        provenance: Provenance { table: table_index, row: row.row },
    }
}

/// The price column becomes the asking price; it does not stay in the player's map.
pub fn build_listing(table_index: usize, row: &NormalizedRow) -> MarketListing {
    let mut player = build_player(table_index, row);
    let asking_price = player.attributes.remove(&CanonicalAttribute::Price);
    MarketListing { player, asking_price, bidding_deadline: row.deadline.clone() }
}

pub fn build_generic(category: Category, table_index: usize, row: &NormalizedRow) -> GenericRecord {
    GenericRecord {
        category,
        label: resolve_name(row),
        attributes: row.attributes.clone(),
        provenance: Provenance { table: table_index, row: row.row },
    }
}

/// Label/value rows of a finance table. Row 0 counts: these tables rarely have a header.
pub fn build_finance(table_index: usize, table: &Table, lexicon: &Lexicon) -> (Vec<FinanceItem>, BuildStats) {
    let mut items = Vec::new();
    let mut stats = BuildStats::default();

    for (row_index, row) in table.rows.iter().enumerate() {
        let label = row.cell(0).map(str::trim).unwrap_or_default();
        let value = row.cell(1).map(str::trim).unwrap_or_default();
        if !lexicon.is_finance_label(label) || is_placeholder(value) {
            stats.rows_rejected += 1;
            continue;
        }
        items.push(FinanceItem {
            label: label.to_string(),
            amount: parse_amount(value, lexicon.money_units()),
            provenance: Provenance { table: table_index, row: row_index },
        });
        stats.rows_accepted += 1;
    }
    (items, stats)
}

/// Two-cell rows from every table on the page, first occurrence per label.
/// Rows of any other width are layout and are not counted.
pub fn build_stats(doc: &ParsedDocument) -> (Vec<StatItem>, BuildStats) {
    let mut items: Vec<StatItem> = Vec::new();
    let mut stats = BuildStats::default();

    for (table_index, table) in doc.tables.iter().enumerate() {
        for (row_index, row) in table.rows.iter().enumerate() {
            if row.len() != 2 {
                continue;
            }
            let label = row.cell(0).map(str::trim).unwrap_or_default();
            let value = row.cell(1).map(str::trim).unwrap_or_default();
            if label.is_empty()
                || label.chars().count() >= MAX_STAT_LABEL_CHARS
                || is_placeholder(value)
                || items.iter().any(|i| i.label == label)
            {
                stats.rows_rejected += 1;
                continue;
            }
            items.push(StatItem {
                label: label.to_string(),
                value: value.to_string(),
                number: first_digit_run(value),
                provenance: Provenance { table: table_index, row: row_index },
            });
            stats.rows_accepted += 1;
        }
    }
    (items, stats)
}

/// Build every entity one candidate's table yields.
pub fn build_entities(candidate: &TableCandidate, table: &Table, lexicon: &Lexicon) -> (Vec<Entity>, BuildStats) {
    let t = candidate.table_index;

    if candidate.category == Category::Finance {
        let (items, stats) = build_finance(t, table, lexicon);
        return (items.into_iter().map(Entity::Finance).collect(), stats);
    }

    let normalized = normalize_table(candidate, table, lexicon);
    let stats = BuildStats { rows_accepted: normalized.rows.len(), rows_rejected: normalized.rejected };
    let entities = normalized
        .rows
        .iter()
        .map(|row| match candidate.category {
            Category::Player => Entity::Player(build_player(t, row)),
            Category::Youth => Entity::Youth(build_player(t, row)),
            Category::Market => Entity::Listing(build_listing(t, row)),
            other => Entity::Generic(build_generic(other, t, row)),
        })
        .collect();
    (entities, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Row;
    use crate::model::CanonicalAttribute as A;

    fn nrow(row: usize, name: Option<&str>, loose: &[&str]) -> NormalizedRow {
        NormalizedRow {
            row,
            name: name.map(str::to_string),
            deadline: None,
            attributes: AttributeMap::from([(A::Attack, 50), (A::Age, 20)]),
            loose: loose.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn name_chain_prefers_slot_then_word_then_provenance() {
        assert_eq!(resolve_name(&nrow(1, Some("Ivanov"), &["Petrov"])), "Ivanov");
        assert_eq!(resolve_name(&nrow(2, None, &["#7", "Нападател", "Petrov"])), "Нападател");
        assert_eq!(resolve_name(&nrow(5, None, &["12", "A1"])), "Player_5");
    }

    #[test]
    fn listing_moves_price_out_of_attributes() {
        let mut row = nrow(1, Some("Kral"), &[]);
        row.attributes.insert(A::Price, 10_000_000);
        row.deadline = Some("12.03 18:00".into());
        let l = build_listing(2, &row);
        assert_eq!(l.asking_price, Some(10_000_000));
        assert!(!l.player.attributes.contains_key(&A::Price));
        assert_eq!(l.bidding_deadline.as_deref(), Some("12.03 18:00"));
        assert_eq!(l.player.provenance, Provenance { table: 2, row: 1 });
    }

    #[test]
    fn finance_rows_need_label_and_value() {
        let lex = Lexicon::builtin();
        let table = Table::new(vec![
            Row::new(["Приход от билети", "1 250 000"]),
            Row::new(["Стадион", "Arena"]),
            Row::new(["Заплати", "-"]),
            Row::new(["Balance", "3,5 mil"]),
        ]);
        let (items, stats) = build_finance(0, &table, &lex);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].amount, Some(1_250_000));
        assert_eq!(items[0].provenance.row, 0);
        assert_eq!(items[1].label, "Balance");
        assert_eq!(items[1].amount, Some(3_500_000));
        assert_eq!(stats, BuildStats { rows_accepted: 2, rows_rejected: 2 });
    }

    #[test]
    fn stats_read_two_cell_rows() {
        let doc = ParsedDocument::new(vec![
            Table::new(vec![Row::new(["Отбор", "HC Sofia", "2024"])]),
            Table::new(vec![
                Row::new(["Голове", "45"]),
                Row::new(["Мачове", "20"]),
                Row::new(["Победи", "12"]),
                Row::new(["Загуби", "-"]),
                Row::new(["Голове", "99"]),
                Row::new(["Най-добър реализатор", "Ivanov"]),
            ]),
        ]);
        let (items, stats) = build_stats(&doc);
        let got: Vec<(&str, Option<u64>)> = items.iter().map(|i| (i.label.as_str(), i.number)).collect();
        assert_eq!(got, vec![
            ("Голове", Some(45)),
            ("Мачове", Some(20)),
            ("Победи", Some(12)),
            ("Най-добър реализатор", None),
        ]);
        assert_eq!(items[3].value, "Ivanov");
        assert_eq!(items[0].provenance, Provenance { table: 1, row: 0 });
        assert_eq!(stats, BuildStats { rows_accepted: 4, rows_rejected: 2 });
    }

    #[test]
    fn youth_and_generic_tables_keep_their_kind() {
        let lex = Lexicon::builtin();
        let table = Table::new(vec![
            Row::new(["Име", "Възраст", "Потенциал"]),
            Row::new(["Petrov", "17", "80"]),
        ]);
        let headers: Vec<String> = vec!["име".into(), "възраст".into(), "потенциал".into()];
        let youth = TableCandidate { table_index: 0, headers: headers.clone(), category: Category::Youth, confidence: 3 };
        let (e, _) = build_entities(&youth, &table, &lex);
        assert!(matches!(&e[0], Entity::Youth(p) if p.name == "Petrov" && p.attr(A::Potential) == Some(80)));

        let training = TableCandidate { table_index: 0, headers, category: Category::Training, confidence: 1 };
        let (e, _) = build_entities(&training, &table, &lex);
        assert!(matches!(&e[0], Entity::Generic(g) if g.category == Category::Training && g.label == "Petrov"));
    }
}
