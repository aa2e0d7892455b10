// src/lexicon.rs
//! Keyword and synonym tables driving classification and normalization.
//!
//! A [`Lexicon`] only exists in validated form: build it with
//! [`Lexicon::builtin`], [`Lexicon::from_json_str`], [`Lexicon::from_path`] or
//! [`Lexicon::new`]. Every stage takes `&Lexicon`; nothing mutates it during a
//! run.
//!
//! The site mixes Bulgarian, Slovak and English labels, sometimes for the same
//! column. The built-in tables list the variants seen on real pages; they are
//! configuration, not truth, and a run may supply its own JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{CanonicalAttribute as A, Category, Field};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read lexicon {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("lexicon is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("lexicon has no rule for category `{0}`")]
    MissingCategory(Category),
    #[error("lexicon lists category `{0}` twice")]
    DuplicateCategory(Category),
    #[error("category `{category}` needs {threshold} hit(s) but has no keywords")]
    NoKeywords { category: Category, threshold: usize },
    #[error("blank entry in {table}")]
    BlankEntry { table: &'static str },
    #[error("entry `{entry}` in {table} is not lowercase; headers are lowercased before matching")]
    NotLowercase { table: &'static str, entry: String },
    #[error("synonym table lists field `{0}` twice")]
    DuplicateField(Field),
    #[error("field `{0}` has no synonyms")]
    NoSynonyms(Field),
    #[error("synonym table is empty")]
    EmptySynonyms,
    #[error("money unit `{0}` has a zero multiplier")]
    ZeroMultiplier(String),
}

/* ---------- raw, deserializable shape ---------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub threshold: usize,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub field: Field,
    pub synonyms: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyUnit {
    pub unit: String,
    pub multiplier: u64,
}

/// The lexicon as written in configuration, before validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconSpec {
    pub categories: Vec<CategoryRule>,
    /// Order is significant: the first entry whose synonym occurs in a header wins.
    pub synonyms: Vec<SynonymEntry>,
    #[serde(default)]
    pub money_units: Vec<MoneyUnit>,
    #[serde(default)]
    pub finance_labels: Vec<String>,
    #[serde(default)]
    pub standings_header_labels: Vec<String>,
}

/* ---------- validated ---------- */

#[derive(Clone, Debug)]
pub struct Lexicon {
    spec: LexiconSpec,
    units: Vec<(String, u64)>,
}

impl Lexicon {
    pub fn new(spec: LexiconSpec) -> Result<Self, ConfigError> {
        validate(&spec)?;
        let units = spec.money_units.iter().map(|u| (u.unit.clone(), u.multiplier)).collect();
        Ok(Self { spec, units })
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let spec: LexiconSpec = serde_json::from_str(text)?;
        Self::new(spec)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text)
    }

    /// The tables shipped with the crate.
    pub fn builtin() -> Self {
        let spec = builtin_spec();
        let units = spec.money_units.iter().map(|u| (u.unit.clone(), u.multiplier)).collect();
        debug_assert!(validate(&spec).is_ok());
        Self { spec, units }
    }

    pub fn spec(&self) -> &LexiconSpec { &self.spec }

    fn rule(&self, category: Category) -> &CategoryRule {
        // validation guarantees exactly one rule per category
        self.spec
            .categories
            .iter()
            .find(|r| r.category == category)
            .unwrap_or_else(|| unreachable!("validated lexicon lacks {category}"))
    }

    pub fn keywords(&self, category: Category) -> &[String] { &self.rule(category).keywords }

    pub fn threshold(&self, category: Category) -> usize { self.rule(category).threshold }

    /// Resolve a lowercased header to its field; first entry with a matching synonym wins.
    pub fn resolve_header(&self, header: &str) -> Option<Field> {
        self.spec
            .synonyms
            .iter()
            .find(|e| e.synonyms.iter().any(|s| header.contains(s.as_str())))
            .map(|e| e.field)
    }

    pub fn money_units(&self) -> &[(String, u64)] { &self.units }

    pub fn is_finance_label(&self, label: &str) -> bool {
        let lc = label.to_lowercase();
        self.spec.finance_labels.iter().any(|k| lc.contains(k.as_str()))
    }

    pub fn is_standings_header_label(&self, text: &str) -> bool {
        let lc = text.trim().to_lowercase();
        self.spec.standings_header_labels.iter().any(|k| *k == lc)
    }
}

impl Default for Lexicon {
    fn default() -> Self { Self::builtin() }
}

fn validate(spec: &LexiconSpec) -> Result<(), ConfigError> {
    for category in Category::ALL {
        let mut rules = spec.categories.iter().filter(|r| r.category == category);
        let rule = rules.next().ok_or(ConfigError::MissingCategory(category))?;
        if rules.next().is_some() {
            return Err(ConfigError::DuplicateCategory(category));
        }
        if rule.threshold > 0 && rule.keywords.is_empty() {
            return Err(ConfigError::NoKeywords { category, threshold: rule.threshold });
        }
        check_entries("category keywords", &rule.keywords)?;
    }

    if spec.synonyms.is_empty() {
        return Err(ConfigError::EmptySynonyms);
    }
    let mut seen: Vec<Field> = Vec::with_capacity(spec.synonyms.len());
    for entry in &spec.synonyms {
        if seen.contains(&entry.field) {
            return Err(ConfigError::DuplicateField(entry.field));
        }
        seen.push(entry.field);
        if entry.synonyms.is_empty() {
            return Err(ConfigError::NoSynonyms(entry.field));
        }
        check_entries("synonyms", &entry.synonyms)?;
    }

    for unit in &spec.money_units {
        check_entries("money units", std::slice::from_ref(&unit.unit))?;
        if unit.multiplier == 0 {
            return Err(ConfigError::ZeroMultiplier(unit.unit.clone()));
        }
    }
    check_entries("finance labels", &spec.finance_labels)?;
    check_entries("standings header labels", &spec.standings_header_labels)?;
    Ok(())
}

fn check_entries(table: &'static str, entries: &[String]) -> Result<(), ConfigError> {
    for e in entries {
        if e.trim().is_empty() {
            return Err(ConfigError::BlankEntry { table });
        }
        if *e != e.to_lowercase() {
            return Err(ConfigError::NotLowercase { table, entry: e.clone() });
        }
    }
    Ok(())
}

/* ---------- built-in tables ---------- */

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn rule(category: Category, threshold: usize, keywords: &[&str]) -> CategoryRule {
    CategoryRule { category, threshold, keywords: words(keywords) }
}

fn syn(field: Field, synonyms: &[&str]) -> SynonymEntry {
    SynonymEntry { field, synonyms: words(synonyms) }
}

fn unit(unit: &str, multiplier: u64) -> MoneyUnit {
    MoneyUnit { unit: unit.to_string(), multiplier }
}

fn builtin_spec() -> LexiconSpec {
    use Field::{Attr, Deadline, Name};

    LexiconSpec {
        categories: vec![
            rule(Category::Player, 2, &[
                "име", "name", "възраст", "age", "позиция", "position", "вратар", "goalie",
                "защита", "defense", "атака", "attack", "goa", "def", "att", "sho", "spe", "str", "pas",
            ]),
            rule(Category::Market, 2, &["име", "name", "цена", "price", "cena", "оферта", "bid", "срок", "deadline"]),
            rule(Category::Youth, 2, &["име", "name", "възраст", "age", "потенциал", "potential", "талант", "talent"]),
            rule(Category::Finance, 1, &[
                "приход", "разход", "баланс", "заплат", "бюджет",
                "income", "expense", "budget", "salary", "balance",
            ]),
            rule(Category::Tactics, 1, &["тактика", "tactic", "формация", "formation", "стратегия", "strategy"]),
            rule(Category::Training, 1, &["train", "тренировка", "form", "condition", "кондиция"]),
            rule(Category::Generic, 0, &[]),
        ],
        synonyms: vec![
            syn(Name, &["име", "name", "meno", "играч"]),
            syn(Attr(A::Age), &["възраст", "age", "vek"]),
            syn(Attr(A::Goalkeeping), &["goa", "brána", "вратар"]),
            syn(Attr(A::Defense), &["def", "obrana", "защита"]),
            syn(Attr(A::Attack), &["att", "útok", "атака"]),
            syn(Attr(A::Shooting), &["sho", "streľba", "стрелба"]),
            syn(Attr(A::Passing), &["pas", "nahrávka", "подаване"]),
            syn(Attr(A::Strength), &["str", "sila", "сила"]),
            syn(Attr(A::Speed), &["spe", "rýchlosť", "скорост"]),
            syn(Attr(A::Discipline), &["dis", "sebaovládanie", "дисциплина"]),
            syn(Attr(A::Energy), &["energ", "енергия"]),
            syn(Attr(A::Form), &["форма", "form"]),
            syn(Attr(A::Quality), &["качество", "quality", "kvalita"]),
            syn(Attr(A::Potential), &["потенциал", "potential", "potenciál"]),
            syn(Attr(A::Price), &["цена", "price", "cena", "стойност", "value"]),
            syn(Deadline, &["срок", "deadline", "край", "termín"]),
        ],
        money_units: vec![
            unit("милиона", 1_000_000),
            unit("милион", 1_000_000),
            unit("млн", 1_000_000),
            unit("mil", 1_000_000),
            unit("m", 1_000_000),
            unit("хиляди", 1_000),
            unit("хил", 1_000),
            unit("tis", 1_000),
            unit("k", 1_000),
        ],
        finance_labels: words(&[
            "приход", "разход", "баланс", "заплат", "бюджет",
            "income", "expense", "budget", "salary", "balance",
        ]),
        standings_header_labels: words(&["име на отбора", "team name", "отбор", "team"]),
    }
}
