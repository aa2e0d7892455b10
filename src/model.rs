// src/model.rs
//! Closed vocabularies shared by every stage.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// What a table is judged to contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Player,
    Market,
    Youth,
    Finance,
    Tactics,
    Training,
    Generic,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Player,
        Category::Market,
        Category::Youth,
        Category::Finance,
        Category::Tactics,
        Category::Training,
        Category::Generic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Player => "player",
            Category::Market => "market",
            Category::Youth => "youth",
            Category::Finance => "finance",
            Category::Tactics => "tactics",
            Category::Training => "training",
            Category::Generic => "generic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// The only keys an attribute map may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalAttribute {
    Goalkeeping,
    Defense,
    Attack,
    Shooting,
    Passing,
    Strength,
    Speed,
    Discipline,
    Age,
    Energy,
    Form,
    Price,
    Quality,
    Potential,
}

impl CanonicalAttribute {
    /// The eight skills the position weights are defined over.
    pub const PRIMARY: [CanonicalAttribute; 8] = [
        CanonicalAttribute::Goalkeeping,
        CanonicalAttribute::Defense,
        CanonicalAttribute::Attack,
        CanonicalAttribute::Shooting,
        CanonicalAttribute::Passing,
        CanonicalAttribute::Strength,
        CanonicalAttribute::Speed,
        CanonicalAttribute::Discipline,
    ];

    /// Inclusive upper bound; `None` for unbounded (price).
    pub fn max_value(self) -> Option<u64> {
        match self {
            CanonicalAttribute::Age => Some(60),
            CanonicalAttribute::Price => None,
            _ => Some(100),
        }
    }

    pub fn in_range(self, v: u64) -> bool {
        self.max_value().is_none_or(|max| v <= max)
    }

    /// Money columns are read with thousands separators and units.
    pub fn is_money(self) -> bool { self == CanonicalAttribute::Price }

    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalAttribute::Goalkeeping => "goalkeeping",
            CanonicalAttribute::Defense => "defense",
            CanonicalAttribute::Attack => "attack",
            CanonicalAttribute::Shooting => "shooting",
            CanonicalAttribute::Passing => "passing",
            CanonicalAttribute::Strength => "strength",
            CanonicalAttribute::Speed => "speed",
            CanonicalAttribute::Discipline => "discipline",
            CanonicalAttribute::Age => "age",
            CanonicalAttribute::Energy => "energy",
            CanonicalAttribute::Form => "form",
            CanonicalAttribute::Price => "price",
            CanonicalAttribute::Quality => "quality",
            CanonicalAttribute::Potential => "potential",
        }
    }
}

impl fmt::Display for CanonicalAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// A header's destination slot: two text slots plus the attribute set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Deadline,
    #[serde(untagged)]
    Attr(CanonicalAttribute),
}

impl Field {
    pub fn attribute(self) -> Option<CanonicalAttribute> {
        match self {
            Field::Attr(a) => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => f.write_str("name"),
            Field::Deadline => f.write_str("deadline"),
            Field::Attr(a) => a.fmt(f),
        }
    }
}

/// Ordered so iteration (and serialization) is stable.
pub type AttributeMap = BTreeMap<CanonicalAttribute, u64>;

/// Where a record came from inside its page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Provenance {
    pub table: usize,
    pub row: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges() {
        assert!(CanonicalAttribute::Attack.in_range(100));
        assert!(!CanonicalAttribute::Attack.in_range(101));
        assert!(CanonicalAttribute::Age.in_range(60));
        assert!(!CanonicalAttribute::Age.in_range(61));
        assert!(CanonicalAttribute::Price.in_range(u64::MAX));
    }

    #[test]
    fn field_serde_names() {
        let f: Field = serde_json::from_str("\"name\"").unwrap();
        assert_eq!(f, Field::Name);
        let f: Field = serde_json::from_str("\"shooting\"").unwrap();
        assert_eq!(f, Field::Attr(CanonicalAttribute::Shooting));
        assert_eq!(serde_json::to_string(&Field::Attr(CanonicalAttribute::Age)).unwrap(), "\"age\"");
        assert!(serde_json::from_str::<Field>("\"nickname\"").is_err());
    }
}
