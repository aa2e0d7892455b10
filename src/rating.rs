// src/rating.rs
//! Position-weighted ratings and age-based potential.
//!
//! Potential bands close at 20, 23, 27 and 30 exclusive; the low band keeps age 33.
//!
//! Weights are kept in hundredths so the weighted sum and its divisor are exact
//! integers; two positions with the same weighted average compare equal and the
//! fixed priority order decides.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::entity::PlayerRecord;
use crate::model::{AttributeMap, CanonicalAttribute as A};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Goalkeeper,
    Defender,
    Center,
    Forward,
}

impl Position {
    /// Tie-break priority, highest first.
    pub const ALL: [Position; 4] = [Position::Goalkeeper, Position::Defender, Position::Center, Position::Forward];

    /// `(attribute, weight in hundredths)`; each table sums to 100.
    pub fn weights(self) -> &'static [(A, u32)] {
        match self {
            Position::Goalkeeper => &[(A::Goalkeeping, 60), (A::Speed, 30), (A::Passing, 10)],
            Position::Defender => &[(A::Defense, 40), (A::Strength, 25), (A::Speed, 15), (A::Passing, 10), (A::Attack, 10)],
            Position::Center => &[(A::Passing, 30), (A::Attack, 25), (A::Strength, 20), (A::Speed, 15), (A::Shooting, 10)],
            Position::Forward => &[(A::Attack, 30), (A::Shooting, 30), (A::Speed, 20), (A::Passing, 15), (A::Defense, 5)],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Position::Goalkeeper => "goalkeeper",
            Position::Defender => "defender",
            Position::Center => "center",
            Position::Forward => "forward",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PotentialBand {
    VeryHigh,
    High,
    Good,
    Medium,
    Low,
    VeryLow,
}

/// Weighted average over the weighted attributes present; 0.0 when none are.
/// Values above an attribute's range count as its maximum.
pub fn rate_attributes(attributes: &AttributeMap, position: Position) -> f64 {
    let (sum, weight) = position
        .weights()
        .iter()
        .filter_map(|&(a, w)| {
            let v = attributes.get(&a)?;
            let v = a.max_value().map_or(*v, |max| (*v).min(max));
            Some((v * u64::from(w), u64::from(w)))
        })
        .fold((0u64, 0u64), |(s, t), (vw, w)| (s + vw, t + w));

    if weight == 0 { 0.0 } else { sum as f64 / weight as f64 }
}

pub fn rate(record: &PlayerRecord, position: Position) -> f64 {
    rate_attributes(&record.attributes, position)
}

/// Highest-rated position; on equal ratings the earlier entry of [`Position::ALL`] wins.
pub fn best_position(record: &PlayerRecord) -> Position {
    best_of(&ratings(&record.attributes)).0
}

fn ratings(attributes: &AttributeMap) -> BTreeMap<Position, f64> {
    Position::ALL.iter().map(|&p| (p, rate_attributes(attributes, p))).collect()
}

fn best_of(ratings: &BTreeMap<Position, f64>) -> (Position, f64) {
    let mut best = (Position::Goalkeeper, f64::NEG_INFINITY);
    for p in Position::ALL {
        let r = ratings.get(&p).copied().unwrap_or(0.0);
        if r > best.1 {
            best = (p, r);
        }
    }
    best
}

pub fn potential_band(age: u64) -> PotentialBand {
    match age {
        0..20 => PotentialBand::VeryHigh,
        20..23 => PotentialBand::High,
        23..27 => PotentialBand::Good,
        27..30 => PotentialBand::Medium,
        30..=33 => PotentialBand::Low,
        _ => PotentialBand::VeryLow,
    }
}

/// A player record with its derived values. Built by [`annotate`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RatedPlayer {
    pub record: PlayerRecord,
    pub ratings: BTreeMap<Position, f64>,
    /// Rating at `best_position`.
    pub rating: f64,
    pub best_position: Position,
    pub potential: Option<PotentialBand>,
}

impl RatedPlayer {
    pub fn rating_at(&self, position: Position) -> f64 {
        self.ratings.get(&position).copied().unwrap_or(0.0)
    }
}

pub fn annotate(record: PlayerRecord) -> RatedPlayer {
    let ratings = ratings(&record.attributes);
    let (best_position, rating) = best_of(&ratings);
    let potential = record.age().map(potential_band);
    RatedPlayer { record, ratings, rating, best_position, potential }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Provenance;

    fn record(attrs: &[(A, u64)]) -> PlayerRecord {
        PlayerRecord {
            name: "X".into(),
            attributes: attrs.iter().copied().collect(),
            provenance: Provenance { table: 0, row: 1 },
        }
    }

    #[test]
    fn weights_sum_to_one() {
        for p in Position::ALL {
            assert_eq!(p.weights().iter().map(|(_, w)| w).sum::<u32>(), 100, "{p}");
        }
    }

    #[test]
    fn forward_rating_renormalizes_over_present_weights() {
        let r = record(&[(A::Age, 24), (A::Attack, 70), (A::Defense, 40)]);
        let fwd = rate(&r, Position::Forward);
        assert!((fwd - 65.714_285).abs() < 1e-4);
        assert_eq!(fwd.round(), 66.0);
    }

    #[test]
    fn zero_exactly_when_nothing_weighted_is_present() {
        let r = record(&[(A::Age, 30), (A::Form, 80)]);
        for p in Position::ALL {
            assert_eq!(rate(&r, p), 0.0);
        }
        // goalkeeping carries no forward weight
        let r = record(&[(A::Goalkeeping, 90)]);
        assert_eq!(rate(&r, Position::Forward), 0.0);
        assert_eq!(rate(&r, Position::Goalkeeper), 90.0);
    }

    #[test]
    fn ratings_stay_in_range() {
        let all_max: Vec<(A, u64)> = A::PRIMARY.iter().map(|&a| (a, 100)).collect();
        let r = record(&all_max);
        for p in Position::ALL {
            let v = rate(&r, p);
            assert!((0.0..=100.0).contains(&v));
            assert_eq!(v, 100.0);
        }
    }

    #[test]
    fn out_of_range_values_rate_as_maximum() {
        let r = record(&[(A::Goalkeeping, u64::MAX), (A::Speed, 100), (A::Passing, 100)]);
        assert_eq!(rate(&r, Position::Goalkeeper), 100.0);
        let r = record(&[(A::Attack, 250), (A::Shooting, 50)]);
        assert_eq!(rate(&r, Position::Forward), 75.0);
    }

    #[test]
    fn goalkeeper_wins_ties() {
        // speed only: every position rates it 57
        let r = record(&[(A::Speed, 57)]);
        assert_eq!(best_position(&r), Position::Goalkeeper);
        // equal goalkeeper/defender through different attributes
        let r = record(&[(A::Goalkeeping, 60), (A::Defense, 60)]);
        assert_eq!(rate(&r, Position::Goalkeeper), rate(&r, Position::Defender));
        assert_eq!(best_position(&r), Position::Goalkeeper);
        // no attributes at all
        assert_eq!(best_position(&record(&[])), Position::Goalkeeper);
    }

    #[test]
    fn best_position_picks_argmax() {
        let r = record(&[(A::Attack, 90), (A::Shooting, 90), (A::Defense, 20), (A::Goalkeeping, 10)]);
        assert_eq!(best_position(&r), Position::Center);
        let r = record(&[(A::Shooting, 90), (A::Speed, 80)]);
        assert_eq!(best_position(&r), Position::Forward);
    }

    #[test]
    fn age_breakpoints() {
        assert_eq!(potential_band(19), PotentialBand::VeryHigh);
        assert_eq!(potential_band(20), PotentialBand::High);
        assert_eq!(potential_band(22), PotentialBand::High);
        assert_eq!(potential_band(23), PotentialBand::Good);
        assert_eq!(potential_band(27), PotentialBand::Medium);
        assert_eq!(potential_band(30), PotentialBand::Low);
        assert_eq!(potential_band(33), PotentialBand::Low);
        assert_eq!(potential_band(34), PotentialBand::VeryLow);
    }

    #[test]
    fn annotate_derives_without_touching_the_record() {
        let r = record(&[(A::Age, 21), (A::Defense, 80), (A::Strength, 70), (A::Speed, 50)]);
        let rated = annotate(r.clone());
        assert_eq!(rated.record, r);
        assert_eq!(rated.best_position, Position::Defender);
        assert_eq!(rated.rating, rated.rating_at(Position::Defender));
        assert_eq!(rated.potential, Some(PotentialBand::High));
        assert_eq!(annotate(record(&[])).potential, None);
    }
}
