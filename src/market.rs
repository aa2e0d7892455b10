// src/market.rs
//! Transfer-market opportunity scoring and recommendation tags.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::config::consts::{
    AGE_FACTOR_FLOOR, AGE_FACTOR_PIVOT, MIN_OPPORTUNITY_SCORE, NEUTRAL_AGE_FACTOR, PRICE_UNIT, TOP_OPPORTUNITIES,
};
use crate::entity::MarketListing;
use crate::rating::{annotate, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    YoungTalent,
    OverpricedVeteran,
    Bargain,
    ProvenQuality,
    Prospect,
    ShortTermCover,
    SquadDepth,
}

impl Recommendation {
    pub fn as_str(self) -> &'static str {
        match self {
            Recommendation::YoungTalent => "young talent",
            Recommendation::OverpricedVeteran => "overpriced veteran",
            Recommendation::Bargain => "bargain",
            Recommendation::ProvenQuality => "proven quality",
            Recommendation::Prospect => "prospect",
            Recommendation::ShortTermCover => "short-term cover",
            Recommendation::SquadDepth => "squad depth",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// What the recommendation rules look at. Absent age or price fails any test on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ListingFacts {
    pub rating: f64,
    pub price: Option<u64>,
    pub age: Option<u64>,
}

type Rule = (Recommendation, fn(&ListingFacts) -> bool);

/// Evaluated top to bottom; the first rule that holds names the listing.
pub const RULES: &[Rule] = &[
    (Recommendation::YoungTalent, |f| f.age.is_some_and(|a| a < 22) && f.rating > 50.0),
    (Recommendation::OverpricedVeteran, |f| f.age.is_some_and(|a| a > 32) && f.price.is_some_and(|p| p > 20_000_000)),
    (Recommendation::Bargain, |f| f.rating > 60.0 && f.price.is_some_and(|p| p < 5_000_000)),
    (Recommendation::ProvenQuality, |f| f.rating > 70.0),
    (Recommendation::Prospect, |f| f.age.is_some_and(|a| a < 24)),
    (Recommendation::ShortTermCover, |f| f.age.is_some_and(|a| a > 30)),
    (Recommendation::SquadDepth, |_| true),
];

pub fn recommend(facts: &ListingFacts) -> Recommendation {
    RULES
        .iter()
        .find(|(_, holds)| holds(facts))
        .map_or(Recommendation::SquadDepth, |(tag, _)| *tag)
}

/// Rating points per million of asking price; `None` without a positive price.
pub fn value_ratio(rating: f64, price: Option<u64>) -> Option<f64> {
    match price {
        Some(p) if p > 0 => Some(rating / (p as f64 / PRICE_UNIT)),
        _ => None,
    }
}

/// Younger players carry more resale value; the factor never drops under the floor.
pub fn age_factor(age: Option<u64>) -> f64 {
    match age {
        Some(a) => ((AGE_FACTOR_PIVOT - a as f64) / 10.0).max(AGE_FACTOR_FLOOR),
        None => NEUTRAL_AGE_FACTOR,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Opportunity {
    pub listing: MarketListing,
    pub rating: f64,
    pub best_position: Position,
    pub value_ratio: f64,
    pub age_factor: f64,
    pub score: f64,
    pub recommendation: Recommendation,
}

/// Score one listing at a given rating. `None` when the price rules out a ratio.
pub fn score_listing(listing: &MarketListing, rating: f64, best_position: Position) -> Option<Opportunity> {
    let value_ratio = value_ratio(rating, listing.asking_price)?;
    let age = listing.player.age();
    let age_factor = age_factor(age);
    let facts = ListingFacts { rating, price: listing.asking_price, age };
    Some(Opportunity {
        listing: listing.clone(),
        rating,
        best_position,
        value_ratio,
        age_factor,
        score: value_ratio * age_factor,
        recommendation: recommend(&facts),
    })
}

/// Rate, score and rank a page's listings: score above the cut, best first, at most ten.
pub fn rank_opportunities(listings: &[MarketListing]) -> Vec<Opportunity> {
    let mut out: Vec<Opportunity> = listings
        .iter()
        .filter_map(|l| {
            let rated = annotate(l.player.clone());
            score_listing(l, rated.rating, rated.best_position)
        })
        .filter(|o| o.score > MIN_OPPORTUNITY_SCORE)
        .collect();

    out.sort_by(by_score_desc);
    out.truncate(TOP_OPPORTUNITIES);
    out
}

fn by_score_desc(a: &Opportunity, b: &Opportunity) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.listing.player.name.cmp(&b.listing.player.name))
        .then_with(|| a.listing.player.provenance.cmp(&b.listing.player.provenance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::PlayerRecord;
    use crate::model::{AttributeMap, CanonicalAttribute as A, Provenance};

    fn listing(name: &str, row: usize, attrs: &[(A, u64)], price: Option<u64>) -> MarketListing {
        MarketListing {
            player: PlayerRecord {
                name: name.into(),
                attributes: attrs.iter().copied().collect::<AttributeMap>(),
                provenance: Provenance { table: 0, row },
            },
            asking_price: price,
            bidding_deadline: None,
        }
    }

    fn facts(rating: f64, price: Option<u64>, age: Option<u64>) -> ListingFacts {
        ListingFacts { rating, price, age }
    }

    #[test]
    fn young_talent_scenario() {
        let l = listing("Novak", 1, &[(A::Age, 21)], Some(10_000_000));
        let o = score_listing(&l, 60.0, Position::Forward).unwrap();
        assert!((o.value_ratio - 6.0).abs() < 1e-9);
        assert!((o.age_factor - 1.4).abs() < 1e-9);
        assert!((o.score - 8.4).abs() < 1e-9);
        assert_eq!(o.recommendation, Recommendation::YoungTalent);
    }

    #[test]
    fn zero_or_missing_price_is_excluded() {
        assert_eq!(value_ratio(60.0, Some(0)), None);
        assert_eq!(value_ratio(60.0, None), None);
        let ls = vec![
            listing("Free", 1, &[(A::Attack, 90)], Some(0)),
            listing("Unknown", 2, &[(A::Attack, 90)], None),
        ];
        assert!(rank_opportunities(&ls).is_empty());
    }

    #[test]
    fn score_of_exactly_five_is_cut() {
        let even: Vec<(A, u64)> = A::PRIMARY.iter().map(|&a| (a, 50)).chain([(A::Age, 25)]).collect();
        let l = listing("Edge", 1, &even, Some(10_000_000));
        let o = score_listing(&l, annotate(l.player.clone()).rating, Position::Goalkeeper).unwrap();
        assert_eq!(o.score, 5.0);
        assert!(rank_opportunities(&[l]).is_empty());
    }

    #[test]
    fn price_of_one_gives_a_large_finite_ratio() {
        let r = value_ratio(60.0, Some(1)).unwrap();
        assert!(r.is_finite());
        assert!((r - 60_000_000.0).abs() < 1e-3);

        let l = listing("Cheap", 1, &[(A::Age, 25), (A::Attack, 60)], Some(1));
        let ranked = rank_opportunities(&[l]);
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].score.is_finite());
    }

    #[test]
    fn age_factor_floor_and_neutral() {
        assert_eq!(age_factor(None), 1.0);
        assert_eq!(age_factor(Some(25)), 1.0);
        assert_eq!(age_factor(Some(31)), 0.5);
        assert_eq!(age_factor(Some(40)), 0.5);
        assert!((age_factor(Some(18)) - 1.7).abs() < 1e-9);
    }

    #[test]
    fn rules_fire_in_order() {
        assert_eq!(recommend(&facts(55.0, Some(1), Some(21))), Recommendation::YoungTalent);
        assert_eq!(recommend(&facts(90.0, Some(25_000_000), Some(33))), Recommendation::OverpricedVeteran);
        assert_eq!(recommend(&facts(65.0, Some(4_000_000), Some(28))), Recommendation::Bargain);
        assert_eq!(recommend(&facts(75.0, Some(9_000_000), Some(28))), Recommendation::ProvenQuality);
        assert_eq!(recommend(&facts(40.0, Some(9_000_000), Some(21))), Recommendation::Prospect);
        assert_eq!(recommend(&facts(40.0, Some(9_000_000), Some(31))), Recommendation::ShortTermCover);
        assert_eq!(recommend(&facts(40.0, Some(9_000_000), Some(27))), Recommendation::SquadDepth);
    }

    #[test]
    fn absent_age_or_price_fails_their_rules() {
        assert_eq!(recommend(&facts(55.0, Some(1), None)), Recommendation::SquadDepth);
        assert_eq!(recommend(&facts(65.0, None, Some(28))), Recommendation::SquadDepth);
        assert_eq!(recommend(&facts(75.0, None, None)), Recommendation::ProvenQuality);
    }

    #[test]
    fn ranking_cuts_sorts_and_truncates() {
        // attack-only players rate their attack at center and forward
        let mut ls: Vec<MarketListing> = (0..12)
            .map(|i| listing(&format!("P{i:02}"), i, &[(A::Age, 25), (A::Attack, 60)], Some(1_000_000 + i as u64 * 100_000)))
            .collect();
        ls.push(listing("Weak", 20, &[(A::Age, 25), (A::Attack, 10)], Some(10_000_000)));
        let ranked = rank_opportunities(&ls);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].listing.player.name, "P00");
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(ranked.iter().all(|o| o.score > 5.0));
    }

    #[test]
    fn equal_scores_order_by_name_then_provenance() {
        let a = listing("B", 2, &[(A::Attack, 60)], Some(1_000_000));
        let b = listing("A", 5, &[(A::Attack, 60)], Some(1_000_000));
        let c = listing("A", 3, &[(A::Attack, 60)], Some(1_000_000));
        let ranked = rank_opportunities(&[a, b, c]);
        let order: Vec<(String, usize)> = ranked
            .iter()
            .map(|o| (o.listing.player.name.clone(), o.listing.player.provenance.row))
            .collect();
        assert_eq!(order, vec![("A".into(), 3), ("A".into(), 5), ("B".into(), 2)]);
    }
}
