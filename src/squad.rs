// src/squad.rs
//! Own-squad analysis: summary, line-up, depth and a general plan.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::consts::{COMPETITIVE_ABOVE, ELITE_ABOVE, VETERAN_ABOVE, YOUNG_BELOW};
use crate::model::Provenance;
use crate::opponent::{OpponentProfile, Tendency};
use crate::rating::{Position, RatedPlayer};
use crate::tactics::{Formation, Specialization, Style};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Character {
    Elite,
    Competitive,
    Developing,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgeProfile {
    pub average: f64,
    pub min: u64,
    pub max: u64,
    pub young: usize,
    pub veterans: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SquadSummary {
    pub count: usize,
    /// Mean best-position rating over players that have one.
    pub average_rating: f64,
    pub positions: BTreeMap<Position, usize>,
    pub ages: Option<AgeProfile>,
    pub character: Character,
}

pub fn character(average_rating: f64) -> Character {
    if average_rating > ELITE_ABOVE {
        Character::Elite
    } else if average_rating > COMPETITIVE_ABOVE {
        Character::Competitive
    } else {
        Character::Developing
    }
}

pub fn summarize(players: &[RatedPlayer]) -> SquadSummary {
    let rated: Vec<f64> = players.iter().map(|p| p.rating).filter(|&r| r > 0.0).collect();
    let average_rating = if rated.is_empty() { 0.0 } else { rated.iter().sum::<f64>() / rated.len() as f64 };

    let mut positions: BTreeMap<Position, usize> = BTreeMap::new();
    for p in players {
        *positions.entry(p.best_position).or_default() += 1;
    }

    let ages: Vec<u64> = players.iter().filter_map(|p| p.record.age()).collect();
    let ages = match (ages.iter().min(), ages.iter().max()) {
        (Some(&min), Some(&max)) => Some(AgeProfile {
            average: ages.iter().sum::<u64>() as f64 / ages.len() as f64,
            min,
            max,
            young: ages.iter().filter(|&&a| a < YOUNG_BELOW).count(),
            veterans: ages.iter().filter(|&&a| a > VETERAN_ABOVE).count(),
        }),
        _ => None,
    };

    SquadSummary { count: players.len(), average_rating, positions, ages, character: character(average_rating) }
}

/* ---------- line-up ---------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineupSlot {
    pub name: String,
    pub provenance: Provenance,
    pub rating: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Lineup {
    pub goalkeeper: Option<LineupSlot>,
    pub defenders: Vec<LineupSlot>,
    pub centers: Vec<LineupSlot>,
    pub forwards: Vec<LineupSlot>,
}

impl Lineup {
    pub const SHAPE: [(Position, usize); 4] =
        [(Position::Goalkeeper, 1), (Position::Defender, 4), (Position::Center, 2), (Position::Forward, 4)];

    pub fn len(&self) -> usize {
        usize::from(self.goalkeeper.is_some()) + self.defenders.len() + self.centers.len() + self.forwards.len()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// Fill goalkeeper, defenders, centers, forwards in that order, best per-position
/// rating first. Nobody is picked twice.
pub fn select_lineup(players: &[RatedPlayer]) -> Lineup {
    let mut used = vec![false; players.len()];
    let mut lineup = Lineup::default();

    for (position, wanted) in Lineup::SHAPE {
        let mut pool: Vec<usize> = (0..players.len()).filter(|&i| !used[i]).collect();
        pool.sort_by(|&a, &b| by_rating_at(&players[a], &players[b], position));

        let picked: Vec<LineupSlot> = pool
            .into_iter()
            .take(wanted)
            .map(|i| {
                used[i] = true;
                let p = &players[i];
                LineupSlot { name: p.record.name.clone(), provenance: p.record.provenance, rating: p.rating_at(position) }
            })
            .collect();

        match position {
            Position::Goalkeeper => lineup.goalkeeper = picked.into_iter().next(),
            Position::Defender => lineup.defenders = picked,
            Position::Center => lineup.centers = picked,
            Position::Forward => lineup.forwards = picked,
        }
    }
    lineup
}

fn by_rating_at(a: &RatedPlayer, b: &RatedPlayer, position: Position) -> Ordering {
    b.rating_at(position)
        .total_cmp(&a.rating_at(position))
        .then_with(|| a.record.name.cmp(&b.record.name))
        .then_with(|| a.record.provenance.cmp(&b.record.provenance))
}

/* ---------- depth ---------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DepthLine {
    pub position: Position,
    pub needed: usize,
    pub available: usize,
    pub shortfall: usize,
}

/// Players a full rotation wants per best position.
pub fn squad_needs(position: Position) -> usize {
    match position {
        Position::Goalkeeper => 2,
        Position::Defender => 6,
        Position::Center => 4,
        Position::Forward => 8,
    }
}

pub fn depth_report(summary: &SquadSummary) -> Vec<DepthLine> {
    Position::ALL
        .iter()
        .map(|&position| {
            let needed = squad_needs(position);
            let available = summary.positions.get(&position).copied().unwrap_or(0);
            DepthLine { position, needed, available, shortfall: needed.saturating_sub(available) }
        })
        .collect()
}

/* ---------- plans ---------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GeneralPlan {
    pub style: Style,
    pub formation: Formation,
    pub specialization: Specialization,
}

pub fn general_plan(average_rating: f64) -> GeneralPlan {
    if average_rating > 65.0 {
        GeneralPlan { style: Style::Aggressive, formation: Formation::OneTwoThree, specialization: Specialization::Forechecking }
    } else if average_rating > 50.0 {
        GeneralPlan { style: Style::Balanced, formation: Formation::OneThreeTwo, specialization: Specialization::ShortPasses }
    } else {
        GeneralPlan { style: Style::Defensive, formation: Formation::OneFourOne, specialization: Specialization::CounterAttacks }
    }
}

/// Opponent tendency decides first; an elite squad forechecks; otherwise no fixed system.
pub fn choose_specialization(summary: &SquadSummary, opponent: Option<&OpponentProfile>) -> Specialization {
    match opponent.map(|o| o.tactical_tendency) {
        Some(Tendency::Offensive) => Specialization::CounterAttacks,
        Some(Tendency::Defensive) => Specialization::ShortPasses,
        _ if summary.character == Character::Elite => Specialization::Forechecking,
        _ => Specialization::HuraSystem,
    }
}
