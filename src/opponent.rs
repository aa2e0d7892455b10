// src/opponent.rs
//! Opponent strength, tendency and match advice from a standings row.
//!
//! Everything here is a fixed rule over three numbers (place, goals for,
//! goals against). The tag tables below are the whole policy.

use std::fmt;

use serde::Serialize;

use crate::config::consts::{
    BASE_STRENGTH, BOTTOM_PLACES_AFTER, LEAGUE_SIZE_PIVOT, STRENGTH_PER_PLACE, TENDENCY_MARGIN, TOP_PLACES,
    WIN_PROB_MAX, WIN_PROB_MIN, WIN_PROB_SLOPE,
};
use crate::standings::{find_team, StandingsRow};
use crate::tactics::{Specialization, Style};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tendency {
    Offensive,
    Defensive,
    Balanced,
    Unknown,
}

impl Tendency {
    pub fn as_str(self) -> &'static str {
        match self {
            Tendency::Offensive => "offensive",
            Tendency::Defensive => "defensive",
            Tendency::Balanced => "balanced",
            Tendency::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Tendency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthTag {
    StrongAttack,
    SolidDefence,
    TopOfTheLeague,
    ExperiencedPlayers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaknessTag {
    VulnerableToCounterAttacks,
    WeakInAttackAndFinishing,
    WeakOverall,
    InexperiencedPlayers,
}

impl StrengthTag {
    pub fn as_str(self) -> &'static str {
        match self {
            StrengthTag::StrongAttack => "strong attack",
            StrengthTag::SolidDefence => "solid defence",
            StrengthTag::TopOfTheLeague => "top of the league",
            StrengthTag::ExperiencedPlayers => "experienced players",
        }
    }
}

impl WeaknessTag {
    pub fn as_str(self) -> &'static str {
        match self {
            WeaknessTag::VulnerableToCounterAttacks => "vulnerable to counter-attacks",
            WeaknessTag::WeakInAttackAndFinishing => "weak in attack and finishing",
            WeaknessTag::WeakOverall => "weak overall",
            WeaknessTag::InexperiencedPlayers => "inexperienced players",
        }
    }
}

/* ---------- rules ---------- */

/// 50 plus 2.5 per place above 20th, within [0, 100]; 50 for an unknown place.
pub fn strength_rating(position: Option<u32>) -> f64 {
    let bonus = position.map_or(0.0, |p| ((LEAGUE_SIZE_PIVOT - f64::from(p)) * STRENGTH_PER_PLACE).max(0.0));
    (BASE_STRENGTH + bonus).clamp(0.0, 100.0)
}

pub fn tendency(goals_for: Option<u32>, goals_against: Option<u32>) -> Tendency {
    let (Some(gf), Some(ga)) = (goals_for, goals_against) else {
        return Tendency::Unknown;
    };
    let (gf, ga) = (f64::from(gf), f64::from(ga));
    if gf > ga * TENDENCY_MARGIN {
        Tendency::Offensive
    } else if ga > gf * TENDENCY_MARGIN {
        Tendency::Defensive
    } else {
        Tendency::Balanced
    }
}

pub fn win_probability(our_strength: f64, their_strength: f64) -> f64 {
    (50.0 + (our_strength - their_strength) * WIN_PROB_SLOPE).clamp(WIN_PROB_MIN, WIN_PROB_MAX)
}

/// Tendency tags first, then league-position tags.
pub fn strengths(tendency: Tendency, position: Option<u32>) -> Vec<StrengthTag> {
    let mut out = Vec::new();
    match tendency {
        Tendency::Offensive => out.push(StrengthTag::StrongAttack),
        Tendency::Defensive => out.push(StrengthTag::SolidDefence),
        Tendency::Balanced | Tendency::Unknown => {}
    }
    if position.is_some_and(|p| p <= TOP_PLACES) {
        out.extend([StrengthTag::TopOfTheLeague, StrengthTag::ExperiencedPlayers]);
    }
    out
}

/// Tendency tags first, then league-position tags.
pub fn weaknesses(tendency: Tendency, position: Option<u32>) -> Vec<WeaknessTag> {
    let mut out = Vec::new();
    match tendency {
        Tendency::Offensive => out.push(WeaknessTag::VulnerableToCounterAttacks),
        Tendency::Defensive => out.push(WeaknessTag::WeakInAttackAndFinishing),
        Tendency::Balanced | Tendency::Unknown => {}
    }
    if position.is_some_and(|p| p > BOTTOM_PLACES_AFTER) {
        out.extend([WeaknessTag::WeakOverall, WeaknessTag::InexperiencedPlayers]);
    }
    out
}

/* ---------- profile ---------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OpponentProfile {
    pub name: String,
    pub standing_position: Option<u32>,
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
    pub strength_rating: f64,
    pub tactical_tendency: Tendency,
    pub strengths: Vec<StrengthTag>,
    pub weaknesses: Vec<WeaknessTag>,
    pub win_probability: f64,
}

/// Profile a team from its standings row; `None` means no standings data.
pub fn profile(name: &str, row: Option<&StandingsRow>, our_strength: f64) -> OpponentProfile {
    let position = row.and_then(|r| r.position);
    let goals_for = row.and_then(|r| r.goals_for);
    let goals_against = row.and_then(|r| r.goals_against);

    let strength_rating = strength_rating(position);
    let tactical_tendency = tendency(goals_for, goals_against);

    OpponentProfile {
        name: name.to_string(),
        standing_position: position,
        goals_for,
        goals_against,
        strength_rating,
        tactical_tendency,
        strengths: strengths(tactical_tendency, position),
        weaknesses: weaknesses(tactical_tendency, position),
        win_probability: win_probability(our_strength, strength_rating),
    }
}

/// Look the team up in `rows` and profile it; an unlisted team gets the neutral profile.
pub fn profile_in_standings(name: &str, rows: &[StandingsRow], our_strength: f64) -> OpponentProfile {
    let row = find_team(rows, name);
    if row.is_none() {
        logd!("opponent {name:?} not in standings; neutral profile");
    }
    profile(name, row, our_strength)
}

/* ---------- counter plan ---------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    CounterAttacks,
    BreakDefense,
    Adapt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CounterPlan {
    pub formation: Style,
    pub focus: Focus,
    pub specialization: Specialization,
}

pub fn counter_plan(tendency: Tendency) -> CounterPlan {
    match tendency {
        Tendency::Offensive => CounterPlan {
            formation: Style::Defensive,
            focus: Focus::CounterAttacks,
            specialization: Specialization::CounterAttacks,
        },
        Tendency::Defensive => CounterPlan {
            formation: Style::Offensive,
            focus: Focus::BreakDefense,
            specialization: Specialization::ShortPasses,
        },
        Tendency::Balanced | Tendency::Unknown => CounterPlan {
            formation: Style::Balanced,
            focus: Focus::Adapt,
            specialization: Specialization::Flexible,
        },
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Instruction {
    AttackAggressively,
    DefendSteadily,
    PlayCompact,
    BePatient,
    PlayWithConfidence,
    GiveEverything,
}

impl Instruction {
    pub fn as_str(self) -> &'static str {
        match self {
            Instruction::AttackAggressively => "attack aggressively, their defence is exposed",
            Instruction::DefendSteadily => "defend steadily, their attack is weak",
            Instruction::PlayCompact => "play compact against a strong attack",
            Instruction::BePatient => "be patient against a solid defence",
            Instruction::PlayWithConfidence => "good odds, play with confidence",
            Instruction::GiveEverything => "hard opponent, give everything",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Weakness advice, then strength warnings, then a word on the odds.
pub fn match_instructions(profile: &OpponentProfile) -> Vec<Instruction> {
    let mut out: Vec<Instruction> = profile
        .weaknesses
        .iter()
        .filter_map(|w| match w {
            WeaknessTag::VulnerableToCounterAttacks => Some(Instruction::AttackAggressively),
            WeaknessTag::WeakInAttackAndFinishing => Some(Instruction::DefendSteadily),
            WeaknessTag::WeakOverall | WeaknessTag::InexperiencedPlayers => None,
        })
        .collect();

    out.extend(profile.strengths.iter().filter_map(|s| match s {
        StrengthTag::StrongAttack => Some(Instruction::PlayCompact),
        StrengthTag::SolidDefence => Some(Instruction::BePatient),
        StrengthTag::TopOfTheLeague | StrengthTag::ExperiencedPlayers => None,
    }));

    if profile.win_probability > 70.0 {
        out.push(Instruction::PlayWithConfidence);
    } else if profile.win_probability < 30.0 {
        out.push(Instruction::GiveEverything);
    }
    out
}
