// src/tactics.rs
//! Tactical vocabulary shared by the opponent and squad planners.

use std::fmt;

use serde::Serialize;

/// Specializations the planners pick from, plus `Flexible` for "no fixed choice".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialization {
    HuraSystem,
    CounterAttacks,
    Forechecking,
    ShortPasses,
    Flexible,
}

impl Specialization {
    pub fn as_str(self) -> &'static str {
        match self {
            Specialization::HuraSystem => "hura_system",
            Specialization::CounterAttacks => "counter_attacks",
            Specialization::Forechecking => "forechecking",
            Specialization::ShortPasses => "short_passes",
            Specialization::Flexible => "flexible",
        }
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Overall posture of a plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Aggressive,
    Offensive,
    Balanced,
    Defensive,
}

/// Line-up shape as the game writes it, e.g. `1-3-2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Formation {
    #[serde(rename = "1-2-3")]
    OneTwoThree,
    #[serde(rename = "1-3-2")]
    OneThreeTwo,
    #[serde(rename = "1-4-1")]
    OneFourOne,
}

impl Formation {
    pub fn as_str(self) -> &'static str {
        match self {
            Formation::OneTwoThree => "1-2-3",
            Formation::OneThreeTwo => "1-3-2",
            Formation::OneFourOne => "1-4-1",
        }
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}
