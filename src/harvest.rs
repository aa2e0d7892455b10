// src/harvest.rs
//! Run-level collection of page passes.
//!
//! `Harvest` is the only owner of cross-page results and `absorb` is its only
//! mutator; passes are absorbed in page order after the parallel stage, so a
//! run reads the same every time.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::consts::LEAGUE_SCAN_LIMIT;
use crate::entity::{Entity, FinanceItem, GenericRecord, MarketListing, StatItem};
use crate::market::{rank_opportunities, Opportunity};
use crate::opponent::{
    counter_plan, match_instructions, profile, profile_in_standings, CounterPlan, Instruction, OpponentProfile,
};
use crate::pipeline::{PagePass, PassStats};
use crate::rating::{annotate, RatedPlayer};
use crate::source::PageKind;
use crate::squad::{
    choose_specialization, depth_report, general_plan, select_lineup, summarize, DepthLine, GeneralPlan, Lineup,
    SquadSummary,
};
use crate::standings::StandingsRow;
use crate::tactics::Specialization;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Harvest {
    pages: BTreeMap<PageKind, PassStats>,
    missing: Vec<PageKind>,
    players: Vec<RatedPlayer>,
    youth: Vec<RatedPlayer>,
    listings: Vec<MarketListing>,
    finance: Vec<FinanceItem>,
    statistics: Vec<StatItem>,
    records: Vec<GenericRecord>,
    standings: Vec<StandingsRow>,
}

impl Harvest {
    pub fn new() -> Self { Self::default() }

    pub fn from_passes(passes: impl IntoIterator<Item = PagePass>) -> Self {
        let mut h = Self::new();
        passes.into_iter().for_each(|p| h.absorb(p));
        h
    }

    pub fn absorb(&mut self, pass: PagePass) {
        if pass.missing {
            self.missing.push(pass.page);
        }
        self.pages.entry(pass.page).or_default().add(&pass.stats);

        for entity in pass.entities {
            match entity {
                Entity::Player(p) => self.players.push(annotate(p)),
                Entity::Youth(p) => self.youth.push(annotate(p)),
                Entity::Listing(l) => self.listings.push(l),
                Entity::Finance(f) => self.finance.push(f),
                Entity::Stat(s) => self.statistics.push(s),
                Entity::Generic(g) => self.records.push(g),
            }
        }
        for row in pass.standings {
            if !self.standings.iter().any(|s| s.team == row.team) {
                self.standings.push(row);
            }
        }
    }

    pub fn players(&self) -> &[RatedPlayer] { &self.players }
    pub fn youth(&self) -> &[RatedPlayer] { &self.youth }
    pub fn listings(&self) -> &[MarketListing] { &self.listings }
    pub fn finance(&self) -> &[FinanceItem] { &self.finance }
    pub fn statistics(&self) -> &[StatItem] { &self.statistics }
    pub fn records(&self) -> &[GenericRecord] { &self.records }
    pub fn standings(&self) -> &[StandingsRow] { &self.standings }
    pub fn missing(&self) -> &[PageKind] { &self.missing }
    pub fn page_stats(&self) -> &BTreeMap<PageKind, PassStats> { &self.pages }

    pub fn totals(&self) -> PassStats {
        let mut t = PassStats::default();
        self.pages.values().for_each(|s| t.add(s));
        t
    }

    pub fn opportunities(&self) -> Vec<Opportunity> { rank_opportunities(&self.listings) }

    pub fn squad(&self) -> SquadSummary { summarize(&self.players) }

    pub fn opponent(&self, name: &str, our_strength: f64) -> OpponentProfile {
        profile_in_standings(name, &self.standings, our_strength)
    }

    /// The first `limit` teams of the standings, profiled in table order.
    pub fn league_opponents(&self, limit: usize, our_strength: f64) -> Vec<OpponentProfile> {
        let out: Vec<OpponentProfile> = self
            .standings
            .iter()
            .take(limit)
            .map(|row| profile(&row.team, Some(row), our_strength))
            .collect();
        logf!("league scan: {} of {} team(s) profiled", out.len(), self.standings.len());
        out
    }

    /// Everything derived from the run in one serializable value.
    pub fn report(&self, opponent: Option<&str>, our_strength: f64) -> RunReport {
        let squad = self.squad();
        let opponent = opponent.map(|name| self.match_plan(name, &squad, our_strength));
        RunReport {
            missing_pages: self.missing.clone(),
            totals: self.totals(),
            lineup: select_lineup(&self.players),
            depth: depth_report(&squad),
            plan: general_plan(squad.average_rating),
            opportunities: self.opportunities(),
            finance: self.finance.clone(),
            statistics: self.statistics.clone(),
            records: self.records.clone(),
            youth: self.youth.clone(),
            league: self.league_opponents(LEAGUE_SCAN_LIMIT, our_strength),
            squad,
            opponent,
        }
    }

    fn match_plan(&self, name: &str, squad: &SquadSummary, our_strength: f64) -> MatchPlan {
        let profile = self.opponent(name, our_strength);
        MatchPlan {
            counter: counter_plan(profile.tactical_tendency),
            instructions: match_instructions(&profile),
            specialization: choose_specialization(squad, Some(&profile)),
            profile,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchPlan {
    pub profile: OpponentProfile,
    pub counter: CounterPlan,
    pub instructions: Vec<Instruction>,
    pub specialization: Specialization,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    pub missing_pages: Vec<PageKind>,
    pub totals: PassStats,
    pub squad: SquadSummary,
    pub lineup: Lineup,
    pub depth: Vec<DepthLine>,
    pub plan: GeneralPlan,
    pub opportunities: Vec<Opportunity>,
    pub finance: Vec<FinanceItem>,
    pub statistics: Vec<StatItem>,
    /// Tactics and training rows.
    pub records: Vec<GenericRecord>,
    /// Youth school players with their potential bands.
    pub youth: Vec<RatedPlayer>,
    /// Top of the standings, profiled against our baseline.
    pub league: Vec<OpponentProfile>,
    pub opponent: Option<MatchPlan>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_html;
    use crate::lexicon::Lexicon;
    use crate::pipeline::run_pass;

    fn pass(page: PageKind, html: &str) -> PagePass {
        run_pass(page, &parse_html(html), &Lexicon::builtin())
    }

    #[test]
    fn absorb_sorts_entities_by_kind() {
        let mut h = Harvest::new();
        h.absorb(pass(PageKind::Players, "<table><tr><td>Име</td><td>Възраст</td><td>ATT</td></tr>\
            <tr><td>Ivanov</td><td>24</td><td>70</td></tr></table>"));
        h.absorb(pass(PageKind::Finances, "<table><tr><td>Бюджет</td><td>1 000 000</td></tr>\
            <tr><td>Заплата</td><td>200 000</td></tr></table>"));
        h.absorb(PagePass::missing(PageKind::Market));

        assert_eq!(h.players().len(), 1);
        assert_eq!(h.finance().len(), 2);
        assert_eq!(h.missing(), &[PageKind::Market]);
        assert_eq!(h.totals().rows_accepted, 3);
        assert_eq!(h.page_stats().len(), 3);
    }

    #[test]
    fn standings_dedupe_across_passes() {
        let html = "<table><tr><td>#</td><td>Team</td><td>P</td><td>GF</td><td>GA</td></tr>\
            <tr><td>3</td><td>HC Lions</td><td>40</td><td>80</td><td>40</td></tr>\
            <tr><td>4</td><td>Ice Wolves</td><td>38</td><td>50</td><td>50</td></tr></table>";
        let h = Harvest::from_passes([pass(PageKind::Standings, html), pass(PageKind::Standings, html)]);
        assert_eq!(h.standings().len(), 2);
        let o = h.opponent("lions", 55.0);
        assert_eq!(o.strength_rating, 92.5);
    }

    #[test]
    fn league_scan_takes_standings_order() {
        let mut html = String::from("<table><tr><td>#</td><td>Team</td><td>P</td><td>GF</td><td>GA</td></tr>");
        for place in 1..=10 {
            html.push_str(&format!("<tr><td>{place}</td><td>Team {place:02}</td><td>0</td><td>50</td><td>50</td></tr>"));
        }
        html.push_str("</table>");
        let h = Harvest::from_passes([pass(PageKind::Standings, &html)]);

        let league = h.league_opponents(LEAGUE_SCAN_LIMIT, 55.0);
        let names: Vec<&str> = league.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Team 01", "Team 02", "Team 03", "Team 04", "Team 05", "Team 06", "Team 07", "Team 08"]);
        assert_eq!(league[0].strength_rating, 97.5);
        assert_eq!(league[7].standing_position, Some(8));
        assert_eq!(h.league_opponents(3, 55.0).len(), 3);
        assert_eq!(h.report(None, 55.0).league, league);
    }

    #[test]
    fn report_carries_records_statistics_and_youth() {
        let h = Harvest::from_passes([
            pass(PageKind::Training, "<table><tr><td>Име</td><td>Тренировка</td><td>Форма</td><td>Енергия</td></tr>\
                <tr><td>Ivanov</td><td>Бързина</td><td>80</td><td>90</td></tr></table>"),
            pass(PageKind::TeamStatistics, "<table><tr><td>Голове</td><td>45</td></tr></table>"),
            pass(PageKind::YouthSchool, "<table><tr><td>Име</td><td>Възраст</td><td>Потенциал</td></tr>\
                <tr><td>Petrov</td><td>17</td><td>80</td></tr></table>"),
        ]);
        let r = h.report(None, 55.0);
        assert_eq!(r.records.len(), 1);
        assert_eq!(r.records[0].label, "Ivanov");
        assert_eq!(r.statistics[0].number, Some(45));
        assert_eq!(r.youth[0].potential, Some(crate::rating::PotentialBand::VeryHigh));
        assert!(serde_json::to_string(&r).unwrap().contains("Ivanov"));
    }

    #[test]
    fn report_with_and_without_opponent() {
        let h = Harvest::new();
        let r = h.report(None, 55.0);
        assert!(r.opponent.is_none());
        assert!(r.lineup.is_empty());
        assert_eq!(r.depth.len(), 4);

        let r = h.report(Some("Anyone"), 55.0);
        let plan = r.opponent.unwrap();
        assert_eq!(plan.profile.strength_rating, 50.0);
        assert_eq!(plan.specialization, Specialization::HuraSystem);
        assert!(serde_json::to_string(&h.report(Some("Anyone"), 55.0)).is_ok());
    }
}
