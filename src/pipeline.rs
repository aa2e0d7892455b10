// src/pipeline.rs
//! One page pass: document → candidates → entities. Standings and team
//! statistics skip classification and read rows by shape.
//!
//! Passes share nothing but `&Lexicon`, so several pages run on a rayon pool.
//! Results come back in the order the pages were asked for, whatever order
//! the workers finish in.

use rayon::prelude::*;
use serde::Serialize;

use crate::classify::{classify, TableCandidate};
use crate::document::ParsedDocument;
use crate::entity::{build_entities, build_stats, Entity};
use crate::lexicon::Lexicon;
use crate::progress::Progress;
use crate::source::{DocumentSource, PageKind};
use crate::standings::{self, StandingsRow};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PassStats {
    pub tables_seen: usize,
    pub candidates: usize,
    pub rows_accepted: usize,
    pub rows_rejected: usize,
}

impl PassStats {
    pub fn add(&mut self, other: &PassStats) {
        self.tables_seen += other.tables_seen;
        self.candidates += other.candidates;
        self.rows_accepted += other.rows_accepted;
        self.rows_rejected += other.rows_rejected;
    }
}

/// Everything one page produced. A page the source could not supply is `missing`
/// and otherwise empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PagePass {
    pub page: PageKind,
    pub missing: bool,
    pub candidates: Vec<TableCandidate>,
    pub entities: Vec<Entity>,
    pub standings: Vec<StandingsRow>,
    pub stats: PassStats,
}

impl PagePass {
    pub fn missing(page: PageKind) -> Self {
        Self {
            page,
            missing: true,
            candidates: Vec::new(),
            entities: Vec::new(),
            standings: Vec::new(),
            stats: PassStats::default(),
        }
    }
}

/// Run the stages for one already-parsed page.
pub fn run_pass(page: PageKind, doc: &ParsedDocument, lexicon: &Lexicon) -> PagePass {
    let mut pass = PagePass { missing: false, ..PagePass::missing(page) };
    pass.stats.tables_seen = doc.tables.len();

    let Some(category) = page.category() else {
        read_by_shape(&mut pass, doc, lexicon);
        return pass;
    };

    pass.candidates = classify(doc, category, lexicon);
    pass.stats.candidates = pass.candidates.len();

    for candidate in &pass.candidates {
        let Some(table) = doc.tables.get(candidate.table_index) else { continue };
        let (entities, stats) = build_entities(candidate, table, lexicon);
        pass.entities.extend(entities);
        pass.stats.rows_accepted += stats.rows_accepted;
        pass.stats.rows_rejected += stats.rows_rejected;
    }

    if pass.candidates.is_empty() {
        logd!("{page}: no {category} table among {} table(s)", doc.tables.len());
    }
    pass
}

fn read_by_shape(pass: &mut PagePass, doc: &ParsedDocument, lexicon: &Lexicon) {
    if pass.page == PageKind::TeamStatistics {
        let (items, stats) = build_stats(doc);
        pass.entities.extend(items.into_iter().map(Entity::Stat));
        pass.stats.rows_accepted = stats.rows_accepted;
        pass.stats.rows_rejected = stats.rows_rejected;
    } else {
        pass.standings = standings::extract(doc, lexicon);
        pass.stats.rows_accepted = pass.standings.len();
    }
}

/// Fetch one page and run it; a fetch failure yields a missing pass.
pub fn fetch_and_run<S>(source: &S, page: PageKind, lexicon: &Lexicon) -> PagePass
where
    S: DocumentSource + ?Sized,
{
    match source.fetch(page) {
        Ok(doc) => run_pass(page, &doc, lexicon),
        Err(e) => {
            logw!("{page}: {e}");
            PagePass::missing(page)
        }
    }
}

/// Run `pages` on up to `workers` threads. Output order matches `pages`.
pub fn run_passes<S>(
    source: &S,
    pages: &[PageKind],
    lexicon: &Lexicon,
    workers: usize,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<PagePass>
where
    S: DocumentSource + Sync + ?Sized,
{
    if let Some(p) = progress.as_deref_mut() {
        p.begin(pages.len());
    }

    let run = || {
        pages
            .par_iter()
            .map(|&page| fetch_and_run(source, page, lexicon))
            .collect::<Vec<_>>()
    };
    let passes = match rayon::ThreadPoolBuilder::new().num_threads(workers.max(1)).build() {
        Ok(pool) => pool.install(run),
        Err(e) => {
            logw!("worker pool unavailable ({e}); running pages in sequence");
            pages.iter().map(|&page| fetch_and_run(source, page, lexicon)).collect()
        }
    };

    let mut totals = PassStats::default();
    passes.iter().for_each(|p| totals.add(&p.stats));
    let summary = format!(
        "{} page(s), {} missing: {} candidate(s), {} row(s) kept, {} rejected",
        passes.len(),
        passes.iter().filter(|p| p.missing).count(),
        totals.candidates,
        totals.rows_accepted,
        totals.rows_rejected
    );
    logf!("{summary}");

    if let Some(p) = progress.as_deref_mut() {
        for (i, pass) in passes.iter().enumerate() {
            if pass.missing {
                p.item_failed(i, pass.page.as_str());
            } else {
                p.item_done(i, pass.page.as_str());
            }
        }
        p.log(&summary);
        p.finish();
    }
    passes
}
