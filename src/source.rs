// src/source.rs
//! Where parsed documents come from.
//!
//! The live site needs a session, so it stays outside the crate; what lives
//! here is the seam ([`DocumentSource`]) and two offline sources: saved pages
//! on disk and an in-memory map.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{parse_html, ParsedDocument};
use crate::model::Category;

/// Manager pages the pipeline knows how to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Players,
    YouthSchool,
    Market,
    Finances,
    Tactics,
    Training,
    TeamStatistics,
    Standings,
}

impl PageKind {
    pub const ALL: [PageKind; 8] = [
        PageKind::Players,
        PageKind::YouthSchool,
        PageKind::Market,
        PageKind::Finances,
        PageKind::Tactics,
        PageKind::Training,
        PageKind::TeamStatistics,
        PageKind::Standings,
    ];

    /// File stem the site uses for the page (`<stem>.php` / `<stem>.inc`).
    pub fn file_stem(self) -> &'static str {
        match self {
            PageKind::Players => "manager_team_players",
            PageKind::YouthSchool => "manager_youth_school_form",
            PageKind::Market => "manager_player_market_form",
            PageKind::Finances => "manager_finance_report",
            PageKind::Tactics => "manager_tactics_form",
            PageKind::Training => "manager_training_form1",
            PageKind::TeamStatistics => "manager_team_statistics",
            PageKind::Standings => "public_standings",
        }
    }

    /// Table category searched on this page. Standings and team statistics
    /// have their own readers.
    pub fn category(self) -> Option<Category> {
        match self {
            PageKind::Players => Some(Category::Player),
            PageKind::YouthSchool => Some(Category::Youth),
            PageKind::Market => Some(Category::Market),
            PageKind::Finances => Some(Category::Finance),
            PageKind::Tactics => Some(Category::Tactics),
            PageKind::Training => Some(Category::Training),
            PageKind::TeamStatistics | PageKind::Standings => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Players => "players",
            PageKind::YouthSchool => "youth_school",
            PageKind::Market => "market",
            PageKind::Finances => "finances",
            PageKind::Tactics => "tactics",
            PageKind::Training => "training",
            PageKind::TeamStatistics => "team_statistics",
            PageKind::Standings => "standings",
        }
    }

    pub fn parse(s: &str) -> Option<PageKind> {
        let lc = s.trim().to_ascii_lowercase();
        PageKind::ALL.into_iter().find(|p| p.as_str() == lc || p.file_stem() == lc)
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no saved page for {page} at {path}")]
    NotFound { page: PageKind, path: PathBuf },
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("page {0} is empty")]
    Empty(PageKind),
}

/// Supplies a parsed document per page. Failures are not fatal to a run.
pub trait DocumentSource {
    fn fetch(&self, page: PageKind) -> Result<ParsedDocument, SourceError>;
}

/// Saved pages under one directory, `<dir>/<file stem>.html`.
#[derive(Clone, Debug)]
pub struct FixtureSource {
    dir: PathBuf,
}

impl FixtureSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    pub fn dir(&self) -> &Path { &self.dir }

    pub fn path_for(&self, page: PageKind) -> PathBuf {
        self.dir.join(format!("{}.html", page.file_stem()))
    }
}

impl DocumentSource for FixtureSource {
    fn fetch(&self, page: PageKind) -> Result<ParsedDocument, SourceError> {
        let path = self.path_for(page);
        let html = fs::read_to_string(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound { page, path: path.clone() },
            _ => SourceError::Io { path: path.clone(), source },
        })?;
        if html.trim().is_empty() {
            return Err(SourceError::Empty(page));
        }
        Ok(parse_html(&html))
    }
}

/// Raw HTML held in memory, keyed by page.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    pages: BTreeMap<PageKind, String>,
}

impl MemorySource {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, page: PageKind, html: impl Into<String>) -> Self {
        self.pages.insert(page, html.into());
        self
    }
}

impl DocumentSource for MemorySource {
    fn fetch(&self, page: PageKind) -> Result<ParsedDocument, SourceError> {
        match self.pages.get(&page) {
            Some(html) if !html.trim().is_empty() => Ok(parse_html(html)),
            Some(_) => Err(SourceError::Empty(page)),
            None => Err(SourceError::NotFound { page, path: PathBuf::from(page.file_stem()) }),
        }
    }
}
