// src/config/options.rs
use std::path::{Path, PathBuf};

use crate::lexicon::{ConfigError, Lexicon};
use crate::source::PageKind;

use super::consts::*;

#[derive(Clone, Debug, PartialEq)]
pub struct RunOptions {
    /// Directory of saved pages, `<stem>.html` each.
    pub fixture_dir: PathBuf,
    pub pages: Vec<PageKind>,
    /// JSON lexicon; `None` uses the built-in tables.
    pub lexicon: Option<PathBuf>,
    /// Baseline our squad is assumed to have when estimating odds.
    pub our_strength: f64,
    pub opponent: Option<String>,
    pub log_path: PathBuf,
    pub workers: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            fixture_dir: PathBuf::from(DEFAULT_FIXTURE_DIR),
            pages: PageKind::ALL.to_vec(),
            lexicon: None,
            our_strength: DEFAULT_OUR_STRENGTH,
            opponent: None,
            log_path: Path::new(STORE_DIR).join(LOG_FILE),
            workers: WORKERS,
        }
    }
}

impl RunOptions {
    /// Load and validate the configured lexicon. The one error that stops a run.
    pub fn load_lexicon(&self) -> Result<Lexicon, ConfigError> {
        match &self.lexicon {
            Some(path) => Lexicon::from_path(path),
            None => Ok(Lexicon::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = RunOptions::default();
        assert_eq!(o.pages.len(), PageKind::ALL.len());
        assert_eq!(o.our_strength, 55.0);
        assert_eq!(o.log_path, PathBuf::from(".store/debug.log"));
        assert!(o.load_lexicon().is_ok());
    }

    #[test]
    fn bad_lexicon_path_is_an_error() {
        let o = RunOptions { lexicon: Some(PathBuf::from("/nonexistent/lexicon.json")), ..Default::default() };
        assert!(o.load_lexicon().is_err());
    }
}
