// src/runner.rs
use crate::{
    config::options::RunOptions,
    harvest::{Harvest, RunReport},
    lexicon::ConfigError,
    pipeline::run_passes,
    progress::Progress,
    source::{DocumentSource, FixtureSource},
};

/// Top-level runner over saved pages: load the lexicon, run every page, report.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(opts: &RunOptions, progress: Option<&mut dyn Progress>) -> Result<RunReport, ConfigError> {
    let source = FixtureSource::new(&opts.fixture_dir);
    run_with_source(opts, &source, progress)
}

/// Same as [`run`] with any document source.
pub fn run_with_source<S>(
    opts: &RunOptions,
    source: &S,
    progress: Option<&mut dyn Progress>,
) -> Result<RunReport, ConfigError>
where
    S: DocumentSource + Sync + ?Sized,
{
    let lexicon = opts.load_lexicon().inspect_err(|e| loge!("lexicon rejected: {e}"))?;
    logf!("run: {} page(s), {} worker(s)", opts.pages.len(), opts.workers);

    let passes = run_passes(source, &opts.pages, &lexicon, opts.workers, progress);
    let harvest = Harvest::from_passes(passes);

    for page in harvest.missing() {
        logw!("page {page} missing; its section of the report is empty");
    }
    Ok(harvest.report(opts.opponent.as_deref(), opts.our_strength))
}
