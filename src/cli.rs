// src/cli.rs
use std::{env, fs, path::PathBuf};

use color_eyre::eyre::{eyre, Result, WrapErr};
use log::LevelFilter;

use crate::config::options::RunOptions;
use crate::log::FileLogger;
use crate::progress::Progress;
use crate::runner;
use crate::source::PageKind;

pub struct Cli {
    pub opts: RunOptions,
    pub out: Option<PathBuf>,
    pub print_lexicon: bool,
    pub verbose: bool,
}

/// Prints page results to stderr as they are reported.
struct StderrProgress;

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) { eprintln!("Reading {total} page(s)…"); }
    fn log(&mut self, msg: &str) { eprintln!("{msg}"); }
    fn item_done(&mut self, _index: usize, label: &str) { eprintln!("  ok       {label}"); }
    fn item_failed(&mut self, _index: usize, label: &str) { eprintln!("  missing  {label}"); }
}

pub fn run() -> Result<()> {
    let cli = parse_cli(env::args().skip(1))?;

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    if let Err(e) = FileLogger::new(&cli.opts.log_path, level).install() {
        eprintln!("Warning: file log disabled: {e}");
    }

    if cli.print_lexicon {
        let lex = cli.opts.load_lexicon()?;
        println!("{}", serde_json::to_string_pretty(lex.spec())?);
        return Ok(());
    }

    let report = runner::run(&cli.opts, Some(&mut StderrProgress))
        .wrap_err("lexicon rejected; nothing was analysed")?;
    let json = serde_json::to_string_pretty(&report)?;

    match &cli.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json).wrap_err_with(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub fn parse_cli<I>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = String>,
{
    let mut cli = Cli { opts: RunOptions::default(), out: None, print_lexicon: false, verbose: false };
    let mut pages: Vec<PageKind> = Vec::new();

    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        match a.as_str() {
            "-f" | "--fixtures" => {
                cli.opts.fixture_dir = PathBuf::from(args.next().ok_or_else(|| eyre!("Missing value for --fixtures"))?);
            }
            "-p" | "--page" => {
                let v = args.next().ok_or_else(|| eyre!("Missing value for --page"))?;
                for name in v.split(',').filter(|s| !s.trim().is_empty()) {
                    let page = PageKind::parse(name).ok_or_else(|| eyre!("Unknown page: {}", name.trim()))?;
                    if !pages.contains(&page) {
                        pages.push(page);
                    }
                }
            }
            "--lexicon" => {
                cli.opts.lexicon = Some(PathBuf::from(args.next().ok_or_else(|| eyre!("Missing value for --lexicon"))?));
            }
            "--opponent" => cli.opts.opponent = Some(args.next().ok_or_else(|| eyre!("Missing opponent name"))?),
            "--our-strength" => {
                let v: f64 = args.next().ok_or_else(|| eyre!("Missing value for --our-strength"))?.parse()?;
                if !(0.0..=100.0).contains(&v) {
                    return Err(eyre!("--our-strength must be within 0..100"));
                }
                cli.opts.our_strength = v;
            }
            "-j" | "--workers" => {
                let v: usize = args.next().ok_or_else(|| eyre!("Missing value for --workers"))?.parse()?;
                cli.opts.workers = v.max(1);
            }
            "--log" => cli.opts.log_path = PathBuf::from(args.next().ok_or_else(|| eyre!("Missing log path"))?),
            "-o" | "--out" => cli.out = Some(PathBuf::from(args.next().ok_or_else(|| eyre!("Missing output path"))?)),
            "--print-lexicon" => cli.print_lexicon = true,
            "-v" | "--verbose" => cli.verbose = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(eyre!("Unknown arg: {a}")),
        }
    }

    if !pages.is_empty() {
        cli.opts.pages = pages;
    }
    Ok(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_args() {
        let cli = parse_cli(args(&[])).unwrap();
        assert_eq!(cli.opts, RunOptions::default());
        assert!(cli.out.is_none());
    }

    #[test]
    fn parses_pages_and_numbers() {
        let cli = parse_cli(args(&[
            "--page", "players,market", "-p", "public_standings", "-p", "market",
            "--our-strength", "60", "-j", "0", "--opponent", "HC Lions", "-o", "out/report.json",
        ]))
        .unwrap();
        assert_eq!(cli.opts.pages, vec![PageKind::Players, PageKind::Market, PageKind::Standings]);
        assert_eq!(cli.opts.our_strength, 60.0);
        assert_eq!(cli.opts.workers, 1);
        assert_eq!(cli.opts.opponent.as_deref(), Some("HC Lions"));
        assert_eq!(cli.out, Some(PathBuf::from("out/report.json")));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_cli(args(&["--page", "news"])).is_err());
        assert!(parse_cli(args(&["--our-strength", "120"])).is_err());
        assert!(parse_cli(args(&["--workers"])).is_err());
        assert!(parse_cli(args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn printed_lexicon_reloads() {
        let cli = parse_cli(args(&["--print-lexicon"])).unwrap();
        assert!(cli.print_lexicon);
        let json = serde_json::to_string_pretty(cli.opts.load_lexicon().unwrap().spec()).unwrap();
        assert!(Lexicon::from_json_str(&json).is_ok());
    }
}
