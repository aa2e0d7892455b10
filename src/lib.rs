// src/lib.rs

#[macro_use]
pub mod log;

pub mod config;
pub mod core;

pub mod classify;
pub mod document;
pub mod entity;
pub mod lexicon;
pub mod model;
pub mod normalize;
pub mod standings;

pub mod market;
pub mod opponent;
pub mod rating;
pub mod squad;
pub mod tactics;

pub mod harvest;
pub mod pipeline;
pub mod progress;
pub mod runner;
pub mod source;

#[cfg(feature = "cli")]
pub mod cli;

pub use document::{parse_html, ParsedDocument};
pub use harvest::{Harvest, RunReport};
pub use lexicon::{ConfigError, Lexicon};
pub use source::{DocumentSource, FixtureSource, MemorySource, PageKind};
