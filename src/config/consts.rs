// src/config/consts.rs

// Local files
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
pub const DEFAULT_FIXTURE_DIR: &str = "fixtures";

// Classification / normalization
pub const MIN_TABLE_ROWS: usize = 2; // header + at least one data row
pub const MIN_ROW_FIELDS: usize = 3;
pub const MIN_STANDINGS_ROWS: usize = 3;
pub const FALLBACK_NAME_PREFIX: &str = "Player_";
pub const MAX_STAT_LABEL_CHARS: usize = 100;

// Opportunity scoring
pub const PRICE_UNIT: f64 = 1_000_000.0;
pub const MIN_OPPORTUNITY_SCORE: f64 = 5.0;
pub const TOP_OPPORTUNITIES: usize = 10;
pub const AGE_FACTOR_PIVOT: f64 = 35.0;
pub const AGE_FACTOR_FLOOR: f64 = 0.5;
pub const NEUTRAL_AGE_FACTOR: f64 = 1.0;

// Opponent estimation
pub const BASE_STRENGTH: f64 = 50.0;
pub const LEAGUE_SIZE_PIVOT: f64 = 20.0;
pub const STRENGTH_PER_PLACE: f64 = 2.5;
pub const TENDENCY_MARGIN: f64 = 1.2;
pub const WIN_PROB_SLOPE: f64 = 0.8;
pub const WIN_PROB_MIN: f64 = 5.0;
pub const WIN_PROB_MAX: f64 = 95.0;
pub const DEFAULT_OUR_STRENGTH: f64 = 55.0;
pub const TOP_PLACES: u32 = 5;
pub const BOTTOM_PLACES_AFTER: u32 = 10;
pub const LEAGUE_SCAN_LIMIT: usize = 8;

// Squad
pub const YOUNG_BELOW: u64 = 23;
pub const VETERAN_ABOVE: u64 = 30;
pub const ELITE_ABOVE: f64 = 70.0;
pub const COMPETITIVE_ABOVE: f64 = 55.0;

// Concurrency
pub const WORKERS: usize = 4;
