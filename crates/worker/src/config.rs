use std::path::PathBuf;

use neuroscan_core::centroid::{MaskLayout, PixelOrder};
use neuroscan_core::error::CoreError;
use neuroscan_pipeline::PopulateOptions;

/// Worker configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for a
/// long-running worker.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub database_url: String,
    /// Seconds between populate runs (default: `60`).
    pub interval_secs: u64,
    /// Run a single populate pass and exit (default: `false`).
    pub run_once: bool,
    /// Cap on keys per run (default: unlimited). Never negative.
    pub max_keys: Option<i64>,
    /// Keep going after a failing key (default: `true`).
    pub suppress_errors: bool,
    /// Directory that relative scanner header paths are resolved against.
    pub header_root: Option<PathBuf>,
    /// Layout of stored mask pixel indices (default: 1-based, column-major).
    pub mask_layout: MaskLayout,
    /// JSON movie catalog to load before populating.
    pub movie_catalog: Option<PathBuf>,
}

impl WorkerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                  | Default        |
    /// |--------------------------|----------------|
    /// | `DATABASE_URL`           | required       |
    /// | `POPULATE_INTERVAL_SECS` | `60`           |
    /// | `POPULATE_ONCE`          | `false`        |
    /// | `POPULATE_MAX_KEYS`      | unset          |
    /// | `SUPPRESS_ERRORS`        | `true`         |
    /// | `SCAN_HEADER_ROOT`       | unset          |
    /// | `MASK_INDEX_BASE`        | `1`            |
    /// | `MASK_INDEX_ORDER`       | `column-major` |
    /// | `MOVIE_CATALOG_PATH`     | unset          |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL")
            .ok_or_else(|| CoreError::Validation("DATABASE_URL must be set".to_string()))?;

        let interval_secs = parse_or(var("POPULATE_INTERVAL_SECS"), "POPULATE_INTERVAL_SECS", 60u64)?;
        if interval_secs == 0 {
            return Err(CoreError::Validation(
                "POPULATE_INTERVAL_SECS must be greater than 0".to_string(),
            ));
        }

        let run_once = parse_bool(var("POPULATE_ONCE"), "POPULATE_ONCE", false)?;
        let max_keys = var("POPULATE_MAX_KEYS")
            .map(|v| parse::<u32>(&v, "POPULATE_MAX_KEYS").map(i64::from))
            .transpose()?;
        let suppress_errors = parse_bool(var("SUPPRESS_ERRORS"), "SUPPRESS_ERRORS", true)?;

        let base = parse_or(var("MASK_INDEX_BASE"), "MASK_INDEX_BASE", 1i64)?;
        let order = match var("MASK_INDEX_ORDER") {
            Some(v) => v.trim().parse::<PixelOrder>()?,
            None => PixelOrder::ColumnMajor,
        };
        let mask_layout = MaskLayout::new(base, order)?;

        Ok(Self {
            database_url,
            interval_secs,
            run_once,
            max_keys,
            suppress_errors,
            header_root: var("SCAN_HEADER_ROOT").map(PathBuf::from),
            mask_layout,
            movie_catalog: var("MOVIE_CATALOG_PATH").map(PathBuf::from),
        })
    }

    pub fn populate_options(&self) -> PopulateOptions {
        PopulateOptions {
            max_keys: self.max_keys,
            suppress_errors: self.suppress_errors,
        }
    }
}

fn parse<T: std::str::FromStr>(value: &str, key: &str) -> Result<T, CoreError> {
    value
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("{key} has an invalid value: '{value}'")))
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, key: &str, default: T) -> Result<T, CoreError> {
    value.map_or(Ok(default), |v| parse(&v, key))
}

fn parse_bool(value: Option<String>, key: &str, default: bool) -> Result<bool, CoreError> {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(CoreError::Validation(format!(
                "{key} must be a boolean (got '{v}')"
            ))),
        },
    }
}
