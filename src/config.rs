use std::env;

use anyhow::{Context, Result};

use crate::analysis::gap::GapThreshold;
use crate::model::dataset::SplitParams;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/student_data.csv";

/// Central configuration loaded from environment variables.
///
/// Nothing here is secret. The .env file is loaded at startup via dotenvy,
/// and CLI flags override the data path per command.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input CSV (GAPSCAN_DATA_PATH)
    pub data_path: String,
    /// Weakness cutoff in percentage points (GAPSCAN_GAP_THRESHOLD)
    pub gap_threshold: GapThreshold,
    /// Classifier split settings (GAPSCAN_SPLIT_SEED, GAPSCAN_TEST_SIZE)
    pub split: SplitParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
            gap_threshold: GapThreshold::default(),
            split: SplitParams::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every setting has a default. A variable that is set but does not
    /// parse is an error rather than a silent fallback.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let data_path = env::var("GAPSCAN_DATA_PATH").unwrap_or(defaults.data_path);

        let max_gap = parse_var("GAPSCAN_GAP_THRESHOLD")?.unwrap_or(defaults.gap_threshold.max_gap);
        let seed = parse_var("GAPSCAN_SPLIT_SEED")?.unwrap_or(defaults.split.seed);
        let test_size = parse_var("GAPSCAN_TEST_SIZE")?.unwrap_or(defaults.split.test_size);

        if !(test_size > 0.0 && test_size < 1.0) {
            anyhow::bail!("GAPSCAN_TEST_SIZE must be between 0 and 1, got {test_size}");
        }

        Ok(Self {
            data_path,
            gap_threshold: GapThreshold { max_gap },
            split: SplitParams {
                test_size,
                seed,
                ..defaults.split
            },
        })
    }

    /// Replace the data path when a command-line override is given.
    pub fn with_data_path(mut self, path: Option<String>) -> Self {
        if let Some(path) = path {
            self.data_path = path;
        }
        self
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} has an invalid value: {raw:?}")),
        _ => Ok(None),
    }
}
