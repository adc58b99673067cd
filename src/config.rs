use serde::Deserialize;

use crate::downsampler::Reduction;
use crate::time_window::{DEFAULT_IDEAL_SLOT_COUNT, DEFAULT_MIN_SLOT_MS, SlotCentricSampler};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    /// Narrowest bucket width; every bucket is a multiple of it.
    #[serde(default = "default_min_slot_ms")]
    pub min_slot_ms: i64,
    /// Number of buckets the window aims for before clamping to `min_slot_ms`.
    #[serde(default = "default_ideal_slot_count")]
    pub ideal_slot_count: i64,
}

/// Upper bound on `window.min_slot_ms`: one day.
pub const MAX_MIN_SLOT_MS: i64 = 86_400_000;

fn default_min_slot_ms() -> i64 {
    DEFAULT_MIN_SLOT_MS
}

fn default_ideal_slot_count() -> i64 {
    DEFAULT_IDEAL_SLOT_COUNT
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            min_slot_ms: default_min_slot_ms(),
            ideal_slot_count: default_ideal_slot_count(),
        }
    }
}

impl WindowConfig {
    pub fn sampler(&self) -> SlotCentricSampler {
        SlotCentricSampler {
            min_slot_ms: self.min_slot_ms,
            ideal_slot_count: self.ideal_slot_count,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplingConfig {
    /// How each bucket's values are reduced: min, max, avg or sum.
    #[serde(default)]
    pub reduction: Reduction,
    /// Decimal places kept on floating-point series.
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

fn default_decimals() -> u32 {
    1
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            reduction: Reduction::default(),
            decimals: default_decimals(),
        }
    }
}

impl AppConfig {
    /// Reads `CONFIG_FILE` (default `config.toml`). A missing default file yields the defaults.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => {
                let s = std::fs::read_to_string(&path)?;
                Self::load_from_str(&s)
            }
            Err(_) => match std::fs::read_to_string("config.toml") {
                Ok(s) => Self::load_from_str(&s),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
                Err(e) => Err(e.into()),
            },
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.window.min_slot_ms > 0,
            "window.min_slot_ms must be > 0, got {}",
            self.window.min_slot_ms
        );
        anyhow::ensure!(
            self.window.min_slot_ms <= MAX_MIN_SLOT_MS,
            "window.min_slot_ms must be <= {MAX_MIN_SLOT_MS}, got {}",
            self.window.min_slot_ms
        );
        anyhow::ensure!(
            self.window.ideal_slot_count > 0,
            "window.ideal_slot_count must be > 0, got {}",
            self.window.ideal_slot_count
        );
        anyhow::ensure!(
            self.sampling.decimals <= 6,
            "sampling.decimals must be <= 6, got {}",
            self.sampling.decimals
        );
        Ok(())
    }
}
