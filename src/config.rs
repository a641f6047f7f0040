use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::projection::DEFAULT_PRICE_PER_POINT;
use crate::tools::DEFAULT_ROOKIE_MAX_PRICE;

pub const APP_DIR: &str = "afl_fantasy_terminal";

const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Api,
    Mock,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_source: DataSource,
    pub api_base: String,
    pub poll_interval: Duration,
    pub stale_after: Duration,
    pub mock_seed: u64,
    pub mock_latency: Duration,
    pub mock_players: usize,
    pub price_per_point: f64,
    pub rookie_max_price: f64,
    pub current_round: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_source: DataSource::Mock,
            api_base: DEFAULT_API_BASE.to_string(),
            poll_interval: Duration::from_secs(300),
            stale_after: Duration::from_secs(120),
            mock_seed: 2026,
            mock_latency: Duration::from_millis(400),
            mock_players: 60,
            price_per_point: DEFAULT_PRICE_PER_POINT,
            rookie_max_price: DEFAULT_ROOKIE_MAX_PRICE,
            current_round: 1,
        }
    }
}

impl AppConfig {
    /// Reads `AFL_*` variables; anything missing or unparseable keeps its default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let data_source = match env::var("AFL_DATA_SOURCE")
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "api" | "remote" => DataSource::Api,
            _ => DataSource::Mock,
        };
        let api_base = env::var("AFL_API_BASE")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base);
        Self {
            data_source,
            api_base,
            poll_interval: Duration::from_secs(parse_env("AFL_POLL_SECS", 300u64).max(30)),
            stale_after: Duration::from_secs(parse_env("AFL_STALE_SECS", 120u64).max(10)),
            mock_seed: parse_env("AFL_MOCK_SEED", defaults.mock_seed),
            mock_latency: Duration::from_millis(parse_env("AFL_MOCK_LATENCY_MS", 400u64)),
            mock_players: parse_env("AFL_MOCK_PLAYERS", defaults.mock_players).clamp(1, 800),
            price_per_point: parse_env("AFL_PRICE_PER_POINT", defaults.price_per_point),
            rookie_max_price: parse_env("AFL_ROOKIE_MAX_PRICE", defaults.rookie_max_price),
            current_round: parse_env("AFL_CURRENT_ROUND", defaults.current_round).max(1),
        }
    }

    pub fn source_label(&self) -> &'static str {
        match self.data_source {
            DataSource::Api => "API",
            DataSource::Mock => "MOCK",
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// `$XDG_CACHE_HOME/afl_fantasy_terminal`, falling back to `~/.cache/...`.
pub fn cache_dir() -> Option<PathBuf> {
    if let Ok(base) = env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(APP_DIR));
    }
    let home = env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(APP_DIR))
}
