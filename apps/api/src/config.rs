use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_COURSERA_CATALOG: &str = "datasets/coursea_data.csv";
const DEFAULT_UDEMY_CATALOG: &str = "datasets/udemy_courses.csv";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub coursera_catalog_path: PathBuf,
    pub udemy_catalog_path: PathBuf,
    /// When unset the built-in skill list is used.
    pub skill_vocabulary_path: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            coursera_catalog_path: path_env("COURSERA_CATALOG_PATH", DEFAULT_COURSERA_CATALOG),
            udemy_catalog_path: path_env("UDEMY_CATALOG_PATH", DEFAULT_UDEMY_CATALOG),
            skill_vocabulary_path: std::env::var("SKILL_VOCABULARY_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            coursera_catalog_path: PathBuf::from(DEFAULT_COURSERA_CATALOG),
            udemy_catalog_path: PathBuf::from(DEFAULT_UDEMY_CATALOG),
            skill_vocabulary_path: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn path_env(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid value, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
