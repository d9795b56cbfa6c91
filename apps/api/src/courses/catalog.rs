//! Course Catalog — two read-only course tables loaded from CSV at startup.
//!
//! Coursera is the primary catalog, Udemy the secondary. Rows keep their file
//! order, which is what "first match" refers to.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const TITLE_COLUMN: &str = "course_title";
pub const URL_COLUMN: &str = "url";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Coursera,
    Udemy,
}

impl Platform {
    /// Lookup order: primary first.
    pub const PRIORITY: [Platform; 2] = [Platform::Coursera, Platform::Udemy];

    /// Whether the catalog file must carry a `url` column.
    fn requires_url(self) -> bool {
        matches!(self, Platform::Udemy)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Coursera => write!(f, "Coursera"),
            Platform::Udemy => write!(f, "Udemy"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {platform} catalog {}: {source}", .path.display())]
    Io {
        platform: Platform,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {platform} catalog {}: {source}", .path.display())]
    Csv {
        platform: Platform,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{platform} catalog {} is missing required column '{column}'", .path.display())]
    MissingColumn {
        platform: Platform,
        path: PathBuf,
        column: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseRecord {
    pub platform: Platform,
    pub title: String,
    pub url: Option<String>,
    title_lower: String,
}

impl CourseRecord {
    pub fn new(platform: Platform, title: impl Into<String>, url: Option<String>) -> Self {
        let title = title.into();
        let title_lower = title.to_lowercase();
        Self {
            platform,
            title,
            url: url.filter(|u| !u.trim().is_empty()),
            title_lower,
        }
    }

    /// Case-insensitive plain substring test. `needle` must be lowercase.
    fn title_contains(&self, needle: &str) -> bool {
        self.title_lower.contains(needle)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    coursera: Vec<CourseRecord>,
    udemy: Vec<CourseRecord>,
}

impl CourseCatalog {
    pub fn from_records(coursera: Vec<CourseRecord>, udemy: Vec<CourseRecord>) -> Self {
        Self { coursera, udemy }
    }

    /// Loads both catalogs. Any failure here is fatal for the process.
    pub async fn load(coursera_path: &Path, udemy_path: &Path) -> Result<Self, CatalogError> {
        let coursera = load_platform(Platform::Coursera, coursera_path).await?;
        let udemy = load_platform(Platform::Udemy, udemy_path).await?;

        info!(
            "Course catalogs loaded: {} Coursera rows, {} Udemy rows",
            coursera.len(),
            udemy.len()
        );

        Ok(Self::from_records(coursera, udemy))
    }

    pub fn records(&self, platform: Platform) -> &[CourseRecord] {
        match platform {
            Platform::Coursera => &self.coursera,
            Platform::Udemy => &self.udemy,
        }
    }

    /// First row, in file order, whose title contains `skill` (case-insensitive).
    pub fn first_match(&self, platform: Platform, skill: &str) -> Option<&CourseRecord> {
        let needle = skill.to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.records(platform)
            .iter()
            .find(|record| record.title_contains(&needle))
    }

    pub fn len(&self, platform: Platform) -> usize {
        self.records(platform).len()
    }

    pub fn is_empty(&self) -> bool {
        self.coursera.is_empty() && self.udemy.is_empty()
    }
}

async fn load_platform(platform: Platform, path: &Path) -> Result<Vec<CourseRecord>, CatalogError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CatalogError::Io {
            platform,
            path: path.to_path_buf(),
            source,
        })?;
    parse_catalog(platform, path, &bytes)
}

/// Parses one catalog CSV. `course_title` is always required; `url` is
/// required for Udemy and picked up for Coursera only when present.
pub fn parse_catalog(
    platform: Platform,
    path: &Path,
    bytes: &[u8],
) -> Result<Vec<CourseRecord>, CatalogError> {
    let csv_err = |source| CatalogError::Csv {
        platform,
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers().map_err(csv_err)?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
    };

    let title_idx = column(TITLE_COLUMN).ok_or_else(|| CatalogError::MissingColumn {
        platform,
        path: path.to_path_buf(),
        column: TITLE_COLUMN,
    })?;
    let url_idx = column(URL_COLUMN);
    if url_idx.is_none() && platform.requires_url() {
        return Err(CatalogError::MissingColumn {
            platform,
            path: path.to_path_buf(),
            column: URL_COLUMN,
        });
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(csv_err)?;
        let title = row.get(title_idx).unwrap_or("");
        let url = url_idx
            .and_then(|idx| row.get(idx))
            .map(|u| u.trim().to_string());
        records.push(CourseRecord::new(platform, title, url));
    }

    debug!("Parsed {} {} rows from {}", records.len(), platform, path.display());
    Ok(records)
}
