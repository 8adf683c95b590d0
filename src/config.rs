use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Optional configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Everything the two dashboards need to know up front.
/// Missing keys in the JSON file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory the named CSV resources are resolved against.
    pub data_dir: PathBuf,
    pub ranking: RankingConfig,
    pub trends: TrendConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub resource: String,
    /// Number of bars shown.
    pub top_n: usize,
    /// Short name of the score, used in titles ("GHI" → "Top 10 GHI Scores").
    pub score_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub resource: String,
    pub country_field: String,
    pub year_field: String,
    /// Selectable metrics, in menu order.
    pub metrics: Vec<MetricDescriptor>,
}

/// Display metadata for a known metric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDescriptor {
    pub key: String,
    pub label: String,
    pub y_title: String,
}

impl MetricDescriptor {
    fn new(key: &str, label: &str, y_title: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            y_title: y_title.to_string(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            ranking: RankingConfig::default(),
            trends: TrendConfig::default(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            resource: "ghi_wiki_cleaned.csv".to_string(),
            top_n: 10,
            score_label: "GHI".to_string(),
        }
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            resource: "output.csv".to_string(),
            country_field: "country".to_string(),
            year_field: "year".to_string(),
            metrics: vec![
                MetricDescriptor::new(
                    "undernourishment_rate",
                    "Prevalence of Undernourishment (%)",
                    "Undernourishment (%)",
                ),
                MetricDescriptor::new(
                    "calorie_supply_per_person",
                    "Daily Calorie Supply (kcal/person/day)",
                    "Calories (kcal)",
                ),
                MetricDescriptor::new("stunting_rate", "Child Stunting Rate (%)", "Stunting (%)"),
                MetricDescriptor::new(
                    "agri_employment_share",
                    "Agricultural Employment Share (%)",
                    "Employment (%)",
                ),
            ],
        }
    }
}

impl TrendConfig {
    /// Descriptor for a metric key, if configured.
    pub fn metric(&self, key: &str) -> Option<&MetricDescriptor> {
        self.metrics.iter().find(|m| m.key == key)
    }
}

impl DashboardConfig {
    /// Read a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Read `path` if it exists, otherwise use the defaults. A broken file
    /// is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No {} found, using default configuration", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring configuration: {e:#}");
                Self::default()
            }
        }
    }
}
