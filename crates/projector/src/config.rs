use serde::Deserialize;

use crate::error::ProjectorError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    pub thresholds: Thresholds,
    pub dates: DateConfig,
}

/// Confidence split for matched-group classification.
///
/// `>= high` renders high-confidence, `>= low` renders low-confidence,
/// below `low` renders no-match. Approved status wins over both.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub high: f64,
    pub low: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { high: 0.8, low: 0.5 }
    }
}

/// Where and how to find a row's date. The first listed column present
/// on the row wins; formats are tried in order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DateConfig {
    pub columns: Vec<String>,
    pub formats: Vec<String>,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            columns: vec![
                "date".into(),
                "transaction_date".into(),
                "posting_date".into(),
                "posted_date".into(),
            ],
            formats: vec![
                "%Y-%m-%d".into(),
                "%m/%d/%Y".into(),
                "%d/%m/%Y".into(),
                "%Y/%m/%d".into(),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ProjectorConfig {
    pub fn from_toml(input: &str) -> Result<Self, ProjectorError> {
        let config: ProjectorConfig =
            toml::from_str(input).map_err(|e| ProjectorError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProjectorError> {
        let t = &self.thresholds;
        if !(0.0..=1.0).contains(&t.low) || !(0.0..=1.0).contains(&t.high) {
            return Err(ProjectorError::ConfigValidation(format!(
                "thresholds must lie in [0, 1], got low={} high={}",
                t.low, t.high
            )));
        }
        if t.low > t.high {
            return Err(ProjectorError::ConfigValidation(format!(
                "low threshold {} exceeds high threshold {}",
                t.low, t.high
            )));
        }
        if self.dates.columns.is_empty() {
            return Err(ProjectorError::ConfigValidation(
                "at least one date column is required".into(),
            ));
        }
        if self.dates.formats.is_empty() {
            return Err(ProjectorError::ConfigValidation(
                "at least one date format is required".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
