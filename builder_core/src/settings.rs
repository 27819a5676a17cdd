//! # Estimator Settings
//!
//! Runtime knobs for an estimating session. Settings are plain JSON so they
//! can live next to the binary or be generated by other tools:
//!
//! ```json
//! {
//!   "room_capacity": 100,
//!   "report_format": "Json"
//! }
//! ```
//!
//! Every field is optional; a missing field takes its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{BuildError, BuildResult};

/// Room capacity of the original fixed-size room table.
pub const LEGACY_ROOM_CAPACITY: usize = 100;

/// How the CLI renders reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportFormat {
    /// Human-readable text only
    #[default]
    Text,
    /// Text followed by pretty-printed JSON
    Json,
}

/// Session settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum rooms a construction keeps. `None` means unbounded; rooms
    /// added past a capacity are dropped without error.
    pub room_capacity: Option<usize>,

    /// Report rendering for the console shell
    pub report_format: ReportFormat,
}

impl Settings {
    /// Settings that reproduce the original 100-room limit.
    pub fn legacy() -> Self {
        Settings {
            room_capacity: Some(LEGACY_ROOM_CAPACITY),
            ..Settings::default()
        }
    }

    /// Load settings from a JSON file.
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - Parsed settings, defaults filled in
    /// * `Err(BuildError::SettingsError)` - File unreadable or not valid JSON
    pub fn from_json_file(path: &Path) -> BuildResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| BuildError::settings_error(path.display().to_string(), e.to_string()))?;

        serde_json::from_str(&contents).map_err(|e| {
            BuildError::settings_error(path.display().to_string(), format!("Invalid JSON: {}", e))
        })
    }
}
