use serde::Deserialize;

use crate::input;

/// Analysis configuration, optionally loaded from a JSON file.
///
/// `turning_point_month` only annotates presentation output (the vintage
/// month where the performance curve is expected to flatten); the core
/// pipeline never consults it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub turning_point_month: i32,
    pub quarter_months: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            turning_point_month: 9,
            quarter_months: vec![
                "2024-01-01".to_string(),
                "2024-02-01".to_string(),
                "2024-03-01".to_string(),
            ],
        }
    }
}

impl AnalysisConfig {
    /// Load from the given file if present, otherwise defaults. CLI flags
    /// are applied on top by the caller.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(p) => input::file::read_json(p),
            None => Ok(AnalysisConfig::default()),
        }
    }
}
