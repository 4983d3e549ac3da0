use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMetadata {
    pub project_name: String,
    /// Calendar date on which timeline week 0 begins.
    pub project_start_date: NaiveDate,
}

impl Default for PlanMetadata {
    fn default() -> Self {
        Self {
            project_name: "New Project".to_string(),
            project_start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap_or_default(),
        }
    }
}
