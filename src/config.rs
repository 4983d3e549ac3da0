use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

/// Board-wide constants. Defaults match the planning board's fixed values;
/// a JSON file may override any subset of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub hourly_rate: u32,
    /// Maximum weekly hours a single allocation may represent.
    pub full_time_hours: u32,
    /// Role-wide weekly hours above which a warning is raised.
    pub over_allocation_hours: u32,
    /// Number of visible weeks; indices run `0..timeline_weeks`.
    pub timeline_weeks: u32,
    pub week_width_px: u32,
    pub bar_inset_px: u32,
    pub row_height_px: u32,
    pub min_group_hours: u32,
    pub max_group_hours: u32,
    pub min_weeks: u32,
    pub max_weeks: u32,
    pub default_weeks: u32,
    pub default_hours: u32,
    pub default_start_week: u32,
    pub hours_step: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            hourly_rate: 250,
            full_time_hours: 40,
            over_allocation_hours: 80,
            timeline_weeks: 13,
            week_width_px: 80,
            bar_inset_px: 4,
            row_height_px: 64,
            min_group_hours: 5,
            max_group_hours: 200,
            min_weeks: 1,
            max_weeks: 12,
            default_weeks: 2,
            default_hours: 40,
            default_start_week: 1,
            hours_step: 5,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Serialization(SerdeJsonError),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "io error: {err}"),
            ConfigError::Serialization(err) => write!(f, "config parse error: {err}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SerdeJsonError> for ConfigError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl PlannerConfig {
    /// Largest start week that keeps a `weeks`-long bar on the timeline.
    pub fn max_start_week(&self, weeks: u32) -> u32 {
        self.timeline_weeks.saturating_sub(weeks)
    }

    pub fn clamp_group_hours(&self, hours: i64) -> u32 {
        clamp_to(hours, self.min_group_hours, self.max_group_hours)
    }

    pub fn clamp_weeks(&self, weeks: i64) -> u32 {
        clamp_to(weeks, self.min_weeks, self.max_weeks)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.full_time_hours == 0 {
            return Err(ConfigError::Invalid(
                "full_time_hours must be greater than zero".into(),
            ));
        }
        if self.week_width_px == 0 {
            return Err(ConfigError::Invalid(
                "week_width_px must be greater than zero".into(),
            ));
        }
        if self.min_group_hours == 0 || self.min_group_hours > self.max_group_hours {
            return Err(ConfigError::Invalid(format!(
                "group hour range [{}, {}] is empty or starts at zero",
                self.min_group_hours, self.max_group_hours
            )));
        }
        if self.min_weeks == 0 || self.min_weeks > self.max_weeks {
            return Err(ConfigError::Invalid(format!(
                "week range [{}, {}] is empty or starts at zero",
                self.min_weeks, self.max_weeks
            )));
        }
        if self.max_weeks > self.timeline_weeks {
            return Err(ConfigError::Invalid(format!(
                "max_weeks {} exceeds timeline_weeks {}",
                self.max_weeks, self.timeline_weeks
            )));
        }
        if self.default_weeks < self.min_weeks || self.default_weeks > self.max_weeks {
            return Err(ConfigError::Invalid(format!(
                "default_weeks {} outside [{}, {}]",
                self.default_weeks, self.min_weeks, self.max_weeks
            )));
        }
        if self.default_hours < self.min_group_hours
            || self.default_hours > self.max_group_hours
            || self.default_hours > self.full_time_hours
        {
            return Err(ConfigError::Invalid(format!(
                "default_hours {} must fit one allocation within [{}, {}]",
                self.default_hours, self.min_group_hours, self.max_group_hours
            )));
        }
        if self.default_start_week > self.max_start_week(self.default_weeks) {
            return Err(ConfigError::Invalid(format!(
                "default_start_week {} pushes a {}-week bar off the timeline",
                self.default_start_week, self.default_weeks
            )));
        }
        Ok(())
    }
}

fn clamp_to(value: i64, min: u32, max: u32) -> u32 {
    value.clamp(i64::from(min), i64::from(max)) as u32
}

pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> Result<PlannerConfig, ConfigError> {
    let file = File::open(path)?;
    let config: PlannerConfig = serde_json::from_reader(file)?;
    config.validate()?;
    Ok(config)
}
