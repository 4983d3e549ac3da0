use crate::config::PlannerConfig;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Pixel box of a bar relative to the start of week 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Week index ⇄ pixel mapping for a fixed-width week grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    weeks: u32,
    week_width: u32,
    inset: u32,
    row_height: u32,
    full_time_hours: u32,
}

impl Timeline {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            weeks: config.timeline_weeks,
            week_width: config.week_width_px,
            inset: config.bar_inset_px,
            row_height: config.row_height_px,
            full_time_hours: config.full_time_hours,
        }
    }

    pub fn weeks(&self) -> u32 {
        self.weeks
    }

    pub fn week_width(&self) -> u32 {
        self.week_width
    }

    pub fn pixel_left(&self, week: u32) -> f64 {
        f64::from(week) * f64::from(self.week_width)
    }

    /// Nearest whole number of weeks covered by a horizontal pointer delta.
    /// Halves round toward positive infinity; huge deltas saturate.
    pub fn week_from_pixel_delta(&self, delta_px: f64) -> i64 {
        if self.week_width == 0 || delta_px.is_nan() {
            return 0;
        }
        (delta_px / f64::from(self.week_width) + 0.5).floor() as i64
    }

    pub fn max_start_week(&self, weeks: u32) -> u32 {
        self.weeks.saturating_sub(weeks)
    }

    pub fn clamp_start_week(&self, start_week: i64, weeks: u32) -> u32 {
        start_week.clamp(0, i64::from(self.max_start_week(weeks))) as u32
    }

    /// Bar for one allocation; height scales with hours, full time filling
    /// the row.
    pub fn bar(&self, start_week: u32, weeks: u32, hours_per_week: u32) -> BarGeometry {
        let full_time = f64::from(self.full_time_hours.max(1));
        BarGeometry {
            height: f64::from(hours_per_week) / full_time * f64::from(self.row_height),
            ..self.group_bar(start_week, weeks)
        }
    }

    /// Bar spanning a whole group, inset on both sides.
    pub fn group_bar(&self, start_week: u32, weeks: u32) -> BarGeometry {
        let inset = f64::from(self.inset);
        BarGeometry {
            left: self.pixel_left(start_week) + inset,
            width: (self.pixel_left(weeks) - 2.0 * inset).max(0.0),
            height: f64::from(self.row_height),
        }
    }

    pub fn week_label(week: u32) -> String {
        format!("Week {week}")
    }

    pub fn week_labels(&self) -> Vec<String> {
        (0..self.weeks).map(Self::week_label).collect()
    }

    pub fn week_start_date(project_start: NaiveDate, week: u32) -> NaiveDate {
        project_start + Duration::weeks(i64::from(week))
    }

    /// Start date of every visible week, for labelling the header.
    pub fn week_dates(&self, project_start: NaiveDate) -> Vec<NaiveDate> {
        (0..self.weeks)
            .map(|week| Self::week_start_date(project_start, week))
            .collect()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(&PlannerConfig::default())
    }
}
