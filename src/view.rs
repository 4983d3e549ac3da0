//! Serializable snapshot of everything a board renderer needs to draw one
//! frame. Built fresh from a [`Planner`] after each change notification.

use crate::aggregates::{CostSummary, GroupRollup, OverAllocationWarning};
use crate::allocation::Allocation;
use crate::planner::Planner;
use crate::timeline::{BarGeometry, Timeline};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub allocation: Allocation,
    pub label: String,
    pub color: &'static str,
    pub selected: bool,
    pub hovered: bool,
    pub bar: BarGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView {
    pub rollup: GroupRollup,
    pub caption: String,
    pub collapsed: bool,
    pub header_bar: BarGeometry,
    /// Empty while the group is collapsed.
    pub rows: Vec<RowView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub project_name: String,
    pub week_labels: Vec<String>,
    /// Calendar date each visible week begins on.
    pub week_dates: Vec<NaiveDate>,
    pub groups: Vec<GroupView>,
    pub warnings: Vec<OverAllocationWarning>,
    pub summary: CostSummary,
    pub can_undo: bool,
    pub can_redo: bool,
    pub history_index: usize,
    pub history_len: usize,
    pub version: u64,
}

/// `"{role} {n}"` for members of multi-unit groups, the bare role otherwise.
pub fn row_label(allocation: &Allocation, index: usize, group_size: usize) -> String {
    if group_size > 1 {
        format!("{} {}", allocation.role, index + 1)
    } else {
        allocation.role.to_string()
    }
}

impl BoardView {
    pub fn from_planner(planner: &Planner) -> Self {
        let timeline = planner.timeline();
        let groups = planner
            .group_rollups()
            .into_iter()
            .map(|rollup| group_view(planner, timeline, rollup))
            .collect();
        let (history_index, history_len) = planner.history_position();

        Self {
            project_name: planner.metadata().project_name.clone(),
            week_labels: timeline.week_labels(),
            week_dates: timeline.week_dates(planner.metadata().project_start_date),
            groups,
            warnings: planner.warnings(),
            summary: planner.cost_summary(),
            can_undo: planner.can_undo(),
            can_redo: planner.can_redo(),
            history_index,
            history_len,
            version: planner.version(),
        }
    }
}

fn group_view(planner: &Planner, timeline: &Timeline, rollup: GroupRollup) -> GroupView {
    let collapsed = planner.is_collapsed(rollup.group_id);
    let members = planner.group_members(rollup.group_id);
    let rows = if collapsed {
        Vec::new()
    } else {
        members
            .iter()
            .enumerate()
            .map(|(index, allocation)| RowView {
                allocation: (*allocation).clone(),
                label: row_label(allocation, index, members.len()),
                color: allocation.color(),
                selected: planner.selection() == Some(allocation.id),
                hovered: planner.hovered() == Some(allocation.id),
                bar: timeline.bar(
                    allocation.start_week,
                    allocation.weeks,
                    allocation.hours_per_week,
                ),
            })
            .collect()
    };

    GroupView {
        caption: rollup.caption(),
        collapsed,
        header_bar: timeline.group_bar(rollup.start_week, rollup.weeks),
        rows,
        rollup,
    }
}
