//! Read-only projections over an allocation list. Nothing here is cached;
//! callers recompute from the current list whenever it changes.

use crate::allocation::{Allocation, GroupId};
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRollup {
    pub group_id: GroupId,
    pub total_hours: u32,
    pub member_count: usize,
    pub weeks: u32,
    pub start_week: u32,
    pub role: Role,
    pub color: String,
}

impl GroupRollup {
    pub fn is_single_resource(&self) -> bool {
        self.member_count == 1
    }

    /// Header text, e.g. `85h · 2w · 3 resources`.
    pub fn caption(&self) -> String {
        let plural = if self.member_count > 1 { "s" } else { "" };
        format!(
            "{}h · {}w · {} resource{}",
            self.total_hours, self.weeks, self.member_count, plural
        )
    }
}

/// One rollup per group, ascending by group id. Shared fields come from the
/// group's first member.
pub fn group_rollups(allocations: &[Allocation]) -> Vec<GroupRollup> {
    let mut groups: BTreeMap<GroupId, GroupRollup> = BTreeMap::new();
    for allocation in allocations {
        groups
            .entry(allocation.group_id)
            .and_modify(|rollup| {
                rollup.total_hours += allocation.hours_per_week;
                rollup.member_count += 1;
            })
            .or_insert_with(|| GroupRollup {
                group_id: allocation.group_id,
                total_hours: allocation.hours_per_week,
                member_count: 1,
                weeks: allocation.weeks,
                start_week: allocation.start_week,
                role: allocation.role,
                color: allocation.color().to_string(),
            });
    }
    groups.into_values().collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverAllocationWarning {
    pub role: Role,
    pub hours: u32,
}

impl OverAllocationWarning {
    pub fn message(&self) -> String {
        format!(
            "{}: {}h/week total (over-allocated - consider splitting work)",
            self.role, self.hours
        )
    }
}

/// Per-role weekly hours summed across every group, in order of first
/// appearance of each role.
pub fn role_hours(allocations: &[Allocation]) -> Vec<(Role, u32)> {
    let mut totals: Vec<(Role, u32)> = Vec::new();
    for allocation in allocations {
        match totals.iter_mut().find(|(role, _)| *role == allocation.role) {
            Some((_, hours)) => *hours += allocation.hours_per_week,
            None => totals.push((allocation.role, allocation.hours_per_week)),
        }
    }
    totals
}

/// Roles whose combined weekly hours strictly exceed `threshold`.
pub fn over_allocation_warnings(
    allocations: &[Allocation],
    threshold: u32,
) -> Vec<OverAllocationWarning> {
    role_hours(allocations)
        .into_iter()
        .filter(|(_, hours)| *hours > threshold)
        .map(|(role, hours)| OverAllocationWarning { role, hours })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCost {
    pub role: Role,
    pub cost: u64,
}

impl RoleCost {
    /// Fraction of the largest role cost, for proportional bars.
    pub fn share(&self, max_cost: u64) -> f64 {
        self.cost as f64 / max_cost.max(1) as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSummary {
    pub group_count: usize,
    /// Sum of weekly hours, without the duration multiplier.
    pub total_hours: u64,
    /// Sum of hours over each allocation's full duration.
    pub scheduled_hours: u64,
    pub total_cost: u64,
    pub role_count: usize,
    /// Ranked by cost, most expensive first.
    pub role_costs: Vec<RoleCost>,
}

impl CostSummary {
    pub fn max_role_cost(&self) -> u64 {
        self.role_costs
            .iter()
            .map(|rc| rc.cost)
            .max()
            .unwrap_or(0)
            .max(1)
    }

    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("groups={}", self.group_count));
        parts.push(format!("hours/week={}", self.total_hours));
        parts.push(format!("scheduled_hours={}", self.scheduled_hours));
        parts.push(format!("cost={}", format_currency(self.total_cost)));
        parts.push(format!("roles={}", self.role_count));
        parts.join(", ")
    }
}

pub fn cost_summary(allocations: &[Allocation], hourly_rate: u32) -> CostSummary {
    let mut role_costs: Vec<RoleCost> = Vec::new();
    for allocation in allocations {
        let cost = allocation.cost(hourly_rate);
        match role_costs.iter_mut().find(|rc| rc.role == allocation.role) {
            Some(entry) => entry.cost += cost,
            None => role_costs.push(RoleCost {
                role: allocation.role,
                cost,
            }),
        }
    }
    // Stable: equal costs keep first-appearance order.
    role_costs.sort_by(|a, b| b.cost.cmp(&a.cost));

    let groups: HashSet<GroupId> = allocations.iter().map(|a| a.group_id).collect();
    let roles: BTreeSet<Role> = allocations.iter().map(|a| a.role).collect();

    CostSummary {
        group_count: groups.len(),
        total_hours: allocations
            .iter()
            .map(|a| u64::from(a.hours_per_week))
            .sum(),
        scheduled_hours: allocations.iter().map(Allocation::scheduled_hours).sum(),
        total_cost: role_costs.iter().map(|rc| rc.cost).sum(),
        role_count: roles.len(),
        role_costs,
    }
}

/// Compact cost: `$20.0k` from one thousand up, `$950` below.
pub fn format_cost(cost: u64) -> String {
    if cost >= 1000 {
        let tenths = (cost + 50) / 100;
        format!("${}.{}k", tenths / 10, tenths % 10)
    } else {
        format!("${cost}")
    }
}

/// Full cost with thousands separators, e.g. `$1,250,000`.
pub fn format_currency(cost: u64) -> String {
    let digits = cost.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}
