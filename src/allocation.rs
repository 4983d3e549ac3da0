use crate::role::Role;
use serde::{Deserialize, Serialize};

pub type AllocationId = u32;
pub type GroupId = u32;

/// One discrete capacity unit of a group: a single worker's weekly hours.
///
/// Every member of a group shares `role`, `weeks` and `start_week`; only
/// `hours_per_week` varies between members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub id: AllocationId,
    pub group_id: GroupId,
    pub role: Role,
    pub hours_per_week: u32,
    /// Duration in weeks.
    pub weeks: u32,
    /// Zero-based index of the first timeline week.
    pub start_week: u32,
}

impl Allocation {
    pub fn new(
        id: AllocationId,
        group_id: GroupId,
        role: Role,
        hours_per_week: u32,
        weeks: u32,
        start_week: u32,
    ) -> Self {
        Self {
            id,
            group_id,
            role,
            hours_per_week,
            weeks,
            start_week,
        }
    }

    pub fn color(&self) -> &'static str {
        self.role.color()
    }

    /// Exclusive end week.
    pub fn end_week(&self) -> u32 {
        self.start_week + self.weeks
    }

    /// Hours over the whole duration.
    pub fn scheduled_hours(&self) -> u64 {
        u64::from(self.hours_per_week) * u64::from(self.weeks)
    }

    pub fn cost(&self, hourly_rate: u32) -> u64 {
        self.scheduled_hours() * u64::from(hourly_rate)
    }

    /// Copy of `self` carrying another unit's id and hours, keeping the
    /// group's shared placement and role.
    pub fn with_unit(&self, id: AllocationId, hours_per_week: u32) -> Self {
        Self {
            id,
            hours_per_week,
            ..self.clone()
        }
    }
}

/// Monotonic id source. Ids are never reused, even after undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u32,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdSequence {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    pub fn peek(&self) -> u32 {
        self.next
    }
}

/// Total weekly hours of the members of `group_id`.
pub fn group_total(allocations: &[Allocation], group_id: GroupId) -> u32 {
    allocations
        .iter()
        .filter(|a| a.group_id == group_id)
        .map(|a| a.hours_per_week)
        .sum()
}

/// True when every group's members agree on role, weeks and start week.
pub fn groups_are_consistent(allocations: &[Allocation]) -> bool {
    allocations.iter().all(|a| {
        allocations
            .iter()
            .filter(|b| b.group_id == a.group_id)
            .all(|b| b.role == a.role && b.weeks == a.weeks && b.start_week == a.start_week)
    })
}
