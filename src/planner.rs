use crate::aggregates::{self, CostSummary, GroupRollup, OverAllocationWarning};
use crate::allocation::{Allocation, AllocationId, GroupId, IdSequence};
use crate::config::{ConfigError, PlannerConfig};
use crate::decomposition;
use crate::drag::DragSession;
use crate::history::History;
use crate::metadata::PlanMetadata;
use crate::role::Role;
use crate::shortcuts::{HistoryShortcut, KeyChord};
use crate::timeline::Timeline;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A mutation was stored and pushed onto the history.
    Committed,
    /// Undo or redo swapped in a stored snapshot.
    Restored,
    /// Drag preview moved a group without touching the history.
    Preview,
    Selection,
    Hover,
    Collapse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub version: u64,
    pub kind: ChangeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Change)>;

/// The planning board's single state container.
///
/// Every mutation goes through the command methods below. Committing
/// commands build a complete new allocation list and push it onto the
/// history in one step; reads never observe a half-applied change.
pub struct Planner {
    config: PlannerConfig,
    timeline: Timeline,
    metadata: PlanMetadata,
    allocations: Arc<Vec<Allocation>>,
    history: History<Vec<Allocation>>,
    selection: Option<AllocationId>,
    hovered: Option<AllocationId>,
    collapsed: BTreeSet<GroupId>,
    drag: Option<DragSession>,
    allocation_ids: IdSequence,
    group_ids: IdSequence,
    version: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for Planner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Planner")
            .field("allocations", &self.allocations)
            .field("history", &self.history)
            .field("selection", &self.selection)
            .field("drag", &self.drag)
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::from_parts(PlannerConfig::default(), PlanMetadata::default())
    }
}

impl Planner {
    fn from_parts(config: PlannerConfig, metadata: PlanMetadata) -> Self {
        let history = History::new(Vec::new());
        Self {
            timeline: Timeline::new(&config),
            config,
            metadata,
            allocations: history.current(),
            history,
            selection: None,
            hovered: None,
            collapsed: BTreeSet::new(),
            drag: None,
            allocation_ids: IdSequence::default(),
            group_ids: IdSequence::default(),
            version: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PlannerConfig, metadata: PlanMetadata) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, metadata))
    }

    // Reads

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn metadata(&self) -> &PlanMetadata {
        &self.metadata
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn allocation(&self, id: AllocationId) -> Option<&Allocation> {
        self.allocations.iter().find(|a| a.id == id)
    }

    pub fn group_members(&self, group_id: GroupId) -> Vec<&Allocation> {
        self.allocations
            .iter()
            .filter(|a| a.group_id == group_id)
            .collect()
    }

    pub fn selection(&self) -> Option<AllocationId> {
        self.selection
    }

    pub fn selected_allocation(&self) -> Option<&Allocation> {
        self.selection.and_then(|id| self.allocation(id))
    }

    pub fn hovered(&self) -> Option<AllocationId> {
        self.hovered
    }

    pub fn collapsed_groups(&self) -> &BTreeSet<GroupId> {
        &self.collapsed
    }

    pub fn is_collapsed(&self, group_id: GroupId) -> bool {
        self.collapsed.contains(&group_id)
    }

    /// Current history index and number of stored snapshots.
    pub fn history_position(&self) -> (usize, usize) {
        (self.history.index(), self.history.len())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Incremented on every change a presentation layer could observe.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn group_rollups(&self) -> Vec<GroupRollup> {
        aggregates::group_rollups(&self.allocations)
    }

    pub fn warnings(&self) -> Vec<OverAllocationWarning> {
        aggregates::over_allocation_warnings(&self.allocations, self.config.over_allocation_hours)
    }

    pub fn cost_summary(&self) -> CostSummary {
        aggregates::cost_summary(&self.allocations, self.config.hourly_rate)
    }

    // Subscriptions

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Change) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, kind: ChangeKind) {
        self.version += 1;
        let change = Change {
            version: self.version,
            kind,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
    }

    fn commit(&mut self, next: Vec<Allocation>, action: &str) {
        let snapshot = Arc::new(next);
        self.allocations = Arc::clone(&snapshot);
        self.history.commit(snapshot);
        debug!(
            action,
            allocations = self.allocations.len(),
            history_index = self.history.index(),
            "committed"
        );
        self.notify(ChangeKind::Committed);
    }

    fn restore(&mut self, snapshot: Arc<Vec<Allocation>>, action: &str) {
        self.allocations = snapshot;
        self.selection = None;
        if self.drag.take().is_some() {
            debug!(action, "active drag dropped");
        }
        debug!(action, history_index = self.history.index(), "restored");
        self.notify(ChangeKind::Restored);
    }

    /// Current list with `update` applied to every member of `group_id`.
    fn map_group<F>(&self, group_id: GroupId, update: F) -> Vec<Allocation>
    where
        F: Fn(&mut Allocation),
    {
        self.allocations
            .iter()
            .cloned()
            .map(|mut a| {
                if a.group_id == group_id {
                    update(&mut a);
                }
                a
            })
            .collect()
    }

    // Commands

    /// Creates a new single-unit group with default placement, selects it
    /// and returns its allocation id.
    pub fn add_group(&mut self) -> AllocationId {
        let id = self.allocation_ids.next_id();
        let group_id = self.group_ids.next_id();
        let allocation = Allocation::new(
            id,
            group_id,
            Role::first(),
            self.config.default_hours,
            self.config.default_weeks,
            self.config.default_start_week,
        );
        let mut next = self.allocations.as_ref().clone();
        next.push(allocation);
        self.selection = Some(id);
        self.commit(next, "add_group");
        id
    }

    /// Changes a group's total weekly hours by `delta`, clamped to the
    /// configured range, and re-splits it into capacity units. The rebuilt
    /// group moves to the end of the list. Returns whether anything changed.
    pub fn adjust_group_hours(&mut self, group_id: GroupId, delta: i64) -> bool {
        let members: Vec<Allocation> = self.group_members(group_id).into_iter().cloned().collect();
        let Some(base) = members.first() else {
            return false;
        };
        let total: u32 = members.iter().map(|a| a.hours_per_week).sum();
        let new_total = self.config.clamp_group_hours(i64::from(total).saturating_add(delta));
        if new_total == total {
            return false;
        }

        let rebuilt = decomposition::rebuild_group(
            base,
            new_total,
            self.config.full_time_hours,
            &mut self.allocation_ids,
        );
        let selection_in_group = self
            .selection
            .is_some_and(|id| members.iter().any(|a| a.id == id));
        if selection_in_group {
            self.selection = rebuilt.first().map(|a| a.id);
        }

        let mut next: Vec<Allocation> = self
            .allocations
            .iter()
            .filter(|a| a.group_id != group_id)
            .cloned()
            .collect();
        next.extend(rebuilt);
        self.commit(next, "adjust_group_hours");
        true
    }

    /// Hours adjustment addressed through any member of the group.
    pub fn adjust_allocation_hours(&mut self, allocation_id: AllocationId, delta: i64) -> bool {
        match self.allocation(allocation_id).map(|a| a.group_id) {
            Some(group_id) => self.adjust_group_hours(group_id, delta),
            None => false,
        }
    }

    /// Changes the group's duration, pulling its start week back when the
    /// longer bar would run off the timeline.
    pub fn adjust_weeks(&mut self, allocation_id: AllocationId, delta: i64) -> bool {
        let Some(target) = self.allocation(allocation_id).cloned() else {
            return false;
        };
        let new_weeks = self.config.clamp_weeks(i64::from(target.weeks).saturating_add(delta));
        if new_weeks == target.weeks {
            return false;
        }
        let new_start = target
            .start_week
            .min(self.timeline.max_start_week(new_weeks));
        let next = self.map_group(target.group_id, |a| {
            a.weeks = new_weeks;
            a.start_week = new_start;
        });
        self.commit(next, "adjust_weeks");
        true
    }

    pub fn adjust_start_week(&mut self, allocation_id: AllocationId, delta: i64) -> bool {
        let Some(target) = self.allocation(allocation_id).cloned() else {
            return false;
        };
        let new_start = self
            .timeline
            .clamp_start_week(i64::from(target.start_week).saturating_add(delta), target.weeks);
        if new_start == target.start_week {
            return false;
        }
        let next = self.map_group(target.group_id, |a| a.start_week = new_start);
        self.commit(next, "adjust_start_week");
        true
    }

    /// Moves the group `direction` steps through the role list, wrapping.
    pub fn cycle_role(&mut self, allocation_id: AllocationId, direction: i32) -> bool {
        let Some(target) = self.allocation(allocation_id).cloned() else {
            return false;
        };
        let role = target.role.cycle(direction);
        let next = self.map_group(target.group_id, |a| a.role = role);
        self.commit(next, "cycle_role");
        true
    }

    /// Removes every member of the group. Commits even when the group does
    /// not exist, leaving an unchanged snapshot on the history.
    pub fn delete_group(&mut self, group_id: GroupId) {
        let selection_in_group = self
            .selected_allocation()
            .is_some_and(|a| a.group_id == group_id);
        if selection_in_group {
            self.selection = None;
        }
        if self.drag.is_some_and(|session| session.group_id == group_id) {
            self.drag = None;
        }
        let next: Vec<Allocation> = self
            .allocations
            .iter()
            .filter(|a| a.group_id != group_id)
            .cloned()
            .collect();
        self.commit(next, "delete_group");
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.restore(snapshot, "undo");
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(snapshot, "redo");
                true
            }
            None => false,
        }
    }

    pub fn apply_shortcut(&mut self, chord: KeyChord) -> bool {
        match HistoryShortcut::from_chord(chord) {
            Some(HistoryShortcut::Undo) => self.undo(),
            Some(HistoryShortcut::Redo) => self.redo(),
            None => false,
        }
    }

    /// Selects an allocation, or clears the selection with `None`. Unknown
    /// ids are ignored. Returns the selection afterwards.
    pub fn select(&mut self, allocation_id: Option<AllocationId>) -> Option<AllocationId> {
        if allocation_id.is_some_and(|id| self.allocation(id).is_none()) {
            return self.selection;
        }
        if self.selection != allocation_id {
            self.selection = allocation_id;
            self.notify(ChangeKind::Selection);
        }
        self.selection
    }

    pub fn set_hover(&mut self, allocation_id: Option<AllocationId>) {
        if allocation_id.is_some_and(|id| self.allocation(id).is_none()) {
            return;
        }
        if self.hovered != allocation_id {
            self.hovered = allocation_id;
            self.notify(ChangeKind::Hover);
        }
    }

    /// Flips the group's collapsed flag and returns the new value. Unknown
    /// groups stay expanded.
    pub fn toggle_group_collapsed(&mut self, group_id: GroupId) -> bool {
        if !self.allocations.iter().any(|a| a.group_id == group_id) {
            return false;
        }
        let collapsed = if self.collapsed.remove(&group_id) {
            false
        } else {
            self.collapsed.insert(group_id);
            true
        };
        self.notify(ChangeKind::Collapse);
        collapsed
    }

    // Drag

    /// Starts dragging the group holding `allocation_id`. A session already
    /// in progress is released first, committing its preview.
    pub fn begin_drag(&mut self, allocation_id: AllocationId, pointer_x: f64) -> bool {
        if self.allocation(allocation_id).is_none() {
            return false;
        }
        if self.drag.is_some() {
            self.end_drag();
        }
        let Some(target) = self.allocation(allocation_id) else {
            return false;
        };
        let session = DragSession::new(allocation_id, target.group_id, pointer_x, target.start_week);
        debug!(
            allocation_id,
            group_id = session.group_id,
            start_week = session.original_start_week,
            "drag started"
        );
        self.drag = Some(session);
        true
    }

    /// Previews the group at the week under the pointer without committing.
    /// Returns whether the preview moved.
    pub fn update_drag(&mut self, pointer_x: f64) -> bool {
        let Some(session) = self.drag else {
            return false;
        };
        let Some((weeks, current_start)) = self
            .allocations
            .iter()
            .find(|a| a.group_id == session.group_id)
            .map(|a| (a.weeks, a.start_week))
        else {
            return false;
        };
        let candidate = session.candidate_start_week(&self.timeline, pointer_x, weeks);
        if candidate == current_start {
            return false;
        }
        self.allocations = Arc::new(self.map_group(session.group_id, |a| a.start_week = candidate));
        trace!(group_id = session.group_id, start_week = candidate, "drag preview");
        self.notify(ChangeKind::Preview);
        true
    }

    /// Ends the drag. The previewed placement is committed once, and only
    /// when the group ended up away from where the drag began.
    pub fn end_drag(&mut self) -> bool {
        let Some(session) = self.drag.take() else {
            return false;
        };
        let moved = self
            .allocations
            .iter()
            .find(|a| a.group_id == session.group_id)
            .is_some_and(|a| a.start_week != session.original_start_week);
        if !moved {
            debug!(group_id = session.group_id, "drag released in place");
            return false;
        }
        let next = self.allocations.as_ref().clone();
        self.commit(next, "drag");
        true
    }

    /// Abandons the drag, putting the group back where it started.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(session) = self.drag.take() else {
            return false;
        };
        let displaced = self
            .allocations
            .iter()
            .any(|a| a.group_id == session.group_id && a.start_week != session.original_start_week);
        if displaced {
            self.allocations = Arc::new(self.map_group(session.group_id, |a| {
                a.start_week = session.original_start_week;
            }));
            self.notify(ChangeKind::Preview);
        }
        debug!(group_id = session.group_id, "drag cancelled");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_see_every_change_in_order() {
        let mut planner = Planner::new();
        let seen: Rc<RefCell<Vec<Change>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = planner.subscribe(move |change| sink.borrow_mut().push(*change));

        let id = planner.add_group();
        planner.set_hover(Some(id));
        planner.undo();

        let kinds: Vec<ChangeKind> = seen.borrow().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ChangeKind::Committed, ChangeKind::Hover, ChangeKind::Restored]
        );
        assert_eq!(seen.borrow().last().map(|c| c.version), Some(planner.version()));

        assert!(planner.unsubscribe(subscription));
        planner.redo();
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn undo_drops_active_drag() {
        let mut planner = Planner::new();
        let id = planner.add_group();
        planner.begin_drag(id, 0.0);
        planner.undo();
        assert!(!planner.is_dragging());
        assert!(!planner.end_drag());
    }
}
