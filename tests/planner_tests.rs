use resource_planner::allocation::groups_are_consistent;
use resource_planner::{Allocation, Planner, Role};

fn hours_of(planner: &Planner, group_id: u32) -> Vec<u32> {
    planner
        .group_members(group_id)
        .iter()
        .map(|a| a.hours_per_week)
        .collect()
}

#[test]
fn add_group_uses_defaults_and_selects_it() {
    let mut planner = Planner::new();
    let id = planner.add_group();

    assert_eq!(
        planner.allocations(),
        &[Allocation::new(id, 1, Role::SeniorDeveloper, 40, 2, 1)]
    );
    assert_eq!(planner.selection(), Some(id));
    assert_eq!(planner.history_position(), (1, 2));
    assert_eq!(planner.allocations()[0].color(), "#3b82f6");
}

#[test]
fn adjust_group_hours_splits_above_full_time() {
    let mut planner = Planner::new();
    planner.add_group();

    assert!(planner.adjust_group_hours(1, 45));
    assert_eq!(hours_of(&planner, 1), vec![40, 40, 5]);
    assert!(groups_are_consistent(planner.allocations()));
}

#[test]
fn adjust_group_hours_merges_back_to_single_unit() {
    let mut planner = Planner::new();
    planner.add_group();
    planner.adjust_group_hours(1, 45);

    assert!(planner.adjust_group_hours(1, -60));
    assert_eq!(hours_of(&planner, 1), vec![25]);
}

#[test]
fn adjust_group_hours_clamps_and_skips_no_ops() {
    let mut planner = Planner::new();
    planner.add_group();
    planner.adjust_group_hours(1, -35);
    assert_eq!(hours_of(&planner, 1), vec![5]);

    let before = planner.allocations().to_vec();
    let position = planner.history_position();
    assert!(!planner.adjust_group_hours(1, -10));
    assert_eq!(planner.allocations(), before.as_slice());
    assert_eq!(planner.history_position(), position);

    planner.adjust_group_hours(1, 1000);
    assert_eq!(hours_of(&planner, 1), vec![40; 5]);
    assert!(!planner.adjust_group_hours(1, 5));
}

#[test]
fn adjust_group_hours_ignores_unknown_group() {
    let mut planner = Planner::new();
    assert!(!planner.adjust_group_hours(99, 5));
    assert_eq!(planner.history_position(), (0, 1));
}

#[test]
fn adjust_group_hours_moves_selection_to_first_unit() {
    let mut planner = Planner::new();
    let first = planner.add_group();
    planner.adjust_group_hours(1, 45);

    let new_first = planner.group_members(1)[0].id;
    assert_ne!(new_first, first);
    assert_eq!(planner.selection(), Some(new_first));
}

#[test]
fn adjust_group_hours_leaves_foreign_selection_alone() {
    let mut planner = Planner::new();
    planner.add_group();
    let second = planner.add_group();
    planner.adjust_group_hours(1, 45);
    assert_eq!(planner.selection(), Some(second));
}

#[test]
fn adjust_allocation_hours_resolves_group() {
    let mut planner = Planner::new();
    let id = planner.add_group();
    assert!(planner.adjust_allocation_hours(id, 5));
    assert_eq!(hours_of(&planner, 1), vec![40, 5]);
    assert!(!planner.adjust_allocation_hours(999, 5));
}

#[test]
fn adjust_weeks_pulls_start_back_onto_timeline() {
    let mut planner = Planner::new();
    let id = planner.add_group();
    planner.adjust_start_week(id, 10);
    assert_eq!(planner.allocation(id).unwrap().start_week, 11);

    assert!(planner.adjust_weeks(id, 3));
    let allocation = planner.allocation(id).unwrap();
    assert_eq!(allocation.weeks, 5);
    assert_eq!(allocation.start_week, 8);
}

#[test]
fn adjust_weeks_applies_to_whole_group_and_clamps() {
    let mut planner = Planner::new();
    let id = planner.add_group();
    planner.adjust_group_hours(1, 60);
    let member = planner.group_members(1)[1].id;

    assert!(planner.adjust_weeks(member, 20));
    assert!(planner.group_members(1).iter().all(|a| a.weeks == 12 && a.start_week == 1));
    assert!(!planner.adjust_weeks(member, 1));
    assert!(!planner.adjust_weeks(id, 1), "merged-away id is gone");
}

#[test]
fn adjust_start_week_clamps_to_visible_weeks() {
    let mut planner = Planner::new();
    let id = planner.add_group();

    assert!(planner.adjust_start_week(id, -5));
    assert_eq!(planner.allocation(id).unwrap().start_week, 0);
    assert!(!planner.adjust_start_week(id, -1));
    assert!(planner.adjust_start_week(id, 50));
    assert_eq!(planner.allocation(id).unwrap().start_week, 11);
}

#[test]
fn cycle_role_wraps_and_updates_every_member() {
    let mut planner = Planner::new();
    let id = planner.add_group();
    planner.adjust_group_hours(1, 45);
    let member = planner.group_members(1)[2].id;
    assert_ne!(member, id);

    assert!(planner.cycle_role(member, -1));
    assert!(
        planner
            .group_members(1)
            .iter()
            .all(|a| a.role == Role::DevOpsEngineer && a.color() == "#06b6d4")
    );
    planner.cycle_role(member, 1);
    assert!(planner.group_members(1).iter().all(|a| a.role == Role::SeniorDeveloper));
    assert!(!planner.cycle_role(12345, 1));
}

#[test]
fn delete_group_clears_selection_inside_group() {
    let mut planner = Planner::new();
    planner.add_group();
    let second = planner.add_group();
    planner.delete_group(2);

    assert_eq!(planner.selection(), None);
    assert!(planner.allocation(second).is_none());
    assert_eq!(planner.allocations().len(), 1);
}

#[test]
fn delete_missing_group_still_commits() {
    let mut planner = Planner::new();
    planner.add_group();
    planner.delete_group(42);

    assert_eq!(planner.history_position(), (2, 3));
    assert_eq!(planner.allocations().len(), 1);
    assert_eq!(planner.selection(), Some(1));
}

#[test]
fn undo_redo_round_trip() {
    let mut planner = Planner::new();
    planner.add_group();
    let added = planner.allocations().to_vec();

    assert!(planner.undo());
    assert!(planner.allocations().is_empty());
    assert_eq!(planner.selection(), None);
    assert!(!planner.undo());

    assert!(planner.redo());
    assert_eq!(planner.allocations(), added.as_slice());
    assert_eq!(planner.selection(), None);
    assert!(!planner.redo());
}

#[test]
fn new_edit_after_undo_discards_redo_branch() {
    let mut planner = Planner::new();
    let id = planner.add_group();
    planner.adjust_weeks(id, 1);
    planner.undo();
    assert!(planner.can_redo());

    planner.adjust_start_week(id, 1);
    assert!(!planner.can_redo());
    assert!(!planner.redo());
    assert_eq!(planner.allocation(id).unwrap().weeks, 2);
    assert_eq!(planner.history_position(), (2, 3));
}

#[test]
fn ids_stay_unique_across_undo() {
    let mut planner = Planner::new();
    let first = planner.add_group();
    planner.undo();
    let second = planner.add_group();
    assert_ne!(first, second);
    assert_ne!(planner.allocations()[0].group_id, 1);
}

#[test]
fn select_and_hover_ignore_unknown_ids() {
    let mut planner = Planner::new();
    let id = planner.add_group();

    assert_eq!(planner.select(Some(77)), Some(id));
    assert_eq!(planner.select(None), None);
    assert_eq!(planner.select(Some(id)), Some(id));

    planner.set_hover(Some(77));
    assert_eq!(planner.hovered(), None);
    planner.set_hover(Some(id));
    assert_eq!(planner.hovered(), Some(id));
    assert_eq!(planner.history_position(), (1, 2));
}

#[test]
fn toggle_collapse_flips_without_committing() {
    let mut planner = Planner::new();
    planner.add_group();

    assert!(planner.toggle_group_collapsed(1));
    assert!(planner.is_collapsed(1));
    assert!(!planner.toggle_group_collapsed(1));
    assert!(planner.collapsed_groups().is_empty());
    assert!(!planner.toggle_group_collapsed(9));
    assert_eq!(planner.history_position(), (1, 2));
}

#[test]
fn group_invariant_holds_through_mixed_edits() {
    let mut planner = Planner::new();
    let a = planner.add_group();
    planner.add_group();
    planner.adjust_group_hours(1, 95);
    let member = planner.group_members(1)[1].id;
    planner.adjust_weeks(member, 4);
    planner.adjust_start_week(member, 3);
    planner.cycle_role(member, 2);
    planner.adjust_group_hours(2, 50);
    planner.undo();
    planner.adjust_group_hours(1, -20);

    assert!(groups_are_consistent(planner.allocations()));
    assert!(planner.allocation(a).is_none());
    let totals: u32 = planner.group_members(1).iter().map(|m| m.hours_per_week).sum();
    assert_eq!(totals, 115);
}

#[test]
fn extreme_hour_deltas_clamp_to_range() {
    let mut planner = Planner::new();
    planner.add_group();

    assert!(planner.adjust_group_hours(1, i64::MAX));
    let hours: Vec<u32> = planner.group_members(1).iter().map(|a| a.hours_per_week).collect();
    assert_eq!(hours, vec![40, 40, 40, 40, 40]);

    assert!(planner.adjust_group_hours(1, i64::MIN));
    let hours: Vec<u32> = planner.group_members(1).iter().map(|a| a.hours_per_week).collect();
    assert_eq!(hours, vec![5]);
    assert!(!planner.adjust_group_hours(1, i64::MIN));
}

#[test]
fn extreme_week_and_start_deltas_clamp_to_timeline() {
    let mut planner = Planner::new();
    let id = planner.add_group();

    assert!(planner.adjust_weeks(id, i64::MAX));
    assert_eq!(planner.allocation(id).unwrap().weeks, 12);
    assert_eq!(planner.allocation(id).unwrap().start_week, 1);

    assert!(planner.adjust_weeks(id, i64::MIN));
    assert_eq!(planner.allocation(id).unwrap().weeks, 1);

    assert!(planner.adjust_start_week(id, i64::MAX));
    assert_eq!(planner.allocation(id).unwrap().start_week, 12);
    assert!(planner.adjust_start_week(id, i64::MIN));
    assert_eq!(planner.allocation(id).unwrap().start_week, 0);
}
