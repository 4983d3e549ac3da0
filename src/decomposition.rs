//! Canonical split/merge of a group's weekly hours into capacity units.
//!
//! A total `T` becomes `floor(T / full_time)` full-time units plus one
//! partial unit for any remainder. A total at or below the threshold is a
//! single unit. Re-decomposing the sum of the output yields the same hours.

use crate::allocation::{Allocation, IdSequence};

/// Hour values of the units representing `total`, full-time units first.
pub fn decompose(total: u32, full_time: u32) -> Vec<u32> {
    if full_time == 0 || total <= full_time {
        return vec![total];
    }
    let full_units = (total / full_time) as usize;
    let remainder = total % full_time;
    let mut hours = vec![full_time; full_units];
    if remainder > 0 {
        hours.push(remainder);
    }
    hours
}

/// Rebuilds a group from `base` (its first member) for a new `total`.
///
/// A total that fits one unit keeps `base.id`; a split hands out fresh ids.
pub fn rebuild_group(
    base: &Allocation,
    total: u32,
    full_time: u32,
    ids: &mut IdSequence,
) -> Vec<Allocation> {
    if total <= full_time {
        return vec![base.with_unit(base.id, total)];
    }
    decompose(total, full_time)
        .into_iter()
        .map(|hours| base.with_unit(ids.next_id(), hours))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    #[test]
    fn totals_within_threshold_stay_single() {
        assert_eq!(decompose(5, 40), vec![5]);
        assert_eq!(decompose(40, 40), vec![40]);
    }

    #[test]
    fn totals_above_threshold_split_with_remainder_last() {
        assert_eq!(decompose(85, 40), vec![40, 40, 5]);
        assert_eq!(decompose(80, 40), vec![40, 40]);
        assert_eq!(decompose(200, 40), vec![40; 5]);
    }

    #[test]
    fn decomposition_is_idempotent() {
        for total in 5..=200 {
            let first = decompose(total, 40);
            let again = decompose(first.iter().sum(), 40);
            assert_eq!(first, again, "total {total}");
        }
    }

    #[test]
    fn merge_keeps_base_id_and_split_uses_fresh_ids() {
        let base = Allocation::new(7, 3, Role::Designer, 40, 4, 2);
        let mut ids = IdSequence::default();

        let merged = rebuild_group(&base, 25, 40, &mut ids);
        assert_eq!(merged, vec![Allocation::new(7, 3, Role::Designer, 25, 4, 2)]);
        assert_eq!(ids.peek(), 1);

        let split = rebuild_group(&base, 45, 40, &mut ids);
        let ids_used: Vec<u32> = split.iter().map(|a| a.id).collect();
        assert_eq!(ids_used, vec![1, 2]);
        assert!(split.iter().all(|a| a.group_id == 3 && a.weeks == 4 && a.start_week == 2));
    }
}
