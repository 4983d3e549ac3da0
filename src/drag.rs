use crate::allocation::{AllocationId, GroupId};
use crate::timeline::Timeline;

/// An in-progress drag of a group's bar along the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub allocation_id: AllocationId,
    pub group_id: GroupId,
    pub origin_x: f64,
    pub original_start_week: u32,
}

impl DragSession {
    pub fn new(
        allocation_id: AllocationId,
        group_id: GroupId,
        origin_x: f64,
        original_start_week: u32,
    ) -> Self {
        Self {
            allocation_id,
            group_id,
            origin_x,
            original_start_week,
        }
    }

    /// Start week the group should preview with the pointer at `pointer_x`.
    pub fn candidate_start_week(&self, timeline: &Timeline, pointer_x: f64, weeks: u32) -> u32 {
        let delta = timeline.week_from_pixel_delta(pointer_x - self.origin_x);
        timeline.clamp_start_week(i64::from(self.original_start_week).saturating_add(delta), weeks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_clamps_to_timeline() {
        let timeline = Timeline::default();
        let session = DragSession::new(1, 1, 100.0, 1);

        assert_eq!(session.candidate_start_week(&timeline, 100.0, 2), 1);
        assert_eq!(session.candidate_start_week(&timeline, 260.0, 2), 3);
        assert_eq!(session.candidate_start_week(&timeline, -500.0, 2), 0);
        assert_eq!(session.candidate_start_week(&timeline, 5000.0, 2), 11);
    }

    #[test]
    fn far_off_screen_pointer_saturates_at_edges() {
        let timeline = Timeline::default();
        let session = DragSession::new(1, 1, 0.0, 4);

        assert_eq!(session.candidate_start_week(&timeline, 1e30, 2), 11);
        assert_eq!(session.candidate_start_week(&timeline, -1e30, 2), 0);
        assert_eq!(session.candidate_start_week(&timeline, f64::INFINITY, 3), 10);
        assert_eq!(session.candidate_start_week(&timeline, f64::NEG_INFINITY, 3), 0);
        assert_eq!(session.candidate_start_week(&timeline, f64::NAN, 2), 4);
    }
}
