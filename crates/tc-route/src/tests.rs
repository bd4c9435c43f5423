//! Unit tests for tc-route.

use tc_core::{CheckpointId, Direction};

use crate::{RouteError, RouteModel};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ids(raw: &[u32]) -> Vec<CheckpointId> {
    raw.iter().copied().map(CheckpointId).collect()
}

/// Loop `[c0..c9]` with shared run `[c4, c5, c6]`.
fn ten_loop() -> RouteModel {
    RouteModel::new(ids(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]), ids(&[4, 5, 6]), vec![]).unwrap()
}

fn build_err(route: &[u32], shared: &[u32]) -> RouteError {
    RouteModel::new(ids(route), ids(shared), vec![]).unwrap_err()
}

// ── Role derivation ───────────────────────────────────────────────────────────

#[cfg(test)]
mod roles {
    use super::*;

    #[test]
    fn forward_roles() {
        let route = ten_loop();
        assert_eq!(route.segment_entry(), CheckpointId(3));
        assert_eq!(route.segment_exit(), CheckpointId(7));
        assert_eq!(route.segment_announce(), CheckpointId(1));
        assert_eq!(route.lap_end(), CheckpointId(9));
        assert!(!route.currently_inverted());
    }

    #[test]
    fn inverted_roles_mirror_traversal() {
        let mut route = ten_loop();
        route.invert();
        assert!(route.currently_inverted());
        assert_eq!(route.direction(), Direction::Reverse);
        // Reverse traversal: c9 → c8 → c7 → [c6 c5 c4] → c3 → …
        assert_eq!(route.segment_entry(), CheckpointId(7));
        assert_eq!(route.segment_exit(), CheckpointId(3));
        assert_eq!(route.segment_announce(), CheckpointId(9));
        assert_eq!(route.lap_end(), CheckpointId(9));
    }

    #[test]
    fn double_invert_restores_forward() {
        let mut route = ten_loop();
        let forward = route.boundaries();
        route.invert();
        route.invert();
        assert_eq!(route.boundaries(), forward);
        assert_eq!(route.entry_side(), tc_core::EntrySide::A);
    }

    #[test]
    fn boundaries_for_matches_current() {
        let mut route = ten_loop();
        route.invert();
        assert_eq!(route.boundaries(), route.boundaries_for(Direction::Reverse));
        assert_eq!(route.entry_side(), tc_core::EntrySide::B);
    }

    #[test]
    fn single_checkpoint_segment() {
        let route = RouteModel::new(ids(&[10, 11, 12, 13, 14, 15, 16]), ids(&[13]), vec![]).unwrap();
        assert_eq!(route.segment_announce(), CheckpointId(10));
        assert_eq!(route.segment_entry(), CheckpointId(12));
        assert_eq!(route.segment_exit(), CheckpointId(14));
    }

    #[test]
    fn segment_starting_at_third_position_announces_on_lap_end() {
        let route = RouteModel::new(ids(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]), ids(&[2, 3]), vec![]).unwrap();
        assert_eq!(route.segment_announce(), CheckpointId(9));
        assert_eq!(route.segment_entry(), CheckpointId(1));
        assert_eq!(route.segment_exit(), CheckpointId(4));
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use super::*;

    #[test]
    fn empty_route() {
        assert!(matches!(build_err(&[], &[1]), RouteError::EmptyRoute));
    }

    #[test]
    fn empty_segment() {
        assert!(matches!(build_err(&[0, 1, 2], &[]), RouteError::EmptySegment));
    }

    #[test]
    fn duplicate_checkpoint() {
        let err = build_err(&[0, 1, 2, 1, 4, 5, 6, 7], &[4]);
        assert!(matches!(err, RouteError::DuplicateCheckpoint(CheckpointId(1))));
    }

    #[test]
    fn gap_in_segment_is_not_contiguous() {
        let err = build_err(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9], &[4, 6]);
        assert!(matches!(err, RouteError::SegmentNotContiguous));
    }

    #[test]
    fn segment_outside_route_is_not_contiguous() {
        let err = build_err(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9], &[42]);
        assert!(matches!(err, RouteError::SegmentNotContiguous));
    }

    #[test]
    fn segment_longer_than_route() {
        let err = build_err(&[0, 1], &[0, 1, 2]);
        assert!(matches!(err, RouteError::SegmentNotContiguous));
    }

    #[test]
    fn segment_over_lap_end() {
        let err = build_err(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9], &[8, 9]);
        assert!(matches!(err, RouteError::SegmentContainsLapEnd(CheckpointId(9))));
    }

    #[test]
    fn segment_in_first_two_positions_rejected() {
        for shared in [&[0u32, 1][..], &[1, 2][..], &[0][..], &[1][..]] {
            let err = build_err(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9], shared);
            assert!(
                matches!(
                    err,
                    RouteError::BoundaryOutsideLap { direction: Direction::Forward, role: "announce" }
                ),
                "shared {shared:?} gave {err:?}",
            );
        }
    }

    #[test]
    fn exit_on_lap_end_rejected() {
        let err = build_err(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9], &[7, 8]);
        assert!(matches!(
            err,
            RouteError::BoundaryOutsideLap { direction: Direction::Forward, role: "exit" }
        ));
    }

    #[test]
    fn reverse_announce_before_lap_end_rejected() {
        let err = build_err(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9], &[6, 7]);
        assert!(matches!(
            err,
            RouteError::BoundaryOutsideLap { direction: Direction::Reverse, role: "announce" }
        ));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use tc_core::{AgentId, SwitchId, SwitchPosition};

    use super::*;
    use crate::{SwitchSetting, load_layout_reader};

    const TWO_AGENT_CSV: &str = "\
agent_id,kind,id,value
0,checkpoint,0,
0,checkpoint,1,
0,checkpoint,2,
0,checkpoint,3,
0,checkpoint,4,
0,checkpoint,5,
0,checkpoint,6,
0,checkpoint,7,
0,checkpoint,8,
0,checkpoint,9,
0,shared,4,
0,shared,5,
0,shared,6,
0,switch,16,diverted
0,switch,15,straight
1,checkpoint,20,
1,checkpoint,21,
1,checkpoint,22,
1,checkpoint,23,
1,checkpoint,6,
1,checkpoint,5,
1,checkpoint,4,
1,checkpoint,24,
1,checkpoint,25,
1,checkpoint,26,
1,shared,6,
1,shared,5,
1,shared,4,
";

    #[test]
    fn loads_both_agents() {
        let layout = load_layout_reader(Cursor::new(TWO_AGENT_CSV)).unwrap();
        assert_eq!(layout.len(), 2);

        let a = &layout[&AgentId(0)];
        assert_eq!(a.segment_entry(), CheckpointId(3));
        assert_eq!(
            a.switches(),
            &[
                SwitchSetting::new(SwitchId(16), SwitchPosition::Diverted),
                SwitchSetting::new(SwitchId(15), SwitchPosition::Straight),
            ]
        );

        let b = &layout[&AgentId(1)];
        assert_eq!(b.segment_announce(), CheckpointId(21));
        assert_eq!(b.segment_entry(), CheckpointId(23));
        assert_eq!(b.segment_exit(), CheckpointId(24));
        assert!(b.switches().is_empty());
    }

    #[test]
    fn unknown_kind_is_parse_error() {
        let csv = "agent_id,kind,id,value\n0,signal,3,\n";
        let err = load_layout_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, RouteError::Parse(_)));
    }

    #[test]
    fn bad_switch_position_is_parse_error() {
        let csv = "agent_id,kind,id,value\n0,switch,3,sideways\n";
        let err = load_layout_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, RouteError::Parse(_)));
    }

    #[test]
    fn invalid_route_propagates() {
        let csv = "agent_id,kind,id,value\n0,checkpoint,1,\n0,checkpoint,2,\n0,shared,7,\n";
        let err = load_layout_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, RouteError::SegmentNotContiguous));
    }
}
