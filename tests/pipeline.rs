mod common;

use common::synthetic_staves::{flat_candidate, straight_staff};
use staff_finder::types::SegmentCandidate;
use staff_finder::{Staff, StaffFindError, StaffFinder, StaffParams};

const LINE_H: i32 = 2;
const SPACE_H: i32 = 8;
const STEP: i32 = LINE_H + SPACE_H;

fn finder() -> StaffFinder {
    StaffFinder::new(StaffParams::new(LINE_H, SPACE_H))
}

fn assert_contiguous(staff: &Staff) {
    for line in &staff.lines {
        assert_eq!(
            line.y_list.len() as i32,
            line.right_x() - line.left_x + 1,
            "skeleton must cover every column exactly once"
        );
        assert!(!line.y_list.is_empty());
    }
}

#[test]
fn assembles_a_five_line_staff() {
    let candidates = straight_staff(0, 400, 40, 5, STEP);

    let report = finder().process(&candidates).expect("clean page");
    let result = &report.result;

    assert_eq!(result.staves.len(), 1);
    assert_eq!(result.estimated_num_lines, 5);
    let staff = &result.staves[0];
    assert_eq!(staff.lines.len(), 5);
    assert_contiguous(staff);
    for (i, line) in staff.lines.iter().enumerate() {
        assert_eq!(line.left_x, 0);
        assert_eq!(line.y_list, vec![40 + i as i32 * STEP; 400]);
    }
}

#[test]
fn orders_two_staves_top_to_bottom() {
    let mut candidates = straight_staff(0, 400, 500, 5, STEP);
    candidates.extend(straight_staff(0, 400, 40, 5, STEP));

    let report = finder().process(&candidates).expect("clean page");
    let staves = &report.result.staves;

    assert_eq!(staves.len(), 2);
    assert_eq!(staves[0].lines[0].y_list[0], 40);
    assert_eq!(staves[1].lines[0].y_list[0], 500);
}

#[test]
fn interpolates_an_interrupted_line() {
    let mut candidates = straight_staff(0, 400, 40, 5, STEP);
    // Replace the middle line with two fragments around a gap.
    let row = 40 + 2 * STEP;
    candidates[2] = flat_candidate(0, 150, row);
    candidates.push(flat_candidate(160, 240, row));

    let report = finder().process(&candidates).expect("clean page");
    let staff = &report.result.staves[0];

    assert_eq!(report.result.staves.len(), 1);
    assert_eq!(staff.lines.len(), 5);
    assert_contiguous(staff);
    let middle = &staff.lines[2];
    assert_eq!((middle.left_x, middle.right_x()), (0, 399));
    // The gap was flat on both sides, so the filler is flat too.
    assert_eq!(middle.y_list, vec![row; 400]);
}

#[test]
fn melts_overlapping_candidates_of_one_line() {
    let mut candidates = straight_staff(0, 400, 40, 5, STEP);
    // The top line arrives as two overlapping halves.
    candidates[0] = flat_candidate(0, 250, 40);
    candidates.push(flat_candidate(200, 200, 40));

    let report = finder().process(&candidates).expect("clean page");
    let staff = &report.result.staves[0];

    assert!(report.melting.segments_melted >= 1);
    assert_eq!(staff.lines.len(), 5);
    assert_contiguous(staff);
    assert_eq!(staff.lines[0].y_list, vec![40; 400]);
}

#[test]
fn enforces_a_requested_line_count() {
    let mut params = StaffParams::new(LINE_H, SPACE_H);
    params.num_lines = 5;
    let mut candidates = straight_staff(0, 400, 40, 5, STEP);
    // A spurious short sixth line right below the staff.
    candidates.push(flat_candidate(0, 100, 40 + 5 * STEP));

    let report = StaffFinder::new(params)
        .process(&candidates)
        .expect("clean page");

    assert_eq!(report.result.staves.len(), 1);
    assert_eq!(report.result.staves[0].lines.len(), 5);
    assert_eq!(report.correction.lines_removed, 1);
}

#[test]
fn understaffed_system_is_absent_from_the_output() {
    let mut params = StaffParams::new(LINE_H, SPACE_H);
    params.num_lines = 5;
    let candidates = straight_staff(0, 400, 40, 3, STEP);

    let report = StaffFinder::new(params)
        .process(&candidates)
        .expect("clean page");

    assert!(report.result.staves.is_empty());
    assert_eq!(report.correction.groups_dropped, 1);
}

#[test]
fn embedded_system_is_discarded() {
    let mut candidates = straight_staff(0, 400, 40, 5, STEP);
    // A second, narrower "system" nested inside the real one's rows.
    candidates.extend(straight_staff(100, 100, 45, 5, STEP));

    let report = finder().process(&candidates).expect("clean page");

    assert_eq!(report.result.staves.len(), 1);
    assert_eq!(report.result.staves[0].lines[0].y_list.len(), 400);
    assert_eq!(report.sanitizing.embedded_removed, 1);
}

#[test]
fn joins_an_interrupted_staff() {
    let mut candidates = straight_staff(0, 200, 40, 5, STEP);
    candidates.extend(straight_staff(210, 190, 40, 5, STEP));

    let report = finder().process(&candidates).expect("clean page");
    let staff = &report.result.staves[0];

    assert_eq!(report.result.staves.len(), 1);
    assert_eq!(report.sanitizing.groups_joined, 1);
    assert_eq!(staff.lines.len(), 5);
    assert_contiguous(staff);
    for line in &staff.lines {
        assert_eq!((line.left_x, line.right_x()), (0, 399));
    }
}

#[test]
fn empty_page_yields_an_empty_result() {
    let report = finder().process(&[]).expect("empty page is not an error");
    assert!(report.result.staves.is_empty());
    assert_eq!(report.result.estimated_num_lines, 0);
}

#[test]
fn isolated_fragments_yield_no_staves() {
    // Two candidates far apart vertically: linkable to nothing.
    let candidates = vec![
        flat_candidate(0, 100, 40),
        flat_candidate(0, 100, 400),
    ];

    let report = finder().process(&candidates).expect("clean page");

    assert!(report.result.staves.is_empty());
    assert_eq!(report.linking.isolated_removed, 2);
}

#[test]
fn short_candidates_are_filtered_out() {
    let mut candidates = straight_staff(0, 400, 40, 5, STEP);
    candidates.push(SegmentCandidate {
        col_start: 0,
        y_values: vec![300; 4], // far below min_width_spaces * staffspace
    });

    let report = finder().process(&candidates).expect("clean page");

    assert_eq!(report.linking.short_rejected, 1);
    assert_eq!(report.result.staves.len(), 1);
}

#[test]
fn rejects_empty_candidates() {
    let candidates = vec![SegmentCandidate {
        col_start: 0,
        y_values: Vec::new(),
    }];

    let err = finder().process(&candidates).unwrap_err();
    assert_eq!(err, StaffFindError::EmptyCandidate { index: 0 });
}

#[test]
fn rejects_invalid_staff_metrics() {
    let finder = StaffFinder::new(StaffParams::new(0, 8));
    let err = finder.process(&[]).unwrap_err();
    assert!(matches!(err, StaffFindError::InvalidStaffMetrics { .. }));
}

#[test]
fn edge_alignment_can_be_disabled() {
    let mut params = StaffParams::new(LINE_H, SPACE_H);
    params.align_edges = false;
    let mut candidates = straight_staff(0, 400, 40, 5, STEP);
    // Shorten one line a little; without alignment it keeps its own bounds.
    candidates[4] = flat_candidate(50, 350, 40 + 4 * STEP);

    let report = StaffFinder::new(params)
        .process(&candidates)
        .expect("clean page");
    let staff = &report.result.staves[0];

    assert_eq!(staff.lines[4].left_x, 50);
    assert_eq!(staff.lines[4].right_x(), 399);
    assert_eq!(staff.lines[0].left_x, 0);
}
