use staff_finder::types::SegmentCandidate;

/// One staff of perfectly straight, evenly spaced line candidates.
pub fn straight_staff(
    col_start: i32,
    width: usize,
    top_row: i32,
    lines: usize,
    step: i32,
) -> Vec<SegmentCandidate> {
    (0..lines)
        .map(|line| SegmentCandidate {
            col_start,
            y_values: vec![top_row + line as i32 * step; width],
        })
        .collect()
}

/// A single flat candidate.
pub fn flat_candidate(col_start: i32, width: usize, row: i32) -> SegmentCandidate {
    SegmentCandidate {
        col_start,
        y_values: vec![row; width],
    }
}
