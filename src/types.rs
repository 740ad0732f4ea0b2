use serde::{Deserialize, Serialize};

/// Raw staff-line candidate handed over by the pixel-extraction stage.
///
/// `y_values` holds one row position per column starting at `col_start`,
/// so the candidate covers `[col_start, col_start + y_values.len() - 1]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SegmentCandidate {
    pub col_start: i32,
    pub y_values: Vec<i32>,
}

impl SegmentCandidate {
    pub fn width(&self) -> usize {
        self.y_values.len()
    }
}

/// One-pixel-wide representation of a finished staff line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StafflineSkeleton {
    pub left_x: i32,
    pub y_list: Vec<i32>,
}

impl StafflineSkeleton {
    /// Rightmost column covered by the skeleton (inclusive).
    pub fn right_x(&self) -> i32 {
        self.left_x + self.y_list.len() as i32 - 1
    }
}

/// One staff system, lines sorted top to bottom.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Staff {
    pub lines: Vec<StafflineSkeleton>,
}

/// Final output of the finder: staff systems in page order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct StaffResult {
    pub staves: Vec<Staff>,
    /// Lines per staff actually enforced; equals the configured `num_lines`
    /// when given, otherwise the inferred value.
    pub estimated_num_lines: usize,
    pub latency_ms: f64,
}
