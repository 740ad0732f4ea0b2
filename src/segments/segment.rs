use serde::{Deserialize, Serialize};

/// Identifier of a segment slot in the [`SegmentArena`](super::SegmentArena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub u32);

/// Staff coordinates assigned during component labeling.
///
/// `line` counts vertical link hops from the labeling seed and may be
/// negative until the line-count correction renumbers it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StaffLabel {
    pub staff: u32,
    pub line: i32,
}

/// Near-horizontal staff-line fragment with one row value per column.
#[derive(Clone, Debug)]
pub struct Segment {
    pub id: SegmentId,
    col_start: i32,
    ys: Vec<i32>,
    /// Segments one staff line above, no self-links, no duplicates.
    pub up_links: Vec<SegmentId>,
    /// Segments one staff line below, no self-links, no duplicates.
    pub down_links: Vec<SegmentId>,
    pub label: Option<StaffLabel>,
    retired: bool,
}

impl Segment {
    pub(super) fn new(id: SegmentId, col_start: i32, ys: Vec<i32>) -> Self {
        debug_assert!(!ys.is_empty());
        Self {
            id,
            col_start,
            ys,
            up_links: Vec::new(),
            down_links: Vec::new(),
            label: None,
            retired: false,
        }
    }

    pub fn col_start(&self) -> i32 {
        self.col_start
    }

    /// Rightmost column covered (inclusive).
    pub fn col_end(&self) -> i32 {
        self.col_start + self.ys.len() as i32 - 1
    }

    /// Number of covered columns.
    pub fn width(&self) -> i32 {
        self.ys.len() as i32
    }

    /// Row at the given column; `col` must lie in `[col_start, col_end]`.
    pub fn y_at(&self, col: i32) -> i32 {
        self.ys[(col - self.col_start) as usize]
    }

    pub fn ys(&self) -> &[i32] {
        &self.ys
    }

    /// Row at the leftmost column.
    pub fn row_start(&self) -> i32 {
        self.ys[0]
    }

    /// Row at the rightmost column.
    pub fn row_end(&self) -> i32 {
        self.ys[self.ys.len() - 1]
    }

    /// True when the column ranges intersect.
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.col_end() >= other.col_start() && self.col_start() <= other.col_end()
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    pub(super) fn retire(&mut self) {
        self.retired = true;
    }

    /// Replaces the polyline after a melt; the new range must be non-empty.
    pub(crate) fn replace_geometry(&mut self, col_start: i32, ys: Vec<i32>) {
        debug_assert!(!ys.is_empty());
        self.col_start = col_start;
        self.ys = ys;
    }

    /// Appends columns to the right (gap filler plus a follower's rows).
    pub(crate) fn append(&mut self, tail: Vec<i32>) {
        self.ys.extend(tail);
    }
}
