use crate::segments::SegmentId;

/// Reasons why staff finding may abort for a page.
///
/// Soft conditions (too few fit points, zero surviving groups, degenerate
/// slopes) are handled locally with documented fallbacks and never surface
/// here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaffFindError {
    /// A candidate with an empty column range was passed in.
    EmptyCandidate { index: usize },
    /// Staff metrics must both be positive.
    InvalidStaffMetrics {
        staffline_height: i32,
        staffspace_height: i32,
    },
    /// A segment was reached with two incompatible line offsets during
    /// labeling. The adjacency structure is inconsistent; this indicates
    /// malformed input segments or a link-builder defect.
    LabelingConflict {
        segment: SegmentId,
        staff: u32,
        assigned_line: i32,
        expected_line: i32,
    },
}

impl std::fmt::Display for StaffFindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaffFindError::EmptyCandidate { index } => {
                write!(f, "segment candidate #{index} has no columns")
            }
            StaffFindError::InvalidStaffMetrics {
                staffline_height,
                staffspace_height,
            } => write!(
                f,
                "staff metrics must be positive (staffline_height={staffline_height}, staffspace_height={staffspace_height})"
            ),
            StaffFindError::LabelingConflict {
                segment,
                staff,
                assigned_line,
                expected_line,
            } => write!(
                f,
                "labeling conflict in staff {staff}: segment {} already on line {assigned_line}, reached as line {expected_line}",
                segment.0
            ),
        }
    }
}

impl std::error::Error for StaffFindError {}
