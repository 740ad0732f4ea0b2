//! Parameter types configuring the staff-assembly stages.
//!
//! `staffline_height` and `staffspace_height` are measured page metrics and
//! have no meaningful defaults; everything else defaults to values that
//! behave well on common scans.

use serde::{Deserialize, Serialize};

use crate::error::StaffFindError;

/// Finder-wide parameters controlling the multi-stage pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StaffParams {
    /// Typical thickness of a staff line in pixels (> 0).
    pub staffline_height: i32,
    /// Typical white gap between two staff lines in pixels (> 0).
    pub staffspace_height: i32,
    /// Lines per staff. 0 infers the count from the page.
    #[serde(default)]
    pub num_lines: usize,
    /// Allowed deviation, in percent, around
    /// `staffline_height + staffspace_height` when linking stacked segments.
    #[serde(default = "default_tolerance_percent")]
    pub tolerance_percent: f64,
    /// Candidates narrower than this many staff spaces are discarded.
    #[serde(default = "default_min_width_spaces")]
    pub min_width_spaces: i32,
    /// Maximum gap, in staff spaces, bridged when joining interrupted
    /// staves.
    #[serde(default = "default_join_gap_spaces")]
    pub join_gap_spaces: i32,
    /// Groups narrower than this fraction of the widest group are dropped.
    #[serde(default = "default_narrow_fraction")]
    pub narrow_fraction: f64,
    /// Extend all lines of a staff to common left/right boundaries.
    #[serde(default = "default_true")]
    pub align_edges: bool,
    /// Join staves interrupted by a horizontal gap.
    #[serde(default = "default_true")]
    pub join_interrupted: bool,
}

fn default_tolerance_percent() -> f64 {
    25.0
}

fn default_min_width_spaces() -> i32 {
    2
}

fn default_join_gap_spaces() -> i32 {
    2
}

fn default_narrow_fraction() -> f64 {
    0.5
}

fn default_true() -> bool {
    true
}

impl StaffParams {
    /// Parameters for the given staff metrics with default tuning.
    pub fn new(staffline_height: i32, staffspace_height: i32) -> Self {
        Self {
            staffline_height,
            staffspace_height,
            num_lines: 0,
            tolerance_percent: default_tolerance_percent(),
            min_width_spaces: default_min_width_spaces(),
            join_gap_spaces: default_join_gap_spaces(),
            narrow_fraction: default_narrow_fraction(),
            align_edges: true,
            join_interrupted: true,
        }
    }

    /// Expected vertical distance between adjacent staff lines.
    pub fn target_distance(&self) -> i32 {
        self.staffline_height + self.staffspace_height
    }

    /// Minimum candidate width in columns.
    pub fn min_segment_width(&self) -> i32 {
        self.min_width_spaces * self.staffspace_height
    }

    /// Maximum bridged gap in columns.
    pub fn join_gap(&self) -> i32 {
        self.join_gap_spaces * self.staffspace_height
    }

    pub(crate) fn validate(&self) -> Result<(), StaffFindError> {
        if self.staffline_height <= 0 || self.staffspace_height <= 0 {
            return Err(StaffFindError::InvalidStaffMetrics {
                staffline_height: self.staffline_height,
                staffspace_height: self.staffspace_height,
            });
        }
        Ok(())
    }
}
