#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod finder;
pub mod grouper;
pub mod segments;
pub mod types;

// Pipeline stages – still public for tools and tests, but considered
// unstable internals.
pub mod correction;
pub mod graph;
pub mod interpolate;
pub mod labeling;
pub mod melting;
pub mod sanitize;

// --- High-level re-exports -------------------------------------------------

// Main entry points: finder + results.
pub use crate::finder::{StaffFinder, StaffParams};
pub use crate::types::{SegmentCandidate, Staff, StaffResult, StafflineSkeleton};

// Structured diagnostics returned by the finder.
pub use crate::diagnostics::FindReport;

// Error taxonomy.
pub use crate::error::StaffFindError;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use staff_finder::prelude::*;
///
/// # fn main() {
/// let candidates = vec![
///     SegmentCandidate { col_start: 0, y_values: vec![40; 200] },
///     SegmentCandidate { col_start: 0, y_values: vec![50; 200] },
/// ];
///
/// let finder = StaffFinder::new(StaffParams::new(2, 8));
/// let report = finder.process(&candidates).expect("consistent segment graph");
/// println!(
///     "staves={} latency_ms={:.3}",
///     report.result.staves.len(),
///     report.result.latency_ms
/// );
/// # }
/// ```
pub mod prelude {
    pub use crate::types::SegmentCandidate;
    pub use crate::{StaffFinder, StaffParams, StaffResult};
}
