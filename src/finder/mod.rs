//! Staff finder orchestrating the segment-assembly pipeline.
//!
//! Overview
//! - Filters out candidates too short to be part of a staff line.
//! - Links segments stacked at one staff-line step into a vertical
//!   adjacency graph and drops isolated segments.
//! - Labels connected components with `(staff, line)` coordinates via
//!   equivalence classes plus breadth-first offset propagation.
//! - Melts overlapping same-line segments by best local least-squares fit.
//! - Enforces (or infers) the expected number of lines per staff.
//! - Removes embedded and narrow groups and joins interrupted staves.
//! - Interpolates remaining gaps and aligns each staff's lines to common
//!   left/right boundaries.
//!
//! Modules
//! - [`params`] – configuration types used by the finder.
//! - `pipeline` – the main [`StaffFinder`] implementation.

pub mod params;
mod pipeline;

pub use params::StaffParams;
pub use pipeline::StaffFinder;
