//! Segment data model: arena-owned staff-line fragments and staff groups.
//!
//! Candidates enter as dense per-column polylines and live in a
//! [`SegmentArena`]; every later stage refers to them through [`SegmentId`]s.
//! Vertical adjacency is stored as deduplicated id lists on each segment,
//! labeling attaches a [`StaffLabel`], and melting/interpolation tombstone
//! absorbed segments in place so ids never dangle.

mod arena;
mod group;
mod segment;

pub use arena::SegmentArena;
pub use group::StaffGroup;
pub use segment::{Segment, SegmentId, StaffLabel};
