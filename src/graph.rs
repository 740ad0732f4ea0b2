//! Vertical link construction over column-overlapping segments.
//!
//! Two segments are linked when their column ranges intersect and their
//! vertical distance at the midpoint of the overlap matches one staff-line
//! step (`staffline_height + staffspace_height`) within a percentage
//! tolerance. The lower segment becomes a `down` neighbor of the upper one.
//! Segments that end up with no links cannot belong to a multi-line staff
//! and are retired.

use log::debug;
use rayon::prelude::*;

use crate::segments::{SegmentArena, SegmentId};

/// Counters reported by [`link_segments`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LinkOutcome {
    pub links_created: usize,
    pub isolated_removed: usize,
}

/// Builds all vertical links and drops isolated segments.
///
/// The pairwise scan runs in parallel; links are applied sequentially
/// afterwards, so the link set is identical to the plain O(n²) formulation.
pub fn link_segments(
    arena: &mut SegmentArena,
    staffline_height: i32,
    staffspace_height: i32,
    tolerance_percent: f64,
) -> LinkOutcome {
    let target = (staffline_height + staffspace_height) as f64;
    let tol = target * tolerance_percent / 100.0;
    let (min_dist, max_dist) = (target - tol, target + tol);

    let ids = arena.ids();
    let scan: &SegmentArena = arena;
    let pairs: Vec<(SegmentId, SegmentId)> = ids
        .par_iter()
        .enumerate()
        .flat_map_iter(|(i, &a)| {
            let sa = &scan[a];
            ids[i + 1..].iter().filter_map(move |&b| {
                let sb = &scan[b];
                if !sa.overlaps(sb) {
                    return None;
                }
                let mid = (sa.col_start().max(sb.col_start()) + sa.col_end().min(sb.col_end())) / 2;
                let dist = (sb.y_at(mid) - sa.y_at(mid)) as f64;
                if dist >= min_dist && dist <= max_dist {
                    Some((a, b)) // b one line below a
                } else if dist <= -min_dist && dist >= -max_dist {
                    Some((b, a)) // a one line below b
                } else {
                    None
                }
            })
        })
        .collect();

    let mut outcome = LinkOutcome::default();
    for (upper, lower) in pairs {
        if arena.link(upper, lower) {
            outcome.links_created += 1;
        }
    }
    debug!("created {} vertical links", outcome.links_created);

    for id in arena.ids() {
        let seg = &arena[id];
        if seg.up_links.is_empty() && seg.down_links.is_empty() {
            arena.retire(id);
            outcome.isolated_removed += 1;
        }
    }
    if outcome.isolated_removed > 0 {
        debug!("removed {} isolated segments", outcome.isolated_removed);
    }
    outcome
}
