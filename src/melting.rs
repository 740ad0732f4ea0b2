//! Melting of overlapping same-line segments.
//!
//! After labeling, one staff line may still be covered by several segments
//! whose column ranges intersect. Interpolation needs disjoint segments, so
//! overlapping pairs are merged: a least-squares line through the combined
//! non-overlapping columns decides which segment's rows survive inside the
//! overlap, and the absorbed segment's links are re-homed onto the survivor
//! before it is tombstoned.

use log::debug;
use nalgebra::{Matrix2, Vector2};

use crate::segments::{SegmentArena, SegmentId, StaffGroup};

/// Melts until no two segments of any `(staff, line)` overlap.
/// Returns the number of absorbed segments.
pub fn melt_overlapping(arena: &mut SegmentArena, groups: &mut [StaffGroup]) -> usize {
    let mut melted = 0;
    for group in groups.iter_mut() {
        let mut changed = false;
        for line in group.min_line..=group.max_line {
            loop {
                let segs = group.members_on_line(arena, line);
                let Some((keep, absorb)) = first_overlapping_pair(arena, &segs) else {
                    break;
                };
                melt_pair(arena, keep, absorb);
                group.members.retain(|&id| id != absorb);
                melted += 1;
                changed = true;
            }
        }
        if changed {
            group.update(arena);
        }
    }
    if melted > 0 {
        debug!("melted {melted} overlapping segments");
    }
    melted
}

/// First overlapping pair among segments sorted by `(col_start, id)`; the
/// earlier segment is the survivor, which also makes deviation ties
/// deterministic.
fn first_overlapping_pair(
    arena: &SegmentArena,
    segs: &[SegmentId],
) -> Option<(SegmentId, SegmentId)> {
    for (i, &a) in segs.iter().enumerate() {
        for &b in &segs[i + 1..] {
            if arena[a].overlaps(&arena[b]) {
                return Some((a, b));
            }
        }
    }
    None
}

fn melt_pair(arena: &mut SegmentArena, keep: SegmentId, absorb: SegmentId) {
    arena.rehome_links(absorb, keep);

    let (a_start, a_end, b_start, b_end) = {
        let (a, b) = (&arena[keep], &arena[absorb]);
        (a.col_start(), a.col_end(), b.col_start(), b.col_end())
    };
    let new_start = a_start.min(b_start);
    let new_end = a_end.max(b_end);
    let ov_start = a_start.max(b_start);
    let ov_end = a_end.min(b_end);

    // Context for the fit: every column covered by exactly one segment.
    let mut context = Vec::with_capacity(((new_end - new_start + 1) - (ov_end - ov_start + 1))
        .max(0) as usize);
    for col in new_start..=new_end {
        if col < ov_start || col > ov_end {
            let y = if col >= a_start && col <= a_end {
                arena[keep].y_at(col)
            } else {
                arena[absorb].y_at(col)
            };
            context.push((col, y));
        }
    }

    let keep_wins = match fit_line(&context) {
        Some((m, b)) => {
            let mut keep_error = 0i64;
            let mut absorb_error = 0i64;
            for col in ov_start..=ov_end {
                let fit_row = (m * col as f64 + b + 0.5).floor() as i64;
                keep_error += (arena[keep].y_at(col) as i64 - fit_row).abs();
                absorb_error += (arena[absorb].y_at(col) as i64 - fit_row).abs();
            }
            keep_error <= absorb_error
        }
        None => {
            // Not enough context (or all context in one column) for a fit:
            // fall back to the geometrically longer segment.
            debug!("melt fit skipped for segments {}/{}", keep.0, absorb.0);
            arena[keep].width() >= arena[absorb].width()
        }
    };

    let mut ys = Vec::with_capacity((new_end - new_start + 1) as usize);
    for col in new_start..=new_end {
        let in_a = col >= a_start && col <= a_end;
        let in_b = col >= b_start && col <= b_end;
        let y = match (in_a, in_b) {
            (true, true) => {
                if keep_wins {
                    arena[keep].y_at(col)
                } else {
                    arena[absorb].y_at(col)
                }
            }
            (true, false) => arena[keep].y_at(col),
            (false, true) => arena[absorb].y_at(col),
            // Unreachable: the pair overlaps, so the union has no holes.
            (false, false) => unreachable!("melting non-overlapping segments"),
        };
        ys.push(y);
    }

    arena.get_mut(keep).replace_geometry(new_start, ys);
    arena.retire(absorb);
}

/// Least-squares line `y = m*x + b` through the points, solved via the
/// normal equations. `None` with fewer than two points or when the normal
/// matrix is singular (all points in one column).
pub(crate) fn fit_line(points: &[(i32, i32)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let (mut sx, mut sy, mut sxx, mut sxy) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for &(x, y) in points {
        let (x, y) = (x as f64, y as f64);
        sx += x;
        sy += y;
        sxx += x * x;
        sxy += x * y;
    }
    let inverse = Matrix2::new(sxx, sx, sx, n).try_inverse()?;
    let solution = inverse * Vector2::new(sxy, sy);
    Some((solution.x, solution.y))
}
