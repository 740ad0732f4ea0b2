//! Staff-group sanitization: page ordering, embedded-group removal,
//! interrupted-staff joining, narrow-group removal.
//!
//! The passes run in exactly this order; joining can widen fragments that
//! would otherwise fail the narrow check, so it must precede it.

use log::debug;

use crate::segments::{SegmentArena, StaffGroup};

/// Counters reported by [`sanitize_groups`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SanitizeOutcome {
    pub embedded_removed: usize,
    pub groups_joined: usize,
    pub narrow_removed: usize,
}

/// Runs all three sanitization passes and returns the surviving groups in
/// page order.
pub fn sanitize_groups(
    arena: &mut SegmentArena,
    mut groups: Vec<StaffGroup>,
    staffspace_height: i32,
    join_gap: i32,
    narrow_fraction: f64,
    join_interrupted: bool,
) -> (Vec<StaffGroup>, SanitizeOutcome) {
    let mut outcome = SanitizeOutcome::default();

    sort_page_order(&mut groups, staffspace_height);

    groups = remove_embedded(arena, groups, &mut outcome);
    if join_interrupted {
        groups = join_interrupted_staves(arena, groups, join_gap, &mut outcome);
    }
    groups = remove_narrow(arena, groups, narrow_fraction, &mut outcome);

    (groups, outcome)
}

/// Top-to-bottom order with a band-aware left-to-right reorder: within a
/// band of vertically close groups (closer than `2 * staffspace_height`),
/// the leftmost comes first.
pub fn sort_page_order(groups: &mut [StaffGroup], staffspace_height: i32) {
    groups.sort_by_key(|g| g.row_start);
    let break_dist = 2 * staffspace_height;
    for i in 0..groups.len() {
        let mut leftmost = i;
        for j in i + 1..groups.len() {
            if groups[i].row_end - break_dist < groups[j].row_start {
                break;
            }
            if groups[j].col_start < groups[leftmost].col_start {
                leftmost = j;
            }
        }
        if leftmost != i {
            groups.swap(i, leftmost);
        }
    }
}

/// When two groups overlap both vertically and in columns, only the wider
/// one is kept (the earlier one on equal widths).
fn remove_embedded(
    arena: &mut SegmentArena,
    groups: Vec<StaffGroup>,
    outcome: &mut SanitizeOutcome,
) -> Vec<StaffGroup> {
    let mut removed = vec![false; groups.len()];
    for i in 0..groups.len() {
        if removed[i] {
            continue;
        }
        for j in i + 1..groups.len() {
            if removed[j] {
                continue;
            }
            let (g, h) = (&groups[i], &groups[j]);
            let cols_overlap = g.col_start.max(h.col_start) <= g.col_end.min(h.col_end);
            let rows_overlap = g.row_start.max(h.row_start) <= g.row_end.min(h.row_end);
            if cols_overlap && rows_overlap {
                if g.width() >= h.width() {
                    removed[j] = true;
                } else {
                    removed[i] = true;
                    break;
                }
            }
        }
    }
    let survivors = discard_removed(arena, groups, &removed, &mut outcome.embedded_removed);
    if outcome.embedded_removed > 0 {
        debug!(
            "removed {} embedded systems, {} left",
            outcome.embedded_removed,
            survivors.len()
        );
    }
    survivors
}

/// Joins consecutive groups that are really one staff interrupted by a gap:
/// same line count, overlapping row bands, disjoint column ranges separated
/// by less than `join_gap`. The scan stops at the first neighbor violating
/// any condition, so nothing is joined across an intervening system.
fn join_interrupted_staves(
    arena: &mut SegmentArena,
    mut groups: Vec<StaffGroup>,
    join_gap: i32,
    outcome: &mut SanitizeOutcome,
) -> Vec<StaffGroup> {
    let mut removed = vec![false; groups.len()];
    for i in 0..groups.len() {
        if removed[i] {
            continue;
        }
        for j in i + 1..groups.len() {
            if removed[j] {
                continue;
            }
            {
                let (g1, g2) = (&groups[i], &groups[j]);
                if g1.row_start.max(g2.row_start) > g1.row_end.min(g2.row_end) {
                    break;
                }
                if g1.line_span() != g2.line_span() {
                    break;
                }
                if g2.col_start <= g1.col_end {
                    break;
                }
                if g2.col_start - g1.col_end >= join_gap {
                    break;
                }
            }
            let (left, right) = groups.split_at_mut(j);
            left[i].join(arena, &right[0]);
            removed[j] = true;
            outcome.groups_joined += 1;
        }
    }
    // Joined members were moved, not retired: plain filter here.
    let mut idx = 0;
    groups.retain(|_| {
        let keep = !removed[idx];
        idx += 1;
        keep
    });
    if outcome.groups_joined > 0 {
        debug!("joined {} interrupted staves", outcome.groups_joined);
    }
    groups
}

/// Drops groups narrower than `narrow_fraction` of the widest group.
fn remove_narrow(
    arena: &mut SegmentArena,
    groups: Vec<StaffGroup>,
    narrow_fraction: f64,
    outcome: &mut SanitizeOutcome,
) -> Vec<StaffGroup> {
    let widest = groups.iter().map(StaffGroup::width).max().unwrap_or(0);
    let removed: Vec<bool> = groups
        .iter()
        .map(|g| (g.width() as f64) < widest as f64 * narrow_fraction)
        .collect();
    let survivors = discard_removed(arena, groups, &removed, &mut outcome.narrow_removed);
    if outcome.narrow_removed > 0 {
        debug!(
            "removed {} narrow systems, {} left",
            outcome.narrow_removed,
            survivors.len()
        );
    }
    survivors
}

fn discard_removed(
    arena: &mut SegmentArena,
    groups: Vec<StaffGroup>,
    removed: &[bool],
    counter: &mut usize,
) -> Vec<StaffGroup> {
    let mut survivors = Vec::with_capacity(groups.len());
    for (idx, group) in groups.into_iter().enumerate() {
        if removed[idx] {
            group.retire_members(arena);
            *counter += 1;
        } else {
            survivors.push(group);
        }
    }
    survivors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::{SegmentId, StaffLabel};

    fn block_group(
        arena: &mut SegmentArena,
        staff: u32,
        col_start: i32,
        width: usize,
        top_row: i32,
        lines: i32,
    ) -> StaffGroup {
        let members: Vec<SegmentId> = (0..lines)
            .map(|line| {
                let id = arena.push(col_start, vec![top_row + line * 10; width]);
                arena.get_mut(id).label = Some(StaffLabel { staff, line });
                id
            })
            .collect();
        StaffGroup::new(staff, members, arena)
    }

    #[test]
    fn embedded_group_is_discarded() {
        let mut arena = SegmentArena::new();
        let wide = block_group(&mut arena, 0, 0, 100, 100, 5);
        let narrow = block_group(&mut arena, 1, 30, 40, 120, 5);
        let narrow_members = narrow.members.clone();

        let (groups, outcome) =
            sanitize_groups(&mut arena, vec![wide, narrow], 8, 16, 0.5, true);

        assert_eq!(outcome.embedded_removed, 1);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].width(), 100);
        for id in narrow_members {
            assert!(!arena.is_active(id));
        }
    }

    #[test]
    fn interrupted_staff_is_joined() {
        let mut arena = SegmentArena::new();
        // Two half-width fragments of one staff, separated by a small gap.
        let left = block_group(&mut arena, 0, 0, 50, 100, 5);
        let right = block_group(&mut arena, 1, 60, 50, 100, 5);

        let (groups, outcome) = sanitize_groups(&mut arena, vec![left, right], 8, 16, 0.5, true);

        assert_eq!(outcome.groups_joined, 1);
        assert_eq!(groups.len(), 1);
        assert_eq!((groups[0].col_start, groups[0].col_end), (0, 109));
        assert_eq!(groups[0].members.len(), 10);
        // Both fragments now share staff id and line offsets.
        for line in 0..5 {
            assert_eq!(groups[0].members_on_line(&arena, line).len(), 2);
        }
    }

    #[test]
    fn join_respects_the_gap_threshold() {
        let mut arena = SegmentArena::new();
        let left = block_group(&mut arena, 0, 0, 50, 100, 5);
        let right = block_group(&mut arena, 1, 80, 50, 100, 5);

        let (groups, outcome) = sanitize_groups(&mut arena, vec![left, right], 8, 16, 0.0, true);

        assert_eq!(outcome.groups_joined, 0);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn narrow_groups_are_dropped_after_joining() {
        let mut arena = SegmentArena::new();
        let wide = block_group(&mut arena, 0, 0, 100, 100, 5);
        let sliver = block_group(&mut arena, 1, 0, 30, 300, 5);

        let (groups, outcome) =
            sanitize_groups(&mut arena, vec![wide, sliver], 8, 16, 0.5, true);

        assert_eq!(outcome.narrow_removed, 1);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].width(), 100);
    }

    #[test]
    fn page_order_is_top_to_bottom_then_left_to_right() {
        let mut arena = SegmentArena::new();
        let top = block_group(&mut arena, 0, 0, 100, 50, 5);
        let band_right = block_group(&mut arena, 1, 120, 100, 200, 5);
        let band_left = block_group(&mut arena, 2, 0, 100, 205, 5);

        let mut groups = vec![top, band_right, band_left];
        sort_page_order(&mut groups, 8);

        let order: Vec<u32> = groups.iter().map(|g| g.staff).collect();
        assert_eq!(order, vec![0, 2, 1]);
    }
}
