//! Component labeling: staff ids via equivalence classes, line offsets via
//! breadth-first propagation.
//!
//! Every link pair is joined in an [`EquivalenceGrouper`], so each disjoint
//! class is one staff system. Within a class, a breadth-first walk from the
//! smallest member id assigns line offsets: one step up decrements, one
//! step down increments. Reaching a segment with an offset that contradicts
//! an earlier assignment means the adjacency structure is inconsistent and
//! aborts the page.

use std::collections::VecDeque;

use log::debug;

use crate::error::StaffFindError;
use crate::grouper::EquivalenceGrouper;
use crate::segments::{SegmentArena, SegmentId, StaffGroup, StaffLabel};

/// Labels every linked segment with `(staff, line)` and returns one group
/// per staff, numbered deterministically by smallest member id.
pub fn label_segments(arena: &mut SegmentArena) -> Result<Vec<StaffGroup>, StaffFindError> {
    let mut grouper = EquivalenceGrouper::new();
    for id in arena.ids() {
        grouper.add(id);
        for &down in &arena[id].down_links {
            grouper.join(id, down);
        }
    }

    let mut components: Vec<Vec<SegmentId>> = grouper
        .classes()
        .map(|class| {
            let mut members = class.to_vec();
            members.sort();
            members
        })
        .collect();
    components.sort_by_key(|members| members[0]);

    let mut groups = Vec::with_capacity(components.len());
    for (staff, members) in components.into_iter().enumerate() {
        let staff = staff as u32;
        propagate_line_offsets(arena, staff, members[0])?;
        groups.push(StaffGroup::new(staff, members, arena));
    }
    debug!("grouped segments into {} staffs", groups.len());
    Ok(groups)
}

/// Breadth-first offset assignment over one connected component.
fn propagate_line_offsets(
    arena: &mut SegmentArena,
    staff: u32,
    seed: SegmentId,
) -> Result<(), StaffFindError> {
    arena.get_mut(seed).label = Some(StaffLabel { staff, line: 0 });
    let mut queue = VecDeque::from([seed]);

    while let Some(current) = queue.pop_front() {
        let (line, ups, downs) = {
            let seg = &arena[current];
            let Some(label) = seg.label else {
                continue;
            };
            (label.line, seg.up_links.clone(), seg.down_links.clone())
        };
        let hops = ups
            .into_iter()
            .map(|n| (n, line - 1))
            .chain(downs.into_iter().map(|n| (n, line + 1)));
        for (neighbor, expected) in hops {
            match arena[neighbor].label {
                None => {
                    arena.get_mut(neighbor).label = Some(StaffLabel {
                        staff,
                        line: expected,
                    });
                    queue.push_back(neighbor);
                }
                Some(label) if label.staff != staff || label.line != expected => {
                    return Err(StaffFindError::LabelingConflict {
                        segment: neighbor,
                        staff,
                        assigned_line: label.line,
                        expected_line: expected,
                    });
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::link_segments;

    fn stacked_staff(arena: &mut SegmentArena, lines: usize, y0: i32) -> Vec<SegmentId> {
        (0..lines)
            .map(|i| arena.push(0, vec![y0 + i as i32 * 10; 40]))
            .collect()
    }

    #[test]
    fn labels_lines_top_to_bottom() {
        let mut arena = SegmentArena::new();
        let ids = stacked_staff(&mut arena, 5, 40);
        link_segments(&mut arena, 2, 8, 25.0);

        let groups = label_segments(&mut arena).expect("consistent graph");

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].min_line, 0);
        assert_eq!(groups[0].max_line, 4);
        for (offset, &id) in ids.iter().enumerate() {
            assert_eq!(
                arena[id].label,
                Some(StaffLabel {
                    staff: 0,
                    line: offset as i32
                })
            );
        }
    }

    #[test]
    fn separate_staffs_get_separate_ids() {
        let mut arena = SegmentArena::new();
        stacked_staff(&mut arena, 3, 40);
        stacked_staff(&mut arena, 3, 400);
        link_segments(&mut arena, 2, 8, 25.0);

        let groups = label_segments(&mut arena).expect("consistent graph");

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].staff, 0);
        assert_eq!(groups[1].staff, 1);
        assert!(groups[0].row_end < groups[1].row_start);
    }

    #[test]
    fn inconsistent_offsets_are_a_fatal_conflict() {
        let mut arena = SegmentArena::new();
        let a = arena.push(0, vec![10; 40]);
        let b = arena.push(0, vec![20; 40]);
        let c = arena.push(0, vec![30; 40]);
        // Malformed adjacency: c is claimed as a direct neighbor of both a
        // and b, which puts it one and two hops below a at the same time.
        arena.link(a, b);
        arena.link(b, c);
        arena.link(a, c);

        let err = label_segments(&mut arena).unwrap_err();
        assert!(matches!(err, StaffFindError::LabelingConflict { .. }));
    }
}
