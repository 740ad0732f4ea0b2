//! Gap interpolation and edge alignment.
//!
//! After melting, a staff line may consist of several disjoint segments.
//! They are connected left to right with a linear blend across each gap,
//! yielding one contiguous skeleton per line. Edge alignment then extends
//! every line of a staff to the staff's common left/right boundary using
//! the line's own slope near that boundary.

use log::{debug, warn};

use crate::melting::fit_line;
use crate::segments::{SegmentArena, StaffGroup};
use crate::types::{Staff, StafflineSkeleton};

/// Connects all multi-segment lines; returns the number of segments that
/// took part in a connection.
pub fn connect_line_segments(arena: &mut SegmentArena, groups: &mut [StaffGroup]) -> usize {
    let mut connected = 0;
    for group in groups.iter_mut() {
        let mut changed = false;
        for line in group.min_line..=group.max_line {
            let segs = group.members_on_line(arena, line);
            if segs.len() < 2 {
                continue;
            }
            connected += segs.len();
            let first = segs[0];
            for &next in &segs[1..] {
                let (next_start, next_ys) = {
                    let seg = &arena[next];
                    (seg.col_start(), seg.ys().to_vec())
                };
                let (col_end, row_end) = {
                    let seg = &arena[first];
                    (seg.col_end(), seg.row_end())
                };
                if next_start <= col_end {
                    // Post-melt segments never overlap; a violation here is
                    // an internal bug, recovered by dropping the follower.
                    debug_assert!(false, "overlapping segments reached interpolation");
                    warn!("segment {} overlaps its line predecessor, dropped", next.0);
                    arena.unlink_all(next);
                    arena.retire(next);
                    group.members.retain(|&id| id != next);
                    changed = true;
                    continue;
                }

                let mut tail = Vec::with_capacity((next_start - col_end) as usize + next_ys.len());
                if next_start > col_end + 1 {
                    let slope =
                        (next_ys[0] - row_end) as f64 / (next_start - col_end) as f64;
                    for col in col_end + 1..next_start {
                        let dy = slope * (col - col_end) as f64;
                        tail.push((row_end as f64 + dy + 0.5).floor() as i32);
                    }
                }
                tail.extend(next_ys);

                arena.get_mut(first).append(tail);
                arena.rehome_links(next, first);
                arena.retire(next);
                group.members.retain(|&id| id != next);
                changed = true;
            }
        }
        if changed {
            group.update(arena);
        }
    }
    if connected > 0 {
        debug!("connected {connected} broken line segments");
    }
    connected
}

/// Copies the finished groups into output staves, lines sorted top to
/// bottom. Groups are expected in page order already.
pub fn emit_staves(arena: &SegmentArena, groups: &[StaffGroup]) -> Vec<Staff> {
    groups
        .iter()
        .map(|group| {
            let mut lines: Vec<StafflineSkeleton> = group
                .members
                .iter()
                .map(|&id| {
                    let seg = &arena[id];
                    StafflineSkeleton {
                        left_x: seg.col_start(),
                        y_list: seg.ys().to_vec(),
                    }
                })
                .collect();
            lines.sort_by_key(|skel| skel.y_list.first().copied().unwrap_or(i32::MAX));
            Staff { lines }
        })
        .collect()
}

/// Extends every line of each staff to the staff's outermost columns.
///
/// The extension follows the line's own slope, fitted over up to
/// `staffspace_height` boundary columns; a degenerate or under-determined
/// fit degrades to a constant extension.
pub fn align_edges(staves: &mut [Staff], staffspace_height: i32) {
    let window = staffspace_height.max(2) as usize;
    for staff in staves.iter_mut() {
        let Some(left) = staff.lines.iter().map(|l| l.left_x).min() else {
            continue;
        };
        let Some(right) = staff.lines.iter().map(StafflineSkeleton::right_x).max() else {
            continue;
        };
        for line in staff.lines.iter_mut() {
            if line.left_x > left {
                let slope = boundary_slope(line, window, true);
                let x0 = line.left_x as f64;
                let y0 = line.y_list[0] as f64;
                let mut prefix: Vec<i32> = (left..line.left_x)
                    .map(|col| (y0 + slope * (col as f64 - x0) + 0.5).floor() as i32)
                    .collect();
                prefix.append(&mut line.y_list);
                line.y_list = prefix;
                line.left_x = left;
            }
            if line.right_x() < right {
                let slope = boundary_slope(line, window, false);
                let x1 = line.right_x() as f64;
                let y1 = line.y_list[line.y_list.len() - 1] as f64;
                for col in line.right_x() + 1..=right {
                    line.y_list
                        .push((y1 + slope * (col as f64 - x1) + 0.5).floor() as i32);
                }
            }
        }
    }
}

fn boundary_slope(line: &StafflineSkeleton, window: usize, at_left: bool) -> f64 {
    let len = line.y_list.len();
    let take = window.min(len);
    let range = if at_left { 0..take } else { len - take..len };
    let points: Vec<(i32, i32)> = range
        .map(|i| (line.left_x + i as i32, line.y_list[i]))
        .collect();
    match fit_line(&points) {
        Some((slope, _)) => slope,
        None => 0.0,
    }
}
