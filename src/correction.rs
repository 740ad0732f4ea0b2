//! Line-count correction: drop understaffed systems, trim overfull ones.
//!
//! When the number of lines per staff is not given it is inferred as the
//! most frequent line count among the wide groups (wider than half the
//! widest). Groups spanning fewer lines are dropped. Overfull groups lose
//! the shorter of their top/bottom line until the count matches; with an
//! unknown count, any line far shorter than the group's longest goes
//! instead. Both passes are deterministic and idempotent.

use std::collections::{HashMap, VecDeque};

use log::{debug, warn};

use crate::segments::{SegmentArena, StaffGroup};

/// Fraction of the longest line below which a line is dropped when the
/// expected count is unknown.
const SHORT_LINE_FRACTION: f64 = 0.8;

/// Counters reported by [`correct_line_counts`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CorrectionOutcome {
    pub estimated_num_lines: usize,
    pub groups_dropped: usize,
    pub lines_removed: usize,
}

/// Enforces (or infers) the expected number of lines per staff.
/// `num_lines == 0` means infer.
pub fn correct_line_counts(
    arena: &mut SegmentArena,
    groups: Vec<StaffGroup>,
    num_lines: usize,
) -> (Vec<StaffGroup>, CorrectionOutcome) {
    let mut outcome = CorrectionOutcome::default();
    if groups.is_empty() {
        warn!("no staff systems to correct");
        return (groups, outcome);
    }

    let max_width = groups.iter().map(StaffGroup::width).max().unwrap_or(0);
    let estimated = if num_lines > 0 {
        num_lines
    } else {
        let estimate = estimate_num_lines(&groups, max_width);
        debug!("num_lines estimated as {estimate}");
        estimate
    };
    outcome.estimated_num_lines = estimated;

    // Drop groups with too few lines.
    let mut kept = Vec::with_capacity(groups.len());
    for group in groups {
        if (group.line_span() as usize) < estimated {
            group.retire_members(arena);
            outcome.groups_dropped += 1;
        } else {
            kept.push(group);
        }
    }
    if outcome.groups_dropped > 0 {
        debug!(
            "dropped {} understaffed systems, {} left",
            outcome.groups_dropped,
            kept.len()
        );
    }

    // Trim extra lines above and below.
    for group in kept.iter_mut() {
        let mut lengths: VecDeque<(i32, i32)> = (group.min_line..=group.max_line)
            .map(|line| (line, group.line_length(arena, line)))
            .collect();

        if num_lines > 0 {
            while group.line_span() as usize > num_lines {
                let Some((&front, &back)) = lengths.front().zip(lengths.back()) else {
                    break;
                };
                let line = if front.1 < back.1 {
                    lengths.pop_front();
                    front.0
                } else {
                    lengths.pop_back();
                    back.0
                };
                if group.remove_line(arena, line) > 0 {
                    outcome.lines_removed += 1;
                }
            }
        } else {
            let max_length = lengths.iter().map(|&(_, len)| len).max().unwrap_or(0);
            for (line, length) in lengths {
                if length > 0 && (length as f64) < max_length as f64 * SHORT_LINE_FRACTION {
                    group.remove_line(arena, line);
                    outcome.lines_removed += 1;
                }
            }
        }
    }
    if outcome.lines_removed > 0 {
        debug!("removed {} extra staff lines", outcome.lines_removed);
    }

    // Renumber so every group starts at line 0.
    for group in kept.iter_mut() {
        let shift = group.min_line;
        if shift != 0 {
            for &id in &group.members {
                if let Some(label) = arena.get_mut(id).label.as_mut() {
                    label.line -= shift;
                }
            }
            group.min_line -= shift;
            group.max_line -= shift;
        }
    }

    (kept, outcome)
}

/// Most frequent line count among groups wider than half of `max_width`;
/// ties resolve toward the smaller count.
fn estimate_num_lines(groups: &[StaffGroup], max_width: i32) -> usize {
    let mut histogram: HashMap<usize, usize> = HashMap::new();
    for group in groups {
        if group.width() > max_width / 2 {
            *histogram.entry(group.line_span() as usize).or_default() += 1;
        }
    }
    let mut best_count = 0usize;
    let mut best_lines = 0usize;
    for (&lines, &count) in &histogram {
        if count > best_count || (count == best_count && lines < best_lines) {
            best_count = count;
            best_lines = lines;
        }
    }
    best_lines
}
