//! Staff finder orchestrating the assembly pipeline end to end.
//!
//! The [`StaffFinder`] exposes a simple API: feed segment candidates and
//! get ordered staff systems with detailed diagnostics. Internally it
//! validates input, builds the segment arena, links stacked segments,
//! labels connected components, melts overlaps, corrects line counts,
//! sanitizes the groups and finally interpolates/aligns the survivors.
//!
//! Typical usage:
//! ```no_run
//! use staff_finder::{StaffFinder, StaffParams};
//! use staff_finder::types::SegmentCandidate;
//!
//! # fn example(candidates: Vec<SegmentCandidate>) {
//! let finder = StaffFinder::new(StaffParams::new(2, 8));
//! match finder.process(&candidates) {
//!     Ok(report) => println!("staves: {}", report.result.staves.len()),
//!     Err(err) => eprintln!("staff finding failed: {err}"),
//! }
//! # }
//! ```

use std::time::Instant;

use log::debug;

use crate::correction::correct_line_counts;
use crate::diagnostics::{
    CorrectionStageDiagnostics, FindReport, InterpolateStageDiagnostics, LabelStageDiagnostics,
    LinkStageDiagnostics, MeltStageDiagnostics, SanitizeStageDiagnostics,
};
use crate::error::StaffFindError;
use crate::graph::link_segments;
use crate::interpolate::{align_edges, connect_line_segments, emit_staves};
use crate::labeling::label_segments;
use crate::melting::melt_overlapping;
use crate::sanitize::sanitize_groups;
use crate::segments::SegmentArena;
use crate::types::{SegmentCandidate, StaffResult};

use super::params::StaffParams;

/// Assembles raw segment candidates into ordered staff systems.
pub struct StaffFinder {
    params: StaffParams,
}

impl StaffFinder {
    /// Create a finder with the supplied parameters.
    pub fn new(params: StaffParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &StaffParams {
        &self.params
    }

    /// Run the full assembly pipeline.
    ///
    /// Fails fast on malformed input or an inconsistent segment graph;
    /// pages without recognizable staves yield an empty result instead of
    /// an error.
    pub fn process(&self, candidates: &[SegmentCandidate]) -> Result<FindReport, StaffFindError> {
        let total_start = Instant::now();
        self.params.validate()?;
        for (index, candidate) in candidates.iter().enumerate() {
            if candidate.y_values.is_empty() {
                return Err(StaffFindError::EmptyCandidate { index });
            }
        }

        // Stage 1: arena construction and vertical linking.
        let stage_start = Instant::now();
        let min_width = self.params.min_segment_width();
        let mut arena = SegmentArena::new();
        let mut short_rejected = 0;
        for candidate in candidates {
            if (candidate.width() as i32) < min_width {
                short_rejected += 1;
                continue;
            }
            arena.push(candidate.col_start, candidate.y_values.clone());
        }
        if short_rejected > 0 {
            debug!("rejected {short_rejected} candidates shorter than {min_width} columns");
        }
        let link_outcome = link_segments(
            &mut arena,
            self.params.staffline_height,
            self.params.staffspace_height,
            self.params.tolerance_percent,
        );
        let linking = LinkStageDiagnostics {
            candidates_total: candidates.len(),
            short_rejected,
            links_created: link_outcome.links_created,
            isolated_removed: link_outcome.isolated_removed,
            elapsed_ms: elapsed_ms(stage_start),
        };

        // Stage 2: component labeling.
        let stage_start = Instant::now();
        let mut groups = label_segments(&mut arena)?;
        let labeling = LabelStageDiagnostics {
            groups_found: groups.len(),
            elapsed_ms: elapsed_ms(stage_start),
        };

        // Stage 3: melt overlapping same-line segments.
        let stage_start = Instant::now();
        let segments_melted = melt_overlapping(&mut arena, &mut groups);
        let melting = MeltStageDiagnostics {
            segments_melted,
            elapsed_ms: elapsed_ms(stage_start),
        };

        // Stage 4: line-count correction.
        let stage_start = Instant::now();
        let (groups, correction_outcome) =
            correct_line_counts(&mut arena, groups, self.params.num_lines);
        let correction = CorrectionStageDiagnostics {
            estimated_num_lines: correction_outcome.estimated_num_lines,
            groups_dropped: correction_outcome.groups_dropped,
            lines_removed: correction_outcome.lines_removed,
            elapsed_ms: elapsed_ms(stage_start),
        };

        // Stage 5: group sanitization.
        let stage_start = Instant::now();
        let (mut groups, sanitize_outcome) = sanitize_groups(
            &mut arena,
            groups,
            self.params.staffspace_height,
            self.params.join_gap(),
            self.params.narrow_fraction,
            self.params.join_interrupted,
        );
        let sanitizing = SanitizeStageDiagnostics {
            embedded_removed: sanitize_outcome.embedded_removed,
            groups_joined: sanitize_outcome.groups_joined,
            narrow_removed: sanitize_outcome.narrow_removed,
            elapsed_ms: elapsed_ms(stage_start),
        };

        // Stage 6: interpolation, emission, edge alignment.
        let stage_start = Instant::now();
        let segments_connected = connect_line_segments(&mut arena, &mut groups);
        let mut staves = emit_staves(&arena, &groups);
        if self.params.align_edges {
            align_edges(&mut staves, self.params.staffspace_height);
        }
        let interpolation = InterpolateStageDiagnostics {
            segments_connected,
            staves_emitted: staves.len(),
            elapsed_ms: elapsed_ms(stage_start),
        };

        let result = StaffResult {
            staves,
            estimated_num_lines: correction.estimated_num_lines,
            latency_ms: elapsed_ms(total_start),
        };
        Ok(FindReport {
            result,
            linking,
            labeling,
            melting,
            correction,
            sanitizing,
            interpolation,
        })
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
