//! Per-stage diagnostics collected while assembling staves.

use serde::Serialize;

use crate::types::StaffResult;

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct LinkStageDiagnostics {
    pub candidates_total: usize,
    pub short_rejected: usize,
    pub links_created: usize,
    pub isolated_removed: usize,
    pub elapsed_ms: f64,
}

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct LabelStageDiagnostics {
    pub groups_found: usize,
    pub elapsed_ms: f64,
}

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct MeltStageDiagnostics {
    pub segments_melted: usize,
    pub elapsed_ms: f64,
}

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct CorrectionStageDiagnostics {
    pub estimated_num_lines: usize,
    pub groups_dropped: usize,
    pub lines_removed: usize,
    pub elapsed_ms: f64,
}

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct SanitizeStageDiagnostics {
    pub embedded_removed: usize,
    pub groups_joined: usize,
    pub narrow_removed: usize,
    pub elapsed_ms: f64,
}

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct InterpolateStageDiagnostics {
    pub segments_connected: usize,
    pub staves_emitted: usize,
    pub elapsed_ms: f64,
}

/// Result of a finder run plus structured stage diagnostics.
#[derive(Clone, Debug, Serialize)]
pub struct FindReport {
    pub result: StaffResult,
    pub linking: LinkStageDiagnostics,
    pub labeling: LabelStageDiagnostics,
    pub melting: MeltStageDiagnostics,
    pub correction: CorrectionStageDiagnostics,
    pub sanitizing: SanitizeStageDiagnostics,
    pub interpolation: InterpolateStageDiagnostics,
}
