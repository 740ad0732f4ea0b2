use staff_finder::prelude::*;

fn main() {
    // Demo stub: builds a synthetic five-line staff and runs the finder
    let staffline_height = 2;
    let staffspace_height = 8;
    let step = staffline_height + staffspace_height;

    let candidates: Vec<SegmentCandidate> = (0..5)
        .map(|line| SegmentCandidate {
            col_start: 0,
            y_values: vec![40 + line * step; 400],
        })
        .collect();

    let finder = StaffFinder::new(StaffParams::new(staffline_height, staffspace_height));
    match finder.process(&candidates) {
        Ok(report) => println!(
            "staves={} num_lines={} latency_ms={:.3}",
            report.result.staves.len(),
            report.result.estimated_num_lines,
            report.result.latency_ms
        ),
        Err(err) => eprintln!("staff finding failed: {err}"),
    }
}
