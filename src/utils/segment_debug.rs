// src/utils/segment_debug.rs
use crate::extractors::segmenter::segment_at_depth;
use crate::extractors::template::MarkerCounts;
use crate::utils::error::{AppError, ExtractError};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const SNIPPET_CHARS: usize = 60;

/// Renders every depth-2 and depth-3 segment of a document, one per line,
/// so heading detection can be checked by eye.
pub fn render_segment_outline(text: &str) -> Result<String, ExtractError> {
    let counts = MarkerCounts::count(text);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# markers: VCS v3 = {}, CCB v3 = {}, VCS v4 = {} -> {}",
        counts.vcs_v3,
        counts.ccb_v3,
        counts.vcs_v4,
        counts.template()
    );

    for depth in [2u8, 3] {
        let segments = segment_at_depth(text, depth)?;
        let _ = writeln!(out, "\n## depth {} ({} segments)", depth, segments.len());
        for (index, seg) in segments.iter().enumerate() {
            let snippet: String = seg
                .body
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .chars()
                .take(SNIPPET_CHARS)
                .collect();
            let _ = writeln!(
                out,
                "[{:>4}] {:<10} @{:<8} {:>7} chars | {}",
                index,
                seg.label,
                seg.offset,
                seg.body.chars().count(),
                snippet
            );
        }
    }

    Ok(out)
}

/// Saves the segment outline of a document next to the analysis output.
pub fn save_segment_debug(text: &str, filename: &Path) -> Result<(), AppError> {
    let mut file = File::create(filename)?;
    file.write_all(render_segment_outline(text)?.as_bytes())?;

    tracing::info!("Saved segment outline to {}", filename.display());
    Ok(())
}
