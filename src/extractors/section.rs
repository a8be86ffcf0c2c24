// src/extractors/section.rs

// --- Imports ---
use crate::extractors::heading::HeadingLabel;
use crate::extractors::segmenter::segment;

// --- Data Structures ---
/// Per-call counters describing how a section was assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionDiagnostics {
    pub segments_scanned: usize,
    pub exact_matches: usize,
    pub segments_included: usize,
}

/// Extracts the text belonging to `target` and its continuations.
///
/// Every exact occurrence of the target heading opens (or re-opens) the
/// section and is prefixed with `"; Position {index}: "`, where `index` is the
/// segment's position among all segments of the target's depth. Following
/// segments are swept in until one "escapes", meaning some component exceeds
/// the target's by more than one. Returns an empty string when the target
/// never occurs.
pub fn extract_section(text: &str, target: &HeadingLabel) -> String {
    extract_section_with_diagnostics(text, target).0
}

pub fn extract_section_with_diagnostics(
    text: &str,
    target: &HeadingLabel,
) -> (String, SectionDiagnostics) {
    let segments = segment(text, target.depth());
    let mut diagnostics = SectionDiagnostics {
        segments_scanned: segments.len(),
        ..Default::default()
    };

    let mut extracted = String::new();
    let mut tracked = false;

    for (index, seg) in segments.iter().enumerate() {
        let exact = seg.heading == *target;
        let escape = seg.heading.escapes(target);

        if exact {
            tracked = true;
            diagnostics.exact_matches += 1;
            extracted.push_str(&format!("; Position {}: ", index));
        }

        if tracked && (exact || !escape) {
            extracted.push_str(seg.label);
            extracted.push_str(seg.body);
            diagnostics.segments_included += 1;
        } else if tracked {
            tracing::trace!(
                "Heading {} escapes target {} at position {}",
                seg.heading,
                target,
                index
            );
            tracked = false;
        }
    }

    tracing::debug!(
        "Target heading {}: {} exact matches, {} of {} segments included",
        target,
        diagnostics.exact_matches,
        diagnostics.segments_included,
        diagnostics.segments_scanned
    );
    (extracted, diagnostics)
}

/// Like [`extract_section`], but retries once with the enclosing depth-2
/// heading when a depth-3 target yields nothing ("2.1.11" -> "2.1").
pub fn extract_with_fallback(text: &str, target: &HeadingLabel) -> String {
    let extracted = extract_section(text, target);
    if !extracted.is_empty() {
        return extracted;
    }

    match target.parent() {
        Some(parent) => {
            tracing::info!(
                "Heading {} is not in the document, trying again with heading {}",
                target,
                parent
            );
            extract_section(text, &parent)
        }
        None => extracted,
    }
}
