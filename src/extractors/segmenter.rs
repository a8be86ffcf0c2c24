// src/extractors/segmenter.rs

// --- Imports ---
use crate::extractors::heading::{HeadingDepth, HeadingLabel};
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// Maximal dotted numeric tokens ("1.8", "2.1.11", "3.14.15.9"). The regex crate
// runs in linear time, so a single find_iter pass over a large filing is safe.
// Depth, boundary and trailing-whitespace rules are applied per token below.
static DOTTED_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]+(?:\.[0-9]+)+").expect("Failed to compile DOTTED_NUMBER_RE")
});

// --- Data Structures ---
/// One numbered heading and the text that follows it, up to the next heading
/// of the same depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub heading: HeadingLabel,
    /// The heading exactly as written in the document.
    pub label: &'a str,
    /// Everything after the label up to the next heading (or end of text).
    pub body: &'a str,
    /// Byte offset of the label within the source text.
    pub offset: usize,
}

/// Splits `text` into ordered heading segments at the given outline depth.
///
/// A token counts as a heading when it has exactly `depth` components, is not
/// glued to a preceding digit or dot, has a non-zero leading digit in its
/// second component and is followed by whitespace. Text before the first
/// heading belongs to no segment.
pub fn segment(text: &str, depth: HeadingDepth) -> Vec<Segment<'_>> {
    let headings: Vec<(usize, usize, HeadingLabel)> = DOTTED_NUMBER_RE
        .find_iter(text)
        .filter_map(|m| {
            heading_at(text, m.start(), m.end(), depth).map(|label| (m.start(), m.end(), label))
        })
        .collect();

    let mut segments = Vec::with_capacity(headings.len());
    for (i, (start, end, heading)) in headings.iter().enumerate() {
        let body_end = headings.get(i + 1).map(|(next, _, _)| *next).unwrap_or(text.len());
        segments.push(Segment {
            heading: heading.clone(),
            label: &text[*start..*end],
            body: &text[*end..body_end],
            offset: *start,
        });
    }

    tracing::trace!(
        "Segmented {} bytes into {} depth-{} segments",
        text.len(),
        segments.len(),
        depth.components()
    );
    segments
}

/// Same as [`segment`], for callers holding a raw depth number.
pub fn segment_at_depth(text: &str, depth: u8) -> Result<Vec<Segment<'_>>, ExtractError> {
    let depth = HeadingDepth::try_from(depth)?;
    Ok(segment(text, depth))
}

/// Validates a dotted-number token found at `text[start..end]` as a heading.
fn heading_at(text: &str, start: usize, end: usize, depth: HeadingDepth) -> Option<HeadingLabel> {
    let token = &text[start..end];

    if token.split('.').count() != depth.components() {
        return None;
    }

    if let Some(prev) = text[..start].chars().next_back() {
        if prev.is_ascii_digit() || prev == '.' {
            return None;
        }
    }

    match text[end..].chars().next() {
        Some(next) if next.is_whitespace() => {}
        _ => return None,
    }

    // "1.0" and "1.05" are decimals, not outline numbers.
    let second = token.split('.').nth(1)?;
    if second.starts_with('0') {
        return None;
    }

    // Tokens too large for u64 are OCR noise, never headings.
    HeadingLabel::parse(token).ok()
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn labels(segments: &[Segment<'_>]) -> Vec<String> {
        segments.iter().map(|s| s.heading.to_string()).collect()
    }

    #[test]
    fn test_no_headings_yields_no_segments() {
        assert!(segment("Plain prose with no numbering at all.", HeadingDepth::Two).is_empty());
        assert!(segment("", HeadingDepth::Three).is_empty());
    }

    #[test]
    fn test_depth_two_ignores_depth_three_labels() {
        let text = "1.7 Intro text. 1.8 Activity A details. 1.8.1 Sub detail. 1.9 Next section.";
        let segments = segment(text, HeadingDepth::Two);

        assert_eq!(labels(&segments), vec!["1.7", "1.8", "1.9"]);
        assert_eq!(segments[1].body, " Activity A details. 1.8.1 Sub detail. ");
    }

    #[test]
    fn test_depth_three_ignores_depth_two_labels() {
        let text = "2.1 Summary 2.1.10 Earlier 2.1.11 Activities here 2.2 Other";
        let segments = segment(text, HeadingDepth::Three);

        assert_eq!(labels(&segments), vec!["2.1.10", "2.1.11"]);
        assert_eq!(segments[1].body, " Activities here 2.2 Other");
    }

    #[test]
    fn test_segments_are_contiguous_from_first_heading() {
        let text = "Cover page\n1.1 Alpha\n1.2 Beta\n1.3 Gamma";
        let segments = segment(text, HeadingDepth::Two);

        let rebuilt: String = segments.iter().map(|s| format!("{}{}", s.label, s.body)).collect();
        assert_eq!(rebuilt, &text[segments[0].offset..]);
    }

    #[test]
    fn test_decimals_and_glued_tokens_are_not_headings() {
        let text = "Emissions of 1.05 tCO2e, version v.1.2 and 3.0 ha. 4.2\tReal heading";
        let segments = segment(text, HeadingDepth::Two);

        assert_eq!(labels(&segments), vec!["4.2"]);
    }

    #[test]
    fn test_label_must_be_followed_by_whitespace() {
        let text = "See 1.8, then 1.8: and finally 1.8 Project activities";
        let segments = segment(text, HeadingDepth::Two);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].body, " Project activities");
    }

    #[test]
    fn test_out_of_order_numbering_is_kept_in_document_order() {
        let text = "1.8 A 1.2 B 1.8 C";
        assert_eq!(labels(&segment(text, HeadingDepth::Two)), vec!["1.8", "1.2", "1.8"]);
    }

    #[test]
    fn test_segment_at_depth_validates_depth() {
        assert!(matches!(segment_at_depth("1.1 x", 4), Err(ExtractError::InvalidDepth(_))));
        assert!(matches!(segment_at_depth("1.1 x", 1), Err(ExtractError::InvalidDepth(_))));
        assert_eq!(segment_at_depth("1.1 x", 2).unwrap().len(), 1);
    }

    #[test]
    fn test_large_document_scans_quickly() {
        let mut text = String::new();
        for i in 1..5000 {
            text.push_str(&format!("{}.{} section text at 0.05 ha, ref 12.5.7.1 ", i % 9 + 1, i % 40 + 1));
        }
        let segments = segment(&text, HeadingDepth::Two);
        assert_eq!(segments.len(), 4999);
    }
}
