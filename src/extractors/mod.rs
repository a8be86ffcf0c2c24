// src/extractors/mod.rs
pub mod activities;
pub mod heading;
pub mod section;
pub mod segmenter;
pub mod template;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use activities::{ActivityExtraction, ActivityExtractor, ExtractedActivities};
#[allow(unused_imports)]
pub use heading::{HeadingDepth, HeadingLabel};
#[allow(unused_imports)]
pub use section::{extract_section, extract_section_with_diagnostics, extract_with_fallback, SectionDiagnostics};
#[allow(unused_imports)]
pub use segmenter::{segment, segment_at_depth, Segment};
#[allow(unused_imports)]
pub use template::{MarkerCounts, TemplateVersion};
