// src/extractors/activities.rs
use crate::extractors::heading::HeadingLabel;
use crate::extractors::section::extract_with_fallback;
use crate::extractors::template::TemplateVersion;
use crate::utils::error::ExtractError;
use serde::Serialize;

// --- Constants ---
/// Upper bound on text handed to the summarizer, in characters.
pub const DEFAULT_MAX_CHARS: usize = 30_000;
/// Anything shorter than this is treated as an empty section.
pub const DEFAULT_MIN_CHARS: usize = 10;

// --- Data Structures ---
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExtractedActivities {
    pub template: TemplateVersion,
    pub headings: Vec<String>,
    pub text: String,
    /// Character length before truncation, when the cap was applied.
    pub truncated: Option<usize>,
}

/// Outcome of locating the project activities section in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityExtraction {
    Extracted(ExtractedActivities),
    /// The section was missing or shorter than the minimum; `text` is what was found.
    NoMeaningfulContent { template: TemplateVersion, text: String },
    Unsupported,
}

/// Picks the template-specific headings, extracts them and bounds the result.
#[derive(Debug, Clone, Copy)]
pub struct ActivityExtractor {
    max_chars: usize,
    min_chars: usize,
    template_override: Option<TemplateVersion>,
}

impl Default for ActivityExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS, DEFAULT_MIN_CHARS)
    }
}

impl ActivityExtractor {
    pub fn new(max_chars: usize, min_chars: usize) -> Self {
        Self { max_chars, min_chars, template_override: None }
    }

    /// Skips marker classification and always uses `template`.
    pub fn for_template_override(mut self, template: TemplateVersion) -> Self {
        self.template_override = Some(template);
        self
    }

    pub fn extract_for_template(&self, document_text: &str) -> Result<ActivityExtraction, ExtractError> {
        let template = self
            .template_override
            .unwrap_or_else(|| TemplateVersion::classify(document_text));
        tracing::info!("Document template detected as {}", template);

        if template == TemplateVersion::Unsupported {
            tracing::warn!(
                "Invalid document version. Expected a document using the VCS template version 3 or 4."
            );
            return Ok(ActivityExtraction::Unsupported);
        }

        let headings = template.target_headings();
        let mut combined = String::new();
        for heading in headings {
            let target = HeadingLabel::parse(heading)?;
            combined.push_str(&extract_with_fallback(document_text, &target));
        }

        Ok(self.bound(template, headings, combined))
    }

    /// Applies the size cap and the minimum-content threshold.
    fn bound(&self, template: TemplateVersion, headings: &[&str], mut text: String) -> ActivityExtraction {
        let mut truncated = None;
        if let Some((cut, _)) = text.char_indices().nth(self.max_chars) {
            let original_len = text.chars().count();
            tracing::info!(
                "Extracted text was shortened to {} characters, as original character length was {}",
                self.max_chars,
                original_len
            );
            text.truncate(cut);
            truncated = Some(original_len);
        }

        let length = text.chars().count();
        if length < self.min_chars {
            tracing::info!(
                "Extracted text has {} characters, below the {} character minimum",
                length,
                self.min_chars
            );
            return ActivityExtraction::NoMeaningfulContent { template, text };
        }

        ActivityExtraction::Extracted(ExtractedActivities {
            template,
            headings: headings.iter().map(|h| h.to_string()).collect(),
            text,
            truncated,
        })
    }
}
