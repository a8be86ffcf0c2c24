// src/pipeline.rs
use crate::extractors::{ActivityExtraction, ActivityExtractor, TemplateVersion};
use crate::llm::Summarizer;
use crate::registry::classifier::classify_documents;
use crate::registry::models::Project;
use crate::registry::selection::select_activity_document;
use crate::utils::error::ExtractError;
use serde::Serialize;

/// Terminal outcome of analysing one project. None of these stop a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalysisStatus {
    #[serde(rename = "no file found to analyse")]
    NoDocument,
    #[serde(rename = "unsupported template")]
    UnsupportedTemplate,
    #[serde(rename = "no meaningful data found")]
    NoMeaningfulContent,
    #[serde(rename = "summarization failed")]
    SummarizationFailed,
    /// Section extracted, summarization not requested.
    #[serde(rename = "extracted")]
    Extracted,
    #[serde(rename = "summarized")]
    Summarized,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityReport {
    pub project_id: u32,
    pub status: AnalysisStatus,
    pub document: Option<String>,
    pub template: Option<TemplateVersion>,
    pub headings: Vec<String>,
    pub raw_text: Option<String>,
    pub truncated_from: Option<usize>,
    pub activities: Vec<String>,
    pub summary_error: Option<String>,
}

impl ActivityReport {
    pub fn without_document(project_id: u32) -> Self {
        Self {
            project_id,
            status: AnalysisStatus::NoDocument,
            document: None,
            template: None,
            headings: Vec::new(),
            raw_text: None,
            truncated_from: None,
            activities: Vec::new(),
            summary_error: None,
        }
    }
}

/// Runs classification, document selection, section extraction and
/// (optionally) summarization for a project.
pub struct ProjectAnalyzer<S> {
    extractor: ActivityExtractor,
    summarizer: Option<S>,
}

impl<S: Summarizer> ProjectAnalyzer<S> {
    pub fn new(extractor: ActivityExtractor, summarizer: Option<S>) -> Self {
        Self { extractor, summarizer }
    }

    pub async fn analyse(&self, project: &mut Project) -> Result<ActivityReport, ExtractError> {
        tracing::info!("Analysing project activities for project {}", project.project_id);
        classify_documents(&mut project.documents);

        let mut report = ActivityReport::without_document(project.project_id);
        let Some(document) = select_activity_document(&project.documents) else {
            tracing::warn!("No file found to analyse for project {}", project.project_id);
            return Ok(report);
        };
        report.document = Some(document.filename.clone());

        let section = match self.extractor.extract_for_template(&document.text)? {
            ActivityExtraction::Unsupported => {
                report.status = AnalysisStatus::UnsupportedTemplate;
                report.template = Some(TemplateVersion::Unsupported);
                return Ok(report);
            }
            ActivityExtraction::NoMeaningfulContent { template, text } => {
                report.status = AnalysisStatus::NoMeaningfulContent;
                report.template = Some(template);
                report.raw_text = Some(text);
                return Ok(report);
            }
            ActivityExtraction::Extracted(section) => section,
        };

        report.template = Some(section.template);
        report.headings = section.headings;
        report.truncated_from = section.truncated;
        report.status = AnalysisStatus::Extracted;

        if let Some(summarizer) = &self.summarizer {
            match summarizer.summarize_activities(&section.text).await {
                Ok(activities) => {
                    tracing::info!("LLM returned {} activities", activities.len());
                    report.activities = activities;
                    report.status = AnalysisStatus::Summarized;
                }
                Err(e) => {
                    tracing::error!("Call to LLM failed: {}", e);
                    report.status = AnalysisStatus::SummarizationFailed;
                    report.summary_error = Some(e.to_string());
                }
            }
        }

        report.raw_text = Some(section.text);
        Ok(report)
    }
}
