// src/main.rs
mod extractors;
mod llm;
mod pipeline;
mod registry;
mod storage;
mod utils;

use clap::Parser;
use extractors::{activities, ActivityExtractor, TemplateVersion};
use llm::{OpenAiConfig, OpenAiSummarizer};
use pipeline::{AnalysisStatus, ProjectAnalyzer};
use registry::page::parse_registry_page;
use registry::ProjectManifest;
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for extracting project activities from VCS project descriptions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing manifest.json and the extracted document texts
    #[arg(short, long)]
    project_dir: String,

    /// Saved registry project page (HTML) to read standardised attributes from
    #[arg(long)]
    page: Option<String>,

    /// Output directory for analysis results
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Maximum characters of section text handed to the summarizer
    #[arg(long, default_value_t = activities::DEFAULT_MAX_CHARS)]
    max_chars: usize,

    /// Minimum characters for a section to count as meaningful
    #[arg(long, default_value_t = activities::DEFAULT_MIN_CHARS)]
    min_chars: usize,

    /// Force a template instead of detecting it (vcs3, vcs3-ccb3, vcs4)
    #[arg(long)]
    template: Option<String>,

    /// Extract only, do not call the language model
    #[arg(long)]
    skip_summary: bool,

    /// Debug mode - save the segment outline of the analysed document
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.debug);
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Build the section extractor
    let mut extractor = ActivityExtractor::new(args.max_chars, args.min_chars);
    if let Some(name) = &args.template {
        let template = TemplateVersion::from_cli_name(name)
            .ok_or_else(|| AppError::Config(format!("Unknown template '{}'", name)))?;
        tracing::info!("Template forced to {}", template);
        extractor = extractor.for_template_override(template);
    }

    // 4. Initialize the summarizer, unless disabled or not configured
    let summarizer = if args.skip_summary {
        tracing::info!("Summarization disabled by --skip-summary");
        None
    } else {
        match OpenAiConfig::from_env() {
            Ok(config) => Some(OpenAiSummarizer::new(config)?),
            Err(e) => {
                tracing::warn!("Summarization disabled: {}", e);
                None
            }
        }
    };

    // 5. Initialize storage and load the project
    let storage = StorageManager::new(&args.output_dir)?;
    let mut project = ProjectManifest::load_project(&args.project_dir)?;
    tracing::info!("Loaded project {} with {} documents", project.project_id, project.documents.len());

    if let Some(page_path) = &args.page {
        let page = parse_registry_page(&std::fs::read_to_string(page_path)?);
        tracing::info!("Registry page lists {} documents", page.documents.len());
        for listing in &page.documents {
            if let Some(doc) = project.documents.iter_mut().find(|d| d.filename == listing.filename) {
                if listing.updated > doc.last_updated.date() {
                    tracing::warn!(
                        "Registry lists a newer version of {} ({}), extracted text may be stale",
                        listing.filename, listing.updated
                    );
                }
                if doc.url.is_empty() {
                    doc.url = listing.url.clone();
                }
                if doc.website_category.is_empty() {
                    doc.website_category = listing.section.clone();
                }
            } else {
                tracing::warn!("Listed document {} has no extracted text in the manifest", listing.filename);
            }
        }
        project.attributes = page.attributes;
        storage.save_attributes(project.project_id, &project.attributes)?;
    }

    // 6. Analyse project activities
    let analyzer = ProjectAnalyzer::new(extractor, summarizer);
    let report = analyzer.analyse(&mut project).await?;

    if args.debug {
        if let Some(doc) = project.documents.iter().find(|d| Some(&d.filename) == report.document.as_ref()) {
            let debug_path = storage.project_dir(project.project_id)?.join("segments_debug.txt");
            if let Err(e) = utils::segment_debug::save_segment_debug(&doc.text, &debug_path) {
                tracing::warn!("Failed to create segment outline: {}", e);
            }
        }
    }

    // 7. Persist the outcome
    storage.save_raw_text(&report)?;
    storage.save_report(&report)?;

    match report.status {
        AnalysisStatus::Summarized => {
            for activity in &report.activities {
                tracing::info!("Activity: {}", activity);
            }
        }
        status => tracing::info!("Project {} finished with status {:?}", project.project_id, status),
    }
    if let Some(original) = report.truncated_from {
        tracing::info!("Section text was truncated from {} characters", original);
    }

    tracing::info!("Processing finished for project {}", project.project_id);
    Ok(())
}
