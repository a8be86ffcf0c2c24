// src/storage/mod.rs
use crate::pipeline::ActivityReport;
use crate::registry::models::ProjectAttributes;
use crate::utils::error::StorageError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Directory holding every output file of one project: /base_dir/project_id/
    pub fn project_dir(&self, project_id: u32) -> Result<PathBuf, StorageError> {
        let target_dir = self.base_dir.join(project_id.to_string());
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }
        Ok(target_dir)
    }

    /// Saves the raw extracted section text, if the analysis got that far.
    pub fn save_raw_text(&self, report: &ActivityReport) -> Result<Option<PathBuf>, StorageError> {
        let Some(raw_text) = &report.raw_text else {
            return Ok(None);
        };

        let file_path = self.project_dir(report.project_id)?.join("activities_raw.txt");
        let mut file = fs::File::create(&file_path).map_err(StorageError::IoError)?;
        file.write_all(raw_text.as_bytes()).map_err(StorageError::IoError)?;

        tracing::info!("Saved raw section text to {}", file_path.display());
        Ok(Some(file_path))
    }

    /// Saves the analysis outcome and activities in JSON format
    pub fn save_report(&self, report: &ActivityReport) -> Result<PathBuf, StorageError> {
        let file_path = self.project_dir(report.project_id)?.join("activities.json");

        let metadata = serde_json::json!({
            "project_id": report.project_id,
            "status": report.status,
            "document": report.document,
            "template": report.template,
            "headings": report.headings,
            "raw_text_length": report.raw_text.as_ref().map(|t| t.chars().count()),
            "truncated_from": report.truncated_from,
            "activities": report.activities,
            "summary_error": report.summary_error,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved analysis report to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves the standardised registry attributes of a project
    pub fn save_attributes(&self, project_id: u32, attributes: &ProjectAttributes) -> Result<PathBuf, StorageError> {
        let file_path = self.project_dir(project_id)?.join("attributes.json");

        let attributes_str = serde_json::to_string_pretty(attributes)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, attributes_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved project attributes to {}", file_path.display());
        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::TemplateVersion;
    use crate::pipeline::AnalysisStatus;

    #[test]
    fn test_saves_report_and_raw_text() {
        let base = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(base.path()).unwrap();

        let report = ActivityReport {
            project_id: 1882,
            status: AnalysisStatus::Summarized,
            document: Some("PD.pdf".to_string()),
            template: Some(TemplateVersion::Vcs3),
            headings: vec!["1.8".to_string()],
            raw_text: Some("; Position 1: 1.8 Planting".to_string()),
            truncated_from: None,
            activities: vec!["Planting: native species".to_string()],
            summary_error: None,
        };

        let raw_path = storage.save_raw_text(&report).unwrap().unwrap();
        assert_eq!(fs::read_to_string(raw_path).unwrap(), "; Position 1: 1.8 Planting");

        let json_path = storage.save_report(&report).unwrap();
        let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(json_path).unwrap()).unwrap();
        assert_eq!(saved["status"], "summarized");
        assert_eq!(saved["template"], "vcs3");
        assert_eq!(saved["raw_text_length"], 26);
        assert_eq!(saved["activities"][0], "Planting: native species");
    }

    #[test]
    fn test_no_raw_text_file_without_extraction() {
        let base = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(base.path()).unwrap();
        let report = ActivityReport::without_document(5);

        assert!(storage.save_raw_text(&report).unwrap().is_none());
        let saved = fs::read_to_string(storage.save_report(&report).unwrap()).unwrap();
        assert!(saved.contains("no file found to analyse"));
    }
}
