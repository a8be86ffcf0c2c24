// src/registry/models.rs
use crate::utils::error::RegistryError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest.json";

/// Registry document categories, with the integer codes used in stored results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Unclassified,
    VcsListingRepresentation,
    VcsRegistrationDeed,
    VcsIssuanceDeed,
    VcsValidationDeed,
    VcsVerificationDeed,
    RegistryCommunicationsAgreement,
    ProjectDescription,
    MonitoringReport,
    JointPdAndMr,
    ValidationReport,
    VerificationReport,
    JointVrVr,
    Other,
}

impl DocumentType {
    pub fn code(self) -> u8 {
        match self {
            DocumentType::Unclassified => 0,
            DocumentType::VcsListingRepresentation => 1,
            DocumentType::VcsRegistrationDeed => 2,
            DocumentType::VcsIssuanceDeed => 3,
            DocumentType::VcsValidationDeed => 4,
            DocumentType::VcsVerificationDeed => 5,
            DocumentType::RegistryCommunicationsAgreement => 6,
            DocumentType::ProjectDescription => 11,
            DocumentType::MonitoringReport => 12,
            DocumentType::JointPdAndMr => 13,
            DocumentType::ValidationReport => 14,
            DocumentType::VerificationReport => 15,
            DocumentType::JointVrVr => 16,
            DocumentType::Other => 99,
        }
    }
}

/// A single document attached to a registry project, with its extracted text.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDocument {
    pub doc_id: u32,
    pub project_id: u32,
    pub filename: String,
    pub website_category: String,
    pub last_updated: NaiveDateTime,
    pub url: String,
    #[serde(skip)]
    pub text: String,
    pub doc_type: DocumentType,
    pub language: String,
}

/// Standardised attributes shown in the VCS block of a registry project page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAttributes {
    pub proponent: Option<String>,
    pub annual_emission_red: Option<String>,
    pub vcs_methodology: Option<String>,
    pub hectares: Option<String>,
    pub vcs_project_validator: Option<String>,
    pub registration_date: Option<NaiveDate>,
    pub crediting_period_term: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Project {
    pub project_id: u32,
    pub documents: Vec<ProjectDocument>,
    pub attributes: ProjectAttributes,
}

/// On-disk description of a project whose documents were already converted to text.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectManifest {
    pub project_id: u32,
    pub documents: Vec<ManifestDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestDocument {
    pub filename: String,
    /// Path of the plain-text rendition, relative to the manifest.
    pub text_path: PathBuf,
    pub last_updated: NaiveDateTime,
    #[serde(default)]
    pub website_category: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "not detected".to_string()
}

impl ProjectManifest {
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads `manifest.json` from `project_dir` and loads every referenced text file.
    pub fn load_project<P: AsRef<Path>>(project_dir: P) -> Result<Project, RegistryError> {
        let project_dir = project_dir.as_ref();
        let manifest_path = project_dir.join(MANIFEST_FILE);
        tracing::debug!("Reading project manifest from {}", manifest_path.display());
        let manifest = Self::from_json(&fs::read_to_string(&manifest_path)?)?;

        let mut documents = Vec::with_capacity(manifest.documents.len());
        for (i, entry) in manifest.documents.into_iter().enumerate() {
            let text_path = project_dir.join(&entry.text_path);
            // An unreadable document is kept with empty text so it classifies as Other.
            let text = match fs::read(&text_path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    tracing::warn!(
                        "Could not read text of {} from {}: {}",
                        entry.filename,
                        text_path.display(),
                        e
                    );
                    String::new()
                }
            };
            tracing::debug!("Loaded {} ({} bytes of text)", entry.filename, text.len());

            documents.push(ProjectDocument {
                doc_id: (i + 1) as u32,
                project_id: manifest.project_id,
                filename: entry.filename,
                website_category: entry.website_category,
                last_updated: entry.last_updated,
                url: entry.url,
                text,
                doc_type: DocumentType::Unclassified,
                language: entry.language,
            });
        }

        Ok(Project {
            project_id: manifest.project_id,
            documents,
            attributes: ProjectAttributes::default(),
        })
    }
}
