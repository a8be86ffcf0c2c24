// src/registry/classifier.rs
//! Rule-based document type scoring.
//!
//! Each rule combines a filename hint with a content marker. Rules run in a
//! fixed order and most only fire while the document is still unclassified;
//! the joint PD & MR rule may also upgrade a plain PD or MR.

use crate::registry::models::{DocumentType, ProjectDocument};

// --- Constants ---
const MIN_TEXT_CHARS: usize = 10;

// Legal documents, first hit wins. Checked against PDFs only.
const LEGAL_MARKERS: &[(&str, DocumentType)] = &[
    ("VCS LISTING REPRESENTATION", DocumentType::VcsListingRepresentation),
    ("VCS REGISTRATION DEED OF REPRESENTATION", DocumentType::VcsRegistrationDeed),
    ("VCS ISSUANCE DEED OF REPRESENTATION", DocumentType::VcsIssuanceDeed),
    ("VCS VALIDATION DEED OF REPRESENTATION", DocumentType::VcsValidationDeed),
    ("VCS VERIFICATION DEED OF REPRESENTATION", DocumentType::VcsVerificationDeed),
    ("VERRA REGISTRY COMMUNICATIONS AGREEMENT", DocumentType::RegistryCommunicationsAgreement),
    ("DECLARATION OF AGENCY AND COMMUNICATIONS AGREEMENT", DocumentType::RegistryCommunicationsAgreement),
];

const PD_MARKERS: &[&str] = &[
    "CCB & VCS PROJECT DESCRIPTION",
    "Project Description: VCS Version ",
    "PROJECT DESCRIPTION: VCS Version ",
];

/// Works out the registry document type from filename and text.
pub fn classify_document(filename: &str, text: &str) -> DocumentType {
    if text.chars().count() < MIN_TEXT_CHARS {
        return DocumentType::Other;
    }

    let name = filename.to_lowercase();
    let lower_text = text.to_lowercase();
    let mut doc_type = DocumentType::Unclassified;

    if name.ends_with(".pdf") {
        if let Some((_, legal)) = LEGAL_MARKERS.iter().find(|(marker, _)| text.contains(*marker)) {
            doc_type = *legal;
        }
    }

    if doc_type == DocumentType::Unclassified {
        let name_score = (name.contains("proj") && name.contains("desc")) || filename.contains("PD");
        let text_score = PD_MARKERS.iter().any(|m| text.contains(*m));
        if name_score || text_score {
            doc_type = DocumentType::ProjectDescription;
        }
    }

    if doc_type == DocumentType::Unclassified {
        let name_score = name.contains("monitoring") || filename.contains("MR");
        if name_score || text.contains("MONITORING REPORT:") {
            doc_type = DocumentType::MonitoringReport;
        }
    }

    if matches!(
        doc_type,
        DocumentType::Unclassified | DocumentType::ProjectDescription | DocumentType::MonitoringReport
    ) {
        let name_score = name.contains("joint") && (name.contains("description") || name.contains("monitoring"));
        if name_score || text.contains("Joint Project Description & Monitoring Report: VCS Version ") {
            doc_type = DocumentType::JointPdAndMr;
        }
    }

    if doc_type == DocumentType::Unclassified {
        let name_score = name.contains("val") && name.contains("report");
        if name_score
            || lower_text.contains("validation report: vcs version ")
            || text.contains("CCB & VCS VALIDATION REPORT:")
        {
            doc_type = DocumentType::ValidationReport;
        }
    }

    if doc_type == DocumentType::Unclassified {
        let name_score = name.contains("ver") && name.contains("report");
        if name_score
            || lower_text.contains("verification report: vcs version ")
            || text.contains("CCB & VCS VERIFICATION REPORT:")
        {
            doc_type = DocumentType::VerificationReport;
        }
    }

    if doc_type == DocumentType::Unclassified {
        let name_score = name.contains("joint") && name.contains("val") && name.contains("ver");
        if name_score || lower_text.contains("joint validation & verification report: vcs version ") {
            doc_type = DocumentType::JointVrVr;
        }
    }

    if doc_type == DocumentType::Unclassified {
        doc_type = DocumentType::Other;
    }
    doc_type
}

/// Classifies every document of a project in place.
pub fn classify_documents(documents: &mut [ProjectDocument]) {
    for doc in documents.iter_mut() {
        doc.doc_type = classify_document(&doc.filename, &doc.text);
        tracing::info!("Classified {} as {:?} (code {})", doc.filename, doc.doc_type, doc.doc_type.code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILLER: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.";

    #[test]
    fn test_short_text_is_other() {
        assert_eq!(classify_document("PD.pdf", "tiny"), DocumentType::Other);
    }

    #[test]
    fn test_legal_markers_only_for_pdfs() {
        let text = format!("{} VCS ISSUANCE DEED OF REPRESENTATION", FILLER);
        assert_eq!(classify_document("deed.pdf", &text), DocumentType::VcsIssuanceDeed);
        assert_eq!(classify_document("deed.docx", &text), DocumentType::Other);
    }

    #[test]
    fn test_project_description_by_filename_or_content() {
        assert_eq!(classify_document("Project_Description_v2.pdf", FILLER), DocumentType::ProjectDescription);
        assert_eq!(classify_document("1882_PD.pdf", FILLER), DocumentType::ProjectDescription);

        let text = format!("PROJECT DESCRIPTION: VCS Version 3 {}", FILLER);
        assert_eq!(classify_document("document.pdf", &text), DocumentType::ProjectDescription);
    }

    #[test]
    fn test_monitoring_report() {
        assert_eq!(classify_document("Monitoring_2019.pdf", FILLER), DocumentType::MonitoringReport);
        let text = format!("MONITORING REPORT: {}", FILLER);
        assert_eq!(classify_document("doc.pdf", &text), DocumentType::MonitoringReport);
    }

    #[test]
    fn test_joint_pd_mr_upgrades_pd() {
        let text = format!("Joint Project Description & Monitoring Report: VCS Version 4 {}", FILLER);
        assert_eq!(classify_document("Joint_PD.pdf", &text), DocumentType::JointPdAndMr);
        assert_eq!(classify_document("joint_description.pdf", FILLER), DocumentType::JointPdAndMr);
    }

    #[test]
    fn test_validation_and_verification_reports() {
        assert_eq!(classify_document("Validation_Report.pdf", FILLER), DocumentType::ValidationReport);
        assert_eq!(classify_document("Verification_Report.pdf", FILLER), DocumentType::VerificationReport);

        let text = format!("{} Verification Report: VCS Version 3", FILLER);
        assert_eq!(classify_document("doc.pdf", &text), DocumentType::VerificationReport);
    }

    #[test]
    fn test_joint_validation_verification() {
        assert_eq!(classify_document("Joint_Val_Ver.pdf", FILLER), DocumentType::JointVrVr);

        // The verification marker is a substring of the joint one and is checked first.
        let text = format!("{} Joint Validation & Verification Report: VCS Version 4", FILLER);
        assert_eq!(classify_document("doc.pdf", &text), DocumentType::VerificationReport);
    }

    #[test]
    fn test_unknown_is_other() {
        assert_eq!(classify_document("map.pdf", FILLER), DocumentType::Other);
    }
}
