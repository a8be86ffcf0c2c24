// src/registry/selection.rs
use crate::registry::models::{DocumentType, ProjectDocument};
use std::cmp::Reverse;

/// Document types that carry the project activities narrative.
pub const ACTIVITY_DOCUMENT_TYPES: &[DocumentType] = &[DocumentType::ProjectDescription, DocumentType::JointPdAndMr];

/// Chooses the single document to analyse for a project.
///
/// Candidates are narrowed while more than one remains: drafts go first, then
/// summaries, then non-English documents. A step that would leave nothing is
/// skipped. The most recently updated survivor wins.
pub fn select_activity_document(documents: &[ProjectDocument]) -> Option<&ProjectDocument> {
    let mut candidates: Vec<&ProjectDocument> = documents
        .iter()
        .filter(|doc| ACTIVITY_DOCUMENT_TYPES.contains(&doc.doc_type))
        .collect();

    if candidates.is_empty() {
        return None;
    }

    narrow(&mut candidates, |doc| !doc.filename.to_lowercase().contains("draft"));
    narrow(&mut candidates, |doc| !doc.filename.to_lowercase().contains("summary"));
    narrow(&mut candidates, |doc| doc.language == "en");

    tracing::info!("There are {} document(s) that could be considered", candidates.len());
    // Ties on the update date keep the earliest listed document.
    let selected = candidates.into_iter().min_by_key(|doc| Reverse(doc.last_updated))?;
    tracing::info!("Filename of analysed document: {}", selected.filename);
    Some(selected)
}

fn narrow<F>(candidates: &mut Vec<&ProjectDocument>, keep: F)
where
    F: Fn(&ProjectDocument) -> bool,
{
    if candidates.len() <= 1 {
        return;
    }
    let kept: Vec<&ProjectDocument> = candidates.iter().copied().filter(|doc| keep(doc)).collect();
    if !kept.is_empty() {
        *candidates = kept;
    }
}
