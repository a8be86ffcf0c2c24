// src/registry/mod.rs
pub mod classifier;
pub mod models;
pub mod page;
pub mod selection;

// Re-export key registry types for convenience
#[allow(unused_imports)]
pub use models::{DocumentType, Project, ProjectAttributes, ProjectDocument, ProjectManifest};
