// src/extractors/template.rs
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Constants ---
const VCS_V3_MARKER: &str = "VCS Version 3";
const CCB_V3_MARKER: &str = "CCB Version 3";
const VCS_V4_MARKER: &str = "VCS Version 4";

/// Template page footers repeat on every page; more than this many hits
/// means the document really is built on that template.
const MARKER_THRESHOLD: usize = 10;

/// The project description template a document was written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateVersion {
    /// Joint CCB & VCS v3 template.
    Vcs3Ccb3,
    Vcs3,
    Vcs4,
    Unsupported,
}

impl TemplateVersion {
    pub fn classify(text: &str) -> Self {
        MarkerCounts::count(text).template()
    }

    /// Outline headings holding the "project activities" narrative.
    pub fn target_headings(self) -> &'static [&'static str] {
        match self {
            TemplateVersion::Vcs3Ccb3 => &["2.1.11"],
            TemplateVersion::Vcs3 => &["1.8"],
            TemplateVersion::Vcs4 => &["1.11"],
            TemplateVersion::Unsupported => &[],
        }
    }

    /// Parses the short names accepted on the command line.
    pub fn from_cli_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "vcs3-ccb3" | "ccb3" => Some(TemplateVersion::Vcs3Ccb3),
            "vcs3" => Some(TemplateVersion::Vcs3),
            "vcs4" => Some(TemplateVersion::Vcs4),
            _ => None,
        }
    }
}

impl fmt::Display for TemplateVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemplateVersion::Vcs3Ccb3 => "VCS v3 / CCB v3",
            TemplateVersion::Vcs3 => "VCS v3",
            TemplateVersion::Vcs4 => "VCS v4",
            TemplateVersion::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// Raw marker occurrence counts for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerCounts {
    pub vcs_v3: usize,
    pub ccb_v3: usize,
    pub vcs_v4: usize,
}

impl MarkerCounts {
    pub fn count(text: &str) -> Self {
        Self {
            vcs_v3: text.matches(VCS_V3_MARKER).count(),
            ccb_v3: text.matches(CCB_V3_MARKER).count(),
            vcs_v4: text.matches(VCS_V4_MARKER).count(),
        }
    }

    pub fn template(&self) -> TemplateVersion {
        if self.vcs_v3 > MARKER_THRESHOLD && self.ccb_v3 > MARKER_THRESHOLD {
            TemplateVersion::Vcs3Ccb3
        } else if self.vcs_v3 > MARKER_THRESHOLD {
            TemplateVersion::Vcs3
        } else if self.vcs_v4 > MARKER_THRESHOLD {
            TemplateVersion::Vcs4
        } else {
            TemplateVersion::Unsupported
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeated(marker: &str, times: usize) -> String {
        format!("{} ", marker).repeat(times)
    }

    #[test]
    fn test_threshold_is_strictly_greater_than_ten() {
        assert_eq!(TemplateVersion::classify(&repeated(VCS_V3_MARKER, 10)), TemplateVersion::Unsupported);
        assert_eq!(TemplateVersion::classify(&repeated(VCS_V3_MARKER, 11)), TemplateVersion::Vcs3);
    }

    #[test]
    fn test_joint_template_takes_precedence() {
        let text = repeated(VCS_V3_MARKER, 12) + &repeated(CCB_V3_MARKER, 12) + &repeated(VCS_V4_MARKER, 30);
        assert_eq!(TemplateVersion::classify(&text), TemplateVersion::Vcs3Ccb3);
    }

    #[test]
    fn test_v3_wins_over_v4() {
        let text = repeated(VCS_V3_MARKER, 11) + &repeated(VCS_V4_MARKER, 11);
        assert_eq!(TemplateVersion::classify(&text), TemplateVersion::Vcs3);
        assert_eq!(TemplateVersion::classify(&repeated(VCS_V4_MARKER, 11)), TemplateVersion::Vcs4);
    }

    #[test]
    fn test_target_headings_per_template() {
        assert_eq!(TemplateVersion::Vcs3Ccb3.target_headings(), &["2.1.11"]);
        assert_eq!(TemplateVersion::Vcs3.target_headings(), &["1.8"]);
        assert_eq!(TemplateVersion::Vcs4.target_headings(), &["1.11"]);
        assert!(TemplateVersion::Unsupported.target_headings().is_empty());
    }

    #[test]
    fn test_cli_names() {
        assert_eq!(TemplateVersion::from_cli_name("VCS4"), Some(TemplateVersion::Vcs4));
        assert_eq!(TemplateVersion::from_cli_name("vcs3-ccb3"), Some(TemplateVersion::Vcs3Ccb3));
        assert_eq!(TemplateVersion::from_cli_name("gold-standard"), None);
    }
}
