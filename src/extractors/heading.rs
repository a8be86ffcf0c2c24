// src/extractors/heading.rs
use crate::utils::error::ExtractError;
use std::fmt;
use std::str::FromStr;

/// Outline depth of a numbered heading: "1.8" is `Two`, "2.1.11" is `Three`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingDepth {
    Two,
    Three,
}

impl HeadingDepth {
    /// Number of dot-separated components at this depth.
    pub fn components(self) -> usize {
        match self {
            HeadingDepth::Two => 2,
            HeadingDepth::Three => 3,
        }
    }

    pub fn from_components(count: usize) -> Option<Self> {
        match count {
            2 => Some(HeadingDepth::Two),
            3 => Some(HeadingDepth::Three),
            _ => None,
        }
    }
}

impl TryFrom<u8> for HeadingDepth {
    type Error = ExtractError;

    fn try_from(depth: u8) -> Result<Self, Self::Error> {
        Self::from_components(depth as usize)
            .ok_or_else(|| ExtractError::InvalidDepth(depth.to_string()))
    }
}

/// A dotted numeric outline label such as "1.8" or "2.1.11".
///
/// Equality compares the integer components, so "01.8" equals "1.8" while
/// "1.9" and "1.10" are unrelated labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeadingLabel {
    components: Vec<u64>,
    depth: HeadingDepth,
}

impl HeadingLabel {
    pub fn parse(label: &str) -> Result<Self, ExtractError> {
        let parts: Vec<&str> = label.trim().split('.').collect();
        let depth = HeadingDepth::from_components(parts.len())
            .ok_or_else(|| ExtractError::InvalidDepth(label.to_string()))?;

        let components = parts
            .iter()
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ExtractError::InvalidHeading(label.to_string()));
                }
                part.parse::<u64>()
                    .map_err(|_| ExtractError::InvalidHeading(label.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { components, depth })
    }

    pub fn depth(&self) -> HeadingDepth {
        self.depth
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// The enclosing depth-2 heading of a depth-3 label ("2.1.11" -> "2.1").
    pub fn parent(&self) -> Option<HeadingLabel> {
        match self.depth {
            HeadingDepth::Three => Some(Self {
                components: self.components[..2].to_vec(),
                depth: HeadingDepth::Two,
            }),
            HeadingDepth::Two => None,
        }
    }

    /// True once `self` has moved more than one step past `target` in any
    /// component, i.e. it can no longer be a continuation of the target section.
    pub fn escapes(&self, target: &HeadingLabel) -> bool {
        debug_assert_eq!(self.depth, target.depth);
        self != target
            && self
                .components()
                .iter()
                .zip(target.components())
                .any(|(current, wanted)| *current > wanted.saturating_add(1))
    }
}

impl FromStr for HeadingLabel {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HeadingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .components
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(".");
        f.write_str(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_depths() {
        let two = HeadingLabel::parse("1.8").unwrap();
        assert_eq!(two.depth(), HeadingDepth::Two);
        assert_eq!(two.components(), &[1, 8]);

        let three = HeadingLabel::parse("2.1.11").unwrap();
        assert_eq!(three.depth(), HeadingDepth::Three);
        assert_eq!(three.components(), &[2, 1, 11]);
    }

    #[test]
    fn test_invalid_depth_is_rejected() {
        assert_eq!(
            HeadingLabel::parse("1"),
            Err(ExtractError::InvalidDepth("1".to_string()))
        );
        assert!(matches!(
            HeadingLabel::parse("1.2.3.4"),
            Err(ExtractError::InvalidDepth(_))
        ));
        assert!(matches!(HeadingDepth::try_from(4u8), Err(ExtractError::InvalidDepth(_))));
    }

    #[test]
    fn test_non_numeric_components_are_rejected() {
        assert!(matches!(
            HeadingLabel::parse("1.a"),
            Err(ExtractError::InvalidHeading(_))
        ));
        assert!(matches!(
            HeadingLabel::parse("1..2"),
            Err(ExtractError::InvalidHeading(_))
        ));
    }

    #[test]
    fn test_integer_equality_not_string_equality() {
        assert_eq!(HeadingLabel::parse("01.8").unwrap(), HeadingLabel::parse("1.8").unwrap());
        assert_ne!(HeadingLabel::parse("1.1").unwrap(), HeadingLabel::parse("1.10").unwrap());
    }

    #[test]
    fn test_escape_uses_gap_greater_than_one() {
        let target = HeadingLabel::parse("1.8").unwrap();
        let next = HeadingLabel::parse("1.9").unwrap();
        let far = HeadingLabel::parse("1.10").unwrap();
        let earlier = HeadingLabel::parse("1.2").unwrap();

        assert!(!target.escapes(&target));
        assert!(!next.escapes(&target));
        assert!(far.escapes(&target));
        assert!(!earlier.escapes(&target));
    }

    #[test]
    fn test_parent_drops_last_component() {
        let label = HeadingLabel::parse("2.1.11").unwrap();
        assert_eq!(label.parent(), Some(HeadingLabel::parse("2.1").unwrap()));
        assert_eq!(HeadingLabel::parse("2.1").unwrap().parent(), None);
        assert_eq!(label.to_string(), "2.1.11");
    }
}
