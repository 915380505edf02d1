//! Dependency coordinates (`group:artifact[:version]`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The identity of a library dependency: `group:artifact`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
}

impl Coordinate {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    /// Split a full notation such as `androidx.multidex:multidex:2.0.1`
    /// into its coordinate and version parts.
    ///
    /// The version part is optional; `group:artifact` yields `None`.
    pub fn parse_notation(notation: &str) -> Result<(Self, Option<String>)> {
        let parts: Vec<&str> = notation.trim().split(':').collect();
        match parts.as_slice() {
            [group, artifact] => Ok((Self::checked(notation, group, artifact)?, None)),
            [group, artifact, version] => {
                if version.is_empty() {
                    return Err(invalid(notation, "version part is empty"));
                }
                Ok((
                    Self::checked(notation, group, artifact)?,
                    Some(version.to_string()),
                ))
            }
            _ => Err(invalid(
                notation,
                "expected 'group:artifact' or 'group:artifact:version'",
            )),
        }
    }

    fn checked(notation: &str, group: &str, artifact: &str) -> Result<Self> {
        if !is_valid_part(group) {
            return Err(invalid(notation, &format!("invalid group '{group}'")));
        }
        if !is_valid_part(artifact) {
            return Err(invalid(notation, &format!("invalid artifact '{artifact}'")));
        }
        Ok(Self::new(group, artifact))
    }
}

fn is_valid_part(part: &str) -> bool {
    !part.is_empty()
        && !part.starts_with('.')
        && !part.ends_with('.')
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

fn invalid(notation: &str, reason: &str) -> Error {
    Error::InvalidCoordinate {
        notation: notation.to_string(),
        reason: reason.to_string(),
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match Self::parse_notation(s)? {
            (coordinate, None) => Ok(coordinate),
            (_, Some(_)) => Err(invalid(s, "unexpected version part")),
        }
    }
}

impl TryFrom<String> for Coordinate {
    type Error = Error;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_notation() {
        let (coordinate, version) =
            Coordinate::parse_notation("com.android.tools:desugar_jdk_libs:2.1.5").unwrap();
        assert_eq!(coordinate, Coordinate::new("com.android.tools", "desugar_jdk_libs"));
        assert_eq!(version.as_deref(), Some("2.1.5"));
    }

    #[test]
    fn test_parse_without_version() {
        let (coordinate, version) = Coordinate::parse_notation("androidx.multidex:multidex").unwrap();
        assert_eq!(coordinate.to_string(), "androidx.multidex:multidex");
        assert_eq!(version, None);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Coordinate::parse_notation("multidex").is_err());
        assert!(Coordinate::parse_notation("a:b:c:d").is_err());
        assert!(Coordinate::parse_notation(":multidex:2.0").is_err());
        assert!(Coordinate::parse_notation("androidx.multidex::2.0").is_err());
        assert!(Coordinate::parse_notation("androidx.multidex:multidex:").is_err());
        assert!(Coordinate::parse_notation("androidx multidex:multidex").is_err());
    }

    #[test]
    fn test_from_str_rejects_version() {
        assert!("androidx.multidex:multidex".parse::<Coordinate>().is_ok());
        assert!("androidx.multidex:multidex:2.0.1".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_ordering_is_group_then_artifact() {
        let mut coords = vec![
            Coordinate::new("b", "a"),
            Coordinate::new("a", "z"),
            Coordinate::new("a", "b"),
        ];
        coords.sort();
        assert_eq!(
            coords.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["a:b", "a:z", "b:a"]
        );
    }
}
