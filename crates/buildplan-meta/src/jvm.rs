//! JVM language levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A JVM bytecode / source language level.
///
/// Ordering follows release order, so `source <= target` comparisons work
/// directly on the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum JavaVersion {
    Java8,
    Java11,
    Java17,
    Java21,
}

impl JavaVersion {
    /// The canonical spelling used by `javac --release` and `kotlinc -jvm-target`.
    pub fn as_str(&self) -> &'static str {
        match self {
            JavaVersion::Java8 => "1.8",
            JavaVersion::Java11 => "11",
            JavaVersion::Java17 => "17",
            JavaVersion::Java21 => "21",
        }
    }
}

impl FromStr for JavaVersion {
    type Err = Error;

    /// Accepts `11`, `1.8`, `8`, `VERSION_11`, `VERSION_1_8` and
    /// `JavaVersion.VERSION_11`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix("JavaVersion.").unwrap_or(trimmed);
        let bare = bare.strip_prefix("VERSION_").unwrap_or(bare);

        match bare.replace('_', ".").as_str() {
            "1.8" | "8" => Ok(JavaVersion::Java8),
            "11" => Ok(JavaVersion::Java11),
            "17" => Ok(JavaVersion::Java17),
            "21" => Ok(JavaVersion::Java21),
            _ => Err(Error::UnknownJavaVersion {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for JavaVersion {
    type Error = Error;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<JavaVersion> for String {
    fn from(value: JavaVersion) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.8", JavaVersion::Java8)]
    #[case("8", JavaVersion::Java8)]
    #[case("VERSION_1_8", JavaVersion::Java8)]
    #[case("11", JavaVersion::Java11)]
    #[case("VERSION_11", JavaVersion::Java11)]
    #[case("JavaVersion.VERSION_11", JavaVersion::Java11)]
    #[case(" 17 ", JavaVersion::Java17)]
    #[case("21", JavaVersion::Java21)]
    fn test_parse_accepted_spellings(#[case] input: &str, #[case] expected: JavaVersion) {
        assert_eq!(input.parse::<JavaVersion>().unwrap(), expected);
    }

    #[rstest]
    #[case("9")]
    #[case("1.7")]
    #[case("VERSION_")]
    #[case("")]
    fn test_parse_rejects_unsupported(#[case] input: &str) {
        assert!(input.parse::<JavaVersion>().is_err());
    }

    #[test]
    fn test_ordering_follows_release_order() {
        assert!(JavaVersion::Java8 < JavaVersion::Java11);
        assert!(JavaVersion::Java11 < JavaVersion::Java17);
        assert!(JavaVersion::Java17 < JavaVersion::Java21);
    }

    #[test]
    fn test_serde_uses_canonical_spelling() {
        let json = serde_json::to_string(&JavaVersion::Java8).unwrap();
        assert_eq!(json, "\"1.8\"");

        let parsed: JavaVersion = serde_json::from_str("\"VERSION_17\"").unwrap();
        assert_eq!(parsed, JavaVersion::Java17);
    }
}
