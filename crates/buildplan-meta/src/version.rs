//! Version constraint parsing and checking.
//!
//! Dependency and plugin versions in a descriptor are written in one of
//! three forms:
//!
//! - **Exact** versions: `2.1.5`, `2.0` (patch defaults to 0)
//! - **Ranges**: comma-separated comparisons, all of which must hold
//!   (`>=1.6,<2.0`)
//! - **Dynamic** prefixes: `2.+` means any `2.x.y`, `2.1.+` any `2.1.y`
//!
//! # Examples
//!
//! ```
//! use buildplan_meta::VersionConstraint;
//!
//! let exact = VersionConstraint::parse("2.1.5").unwrap();
//! assert!(exact.satisfies("2.1.5"));
//! assert_eq!(exact.pinned().map(|v| v.to_string()), Some("2.1.5".to_string()));
//!
//! let dynamic = VersionConstraint::parse("2.+").unwrap();
//! assert!(dynamic.is_dynamic());
//! assert!(dynamic.satisfies("2.9.1"));
//! assert!(!dynamic.satisfies("3.0.0"));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single version comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompareOp {
    /// `>=`
    Gte,
    /// `>`
    Gt,
    /// `<=`
    Lte,
    /// `<`
    Lt,
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Specifier {
    op: CompareOp,
    version: semver::Version,
}

impl Specifier {
    fn matches(&self, candidate: &semver::Version) -> bool {
        match self.op {
            CompareOp::Gte => candidate >= &self.version,
            CompareOp::Gt => candidate > &self.version,
            CompareOp::Lte => candidate <= &self.version,
            CompareOp::Lt => candidate < &self.version,
            CompareOp::Eq => candidate == &self.version,
            CompareOp::Ne => candidate != &self.version,
        }
    }
}

/// A parsed version constraint that can be checked against concrete versions.
///
/// Equality and serialization go through the original string, so two
/// constraints compare equal when they were written the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionConstraint {
    specifiers: Vec<Specifier>,
    dynamic: bool,
    raw: String,
}

impl VersionConstraint {
    /// Parse a version constraint string.
    pub fn parse(constraint: &str) -> Result<Self> {
        let raw = constraint.trim().to_string();

        if let Some(prefix) = raw.strip_suffix(".+") {
            let specifiers = parse_dynamic(prefix).map_err(|reason| {
                Error::VersionConstraintParse {
                    constraint: raw.clone(),
                    reason,
                }
            })?;
            return Ok(Self {
                specifiers,
                dynamic: true,
                raw,
            });
        }

        let mut specifiers = Vec::new();
        for part in raw.split(',').map(str::trim) {
            if part.is_empty() {
                continue;
            }
            specifiers.push(parse_specifier(part)?);
        }

        if specifiers.is_empty() {
            return Err(Error::VersionConstraintParse {
                constraint: raw,
                reason: "empty constraint".to_string(),
            });
        }

        Ok(Self {
            specifiers,
            dynamic: false,
            raw,
        })
    }

    /// Check if a version string satisfies this constraint.
    ///
    /// Returns `false` if the version string cannot be parsed.
    pub fn satisfies(&self, version: &str) -> bool {
        match parse_version(version) {
            Ok(parsed) => self.satisfies_version(&parsed),
            Err(_) => false,
        }
    }

    pub fn satisfies_version(&self, version: &semver::Version) -> bool {
        self.specifiers.iter().all(|spec| spec.matches(version))
    }

    /// The exact version, if this constraint admits exactly one.
    pub fn pinned(&self) -> Option<&semver::Version> {
        match self.specifiers.as_slice() {
            [Specifier {
                op: CompareOp::Eq,
                version,
            }] => Some(version),
            _ => None,
        }
    }

    /// Whether this constraint was written with a `+` prefix.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for VersionConstraint {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for VersionConstraint {}

impl std::fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for VersionConstraint {
    type Error = Error;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VersionConstraint> for String {
    fn from(value: VersionConstraint) -> Self {
        value.raw
    }
}

/// Parse a concrete version, padding `major` and `major.minor` with zeros.
///
/// - `"2.1"` -> `2.1.0`
/// - `"8"` -> `8.0.0`
/// - `"1.0.0-alpha01"` -> `1.0.0-alpha01`
pub fn parse_version(s: &str) -> Result<semver::Version> {
    let s = s.trim();

    if let Ok(v) = semver::Version::parse(s) {
        return Ok(v);
    }

    // Pad only the numeric core; keep any pre-release or build suffix intact.
    let split_at = s.find(['-', '+']).unwrap_or(s.len());
    let (core, suffix) = s.split_at(split_at);
    let padded = match core.split('.').count() {
        1 => format!("{core}.0.0{suffix}"),
        2 => format!("{core}.0{suffix}"),
        _ => s.to_string(),
    };

    semver::Version::parse(&padded).map_err(|source| Error::InvalidVersion {
        version: s.to_string(),
        source,
    })
}

/// Parse a single specifier like `>=1.6` or `<2.0.0`.
fn parse_specifier(s: &str) -> Result<Specifier> {
    let (op, version_str) = if let Some(rest) = s.strip_prefix(">=") {
        (CompareOp::Gte, rest)
    } else if let Some(rest) = s.strip_prefix("<=") {
        (CompareOp::Lte, rest)
    } else if let Some(rest) = s.strip_prefix("!=") {
        (CompareOp::Ne, rest)
    } else if let Some(rest) = s.strip_prefix("==") {
        (CompareOp::Eq, rest)
    } else if let Some(rest) = s.strip_prefix('>') {
        (CompareOp::Gt, rest)
    } else if let Some(rest) = s.strip_prefix('<') {
        (CompareOp::Lt, rest)
    } else {
        // Bare version implies ==
        (CompareOp::Eq, s)
    };

    let version_str = version_str.trim();
    let version = parse_version(version_str).map_err(|_| Error::VersionConstraintParse {
        constraint: s.to_string(),
        reason: format!("invalid version: {version_str}"),
    })?;

    Ok(Specifier { op, version })
}

/// Expand `major.+` / `major.minor.+` into a half-open range.
fn parse_dynamic(prefix: &str) -> std::result::Result<Vec<Specifier>, String> {
    let parts = prefix
        .split('.')
        .map(|p| p.parse::<u64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| format!("dynamic prefix '{prefix}' must be numeric"))?;

    let overflow = || format!("dynamic prefix '{prefix}' is out of range");
    let (lower, upper) = match parts.as_slice() {
        [major] => (
            semver::Version::new(*major, 0, 0),
            semver::Version::new(major.checked_add(1).ok_or_else(overflow)?, 0, 0),
        ),
        [major, minor] => (
            semver::Version::new(*major, *minor, 0),
            semver::Version::new(*major, minor.checked_add(1).ok_or_else(overflow)?, 0),
        ),
        _ => return Err("dynamic versions take the form 'major.+' or 'major.minor.+'".to_string()),
    };

    Ok(vec![
        Specifier {
            op: CompareOp::Gte,
            version: lower,
        },
        Specifier {
            op: CompareOp::Lt,
            version: upper,
        },
    ])
}
