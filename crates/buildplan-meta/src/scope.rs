//! Dependency scopes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Where a dependency is visible during the build.
///
/// The set is closed: descriptors naming any other scope are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyScope {
    /// Needed to compile and packaged into the application.
    #[default]
    CompileTime,
    /// Packaged into the application but not visible to the compiler.
    Runtime,
    /// Visible to the compiler only; the platform supplies it at runtime.
    Provided,
}

impl DependencyScope {
    /// All scopes, in declaration order.
    pub const ALL: [DependencyScope; 3] = [
        DependencyScope::CompileTime,
        DependencyScope::Runtime,
        DependencyScope::Provided,
    ];

    /// Whether dependencies in this scope are on the compile classpath.
    pub fn on_compile_classpath(&self) -> bool {
        matches!(self, DependencyScope::CompileTime | DependencyScope::Provided)
    }

    /// Whether dependencies in this scope are packaged for runtime.
    pub fn on_runtime_classpath(&self) -> bool {
        matches!(self, DependencyScope::CompileTime | DependencyScope::Runtime)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyScope::CompileTime => "compile-time",
            DependencyScope::Runtime => "runtime",
            DependencyScope::Provided => "provided",
        }
    }
}

impl FromStr for DependencyScope {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s.trim())
            .ok_or_else(|| Error::UnknownScope {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
