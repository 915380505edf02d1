//! Vocabulary types for build descriptors.
//!
//! This crate holds the small, strongly typed building blocks that the
//! resolver in `buildplan-core` turns raw descriptor strings into:
//!
//! - [`DependencyScope`] - the fixed set of dependency scopes
//! - [`JavaVersion`] - supported JVM language levels
//! - [`Coordinate`] - `group:artifact` dependency identifiers
//! - [`VersionConstraint`] - exact, ranged and dynamic version requirements
//! - [`naming`] - identifier rules for namespaces, plugins and config names

pub mod coordinate;
pub mod error;
pub mod jvm;
pub mod naming;
pub mod scope;
pub mod version;

pub use coordinate::Coordinate;
pub use error::{Error, Result};
pub use jvm::JavaVersion;
pub use scope::DependencyScope;
pub use version::VersionConstraint;
