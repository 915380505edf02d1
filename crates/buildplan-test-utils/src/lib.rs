//! Shared test utilities for the buildplan workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`fixtures`] - descriptor texts shared across test suites
//! - [`project`] - [`TestProject`](project::TestProject) builder for on-disk layouts

pub mod fixtures;
pub mod project;
