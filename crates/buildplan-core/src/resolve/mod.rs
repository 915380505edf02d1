//! Descriptor resolution
//!
//! This module turns a merged [`Descriptor`](crate::Descriptor) into a
//! [`ResolvedPlan`](crate::ResolvedPlan):
//!
//! - [`PropertyTable`] - `{{name}}` placeholder expansion
//! - [`PlanResolver`] - validation and substitution
//! - [`lint_plan`] - non-fatal findings attached to the plan

mod lint;
mod placeholder;
mod resolver;

pub use lint::{APPLICATION_PLUGIN, NATIVE_MULTIDEX_MIN_SDK, lint_plan};
pub use placeholder::PropertyTable;
pub use resolver::{DEBUG_SIGNING_CONFIG, MAX_VERSION_CODE, PlanResolver, resolve};
