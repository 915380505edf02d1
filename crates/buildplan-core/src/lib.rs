//! Build plan resolution for application modules
//!
//! This crate turns a declarative build [`Descriptor`] into a validated,
//! fully substituted [`ResolvedPlan`] that a packaging toolchain consumes:
//!
//! - **Descriptors**: TOML, JSON or YAML input with `{{property}}` placeholders
//! - **Resolution**: [`resolve`] checks every invariant and fails with a
//!   [`ValidationError`] naming the offending field
//! - **Layered loading**: [`DescriptorLoader`] merges global defaults, the
//!   project descriptor and local overrides
//! - **Lints**: non-fatal findings attached to the plan as [`PlanWarning`]s
//!
//! # Example
//!
//! ```
//! use buildplan_core::{Descriptor, DescriptorFormat, SigningStrategy, resolve};
//!
//! let descriptor = Descriptor::parse(r#"
//! namespace = "com.example.app"
//!
//! [properties]
//! "flutter.minSdkVersion" = 21
//!
//! [sdk]
//! min = "{{flutter.minSdkVersion}}"
//! target = 34
//! compile = 34
//!
//! [build_types.release]
//! signing_config = "debug"
//! "#, DescriptorFormat::Toml).unwrap();
//!
//! let plan = resolve(&descriptor).unwrap();
//! assert_eq!(plan.sdk.min, 21);
//! assert_eq!(
//!     plan.build_type("release").unwrap().signing,
//!     SigningStrategy::DebugKeystore
//! );
//! ```

pub mod descriptor;
pub mod error;
pub mod loader;
pub mod logging;
pub mod plan;
pub mod resolve;

pub use descriptor::{Descriptor, DescriptorFormat};
pub use error::{Error, Result, ValidationError};
pub use loader::DescriptorLoader;
pub use plan::{
    AppVersion, JvmSettings, KotlinSettings, LibraryRef, PlanWarning, ResolvedBuildType,
    ResolvedDependency, ResolvedPlan, ResolvedPlugin, SdkLevels, SigningConfig, SigningStrategy,
    WarnLevel,
};
pub use resolve::{PlanResolver, resolve};
