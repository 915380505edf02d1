//! Build descriptors and their on-disk formats
//!
//! A [`Descriptor`] is the raw, unvalidated input. It may come from TOML
//! (the default), JSON or YAML; see [`DescriptorFormat`]. Descriptors from
//! several layers are combined with [`Descriptor::merge`] before
//! resolution.

mod format;
mod model;

pub use format::DescriptorFormat;
pub use model::{
    BuildTypeDecl, CompileOptions, DefaultConfig, DependencyDecl, Descriptor, KotlinOptions,
    PluginDecl, PropertyValue, SdkSection, Setting, SigningConfigDecl, ToolkitSection,
};
