//! Descriptor parsing for build files
//!
//! The descriptor is the raw declarative input for one application module.
//! Every field is optional at parse time so that several layers (global
//! defaults, the project file, local overrides) can be merged before the
//! resolver checks which required fields are still absent.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::format::DescriptorFormat;
use crate::Result;

/// A value that is either written literally or as a string containing
/// `{{property}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Setting<T> {
    Literal(T),
    Template(String),
}

impl<T> From<T> for Setting<T> {
    fn from(value: T) -> Self {
        Setting::Literal(value)
    }
}

/// A scalar entry of the `[properties]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Text(String),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

fn default_apply() -> bool {
    true
}

/// A plugin entry: either a bare version string or a detailed table
///
/// An empty table (`kotlin-android = {}`) applies the plugin with the
/// version supplied by the build environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginDecl {
    Version(String),
    Detailed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<String>,
        #[serde(default = "default_apply")]
        apply: bool,
    },
}

/// SDK API levels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SdkSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Setting<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Setting<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile: Option<Setting<u32>>,
}

/// Java compiler options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompileOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_compatibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_compatibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_library_desugaring: Option<bool>,
    /// Full `group:artifact:version` notation of the desugaring library
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desugaring_library: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compiler_args: Vec<String>,
}

/// Kotlin compiler options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KotlinOptions {
    /// Defaults to the Java target compatibility when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvm_target: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub free_compiler_args: Vec<String>,
}

/// Application version shared by every build type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_code: Option<Setting<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,
}

/// A named code-signing bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SigningConfigDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_password: Option<String>,
}

/// Per-variant build flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildTypeDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shrink_resources: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debuggable: Option<bool>,
    /// Name of an entry in `signing_configs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_config: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub proguard_files: Vec<String>,
}

/// Location of the wrapped UI toolkit project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolkitSection {
    pub source: String,
}

/// A dependency entry: `group:artifact:version` shorthand or a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyDecl {
    Notation(String),
    Detailed {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scope: Option<String>,
    },
}

/// Build descriptor parsed from a single file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Descriptor {
    /// Package namespace for generated code (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Installed package name; defaults to `namespace`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ndk_version: Option<String>,

    /// Values available to `{{name}}` placeholders
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertyValue>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plugins: BTreeMap<String, PluginDecl>,

    #[serde(default)]
    pub sdk: SdkSection,

    #[serde(default)]
    pub compile_options: CompileOptions,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kotlin_options: Option<KotlinOptions>,

    #[serde(default)]
    pub default_config: DefaultConfig,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub signing_configs: BTreeMap<String, SigningConfigDecl>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub build_types: BTreeMap<String, BuildTypeDecl>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolkit: Option<ToolkitSection>,

    /// Dependencies in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyDecl>,
}

impl Descriptor {
    /// Parse a descriptor from text in the given format
    ///
    /// # Example
    ///
    /// ```
    /// use buildplan_core::{Descriptor, DescriptorFormat};
    ///
    /// let descriptor = Descriptor::parse(r#"
    /// namespace = "com.example.app"
    ///
    /// [sdk]
    /// min = 21
    /// target = 34
    /// compile = 34
    /// "#, DescriptorFormat::Toml).unwrap();
    ///
    /// assert_eq!(descriptor.namespace.as_deref(), Some("com.example.app"));
    /// ```
    pub fn parse(content: &str, format: DescriptorFormat) -> Result<Self> {
        let descriptor = match format {
            DescriptorFormat::Toml => toml::from_str(content)?,
            DescriptorFormat::Json => serde_json::from_str(content)?,
            DescriptorFormat::Yaml => {
                // An empty YAML document deserializes as null, not as an empty map.
                if content.trim().is_empty() {
                    Self::default()
                } else {
                    serde_yaml::from_str(content)?
                }
            }
        };
        Ok(descriptor)
    }

    /// Parse a TOML descriptor
    pub fn from_toml(content: &str) -> Result<Self> {
        Self::parse(content, DescriptorFormat::Toml)
    }

    /// Serialize the descriptor back to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another descriptor into this one
    ///
    /// The `other` descriptor takes precedence for scalar values.
    /// For collections:
    /// - `properties`, `plugins`: overlay entries replace base entries by key
    /// - `signing_configs`, `build_types`: merged field by field per entry
    /// - `compiler_args`, `free_compiler_args`, `proguard_files`, `dependencies`:
    ///   extended with entries not already present
    pub fn merge(&mut self, other: &Descriptor) {
        overlay(&mut self.namespace, &other.namespace);
        overlay(&mut self.application_id, &other.application_id);
        overlay(&mut self.ndk_version, &other.ndk_version);

        for (key, value) in &other.properties {
            self.properties.insert(key.clone(), value.clone());
        }
        for (id, plugin) in &other.plugins {
            self.plugins.insert(id.clone(), plugin.clone());
        }

        overlay(&mut self.sdk.min, &other.sdk.min);
        overlay(&mut self.sdk.target, &other.sdk.target);
        overlay(&mut self.sdk.compile, &other.sdk.compile);

        self.compile_options.merge(&other.compile_options);

        if let Some(kotlin) = &other.kotlin_options {
            match &mut self.kotlin_options {
                Some(base) => base.merge(kotlin),
                None => self.kotlin_options = Some(kotlin.clone()),
            }
        }

        overlay(
            &mut self.default_config.version_code,
            &other.default_config.version_code,
        );
        overlay(
            &mut self.default_config.version_name,
            &other.default_config.version_name,
        );

        for (name, config) in &other.signing_configs {
            self.signing_configs
                .entry(name.clone())
                .or_default()
                .merge(config);
        }
        for (name, build_type) in &other.build_types {
            self.build_types
                .entry(name.clone())
                .or_default()
                .merge(build_type);
        }

        overlay(&mut self.toolkit, &other.toolkit);
        extend_unique(&mut self.dependencies, &other.dependencies);
    }
}

impl CompileOptions {
    fn merge(&mut self, other: &CompileOptions) {
        overlay(&mut self.source_compatibility, &other.source_compatibility);
        overlay(&mut self.target_compatibility, &other.target_compatibility);
        overlay(
            &mut self.core_library_desugaring,
            &other.core_library_desugaring,
        );
        overlay(&mut self.desugaring_library, &other.desugaring_library);
        extend_unique(&mut self.compiler_args, &other.compiler_args);
    }
}

impl KotlinOptions {
    fn merge(&mut self, other: &KotlinOptions) {
        overlay(&mut self.jvm_target, &other.jvm_target);
        extend_unique(&mut self.free_compiler_args, &other.free_compiler_args);
    }
}

impl SigningConfigDecl {
    fn merge(&mut self, other: &SigningConfigDecl) {
        overlay(&mut self.store_file, &other.store_file);
        overlay(&mut self.store_password, &other.store_password);
        overlay(&mut self.key_alias, &other.key_alias);
        overlay(&mut self.key_password, &other.key_password);
    }
}

impl BuildTypeDecl {
    fn merge(&mut self, other: &BuildTypeDecl) {
        overlay(&mut self.minify, &other.minify);
        overlay(&mut self.shrink_resources, &other.shrink_resources);
        overlay(&mut self.debuggable, &other.debuggable);
        overlay(&mut self.signing_config, &other.signing_config);
        extend_unique(&mut self.proguard_files, &other.proguard_files);
    }
}

fn overlay<T: Clone>(base: &mut Option<T>, other: &Option<T>) {
    if let Some(value) = other {
        *base = Some(value.clone());
    }
}

fn extend_unique<T: Clone + PartialEq>(base: &mut Vec<T>, other: &[T]) {
    for item in other {
        if !base.contains(item) {
            base.push(item.clone());
        }
    }
}
