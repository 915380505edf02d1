//! The resolved, validated build plan
//!
//! A [`ResolvedPlan`] is what the external toolchain consumes. Every
//! placeholder has been substituted, every reference checked, and every
//! stringly-typed descriptor value replaced with its strong type.

use std::collections::BTreeMap;

use buildplan_meta::{Coordinate, DependencyScope, JavaVersion, VersionConstraint};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::Result;

/// Minimum, target and compile API levels; `min <= target <= compile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkLevels {
    pub min: u32,
    pub target: u32,
    pub compile: u32,
}

/// A plugin with its id validated and version parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlugin {
    pub id: String,
    /// `None` when the build environment supplies the version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<semver::Version>,
    pub apply: bool,
}

/// Kotlin compiler settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KotlinSettings {
    pub jvm_target: JavaVersion,
    #[serde(default)]
    pub free_compiler_args: Vec<String>,
}

/// A library outside the dependency list, such as the desugaring runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRef {
    pub coordinate: Coordinate,
    pub version: VersionConstraint,
}

/// JVM language levels and compiler flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JvmSettings {
    pub source_compatibility: JavaVersion,
    pub target_compatibility: JavaVersion,
    pub core_library_desugaring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desugaring_library: Option<LibraryRef>,
    #[serde(default)]
    pub compiler_args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kotlin: Option<KotlinSettings>,
}

impl JvmSettings {
    /// Arguments for `javac`
    pub fn javac_args(&self) -> Vec<String> {
        let mut args = vec![
            "-source".to_string(),
            self.source_compatibility.to_string(),
            "-target".to_string(),
            self.target_compatibility.to_string(),
        ];
        args.extend(self.compiler_args.iter().cloned());
        args
    }

    /// Arguments for `kotlinc`, or `None` when Kotlin is not configured
    pub fn kotlinc_args(&self) -> Option<Vec<String>> {
        self.kotlin.as_ref().map(|kotlin| {
            let mut args = vec!["-jvm-target".to_string(), kotlin.jvm_target.to_string()];
            args.extend(kotlin.free_compiler_args.iter().cloned());
            args
        })
    }
}

/// Application version shared by all build types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppVersion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A declared signing configuration with placeholders substituted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningConfig {
    pub store_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_password: Option<String>,
    pub key_alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_password: Option<String>,
}

/// How the packaging step signs a build type's output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SigningStrategy {
    /// No signing configuration; output must be signed externally
    Unsigned,
    /// The toolchain's built-in debug keystore
    DebugKeystore,
    /// A signing configuration declared in the descriptor
    Keystore { config: String },
}

/// A build type with defaults applied and its signing reference resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBuildType {
    pub minify: bool,
    pub shrink_resources: bool,
    pub debuggable: bool,
    pub signing: SigningStrategy,
    #[serde(default)]
    pub proguard_files: Vec<String>,
}

/// A dependency with its coordinate, constraint and scope validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependency {
    pub coordinate: Coordinate,
    pub version: VersionConstraint,
    pub scope: DependencyScope,
}

impl ResolvedDependency {
    /// `group:artifact:version` notation
    pub fn notation(&self) -> String {
        format!("{}:{}", self.coordinate, self.version)
    }
}

/// Severity level for plan warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarnLevel {
    /// Informational notice
    Info,
    /// Potential problem
    Warning,
}

impl std::fmt::Display for WarnLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A non-fatal finding about a valid plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanWarning {
    pub level: WarnLevel,
    /// Dotted path of the value the warning is about
    pub field: String,
    pub message: String,
}

/// The final validated build plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlan {
    pub namespace: String,
    pub application_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ndk_version: Option<String>,
    pub sdk: SdkLevels,
    pub jvm: JvmSettings,
    pub version: AppVersion,
    /// Plugins sorted by id
    pub plugins: Vec<ResolvedPlugin>,
    pub signing_configs: BTreeMap<String, SigningConfig>,
    pub build_types: BTreeMap<String, ResolvedBuildType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolkit_source: Option<String>,
    /// Dependencies in declaration order
    pub dependencies: Vec<ResolvedDependency>,
    #[serde(default)]
    pub warnings: Vec<PlanWarning>,
}

impl ResolvedPlan {
    pub fn build_type(&self, name: &str) -> Option<&ResolvedBuildType> {
        self.build_types.get(name)
    }

    /// The signing configuration a build type uses, if it names one
    pub fn signing_config_for(&self, build_type: &str) -> Option<&SigningConfig> {
        match &self.build_types.get(build_type)?.signing {
            SigningStrategy::Keystore { config } => self.signing_configs.get(config),
            SigningStrategy::Unsigned | SigningStrategy::DebugKeystore => None,
        }
    }

    /// Whether a plugin with this id is applied
    pub fn applies_plugin(&self, id: &str) -> bool {
        self.plugins.iter().any(|p| p.id == id && p.apply)
    }

    /// Dependencies visible to the compiler, in declaration order
    pub fn compile_classpath(&self) -> Vec<&ResolvedDependency> {
        self.dependencies
            .iter()
            .filter(|d| d.scope.on_compile_classpath())
            .collect()
    }

    /// Dependencies packaged into the application, in declaration order
    pub fn runtime_classpath(&self) -> Vec<&ResolvedDependency> {
        self.dependencies
            .iter()
            .filter(|d| d.scope.on_runtime_classpath())
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// SHA-256 of the plan's canonical JSON form, as lowercase hex
    ///
    /// Two plans with the same fingerprint describe the same build.
    pub fn fingerprint(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }
}
