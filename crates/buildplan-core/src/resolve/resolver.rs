//! Descriptor validation and substitution
//!
//! [`PlanResolver::resolve`] is a single pass over the descriptor that
//! substitutes placeholders, checks every invariant and builds the
//! [`ResolvedPlan`]. Sections are checked in a fixed order and the first
//! violation is returned; no partial plan is ever produced.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use buildplan_meta::naming::{validate_application_id, validate_config_name, validate_plugin_id};
use buildplan_meta::version::parse_version;
use buildplan_meta::{Coordinate, DependencyScope, JavaVersion, VersionConstraint};

use super::lint::lint_plan;
use super::placeholder::PropertyTable;
use crate::descriptor::{
    BuildTypeDecl, CompileOptions, DefaultConfig, DependencyDecl, Descriptor, KotlinOptions,
    PluginDecl, SdkSection, Setting, SigningConfigDecl,
};
use crate::error::ValidationError;
use crate::plan::{
    AppVersion, JvmSettings, KotlinSettings, LibraryRef, ResolvedBuildType, ResolvedDependency,
    ResolvedPlan, ResolvedPlugin, SdkLevels, SigningConfig, SigningStrategy,
};

type Validated<T> = std::result::Result<T, ValidationError>;

/// Name of the signing configuration the toolchain always provides
pub const DEBUG_SIGNING_CONFIG: &str = "debug";

/// Highest version code accepted by application stores
pub const MAX_VERSION_CODE: u32 = 2_100_000_000;

/// Resolve a descriptor using only its own `[properties]` table
///
/// # Example
///
/// ```
/// use buildplan_core::{Descriptor, resolve};
///
/// let descriptor = Descriptor::from_toml(r#"
/// namespace = "com.example.app"
///
/// [sdk]
/// min = 21
/// target = 34
/// compile = 34
/// "#).unwrap();
///
/// let plan = resolve(&descriptor).unwrap();
/// assert_eq!(plan.sdk.min, 21);
/// assert_eq!(plan.application_id, "com.example.app");
/// ```
pub fn resolve(descriptor: &Descriptor) -> Validated<ResolvedPlan> {
    PlanResolver::new().resolve(descriptor)
}

/// Resolves descriptors into plans
///
/// Extra properties given to the resolver override the descriptor's own
/// `[properties]` entries with the same name.
#[derive(Debug, Clone, Default)]
pub struct PlanResolver {
    properties: BTreeMap<String, String>,
}

impl PlanResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with externally supplied properties, for example
    /// the toolkit's `flutter.minSdkVersion`.
    pub fn with_properties<I, K, V>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Validate `descriptor` and produce its plan
    ///
    /// The check order is: properties, identity, plugins, SDK levels,
    /// compiler options, default config, signing configurations, build
    /// types, toolkit, dependencies.
    pub fn resolve(&self, descriptor: &Descriptor) -> Validated<ResolvedPlan> {
        let mut raw: BTreeMap<String, String> = descriptor
            .properties
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect();
        raw.extend(self.properties.iter().map(|(k, v)| (k.clone(), v.clone())));

        let props = PropertyTable::new(&raw)?;
        let ctx = Context { props: &props };

        let (namespace, application_id, ndk_version) = resolve_identity(&ctx, descriptor)?;
        let plugins = resolve_plugins(&ctx, &descriptor.plugins)?;
        let sdk = resolve_sdk(&ctx, &descriptor.sdk)?;
        let jvm = resolve_jvm(
            &ctx,
            &descriptor.compile_options,
            descriptor.kotlin_options.as_ref(),
        )?;
        let version = resolve_app_version(&ctx, &descriptor.default_config)?;
        let signing_configs = resolve_signing_configs(&ctx, &descriptor.signing_configs)?;
        let build_types = resolve_build_types(&ctx, &descriptor.build_types, &signing_configs)?;
        let toolkit_source = descriptor
            .toolkit
            .as_ref()
            .map(|toolkit| resolve_toolkit_source(&ctx, &toolkit.source))
            .transpose()?;
        let dependencies = resolve_dependencies(&ctx, &descriptor.dependencies)?;

        let mut plan = ResolvedPlan {
            namespace,
            application_id,
            ndk_version,
            sdk,
            jvm,
            version,
            plugins,
            signing_configs,
            build_types,
            toolkit_source,
            dependencies,
            warnings: Vec::new(),
        };

        plan.warnings = lint_plan(&plan);
        for warning in &plan.warnings {
            tracing::warn!(field = %warning.field, level = %warning.level, "{}", warning.message);
        }

        tracing::debug!(
            namespace = %plan.namespace,
            min_sdk = plan.sdk.min,
            target_sdk = plan.sdk.target,
            compile_sdk = plan.sdk.compile,
            dependencies = plan.dependencies.len(),
            "Resolved build plan"
        );

        Ok(plan)
    }
}

/// Placeholder expansion plus typed conversions, all keyed by field path
struct Context<'a> {
    props: &'a PropertyTable,
}

impl Context<'_> {
    /// Expand placeholders and reject blank results
    fn text(&self, field: &str, value: &str) -> Validated<String> {
        let expanded = self.props.expand(field, value)?;
        let trimmed = expanded.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(field, "must not be empty"));
        }
        Ok(trimmed.to_string())
    }

    fn number(&self, field: &str, setting: &Setting<u32>) -> Validated<u32> {
        match setting {
            Setting::Literal(n) => Ok(*n),
            Setting::Template(template) => {
                let text = self.text(field, template)?;
                text.parse::<u32>().map_err(|_| {
                    ValidationError::new(
                        field,
                        format!("expected a non-negative integer, got '{text}'"),
                    )
                })
            }
        }
    }

    fn java_version(&self, field: &str, value: &str) -> Validated<JavaVersion> {
        self.text(field, value)?
            .parse()
            .map_err(|e| ValidationError::from_meta(field, e))
    }

    fn version_constraint(&self, field: &str, value: &str) -> Validated<VersionConstraint> {
        VersionConstraint::parse(&self.text(field, value)?)
            .map_err(|e| ValidationError::from_meta(field, e))
    }
}

fn resolve_identity(
    ctx: &Context<'_>,
    descriptor: &Descriptor,
) -> Validated<(String, String, Option<String>)> {
    let namespace = descriptor
        .namespace
        .as_deref()
        .ok_or_else(|| ValidationError::missing("namespace"))?;
    let namespace = ctx.text("namespace", namespace)?;
    validate_application_id(&namespace).map_err(|e| ValidationError::from_meta("namespace", e))?;

    let application_id = match descriptor.application_id.as_deref() {
        Some(id) => {
            let id = ctx.text("application_id", id)?;
            validate_application_id(&id)
                .map_err(|e| ValidationError::from_meta("application_id", e))?;
            id
        }
        None => namespace.clone(),
    };

    let ndk_version = descriptor
        .ndk_version
        .as_deref()
        .map(|v| -> Validated<String> {
            let v = ctx.text("ndk_version", v)?;
            parse_version(&v).map_err(|e| ValidationError::from_meta("ndk_version", e))?;
            Ok(v)
        })
        .transpose()?;

    Ok((namespace, application_id, ndk_version))
}

fn resolve_plugins(
    ctx: &Context<'_>,
    plugins: &BTreeMap<String, PluginDecl>,
) -> Validated<Vec<ResolvedPlugin>> {
    let mut resolved = Vec::with_capacity(plugins.len());

    for (id, decl) in plugins {
        let field = format!("plugins.{id}");
        validate_plugin_id(id).map_err(|e| ValidationError::from_meta(&field, e))?;

        let (version, apply) = match decl {
            PluginDecl::Version(v) => (Some(v.as_str()), true),
            PluginDecl::Detailed { version, apply } => (version.as_deref(), *apply),
        };

        let version = version
            .map(|v| {
                let v = ctx.text(&field, v)?;
                parse_version(&v).map_err(|e| ValidationError::from_meta(&field, e))
            })
            .transpose()?;

        resolved.push(ResolvedPlugin {
            id: id.clone(),
            version,
            apply,
        });
    }

    Ok(resolved)
}

fn resolve_sdk(ctx: &Context<'_>, sdk: &SdkSection) -> Validated<SdkLevels> {
    let level = |name: &str, setting: &Option<Setting<u32>>| -> Validated<u32> {
        let field = format!("sdk.{name}");
        let setting = setting
            .as_ref()
            .ok_or_else(|| ValidationError::missing(&field))?;
        let value = ctx.number(&field, setting)?;
        if value == 0 {
            return Err(ValidationError::new(field, "API levels start at 1"));
        }
        Ok(value)
    };

    let min = level("min", &sdk.min)?;
    let target = level("target", &sdk.target)?;
    let compile = level("compile", &sdk.compile)?;

    if min > target {
        return Err(ValidationError::new(
            "sdk.min",
            format!("minimum SDK {min} is greater than target SDK {target}"),
        ));
    }
    if target > compile {
        return Err(ValidationError::new(
            "sdk.target",
            format!("target SDK {target} is greater than compile SDK {compile}"),
        ));
    }

    Ok(SdkLevels {
        min,
        target,
        compile,
    })
}

fn resolve_jvm(
    ctx: &Context<'_>,
    options: &CompileOptions,
    kotlin: Option<&KotlinOptions>,
) -> Validated<JvmSettings> {
    let source = match options.source_compatibility.as_deref() {
        Some(v) => ctx.java_version("compile_options.source_compatibility", v)?,
        None => JavaVersion::Java8,
    };
    let target = match options.target_compatibility.as_deref() {
        Some(v) => ctx.java_version("compile_options.target_compatibility", v)?,
        None => JavaVersion::Java8,
    };
    if source > target {
        return Err(ValidationError::new(
            "compile_options.source_compatibility",
            format!("source compatibility {source} is newer than target compatibility {target}"),
        ));
    }

    let core_library_desugaring = options.core_library_desugaring.unwrap_or(false);
    let desugaring_library = options
        .desugaring_library
        .as_deref()
        .map(|notation| resolve_library(ctx, "compile_options.desugaring_library", notation))
        .transpose()?;
    if core_library_desugaring && desugaring_library.is_none() {
        return Err(ValidationError::new(
            "compile_options.desugaring_library",
            "required when core_library_desugaring is enabled",
        ));
    }

    let compiler_args = expand_all(ctx, "compile_options.compiler_args", &options.compiler_args)?;

    let kotlin = kotlin
        .map(|opts| {
            let jvm_target = match opts.jvm_target.as_deref() {
                Some(v) => ctx.java_version("kotlin_options.jvm_target", v)?,
                None => target,
            };
            if jvm_target != target {
                return Err(ValidationError::new(
                    "kotlin_options.jvm_target",
                    format!(
                        "Kotlin JVM target {jvm_target} does not match Java target compatibility {target}"
                    ),
                ));
            }
            Ok(KotlinSettings {
                jvm_target,
                free_compiler_args: expand_all(
                    ctx,
                    "kotlin_options.free_compiler_args",
                    &opts.free_compiler_args,
                )?,
            })
        })
        .transpose()?;

    Ok(JvmSettings {
        source_compatibility: source,
        target_compatibility: target,
        core_library_desugaring,
        desugaring_library,
        compiler_args,
        kotlin,
    })
}

fn resolve_library(ctx: &Context<'_>, field: &str, notation: &str) -> Validated<LibraryRef> {
    let notation = ctx.text(field, notation)?;
    let (coordinate, version) =
        Coordinate::parse_notation(&notation).map_err(|e| ValidationError::from_meta(field, e))?;
    let version = version.ok_or_else(|| {
        ValidationError::new(field, "expected 'group:artifact:version' notation")
    })?;
    Ok(LibraryRef {
        coordinate,
        version: ctx.version_constraint(field, &version)?,
    })
}

fn resolve_app_version(ctx: &Context<'_>, config: &DefaultConfig) -> Validated<AppVersion> {
    let code = config
        .version_code
        .as_ref()
        .map(|setting| {
            let field = "default_config.version_code";
            let code = ctx.number(field, setting)?;
            if !(1..=MAX_VERSION_CODE).contains(&code) {
                return Err(ValidationError::new(
                    field,
                    format!("version code {code} is outside 1..={MAX_VERSION_CODE}"),
                ));
            }
            Ok(code)
        })
        .transpose()?;

    let name = config
        .version_name
        .as_deref()
        .map(|name| ctx.text("default_config.version_name", name))
        .transpose()?;

    Ok(AppVersion { code, name })
}

fn resolve_signing_configs(
    ctx: &Context<'_>,
    configs: &BTreeMap<String, SigningConfigDecl>,
) -> Validated<BTreeMap<String, SigningConfig>> {
    let mut resolved = BTreeMap::new();

    for (name, decl) in configs {
        let prefix = format!("signing_configs.{name}");
        validate_config_name(name).map_err(|e| ValidationError::from_meta(&prefix, e))?;

        let required = |key: &str, value: &Option<String>| -> Validated<String> {
            let field = format!("{prefix}.{key}");
            let value = value
                .as_deref()
                .ok_or_else(|| ValidationError::missing(&field))?;
            ctx.text(&field, value)
        };
        let optional = |key: &str, value: &Option<String>| -> Validated<Option<String>> {
            let field = format!("{prefix}.{key}");
            value.as_deref().map(|v| ctx.text(&field, v)).transpose()
        };

        let config = SigningConfig {
            store_file: required("store_file", &decl.store_file)?,
            store_password: optional("store_password", &decl.store_password)?,
            key_alias: required("key_alias", &decl.key_alias)?,
            key_password: optional("key_password", &decl.key_password)?,
        };
        resolved.insert(name.clone(), config);
    }

    Ok(resolved)
}

/// Build types every module has, even when the descriptor omits them
fn default_build_types() -> BTreeMap<String, BuildTypeDecl> {
    let mut defaults = BTreeMap::new();
    defaults.insert(
        "debug".to_string(),
        BuildTypeDecl {
            debuggable: Some(true),
            ..BuildTypeDecl::default()
        },
    );
    defaults.insert("release".to_string(), BuildTypeDecl::default());
    defaults
}

fn resolve_build_types(
    ctx: &Context<'_>,
    declared: &BTreeMap<String, BuildTypeDecl>,
    signing_configs: &BTreeMap<String, SigningConfig>,
) -> Validated<BTreeMap<String, ResolvedBuildType>> {
    let mut build_types = default_build_types();
    for (name, decl) in declared {
        build_types.insert(name.clone(), decl.clone());
    }

    let mut resolved = BTreeMap::new();
    for (name, decl) in &build_types {
        let prefix = format!("build_types.{name}");
        validate_config_name(name).map_err(|e| ValidationError::from_meta(&prefix, e))?;

        let is_debug = name == "debug";
        let minify = decl.minify.unwrap_or(false);
        let shrink_resources = decl.shrink_resources.unwrap_or(false);
        if shrink_resources && !minify {
            return Err(ValidationError::new(
                format!("{prefix}.shrink_resources"),
                "resource shrinking requires minify to be enabled",
            ));
        }

        let signing = match decl.signing_config.as_deref() {
            Some(reference) => {
                let field = format!("{prefix}.signing_config");
                let reference = ctx.text(&field, reference)?;
                if signing_configs.contains_key(&reference) {
                    SigningStrategy::Keystore { config: reference }
                } else if reference == DEBUG_SIGNING_CONFIG {
                    SigningStrategy::DebugKeystore
                } else {
                    return Err(ValidationError::new(
                        field,
                        format!("references undeclared signing configuration '{reference}'"),
                    ));
                }
            }
            None if is_debug => SigningStrategy::DebugKeystore,
            None => SigningStrategy::Unsigned,
        };

        resolved.insert(
            name.clone(),
            ResolvedBuildType {
                minify,
                shrink_resources,
                debuggable: decl.debuggable.unwrap_or(is_debug),
                signing,
                proguard_files: expand_all(
                    ctx,
                    &format!("{prefix}.proguard_files"),
                    &decl.proguard_files,
                )?,
            },
        );
    }

    Ok(resolved)
}

fn resolve_toolkit_source(ctx: &Context<'_>, source: &str) -> Validated<String> {
    let source = ctx.text("toolkit.source", source)?;
    let path = Path::new(&source);
    if path.is_absolute() || path.has_root() {
        return Err(ValidationError::new(
            "toolkit.source",
            format!("'{source}' must be a relative path"),
        ));
    }
    Ok(source)
}

fn resolve_dependencies(
    ctx: &Context<'_>,
    declared: &[DependencyDecl],
) -> Validated<Vec<ResolvedDependency>> {
    let mut resolved = Vec::with_capacity(declared.len());
    let mut seen: HashSet<(Coordinate, DependencyScope)> = HashSet::new();

    for (index, decl) in declared.iter().enumerate() {
        let prefix = format!("dependencies[{index}]");
        let dependency = resolve_dependency(ctx, &prefix, decl)?;

        if !seen.insert((dependency.coordinate.clone(), dependency.scope)) {
            return Err(ValidationError::new(
                prefix,
                format!(
                    "duplicate dependency {} in scope {}",
                    dependency.coordinate, dependency.scope
                ),
            ));
        }
        resolved.push(dependency);
    }

    Ok(resolved)
}

fn resolve_dependency(
    ctx: &Context<'_>,
    prefix: &str,
    decl: &DependencyDecl,
) -> Validated<ResolvedDependency> {
    let version_field = format!("{prefix}.version");

    let (notation_field, notation, explicit_version, scope) = match decl {
        DependencyDecl::Notation(notation) => (prefix.to_string(), notation, None, None),
        DependencyDecl::Detailed { id, version, scope } => (
            format!("{prefix}.id"),
            id,
            version.as_deref(),
            scope.as_deref(),
        ),
    };

    let notation = ctx.text(&notation_field, notation)?;
    let (coordinate, inline_version) = Coordinate::parse_notation(&notation)
        .map_err(|e| ValidationError::from_meta(&notation_field, e))?;

    let version = match (inline_version, explicit_version) {
        (Some(_), Some(_)) => {
            return Err(ValidationError::new(
                version_field,
                "version is given both in the id and in the version field",
            ));
        }
        (Some(inline), None) => inline,
        (None, Some(explicit)) => explicit.to_string(),
        (None, None) => return Err(ValidationError::missing(version_field)),
    };
    let version = ctx.version_constraint(&version_field, &version)?;

    let scope = match scope {
        Some(scope) => {
            let field = format!("{prefix}.scope");
            ctx.text(&field, scope)?
                .parse::<DependencyScope>()
                .map_err(|e| ValidationError::from_meta(&field, e))?
        }
        None => DependencyScope::default(),
    };

    Ok(ResolvedDependency {
        coordinate,
        version,
        scope,
    })
}

fn expand_all(ctx: &Context<'_>, field: &str, values: &[String]) -> Validated<Vec<String>> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| ctx.text(&format!("{field}[{i}]"), value))
        .collect()
}
