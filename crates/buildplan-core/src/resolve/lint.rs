//! Non-fatal checks over an otherwise valid plan
//!
//! Checks for:
//! - Non-debuggable build types signed with the debug keystore
//! - Non-debuggable build types without code shrinking
//! - Missing application plugin
//! - Low minimum SDK without multidex
//! - A desugaring library while desugaring is disabled
//! - Dynamic (`+`) dependency versions

use crate::plan::{PlanWarning, ResolvedPlan, SigningStrategy, WarnLevel};

pub const APPLICATION_PLUGIN: &str = "com.android.application";

/// Below this API level the platform has no native multidex support.
pub const NATIVE_MULTIDEX_MIN_SDK: u32 = 21;

const MULTIDEX_ARTIFACTS: &[&str] = &["androidx.multidex:multidex", "com.android.support:multidex"];

/// Lint a resolved plan
pub fn lint_plan(plan: &ResolvedPlan) -> Vec<PlanWarning> {
    let mut warnings = Vec::new();

    for (name, build_type) in &plan.build_types {
        if build_type.debuggable {
            continue;
        }
        if build_type.signing == SigningStrategy::DebugKeystore {
            warnings.push(PlanWarning {
                level: WarnLevel::Warning,
                field: format!("build_types.{name}.signing_config"),
                message: format!(
                    "Build type '{name}' is signed with the debug keystore; its output cannot be published."
                ),
            });
        }
        if !build_type.minify {
            warnings.push(PlanWarning {
                level: WarnLevel::Info,
                field: format!("build_types.{name}.minify"),
                message: format!("Build type '{name}' ships without code shrinking."),
            });
        }
    }

    if !plan.applies_plugin(APPLICATION_PLUGIN) {
        warnings.push(PlanWarning {
            level: WarnLevel::Warning,
            field: "plugins".to_string(),
            message: format!("No '{APPLICATION_PLUGIN}' plugin is applied."),
        });
    }

    if plan.sdk.min < NATIVE_MULTIDEX_MIN_SDK {
        let has_multidex = plan.dependencies.iter().any(|d| {
            MULTIDEX_ARTIFACTS.contains(&d.coordinate.to_string().as_str())
                && d.scope.on_runtime_classpath()
        });
        if !has_multidex {
            warnings.push(PlanWarning {
                level: WarnLevel::Warning,
                field: "sdk.min".to_string(),
                message: format!(
                    "Minimum SDK {} is below {NATIVE_MULTIDEX_MIN_SDK} and no multidex library is packaged.",
                    plan.sdk.min
                ),
            });
        }
    }

    if !plan.jvm.core_library_desugaring && plan.jvm.desugaring_library.is_some() {
        warnings.push(PlanWarning {
            level: WarnLevel::Warning,
            field: "compile_options.desugaring_library".to_string(),
            message: "A desugaring library is set but core library desugaring is disabled."
                .to_string(),
        });
    }

    for (index, dependency) in plan.dependencies.iter().enumerate() {
        if dependency.version.is_dynamic() {
            warnings.push(PlanWarning {
                level: WarnLevel::Warning,
                field: format!("dependencies[{index}].version"),
                message: format!(
                    "Dynamic version '{}' for {} makes the build non-reproducible.",
                    dependency.version, dependency.coordinate
                ),
            });
        }
    }

    warnings
}
