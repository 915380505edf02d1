//! Tests for plan lints

use buildplan_core::{Descriptor, PlanWarning, WarnLevel, resolve};
use buildplan_core::resolve::{APPLICATION_PLUGIN, lint_plan};
use pretty_assertions::assert_eq;
use rstest::rstest;

const APP_HEADER: &str = r#"
namespace = "com.example.app"

[plugins]
"com.android.application" = {}
"#;

fn warnings_for(body: &str) -> Vec<PlanWarning> {
    let descriptor = Descriptor::from_toml(&format!("{APP_HEADER}\n{body}")).unwrap();
    resolve(&descriptor).unwrap().warnings
}

fn fields(warnings: &[PlanWarning]) -> Vec<&str> {
    warnings.iter().map(|w| w.field.as_str()).collect()
}

const SDK_21: &str = "[sdk]\nmin = 21\ntarget = 34\ncompile = 34\n";
const SDK_19: &str = "[sdk]\nmin = 19\ntarget = 34\ncompile = 34\n";

#[test]
fn test_clean_plan_has_only_minify_notice() {
    let warnings = warnings_for(SDK_21);
    assert_eq!(fields(&warnings), vec!["build_types.release.minify"]);
    assert_eq!(warnings[0].level, WarnLevel::Info);
}

#[test]
fn test_minified_release_is_clean() {
    let warnings = warnings_for(&format!("{SDK_21}\n[build_types.release]\nminify = true\n"));
    assert!(warnings.is_empty(), "{warnings:?}");
}

#[test]
fn test_missing_application_plugin() {
    let descriptor = Descriptor::from_toml(&format!(
        "namespace = \"com.example.lib\"\n{SDK_21}\n[build_types.release]\nminify = true\n"
    ))
    .unwrap();
    let plan = resolve(&descriptor).unwrap();

    assert_eq!(fields(&plan.warnings), vec!["plugins"]);
    assert!(plan.warnings[0].message.contains(APPLICATION_PLUGIN));
}

#[test]
fn test_unapplied_application_plugin_counts_as_missing() {
    let descriptor = Descriptor::from_toml(&format!(
        r#"namespace = "com.example.app"

[plugins]
"com.android.application" = {{ version = "8.7.0", apply = false }}

{SDK_21}
[build_types.release]
minify = true
"#
    ))
    .unwrap();
    let plan = resolve(&descriptor).unwrap();
    assert_eq!(fields(&plan.warnings), vec!["plugins"]);
}

#[rstest]
#[case::no_multidex("", true)]
#[case::multidex_packaged(r#"dependencies = ["androidx.multidex:multidex:2.0.1"]"#, false)]
#[case::multidex_provided_only(
    r#"dependencies = [{ id = "androidx.multidex:multidex:2.0.1", scope = "provided" }]"#,
    true
)]
fn test_low_min_sdk_needs_multidex(#[case] deps: &str, #[case] expect_warning: bool) {
    let descriptor = Descriptor::from_toml(&format!(
        "{deps}\n{APP_HEADER}\n{SDK_19}\n[build_types.release]\nminify = true\n"
    ))
    .unwrap();
    let plan = resolve(&descriptor).unwrap();

    assert_eq!(fields(&plan.warnings).contains(&"sdk.min"), expect_warning);
}

#[test]
fn test_desugaring_library_without_desugaring() {
    let warnings = warnings_for(&format!(
        "{SDK_21}\n[compile_options]\ndesugaring_library = \"com.android.tools:desugar_jdk_libs:2.1.5\"\n"
    ));
    assert!(fields(&warnings).contains(&"compile_options.desugaring_library"));
}

#[test]
fn test_dynamic_dependency_version() {
    let descriptor = Descriptor::from_toml(&format!(
        "dependencies = [\"org.example:lib:1.0.0\", \"org.example:other:2.+\"]\n{APP_HEADER}\n{SDK_21}"
    ))
    .unwrap();
    let plan = resolve(&descriptor).unwrap();

    let dynamic: Vec<&PlanWarning> = plan
        .warnings
        .iter()
        .filter(|w| w.field.starts_with("dependencies"))
        .collect();
    assert_eq!(dynamic.len(), 1);
    assert_eq!(dynamic[0].field, "dependencies[1].version");
    assert!(dynamic[0].message.contains("2.+"));
}

#[test]
fn test_lint_plan_is_pure() {
    let descriptor = Descriptor::from_toml(&format!("{APP_HEADER}\n{SDK_21}")).unwrap();
    let plan = resolve(&descriptor).unwrap();
    assert_eq!(lint_plan(&plan), plan.warnings);
}
