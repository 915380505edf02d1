//! End-to-end tests for the descriptor pipeline
//!
//! These tests exercise the complete flow: layered loading -> resolution ->
//! serialized plan for the packaging toolchain.

use buildplan_core::{
    Descriptor, DescriptorFormat, DescriptorLoader, ResolvedPlan, SigningStrategy, logging,
    resolve,
};
use buildplan_meta::{DependencyScope, JavaVersion};
use buildplan_test_utils::fixtures::{ATTENDIFY_DESCRIPTOR, GLOBAL_DEFAULTS, LOCAL_OVERRIDES};
use buildplan_test_utils::project::TestProject;
use pretty_assertions::assert_eq;

/// A project with all three layers on disk
fn layered_project() -> TestProject {
    let project = TestProject::new();
    project.write_global_defaults(GLOBAL_DEFAULTS);
    project.write_descriptor("build.toml", ATTENDIFY_DESCRIPTOR);
    project.write_local_overrides("toml", LOCAL_OVERRIDES);
    project
}

fn load(project: &TestProject) -> ResolvedPlan {
    DescriptorLoader::with_global_config_dir(
        project.module_dir().join("build.toml"),
        project.global_config_dir(),
    )
    .resolve()
    .expect("layered project should resolve")
}

#[test]
fn test_full_pipeline() {
    let _ = logging::init();
    let project = layered_project();
    let plan = load(&project);

    assert_eq!(plan.namespace, "com.appstaticsx.app.attendify");
    assert_eq!((plan.sdk.min, plan.sdk.target, plan.sdk.compile), (21, 35, 35));
    assert_eq!(plan.ndk_version.as_deref(), Some("26.1.10909125"));
    assert_eq!(plan.jvm.target_compatibility, JavaVersion::Java11);
    assert_eq!(
        plan.jvm.javac_args(),
        vec!["-source", "11", "-target", "11", "-Xlint:deprecation", "-Xlint:-options"]
    );
    assert_eq!(
        plan.build_type("release").unwrap().signing,
        SigningStrategy::Keystore {
            config: "upload".to_string()
        }
    );
    assert_eq!(plan.dependencies[0].scope, DependencyScope::CompileTime);
}

#[test]
fn test_layered_and_flattened_descriptors_agree() {
    let project = layered_project();
    let loader = DescriptorLoader::with_global_config_dir(
        project.module_dir().join("build.toml"),
        project.global_config_dir(),
    );

    // Writing the merged descriptor out and resolving it alone gives the same plan
    let merged = loader.load().unwrap();
    let flattened = Descriptor::parse(&merged.to_toml().unwrap(), DescriptorFormat::Toml).unwrap();

    assert_eq!(resolve(&flattened).unwrap(), loader.resolve().unwrap());
}

#[test]
fn test_serialized_plan_round_trips_with_same_fingerprint() {
    let plan = load(&layered_project());
    let fingerprint = plan.fingerprint().unwrap();

    let from_json: ResolvedPlan = serde_json::from_str(&plan.to_json().unwrap()).unwrap();
    assert_eq!(from_json.fingerprint().unwrap(), fingerprint);

    let from_toml: ResolvedPlan = toml::from_str(&plan.to_toml().unwrap()).unwrap();
    assert_eq!(from_toml, plan);
}

#[test]
fn test_plan_json_shape() {
    let plan = load(&layered_project());
    let json: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();

    assert_eq!(json["sdk"]["min"], 21);
    assert_eq!(json["jvm"]["source_compatibility"], "11");
    assert_eq!(json["build_types"]["debug"]["signing"]["kind"], "debug-keystore");
    assert_eq!(json["build_types"]["release"]["signing"]["config"], "upload");
    assert_eq!(json["dependencies"][0]["coordinate"], "androidx.multidex:multidex");
    assert_eq!(json["dependencies"][0]["scope"], "compile-time");
}

#[test]
fn test_repeated_loads_are_identical() {
    let project = layered_project();
    assert_eq!(load(&project), load(&project));
}
