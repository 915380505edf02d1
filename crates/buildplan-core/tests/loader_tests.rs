//! Tests for layered descriptor loading

use buildplan_core::{DescriptorLoader, Error, SigningStrategy};
use buildplan_test_utils::fixtures::{
    ATTENDIFY_DESCRIPTOR, GLOBAL_DEFAULTS, LOCAL_OVERRIDES, MINIMAL_DESCRIPTOR,
};
use buildplan_test_utils::project::TestProject;
use pretty_assertions::assert_eq;

fn loader(project: &TestProject, file_name: &str) -> DescriptorLoader {
    DescriptorLoader::with_global_config_dir(
        project.module_dir().join(file_name),
        project.global_config_dir(),
    )
}

#[test]
fn test_project_descriptor_alone() {
    let project = TestProject::new();
    project.write_descriptor("build.toml", MINIMAL_DESCRIPTOR);

    let loader = loader(&project, "build.toml");
    assert!(!loader.has_local_overrides());

    let plan = loader.resolve().unwrap();
    assert_eq!(plan.namespace, "com.example.app");
    assert_eq!(plan.sdk.target, 34);
}

#[test]
fn test_global_defaults_are_overridden_by_project() {
    let project = TestProject::new();
    project.write_global_defaults(GLOBAL_DEFAULTS);
    project.write_descriptor("build.toml", ATTENDIFY_DESCRIPTOR);

    let descriptor = loader(&project, "build.toml").load().unwrap();

    // The project sets flutter.compileSdkVersion = 35 over the global 34
    assert_eq!(
        descriptor.properties["flutter.compileSdkVersion"].to_string(),
        "35"
    );
    // Compiler args from both layers are kept, globals first
    assert_eq!(
        descriptor.compile_options.compiler_args,
        vec!["-Xlint:deprecation", "-Xlint:-options"]
    );
}

#[test]
fn test_global_defaults_fill_gaps() {
    let project = TestProject::new();
    project.write_global_defaults(
        r#"
[sdk]
min = 21
target = 34
compile = 34
"#,
    );
    project.write_descriptor("build.toml", "namespace = \"com.example.app\"\n");

    let plan = loader(&project, "build.toml").resolve().unwrap();
    assert_eq!((plan.sdk.min, plan.sdk.target, plan.sdk.compile), (21, 34, 34));
}

#[test]
fn test_local_overrides_win() {
    let project = TestProject::new();
    project.write_descriptor("build.toml", ATTENDIFY_DESCRIPTOR);
    project.write_local_overrides("toml", LOCAL_OVERRIDES);

    let loader = loader(&project, "build.toml");
    assert!(loader.has_local_overrides());

    let plan = loader.resolve().unwrap();
    assert_eq!(plan.ndk_version.as_deref(), Some("26.1.10909125"));
    assert_eq!(
        plan.build_type("release").unwrap().signing,
        SigningStrategy::Keystore {
            config: "upload".to_string()
        }
    );

    let upload = plan.signing_config_for("release").unwrap();
    assert_eq!(upload.store_password.as_deref(), Some("local-secret"));
    assert!(
        !plan
            .warnings
            .iter()
            .any(|w| w.field == "build_types.release.signing_config")
    );
}

#[test]
fn test_yaml_descriptor_with_yaml_overrides() {
    let project = TestProject::new();
    project.write_descriptor(
        "build.yaml",
        r#"
namespace: com.example.app
sdk:
  min: 21
  target: 33
  compile: 34
"#,
    );
    project.write_local_overrides("yaml", "sdk:\n  target: 34\n");

    let plan = loader(&project, "build.yaml").resolve().unwrap();
    assert_eq!(plan.sdk.target, 34);
}

#[test]
fn test_json_descriptor() {
    let project = TestProject::new();
    project.write_descriptor(
        "build.json",
        r#"{
  "namespace": "com.example.app",
  "sdk": { "min": 21, "target": 34, "compile": 34 },
  "dependencies": [{ "id": "androidx.multidex:multidex", "version": "2.0.1", "scope": "runtime" }]
}"#,
    );

    let plan = loader(&project, "build.json").resolve().unwrap();
    assert_eq!(plan.runtime_classpath().len(), 1);
    assert!(plan.compile_classpath().is_empty());
}

#[test]
fn test_external_properties() {
    let project = TestProject::new();
    project.write_descriptor(
        "build.toml",
        r#"
namespace = "com.example.app"

[sdk]
min = "{{flutter.minSdkVersion}}"
target = 34
compile = 34
"#,
    );

    let base = loader(&project, "build.toml");
    assert!(matches!(base.resolve(), Err(Error::Validation(_))));

    let plan = base
        .with_properties([("flutter.minSdkVersion", "23")])
        .resolve()
        .unwrap();
    assert_eq!(plan.sdk.min, 23);
}

#[test]
fn test_validation_error_surfaces_field() {
    let project = TestProject::new();
    project.write_descriptor(
        "build.toml",
        "namespace = \"com.example.app\"\n[sdk]\nmin = 30\ntarget = 29\ncompile = 34\n",
    );

    match loader(&project, "build.toml").resolve() {
        Err(Error::Validation(err)) => assert_eq!(err.field, "sdk.min"),
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn test_invalid_local_overrides_reported_with_path() {
    let project = TestProject::new();
    project.write_descriptor("build.toml", MINIMAL_DESCRIPTOR);
    let local = project.write_local_overrides("toml", "unknown_key = true\n");

    match loader(&project, "build.toml").load() {
        Err(Error::InvalidDescriptor { path, message }) => {
            assert_eq!(path, local);
            assert!(message.contains("unknown_key"), "{message}");
        }
        other => panic!("expected InvalidDescriptor, got {other:?}"),
    }
}
