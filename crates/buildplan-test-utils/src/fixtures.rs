//! Descriptor fixtures.
//!
//! [`ATTENDIFY_DESCRIPTOR`] mirrors a real Flutter host module: toolkit
//! supplied SDK levels, Java 11 with core library desugaring, and a release
//! build signed with the debug keys.

/// A complete module descriptor with toolkit values as placeholders.
pub const ATTENDIFY_DESCRIPTOR: &str = r#"
namespace = "com.appstaticsx.app.attendify"
ndk_version = "{{flutter.ndkVersion}}"

[properties]
"flutter.compileSdkVersion" = 35
"flutter.minSdkVersion" = 21
"flutter.targetSdkVersion" = 35
"flutter.ndkVersion" = "27.0.12077973"
"flutter.versionCode" = 1
"flutter.versionName" = "1.0.0"

[plugins]
"com.android.application" = {}
"kotlin-android" = {}
"dev.flutter.flutter-gradle-plugin" = {}

[sdk]
min = "{{flutter.minSdkVersion}}"
target = "{{flutter.targetSdkVersion}}"
compile = "{{flutter.compileSdkVersion}}"

[compile_options]
source_compatibility = "VERSION_11"
target_compatibility = "VERSION_11"
core_library_desugaring = true
desugaring_library = "com.android.tools:desugar_jdk_libs:2.1.5"
compiler_args = ["-Xlint:-options"]

[kotlin_options]
jvm_target = "11"
free_compiler_args = ["-Xlint:-options"]

[default_config]
version_code = "{{flutter.versionCode}}"
version_name = "{{flutter.versionName}}"

[build_types.release]
signing_config = "debug"

[toolkit]
source = "../.."

[[dependencies]]
id = "androidx.multidex:multidex:2.0.1"
"#;

/// The smallest descriptor that resolves: a namespace and SDK levels 21/34/34.
pub const MINIMAL_DESCRIPTOR: &str = r#"
namespace = "com.example.app"

[sdk]
min = 21
target = 34
compile = 34
"#;

/// Per-user defaults shared by every project on a machine.
pub const GLOBAL_DEFAULTS: &str = r#"
[properties]
"flutter.compileSdkVersion" = 34

[compile_options]
compiler_args = ["-Xlint:deprecation"]
"#;

/// Machine-specific overrides kept out of version control.
pub const LOCAL_OVERRIDES: &str = r#"
[properties]
"flutter.ndkVersion" = "26.1.10909125"
"upload.password" = "local-secret"

[signing_configs.upload]
store_file = "/home/dev/keys/upload.jks"
store_password = "{{upload.password}}"
key_alias = "upload"

[build_types.release]
signing_config = "upload"
"#;
