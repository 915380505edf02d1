//! [`TestProject`] builder for descriptor loading scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Module directory, relative to the project root, that holds descriptors.
pub const MODULE_DIR: &str = "android/app";

/// A temporary project with a module directory and a private global config
/// directory, so tests never read the real user defaults.
///
/// # Example
///
/// ```rust,no_run
/// use buildplan_test_utils::fixtures::MINIMAL_DESCRIPTOR;
/// use buildplan_test_utils::project::TestProject;
///
/// let project = TestProject::new();
/// let path = project.write_descriptor("build.toml", MINIMAL_DESCRIPTOR);
/// assert!(path.ends_with("android/app/build.toml"));
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty project with its module directory in place.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(MODULE_DIR)).unwrap();
        Self { temp_dir }
    }

    /// Return the root path of the temporary project.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory holding the module's descriptors.
    pub fn module_dir(&self) -> PathBuf {
        self.root().join(MODULE_DIR)
    }

    /// Directory to pass as the loader's global config directory.
    pub fn global_config_dir(&self) -> PathBuf {
        self.root().join(".config").join("buildplan")
    }

    /// Write a descriptor named `file_name` into the module directory and
    /// return its path.
    pub fn write_descriptor(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.module_dir().join(file_name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Write `build.local.<ext>` next to the descriptors.
    pub fn write_local_overrides(&self, ext: &str, content: &str) -> PathBuf {
        self.write_descriptor(&format!("build.local.{ext}"), content)
    }

    /// Write `defaults.toml` into the global config directory.
    pub fn write_global_defaults(&self, content: &str) -> PathBuf {
        let dir = self.global_config_dir();
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("defaults.toml");
        fs::write(&path, content).unwrap();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let project = TestProject::new();
        assert!(project.module_dir().is_dir());
        assert!(!project.global_config_dir().exists());

        let defaults = project.write_global_defaults("");
        assert!(defaults.starts_with(project.global_config_dir()));

        let local = project.write_local_overrides("toml", "");
        assert_eq!(local.file_name().unwrap(), "build.local.toml");
    }
}
