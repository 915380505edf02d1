//! Layered descriptor loading
//!
//! The `DescriptorLoader` reads a descriptor and merges it with optional
//! layers around it, later layers overriding earlier ones.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::descriptor::{Descriptor, DescriptorFormat};
use crate::plan::ResolvedPlan;
use crate::resolve::PlanResolver;
use crate::{Error, Result};

/// Name of the per-user defaults file inside the global config directory
pub const GLOBAL_DEFAULTS_FILE: &str = "defaults.toml";

/// Loads a descriptor together with its defaults and local overrides
///
/// Layers, in merge order:
/// 1. Global defaults (`<config_dir>/buildplan/defaults.toml`)
/// 2. The project descriptor itself
/// 3. Local overrides (`build.local.<ext>` beside the descriptor)
///
/// Only the project descriptor is required.
#[derive(Debug, Clone)]
pub struct DescriptorLoader {
    /// Path to the project descriptor
    path: PathBuf,

    /// Override for the global config directory (used for testing).
    /// When `None`, `dirs::config_dir()` is used.
    global_config_dir_override: Option<PathBuf>,

    /// Properties layered over the merged descriptor's `[properties]`
    properties: BTreeMap<String, String>,
}

impl DescriptorLoader {
    /// Create a loader for the descriptor at `path`
    ///
    /// Uses the platform-appropriate global config directory:
    /// - Linux: `~/.config/buildplan/`
    /// - macOS: `~/Library/Application Support/buildplan/`
    /// - Windows: `%APPDATA%\buildplan\`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            global_config_dir_override: None,
            properties: BTreeMap::new(),
        }
    }

    /// Create a loader with a custom global config directory.
    ///
    /// Lets tests control the defaults layer without touching the real
    /// user config.
    pub fn with_global_config_dir(path: impl Into<PathBuf>, global_config_dir: PathBuf) -> Self {
        Self {
            path: path.into(),
            global_config_dir_override: Some(global_config_dir),
            properties: BTreeMap::new(),
        }
    }

    /// Supply properties from outside the descriptor files, such as the
    /// values the UI toolkit reports for `flutter.minSdkVersion`.
    pub fn with_properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.properties
            .extend(properties.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    fn global_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref override_dir) = self.global_config_dir_override {
            return Some(override_dir.clone());
        }
        dirs::config_dir().map(|d| d.join("buildplan"))
    }

    /// Path to the project descriptor
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the local override file for this descriptor
    ///
    /// `android/app/build.toml` has overrides in
    /// `android/app/build.local.toml`.
    pub fn local_override_path(&self) -> PathBuf {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or(DescriptorFormat::default().extension());
        self.path.with_file_name(format!("build.local.{ext}"))
    }

    /// Check if local overrides exist as a file separate from the descriptor
    pub fn has_local_overrides(&self) -> bool {
        let local_path = self.local_override_path();
        local_path != self.path && local_path.is_file()
    }

    /// Load and merge all layers into one descriptor
    ///
    /// Missing optional layers are skipped. A layer that fails to parse is
    /// reported as [`Error::InvalidDescriptor`] with its path.
    pub fn load(&self) -> Result<Descriptor> {
        let format = DescriptorFormat::from_path(&self.path).ok_or_else(|| {
            Error::UnsupportedFormat {
                path: self.path.clone(),
            }
        })?;
        if !self.path.is_file() {
            return Err(Error::DescriptorNotFound {
                path: self.path.clone(),
            });
        }

        let mut descriptor = Descriptor::default();

        // Layer 1 - Global defaults
        if let Some(global_dir) = self.global_config_dir() {
            let defaults_path = global_dir.join(GLOBAL_DEFAULTS_FILE);
            if defaults_path.is_file() {
                tracing::debug!(?defaults_path, "Loading global defaults (layer 1)");
                descriptor.merge(&read_layer(&defaults_path, DescriptorFormat::Toml)?);
            } else {
                tracing::debug!(?defaults_path, "No global defaults found (layer 1), skipping");
            }
        }

        // Layer 2 - Project descriptor
        tracing::debug!(path = ?self.path, ?format, "Loading descriptor (layer 2)");
        descriptor.merge(&read_layer(&self.path, format)?);

        // Layer 3 - Local overrides
        let local_path = self.local_override_path();
        if local_path == self.path {
            tracing::debug!(?local_path, "Descriptor is its own local override (layer 3), skipping");
        } else if local_path.is_file() {
            tracing::debug!(?local_path, "Loading local overrides (layer 3)");
            descriptor.merge(&read_layer(&local_path, format)?);
        } else {
            tracing::debug!(?local_path, "No local overrides found (layer 3), skipping");
        }

        Ok(descriptor)
    }

    /// Load all layers and resolve the merged descriptor
    pub fn resolve(&self) -> Result<ResolvedPlan> {
        let descriptor = self.load()?;
        let plan = PlanResolver::with_properties(self.properties.clone()).resolve(&descriptor)?;

        tracing::debug!(
            path = ?self.path,
            fingerprint = %plan.fingerprint()?,
            warnings = plan.warnings.len(),
            "Loaded build plan"
        );

        Ok(plan)
    }
}

fn read_layer(path: &Path, format: DescriptorFormat) -> Result<Descriptor> {
    let content = fs::read_to_string(path)?;
    Descriptor::parse(&content, format).map_err(|e| Error::InvalidDescriptor {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
