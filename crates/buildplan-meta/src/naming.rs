//! Identifier rules for namespaces, plugin ids and named configurations

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Java package style: two or more dot-separated segments, each starting with a letter.
static APPLICATION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$").unwrap());

/// Plugin ids may be a single segment (`kotlin-android`) and allow hyphens.
static PLUGIN_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*(\.[A-Za-z0-9][A-Za-z0-9_-]*)*$").unwrap()
});

static CONFIG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap());

/// Validate a namespace or application id such as `com.example.app`.
pub fn validate_application_id(value: &str) -> Result<()> {
    if APPLICATION_ID.is_match(value) {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier {
            value: value.to_string(),
            reason: "expected at least two dot-separated segments, each starting with a letter"
                .to_string(),
        })
    }
}

/// Validate a plugin id such as `com.android.application` or `kotlin-android`.
pub fn validate_plugin_id(value: &str) -> Result<()> {
    if PLUGIN_ID.is_match(value) {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier {
            value: value.to_string(),
            reason: "plugin ids are dot-separated segments of letters, digits, '-' or '_'"
                .to_string(),
        })
    }
}

/// Validate the name of a build type or signing configuration.
pub fn validate_config_name(value: &str) -> Result<()> {
    if CONFIG_NAME.is_match(value) {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier {
            value: value.to_string(),
            reason: "names must start with a letter and contain only letters, digits or '_'"
                .to_string(),
        })
    }
}
