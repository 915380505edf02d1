//! `{{name}}` placeholder substitution
//!
//! Property values may themselves contain placeholders. All properties are
//! expanded once, up front, so every later substitution is a plain lookup.
//! Expansion is a single left-to-right scan: text produced by a substitution
//! is never scanned again.

use std::collections::BTreeMap;

use crate::error::ValidationError;

/// Fully expanded property values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyTable {
    values: BTreeMap<String, String>,
}

impl PropertyTable {
    /// Expand every property in `raw`.
    ///
    /// Fails on references to undefined properties and on reference cycles.
    pub fn new(raw: &BTreeMap<String, String>) -> Result<Self, ValidationError> {
        let mut resolved = BTreeMap::new();
        for name in raw.keys() {
            let mut stack = Vec::new();
            expand_property(name, raw, &mut resolved, &mut stack)?;
        }
        Ok(Self { values: resolved })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Substitute every placeholder in `input`; `field` names the value in errors.
    pub fn expand(&self, field: &str, input: &str) -> Result<String, ValidationError> {
        substitute(field, input, |name| {
            self.get(name)
                .map(str::to_string)
                .ok_or_else(|| unknown_property(field, name))
        })
    }
}

fn expand_property(
    name: &str,
    raw: &BTreeMap<String, String>,
    resolved: &mut BTreeMap<String, String>,
    stack: &mut Vec<String>,
) -> Result<String, ValidationError> {
    if let Some(value) = resolved.get(name) {
        return Ok(value.clone());
    }

    let field = format!("properties.{name}");
    if stack.iter().any(|n| n == name) {
        let mut chain = stack.clone();
        chain.push(name.to_string());
        return Err(ValidationError::new(
            field,
            format!("circular property reference: {}", chain.join(" -> ")),
        ));
    }

    let template = raw
        .get(name)
        .ok_or_else(|| unknown_property(&field, name))?;

    stack.push(name.to_string());
    let value = substitute(&field, template, |inner| {
        if raw.contains_key(inner) {
            expand_property(inner, raw, resolved, stack)
        } else {
            Err(unknown_property(&field, inner))
        }
    })?;
    stack.pop();

    resolved.insert(name.to_string(), value.clone());
    Ok(value)
}

fn substitute(
    field: &str,
    input: &str,
    mut lookup: impl FnMut(&str) -> Result<String, ValidationError>,
) -> Result<String, ValidationError> {
    let mut result = String::with_capacity(input.len());
    let mut remaining = input;

    while let Some(start) = remaining.find("{{") {
        result.push_str(&remaining[..start]);

        let after = &remaining[start + 2..];
        let end = after.find("}}").ok_or_else(|| {
            ValidationError::new(field, format!("unterminated placeholder in '{input}'"))
        })?;

        let name = after[..end].trim();
        if name.is_empty() {
            return Err(ValidationError::new(
                field,
                format!("empty placeholder in '{input}'"),
            ));
        }

        result.push_str(&lookup(name)?);
        remaining = &after[end + 2..];
    }

    result.push_str(remaining);
    Ok(result)
}

fn unknown_property(field: &str, name: &str) -> ValidationError {
    ValidationError::new(field, format!("unknown property '{name}'"))
}
