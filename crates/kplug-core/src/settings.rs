// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Merged settings snapshot with typed accessors.
//!
//! A [`Settings`] value is what plugin factories receive as their creation
//! context. It is built by the settings store from defaults and the config
//! file; once built it is never mutated.

use std::collections::BTreeMap;

use crate::error::{suggest, KplugError};
use crate::value::SettingsValue;

/// Reserved key listing the plugin modules to load, in order.
pub const PLUGINS_KEY: &str = "PLUGINS";

/// An immutable key-value view over merged configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: BTreeMap<String, SettingsValue>,
}

impl Settings {
    /// Wrap an already merged map.
    pub fn from_map(values: BTreeMap<String, SettingsValue>) -> Self {
        Self { values }
    }

    /// Get the raw value for `key`.
    ///
    /// Fails with [`KplugError::ConfigKey`] if the key is absent, suggesting
    /// the closest known key when there is one.
    pub fn get(&self, key: &str) -> Result<&SettingsValue, KplugError> {
        self.values.get(key).ok_or_else(|| KplugError::ConfigKey {
            key: key.to_string(),
            suggestion: suggest(key, self.values.keys().map(String::as_str)),
        })
    }

    pub fn get_str(&self, key: &str) -> Result<&str, KplugError> {
        let value = self.get(key)?;
        value.as_str().ok_or_else(|| mismatch(key, "string", value))
    }

    pub fn get_i64(&self, key: &str) -> Result<i64, KplugError> {
        let value = self.get(key)?;
        value.as_i64().ok_or_else(|| mismatch(key, "integer", value))
    }

    pub fn get_f64(&self, key: &str) -> Result<f64, KplugError> {
        let value = self.get(key)?;
        value.as_f64().ok_or_else(|| mismatch(key, "float", value))
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, KplugError> {
        let value = self.get(key)?;
        value.as_bool().ok_or_else(|| mismatch(key, "boolean", value))
    }

    pub fn get_seq(&self, key: &str) -> Result<&[SettingsValue], KplugError> {
        let value = self.get(key)?;
        value.as_seq().ok_or_else(|| mismatch(key, "sequence", value))
    }

    pub fn get_map(&self, key: &str) -> Result<&BTreeMap<String, SettingsValue>, KplugError> {
        let value = self.get(key)?;
        value.as_map().ok_or_else(|| mismatch(key, "mapping", value))
    }

    /// Get a sequence whose items must all be strings.
    ///
    /// A non-string item fails with a `TypeMismatch` whose key names the
    /// offending index, e.g. `PLUGINS[2]`.
    pub fn get_string_list(&self, key: &str) -> Result<Vec<String>, KplugError> {
        self.get_seq(key)?
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| mismatch(&format!("{key}[{i}]"), "string", item))
            })
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// All keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingsValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, SettingsValue> {
        &self.values
    }
}

fn mismatch(key: &str, expected: &'static str, found: &SettingsValue) -> KplugError {
    KplugError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.type_name(),
    }
}
