// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config file parsing using Figment.
//!
//! The file is read as a generic key-value document: its top level must be
//! a mapping, values map onto [`SettingsValue`]. The format is picked from
//! the extension: `.toml` is TOML, everything else is YAML.

#![allow(clippy::result_large_err)]

use std::collections::BTreeMap;
use std::path::Path;

use figment::{
    providers::{Format, Toml, Yaml},
    Figment,
};
use kplug_core::{KplugError, SettingsValue};

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format for `path` from its extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Parse the config file at `path` into its top-level entries.
///
/// Fails with [`KplugError::ConfigParse`] if the file cannot be read, is
/// malformed, has a non-mapping top level, or holds a value that is not a
/// [`SettingsValue`] (such as `null`).
pub fn load_file(path: &Path) -> Result<BTreeMap<String, SettingsValue>, KplugError> {
    if !path.is_file() {
        return Err(KplugError::ConfigParse {
            path: path.to_path_buf(),
            message: "file does not exist or is not a regular file".to_string(),
        });
    }

    let format = ConfigFormat::from_path(path);
    tracing::info!(path = %path.display(), ?format, "loading config file");

    let figment = match format {
        ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
        ConfigFormat::Toml => Figment::from(Toml::file(path)),
    };

    figment
        .extract::<BTreeMap<String, SettingsValue>>()
        .map_err(|err| KplugError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

/// Parse config content held in memory.
///
/// Used for testing and for embedding defaults documents in a binary.
pub fn load_str(
    content: &str,
    format: ConfigFormat,
) -> Result<BTreeMap<String, SettingsValue>, KplugError> {
    let figment = match format {
        ConfigFormat::Yaml => Figment::from(Yaml::string(content)),
        ConfigFormat::Toml => Figment::from(Toml::string(content)),
    };

    figment
        .extract::<BTreeMap<String, SettingsValue>>()
        .map_err(|err| KplugError::ConfigParse {
            path: "<inline>".into(),
            message: err.to_string(),
        })
}
