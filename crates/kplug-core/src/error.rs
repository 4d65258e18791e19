// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the kplug plugin framework.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// The error type shared by the registry, the settings store, and module loaders.
#[derive(Debug, Error, Diagnostic)]
pub enum KplugError {
    /// File loading was enabled but no search location holds the config file.
    #[error("config file `{filename}` not found in any of: {}", join_paths(.searched))]
    #[diagnostic(
        code(kplug::config::not_found),
        help("create the file in one of the search directories, or disable file loading")
    )]
    ConfigNotFound {
        /// The effective filename that was searched for.
        filename: String,
        /// Every location that was tested, in search order.
        searched: Vec<PathBuf>,
    },

    /// The config file is malformed or its top level is not a key-value mapping.
    #[error("failed to parse config file `{}`: {message}", .path.display())]
    #[diagnostic(code(kplug::config::parse))]
    ConfigParse {
        /// Path of the file that failed to parse.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A settings key was requested that exists in neither defaults nor file.
    #[error("unknown settings key `{key}`")]
    #[diagnostic(code(kplug::config::unknown_key), help("{}", key_help(suggestion.as_deref())))]
    ConfigKey {
        /// The requested key.
        key: String,
        /// Closest known key, if any is similar enough.
        suggestion: Option<String>,
    },

    /// A settings value exists but has a different type than requested.
    #[error("settings key `{key}` is a {found}, expected {expected}")]
    #[diagnostic(code(kplug::config::type_mismatch))]
    TypeMismatch {
        /// The key (or `KEY[index]` for sequence items).
        key: String,
        /// Requested type name.
        expected: &'static str,
        /// Actual type name.
        found: &'static str,
    },

    /// No plugin is registered under the requested name.
    #[error("no plugin named `{name}`; known plugins: {}", join_names(.known))]
    #[diagnostic(
        code(kplug::plugin::not_found),
        help("{}", plugin_help(suggestion.as_deref()))
    )]
    PluginNotFound {
        /// The requested plugin name.
        name: String,
        /// Names currently present in the registry, sorted.
        known: Vec<String>,
        /// Closest known name, if any is similar enough.
        suggestion: Option<String>,
    },

    /// A plugin module failed to load. Remaining modules were not loaded.
    #[error("failed to load plugin module `{module}`: {source}")]
    #[diagnostic(code(kplug::plugin::load))]
    PluginLoad {
        /// Identifier of the failing module.
        module: String,
        /// What the module loader reported.
        #[source]
        source: Box<KplugError>,
    },

    /// A module loader has no module under the requested identifier.
    #[error("no module named `{module}`; known modules: {}", join_names(.known))]
    #[diagnostic(code(kplug::plugin::unknown_module))]
    ModuleNotFound {
        /// The requested module identifier.
        module: String,
        /// Identifiers the loader knows about, sorted.
        known: Vec<String>,
    },

    /// A plugin factory failed to create an instance.
    #[error("plugin `{name}` failed: {message}")]
    #[diagnostic(code(kplug::plugin::create))]
    Plugin {
        /// Name of the plugin.
        name: String,
        /// Description of the failure.
        message: String,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "<no search locations>".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_names(names: &[String]) -> String {
    if names.is_empty() {
        "<none>".to_string()
    } else {
        names.join(", ")
    }
}

fn key_help(suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`?"),
        None => "set the key as a default or add it to the config file".to_string(),
    }
}

fn plugin_help(suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`?"),
        None => {
            "check that the module registering it is listed in PLUGINS and that it calls register"
                .to_string()
        }
    }
}

/// Suggest a similar name using Jaro-Winkler string similarity.
///
/// Returns the best candidate above the similarity threshold, or `None` if
/// nothing is close enough.
pub fn suggest<'a>(unknown: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for candidate in candidates {
        let score = strsim::jaro_winkler(unknown, candidate);
        if score > best_score {
            best_score = score;
            best_match = Some(candidate.to_string());
        }
    }

    best_match
}
