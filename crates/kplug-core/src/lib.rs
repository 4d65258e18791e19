// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the kplug plugin framework.
//!
//! This crate provides the error taxonomy, the dynamically typed settings
//! value and snapshot, and the capability traits every plugin implements.
//! The registry lives in `kplug-plugin`, the settings loader in `kplug-config`.

pub mod error;
pub mod settings;
pub mod traits;
pub mod value;

// Re-export key items at crate root for ergonomic imports.
pub use error::{suggest, KplugError};
pub use settings::{Settings, PLUGINS_KEY};
pub use traits::{Plugin, PluginFactory};
pub use value::SettingsValue;
