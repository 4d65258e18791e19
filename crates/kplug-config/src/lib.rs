// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings system for the kplug plugin framework.
//!
//! Merges programmatic defaults with a YAML or TOML config file found through
//! a search path (with an environment variable overriding the filename), then
//! loads the plugin modules the merged `PLUGINS` key lists.
//!
//! # Usage
//!
//! ```no_run
//! use kplug_config::SettingsStore;
//! use kplug_plugin::{PluginRegistry, StaticModuleLoader};
//!
//! let loader = StaticModuleLoader::new();
//! let store = SettingsStore::builder()
//!     .default_value("MY_HELLO_WORLD_CLASS", "HelloWorldPlugin")
//!     .plugins(["plugins.helloworld"])
//!     .build(&loader, PluginRegistry::global())
//!     .expect("settings");
//! println!("{}", store.get_str("MY_HELLO_WORLD_CLASS").unwrap());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod resolver;
pub mod shared;
pub mod store;

pub use diagnostic::{render_error, render_errors};
pub use loader::{load_file, load_str, ConfigFormat};
pub use resolver::{ConfigFileResolver, DEFAULT_CONFIG_FILENAME, DEFAULT_FILENAME_ENV_VAR};
pub use store::{SettingsBuilder, SettingsStore};
