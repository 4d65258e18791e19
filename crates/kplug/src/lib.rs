// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config-driven plugin registry with layered settings.
//!
//! Plugins register factories under a name in a [`PluginRegistry`]. A
//! [`SettingsStore`] merges programmatic defaults with a YAML or TOML config
//! file, then loads every module listed under `PLUGINS` so that its plugins
//! register themselves. Application code looks plugins up by the names its
//! settings give it.
//!
//! ```no_run
//! use kplug::{PluginRegistry, SettingsStore, StaticModuleLoader};
//!
//! # fn hello_world(_: &PluginRegistry) -> Result<(), kplug::KplugError> { Ok(()) }
//! kplug::init_tracing("info");
//!
//! let loader = StaticModuleLoader::new().module("plugins.helloworld", hello_world);
//! let store = kplug::bootstrap(
//!     SettingsStore::builder()
//!         .default_value("MY_HELLO_WORLD_CLASS", "HelloWorldPlugin")
//!         .plugins(["plugins.helloworld"]),
//!     &loader,
//! )?;
//!
//! let class = store.get_str("MY_HELLO_WORLD_CLASS")?;
//! let plugin = PluginRegistry::global().lookup(class)?.create(store.settings())?;
//! # let _ = plugin;
//! # Ok::<(), kplug::KplugError>(())
//! ```

mod logging;

pub use kplug_config::{
    load_file, load_str, render_error, render_errors, shared, ConfigFileResolver, ConfigFormat,
    SettingsBuilder, SettingsStore, DEFAULT_CONFIG_FILENAME, DEFAULT_FILENAME_ENV_VAR,
};
pub use kplug_core::{
    suggest, KplugError, Plugin, PluginFactory, Settings, SettingsValue, PLUGINS_KEY,
};
pub use kplug_plugin::{ModuleInit, ModuleLoader, PluginRecord, PluginRegistry, StaticModuleLoader};
pub use logging::init_tracing;

/// Build the application's settings against the process-wide registry.
///
/// Plugins listed under `PLUGINS` register into [`PluginRegistry::global`].
/// On success the snapshot is published to [`shared`], so code without a
/// handle on the returned store can still read it. Nothing is published when
/// the build fails.
pub fn bootstrap<L>(builder: SettingsBuilder, loader: &L) -> Result<SettingsStore, KplugError>
where
    L: ModuleLoader + ?Sized,
{
    let store = builder.build(loader, PluginRegistry::global())?;
    shared::publish(store.settings().clone());
    tracing::info!(
        config_file = ?store.config_file(),
        plugins = PluginRegistry::global().len(),
        "kplug bootstrap complete"
    );
    Ok(store)
}
