// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered settings: defaults merged with the config file, then plugin loading.
//!
//! Merge order (later overrides earlier, top-level keys only):
//! 1. Programmatic defaults given to [`SettingsBuilder`]
//! 2. The resolved config file, unless file loading is disabled
//!
//! After merging, the `PLUGINS` key lists the modules to load, in order.
//! Each store owns its snapshot; use [`crate::shared`] to make one visible
//! process-wide.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kplug_core::{KplugError, Settings, SettingsValue, PLUGINS_KEY};
use kplug_plugin::{ModuleLoader, PluginRegistry};

use crate::loader;
use crate::resolver::{ConfigFileResolver, DEFAULT_CONFIG_FILENAME, DEFAULT_FILENAME_ENV_VAR};

/// Collects defaults and file-loading options, then builds a [`SettingsStore`].
#[derive(Debug, Clone)]
pub struct SettingsBuilder {
    defaults: BTreeMap<String, SettingsValue>,
    config_filename: String,
    filename_env_var: String,
    search_dirs: Vec<PathBuf>,
    load_file: bool,
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self {
            defaults: BTreeMap::new(),
            config_filename: DEFAULT_CONFIG_FILENAME.to_string(),
            filename_env_var: DEFAULT_FILENAME_ENV_VAR.to_string(),
            search_dirs: vec![PathBuf::from(".")],
            load_file: true,
        }
    }
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a default. Later calls for the same key replace earlier ones.
    pub fn default_value(mut self, key: impl Into<String>, value: impl Into<SettingsValue>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// Set several defaults at once.
    pub fn defaults<K, V, I>(mut self, values: I) -> Self
    where
        K: Into<String>,
        V: Into<SettingsValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.defaults
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Default list of plugin modules, stored under `PLUGINS`.
    pub fn plugins<S: Into<String>>(self, modules: impl IntoIterator<Item = S>) -> Self {
        let modules: Vec<SettingsValue> = modules
            .into_iter()
            .map(|m| SettingsValue::String(m.into()))
            .collect();
        self.default_value(PLUGINS_KEY, SettingsValue::Sequence(modules))
    }

    pub fn config_filename(mut self, filename: impl Into<String>) -> Self {
        self.config_filename = filename.into();
        self
    }

    pub fn filename_env_var(mut self, name: impl Into<String>) -> Self {
        self.filename_env_var = name.into();
        self
    }

    /// Replace the search directories.
    pub fn search_dirs<P: Into<PathBuf>>(mut self, dirs: impl IntoIterator<Item = P>) -> Self {
        self.search_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Append a search directory.
    pub fn search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    /// Append `<user config dir>/<app>` (e.g. `~/.config/<app>`) as a search
    /// directory. No-op on platforms without a user config directory.
    pub fn user_config_dir(self, app: &str) -> Self {
        match dirs::config_dir() {
            Some(dir) => self.search_dir(dir.join(app)),
            None => self,
        }
    }

    /// Enable or disable reading the config file. Enabled by default.
    pub fn load_file(mut self, enabled: bool) -> Self {
        self.load_file = enabled;
        self
    }

    /// The resolver these options describe.
    pub fn resolver(&self) -> ConfigFileResolver {
        ConfigFileResolver::new(
            self.config_filename.clone(),
            self.filename_env_var.clone(),
            self.search_dirs.clone(),
        )
    }

    /// Merge defaults with the config file and load the listed plugin modules.
    ///
    /// Modules are loaded in `PLUGINS` order. The first failure aborts with
    /// [`KplugError::PluginLoad`]; registrations made by modules loaded
    /// before it stay in `registry`.
    pub fn build<L>(self, loader: &L, registry: &PluginRegistry) -> Result<SettingsStore, KplugError>
    where
        L: ModuleLoader + ?Sized,
    {
        let resolver = self.resolver();
        let SettingsBuilder {
            defaults, load_file, ..
        } = self;

        let mut values = BTreeMap::new();
        for (key, value) in &defaults {
            tracing::info!(key = %key, value = %value, "setting default");
            values.insert(key.clone(), value.clone());
        }

        let config_file = if load_file {
            let path = resolver.resolve()?;
            let file_values = loader::load_file(&path)?;
            for (key, value) in file_values {
                tracing::debug!(key = %key, value = %value, "setting config value");
                values.insert(key, value);
            }
            tracing::info!(path = %path.display(), "config file loaded");
            Some(path)
        } else {
            tracing::info!("config file loading disabled");
            None
        };

        let settings = Settings::from_map(values);
        load_plugins(&settings, loader, registry)?;
        tracing::debug!(keys = settings.len(), "settings ready");

        Ok(SettingsStore {
            settings: Arc::new(settings),
            defaults,
            config_file,
        })
    }
}

/// Load every module named by `PLUGINS`, in order.
fn load_plugins<L>(settings: &Settings, loader: &L, registry: &PluginRegistry) -> Result<(), KplugError>
where
    L: ModuleLoader + ?Sized,
{
    if !settings.contains_key(PLUGINS_KEY) {
        tracing::warn!(
            "no plugins will be loaded: `{PLUGINS_KEY}` is set neither as a default nor in the config file"
        );
        return Ok(());
    }

    let modules = settings.get_string_list(PLUGINS_KEY)?;
    tracing::info!(plugins = ?modules, "plugins to load");

    for module in &modules {
        tracing::debug!(module = %module, "loading plugin module");
        if let Err(err) = loader.load(module, registry) {
            tracing::error!(module = %module, error = %err, "failed to load plugin module");
            return Err(KplugError::PluginLoad {
                module: module.clone(),
                source: Box::new(err),
            });
        }
    }

    Ok(())
}

/// The merged settings plus where they came from.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    settings: Arc<Settings>,
    defaults: BTreeMap<String, SettingsValue>,
    config_file: Option<PathBuf>,
}

impl SettingsStore {
    /// Start configuring a new store.
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
    }

    /// Get the merged value for `key`.
    ///
    /// Fails with [`KplugError::ConfigKey`] if `key` is in neither the
    /// defaults nor the config file.
    pub fn get(&self, key: &str) -> Result<&SettingsValue, KplugError> {
        self.settings.get(key).inspect_err(|err| {
            tracing::error!(key = %key, error = %err, "settings key lookup failed");
        })
    }

    /// The merged snapshot, for typed accessors and plugin creation.
    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    /// The defaults the store was built from.
    pub fn defaults(&self) -> &BTreeMap<String, SettingsValue> {
        &self.defaults
    }

    /// Path of the config file that was merged, if any.
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Returns true if a config file was merged.
    pub fn file_loaded(&self) -> bool {
        self.config_file.is_some()
    }
}

impl std::ops::Deref for SettingsStore {
    type Target = Settings;

    fn deref(&self) -> &Settings {
        &self.settings
    }
}
