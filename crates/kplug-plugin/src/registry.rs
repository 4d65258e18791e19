// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry mapping plugin names to factories.
//!
//! The `PluginRegistry` keeps two views over the same registrations: an
//! append-only history of every `register` call (duplicate names included)
//! and a name-keyed map where the most recent registration wins. Both live
//! behind a single lock so a registration updates them together.
//!
//! # Lifecycle
//!
//! The process-wide instance is created lazily by [`PluginRegistry::global`]
//! and lives until process exit. Registration is meant to happen during
//! bootstrap, before any lookup. [`PluginRegistry::clear`] is the teardown
//! hook for tests and orderly shutdown; nothing in the library calls it.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use kplug_core::{suggest, KplugError, PluginFactory};

static GLOBAL: LazyLock<PluginRegistry> = LazyLock::new(|| {
    tracing::info!("initializing plugin registry");
    PluginRegistry::new()
});

/// A single registration, as recorded in the history.
#[derive(Clone)]
pub struct PluginRecord {
    /// Name the factory was registered under.
    pub name: String,
    /// The registered factory.
    pub factory: Arc<dyn PluginFactory>,
}

impl fmt::Debug for PluginRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRecord")
            .field("name", &self.name)
            .field("description", &self.factory.description())
            .finish()
    }
}

#[derive(Default)]
struct RegistryState {
    history: Vec<PluginRecord>,
    current: HashMap<String, Arc<dyn PluginFactory>>,
}

/// Registry of plugin factories.
pub struct PluginRegistry {
    state: RwLock<RegistryState>,
}

impl PluginRegistry {
    /// Create a new empty registry, independent of the global one.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static PluginRegistry {
        &GLOBAL
    }

    /// Register a factory under its own name.
    ///
    /// Appends to the history and overwrites any current entry with the same
    /// name. Returns the factory handle unchanged, so registration can be
    /// chained into a binding without losing the concrete type.
    pub fn register<F: PluginFactory>(&self, factory: F) -> Arc<F> {
        let factory = Arc::new(factory);
        self.register_arc(factory.clone());
        factory
    }

    /// Register an already shared factory.
    pub fn register_arc(&self, factory: Arc<dyn PluginFactory>) {
        let name = factory.name().to_string();
        let mut state = self.write();
        state.history.push(PluginRecord {
            name: name.clone(),
            factory: factory.clone(),
        });
        let replaced = state.current.insert(name.clone(), factory).is_some();
        let registrations = state.history.len();
        drop(state);

        tracing::info!(plugin = %name, replaced, registrations, "registered plugin");
    }

    /// Get the current factory for `name`.
    ///
    /// Fails with [`KplugError::PluginNotFound`] listing every known name.
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn PluginFactory>, KplugError> {
        let state = self.read();
        if let Some(factory) = state.current.get(name) {
            tracing::info!(plugin = %name, "plugin lookup");
            return Ok(factory.clone());
        }

        let mut known: Vec<String> = state.current.keys().cloned().collect();
        drop(state);
        known.sort();
        let suggestion = suggest(name, known.iter().map(String::as_str));
        tracing::warn!(
            plugin = %name,
            known = ?known,
            "no plugin registered under this name"
        );
        Err(KplugError::PluginNotFound {
            name: name.to_string(),
            known,
            suggestion,
        })
    }

    /// Returns true if a factory is currently registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.read().current.contains_key(name)
    }

    /// Every registration ever performed, oldest first.
    pub fn history(&self) -> Vec<PluginRecord> {
        self.read().history.clone()
    }

    /// Currently registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().current.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of distinct registered names.
    pub fn len(&self) -> usize {
        self.read().current.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.read().current.is_empty()
    }

    /// Drop every registration and the history. Teardown only.
    pub fn clear(&self) {
        let mut state = self.write();
        state.history.clear();
        state.current.clear();
        tracing::debug!("plugin registry cleared");
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("PluginRegistry")
            .field("names", &state.current.keys().collect::<Vec<_>>())
            .field("registrations", &state.history.len())
            .finish()
    }
}
