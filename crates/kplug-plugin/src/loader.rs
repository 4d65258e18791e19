// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module loading: turning a module identifier from `PLUGINS` into
//! registrations.
//!
//! A "module" is a named registration routine. Modules are compiled in and
//! listed explicitly at startup through [`StaticModuleLoader`]; loading one
//! runs its routine against the registry it is given.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Mutex, PoisonError};

use kplug_core::KplugError;

use crate::registry::PluginRegistry;

/// A registration routine run when its module is loaded.
pub type ModuleInit = Box<dyn Fn(&PluginRegistry) -> Result<(), KplugError> + Send + Sync>;

/// Loads a named module, whose side effect is registering plugins.
pub trait ModuleLoader: Send + Sync {
    /// Load `module`, registering its plugins into `registry`.
    fn load(&self, module: &str, registry: &PluginRegistry) -> Result<(), KplugError>;
}

impl<T: ModuleLoader + ?Sized> ModuleLoader for &T {
    fn load(&self, module: &str, registry: &PluginRegistry) -> Result<(), KplugError> {
        (**self).load(module, registry)
    }
}

/// A loader over a fixed table of compiled-in modules.
///
/// Each module's routine runs at most once per loader: loading an already
/// loaded module is a no-op, the way a repeated import is. A routine that
/// fails is not marked loaded and runs again on the next attempt.
///
/// No lock is held while a routine runs, so routines may call back into the
/// loader. Loading a module from inside its own routine is a no-op.
#[derive(Default)]
pub struct StaticModuleLoader {
    modules: BTreeMap<String, ModuleInit>,
    states: Mutex<HashMap<String, ModuleState>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModuleState {
    Loading,
    Loaded,
}

impl StaticModuleLoader {
    /// Create a loader with no modules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module under `id`. A later call with the same id replaces it.
    pub fn module<F>(mut self, id: impl Into<String>, init: F) -> Self
    where
        F: Fn(&PluginRegistry) -> Result<(), KplugError> + Send + Sync + 'static,
    {
        self.modules.insert(id.into(), Box::new(init));
        self
    }

    /// Known module identifiers, sorted.
    pub fn module_ids(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    /// Returns true if `id` has been loaded successfully.
    pub fn is_loaded(&self, id: &str) -> bool {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .is_some_and(|state| *state == ModuleState::Loaded)
    }
}

impl ModuleLoader for StaticModuleLoader {
    fn load(&self, module: &str, registry: &PluginRegistry) -> Result<(), KplugError> {
        let init = self
            .modules
            .get(module)
            .ok_or_else(|| KplugError::ModuleNotFound {
                module: module.to_string(),
                known: self.module_ids(),
            })?;

        {
            let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
            match states.get(module) {
                Some(ModuleState::Loaded) => {
                    tracing::debug!(module, "module already loaded, skipping");
                    return Ok(());
                }
                Some(ModuleState::Loading) => {
                    tracing::debug!(module, "module is loading, skipping nested load");
                    return Ok(());
                }
                None => {
                    states.insert(module.to_string(), ModuleState::Loading);
                }
            }
        }

        tracing::debug!(module, "loading module");
        let result = init(registry);

        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        match result {
            Ok(()) => {
                states.insert(module.to_string(), ModuleState::Loaded);
                Ok(())
            }
            Err(err) => {
                states.remove(module);
                Err(err)
            }
        }
    }
}

impl fmt::Debug for StaticModuleLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticModuleLoader")
            .field("modules", &self.modules.keys().collect::<Vec<_>>())
            .finish()
    }
}
