// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock plugin factory for deterministic registry and bootstrap tests.
//!
//! `MockFactory` implements `PluginFactory` and hands out `MockPlugin`
//! instances that keep a copy of the settings they were created with.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use kplug_core::{KplugError, Plugin, PluginFactory, Settings};
use kplug_plugin::{ModuleInit, PluginRegistry};

/// A plugin instance created by [`MockFactory`].
#[derive(Debug, Clone)]
pub struct MockPlugin {
    name: String,
    tag: String,
    settings: Settings,
}

impl MockPlugin {
    /// The tag of the factory that created this instance.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The settings passed to `create`.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl Plugin for MockPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A factory that counts how many instances it created.
///
/// The tag doubles as the factory description, so two factories registered
/// under the same name can be told apart after lookup.
#[derive(Debug)]
pub struct MockFactory {
    name: String,
    tag: String,
    fail: bool,
    created: Arc<AtomicUsize>,
}

impl MockFactory {
    /// Create a factory registering under `name`, tagged with its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            tag: name.clone(),
            name,
            fail: false,
            created: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Make every `create` call fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Shared counter of successful `create` calls.
    pub fn created_counter(&self) -> Arc<AtomicUsize> {
        self.created.clone()
    }
}

impl PluginFactory for MockFactory {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.tag
    }

    fn create(&self, settings: &Settings) -> Result<Box<dyn Plugin>, KplugError> {
        if self.fail {
            return Err(KplugError::Plugin {
                name: self.name.clone(),
                message: "mock factory configured to fail".to_string(),
            });
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(plugin = %self.name, tag = %self.tag, "mock plugin created");
        Ok(Box::new(MockPlugin {
            name: self.name.clone(),
            tag: self.tag.clone(),
            settings: settings.clone(),
        }))
    }
}

/// A module registration routine that registers one [`MockFactory`] per name.
pub fn registering(names: &[&str]) -> ModuleInit {
    let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    Box::new(move |registry: &PluginRegistry| {
        for name in &names {
            registry.register(MockFactory::new(name.clone()));
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kplug_plugin::{ModuleLoader, StaticModuleLoader};

    #[test]
    fn creates_tagged_instances() {
        let factory = MockFactory::new("HelloWorldPlugin").with_tag("v2");
        let counter = factory.created_counter();

        let plugin = factory.create(&Settings::default()).unwrap();
        let mock = plugin.as_any().downcast_ref::<MockPlugin>().unwrap();
        assert_eq!(mock.name(), "HelloWorldPlugin");
        assert_eq!(mock.tag(), "v2");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failing_factory_returns_plugin_error() {
        let factory = MockFactory::new("Broken").failing();
        let err = factory.create(&Settings::default()).err().unwrap();
        assert!(matches!(err, KplugError::Plugin { .. }));
        assert_eq!(factory.created_counter().load(Ordering::SeqCst), 0);
    }

    #[test]
    fn registering_routine_registers_every_name() {
        let init = registering(&["A", "B"]);
        let loader = StaticModuleLoader::new().module("plugins.ab", init);
        let registry = PluginRegistry::new();

        loader.load("plugins.ab", &registry).unwrap();
        assert_eq!(registry.names(), vec!["A", "B"]);
    }
}
