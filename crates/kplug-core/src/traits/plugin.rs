// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The capability contract: a name plus a creation entry point.

use std::any::Any;

use crate::error::KplugError;
use crate::settings::Settings;

/// A live plugin instance produced by a [`PluginFactory`].
pub trait Plugin: Send + Sync + 'static {
    /// Returns the name of the plugin this instance belongs to.
    fn name(&self) -> &str;

    /// Access the concrete type, so callers can downcast to the plugin's own API.
    fn as_any(&self) -> &dyn Any;
}

/// A registrable implementation.
///
/// The registry stores factories, not instances. The application looks a
/// factory up by name and calls [`create`](PluginFactory::create) itself,
/// usually handing over the settings the plugins were loaded with.
pub trait PluginFactory: Send + Sync + 'static {
    /// The logical identifier the factory is registered under.
    fn name(&self) -> &str;

    /// One-line description for listings and documentation output.
    fn description(&self) -> &str {
        ""
    }

    /// Create a new plugin instance.
    fn create(&self, settings: &Settings) -> Result<Box<dyn Plugin>, KplugError>;
}
