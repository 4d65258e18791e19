// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry and module loaders.
//!
//! Plugins are registered as factories under a logical name. Modules listed
//! in the `PLUGINS` setting are loaded through a [`ModuleLoader`], whose
//! registration routines populate the [`PluginRegistry`].

pub mod loader;
pub mod registry;

pub use loader::{ModuleInit, ModuleLoader, StaticModuleLoader};
pub use registry::{PluginRecord, PluginRegistry};
