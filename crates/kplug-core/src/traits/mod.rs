// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits a registrable plugin must implement.

pub mod plugin;

pub use plugin::{Plugin, PluginFactory};
