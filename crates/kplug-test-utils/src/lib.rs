// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for kplug integration tests.
//!
//! # Components
//!
//! - [`MockFactory`] - Plugin factory with tagged, counted instances
//! - [`ConfigDir`] - Temporary search directory for config files

pub mod config_dir;
pub mod mock_plugin;

pub use config_dir::ConfigDir;
pub use mock_plugin::{registering, MockFactory, MockPlugin};
