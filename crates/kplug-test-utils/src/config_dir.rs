// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary directories holding config files.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary search directory, removed on drop.
pub struct ConfigDir {
    dir: TempDir,
}

impl ConfigDir {
    /// Create an empty directory.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Write `content` to `relative` inside the directory, creating parent
    /// directories as needed. Returns the full path.
    pub fn write(&self, relative: impl AsRef<Path>, content: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
