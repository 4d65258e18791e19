// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config file lookup across an ordered list of search directories.
//!
//! The effective filename is taken from an environment variable when it is
//! set, otherwise the default filename is used. A relative filename is
//! joined under each search directory in turn and the first existing file
//! wins, so `KPLUG_CONFIG=conf/other.yaml` still searches every directory.
//! An absolute filename names exactly one candidate and is used verbatim.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use kplug_core::KplugError;

/// Default config filename.
pub const DEFAULT_CONFIG_FILENAME: &str = "config.yaml";

/// Default environment variable overriding the config filename.
pub const DEFAULT_FILENAME_ENV_VAR: &str = "KPLUG_CONFIG";

/// Locates the config file to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFileResolver {
    filename: String,
    env_var: String,
    search_dirs: Vec<PathBuf>,
}

impl Default for ConfigFileResolver {
    fn default() -> Self {
        Self {
            filename: DEFAULT_CONFIG_FILENAME.to_string(),
            env_var: DEFAULT_FILENAME_ENV_VAR.to_string(),
            search_dirs: vec![PathBuf::from(".")],
        }
    }
}

impl ConfigFileResolver {
    pub fn new(
        filename: impl Into<String>,
        env_var: impl Into<String>,
        search_dirs: Vec<PathBuf>,
    ) -> Self {
        Self {
            filename: filename.into(),
            env_var: env_var.into(),
            search_dirs,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Resolve against the process environment.
    pub fn resolve(&self) -> Result<PathBuf, KplugError> {
        self.resolve_with_env(|name| std::env::var_os(name))
    }

    /// Resolve with an explicit environment lookup.
    ///
    /// An override that is set but empty is ignored.
    pub fn resolve_with_env<E>(&self, env: E) -> Result<PathBuf, KplugError>
    where
        E: Fn(&str) -> Option<OsString>,
    {
        let filename = match env(&self.env_var).filter(|v| !v.is_empty()) {
            Some(value) => {
                tracing::debug!(
                    env_var = %self.env_var,
                    value = %value.to_string_lossy(),
                    "config filename overridden by environment"
                );
                PathBuf::from(value)
            }
            None => PathBuf::from(&self.filename),
        };

        let candidates = self.candidates(&filename);
        for candidate in &candidates {
            if candidate.is_file() {
                tracing::info!(path = %candidate.display(), "found config file");
                return Ok(candidate.clone());
            }
            tracing::debug!(path = %candidate.display(), "config file not present");
        }

        Err(KplugError::ConfigNotFound {
            filename: filename.display().to_string(),
            searched: candidates,
        })
    }

    fn candidates(&self, filename: &Path) -> Vec<PathBuf> {
        if filename.is_absolute() {
            vec![filename.to_path_buf()]
        } else {
            self.search_dirs.iter().map(|dir| dir.join(filename)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn no_env(_: &str) -> Option<OsString> {
        None
    }

    #[test]
    fn defaults_match_conventional_layout() {
        let resolver = ConfigFileResolver::default();
        assert_eq!(resolver.filename(), "config.yaml");
        assert_eq!(resolver.env_var(), "KPLUG_CONFIG");
        assert_eq!(resolver.search_dirs(), &[PathBuf::from(".")]);
    }

    #[test]
    fn finds_file_in_search_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), "KEY1: VAL1\n").unwrap();

        let resolver =
            ConfigFileResolver::new("config.yaml", "UNUSED", vec![dir.path().to_path_buf()]);
        let path = resolver.resolve_with_env(no_env).unwrap();
        assert_eq!(path, dir.path().join("config.yaml"));
    }

    #[test]
    fn first_matching_dir_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let empty = tempfile::tempdir().unwrap();
        fs::write(first.path().join("config.yaml"), "A: 1\n").unwrap();
        fs::write(second.path().join("config.yaml"), "A: 2\n").unwrap();

        let resolver = ConfigFileResolver::new(
            "config.yaml",
            "UNUSED",
            vec![
                empty.path().to_path_buf(),
                first.path().to_path_buf(),
                second.path().to_path_buf(),
            ],
        );
        assert_eq!(
            resolver.resolve_with_env(no_env).unwrap(),
            first.path().join("config.yaml")
        );
    }

    #[test]
    fn env_override_replaces_filename() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), "KEY1: VAL1\n").unwrap();
        fs::write(dir.path().join("other.yaml"), "KEY2: VAL2\n").unwrap();

        let resolver =
            ConfigFileResolver::new("config.yaml", "MY_CONF", vec![dir.path().to_path_buf()]);
        let path = resolver
            .resolve_with_env(|name| (name == "MY_CONF").then(|| OsString::from("other.yaml")))
            .unwrap();
        assert_eq!(path, dir.path().join("other.yaml"));
    }

    #[test]
    fn relative_override_is_joined_under_each_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("test")).unwrap();
        fs::write(dir.path().join("test/other.yaml"), "KEY2: VAL2\n").unwrap();

        let resolver =
            ConfigFileResolver::new("config.yaml", "MY_CONF", vec![dir.path().to_path_buf()]);
        let path = resolver
            .resolve_with_env(|_| Some(OsString::from("test/other.yaml")))
            .unwrap();
        assert_eq!(path, dir.path().join("test/other.yaml"));
    }

    #[test]
    fn absolute_override_is_used_verbatim() {
        let elsewhere = tempfile::tempdir().unwrap();
        let search = tempfile::tempdir().unwrap();
        let absolute = elsewhere.path().join("my.yaml");
        fs::write(&absolute, "A: 1\n").unwrap();

        let resolver =
            ConfigFileResolver::new("config.yaml", "MY_CONF", vec![search.path().to_path_buf()]);
        let value = absolute.clone().into_os_string();
        let path = resolver.resolve_with_env(|_| Some(value.clone())).unwrap();
        assert_eq!(path, absolute);
    }

    #[test]
    fn empty_override_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), "A: 1\n").unwrap();

        let resolver =
            ConfigFileResolver::new("config.yaml", "MY_CONF", vec![dir.path().to_path_buf()]);
        let path = resolver.resolve_with_env(|_| Some(OsString::new())).unwrap();
        assert_eq!(path, dir.path().join("config.yaml"));
    }

    #[test]
    fn directories_are_not_config_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("config.yaml")).unwrap();

        let resolver =
            ConfigFileResolver::new("config.yaml", "UNUSED", vec![dir.path().to_path_buf()]);
        assert!(resolver.resolve_with_env(no_env).is_err());
    }

    #[test]
    fn missing_everywhere_lists_all_candidates() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();

        let resolver = ConfigFileResolver::new(
            "config.yaml",
            "UNUSED",
            vec![a.path().to_path_buf(), b.path().to_path_buf()],
        );
        match resolver.resolve_with_env(no_env) {
            Err(KplugError::ConfigNotFound { filename, searched }) => {
                assert_eq!(filename, "config.yaml");
                assert_eq!(
                    searched,
                    vec![a.path().join("config.yaml"), b.path().join("config.yaml")]
                );
            }
            other => panic!("expected ConfigNotFound, got {other:?}"),
        }
    }

    #[test]
    fn no_search_dirs_is_not_found() {
        let resolver = ConfigFileResolver::new("config.yaml", "UNUSED", vec![]);
        assert!(matches!(
            resolver.resolve_with_env(no_env),
            Err(KplugError::ConfigNotFound { .. })
        ));
    }
}
