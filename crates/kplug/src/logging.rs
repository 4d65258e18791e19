// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence when set. Otherwise every `kplug*` target
/// logs at `log_level` and everything else at `warn`. Calling this more than once
/// leaves the first subscriber in place.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

// Directive targets match by prefix, so `kplug` covers `kplug_core` and friends.
fn default_directives(log_level: &str) -> String {
    format!("kplug={log_level},warn")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_use_level_for_kplug_only() {
        assert_eq!(default_directives("debug"), "kplug=debug,warn");
    }

    #[test]
    fn directives_parse() {
        assert!(EnvFilter::try_new(default_directives("info")).is_ok());
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_tracing("info");
        init_tracing("debug");
    }
}
