// SPDX-FileCopyrightText: 2026 Kplug Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide settings slot.
//!
//! Stores built by [`SettingsStore`](crate::SettingsStore) are independent.
//! Code that needs the application's settings without having them passed in
//! reads them from here, after bootstrap has published them. Publishing again
//! swaps the whole snapshot; holders of an earlier `Arc` keep the old one.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use kplug_core::Settings;

static CURRENT: ArcSwapOption<Settings> = ArcSwapOption::const_empty();

/// Make `settings` the process-wide snapshot, replacing any previous one.
pub fn publish(settings: Arc<Settings>) {
    tracing::debug!(keys = settings.len(), "publishing process-wide settings");
    CURRENT.store(Some(settings));
}

/// The most recently published snapshot, if any.
pub fn current() -> Option<Arc<Settings>> {
    CURRENT.load_full()
}

/// Remove the published snapshot.
pub fn clear() {
    CURRENT.store(None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use kplug_core::SettingsValue;
    use serial_test::serial;
    use std::collections::BTreeMap;

    fn snapshot(value: &str) -> Arc<Settings> {
        let mut values = BTreeMap::new();
        values.insert("A".to_string(), SettingsValue::from(value));
        Arc::new(Settings::from_map(values))
    }

    #[test]
    #[serial]
    fn publish_then_read_back() {
        clear();
        assert!(current().is_none());

        publish(snapshot("a"));
        let seen = current().unwrap();
        assert_eq!(seen.get_str("A").unwrap(), "a");
        clear();
    }

    #[test]
    #[serial]
    fn republish_keeps_old_handles_intact() {
        publish(snapshot("first"));
        let old = current().unwrap();

        publish(snapshot("second"));
        assert_eq!(old.get_str("A").unwrap(), "first");
        assert_eq!(current().unwrap().get_str("A").unwrap(), "second");
        clear();
    }
}
