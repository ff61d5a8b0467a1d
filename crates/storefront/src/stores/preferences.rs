//! UI preferences: sidebar state and the founder-member popup dismissal.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{Persisted, PersistedState};
use crate::storage::{Storage, StorageError};

/// How long a dismissed founder-member popup stays hidden.
pub const POPUP_DISMISSAL_DAYS: i64 = 30;

/// Whether the navigation sidebar is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarState {
    pub open: bool,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self { open: true }
    }
}

impl PersistedState for SidebarState {
    const KEY: &'static str = "sidebar_state";
}

/// When the founder-member popup was dismissed and until when it stays hidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupDismissal {
    pub dismissed_until: Option<DateTime<Utc>>,
}

impl PopupDismissal {
    /// Hide the popup for [`POPUP_DISMISSAL_DAYS`] from `now`.
    pub fn dismiss(&mut self, now: DateTime<Utc>) {
        self.dismissed_until = Some(now + Duration::days(POPUP_DISMISSAL_DAYS));
    }

    /// Whether the popup should be shown at `now`.
    #[must_use]
    pub fn should_show(&self, now: DateTime<Utc>) -> bool {
        self.dismissed_until.is_none_or(|until| now >= until)
    }
}

impl PersistedState for PopupDismissal {
    const KEY: &'static str = "founder_member_popup_dismissed";
}

/// Both preferences, each under its own key.
#[derive(Debug)]
pub struct PreferencesStore {
    sidebar: Persisted<SidebarState>,
    popup: Persisted<PopupDismissal>,
}

impl PreferencesStore {
    /// Load both preferences from `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    pub fn load(storage: Arc<dyn Storage>) -> Result<Self, StorageError> {
        Ok(Self {
            sidebar: Persisted::load(Arc::clone(&storage))?,
            popup: Persisted::load(storage)?,
        })
    }

    #[must_use]
    pub fn sidebar_open(&self) -> bool {
        self.sidebar.state().open
    }

    /// Expand or collapse the sidebar.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn set_sidebar_open(&mut self, open: bool) -> Result<(), StorageError> {
        self.sidebar.update(|s| s.open = open)
    }

    /// Hide the founder-member popup for 30 days from `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn dismiss_founder_popup(&mut self, now: DateTime<Utc>) -> Result<(), StorageError> {
        self.popup.update(|p| p.dismiss(now))
    }

    #[must_use]
    pub fn should_show_founder_popup(&self, now: DateTime<Utc>) -> bool {
        self.popup.state().should_show(now)
    }

    #[must_use]
    pub fn founder_popup_dismissed_until(&self) -> Option<DateTime<Utc>> {
        self.popup.state().dismissed_until
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_sidebar_defaults_open() {
        let store = PreferencesStore::load(Arc::new(MemoryStorage::new())).unwrap();
        assert!(store.sidebar_open());
    }

    #[test]
    fn test_sidebar_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = PreferencesStore::load(storage.clone()).unwrap();
        store.set_sidebar_open(false).unwrap();
        let reloaded = PreferencesStore::load(storage).unwrap();
        assert!(!reloaded.sidebar_open());
    }

    #[test]
    fn test_popup_hidden_for_thirty_days() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = PreferencesStore::load(storage.clone()).unwrap();
        let now = Utc::now();
        assert!(store.should_show_founder_popup(now));

        store.dismiss_founder_popup(now).unwrap();
        let reloaded = PreferencesStore::load(storage).unwrap();
        assert!(!reloaded.should_show_founder_popup(now + Duration::days(29)));
        assert!(reloaded.should_show_founder_popup(now + Duration::days(30)));
        assert_eq!(
            reloaded.founder_popup_dismissed_until(),
            Some(now + Duration::days(30))
        );
    }
}
