//! Persisted theme preference.

use std::cell::RefCell;
use std::collections::HashMap;

use log::warn;

use super::waving_dots::ThemeMode;

/// Storage key holding `"light"` or `"dark"`.
pub const THEME_KEY: &str = "theme";

/// Minimal string key/value store.
pub trait PreferenceStore {
	fn load(&self, key: &str) -> Option<String>;
	fn save(&self, key: &str, value: &str);
}

/// Browser `localStorage`. Missing or blocked storage behaves as empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
	fn storage() -> Option<web_sys::Storage> {
		web_sys::window()?.local_storage().ok().flatten()
	}
}

impl PreferenceStore for LocalStorage {
	fn load(&self, key: &str) -> Option<String> {
		Self::storage()?.get_item(key).ok().flatten()
	}

	fn save(&self, key: &str, value: &str) {
		let Some(storage) = Self::storage() else {
			warn!("waving-dots: localStorage unavailable, preference not saved");
			return;
		};
		if storage.set_item(key, value).is_err() {
			warn!("waving-dots: failed to save preference {}", key);
		}
	}
}

/// In-memory store for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
	values: RefCell<HashMap<String, String>>,
}

impl PreferenceStore for MemoryStore {
	fn load(&self, key: &str) -> Option<String> {
		self.values.borrow().get(key).cloned()
	}

	fn save(&self, key: &str, value: &str) {
		self.values
			.borrow_mut()
			.insert(key.to_string(), value.to_string());
	}
}

/// Theme stored in `store`, defaulting to dark.
pub fn load_theme(store: &impl PreferenceStore) -> ThemeMode {
	ThemeMode::from_preference(store.load(THEME_KEY).as_deref())
}

pub fn save_theme(store: &impl PreferenceStore, mode: ThemeMode) {
	store.save(THEME_KEY, mode.as_str());
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_store_defaults_to_dark() {
		assert_eq!(load_theme(&MemoryStore::default()), ThemeMode::Dark);
	}

	#[test]
	fn saved_theme_is_read_back() {
		let store = MemoryStore::default();
		save_theme(&store, ThemeMode::Light);
		assert_eq!(store.load(THEME_KEY).as_deref(), Some("light"));
		assert_eq!(load_theme(&store), ThemeMode::Light);

		save_theme(&store, ThemeMode::Dark);
		assert_eq!(load_theme(&store), ThemeMode::Dark);
	}

	#[test]
	fn unknown_value_reads_as_dark() {
		let store = MemoryStore::default();
		store.save(THEME_KEY, "sepia");
		assert_eq!(load_theme(&store), ThemeMode::Dark);
	}
}
