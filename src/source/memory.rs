/* src/source/memory.rs */

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{OverrideSource, SourceError};

/// An in-memory source useful for testing and embedded environments.
///
/// Interior-mutable so overrides can change while scopes hold the source.
#[derive(Debug, Default)]
pub struct MemorySource {
	data: RwLock<BTreeMap<String, String>>,
}

impl MemorySource {
	/// Creates a new empty MemorySource.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces an entry. Returns the previous value, if any.
	pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
		match self.data.write() {
			Ok(mut data) => data.insert(key.into(), value.into()),
			Err(poisoned) => poisoned.into_inner().insert(key.into(), value.into()),
		}
	}

	/// Removes an entry. Returns the removed value, if any.
	pub fn remove(&self, key: &str) -> Option<String> {
		match self.data.write() {
			Ok(mut data) => data.remove(key),
			Err(poisoned) => poisoned.into_inner().remove(key),
		}
	}

	pub fn clear(&self) {
		match self.data.write() {
			Ok(mut data) => data.clear(),
			Err(poisoned) => poisoned.into_inner().clear(),
		}
	}
}

impl<K, V> FromIterator<(K, V)> for MemorySource
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let data = iter
			.into_iter()
			.map(|(key, value)| (key.into(), value.into()))
			.collect();
		Self {
			data: RwLock::new(data),
		}
	}
}

impl OverrideSource for MemorySource {
	fn get(&self, key: &str) -> Result<Option<String>, SourceError> {
		let data = self.data.read().map_err(|_| SourceError::Poisoned)?;
		Ok(data.get(key).cloned())
	}
}
