/* src/source/mod.rs */

//!
//! Override sources: persistent string key-value stores the resolver reads
//! overrides from. This crate only ever reads them.

mod env;
mod layered;
mod memory;

pub use env::EnvSource;
pub use layered::LayeredSource;
pub use memory::MemorySource;

#[cfg(any(feature = "json", feature = "toml", feature = "yaml"))]
mod file;
#[cfg(any(feature = "json", feature = "toml", feature = "yaml"))]
pub use file::{FileFormat, FileSource};

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Errors reading from an override source.
///
/// The resolver treats every one of these as "no override".
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	/// IO error from the backing store.
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	/// The backing store exists but could not be decoded.
	#[error("parse error: {0}")]
	Parse(String),

	/// The stored value is not valid UTF-8.
	#[error("value for '{key}' is not valid unicode")]
	NotUnicode { key: String },

	/// A lock guarding the store was poisoned.
	#[error("source lock poisoned")]
	Poisoned,

	/// Generic error from a custom source.
	#[error("custom error: {0}")]
	Custom(String),
}

/// A read-only string key-value capability.
///
/// `Ok(None)` means the key is absent.
pub trait OverrideSource: Send + Sync {
	fn get(&self, key: &str) -> Result<Option<String>, SourceError>;

	/// Reads several keys, returning one result per key in order.
	///
	/// The resolver reads through this so a source backed by one document
	/// can load it once and answer every key from the same version.
	fn get_many(&self, keys: &[&str]) -> Vec<Result<Option<String>, SourceError>> {
		keys.iter().map(|key| self.get(key)).collect()
	}
}

impl<S: OverrideSource + ?Sized> OverrideSource for Arc<S> {
	fn get(&self, key: &str) -> Result<Option<String>, SourceError> {
		(**self).get(key)
	}

	fn get_many(&self, keys: &[&str]) -> Vec<Result<Option<String>, SourceError>> {
		(**self).get_many(keys)
	}
}

impl<S: OverrideSource + ?Sized> OverrideSource for Box<S> {
	fn get(&self, key: &str) -> Result<Option<String>, SourceError> {
		(**self).get(key)
	}

	fn get_many(&self, keys: &[&str]) -> Vec<Result<Option<String>, SourceError>> {
		(**self).get_many(keys)
	}
}

impl OverrideSource for BTreeMap<String, String> {
	fn get(&self, key: &str) -> Result<Option<String>, SourceError> {
		Ok(BTreeMap::get(self, key).cloned())
	}
}

impl OverrideSource for HashMap<String, String> {
	fn get(&self, key: &str) -> Result<Option<String>, SourceError> {
		Ok(HashMap::get(self, key).cloned())
	}
}
