/* src/resolver.rs */

//!
//! Reads per-flag overrides from an [`OverrideSource`] and coerces them to
//! booleans.

use std::collections::BTreeMap;

use crate::flags::FlagNames;
use crate::source::OverrideSource;

/// The overrides found for a name set: a partial map from name to bool.
///
/// Names without an entry, or whose read failed, are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
	entries: BTreeMap<String, bool>,
}

impl Overrides {
	/// No overrides at all.
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn get(&self, name: &str) -> Option<bool> {
		self.entries.get(name).copied()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
		self.entries.iter().map(|(name, value)| (name.as_str(), *value))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Coerces a stored string to a flag value.
///
/// Only a case-insensitive `"true"` is true. Everything else, including
/// `"1"` and `"yes"`, is false.
pub fn coerce(raw: &str) -> bool {
	raw.to_lowercase() == "true"
}

/// Reads an override for every name in `names`, keyed by the exact name,
/// with a single [`OverrideSource::get_many`] call.
///
/// Read failures are swallowed and treated as absent.
pub fn resolve_overrides(source: &dyn OverrideSource, names: &FlagNames) -> Overrides {
	let keys: Vec<&str> = names.iter().collect();
	let mut entries = BTreeMap::new();

	for (name, read) in keys.iter().zip(source.get_many(&keys)) {
		match read {
			Ok(Some(raw)) => {
				entries.insert(name.to_string(), coerce(&raw));
			}
			Ok(None) => {}
			Err(_e) => {
				#[cfg(feature = "logging")]
				log::warn!("Ignoring override for '{}': {}", name, _e);
			}
		}
	}

	Overrides { entries }
}
