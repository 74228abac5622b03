/* src/flags/patch.rs */

use super::FlagValue;

/// A partial flag set: the values a caller wants to set, keyed by name.
///
/// Later entries for the same name win. Setting `FlagValue::Unknown` is
/// allowed and resets the flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagPatch {
	entries: Vec<(String, FlagValue)>,
}

impl FlagPatch {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert.
	pub fn set(mut self, name: impl Into<String>, value: impl Into<FlagValue>) -> Self {
		self.insert(name, value);
		self
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FlagValue>) {
		self.entries.push((name.into(), value.into()));
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, FlagValue)> {
		self.entries.iter().map(|(name, value)| (name.as_str(), *value))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<K, V> FromIterator<(K, V)> for FlagPatch
where
	K: Into<String>,
	V: Into<FlagValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			entries: iter
				.into_iter()
				.map(|(name, value)| (name.into(), value.into()))
				.collect(),
		}
	}
}
