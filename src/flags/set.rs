/* src/flags/set.rs */

use std::sync::Arc;

use super::{FlagError, FlagNames, FlagPatch, FlagValue};
use crate::resolver::Overrides;

/// A total snapshot of flag values: every name has an entry.
///
/// Snapshots are immutable once published by a scope; every change
/// produces a new `FlagSet`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet {
	names: Arc<FlagNames>,
	values: Box<[FlagValue]>,
}

impl FlagSet {
	/// Creates a snapshot with every flag `Unknown`.
	pub fn unknown(names: Arc<FlagNames>) -> Self {
		let values = vec![FlagValue::Unknown; names.len()].into_boxed_slice();
		Self { names, values }
	}

	/// Returns the value of `name`.
	pub fn get(&self, name: &str) -> Result<FlagValue, FlagError> {
		self.names.lookup(name).map(|idx| self.values[idx])
	}

	/// Returns true when `name` exists and is `Enabled`.
	pub fn is_enabled(&self, name: &str) -> bool {
		self.get(name).is_ok_and(FlagValue::is_enabled)
	}

	pub fn names(&self) -> &Arc<FlagNames> {
		&self.names
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterates `(name, value)` pairs in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, FlagValue)> {
		self.names.iter().zip(self.values.iter().copied())
	}

	/// Returns a new snapshot with `patch` merged over this one.
	///
	/// Fails without producing anything if any patch name is unknown.
	pub fn patched(&self, patch: &FlagPatch) -> Result<Self, FlagError> {
		self.validate(patch)?;
		Ok(self.merge(patch))
	}

	/// Returns a new snapshot where every resolved override replaces the
	/// current value.
	pub fn overridden(&self, overrides: &Overrides) -> Self {
		let mut values = self.values.clone();
		for (name, value) in overrides.iter() {
			if let Some(idx) = self.names.position(name) {
				values[idx] = FlagValue::from(value);
			}
		}
		Self {
			names: Arc::clone(&self.names),
			values,
		}
	}

	/// Names whose value differs between `self` and `next`, with both values.
	pub fn changes<'a>(
		&'a self,
		next: &'a FlagSet,
	) -> impl Iterator<Item = (&'a str, FlagValue, FlagValue)> + 'a {
		self.iter()
			.zip(next.values.iter().copied())
			.filter(|((_, old), new)| old != new)
			.map(|((name, old), new)| (name, old, new))
	}

	pub(crate) fn validate(&self, patch: &FlagPatch) -> Result<(), FlagError> {
		for (name, _) in patch.iter() {
			self.names.lookup(name)?;
		}
		Ok(())
	}

	/// Merge without validation; unknown names are skipped.
	pub(crate) fn merge(&self, patch: &FlagPatch) -> Self {
		let mut values = self.values.clone();
		for (name, value) in patch.iter() {
			if let Some(idx) = self.names.position(name) {
				values[idx] = value;
			}
		}
		Self {
			names: Arc::clone(&self.names),
			values,
		}
	}
}

#[cfg(feature = "serde")]
impl serde::Serialize for FlagSet {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		use serde::ser::SerializeMap;

		let mut map = serializer.serialize_map(Some(self.len()))?;
		for (name, value) in self.iter() {
			map.serialize_entry(name, &value)?;
		}
		map.end()
	}
}
