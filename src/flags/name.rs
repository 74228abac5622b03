/* src/flags/name.rs */

use std::collections::HashMap;

use super::FlagError;

/// How the factory treats a name that appears more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(rename_all = "snake_case")
)]
pub enum DuplicatePolicy {
	/// Fail with [`FlagError::DuplicateName`].
	#[default]
	Reject,
	/// Keep the first occurrence and drop the rest.
	Dedup,
}

/// The closed, ordered set of flag names a system is built over.
///
/// Never empty and never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagNames {
	names: Box<[String]>,
	index: HashMap<String, usize>,
}

impl FlagNames {
	/// Builds the name set, validating it against `policy`.
	pub fn new<I, S>(names: I, policy: DuplicatePolicy) -> Result<Self, FlagError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut ordered = Vec::new();
		let mut index = HashMap::new();

		for name in names {
			let name = name.into();
			if index.contains_key(&name) {
				match policy {
					DuplicatePolicy::Reject => return Err(FlagError::DuplicateName { name }),
					DuplicatePolicy::Dedup => {
						#[cfg(feature = "logging")]
						log::warn!("Ignoring duplicate flag name '{}'.", name);
						continue;
					}
				}
			}
			index.insert(name.clone(), ordered.len());
			ordered.push(name);
		}

		if ordered.is_empty() {
			return Err(FlagError::Empty);
		}

		Ok(Self {
			names: ordered.into_boxed_slice(),
			index,
		})
	}

	/// Returns the number of names. Always at least one.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	/// Always false: the factory rejects an empty name set.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.index.contains_key(name)
	}

	/// Position of `name` in declaration order.
	pub fn position(&self, name: &str) -> Option<usize> {
		self.index.get(name).copied()
	}

	/// Names in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.names.iter().map(String::as_str)
	}

	pub(crate) fn lookup(&self, name: &str) -> Result<usize, FlagError> {
		self.position(name).ok_or_else(|| FlagError::unknown(name))
	}
}
