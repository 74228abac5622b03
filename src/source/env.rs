/* src/source/env.rs */

use std::env::{self, VarError};

use super::{OverrideSource, SourceError};

/// Reads overrides from the process environment.
///
/// The key looked up is `prefix + flag name`, case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	/// Looks up flag names as-is.
	pub fn new() -> Self {
		Self::default()
	}

	/// Looks up `prefix` followed by the flag name.
	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}
}

impl OverrideSource for EnvSource {
	fn get(&self, key: &str) -> Result<Option<String>, SourceError> {
		let var = format!("{}{}", self.prefix, key);
		match env::var(&var) {
			Ok(value) => Ok(Some(value)),
			Err(VarError::NotPresent) => Ok(None),
			Err(VarError::NotUnicode(_)) => Err(SourceError::NotUnicode { key: var }),
		}
	}
}
