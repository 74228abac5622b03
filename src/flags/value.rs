/* src/flags/value.rs */

use std::fmt;

/// The value of a single flag.
///
/// With the `serde` feature this serializes as `Option<bool>`, so `Unknown`
/// round-trips through `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(from = "Option<bool>", into = "Option<bool>")
)]
pub enum FlagValue {
	/// Not set yet.
	#[default]
	Unknown,
	/// Explicitly on.
	Enabled,
	/// Explicitly off.
	Disabled,
}

impl FlagValue {
	/// Returns true only for `Enabled`. `Unknown` is not enabled.
	pub const fn is_enabled(self) -> bool {
		matches!(self, Self::Enabled)
	}

	pub const fn is_unknown(self) -> bool {
		matches!(self, Self::Unknown)
	}

	pub const fn as_bool(self) -> Option<bool> {
		match self {
			Self::Unknown => None,
			Self::Enabled => Some(true),
			Self::Disabled => Some(false),
		}
	}
}

impl From<bool> for FlagValue {
	fn from(value: bool) -> Self {
		if value { Self::Enabled } else { Self::Disabled }
	}
}

impl From<Option<bool>> for FlagValue {
	fn from(value: Option<bool>) -> Self {
		value.map_or(Self::Unknown, Self::from)
	}
}

impl From<FlagValue> for Option<bool> {
	fn from(value: FlagValue) -> Self {
		value.as_bool()
	}
}

impl fmt::Display for FlagValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Unknown => f.write_str("unknown"),
			Self::Enabled => f.write_str("true"),
			Self::Disabled => f.write_str("false"),
		}
	}
}
