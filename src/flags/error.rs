/* src/flags/error.rs */

/// Errors raised by the flag system. All of them are caller errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagError {
	/// The factory was given no flag names.
	#[error("flag name set must not be empty")]
	Empty,
	/// The factory was given the same name twice under `DuplicatePolicy::Reject`.
	#[error("duplicate flag name: {name}")]
	DuplicateName { name: String },
	/// A name outside the closed flag set was used.
	#[error("unknown flag: {name}")]
	UnknownFlag { name: String },
	/// No scope of this system is provided by the context.
	#[error("no flag scope provided for this context")]
	MissingScope,
	/// Every handle to the scope was dropped before the write.
	#[error("flag scope has been torn down")]
	ScopeClosed,
}

impl FlagError {
	/// Returns true for errors raised while building the factory.
	pub fn is_configuration(&self) -> bool {
		matches!(self, Self::Empty | Self::DuplicateName { .. })
	}

	pub(crate) fn unknown(name: &str) -> Self {
		Self::UnknownFlag {
			name: name.to_string(),
		}
	}
}
