/* src/system/options.rs */

pub use crate::flags::DuplicatePolicy;

/// Default event channel capacity per scope.
pub const DEFAULT_EVENT_CAPACITY: usize = 100;

/// When a scope reads its override source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(rename_all = "snake_case")
)]
pub enum ResolvePolicy {
	/// At mount and again on every write.
	#[default]
	OnWrite,
	/// At mount only. Writes are merged as given.
	OnMount,
}

/// What reads do when the context provides no scope of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(rename_all = "snake_case")
)]
pub enum MissingScopePolicy {
	/// Answer every read with `FlagValue::Unknown`.
	#[default]
	Unknown,
	/// Fail with `FlagError::MissingScope`.
	Error,
}

/// Behavior switches for a feature system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
	feature = "serde",
	derive(serde::Serialize, serde::Deserialize),
	serde(default)
)]
pub struct Options {
	pub duplicates: DuplicatePolicy,
	pub resolve: ResolvePolicy,
	pub missing_scope: MissingScopePolicy,
	/// Capacity of each scope's event channel. Only used with `events`.
	///
	/// Events may be dropped for subscribers that fall this far behind.
	pub event_capacity: usize,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			duplicates: DuplicatePolicy::default(),
			resolve: ResolvePolicy::default(),
			missing_scope: MissingScopePolicy::default(),
			event_capacity: DEFAULT_EVENT_CAPACITY,
		}
	}
}
