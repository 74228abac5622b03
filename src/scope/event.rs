/* src/scope/event.rs */

use std::sync::Arc;

use crate::flags::{FlagSet, FlagValue};

/// Events emitted by a scope when a write is published.
#[derive(Debug, Clone)]
pub enum FlagEvent {
	/// A single flag changed value.
	Changed {
		name: String,
		old: FlagValue,
		new: FlagValue,
		version: u64,
	},
	/// A new snapshot replaced the old one. Sent once per write, after any
	/// `Changed` events for it.
	Replaced {
		old: Arc<FlagSet>,
		new: Arc<FlagSet>,
		version: u64,
	},
}

impl FlagEvent {
	pub fn version(&self) -> u64 {
		match self {
			Self::Changed { version, .. } | Self::Replaced { version, .. } => *version,
		}
	}
}
