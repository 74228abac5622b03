/* src/scope/read.rs */

use std::sync::Arc;
use std::sync::atomic::Ordering;

use super::Scope;
use crate::flags::{FlagError, FlagNames, FlagSet, FlagValue};

impl Scope {
	/// Returns the current snapshot. This is a wait-free operation.
	pub fn snapshot(&self) -> Arc<FlagSet> {
		self.inner.snapshot.load_full()
	}

	/// Returns the current value of one flag.
	pub fn flag(&self, name: &str) -> Result<FlagValue, FlagError> {
		self.inner.snapshot.load().get(name)
	}

	/// Returns one value per requested name, in order, all from the same
	/// snapshot. Duplicates are allowed.
	pub fn flags(&self, names: &[&str]) -> Result<Vec<FlagValue>, FlagError> {
		let snapshot = self.inner.snapshot.load();
		names.iter().map(|name| snapshot.get(name)).collect()
	}

	/// Number of snapshots published since mount. Mount itself is version 0.
	pub fn version(&self) -> u64 {
		self.inner.version.load(Ordering::SeqCst)
	}

	pub fn names(&self) -> &Arc<FlagNames> {
		&self.inner.names
	}

	/// Subscribes to flag change events.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<super::FlagEvent> {
		self.inner.events.subscribe()
	}

	/// Subscribes to flag change events as a stream.
	#[cfg(feature = "stream")]
	pub fn stream(&self) -> super::FlagStream {
		super::FlagStream::new(self.subscribe())
	}
}
