/* src/scope/write.rs */

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, Weak};

use super::{Scope, ScopeInner};
use crate::flags::{FlagError, FlagPatch, FlagSet};

impl Scope {
	/// Merges `patch` over the current snapshot, re-applies overrides and
	/// publishes the result.
	///
	/// The new snapshot is readable as soon as this returns. Subscribers
	/// receive it before this returns, except when the write is made while
	/// the scope is already dispatching (e.g. from a listener): it is then
	/// delivered right after the current publish, so every subscriber sees
	/// publishes in version order and ends on the latest snapshot.
	///
	/// Nothing is published if any name in `patch` is unknown.
	pub fn set_flags(&self, patch: &FlagPatch) -> Result<Arc<FlagSet>, FlagError> {
		self.inner.set_flags(patch)
	}

	/// Returns a writer bound to this scope that does not keep it alive.
	pub fn writer(&self) -> FlagWriter {
		FlagWriter {
			scope: Arc::downgrade(&self.inner),
		}
	}
}

impl ScopeInner {
	pub(crate) fn set_flags(&self, patch: &FlagPatch) -> Result<Arc<FlagSet>, FlagError> {
		self.snapshot.load().validate(patch)?;

		// Resolve outside rcu: the closure may run more than once.
		let overrides = self.current_overrides();

		// Swap, version and enqueue under the queue lock so publish order,
		// version order and delivery order agree across writers.
		let (next, version) = {
			let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);

			// Capture the published value inside rcu so subscribers get exactly it.
			let next: RefCell<Option<Arc<FlagSet>>> = RefCell::new(None);

			let previous = self.snapshot.rcu(|current| {
				let merged = Arc::new(current.merge(patch).overridden(&overrides));
				*next.borrow_mut() = Some(Arc::clone(&merged));
				merged
			});

			let next = next
				.into_inner()
				.unwrap_or_else(|| self.snapshot.load_full());

			let version = self.bump_version();
			pending.push_back(Publish {
				previous,
				next: Arc::clone(&next),
				version,
			});
			(next, version)
		};

		#[cfg(feature = "logging")]
		log::debug!(
			"Published flag snapshot v{} ({} patched, {} overridden).",
			version,
			patch.len(),
			overrides.len()
		);
		#[cfg(not(feature = "logging"))]
		let _ = version;

		self.drain();

		Ok(next)
	}

	/// Delivers queued publishes in version order.
	///
	/// A write made while a dispatch is running (from a listener, or from
	/// another thread) only enqueues; the running dispatch delivers it after
	/// the current publish has reached every listener and receiver.
	fn drain(&self) {
		loop {
			if self.dispatching.swap(true, Ordering::AcqRel) {
				return;
			}

			{
				let _guard = DispatchGuard(&self.dispatching);
				while let Some(publish) = self.next_pending() {
					self.notify(&publish.next);

					#[cfg(feature = "events")]
					self.emit_events(&publish.previous, &publish.next, publish.version);
				}
			}

			// A writer may have enqueued after the last pop but before the
			// flag was cleared.
			let empty = self
				.pending
				.lock()
				.unwrap_or_else(PoisonError::into_inner)
				.is_empty();
			if empty {
				return;
			}
		}
	}

	fn next_pending(&self) -> Option<Publish> {
		self.pending
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.pop_front()
	}

	#[cfg(feature = "events")]
	fn emit_events(&self, old: &Arc<FlagSet>, new: &Arc<FlagSet>, version: u64) {
		use super::FlagEvent;

		for (name, old_value, new_value) in old.changes(new) {
			let _ = self.events.send(FlagEvent::Changed {
				name: name.to_string(),
				old: old_value,
				new: new_value,
				version,
			});
		}

		let _ = self.events.send(FlagEvent::Replaced {
			old: Arc::clone(old),
			new: Arc::clone(new),
			version,
		});
	}
}

/// Clears the dispatching flag even if a listener panics.
struct DispatchGuard<'a>(&'a AtomicBool);

impl Drop for DispatchGuard<'_> {
	fn drop(&mut self) {
		self.0.store(false, Ordering::Release);
	}
}

/// One published snapshot waiting to be delivered.
pub(crate) struct Publish {
	#[cfg_attr(not(feature = "events"), allow(dead_code))]
	previous: Arc<FlagSet>,
	next: Arc<FlagSet>,
	#[cfg_attr(not(feature = "events"), allow(dead_code))]
	version: u64,
}

/// A write handle for one scope, as returned by `write_flags`.
///
/// Writing after the scope was torn down fails with
/// [`FlagError::ScopeClosed`].
#[derive(Debug, Clone)]
pub struct FlagWriter {
	scope: Weak<ScopeInner>,
}

impl FlagWriter {
	/// Applies `patch` to the scope. See [`Scope::set_flags`].
	pub fn write(&self, patch: &FlagPatch) -> Result<Arc<FlagSet>, FlagError> {
		let scope = self.scope.upgrade().ok_or(FlagError::ScopeClosed)?;
		scope.set_flags(patch)
	}

	/// Returns false once the scope has been torn down.
	pub fn is_open(&self) -> bool {
		self.scope.strong_count() > 0
	}
}
