/* src/scope/listen.rs */

use std::fmt;
use std::sync::atomic::Ordering;
use std::sync::{Arc, PoisonError, Weak};

use super::{Listener, Scope, ScopeInner};
use crate::flags::FlagSet;

impl Scope {
	/// Registers `listener` to run synchronously after every publish, with
	/// the snapshot that was published.
	///
	/// The listener stays registered until the returned [`Subscription`] is
	/// dropped or cancelled.
	pub fn on_change<F>(&self, listener: F) -> Subscription
	where
		F: Fn(&Arc<FlagSet>) + Send + Sync + 'static,
	{
		let id = self.inner.next_listener.fetch_add(1, Ordering::SeqCst);
		self.inner
			.listeners
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.push((id, Arc::new(listener)));

		Subscription {
			scope: Arc::downgrade(&self.inner),
			id,
		}
	}

	/// Number of registered listeners.
	pub fn listener_count(&self) -> usize {
		self.inner
			.listeners
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.len()
	}
}

impl ScopeInner {
	pub(crate) fn notify(&self, snapshot: &Arc<FlagSet>) {
		// Listeners run outside the lock so they may write or unsubscribe.
		let listeners: Vec<Listener> = self
			.listeners
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.iter()
			.map(|(_, listener)| Arc::clone(listener))
			.collect();

		#[cfg(feature = "logging")]
		log::trace!("Notifying {} flag listeners.", listeners.len());

		for listener in listeners {
			listener(snapshot);
		}
	}

	fn unsubscribe(&self, id: u64) {
		self.listeners
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.retain(|(listener_id, _)| *listener_id != id);
	}
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription {
	scope: Weak<ScopeInner>,
	id: u64,
}

impl Subscription {
	/// Unsubscribes now.
	pub fn cancel(self) {}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(scope) = self.scope.upgrade() {
			scope.unsubscribe(self.id);
		}
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription").field("id", &self.id).finish()
	}
}
