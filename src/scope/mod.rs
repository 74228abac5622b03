/* src/scope/mod.rs */

//!
//! Scopes: the owner of one live flag snapshot and the channel that
//! propagates it to every consumer within the scope.

mod listen;
mod read;
mod write;

#[cfg(feature = "events")]
mod event;
#[cfg(feature = "stream")]
mod stream;

pub use listen::Subscription;
pub use write::FlagWriter;

#[cfg(feature = "events")]
pub use event::FlagEvent;
#[cfg(feature = "stream")]
pub use stream::FlagStream;

use std::fmt;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use arc_swap::ArcSwap;

use crate::flags::{FlagError, FlagNames, FlagPatch, FlagSet};
use crate::resolver::{Overrides, resolve_overrides};
use crate::source::OverrideSource;
use crate::system::{Options, ResolvePolicy};

pub(crate) type Listener = Arc<dyn Fn(&Arc<FlagSet>) + Send + Sync>;

/// A propagation scope holding the current flag snapshot.
///
/// Uses RCU (Read-Copy-Update) so every reader sees one whole snapshot and
/// writers always publish a brand-new one. Cloning a `Scope` is cheap and
/// yields another handle to the same scope; the scope is torn down when the
/// last handle is dropped.
#[derive(Clone)]
pub struct Scope {
	pub(crate) inner: Arc<ScopeInner>,
}

pub(crate) struct ScopeInner {
	pub(crate) system_id: u64,
	pub(crate) names: Arc<FlagNames>,
	pub(crate) source: Option<Arc<dyn OverrideSource>>,
	pub(crate) resolve: ResolvePolicy,
	pub(crate) snapshot: ArcSwap<FlagSet>,
	pub(crate) version: AtomicU64,
	pub(crate) listeners: RwLock<Vec<(u64, Listener)>>,
	pub(crate) next_listener: AtomicU64,
	pub(crate) pending: Mutex<VecDeque<write::Publish>>,
	pub(crate) dispatching: AtomicBool,
	#[cfg(feature = "events")]
	pub(crate) events: tokio::sync::broadcast::Sender<FlagEvent>,
}

impl Scope {
	/// Mounts a scope: total-fill `initial`, then apply the overrides
	/// resolved at mount time.
	pub(crate) fn enter(
		system_id: u64,
		names: Arc<FlagNames>,
		source: Option<Arc<dyn OverrideSource>>,
		options: &Options,
		initial: &FlagPatch,
	) -> Result<Self, FlagError> {
		let seeded = FlagSet::unknown(Arc::clone(&names)).patched(initial)?;
		let overrides = match &source {
			Some(source) => resolve_overrides(source.as_ref(), &names),
			None => Overrides::empty(),
		};
		let mounted = seeded.overridden(&overrides);

		#[cfg(feature = "logging")]
		log::debug!(
			"Entered flag scope ({} flags, {} overridden at mount).",
			names.len(),
			overrides.len()
		);

		Ok(Self {
			inner: Arc::new(ScopeInner {
				system_id,
				names,
				source,
				resolve: options.resolve,
				snapshot: ArcSwap::from_pointee(mounted),
				version: AtomicU64::new(0),
				listeners: RwLock::new(Vec::new()),
				next_listener: AtomicU64::new(0),
				pending: Mutex::new(VecDeque::new()),
				dispatching: AtomicBool::new(false),
				#[cfg(feature = "events")]
				events: tokio::sync::broadcast::channel(options.event_capacity.max(1)).0,
			}),
		})
	}

	/// Returns a context rooted at this scope.
	pub fn context(&self) -> crate::Context {
		crate::Context::root().provide(self)
	}

	pub(crate) fn system_id(&self) -> u64 {
		self.inner.system_id
	}
}

impl ScopeInner {
	pub(crate) fn current_overrides(&self) -> Overrides {
		match (&self.source, self.resolve) {
			(Some(source), ResolvePolicy::OnWrite) => {
				resolve_overrides(source.as_ref(), &self.names)
			}
			_ => Overrides::empty(),
		}
	}

	pub(crate) fn bump_version(&self) -> u64 {
		self.version.fetch_add(1, Ordering::SeqCst) + 1
	}
}

impl fmt::Debug for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Scope")
			.field("version", &self.version())
			.field("flags", &self.snapshot())
			.finish()
	}
}
