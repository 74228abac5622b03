/* src/system/mod.rs */

//!
//! The factory: a feature system built over one closed set of flag names,
//! with its accessors and gate.

mod gate;
mod options;

pub use gate::Gate;
pub use options::{
	DEFAULT_EVENT_CAPACITY, DuplicatePolicy, MissingScopePolicy, Options, ResolvePolicy,
};

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::context::Context;
use crate::flags::{FlagError, FlagNames, FlagPatch, FlagSet, FlagValue};
use crate::resolver::{Overrides, resolve_overrides};
use crate::scope::{FlagWriter, Scope};
use crate::source::OverrideSource;

static NEXT_SYSTEM_ID: AtomicU64 = AtomicU64::new(1);

/// A feature system: scope entry point, accessors and gates, all closed over
/// the same flag names.
///
/// Building a system has no side effects; state lives in the scopes
/// entered later. Cloning is cheap and yields the same system.
#[derive(Clone)]
pub struct FeatureSystem {
	inner: Arc<SystemInner>,
}

struct SystemInner {
	id: u64,
	names: Arc<FlagNames>,
	source: Option<Arc<dyn OverrideSource>>,
	options: Options,
}

/// Builder for [`FeatureSystem`].
pub struct FeatureSystemBuilder {
	names: Vec<String>,
	source: Option<Arc<dyn OverrideSource>>,
	options: Options,
}

impl FeatureSystemBuilder {
	pub fn new<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			names: names.into_iter().map(Into::into).collect(),
			source: None,
			options: Options::default(),
		}
	}

	/// Sets the source overrides are read from.
	pub fn source(mut self, source: impl OverrideSource + 'static) -> Self {
		self.source = Some(Arc::new(source));
		self
	}

	/// Sets a source that is shared with other owners.
	pub fn shared_source(mut self, source: Arc<dyn OverrideSource>) -> Self {
		self.source = Some(source);
		self
	}

	pub fn options(mut self, options: Options) -> Self {
		self.options = options;
		self
	}

	pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
		self.options.duplicates = policy;
		self
	}

	pub fn resolve(mut self, policy: ResolvePolicy) -> Self {
		self.options.resolve = policy;
		self
	}

	pub fn missing_scope(mut self, policy: MissingScopePolicy) -> Self {
		self.options.missing_scope = policy;
		self
	}

	pub fn event_capacity(mut self, capacity: usize) -> Self {
		self.options.event_capacity = capacity;
		self
	}

	/// Validates the names and builds the system.
	pub fn build(self) -> Result<FeatureSystem, FlagError> {
		let names = FlagNames::new(self.names, self.options.duplicates)?;

		Ok(FeatureSystem {
			inner: Arc::new(SystemInner {
				id: NEXT_SYSTEM_ID.fetch_add(1, Ordering::Relaxed),
				names: Arc::new(names),
				source: self.source,
				options: self.options,
			}),
		})
	}
}

impl FeatureSystem {
	/// Builds a system with default options and no override source.
	pub fn new<I, S>(names: I) -> Result<Self, FlagError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		FeatureSystemBuilder::new(names).build()
	}

	pub fn builder<I, S>(names: I) -> FeatureSystemBuilder
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		FeatureSystemBuilder::new(names)
	}

	pub(crate) fn id(&self) -> u64 {
		self.inner.id
	}

	pub fn flag_names(&self) -> &Arc<FlagNames> {
		&self.inner.names
	}

	pub fn options(&self) -> &Options {
		&self.inner.options
	}

	/// A snapshot with every flag `Unknown`.
	pub fn unknown_flags(&self) -> FlagSet {
		FlagSet::unknown(Arc::clone(&self.inner.names))
	}

	/// Reads the current overrides for every flag. No source means none.
	pub fn resolve_overrides(&self) -> Overrides {
		match &self.inner.source {
			Some(source) => resolve_overrides(source.as_ref(), &self.inner.names),
			None => Overrides::empty(),
		}
	}

	/// Enters a new scope seeded with `initial`; missing flags start
	/// `Unknown` and overrides are applied on top.
	pub fn enter_scope(&self, initial: &FlagPatch) -> Result<Scope, FlagError> {
		Scope::enter(
			self.inner.id,
			Arc::clone(&self.inner.names),
			self.inner.source.clone(),
			&self.inner.options,
			initial,
		)
	}

	/// Reads one flag from the nearest scope of this system in `ctx`.
	pub fn read_flag(&self, ctx: &Context, name: &str) -> Result<FlagValue, FlagError> {
		self.inner.names.lookup(name)?;
		match self.nearest(ctx)? {
			Some(scope) => scope.flag(name),
			None => Ok(FlagValue::Unknown),
		}
	}

	/// Reads several flags from one snapshot, in order. Duplicates are
	/// allowed and resolved independently.
	pub fn read_flags(&self, ctx: &Context, names: &[&str]) -> Result<Vec<FlagValue>, FlagError> {
		for name in names {
			self.inner.names.lookup(name)?;
		}
		match self.nearest(ctx)? {
			Some(scope) => scope.flags(names),
			None => Ok(vec![FlagValue::Unknown; names.len()]),
		}
	}

	/// Returns the writer of the nearest scope of this system in `ctx`.
	///
	/// Fails with [`FlagError::MissingScope`] when there is none, whatever
	/// the missing-scope policy.
	pub fn write_flags(&self, ctx: &Context) -> Result<FlagWriter, FlagError> {
		ctx.nearest(self.inner.id)
			.map(Scope::writer)
			.ok_or(FlagError::MissingScope)
	}

	/// Returns a gate for `name`.
	pub fn gate(&self, name: &str) -> Result<Gate, FlagError> {
		self.inner.names.lookup(name)?;
		Ok(Gate {
			system: self.clone(),
			flag: name.to_string(),
		})
	}

	/// `Ok(None)` means no scope and the policy allows defaulting.
	fn nearest<'a>(&self, ctx: &'a Context) -> Result<Option<&'a Scope>, FlagError> {
		match (ctx.nearest(self.inner.id), self.inner.options.missing_scope) {
			(Some(scope), _) => Ok(Some(scope)),
			(None, MissingScopePolicy::Unknown) => Ok(None),
			(None, MissingScopePolicy::Error) => Err(FlagError::MissingScope),
		}
	}
}

impl fmt::Debug for FeatureSystem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FeatureSystem")
			.field("id", &self.inner.id)
			.field("names", &self.inner.names)
			.field("has_source", &self.inner.source.is_some())
			.field("options", &self.inner.options)
			.finish()
	}
}
