/* src/system/gate.rs */

use super::FeatureSystem;
use crate::context::Context;
use crate::flags::FlagError;
use crate::scope::{Scope, Subscription};

/// Includes content only while one flag is strictly enabled.
///
/// `Disabled` and `Unknown` both close the gate.
#[derive(Debug, Clone)]
pub struct Gate {
	pub(super) system: FeatureSystem,
	pub(super) flag: String,
}

impl Gate {
	pub fn flag(&self) -> &str {
		&self.flag
	}

	/// Returns whether the gate is open for the nearest scope in `ctx`.
	pub fn is_open(&self, ctx: &Context) -> Result<bool, FlagError> {
		Ok(self.system.read_flag(ctx, &self.flag)?.is_enabled())
	}

	/// Builds and returns `content` when open, `None` otherwise.
	///
	/// `content` is not called while the gate is closed.
	pub fn render<T, F>(&self, ctx: &Context, content: F) -> Result<Option<T>, FlagError>
	where
		F: FnOnce() -> T,
	{
		Ok(self.is_open(ctx)?.then(content))
	}

	/// Calls `on_change` with the current state, then again after every
	/// publish of `scope`.
	///
	/// Fails with [`FlagError::MissingScope`] when `scope` belongs to another
	/// feature system.
	pub fn watch<F>(&self, scope: &Scope, on_change: F) -> Result<Subscription, FlagError>
	where
		F: Fn(bool) + Send + Sync + 'static,
	{
		if scope.system_id() != self.system.id() {
			return Err(FlagError::MissingScope);
		}

		let open = scope.flag(&self.flag)?.is_enabled();
		on_change(open);

		let flag = self.flag.clone();
		Ok(scope.on_change(move |snapshot| on_change(snapshot.is_enabled(&flag))))
	}
}
